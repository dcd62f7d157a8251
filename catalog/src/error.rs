use std::io;
use std::path::PathBuf;

/// Errors from building a catalog query or loading a catalog.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("invalid page `{0}`: expected an integer >= 1")]
    InvalidPage(String),
    #[error("invalid limit `{0}`: expected an integer between 1 and {max}", max = crate::query::MAX_LIMIT)]
    InvalidLimit(String),
    #[error("unknown sort field `{0}`; expected one of name, price, stock, category")]
    UnknownSortField(String),
    #[error("search text is required")]
    EmptySearch,
    #[error("failed to read catalog {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("catalog is not valid JSON: {0}")]
    Load(#[from] serde_json::Error),
}
