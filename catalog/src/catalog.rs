//! In-memory produce catalog and its read queries.

use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::Path;

use serde::Serialize;
use tracing::debug;

use crate::error::CatalogError;
use crate::produce::Produce;
use crate::query::{ListRequest, Page, Pagination, ProduceQuery};

#[cfg(test)]
#[path = "catalog_test.rs"]
mod catalog_test;

/// Default `low_stock` threshold.
pub const LOW_STOCK_THRESHOLD: u32 = 10;
/// Default `search` result cap.
pub const SEARCH_LIMIT: usize = 10;

const SAMPLE: &str = include_str!("../data/sample.json");

/// Distinct categories and aisles, each sorted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Categories {
    pub categories: Vec<String>,
    pub aisles: Vec<String>,
}

/// Inventory totals across the whole catalog.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Stats {
    pub total_items: usize,
    pub in_stock: usize,
    pub out_of_stock: usize,
    /// In stock, but at or under the threshold.
    pub low_stock: usize,
    pub categories: BTreeMap<String, usize>,
    /// Sum of price times stock.
    pub total_value: f64,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Catalog {
    items: Vec<Produce>,
}

impl Catalog {
    #[must_use]
    pub fn new(items: Vec<Produce>) -> Self {
        Self { items }
    }

    /// Parse a JSON array of produce records.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Load`] when `raw` is not a valid record array.
    pub fn from_json(raw: &str) -> Result<Self, CatalogError> {
        let items: Vec<Produce> = serde_json::from_str(raw)?;
        debug!(items = items.len(), "catalog loaded");
        Ok(Self { items })
    }

    /// Read a catalog file.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Io`] when the file cannot be read and
    /// [`CatalogError::Load`] when it does not parse.
    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        let raw = fs::read_to_string(path).map_err(|source| CatalogError::Io { path: path.to_path_buf(), source })?;
        Self::from_json(&raw)
    }

    /// The built-in six-item demo inventory.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Load`] if the bundled data is malformed.
    pub fn sample() -> Result<Self, CatalogError> {
        Self::from_json(SAMPLE)
    }

    #[must_use]
    pub fn items(&self) -> &[Produce] {
        &self.items
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    #[must_use]
    pub fn get(&self, id: &str) -> Option<&Produce> {
        self.items.iter().find(|p| p.id == id)
    }

    /// Filter, sort, and paginate.
    ///
    /// # Errors
    ///
    /// Returns an error when the query's page, limit, or sort field is invalid.
    pub fn list(&self, query: &ProduceQuery) -> Result<Page<&Produce>, CatalogError> {
        let request = ListRequest::from_query(query)?;
        let mut matched: Vec<&Produce> = self.items.iter().filter(|p| request.filter.matches(p)).collect();
        matched.sort_by(|a, b| request.sort.compare(a, b));

        let pagination = Pagination::new(request.page, matched.len());
        let items = matched.into_iter().skip(request.page.offset()).take(request.page.limit).collect();
        Ok(Page { items, pagination })
    }

    #[must_use]
    pub fn categories(&self) -> Categories {
        let categories: BTreeSet<&str> = self.items.iter().map(|p| p.category.as_str()).collect();
        let aisles: BTreeSet<&str> = self.items.iter().map(|p| p.location.aisle.as_str()).collect();
        Categories {
            categories: categories.into_iter().map(str::to_owned).collect(),
            aisles: aisles.into_iter().map(str::to_owned).collect(),
        }
    }

    #[must_use]
    pub fn stats(&self, low_stock_threshold: u32) -> Stats {
        let mut categories = BTreeMap::new();
        for item in &self.items {
            *categories.entry(item.category.clone()).or_insert(0) += 1;
        }
        let in_stock = self.items.iter().filter(|p| p.in_stock()).count();
        Stats {
            total_items: self.items.len(),
            in_stock,
            out_of_stock: self.items.len() - in_stock,
            low_stock: self.items.iter().filter(|p| p.in_stock() && p.stock <= low_stock_threshold).count(),
            categories,
            total_value: self.items.iter().fold(0.0, |sum, p| sum + p.price * f64::from(p.stock)),
        }
    }

    /// Items in `aisle` (and `section`, when given), by shelf then name.
    #[must_use]
    pub fn by_location(&self, aisle: &str, section: Option<&str>) -> Vec<&Produce> {
        let mut found: Vec<&Produce> = self
            .items
            .iter()
            .filter(|p| p.location.aisle == aisle && section.is_none_or(|s| p.location.section == s))
            .collect();
        found.sort_by(|a, b| a.location.shelf.cmp(&b.location.shelf).then_with(|| a.name.cmp(&b.name)));
        found
    }

    /// Items with at most `threshold` units left, fewest first.
    #[must_use]
    pub fn low_stock(&self, threshold: u32) -> Vec<&Produce> {
        let mut found: Vec<&Produce> = self.items.iter().filter(|p| p.stock <= threshold).collect();
        found.sort_by_key(|p| p.stock);
        found
    }

    /// Free-text search ranked by how many terms hit how many fields.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::EmptySearch`] for blank text and
    /// [`CatalogError::InvalidLimit`] for a zero limit.
    pub fn search(&self, text: &str, limit: usize) -> Result<Vec<&Produce>, CatalogError> {
        let terms: Vec<String> = text.split_whitespace().map(str::to_lowercase).collect();
        if terms.is_empty() {
            return Err(CatalogError::EmptySearch);
        }
        if limit == 0 {
            return Err(CatalogError::InvalidLimit(limit.to_string()));
        }

        let mut scored: Vec<(usize, &Produce)> = self
            .items
            .iter()
            .filter_map(|p| {
                let fields: Vec<String> = p.searchable_fields().map(str::to_lowercase).collect();
                let score = terms
                    .iter()
                    .map(|term| fields.iter().filter(|f| f.contains(term.as_str())).count())
                    .sum::<usize>();
                (score > 0).then_some((score, p))
            })
            .collect();
        scored.sort_by(|(sa, a), (sb, b)| sb.cmp(sa).then_with(|| a.name.cmp(&b.name)));
        Ok(scored.into_iter().take(limit).map(|(_, p)| p).collect())
    }
}
