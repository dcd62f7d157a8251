//! List-query parsing: raw string parameters to a validated filter, sort, and page.
//!
//! DESIGN
//! ======
//! `ProduceQuery` mirrors a URL query string: every field is an optional
//! string. Parsing is strict about page, limit, and sort field (those
//! produce a [`CatalogError`]) and lenient about flags: only the literal
//! `"true"` turns a flag on, anything else leaves it off. An unrecognised
//! sort order falls back to ascending.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::error::CatalogError;
use crate::produce::Produce;

#[cfg(test)]
#[path = "query_test.rs"]
mod query_test;

pub const DEFAULT_PAGE: usize = 1;
pub const DEFAULT_LIMIT: usize = 20;
pub const MAX_LIMIT: usize = 100;

/// Raw list parameters, as they arrive from a query string.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProduceQuery {
    pub page: Option<String>,
    pub limit: Option<String>,
    pub category: Option<String>,
    pub aisle: Option<String>,
    pub search: Option<String>,
    pub in_stock: Option<String>,
    pub organic: Option<String>,
    pub local: Option<String>,
    pub sort_by: Option<String>,
    pub sort_order: Option<String>,
}

fn flag(value: Option<&String>) -> bool {
    value.is_some_and(|v| v == "true")
}

fn non_empty(value: Option<&String>) -> Option<String> {
    value.filter(|v| !v.is_empty()).cloned()
}

// =============================================================================
// FILTER
// =============================================================================

/// Predicate over produce items. Every set condition must hold.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProduceFilter {
    /// Exact category match.
    pub category: Option<String>,
    /// Exact aisle match.
    pub aisle: Option<String>,
    /// Case-insensitive substring over name, category, subcategory, and brand.
    pub search: Option<String>,
    pub in_stock: bool,
    pub organic: bool,
    pub local: bool,
}

impl ProduceFilter {
    #[must_use]
    pub fn from_query(query: &ProduceQuery) -> Self {
        Self {
            category: non_empty(query.category.as_ref()),
            aisle: non_empty(query.aisle.as_ref()),
            search: non_empty(query.search.as_ref()).map(|s| s.to_lowercase()),
            in_stock: flag(query.in_stock.as_ref()),
            organic: flag(query.organic.as_ref()),
            local: flag(query.local.as_ref()),
        }
    }

    #[must_use]
    pub fn matches(&self, item: &Produce) -> bool {
        if self.category.as_ref().is_some_and(|c| *c != item.category) {
            return false;
        }
        if self.aisle.as_ref().is_some_and(|a| *a != item.location.aisle) {
            return false;
        }
        if (self.in_stock && !item.in_stock()) || (self.organic && !item.is_organic) || (self.local && !item.is_local) {
            return false;
        }
        match &self.search {
            Some(needle) => item.searchable_fields().any(|field| field.to_lowercase().contains(needle.as_str())),
            None => true,
        }
    }
}

// =============================================================================
// SORT
// =============================================================================

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortField {
    #[default]
    Name,
    Price,
    Stock,
    Category,
}

impl SortField {
    /// # Errors
    ///
    /// Returns [`CatalogError::UnknownSortField`] for anything but the four field names.
    pub fn parse(raw: &str) -> Result<Self, CatalogError> {
        match raw {
            "name" => Ok(Self::Name),
            "price" => Ok(Self::Price),
            "stock" => Ok(Self::Stock),
            "category" => Ok(Self::Category),
            other => Err(CatalogError::UnknownSortField(other.to_owned())),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Sort {
    pub field: SortField,
    pub order: SortOrder,
}

impl Sort {
    /// # Errors
    ///
    /// Returns [`CatalogError::UnknownSortField`] when `sortBy` names an unknown field.
    pub fn from_query(query: &ProduceQuery) -> Result<Self, CatalogError> {
        let field = match non_empty(query.sort_by.as_ref()) {
            Some(raw) => SortField::parse(&raw)?,
            None => SortField::default(),
        };
        let order = if query.sort_order.as_deref() == Some("desc") { SortOrder::Desc } else { SortOrder::Asc };
        Ok(Self { field, order })
    }

    #[must_use]
    pub fn compare(&self, a: &Produce, b: &Produce) -> Ordering {
        let ord = match self.field {
            SortField::Name => a.name.cmp(&b.name),
            SortField::Price => a.price.total_cmp(&b.price),
            SortField::Stock => a.stock.cmp(&b.stock),
            SortField::Category => a.category.cmp(&b.category),
        };
        match self.order {
            SortOrder::Asc => ord,
            SortOrder::Desc => ord.reverse(),
        }
    }
}

// =============================================================================
// PAGINATION
// =============================================================================

/// A validated page window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    /// 1-based page number.
    pub page: usize,
    pub limit: usize,
}

impl Default for PageRequest {
    fn default() -> Self {
        Self { page: DEFAULT_PAGE, limit: DEFAULT_LIMIT }
    }
}

impl PageRequest {
    /// # Errors
    ///
    /// Returns [`CatalogError::InvalidPage`] or [`CatalogError::InvalidLimit`]
    /// when either value is not an integer in range.
    pub fn from_query(query: &ProduceQuery) -> Result<Self, CatalogError> {
        let page = match non_empty(query.page.as_ref()) {
            Some(raw) => match raw.trim().parse::<usize>() {
                Ok(page) if page >= 1 => page,
                _ => return Err(CatalogError::InvalidPage(raw)),
            },
            None => DEFAULT_PAGE,
        };
        let limit = match non_empty(query.limit.as_ref()) {
            Some(raw) => match raw.trim().parse::<usize>() {
                Ok(limit) if (1..=MAX_LIMIT).contains(&limit) => limit,
                _ => return Err(CatalogError::InvalidLimit(raw)),
            },
            None => DEFAULT_LIMIT,
        };
        Ok(Self { page, limit })
    }

    /// Number of items to skip before this page.
    #[must_use]
    pub fn offset(&self) -> usize {
        self.page.saturating_sub(1).saturating_mul(self.limit)
    }
}

/// Pagination metadata returned with every list page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub current_page: usize,
    pub total_pages: usize,
    pub total_items: usize,
    pub has_next: bool,
    pub has_prev: bool,
}

impl Pagination {
    #[must_use]
    pub fn new(request: PageRequest, total_items: usize) -> Self {
        let total_pages = total_items.div_ceil(request.limit.max(1));
        Self {
            current_page: request.page,
            total_pages,
            total_items,
            has_next: request.page < total_pages,
            has_prev: request.page > 1,
        }
    }
}

/// One page of results.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub pagination: Pagination,
}

// =============================================================================
// LIST REQUEST
// =============================================================================

/// Everything a list call needs, parsed from one [`ProduceQuery`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListRequest {
    pub filter: ProduceFilter,
    pub sort: Sort,
    pub page: PageRequest,
}

impl ListRequest {
    /// # Errors
    ///
    /// Returns the first page, limit, or sort-field error found.
    pub fn from_query(query: &ProduceQuery) -> Result<Self, CatalogError> {
        Ok(Self {
            filter: ProduceFilter::from_query(query),
            sort: Sort::from_query(query)?,
            page: PageRequest::from_query(query)?,
        })
    }
}
