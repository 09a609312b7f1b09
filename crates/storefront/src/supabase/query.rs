//! `PostgREST` query translation.
//!
//! Pure helpers that turn catalog filters into `PostgREST` query parameters
//! and `Range` pagination headers, kept free of HTTP so they are unit-testable.

use rust_decimal::Decimal;

/// Default page size when the caller does not specify one.
pub const DEFAULT_LIMIT: u32 = 20;

/// Catalog listing filters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductFilters {
    /// Free-text search over name and description.
    pub q: Option<String>,
    /// Exact category match.
    pub category: Option<String>,
    /// Minimum price (inclusive).
    pub min_price: Option<Decimal>,
    /// Maximum price (inclusive).
    pub max_price: Option<Decimal>,
    /// 1-based page number.
    pub page: Option<u32>,
    /// Page size.
    pub limit: Option<u32>,
    /// Sort column.
    pub order_by: Option<ProductOrderBy>,
    /// Sort direction.
    pub order_dir: Option<OrderDir>,
}

impl ProductFilters {
    /// Whether this query is the plain unfiltered listing (cacheable).
    #[must_use]
    pub const fn is_plain(&self) -> bool {
        self.q.is_none()
            && self.category.is_none()
            && self.min_price.is_none()
            && self.max_price.is_none()
    }

    /// Effective page number (1-based, floored at 1).
    #[must_use]
    pub fn page(&self) -> u32 {
        self.page.unwrap_or(1).max(1)
    }

    /// Effective page size.
    #[must_use]
    pub fn limit(&self) -> u32 {
        self.limit.unwrap_or(DEFAULT_LIMIT)
    }
}

/// Columns the catalog listing can sort by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProductOrderBy {
    Price,
    CreatedAt,
    Name,
}

impl ProductOrderBy {
    const fn as_column(self) -> &'static str {
        match self {
            Self::Price => "price",
            Self::CreatedAt => "created_at",
            Self::Name => "name",
        }
    }

    /// Parse from the query-string value; unknown values are ignored.
    #[must_use]
    pub fn from_param(s: &str) -> Option<Self> {
        match s {
            "price" => Some(Self::Price),
            "created_at" => Some(Self::CreatedAt),
            "name" => Some(Self::Name),
            _ => None,
        }
    }
}

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OrderDir {
    Asc,
    #[default]
    Desc,
}

impl OrderDir {
    const fn as_suffix(self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }
}

/// Translate catalog filters into `PostgREST` query parameters.
///
/// Search uses a single `or=(...)` group so a term matches either name or
/// description; price bounds become `gte`/`lte` operators on `price`.
#[must_use]
pub fn product_params(filters: &ProductFilters) -> Vec<(String, String)> {
    let mut params = vec![("select".to_string(), "*".to_string())];

    let order_by = filters.order_by.unwrap_or(ProductOrderBy::CreatedAt);
    let order_dir = filters.order_dir.unwrap_or_default();
    params.push((
        "order".to_string(),
        format!("{}.{}", order_by.as_column(), order_dir.as_suffix()),
    ));

    if let Some(q) = filters.q.as_deref() {
        let q = escape_pattern(q);
        if !q.is_empty() {
            params.push((
                "or".to_string(),
                format!("(name.ilike.*{q}*,description.ilike.*{q}*)"),
            ));
        }
    }

    if let Some(category) = filters.category.as_deref() {
        params.push(("category".to_string(), format!("eq.{category}")));
    }

    if let Some(min) = filters.min_price {
        params.push(("price".to_string(), format!("gte.{min}")));
    }

    if let Some(max) = filters.max_price {
        params.push(("price".to_string(), format!("lte.{max}")));
    }

    params
}

/// Compute the inclusive `Range` header bounds for a 1-based page.
#[must_use]
pub fn page_range(page: u32, limit: u32) -> (u64, u64) {
    let page = u64::from(page.max(1));
    let limit = u64::from(limit);
    let from = (page - 1) * limit;
    let to = from + limit.saturating_sub(1);
    (from, to)
}

/// Parse the total row count out of a `Content-Range` header
/// (e.g., `0-19/57` or `*/0`).
#[must_use]
pub fn parse_content_range(header: &str) -> Option<u64> {
    let (_, total) = header.rsplit_once('/')?;
    if total == "*" {
        return None;
    }
    total.parse().ok()
}

/// Strip characters that are reserved in `PostgREST` filter syntax so a
/// search term cannot break out of the `or=(...)` group.
#[must_use]
pub fn escape_pattern(q: &str) -> String {
    q.trim()
        .chars()
        .filter(|c| !matches!(c, ',' | '(' | ')' | '"' | '\\'))
        .collect()
}
