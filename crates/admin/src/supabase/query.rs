//! `PostgREST` query translation for admin listings.
//!
//! Pure helpers, kept free of HTTP so they are unit-testable.

use dala_core::OrderStatus;

/// Default page size for admin listings.
pub const DEFAULT_LIMIT: u32 = 20;

/// Admin order listing filters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrderFilters {
    /// Free-text search over customer name and phone.
    pub q: Option<String>,
    /// Exact status match.
    pub status: Option<OrderStatus>,
    /// 1-based page number.
    pub page: Option<u32>,
    /// Page size.
    pub limit: Option<u32>,
}

impl OrderFilters {
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

/// Translate order filters into `PostgREST` query parameters.
///
/// Search matches either customer name or phone via a single `or=(...)`
/// group; results are newest-first.
#[must_use]
pub fn order_params(filters: &OrderFilters) -> Vec<(String, String)> {
    let mut params = vec![
        ("select".to_string(), "*".to_string()),
        ("order".to_string(), "created_at.desc".to_string()),
    ];

    if let Some(status) = filters.status {
        params.push(("status".to_string(), format!("eq.{status}")));
    }

    if let Some(q) = filters.q.as_deref() {
        let q = escape_pattern(q);
        if !q.is_empty() {
            params.push((
                "or".to_string(),
                format!("(customer_name.ilike.*{q}*,phone.ilike.*{q}*)"),
            ));
        }
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

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn param<'a>(params: &'a [(String, String)], key: &str) -> Vec<&'a str> {
        params
            .iter()
            .filter(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
            .collect()
    }

    #[test]
    fn test_default_listing_is_newest_first() {
        let params = order_params(&OrderFilters::default());
        assert_eq!(param(&params, "order"), vec!["created_at.desc"]);
        assert!(param(&params, "status").is_empty());
    }

    #[test]
    fn test_status_filter() {
        let filters = OrderFilters {
            status: Some(OrderStatus::Confirmed),
            ..OrderFilters::default()
        };
        let params = order_params(&filters);
        assert_eq!(param(&params, "status"), vec!["eq.confirmed"]);
    }

    #[test]
    fn test_search_matches_name_or_phone() {
        let filters = OrderFilters {
            q: Some("7701".to_string()),
            ..OrderFilters::default()
        };
        let params = order_params(&filters);
        assert_eq!(
            param(&params, "or"),
            vec!["(customer_name.ilike.*7701*,phone.ilike.*7701*)"]
        );
    }

    #[test]
    fn test_search_strips_reserved_characters() {
        assert_eq!(escape_pattern(" a,b(c) "), "abc");
    }

    #[test]
    fn test_page_range_math() {
        assert_eq!(page_range(1, 20), (0, 19));
        assert_eq!(page_range(4, 20), (60, 79));
        assert_eq!(page_range(0, 20), (0, 19));
    }

    #[test]
    fn test_parse_content_range() {
        assert_eq!(parse_content_range("20-39/112"), Some(112));
        assert_eq!(parse_content_range("*/0"), Some(0));
        assert_eq!(parse_content_range("0-4/*"), None);
    }
}
