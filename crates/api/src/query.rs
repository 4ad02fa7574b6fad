//! Shared query parameter types for API handlers.

use bistro_core::pagination::Page;
use serde::Deserialize;

/// Lenient integer parse: anything unparseable falls back to the default.
fn parse_opt(raw: &Option<String>) -> Option<i64> {
    raw.as_deref().and_then(|s| s.trim().parse().ok())
}

/// Generic pagination parameters (`?page=&recordPerPage=`).
#[derive(Debug, Default, Deserialize)]
pub struct PaginationParams {
    pub page: Option<String>,
    #[serde(rename = "recordPerPage")]
    pub record_per_page: Option<String>,
}

impl PaginationParams {
    pub fn page(&self) -> Page {
        Page::new(parse_opt(&self.page), parse_opt(&self.record_per_page))
    }
}

/// `GET /foods` parameters: pagination plus an optional menu filter.
#[derive(Debug, Default, Deserialize)]
pub struct FoodListParams {
    pub page: Option<String>,
    #[serde(rename = "recordPerPage")]
    pub record_per_page: Option<String>,
    pub menu_id: Option<String>,
}

impl FoodListParams {
    pub fn page(&self) -> Page {
        Page::new(parse_opt(&self.page), parse_opt(&self.record_per_page))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn garbage_falls_back_to_defaults() {
        let params = PaginationParams {
            page: Some("abc".into()),
            record_per_page: Some("-3".into()),
        };
        assert_eq!(params.page(), Page::default());
    }

    #[test]
    fn numbers_are_used() {
        let params = PaginationParams {
            page: Some("2".into()),
            record_per_page: Some("25".into()),
        };
        let page = params.page();
        assert_eq!(page.page, 2);
        assert_eq!(page.start_index(), 25);
    }
}
