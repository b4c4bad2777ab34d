//! Page/offset arithmetic for the user listing.
//!
//! A `PageRequest` is always valid (page ≥ 1, page size ≥ 1): anything the
//! caller sends that is missing, non-numeric or not positive falls back to the
//! defaults instead of failing the request.

use serde::{Deserialize, Serialize};

use crate::models::user::User;

pub const DEFAULT_PAGE: i64 = 1;
pub const DEFAULT_PAGE_SIZE: i64 = 5;

/// Page sizes offered by the listing page selector.
pub const PAGE_SIZE_OPTIONS: [i64; 5] = [5, 10, 25, 50, 100];

/// Raw query string parameters, kept as strings so bad input can default.
#[derive(Debug, Default, Deserialize)]
pub struct PageQuery {
    pub page: Option<String>,
    #[serde(rename = "pageSize")]
    pub page_size: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: i64,
    pub page_size: i64,
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl PageRequest {
    pub fn new(page: i64, page_size: i64) -> Self {
        Self {
            page: if page >= 1 { page } else { DEFAULT_PAGE },
            page_size: if page_size >= 1 {
                page_size
            } else {
                DEFAULT_PAGE_SIZE
            },
        }
    }

    pub fn from_query(query: &PageQuery) -> Self {
        Self {
            page: parse_positive(query.page.as_deref()).unwrap_or(DEFAULT_PAGE),
            page_size: parse_positive(query.page_size.as_deref()).unwrap_or(DEFAULT_PAGE_SIZE),
        }
    }

    /// Number of records to skip before this page starts.
    pub fn offset(&self) -> i64 {
        (self.page - 1).saturating_mul(self.page_size)
    }

    pub fn limit(&self) -> i64 {
        self.page_size
    }
}

/// `ceil(total / page_size)`; an empty store has zero pages.
pub fn page_count(total: i64, page_size: i64) -> i64 {
    if total <= 0 || page_size <= 0 {
        return 0;
    }
    total / page_size + i64::from(total % page_size != 0)
}

fn parse_positive(raw: Option<&str>) -> Option<i64> {
    raw.and_then(|s| s.trim().parse::<i64>().ok())
        .filter(|n| *n >= 1)
}

/// One page of users plus the metadata needed to draw pagination controls.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserPage {
    pub users: Vec<User>,
    pub page: i64,
    pub page_size: i64,
    pub count: i64,
    pub pages: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn query(page: Option<&str>, page_size: Option<&str>) -> PageQuery {
        PageQuery {
            page: page.map(str::to_string),
            page_size: page_size.map(str::to_string),
        }
    }

    #[test]
    fn test_missing_params_use_defaults() {
        let req = PageRequest::from_query(&PageQuery::default());
        assert_eq!(req, PageRequest { page: 1, page_size: 5 });
    }

    #[test]
    fn test_non_numeric_params_use_defaults() {
        let req = PageRequest::from_query(&query(Some("abc"), Some("ten")));
        assert_eq!(req, PageRequest::default());
    }

    #[test]
    fn test_zero_and_negative_params_use_defaults() {
        assert_eq!(
            PageRequest::from_query(&query(Some("0"), Some("-3"))),
            PageRequest::default()
        );
        assert_eq!(PageRequest::new(-1, 0), PageRequest::default());
    }

    #[test]
    fn test_numeric_params_are_kept() {
        let req = PageRequest::from_query(&query(Some(" 3 "), Some("25")));
        assert_eq!(req, PageRequest { page: 3, page_size: 25 });
    }

    #[test]
    fn test_offset_and_limit() {
        let req = PageRequest::new(3, 5);
        assert_eq!(req.offset(), 10);
        assert_eq!(req.limit(), 5);
        assert_eq!(PageRequest::new(1, 50).offset(), 0);
    }

    #[test]
    fn test_offset_saturates() {
        let req = PageRequest::new(i64::MAX, 100);
        assert_eq!(req.offset(), i64::MAX);
    }

    #[test]
    fn test_page_count_is_ceiling() {
        for total in 0..200_i64 {
            for size in 1..30_i64 {
                let expected = (total as f64 / size as f64).ceil() as i64;
                assert_eq!(page_count(total, size), expected, "total={total} size={size}");
            }
        }
    }

    #[test]
    fn test_empty_store_has_zero_pages() {
        assert_eq!(page_count(0, 5), 0);
    }

    #[test]
    fn test_twelve_users_three_pages() {
        assert_eq!(page_count(12, 5), 3);
    }

    #[test]
    fn test_user_page_serializes_camel_case() {
        let page = UserPage {
            users: vec![],
            page: 1,
            page_size: 5,
            count: 0,
            pages: 0,
        };
        let json = serde_json::to_value(&page).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "users": [], "page": 1, "pageSize": 5, "count": 0, "pages": 0 })
        );
    }
}
