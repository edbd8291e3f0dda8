//! Shared response envelope types for API handlers.
//!
//! Single entities are returned bare; list endpoints use [`PagedResponse`]
//! with a `meta` block whose keys are camelCase on the wire.

use serde::Serialize;

/// Pagination metadata for list responses.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageMeta {
    pub total_items: i64,
    pub current_page: i64,
    pub total_pages: i64,
    pub limit: i64,
}

/// A page of results plus its metadata.
#[derive(Debug, Serialize)]
pub struct PagedResponse<T: Serialize> {
    pub data: Vec<T>,
    pub meta: PageMeta,
}

impl<T: Serialize> PagedResponse<T> {
    /// Assemble a page from clamped page/limit values and a total count.
    pub fn new(data: Vec<T>, total_items: i64, page: i64, limit: i64) -> Self {
        Self {
            data,
            meta: PageMeta {
                total_items,
                current_page: page,
                // Ceiling division without the unstable `int_roundings`
                // `i64::div_ceil`; `total_items >= 0` and `limit > 0`.
                total_pages: (total_items + limit - 1) / limit,
                limit,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn total_pages_rounds_up() {
        let page = PagedResponse::new(vec![1, 2, 3], 21, 1, 10);
        assert_eq!(page.meta.total_pages, 3);
    }

    #[test]
    fn exact_multiple_does_not_add_a_page() {
        let page = PagedResponse::new(vec![1], 20, 2, 10);
        assert_eq!(page.meta.total_pages, 2);
    }

    #[test]
    fn empty_result_has_zero_pages() {
        let page: PagedResponse<i32> = PagedResponse::new(vec![], 0, 1, 10);
        assert_eq!(page.meta.total_pages, 0);
        assert_eq!(page.meta.total_items, 0);
    }

    #[test]
    fn meta_keys_are_camel_case() {
        let page = PagedResponse::new(vec![7], 1, 1, 10);
        let json = serde_json::to_value(&page).unwrap();
        assert!(json["meta"]["totalItems"].is_number());
        assert!(json["meta"]["currentPage"].is_number());
        assert!(json["meta"]["totalPages"].is_number());
        assert!(json["meta"]["limit"].is_number());
    }
}
