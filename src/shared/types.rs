use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::shared::constants::{DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: Option<T>,
    pub message: Option<String>,
    pub meta: Option<Meta>,
    pub errors: Option<Vec<String>>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct Meta {
    pub total: i64,
}

// =============================================================================
// PAGINATION
// =============================================================================

/// Pagination query parameters for list endpoints. Pagination is opt-in:
/// when neither parameter is given the full result set is returned.
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
pub struct PaginationQuery {
    /// Page number (1-indexed)
    #[param(minimum = 1)]
    pub page: Option<i64>,

    /// Number of items per page (max: 100)
    #[param(minimum = 1, maximum = 100)]
    pub page_size: Option<i64>,
}

impl PaginationQuery {
    /// SQL LIMIT value; None binds as LIMIT NULL, which Postgres treats as no limit
    pub fn limit(&self) -> Option<i64> {
        match (self.page, self.page_size) {
            (None, None) => None,
            (_, size) => Some(size.unwrap_or(DEFAULT_PAGE_SIZE).clamp(1, MAX_PAGE_SIZE)),
        }
    }

    /// SQL OFFSET calculated from the 1-indexed page number
    pub fn offset(&self) -> i64 {
        (self.page.unwrap_or(1).max(1) - 1) * self.limit().unwrap_or(0)
    }
}

impl<T> ApiResponse<T> {
    pub fn success(data: Option<T>, message: Option<String>, meta: Option<Meta>) -> Self {
        Self {
            success: true,
            data,
            message,
            meta,
            errors: None,
        }
    }

    pub fn error(message: Option<String>, errors: Option<Vec<String>>) -> ApiResponse<()> {
        ApiResponse {
            success: false,
            data: None,
            message,
            meta: None,
            errors,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unpaged_query_has_no_limit() {
        let q = PaginationQuery::default();
        assert_eq!(q.limit(), None);
        assert_eq!(q.offset(), 0);
    }

    #[test]
    fn page_without_size_uses_default_size() {
        let q = PaginationQuery {
            page: Some(3),
            page_size: None,
        };
        assert_eq!(q.limit(), Some(DEFAULT_PAGE_SIZE));
        assert_eq!(q.offset(), 2 * DEFAULT_PAGE_SIZE);
    }

    #[test]
    fn page_size_is_clamped() {
        let q = PaginationQuery {
            page: Some(1),
            page_size: Some(10_000),
        };
        assert_eq!(q.limit(), Some(MAX_PAGE_SIZE));
    }
}
