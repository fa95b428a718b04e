use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::shared::constants::MAX_PAGE_SIZE;

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

// =============================================================================
// PAGINATION
// =============================================================================

/// A validated page window. `page` is 1-indexed and `limit` is clamped to
/// `[1, MAX_PAGE_SIZE]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: i64,
    pub limit: i64,
}

impl PageRequest {
    pub fn new(page: i64, limit: i64) -> Self {
        Self {
            page: page.max(1),
            limit: limit.clamp(1, MAX_PAGE_SIZE),
        }
    }

    /// Calculate SQL OFFSET from page number
    pub fn offset(&self) -> i64 {
        (self.page - 1).saturating_mul(self.limit)
    }
}

/// Pagination block returned with every listing page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct PageInfo {
    /// Requested page (1-indexed)
    pub current: i64,
    /// Total number of pages, `ceil(total / limit)`
    pub pages: i64,
    /// Total number of matching records
    pub total: i64,
}

impl PageInfo {
    pub fn new(request: PageRequest, total: i64) -> Self {
        let total = total.max(0);
        Self {
            current: request.page,
            pages: (total + request.limit - 1) / request.limit,
            total,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_request_clamps() {
        assert_eq!(PageRequest::new(0, 12), PageRequest { page: 1, limit: 12 });
        assert_eq!(PageRequest::new(-4, 0), PageRequest { page: 1, limit: 1 });
        assert_eq!(
            PageRequest::new(2, 10_000),
            PageRequest {
                page: 2,
                limit: MAX_PAGE_SIZE
            }
        );
    }

    #[test]
    fn test_offset() {
        assert_eq!(PageRequest::new(1, 12).offset(), 0);
        assert_eq!(PageRequest::new(3, 12).offset(), 24);
    }

    #[test]
    fn test_pages_use_ceiling_division() {
        let req = PageRequest::new(1, 12);
        assert_eq!(PageInfo::new(req, 0).pages, 0);
        assert_eq!(PageInfo::new(req, 1).pages, 1);
        assert_eq!(PageInfo::new(req, 12).pages, 1);
        assert_eq!(PageInfo::new(req, 13).pages, 2);
        assert_eq!(PageInfo::new(req, 25).pages, 3);
    }

    #[test]
    fn test_page_beyond_last_keeps_totals() {
        let info = PageInfo::new(PageRequest::new(9, 10), 25);
        assert_eq!(
            info,
            PageInfo {
                current: 9,
                pages: 3,
                total: 25
            }
        );
    }
}
