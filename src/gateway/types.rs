//! Gateway response envelope and query types.

use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::deposit::{DepositError, PageRequest, SortOrder};

/// Unified API response envelope
///
/// `code` 0 means success; error codes live in [`error_codes`]. `data` is
/// present on success and carries field errors on validation failures.
#[derive(Debug, Serialize, ToSchema)]
pub struct ApiResponse<T> {
    /// Response code: 0 for success, non-zero for errors
    #[schema(example = 0)]
    pub code: i32,
    /// Response message
    #[schema(example = "ok")]
    pub msg: String,
    /// Response data (absent on plain errors)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T> ApiResponse<T> {
    /// Create success response
    pub fn success(data: T) -> Self {
        Self {
            code: 0,
            msg: "ok".to_string(),
            data: Some(data),
        }
    }

    /// Create error response without a payload
    pub fn error(code: i32, msg: impl Into<String>) -> Self {
        Self {
            code,
            msg: msg.into(),
            data: None,
        }
    }

    /// Create error response carrying a payload (per-field messages)
    pub fn error_with(code: i32, msg: impl Into<String>, data: T) -> Self {
        Self {
            code,
            msg: msg.into(),
            data: Some(data),
        }
    }
}

pub mod error_codes {
    // Success
    pub const SUCCESS: i32 = 0;

    // Client errors (1xxx)
    pub const INVALID_PARAMETER: i32 = 1001;
    pub const VALIDATION_FAILED: i32 = 1002;

    // Resource errors (4xxx)
    pub const DEPOSIT_NOT_FOUND: i32 = 4004;

    // Server errors (5xxx)
    pub const INTERNAL_ERROR: i32 = 5000;
    pub const SERVICE_UNAVAILABLE: i32 = 5001;
}

/// Pagination query parameters (`?page=&size=&sort=`)
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PageQuery {
    /// Zero-based page index (default 0)
    pub page: Option<u32>,
    /// Page size (default 20, capped)
    pub size: Option<u32>,
    /// `createdAt,desc` (default) or `createdAt,asc`
    pub sort: Option<String>,
}

impl PageQuery {
    /// Resolve defaults and parse the sort spec.
    pub fn to_page_request(&self) -> Result<PageRequest, DepositError> {
        let sort = match self.sort.as_deref() {
            Some(spec) => SortOrder::parse(spec)?,
            None => SortOrder::default(),
        };
        Ok(PageRequest::new(
            self.page.unwrap_or(0),
            self.size.unwrap_or(0), // 0 resolves to the default size
            sort,
        ))
    }
}

/// Status update query parameter (`?status=COMPLETED`)
#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct StatusQuery {
    pub status: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::deposit::store::DEFAULT_PAGE_SIZE;

    #[test]
    fn test_page_query_defaults() {
        let request = PageQuery::default().to_page_request().unwrap();
        assert_eq!(request.page, 0);
        assert_eq!(request.size, DEFAULT_PAGE_SIZE);
        assert_eq!(request.sort, SortOrder::CreatedAtDesc);
    }

    #[test]
    fn test_page_query_rejects_unknown_sort() {
        let query = PageQuery {
            sort: Some("amount,desc".to_string()),
            ..Default::default()
        };
        assert!(matches!(
            query.to_page_request(),
            Err(DepositError::InvalidSort(_))
        ));
    }

    #[test]
    fn test_envelope_serialization() {
        let ok = serde_json::to_string(&ApiResponse::success(5)).unwrap();
        assert_eq!(ok, r#"{"code":0,"msg":"ok","data":5}"#);

        let err = serde_json::to_string(&ApiResponse::<()>::error(
            error_codes::DEPOSIT_NOT_FOUND,
            "Deposit not found with id: 9",
        ))
        .unwrap();
        assert!(!err.contains("data"));
    }
}
