//! Deposit REST handlers.
//!
//! Thin adapters only: validate/parse input, call the lifecycle service,
//! translate `DepositError` into HTTP responses. No business decisions
//! happen here.

use std::str::FromStr;
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use utoipa::ToSchema;

use crate::deposit::{
    DepositError, DepositRequest, DepositResponse, DepositStatus, FieldError, Page, validation,
};

use super::state::AppState;
use super::types::{ApiResponse, PageQuery, StatusQuery, error_codes};

/// Translate a service/store error into the protocol response.
///
/// `Database`/`Internal` details are logged here and replaced with a fixed
/// message; callers never see internals.
fn error_response<T>(err: DepositError) -> (StatusCode, Json<ApiResponse<T>>) {
    match &err {
        DepositError::NotFound(_) => (
            StatusCode::NOT_FOUND,
            Json(ApiResponse::error(
                error_codes::DEPOSIT_NOT_FOUND,
                err.to_string(),
            )),
        ),
        DepositError::InvalidStatus(_)
        | DepositError::InvalidTransition { .. }
        | DepositError::InvalidSort(_) => (
            StatusCode::BAD_REQUEST,
            Json(ApiResponse::error(
                error_codes::INVALID_PARAMETER,
                err.to_string(),
            )),
        ),
        DepositError::Database(_) | DepositError::Internal(_) => {
            tracing::error!(error = %err, "Unexpected error handling deposit request");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::error(
                    error_codes::INTERNAL_ERROR,
                    "An unexpected error occurred",
                )),
            )
        }
    }
}

/// Create a deposit record
///
/// POST /api/v1/deposits
#[utoipa::path(
    post,
    path = "/api/v1/deposits",
    request_body = DepositRequest,
    responses(
        (status = 201, description = "Deposit created with status PENDING", body = ApiResponse<DepositResponse>),
        (status = 400, description = "Validation failed; data carries per-field messages"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Deposits"
)]
pub async fn create_deposit(
    State(state): State<Arc<AppState>>,
    Json(request): Json<DepositRequest>,
) -> Result<(StatusCode, Json<ApiResponse<DepositResponse>>), (StatusCode, Json<ApiResponse<Vec<FieldError>>>)>
{
    if let Err(field_errors) = validation::validate(&request) {
        return Err((
            StatusCode::BAD_REQUEST,
            Json(ApiResponse::error_with(
                error_codes::VALIDATION_FAILED,
                "Validation failed",
                field_errors,
            )),
        ));
    }

    match state.deposit_service.create_deposit(request).await {
        Ok(response) => Ok((StatusCode::CREATED, Json(ApiResponse::success(response)))),
        Err(e) => Err(error_response(e)),
    }
}

/// Fetch a deposit by id
///
/// GET /api/v1/deposits/{id}
#[utoipa::path(
    get,
    path = "/api/v1/deposits/{id}",
    params(("id" = i64, Path, description = "Deposit id")),
    responses(
        (status = 200, description = "Deposit found", body = ApiResponse<DepositResponse>),
        (status = 404, description = "No deposit with this id")
    ),
    tag = "Deposits"
)]
pub async fn get_deposit_by_id(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<DepositResponse>>, (StatusCode, Json<ApiResponse<()>>)> {
    match state.deposit_service.get_deposit_by_id(id).await {
        Ok(response) => Ok(Json(ApiResponse::success(response))),
        Err(e) => Err(error_response(e)),
    }
}

/// List deposits, newest first
///
/// GET /api/v1/deposits?page=&size=&sort=
#[utoipa::path(
    get,
    path = "/api/v1/deposits",
    params(PageQuery),
    responses(
        (status = 200, description = "One page of deposits", body = ApiResponse<Page<DepositResponse>>),
        (status = 400, description = "Unknown sort spec")
    ),
    tag = "Deposits"
)]
pub async fn get_all_deposits(
    State(state): State<Arc<AppState>>,
    Query(query): Query<PageQuery>,
) -> Result<Json<ApiResponse<Page<DepositResponse>>>, (StatusCode, Json<ApiResponse<()>>)> {
    let page = query.to_page_request().map_err(error_response)?;
    match state.deposit_service.get_all_deposits(page).await {
        Ok(response) => Ok(Json(ApiResponse::success(response))),
        Err(e) => Err(error_response(e)),
    }
}

/// List deposits for one account
///
/// GET /api/v1/deposits/account/{account_number}?page=&size=&sort=
#[utoipa::path(
    get,
    path = "/api/v1/deposits/account/{account_number}",
    params(
        ("account_number" = String, Path, description = "Exact account number"),
        PageQuery
    ),
    responses(
        (status = 200, description = "One page of the account's deposits", body = ApiResponse<Page<DepositResponse>>),
        (status = 400, description = "Unknown sort spec")
    ),
    tag = "Deposits"
)]
pub async fn get_deposits_by_account(
    State(state): State<Arc<AppState>>,
    Path(account_number): Path<String>,
    Query(query): Query<PageQuery>,
) -> Result<Json<ApiResponse<Page<DepositResponse>>>, (StatusCode, Json<ApiResponse<()>>)> {
    let page = query.to_page_request().map_err(error_response)?;
    match state
        .deposit_service
        .get_deposits_by_account_number(&account_number, page)
        .await
    {
        Ok(response) => Ok(Json(ApiResponse::success(response))),
        Err(e) => Err(error_response(e)),
    }
}

/// Count deposits for one account
///
/// GET /api/v1/deposits/account/{account_number}/count
#[utoipa::path(
    get,
    path = "/api/v1/deposits/account/{account_number}/count",
    params(("account_number" = String, Path, description = "Exact account number")),
    responses(
        (status = 200, description = "Number of deposit records", body = ApiResponse<u64>)
    ),
    tag = "Deposits"
)]
pub async fn count_account_deposits(
    State(state): State<Arc<AppState>>,
    Path(account_number): Path<String>,
) -> Result<Json<ApiResponse<u64>>, (StatusCode, Json<ApiResponse<()>>)> {
    match state
        .deposit_service
        .count_deposits_for_account(&account_number)
        .await
    {
        Ok(count) => Ok(Json(ApiResponse::success(count))),
        Err(e) => Err(error_response(e)),
    }
}

/// List deposits in one status
///
/// GET /api/v1/deposits/status/{status}
#[utoipa::path(
    get,
    path = "/api/v1/deposits/status/{status}",
    params(("status" = String, Path, description = "PENDING | COMPLETED | FAILED | CANCELLED")),
    responses(
        (status = 200, description = "All deposits in this status, newest first", body = ApiResponse<Vec<DepositResponse>>),
        (status = 400, description = "Unknown status literal")
    ),
    tag = "Deposits"
)]
pub async fn get_deposits_by_status(
    State(state): State<Arc<AppState>>,
    Path(status): Path<String>,
) -> Result<Json<ApiResponse<Vec<DepositResponse>>>, (StatusCode, Json<ApiResponse<()>>)> {
    let status = DepositStatus::from_str(&status).map_err(error_response)?;
    match state.deposit_service.get_deposits_by_status(status).await {
        Ok(response) => Ok(Json(ApiResponse::success(response))),
        Err(e) => Err(error_response(e)),
    }
}

/// Update the status of a deposit
///
/// PATCH /api/v1/deposits/{id}/status?status=COMPLETED
#[utoipa::path(
    patch,
    path = "/api/v1/deposits/{id}/status",
    params(
        ("id" = i64, Path, description = "Deposit id"),
        StatusQuery
    ),
    responses(
        (status = 200, description = "Updated deposit", body = ApiResponse<DepositResponse>),
        (status = 400, description = "Unknown status literal"),
        (status = 404, description = "No deposit with this id")
    ),
    tag = "Deposits"
)]
pub async fn update_deposit_status(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    Query(query): Query<StatusQuery>,
) -> Result<Json<ApiResponse<DepositResponse>>, (StatusCode, Json<ApiResponse<()>>)> {
    let status = DepositStatus::from_str(&query.status).map_err(error_response)?;
    match state
        .deposit_service
        .update_deposit_status(id, status)
        .await
    {
        Ok(response) => Ok(Json(ApiResponse::success(response))),
        Err(e) => Err(error_response(e)),
    }
}

/// Delete a deposit
///
/// DELETE /api/v1/deposits/{id}
#[utoipa::path(
    delete,
    path = "/api/v1/deposits/{id}",
    params(("id" = i64, Path, description = "Deposit id")),
    responses(
        (status = 204, description = "Deposit deleted"),
        (status = 404, description = "No deposit with this id")
    ),
    tag = "Deposits"
)]
pub async fn delete_deposit(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<StatusCode, (StatusCode, Json<ApiResponse<()>>)> {
    match state.deposit_service.delete_deposit(id).await {
        Ok(()) => Ok(StatusCode::NO_CONTENT),
        Err(e) => Err(error_response(e)),
    }
}

/// Health check response data
#[derive(serde::Serialize, ToSchema)]
pub struct HealthResponse {
    /// Server timestamp in milliseconds
    #[schema(example = 1703494800000_u64)]
    pub timestamp_ms: u64,
}

/// Health check endpoint
///
/// Pings the database when one is configured; in-memory runs report
/// healthy without a ping. No internal detail leaves this handler.
#[utoipa::path(
    get,
    path = "/api/v1/health",
    responses(
        (status = 200, description = "Service healthy", body = ApiResponse<HealthResponse>),
        (status = 503, description = "Database unreachable")
    ),
    tag = "System"
)]
pub async fn health_check(
    State(state): State<Arc<AppState>>,
) -> (StatusCode, Json<ApiResponse<HealthResponse>>) {
    let timestamp_ms = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0);

    if let Some(ref db) = state.db {
        if let Err(e) = db.health_check().await {
            tracing::error!(error = %e, "Health check: database ping failed");
            return (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(ApiResponse::error(
                    error_codes::SERVICE_UNAVAILABLE,
                    "unavailable",
                )),
            );
        }
    }

    (
        StatusCode::OK,
        Json(ApiResponse::success(HealthResponse { timestamp_ms })),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::deposit::{DepositService, InMemoryDepositStore};
    use rust_decimal::Decimal;

    fn test_state() -> Arc<AppState> {
        let store = Arc::new(InMemoryDepositStore::new());
        let service = Arc::new(DepositService::new(store));
        Arc::new(AppState::new(service, None))
    }

    fn request_json(amount: &str) -> Json<DepositRequest> {
        Json(DepositRequest {
            account_number: "ACC123456789".to_string(),
            amount: Decimal::from_str(amount).unwrap(),
            currency: "USD".to_string(),
            description: Some("Test deposit".to_string()),
        })
    }

    #[tokio::test]
    async fn test_create_returns_201_with_pending_status() {
        let state = test_state();
        let (status, Json(body)) = create_deposit(State(state), request_json("1000.00"))
            .await
            .unwrap();
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body.code, error_codes::SUCCESS);
        let deposit = body.data.unwrap();
        assert_eq!(deposit.status, DepositStatus::Pending);
        assert!(deposit.id.is_some());
    }

    #[tokio::test]
    async fn test_create_rejects_invalid_request_with_field_errors() {
        let state = test_state();
        let bad = Json(DepositRequest {
            account_number: "acc".to_string(),
            amount: Decimal::from_str("-1").unwrap(),
            currency: "usd".to_string(),
            description: None,
        });
        let (status, Json(body)) = create_deposit(State(state), bad).await.unwrap_err();
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body.code, error_codes::VALIDATION_FAILED);
        let fields: Vec<&str> = body.data.unwrap().iter().map(|e| e.field).collect();
        assert!(fields.contains(&"accountNumber"));
        assert!(fields.contains(&"amount"));
        assert!(fields.contains(&"currency"));
    }

    #[tokio::test]
    async fn test_get_missing_deposit_is_404() {
        let state = test_state();
        let (status, Json(body)) = get_deposit_by_id(State(state), Path(99))
            .await
            .unwrap_err();
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body.code, error_codes::DEPOSIT_NOT_FOUND);
        assert_eq!(body.msg, "Deposit not found with id: 99");
    }

    #[tokio::test]
    async fn test_update_status_rejects_unknown_literal() {
        let state = test_state();
        let (status, Json(body)) = update_deposit_status(
            State(state),
            Path(1),
            Query(StatusQuery {
                status: "SETTLED".to_string(),
            }),
        )
        .await
        .unwrap_err();
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body.code, error_codes::INVALID_PARAMETER);
    }

    #[tokio::test]
    async fn test_delete_flow() {
        let state = test_state();
        let (_, Json(created)) = create_deposit(State(state.clone()), request_json("5.00"))
            .await
            .unwrap();
        let id = created.data.unwrap().id.unwrap();

        let status = delete_deposit(State(state.clone()), Path(id)).await.unwrap();
        assert_eq!(status, StatusCode::NO_CONTENT);

        let (status, _) = delete_deposit(State(state), Path(id)).await.unwrap_err();
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_list_rejects_unknown_sort() {
        let state = test_state();
        let query = PageQuery {
            sort: Some("amount,asc".to_string()),
            ..Default::default()
        };
        let (status, Json(body)) = get_all_deposits(State(state), Query(query))
            .await
            .unwrap_err();
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body.code, error_codes::INVALID_PARAMETER);
    }

    #[tokio::test]
    async fn test_health_without_database_is_ok() {
        let state = test_state();
        let (status, Json(body)) = health_check(State(state)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body.code, error_codes::SUCCESS);
    }
}
