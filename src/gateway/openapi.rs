//! OpenAPI / Swagger UI Documentation
//!
//! Auto-generated OpenAPI 3.0 documentation for the Deposit Gateway API.
//!
//! - Swagger UI: `http://localhost:8080/docs`
//! - OpenAPI JSON: `http://localhost:8080/api-docs/openapi.json`

use utoipa::OpenApi;

use crate::deposit::{DepositRequest, DepositResponse, DepositStatus, FieldError};
use crate::gateway::handlers::HealthResponse;

/// Main API Documentation struct
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Deposit Gateway API",
        version = "1.0.0",
        description = "Bank deposit record service: create, look up, paginate, transition and delete deposit records.",
        license(
            name = "MIT"
        )
    ),
    servers(
        (url = "http://localhost:8080", description = "Development"),
    ),
    paths(
        crate::gateway::handlers::health_check,
        crate::gateway::handlers::create_deposit,
        crate::gateway::handlers::get_deposit_by_id,
        crate::gateway::handlers::get_all_deposits,
        crate::gateway::handlers::get_deposits_by_account,
        crate::gateway::handlers::count_account_deposits,
        crate::gateway::handlers::get_deposits_by_status,
        crate::gateway::handlers::update_deposit_status,
        crate::gateway::handlers::delete_deposit,
    ),
    components(
        schemas(
            DepositRequest,
            DepositResponse,
            DepositStatus,
            FieldError,
            HealthResponse,
        )
    ),
    tags(
        (name = "Deposits", description = "Deposit record lifecycle"),
        (name = "System", description = "Health and diagnostics")
    )
)]
pub struct ApiDoc;
