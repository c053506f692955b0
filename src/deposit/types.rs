//! Request/response views and their pure mapping functions.
//!
//! The wire format is camelCase to match the public API contract. Mapping
//! between views and the entity is two stateless functions; nothing here
//! touches storage.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::model::{Deposit, DepositStatus};

/// Inbound payload for deposit creation.
///
/// Must pass [`super::validation::validate`] before it reaches the
/// lifecycle service.
#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DepositRequest {
    /// 8-20 chars, uppercase alphanumeric
    #[schema(example = "ACC123456789")]
    pub account_number: String,
    /// Positive, at most 2 fraction digits
    #[schema(value_type = String, example = "1000.00")]
    pub amount: Decimal,
    /// 3 uppercase letters
    #[schema(example = "USD")]
    pub currency: String,
    /// Optional, at most 500 chars
    #[schema(example = "Test deposit")]
    pub description: Option<String>,
}

/// Outbound deposit view.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DepositResponse {
    pub id: Option<i64>,
    pub account_number: String,
    #[schema(value_type = String, example = "1000.00")]
    pub amount: Decimal,
    pub status: DepositStatus,
    pub currency: String,
    pub description: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

/// Build a fresh entity from a validated request.
///
/// The id and timestamps stay unassigned (the store owns them); status
/// always starts at `Pending`.
pub fn to_entity(request: &DepositRequest) -> Deposit {
    Deposit {
        id: None,
        account_number: request.account_number.clone(),
        amount: request.amount,
        currency: request.currency.clone(),
        status: DepositStatus::Pending,
        description: request.description.clone(),
        created_at: None,
        updated_at: None,
    }
}

/// Project a persisted entity into the outbound view.
pub fn to_response(deposit: &Deposit) -> DepositResponse {
    DepositResponse {
        id: deposit.id,
        account_number: deposit.account_number.clone(),
        amount: deposit.amount,
        status: deposit.status,
        currency: deposit.currency.clone(),
        description: deposit.description.clone(),
        created_at: deposit.created_at,
        updated_at: deposit.updated_at,
    }
}
