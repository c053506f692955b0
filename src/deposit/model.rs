//! Deposit entity and status state machine.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::error::DepositError;

/// Lifecycle stage of a deposit record
///
/// `Pending` is assigned at creation. The wire and storage form is
/// SCREAMING_CASE (`PENDING`, `COMPLETED`, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DepositStatus {
    Pending,
    Completed,
    Failed,
    Cancelled,
}

impl DepositStatus {
    /// All statuses, in declaration order
    pub const ALL: [DepositStatus; 4] = [
        DepositStatus::Pending,
        DepositStatus::Completed,
        DepositStatus::Failed,
        DepositStatus::Cancelled,
    ];

    /// Storage/wire form
    pub fn as_str(&self) -> &'static str {
        match self {
            DepositStatus::Pending => "PENDING",
            DepositStatus::Completed => "COMPLETED",
            DepositStatus::Failed => "FAILED",
            DepositStatus::Cancelled => "CANCELLED",
        }
    }

    /// Transition-legality check.
    ///
    /// No transition table is enforced: any status may be set from any
    /// other, including out of the terminal-in-intent states. Every status
    /// update goes through this single hook, so a transition table only
    /// needs to change this function.
    pub fn can_transition_to(&self, _next: DepositStatus) -> bool {
        true
    }
}

impl fmt::Display for DepositStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for DepositStatus {
    type Err = DepositError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "PENDING" => Ok(DepositStatus::Pending),
            "COMPLETED" => Ok(DepositStatus::Completed),
            "FAILED" => Ok(DepositStatus::Failed),
            "CANCELLED" => Ok(DepositStatus::Cancelled),
            _ => Err(DepositError::InvalidStatus(s.to_string())),
        }
    }
}

/// A deposit record: one incoming funds transaction against an account.
///
/// `id` and the timestamps are `None` until the store persists the record;
/// the store is the only component that assigns them. After creation only
/// `status` is mutable.
#[derive(Debug, Clone, PartialEq)]
pub struct Deposit {
    pub id: Option<i64>,
    pub account_number: String,
    pub amount: Decimal,
    pub currency: String,
    pub status: DepositStatus,
    pub description: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}
