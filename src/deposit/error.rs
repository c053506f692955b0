use thiserror::Error;

use super::model::DepositStatus;

/// Errors raised by the deposit store and lifecycle service.
///
/// `NotFound` and the `Invalid*` variants are caller errors and keep their
/// messages when surfaced; `Database`/`Internal` details are logged by the
/// gateway and never returned to the caller.
#[derive(Debug, Error)]
pub enum DepositError {
    #[error("Deposit not found with id: {0}")]
    NotFound(i64),

    #[error("Invalid deposit status: {0}")]
    InvalidStatus(String),

    #[error("Status transition not allowed: {from} -> {to}")]
    InvalidTransition {
        from: DepositStatus,
        to: DepositStatus,
    },

    #[error("Invalid sort: {0}")]
    InvalidSort(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl DepositError {
    /// True for errors caused by the caller (bad id, bad literal), as
    /// opposed to storage faults.
    pub fn is_caller_error(&self) -> bool {
        matches!(
            self,
            DepositError::NotFound(_)
                | DepositError::InvalidStatus(_)
                | DepositError::InvalidTransition { .. }
                | DepositError::InvalidSort(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_message() {
        let err = DepositError::NotFound(42);
        assert_eq!(err.to_string(), "Deposit not found with id: 42");
    }

    #[test]
    fn test_caller_error_classification() {
        assert!(DepositError::NotFound(1).is_caller_error());
        assert!(DepositError::InvalidStatus("X".into()).is_caller_error());
        assert!(DepositError::InvalidSort("amount,desc".into()).is_caller_error());
        assert!(!DepositError::Internal("corrupt row".into()).is_caller_error());
    }
}
