//! Deposit lifecycle service.
//!
//! Orchestrates store calls and enforces not-found and transition
//! semantics. Requests arriving here have already passed boundary
//! validation; this service never formats protocol responses.

use std::sync::Arc;

use tracing::info;

use super::error::DepositError;
use super::model::DepositStatus;
use super::store::{DepositStore, Page, PageRequest};
use super::types::{DepositRequest, DepositResponse, to_entity, to_response};

pub struct DepositService {
    store: Arc<dyn DepositStore>,
}

impl DepositService {
    pub fn new(store: Arc<dyn DepositStore>) -> Self {
        Self { store }
    }

    /// Create a new deposit record with status `Pending`.
    ///
    /// Never fails on business grounds; validation happens at the boundary.
    pub async fn create_deposit(
        &self,
        request: DepositRequest,
    ) -> Result<DepositResponse, DepositError> {
        info!(account_number = %request.account_number, "Creating deposit");

        let saved = self.store.save(to_entity(&request)).await?;

        info!(id = saved.id.unwrap_or_default(), "Deposit created");
        Ok(to_response(&saved))
    }

    pub async fn get_deposit_by_id(&self, id: i64) -> Result<DepositResponse, DepositError> {
        info!(id, "Fetching deposit");
        let deposit = self
            .store
            .find_by_id(id)
            .await?
            .ok_or(DepositError::NotFound(id))?;
        Ok(to_response(&deposit))
    }

    pub async fn get_all_deposits(
        &self,
        page: PageRequest,
    ) -> Result<Page<DepositResponse>, DepositError> {
        info!(page = page.page, size = page.size, "Fetching all deposits");
        let deposits = self.store.find_all(page).await?;
        Ok(deposits.map(|d| to_response(&d)))
    }

    pub async fn get_deposits_by_account_number(
        &self,
        account_number: &str,
        page: PageRequest,
    ) -> Result<Page<DepositResponse>, DepositError> {
        info!(account_number, "Fetching deposits for account");
        let deposits = self
            .store
            .find_by_account_number(account_number, page)
            .await?;
        Ok(deposits.map(|d| to_response(&d)))
    }

    pub async fn get_deposits_by_status(
        &self,
        status: DepositStatus,
    ) -> Result<Vec<DepositResponse>, DepositError> {
        info!(status = %status, "Fetching deposits by status");
        let deposits = self.store.find_by_status(status).await?;
        Ok(deposits.iter().map(to_response).collect())
    }

    /// Account-scoped fetch: `NotFound` when the id exists but belongs to a
    /// different account, same as when it does not exist at all.
    pub async fn get_account_deposit_by_id(
        &self,
        id: i64,
        account_number: &str,
    ) -> Result<DepositResponse, DepositError> {
        info!(id, account_number, "Fetching deposit for account");
        let deposit = self
            .store
            .find_by_id_and_account_number(id, account_number)
            .await?
            .ok_or(DepositError::NotFound(id))?;
        Ok(to_response(&deposit))
    }

    pub async fn count_deposits_for_account(
        &self,
        account_number: &str,
    ) -> Result<u64, DepositError> {
        self.store.count_by_account_number(account_number).await
    }

    pub async fn account_has_deposits(&self, account_number: &str) -> Result<bool, DepositError> {
        self.store.exists_by_account_number(account_number).await
    }

    /// Set the status of an existing deposit.
    ///
    /// The transition check is currently permissive (see
    /// `DepositStatus::can_transition_to`); the store performs the actual
    /// read-modify-write atomically and refreshes `updated_at`.
    pub async fn update_deposit_status(
        &self,
        id: i64,
        status: DepositStatus,
    ) -> Result<DepositResponse, DepositError> {
        info!(id, status = %status, "Updating deposit status");

        let current = self
            .store
            .find_by_id(id)
            .await?
            .ok_or(DepositError::NotFound(id))?;
        if !current.status.can_transition_to(status) {
            return Err(DepositError::InvalidTransition {
                from: current.status,
                to: status,
            });
        }

        let updated = self.store.update_status(id, status).await?;

        info!(id, "Deposit status updated");
        Ok(to_response(&updated))
    }

    /// Delete an existing deposit; `NotFound` when the id does not exist.
    ///
    /// On success the record is gone; on failure it is untouched.
    pub async fn delete_deposit(&self, id: i64) -> Result<(), DepositError> {
        info!(id, "Deleting deposit");

        if !self.store.exists_by_id(id).await? {
            return Err(DepositError::NotFound(id));
        }
        self.store.delete_by_id(id).await?;

        info!(id, "Deposit deleted");
        Ok(())
    }
}
