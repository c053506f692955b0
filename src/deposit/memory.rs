//! In-memory deposit store.
//!
//! Backs the test suite and local runs without PostgreSQL. Semantics match
//! `PgDepositStore`: the store assigns ids and timestamps, `save` keeps
//! `created_at` frozen on the update path, and the mutex gives the same
//! per-record atomicity the database transaction provides.

use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicI64, Ordering};

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use super::error::DepositError;
use super::model::{Deposit, DepositStatus};
use super::store::{DepositStore, Page, PageRequest, SortOrder};

#[derive(Default)]
pub struct InMemoryDepositStore {
    records: Mutex<HashMap<i64, Deposit>>,
    next_id: AtomicI64,
}

impl InMemoryDepositStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<i64, Deposit>> {
        self.records.lock().expect("deposit store mutex poisoned")
    }
}

fn sort_key(deposit: &Deposit) -> (Option<DateTime<Utc>>, Option<i64>) {
    (deposit.created_at, deposit.id)
}

fn paginate(mut items: Vec<Deposit>, page: PageRequest) -> Page<Deposit> {
    match page.sort {
        SortOrder::CreatedAtDesc => items.sort_by(|a, b| sort_key(b).cmp(&sort_key(a))),
        SortOrder::CreatedAtAsc => items.sort_by(|a, b| sort_key(a).cmp(&sort_key(b))),
    }
    let total = items.len() as u64;
    let content: Vec<Deposit> = items
        .into_iter()
        .skip(page.offset() as usize)
        .take(page.size as usize)
        .collect();
    Page::new(content, page, total)
}

#[async_trait]
impl DepositStore for InMemoryDepositStore {
    async fn save(&self, deposit: Deposit) -> Result<Deposit, DepositError> {
        let now = Utc::now();
        let mut records = self.lock();
        match deposit.id {
            None => {
                let id = self.next_id.fetch_add(1, Ordering::SeqCst) + 1;
                let saved = Deposit {
                    id: Some(id),
                    created_at: Some(now),
                    updated_at: Some(now),
                    ..deposit
                };
                records.insert(id, saved.clone());
                Ok(saved)
            }
            Some(id) => {
                let existing = records.get(&id).ok_or(DepositError::NotFound(id))?;
                let saved = Deposit {
                    // created_at is immutable; whatever the caller carries is ignored
                    created_at: existing.created_at,
                    updated_at: Some(now),
                    ..deposit
                };
                records.insert(id, saved.clone());
                Ok(saved)
            }
        }
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Deposit>, DepositError> {
        Ok(self.lock().get(&id).cloned())
    }

    async fn find_all(&self, page: PageRequest) -> Result<Page<Deposit>, DepositError> {
        let items: Vec<Deposit> = self.lock().values().cloned().collect();
        Ok(paginate(items, page))
    }

    async fn find_by_account_number(
        &self,
        account_number: &str,
        page: PageRequest,
    ) -> Result<Page<Deposit>, DepositError> {
        let items: Vec<Deposit> = self
            .lock()
            .values()
            .filter(|d| d.account_number == account_number)
            .cloned()
            .collect();
        Ok(paginate(items, page))
    }

    async fn find_by_status(&self, status: DepositStatus) -> Result<Vec<Deposit>, DepositError> {
        let mut items: Vec<Deposit> = self
            .lock()
            .values()
            .filter(|d| d.status == status)
            .cloned()
            .collect();
        items.sort_by(|a, b| sort_key(b).cmp(&sort_key(a)));
        Ok(items)
    }

    async fn find_by_id_and_account_number(
        &self,
        id: i64,
        account_number: &str,
    ) -> Result<Option<Deposit>, DepositError> {
        Ok(self
            .lock()
            .get(&id)
            .filter(|d| d.account_number == account_number)
            .cloned())
    }

    async fn exists_by_id(&self, id: i64) -> Result<bool, DepositError> {
        Ok(self.lock().contains_key(&id))
    }

    async fn exists_by_account_number(&self, account_number: &str) -> Result<bool, DepositError> {
        Ok(self
            .lock()
            .values()
            .any(|d| d.account_number == account_number))
    }

    async fn count_by_account_number(&self, account_number: &str) -> Result<u64, DepositError> {
        Ok(self
            .lock()
            .values()
            .filter(|d| d.account_number == account_number)
            .count() as u64)
    }

    async fn update_status(
        &self,
        id: i64,
        status: DepositStatus,
    ) -> Result<Deposit, DepositError> {
        let mut records = self.lock();
        let record = records.get_mut(&id).ok_or(DepositError::NotFound(id))?;
        record.status = status;
        record.updated_at = Some(Utc::now());
        Ok(record.clone())
    }

    async fn delete_by_id(&self, id: i64) -> Result<(), DepositError> {
        self.lock().remove(&id);
        Ok(())
    }
}
