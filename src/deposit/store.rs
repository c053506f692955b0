//! Persistence port for deposit records, plus pagination types.
//!
//! The lifecycle service only ever sees `dyn DepositStore`; the PostgreSQL
//! and in-memory implementations live in sibling modules.

use async_trait::async_trait;
use serde::Serialize;
use utoipa::ToSchema;

use super::error::DepositError;
use super::model::{Deposit, DepositStatus};

/// Page size applied when the caller does not send one (or sends 0)
pub const DEFAULT_PAGE_SIZE: u32 = 20;
/// Hard cap so a caller cannot request an unbounded slice
pub const MAX_PAGE_SIZE: u32 = 200;

/// Result-set ordering. Only `created_at` ordering is part of the API;
/// the record id breaks ties so page unions are exact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    #[default]
    CreatedAtDesc,
    CreatedAtAsc,
}

impl SortOrder {
    /// Parse the `sort` query parameter (`createdAt,desc` / `createdAt,asc`).
    ///
    /// A bare `createdAt` means descending, matching the API default.
    /// Anything else is rejected rather than silently ignored.
    pub fn parse(s: &str) -> Result<Self, DepositError> {
        match s {
            "createdAt" | "createdAt,desc" => Ok(SortOrder::CreatedAtDesc),
            "createdAt,asc" => Ok(SortOrder::CreatedAtAsc),
            _ => Err(DepositError::InvalidSort(s.to_string())),
        }
    }
}

/// A bounded window over the result set.
#[derive(Debug, Clone, Copy)]
pub struct PageRequest {
    /// Zero-based page index
    pub page: u32,
    /// Records per page, 1..=MAX_PAGE_SIZE
    pub size: u32,
    pub sort: SortOrder,
}

impl PageRequest {
    pub fn new(page: u32, size: u32, sort: SortOrder) -> Self {
        let size = match size {
            0 => DEFAULT_PAGE_SIZE,
            s if s > MAX_PAGE_SIZE => MAX_PAGE_SIZE,
            s => s,
        };
        Self { page, size, sort }
    }

    pub fn offset(&self) -> u64 {
        u64::from(self.page) * u64::from(self.size)
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::new(0, DEFAULT_PAGE_SIZE, SortOrder::default())
    }
}

/// A bounded slice of a larger result set plus its metadata.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub content: Vec<T>,
    /// Zero-based page index
    pub page: u32,
    pub size: u32,
    pub total_elements: u64,
    pub total_pages: u32,
}

impl<T> Page<T> {
    pub fn new(content: Vec<T>, request: PageRequest, total_elements: u64) -> Self {
        let total_pages = total_elements.div_ceil(u64::from(request.size)) as u32;
        Self {
            content,
            page: request.page,
            size: request.size,
            total_elements,
            total_pages,
        }
    }

    /// Convert the content, keeping the pagination metadata intact.
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            content: self.content.into_iter().map(f).collect(),
            page: self.page,
            size: self.size,
            total_elements: self.total_elements,
            total_pages: self.total_pages,
        }
    }
}

/// Storage port for deposit records.
///
/// Every operation is atomic with respect to a single record. The store is
/// the only component that assigns ids and timestamps.
#[async_trait]
pub trait DepositStore: Send + Sync {
    /// Insert when `id` is `None` (assigning id and both timestamps),
    /// otherwise update the existing row and refresh `updated_at`.
    /// Updating a vanished id fails with `NotFound`.
    async fn save(&self, deposit: Deposit) -> Result<Deposit, DepositError>;

    async fn find_by_id(&self, id: i64) -> Result<Option<Deposit>, DepositError>;

    async fn find_all(&self, page: PageRequest) -> Result<Page<Deposit>, DepositError>;

    async fn find_by_account_number(
        &self,
        account_number: &str,
        page: PageRequest,
    ) -> Result<Page<Deposit>, DepositError>;

    async fn find_by_status(&self, status: DepositStatus) -> Result<Vec<Deposit>, DepositError>;

    async fn find_by_id_and_account_number(
        &self,
        id: i64,
        account_number: &str,
    ) -> Result<Option<Deposit>, DepositError>;

    async fn exists_by_id(&self, id: i64) -> Result<bool, DepositError>;

    async fn exists_by_account_number(&self, account_number: &str) -> Result<bool, DepositError>;

    async fn count_by_account_number(&self, account_number: &str) -> Result<u64, DepositError>;

    /// Atomic read-modify-write of the status field: the fetch, the status
    /// assignment, and the `updated_at` refresh happen inside one
    /// storage-level transaction. Fails with `NotFound` for a missing id.
    async fn update_status(
        &self,
        id: i64,
        status: DepositStatus,
    ) -> Result<Deposit, DepositError>;

    /// Deleting a non-existent id is a no-op at this level; the lifecycle
    /// service enforces the existence check.
    async fn delete_by_id(&self, id: i64) -> Result<(), DepositError>;
}
