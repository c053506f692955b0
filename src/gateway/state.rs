use std::sync::Arc;

use crate::db::Database;
use crate::deposit::DepositService;

/// Shared gateway state
#[derive(Clone)]
pub struct AppState {
    pub deposit_service: Arc<DepositService>,
    /// Present when a real database backs the store; the health endpoint
    /// pings it. Absent for in-memory runs.
    pub db: Option<Arc<Database>>,
}

impl AppState {
    pub fn new(deposit_service: Arc<DepositService>, db: Option<Arc<Database>>) -> Self {
        Self {
            deposit_service,
            db,
        }
    }
}
