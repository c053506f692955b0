//! Deposit Gateway - bank deposit record service
//!
//! Records deposit transactions against accounts and manages their
//! lifecycle (PENDING -> COMPLETED | FAILED | CANCELLED) behind a REST
//! gateway. This service tracks deposit records only; it is not a ledger
//! and moves no money.
//!
//! # Modules
//!
//! - [`deposit`] - Entity, status machine, store port + implementations,
//!   lifecycle service, boundary validation
//! - [`gateway`] - axum HTTP adapter, response envelope, OpenAPI doc
//! - [`db`] - PostgreSQL connection pool
//! - [`config`] - YAML configuration
//! - [`logging`] - tracing subscriber setup

pub mod config;
pub mod db;
pub mod deposit;
pub mod gateway;
pub mod logging;

pub use config::AppConfig;
pub use db::Database;
pub use deposit::{
    Deposit, DepositError, DepositRequest, DepositResponse, DepositService, DepositStatus,
};
