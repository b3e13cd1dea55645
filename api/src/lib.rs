//! Auditor API Module
//!
//! HTTP surface over `AuditService`: analyze a contract, fix a contract,
//! health check.

pub mod handlers;
pub mod models;
pub mod server;

pub use handlers::*;
pub use models::*;
pub use server::*;
