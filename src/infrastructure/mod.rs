//! Infrastructure layer - External concerns
//!
//! This layer contains:
//! - Config: Configuration loading
//! - Database: SQLite settings store
//! - Storage: In-memory settings store
//! - Adapters: Platform integrations
//! - Wikipedia: Page lookup client

pub mod adapters;
pub mod config;
pub mod database;
pub mod storage;
pub mod wikipedia;
