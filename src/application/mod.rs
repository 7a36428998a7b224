//! Application layer - Use cases and business logic
//!
//! This layer contains:
//! - Errors: Domain-specific errors
//! - Messaging: Mute filter, prefix resolution, dispatching, ingestion pipeline
//! - Services: Announcements and connection readiness

pub mod errors;
pub mod messaging;
pub mod services;
