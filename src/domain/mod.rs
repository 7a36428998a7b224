//! Domain layer - Core business objects and capability traits
//!
//! This layer contains:
//! - Entities: ids, messages, settings records, commands, outcomes
//! - Traits: Abstractions for infrastructure (Messenger, ConfigStore)

pub mod entities;
pub mod traits;
