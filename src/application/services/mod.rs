//! Application services - Bot-level operations outside the per-message pipeline

pub mod announce_service;
pub mod ready;

pub use announce_service::AnnounceService;
pub use ready::ReadySignal;
