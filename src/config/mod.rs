//! Configuration module for archive runs
//!
//! This module provides the `ArchiveConfig` struct and its type-safe builder.
//! The config is an explicit value handed to the orchestrator; nothing in the
//! crate reads process-wide mutable settings.

// Sub-modules
pub mod builder;
pub mod getters;
pub mod types;

// Re-exports for public API
pub use builder::{ArchiveConfigBuilder, WithArchiveRoot};
pub use types::ArchiveConfig;
