//! Vortex VSL common types, IDs, and errors.
//!
//! This crate provides foundational types shared across the workspace:
//! - The player configuration record handed to the embed generator
//! - Instance, project and owner identity types
//! - Common error types
//! - Output format specifications

pub mod error;
pub mod id;
pub mod output;
pub mod player;

pub use error::{format_error_human, Error, ErrorCategory, Result, StructuredError};
pub use id::{
    FixedInstanceId, InstanceId, InstanceIdSource, OwnerId, ProjectId, RandomInstanceIds,
    SequentialInstanceIds,
};
pub use output::OutputFormat;
pub use player::{
    AccentColor, AspectRatio, PlayerConfig, DEFAULT_ACCENT_COLOR, DEFAULT_CONTENT_DELAY_SECONDS,
    DEFAULT_DISPLAY_NAME, DEFAULT_VIDEO_SOURCE,
};

/// Schema version stamped on every JSON payload and persisted record.
pub const SCHEMA_VERSION: &str = "1.0.0";
