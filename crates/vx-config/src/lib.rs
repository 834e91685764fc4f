//! Vortex VSL configuration loading and validation.
//!
//! This crate provides:
//! - Semantic validation of player configurations
//! - The tool settings file (`settings.json`)
//! - Settings and data directory resolution (CLI → env → XDG → defaults)

pub mod resolve;
pub mod settings;
pub mod validate;

pub use resolve::{resolve_config, resolve_data_dir, ConfigSource, ResolvedPath};
pub use settings::{load_player_config, load_settings, EmbedSettings, Settings};
pub use validate::{collect_issues, validate_player_config, ValidationError, ValidationResult};

/// Schema version for configuration files.
pub const CONFIG_SCHEMA_VERSION: &str = "1.0.0";
