//! Tool settings file (`settings.json`) and player configuration files.

use crate::validate::{collect_issues, ValidationError, ValidationResult};
use crate::CONFIG_SCHEMA_VERSION;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use vx_common::PlayerConfig;

/// Persistent tool settings.
///
/// Every field has a default, so an empty object (or a missing file) is a
/// valid configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub schema_version: String,

    /// Embed output preferences.
    pub embed: EmbedSettings,

    /// Project store root. Overridden by `--data-dir` and `VORTEX_DATA`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub store_root: Option<PathBuf>,

    /// Owner used when neither `--owner` nor `VORTEX_OWNER` is set.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_owner: Option<String>,

    /// Starting point for `project new` and for `embed` without `--config`.
    pub player_defaults: PlayerConfig,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: CONFIG_SCHEMA_VERSION.to_string(),
            embed: EmbedSettings::default(),
            store_root: None,
            default_owner: None,
            player_defaults: PlayerConfig::default(),
        }
    }
}

/// Embed output preferences.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EmbedSettings {
    /// Instruction/CTA copy variant (`en` or `pt-br`).
    pub copy: String,
    pub minify: bool,
    pub include_instructions: bool,
    /// MIME type for the `<source>` element.
    pub video_mime: String,
}

impl Default for EmbedSettings {
    fn default() -> Self {
        Self {
            copy: "en".to_string(),
            minify: false,
            include_instructions: true,
            video_mime: "video/mp4".to_string(),
        }
    }
}

impl Settings {
    /// Parse settings from a JSON string and validate them.
    pub fn from_json(json: &str) -> ValidationResult<Self> {
        let settings: Settings = serde_json::from_str(json).map_err(ValidationError::from_json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load settings from a file.
    pub fn from_file(path: &Path) -> ValidationResult<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| ValidationError::IoError(format!("{}: {}", path.display(), e)))?;
        Self::from_json(&content)
    }

    /// Check the schema version and the default player configuration.
    pub fn validate(&self) -> ValidationResult<()> {
        if self.schema_version != CONFIG_SCHEMA_VERSION {
            return Err(ValidationError::VersionMismatch {
                expected: CONFIG_SCHEMA_VERSION.to_string(),
                actual: self.schema_version.clone(),
            });
        }
        if self.embed.video_mime.trim().is_empty() {
            return Err(ValidationError::MissingField("embed.video_mime".to_string()));
        }
        if let Some(err) = collect_issues(&self.player_defaults).into_iter().next() {
            return Err(ValidationError::SemanticError(format!(
                "player_defaults: {}",
                err
            )));
        }
        Ok(())
    }
}

/// Load settings from a resolved path, or return built-in defaults.
pub fn load_settings(path: Option<&Path>) -> ValidationResult<Settings> {
    match path {
        Some(path) => {
            tracing::debug!(path = %path.display(), "loading settings");
            Settings::from_file(path)
        }
        None => Ok(Settings::default()),
    }
}

/// Read a player configuration JSON file.
///
/// Only syntax and shape are checked here; run
/// [`crate::validate_player_config`] for semantic checks.
pub fn load_player_config(path: &Path) -> ValidationResult<PlayerConfig> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| ValidationError::IoError(format!("{}: {}", path.display(), e)))?;
    PlayerConfig::from_json(&content).map_err(ValidationError::from_json)
}
