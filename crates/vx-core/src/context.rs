//! Per-invocation runtime: settings, store location and owner identity.

use std::path::{Path, PathBuf};
use tracing::debug;
use vx_common::{Error, OwnerId, Result};
use vx_config::{
    load_settings, resolve_config, resolve_data_dir, ConfigSource, ResolvedPath, Settings,
    ValidationError,
};
use vx_embed::{CopyVariant, EmbedOptions};
use vx_store::FileProjectStore;

/// Environment variable naming the owner identity.
pub const ENV_OWNER: &str = "VORTEX_OWNER";

/// Owner used when nothing else names one.
pub const DEFAULT_OWNER: &str = "local";

/// Inputs for [`Runtime::load`], usually straight from global CLI flags.
#[derive(Debug, Clone, Default)]
pub struct RuntimeOptions {
    pub settings: Option<PathBuf>,
    pub data_dir: Option<PathBuf>,
    pub owner: Option<String>,
}

/// Resolved settings, data directory and owner.
#[derive(Debug, Clone)]
pub struct Runtime {
    pub settings: Settings,
    pub settings_path: ResolvedPath,
    pub data_dir: ResolvedPath,
    pub owner: OwnerId,
    pub owner_source: ConfigSource,
}

impl Runtime {
    /// Resolve and load everything a command may need.
    pub fn load(options: &RuntimeOptions) -> Result<Self> {
        let settings_path = resolve_config(options.settings.as_deref());
        let settings = load_settings(settings_path.path.as_deref())
            .map_err(|e| settings_error(settings_path.path.as_deref(), e))?;
        debug!(
            path = ?settings_path.path,
            source = %settings_path.source,
            "settings resolved"
        );

        let data_dir = resolve_data_dir(options.data_dir.as_deref(), settings.store_root.as_deref());

        let env_owner = std::env::var(ENV_OWNER).ok().filter(|s| !s.trim().is_empty());
        let (raw_owner, owner_source) = if let Some(owner) = &options.owner {
            (owner.clone(), ConfigSource::CliArgument)
        } else if let Some(owner) = env_owner {
            (owner, ConfigSource::Environment)
        } else if let Some(owner) = &settings.default_owner {
            (owner.clone(), ConfigSource::SettingsFile)
        } else {
            (DEFAULT_OWNER.to_string(), ConfigSource::BuiltinDefault)
        };
        let owner = OwnerId::parse(&raw_owner).ok_or_else(|| {
            Error::Unauthorized(format!(
                "owner identity {:?} from {} is not valid (use letters, digits, '.', '_', '@', '-')",
                raw_owner, owner_source
            ))
        })?;

        Ok(Self {
            settings,
            settings_path,
            data_dir,
            owner,
            owner_source,
        })
    }

    /// Root directory of the project store.
    pub fn data_root(&self) -> PathBuf {
        self.data_dir
            .path
            .clone()
            .unwrap_or_else(|| PathBuf::from(".vortex"))
    }

    pub fn store(&self) -> FileProjectStore {
        FileProjectStore::new(self.data_root())
    }

    /// Embed options from the settings file.
    pub fn embed_options(&self) -> Result<EmbedOptions> {
        let embed = &self.settings.embed;
        let copy: CopyVariant = embed
            .copy
            .parse()
            .map_err(|e: String| Error::InvalidSettings(format!("embed.copy: {}", e)))?;
        Ok(EmbedOptions::default()
            .with_copy(copy)
            .with_minify(embed.minify)
            .with_instructions(embed.include_instructions)
            .with_video_mime(embed.video_mime.clone()))
    }
}

fn settings_error(path: Option<&Path>, err: ValidationError) -> Error {
    let location = path
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "settings".to_string());
    match err {
        ValidationError::IoError(msg) => Error::Config(msg),
        other => Error::InvalidSettings(format!("{}: {}", location, other)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn options_with(dir: &TempDir, settings: &str) -> RuntimeOptions {
        let path = dir.path().join("settings.json");
        std::fs::write(&path, settings).unwrap();
        RuntimeOptions {
            settings: Some(path),
            data_dir: Some(dir.path().join("data")),
            owner: None,
        }
    }

    #[test]
    fn test_cli_owner_wins() {
        let dir = TempDir::new().unwrap();
        let mut options = options_with(&dir, r#"{"default_owner": "team"}"#);
        options.owner = Some("ana".into());
        let runtime = Runtime::load(&options).unwrap();
        assert_eq!(runtime.owner.as_str(), "ana");
        assert_eq!(runtime.owner_source, ConfigSource::CliArgument);
        assert_eq!(runtime.data_dir.source, ConfigSource::CliArgument);
        assert_eq!(runtime.data_root(), dir.path().join("data"));
    }

    #[test]
    fn test_invalid_owner_is_unauthorized() {
        let dir = TempDir::new().unwrap();
        let mut options = options_with(&dir, "{}");
        options.owner = Some("../etc".into());
        let err = Runtime::load(&options).unwrap_err();
        assert!(matches!(err, Error::Unauthorized(_)));
    }

    #[test]
    fn test_missing_settings_file_is_config_error() {
        let dir = TempDir::new().unwrap();
        let options = RuntimeOptions {
            settings: Some(dir.path().join("absent.json")),
            owner: Some("ana".into()),
            ..Default::default()
        };
        let err = Runtime::load(&options).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_bad_settings_are_invalid_settings() {
        let dir = TempDir::new().unwrap();
        let mut options = options_with(&dir, r#"{"schema_version": "9.0.0"}"#);
        options.owner = Some("ana".into());
        let err = Runtime::load(&options).unwrap_err();
        assert!(matches!(err, Error::InvalidSettings(_)));
    }

    #[test]
    fn test_embed_options_from_settings() {
        let dir = TempDir::new().unwrap();
        let mut options = options_with(
            &dir,
            r#"{"embed": {"copy": "pt-br", "minify": true, "include_instructions": false}}"#,
        );
        options.owner = Some("ana".into());
        let runtime = Runtime::load(&options).unwrap();
        let embed = runtime.embed_options().unwrap();
        assert_eq!(embed.copy, CopyVariant::PtBr);
        assert!(embed.minify);
        assert!(!embed.include_instructions);
    }

    #[test]
    fn test_unknown_copy_variant() {
        let dir = TempDir::new().unwrap();
        let mut options = options_with(&dir, r#"{"embed": {"copy": "klingon"}}"#);
        options.owner = Some("ana".into());
        let runtime = Runtime::load(&options).unwrap();
        assert!(matches!(
            runtime.embed_options(),
            Err(Error::InvalidSettings(_))
        ));
    }
}
