//! Settings and data directory resolution.
//!
//! Resolution order: CLI arguments → environment variables → XDG paths → defaults.

use std::path::{Path, PathBuf};

/// Where a path was found.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ConfigSource {
    /// Explicitly provided via CLI argument.
    CliArgument,

    /// Set via environment variable.
    Environment,

    /// Taken from the settings file.
    SettingsFile,

    /// Found in the XDG config or data directory.
    Xdg,

    /// Using built-in defaults.
    #[default]
    BuiltinDefault,
}

impl std::fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigSource::CliArgument => write!(f, "CLI argument"),
            ConfigSource::Environment => write!(f, "environment variable"),
            ConfigSource::SettingsFile => write!(f, "settings file"),
            ConfigSource::Xdg => write!(f, "XDG directory"),
            ConfigSource::BuiltinDefault => write!(f, "builtin default"),
        }
    }
}

/// A resolved path together with where it came from.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolvedPath {
    /// The path, or `None` when falling back to built-in defaults.
    pub path: Option<PathBuf>,
    pub source: ConfigSource,
}

/// Environment variable names.
pub const ENV_SETTINGS_PATH: &str = "VORTEX_SETTINGS";
pub const ENV_CONFIG_DIR: &str = "VORTEX_CONFIG_DIR";
pub const ENV_DATA_DIR: &str = "VORTEX_DATA";

/// Standard settings file name.
const SETTINGS_FILENAME: &str = "settings.json";

/// Application name for XDG directories.
const APP_NAME: &str = "vortex-vsl";

/// Resolve the settings file.
///
/// Resolution order:
/// 1. Explicit CLI path (returned even if missing, so loading reports it)
/// 2. `VORTEX_SETTINGS` (if the file exists)
/// 3. `VORTEX_CONFIG_DIR` + `settings.json` (if it exists)
/// 4. XDG config directory (`~/.config/vortex-vsl/settings.json`)
/// 5. Built-in defaults (no path)
pub fn resolve_config(cli_path: Option<&Path>) -> ResolvedPath {
    // 1. CLI argument
    if let Some(path) = cli_path {
        return ResolvedPath {
            path: Some(path.to_path_buf()),
            source: ConfigSource::CliArgument,
        };
    }

    // 2. Environment variable (direct path)
    if let Some(path) = env_path(ENV_SETTINGS_PATH) {
        if path.exists() {
            return found(path, ConfigSource::Environment);
        }
    }

    // 3. Environment variable (config dir)
    if let Some(dir) = env_path(ENV_CONFIG_DIR) {
        let path = dir.join(SETTINGS_FILENAME);
        if path.exists() {
            return found(path, ConfigSource::Environment);
        }
    }

    // 4. XDG config directory
    if let Some(dir) = xdg_config_dir() {
        let path = dir.join(SETTINGS_FILENAME);
        if path.exists() {
            return found(path, ConfigSource::Xdg);
        }
    }

    // 5. Built-in default
    ResolvedPath::default()
}

/// Resolve the project store root.
///
/// Resolution order: CLI `--data-dir` → `VORTEX_DATA` → settings
/// `store_root` → XDG data directory → `./.vortex`.
pub fn resolve_data_dir(cli_path: Option<&Path>, settings_root: Option<&Path>) -> ResolvedPath {
    if let Some(path) = cli_path {
        return found(path.to_path_buf(), ConfigSource::CliArgument);
    }
    if let Some(path) = env_path(ENV_DATA_DIR) {
        return found(path, ConfigSource::Environment);
    }
    if let Some(path) = settings_root {
        return found(path.to_path_buf(), ConfigSource::SettingsFile);
    }
    if let Some(dir) = dirs::data_dir() {
        return found(dir.join(APP_NAME), ConfigSource::Xdg);
    }
    found(PathBuf::from(".vortex"), ConfigSource::BuiltinDefault)
}

/// Get the XDG config directory for vortex-vsl.
pub fn xdg_config_dir() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join(APP_NAME))
}

fn env_path(var: &str) -> Option<PathBuf> {
    std::env::var_os(var)
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
}

fn found(path: PathBuf, source: ConfigSource) -> ResolvedPath {
    tracing::trace!(path = %path.display(), %source, "resolved path");
    ResolvedPath {
        path: Some(path),
        source,
    }
}
