//! Project settings discovery and loading.
//!
//! Arena settings live in an optional `.arena.toml` file. This module walks up
//! the directory tree to find it, parses it, and implements `arena init`.
//! Every field is optional so that command-line flags and environment
//! variables can fill in what the file leaves out.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::{env, fs};

/// File name searched for in the current directory and its ancestors.
pub const SETTINGS_FILE: &str = ".arena.toml";

/// Settings loaded from `.arena.toml`.
#[derive(Debug, Clone, Default)]
pub struct ProjectConfig {
    /// The file the settings were read from, if one was found.
    pub path: Option<PathBuf>,
    /// The parsed settings (all defaults when no file was found).
    pub config: ArenaSettings,
}

/// Contents of `.arena.toml`. Unknown keys are ignored.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct ArenaSettings {
    #[serde(default)]
    pub api: ApiSettings,
    #[serde(default)]
    pub play: PlaySettings,
    #[serde(default)]
    pub lobby: LobbySettings,
}

/// `[api]` section.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct ApiSettings {
    pub base: Option<String>,
    pub timeout_secs: Option<u64>,
    pub key: Option<String>,
}

/// `[play]` section: qualification defaults.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct PlaySettings {
    pub difficulty: Option<String>,
    pub strategy: Option<String>,
    pub max_rounds: Option<u32>,
}

/// `[lobby]` section.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct LobbySettings {
    pub interval_secs: Option<u64>,
}

/// Discover settings by walking up from CWD.
///
/// A missing file is not an error; the defaults are returned instead.
pub fn discover() -> Result<ProjectConfig> {
    let cwd = env::current_dir()?;
    discover_from(&cwd)
}

/// Discover settings starting from a specific directory.
pub fn discover_from(start: &Path) -> Result<ProjectConfig> {
    let mut current = start;

    loop {
        let config_path = current.join(SETTINGS_FILE);
        if config_path.is_file() {
            let config = load_config(&config_path)?;
            return Ok(ProjectConfig {
                path: Some(config_path),
                config,
            });
        }

        match current.parent() {
            Some(parent) => current = parent,
            None => return Ok(ProjectConfig::default()),
        }
    }
}

/// Load and parse a settings file.
fn load_config(path: &Path) -> Result<ArenaSettings> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let config: ArenaSettings =
        toml::from_str(&content).with_context(|| format!("Failed to parse {}", path.display()))?;
    Ok(config)
}

const DEFAULT_SETTINGS: &str = r#"[api]
# base = "https://agent-arena-rps.vercel.app"
# timeout_secs = 20
# key = "ak_live_..."

[play]
# difficulty = "easy"
# strategy = "paper"
# max_rounds = 5

[lobby]
# interval_secs = 5
"#;

/// Create `.arena.toml` with commented defaults in the current directory.
///
/// Idempotent: an existing file is left untouched. Returns whether a file was
/// written.
pub fn init() -> Result<bool> {
    let cwd = env::current_dir()?;
    init_in_dir(&cwd)
}

fn init_in_dir(dir: &Path) -> Result<bool> {
    let config_path = dir.join(SETTINGS_FILE);
    if config_path.exists() {
        return Ok(false);
    }
    fs::write(&config_path, DEFAULT_SETTINGS)
        .with_context(|| format!("Failed to create {}", config_path.display()))?;
    Ok(true)
}
