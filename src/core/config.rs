//! # Configuration
//!
//! Centralizes all settings with a clear override hierarchy:
//! defaults → config file → env vars → CLI flags.
//!
//! Config lives at `~/.cardstack/config.toml`. If missing on first run, a
//! commented-out default is generated so users can discover all options.

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::core::state::{
    DEFAULT_GAP_PX, DEFAULT_OVERLAY_COLLAPSE, DEFAULT_STACK_TRANSITION, DEFAULT_SWIPE_THRESHOLD_PX,
    DEFAULT_WINDOW_SIZE, DeckConfig,
};

// ============================================================================
// Config Structs (all fields Option<T> for sparse TOML)
// ============================================================================

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct CardstackConfig {
    #[serde(default)]
    pub stack: StackConfig,
    #[serde(default)]
    pub animation: AnimationConfig,
    #[serde(default)]
    pub gestures: GestureConfig,
    #[serde(default)]
    pub feed: FeedConfig,
    #[serde(default)]
    pub terminal: TerminalConfig,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct StackConfig {
    pub window_size: Option<usize>,
    pub gap_px: Option<u32>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct AnimationConfig {
    pub stack_transition_ms: Option<u64>,
    pub overlay_collapse_ms: Option<u64>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct GestureConfig {
    pub swipe_threshold_px: Option<f32>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct FeedConfig {
    pub path: Option<PathBuf>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct TerminalConfig {
    pub cell_height_px: Option<u16>,
}

// ============================================================================
// Defaults
// ============================================================================

/// Pixels one terminal row stands for when mouse drags emulate touch.
pub const DEFAULT_CELL_HEIGHT_PX: u16 = 16;

// ============================================================================
// Resolved Config (concrete values, no Options)
// ============================================================================

#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub deck: DeckConfig,
    /// `None` means the built-in demo feed.
    pub feed_path: Option<PathBuf>,
    pub cell_height_px: u16,
}

/// Values given on the command line (None = not specified).
#[derive(Debug, Default, Clone)]
pub struct CliOverrides {
    pub feed_path: Option<PathBuf>,
    pub window_size: Option<usize>,
}

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "config I/O error: {e}"),
            ConfigError::Parse(e) => write!(f, "config parse error: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {}

// ============================================================================
// Loading
// ============================================================================

/// Returns the path to `~/.cardstack/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".cardstack").join("config.toml"))
}

/// Load config from `~/.cardstack/config.toml`.
///
/// If the file doesn't exist, generates a commented-out default and
/// returns `CardstackConfig::default()`. If it exists but is malformed,
/// returns `ConfigError::Parse`.
pub fn load_config() -> Result<CardstackConfig, ConfigError> {
    let path = match config_path() {
        Some(p) => p,
        None => {
            warn!("Could not determine home directory, using default config");
            return Ok(CardstackConfig::default());
        }
    };
    load_config_from(&path)
}

pub fn load_config_from(path: &Path) -> Result<CardstackConfig, ConfigError> {
    if !path.exists() {
        info!("No config file found, generating default at {}", path.display());
        generate_default_config(path);
        return Ok(CardstackConfig::default());
    }

    let contents = fs::read_to_string(path).map_err(ConfigError::Io)?;
    let config: CardstackConfig = toml::from_str(&contents).map_err(ConfigError::Parse)?;
    info!("Loaded config from {}", path.display());
    debug!("Config: {:?}", config);
    Ok(config)
}

/// Generates a commented-out default config file at the given path.
fn generate_default_config(path: &Path) {
    let default_content = r#"# Cardstack Configuration
# All settings are optional — defaults are used for anything not specified.
# Override hierarchy: defaults → this file → env vars → CLI flags.

# [stack]
# window_size = 5                    # Cards visible at once
# gap_px = 16                        # Offset between stacked cards

# [animation]
# stack_transition_ms = 350          # Or set CARDSTACK_TRANSITION_MS
# overlay_collapse_ms = 600          # Or set CARDSTACK_COLLAPSE_MS

# [gestures]
# swipe_threshold_px = 50            # Shorter drags are ignored

# [feed]
# path = "/path/to/articles.json"    # Or set CARDSTACK_FEED; demo feed if unset

# [terminal]
# cell_height_px = 16                # Pixels per row for drag gestures
"#;

    if let Some(parent) = path.parent() {
        if let Err(e) = fs::create_dir_all(parent) {
            warn!("Failed to create config directory: {}", e);
            return;
        }
    }
    if let Err(e) = fs::write(path, default_content) {
        warn!("Failed to write default config: {}", e);
    }
}

// ============================================================================
// Resolution
// ============================================================================

/// Resolve the final config by collapsing: defaults → config file → env vars → CLI.
pub fn resolve(config: &CardstackConfig, cli: &CliOverrides) -> ResolvedConfig {
    resolve_with_env(config, cli, |key| std::env::var(key).ok())
}

/// `resolve` with the environment lookup supplied by the caller.
fn resolve_with_env(
    config: &CardstackConfig,
    cli: &CliOverrides,
    env: impl Fn(&str) -> Option<String>,
) -> ResolvedConfig {
    // Feed: CLI → env → config → demo
    let feed_path = cli
        .feed_path
        .clone()
        .or_else(|| env("CARDSTACK_FEED").filter(|v| !v.trim().is_empty()).map(PathBuf::from))
        .or_else(|| config.feed.path.clone());

    // Durations: env → config → default
    let stack_transition = env_millis(&env, "CARDSTACK_TRANSITION_MS")
        .or(config.animation.stack_transition_ms)
        .map(Duration::from_millis)
        .unwrap_or(DEFAULT_STACK_TRANSITION);
    let overlay_collapse = env_millis(&env, "CARDSTACK_COLLAPSE_MS")
        .or(config.animation.overlay_collapse_ms)
        .map(Duration::from_millis)
        .unwrap_or(DEFAULT_OVERLAY_COLLAPSE);

    // Window size: CLI → config → default, never below one card
    let window_size = cli
        .window_size
        .or(config.stack.window_size)
        .unwrap_or(DEFAULT_WINDOW_SIZE);
    if window_size == 0 {
        warn!("window_size 0 is not usable, showing one card");
    }

    let swipe_threshold_px = config
        .gestures
        .swipe_threshold_px
        .filter(|px| px.is_finite() && *px >= 0.0)
        .unwrap_or(DEFAULT_SWIPE_THRESHOLD_PX);

    ResolvedConfig {
        deck: DeckConfig {
            window_size: window_size.max(1),
            gap_px: config.stack.gap_px.unwrap_or(DEFAULT_GAP_PX),
            stack_transition,
            overlay_collapse,
            swipe_threshold_px,
        },
        feed_path,
        cell_height_px: config
            .terminal
            .cell_height_px
            .filter(|px| *px > 0)
            .unwrap_or(DEFAULT_CELL_HEIGHT_PX),
    }
}

fn env_millis(env: &impl Fn(&str) -> Option<String>, key: &str) -> Option<u64> {
    let raw = env(key)?;
    match raw.trim().parse() {
        Ok(ms) => Some(ms),
        Err(e) => {
            warn!("Ignoring {key}={raw:?}: {e}");
            None
        }
    }
}
