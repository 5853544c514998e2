//! Configuration for Nebula Field.
//!
//! Loaded from `~/.nebula/config.toml`. Every section and field is optional;
//! anything missing falls back to the built-in defaults. A config that cannot
//! be read or parsed is logged and ignored rather than treated as fatal.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;

use nebula_types::ui::UiOptions;

const DEFAULT_FRAME_MS: u64 = 8;

#[derive(Debug, Default, Deserialize)]
pub struct NebulaConfig {
    pub app: Option<AppConfig>,
    pub timing: Option<TimingConfig>,
    pub ui: Option<UiConfig>,
}

#[derive(Debug, Default, Deserialize)]
pub struct AppConfig {
    /// Frame cadence of the TUI loop.
    pub tick_ms: Option<u64>,
}

#[derive(Debug, Default, Deserialize)]
pub struct TimingConfig {
    pub reveal_score_ms: Option<u64>,
    pub reveal_result_ms: Option<u64>,
    pub end_emitting_ms: Option<u64>,
    /// Measured from the end of emitting, not from the trigger.
    pub settle_ms: Option<u64>,
}

#[derive(Debug, Default, Deserialize)]
pub struct UiConfig {
    pub ascii_only: Option<bool>,
    pub high_contrast: Option<bool>,
    pub reduced_motion: Option<bool>,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config at {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config at {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("invalid emission timing: {0}")]
    Timing(&'static str),
}

/// Delays of the staged emission reveal, all relative to the emit trigger
/// except `settle`, which follows `end_emitting`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EmissionTimings {
    pub reveal_score: Duration,
    pub reveal_result: Duration,
    pub end_emitting: Duration,
    pub settle: Duration,
}

impl Default for EmissionTimings {
    fn default() -> Self {
        Self {
            reveal_score: Duration::from_millis(2000),
            reveal_result: Duration::from_millis(2600),
            end_emitting: Duration::from_millis(4500),
            settle: Duration::from_millis(800),
        }
    }
}

impl EmissionTimings {
    /// Total time from trigger until the emission is fully idle again.
    #[must_use]
    pub fn settled_at(&self) -> Duration {
        self.end_emitting.saturating_add(self.settle)
    }

    /// The score must be revealed strictly before the result, and both
    /// before emitting ends.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.reveal_score >= self.reveal_result {
            return Err(ConfigError::Timing(
                "reveal_score_ms must be less than reveal_result_ms",
            ));
        }
        if self.reveal_result > self.end_emitting {
            return Err(ConfigError::Timing(
                "reveal_result_ms must not exceed end_emitting_ms",
            ));
        }
        Ok(())
    }
}

impl NebulaConfig {
    pub fn load() -> Option<Self> {
        let path = config_path()?;
        match Self::load_from(&path) {
            Ok(config) => config,
            Err(err) => {
                tracing::warn!("{err}");
                None
            }
        }
    }

    /// Load from an explicit path. A missing file is `Ok(None)`.
    pub fn load_from(path: &Path) -> Result<Option<Self>, ConfigError> {
        if !path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        toml::from_str(&content)
            .map(Some)
            .map_err(|source| ConfigError::Parse {
                path: path.to_path_buf(),
                source,
            })
    }

    #[must_use]
    pub fn path() -> Option<PathBuf> {
        config_path()
    }

    #[must_use]
    pub fn frame_duration(&self) -> Duration {
        let ms = self
            .app
            .as_ref()
            .and_then(|app| app.tick_ms)
            .filter(|ms| *ms > 0)
            .unwrap_or(DEFAULT_FRAME_MS);
        Duration::from_millis(ms)
    }

    /// Emission timings, falling back to the defaults as a whole if the
    /// configured combination breaks the reveal ordering.
    #[must_use]
    pub fn emission_timings(&self) -> EmissionTimings {
        let defaults = EmissionTimings::default();
        let Some(timing) = self.timing.as_ref() else {
            return defaults;
        };

        let pick = |value: Option<u64>, fallback: Duration| {
            value.map_or(fallback, Duration::from_millis)
        };
        let timings = EmissionTimings {
            reveal_score: pick(timing.reveal_score_ms, defaults.reveal_score),
            reveal_result: pick(timing.reveal_result_ms, defaults.reveal_result),
            end_emitting: pick(timing.end_emitting_ms, defaults.end_emitting),
            settle: pick(timing.settle_ms, defaults.settle),
        };

        match timings.validate() {
            Ok(()) => timings,
            Err(err) => {
                tracing::warn!("{err}; using default timings");
                defaults
            }
        }
    }

    /// UI options from the `[ui]` section, overridden by `NEBULA_*` env vars.
    #[must_use]
    pub fn ui_options(&self) -> UiOptions {
        self.ui_options_with_env(|key| std::env::var(key).ok())
    }

    #[must_use]
    pub fn ui_options_with_env(&self, env: impl Fn(&str) -> Option<String>) -> UiOptions {
        let ui = self.ui.as_ref();
        let flag = |key: &str, configured: Option<bool>| {
            env_flag(env(key).as_deref()).or(configured).unwrap_or(false)
        };
        UiOptions {
            ascii_only: flag("NEBULA_ASCII", ui.and_then(|u| u.ascii_only)),
            high_contrast: flag("NEBULA_HIGH_CONTRAST", ui.and_then(|u| u.high_contrast)),
            reduced_motion: flag("NEBULA_REDUCED_MOTION", ui.and_then(|u| u.reduced_motion)),
        }
    }
}

fn env_flag(value: Option<&str>) -> Option<bool> {
    match value?.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[must_use]
pub fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".nebula").join("config.toml"))
}
