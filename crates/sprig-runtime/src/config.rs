#![forbid(unsafe_code)]

//! Animation loop configuration.
//!
//! With the `loop-config` feature a [`LoopConfig`] can be loaded from TOML or
//! JSON. Missing fields fall back to their defaults.
//!
//! ```toml
//! # sprig.toml
//! max_delta_ms = 250
//! frame_interval_ms = 16
//! ```
//!
//! ```rust,ignore
//! let config = LoopConfig::from_toml_file("sprig.toml")?;
//! let mut animation = AnimationLoop::with_config(&config, |dt| { /* ... */ })?;
//! ```

#[cfg(feature = "loop-config")]
use std::path::Path;
use std::time::Duration;

#[cfg(feature = "loop-config")]
use serde::{Deserialize, Serialize};

/// Default drop threshold for frame deltas, in milliseconds.
pub const DEFAULT_MAX_DELTA_MS: u64 = 100;

/// Tunables for the animation loop and its timer fallback.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "loop-config", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "loop-config", serde(default))]
pub struct LoopConfig {
    /// Frames whose delta reaches this many milliseconds are dropped.
    pub max_delta_ms: u64,

    /// Minimum spacing of timer-driven frames; `0` answers immediately.
    pub frame_interval_ms: u64,
}

impl Default for LoopConfig {
    fn default() -> Self {
        Self {
            max_delta_ms: DEFAULT_MAX_DELTA_MS,
            frame_interval_ms: 0,
        }
    }
}

impl LoopConfig {
    /// Drop threshold as a duration.
    pub const fn max_delta(&self) -> Duration {
        Duration::from_millis(self.max_delta_ms)
    }

    /// Timer pacing as a duration.
    pub const fn frame_interval(&self) -> Duration {
        Duration::from_millis(self.frame_interval_ms)
    }

    /// Load from a TOML string.
    #[cfg(feature = "loop-config")]
    pub fn from_toml_str(s: &str) -> Result<Self, LoopConfigError> {
        toml::from_str(s).map_err(LoopConfigError::Toml)
    }

    /// Load from a TOML file on disk.
    #[cfg(feature = "loop-config")]
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, LoopConfigError> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(LoopConfigError::Io)?;
        Self::from_toml_str(&content)
    }

    /// Load from a JSON string.
    #[cfg(feature = "loop-config")]
    pub fn from_json_str(s: &str) -> Result<Self, LoopConfigError> {
        serde_json::from_str(s).map_err(LoopConfigError::Json)
    }

    /// Load from a JSON file on disk.
    #[cfg(feature = "loop-config")]
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, LoopConfigError> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(LoopConfigError::Io)?;
        Self::from_json_str(&content)
    }

    /// Validate all parameters are within acceptable ranges.
    ///
    /// Returns a list of validation errors. An empty list means the config
    /// is valid.
    #[must_use]
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();

        if self.max_delta_ms == 0 {
            errors.push("max_delta_ms must be > 0".into());
        }

        // A pacing interval at or past the threshold drops every frame.
        if self.max_delta_ms > 0 && self.frame_interval_ms >= self.max_delta_ms {
            errors.push(format!(
                "frame_interval_ms must be < max_delta_ms ({}), got {}",
                self.max_delta_ms, self.frame_interval_ms
            ));
        }

        errors
    }

    /// Like [`validate`](Self::validate), folded into a `Result`.
    pub fn check(&self) -> Result<(), LoopConfigError> {
        let errors = self.validate();
        if errors.is_empty() {
            Ok(())
        } else {
            Err(LoopConfigError::Validation(errors))
        }
    }
}

// ---------------------------------------------------------------------------
// Error type
// ---------------------------------------------------------------------------

/// Errors that can occur when loading or applying a loop configuration.
#[derive(Debug)]
pub enum LoopConfigError {
    /// I/O error reading a file.
    Io(std::io::Error),
    /// TOML parse error.
    #[cfg(feature = "loop-config")]
    Toml(toml::de::Error),
    /// JSON parse error.
    #[cfg(feature = "loop-config")]
    Json(serde_json::Error),
    /// Validation errors.
    Validation(Vec<String>),
}

impl std::fmt::Display for LoopConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(e) => write!(f, "I/O error: {e}"),
            #[cfg(feature = "loop-config")]
            Self::Toml(e) => write!(f, "TOML parse error: {e}"),
            #[cfg(feature = "loop-config")]
            Self::Json(e) => write!(f, "JSON parse error: {e}"),
            Self::Validation(errors) => {
                write!(f, "validation errors: {}", errors.join("; "))
            }
        }
    }
}

impl std::error::Error for LoopConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            #[cfg(feature = "loop-config")]
            Self::Toml(e) => Some(e),
            #[cfg(feature = "loop-config")]
            Self::Json(e) => Some(e),
            Self::Validation(_) => None,
        }
    }
}
