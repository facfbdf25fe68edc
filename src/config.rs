//! Process-wide configuration.
//!
//! The host environment decides once whether length and substring operations
//! are overloaded with a multi-byte-aware interpretation, and which
//! interpretation mode is active at start-up. The answer is detected on first
//! use (from the environment unless [`install`] ran earlier) and cached for the
//! lifetime of the process.
//!
//! # Examples
//!
//! ```
//! use strnorm::config::NormalizerConfig;
//!
//! # fn main() -> strnorm::Result<()> {
//! let config = NormalizerConfig::from_json(r#"{"length_overload": true, "ambient_encoding": "UTF-8"}"#)?;
//! assert!(config.length_overload);
//! assert_eq!(config.max_flatten_depth, 512);
//! # Ok(())
//! # }
//! ```

use encoding_rs::Encoding;
use log::debug;
use once_cell::sync::OnceCell;
use serde::{Deserialize, Serialize};

use crate::{NormError, Result};

/// Environment variable enabling the overloaded length interpretation.
pub const ENV_LENGTH_OVERLOAD: &str = "STRNORM_LENGTH_OVERLOAD";
/// Environment variable naming the initial interpretation mode.
pub const ENV_ENCODING: &str = "STRNORM_ENCODING";

static CONFIG: OnceCell<NormalizerConfig> = OnceCell::new();

/// Configuration for the ambient text environment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NormalizerConfig {
    /// Whether the host overloads length/substring counting with the active
    /// interpretation mode. When false the encoding-mode guard is a no-op.
    pub length_overload: bool,
    /// Encoding label of the interpretation mode active at start-up
    pub ambient_encoding: String,
    /// Nesting limit for [`crate::utils::flatten_checked`] callers that use the configured default
    pub max_flatten_depth: usize,
}

impl Default for NormalizerConfig {
    fn default() -> Self {
        NormalizerConfig {
            length_overload: false,
            ambient_encoding: "UTF-8".to_string(),
            max_flatten_depth: 512,
        }
    }
}

impl NormalizerConfig {
    /// Reads `STRNORM_LENGTH_OVERLOAD` and `STRNORM_ENCODING`, falling back to defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds a configuration from an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();
        if let Some(value) = lookup(ENV_LENGTH_OVERLOAD) {
            config.length_overload = matches!(
                value.trim().to_lowercase().as_str(),
                "1" | "true" | "yes" | "on"
            );
        }
        if let Some(value) = lookup(ENV_ENCODING) {
            let value = value.trim();
            if !value.is_empty() {
                config.ambient_encoding = value.to_string();
            }
        }
        config
    }

    /// Parses a configuration from JSON; missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Resolves `ambient_encoding` to an `encoding_rs` encoding.
    pub fn ambient_encoding(&self) -> Result<&'static Encoding> {
        encoding_for_label(&self.ambient_encoding)
    }
}

/// Looks up an interpretation mode by label (e.g. "UTF-8", "ISO-8859-1", "Shift_JIS").
pub fn encoding_for_label(label: &str) -> Result<&'static Encoding> {
    let label = label.trim().to_lowercase();
    match Encoding::for_label(label.as_bytes()) {
        Some(encoding) => Ok(encoding),
        None => Err(NormError::unknown_encoding(label)),
    }
}

/// Installs the process configuration. Fails if it was already installed or detected.
pub fn install(config: NormalizerConfig) -> Result<()> {
    config.ambient_encoding()?;
    CONFIG
        .set(config)
        .map_err(|_| NormError::invalid_parameter("Configuration already initialized"))
}

/// Returns the process configuration, detecting it from the environment on first access.
pub fn get() -> &'static NormalizerConfig {
    CONFIG.get_or_init(|| {
        let config = NormalizerConfig::from_env();
        debug!(
            "Detected text environment: length_overload={}, encoding={}",
            config.length_overload, config.ambient_encoding
        );
        config
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_lookup() {
        let config = NormalizerConfig::from_lookup(|key| match key {
            ENV_LENGTH_OVERLOAD => Some("On".to_string()),
            ENV_ENCODING => Some(" Shift_JIS ".to_string()),
            _ => None,
        });
        assert!(config.length_overload);
        assert_eq!(config.ambient_encoding, "Shift_JIS");
        assert_eq!(config.ambient_encoding().unwrap(), encoding_rs::SHIFT_JIS);

        let config = NormalizerConfig::from_lookup(|_| None);
        assert_eq!(config, NormalizerConfig::default());

        let config = NormalizerConfig::from_lookup(|key| {
            (key == ENV_LENGTH_OVERLOAD).then(|| "0".to_string())
        });
        assert!(!config.length_overload);
    }

    #[test]
    fn test_from_json() {
        let config = NormalizerConfig::from_json(r#"{"max_flatten_depth": 8}"#).unwrap();
        assert_eq!(config.max_flatten_depth, 8);
        assert!(!config.length_overload);
        assert_eq!(config.ambient_encoding, "UTF-8");

        assert!(NormalizerConfig::from_json("[1, 2").is_err());
    }

    #[test]
    fn test_encoding_for_label() {
        assert_eq!(encoding_for_label("utf8").unwrap(), encoding_rs::UTF_8);
        // WHATWG maps latin1 onto windows-1252
        assert_eq!(encoding_for_label("ISO-8859-1").unwrap(), encoding_rs::WINDOWS_1252);
        assert!(encoding_for_label("not-an-encoding").is_err());
    }

    #[test]
    fn test_install_rejects_unknown_encoding() {
        let config = NormalizerConfig {
            ambient_encoding: "bogus".to_string(),
            ..NormalizerConfig::default()
        };
        assert!(install(config).is_err());
    }
}
