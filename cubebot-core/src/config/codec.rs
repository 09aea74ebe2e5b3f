//! Binary configuration codec
//!
//! Stored configuration is a postcard-encoded [`RobotConfig`]. The first
//! field is the layout version, so a stale image is rejected before any
//! of its tuning values are trusted.

use super::types::{RobotConfig, CONFIG_VERSION};

/// Maximum serialized config size (binary)
pub const MAX_CONFIG_SIZE: usize = 512;

/// Configuration codec errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Output buffer too small or value not encodable
    Serialize,
    /// Input bytes are not a valid configuration
    Deserialize,
    /// Stored layout version differs from this build
    VersionMismatch {
        /// Version found in the stored image
        found: u8,
        /// Version this build understands
        expected: u8,
    },
}

impl core::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            ConfigError::Serialize => write!(f, "config does not fit the output buffer"),
            ConfigError::Deserialize => write!(f, "stored config is corrupt"),
            ConfigError::VersionMismatch { found, expected } => {
                write!(f, "config version {} (expected {})", found, expected)
            }
        }
    }
}

/// Encode a configuration into `buf`, returning the used prefix
pub fn encode<'a>(config: &RobotConfig, buf: &'a mut [u8]) -> Result<&'a mut [u8], ConfigError> {
    postcard::to_slice(config, buf).map_err(|_| ConfigError::Serialize)
}

/// Decode a configuration, checking the layout version first
pub fn decode(bytes: &[u8]) -> Result<RobotConfig, ConfigError> {
    let found = *bytes.first().ok_or(ConfigError::Deserialize)?;
    if found != CONFIG_VERSION {
        log::warn!("Rejecting stored config version {}", found);
        return Err(ConfigError::VersionMismatch {
            found,
            expected: CONFIG_VERSION,
        });
    }
    postcard::from_bytes(bytes).map_err(|_| ConfigError::Deserialize)
}
