//! Configuration loading
//!
//! A `.bin` file is a postcard image as stored on the robot; anything
//! else is parsed as TOML. Keys missing from a TOML file keep their
//! defaults.

use std::fs;
use std::path::Path;

use anyhow::{anyhow, Context, Result};
use cubebot_core::config::{decode, encode, RobotConfig, CONFIG_VERSION, MAX_CONFIG_SIZE};

/// Load a configuration file
pub fn load(path: &Path) -> Result<RobotConfig> {
    let config = if is_binary(path) {
        let bytes = fs::read(path).with_context(|| format!("read {}", path.display()))?;
        decode(&bytes).map_err(|e| anyhow!("decode {}: {}", path.display(), e))?
    } else {
        let text =
            fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
        parse_toml(&text).with_context(|| format!("parse {}", path.display()))?
    };
    log::info!("Loaded config from {}", path.display());
    Ok(config)
}

/// Parse a TOML configuration, rejecting a foreign layout version
pub fn parse_toml(text: &str) -> Result<RobotConfig> {
    let config: RobotConfig = toml::from_str(text)?;
    if config.version != CONFIG_VERSION {
        return Err(anyhow!(
            "config version {} (expected {})",
            config.version,
            CONFIG_VERSION
        ));
    }
    Ok(config)
}

/// Write a configuration as a binary image
pub fn export(config: &RobotConfig, path: &Path) -> Result<()> {
    let mut buf = [0u8; MAX_CONFIG_SIZE];
    let used = encode(config, &mut buf).map_err(|e| anyhow!("encode config: {}", e))?;
    fs::write(path, &*used).with_context(|| format!("write {}", path.display()))?;
    log::info!("Wrote {} byte config image to {}", used.len(), path.display());
    Ok(())
}

fn is_binary(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext.eq_ignore_ascii_case("bin"))
}
