//! Configuration types
//!
//! Board-agnostic tuning structures. With the `serde` feature they can be
//! parsed from TOML by the host or stored as postcard binary data.

#[cfg(feature = "serde")]
pub mod codec;
pub mod types;

#[cfg(feature = "serde")]
pub use codec::{decode, encode, ConfigError, MAX_CONFIG_SIZE};
pub use types::*;
