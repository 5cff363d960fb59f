use std::env;

use serde::{Deserialize, Serialize};

use self::drill::DrillConfig;
use self::log::LogConfig;

pub mod drill;
pub mod log;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub drill: DrillConfig,
    pub log: LogConfig,
}

impl Config {
    /// Build from process environment variables
    pub fn new() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from an arbitrary variable source
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        Config {
            drill: DrillConfig::from_lookup(&lookup),
            log: LogConfig::from_lookup(&lookup),
        }
    }
}

/// Parse a boolean flag the way shells usually spell it
pub(crate) fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" | "" => Some(false),
        _ => None,
    }
}
