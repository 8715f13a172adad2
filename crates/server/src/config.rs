use std::fs;

use serde::Deserialize;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub bind_addr: String,
    /// Artificial delay before every list response. Set to 0 to disable.
    pub latency_ms: u64,
    pub seed_items: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            bind_addr: "127.0.0.1:8080".into(),
            latency_ms: 1000,
            seed_items: true,
        }
    }
}

pub fn load_settings() -> Settings {
    let mut settings = fs::read_to_string("server.toml")
        .ok()
        .map(|raw| parse_settings(&raw))
        .unwrap_or_default();

    if let Ok(v) = std::env::var("SERVER_BIND") {
        settings.bind_addr = v;
    }
    if let Ok(v) = std::env::var("APP__BIND_ADDR") {
        settings.bind_addr = v;
    }
    if let Ok(v) = std::env::var("APP__LATENCY_MS") {
        if let Ok(parsed) = v.parse() {
            settings.latency_ms = parsed;
        }
    }
    if let Ok(v) = std::env::var("APP__SEED_ITEMS") {
        if let Ok(parsed) = v.parse() {
            settings.seed_items = parsed;
        }
    }

    settings
}

fn parse_settings(raw: &str) -> Settings {
    toml::from_str(raw).unwrap_or_default()
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
