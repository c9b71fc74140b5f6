// settings
use once_cell::sync::Lazy;
use std::collections::HashMap;
use std::env;
use std::str::FromStr;
use std::time::Duration;
use tracing::{info, warn};

use crate::catalog::ytmusic::{DEFAULT_BASE_URL, YtMusicConfig};

pub static SECRET_MANAGER: Lazy<SecretManager> = Lazy::new(SecretManager::from_env);

/// Deployment mode, read from `MODE`. Anything other than `prod` is dev.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Dev,
    Prod,
}

impl Mode {
    pub fn from_env() -> Self {
        Self::parse(env::var("MODE").ok().as_deref())
    }

    fn parse(raw: Option<&str>) -> Self {
        match raw {
            Some(mode) if mode.trim().to_lowercase() == "prod" => Mode::Prod,
            _ => Mode::Dev,
        }
    }

    /// Log filter directives layered under `RUST_LOG`.
    pub fn log_directives(self) -> &'static [&'static str] {
        match self {
            Mode::Dev => &["info", "tubetune_proxy=debug", "tower_http=debug"],
            Mode::Prod => &["info"],
        }
    }
}

const DEFAULT_PORT: u16 = 5000;
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Every key the service reads, with its fallback.
const DEFAULTS: &[(&str, &str)] = &[
    ("HOST", "0.0.0.0"),
    ("PORT", "5000"),
    ("YTMUSIC_BASE_URL", DEFAULT_BASE_URL),
    ("YTMUSIC_LANGUAGE", "en"),
    ("YTMUSIC_LOCATION", ""),
    ("YTMUSIC_TIMEOUT_SECS", "30"),
];

pub struct SecretManager {
    mode: Mode,
    secrets: HashMap<String, String>,
}

impl SecretManager {
    fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from any key lookup; blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mode = Mode::parse(lookup("MODE").as_deref());
        let mut secrets: HashMap<String, String> = HashMap::new();
        let mut overridden: Vec<&str> = Vec::new();

        for &(key, default) in DEFAULTS {
            let value = match lookup(key).filter(|v| !v.trim().is_empty()) {
                Some(value) => {
                    overridden.push(key);
                    value
                }
                None => default.to_string(),
            };
            secrets.insert(key.to_string(), value);
        }

        // Log which settings came from the environment (NOT their values!)
        info!("Settings from environment ({:?} mode): {:?}", mode, overridden);

        SecretManager { mode, secrets }
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn get(&self, key: &str) -> String {
        self.secrets.get(key).cloned().unwrap_or_default()
    }

    pub fn port(&self) -> u16 {
        self.parsed("PORT", DEFAULT_PORT)
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.get("HOST"), self.port())
    }

    pub fn ytmusic(&self) -> YtMusicConfig {
        let location = self.get("YTMUSIC_LOCATION");
        YtMusicConfig {
            base_url: self.get("YTMUSIC_BASE_URL"),
            language: self.get("YTMUSIC_LANGUAGE"),
            location: (!location.is_empty()).then_some(location),
            timeout: Duration::from_secs(self.parsed("YTMUSIC_TIMEOUT_SECS", DEFAULT_TIMEOUT_SECS)),
        }
    }

    fn parsed<T: FromStr>(&self, key: &str, fallback: T) -> T {
        let raw = self.get(key);
        match raw.trim().parse() {
            Ok(value) => value,
            Err(_) => {
                warn!("Ignoring unparsable {}={:?}", key, raw);
                fallback
            }
        }
    }
}
