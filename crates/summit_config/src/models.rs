// --- File: crates/summit_config/src/models.rs ---

use serde::{Deserialize, Serialize};

/// Listener port used when neither `PORT` nor `SUMMIT__SERVER__PORT` is set.
pub const DEFAULT_LISTEN_PORT: u16 = 5000;

// --- General Server Config ---
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16, // PORT wins over SUMMIT__SERVER__PORT
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: DEFAULT_LISTEN_PORT,
        }
    }
}

// --- Database Settings ---
// Connection credentials never live here; they are resolved from the
// environment by `ConnectionResolver`. These are pool and startup knobs only.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct DatabaseSettings {
    pub max_connections: u32,
    pub acquire_timeout_secs: u64,
    pub idle_timeout_secs: u64,
    /// Attempts made by the startup warm-up before giving up.
    pub connect_attempts: u32,
    pub retry_delay_secs: u64,
    /// Use loopback development credentials when nothing else is configured.
    pub allow_local_fallback: bool,
    /// Database name used by the local fallback.
    pub local_database: String,
}

impl Default for DatabaseSettings {
    fn default() -> Self {
        Self {
            max_connections: 5,
            acquire_timeout_secs: 3,
            idle_timeout_secs: 600,
            connect_attempts: 3,
            retry_delay_secs: 2,
            allow_local_fallback: false,
            local_database: "casa_bengala".to_string(),
        }
    }
}

// --- Admin Config ---
// Enables the registration listing backing the event's admin page.
#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq, Eq)]
pub struct AdminConfig {
    pub access_key: Option<String>, // Loaded via SUMMIT__ADMIN__ACCESS_KEY or ADMIN_KEY
}

// --- Unified App Configuration ---
#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq, Eq)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub database: DatabaseSettings,
    #[serde(default)]
    pub admin: Option<AdminConfig>,
}

impl AppConfig {
    /// The configured admin access key, if any non-empty one is set.
    pub fn admin_access_key(&self) -> Option<&str> {
        self.admin
            .as_ref()
            .and_then(|admin| admin.access_key.as_deref())
            .filter(|key| !key.is_empty())
    }
}
