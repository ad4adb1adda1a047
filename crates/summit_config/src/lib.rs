//! Configuration for the Summit registration service.
//!
//! Layered settings (`config/default.*`, `config/{RUN_ENV}.*`, then
//! `SUMMIT__*` environment variables) are loaded once at startup into an
//! [`AppConfig`]. Database credentials are not part of it: they come from the
//! environment through [`ConnectionResolver`], which understands the several
//! variable spellings used by the deployments of this service.

use config::{Config, ConfigError, Environment, File};
use once_cell::sync::OnceCell;
use std::env;

pub mod database;
pub mod env_vars;
pub mod models;

pub use database::{
    ConnectionParams, ConnectionResolver, ConnectionSource, DatabaseTarget, ResolveError,
    ResolvedConnection,
};
pub use env_vars::EnvLookup;
pub use models::*;

use env_vars::{process_env, ADMIN_KEY_VAR, CONFIG_SEPARATOR, ENV_PREFIX, LISTEN_PORT_VAR};

/// Load the application configuration.
///
/// Reads the optional `config/default` and `config/{RUN_ENV}` files (any
/// format the `config` crate understands; the directory can be moved with
/// `SUMMIT_CONFIG_DIR`), then `SUMMIT__SECTION__KEY` variables, then the
/// platform-level `PORT` and `ADMIN_KEY` variables.
pub fn load_config() -> Result<AppConfig, ConfigError> {
    ensure_dotenv_loaded();

    let run_env = env::var("RUN_ENV").unwrap_or_else(|_| "debug".to_string());
    let config_dir = env::var("SUMMIT_CONFIG_DIR").unwrap_or_else(|_| "config".to_string());

    let builder = Config::builder()
        .add_source(File::with_name(&format!("{config_dir}/default")).required(false))
        .add_source(File::with_name(&format!("{config_dir}/{run_env}")).required(false))
        .add_source(
            Environment::with_prefix(ENV_PREFIX)
                .prefix_separator(CONFIG_SEPARATOR)
                .separator(CONFIG_SEPARATOR)
                .try_parsing(true),
        );

    let config: AppConfig = builder.build()?.try_deserialize()?;
    apply_env_overrides(config, &process_env())
}

/// Apply the unprefixed platform variables on top of a loaded configuration.
///
/// `PORT` replaces the listener port; `ADMIN_KEY` provides the listing key
/// when none was configured through the layered sources.
pub fn apply_env_overrides(
    mut config: AppConfig,
    lookup: &EnvLookup,
) -> Result<AppConfig, ConfigError> {
    if let Some(port) = lookup(LISTEN_PORT_VAR).filter(|p| !p.trim().is_empty()) {
        config.server.port = port.trim().parse().map_err(|err| {
            ConfigError::Message(format!("invalid {LISTEN_PORT_VAR} value {port:?}: {err}"))
        })?;
    }

    if config.admin_access_key().is_none() {
        if let Some(key) = lookup(ADMIN_KEY_VAR).filter(|k| !k.is_empty()) {
            config.admin = Some(AdminConfig {
                access_key: Some(key),
            });
        }
    }

    Ok(config)
}

static INIT_DOTENV: OnceCell<()> = OnceCell::new();

/// Ensures that the dotenv file is loaded into the environment variables.
///
/// The file is `.env` unless `DOTENV_OVERRIDE` names another one. Loading
/// happens at most once per process; a missing file is not an error.
///
/// # Return
///
/// The path of the dotenv file that was (or would have been) loaded.
pub fn ensure_dotenv_loaded() -> String {
    let dotenv_path = env::var("DOTENV_OVERRIDE").unwrap_or_else(|_| ".env".to_string());

    INIT_DOTENV.get_or_init(|| {
        dotenv::from_filename(&dotenv_path).ok();
    });

    dotenv_path
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Arc;

    fn lookup_from(pairs: &[(&str, &str)]) -> EnvLookup {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Arc::new(move |name: &str| map.get(name).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.server.port, DEFAULT_LISTEN_PORT);
        assert_eq!(config.database.max_connections, 5);
        assert_eq!(config.database.acquire_timeout_secs, 3);
        assert_eq!(config.database.connect_attempts, 3);
        assert_eq!(config.database.retry_delay_secs, 2);
        assert!(!config.database.allow_local_fallback);
        assert!(config.admin_access_key().is_none());
    }

    #[test]
    fn test_port_override() {
        let config =
            apply_env_overrides(AppConfig::default(), &lookup_from(&[("PORT", "8080")])).unwrap();
        assert_eq!(config.server.port, 8080);
    }

    #[test]
    fn test_invalid_port_override_is_rejected() {
        let result = apply_env_overrides(AppConfig::default(), &lookup_from(&[("PORT", "http")]));
        assert!(result.is_err());
    }

    #[test]
    fn test_admin_key_fills_missing_admin_section() {
        let config =
            apply_env_overrides(AppConfig::default(), &lookup_from(&[("ADMIN_KEY", "bengala")]))
                .unwrap();
        assert_eq!(config.admin_access_key(), Some("bengala"));
    }

    #[test]
    fn test_configured_admin_key_wins_over_env() {
        let config = AppConfig {
            admin: Some(AdminConfig {
                access_key: Some("from-file".to_string()),
            }),
            ..AppConfig::default()
        };
        let config =
            apply_env_overrides(config, &lookup_from(&[("ADMIN_KEY", "from-env")])).unwrap();
        assert_eq!(config.admin_access_key(), Some("from-file"));
    }

    #[test]
    fn test_partial_sections_deserialize_with_defaults() {
        let config: AppConfig = Config::builder()
            .set_override("server.port", 9000)
            .unwrap()
            .set_override("database.allow_local_fallback", true)
            .unwrap()
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();

        assert_eq!(config.server.port, 9000);
        assert_eq!(config.server.host, "0.0.0.0");
        assert!(config.database.allow_local_fallback);
        assert_eq!(config.database.max_connections, 5);
    }
}
