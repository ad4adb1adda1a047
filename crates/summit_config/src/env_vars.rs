//! Environment variable handling for the Summit registration service.
//!
//! This module names every environment variable the service reads and the
//! aliases accepted for each database setting. Deployments over time used
//! `DB_*`, Railway's `MYSQL*` and the docker-style `MYSQL_*` spellings; the
//! tables below list them in precedence order, first present wins.

use std::sync::Arc;

/// The prefix for layered configuration environment variables
pub const ENV_PREFIX: &str = "SUMMIT";

/// The separator for layered configuration environment variables
pub const CONFIG_SEPARATOR: &str = "__";

/// Listener port, set by most hosting platforms
pub const LISTEN_PORT_VAR: &str = "PORT";

/// Shared key for the registration listing
pub const ADMIN_KEY_VAR: &str = "ADMIN_KEY";

/// Single connection URL variables
pub const URL_VARS: &[&str] = &["DATABASE_URL", "MYSQL_URL", "MYSQL_PUBLIC_URL"];

/// Discrete host variables
pub const HOST_VARS: &[&str] = &["DB_HOST", "MYSQLHOST", "MYSQL_HOST"];

/// Discrete user variables
pub const USER_VARS: &[&str] = &["DB_USER", "MYSQLUSER", "MYSQL_USER"];

/// Discrete password variables
pub const PASSWORD_VARS: &[&str] = &[
    "DB_PASSWORD",
    "MYSQLPASSWORD",
    "MYSQL_PASSWORD",
    "MYSQL_ROOT_PASSWORD",
];

/// Discrete database name variables
pub const DATABASE_VARS: &[&str] = &["DB_NAME", "MYSQLDATABASE", "MYSQL_DATABASE"];

/// Discrete port variables
pub const PORT_VARS: &[&str] = &["DB_PORT", "MYSQLPORT", "MYSQL_PORT"];

/// A source of environment values.
///
/// Production code reads the process environment; tests hand in a map so
/// they never mutate global state.
pub type EnvLookup = Arc<dyn Fn(&str) -> Option<String> + Send + Sync>;

/// Lookup backed by the process environment.
pub fn process_env() -> EnvLookup {
    Arc::new(|name: &str| std::env::var(name).ok())
}

/// Convert a configuration path to an environment variable name
///
/// # Arguments
///
/// * `path` - The configuration path (e.g., "server.port")
///
/// # Returns
///
/// The environment variable name (e.g., "SUMMIT__SERVER__PORT")
pub fn config_path_to_env_var(path: &str) -> String {
    let path = path.replace('.', CONFIG_SEPARATOR);
    format!("{}{}{}", ENV_PREFIX, CONFIG_SEPARATOR, path).to_uppercase()
}

/// Return the first alias with a non-empty value, together with its name.
///
/// Blank values are treated as unset; several hosting dashboards create
/// variables with empty values when a reference fails to resolve.
pub fn first_present(lookup: &EnvLookup, names: &[&'static str]) -> Option<(&'static str, String)> {
    names.iter().find_map(|name| {
        lookup(name)
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())
            .map(|value| (*name, value))
    })
}

/// Check if a variable holds a secret and must never be logged verbatim.
///
/// Names containing "password", "secret", "key" or "token" are secret, as are
/// connection URLs since they embed credentials.
pub fn is_secret_var(name: &str) -> bool {
    let name_lower = name.to_lowercase();
    name_lower.contains("password")
        || name_lower.contains("secret")
        || name_lower.contains("key")
        || name_lower.contains("token")
        || URL_VARS.contains(&name)
}
