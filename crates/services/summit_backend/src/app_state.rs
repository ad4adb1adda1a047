// --- File: crates/services/summit_backend/src/app_state.rs ---
use std::sync::Arc;
use summit_config::{AppConfig, ConnectionResolver};
use summit_db::LazyDbClient;
use summit_registration::{RegistrationState, SqlRegistrationStore};

/// Application state that is shared across all routes.
///
/// Built once at startup. The database client inside connects on first
/// use, so building the state never blocks on the database.
#[derive(Clone)]
pub struct AppState {
    /// The application configuration loaded at startup.
    pub config: Arc<AppConfig>,

    /// The shared, lazily connected database client.
    pub db: Arc<LazyDbClient>,

    /// State of the registration endpoints.
    pub registrations: Arc<RegistrationState>,
}

impl AppState {
    /// Create the state around an existing database client.
    pub fn new(config: Arc<AppConfig>, db: Arc<LazyDbClient>) -> Self {
        let store = SqlRegistrationStore::new(Arc::clone(&db));
        let registrations = Arc::new(RegistrationState::new(store, config.admin_access_key()));
        Self {
            config,
            db,
            registrations,
        }
    }

    /// Create the state with a database client that resolves its target from
    /// the process environment.
    pub fn from_env(config: Arc<AppConfig>) -> Self {
        let settings = config.database.clone();
        let resolver = ConnectionResolver::from_env(&settings);
        let db = Arc::new(LazyDbClient::new(resolver, settings));
        Self::new(config, db)
    }

    /// The store behind the registration endpoints.
    pub fn registration_store(&self) -> &SqlRegistrationStore {
        self.registrations.service.store()
    }
}
