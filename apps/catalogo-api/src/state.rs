use sea_orm::DatabaseConnection;

use crate::config::Config;

/// Shared application state: the loaded configuration and the database
/// connection pool. Everything else is per-request.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub db: DatabaseConnection,
}
