use core_config::{AppInfo, ConfigError, FromEnv, app_info, env_or_default, server::ServerConfig};
use database::postgres::PostgresConfig;
use domain_catalog::ValidationLimits;

// Re-export Environment for use in other modules
pub use core_config::Environment;

/// Application-specific configuration
/// Composes shared config components from the `core_config` library
#[derive(Clone, Debug)]
pub struct Config {
    pub app: AppInfo,
    pub database: PostgresConfig,
    pub server: ServerConfig,
    pub environment: Environment,
    pub limits: ValidationLimits,
}

impl Config {
    pub fn from_env() -> eyre::Result<Self> {
        let environment = Environment::from_env();
        let database = PostgresConfig::from_env()?; // Required - will fail if not set
        let server = ServerConfig::from_env()?; // Uses defaults: HOST=0.0.0.0, PORT=8080

        // The description bound differs between snapshots of the original
        // system; it stays a knob until product confirms one value.
        let descricao_max = env_or_default("DESCRICAO_MAX_LEN", "300")
            .parse()
            .map_err(|e| ConfigError::ParseError {
                key: "DESCRICAO_MAX_LEN".to_string(),
                details: format!("{}", e),
            })?;

        Ok(Self {
            app: app_info!(),
            database,
            server,
            environment,
            limits: ValidationLimits { descricao_max },
        })
    }
}
