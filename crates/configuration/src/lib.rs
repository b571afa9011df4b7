use crate::error::ConfigError;
use std::path::Path;

// Declare the modules that make up this crate.
pub mod error;
pub mod logging;
pub mod settings;

// Re-export the core types to provide a clean public API.
pub use logging::init_tracing;
pub use settings::{
    Config, DashboardSettings, DataSettings, LogLevel, LoggingSettings, ServerSettings,
};

/// Prefix of environment variable overrides, e.g. `TICKERSCOPE__SERVER__PORT=8080`.
pub const ENV_PREFIX: &str = "TICKERSCOPE";

/// Loads the application configuration.
///
/// Sources, lowest precedence first: built-in defaults, the TOML file, then
/// `TICKERSCOPE__*` environment variables. Without an explicit `path` the
/// file is `config.toml` in the working directory and may be absent; an
/// explicit path must exist.
pub fn load_config(path: Option<&Path>) -> Result<Config, ConfigError> {
    let file = match path {
        Some(path) => config::File::from(path).required(true),
        None => config::File::with_name("config.toml").required(false),
    };

    let builder = config::Config::builder()
        .add_source(file)
        .add_source(
            config::Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    // Attempt to deserialize the entire configuration into our `Config` struct
    let config = builder.try_deserialize::<Config>()?;
    config.validate()?;

    tracing::debug!(?config, "Configuration loaded.");
    Ok(config)
}
