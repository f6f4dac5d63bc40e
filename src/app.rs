use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use crate::infrastructure::bootstrap;
use crate::infrastructure::config::ServiceConfig;
use crate::interfaces::http::start_server;

/// `RUST_LOG` wins over the configured filter
pub fn init_tracing(default_filter: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}

pub async fn run() -> std::io::Result<()> {
    dotenvy::dotenv().ok();

    let config = match ServiceConfig::load() {
        Ok(config) => config,
        Err(err) => {
            init_tracing(&ServiceConfig::default().log_filter);
            error!(error = %err, "Invalid configuration");
            return Err(std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                err.to_string(),
            ));
        }
    };
    init_tracing(&config.log_filter);

    let table = bootstrap::setup(&config);
    let server = start_server(table, &config)?;

    info!(
        "Tag statistics API listening on http://{}:{}",
        config.host, config.port
    );

    server.await
}
