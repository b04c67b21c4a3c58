//! Backend crate for the flight path web app.
//!
//! Uses actix to serve the backend functionality, importantly taking in an unordered list of
//! flights and working out where the whole trip starts and ends.

pub mod config;
pub mod logging;
pub mod web_app;

use actix_web::{middleware::from_fn, App, HttpServer};
use config::{ConfigError, ServerConfig};
use logging::LoggingError;
use thiserror::Error;

#[derive(Debug, Error)]
enum ServerError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error("Logging setup failed: {0}")]
    Logging(#[from] LoggingError),
    #[error("Server error: {0}")]
    Io(#[from] std::io::Error),
}

#[actix_web::main]
async fn main() -> Result<(), ServerError> {
    let dotenv_loaded = dotenv::dotenv().is_ok();

    let config = ServerConfig::from_env()?;
    logging::init_tracing(config.log_file.as_deref())?;

    if !dotenv_loaded {
        tracing::debug!("No .env file found, using process environment only");
    }

    let server = HttpServer::new(|| {
        App::new()
            .wrap(from_fn(logging::log_request))
            .configure(web_app::configure)
    })
    .bind((config.host.as_str(), config.port))?;

    tracing::info!("Server is running on {}:{}", config.host, config.port);
    server.run().await?;

    Ok(())
}
