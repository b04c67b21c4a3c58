//! Tracing setup and the per-request logging middleware.

use actix_web::{
    body::MessageBody,
    dev::{ServiceRequest, ServiceResponse},
    middleware::Next,
};
use std::{
    fs::OpenOptions,
    path::{Path, PathBuf},
    sync::Mutex,
};
use thiserror::Error;
use tracing_subscriber::{
    layer::SubscriberExt,
    util::{SubscriberInitExt, TryInitError},
    EnvFilter,
};

#[derive(Debug, Error)]
pub enum LoggingError {
    #[error("Could not open log file {path:?}: {source}")]
    LogFile {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Tracing subscriber already installed: {0}")]
    AlreadyInstalled(#[from] TryInitError),
}

/// Installs the global subscriber: compact lines on stdout, plus JSON lines appended to
/// `log_file` when one is given. `RUST_LOG` overrides the default `info` filter.
pub fn init_tracing(log_file: Option<&Path>) -> Result<(), LoggingError> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let file_layer = match log_file {
        Some(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .map_err(|source| LoggingError::LogFile {
                    path: path.to_path_buf(),
                    source,
                })?;
            Some(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_ansi(false)
                    .with_writer(Mutex::new(file)),
            )
        }
        None => None,
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_thread_ids(false)
                .compact(),
        )
        .with(file_layer)
        .try_init()?;

    Ok(())
}

/// Logs every incoming request before handing it on.
pub async fn log_request(
    req: ServiceRequest,
    next: Next<impl MessageBody>,
) -> Result<ServiceResponse<impl MessageBody>, actix_web::Error> {
    tracing::info!("Received request: {} {}", req.method(), req.uri());
    next.call(req).await
}

#[cfg(test)]
mod logging_tests {
    use super::{init_tracing, log_request, LoggingError};
    use actix_web::{http::StatusCode, middleware::from_fn, web, App, HttpResponse};

    #[test]
    fn test_unwritable_log_file() {
        // A directory can't be opened for appending
        let dir = std::env::temp_dir();
        let err = init_tracing(Some(dir.as_path())).unwrap_err();
        assert!(matches!(err, LoggingError::LogFile { ref path, .. } if *path == dir));
    }

    #[actix_web::test]
    async fn test_request_passes_through_logger() {
        let app = actix_web::test::init_service(
            App::new()
                .wrap(from_fn(log_request))
                .route("/ping", web::get().to(|| async { HttpResponse::Ok().body("pong") })),
        )
        .await;

        let req = actix_web::test::TestRequest::get().uri("/ping").to_request();
        let resp = actix_web::test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let body = actix_web::test::read_body(resp).await;
        assert_eq!(body, web::Bytes::from_static(b"pong"));
    }
}
