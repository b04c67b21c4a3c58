//! Main web app module containing the web routes for computing flight paths.

use actix_web::{error::JsonPayloadError, http::StatusCode, post, web, HttpResponse, ResponseError};
use flight_path_shared::itinerary::{resolve, Itinerary, PathError, Segment};
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const INVALID_INPUT_MESSAGE: &str = "Invalid input: The request body must contain a \"flights\" array of arrays, where each sub-array represents a flight with a source and destination airport code. Example: { \"flights\": [[\"SFO\", \"EWR\"], [\"ATL\", \"EWR\"]] }";

/// Flight codes must be JSON strings, so `[[1, 2]]` is rejected as invalid input rather than
/// resolved.
#[derive(Deserialize)]
pub struct PathQuery {
    flights: Vec<Vec<String>>,
}

#[derive(Serialize)]
pub struct PathResponse {
    path: Itinerary,
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
}

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{}", INVALID_INPUT_MESSAGE)]
    InvalidInput,
    #[error(transparent)]
    Path(#[from] PathError),
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::InvalidInput => StatusCode::BAD_REQUEST,
            ApiError::Path(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(ErrorResponse {
            error: self.to_string(),
        })
    }
}

impl PathQuery {
    /// Every flight has to be exactly a [source, destination] pair of non-empty codes.
    fn into_segments(self) -> Result<Vec<Segment>, ApiError> {
        self.flights
            .into_iter()
            .map(|flight| {
                let pair: [String; 2] = flight.try_into().map_err(|_| ApiError::InvalidInput)?;
                if pair.iter().any(String::is_empty) {
                    return Err(ApiError::InvalidInput);
                }
                Ok(Segment::from(pair))
            })
            .collect()
    }
}

/// Body extraction failures (bad JSON, missing `flights`, wrong content type) get the same
/// 400 response as shape errors. Oversized bodies keep their 413.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req| match err {
        JsonPayloadError::Overflow { .. } | JsonPayloadError::OverflowKnownLength { .. } => {
            tracing::warn!(error = %err, "Rejecting oversized request body");
            err.into()
        }
        _ => {
            tracing::warn!(error = %err, "Rejecting malformed request body");
            ApiError::InvalidInput.into()
        }
    })
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(json_config()).service(calculate);
}

/// Endpoint for reconstructing the start and end of a trip from its flights
#[post("/calculate")]
pub async fn calculate(json: web::Json<PathQuery>) -> Result<HttpResponse, ApiError> {
    let segments = json.into_inner().into_segments().inspect_err(|_| {
        tracing::warn!("Rejecting flights that are not source/destination pairs");
    })?;

    let path = resolve(&segments).inspect_err(|err| {
        tracing::error!(error = %err, num_flights = segments.len(), "Flight path calculation failed");
    })?;

    tracing::debug!(%path, num_flights = segments.len(), "Flight path calculated");
    Ok(HttpResponse::Ok().json(PathResponse { path }))
}
