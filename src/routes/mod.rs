// Route exports
pub mod gifts;
pub mod share;

use actix_web::{error, http::StatusCode, web, HttpRequest, HttpResponse};
use thiserror::Error;

use crate::models::ErrorResponse;

pub use gifts::AppState;

/// Extractor failure rendered as an [`ErrorResponse`] body
#[derive(Debug, Error)]
#[error("{}: {}", .0.error, .0.message)]
pub struct ApiError(pub ErrorResponse);

impl ApiError {
    pub fn bad_request(error: &str, message: String) -> Self {
        Self(ErrorResponse {
            error: error.to_string(),
            message,
            status_code: 400,
        })
    }
}

impl error::ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        StatusCode::from_u16(self.0.status_code).unwrap_or(StatusCode::BAD_REQUEST)
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(&self.0)
    }
}

/// Malformed JSON bodies become 400s
pub fn handle_json_payload_error(err: error::JsonPayloadError, req: &HttpRequest) -> actix_web::Error {
    tracing::info!("JSON payload error on {}: {}", req.path(), err);
    ApiError::bad_request("invalid_json", format!("Invalid JSON: {}", err)).into()
}

pub fn handle_query_payload_error(err: error::QueryPayloadError, req: &HttpRequest) -> actix_web::Error {
    tracing::info!("Query error on {}: {}", req.path(), err);
    ApiError::bad_request("invalid_query", format!("Invalid query: {}", err)).into()
}

/// Extractor configs shared by the server and handler tests
pub fn configure_extractors(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(handle_json_payload_error))
        .app_data(web::QueryConfig::default().error_handler(handle_query_payload_error));
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(gifts::health_check))
        .service(
            web::scope("/api")
                .configure(gifts::configure)
                .configure(share::configure),
        );
}
