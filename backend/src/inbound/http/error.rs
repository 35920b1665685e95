//! HTTP adapter mapping for domain errors.
//!
//! Purpose: keep the domain error type HTTP-agnostic while allowing Actix
//! handlers to turn domain failures into consistent JSON responses and status
//! codes.

use actix_web::{HttpResponse, ResponseError, http::StatusCode, web};
use tracing::error;

use crate::domain::{Error, ErrorCode};

/// Convenient result alias for HTTP handlers.
pub type ApiResult<T> = Result<T, Error>;

fn status_for(code: ErrorCode) -> StatusCode {
    match code {
        ErrorCode::InvalidRequest => StatusCode::BAD_REQUEST,
        ErrorCode::NotFound => StatusCode::NOT_FOUND,
        ErrorCode::QueryBuildFailed | ErrorCode::ExecutionFailed | ErrorCode::TransactionFailed => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
        ErrorCode::ServiceUnavailable => StatusCode::SERVICE_UNAVAILABLE,
    }
}

/// Replace store-internal messages with fixed text before they leave the
/// process. The code is kept so callers can still react to the kind.
fn redact_if_internal(error: &Error) -> Error {
    let replacement = match error.code() {
        ErrorCode::QueryBuildFailed => "Client query could not be built",
        ErrorCode::ExecutionFailed => "Store operation failed",
        ErrorCode::TransactionFailed => {
            "Transaction outcome unknown; do not assume the change was applied"
        }
        ErrorCode::ServiceUnavailable => "Store temporarily unavailable",
        ErrorCode::InvalidRequest | ErrorCode::NotFound => return error.clone(),
    };
    error!(code = ?error.code(), message = error.message(), "request failed");
    Error::new(error.code(), replacement)
}

impl ResponseError for Error {
    fn status_code(&self) -> StatusCode {
        status_for(self.code())
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(redact_if_internal(self))
    }
}

/// JSON extractor configuration reporting malformed bodies as
/// `invalid_request` payloads instead of Actix's plain-text default.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req| {
        Error::invalid_request(format!("malformed JSON body: {err}")).into()
    })
}
