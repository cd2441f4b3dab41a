use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use thiserror::Error;

use crate::domain::catalog::CatalogError;
use crate::domain::cell::CellValidationError;
use crate::domain::constraint::ParseFailure;
use crate::domain::ledger::LedgerError;
use crate::handlers::shared::ApiResponse;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("{0}")]
    Parse(#[from] ParseFailure),

    #[error("{0}")]
    Validation(#[from] CellValidationError),

    #[error("{0}")]
    Catalog(#[from] CatalogError),

    #[error("{0}")]
    Ledger(#[from] LedgerError),

    #[error("Internal server error{}", .0.as_ref().map_or("".to_string(), |s| format!(": {}", s)))]
    InternalServerError(Option<String>),
}

impl AppError {
    /// Stable machine-readable kind, so callers can branch without parsing
    /// messages.
    pub fn kind(&self) -> &'static str {
        match self {
            AppError::BadRequest(_) => "BAD_REQUEST",
            AppError::Parse(_) => "PARSE_FAILURE",
            AppError::Validation(err) => err.kind(),
            AppError::Catalog(_) => "INVALID_CATALOG",
            AppError::Ledger(_) => "LEDGER_INCONSISTENCY",
            AppError::InternalServerError(_) => "INTERNAL_SERVER_ERROR",
        }
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::BadRequest(_)
            | AppError::Parse(_)
            | AppError::Validation(_)
            | AppError::Catalog(_) => StatusCode::BAD_REQUEST,
            // Inconsistent ledger input is a caller bug, not a user mistake.
            AppError::Ledger(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::InternalServerError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status_code = self.status_code();
        let error_message = self.to_string();

        if status_code.is_server_error() {
            log::error!(
                "Request failed with status {}: {}",
                status_code,
                error_message
            );
        } else {
            log::debug!("Rejected request ({}): {}", self.kind(), error_message);
        }

        let response_body = ApiResponse::error_with_data(
            serde_json::json!({ "kind": self.kind() }),
            &error_message,
        );

        HttpResponse::build(status_code).json(response_body)
    }
}
