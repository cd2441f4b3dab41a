use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};

use crate::domain::constraint::{self, ConstraintCode};
use crate::error::AppError;
use crate::handlers::shared::ApiResponse;

/// Inputs the coordinator grid treats as "clear this cell" rather than as a
/// constraint to parse.
const CLEAR_TOKENS: [&str; 3] = ["LIVRE", "CLEAR", "REMOVER"];

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParseConstraintRequest {
    pub text: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ParsedConstraint {
    /// Canonical code, or null when the cell carries no constraint.
    pub code: Option<ConstraintCode>,
    pub shorthand: Option<String>,
    pub label: Option<String>,
    /// True when the input was an explicit clear token.
    pub cleared: bool,
}

impl ParsedConstraint {
    fn empty(cleared: bool) -> Self {
        Self {
            code: None,
            shorthand: None,
            label: None,
            cleared,
        }
    }
}

impl From<ConstraintCode> for ParsedConstraint {
    fn from(code: ConstraintCode) -> Self {
        Self {
            shorthand: Some(code.to_shorthand()),
            label: Some(code.label()),
            code: Some(code),
            cleared: false,
        }
    }
}

/// Normalizes coordinator free text into a canonical constraint code.
/// A failed parse is a field-level 400; the caller just flags the input.
pub async fn parse_constraint(
    body: web::Json<ParseConstraintRequest>,
) -> Result<HttpResponse, AppError> {
    let trimmed = body.text.trim().to_uppercase();
    if CLEAR_TOKENS.contains(&trimmed.as_str()) {
        return Ok(HttpResponse::Ok().json(ApiResponse::success(ParsedConstraint::empty(true))));
    }

    let parsed = match constraint::parse(&body.text)? {
        Some(code) => ParsedConstraint::from(code),
        None => ParsedConstraint::empty(false),
    };
    Ok(HttpResponse::Ok().json(ApiResponse::success(parsed)))
}
