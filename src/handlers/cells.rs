use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};

use crate::domain::cell::{validate_cell, WorkerCategory};
use crate::error::AppError;
use crate::handlers::shared::ApiResponse;
use crate::services::CatalogStore;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidateCellRequest {
    /// Either the policy name ("restricted"/"unrestricted") or a raw source
    /// category string such as "ASSISTENTE_OPERACIONAL".
    pub category: String,
    #[serde(default)]
    pub codes: Vec<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidatedCell {
    pub codes: Vec<String>,
}

/// Validates one worker-day's proposed shift codes against the current
/// catalog snapshot and returns the canonical ordering.
pub async fn validate(
    store: web::Data<CatalogStore>,
    body: web::Json<ValidateCellRequest>,
) -> Result<HttpResponse, AppError> {
    if body.codes.len() > 3 {
        return Err(AppError::BadRequest(
            "A cell holds at most three shift codes".to_string(),
        ));
    }

    let category = body
        .category
        .parse::<WorkerCategory>()
        .unwrap_or_else(|_| WorkerCategory::from_category_code(&body.category));

    let catalog = store.snapshot();
    let codes = validate_cell(&catalog, category, &body.codes)?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(ValidatedCell { codes })))
}
