use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};

use crate::domain::catalog::ShiftDefinition;
use crate::error::AppError;
use crate::handlers::shared::ApiResponse;
use crate::services::CatalogStore;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogResponse {
    pub shifts: Vec<ShiftDefinition>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReplaceCatalogRequest {
    pub shifts: Vec<ShiftDefinition>,
}

/// Returns the current catalog snapshot, sorted by service then code.
pub async fn get_catalog(store: web::Data<CatalogStore>) -> Result<HttpResponse, AppError> {
    let catalog = store.snapshot();
    Ok(HttpResponse::Ok().json(ApiResponse::success(CatalogResponse {
        shifts: catalog.definitions(),
    })))
}

/// Replaces the catalog wholesale. Validation passes already in flight keep
/// the snapshot they fetched.
pub async fn replace_catalog(
    store: web::Data<CatalogStore>,
    body: web::Json<ReplaceCatalogRequest>,
) -> Result<HttpResponse, AppError> {
    let count = body.shifts.len();
    store.replace(body.into_inner().shifts)?;
    log::info!("Catalog replaced ({} shift definitions)", count);
    Ok(HttpResponse::Ok().json(ApiResponse::<()>::success_with_message(
        None,
        &format!("Catalog replaced with {} shift definitions", count),
    )))
}
