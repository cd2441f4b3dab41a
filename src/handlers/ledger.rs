use actix_web::{web, HttpResponse};
use serde::Deserialize;

use crate::domain::ledger::{compute_stats, AssignmentEntry, MonthAdjustment};
use crate::error::AppError;
use crate::handlers::shared::ApiResponse;
use crate::services::CatalogStore;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComputeStatsRequest {
    pub worker_id: i64,
    #[serde(default)]
    pub assignments: Vec<AssignmentEntry>,
    pub adjustment: Option<MonthAdjustment>,
    #[serde(default)]
    pub previous_bank_minutes: i64,
    pub target_minutes_base: i64,
}

/// Recomputes the month's hour ledger for one worker. Total recomputation
/// on every call; there is no cached state to diverge from.
pub async fn stats(
    store: web::Data<CatalogStore>,
    body: web::Json<ComputeStatsRequest>,
) -> Result<HttpResponse, AppError> {
    let catalog = store.snapshot();
    let entry = compute_stats(
        body.worker_id,
        &body.assignments,
        body.adjustment.as_ref(),
        body.previous_bank_minutes,
        body.target_minutes_base,
        &catalog,
    )?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(entry)))
}
