use std::sync::Arc;

use axum::{extract::Query, Extension, Json};
use serde_json::{json, Value as JsonValue};
use validator::Validate;

use crate::error::AppError;
use crate::report::{self, MonthRequest, ReportOutcome, NO_GAMES_MESSAGE};
use crate::state::AppState;

/// GET /api/month?username=..&month=..&year=..&blunders=..
pub async fn get_month(
    Extension(state): Extension<Arc<AppState>>,
    Query(req): Query<MonthRequest>,
) -> Result<Json<JsonValue>, AppError> {
    req.validate()?;

    match report::build_month_report(&state.archive, state.evaluator.as_ref(), &req).await {
        ReportOutcome::PlayerNotFound => Err(AppError::NotFound("user doesn't exist".to_string())),
        ReportOutcome::NoResults => Ok(Json(json!({
            "noResults": true,
            "detail": NO_GAMES_MESSAGE,
        }))),
        ReportOutcome::Report(month) => Ok(Json(
            serde_json::to_value(*month).map_err(anyhow::Error::from)?,
        )),
    }
}
