use std::sync::Arc;

use axum::{extract::Path, Extension, Json};
use serde_json::{json, Value as JsonValue};

use crate::clients::GameArchive;
use crate::error::AppError;
use crate::state::AppState;

/// GET /api/users/{username}/exists
pub async fn user_exists(
    Extension(state): Extension<Arc<AppState>>,
    Path(username): Path<String>,
) -> Result<Json<JsonValue>, AppError> {
    let exists = state
        .archive
        .player_exists(&username)
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?;
    Ok(Json(json!({ "exists": exists })))
}
