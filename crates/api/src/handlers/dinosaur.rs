//! Handlers for the `/dino` resource.
//!
//! Each handler performs exactly one repository call. Failures are not
//! handled here; they propagate as [`AppError`](crate::error::AppError).

use axum::extract::State;
use axum::Json;
use diana_core::dinosaur::{validate_create, validate_update};
use diana_db::models::dinosaur::Dinosaur;
use diana_db::repositories::DinosaurRepo;

use crate::error::AppResult;
use crate::extract::{DinosaurId, JsonBody};
use crate::response::MessageResponse;
use crate::state::AppState;

/// GET /dino
///
/// List every dinosaur.
pub async fn list_dinosaurs(State(state): State<AppState>) -> AppResult<Json<Vec<Dinosaur>>> {
    let dinosaurs = DinosaurRepo::list_all(&state.pool).await?;
    Ok(Json(dinosaurs))
}

/// GET /dino/{id}
///
/// Returns an array with zero or one rows; a missing row is not an error.
pub async fn get_dinosaur(
    State(state): State<AppState>,
    DinosaurId(id): DinosaurId,
) -> AppResult<Json<Vec<Dinosaur>>> {
    let dinosaur = DinosaurRepo::find_by_id(&state.pool, id).await?;
    Ok(Json(dinosaur.into_iter().collect()))
}

/// POST /dino
pub async fn create_dinosaur(
    State(state): State<AppState>,
    JsonBody(payload): JsonBody,
) -> AppResult<Json<MessageResponse>> {
    let input = validate_create(&payload)?;
    let dinosaur = DinosaurRepo::insert(&state.pool, &input).await?;

    tracing::info!(
        dinosaur_id = dinosaur.id,
        name = %dinosaur.name,
        "Dinosaur created",
    );

    Ok(Json(MessageResponse::new("Created")))
}

/// PUT /dino
///
/// Partial update; the target row is named by `id` in the body.
pub async fn update_dinosaur(
    State(state): State<AppState>,
    JsonBody(payload): JsonBody,
) -> AppResult<Json<MessageResponse>> {
    let update = validate_update(&payload)?;
    let rows = DinosaurRepo::update_fields(&state.pool, update.id, &update.changes).await?;

    let columns: Vec<&str> = update.changes.keys().map(|c| c.as_str()).collect();
    tracing::info!(
        dinosaur_id = update.id,
        ?columns,
        rows,
        "Dinosaur updated",
    );

    Ok(Json(MessageResponse::new("Updated")))
}

/// DELETE /dino/{id}
pub async fn delete_dinosaur(
    State(state): State<AppState>,
    DinosaurId(id): DinosaurId,
) -> AppResult<Json<MessageResponse>> {
    let rows = DinosaurRepo::delete_by_id(&state.pool, id).await?;

    tracing::info!(dinosaur_id = id, rows, "Dinosaur deleted");

    Ok(Json(MessageResponse::new("Deleted")))
}
