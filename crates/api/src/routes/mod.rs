pub mod dinosaur;
pub mod health;

use axum::Router;

use crate::state::AppState;

/// Build the full route table.
///
/// ```text
/// /                   health (GET)
/// /dino               list (GET), create (POST), update (PUT)
/// /dino/{id}          get (GET), delete (DELETE)
/// ```
pub fn app_routes() -> Router<AppState> {
    Router::new()
        .merge(health::router())
        .merge(dinosaur::router())
}
