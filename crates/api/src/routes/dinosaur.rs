use axum::routing::get;
use axum::Router;

use crate::handlers::dinosaur;
use crate::state::AppState;

/// Routes for the `/dino` resource.
///
/// ```text
/// GET    /dino         list_dinosaurs
/// POST   /dino         create_dinosaur
/// PUT    /dino         update_dinosaur
/// GET    /dino/{id}    get_dinosaur
/// DELETE /dino/{id}    delete_dinosaur
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/dino",
            get(dinosaur::list_dinosaurs)
                .post(dinosaur::create_dinosaur)
                .put(dinosaur::update_dinosaur),
        )
        .route(
            "/dino/{id}",
            get(dinosaur::get_dinosaur).delete(dinosaur::delete_dinosaur),
        )
}
