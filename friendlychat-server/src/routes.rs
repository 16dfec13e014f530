use axum::{routing::get, Extension, Router};
use std::sync::Arc;

use crate::controllers;
use crate::{health_with_pool, AppState};

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(|Extension(state): Extension<Arc<AppState>>| async move {
            health_with_pool(&state.pool).await
        }))
        .route(
            "/api/messages",
            get(controllers::list_messages).post(controllers::push_message),
        )
        .route(
            "/api/messages/:id",
            get(controllers::get_message).put(controllers::set_message),
        )
        .route("/ws", get(controllers::ws_handler))
        .layer(Extension(state))
}
