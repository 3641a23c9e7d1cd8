use axum::{routing::post, Router};
use std::sync::Arc;

use crate::{handlers, ApiState};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route("/api/slots/preview", post(handlers::slots::preview_slots))
        .route("/api/slots/count", post(handlers::slots::count_slots))
        .route("/api/slots/expand", post(handlers::slots::expand_slots))
}
