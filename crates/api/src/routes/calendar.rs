use axum::{routing::post, Router};
use std::sync::Arc;

use crate::{handlers, ApiState};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route("/api/calendar/month", post(handlers::calendar::month))
        .route("/api/calendar/week", post(handlers::calendar::week))
        .route("/api/calendar/grid", post(handlers::calendar::grid))
}
