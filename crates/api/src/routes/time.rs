use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;

use crate::{handlers, ApiState};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route("/api/time/12h", get(handlers::time::twelve_hour))
        .route("/api/time/24h", post(handlers::time::twenty_four_hour))
}
