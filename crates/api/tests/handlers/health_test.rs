use clinicslots_api::routes::health::{HealthResponse, VersionResponse};

use crate::test_utils::test_server;

#[tokio::test]
async fn test_health_check() {
    let server = test_server();

    let response = server.get("/health").await;

    response.assert_status_ok();
    assert_eq!(response.json::<HealthResponse>().status, "ok");
}

#[tokio::test]
async fn test_version() {
    let server = test_server();

    let response = server.get("/version").await;

    response.assert_status_ok();
    let body = response.json::<VersionResponse>();
    assert_eq!(body.service, "clinicslots-api");
    assert!(!body.version.is_empty());
}
