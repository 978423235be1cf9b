/// Liveness probes
///
/// Fixed payloads with no store access; used by deployment checks only.

use axum::Json;
use serde_json::{json, Value};

/// `GET /` - fixed status payload
pub async fn root() -> Json<Value> {
    Json(json!({ "status": "OK" }))
}

/// `GET /test` - plain string probe
pub async fn test_probe() -> Json<&'static str> {
    Json("Hello world!")
}
