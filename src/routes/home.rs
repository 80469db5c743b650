use axum::Json;
use serde_json::{json, Value};

pub async fn welcome() -> Json<Value> {
    Json(json!({ "message": "Welcome to Breachless API" }))
}

pub async fn health_check() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}
