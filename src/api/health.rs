use axum::{Extension, response::Json};
use serde_json::{Value, json};

use crate::types::CallbackSlot;

pub async fn health(Extension(slot): Extension<CallbackSlot>) -> Json<Value> {
    let callback_received = slot.lock().await.is_some();
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "callback_received": callback_received,
    }))
}
