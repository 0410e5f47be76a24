use actix_web::{get, web, HttpResponse, Responder};
use chrono::Utc;
use serde_json::json;

use crate::app::StoreInfo;

/// Health check endpoint
///
/// Reports liveness, the active store backend, and the server time.
#[get("/health")]
pub async fn health(store: web::Data<StoreInfo>) -> impl Responder {
    HttpResponse::Ok().json(json!({
        "status": "ok",
        "store": store.backend,
        "timestamp": Utc::now()
    }))
}
