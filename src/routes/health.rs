use actix_web::{get, HttpResponse, Responder};
use chrono::Utc;
use serde_json::json;

#[get("/")]
pub async fn home() -> impl Responder {
    HttpResponse::Ok().body("This is the Home Page")
}

/// Health check endpoint
///
/// Returns the current status of the API and timestamp.
#[get("/health")]
pub async fn health() -> impl Responder {
    HttpResponse::Ok().json(json!({
        "status": "ok",
        "timestamp": Utc::now()
    }))
}
