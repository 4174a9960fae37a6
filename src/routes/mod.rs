pub mod auth;
pub mod health;
pub mod todos;

use actix_web::{error::JsonPayloadError, web, HttpRequest};

use crate::error::{AppError, INVALID_DATA_MESSAGE};

/// Registers every route. Expects `web::Data<AppState>` to be registered on the app.
pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(json_error_handler))
        .service(health::home)
        .service(health::health)
        .service(auth::signup)
        .service(auth::login)
        .service(todos::add_todo)
        .service(todos::mark_complete)
        .service(todos::list_todos);
}

/// Unparseable or incomplete JSON bodies become a plain 400 `{message}`.
fn json_error_handler(err: JsonPayloadError, req: &HttpRequest) -> actix_web::Error {
    log::debug!("invalid JSON body on {}: {}", req.path(), err);
    AppError::Validation(INVALID_DATA_MESSAGE.into()).into()
}
