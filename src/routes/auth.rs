use crate::{
    auth::{
        hash_password_blocking, verify_password_blocking, AuthResponse, LoginRequest,
        SignupRequest,
    },
    error::AppError,
    models::NewUser,
    state::AppState,
    store::USERNAME_TAKEN_MESSAGE,
};
use actix_web::{post, web, HttpResponse, Responder};
use validator::Validate;

/// Register a new user
///
/// Creates a new user account and returns an authentication token.
///
/// ## Responses:
/// - `201 Created`: `{message, token}`.
/// - `400 Bad Request`: Invalid payload or username already taken.
/// - `500 Internal Server Error`: Storage or hashing failure.
#[post("/signup")]
pub async fn signup(
    state: web::Data<AppState>,
    signup_data: web::Json<SignupRequest>,
) -> Result<impl Responder, AppError> {
    signup_data.validate()?;
    let SignupRequest {
        username,
        password,
        firstname,
        lastname,
    } = signup_data.into_inner();

    if state.store.find_user_by_username(&username).await?.is_some() {
        return Err(AppError::Conflict(USERNAME_TAKEN_MESSAGE.into()));
    }

    let password_hash = hash_password_blocking(password, state.bcrypt_cost).await?;

    let user = state
        .store
        .create_user(NewUser {
            username,
            password_hash,
            firstname,
            lastname,
        })
        .await?;

    let token = state.keys.generate_token(&user)?;
    log::info!("registered user {} ({})", user.username, user.id);

    Ok(HttpResponse::Created().json(AuthResponse {
        message: "User registered successfully".into(),
        token,
    }))
}

/// Login user
///
/// Authenticates a user and returns a fresh authentication token. Does not
/// require an existing token.
///
/// ## Responses:
/// - `200 OK`: `{message, token}`.
/// - `400 Bad Request`: Unknown username or wrong password, with the same message.
/// - `500 Internal Server Error`: Storage failure.
#[post("/login")]
pub async fn login(
    state: web::Data<AppState>,
    login_data: web::Json<LoginRequest>,
) -> Result<impl Responder, AppError> {
    let LoginRequest { username, password } = login_data.into_inner();

    let user = state
        .store
        .find_user_by_username(&username)
        .await?
        .ok_or(AppError::InvalidCredentials)?;

    if !verify_password_blocking(password, user.password_hash.clone()).await? {
        return Err(AppError::InvalidCredentials);
    }

    let token = state.keys.generate_token(&user)?;
    log::info!("user {} logged in", user.username);

    Ok(HttpResponse::Ok().json(AuthResponse {
        message: "Login successful".into(),
        token,
    }))
}
