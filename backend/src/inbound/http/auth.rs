//! Account API handlers.
//!
//! ```text
//! POST /api/v1/auth/signup {"email":"jo@example.com","password":"pw","firstName":"Jo"}
//! POST /api/v1/auth/login  {"email":"jo@example.com","password":"pw"}
//! POST /api/v1/auth/logout
//! GET  /api/v1/me
//! ```

use actix_web::{HttpResponse, get, post, web};
use serde::{Deserialize, Serialize};
use serde_json::json;
use utoipa::ToSchema;

use crate::domain::{CredentialValidationError, Error, LoginCredentials, SignupDetails};
use crate::inbound::http::ApiResult;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;

/// Signup request body for `POST /api/v1/auth/signup`.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SignupRequest {
    pub email: String,
    pub password: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

/// Login request body for `POST /api/v1/auth/login`.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Current-user payload for the dashboard greeting.
///
/// The profile fields are `None` when signup's best-effort profile insert
/// never succeeded; that is a normal state, not an error.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MeResponse {
    pub user_id: String,
    pub email: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

fn map_credential_error(err: &CredentialValidationError) -> Error {
    match err {
        CredentialValidationError::EmptyEmail => Error::validation_failed(
            "email must not be empty",
        )
        .with_details(json!({ "field": "email", "code": "missing_field" })),
        CredentialValidationError::EmptyPassword => Error::validation_failed(
            "password must not be empty",
        )
        .with_details(json!({ "field": "password", "code": "missing_field" })),
    }
}

/// Create an account and establish a session.
///
/// Profile creation is best-effort; a signup whose profile row failed still
/// returns success and logs in the new account.
#[utoipa::path(
    post,
    path = "/api/v1/auth/signup",
    request_body = SignupRequest,
    responses(
        (status = 200, description = "Account created and session established",
            headers(("Set-Cookie" = String, description = "Session cookie"))),
        (status = 400, description = "Invalid request", body = Error),
        (status = 502, description = "Identity provider rejected the signup", body = Error)
    ),
    tags = ["auth"],
    operation_id = "signup",
    security([])
)]
#[post("/auth/signup")]
pub async fn signup(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<SignupRequest>,
) -> ApiResult<HttpResponse> {
    let body = payload.into_inner();
    let details = SignupDetails::try_from_parts(
        &body.email,
        &body.password,
        body.first_name.as_deref(),
        body.last_name.as_deref(),
    )
    .map_err(|err| map_credential_error(&err))?;

    let user_id = state.accounts.signup(&details).await?;
    session.persist_user(&user_id)?;
    Ok(HttpResponse::Ok().finish())
}

/// Authenticate and establish a session.
#[utoipa::path(
    post,
    path = "/api/v1/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login success",
            headers(("Set-Cookie" = String, description = "Session cookie"))),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Invalid credentials", body = Error)
    ),
    tags = ["auth"],
    operation_id = "login",
    security([])
)]
#[post("/auth/login")]
pub async fn login(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<LoginRequest>,
) -> ApiResult<HttpResponse> {
    let body = payload.into_inner();
    let credentials = LoginCredentials::try_from_parts(&body.email, &body.password)
        .map_err(|err| map_credential_error(&err))?;

    let user_id = state.accounts.login(&credentials).await?;
    session.persist_user(&user_id)?;
    Ok(HttpResponse::Ok().finish())
}

/// End the current session. Always succeeds, logged in or not.
#[utoipa::path(
    post,
    path = "/api/v1/auth/logout",
    responses((status = 200, description = "Session cleared")),
    tags = ["auth"],
    operation_id = "logout",
    security([])
)]
#[post("/auth/logout")]
pub async fn logout(session: SessionContext) -> HttpResponse {
    session.clear();
    HttpResponse::Ok().finish()
}

/// The authenticated caller's identity and profile metadata.
#[utoipa::path(
    get,
    path = "/api/v1/me",
    responses(
        (status = 200, description = "Current user", body = MeResponse),
        (status = 401, description = "Unauthorised", body = Error)
    ),
    tags = ["auth"],
    operation_id = "currentUser",
    security(("SessionCookie" = []))
)]
#[get("/me")]
pub async fn current_user(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<MeResponse>> {
    let user_id = session.require_user_id()?;
    let profile = state.profiles.profile(&user_id).await?;

    let response = match profile {
        Some(profile) => MeResponse {
            user_id: user_id.to_string(),
            email: Some(profile.email),
            first_name: profile.first_name,
            last_name: profile.last_name,
        },
        None => MeResponse {
            user_id: user_id.to_string(),
            email: None,
            first_name: None,
            last_name: None,
        },
    };
    Ok(web::Json(response))
}

#[cfg(test)]
#[path = "auth_tests.rs"]
mod tests;
