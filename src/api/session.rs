//! Session endpoints: token issuance and logout

use axum::{extract::State, Json};
use axum_extra::extract::{
    cookie::{Cookie, SameSite},
    CookieJar,
};
use serde::Serialize;
use serde_json::Value;
use utoipa::ToSchema;

use crate::{error::AppResult, AppState};

use super::{JsonBody, TOKEN_COOKIE};

#[derive(Debug, Serialize, ToSchema)]
pub struct SessionResponse {
    pub success: bool,
}

/// Build the session cookie. Production deployments are served over HTTPS to
/// a cross-site frontend; local development runs over plain HTTP.
pub fn session_cookie(value: String, production: bool) -> Cookie<'static> {
    Cookie::build((TOKEN_COOKIE, value))
        .http_only(true)
        .path("/")
        .secure(production)
        .same_site(if production {
            SameSite::None
        } else {
            SameSite::Strict
        })
        .build()
}

/// Issue a session token for the posted payload and set it as a cookie
///
/// The body is any JSON object, typically `{"email": "..."}`.
#[utoipa::path(
    post,
    path = "/jwt",
    tag = "session",
    responses(
        (status = 200, description = "Token issued in the `token` cookie", body = SessionResponse),
        (status = 400, description = "Payload is not a JSON object", body = crate::error::ErrorResponse)
    )
)]
pub async fn issue_token(
    State(state): State<AppState>,
    jar: CookieJar,
    JsonBody(payload): JsonBody<Value>,
) -> AppResult<(CookieJar, Json<SessionResponse>)> {
    let token = state.services.session.issue(payload)?;
    let cookie = session_cookie(token, state.config.is_production());

    tracing::debug!("Session token issued");
    Ok((jar.add(cookie), Json(SessionResponse { success: true })))
}

/// Clear the session cookie
#[utoipa::path(
    post,
    path = "/logout",
    tag = "session",
    responses(
        (status = 200, description = "Cookie cleared", body = SessionResponse)
    )
)]
pub async fn logout(
    State(state): State<AppState>,
    jar: CookieJar,
) -> (CookieJar, Json<SessionResponse>) {
    // Always send the removal cookie, even if the client sent none.
    let mut cookie = session_cookie(String::new(), state.config.is_production());
    cookie.make_removal();

    (jar.add(cookie), Json(SessionResponse { success: true }))
}
