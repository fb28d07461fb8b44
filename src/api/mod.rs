//! API handlers and router for the catalog REST endpoints

pub mod books;
pub mod borrowed_books;
pub mod categories;
pub mod health;
pub mod openapi;
pub mod session;

use axum::{
    async_trait,
    extract::{FromRequest, FromRequestParts},
    http::{header, request::Parts, HeaderName, HeaderValue, Method},
    routing::{delete, get, post},
    Router,
};
use axum_extra::extract::CookieJar;
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};

use crate::{error::AppError, models::SessionClaims, AppState};

/// Name of the cookie carrying the session token
pub const TOKEN_COOKIE: &str = "token";

/// JSON request body. Malformed or non-JSON bodies are rejected with the
/// usual error body instead of axum's plain-text rejection.
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct JsonBody<T>(pub T);

/// Auth gate: extracts and verifies the session cookie.
///
/// Adding this extractor to a handler is what gates the route; requests
/// without a valid, unexpired token are rejected with 401 before the handler
/// runs. The decoded claims are also placed in the request extensions.
pub struct SessionUser(pub SessionClaims);

#[async_trait]
impl FromRequestParts<AppState> for SessionUser {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let jar = CookieJar::from_headers(&parts.headers);
        let token = jar
            .get(TOKEN_COOKIE)
            .map(|cookie| cookie.value().to_string())
            .ok_or_else(|| AppError::Authentication("Missing session token".to_string()))?;

        let claims = state.services.session.verify(&token).map_err(|e| {
            tracing::debug!("Rejected session token: {}", e);
            AppError::Authentication(e.to_string())
        })?;

        parts.extensions.insert(claims.clone());
        Ok(SessionUser(claims))
    }
}

/// Create the application router with all routes
pub fn create_router(state: AppState) -> Router {
    let cors = cors_layer(&state.config.cors.allowed_origins);

    let routes = Router::new()
        .route("/", get(health::banner))
        .route("/health", get(health::health_check))
        .route("/ready", get(health::readiness_check))
        // Books
        .route("/all-books", get(books::list_books).post(books::create_book))
        .route("/all-books/:id", get(books::get_book).put(books::update_book))
        .route(
            "/all-books/category/:category",
            get(books::list_books_by_category),
        )
        // Categories
        .route("/books-category", get(categories::list_categories))
        // Borrowed books
        .route(
            "/borrowed-books",
            get(borrowed_books::list_borrowed_books).post(borrowed_books::borrow_book),
        )
        .route(
            "/borrowed-books/email/:email",
            get(borrowed_books::list_borrowed_books_by_email),
        )
        .route("/borrowed-books/:id", delete(borrowed_books::return_book))
        // Session
        .route("/jwt", post(session::issue_token))
        .route("/logout", post(session::logout))
        .with_state(state);

    Router::new()
        .merge(routes)
        .merge(openapi::create_openapi_router())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}

/// CORS for the known frontends. Credentials are allowed, so origins,
/// methods and headers must be listed explicitly.
fn cors_layer(allowed_origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("Ignoring invalid CORS origin: {}", origin);
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([
            header::ORIGIN,
            HeaderName::from_static("x-requested-with"),
            header::CONTENT_TYPE,
            header::ACCEPT,
        ])
        .allow_credentials(true)
}
