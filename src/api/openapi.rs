//! OpenAPI documentation

use axum::Router;
use utoipa::{
    openapi::security::{ApiKey, ApiKeyValue, SecurityScheme},
    Modify, OpenApi,
};
use utoipa_swagger_ui::SwaggerUi;

use crate::api::{books, borrowed_books, categories, health, session};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Library Catalog API",
        version = "1.0.0",
        description = "Books, categories and borrowed books for the library frontend"
    ),
    paths(
        // Health
        health::banner,
        health::health_check,
        health::readiness_check,
        // Books
        books::list_books,
        books::get_book,
        books::list_books_by_category,
        books::create_book,
        books::update_book,
        // Categories
        categories::list_categories,
        // Borrowed books
        borrowed_books::list_borrowed_books,
        borrowed_books::list_borrowed_books_by_email,
        borrowed_books::borrow_book,
        borrowed_books::return_book,
        // Session
        session::issue_token,
        session::logout,
    ),
    components(
        schemas(
            crate::models::BookFields,
            crate::models::InsertAck,
            crate::models::UpdateAck,
            crate::models::DeleteAck,
            session::SessionResponse,
            health::HealthResponse,
            crate::error::ErrorResponse,
            crate::error::FieldError,
        )
    ),
    modifiers(&SessionCookieAuth),
    tags(
        (name = "health", description = "Liveness and readiness"),
        (name = "books", description = "Book catalog"),
        (name = "categories", description = "Book categories"),
        (name = "borrowed-books", description = "Borrowed book records"),
        (name = "session", description = "Session cookie issuance")
    )
)]
pub struct ApiDoc;

/// Declares the `token` cookie as the API's security scheme
struct SessionCookieAuth;

impl Modify for SessionCookieAuth {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "cookie_auth",
                SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::new(super::TOKEN_COOKIE))),
            );
        }
    }
}

/// Create the OpenAPI documentation router
pub fn create_openapi_router() -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}
