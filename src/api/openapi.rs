//! OpenAPI documentation

use axum::Router;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::{books, health, people};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Libris API",
        version = "0.1.0",
        description = "Library Catalog REST API",
        license(name = "AGPL-3.0", url = "https://www.gnu.org/licenses/agpl-3.0.html")
    ),
    servers(
        (url = "/api/v1", description = "API v1")
    ),
    paths(
        // Health
        health::health_check,
        health::readiness_check,
        // Books
        books::list_books,
        books::new_book,
        books::show_book,
        books::edit_book,
        books::create_book,
        books::update_book,
        books::assign_book,
        books::release_book,
        books::delete_book,
        books::search_page,
        books::search_books,
        // People
        people::list_people,
        people::new_person,
        people::show_person,
        people::edit_person,
        people::create_person,
        people::update_person,
        people::delete_person,
    ),
    components(
        schemas(
            // Books
            crate::models::Book,
            crate::models::BookForm,
            books::BookShowResponse,
            books::AssignRequest,
            books::SearchRequest,
            books::SearchResponse,
            // People
            crate::models::Person,
            crate::models::PersonForm,
            people::PersonShowResponse,
            // Health
            health::HealthResponse,
            // Errors
            crate::error::ErrorResponse,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "books", description = "Book catalog management"),
        (name = "people", description = "People management")
    )
)]
pub struct ApiDoc;

/// Create the OpenAPI documentation router
pub fn create_openapi_router() -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}
