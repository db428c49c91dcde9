//! Book catalog endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{
    error::{AppError, AppResult},
    models::{Book, BookForm, Person},
};

/// Query parameters for the book listing
#[derive(Deserialize)]
pub struct BookListQuery {
    pub page: Option<i64>,
    pub books_per_page: Option<i64>,
    pub sort_by_year: Option<bool>,
}

/// Book page view model: the book plus either its owner or the list of
/// candidate owners to assign it to
#[derive(Serialize, ToSchema)]
pub struct BookShowResponse {
    pub book: Book,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub owner: Option<Person>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub people: Option<Vec<Person>>,
}

/// Assign request
#[derive(Deserialize, ToSchema)]
pub struct AssignRequest {
    /// Person the book is checked out to
    pub person_id: i32,
}

/// Search request
#[derive(Deserialize, ToSchema)]
pub struct SearchRequest {
    /// Title prefix to match, case-sensitive
    pub query: String,
}

/// Search page view model
#[derive(Serialize, ToSchema)]
pub struct SearchResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub query: Option<String>,
    pub books: Vec<Book>,
}

/// List books, full or one page at a time
#[utoipa::path(
    get,
    path = "/books",
    tag = "books",
    params(
        ("page" = Option<i64>, Query, description = "Zero-indexed page number"),
        ("books_per_page" = Option<i64>, Query, description = "Page size; both params required to paginate"),
        ("sort_by_year" = Option<bool>, Query, description = "Order ascending by year")
    ),
    responses(
        (status = 200, description = "List of books", body = Vec<Book>)
    )
)]
pub async fn list_books(
    State(state): State<crate::AppState>,
    Query(query): Query<BookListQuery>,
) -> AppResult<Json<Vec<Book>>> {
    let sort_by_year = query.sort_by_year.unwrap_or(false);

    // Pagination only kicks in when both parameters are present,
    // otherwise the whole catalog is listed
    let books = match (query.page, query.books_per_page) {
        (Some(page), Some(per_page)) => {
            state
                .services
                .books
                .index_with_pagination(page, per_page, sort_by_year)
                .await?
        }
        _ => state.services.books.index(sort_by_year).await?,
    };

    Ok(Json(books))
}

/// Blank book form template
#[utoipa::path(
    get,
    path = "/books/new",
    tag = "books",
    responses(
        (status = 200, description = "Empty form template", body = BookForm)
    )
)]
pub async fn new_book() -> Json<BookForm> {
    Json(BookForm::default())
}

/// Book page: the book plus its owner, or the candidate owners when the
/// book is on the shelf
#[utoipa::path(
    get,
    path = "/books/{id}",
    tag = "books",
    params(
        ("id" = i32, Path, description = "Book ID")
    ),
    responses(
        (status = 200, description = "Book details", body = BookShowResponse),
        (status = 404, description = "Book not found")
    )
)]
pub async fn show_book(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<BookShowResponse>> {
    let book = state
        .services
        .books
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Book with id {} not found", id)))?;

    let owner = state.services.books.get_owner(id).await?;
    let people = if owner.is_none() {
        Some(state.services.people.index().await?)
    } else {
        None
    };

    Ok(Json(BookShowResponse { book, owner, people }))
}

/// Current record for the edit form
#[utoipa::path(
    get,
    path = "/books/{id}/edit",
    tag = "books",
    params(
        ("id" = i32, Path, description = "Book ID")
    ),
    responses(
        (status = 200, description = "Book to edit", body = Book),
        (status = 404, description = "Book not found")
    )
)]
pub async fn edit_book(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<Book>> {
    let book = state
        .services
        .books
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Book with id {} not found", id)))?;

    Ok(Json(book))
}

/// Create a new book
#[utoipa::path(
    post,
    path = "/books",
    tag = "books",
    request_body = BookForm,
    responses(
        (status = 201, description = "Book created", body = Book),
        (status = 400, description = "Validation failed", body = crate::error::ErrorResponse)
    )
)]
pub async fn create_book(
    State(state): State<crate::AppState>,
    Json(form): Json<BookForm>,
) -> AppResult<(StatusCode, Json<Book>)> {
    state.validators.book.validate(&form).await?;

    let created = state.services.books.save(&form).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// Update a book. The owner and checkout date are preserved; they change
/// only through assign/release.
#[utoipa::path(
    patch,
    path = "/books/{id}",
    tag = "books",
    params(
        ("id" = i32, Path, description = "Book ID")
    ),
    request_body = BookForm,
    responses(
        (status = 200, description = "Book updated", body = Book),
        (status = 400, description = "Validation failed", body = crate::error::ErrorResponse),
        (status = 404, description = "Book not found")
    )
)]
pub async fn update_book(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
    Json(form): Json<BookForm>,
) -> AppResult<Json<Book>> {
    state.validators.book.validate(&form).await?;

    let updated = state.services.books.update(id, &form).await?;
    Ok(Json(updated))
}

/// Check the book out to a person
#[utoipa::path(
    patch,
    path = "/books/{id}/assign",
    tag = "books",
    params(
        ("id" = i32, Path, description = "Book ID")
    ),
    request_body = AssignRequest,
    responses(
        (status = 204, description = "Owner set; a missing book id is silently ignored")
    )
)]
pub async fn assign_book(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
    Json(request): Json<AssignRequest>,
) -> AppResult<StatusCode> {
    state.services.books.assign(id, request.person_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Return the book to the shelf
#[utoipa::path(
    patch,
    path = "/books/{id}/release",
    tag = "books",
    params(
        ("id" = i32, Path, description = "Book ID")
    ),
    responses(
        (status = 204, description = "Owner cleared; a missing book id is silently ignored")
    )
)]
pub async fn release_book(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
) -> AppResult<StatusCode> {
    state.services.books.release(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Delete a book
#[utoipa::path(
    delete,
    path = "/books/{id}",
    tag = "books",
    params(
        ("id" = i32, Path, description = "Book ID")
    ),
    responses(
        (status = 204, description = "Book deleted")
    )
)]
pub async fn delete_book(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
) -> AppResult<StatusCode> {
    state.services.books.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Blank search page model
#[utoipa::path(
    get,
    path = "/books/search",
    tag = "books",
    responses(
        (status = 200, description = "Empty search page", body = SearchResponse)
    )
)]
pub async fn search_page() -> Json<SearchResponse> {
    Json(SearchResponse {
        query: None,
        books: Vec::new(),
    })
}

/// Search books by title prefix
#[utoipa::path(
    post,
    path = "/books/search",
    tag = "books",
    request_body = SearchRequest,
    responses(
        (status = 200, description = "Matching books", body = SearchResponse)
    )
)]
pub async fn search_books(
    State(state): State<crate::AppState>,
    Json(request): Json<SearchRequest>,
) -> AppResult<Json<SearchResponse>> {
    let books = state
        .services
        .books
        .search_by_title_prefix(&request.query)
        .await?;

    Ok(Json(SearchResponse {
        query: Some(request.query),
        books,
    }))
}
