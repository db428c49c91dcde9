//! People management endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Serialize;
use utoipa::ToSchema;

use crate::{
    error::{AppError, AppResult},
    models::{Book, Person, PersonForm},
};

/// Person page view model: the person plus the books they hold, each
/// carrying its expiry flag
#[derive(Serialize, ToSchema)]
pub struct PersonShowResponse {
    pub person: Person,
    pub books: Vec<Book>,
}

/// List people
#[utoipa::path(
    get,
    path = "/people",
    tag = "people",
    responses(
        (status = 200, description = "List of people", body = Vec<Person>)
    )
)]
pub async fn list_people(
    State(state): State<crate::AppState>,
) -> AppResult<Json<Vec<Person>>> {
    let people = state.services.people.index().await?;
    Ok(Json(people))
}

/// Blank person form template
#[utoipa::path(
    get,
    path = "/people/new",
    tag = "people",
    responses(
        (status = 200, description = "Empty form template", body = PersonForm)
    )
)]
pub async fn new_person() -> Json<PersonForm> {
    Json(PersonForm::default())
}

/// Person page: the person and the books they currently hold
#[utoipa::path(
    get,
    path = "/people/{id}",
    tag = "people",
    params(
        ("id" = i32, Path, description = "Person ID")
    ),
    responses(
        (status = 200, description = "Person details", body = PersonShowResponse),
        (status = 404, description = "Person not found")
    )
)]
pub async fn show_person(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<PersonShowResponse>> {
    let person = state
        .services
        .people
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Person with id {} not found", id)))?;

    let books = state.services.people.books_by_person_id(id).await?;

    Ok(Json(PersonShowResponse { person, books }))
}

/// Current record for the edit form
#[utoipa::path(
    get,
    path = "/people/{id}/edit",
    tag = "people",
    params(
        ("id" = i32, Path, description = "Person ID")
    ),
    responses(
        (status = 200, description = "Person to edit", body = Person),
        (status = 404, description = "Person not found")
    )
)]
pub async fn edit_person(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<Person>> {
    let person = state
        .services
        .people
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Person with id {} not found", id)))?;

    Ok(Json(person))
}

/// Create a new person
#[utoipa::path(
    post,
    path = "/people",
    tag = "people",
    request_body = PersonForm,
    responses(
        (status = 201, description = "Person created", body = Person),
        (status = 400, description = "Validation failed", body = crate::error::ErrorResponse)
    )
)]
pub async fn create_person(
    State(state): State<crate::AppState>,
    Json(form): Json<PersonForm>,
) -> AppResult<(StatusCode, Json<Person>)> {
    state.validators.person.validate(&form).await?;

    let created = state.services.people.save(&form).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// Update a person
#[utoipa::path(
    patch,
    path = "/people/{id}",
    tag = "people",
    params(
        ("id" = i32, Path, description = "Person ID")
    ),
    request_body = PersonForm,
    responses(
        (status = 200, description = "Person updated", body = Person),
        (status = 400, description = "Validation failed", body = crate::error::ErrorResponse),
        (status = 404, description = "Person not found")
    )
)]
pub async fn update_person(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
    Json(form): Json<PersonForm>,
) -> AppResult<Json<Person>> {
    state.validators.person.validate(&form).await?;

    let updated = state.services.people.update(id, &form).await?;
    Ok(Json(updated))
}

/// Delete a person, releasing any books they hold
#[utoipa::path(
    delete,
    path = "/people/{id}",
    tag = "people",
    params(
        ("id" = i32, Path, description = "Person ID")
    ),
    responses(
        (status = 204, description = "Person deleted")
    )
)]
pub async fn delete_person(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
) -> AppResult<StatusCode> {
    state.services.people.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
