//! People management service

use crate::{
    error::{AppError, AppResult},
    models::{person::PersonForm, Book, Person},
    repository::Repository,
};

#[derive(Clone)]
pub struct PeopleService {
    repository: Repository,
}

impl PeopleService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// List all people
    pub async fn index(&self) -> AppResult<Vec<Person>> {
        self.repository.people.find_all().await
    }

    /// Look up a person by id; absent is not an error
    pub async fn find_by_id(&self, id: i32) -> AppResult<Option<Person>> {
        self.repository.people.find_by_id(id).await
    }

    /// Create a new person; the id is assigned by the store
    pub async fn save(&self, form: &PersonForm) -> AppResult<Person> {
        let person = self.repository.people.insert(form).await?;
        tracing::info!(id = person.id, "Person created");
        Ok(person)
    }

    /// Replace the person at `id`. Errors when no person exists there.
    pub async fn update(&self, id: i32, form: &PersonForm) -> AppResult<Person> {
        self.repository
            .people
            .update(id, form)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Person with id {} not found", id)))
    }

    /// Delete the person at `id`, releasing any books they hold
    pub async fn delete(&self, id: i32) -> AppResult<()> {
        self.repository.people.delete(id).await
    }

    /// Uniqueness probe used by the person validator
    pub async fn find_by_full_name(&self, full_name: &str) -> AppResult<Option<Person>> {
        self.repository.people.find_by_full_name(full_name).await
    }

    /// The books a person currently holds, with the expiry flag computed
    pub async fn books_by_person_id(&self, person_id: i32) -> AppResult<Vec<Book>> {
        self.repository.people.find_books(person_id).await
    }
}
