//! Book catalog service

use crate::{
    error::{AppError, AppResult},
    models::{book::BookForm, Book, Person},
    repository::Repository,
};

#[derive(Clone)]
pub struct BookService {
    repository: Repository,
}

impl BookService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// List all books, optionally sorted ascending by year
    pub async fn index(&self, sort_by_year: bool) -> AppResult<Vec<Book>> {
        self.repository.books.find_all(sort_by_year).await
    }

    /// List one zero-indexed page of books, same ordering rule as `index`
    pub async fn index_with_pagination(
        &self,
        page: i64,
        per_page: i64,
        sort_by_year: bool,
    ) -> AppResult<Vec<Book>> {
        self.repository.books.find_page(page, per_page, sort_by_year).await
    }

    /// List books whose title starts with the given prefix
    pub async fn search_by_title_prefix(&self, prefix: &str) -> AppResult<Vec<Book>> {
        self.repository.books.find_by_title_prefix(prefix).await
    }

    /// Look up a book by id; absent is not an error
    pub async fn find_by_id(&self, id: i32) -> AppResult<Option<Book>> {
        self.repository.books.find_by_id(id).await
    }

    /// Create a new book; the id is assigned by the store
    pub async fn save(&self, form: &BookForm) -> AppResult<Book> {
        let book = self.repository.books.insert(form).await?;
        tracing::info!(id = book.id, "Book created");
        Ok(book)
    }

    /// Replace title/author/year of the book at `id`, keeping its owner
    /// and checkout date untouched. Errors when no book exists at `id`.
    pub async fn update(&self, id: i32, form: &BookForm) -> AppResult<Book> {
        self.repository
            .books
            .update(id, form)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Book with id {} not found", id)))
    }

    /// Delete the book at `id`
    pub async fn delete(&self, id: i32) -> AppResult<()> {
        self.repository.books.delete(id).await
    }

    /// Check the book out to a person. Missing book ids are silently
    /// ignored. Concurrent assigns on the same book race at the store's
    /// isolation level; the last write wins.
    pub async fn assign(&self, id: i32, person_id: i32) -> AppResult<()> {
        self.repository.books.assign(id, person_id).await
    }

    /// Return the book to the shelf. Missing book ids are silently ignored.
    pub async fn release(&self, id: i32) -> AppResult<()> {
        self.repository.books.release(id).await
    }

    /// The person currently holding the book, if any
    pub async fn get_owner(&self, id: i32) -> AppResult<Option<Person>> {
        self.repository.books.find_owner(id).await
    }

    /// Uniqueness probe used by the book validator
    pub async fn find_by_title_and_author(
        &self,
        title: &str,
        author: &str,
    ) -> AppResult<Option<Book>> {
        self.repository.books.find_by_title_and_author(title, author).await
    }
}
