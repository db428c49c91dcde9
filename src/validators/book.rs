//! Book validator

use crate::{
    error::{AppError, AppResult, FieldErrors},
    models::BookForm,
    services::books::BookService,
};
use validator::Validate;

#[derive(Clone)]
pub struct BookValidator {
    books: BookService,
}

impl BookValidator {
    pub fn new(books: BookService) -> Self {
        Self { books }
    }

    /// Field rules plus the duplicate probe. The probe matches any book
    /// with the same title and author, including the record currently
    /// being edited, so an update that keeps both fields unchanged is
    /// rejected as a duplicate.
    pub async fn validate(&self, form: &BookForm) -> AppResult<()> {
        let mut fields = match form.validate() {
            Ok(()) => FieldErrors::new(),
            Err(errors) => super::field_errors(&errors),
        };

        if self
            .books
            .find_by_title_and_author(&form.title, &form.author)
            .await?
            .is_some()
        {
            fields
                .entry("title".to_string())
                .or_insert_with(|| "Book with such name and author already exists".to_string());
        }

        if fields.is_empty() {
            Ok(())
        } else {
            Err(AppError::Validation(fields))
        }
    }
}
