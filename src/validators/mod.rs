//! Uniqueness validators layered on top of declarative field validation.
//!
//! Field rules live on the form DTOs as `validator` derives; the structs
//! here add the duplicate probes that need a repository round-trip. Both
//! kinds of failure end up in the same field -> message map.

pub mod book;
pub mod person;

use validator::ValidationErrors;

use crate::error::FieldErrors;
use crate::services::Services;

pub use book::BookValidator;
pub use person::PersonValidator;

/// Container for all validators
#[derive(Clone)]
pub struct Validators {
    pub book: BookValidator,
    pub person: PersonValidator,
}

impl Validators {
    /// Create all validators against the given services
    pub fn new(services: &Services) -> Self {
        Self {
            book: BookValidator::new(services.books.clone()),
            person: PersonValidator::new(services.people.clone()),
        }
    }
}

/// Flatten `validator` derive output into a field -> message map, keeping
/// the first message reported for each field.
pub fn field_errors(errors: &ValidationErrors) -> FieldErrors {
    let mut map = FieldErrors::new();
    for (field, errs) in errors.field_errors() {
        if let Some(message) = errs.iter().find_map(|e| e.message.as_ref()) {
            map.insert(field.to_string(), message.to_string());
        }
    }
    map
}
