//! Person validator

use crate::{
    error::{AppError, AppResult, FieldErrors},
    models::PersonForm,
    services::people::PeopleService,
};
use validator::Validate;

#[derive(Clone)]
pub struct PersonValidator {
    people: PeopleService,
}

impl PersonValidator {
    pub fn new(people: PeopleService) -> Self {
        Self { people }
    }

    /// Field rules plus the duplicate full-name probe. Same caveat as the
    /// book validator: the edited record is not excluded from the probe.
    pub async fn validate(&self, form: &PersonForm) -> AppResult<()> {
        let mut fields = match form.validate() {
            Ok(()) => FieldErrors::new(),
            Err(errors) => super::field_errors(&errors),
        };

        if self.people.find_by_full_name(&form.full_name).await?.is_some() {
            fields
                .entry("full_name".to_string())
                .or_insert_with(|| "This full name already exists.".to_string());
        }

        if fields.is_empty() {
            Ok(())
        } else {
            Err(AppError::Validation(fields))
        }
    }
}
