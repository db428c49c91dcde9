//! Person model and related types

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

/// Person model from database
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Person {
    pub id: i32,
    pub full_name: String,
    pub age: i32,
}

/// Person create/edit form
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
pub struct PersonForm {
    #[validate(length(
        min = 2,
        max = 100,
        message = "Full name should have size from 2 to 100 characters"
    ))]
    pub full_name: String,
    #[validate(range(min = 0, message = "Age should not be negative"))]
    pub age: i32,
}
