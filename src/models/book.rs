//! Book model and related types

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

/// Checkout duration (in days) after which a book is considered expired
pub const CHECKOUT_EXPIRY_DAYS: i64 = 3650;

/// Book model from database
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Book {
    pub id: i32,
    pub title: String,
    pub author: String,
    pub year: i32,
    /// Owning person; None means the book is on the shelf
    pub person_id: Option<i32>,
    /// When the current checkout began; None when unowned
    pub date: Option<DateTime<Utc>>,
    /// Derived on read, never persisted
    #[sqlx(skip)]
    #[serde(default)]
    pub is_expired: bool,
}

impl Book {
    /// Whether the current checkout has exceeded the expiry threshold
    pub fn checkout_expired(&self, now: DateTime<Utc>) -> bool {
        match self.date {
            Some(date) => now - date > Duration::days(CHECKOUT_EXPIRY_DAYS),
            None => false,
        }
    }

    /// Fill in the derived expiry flag
    pub fn with_expiry(mut self, now: DateTime<Utc>) -> Self {
        self.is_expired = self.checkout_expired(now);
        self
    }
}

/// Book create/edit form. Owner and checkout date are never part of the
/// form; they change only through assign/release.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
pub struct BookForm {
    #[validate(length(
        min = 2,
        max = 100,
        message = "Title should have size from 2 to 100 characters"
    ))]
    pub title: String,
    #[validate(length(
        min = 2,
        max = 100,
        message = "Author should have size from 2 to 100 characters"
    ))]
    pub author: String,
    pub year: i32,
}
