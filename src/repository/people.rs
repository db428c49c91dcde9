//! People repository for database operations

use chrono::Utc;
use sqlx::{Pool, Postgres};

use crate::{
    error::AppResult,
    models::{person::PersonForm, Book, Person},
};

#[derive(Clone)]
pub struct PeopleRepository {
    pool: Pool<Postgres>,
}

impl PeopleRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Fetch all people in store-default order
    pub async fn find_all(&self) -> AppResult<Vec<Person>> {
        let people = sqlx::query_as::<_, Person>("SELECT * FROM person")
            .fetch_all(&self.pool)
            .await?;

        Ok(people)
    }

    /// Fetch a person by ID
    pub async fn find_by_id(&self, id: i32) -> AppResult<Option<Person>> {
        let person = sqlx::query_as::<_, Person>("SELECT * FROM person WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(person)
    }

    /// Fetch a person by exact full name match
    pub async fn find_by_full_name(&self, full_name: &str) -> AppResult<Option<Person>> {
        let person =
            sqlx::query_as::<_, Person>("SELECT * FROM person WHERE full_name = $1 LIMIT 1")
                .bind(full_name)
                .fetch_optional(&self.pool)
                .await?;

        Ok(person)
    }

    /// Fetch the books currently held by a person, with expiry computed
    pub async fn find_books(&self, person_id: i32) -> AppResult<Vec<Book>> {
        let books = sqlx::query_as::<_, Book>("SELECT * FROM book WHERE person_id = $1")
            .bind(person_id)
            .fetch_all(&self.pool)
            .await?;

        let now = Utc::now();
        Ok(books.into_iter().map(|b| b.with_expiry(now)).collect())
    }

    /// Insert a new person; the id is assigned by the store
    pub async fn insert(&self, form: &PersonForm) -> AppResult<Person> {
        let mut tx = self.pool.begin().await?;

        let person = sqlx::query_as::<_, Person>(
            r#"
            INSERT INTO person (full_name, age)
            VALUES ($1, $2)
            RETURNING *
            "#,
        )
        .bind(&form.full_name)
        .bind(form.age)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(person)
    }

    /// Replace the person at `id`. Returns None when no row exists.
    pub async fn update(&self, id: i32, form: &PersonForm) -> AppResult<Option<Person>> {
        let mut tx = self.pool.begin().await?;

        let person = sqlx::query_as::<_, Person>(
            r#"
            UPDATE person
            SET full_name = $1, age = $2
            WHERE id = $3
            RETURNING *
            "#,
        )
        .bind(&form.full_name)
        .bind(form.age)
        .bind(id)
        .fetch_optional(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(person)
    }

    /// Delete the person at `id`. Their books return to the shelf in the
    /// same transaction; owner and checkout date are always cleared together.
    pub async fn delete(&self, id: i32) -> AppResult<()> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("UPDATE book SET person_id = NULL, date = NULL WHERE person_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        sqlx::query("DELETE FROM person WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(())
    }
}
