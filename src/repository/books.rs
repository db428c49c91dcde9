//! Books repository for database operations

use chrono::Utc;
use sqlx::{Pool, Postgres};

use crate::{
    error::AppResult,
    models::{book::BookForm, Book, Person},
};

#[derive(Clone)]
pub struct BooksRepository {
    pool: Pool<Postgres>,
}

impl BooksRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Fetch all books, optionally ordered ascending by year
    pub async fn find_all(&self, sort_by_year: bool) -> AppResult<Vec<Book>> {
        let query = if sort_by_year {
            "SELECT * FROM book ORDER BY year"
        } else {
            "SELECT * FROM book"
        };

        let books = sqlx::query_as::<_, Book>(query).fetch_all(&self.pool).await?;

        let now = Utc::now();
        Ok(books.into_iter().map(|b| b.with_expiry(now)).collect())
    }

    /// Fetch one zero-indexed page of books. A page past the end of the
    /// result set comes back empty.
    pub async fn find_page(
        &self,
        page: i64,
        per_page: i64,
        sort_by_year: bool,
    ) -> AppResult<Vec<Book>> {
        let query = if sort_by_year {
            "SELECT * FROM book ORDER BY year LIMIT $1 OFFSET $2"
        } else {
            "SELECT * FROM book LIMIT $1 OFFSET $2"
        };

        let books = sqlx::query_as::<_, Book>(query)
            .bind(per_page)
            .bind(page * per_page)
            .fetch_all(&self.pool)
            .await?;

        let now = Utc::now();
        Ok(books.into_iter().map(|b| b.with_expiry(now)).collect())
    }

    /// Fetch books whose title starts with the given prefix (case-sensitive)
    pub async fn find_by_title_prefix(&self, prefix: &str) -> AppResult<Vec<Book>> {
        let books = sqlx::query_as::<_, Book>("SELECT * FROM book WHERE title LIKE $1 || '%'")
            .bind(prefix)
            .fetch_all(&self.pool)
            .await?;

        let now = Utc::now();
        Ok(books.into_iter().map(|b| b.with_expiry(now)).collect())
    }

    /// Fetch a book by ID
    pub async fn find_by_id(&self, id: i32) -> AppResult<Option<Book>> {
        let book = sqlx::query_as::<_, Book>("SELECT * FROM book WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(book.map(|b| b.with_expiry(Utc::now())))
    }

    /// Fetch a book by exact title and author match
    pub async fn find_by_title_and_author(
        &self,
        title: &str,
        author: &str,
    ) -> AppResult<Option<Book>> {
        let book = sqlx::query_as::<_, Book>(
            "SELECT * FROM book WHERE title = $1 AND author = $2 LIMIT 1",
        )
        .bind(title)
        .bind(author)
        .fetch_optional(&self.pool)
        .await?;

        Ok(book.map(|b| b.with_expiry(Utc::now())))
    }

    /// Insert a new book; the id is assigned by the store
    pub async fn insert(&self, form: &BookForm) -> AppResult<Book> {
        let mut tx = self.pool.begin().await?;

        let book = sqlx::query_as::<_, Book>(
            r#"
            INSERT INTO book (title, author, year)
            VALUES ($1, $2, $3)
            RETURNING *
            "#,
        )
        .bind(&form.title)
        .bind(&form.author)
        .bind(form.year)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(book)
    }

    /// Replace title/author/year of the book at `id`. Owner and checkout
    /// date are left untouched; they change only through assign/release.
    /// Returns None when no row exists at `id`.
    pub async fn update(&self, id: i32, form: &BookForm) -> AppResult<Option<Book>> {
        let mut tx = self.pool.begin().await?;

        let book = sqlx::query_as::<_, Book>(
            r#"
            UPDATE book
            SET title = $1, author = $2, year = $3
            WHERE id = $4
            RETURNING *
            "#,
        )
        .bind(&form.title)
        .bind(&form.author)
        .bind(form.year)
        .bind(id)
        .fetch_optional(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(book.map(|b| b.with_expiry(Utc::now())))
    }

    /// Delete the book at `id`. Deleting a missing id affects no rows.
    pub async fn delete(&self, id: i32) -> AppResult<()> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("DELETE FROM book WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(())
    }

    /// Check the book out to a person, stamping the checkout date.
    /// A missing book id affects no rows and is not an error.
    pub async fn assign(&self, id: i32, person_id: i32) -> AppResult<()> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("UPDATE book SET person_id = $1, date = $2 WHERE id = $3")
            .bind(person_id)
            .bind(Utc::now())
            .bind(id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(())
    }

    /// Return the book to the shelf, clearing owner and checkout date
    /// together. A missing book id affects no rows and is not an error.
    pub async fn release(&self, id: i32) -> AppResult<()> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("UPDATE book SET person_id = NULL, date = NULL WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(())
    }

    /// Fetch the person currently holding the book, if any
    pub async fn find_owner(&self, id: i32) -> AppResult<Option<Person>> {
        let owner = sqlx::query_as::<_, Person>(
            r#"
            SELECT p.id, p.full_name, p.age
            FROM person p
            JOIN book b ON b.person_id = p.id
            WHERE b.id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(owner)
    }
}
