use sqlx::{Pool, Sqlite};
use uuid::Uuid;

use crate::db::models::{Quote, QuoteFields};
use crate::error::AppError;

pub struct QuoteRepository;

impl QuoteRepository {
    pub async fn list(pool: &Pool<Sqlite>) -> Result<Vec<Quote>, AppError> {
        let quotes = sqlx::query_as::<_, Quote>(
            "SELECT * FROM quotes ORDER BY created_at DESC, id"
        )
        .fetch_all(pool)
        .await?;

        Ok(quotes)
    }

    pub async fn get_by_id(
        pool: &Pool<Sqlite>,
        id: &str,
    ) -> Result<Option<Quote>, AppError> {
        let quote = sqlx::query_as::<_, Quote>(
            "SELECT * FROM quotes WHERE id = ?"
        )
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(quote)
    }

    pub async fn create(
        pool: &Pool<Sqlite>,
        fields: &QuoteFields,
    ) -> Result<Quote, AppError> {
        let id = Uuid::new_v4().to_string();
        let created_at = chrono::Utc::now().timestamp();

        let quote = sqlx::query_as::<_, Quote>(
            r#"
INSERT INTO quotes (id, content, author, genre_id, created_at)
VALUES (?, ?, ?, ?, ?)
RETURNING *
            "#,
        )
        .bind(&id)
        .bind(&fields.content)
        .bind(&fields.author)
        .bind(fields.genre_id)
        .bind(created_at)
        .fetch_one(pool)
        .await?;

        Ok(quote)
    }

    /// Overwrite content/author/genre_id for the given id.
    /// A missing id surfaces as `NotFound` rather than a silent no-op.
    pub async fn update(
        pool: &Pool<Sqlite>,
        id: &str,
        fields: &QuoteFields,
    ) -> Result<(), AppError> {
        let result = sqlx::query(
            "UPDATE quotes SET content = ?, author = ?, genre_id = ? WHERE id = ?"
        )
        .bind(&fields.content)
        .bind(&fields.author)
        .bind(fields.genre_id)
        .bind(id)
        .execute(pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound);
        }

        Ok(())
    }

    pub async fn delete(pool: &Pool<Sqlite>, id: &str) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM quotes WHERE id = ?")
            .bind(id)
            .execute(pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound);
        }

        Ok(())
    }
}
