use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub created_at: i64,
}

#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Quote {
    pub id: String,
    pub content: String,
    pub author: String,
    pub genre_id: i64,
    pub created_at: i64,
}

/// The mutable fields of a quote, shared by create and update.
#[derive(Debug, Clone, Deserialize)]
pub struct QuoteFields {
    pub content: String,
    pub author: String,
    pub genre_id: i64,
}

#[derive(Debug, Clone, FromRow)]
pub struct Session {
    pub id: String,
    pub user_id: String,
    pub token: String,
    pub expires_at: i64,
    pub created_at: i64,
}
