pub mod password;

pub use password::{hash_password, verify_password};

use sqlx::{Pool, Sqlite};

use crate::db::{models::User, UserRepository};
use crate::error::AppError;

/// Username/password pair submitted by the login form.
#[derive(Debug)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

/// Login rejection. Deliberately carries no detail about whether the
/// username or the password was wrong.
#[derive(Debug)]
pub struct AuthFailure;

/// Authenticate credentials against the user store.
///
/// Returns the user on a match and `AuthFailure` otherwise; the HTTP layer
/// decides how a failure is expressed (redirect, flash flag). Store and
/// hashing errors propagate separately.
pub async fn authenticate(
    pool: &Pool<Sqlite>,
    credentials: &Credentials,
) -> Result<Result<User, AuthFailure>, AppError> {
    let user = match UserRepository::get_by_username(pool, &credentials.username).await? {
        Some(user) => user,
        None => return Ok(Err(AuthFailure)),
    };

    if verify_password(&credentials.password, &user.password_hash)? {
        Ok(Ok(user))
    } else {
        Ok(Err(AuthFailure))
    }
}
