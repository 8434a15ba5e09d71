use axum::{
    extract::{Path, State},
    response::{Html, IntoResponse, Redirect, Response},
    Form,
};

use crate::db::{QuoteFields, QuoteRepository};
use crate::error::AppError;
use crate::http::state::AppState;
use crate::http::views;

/// GET /quotes
pub async fn list(State(state): State<AppState>) -> Result<Html<String>, AppError> {
    let quotes = QuoteRepository::list(&state.db).await?;

    Ok(views::quotes_index(&quotes))
}

/// GET /quotes/:id
pub async fn show(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Html<String>, AppError> {
    let quote = QuoteRepository::get_by_id(&state.db, &id)
        .await?
        .ok_or(AppError::NotFound)?;

    Ok(views::quote_single(&quote))
}

/// GET /quotes/add (requires auth)
pub async fn add_form() -> Html<String> {
    views::quotes_add(1)
}

/// POST /quotes (requires auth)
pub async fn create(
    State(state): State<AppState>,
    Form(fields): Form<QuoteFields>,
) -> Result<Response, AppError> {
    QuoteRepository::create(&state.db, &fields).await?;

    Ok(Redirect::to("/quotes").into_response())
}

/// GET /quotes/edit/:id (requires auth)
pub async fn edit_form(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Html<String>, AppError> {
    let quote = QuoteRepository::get_by_id(&state.db, &id)
        .await?
        .ok_or(AppError::NotFound)?;

    Ok(views::quotes_edit(&quote))
}

/// PUT /quotes/:id (requires auth)
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Form(fields): Form<QuoteFields>,
) -> Result<Response, AppError> {
    QuoteRepository::update(&state.db, &id, &fields).await?;

    Ok(Redirect::to("/quotes").into_response())
}

/// DELETE /quotes/:id (requires auth)
pub async fn destroy(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Response, AppError> {
    QuoteRepository::delete(&state.db, &id).await?;

    Ok(Redirect::to("/quotes").into_response())
}
