// src/handlers/categories.rs

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use validator::Validate;

use crate::{
    bank::SharedBank,
    error::AppError,
    handlers::Confirmation,
    models::category::{CategoryPatch, CreateCategoryRequest},
};

/// Lists all categories, enabled or not.
/// Admin only.
pub async fn list_categories(State(bank): State<SharedBank>) -> impl IntoResponse {
    Json(bank.read().await.categories().to_vec())
}

/// Categories with their question counts, for managing quiz composition.
/// Admin only.
pub async fn category_overview(State(bank): State<SharedBank>) -> impl IntoResponse {
    Json(bank.read().await.category_overview())
}

/// Creates a category; the id is derived from the name.
/// Admin only.
pub async fn create_category(
    State(bank): State<SharedBank>,
    Json(payload): Json<CreateCategoryRequest>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let category = bank
        .write()
        .await
        .add_category(&payload.name, payload.icon.as_deref())?;
    tracing::info!("Created category '{}'", category.id);

    Ok((StatusCode::CREATED, Json(category)))
}

/// Updates name, icon, enabled flag or question cap of a category.
/// Admin only.
pub async fn update_category(
    State(bank): State<SharedBank>,
    Path(id): Path<String>,
    Json(payload): Json<CategoryPatch>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let category = bank.write().await.update_category(&id, payload)?;
    Ok(Json(category))
}

/// Flips a category between enabled and disabled.
/// Admin only.
pub async fn toggle_category(
    State(bank): State<SharedBank>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let category = bank.write().await.toggle_category(&id)?;
    tracing::info!(
        "Category '{}' is now {}",
        category.id,
        if category.enabled { "enabled" } else { "disabled" }
    );

    Ok(Json(category))
}

/// Removes a category. Its questions stay in the bank.
/// Admin only. Requires `?confirm=true`.
pub async fn delete_category(
    State(bank): State<SharedBank>,
    Path(id): Path<String>,
    Query(confirmation): Query<Confirmation>,
) -> Result<impl IntoResponse, AppError> {
    confirmation.require("remove this category")?;

    bank.write().await.remove_category(&id)?;
    Ok(StatusCode::NO_CONTENT)
}
