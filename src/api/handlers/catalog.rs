use axum::{
  Json,
  extract::{Path, State},
};
use serde_json::Value;
use tracing::instrument;

use crate::{
  api::{AppState, dto::ThemeCover, errors::AppError},
  upstream::CatalogClient,
};

#[instrument(skip_all)]
pub async fn list_themes<C: CatalogClient>(State(state): State<AppState<C>>) -> Result<Json<Value>, AppError> {
  Ok(Json(state.catalog.list_themes().await.map_err(AppError::ThemesUnavailable)?))
}

#[instrument(skip_all)]
pub async fn list_sets<C: CatalogClient>(State(state): State<AppState<C>>, Path(theme_id): Path<String>) -> Result<Json<Value>, AppError> {
  let theme_id = required_theme_id(&theme_id)?;

  Ok(Json(state.catalog.list_sets(theme_id).await.map_err(AppError::SetsUnavailable)?))
}

#[instrument(skip_all)]
pub async fn theme_cover<C: CatalogClient>(State(state): State<AppState<C>>, Path(theme_id): Path<String>) -> Result<Json<ThemeCover>, AppError> {
  let theme_id = required_theme_id(&theme_id)?;

  Ok(Json(ThemeCover {
    cover_url: state.catalog.theme_cover(theme_id).await,
    theme_id: theme_id.to_string(),
  }))
}

pub async fn missing_theme_id() -> AppError {
  AppError::MissingParameter("themeId")
}

fn required_theme_id(theme_id: &str) -> Result<&str, AppError> {
  match theme_id.trim() {
    "" => Err(AppError::MissingParameter("themeId")),
    theme_id => Ok(theme_id),
  }
}
