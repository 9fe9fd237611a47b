mod catalog;
mod image_proxy;

use axum::{extract::State, http::StatusCode, response::IntoResponse};

use crate::{
  api::{AppState, errors::AppError},
  upstream::CatalogClient,
};

pub(super) use self::catalog::{list_sets, list_themes, missing_theme_id, theme_cover};
pub(super) use self::image_proxy::image_proxy;

const HEALTH_MESSAGE: &str = "BrickStock Backend is running correctly!";

pub async fn not_found() -> impl IntoResponse {
  AppError::ResourceNotFound
}

pub async fn healthz() -> &'static str {
  HEALTH_MESSAGE
}

pub async fn prometheus<C: CatalogClient>(State(state): State<AppState<C>>) -> impl IntoResponse {
  match state.prometheus {
    Some(handle) => (StatusCode::OK, handle.render()).into_response(),
    None => AppError::ResourceNotFound.into_response(),
  }
}
