use std::error::Error;

use axum::{
  Json,
  http::StatusCode,
  response::{IntoResponse, Response},
};
use serde_json::json;
use tracing::*;

use crate::error::UpstreamError;

pub(crate) struct ApiError(pub StatusCode, pub String, pub Option<String>);

#[derive(Debug, thiserror::Error)]
pub enum AppError {
  #[error("missing {0} parameter")]
  MissingParameter(&'static str),
  #[error("missing resource")]
  ResourceNotFound,
  #[error("could not fetch themes")]
  ThemesUnavailable(#[source] UpstreamError),
  #[error("could not fetch sets")]
  SetsUnavailable(#[source] UpstreamError),

  #[error("invalid configuration: {0}")]
  ConfigError(String),
}

impl IntoResponse for AppError {
  fn into_response(self) -> Response {
    let response = ApiError::from(&self);

    match response.0.is_server_error() {
      true => error!(error = self.source(), "{}", self.to_string()),
      false => debug!("{}", self.to_string()),
    }

    response.into_response()
  }
}

impl From<&AppError> for ApiError {
  fn from(value: &AppError) -> Self {
    match value {
      AppError::MissingParameter(_) => ApiError(StatusCode::BAD_REQUEST, value.to_string(), None),
      AppError::ResourceNotFound => ApiError(StatusCode::NOT_FOUND, value.to_string(), None),
      AppError::ThemesUnavailable(err) | AppError::SetsUnavailable(err) => ApiError(StatusCode::INTERNAL_SERVER_ERROR, value.to_string(), Some(err.to_string())),
      AppError::ConfigError(_) => ApiError(StatusCode::INTERNAL_SERVER_ERROR, value.to_string(), None),
    }
  }
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    let payload = match self.2 {
      Some(error) => json!({
          "message": self.1,
          "error": error,
      }),
      None => json!({
          "message": self.1,
      }),
    };

    (self.0, Json(payload)).into_response()
  }
}

/// Failures of the image proxy, rendered as plain text.
#[derive(Debug, thiserror::Error)]
pub enum ProxyError {
  #[error("missing url parameter")]
  MissingUrl,
  #[error("image not found")]
  Unavailable(String, #[source] reqwest::Error),
}

impl IntoResponse for ProxyError {
  fn into_response(self) -> Response {
    match &self {
      ProxyError::MissingUrl => (StatusCode::BAD_REQUEST, self.to_string()).into_response(),

      ProxyError::Unavailable(url, err) => {
        warn!(url = %url, error = %err, "could not fetch proxied image");

        (StatusCode::NOT_FOUND, self.to_string()).into_response()
      }
    }
  }
}
