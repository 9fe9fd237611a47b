use axum::{
  body::Body,
  extract::State,
  http::{HeaderValue, header},
  response::{IntoResponse, Response},
};
use axum_extra::extract::Query;
use futures::TryStreamExt;
use tracing::instrument;

use crate::{
  api::{AppState, dto::ImageProxyParams, errors::ProxyError},
  upstream::CatalogClient,
};

/// Relays a remote image so browsers can load it without cross-origin restrictions.
///
/// The body is forwarded chunk by chunk as the client reads it. Dropping the
/// response, for instance on client disconnect, cancels the upstream transfer.
#[instrument(skip_all)]
pub async fn image_proxy<C: CatalogClient>(State(state): State<AppState<C>>, Query(params): Query<ImageProxyParams>) -> Result<Response, ProxyError> {
  let url = params.url.as_deref().map(str::trim).filter(|url| !url.is_empty()).ok_or(ProxyError::MissingUrl)?;

  let upstream = state
    .http
    .get(url)
    .send()
    .await
    .and_then(reqwest::Response::error_for_status)
    .map_err(|err| ProxyError::Unavailable(url.to_string(), err))?;

  let content_type = upstream.headers().get(header::CONTENT_TYPE).cloned().unwrap_or_else(|| HeaderValue::from_static("application/octet-stream"));

  let source = url.to_string();
  let stream = upstream
    .bytes_stream()
    .inspect_err(move |err| tracing::warn!(url = %source, error = %err, "proxied image stream interrupted"));

  Ok(([(header::CONTENT_TYPE, content_type)], Body::from_stream(stream)).into_response())
}

#[cfg(test)]
mod tests {
  use std::{
    io::{Read, Write},
    net::TcpListener,
    thread,
  };

  use axum::{
    body,
    extract::State,
    http::{StatusCode, header},
  };
  use axum_extra::extract::Query;

  use super::image_proxy;
  use crate::{
    api::{AppState, config::Config, dto::ImageProxyParams},
    upstream::mock::MockedRebrickable,
  };

  /// Serves a single response announcing more bytes than it sends, then hangs up.
  fn truncated_upstream() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();

    thread::spawn(move || {
      let (mut socket, _) = listener.accept().unwrap();
      let mut request = Vec::new();
      let mut buf = [0u8; 1024];

      while !request.windows(4).any(|window| window == b"\r\n\r\n") {
        match socket.read(&mut buf) {
          Ok(0) | Err(_) => return,
          Ok(read) => request.extend_from_slice(&buf[..read]),
        }
      }

      let _ = socket.write_all(b"HTTP/1.1 200 OK\r\nContent-Type: image/png\r\nContent-Length: 4096\r\n\r\n\x89PNG\r\n\x1a\n");
      let _ = socket.flush();
    });

    format!("http://{addr}/media/sets/75192-1.png")
  }

  #[tokio::test]
  async fn interrupted_upstream_aborts_body() {
    let state = AppState::new(Config::default(), MockedRebrickable::default()).unwrap();
    let params = ImageProxyParams { url: Some(truncated_upstream()) };

    let response = image_proxy(State(state), Query(params)).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers().get(header::CONTENT_TYPE).unwrap(), "image/png");
    assert!(body::to_bytes(response.into_body(), usize::MAX).await.is_err());
  }
}
