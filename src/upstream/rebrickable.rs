use anyhow::Context;
use reqwest::header::{ACCEPT, AUTHORIZATION, HeaderMap, HeaderValue};
use serde::de::DeserializeOwned;

use crate::{error::UpstreamError, upstream::CatalogClient};

#[derive(Clone)]
pub struct RebrickableClient {
  http: reqwest::Client,
  base_url: String,
}

impl RebrickableClient {
  pub fn new(base_url: &str, api_key: &str) -> anyhow::Result<RebrickableClient> {
    let mut authorization = HeaderValue::from_str(&format!("key {api_key}")).context("invalid characters in API key")?;
    authorization.set_sensitive(true);

    let mut headers = HeaderMap::new();
    headers.insert(AUTHORIZATION, authorization);
    headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

    let http = reqwest::Client::builder().default_headers(headers).build().context("could not build upstream client")?;

    Ok(RebrickableClient {
      http,
      base_url: base_url.trim_end_matches('/').to_string(),
    })
  }
}

impl CatalogClient for RebrickableClient {
  async fn get<T: DeserializeOwned + Send>(&self, path: &str, query: &[(&str, String)]) -> Result<T, UpstreamError> {
    let response = self.http.get(format!("{}{path}", self.base_url)).query(query).send().await?.error_for_status()?;

    Ok(response.json::<T>().await?)
  }
}

#[cfg(test)]
mod tests {
  use serde_json::{Value, json};
  use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{header, method, path, query_param},
  };

  use super::RebrickableClient;
  use crate::{error::UpstreamError, upstream::CatalogClient};

  #[tokio::test]
  async fn sends_api_key_and_query() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
      .and(path("/api/v3/lego/themes/"))
      .and(query_param("page_size", "50"))
      .and(header("authorization", "key secret"))
      .and(header("accept", "application/json"))
      .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "results": [] })))
      .expect(1)
      .mount(&server)
      .await;

    let client = RebrickableClient::new(&format!("{}/api/v3/lego/", server.uri()), "secret").unwrap();
    let body: Value = client.get("/themes/", &[("page_size", "50".to_string())]).await.unwrap();

    assert_eq!(body, json!({ "results": [] }));
  }

  #[tokio::test]
  async fn non_success_status_is_an_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET")).respond_with(ResponseTemplate::new(401)).mount(&server).await;

    let client = RebrickableClient::new(&server.uri(), "wrong").unwrap();
    let result = client.get::<Value>("/sets/", &[("theme_id", "158".to_string())]).await;

    assert!(matches!(result, Err(UpstreamError::Transport(err)) if err.status().map(|status| status.as_u16()) == Some(401)));
  }

  #[tokio::test]
  async fn undecodable_body_is_an_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET")).respond_with(ResponseTemplate::new(200).set_body_string("<html>")).mount(&server).await;

    let client = RebrickableClient::new(&server.uri(), "secret").unwrap();

    assert!(client.get::<Value>("/themes/", &[]).await.is_err());
  }

  #[tokio::test]
  async fn missing_base_url_fails_at_request_time() {
    let client = RebrickableClient::new("", "").unwrap();

    assert!(matches!(client.get::<Value>("/themes/", &[]).await, Err(UpstreamError::Transport(_))));
  }

  #[test]
  fn rejects_invalid_api_key() {
    assert!(RebrickableClient::new("http://localhost", "bad\nkey").is_err());
  }
}
