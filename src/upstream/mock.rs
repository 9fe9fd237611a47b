use std::{
  collections::HashMap,
  sync::{
    Arc, Mutex, PoisonError,
    atomic::{AtomicBool, Ordering},
  },
};

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::{error::UpstreamError, upstream::CatalogClient};

/// In-memory catalog client serving canned bodies by path and recording every request.
#[derive(Clone, Default)]
pub struct MockedRebrickable {
  responses: Arc<HashMap<String, Value>>,
  failing: Arc<AtomicBool>,
  requests: Arc<Mutex<Vec<String>>>,
}

impl MockedRebrickable {
  pub fn with_responses<'a>(responses: impl IntoIterator<Item = (&'a str, Value)>) -> MockedRebrickable {
    MockedRebrickable {
      responses: Arc::new(responses.into_iter().map(|(path, body)| (path.to_string(), body)).collect()),
      ..Default::default()
    }
  }

  pub fn failing() -> MockedRebrickable {
    let client = MockedRebrickable::default();
    client.set_failing(true);
    client
  }

  pub fn set_failing(&self, failing: bool) {
    self.failing.store(failing, Ordering::SeqCst);
  }

  pub fn calls(&self) -> usize {
    self.requests.lock().unwrap_or_else(PoisonError::into_inner).len()
  }

  /// Requests made so far, rendered as `path?key=value&...`.
  pub fn requests(&self) -> Vec<String> {
    self.requests.lock().unwrap_or_else(PoisonError::into_inner).clone()
  }
}

impl CatalogClient for MockedRebrickable {
  async fn get<T: DeserializeOwned + Send>(&self, path: &str, query: &[(&str, String)]) -> Result<T, UpstreamError> {
    let query = query.iter().map(|(key, value)| format!("{key}={value}")).collect::<Vec<_>>().join("&");

    self.requests.lock().unwrap_or_else(PoisonError::into_inner).push(format!("{path}?{query}"));

    if self.failing.load(Ordering::SeqCst) {
      return Err(UpstreamError::Status(503));
    }

    let body = self.responses.get(path).cloned().ok_or(UpstreamError::Status(404))?;

    Ok(serde_json::from_value(body)?)
  }
}
