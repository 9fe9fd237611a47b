pub mod mock;
pub mod rebrickable;

use serde::de::DeserializeOwned;

use crate::error::UpstreamError;

/// Authenticated read access to the catalog API.
///
/// Implementations resolve `path` against their configured base URL and decode
/// the JSON body into `T`. Transport failures, non-2xx statuses and decoding
/// errors are all surfaced as [`UpstreamError`].
pub trait CatalogClient: Clone + Send + Sync + 'static {
  fn get<T: DeserializeOwned + Send>(&self, path: &str, query: &[(&str, String)]) -> impl Future<Output = Result<T, UpstreamError>> + Send;
}
