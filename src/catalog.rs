use metrics::counter;
use serde_json::Value;
use tracing::instrument;

use crate::{
  cache::ThemeCoverCache,
  error::UpstreamError,
  model::{Page, SetCover},
  upstream::CatalogClient,
};

// Only the first page of each listing is ever requested.
pub const THEMES_PAGE_SIZE: u32 = 50;
pub const SETS_PAGE_SIZE: u32 = 20;
pub const COVER_PAGE_SIZE: u32 = 1;

/// Largest sets first, their box art is used as the theme cover.
pub const COVER_ORDERING: &str = "-num_parts";

#[derive(Clone)]
pub struct CatalogService<C: CatalogClient> {
  client: C,
  covers: ThemeCoverCache,
}

impl<C: CatalogClient> CatalogService<C> {
  pub fn new(client: C) -> CatalogService<C> {
    CatalogService {
      client,
      covers: ThemeCoverCache::default(),
    }
  }

  pub fn client(&self) -> &C {
    &self.client
  }

  pub fn covers(&self) -> &ThemeCoverCache {
    &self.covers
  }

  #[instrument(skip_all)]
  pub async fn list_themes(&self) -> Result<Value, UpstreamError> {
    self
      .client
      .get("/themes/", &[("page_size", THEMES_PAGE_SIZE.to_string())])
      .await
      .inspect_err(|err| tracing::error!(operation = "list_themes", error = %err, "could not fetch themes from catalog"))
  }

  #[instrument(skip(self))]
  pub async fn list_sets(&self, theme_id: &str) -> Result<Value, UpstreamError> {
    self
      .client
      .get("/sets/", &[("theme_id", theme_id.to_string()), ("page_size", SETS_PAGE_SIZE.to_string())])
      .await
      .inspect_err(|err| tracing::error!(operation = "list_sets", theme_id, error = %err, "could not fetch sets from catalog"))
  }

  /// Resolves the image of the largest set in a theme.
  ///
  /// Successful lookups are cached for the lifetime of the service, including
  /// the ones that found no set. Upstream failures are logged and yield `None`
  /// without being cached, so the next call queries the catalog again.
  #[instrument(skip(self))]
  pub async fn theme_cover(&self, theme_id: &str) -> Option<String> {
    if let Some(cover) = self.covers.get(theme_id).await {
      counter!("brickstock_cover_cache_total", "result" => "hit").increment(1);

      return cover;
    }

    counter!("brickstock_cover_cache_total", "result" => "miss").increment(1);

    let query = [
      ("theme_id", theme_id.to_string()),
      ("page_size", COVER_PAGE_SIZE.to_string()),
      ("ordering", COVER_ORDERING.to_string()),
    ];

    match self.client.get::<Page<SetCover>>("/sets/", &query).await {
      Ok(page) => {
        let set = page.results.into_iter().next();

        tracing::debug!(set = set.as_ref().and_then(|set| set.set_num.as_deref()), "resolved theme cover");

        self.covers.insert(theme_id, set.and_then(|set| set.set_img_url)).await
      }

      Err(err) => {
        tracing::warn!(operation = "theme_cover", theme_id, error = %err, "could not fetch theme cover from catalog");

        None
      }
    }
  }
}
