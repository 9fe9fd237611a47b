use std::{collections::HashMap, sync::Arc};

use ahash::RandomState;
use tokio::sync::RwLock;

/// Write-once map from theme identifier to its resolved cover URL.
///
/// A key maps to `None` once a lookup confirmed the theme has no cover. A
/// missing key means the theme was never looked up. Entries live as long as
/// the cache and are never replaced.
#[derive(Clone, Debug, Default)]
pub struct ThemeCoverCache {
  entries: Arc<RwLock<HashMap<String, Option<String>, RandomState>>>,
}

impl ThemeCoverCache {
  pub async fn get(&self, theme_id: &str) -> Option<Option<String>> {
    self.entries.read().await.get(theme_id).cloned()
  }

  /// Stores `cover` unless the key is already populated, and returns the value held by the cache.
  pub async fn insert(&self, theme_id: &str, cover: Option<String>) -> Option<String> {
    self.entries.write().await.entry(theme_id.to_string()).or_insert(cover).clone()
  }

  #[cfg(test)]
  pub async fn len(&self) -> usize {
    self.entries.read().await.len()
  }

  #[cfg(test)]
  pub async fn is_empty(&self) -> bool {
    self.entries.read().await.is_empty()
  }
}
