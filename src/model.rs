use serde::{Deserialize, Serialize};

/// Upstream pagination envelope.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct Page<T> {
  #[serde(default)]
  pub count: u64,
  #[serde(default)]
  pub next: Option<String>,
  #[serde(default)]
  pub previous: Option<String>,
  #[serde(default)]
  pub results: Vec<T>,
}

/// The subset of a set record needed to pick a theme cover.
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct SetCover {
  #[serde(default)]
  pub set_num: Option<String>,
  #[serde(default)]
  pub set_img_url: Option<String>,
}
