use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Default, Deserialize)]
pub struct ImageProxyParams {
  #[serde(default)]
  pub url: Option<String>,
}

#[derive(Clone, Debug, Serialize)]
pub struct ThemeCover {
  pub theme_id: String,
  pub cover_url: Option<String>,
}
