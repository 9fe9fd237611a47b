#[derive(Debug, thiserror::Error)]
pub enum UpstreamError {
  #[error(transparent)]
  Transport(#[from] reqwest::Error),
  #[error("upstream returned status {0}")]
  Status(u16),
  #[error("invalid upstream response: {0}")]
  InvalidResponse(#[from] serde_json::Error),
}
