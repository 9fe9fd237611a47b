pub mod api;
pub mod cache;
pub mod catalog;
pub mod error;
pub mod model;
pub mod trace;
pub mod upstream;

#[cfg(test)]
mod tests;

use std::net::SocketAddr;

use anyhow::Context;
use tokio::signal;

use crate::api::config::Config;

pub mod prelude {
  pub use crate::api::{AppState, config::Config, router, routes};
  pub use crate::cache::ThemeCoverCache;
  pub use crate::catalog::CatalogService;
  pub use crate::error::UpstreamError;
  pub use crate::upstream::{CatalogClient, mock::MockedRebrickable, rebrickable::RebrickableClient};
}

pub async fn entrypoint() -> anyhow::Result<()> {
  let config = Config::from_env()?;
  let _guard = trace::init_tracing(&config, std::io::stdout());

  if !config.has_upstream() {
    tracing::warn!("REBRICKABLE_API_KEY or REBRICKABLE_BASE_URL is not set, catalog requests will fail");
  }

  let app = api::routes(&config)?;
  let listener = tokio::net::TcpListener::bind(config.listen_addr).await.context("could not create listener")?;

  tracing::info!(brickstock = env!("CARGO_PKG_VERSION"), "listening on {}", listener.local_addr()?.to_string());

  axum::serve(listener, app.into_make_service_with_connect_info::<SocketAddr>())
    .with_graceful_shutdown(shutdown())
    .await
    .context("could not start app")?;

  Ok(())
}

async fn shutdown() {
  let ctrl_c = async {
    signal::ctrl_c().await.expect("failed to install ^C handler");
  };

  let terminate = async {
    signal::unix::signal(signal::unix::SignalKind::terminate())
      .expect("failed to install terminate signal handler")
      .recv()
      .await;
  };

  tokio::select! {
      () = ctrl_c => tracing::info!("received ^C, initiating shutdown"),
      () = terminate => tracing::info!("received terminate signal, initiating shutdown"),
  }
}
