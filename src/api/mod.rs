use anyhow::Context;
use axum::{Router, middleware, routing::get};
use metrics_exporter_prometheus::PrometheusHandle;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::{
  api::config::Config,
  catalog::CatalogService,
  trace,
  upstream::{CatalogClient, rebrickable::RebrickableClient},
};

pub mod config;
pub mod dto;
pub mod errors;

mod handlers;
mod middlewares;

#[derive(Clone)]
pub struct AppState<C: CatalogClient> {
  pub config: Config,
  pub prometheus: Option<PrometheusHandle>,
  pub catalog: CatalogService<C>,
  /// Client for proxied images, which do not carry the catalog credentials.
  pub http: reqwest::Client,
}

impl<C: CatalogClient> AppState<C> {
  pub fn new(config: Config, client: C) -> anyhow::Result<AppState<C>> {
    let http = reqwest::Client::builder().build().context("could not build image proxy client")?;

    Ok(AppState {
      config,
      prometheus: None,
      catalog: CatalogService::new(client),
      http,
    })
  }
}

pub fn routes(config: &Config) -> anyhow::Result<Router> {
  let client = RebrickableClient::new(&config.rebrickable_base_url, &config.rebrickable_api_key)?;

  let prometheus = match config.enable_prometheus {
    true => Some(trace::build_prometheus()?),
    false => None,
  };

  let state = AppState {
    prometheus,
    ..AppState::new(config.clone(), client)?
  };

  Ok(router(state))
}

pub fn router<C: CatalogClient>(state: AppState<C>) -> Router {
  let lego = Router::new()
    .route("/themes", get(handlers::list_themes::<C>))
    .route("/themes/{theme_id}/cover", get(handlers::theme_cover::<C>))
    .route("/sets", get(handlers::missing_theme_id))
    .route("/sets/", get(handlers::missing_theme_id))
    .route("/sets/{theme_id}", get(handlers::list_sets::<C>))
    .route("/image-proxy", get(handlers::image_proxy::<C>));

  Router::new()
    .nest("/api/lego", lego)
    .fallback(handlers::not_found)
    .layer(middleware::from_fn(middlewares::metrics))
    .layer(TraceLayer::new_for_http().make_span_with(middlewares::create_request_span))
    // The routes below will not go through the observability middlewares above
    .route("/", get(handlers::healthz))
    .route("/metrics", get(handlers::prometheus::<C>))
    .layer(middleware::from_fn(middlewares::logging::api_logger))
    .layer(middleware::from_fn(middlewares::request_id))
    .layer(CorsLayer::permissive())
    .with_state(state)
}
