use std::io::Write;

use metrics_exporter_prometheus::{BuildError, PrometheusBuilder, PrometheusHandle};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, Layer, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use crate::api::config::{Config, Env};

pub fn build_prometheus() -> Result<PrometheusHandle, BuildError> {
  PrometheusBuilder::new().add_global_label("service", "brickstock").install_recorder()
}

/// Installs the global subscriber. Log lines are written on a background
/// thread until the returned guard is dropped.
pub fn init_tracing(config: &Config, writer: impl Write + Send + 'static) -> WorkerGuard {
  let (appender, logging_guard) = tracing_appender::non_blocking(writer);

  let logging_formatter = match config.env {
    #[cfg(not(test))]
    Env::Dev => fmt::layer().compact().with_writer(appender).with_ansi(true).boxed(),
    Env::Production => json_subscriber::layer()
      .with_writer(appender)
      .flatten_event(true)
      .flatten_span_list_on_top_level(true)
      .with_current_span(false)
      .with_span_list(false)
      .boxed(),

    #[cfg(test)]
    Env::Dev => fmt::layer().compact().with_writer(appender).with_ansi(false).boxed(),
  };

  let layers = EnvFilter::builder()
    .try_from_env()
    .or_else(|_| EnvFilter::try_new("info"))
    .unwrap_or_else(|_| EnvFilter::new("info"))
    .and_then(logging_formatter);

  tracing_subscriber::registry().with(layers).init();

  logging_guard
}
