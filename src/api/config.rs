use std::{
  env::{self, VarError},
  fmt::Display,
  net::{IpAddr, Ipv4Addr, SocketAddr},
  str::FromStr,
};

use crate::api::errors::AppError;

const DEFAULT_LISTEN_ADDR: SocketAddr = SocketAddr::new(IpAddr::V4(Ipv4Addr::UNSPECIFIED), 3000);

#[derive(Clone, Debug)]
pub struct Config {
  pub env: Env,
  pub listen_addr: SocketAddr,

  // Rebrickable
  pub rebrickable_api_key: String,
  pub rebrickable_base_url: String,

  // Observability
  pub enable_prometheus: bool,
}

impl Default for Config {
  fn default() -> Self {
    Config {
      env: Env::Dev,
      listen_addr: DEFAULT_LISTEN_ADDR,
      rebrickable_api_key: String::new(),
      rebrickable_base_url: String::new(),
      enable_prometheus: false,
    }
  }
}

impl Config {
  pub fn from_env() -> Result<Config, AppError> {
    let config = Config {
      env: Env::from(env::var("ENV").unwrap_or("dev".into())),
      listen_addr: parse_env("LISTEN_ADDR", DEFAULT_LISTEN_ADDR)?,
      rebrickable_api_key: env::var("REBRICKABLE_API_KEY").unwrap_or_default(),
      rebrickable_base_url: env::var("REBRICKABLE_BASE_URL").unwrap_or_default(),
      enable_prometheus: env::var("ENABLE_PROMETHEUS").unwrap_or_default() == "1",
    };

    Ok(config)
  }

  /// Whether both upstream settings are present. Missing ones are not fatal, catalog calls fail at request time instead.
  pub fn has_upstream(&self) -> bool {
    !self.rebrickable_api_key.is_empty() && !self.rebrickable_base_url.is_empty()
  }
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Env {
  Dev,
  Production,
}

impl From<String> for Env {
  fn from(value: String) -> Self {
    match value.as_ref() {
      "dev" => Env::Dev,
      "production" => Env::Production,
      _ => Env::Dev,
    }
  }
}

pub fn parse_env<T>(name: &str, default: T) -> Result<T, AppError>
where
  T: FromStr,
  T::Err: Display,
{
  match env::var(name) {
    Ok(value) if value.is_empty() => Ok(default),
    Ok(value) => value.parse::<T>().map_err(|err| AppError::ConfigError(format!("could not read {name}: {err}"))),
    Err(err) => match err {
      VarError::NotPresent => Ok(default),
      _ => Err(AppError::ConfigError(format!("could not read {name}: {err}"))),
    },
  }
}
