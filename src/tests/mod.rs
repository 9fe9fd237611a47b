
use axum_test::TestServer;

use crate::{
  api::{AppState, config::Config, router},
  upstream::mock::MockedRebrickable,
};

pub(crate) fn server(client: MockedRebrickable) -> TestServer {
  TestServer::new(router(AppState::new(Config::default(), client).unwrap())).unwrap()
}
