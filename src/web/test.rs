use poem::test::TestClient;
use poem::{Endpoint, Response};
use sentry::ClientInitGuard;

use crate::dataset::HOUSES;
use crate::prelude::Result;
use crate::web::create_app;
use crate::web::state::Dashboard;

pub fn create_standalone_test_client(
) -> Result<(ClientInitGuard, TestClient<impl Endpoint<Output = Response>>)> {
    let sentry_guard = crate::tracing::init(None, 0.0)?;
    let app = create_app(Dashboard::new(&HOUSES));
    Ok((sentry_guard, TestClient::new(app)))
}
