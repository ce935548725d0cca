use poem::http::StatusCode;
use poem::{handler, IntoResponse, Response};

use crate::prelude::*;

const CACHE_CONTROL: &str = "no-cache";

#[handler]
#[instrument(skip_all, level = "debug")]
pub async fn get_health() -> impl IntoResponse {
    Response::from(StatusCode::NO_CONTENT).with_header("Cache-Control", CACHE_CONTROL)
}

#[cfg(test)]
mod tests {
    use poem::http::StatusCode;

    use crate::prelude::*;
    use crate::web::test::create_standalone_test_client;

    #[tokio::test]
    async fn get_health_ok() -> Result {
        let (_guard, client) = create_standalone_test_client()?;
        let response = client.get("/health").send().await;
        response.assert_status(StatusCode::NO_CONTENT);
        Ok(())
    }
}
