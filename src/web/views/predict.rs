use poem::http::StatusCode;
use poem::web::{Data, Json, Query};
use poem::{handler, IntoResponse, Response};
use serde::Serialize;

use crate::chart::{ChartData, Series};
use crate::model::{on_input_change, Model, Prediction, RawQuery};
use crate::prelude::*;
use crate::web::state::Dashboard;

const CACHE_CONTROL: &str = "no-store";

#[derive(Serialize)]
struct PredictResponse {
    #[serde(flatten)]
    prediction: Prediction,

    /// Replacement for the «Predicted House» dataset.
    predicted: Series,
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
}

/// Runs the input change rule for the current form values.
///
/// Responds with `204 No Content` when there is nothing to update.
#[handler]
#[instrument(skip_all, level = "debug")]
pub async fn get(
    Query(query): Query<RawQuery>,
    dashboard: Data<&Arc<Dashboard>>,
) -> Result<Response> {
    if let Model::Failed(error) = &dashboard.model {
        let response = Json(ErrorResponse {
            error: error.to_string(),
        });
        return Ok(response
            .with_status(StatusCode::SERVICE_UNAVAILABLE)
            .with_header("Cache-Control", CACHE_CONTROL)
            .into_response());
    }

    let mut chart = ChartData::default();
    let response = match on_input_change(&dashboard.model, &query, &mut chart) {
        Some(prediction) => {
            debug!(?prediction.features, prediction.price);
            Json(PredictResponse {
                prediction,
                predicted: chart.predicted,
            })
            .into_response()
        }
        None => StatusCode::NO_CONTENT.into_response(),
    };
    Ok(response.with_header("Cache-Control", CACHE_CONTROL).into_response())
}

#[cfg(test)]
mod tests {
    use poem::http::StatusCode;
    use poem::test::TestClient;

    use crate::dataset::HOUSES;
    use crate::prelude::*;
    use crate::web::create_app;
    use crate::web::state::Dashboard;
    use crate::web::test::create_standalone_test_client;

    #[tokio::test]
    async fn predict_ok() -> Result {
        let (_guard, client) = create_standalone_test_client()?;
        let response = client
            .get("/predict")
            .query("size", &"1000")
            .query("bedrooms", &"3")
            .query("bathrooms", &"2")
            .send()
            .await;
        response.assert_status_is_ok();
        response.assert_header("Cache-Control", "no-store");

        let json = response.json().await;
        let value = json.value().object();
        value.get("size").assert_f64(1000.0);
        value.get("bedrooms").assert_i64(3);
        let price = value.get("price").f64();
        assert!((price - 18_000_000.0).abs() < 0.05 * 18_000_000.0, "{price}");
        assert!(value.get("formatted_price").string().starts_with('₹'));
        let point = value.get("predicted").object().get("data").array().get(0).object();
        point.get("x").assert_f64(1000.0);
        Ok(())
    }

    #[tokio::test]
    async fn predict_invalid_input_ok() -> Result {
        let (_guard, client) = create_standalone_test_client()?;
        let response = client
            .get("/predict")
            .query("size", &"")
            .query("bedrooms", &"3")
            .query("bathrooms", &"2")
            .send()
            .await;
        response.assert_status(StatusCode::NO_CONTENT);
        Ok(())
    }

    #[tokio::test]
    async fn predict_missing_fields_ok() -> Result {
        let (_guard, client) = create_standalone_test_client()?;
        let response = client.get("/predict").send().await;
        response.assert_status(StatusCode::NO_CONTENT);
        Ok(())
    }

    #[tokio::test]
    async fn predict_failed_fit_ok() -> Result {
        let _guard = crate::tracing::init(None, 0.0)?;
        let client = TestClient::new(create_app(Dashboard::new(&HOUSES[..2])));
        let response = client
            .get("/predict")
            .query("size", &"1000")
            .query("bedrooms", &"3")
            .query("bathrooms", &"2")
            .send()
            .await;
        response.assert_status(StatusCode::SERVICE_UNAVAILABLE);
        response.assert_header("Cache-Control", "no-store");
        Ok(())
    }
}
