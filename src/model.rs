//! Fitted model state and the input change rule built on top of it.

use itertools::Itertools;
use serde::Serialize;

pub use self::query::RawQuery;
use crate::chart::{ChartRenderer, Point};
use crate::dataset::{design_matrix, target_vector, Features, Observation};
use crate::prelude::*;
use crate::regression::{self, Coefficients, FitError, FitSummary};
use crate::rupees::Rupees;
use crate::tracing::format_elapsed;

mod query;

/// Result of the one-off fit.
#[derive(Debug, Clone)]
pub enum Model {
    /// Not fitted yet: predictions are skipped.
    Pending,

    Ready {
        coefficients: Coefficients,
        summary: FitSummary,
    },

    /// The fit failed: predictions are skipped and the error is reported.
    Failed(FitError),
}

impl Model {
    /// Fits the observations and, on success, renders them along with the regression line.
    #[instrument(skip_all, fields(n_observations = observations.len()))]
    pub fn fit(observations: &[Observation], renderer: &mut impl ChartRenderer) -> Self {
        let start_instant = Instant::now();
        let x = design_matrix(observations);
        let y = target_vector(observations);

        let coefficients = match regression::fit_rows(&x, &y) {
            Ok(coefficients) => coefficients,
            Err(error) => {
                error!("failed to fit the model: {:#}", error);
                return Self::Failed(error);
            }
        };
        let summary = FitSummary::new(&coefficients, &x, &y);
        info!(
            coefficients = ?coefficients.as_slice(),
            rmse = summary.rmse,
            r_squared = ?summary.r_squared,
            elapsed = %format_elapsed(start_instant),
            "fitted"
        );

        let observed = observations
            .iter()
            .map(|observation| Point {
                x: observation.size,
                y: observation.price,
            })
            .collect_vec();
        let fitted = observations
            .iter()
            .sorted_by(|lhs, rhs| lhs.size.total_cmp(&rhs.size))
            .map(|observation| Point {
                x: observation.size,
                y: coefficients.predict(&observation.features()),
            })
            .collect_vec();
        renderer.render_fit(&observed, &fitted);

        Self::Ready {
            coefficients,
            summary,
        }
    }

    pub fn coefficients(&self) -> Option<&Coefficients> {
        match self {
            Self::Ready { coefficients, .. } => Some(coefficients),
            Self::Pending | Self::Failed(_) => None,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Prediction {
    #[serde(flatten)]
    pub features: Features,

    pub price: f64,
    pub formatted_price: String,
}

impl Prediction {
    pub fn new(features: Features, price: f64) -> Self {
        Self {
            features,
            price,
            formatted_price: Rupees(price).to_string(),
        }
    }

    pub const fn point(&self) -> Point {
        Point {
            x: self.features.size,
            y: self.price,
        }
    }
}

/// Recomputes the prediction when the inputs are valid and the model is ready.
///
/// Otherwise does nothing: the renderer is not called and the last prediction stays on display.
pub fn on_input_change(
    model: &Model,
    query: &RawQuery,
    renderer: &mut impl ChartRenderer,
) -> Option<Prediction> {
    let coefficients = match model.coefficients() {
        Some(coefficients) => coefficients,
        None => {
            debug!("the model is not ready, skipping");
            return None;
        }
    };
    let features = match query.parse() {
        Some(features) => features,
        None => {
            debug!(?query, "invalid input, skipping");
            return None;
        }
    };
    let price = coefficients.predict(&features);
    if !price.is_finite() {
        debug!(?features, price, "non-finite prediction, skipping");
        return None;
    }

    let prediction = Prediction::new(features, price);
    renderer.render_prediction(prediction.point());
    Some(prediction)
}
