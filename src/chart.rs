//! Points handed to the chart, and the series the page draws them as.

use serde::Serialize;

/// Chart point: `x` is the size, `y` is the price.
#[derive(Debug, Copy, Clone, PartialEq, Serialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

/// Receives computed points and draws them. Nothing flows back.
pub trait ChartRenderer {
    /// Called once, when the model has been fitted.
    fn render_fit(&mut self, observed: &[Point], fitted: &[Point]);

    /// Called for every accepted input change.
    fn render_prediction(&mut self, predicted: Point);
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Series {
    pub label: &'static str,
    pub data: Vec<Point>,
}

/// The three series of the price chart, in Chart.js dataset order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartData {
    pub observed: Series,
    pub fitted: Series,
    pub predicted: Series,
}

impl Default for ChartData {
    fn default() -> Self {
        Self {
            observed: Series {
                label: "Existing Houses",
                data: Vec::new(),
            },
            fitted: Series {
                label: "Regression Line",
                data: Vec::new(),
            },
            predicted: Series {
                label: "Predicted House",
                data: Vec::new(),
            },
        }
    }
}

impl ChartRenderer for ChartData {
    fn render_fit(&mut self, observed: &[Point], fitted: &[Point]) {
        self.observed.data = observed.to_vec();
        self.fitted.data = fitted.to_vec();
    }

    fn render_prediction(&mut self, predicted: Point) {
        self.predicted.data = vec![predicted];
    }
}
