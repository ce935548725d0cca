use crate::chart::ChartData;
use crate::dataset::Observation;
use crate::model::Model;

/// Everything the handlers need, computed once before the server starts.
pub struct Dashboard {
    pub model: Model,

    /// Observed points and the regression line, as rendered by the fit.
    pub chart: ChartData,
}

impl Dashboard {
    pub fn new(observations: &[Observation]) -> Self {
        let mut chart = ChartData::default();
        let model = Model::fit(observations, &mut chart);
        Self { model, chart }
    }
}
