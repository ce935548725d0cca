//! One-off fit from the command line.

use crate::chart::ChartData;
use crate::dataset::{Features, HOUSES};
use crate::model::{Model, Prediction};
use crate::opts::FitOpts;
use crate::prelude::*;
use crate::rupees::Rupees;
use crate::tracing::format_elapsed;

pub fn run(opts: FitOpts) -> Result {
    let start_instant = Instant::now();
    let mut chart = ChartData::default();
    let (coefficients, summary) = match Model::fit(&HOUSES, &mut chart) {
        Model::Ready {
            coefficients,
            summary,
        } => (coefficients, summary),
        Model::Failed(error) => {
            return Err(error).context("failed to fit the model");
        }
        Model::Pending => {
            return Err(anyhow!("the model has not been fitted"));
        }
    };

    println!("fitted {} houses in {}", summary.n_observations, format_elapsed(start_instant));
    println!("intercept        {}", Rupees(coefficients.intercept()));
    for (name, weight) in ["size", "bedrooms", "bathrooms"].iter().zip(coefficients.weights()) {
        println!("{:<16} {}", name, Rupees(*weight));
    }
    println!("rmse             {}", Rupees(summary.rmse));
    if let Some(r_squared) = summary.r_squared {
        println!("r²               {:.4}", r_squared);
    }

    if let (Some(size), Some(bedrooms), Some(bathrooms)) = (opts.size, opts.bedrooms, opts.bathrooms)
    {
        let features = Features {
            size,
            bedrooms,
            bathrooms,
        };
        let prediction = Prediction::new(features, coefficients.predict(&features));
        println!("predicted price  {}", prediction.formatted_price);
    }

    Ok(())
}
