//! Seed housing dataset and its regression inputs.

use serde::Serialize;

/// Number of design matrix columns: the intercept followed by the three features.
pub const N_COLUMNS: usize = 4;

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Observation {
    /// Square feet.
    pub size: f64,
    pub bedrooms: u32,
    pub bathrooms: u32,

    /// Price in INR.
    pub price: f64,
}

impl Observation {
    const fn new(size: f64, bedrooms: u32, bathrooms: u32, price: f64) -> Self {
        Self {
            size,
            bedrooms,
            bathrooms,
            price,
        }
    }

    pub const fn features(&self) -> Features {
        Features {
            size: self.size,
            bedrooms: self.bedrooms,
            bathrooms: self.bathrooms,
        }
    }
}

/// Example houses with prices in INR.
pub static HOUSES: [Observation; 7] = [
    Observation::new(500.0, 2, 1, 12_000_000.0),
    Observation::new(700.0, 3, 1, 15_000_000.0),
    Observation::new(1000.0, 3, 2, 18_000_000.0),
    Observation::new(1200.0, 4, 2, 21_000_000.0),
    Observation::new(1500.0, 4, 3, 25_000_000.0),
    Observation::new(1800.0, 5, 3, 28_000_000.0),
    Observation::new(2000.0, 5, 4, 32_000_000.0),
];

/// Predictor input, in the design matrix column order.
#[derive(Debug, Copy, Clone, PartialEq, Serialize)]
pub struct Features {
    pub size: f64,
    pub bedrooms: u32,
    pub bathrooms: u32,
}

impl Features {
    /// Design matrix row: the intercept term is prepended.
    pub fn row(&self) -> [f64; N_COLUMNS] {
        [1.0, self.size, f64::from(self.bedrooms), f64::from(self.bathrooms)]
    }
}

/// Builds the rows `[1, size, bedrooms, bathrooms]`, one per observation.
pub fn design_matrix(observations: &[Observation]) -> Vec<[f64; N_COLUMNS]> {
    observations
        .iter()
        .map(|observation| observation.features().row())
        .collect()
}

/// Prices, index-aligned with [`design_matrix`].
pub fn target_vector(observations: &[Observation]) -> Vec<f64> {
    observations
        .iter()
        .map(|observation| observation.price)
        .collect()
}
