use std::str::FromStr;

use serde::Deserialize;

use crate::dataset::Features;

/// Form field values exactly as typed by the user.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct RawQuery {
    #[serde(default)]
    pub size: String,

    #[serde(default)]
    pub bedrooms: String,

    #[serde(default)]
    pub bathrooms: String,
}

impl RawQuery {
    /// Returns `None` if any of the fields is empty or not a number.
    pub fn parse(&self) -> Option<Features> {
        let size = f64::from_str(self.size.trim()).ok().filter(|size| size.is_finite())?;
        let bedrooms = u32::from_str(self.bedrooms.trim()).ok()?;
        let bathrooms = u32::from_str(self.bathrooms.trim()).ok()?;
        Some(Features {
            size,
            bedrooms,
            bathrooms,
        })
    }
}
