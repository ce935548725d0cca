pub use std::sync::Arc;
pub use std::time::Instant;

pub use anyhow::{anyhow, Context};
pub use tracing::{debug, error, info, instrument};

pub type Result<T = (), E = anyhow::Error> = std::result::Result<T, E>;
