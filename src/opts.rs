//! CLI options.

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub struct Opts {
    /// Sentry DSN
    #[arg(short, long, env = "SENTRY_DSN")]
    pub sentry_dsn: Option<String>,

    /// Performance monitoring sample rate for Sentry
    #[arg(long, default_value = "0.1", env = "HOUSE_PRICES_TRACES_SAMPLE_RATE")]
    pub traces_sample_rate: f32,

    #[command(subcommand)]
    pub subcommand: Command,
}

#[derive(Subcommand)]
pub enum Command {
    Web(WebOpts),
    Fit(FitOpts),
}

/// Runs the web application
#[derive(Args)]
pub struct WebOpts {
    /// Web application bind host
    #[arg(long, default_value = "::", env = "HOUSE_PRICES_HOST")]
    pub host: String,

    /// Web application bind port
    #[arg(short, long, default_value = "8081", env = "HOUSE_PRICES_PORT")]
    pub port: u16,
}

/// Fits the model, prints the coefficients and, optionally, a prediction
#[derive(Args)]
pub struct FitOpts {
    /// House size in square feet
    #[arg(long, requires_all = ["bedrooms", "bathrooms"])]
    pub size: Option<f64>,

    #[arg(long, requires_all = ["size", "bathrooms"])]
    pub bedrooms: Option<u32>,

    #[arg(long, requires_all = ["size", "bedrooms"])]
    pub bathrooms: Option<u32>,
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn verify_ok() {
        Opts::command().debug_assert();
    }

    #[test]
    fn parse_web_ok() -> crate::prelude::Result {
        let opts = Opts::try_parse_from(["house-price-dashboard", "web", "--port", "9000"])?;
        match opts.subcommand {
            Command::Web(opts) => {
                assert_eq!(opts.port, 9000);
                assert_eq!(opts.host, "::");
            }
            Command::Fit(_) => unreachable!(),
        }
        Ok(())
    }

    #[test]
    fn parse_partial_fit_query_fails_ok() {
        assert!(Opts::try_parse_from(["house-price-dashboard", "fit", "--size", "1000"]).is_err());
    }
}
