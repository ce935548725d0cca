use clap::Parser;

use crate::opts::{Command, Opts};
use crate::prelude::*;

mod chart;
mod dataset;
mod fit;
mod model;
mod opts;
mod prelude;
mod regression;
mod rupees;
mod tracing;
mod web;

#[tokio::main]
async fn main() -> Result {
    let opts = Opts::parse();
    let _sentry_guard = crate::tracing::init(opts.sentry_dsn, opts.traces_sample_rate)?;

    match opts.subcommand {
        Command::Web(opts) => web::run(opts).await,
        Command::Fit(opts) => fit::run(opts),
    }
}
