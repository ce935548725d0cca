use std::net::IpAddr;
use std::str::FromStr;

use poem::listener::TcpListener;
use poem::middleware::{CatchPanic, Tracing};
use poem::{get, Endpoint, EndpointExt, Response, Route, Server};

use crate::dataset::HOUSES;
use crate::opts::WebOpts;
use crate::prelude::*;
use crate::web::middleware::{ErrorMiddleware, SecurityHeadersMiddleware, SentryMiddleware};
use crate::web::state::Dashboard;

mod middleware;
mod partials;
pub mod state;
#[cfg(test)]
pub mod test;
mod views;

/// Fits the model and serves the dashboard.
pub async fn run(opts: WebOpts) -> Result {
    let dashboard = Dashboard::new(&HOUSES);
    let app = create_app(dashboard);
    info!(host = opts.host.as_str(), port = opts.port, "listening…");
    Server::new(TcpListener::bind((IpAddr::from_str(&opts.host)?, opts.port)))
        .run(app)
        .await
        .context("the web server has failed")?;
    Ok(())
}

pub fn create_app(dashboard: Dashboard) -> impl Endpoint<Output = Response> {
    Route::new()
        .at("/", get(views::index::get))
        .at("/predict", get(views::predict::get))
        .at("/health", get(views::api::get_health))
        .data(Arc::new(dashboard))
        .with(Tracing)
        .with(CatchPanic::new())
        .with(ErrorMiddleware)
        .with(SecurityHeadersMiddleware)
        .with(SentryMiddleware)
}
