//! Logging to the console and to Sentry.

use std::borrow::Cow;

use sentry::integrations::tracing::EventFilter;
use sentry::{ClientInitGuard, ClientOptions};
use tracing::{Level, Metadata};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

use crate::prelude::*;

/// Console log filter, `house_price_dashboard=info` by default.
const LOG_ENV: &str = "HOUSE_PRICES_LOG";

/// Filter for what reaches Sentry, `house_price_dashboard=debug` by default.
const SENTRY_LOG_ENV: &str = "HOUSE_PRICES_SENTRY_LOG";

/// Initialises Sentry and installs the global subscriber.
///
/// Sentry stays disabled without a DSN, but its layer is still installed: failed fits and
/// server errors then end up in the console only.
pub fn init(sentry_dsn: Option<String>, traces_sample_rate: f32) -> Result<ClientInitGuard> {
    let guard = sentry::init((
        sentry_dsn,
        ClientOptions {
            release: Some(Cow::Borrowed(env!("CARGO_PKG_VERSION"))),
            traces_sample_rate,
            ..Default::default()
        },
    ));

    let sentry_layer = sentry::integrations::tracing::layer()
        .event_filter(sentry_event_filter)
        .span_filter(|metadata| metadata.level() <= &Level::INFO)
        .with_filter(env_filter(SENTRY_LOG_ENV, "debug")?);
    let format_layer = tracing_subscriber::fmt::layer()
        .without_time()
        .with_filter(env_filter(LOG_ENV, "info")?);

    if let Err(error) = tracing_subscriber::Registry::default()
        .with(sentry_layer)
        .with(format_layer)
        .try_init()
    {
        // Tests initialise tracing once per test, in the same process.
        debug!("keeping the installed subscriber: {:#}", error);
    }

    Ok(guard)
}

/// Failed fits and server errors become Sentry events, everything else is a breadcrumb.
fn sentry_event_filter(metadata: &Metadata) -> EventFilter {
    if metadata.level() <= &Level::WARN {
        EventFilter::Event
    } else {
        EventFilter::Breadcrumb
    }
}

fn env_filter(variable: &str, default_level: &str) -> Result<EnvFilter> {
    EnvFilter::try_from_env(variable)
        .or_else(|_| EnvFilter::try_new(format!("house_price_dashboard={}", default_level)))
        .with_context(|| format!("invalid `{}` filter", variable))
}

pub fn format_elapsed(instant: Instant) -> String {
    humantime::format_duration(instant.elapsed()).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn init_twice_ok() -> Result {
        let _guard = init(None, 0.0)?;
        let _guard = init(None, 0.0)?;
        Ok(())
    }

    #[test]
    fn default_env_filter_ok() -> Result {
        let filter = env_filter("HOUSE_PRICES_UNSET_LOG", "debug")?;
        assert_eq!(filter.to_string(), "house_price_dashboard=debug");
        Ok(())
    }
}
