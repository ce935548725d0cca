use std::collections::BTreeMap;

use poem::{Endpoint, Middleware, Request, Result};
use sentry::protocol::{Context, Value};

/// Tags Sentry events with the request they happened in.
pub struct SentryMiddleware;

impl<E: Endpoint> Middleware<E> for SentryMiddleware {
    type Output = SentryMiddlewareImpl<E>;

    fn transform(&self, ep: E) -> Self::Output {
        SentryMiddlewareImpl { ep }
    }
}

pub struct SentryMiddlewareImpl<E> {
    ep: E,
}

#[poem::async_trait]
impl<E: Endpoint> Endpoint for SentryMiddlewareImpl<E> {
    type Output = E::Output;

    async fn call(&self, request: Request) -> Result<Self::Output> {
        sentry::configure_scope(|scope| {
            scope.set_tag("app", "web");
            scope.set_tag("request.method", request.method().as_str());
            scope.set_tag("request.path", request.uri().path());

            if let Some(query) = request.uri().query() {
                scope.set_context("query", Context::Other(query_context(query)));
            }
        });
        self.ep.call(request).await
    }
}

/// Decoded query parameters, or the raw string when it is malformed.
fn query_context(query: &str) -> BTreeMap<String, Value> {
    match serde_urlencoded::from_str::<Vec<(String, String)>>(query) {
        Ok(pairs) => pairs
            .into_iter()
            .map(|(name, value)| (name, Value::from(value)))
            .collect(),
        Err(_) => BTreeMap::from([("raw".to_string(), Value::from(query))]),
    }
}
