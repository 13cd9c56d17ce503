use std::time::Duration;

use axum::{
    extract::MatchedPath,
    http::{header, Request, Response},
};
use tower_http::trace::{MakeSpan, OnResponse};
use tracing::{field::Empty, Level, Span};

/// Field on the request span the home page fills with the feed's phase.
pub(crate) const FEED_PHASE_FIELD: &str = "feed.phase";

/// One `server.request` span per request, named after the matched route.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Tracer;

impl<Body> MakeSpan<Body> for Tracer {
    fn make_span(&mut self, request: &Request<Body>) -> Span {
        let route = request
            .extensions()
            .get::<MatchedPath>()
            .map_or("unmatched", MatchedPath::as_str);
        let span_name = format!("{} {route}", request.method());

        tracing::span!(
            Level::INFO,
            "server.request",
            otel.name = %span_name,
            http.route = route,
            http.request.method = %request.method(),
            url.path = %request.uri().path(),
            user_agent.original = request
                .headers()
                .get(header::USER_AGENT)
                .and_then(|h| h.to_str().ok()),
            http.response.status_code = Empty,
            feed.phase = Empty,
        )
    }
}

impl<Body> OnResponse<Body> for Tracer {
    fn on_response(self, response: &Response<Body>, latency: Duration, span: &Span) {
        let status = response.status();
        span.record("http.response.status_code", status.as_u16());

        let latency_ms = u64::try_from(latency.as_millis()).unwrap_or(u64::MAX);
        if status.is_server_error() {
            tracing::warn!(status = status.as_u16(), latency_ms, "Request failed");
        } else {
            tracing::info!(status = status.as_u16(), latency_ms, "Request finished");
        }
    }
}

#[cfg(test)]
mod tests {
    use std::{
        collections::HashMap,
        sync::{Arc, Mutex},
    };

    use axum::{body::Body, Router};
    use tower::ServiceExt;
    use tracing::{
        field::{Field, Visit},
        span, Subscriber,
    };
    use tracing_subscriber::{
        layer::{Context, SubscriberExt},
        registry::LookupSpan,
        Layer,
    };

    use super::*;
    use crate::{
        http_server::routes::make_router,
        test_helpers::{closed_endpoint, test_config, GatedSource},
        AppState,
    };

    /// Every field recorded on a `server.request` span, by name.
    #[derive(Clone, Default)]
    struct RequestFields(Arc<Mutex<HashMap<String, String>>>);

    impl RequestFields {
        fn get(&self, name: &str) -> Option<String> {
            self.0.lock().unwrap().get(name).cloned()
        }
    }

    impl Visit for RequestFields {
        fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
            self.0
                .lock()
                .unwrap()
                .insert(field.name().to_string(), format!("{value:?}"));
        }

        fn record_str(&mut self, field: &Field, value: &str) {
            self.0
                .lock()
                .unwrap()
                .insert(field.name().to_string(), value.to_string());
        }
    }

    impl<S> Layer<S> for RequestFields
    where
        S: Subscriber + for<'a> LookupSpan<'a>,
    {
        fn on_new_span(&self, attrs: &span::Attributes<'_>, _id: &span::Id, _ctx: Context<'_, S>) {
            if attrs.metadata().name() == "server.request" {
                attrs.record(&mut self.clone());
            }
        }

        fn on_record(&self, id: &span::Id, values: &span::Record<'_>, ctx: Context<'_, S>) {
            if ctx
                .span(id)
                .is_some_and(|span| span.name() == "server.request")
            {
                values.record(&mut self.clone());
            }
        }
    }

    fn traced(app: Router) -> Router {
        app.layer(
            tower_http::trace::TraceLayer::new_for_http()
                .make_span_with(Tracer)
                .on_response(Tracer),
        )
    }

    #[tokio::test]
    async fn home_request_span_carries_route_and_feed_phase() {
        let fields = RequestFields::default();
        let _guard =
            tracing::subscriber::set_default(tracing_subscriber::registry().with(fields.clone()));

        let (source, _gate) = GatedSource::new();
        let state = AppState::with_source(test_config(closed_endpoint()), source);
        let app = traced(make_router().with_state(state));

        let response = app
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status().as_u16(), 200);
        assert_eq!(fields.get("http.route").as_deref(), Some("/"));
        assert_eq!(fields.get("otel.name").as_deref(), Some("GET /"));
        assert_eq!(fields.get(FEED_PHASE_FIELD).as_deref(), Some("pending"));
        assert_eq!(fields.get("http.response.status_code").as_deref(), Some("200"));
    }

    #[tokio::test]
    async fn unknown_paths_are_traced_as_unmatched() {
        let fields = RequestFields::default();
        let _guard =
            tracing::subscriber::set_default(tracing_subscriber::registry().with(fields.clone()));

        let (source, _gate) = GatedSource::new();
        let state = AppState::with_source(test_config(closed_endpoint()), source);
        let app = traced(make_router().with_state(state));

        let response = app
            .oneshot(Request::builder().uri("/nope").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status().as_u16(), 404);
        assert_eq!(fields.get("http.route").as_deref(), Some("unmatched"));
        assert_eq!(fields.get(FEED_PHASE_FIELD), None);
    }
}
