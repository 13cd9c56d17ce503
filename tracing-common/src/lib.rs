use std::{collections::HashMap, time::Duration};

use color_eyre::{eyre::WrapErr, Result};
use opentelemetry_otlp::WithExportConfig;
use sentry::ClientInitGuard;
use tracing_opentelemetry::OpenTelemetryLayer;
use tracing_subscriber::{prelude::*, EnvFilter, Registry};
use tracing_tree::HierarchicalLayer;

/// Starts Sentry when `SENTRY_DSN` is set. Keep the guard alive for the whole
/// program so queued events are flushed on exit.
pub fn setup_sentry() -> Option<ClientInitGuard> {
    let dsn = std::env::var("SENTRY_DSN").ok()?;

    let traces_sample_rate = std::env::var("SENTRY_TRACES_SAMPLE_RATE")
        .ok()
        .and_then(|rate| rate.parse().ok())
        .unwrap_or(0.0);

    println!("Sentry configured");

    Some(sentry::init((
        dsn.as_str(),
        sentry::ClientOptions {
            release: sentry::release_name!(),
            traces_sample_rate,
            ..Default::default()
        },
    )))
}

pub fn setup_tracing(crate_name: &str) -> Result<()> {
    let rust_log = std::env::var("RUST_LOG").unwrap_or_else(|_| {
        format!("warn,{crate_name}=trace,posts=debug,tracing_common=info,tower_http=debug")
    });

    let env_filter = EnvFilter::builder()
        .parse(&rust_log)
        .wrap_err_with(|| format!("Couldn't create env filter from {rust_log}"))?;

    let opentelemetry_layer = if let Ok(endpoint) = std::env::var("OTEL_EXPORTER_OTLP_ENDPOINT")
    {
        let headers = std::env::var("OTEL_EXPORTER_OTLP_HEADERS")
            .map(|raw| parse_headers(&raw))
            .unwrap_or_default();

        let tracer = opentelemetry_otlp::new_pipeline()
            .tracing()
            .with_exporter(
                opentelemetry_otlp::new_exporter()
                    .http()
                    .with_endpoint(endpoint)
                    .with_timeout(Duration::from_secs(3))
                    .with_headers(headers),
            )
            .install_batch(opentelemetry_sdk::runtime::Tokio)
            .wrap_err("Couldn't install the OTLP pipeline")?;

        println!("OTLP layer configured");

        Some(OpenTelemetryLayer::new(tracer))
    } else {
        println!("Skipping OTLP layer");

        None
    };

    let otlp_enabled = opentelemetry_layer.is_some();

    let heirarchical = HierarchicalLayer::default()
        .with_writer(std::io::stdout)
        .with_indent_lines(true)
        .with_indent_amount(2)
        .with_thread_names(true)
        .with_thread_ids(true)
        .with_verbose_exit(true)
        .with_verbose_entry(true)
        .with_targets(true);

    Registry::default()
        .with(heirarchical)
        .with(opentelemetry_layer)
        .with(sentry_tracing::layer())
        .with(env_filter)
        .try_init()
        .wrap_err("Couldn't install the global tracing subscriber")?;

    tracing::info!(
        filter = %rust_log,
        otlp = otlp_enabled,
        sentry = sentry::Hub::current().client().is_some(),
        "Tracing initialized"
    );

    Ok(())
}

/// Parses `key=value,key2=value2` as used by `OTEL_EXPORTER_OTLP_HEADERS`.
fn parse_headers(raw: &str) -> HashMap<String, String> {
    raw.split(',')
        .filter_map(|pair| {
            let (key, value) = pair.split_once('=')?;
            let key = key.trim();

            (!key.is_empty()).then(|| (key.to_string(), value.trim().to_string()))
        })
        .collect()
}
