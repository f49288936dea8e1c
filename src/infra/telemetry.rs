use std::sync::Once;

use metrics::{Unit, describe_counter, describe_histogram};
use tracing_error::ErrorLayer;
use tracing_subscriber::{
    EnvFilter, fmt,
    layer::{Layer, SubscriberExt},
    util::SubscriberInitExt,
};

use crate::application::{compose::METRIC_COMPOSE_SUBMISSIONS, review::METRIC_REVIEW_DECISIONS};
use crate::config::{LogFormat, LoggingSettings};

use super::error::InfraError;

pub const METRIC_HTTP_RESPONSE_MS: &str = "inkpost_http_response_ms";

static METRIC_DESCRIPTIONS: Once = Once::new();

/// Install a global tracing subscriber using the provided logging settings.
pub fn init(logging: &LoggingSettings) -> Result<(), InfraError> {
    describe_metrics();

    let env_filter = EnvFilter::builder()
        .with_default_directive(logging.level.into())
        .from_env_lossy();

    let fmt_layer = match logging.format {
        LogFormat::Json => fmt::layer()
            .json()
            .with_current_span(true)
            .with_span_list(true)
            .with_target(true)
            .boxed(),
        LogFormat::Compact => fmt::layer().compact().with_target(true).boxed(),
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(ErrorLayer::default())
        .with(fmt_layer)
        .try_init()
        .map_err(|err| {
            InfraError::telemetry(format!("failed to install tracing subscriber: {err}"))
        })
}

fn describe_metrics() {
    METRIC_DESCRIPTIONS.call_once(|| {
        describe_counter!(
            METRIC_REVIEW_DECISIONS,
            Unit::Count,
            "Review decisions applied, labelled by decision."
        );
        describe_counter!(
            METRIC_COMPOSE_SUBMISSIONS,
            Unit::Count,
            "Posts submitted for review."
        );
        describe_histogram!(
            METRIC_HTTP_RESPONSE_MS,
            Unit::Milliseconds,
            "HTTP response latency in milliseconds."
        );
    });
}
