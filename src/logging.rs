use error_stack::{Result, ResultExt};
use thiserror::Error;
use tracing::level_filters::LevelFilter;
use tracing::{Event, Subscriber};
use tracing_subscriber::fmt::format::{Compact, Format, Full, Pretty, Writer};
use tracing_subscriber::fmt::time::ChronoUtc;
use tracing_subscriber::fmt::{self, FmtContext, FormatEvent, FormatFields};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::{EnvFilter, Layer};

use crate::config::{Logging, LoggingStyle};

#[derive(Debug, Error)]
#[error("Failed to initialize logging")]
pub struct LoggingInitError;

pub fn init(cfg: &Logging) -> Result<(), LoggingInitError> {
    let targets = if cfg.targets.is_empty() {
        std::env::var("RUST_LOG").unwrap_or_default()
    } else {
        cfg.targets.clone()
    };

    let layer = fmt::layer()
        .event_format(Formatter::from_style(cfg.style, true))
        .with_filter(make_env_filter(&targets));

    let registry = tracing_subscriber::Registry::default().with(layer);
    tracing::subscriber::set_global_default(registry)
        .change_context(LoggingInitError)
        .attach_printable("already initialized logging")?;

    if !cfg.targets.is_empty() && std::env::var("RUST_LOG").is_ok() {
        tracing::warn!("Both `RUST_LOG` and `logging.targets` are set, using `logging.targets`");
    }

    Ok(())
}

/// Sends logs to the test harness. Can be called from every test.
pub fn init_for_tests() {
    let targets = std::env::var("RUST_LOG").unwrap_or_default();
    let layer = fmt::layer()
        .event_format(Formatter::from_style(LoggingStyle::Full, false))
        .with_test_writer()
        .with_filter(make_env_filter(&targets));

    let registry = tracing_subscriber::Registry::default().with(layer);
    tracing::subscriber::set_global_default(registry).ok();
}

fn make_env_filter(targets: &str) -> EnvFilter {
    let default_level = if cfg!(debug_assertions) {
        LevelFilter::DEBUG
    } else {
        LevelFilter::INFO
    };

    EnvFilter::builder()
        .with_default_directive(default_level.into())
        .parse_lossy(targets)
}

enum Formatter {
    Full(Format<Full, ChronoUtc>),
    Pretty(Format<Pretty, ChronoUtc>),
    Compact(Format<Compact, ChronoUtc>),
}

impl Formatter {
    fn from_style(style: LoggingStyle, ansi: bool) -> Self {
        let default = fmt::format()
            .with_timer(ChronoUtc::new("%Y-%m-%dT%H:%M:%S%.3f".to_string()))
            .with_ansi(ansi);

        match style {
            LoggingStyle::Compact => Self::Compact(default.compact()),
            LoggingStyle::Full => Self::Full(default),
            LoggingStyle::Pretty => Self::Pretty(default.pretty()),
        }
    }
}

impl<S, N> FormatEvent<S, N> for Formatter
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        ctx: &FmtContext<'_, S, N>,
        writer: Writer<'_>,
        event: &Event<'_>,
    ) -> std::fmt::Result {
        match self {
            Formatter::Full(fmt) => fmt.format_event(ctx, writer, event),
            Formatter::Pretty(fmt) => fmt.format_event(ctx, writer, event),
            Formatter::Compact(fmt) => fmt.format_event(ctx, writer, event),
        }
    }
}
