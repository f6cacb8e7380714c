use colored::*;
use indicatif::ProgressStyle;
use tracing::{Event, Level, Subscriber};
use tracing_indicatif::IndicatifLayer;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::FormatEvent;
use tracing_subscriber::fmt::format::{self, Writer};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::util::SubscriberInitExt;

/// Renders events as classic scanner output: a colored level glyph,
/// then the message. No timestamps, no targets.
pub struct KnockrFormatter;

fn level_glyph(level: Level) -> (&'static str, fn(ColoredString) -> ColoredString) {
    match level {
        Level::TRACE => ("[ ]", |s| s.dimmed()),
        Level::DEBUG => ("[?]", |s| s.blue()),
        Level::INFO => ("[+]", |s| s.green().bold()),
        Level::WARN => ("[*]", |s| s.yellow().bold()),
        Level::ERROR => ("[-]", |s| s.red().bold()),
    }
}

impl<S, N> FormatEvent<S, N> for KnockrFormatter
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> format::FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        ctx: &tracing_subscriber::fmt::FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> std::fmt::Result {
        let (glyph, colorize) = level_glyph(*event.metadata().level());

        write!(writer, "{} ", colorize(glyph.into()))?;
        ctx.field_format().format_fields(writer.by_ref(), event)?;
        writeln!(writer)
    }
}

/// Installs the subscriber stack: env-filter, the knockr formatter,
/// and the indicatif layer so log lines never tear a progress bar.
pub fn init(quiet: u8) {
    let default_directive = if quiet >= 2 { "warn" } else { "info" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive));

    let style = ProgressStyle::with_template(
        "{spinner:.green} {msg} {wide_bar:.green/black} {pos}/{len}",
    )
    .unwrap();

    let indicatif_layer = IndicatifLayer::new().with_progress_style(style);
    let log_writer = indicatif_layer.get_stderr_writer();

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .event_format(KnockrFormatter)
                .with_writer(log_writer),
        )
        .with(indicatif_layer)
        .init();
}
