//! Log line formatter that stamps each event with the wall clock and the current frame number.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use time::macros::format_description;
use time::{format_description::FormatItem, OffsetDateTime};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::{FmtContext, FormatEvent, FormatFields, FormattedFields};
use tracing_subscriber::registry::LookupSpan;

/// Frames run since startup, advanced by the app loop.
static FRAME_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Only the low 16 bits are printed, as four hex digits.
const FRAME_DISPLAY_MASK: u64 = 0xFFFF;

#[cfg(target_os = "emscripten")]
const TIMESTAMP_FORMAT: &[FormatItem<'static>] = format_description!("[hour]:[minute]:[second].[subsecond digits:3]");

#[cfg(not(target_os = "emscripten"))]
const TIMESTAMP_FORMAT: &[FormatItem<'static>] = format_description!("[hour]:[minute]:[second].[subsecond digits:5]");

/// ANSI styling applied to parts of a line when the writer supports it.
#[derive(Clone, Copy)]
enum Style {
    Dim,
    Bold,
    Color(&'static str),
}

impl Style {
    fn code(self) -> &'static str {
        match self {
            Style::Dim => "\x1b[2m",
            Style::Bold => "\x1b[1m",
            Style::Color(code) => code,
        }
    }
}

fn write_styled(writer: &mut Writer<'_>, style: Style, value: impl fmt::Display) -> fmt::Result {
    if writer.has_ansi_escapes() {
        write!(writer, "{}{}\x1b[0m", style.code(), value)
    } else {
        write!(writer, "{}", value)
    }
}

/// The five-character, right-aligned label and color for a level.
pub fn level_label(level: &Level) -> (&'static str, &'static str) {
    match *level {
        Level::TRACE => ("TRACE", "\x1b[35m"),
        Level::DEBUG => ("DEBUG", "\x1b[34m"),
        Level::INFO => (" INFO", "\x1b[32m"),
        Level::WARN => (" WARN", "\x1b[33m"),
        Level::ERROR => ("ERROR", "\x1b[31m"),
    }
}

/// Formats `HH:MM:SS.sssss 0xFRAME LEVEL span{fields}: target: message`.
pub struct CustomFormatter;

impl<S, N> FormatEvent<S, N> for CustomFormatter
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(&self, ctx: &FmtContext<'_, S, N>, mut writer: Writer<'_>, event: &Event<'_>) -> fmt::Result {
        let meta = event.metadata();

        let timestamp = OffsetDateTime::now_utc().format(&TIMESTAMP_FORMAT).map_err(|e| {
            eprintln!("Failed to format timestamp: {}", e);
            fmt::Error
        })?;
        write_styled(&mut writer, Style::Dim, timestamp)?;
        writer.write_char(' ')?;

        write_styled(
            &mut writer,
            Style::Dim,
            format_args!("0x{:04X}", get_tick_count() & FRAME_DISPLAY_MASK),
        )?;
        writer.write_char(' ')?;

        let (label, color) = level_label(meta.level());
        write_styled(&mut writer, Style::Color(color), label)?;
        writer.write_char(' ')?;

        if let Some(scope) = ctx.event_scope() {
            let mut any_span = false;
            for span in scope.from_root() {
                any_span = true;
                write_styled(&mut writer, Style::Bold, span.metadata().name())?;

                let extensions = span.extensions();
                if let Some(fields) = extensions.get::<FormattedFields<N>>() {
                    if !fields.is_empty() {
                        write_styled(&mut writer, Style::Bold, "{")?;
                        write!(writer, "{}", fields)?;
                        write_styled(&mut writer, Style::Bold, "}")?;
                    }
                }
                write_styled(&mut writer, Style::Dim, ":")?;
            }
            if any_span {
                writer.write_char(' ')?;
            }
        }

        write_styled(&mut writer, Style::Dim, format_args!("{}:", meta.target()))?;
        writer.write_char(' ')?;

        ctx.format_fields(writer.by_ref(), event)?;
        writeln!(writer)
    }
}

/// Advance the frame counter shown in log lines. Called once per frame by the app loop.
pub fn increment_tick() {
    FRAME_COUNTER.fetch_add(1, Ordering::Relaxed);
}

pub fn get_tick_count() -> u64 {
    FRAME_COUNTER.load(Ordering::Relaxed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_labels_are_aligned() {
        for level in [Level::TRACE, Level::DEBUG, Level::INFO, Level::WARN, Level::ERROR] {
            let (label, color) = level_label(&level);
            assert_eq!(label.len(), 5);
            assert!(color.starts_with("\x1b["));
        }
    }

    #[test]
    fn test_tick_counter_advances() {
        let before = get_tick_count();
        increment_tick();
        assert!(get_tick_count() > before);
    }
}
