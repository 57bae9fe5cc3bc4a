//! Colorful console output for predicate compilation.
//!
//! Provides a `tracing` layer that formats compiler events with colors.
//!
//! ## Log Levels
//!
//! - **WARN**: Rejected predicates, with the offending condition
//! - **DEBUG**: Compiled predicates
//! - **TRACE**: Cache hits and misses, literal slots

use owo_colors::OwoColorize;
use std::io::{self, Write};
use std::sync::OnceLock;
use tracing::field::{Field, Visit};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::layer::{Context, SubscriberExt};
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

static INIT: OnceLock<()> = OnceLock::new();

/// Initializes console output for compiler events.
///
/// Safe to call multiple times - only the first call has effect. `RUST_LOG`
/// overrides the default `warn` level.
pub fn init() {
    INIT.get_or_init(|| {
        let filter = EnvFilter::builder()
            .with_default_directive(LevelFilter::WARN.into())
            .from_env_lossy();

        let _ = tracing_subscriber::registry()
            .with(filter)
            .with(ConsoleLayer)
            .try_init();
    });
}

/// A tracing layer that formats compiler events with colors.
pub struct ConsoleLayer;

impl<S: Subscriber> Layer<S> for ConsoleLayer {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let metadata = event.metadata();
        if !metadata.target().starts_with("condforge") {
            return;
        }

        let mut visitor = EventVisitor::default();
        event.record(&mut visitor);

        if let Some(output) = format_event(&visitor, *metadata.level()) {
            let _ = writeln!(io::stderr(), "{}", output);
        }
    }
}

#[derive(Default)]
struct EventVisitor {
    event: Option<String>,
    target_type: Option<String>,
    conditions: Option<u64>,
    type_guard: Option<bool>,
    error: Option<String>,
    ty: Option<String>,
    literal: Option<String>,
}

impl Visit for EventVisitor {
    fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
        let s = format!("{:?}", value);
        let s = s.trim_matches('"').to_string();
        match field.name() {
            "event" => self.event = Some(s),
            "target_type" => self.target_type = Some(s),
            "error" => self.error = Some(s),
            "ty" => self.ty = Some(s),
            "literal" => self.literal = Some(s),
            _ => {}
        }
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        match field.name() {
            "event" => self.event = Some(value.to_string()),
            "target_type" => self.target_type = Some(value.to_string()),
            "error" => self.error = Some(value.to_string()),
            "ty" => self.ty = Some(value.to_string()),
            "literal" => self.literal = Some(value.to_string()),
            _ => {}
        }
    }

    fn record_u64(&mut self, field: &Field, value: u64) {
        if field.name() == "conditions" {
            self.conditions = Some(value);
        }
    }

    fn record_i64(&mut self, field: &Field, value: i64) {
        self.record_u64(field, value.max(0) as u64);
    }

    fn record_bool(&mut self, field: &Field, value: bool) {
        if field.name() == "type_guard" {
            self.type_guard = Some(value);
        }
    }
}

fn format_event(v: &EventVisitor, level: Level) -> Option<String> {
    let target = v.target_type.as_deref().unwrap_or("?");

    let line = match v.event.as_deref()? {
        "predicate_compiled" => {
            let count = v.conditions.unwrap_or(0);
            let guard = if v.type_guard == Some(true) {
                ", type guard"
            } else {
                ""
            };
            format!(
                "{} {} {}",
                "compiled".bright_green().bold(),
                target.bright_white(),
                format!("({} conditions{})", count, guard).dimmed()
            )
        }
        "predicate_rejected" => format!(
            "{} {}: {}",
            "rejected".bright_red().bold(),
            target.bright_white(),
            v.error.as_deref().unwrap_or("").red()
        ),
        "cache_hit" | "cache_miss" => format!(
            "{} {}",
            v.event.as_deref().unwrap_or("").replace('_', " ").dimmed(),
            target.dimmed()
        ),
        "slot_created" => format!(
            "{} {} {}",
            "slot".dimmed(),
            v.ty.as_deref().unwrap_or("?").cyan(),
            v.literal.as_deref().unwrap_or("").dimmed()
        ),
        _ => return None,
    };

    Some(format!("{} {}", level_tag(level), line))
}

fn level_tag(level: Level) -> String {
    let tag = "[condforge]";
    if level == Level::TRACE {
        format!("{}", tag.dimmed())
    } else if level == Level::WARN || level == Level::ERROR {
        format!("{}", tag.yellow())
    } else {
        format!("{}", tag.bright_cyan())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_events_are_skipped() {
        let visitor = EventVisitor {
            event: Some("predicate_evicted".to_string()),
            ..EventVisitor::default()
        };
        assert!(format_event(&visitor, Level::INFO).is_none());
        assert!(format_event(&EventVisitor::default(), Level::INFO).is_none());
    }

    #[test]
    fn test_compiled_event_mentions_target() {
        let visitor = EventVisitor {
            event: Some("predicate_compiled".to_string()),
            target_type: Some("Container".to_string()),
            conditions: Some(3),
            type_guard: Some(true),
            ..EventVisitor::default()
        };
        let line = format_event(&visitor, Level::DEBUG).unwrap();
        assert!(line.contains("Container"));
        assert!(line.contains("3 conditions, type guard"));
    }
}
