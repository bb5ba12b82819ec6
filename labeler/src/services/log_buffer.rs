//! In-memory log buffer backed by tracing subscriber events.
//!
//! The web UI polls `/status` for recent log lines; this layer captures
//! everything the app logs into a bounded ring buffer.

use std::collections::VecDeque;
use std::sync::{LazyLock, Mutex};

use serde::Serialize;
use tracing::field::{Field, Visit};
use tracing::{Event, Subscriber};
use tracing_subscriber::Layer;
use tracing_subscriber::layer::Context;
use tracing_subscriber::registry::LookupSpan;

const MAX_LOG_ENTRIES: usize = 200;

#[derive(Debug, Clone, Serialize)]
pub struct LogEntry {
    pub timestamp: String,
    pub level: String,
    pub message: String,
}

static LOG_BUFFER: LazyLock<Mutex<VecDeque<LogEntry>>> =
    LazyLock::new(|| Mutex::new(VecDeque::with_capacity(MAX_LOG_ENTRIES)));

/// Last `limit` entries, oldest first.
pub fn recent(limit: usize) -> Vec<LogEntry> {
    let safe_limit = limit.clamp(1, MAX_LOG_ENTRIES);
    let Ok(buffer) = LOG_BUFFER.lock() else {
        return Vec::new();
    };

    let mut logs = buffer
        .iter()
        .rev()
        .take(safe_limit)
        .cloned()
        .collect::<Vec<_>>();
    logs.reverse();
    logs
}

pub fn clear() -> usize {
    let Ok(mut buffer) = LOG_BUFFER.lock() else {
        return 0;
    };
    let cleared = buffer.len();
    buffer.clear();
    cleared
}

fn push(entry: LogEntry) {
    let Ok(mut buffer) = LOG_BUFFER.lock() else {
        return;
    };
    if buffer.len() >= MAX_LOG_ENTRIES {
        buffer.pop_front();
    }
    buffer.push_back(entry);
}

/// Tracing layer that mirrors events into the ring buffer.
#[derive(Default)]
pub struct LogCaptureLayer;

impl LogCaptureLayer {
    pub fn new() -> Self {
        Self
    }
}

impl<S> Layer<S> for LogCaptureLayer
where
    S: Subscriber + for<'a> LookupSpan<'a>,
{
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let mut visitor = MessageVisitor::default();
        event.record(&mut visitor);

        let meta = event.metadata();
        let mut message = visitor.message.unwrap_or_else(|| meta.name().to_string());
        if !visitor.fields.is_empty() {
            message.push_str(" (");
            message.push_str(&visitor.fields.join(", "));
            message.push(')');
        }

        push(LogEntry {
            timestamp: chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
            level: meta.level().to_string().to_lowercase(),
            message,
        });
    }
}

#[derive(Default)]
struct MessageVisitor {
    message: Option<String>,
    fields: Vec<String>,
}

impl MessageVisitor {
    fn record_value(&mut self, field: &Field, value: String) {
        if field.name() == "message" {
            self.message = Some(value);
        } else {
            self.fields.push(format!("{}={}", field.name(), value));
        }
    }
}

impl Visit for MessageVisitor {
    fn record_i64(&mut self, field: &Field, value: i64) {
        self.record_value(field, value.to_string());
    }

    fn record_u64(&mut self, field: &Field, value: u64) {
        self.record_value(field, value.to_string());
    }

    fn record_bool(&mut self, field: &Field, value: bool) {
        self.record_value(field, value.to_string());
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        self.record_value(field, value.to_string());
    }

    fn record_f64(&mut self, field: &Field, value: f64) {
        self.record_value(field, value.to_string());
    }

    fn record_error(&mut self, field: &Field, value: &(dyn std::error::Error + 'static)) {
        self.record_value(field, value.to_string());
    }

    fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
        self.record_value(field, format!("{value:?}"));
    }
}
