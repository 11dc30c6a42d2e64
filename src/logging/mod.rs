// Logging module - the console's own tracing output
//
// In TUI mode tracing events are captured in memory by `TuiLogLayer` and
// shown in the diagnostics panel, so they never break through the alternate
// screen. Headless and one-shot runs log to stderr, keeping stdout for the
// operator log. Either way a rolling JSON file can be added.

use crate::config::{Config, LogRotation};
use anyhow::{Context, Result};
use chrono::{DateTime, Local};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use tracing::{Level, Metadata, Subscriber};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::{Context as LayerContext, SubscriberExt};
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

/// Maximum number of diagnostics kept in memory
const MAX_DIAGNOSTICS: usize = 500;

/// A single tracing event captured for display
#[derive(Debug, Clone)]
pub struct Diagnostic {
    pub timestamp: DateTime<Local>,
    pub level: Level,
    pub target: String,
    pub message: String,
}

impl Diagnostic {
    pub fn display_line(&self) -> String {
        format!(
            "{} {:5} {}: {}",
            self.timestamp.format("%H:%M:%S"),
            self.level.as_str(),
            self.target,
            self.message
        )
    }
}

/// In-memory diagnostics with bounded size (ring buffer)
#[derive(Clone)]
pub struct DiagnosticsBuffer {
    entries: Arc<Mutex<VecDeque<Diagnostic>>>,
}

impl DiagnosticsBuffer {
    pub fn new() -> Self {
        Self {
            entries: Arc::new(Mutex::new(VecDeque::with_capacity(MAX_DIAGNOSTICS))),
        }
    }

    /// Add an entry, dropping the oldest when full
    pub fn add(&self, entry: Diagnostic) {
        // A poisoned lock only means a panic mid-push; the data is still usable
        let mut entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        if entries.len() >= MAX_DIAGNOSTICS {
            entries.pop_front();
        }
        entries.push_back(entry);
    }

    /// The last `n` entries, oldest first
    pub fn tail(&self, n: usize) -> Vec<Diagnostic> {
        let entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        let skip = entries.len().saturating_sub(n);
        entries.iter().skip(skip).cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.entries.lock().unwrap_or_else(|e| e.into_inner()).len()
    }
}

impl Default for DiagnosticsBuffer {
    fn default() -> Self {
        Self::new()
    }
}

/// Tracing layer that captures events into a `DiagnosticsBuffer`
pub struct TuiLogLayer {
    buffer: DiagnosticsBuffer,
}

impl TuiLogLayer {
    pub fn new(buffer: DiagnosticsBuffer) -> Self {
        Self { buffer }
    }
}

impl<S> Layer<S> for TuiLogLayer
where
    S: Subscriber,
{
    fn on_event(&self, event: &tracing::Event<'_>, _ctx: LayerContext<'_, S>) {
        let metadata = event.metadata();

        let mut visitor = MessageVisitor::default();
        event.record(&mut visitor);

        self.buffer.add(Diagnostic {
            timestamp: Local::now(),
            level: *metadata.level(),
            target: metadata.target().to_string(),
            message: visitor.finish(),
        });
    }

    fn enabled(&self, _metadata: &Metadata<'_>, _ctx: LayerContext<'_, S>) -> bool {
        // Filtering happens at subscriber level
        true
    }
}

/// Collects the message plus any structured fields as `key=value`
#[derive(Default)]
struct MessageVisitor {
    message: String,
    fields: Vec<String>,
}

impl MessageVisitor {
    fn finish(self) -> String {
        if self.fields.is_empty() {
            self.message
        } else {
            format!("{} {}", self.message, self.fields.join(" "))
        }
    }
}

impl tracing::field::Visit for MessageVisitor {
    fn record_str(&mut self, field: &tracing::field::Field, value: &str) {
        if field.name() == "message" {
            self.message = value.to_string();
        } else {
            self.fields.push(format!("{}={}", field.name(), value));
        }
    }

    fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn std::fmt::Debug) {
        if field.name() == "message" {
            self.message = format!("{:?}", value);
        } else {
            self.fields.push(format!("{}={:?}", field.name(), value));
        }
    }
}

/// Where human-readable tracing output goes
pub enum Sink {
    /// Into the TUI diagnostics panel
    Panel(DiagnosticsBuffer),
    /// To stderr
    Stderr,
}

/// Install the global subscriber.
///
/// Precedence: RUST_LOG env var > config file > default "info".
/// The returned guard must live until exit so file logs flush.
pub fn init(config: &Config, sink: Sink) -> Result<Option<WorkerGuard>> {
    let default_filter = format!("logdeck={}", config.logging.level);
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter.into());

    let (file_layer, guard) = if config.logging.file_enabled {
        let logging = &config.logging;
        std::fs::create_dir_all(&logging.file_dir).with_context(|| {
            format!("Could not create log directory {}", logging.file_dir.display())
        })?;

        let appender = match logging.file_rotation {
            LogRotation::Hourly => {
                tracing_appender::rolling::hourly(&logging.file_dir, &logging.file_prefix)
            }
            LogRotation::Daily => {
                tracing_appender::rolling::daily(&logging.file_dir, &logging.file_prefix)
            }
            LogRotation::Never => {
                tracing_appender::rolling::never(&logging.file_dir, &logging.file_prefix)
            }
        };

        // Writes happen on a background thread
        let (writer, guard) = tracing_appender::non_blocking(appender);
        let layer = tracing_subscriber::fmt::layer()
            .json()
            .with_writer(writer)
            .with_ansi(false);
        (Some(layer), Some(guard))
    } else {
        (None, None)
    };

    let (panel_layer, stderr_layer) = match sink {
        Sink::Panel(buffer) => (Some(TuiLogLayer::new(buffer)), None),
        Sink::Stderr => (
            None,
            Some(tracing_subscriber::fmt::layer().with_writer(std::io::stderr)),
        ),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(panel_layer)
        .with(stderr_layer)
        .with(file_layer)
        .try_init()
        .context("Failed to install tracing subscriber")?;

    Ok(guard)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn diagnostic(message: &str) -> Diagnostic {
        Diagnostic {
            timestamp: Local::now(),
            level: Level::INFO,
            target: "logdeck".to_string(),
            message: message.to_string(),
        }
    }

    #[test]
    fn ring_buffer_drops_oldest() {
        let buffer = DiagnosticsBuffer::new();
        for i in 0..(MAX_DIAGNOSTICS + 3) {
            buffer.add(diagnostic(&i.to_string()));
        }
        assert_eq!(buffer.len(), MAX_DIAGNOSTICS);
        assert_eq!(buffer.tail(1)[0].message, (MAX_DIAGNOSTICS + 2).to_string());
        assert_eq!(buffer.tail(MAX_DIAGNOSTICS)[0].message, "3");
    }

    #[test]
    fn tail_larger_than_buffer_returns_everything() {
        let buffer = DiagnosticsBuffer::new();
        buffer.add(diagnostic("only"));
        let tail = buffer.tail(10);
        assert_eq!(tail.len(), 1);
        assert_eq!(tail[0].message, "only");
    }

    #[test]
    fn layer_captures_message_and_fields() {
        let buffer = DiagnosticsBuffer::new();
        let subscriber = tracing_subscriber::registry().with(TuiLogLayer::new(buffer.clone()));

        tracing::subscriber::with_default(subscriber, || {
            tracing::warn!(connection = 3, "Log stream failed");
        });

        let captured = buffer.tail(1);
        assert_eq!(captured.len(), 1);
        assert_eq!(captured[0].level, Level::WARN);
        assert_eq!(captured[0].message, "Log stream failed connection=3");
    }
}
