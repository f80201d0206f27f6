//! # Logging & Tracing Infrastructure
//!
//! Structured logging for the bridge runtime, built on `tracing`:
//! - Pretty, JSON and compact output on native targets
//! - Browser devtools output on `wasm32` via `tracing-wasm`
//! - Module-level filtering
//! - Payload redaction helpers
//! - Mirroring into a host [`LoggerSink`]
//!
//! ## Usage
//!
//! ```ignore
//! use core_runtime::logging::{init_logging, LogFormat, LoggingConfig};
//! use bridge_traits::time::{ConsoleLogger, LogLevel};
//! use std::sync::Arc;
//!
//! let config = LoggingConfig::default()
//!     .with_format(LogFormat::Pretty)
//!     .with_level(LogLevel::Debug)
//!     .with_logger_sink(Arc::new(ConsoleLogger::default()));
//!
//! init_logging(config)?;
//! tracing::info!("Bridge started");
//! ```
//!
//! ## What not to log
//!
//! Request payloads carry user records and file contents. Log operation tags,
//! request identifiers and sizes; pass anything else through
//! [`redact_if_sensitive`] first.

use crate::error::{Error, Result};

use bridge_traits::time::{LogEntry, LogLevel, LoggerSink};

use std::fmt;
use std::sync::Arc;

use tracing::field::{Field, Visit};
use tracing::{Event, Subscriber};
use tracing_subscriber::{
    filter::EnvFilter,
    layer::{Context, SubscriberExt},
    registry::LookupSpan,
    util::SubscriberInitExt,
    Layer,
};

/// Crates whose events are kept at the configured level by default.
const BRIDGE_TARGETS: &[&str] = &[
    "webview_bridge",
    "core_bridge",
    "core_runtime",
    "bridge_traits",
    "bridge_wasm",
];

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// Human-readable pretty format with colors
    Pretty,
    /// Structured JSON format for machine parsing
    Json,
    /// Compact format for production
    Compact,
}

impl Default for LogFormat {
    fn default() -> Self {
        #[cfg(debug_assertions)]
        return Self::Pretty;

        #[cfg(not(debug_assertions))]
        return Self::Json;
    }
}

/// Logging configuration
#[derive(Clone)]
pub struct LoggingConfig {
    /// Output format (ignored on `wasm32`, which always logs to the console)
    pub format: LogFormat,
    /// Minimum log level
    pub level: LogLevel,
    /// Custom filter string (e.g., "core_bridge=trace,bridge_wasm=debug")
    pub filter: Option<String>,
    /// Optional logger sink for forwarding logs to host
    pub logger_sink: Option<Arc<dyn LoggerSink>>,
    /// Emit span enter/exit events
    pub enable_spans: bool,
    /// Display target module in logs
    pub display_target: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            format: LogFormat::default(),
            level: LogLevel::Info,
            filter: None,
            logger_sink: None,
            enable_spans: false,
            display_target: true,
        }
    }
}

impl fmt::Debug for LoggingConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoggingConfig")
            .field("format", &self.format)
            .field("level", &self.level)
            .field("filter", &self.filter)
            .field("logger_sink", &self.logger_sink.as_ref().map(|_| "LoggerSink"))
            .field("enable_spans", &self.enable_spans)
            .field("display_target", &self.display_target)
            .finish()
    }
}

impl LoggingConfig {
    pub fn with_format(mut self, format: LogFormat) -> Self {
        self.format = format;
        self
    }

    pub fn with_level(mut self, level: LogLevel) -> Self {
        self.level = level;
        self
    }

    pub fn with_filter(mut self, filter: impl Into<String>) -> Self {
        self.filter = Some(filter.into());
        self
    }

    /// Mirror every surviving event into `sink`.
    pub fn with_logger_sink(mut self, sink: Arc<dyn LoggerSink>) -> Self {
        self.logger_sink = Some(sink);
        self
    }

    pub fn with_spans(mut self, enable: bool) -> Self {
        self.enable_spans = enable;
        self
    }

    pub fn with_target(mut self, display: bool) -> Self {
        self.display_target = display;
        self
    }
}

/// Initialize the global subscriber.
///
/// Call once during startup; a second call returns `Error::Config`.
#[cfg(not(target_arch = "wasm32"))]
pub fn init_logging(config: LoggingConfig) -> Result<()> {
    let filter = build_filter(&config)?;
    let output = output_layer(&config);

    tracing_subscriber::registry()
        .with(filter)
        .with(output)
        .with(LoggerSinkLayer::new(config.logger_sink))
        .try_init()
        .map_err(|e| Error::Config(format!("Failed to initialize logging: {}", e)))
}

#[cfg(not(target_arch = "wasm32"))]
fn output_layer<S>(config: &LoggingConfig) -> Box<dyn Layer<S> + Send + Sync>
where
    S: Subscriber + for<'a> LookupSpan<'a>,
{
    use tracing_subscriber::fmt::format::FmtSpan;

    let spans = if config.enable_spans {
        FmtSpan::ACTIVE
    } else {
        FmtSpan::NONE
    };
    let layer = tracing_subscriber::fmt::layer()
        .with_target(config.display_target)
        .with_writer(std::io::stdout);

    match config.format {
        LogFormat::Pretty => layer.pretty().with_span_events(spans).boxed(),
        LogFormat::Compact => layer.compact().with_span_events(spans).boxed(),
        LogFormat::Json => layer
            .json()
            .flatten_event(true)
            .with_current_span(config.enable_spans)
            .with_span_list(config.enable_spans)
            .boxed(),
    }
}

/// Initialize the global subscriber for the browser.
///
/// Events go to the devtools console through `tracing-wasm`.
#[cfg(target_arch = "wasm32")]
pub fn init_logging(config: LoggingConfig) -> Result<()> {
    let filter = build_filter(&config)?;

    let wasm_config = tracing_wasm::WASMLayerConfigBuilder::new()
        .set_max_level(to_tracing_level(config.level))
        .set_report_logs_in_timings(config.enable_spans)
        .build();

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_wasm::WASMLayer::new(wasm_config))
        .with(LoggerSinkLayer::new(config.logger_sink))
        .try_init()
        .map_err(|e| Error::Config(format!("Failed to initialize logging: {}", e)))
}

fn level_name(level: LogLevel) -> &'static str {
    match level {
        LogLevel::Trace => "trace",
        LogLevel::Debug => "debug",
        LogLevel::Info => "info",
        LogLevel::Warn => "warn",
        LogLevel::Error => "error",
    }
}

#[cfg(target_arch = "wasm32")]
fn to_tracing_level(level: LogLevel) -> tracing::Level {
    match level {
        LogLevel::Trace => tracing::Level::TRACE,
        LogLevel::Debug => tracing::Level::DEBUG,
        LogLevel::Info => tracing::Level::INFO,
        LogLevel::Warn => tracing::Level::WARN,
        LogLevel::Error => tracing::Level::ERROR,
    }
}

fn build_filter(config: &LoggingConfig) -> Result<EnvFilter> {
    let filter_string = match &config.filter {
        Some(custom_filter) => custom_filter.clone(),
        None => {
            // Bridge crates at the configured level, everything else at warn
            let base_level = level_name(config.level);
            let mut directives = vec!["warn".to_string()];
            directives.extend(
                BRIDGE_TARGETS
                    .iter()
                    .map(|target| format!("{target}={base_level}")),
            );
            directives.join(",")
        }
    };

    EnvFilter::try_new(filter_string)
        .map_err(|e| Error::Config(format!("Invalid log filter: {}", e)))
}

/// Mirrors events into a host [`LoggerSink`].
struct LoggerSinkLayer {
    sink: Option<Arc<dyn LoggerSink>>,
}

impl LoggerSinkLayer {
    fn new(sink: Option<Arc<dyn LoggerSink>>) -> Self {
        Self { sink }
    }
}

impl<S> Layer<S> for LoggerSinkLayer
where
    S: Subscriber + for<'a> LookupSpan<'a>,
{
    fn on_event(&self, event: &Event<'_>, ctx: Context<'_, S>) {
        let Some(sink) = &self.sink else {
            return;
        };

        let metadata = event.metadata();
        let level = log_level(metadata.level());
        if level < sink.min_level() {
            return;
        }

        let mut visitor = EntryVisitor::default();
        event.record(&mut visitor);
        let EntryVisitor { message, fields } = visitor;

        let message = message.unwrap_or_else(|| metadata.name().to_string());
        let mut entry = fields.into_iter().fold(
            LogEntry::new(level, metadata.target(), message),
            |entry, (key, value)| entry.with_field(key, value),
        );
        if let Some(span) = ctx.lookup_current() {
            entry = entry.with_span(span.name());
        }

        // Host sinks return without suspending.
        if let Err(err) = futures::executor::block_on(sink.log(entry)) {
            eprintln!("Host logger rejected entry: {err}");
        }
    }
}

/// Collects an event's message and its fields, redacted as they are recorded.
#[derive(Default)]
struct EntryVisitor {
    message: Option<String>,
    fields: Vec<(String, String)>,
}

impl EntryVisitor {
    fn push(&mut self, field: &Field, value: String) {
        match field.name() {
            "message" => self.message = Some(value),
            name => {
                let value = redact_if_sensitive(name, &value);
                self.fields.push((name.to_string(), value));
            }
        }
    }
}

impl Visit for EntryVisitor {
    fn record_str(&mut self, field: &Field, value: &str) {
        self.push(field, value.to_owned());
    }

    fn record_error(&mut self, field: &Field, value: &(dyn std::error::Error + 'static)) {
        self.push(field, value.to_string());
    }

    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        self.push(field, format!("{value:?}"));
    }
}

fn log_level(level: &tracing::Level) -> LogLevel {
    match *level {
        tracing::Level::ERROR => LogLevel::Error,
        tracing::Level::WARN => LogLevel::Warn,
        tracing::Level::INFO => LogLevel::Info,
        tracing::Level::DEBUG => LogLevel::Debug,
        tracing::Level::TRACE => LogLevel::Trace,
    }
}

/// Redact field values that may carry user data.
///
/// ```ignore
/// use core_runtime::logging::redact_if_sensitive;
///
/// tracing::debug!(content = %redact_if_sensitive("content", &body), "Saving file");
/// ```
pub fn redact_if_sensitive(field_name: &str, value: &str) -> String {
    const SENSITIVE_FIELDS: &[&str] = &[
        "content",
        "payload",
        "body",
        "token",
        "password",
        "secret",
        "client_name",
        "clientname",
    ];

    let name = field_name.to_ascii_lowercase();
    if SENSITIVE_FIELDS.iter().any(|sensitive| name.contains(sensitive)) {
        return format!("[REDACTED {} bytes]", value.len());
    }

    // Email-shaped values keep their first character
    match value.split_once('@') {
        Some((local, domain)) if domain.contains('.') => {
            let first: String = local.chars().take(1).collect();
            format!("{first}***@[REDACTED]")
        }
        _ => value.to_string(),
    }
}

/// Strip a path down to its final component.
///
/// ```ignore
/// use core_runtime::logging::strip_path;
///
/// tracing::info!(file = %strip_path("/sdcard/Download/backup.json"), "Saved file");
/// // Logs: file="backup.json"
/// ```
pub fn strip_path(path: &str) -> &str {
    path.rsplit(['/', '\\']).next().unwrap_or(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use bridge_traits::error::Result as SinkResult;
    use std::sync::Mutex;

    #[test]
    fn test_logging_config_builder() {
        let config = LoggingConfig::default()
            .with_format(LogFormat::Json)
            .with_level(LogLevel::Debug)
            .with_filter("core_bridge=trace")
            .with_spans(true)
            .with_target(false);

        assert_eq!(config.format, LogFormat::Json);
        assert_eq!(config.level, LogLevel::Debug);
        assert_eq!(config.filter, Some("core_bridge=trace".to_string()));
        assert!(config.enable_spans);
        assert!(!config.display_target);
    }

    #[test]
    fn test_redact_if_sensitive() {
        assert_eq!(
            redact_if_sensitive("content", "{\"transactions\":[]}"),
            "[REDACTED 19 bytes]"
        );
        assert_eq!(redact_if_sensitive("clientName", "Ana"), "[REDACTED 3 bytes]");

        let redacted = redact_if_sensitive("contact", "user@example.com");
        assert!(redacted.starts_with('u'));
        assert!(redacted.contains("[REDACTED]"));

        assert_eq!(redact_if_sensitive("request_id", "17000.25"), "17000.25");
        assert_eq!(redact_if_sensitive("op", "GET_TRANSACTIONS"), "GET_TRANSACTIONS");
    }

    #[test]
    fn test_strip_path() {
        assert_eq!(strip_path("/sdcard/Download/backup.json"), "backup.json");
        assert_eq!(strip_path("C:\\Users\\Ana\\export.csv"), "export.csv");
        assert_eq!(strip_path("backup.json"), "backup.json");
        assert_eq!(strip_path("/var/log/"), "");
    }

    #[test]
    fn test_default_format() {
        #[cfg(debug_assertions)]
        assert_eq!(LogFormat::default(), LogFormat::Pretty);

        #[cfg(not(debug_assertions))]
        assert_eq!(LogFormat::default(), LogFormat::Json);
    }

    #[test]
    fn test_default_filter_covers_bridge_crates() {
        let config = LoggingConfig::default().with_level(LogLevel::Debug);
        let filter = build_filter(&config).unwrap().to_string();
        assert!(filter.contains("core_bridge=debug"));
        assert!(filter.contains("bridge_wasm=debug"));
    }

    #[test]
    fn test_invalid_custom_filter_is_config_error() {
        let config = LoggingConfig::default().with_filter("core_bridge=[");
        assert!(matches!(build_filter(&config), Err(Error::Config(_))));
    }

    #[test]
    fn test_logger_sink_layer_forwards_event() {
        let sink = Arc::new(TestLoggerSink::default());
        let trait_sink: Arc<dyn LoggerSink> = sink.clone();
        let subscriber = tracing_subscriber::registry().with(LoggerSinkLayer::new(Some(trait_sink)));
        let _guard = tracing::subscriber::set_default(subscriber);

        tracing::info!(target: "core_bridge::registry", request_id = "17.5", content = "secret", "resolved");

        let entries = sink.entries.lock().unwrap();
        assert_eq!(entries.len(), 1);
        let entry = &entries[0];
        assert_eq!(entry.target, "core_bridge::registry");
        assert_eq!(entry.message, "resolved");
        assert_eq!(entry.fields.get("request_id"), Some(&"17.5".to_string()));
        assert_eq!(
            entry.fields.get("content"),
            Some(&"[REDACTED 6 bytes]".to_string())
        );
    }

    #[test]
    fn test_logger_sink_layer_respects_min_level() {
        let sink = Arc::new(TestLoggerSink {
            min_level: LogLevel::Warn,
            ..TestLoggerSink::default()
        });
        let trait_sink: Arc<dyn LoggerSink> = sink.clone();
        let subscriber = tracing_subscriber::registry().with(LoggerSinkLayer::new(Some(trait_sink)));
        let _guard = tracing::subscriber::set_default(subscriber);

        tracing::debug!("dropped");
        tracing::warn!("kept");

        let entries = sink.entries.lock().unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].message, "kept");
    }

    struct TestLoggerSink {
        entries: Mutex<Vec<LogEntry>>,
        min_level: LogLevel,
    }

    impl Default for TestLoggerSink {
        fn default() -> Self {
            Self {
                entries: Mutex::new(Vec::new()),
                min_level: LogLevel::Trace,
            }
        }
    }

    #[async_trait]
    impl LoggerSink for TestLoggerSink {
        async fn log(&self, entry: LogEntry) -> SinkResult<()> {
            self.entries.lock().unwrap().push(entry);
            Ok(())
        }

        fn min_level(&self) -> LogLevel {
            self.min_level
        }
    }
}
