//! Configuration for property bags and logging.

use serde::{Deserialize, Serialize};

/// Output format for the tracing subscriber.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable multi-field lines.
    #[default]
    Pretty,
    /// One JSON object per event.
    Json,
}

impl LogFormat {
    fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "pretty" => Some(Self::Pretty),
            "json" => Some(Self::Json),
            _ => None,
        }
    }
}

/// Configuration for property bags.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropsConfig {
    /// Number of entries reserved when a bag is first created.
    #[serde(default = "default_initial_capacity")]
    pub initial_capacity: usize,
    /// Whether payload contents are included in debug logs.
    #[serde(default)]
    pub trace_payloads: bool,
    /// Log output format.
    #[serde(default)]
    pub log_format: LogFormat,
}

fn default_initial_capacity() -> usize {
    4
}

impl Default for PropsConfig {
    fn default() -> Self {
        Self {
            initial_capacity: default_initial_capacity(),
            trace_payloads: false,
            log_format: LogFormat::default(),
        }
    }
}

impl PropsConfig {
    /// Environment variable for [`PropsConfig::initial_capacity`].
    pub const ENV_INITIAL_CAPACITY: &'static str = "REQPROPS_INITIAL_CAPACITY";
    /// Environment variable for [`PropsConfig::trace_payloads`].
    pub const ENV_TRACE_PAYLOADS: &'static str = "REQPROPS_TRACE_PAYLOADS";
    /// Environment variable for [`PropsConfig::log_format`].
    pub const ENV_LOG_FORMAT: &'static str = "REQPROPS_LOG_FORMAT";

    /// Creates a new configuration with defaults.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a configuration from the process environment.
    ///
    /// Unset or unparsable variables fall back to their defaults.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Builds a configuration from an arbitrary variable lookup.
    #[must_use]
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(capacity) = lookup(Self::ENV_INITIAL_CAPACITY)
            .and_then(|v| v.trim().parse::<usize>().ok())
        {
            config.initial_capacity = capacity;
        }
        if let Some(trace) = lookup(Self::ENV_TRACE_PAYLOADS) {
            config.trace_payloads = matches!(
                trace.trim().to_ascii_lowercase().as_str(),
                "1" | "true" | "yes" | "on"
            );
        }
        if let Some(format) = lookup(Self::ENV_LOG_FORMAT).and_then(|v| LogFormat::parse(&v)) {
            config.log_format = format;
        }

        config
    }

    /// Sets the initial capacity.
    #[must_use]
    pub fn with_initial_capacity(mut self, capacity: usize) -> Self {
        self.initial_capacity = capacity;
        self
    }

    /// Enables payload tracing.
    #[must_use]
    pub fn with_trace_payloads(mut self, enabled: bool) -> Self {
        self.trace_payloads = enabled;
        self
    }

    /// Sets the log format.
    #[must_use]
    pub fn with_log_format(mut self, format: LogFormat) -> Self {
        self.log_format = format;
        self
    }
}
