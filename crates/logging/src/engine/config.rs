//! crates/logging/src/engine/config.rs
//! Engine and encoder configuration.

use std::fmt;

use logfacade_sink::SinkSet;

use super::encoder::{Encoder, Encoding};
use super::{BuildError, Engine};
use crate::options::Options;
use crate::severity::Severity;

/// Called with the exit code after a fatal record has been written.
pub type ExitHook = fn(i32) -> !;

/// How level names are rendered.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum LevelEncoding {
    /// `info`
    #[default]
    Lowercase,
    /// `INFO`
    Capital,
    /// `INFO` wrapped in ANSI color codes.
    CapitalColor,
}

/// How record timestamps are rendered.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum TimeEncoding {
    /// Local time as `2024-01-31 13:45:07.123`.
    #[default]
    Layout,
    /// RFC 3339 with offset.
    Rfc3339,
    /// Milliseconds since the Unix epoch, as a number.
    EpochMillis,
}

/// How [`Value::Duration`](crate::Value::Duration) fields are rendered.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum DurationEncoding {
    /// Floating point milliseconds.
    #[default]
    Millis,
    /// Integer nanoseconds.
    Nanos,
    /// Human readable text such as `1.5s`.
    Text,
}

/// How the caller location is rendered.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum CallerEncoding {
    /// Last two path components and the line.
    #[default]
    Short,
    /// Full path and the line.
    Full,
}

/// Keys and renderings used by both encodings. An empty key omits the element.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EncoderConfig {
    /// Key for the timestamp.
    pub time_key: String,
    /// Key for the level name.
    pub level_key: String,
    /// Key for the logger name.
    pub name_key: String,
    /// Key for the caller location.
    pub caller_key: String,
    /// Key for the message.
    pub message_key: String,
    /// Key for the stack trace.
    pub stacktrace_key: String,
    /// Terminator appended to every record.
    pub line_ending: String,
    /// Level rendering.
    pub level_encoding: LevelEncoding,
    /// Timestamp rendering.
    pub time_encoding: TimeEncoding,
    /// Duration rendering.
    pub duration_encoding: DurationEncoding,
    /// Caller rendering.
    pub caller_encoding: CallerEncoding,
}

impl Default for EncoderConfig {
    fn default() -> Self {
        Self {
            time_key: "time".to_owned(),
            level_key: "level".to_owned(),
            name_key: "logger".to_owned(),
            caller_key: "caller".to_owned(),
            message_key: "msg".to_owned(),
            stacktrace_key: "stack".to_owned(),
            line_ending: "\n".to_owned(),
            level_encoding: LevelEncoding::default(),
            time_encoding: TimeEncoding::default(),
            duration_encoding: DurationEncoding::default(),
            caller_encoding: CallerEncoding::default(),
        }
    }
}

/// Everything needed to build an [`Engine`].
#[derive(Clone)]
pub struct EngineConfig {
    /// Minimum severity written.
    pub threshold: Severity,
    /// Attach stack traces from [`Severity::Warn`] up instead of from
    /// `stacktrace_level`.
    pub development: bool,
    /// Omit caller locations.
    pub disable_caller: bool,
    /// Never attach stack traces.
    pub disable_stacktrace: bool,
    /// Lowest severity that carries a stack trace.
    pub stacktrace_level: Severity,
    /// Encoding name, `json` or `console`.
    pub encoding: String,
    /// Keys and renderings.
    pub encoder: EncoderConfig,
    /// Record destinations.
    pub output_paths: Vec<String>,
    /// Destinations for the engine's own errors.
    pub error_output_paths: Vec<String>,
    /// Invoked after a fatal record is written.
    pub exit_hook: ExitHook,
}

impl EngineConfig {
    /// Translates facade options into an engine configuration.
    ///
    /// An unknown level becomes [`Severity::Info`]; color switches the level
    /// rendering to [`LevelEncoding::CapitalColor`]; stack traces start at
    /// [`Severity::Panic`].
    #[must_use]
    pub fn from_options(options: &Options) -> Self {
        let mut encoder = EncoderConfig::default();
        if options.enable_color {
            encoder.level_encoding = LevelEncoding::CapitalColor;
        }

        Self {
            threshold: options.severity(),
            development: false,
            disable_caller: !options.enable_caller,
            disable_stacktrace: false,
            stacktrace_level: Severity::Panic,
            encoding: options.format.clone(),
            encoder,
            output_paths: options.output_paths.clone(),
            error_output_paths: options.error_output_paths.clone(),
            exit_hook: std::process::exit,
        }
    }

    /// Replaces the hook run after fatal records.
    pub fn with_exit_hook(mut self, hook: ExitHook) -> Self {
        self.exit_hook = hook;
        self
    }

    /// Opens the configured sinks and builds the engine.
    pub fn build(&self) -> Result<Engine, BuildError> {
        let encoding = self.encoding.parse::<Encoding>()?;
        let outputs = SinkSet::open(&self.output_paths)?;
        let errors = SinkSet::open(&self.error_output_paths)?;
        Ok(self.assemble(encoding, outputs, errors))
    }

    /// Builds the engine around caller-supplied sinks, ignoring the
    /// configured paths.
    pub fn build_with(&self, outputs: SinkSet, errors: SinkSet) -> Result<Engine, BuildError> {
        let encoding = self.encoding.parse::<Encoding>()?;
        Ok(self.assemble(encoding, outputs, errors))
    }

    fn assemble(&self, encoding: Encoding, outputs: SinkSet, errors: SinkSet) -> Engine {
        let stacktrace_from = if self.disable_stacktrace {
            None
        } else if self.development {
            Some(Severity::Warn)
        } else {
            Some(self.stacktrace_level)
        };

        Engine {
            threshold: self.threshold,
            add_caller: !self.disable_caller,
            stacktrace_from,
            encoder: Encoder::new(encoding, self.encoder.clone()),
            outputs,
            errors,
            exit_hook: self.exit_hook,
        }
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self::from_options(&Options::default())
    }
}

impl fmt::Debug for EngineConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EngineConfig")
            .field("threshold", &self.threshold)
            .field("development", &self.development)
            .field("disable_caller", &self.disable_caller)
            .field("disable_stacktrace", &self.disable_stacktrace)
            .field("stacktrace_level", &self.stacktrace_level)
            .field("encoding", &self.encoding)
            .field("encoder", &self.encoder)
            .field("output_paths", &self.output_paths)
            .field("error_output_paths", &self.error_output_paths)
            .finish_non_exhaustive()
    }
}
