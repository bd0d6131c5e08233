//! crates/logging/src/engine/mod.rs
//! The structured log engine: threshold, encoder, sinks and escalation hook.
//!
//! An [`Engine`] is built once from an [`EngineConfig`] and never changes
//! afterwards. Loggers share it behind an `Arc` and differ only in name and
//! bound fields.

mod caller;
mod config;
mod encoder;

use std::backtrace::Backtrace;
use std::fmt;
use std::io;

use logfacade_sink::{SinkError, SinkSet};
use time::OffsetDateTime;

pub use caller::Caller;
pub use config::{
    CallerEncoding, DurationEncoding, EncoderConfig, EngineConfig, ExitHook, LevelEncoding,
    TimeEncoding,
};
pub use encoder::{Encoding, UnknownEncoding};

use crate::field::Field;
use crate::severity::Severity;
use encoder::Encoder;

/// Failure to turn an [`EngineConfig`] into an [`Engine`].
#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    /// The encoding name is not `json` or `console`.
    #[error(transparent)]
    Encoding(#[from] UnknownEncoding),

    /// An output or error output could not be opened.
    #[error(transparent)]
    Sink(#[from] SinkError),
}

/// Writes encoded records to its sinks.
pub struct Engine {
    pub(crate) threshold: Severity,
    pub(crate) add_caller: bool,
    pub(crate) stacktrace_from: Option<Severity>,
    pub(crate) encoder: Encoder,
    pub(crate) outputs: SinkSet,
    pub(crate) errors: SinkSet,
    pub(crate) exit_hook: ExitHook,
}

/// One record on its way to the encoder.
#[derive(Copy, Clone, Debug)]
pub(crate) struct Record<'a> {
    pub(crate) severity: Severity,
    pub(crate) name: Option<&'a str>,
    pub(crate) caller: Option<Caller>,
    pub(crate) message: &'a str,
    pub(crate) context: &'a [Field],
    pub(crate) fields: &'a [Field],
}

impl Engine {
    /// Minimum severity this engine writes.
    #[must_use]
    pub const fn threshold(&self) -> Severity {
        self.threshold
    }

    /// Whether a record at `severity` would be written.
    #[must_use]
    pub fn enabled(&self, severity: Severity) -> bool {
        severity >= self.threshold
    }

    /// Flushes every output. Failures go to the error outputs.
    pub fn flush(&self) {
        if let Err(error) = self.outputs.flush() {
            self.report("flush error", &error);
        }
    }

    /// Encodes and writes `record` when its severity passes the threshold.
    pub(crate) fn write(&self, record: &Record<'_>) {
        if !self.enabled(record.severity) {
            return;
        }
        let record = Record {
            caller: record.caller.filter(|_| self.add_caller),
            ..*record
        };
        let stack = self
            .stacktrace_from
            .filter(|from| record.severity >= *from)
            .map(|_| Backtrace::force_capture().to_string());

        let line = self.encoder.encode(&record, now(), stack.as_deref());
        if let Err(error) = self.outputs.write_record(line.as_bytes()) {
            self.report("write error", &error);
        }
    }

    /// Runs the exit hook. Never returns.
    pub(crate) fn exit(&self, code: i32) -> ! {
        (self.exit_hook)(code)
    }

    fn report(&self, what: &str, error: &io::Error) {
        let line = format!("{} {what}: {error}\n", self.encoder.time_text(now()));
        // Nowhere left to report a failing error output.
        let _ = self.errors.write_record(line.as_bytes());
        let _ = self.errors.flush();
    }
}

impl fmt::Debug for Engine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Engine")
            .field("threshold", &self.threshold)
            .field("add_caller", &self.add_caller)
            .field("stacktrace_from", &self.stacktrace_from)
            .field("encoder", &self.encoder)
            .field("outputs", &self.outputs)
            .field("errors", &self.errors)
            .finish_non_exhaustive()
    }
}

fn now() -> OffsetDateTime {
    OffsetDateTime::now_local().unwrap_or_else(|_| OffsetDateTime::now_utc())
}

#[cfg(test)]
mod tests {
    use super::*;
    use logfacade_sink::{SharedBuffer, Sink};
    use std::io::Write;

    struct BrokenPipe;

    impl Write for BrokenPipe {
        fn write(&mut self, _: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "reader went away"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    fn engine(config: &EngineConfig, outputs: Vec<Sink>, errors: Vec<Sink>) -> Engine {
        config
            .build_with(SinkSet::from_sinks(outputs), SinkSet::from_sinks(errors))
            .expect("engine builds")
    }

    fn json_config() -> EngineConfig {
        EngineConfig {
            encoding: "json".to_owned(),
            ..EngineConfig::default()
        }
    }

    fn record(severity: Severity, message: &str) -> Record<'_> {
        Record {
            severity,
            name: None,
            caller: Some(Caller::new("src/app/main.rs", 9)),
            message,
            context: &[],
            fields: &[],
        }
    }

    #[test]
    fn drops_records_below_threshold() {
        let buffer = SharedBuffer::new();
        let engine = engine(&json_config(), vec![Sink::buffer(buffer.clone())], vec![]);

        engine.write(&record(Severity::Debug, "hidden"));
        assert!(buffer.is_empty());
        assert!(!engine.enabled(Severity::Debug));
        assert!(engine.enabled(Severity::Fatal));

        engine.write(&record(Severity::Info, "shown"));
        let parsed: serde_json::Value =
            serde_json::from_str(&buffer.to_string_lossy()).expect("json line");
        assert_eq!(parsed["msg"], "shown");
        assert_eq!(parsed["caller"], "app/main.rs:9");
    }

    #[test]
    fn disabled_caller_is_omitted() {
        let buffer = SharedBuffer::new();
        let config = EngineConfig {
            disable_caller: true,
            ..json_config()
        };
        let engine = engine(&config, vec![Sink::buffer(buffer.clone())], vec![]);

        engine.write(&record(Severity::Info, "no caller"));
        assert!(!buffer.to_string_lossy().contains("\"caller\""));
    }

    #[test]
    fn stack_attached_from_panic_level() {
        let buffer = SharedBuffer::new();
        let engine = engine(&json_config(), vec![Sink::buffer(buffer.clone())], vec![]);

        engine.write(&record(Severity::Error, "plain"));
        engine.write(&record(Severity::Panic, "with stack"));

        let text = buffer.to_string_lossy();
        let mut lines = text.lines();
        let error: serde_json::Value = serde_json::from_str(lines.next().expect("error")).expect("json");
        let panic: serde_json::Value = serde_json::from_str(lines.next().expect("panic")).expect("json");
        assert!(error.get("stack").is_none());
        assert!(panic["stack"].is_string());
    }

    #[test]
    fn write_failures_go_to_error_outputs() {
        let errors = SharedBuffer::new();
        let engine = engine(
            &json_config(),
            vec![Sink::writer(BrokenPipe)],
            vec![Sink::buffer(errors.clone())],
        );

        engine.write(&record(Severity::Warn, "lost"));

        let report = errors.to_string_lossy();
        assert!(report.contains(" write error: reader went away"), "{report}");
        assert!(report.ends_with('\n'));
    }

    #[test]
    fn exit_runs_hook() {
        fn hook(code: i32) -> ! {
            panic!("exit {code}")
        }

        let engine = engine(&EngineConfig::default().with_exit_hook(hook), vec![], vec![]);
        let outcome = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            engine.exit(3);
        }));
        let payload = outcome.expect_err("hook panics");
        assert_eq!(payload.downcast_ref::<String>().map(String::as_str), Some("exit 3"));
    }
}
