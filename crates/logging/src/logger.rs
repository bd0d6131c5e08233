//! crates/logging/src/logger.rs
//! Cloneable logger handles sharing one engine.
//!
//! Every leveled call comes in three shapes that lower to the same write:
//! `info(msg, fields)` with typed [`Field`]s, `infof(format_args!(..))` with an
//! eagerly formatted message, and `infow(msg, &kv![..])` with alternating keys
//! and values. Escalation is only ever performed by the `log_and_panic*` and
//! `log_and_exit*` families, so control flow stays visible at call sites.

use std::fmt;
use std::sync::Arc;

use crate::engine::{BuildError, Caller, Engine, EngineConfig, Record};
use crate::field::{Field, Value, pair_up};
use crate::options::Options;
use crate::severity::Severity;

/// Exit code passed to the exit hook by the `log_and_exit*` family.
pub const FATAL_EXIT_CODE: i32 = 1;

const INVALID_PAIRS_MESSAGE: &str = "Ignored key-value pairs with non-string keys.";
const DANGLING_KEY_MESSAGE: &str = "Ignored key without a value.";

/// A handle to an [`Engine`] plus an optional dotted name and bound fields.
///
/// Cloning is cheap. Derived loggers share the engine with their parent.
#[derive(Clone)]
pub struct Logger {
    engine: Arc<Engine>,
    name: Option<Arc<str>>,
    context: Arc<[Field]>,
}

macro_rules! leveled {
    ($($severity:ident => $plain:ident, $formatted:ident, $paired:ident;)*) => {
        $(
            #[doc = concat!("Writes `message` and `fields` at [`Severity::", stringify!($severity), "`].")]
            #[track_caller]
            pub fn $plain(&self, message: &str, fields: &[Field]) {
                self.emit(Severity::$severity, message, fields, Caller::here());
            }

            #[doc = concat!("Writes a formatted message at [`Severity::", stringify!($severity), "`].")]
            #[track_caller]
            pub fn $formatted(&self, args: fmt::Arguments<'_>) {
                if self.enabled(Severity::$severity) {
                    self.emit(Severity::$severity, &args.to_string(), &[], Caller::here());
                }
            }

            #[doc = concat!("Writes `message` and alternating keys and values at [`Severity::", stringify!($severity), "`].")]
            #[track_caller]
            pub fn $paired(&self, message: &str, keys_and_values: &[Value]) {
                self.emit_pairs(Severity::$severity, message, keys_and_values, Caller::here());
            }
        )*
    };
}

impl Logger {
    /// Wraps a built engine in an unnamed logger.
    #[must_use]
    pub fn new(engine: Engine) -> Self {
        Self {
            engine: Arc::new(engine),
            name: None,
            context: Arc::from([]),
        }
    }

    /// Builds the engine described by `options`, opening its sinks.
    pub fn from_options(options: &Options) -> Result<Self, BuildError> {
        EngineConfig::from_options(options).build().map(Self::new)
    }

    /// Whether a record at `severity` would be written.
    #[must_use]
    pub fn enabled(&self, severity: Severity) -> bool {
        self.engine.enabled(severity)
    }

    /// The engine's threshold.
    #[must_use]
    pub fn threshold(&self) -> Severity {
        self.engine.threshold()
    }

    /// The dotted name, if any.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Fields bound with [`Logger::with_fields`].
    #[must_use]
    pub fn fields(&self) -> &[Field] {
        &self.context
    }

    /// A child logger whose name is `name` appended to this one with a dot.
    #[must_use]
    pub fn with_name(&self, name: &str) -> Self {
        let name: Arc<str> = match (self.name.as_deref(), name) {
            (Some(parent), "") => Arc::from(parent),
            (Some(parent), child) => Arc::from(format!("{parent}.{child}")),
            (None, child) => Arc::from(child),
        };
        Self {
            name: Some(name),
            ..self.clone()
        }
    }

    /// A child logger that adds `fields` to every record.
    #[must_use]
    pub fn with_fields(&self, fields: &[Field]) -> Self {
        if fields.is_empty() {
            return self.clone();
        }
        let context: Vec<Field> = self.context.iter().chain(fields).cloned().collect();
        Self {
            context: Arc::from(context),
            ..self.clone()
        }
    }

    /// Flushes the engine's outputs.
    pub fn flush(&self) {
        self.engine.flush();
    }

    /// Writes at an arbitrary severity without escalating, even at
    /// [`Severity::Panic`] or [`Severity::Fatal`].
    #[track_caller]
    pub fn log(&self, severity: Severity, message: &str, fields: &[Field]) {
        self.emit(severity, message, fields, Caller::here());
    }

    leveled! {
        Debug => debug, debugf, debugw;
        Info => info, infof, infow;
        Warn => warn, warnf, warnw;
        Error => error, errorf, errorw;
    }

    /// Writes at [`Severity::Panic`], flushes, then panics with `message`.
    ///
    /// The panic happens even when the write is filtered by the threshold.
    #[track_caller]
    pub fn log_and_panic(&self, message: &str, fields: &[Field]) -> ! {
        self.emit(Severity::Panic, message, fields, Caller::here());
        self.flush();
        panic!("{message}")
    }

    /// Formatted form of [`Logger::log_and_panic`].
    #[track_caller]
    pub fn log_and_panicf(&self, args: fmt::Arguments<'_>) -> ! {
        self.log_and_panic(&args.to_string(), &[])
    }

    /// Key/value form of [`Logger::log_and_panic`].
    #[track_caller]
    pub fn log_and_panicw(&self, message: &str, keys_and_values: &[Value]) -> ! {
        self.emit_pairs(Severity::Panic, message, keys_and_values, Caller::here());
        self.flush();
        panic!("{message}")
    }

    /// Writes at [`Severity::Fatal`], flushes, then runs the engine's exit
    /// hook with [`FATAL_EXIT_CODE`].
    #[track_caller]
    pub fn log_and_exit(&self, message: &str, fields: &[Field]) -> ! {
        self.emit(Severity::Fatal, message, fields, Caller::here());
        self.flush();
        self.engine.exit(FATAL_EXIT_CODE)
    }

    /// Formatted form of [`Logger::log_and_exit`].
    #[track_caller]
    pub fn log_and_exitf(&self, args: fmt::Arguments<'_>) -> ! {
        self.log_and_exit(&args.to_string(), &[])
    }

    /// Key/value form of [`Logger::log_and_exit`].
    #[track_caller]
    pub fn log_and_exitw(&self, message: &str, keys_and_values: &[Value]) -> ! {
        self.emit_pairs(Severity::Fatal, message, keys_and_values, Caller::here());
        self.flush();
        self.engine.exit(FATAL_EXIT_CODE)
    }

    /// Entry point for records whose caller is known by other means.
    pub(crate) fn log_at(
        &self,
        severity: Severity,
        message: &str,
        fields: &[Field],
        caller: Option<Caller>,
    ) {
        self.engine.write(&Record {
            severity,
            name: self.name.as_deref(),
            caller,
            message,
            context: &self.context,
            fields,
        });
    }

    fn emit(&self, severity: Severity, message: &str, fields: &[Field], caller: Caller) {
        self.log_at(severity, message, fields, Some(caller));
    }

    fn emit_pairs(&self, severity: Severity, message: &str, keys_and_values: &[Value], caller: Caller) {
        if !self.enabled(severity) {
            return;
        }
        let pairs = pair_up(keys_and_values);
        if !pairs.invalid.is_empty() {
            let invalid = Field::new("invalid", pairs.invalid_json());
            self.emit(Severity::Error, INVALID_PAIRS_MESSAGE, &[invalid], caller);
        }
        if let Some(key) = &pairs.dangling_key {
            let ignored = Field::new("ignored", key.clone());
            self.emit(Severity::Error, DANGLING_KEY_MESSAGE, &[ignored], caller);
        }
        self.emit(severity, message, &pairs.fields, caller);
    }
}

impl PartialEq for Logger {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.engine, &other.engine)
            && self.name == other.name
            && self.context == other.context
    }
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Logger")
            .field("name", &self.name)
            .field("fields", &self.context)
            .field("threshold", &self.engine.threshold())
            .finish_non_exhaustive()
    }
}
