#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! crates/logging/src/lib.rs
//!
//! # Overview
//!
//! `logfacade` is a process-wide structured logging facade. One global
//! logger, built from [`Options`], accepts leveled records in three call
//! shapes and writes them as JSON or console lines to the configured sinks.
//! Loggers can also be bound to an immutable [`Context`] and retrieved by
//! downstream code.
//!
//! # Design
//!
//! - [`Engine`] owns the threshold, the encoder, the sinks, the stack trace
//!   policy and the exit hook. It is built once from an [`EngineConfig`] and
//!   never changed.
//! - [`Logger`] is a cheap handle to an engine plus a dotted name and bound
//!   fields. The three call shapes (`info`, `infof`, `infow`) lower to the
//!   same write.
//! - The global slot holds the installed `(Options, Logger)` pair and is
//!   replaced atomically by [`init`]. Until then, the default options are
//!   installed on first use.
//! - Escalation is explicit: [`log_and_panic`] and [`log_and_exit`] (and
//!   their `f`/`w` forms) write, flush, then panic or run the exit hook.
//! - [`FacadeLayer`] forwards `tracing` events from other libraries into the
//!   global logger.
//!
//! # Invariants
//!
//! - Readers of the global logger see either the previous or the new
//!   installation, never a mix of the two.
//! - A leveled call below the threshold writes nothing and never fails.
//! - Malformed key/value slices are reported in their own error records and
//!   the well-formed pairs are still written.
//!
//! # Errors
//!
//! Building an engine can fail with [`BuildError`]. [`init`] treats that as
//! fatal and exits with status 1; [`try_init`] returns it. Sink write failures
//! never reach the caller and are reported on the error outputs instead.
//!
//! # Examples
//!
//! ```
//! use logfacade::{Context, EngineConfig, Field, Logger, SharedBuffer, Sink, SinkSet, kv};
//!
//! let buffer = SharedBuffer::new();
//! let config = EngineConfig {
//!     encoding: "json".to_owned(),
//!     ..EngineConfig::default()
//! };
//! let engine = config.build_with(
//!     SinkSet::from_sinks(vec![Sink::buffer(buffer.clone())]),
//!     SinkSet::default(),
//! )?;
//! let logger = Logger::new(engine).with_name("api");
//!
//! logger.info("started", &[Field::uint("port", 8080)]);
//! logger.infow("request", &kv!["path", "/users", "status", 200]);
//!
//! let context = logger.with_context(&Context::background());
//! assert_eq!(logfacade::from_context(Some(&context)), logger);
//!
//! let output = buffer.to_string_lossy();
//! assert_eq!(output.lines().count(), 2);
//! assert!(output.contains("\"logger\":\"api\""));
//! # Ok::<(), logfacade::BuildError>(())
//! ```

mod context;
mod engine;
mod field;
mod global;
mod logger;
mod macros;
mod options;
mod severity;
mod tracing_bridge;

pub use context::{Context, UNKNOWN_CONTEXT, from_context, with_context};
pub use engine::{
    BuildError, Caller, CallerEncoding, DurationEncoding, EncoderConfig, Encoding, Engine,
    EngineConfig, ExitHook, LevelEncoding, TimeEncoding, UnknownEncoding,
};
pub use field::{Field, Value};
pub use global::{
    debug, debugf, debugw, enabled, error, errorf, errorw, flush, info, infof, infow, init,
    log_and_exit, log_and_exitf, log_and_exitw, log_and_panic, log_and_panicf, log_and_panicw,
    logger, options, try_init, warn, warnf, warnw, with_fields, with_name,
};
pub use logfacade_sink::{SharedBuffer, Sink, SinkError, SinkSet};
pub use logger::{FATAL_EXIT_CODE, Logger};
pub use options::{DEFAULT_FORMAT, DEFAULT_LEVEL, Options, OptionsError};
pub use severity::{Severity, UnknownSeverity};
pub use tracing_bridge::{FacadeLayer, TracingInitError, init_tracing};
