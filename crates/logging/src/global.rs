//! crates/logging/src/global.rs
//! The process-wide logger and the free functions that write through it.
//!
//! The installed [`Options`] and [`Logger`] live together in one atomically
//! swapped slot. [`init`] replaces the pair wholesale; readers load whichever
//! pair is current and keep it alive for the duration of their call, so a
//! record is never written through half of one configuration and half of
//! another. Call [`init`] before spawning workers so every worker sees the
//! intended configuration from its first record.
//!
//! A process that never calls [`init`] gets the default options installed on
//! first use: info level, console encoding, stdout.

use std::fmt;
use std::process;
use std::sync::{Arc, LazyLock};

use arc_swap::ArcSwap;

use crate::engine::BuildError;
use crate::field::{Field, Value};
use crate::logger::Logger;
use crate::options::Options;
use crate::severity::Severity;

/// Target of this crate's own `tracing` diagnostics, which the bridge never
/// forwards into the application's sinks.
pub(crate) const INTERNAL_TARGET: &str = "logfacade::internal";

struct Installed {
    options: Arc<Options>,
    logger: Logger,
}

impl Installed {
    fn build(options: Options) -> Result<Self, BuildError> {
        let logger = Logger::from_options(&options)?;
        Ok(Self {
            options: Arc::new(options),
            logger,
        })
    }
}

static SLOT: LazyLock<ArcSwap<Installed>> = LazyLock::new(|| {
    let installed = Installed::build(Options::default()).unwrap_or_else(|error| fail(&error));
    ArcSwap::from_pointee(installed)
});

fn fail(error: &BuildError) -> ! {
    eprintln!("logfacade: cannot build logger: {error}");
    process::exit(1)
}

/// Installs a logger built from `options`, replacing the current one.
///
/// An unknown level becomes info. A logger that cannot be built, for example
/// because an output path cannot be opened, prints the error to stderr and
/// exits the process with status 1; use [`try_init`] to handle it instead.
pub fn init(options: Options) {
    if let Err(error) = try_init(options) {
        fail(&error);
    }
}

/// Installs a logger built from `options`, replacing the current one.
///
/// On failure the previously installed logger stays in place.
pub fn try_init(options: Options) -> Result<(), BuildError> {
    let installed = Installed::build(options)?;
    let threshold = installed.logger.threshold();
    let format = installed.options.format.clone();
    SLOT.store(Arc::new(installed));
    tracing::debug!(target: INTERNAL_TARGET, %threshold, %format, "installed global logger");
    Ok(())
}

/// The options of the installed logger.
#[must_use]
pub fn options() -> Arc<Options> {
    Arc::clone(&SLOT.load().options)
}

/// A handle to the installed logger.
#[must_use]
pub fn logger() -> Logger {
    SLOT.load().logger.clone()
}

/// Whether the installed logger writes records at `severity`.
#[must_use]
pub fn enabled(severity: Severity) -> bool {
    SLOT.load().logger.enabled(severity)
}

/// The installed logger with `name` appended to its name.
#[must_use]
pub fn with_name(name: &str) -> Logger {
    SLOT.load().logger.with_name(name)
}

/// The installed logger with `fields` added to every record.
#[must_use]
pub fn with_fields(fields: &[Field]) -> Logger {
    SLOT.load().logger.with_fields(fields)
}

/// Flushes the installed logger's outputs.
pub fn flush() {
    SLOT.load().logger.flush();
}

macro_rules! global_leveled {
    ($($severity:ident => $plain:ident, $formatted:ident, $paired:ident;)*) => {
        $(
            #[doc = concat!("Writes `message` and `fields` at [`Severity::", stringify!($severity), "`] through the installed logger.")]
            #[track_caller]
            pub fn $plain(message: &str, fields: &[Field]) {
                SLOT.load().logger.$plain(message, fields);
            }

            #[doc = concat!("Writes a formatted message at [`Severity::", stringify!($severity), "`] through the installed logger.")]
            #[track_caller]
            pub fn $formatted(args: fmt::Arguments<'_>) {
                SLOT.load().logger.$formatted(args);
            }

            #[doc = concat!("Writes `message` and alternating keys and values at [`Severity::", stringify!($severity), "`] through the installed logger.")]
            #[track_caller]
            pub fn $paired(message: &str, keys_and_values: &[Value]) {
                SLOT.load().logger.$paired(message, keys_and_values);
            }
        )*
    };
}

global_leveled! {
    Debug => debug, debugf, debugw;
    Info => info, infof, infow;
    Warn => warn, warnf, warnw;
    Error => error, errorf, errorw;
}

/// See [`Logger::log_and_panic`].
#[track_caller]
pub fn log_and_panic(message: &str, fields: &[Field]) -> ! {
    logger().log_and_panic(message, fields)
}

/// See [`Logger::log_and_panicf`].
#[track_caller]
pub fn log_and_panicf(args: fmt::Arguments<'_>) -> ! {
    logger().log_and_panicf(args)
}

/// See [`Logger::log_and_panicw`].
#[track_caller]
pub fn log_and_panicw(message: &str, keys_and_values: &[Value]) -> ! {
    logger().log_and_panicw(message, keys_and_values)
}

/// See [`Logger::log_and_exit`].
#[track_caller]
pub fn log_and_exit(message: &str, fields: &[Field]) -> ! {
    logger().log_and_exit(message, fields)
}

/// See [`Logger::log_and_exitf`].
#[track_caller]
pub fn log_and_exitf(args: fmt::Arguments<'_>) -> ! {
    logger().log_and_exitf(args)
}

/// See [`Logger::log_and_exitw`].
#[track_caller]
pub fn log_and_exitw(message: &str, keys_and_values: &[Value]) -> ! {
    logger().log_and_exitw(message, keys_and_values)
}
