//! crates/logging/src/macros.rs
//! printf-style macros over the global logger.
//!
//! Each macro forwards `format_args!` to the matching `*f` function, so the
//! caller location is the macro call site.

/// Debug record with a formatted message.
///
/// # Example
/// ```
/// logfacade::debugf!("cache warmed: {} entries", 128);
/// ```
#[macro_export]
macro_rules! debugf {
    ($($arg:tt)*) => {
        $crate::debugf(::std::format_args!($($arg)*))
    };
}

/// Info record with a formatted message.
///
/// # Example
/// ```
/// logfacade::infof!("n={}", 3);
/// ```
#[macro_export]
macro_rules! infof {
    ($($arg:tt)*) => {
        $crate::infof(::std::format_args!($($arg)*))
    };
}

/// Warn record with a formatted message.
///
/// # Example
/// ```
/// logfacade::warnf!("retrying in {}s", 5);
/// ```
#[macro_export]
macro_rules! warnf {
    ($($arg:tt)*) => {
        $crate::warnf(::std::format_args!($($arg)*))
    };
}

/// Error record with a formatted message.
///
/// # Example
/// ```
/// logfacade::errorf!("upstream returned {}", 502);
/// ```
#[macro_export]
macro_rules! errorf {
    ($($arg:tt)*) => {
        $crate::errorf(::std::format_args!($($arg)*))
    };
}

/// Panic record with a formatted message, then a panic with that message.
///
/// # Example
/// ```should_panic
/// logfacade::log_and_panicf!("segment {} is corrupt", 4);
/// ```
#[macro_export]
macro_rules! log_and_panicf {
    ($($arg:tt)*) => {
        $crate::log_and_panicf(::std::format_args!($($arg)*))
    };
}

/// Fatal record with a formatted message, then process exit with status 1.
///
/// # Example
/// ```no_run
/// logfacade::log_and_exitf!("cannot bind port {}", 80);
/// ```
#[macro_export]
macro_rules! log_and_exitf {
    ($($arg:tt)*) => {
        $crate::log_and_exitf(::std::format_args!($($arg)*))
    };
}
