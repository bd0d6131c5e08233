//! crates/logging/src/severity.rs
//! Record severities and their textual names.

use std::fmt;
use std::str::FromStr;

/// Severity of a log record, ordered from least to most severe.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Severity {
    /// Diagnostic detail, usually disabled in production.
    Debug,
    /// Normal operational messages.
    #[default]
    Info,
    /// Something unexpected that the process recovered from.
    Warn,
    /// A failed operation.
    Error,
    /// Escalates to a panic after the record is written.
    Panic,
    /// Terminates the process after the record is written.
    Fatal,
}

/// Returned when text does not name a [`Severity`].
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("unrecognized level: {0:?}")]
pub struct UnknownSeverity(pub String);

impl Severity {
    /// Every severity in ascending order.
    pub const ALL: [Self; 6] = [
        Self::Debug,
        Self::Info,
        Self::Warn,
        Self::Error,
        Self::Panic,
        Self::Fatal,
    ];

    /// Lowercase name used by the lowercase level encodings.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "error",
            Self::Panic => "panic",
            Self::Fatal => "fatal",
        }
    }

    /// Uppercase name used by the capital level encodings.
    #[must_use]
    pub const fn as_capital_str(self) -> &'static str {
        match self {
            Self::Debug => "DEBUG",
            Self::Info => "INFO",
            Self::Warn => "WARN",
            Self::Error => "ERROR",
            Self::Panic => "PANIC",
            Self::Fatal => "FATAL",
        }
    }

    /// Parses `text`, falling back to [`Severity::Info`] when it is unknown.
    ///
    /// ```
    /// use logfacade::Severity;
    ///
    /// assert_eq!(Severity::parse_or_info("debug"), Severity::Debug);
    /// assert_eq!(Severity::parse_or_info("loud"), Severity::Info);
    /// ```
    #[must_use]
    pub fn parse_or_info(text: &str) -> Self {
        text.parse().unwrap_or(Self::Info)
    }
}

const DPANIC: &str = "dpanic";

impl FromStr for Severity {
    type Err = UnknownSeverity;

    /// Accepts the names in any ASCII case; empty text means Info.
    ///
    /// `dpanic` names a development-only panic level that this crate does not
    /// have; it parses as Panic so the threshold is never lowered.
    fn from_str(text: &str) -> Result<Self, Self::Err> {
        if text.is_empty() {
            return Ok(Self::Info);
        }
        if text.eq_ignore_ascii_case(DPANIC) {
            return Ok(Self::Panic);
        }
        Self::ALL
            .into_iter()
            .find(|severity| text.eq_ignore_ascii_case(severity.as_str()))
            .ok_or_else(|| UnknownSeverity(text.to_owned()))
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<tracing::Level> for Severity {
    fn from(level: tracing::Level) -> Self {
        match level {
            tracing::Level::TRACE | tracing::Level::DEBUG => Self::Debug,
            tracing::Level::INFO => Self::Info,
            tracing::Level::WARN => Self::Warn,
            tracing::Level::ERROR => Self::Error,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ordering_follows_escalation() {
        let mut shuffled = vec![
            Severity::Fatal,
            Severity::Debug,
            Severity::Error,
            Severity::Panic,
            Severity::Info,
            Severity::Warn,
        ];
        shuffled.sort();
        assert_eq!(shuffled, Severity::ALL);
    }

    #[test]
    fn parses_names_in_either_case() {
        for severity in Severity::ALL {
            assert_eq!(severity.as_str().parse::<Severity>(), Ok(severity));
            assert_eq!(severity.as_capital_str().parse::<Severity>(), Ok(severity));
        }
        assert_eq!("Warn".parse::<Severity>(), Ok(Severity::Warn));
    }

    #[test]
    fn dpanic_parses_as_panic() {
        assert_eq!("dpanic".parse::<Severity>(), Ok(Severity::Panic));
        assert_eq!("DPANIC".parse::<Severity>(), Ok(Severity::Panic));
        assert_eq!(Severity::parse_or_info("dpanic"), Severity::Panic);
    }

    #[test]
    fn empty_text_is_info() {
        assert_eq!("".parse::<Severity>(), Ok(Severity::Info));
    }

    #[test]
    fn unknown_text_is_rejected_but_degrades_to_info() {
        assert_eq!(
            "verbose".parse::<Severity>(),
            Err(UnknownSeverity("verbose".to_owned()))
        );
        assert_eq!(Severity::parse_or_info("verbose"), Severity::Info);
        assert_eq!(Severity::parse_or_info(" debug"), Severity::Info);
    }

    #[test]
    fn display_uses_lowercase_name() {
        assert_eq!(Severity::Warn.to_string(), "warn");
        assert_eq!(format!("{}", Severity::Fatal), "fatal");
    }

    #[test]
    fn tracing_levels_map_onto_severities() {
        assert_eq!(Severity::from(tracing::Level::TRACE), Severity::Debug);
        assert_eq!(Severity::from(tracing::Level::DEBUG), Severity::Debug);
        assert_eq!(Severity::from(tracing::Level::INFO), Severity::Info);
        assert_eq!(Severity::from(tracing::Level::WARN), Severity::Warn);
        assert_eq!(Severity::from(tracing::Level::ERROR), Severity::Error);
    }
}
