//! crates/logging/src/options.rs
//! Logger options supplied by the embedding application.

use serde::{Deserialize, Serialize};

use crate::engine::Encoding;
use crate::severity::{Severity, UnknownSeverity};

/// Default severity name.
pub const DEFAULT_LEVEL: &str = "info";
/// Default encoding name.
pub const DEFAULT_FORMAT: &str = "console";

/// Configuration used to build the global logger.
///
/// Options are plain data. [`crate::init`] takes them by value and shares the
/// installed copy read-only, so the configuration of a running logger can be
/// read back but never edited in place.
///
/// | Field | Default |
/// |-------|---------|
/// | `level` | `"info"` |
/// | `format` | `"console"` |
/// | `output_paths` | `["stdout"]` |
/// | `error_output_paths` | `["stderr"]` |
/// | `enable_color` | `false` |
/// | `enable_caller` | `true` |
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
#[cfg_attr(feature = "cli", derive(clap::Args))]
pub struct Options {
    /// Minimum severity to write; unknown names fall back to `info`.
    #[cfg_attr(feature = "cli", arg(long = "log.level", default_value = DEFAULT_LEVEL))]
    pub level: String,

    /// Record encoding, `json` or `console`.
    #[cfg_attr(feature = "cli", arg(long = "log.format", default_value = DEFAULT_FORMAT))]
    pub format: String,

    /// Destinations for records: `stdout`, `stderr`, paths or `file://` URLs.
    #[cfg_attr(
        feature = "cli",
        arg(long = "log.output-paths", value_delimiter = ',', default_value = "stdout")
    )]
    pub output_paths: Vec<String>,

    /// Destinations for the logger's own errors, such as failed sink writes.
    #[cfg_attr(
        feature = "cli",
        arg(long = "log.error-output-paths", value_delimiter = ',', default_value = "stderr")
    )]
    pub error_output_paths: Vec<String>,

    /// Render level names in color. Meant for terminals, not files.
    #[cfg_attr(
        feature = "cli",
        arg(long = "log.enable-color", action = clap::ArgAction::Set, default_value_t = false)
    )]
    pub enable_color: bool,

    /// Include the calling file and line in each record.
    #[cfg_attr(
        feature = "cli",
        arg(long = "log.enable-caller", action = clap::ArgAction::Set, default_value_t = true)
    )]
    pub enable_caller: bool,
}

/// Problems [`Options::validate`] can report.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum OptionsError {
    /// The level does not name a severity. [`crate::init`] would use `info`.
    #[error(transparent)]
    Level(#[from] UnknownSeverity),

    /// The format is neither `json` nor `console`.
    #[error("unknown log format {0:?}, expected \"json\" or \"console\"")]
    Format(String),
}

impl Default for Options {
    fn default() -> Self {
        Self {
            level: DEFAULT_LEVEL.to_owned(),
            format: DEFAULT_FORMAT.to_owned(),
            output_paths: vec!["stdout".to_owned()],
            error_output_paths: vec!["stderr".to_owned()],
            enable_color: false,
            enable_caller: true,
        }
    }
}

impl Options {
    /// Returns the default options.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Severity the installed logger will use as its threshold.
    #[must_use]
    pub fn severity(&self) -> Severity {
        Severity::parse_or_info(&self.level)
    }

    /// Checks every problem that would otherwise be silently degraded or only
    /// discovered when the logger is built.
    ///
    /// Sink paths are not opened here.
    pub fn validate(&self) -> Result<(), Vec<OptionsError>> {
        let mut errors = Vec::new();
        if let Err(error) = self.level.parse::<Severity>() {
            errors.push(OptionsError::Level(error));
        }
        if self.format.parse::<Encoding>().is_err() {
            errors.push(OptionsError::Format(self.format.clone()));
        }
        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }
}
