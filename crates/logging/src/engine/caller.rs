//! crates/logging/src/engine/caller.rs
//! Source locations attached to records.

use std::fmt;
use std::panic::Location;

const SEPARATORS: [char; 2] = ['/', '\\'];

/// File and line that issued a log call.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Caller {
    file: &'static str,
    line: u32,
}

impl Caller {
    /// Builds a caller from a file path and line number.
    #[must_use]
    pub const fn new(file: &'static str, line: u32) -> Self {
        Self { file, line }
    }

    /// Location of the nearest caller not marked `#[track_caller]`.
    #[must_use]
    #[track_caller]
    pub fn here() -> Self {
        Self::from(Location::caller())
    }

    /// Full source path.
    #[must_use]
    pub const fn file(&self) -> &'static str {
        self.file
    }

    /// Line number.
    #[must_use]
    pub const fn line(&self) -> u32 {
        self.line
    }

    /// `dir/file.rs:line`, keeping only the last two path components.
    #[must_use]
    pub fn short(&self) -> String {
        format!("{}:{}", trim_to_parent(self.file), self.line)
    }

    /// `full/path/file.rs:line`.
    #[must_use]
    pub fn full(&self) -> String {
        self.to_string()
    }
}

impl From<&'static Location<'static>> for Caller {
    fn from(location: &'static Location<'static>) -> Self {
        Self::new(location.file(), location.line())
    }
}

impl fmt::Display for Caller {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.file, self.line)
    }
}

fn trim_to_parent(path: &str) -> &str {
    let Some(last) = path.rfind(SEPARATORS) else {
        return path;
    };
    match path[..last].rfind(SEPARATORS) {
        Some(parent) => &path[parent + 1..],
        None => path,
    }
}
