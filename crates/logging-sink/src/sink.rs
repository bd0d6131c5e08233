//! crates/logging-sink/src/sink.rs
//! Single output destination and identifier resolution.

use std::fmt;
use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

use crate::buffer::SharedBuffer;
use crate::error::SinkError;

const STDOUT: &str = "stdout";
const STDERR: &str = "stderr";
const FILE_SCHEME: &str = "file";

/// One output destination for encoded log records.
pub enum Sink {
    /// The process's standard output.
    Stdout,
    /// The process's standard error.
    Stderr,
    /// A file opened for appending.
    File {
        /// Path the file was opened from.
        path: PathBuf,
        /// Open handle, serialized per write.
        file: Mutex<File>,
    },
    /// An in-memory buffer.
    Buffer(SharedBuffer),
    /// An arbitrary writer supplied by the embedding application.
    Writer(Mutex<Box<dyn Write + Send>>),
}

impl Sink {
    /// Resolves a sink identifier.
    ///
    /// `"stdout"` and `"stderr"` name the standard streams. `file://` URLs and
    /// plain paths name files, which are created if missing and opened for
    /// appending. Any other URL scheme is rejected.
    ///
    /// # Examples
    ///
    /// ```
    /// use logfacade_sink::{Sink, SinkError};
    ///
    /// assert!(matches!(Sink::open("stdout"), Ok(Sink::Stdout)));
    /// assert!(matches!(Sink::open(""), Err(SinkError::EmptyPath)));
    /// assert!(matches!(
    ///     Sink::open("udp://127.0.0.1:514"),
    ///     Err(SinkError::UnsupportedScheme { .. })
    /// ));
    /// ```
    pub fn open(identifier: &str) -> Result<Self, SinkError> {
        let trimmed = identifier.trim();
        match trimmed {
            "" => Err(SinkError::EmptyPath),
            STDOUT => Ok(Self::Stdout),
            STDERR => Ok(Self::Stderr),
            _ => match trimmed.split_once("://") {
                Some((FILE_SCHEME, rest)) if !rest.is_empty() => Self::file(rest),
                Some((FILE_SCHEME, _)) => Err(SinkError::EmptyPath),
                Some((scheme, _)) => Err(SinkError::UnsupportedScheme {
                    scheme: scheme.to_owned(),
                    identifier: identifier.to_owned(),
                }),
                None => Self::file(trimmed),
            },
        }
    }

    /// Opens `path` for appending, creating it when it does not exist.
    pub fn file(path: impl AsRef<Path>) -> Result<Self, SinkError> {
        let path = path.as_ref().to_path_buf();
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .map_err(|source| SinkError::Open {
                path: path.clone(),
                source,
            })?;
        Ok(Self::File {
            path,
            file: Mutex::new(file),
        })
    }

    /// Wraps a shared in-memory buffer.
    #[must_use]
    pub fn buffer(buffer: SharedBuffer) -> Self {
        Self::Buffer(buffer)
    }

    /// Wraps an arbitrary writer.
    #[must_use]
    pub fn writer<W>(writer: W) -> Self
    where
        W: Write + Send + 'static,
    {
        Self::Writer(Mutex::new(Box::new(writer)))
    }

    /// Writes one complete record.
    pub fn write_record(&self, record: &[u8]) -> io::Result<()> {
        match self {
            Self::Stdout => io::stdout().lock().write_all(record),
            Self::Stderr => io::stderr().lock().write_all(record),
            Self::File { file, .. } => file
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .write_all(record),
            Self::Buffer(buffer) => {
                buffer.append(record);
                Ok(())
            }
            Self::Writer(writer) => writer
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .write_all(record),
        }
    }

    /// Flushes buffered output down to the destination.
    pub fn flush(&self) -> io::Result<()> {
        match self {
            Self::Stdout => io::stdout().lock().flush(),
            Self::Stderr => io::stderr().lock().flush(),
            Self::File { file, .. } => file.lock().unwrap_or_else(PoisonError::into_inner).flush(),
            Self::Buffer(_) => Ok(()),
            Self::Writer(writer) => writer.lock().unwrap_or_else(PoisonError::into_inner).flush(),
        }
    }
}

impl fmt::Debug for Sink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Stdout => f.write_str("Stdout"),
            Self::Stderr => f.write_str("Stderr"),
            Self::File { path, .. } => f.debug_struct("File").field("path", path).finish(),
            Self::Buffer(buffer) => f.debug_tuple("Buffer").field(buffer).finish(),
            Self::Writer(_) => f.write_str("Writer"),
        }
    }
}
