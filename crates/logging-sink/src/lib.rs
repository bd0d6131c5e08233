#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! crates/logging-sink/src/lib.rs
//!
//! # Overview
//!
//! `logfacade-sink` resolves the textual sink identifiers carried by logger
//! options (`"stdout"`, `"stderr"`, file paths and `file://` URLs) into
//! writable destinations, and groups them into a [`SinkSet`] that writes one
//! encoded record to every destination.
//!
//! # Design
//!
//! A [`Sink`] owns exactly one destination. Standard streams are locked per
//! write, files and custom writers sit behind their own mutex, and
//! [`SharedBuffer`] gives tests and embedders an in-memory destination whose
//! contents can be read back after logging. A [`SinkSet`] is immutable once
//! built; the logger that owns it is replaced wholesale rather than having
//! destinations added or removed.
//!
//! # Invariants
//!
//! - Each record is handed to a sink as a single `write_all` call, so records
//!   from concurrent writers never interleave within one sink.
//! - Writing continues with the remaining sinks when one sink fails; the first
//!   failure is returned to the caller after every sink has been attempted.
//!
//! # Errors
//!
//! Resolution failures are reported as [`SinkError`]. Write and flush
//! failures surface as [`std::io::Error`] values from the failing sink.
//!
//! # Examples
//!
//! ```
//! use logfacade_sink::{SharedBuffer, Sink, SinkSet};
//!
//! let buffer = SharedBuffer::new();
//! let sinks = SinkSet::from_sinks(vec![Sink::buffer(buffer.clone())]);
//!
//! sinks.write_record(b"{\"msg\":\"ready\"}\n")?;
//! assert_eq!(buffer.to_string_lossy(), "{\"msg\":\"ready\"}\n");
//! # Ok::<(), std::io::Error>(())
//! ```

mod buffer;
mod error;
mod set;
mod sink;

pub use buffer::SharedBuffer;
pub use error::SinkError;
pub use set::SinkSet;
pub use sink::Sink;
