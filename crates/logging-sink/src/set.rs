//! crates/logging-sink/src/set.rs
//! Ordered group of sinks receiving identical records.

use std::io;

use crate::error::SinkError;
use crate::sink::Sink;

/// Ordered, immutable collection of [`Sink`]s.
///
/// A record written to the set is written to every member in order. An empty
/// set discards records.
#[derive(Debug, Default)]
pub struct SinkSet {
    sinks: Vec<Sink>,
}

impl SinkSet {
    /// Resolves every identifier with [`Sink::open`].
    ///
    /// Resolution stops at the first identifier that fails; sinks opened before
    /// it are dropped.
    pub fn open<I, S>(identifiers: I) -> Result<Self, SinkError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let sinks = identifiers
            .into_iter()
            .map(|identifier| Sink::open(identifier.as_ref()))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { sinks })
    }

    /// Builds a set from already constructed sinks.
    #[must_use]
    pub fn from_sinks(sinks: Vec<Sink>) -> Self {
        Self { sinks }
    }

    /// Number of sinks in the set.
    #[must_use]
    pub fn len(&self) -> usize {
        self.sinks.len()
    }

    /// Reports whether the set discards everything.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sinks.is_empty()
    }

    /// Iterates over the sinks in write order.
    pub fn iter(&self) -> std::slice::Iter<'_, Sink> {
        self.sinks.iter()
    }

    /// Writes `record` to every sink.
    ///
    /// All sinks are attempted; the first failure is returned.
    pub fn write_record(&self, record: &[u8]) -> io::Result<()> {
        first_error(self.sinks.iter().map(|sink| sink.write_record(record)))
    }

    /// Flushes every sink; the first failure is returned.
    pub fn flush(&self) -> io::Result<()> {
        first_error(self.sinks.iter().map(Sink::flush))
    }
}

impl<'a> IntoIterator for &'a SinkSet {
    type Item = &'a Sink;
    type IntoIter = std::slice::Iter<'a, Sink>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

fn first_error(results: impl Iterator<Item = io::Result<()>>) -> io::Result<()> {
    let mut first = None;
    for result in results {
        if let Err(error) = result {
            first.get_or_insert(error);
        }
    }
    first.map_or(Ok(()), Err)
}
