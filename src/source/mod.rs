//! Payload sources.
//!
//! A source hands over one raw payload per run. The engine never fetches
//! data itself; whatever collected the payload (a Redfish agent, a storage
//! array export) wrote it to a file or a pipe.

mod file;
mod reader;

pub use file::FileSource;
pub use reader::ReaderSource;

use std::fmt::Debug;

use anyhow::Result;
use healthwatch_engine::{EntityTable, PayloadParser};

/// Trait for reading a payload from somewhere.
///
/// # Example
///
/// ```no_run
/// use healthwatch::{FileSource, PayloadSource};
/// use healthwatch_engine::PayloadParser;
///
/// let mut source = FileSource::new("thermal.json");
/// let table = source.load(&PayloadParser::new()).unwrap();
/// println!("{} entities from {}", table.len(), source.description());
/// ```
pub trait PayloadSource: Debug {
    /// Read the raw payload text.
    fn read(&mut self) -> Result<String>;

    /// Returns a human-readable description of the source.
    fn description(&self) -> &str;

    /// Read and parse the payload.
    ///
    /// Parse failures keep their [`healthwatch_engine::PayloadError`] so the
    /// caller can tell them apart from I/O errors.
    fn load(&mut self, parser: &PayloadParser) -> Result<EntityTable> {
        let raw = self.read()?;
        let table = parser.parse(&raw)?;
        tracing::debug!(source = self.description(), entities = table.len(), "loaded payload");
        Ok(table)
    }
}
