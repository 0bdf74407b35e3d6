//! Reader-based payload source.
//!
//! Reads a payload from any `Read`, typically stdin when the collection
//! agent pipes its output straight into the checker.

use std::io::{self, Read};

use anyhow::{Context, Result};

use super::PayloadSource;

/// A payload read once from a reader.
#[derive(Debug)]
pub struct ReaderSource<R> {
    reader: R,
    description: String,
}

impl<R: Read> ReaderSource<R> {
    pub fn new(reader: R, description: &str) -> Self {
        Self {
            reader,
            description: description.to_string(),
        }
    }
}

impl ReaderSource<io::Stdin> {
    /// Read the payload from standard input.
    pub fn stdin() -> Self {
        Self::new(io::stdin(), "stdin")
    }
}

impl<R: Read + std::fmt::Debug> PayloadSource for ReaderSource<R> {
    fn read(&mut self) -> Result<String> {
        let mut raw = String::new();
        self.reader
            .read_to_string(&mut raw)
            .with_context(|| format!("Read error: {}", self.description))?;
        Ok(raw)
    }

    fn description(&self) -> &str {
        &self.description
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use healthwatch_engine::{PayloadError, PayloadParser};
    use std::io::Cursor;

    #[test]
    fn test_reader_source_loads_table() {
        let data = br#"{"A0": {"health-numeric": 0}, "A1": {"health-numeric": 1}}"#;
        let mut source = ReaderSource::new(Cursor::new(data.to_vec()), "example");

        let table = source.load(&PayloadParser::new()).unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(source.description(), "example");
    }

    #[test]
    fn test_reader_source_is_consumed() {
        let mut source = ReaderSource::new(Cursor::new(b"[{\"name\": \"a\"}]".to_vec()), "once");
        assert!(source.load(&PayloadParser::new()).is_ok());

        let err = source.load(&PayloadParser::new()).unwrap_err();
        assert!(matches!(err.downcast_ref::<PayloadError>(), Some(PayloadError::Empty)));
    }
}
