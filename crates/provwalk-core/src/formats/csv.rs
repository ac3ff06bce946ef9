//! CSV edge format.
//!
//! Expects headerless `subject,event,object` records.

use crate::{ProvEdge, Result};
use std::io::Read;
use tracing::warn;

/// CSV format handler.
pub struct Csv;

impl Csv {
    /// Read edges from CSV. `seq` is the 1-based record number.
    ///
    /// Records with fewer than three fields are skipped with a warning;
    /// fields past the third are ignored.
    pub fn read<R: Read>(reader: R) -> Result<Vec<ProvEdge>> {
        let mut reader = ::csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_reader(reader);

        let mut edges = Vec::new();

        for (idx, result) in reader.records().enumerate() {
            let record = result?;
            let seq = idx as u64 + 1;

            if record.len() < 3 {
                warn!(record = seq, fields = record.len(), "skipping short edge record");
                continue;
            }

            edges.push(ProvEdge::new(&record[0], &record[1], &record[2], seq));
        }

        Ok(edges)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_csv() {
        let input = "A,fork,B\nB,write,C,ignored\nshort,row\nC,read,D\n";
        let edges = Csv::read(input.as_bytes()).unwrap();

        assert_eq!(
            edges,
            vec![
                ProvEdge::new("A", "fork", "B", 1),
                ProvEdge::new("B", "write", "C", 2),
                ProvEdge::new("C", "read", "D", 4),
            ]
        );
    }

    #[test]
    fn test_quoted_fields() {
        let input = "\"/bin/sh\",execute,\"/tmp/a,b\"\n";
        let edges = Csv::read(input.as_bytes()).unwrap();

        assert_eq!(edges[0].object, "/tmp/a,b");
    }
}
