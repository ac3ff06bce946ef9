//! Node list format: one node id per line.

use crate::Result;
use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;

/// Read node ids, trimming whitespace and skipping blank lines.
pub fn read_nodes<R: Read>(reader: R) -> Result<Vec<String>> {
    let mut nodes = Vec::new();
    for line in BufReader::new(reader).lines() {
        let line = line?;
        let node = line.trim();
        if !node.is_empty() {
            nodes.push(node.to_owned());
        }
    }
    Ok(nodes)
}

/// Read a node list file.
pub fn read_nodes_file(path: impl AsRef<Path>) -> Result<Vec<String>> {
    read_nodes(File::open(path)?)
}
