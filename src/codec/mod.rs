//! Reading notes into [Node](crate::properties::Node)s and moving node and edge collections
//! between pipeline stages.
//!
//! ## Key Components
//!
//! - [`NoteParser`] - Reads note files and extracts `id`, `title` and the parent link
//! - [`NoteMatcher`] - The compiled extraction patterns, built once per batch
//! - [`csv`] - The flat `id,title,path,link` and edge CSV forms exchanged through pipes
//! - [`record`] - Line-at-a-time byte input, so one undecodable line costs only that line
//! - [`GraphDiagnostic`] - Per-record problems that never abort a run
//!
//! ## Input forms
//!
//! The first stage of a pipeline sees a newline-delimited list of paths and hands it to
//! [`NoteParser::parse_reader`]. Later stages see node CSV instead and use [`csv::read_nodes`].
//! [`read_node_input`] accepts either, deciding on the first non-empty line.

use std::io::{BufRead, Cursor, Read};

use crate::error::JigError;

pub mod csv;
pub mod diagnostic;
pub mod note;
pub mod record;

pub use diagnostic::GraphDiagnostic;
pub use note::{NodeBatch, NoteMatcher, NoteParser};
pub use record::{records, Record};

/// How a stream of nodes arrives on standard input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeInput {
    /// One note path per line
    Paths,
    /// Node CSV, as written by `jig nodes`
    Csv,
}

impl NodeInput {
    /// Decide on the first non-blank line. Works on raw bytes so that a stray invalid sequence
    /// later in the stream is left to the per-line readers.
    pub fn detect(content: &[u8]) -> NodeInput {
        let first = content
            .split(|b| *b == b'\n')
            .find(|line| !line.trim_ascii().is_empty());
        match first.map(std::str::from_utf8) {
            Some(Ok(line)) if csv::is_node_csv_header(line) => NodeInput::Csv,
            _ => NodeInput::Paths,
        }
    }
}

/// Read nodes from `reader`, which may hold either a path list or node CSV.
pub fn read_node_input<R: BufRead>(
    mut reader: R,
    parser: &NoteParser,
) -> Result<NodeBatch, JigError> {
    let mut content = Vec::new();
    reader.read_to_end(&mut content)?;
    match NodeInput::detect(&content) {
        NodeInput::Csv => csv::read_nodes(Cursor::new(content)),
        NodeInput::Paths => parser.parse_reader(Cursor::new(content)),
    }
}
