//! Note Parser: turn note file paths into [Node]s.
//!
//! Extraction is line-oriented and deliberately shallow. Three patterns are matched against the
//! whole file content, each at most once (first occurrence wins):
//!
//! - `id: <value>` at the start of a line, truncated to [ID_MAX_LEN](crate::properties::ID_MAX_LEN) bytes
//! - `title: <value>` at the start of a line
//! - a markdown link whose destination ends in `?label=parent`, e.g.
//!   `[Up](../index.md?label=parent)`; only the part before `?` is kept
//!
//! All three are case-insensitive. Front matter and body are not told apart here; gating files
//! on their front matter is the job of whatever feeds paths into this stage.

use regex::{escape as re_escape, Regex, RegexBuilder};
use std::io::BufRead;

use crate::{
    codec::{
        diagnostic::{log_all, GraphDiagnostic},
        record::records,
    },
    error::{try_push, JigError},
    properties::{Node, PARENT_LABEL},
};

/// The three compiled extraction patterns.
///
/// Compiling is the expensive part, so one matcher is built up front and reused for every file
/// of a batch.
#[derive(Debug, Clone)]
pub struct NoteMatcher {
    id: Regex,
    title: Regex,
    link: Regex,
}

impl NoteMatcher {
    pub fn new() -> Result<Self, JigError> {
        Ok(NoteMatcher {
            id: field_pattern("id")?,
            title: field_pattern("title")?,
            link: link_pattern(PARENT_LABEL)?,
        })
    }

    /// Extract a node for `path` from already-loaded `content`.
    pub fn extract(&self, path: &str, content: &str) -> Node {
        let id = first_capture(&self.id, content);
        let title = first_capture(&self.title, content);
        let link = first_capture(&self.link, content);
        Node::with_fields(path, id, title, link)
    }
}

fn field_pattern(field: &str) -> Result<Regex, JigError> {
    Ok(
        RegexBuilder::new(&format!(r"^[ \t]*{}:[ \t]*(.*)$", re_escape(field)))
            .case_insensitive(true)
            .multi_line(true)
            .build()?,
    )
}

fn link_pattern(label: &str) -> Result<Regex, JigError> {
    Ok(RegexBuilder::new(&format!(
        r"\[[^\]\n]*\]\(([^)\n]*?)\?label={}\)",
        re_escape(label)
    ))
    .case_insensitive(true)
    .build()?)
}

fn first_capture<'a>(re: &Regex, content: &'a str) -> &'a str {
    re.captures(content)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim())
        .unwrap_or_default()
}

/// Nodes produced by one parsing pass, in input order, plus whatever went wrong on the way.
#[derive(Debug, Default, Clone)]
pub struct NodeBatch {
    pub nodes: Vec<Node>,
    pub diagnostics: Vec<GraphDiagnostic>,
}

impl NodeBatch {
    /// Append a node, failing only if the collection cannot grow.
    pub fn push(&mut self, node: Node) -> Result<(), JigError> {
        try_push(&mut self.nodes, node)
    }

    pub fn report(&mut self, diagnostic: GraphDiagnostic) -> Result<(), JigError> {
        try_push(&mut self.diagnostics, diagnostic)
    }

    pub fn log_diagnostics(&self) {
        log_all(&self.diagnostics);
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

/// Drives a [NoteMatcher] over a sequence of paths.
#[derive(Debug, Clone)]
pub struct NoteParser {
    matcher: NoteMatcher,
}

impl NoteParser {
    pub fn new() -> Result<Self, JigError> {
        Ok(NoteParser {
            matcher: NoteMatcher::new()?,
        })
    }

    /// Read one note. The node is produced even when the file cannot be read; in that case it
    /// only carries its path and the diagnostic says why.
    pub fn parse_file(&self, path: &str) -> (Node, Option<GraphDiagnostic>) {
        // The handle is opened and dropped inside `read`, never held across notes.
        match std::fs::read(path) {
            Ok(bytes) => {
                let content = String::from_utf8_lossy(&bytes);
                (self.matcher.extract(path, &content), None)
            }
            Err(e) => (
                Node::new(path),
                Some(GraphDiagnostic::unreadable(path, e.to_string())),
            ),
        }
    }

    /// Parse every path in order. Blank entries are skipped and trailing whitespace is ignored.
    pub fn parse_paths<I, S>(&self, paths: I) -> Result<NodeBatch, JigError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut batch = NodeBatch::default();
        for path in paths {
            self.parse_into(path.as_ref(), &mut batch)?;
        }
        tracing::debug!("Parsed {} notes", batch.len());
        Ok(batch)
    }

    /// Parse a newline-delimited path list, e.g. standard input. A line that is not valid UTF-8
    /// cannot name a node; it is reported as malformed and skipped.
    pub fn parse_reader<R: BufRead>(&self, reader: R) -> Result<NodeBatch, JigError> {
        let mut batch = NodeBatch::default();
        for record in records(reader) {
            let record = record?;
            match record.text() {
                Some(path) => self.parse_into(path, &mut batch)?,
                None => batch.report(GraphDiagnostic::malformed(record.line, record.lossy()))?,
            }
        }
        tracing::debug!("Parsed {} notes", batch.len());
        Ok(batch)
    }

    fn parse_into(&self, raw_path: &str, batch: &mut NodeBatch) -> Result<(), JigError> {
        let path = raw_path.trim_end();
        if path.is_empty() {
            return Ok(());
        }
        let (node, diagnostic) = self.parse_file(path);
        if let Some(diagnostic) = diagnostic {
            batch.report(diagnostic)?;
        }
        batch.push(node)
    }
}
