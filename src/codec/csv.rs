//! Flat CSV forms of the node and edge collections.
//!
//! Fields are written and read unescaped: a comma inside a title shifts every following field of
//! that record. Downstream filters in the pipeline rely on this exact shape, so it is kept as is.

use std::io::{BufRead, Write};

use crate::{
    codec::{diagnostic::GraphDiagnostic, note::NodeBatch, record::records},
    error::JigError,
    graph::NoteGraph,
    properties::Node,
};

pub const NODE_CSV_HEADER: &str = "id,title,path,link";
pub const EDGE_CSV_HEADER: &str = "src_id,src_title,dst_id,dst_title,label,src_path,dst_path";

/// Whether `line` is the node CSV header row.
pub fn is_node_csv_header(line: &str) -> bool {
    line.trim() == NODE_CSV_HEADER
}

pub fn write_nodes<'a, W, I>(out: &mut W, nodes: I) -> Result<(), JigError>
where
    W: Write,
    I: IntoIterator<Item = &'a Node>,
{
    writeln!(out, "{NODE_CSV_HEADER}")?;
    for node in nodes {
        writeln!(
            out,
            "{},{},{},{}",
            node.id, node.title, node.path, node.link
        )?;
    }
    Ok(())
}

pub fn write_edges<W: Write>(out: &mut W, graph: &NoteGraph) -> Result<(), JigError> {
    writeln!(out, "{EDGE_CSV_HEADER}")?;
    for edge in graph.edges() {
        let src = graph.node(edge.src);
        let dst = graph.node(edge.dst);
        writeln!(
            out,
            "{},{},{},{},{},{},{}",
            src.id, src.title, dst.id, dst.title, edge.label, src.path, dst.path
        )?;
    }
    Ok(())
}

/// Parse one `id,title,path,link` record. A trailing link column may be omitted; a record with
/// fewer than three columns or without a path is rejected.
pub fn parse_node_record(line: &str) -> Option<Node> {
    let mut fields = line.split(',');
    let id = fields.next()?;
    let title = fields.next()?;
    let path = fields.next()?.trim();
    let link = fields.next().unwrap_or_default().trim();
    if path.is_empty() {
        return None;
    }
    Some(Node::with_fields(path, id.trim(), title, link))
}

/// Read a node CSV stream. The header row is skipped when present, as are blank lines; lines that
/// do not parse, including lines that are not valid UTF-8, are reported and skipped.
pub fn read_nodes<R: BufRead>(reader: R) -> Result<NodeBatch, JigError> {
    let mut batch = NodeBatch::default();
    let mut seen_content = false;
    for record in records(reader) {
        let record = record?;
        let Some(line) = record.text() else {
            seen_content = true;
            batch.report(GraphDiagnostic::malformed(record.line, record.lossy()))?;
            continue;
        };
        if line.trim().is_empty() {
            continue;
        }
        if !seen_content {
            seen_content = true;
            if is_node_csv_header(line) {
                continue;
            }
        }
        match parse_node_record(line) {
            Some(node) => batch.push(node)?,
            None => batch.report(GraphDiagnostic::malformed(record.line, line))?,
        }
    }
    tracing::debug!(
        "Read {} nodes from CSV ({} skipped)",
        batch.len(),
        batch.diagnostics.len()
    );
    Ok(batch)
}
