use std::{
    fmt::{Display, Formatter},
    io::{BufRead, Write},
};

use crate::{
    codec::{csv, diagnostic::log_all, read_node_input, NoteParser},
    error::JigError,
    graph::{EdgeResolver, LinkMatch, NoteGraph, TreeFormat, TreeRenderer},
    search::{write_hits, SearchFormat, Searcher},
};

/// Command interface between the `jig` front end and the pipeline stages. Each op reads one
/// input stream and writes one output stream; nothing survives between runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Op {
    /// Path list in, node CSV out
    Nodes,
    /// Node CSV in, edge CSV out
    Edges { strategy: LinkMatch },
    /// Path list or node CSV in, rendered tree out
    Tree {
        format: TreeFormat,
        strategy: LinkMatch,
    },
    /// Path list in, ranked matches out
    Search {
        pattern: String,
        format: SearchFormat,
        ignore_case: bool,
    },
}

impl Display for Op {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        match self {
            Op::Nodes => write!(f, "Nodes"),
            Op::Edges { strategy } => write!(f, "Edges(match: {strategy})"),
            Op::Tree { format, strategy } => {
                write!(f, "Tree(format: {format:?}, match: {strategy})")
            }
            Op::Search {
                pattern,
                format,
                ignore_case,
            } => write!(
                f,
                "Search({pattern:?}, format: {format}, ignore_case: {ignore_case})"
            ),
        }
    }
}

/// Counts from one run, for logging.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct OpStats {
    pub nodes: usize,
    pub edges: usize,
    pub records: usize,
    pub diagnostics: usize,
}

impl Display for OpStats {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "{} nodes, {} edges, {} records written, {} diagnostics",
            self.nodes, self.edges, self.records, self.diagnostics
        )
    }
}

impl Op {
    pub fn run<R: BufRead, W: Write>(&self, input: R, output: &mut W) -> Result<OpStats, JigError> {
        tracing::debug!("Running {self}");
        let stats = match self {
            Op::Nodes => nodes(input, output)?,
            Op::Edges { strategy } => edges(input, output, *strategy)?,
            Op::Tree { format, strategy } => tree(input, output, *format, *strategy)?,
            Op::Search {
                pattern,
                format,
                ignore_case,
            } => search(input, output, pattern, *format, *ignore_case)?,
        };
        output.flush()?;
        tracing::info!("{self}: {stats}");
        Ok(stats)
    }
}

pub fn nodes<R: BufRead, W: Write>(input: R, output: &mut W) -> Result<OpStats, JigError> {
    let parser = NoteParser::new()?;
    let batch = parser.parse_reader(input)?;
    batch.log_diagnostics();
    csv::write_nodes(output, &batch.nodes)?;
    Ok(OpStats {
        nodes: batch.len(),
        records: batch.len(),
        diagnostics: batch.diagnostics.len(),
        ..Default::default()
    })
}

pub fn edges<R: BufRead, W: Write>(
    input: R,
    output: &mut W,
    strategy: LinkMatch,
) -> Result<OpStats, JigError> {
    let batch = csv::read_nodes(input)?;
    batch.log_diagnostics();
    let (graph, unresolved) = NoteGraph::build(batch.nodes, &EdgeResolver::new(strategy))?;
    log_all(&unresolved);
    csv::write_edges(output, &graph)?;
    Ok(OpStats {
        nodes: graph.node_count(),
        edges: graph.edge_count(),
        records: graph.edge_count(),
        diagnostics: batch.diagnostics.len() + unresolved.len(),
    })
}

pub fn tree<R: BufRead, W: Write>(
    input: R,
    output: &mut W,
    format: TreeFormat,
    strategy: LinkMatch,
) -> Result<OpStats, JigError> {
    let parser = NoteParser::new()?;
    let batch = read_node_input(input, &parser)?;
    batch.log_diagnostics();
    let (graph, unresolved) = NoteGraph::build(batch.nodes, &EdgeResolver::new(strategy))?;
    log_all(&unresolved);
    let report = TreeRenderer::new(&graph, format).render(output)?;
    log_all(&report.diagnostics);
    Ok(OpStats {
        nodes: graph.node_count(),
        edges: graph.edge_count(),
        records: report.rendered,
        diagnostics: batch.diagnostics.len() + unresolved.len() + report.diagnostics.len(),
    })
}

pub fn search<R: BufRead, W: Write>(
    input: R,
    output: &mut W,
    pattern: &str,
    format: SearchFormat,
    ignore_case: bool,
) -> Result<OpStats, JigError> {
    let searcher = Searcher::new(pattern, ignore_case)?;
    let results = searcher.rank_reader(input)?;
    log_all(&results.diagnostics);
    write_hits(output, &results.hits, format)?;
    Ok(OpStats {
        records: results.hits.len(),
        diagnostics: results.diagnostics.len(),
        ..Default::default()
    })
}
