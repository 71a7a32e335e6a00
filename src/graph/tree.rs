//! Tree Renderer: print a [NoteGraph] as an indented hierarchy.
//!
//! ```text
//! A
//! ├── B
//! │   └── C
//! └── D
//! ```
//!
//! Roots (nodes without a resolved parent) are printed flush left in input order; children follow
//! depth-first in edge order. Traversal uses an explicit stack and a visited map, so neither a
//! deep hierarchy nor a cyclic edge set can run it away.

use petgraph::{
    graph::NodeIndex,
    visit::{VisitMap, Visitable},
};
use std::io::Write;

use crate::{
    codec::{csv, GraphDiagnostic},
    error::{try_push, JigError},
    graph::NoteGraph,
    properties::Node,
};

const BRANCH: &str = "├── ";
const LAST_BRANCH: &str = "└── ";
const PIPE_INDENT: &str = "│   ";
const SPACE_INDENT: &str = "    ";

/// Output form selected by `-f/--format`.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TreeFormat {
    /// Title (or path) per line
    #[default]
    Plain,
    /// `[title](path)` per line
    Markdown,
    /// Node CSV, a blank line, then edge CSV. No tree shape.
    Csv,
}

impl From<&str> for TreeFormat {
    /// `md` and `csv` are recognised; anything else is the plain listing.
    fn from(value: &str) -> Self {
        match value.trim() {
            "md" => TreeFormat::Markdown,
            "csv" => TreeFormat::Csv,
            _ => TreeFormat::Plain,
        }
    }
}

impl From<Option<&str>> for TreeFormat {
    fn from(value: Option<&str>) -> Self {
        value.map(TreeFormat::from).unwrap_or_default()
    }
}

/// What a render pass saw besides the text it wrote.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RenderReport {
    /// Nodes written at depth 0, in output order
    pub roots: Vec<NodeIndex>,
    /// Total nodes written
    pub rendered: usize,
    pub diagnostics: Vec<GraphDiagnostic>,
}

/// A node waiting on the traversal stack, with everything needed to print its line.
struct Pending {
    idx: NodeIndex,
    depth: usize,
    /// Indentation inherited from the ancestors
    prefix: String,
    is_last: bool,
}

pub struct TreeRenderer<'a> {
    graph: &'a NoteGraph,
    format: TreeFormat,
}

impl<'a> TreeRenderer<'a> {
    pub fn new(graph: &'a NoteGraph, format: TreeFormat) -> Self {
        TreeRenderer { graph, format }
    }

    pub fn render<W: Write>(&self, out: &mut W) -> Result<RenderReport, JigError> {
        match self.format {
            TreeFormat::Csv => self.render_csv(out),
            TreeFormat::Plain | TreeFormat::Markdown => self.render_tree(out),
        }
    }

    /// Render into a `String`, mostly for tests and embedding.
    pub fn render_to_string(&self) -> Result<(String, RenderReport), JigError> {
        let mut buf = Vec::new();
        let report = self.render(&mut buf)?;
        let text = String::from_utf8(buf)
            .map_err(|e| JigError::Serialization(format!("rendered tree is not UTF-8: {e}")))?;
        Ok((text, report))
    }

    fn label(&self, node: &Node) -> String {
        match self.format {
            TreeFormat::Markdown => format!("[{}]({})", node.display_name(), node.path),
            _ => node.display_name().to_string(),
        }
    }

    fn render_csv<W: Write>(&self, out: &mut W) -> Result<RenderReport, JigError> {
        csv::write_nodes(out, self.graph.nodes().map(|(_, node)| node))?;
        writeln!(out)?;
        csv::write_edges(out, self.graph)?;
        Ok(RenderReport {
            rendered: self.graph.node_count(),
            ..Default::default()
        })
    }

    fn render_tree<W: Write>(&self, out: &mut W) -> Result<RenderReport, JigError> {
        let mut report = RenderReport::default();
        let mut visited = self.graph.as_graph().visit_map();
        let mut stack: Vec<Pending> = Vec::new();

        for root in self.graph.roots() {
            if !visited.visit(root) {
                continue;
            }
            try_push(&mut report.roots, root)?;
            try_push(
                &mut stack,
                Pending {
                    idx: root,
                    depth: 0,
                    prefix: String::new(),
                    is_last: true,
                },
            )?;

            while let Some(pending) = stack.pop() {
                let node = self.graph.node(pending.idx);
                if pending.depth == 0 {
                    writeln!(out, "{}", self.label(node))?;
                } else {
                    let connector = if pending.is_last { LAST_BRANCH } else { BRANCH };
                    writeln!(out, "{}{}{}", pending.prefix, connector, self.label(node))?;
                }
                report.rendered += 1;

                let child_prefix = match pending.depth {
                    0 => String::new(),
                    _ if pending.is_last => format!("{}{}", pending.prefix, SPACE_INDENT),
                    _ => format!("{}{}", pending.prefix, PIPE_INDENT),
                };

                let mut children = Vec::new();
                for child in self.graph.children(pending.idx) {
                    if visited.visit(child) {
                        try_push(&mut children, child)?;
                    } else {
                        try_push(
                            &mut report.diagnostics,
                            GraphDiagnostic::CycleDetected {
                                path: self.graph.node(child).path.clone(),
                            },
                        )?;
                    }
                }

                let last = children.len().saturating_sub(1);
                // Reversed so the first child is popped first
                for (pos, child) in children.into_iter().enumerate().rev() {
                    try_push(
                        &mut stack,
                        Pending {
                            idx: child,
                            depth: pending.depth + 1,
                            prefix: child_prefix.clone(),
                            is_last: pos == last,
                        },
                    )?;
                }
            }
        }

        for (idx, node) in self.graph.nodes() {
            if !visited.is_visited(&idx) {
                try_push(
                    &mut report.diagnostics,
                    GraphDiagnostic::Unreachable {
                        path: node.path.clone(),
                    },
                )?;
            }
        }

        tracing::debug!(
            "Rendered {} of {} nodes from {} roots",
            report.rendered,
            self.graph.node_count(),
            report.roots.len()
        );
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        graph::EdgeResolver,
        properties::{Edge, Node},
    };

    fn build(nodes: Vec<Node>) -> NoteGraph {
        NoteGraph::build(nodes, &EdgeResolver::default()).unwrap().0
    }

    fn render(graph: &NoteGraph, format: TreeFormat) -> (String, RenderReport) {
        TreeRenderer::new(graph, format).render_to_string().unwrap()
    }

    #[test]
    fn test_plain_chain() {
        let graph = build(vec![
            Node::with_fields("a.md", "1", "A", ""),
            Node::with_fields("b.md", "2", "B", "a.md"),
            Node::with_fields("c.md", "3", "C", "b.md"),
        ]);
        let (text, report) = render(&graph, TreeFormat::Plain);
        assert_eq!(text, "A\n└── B\n    └── C\n");
        assert_eq!(report.rendered, 3);
        assert!(report.diagnostics.is_empty());
    }

    #[test]
    fn test_plain_siblings_and_pipes() {
        let graph = build(vec![
            Node::with_fields("a.md", "1", "A", ""),
            Node::with_fields("b.md", "2", "B", "a.md"),
            Node::with_fields("c.md", "3", "C", "b.md"),
            Node::with_fields("d.md", "4", "D", "a.md"),
            Node::with_fields("e.md", "5", "E", "c.md"),
            Node::with_fields("f.md", "6", "F", "b.md"),
        ]);
        let (text, _) = render(&graph, TreeFormat::Plain);
        let expected = "\
A
├── B
│   ├── C
│   │   └── E
│   └── F
└── D
";
        assert_eq!(text, expected);
    }

    #[test]
    fn test_untitled_nodes_render_their_path() {
        let graph = build(vec![
            Node::new("missing.md"),
            Node::with_fields("a.md", "1", "A", ""),
        ]);
        let (text, report) = render(&graph, TreeFormat::Plain);
        assert_eq!(text, "missing.md\nA\n");
        assert_eq!(report.roots.len(), 2);
    }

    #[test]
    fn test_markdown_format() {
        let graph = build(vec![
            Node::with_fields("a.md", "1", "A", ""),
            Node::with_fields("b.md", "2", "B", "a.md"),
            Node::with_fields("c.md", "3", "", "a.md"),
        ]);
        let (text, _) = render(&graph, TreeFormat::Markdown);
        assert_eq!(text, "[A](a.md)\n├── [B](b.md)\n└── [c.md](c.md)\n");
    }

    #[test]
    fn test_csv_format_is_flat() {
        let graph = build(vec![
            Node::with_fields("a.md", "1", "A", ""),
            Node::with_fields("b.md", "2", "B", "a.md"),
        ]);
        let (text, _) = render(&graph, TreeFormat::Csv);
        let expected = "\
id,title,path,link
1,A,a.md,
2,B,b.md,a.md

src_id,src_title,dst_id,dst_title,label,src_path,dst_path
2,B,1,A,parent,b.md,a.md
";
        assert_eq!(text, expected);
    }

    #[test]
    fn test_unresolved_link_becomes_root() {
        let graph = build(vec![
            Node::with_fields("a.md", "1", "A", ""),
            Node::with_fields("b.md", "2", "B", "nowhere.md"),
        ]);
        let (text, report) = render(&graph, TreeFormat::Plain);
        assert_eq!(text, "A\nB\n");
        assert_eq!(report.roots, vec![NodeIndex::new(0), NodeIndex::new(1)]);
    }

    #[test]
    fn test_closed_cycle_is_reported_unreachable() {
        let graph = build(vec![
            Node::with_fields("root.md", "0", "Root", ""),
            Node::with_fields("x.md", "1", "X", "y.md"),
            Node::with_fields("y.md", "2", "Y", "x.md"),
        ]);
        let (text, report) = render(&graph, TreeFormat::Plain);
        assert_eq!(text, "Root\n");
        let unreachable: Vec<&str> = report
            .diagnostics
            .iter()
            .filter(|d| d.is_unreachable())
            .filter_map(|d| d.path())
            .collect();
        assert_eq!(unreachable, vec!["x.md", "y.md"]);
    }

    #[test]
    fn test_revisit_is_reported_not_rendered_twice() {
        // Hand-built edge set where "shared" has two parents and a back edge closes a loop
        let nodes = vec![
            Node::with_fields("top.md", "0", "Top", ""),
            Node::with_fields("left.md", "1", "Left", ""),
            Node::with_fields("shared.md", "2", "Shared", ""),
        ];
        let edges = vec![
            Edge::parent(NodeIndex::new(1), NodeIndex::new(0)),
            Edge::parent(NodeIndex::new(2), NodeIndex::new(0)),
            Edge::parent(NodeIndex::new(2), NodeIndex::new(1)),
        ];
        let graph = NoteGraph::from_parts(nodes, &edges).unwrap();
        let (text, report) = render(&graph, TreeFormat::Plain);

        assert_eq!(text, "Top\n├── Left\n└── Shared\n");
        assert_eq!(report.rendered, 3);
        assert_eq!(
            report.diagnostics,
            vec![GraphDiagnostic::CycleDetected {
                path: "shared.md".to_string()
            }]
        );
    }

    #[test]
    fn test_render_is_deterministic() {
        let nodes = vec![
            Node::with_fields("a.md", "1", "A", ""),
            Node::with_fields("b.md", "2", "B", "a.md"),
            Node::with_fields("c.md", "3", "C", "a.md"),
        ];
        let graph = build(nodes.clone());
        let again = build(nodes);
        assert_eq!(
            render(&graph, TreeFormat::Plain).0,
            render(&again, TreeFormat::Plain).0
        );
    }

    #[test]
    fn test_format_from_flag_value() {
        assert_eq!(TreeFormat::from("md"), TreeFormat::Markdown);
        assert_eq!(TreeFormat::from("csv"), TreeFormat::Csv);
        assert_eq!(TreeFormat::from("json"), TreeFormat::Plain);
        assert_eq!(TreeFormat::from(None), TreeFormat::Plain);
    }
}
