//! Graph data structures for the note hierarchy.
//!
//! - [`NoteGraph`]: owns the node collection and the resolved edges between its nodes
//! - [`resolve`]: turns raw link references into edges
//! - [`tree`]: renders a [`NoteGraph`] as an indented hierarchy
//!
//! Nodes are added in input order, so the [NodeIndex] of a node is its position in the input.
//! Edges are kept in resolution order. Both orders are observable in the rendered output.

use petgraph::{graph::NodeIndex, Direction};
use std::ops::Deref;

use crate::{
    codec::GraphDiagnostic,
    error::JigError,
    properties::{Edge, Node},
};

pub mod resolve;
pub mod tree;

pub use resolve::{EdgeResolver, LinkMatch, Resolution};
pub use tree::{RenderReport, TreeFormat, TreeRenderer};

#[derive(Debug, Clone, Default)]
pub struct NoteGraph(pub petgraph::Graph<Node, &'static str>);

impl NoteGraph {
    /// Resolve the links of `nodes` and assemble the graph. Returns the graph together with the
    /// links that could not be resolved.
    pub fn build(
        nodes: Vec<Node>,
        resolver: &EdgeResolver,
    ) -> Result<(NoteGraph, Vec<GraphDiagnostic>), JigError> {
        let Resolution { edges, diagnostics } = resolver.resolve(&nodes)?;
        let graph = NoteGraph::from_parts(nodes, &edges)?;
        Ok((graph, diagnostics))
    }

    /// Assemble a graph from nodes and edges that index into them.
    pub fn from_parts(nodes: Vec<Node>, edges: &[Edge]) -> Result<NoteGraph, JigError> {
        let node_count = nodes.len();
        if let Some(bad) = edges
            .iter()
            .find(|e| e.src.index() >= node_count || e.dst.index() >= node_count)
        {
            return Err(JigError::NotFound(format!(
                "edge {} -> {} refers outside a collection of {node_count} nodes",
                bad.src.index(),
                bad.dst.index()
            )));
        }

        let mut graph = petgraph::Graph::with_capacity(node_count, edges.len());
        for node in nodes {
            graph.add_node(node);
        }
        for edge in edges {
            graph.add_edge(edge.src, edge.dst, edge.label);
        }
        Ok(NoteGraph(graph))
    }

    pub fn as_graph(&self) -> &petgraph::Graph<Node, &'static str> {
        &self.0
    }

    pub fn node(&self, idx: NodeIndex) -> &Node {
        &self.0[idx]
    }

    /// Nodes in input order.
    pub fn nodes(&self) -> impl Iterator<Item = (NodeIndex, &Node)> + '_ {
        self.0.node_indices().map(move |idx| (idx, &self.0[idx]))
    }

    /// Edges in resolution order.
    pub fn edges(&self) -> impl Iterator<Item = Edge> + '_ {
        self.0.raw_edges().iter().map(|edge| Edge {
            src: edge.source(),
            dst: edge.target(),
            label: edge.weight,
        })
    }

    /// Nodes with no resolved outgoing edge, in input order.
    pub fn roots(&self) -> Vec<NodeIndex> {
        self.0
            .node_indices()
            .filter(|idx| {
                self.0
                    .edges_directed(*idx, Direction::Outgoing)
                    .next()
                    .is_none()
            })
            .collect()
    }

    /// Sources of every edge pointing at `idx`, in edge order.
    pub fn children(&self, idx: NodeIndex) -> Vec<NodeIndex> {
        use petgraph::visit::EdgeRef;
        let mut incoming = self
            .0
            .edges_directed(idx, Direction::Incoming)
            .map(|edge| (edge.id(), edge.source()))
            .collect::<Vec<_>>();
        // petgraph walks adjacency lists newest-first
        incoming.sort_by_key(|(edge_idx, _)| *edge_idx);
        incoming.into_iter().map(|(_, source)| source).collect()
    }
}

impl Deref for NoteGraph {
    type Target = petgraph::Graph<Node, &'static str>;
    fn deref(&self) -> &petgraph::Graph<Node, &'static str> {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chain() -> NoteGraph {
        let nodes = vec![
            Node::with_fields("a.md", "1", "A", ""),
            Node::with_fields("b.md", "2", "B", "a.md"),
            Node::with_fields("c.md", "3", "C", "b.md"),
            Node::with_fields("d.md", "4", "D", "a.md"),
        ];
        let (graph, diagnostics) = NoteGraph::build(nodes, &EdgeResolver::default()).unwrap();
        assert!(diagnostics.is_empty());
        graph
    }

    #[test]
    fn test_node_indices_follow_input_order() {
        let graph = chain();
        let paths: Vec<&str> = graph.nodes().map(|(_, n)| n.path.as_str()).collect();
        assert_eq!(paths, vec!["a.md", "b.md", "c.md", "d.md"]);
        assert_eq!(graph.node(NodeIndex::new(2)).title, "C");
    }

    #[test]
    fn test_roots_and_children() {
        let graph = chain();
        let a = NodeIndex::new(0);
        let b = NodeIndex::new(1);
        let c = NodeIndex::new(2);
        let d = NodeIndex::new(3);

        assert_eq!(graph.roots(), vec![a]);
        assert_eq!(graph.children(a), vec![b, d]);
        assert_eq!(graph.children(b), vec![c]);
        assert!(graph.children(c).is_empty());
        assert!(graph.children(d).is_empty());
    }

    #[test]
    fn test_edges_keep_resolution_order() {
        let graph = chain();
        let edges: Vec<(usize, usize)> = graph
            .edges()
            .map(|e| (e.src.index(), e.dst.index()))
            .collect();
        assert_eq!(edges, vec![(1, 0), (2, 1), (3, 0)]);
        assert!(graph.edges().all(|e| e.label == "parent"));
    }

    #[test]
    fn test_from_parts_rejects_dangling_edges() {
        let nodes = vec![Node::new("a.md")];
        let edges = vec![Edge::parent(NodeIndex::new(0), NodeIndex::new(5))];
        let result = NoteGraph::from_parts(nodes, &edges);
        assert!(matches!(result, Err(JigError::NotFound(_))));
    }

    #[test]
    fn test_empty_graph() {
        let (graph, diagnostics) = NoteGraph::build(vec![], &EdgeResolver::default()).unwrap();
        assert_eq!(graph.node_count(), 0);
        assert!(graph.roots().is_empty());
        assert!(diagnostics.is_empty());
    }
}
