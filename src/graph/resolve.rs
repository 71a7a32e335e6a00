//! Edge Resolver: match each node's raw link against the paths of the other nodes.
//!
//! Matching is textual. With the default [LinkMatch::Substring] strategy a link resolves to the
//! first node, in input order, whose path *contains* the link text. `b/index.md` linking to
//! `index.md` therefore resolves to whichever `*index.md` comes first. [LinkMatch::Exact] is
//! available when that is not wanted. Links are never normalised.
//!
//! Resolution is O(N·M): every linked node scans the whole collection.

use petgraph::graph::NodeIndex;
use std::{
    fmt::{Display, Formatter},
    str::FromStr,
};

use crate::{
    codec::GraphDiagnostic,
    error::{try_push, JigError},
    properties::{Edge, Node},
};

/// How a link is compared against candidate paths.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LinkMatch {
    /// The candidate path contains the link as a contiguous substring.
    #[default]
    Substring,
    /// The candidate path equals the link.
    Exact,
}

impl LinkMatch {
    pub fn matches(&self, path: &str, link: &str) -> bool {
        match self {
            LinkMatch::Substring => path.contains(link),
            LinkMatch::Exact => path == link,
        }
    }
}

impl FromStr for LinkMatch {
    type Err = JigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "substring" => Ok(LinkMatch::Substring),
            "exact" => Ok(LinkMatch::Exact),
            other => Err(JigError::Command(format!(
                "unknown link matching strategy '{other}' (expected 'substring' or 'exact')"
            ))),
        }
    }
}

impl Display for LinkMatch {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        match self {
            LinkMatch::Substring => write!(f, "substring"),
            LinkMatch::Exact => write!(f, "exact"),
        }
    }
}

/// Edges resolved from one node collection, plus the links that went nowhere.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Resolution {
    pub edges: Vec<Edge>,
    pub diagnostics: Vec<GraphDiagnostic>,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct EdgeResolver {
    strategy: LinkMatch,
}

impl EdgeResolver {
    pub fn new(strategy: LinkMatch) -> Self {
        EdgeResolver { strategy }
    }

    /// Index of the node `nodes[src]` links to: the first other node whose path matches its
    /// link. A node never resolves to itself.
    pub fn find_target(&self, nodes: &[Node], src: usize) -> Option<usize> {
        let link = nodes.get(src)?.link.as_str();
        if link.is_empty() {
            return None;
        }
        nodes
            .iter()
            .enumerate()
            .find(|(idx, candidate)| *idx != src && self.strategy.matches(&candidate.path, link))
            .map(|(idx, _)| idx)
    }

    /// Resolve every link in `nodes`. Edge indices refer to positions in `nodes`; each linked
    /// node contributes at most one edge, and edges come out in node order.
    pub fn resolve(&self, nodes: &[Node]) -> Result<Resolution, JigError> {
        let mut resolution = Resolution::default();
        for (src, node) in nodes.iter().enumerate() {
            if !node.has_link() {
                continue;
            }
            match self.find_target(nodes, src) {
                Some(dst) => try_push(
                    &mut resolution.edges,
                    Edge::parent(NodeIndex::new(src), NodeIndex::new(dst)),
                )?,
                None => try_push(
                    &mut resolution.diagnostics,
                    GraphDiagnostic::unresolved(&node.path, &node.link),
                )?,
            }
        }
        tracing::debug!(
            "Resolved {} edges using {} matching ({} unresolved)",
            resolution.edges.len(),
            self.strategy,
            resolution.diagnostics.len()
        );
        Ok(resolution)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scenario_nodes() -> Vec<Node> {
        vec![
            Node::with_fields("a.md", "1", "A", ""),
            Node::with_fields("b.md", "2", "B", "a.md"),
            Node::with_fields("c.md", "3", "C", "b.md"),
        ]
    }

    fn pairs(resolution: &Resolution) -> Vec<(usize, usize)> {
        resolution
            .edges
            .iter()
            .map(|e| (e.src.index(), e.dst.index()))
            .collect()
    }

    #[test]
    fn test_resolve_chain() {
        let resolution = EdgeResolver::default().resolve(&scenario_nodes()).unwrap();
        assert_eq!(pairs(&resolution), vec![(1, 0), (2, 1)]);
        assert!(resolution.diagnostics.is_empty());
    }

    #[test]
    fn test_resolve_first_substring_match_wins() {
        let nodes = vec![
            Node::with_fields("notes/intro/index.md", "1", "Intro", ""),
            Node::with_fields("notes/index.md", "2", "Index", ""),
            Node::with_fields("notes/child.md", "3", "Child", "index.md"),
        ];
        let resolution = EdgeResolver::default().resolve(&nodes).unwrap();
        assert_eq!(pairs(&resolution), vec![(2, 0)]);

        let exact = EdgeResolver::new(LinkMatch::Exact).resolve(&nodes).unwrap();
        assert!(exact.edges.is_empty());
        assert_eq!(exact.diagnostics.len(), 1);
    }

    #[test]
    fn test_resolve_exact_match() {
        let nodes = vec![
            Node::with_fields("x/index.md", "1", "X", ""),
            Node::with_fields("index.md", "2", "Top", ""),
            Node::with_fields("child.md", "3", "Child", "index.md"),
        ];
        let resolution = EdgeResolver::new(LinkMatch::Exact).resolve(&nodes).unwrap();
        assert_eq!(pairs(&resolution), vec![(2, 1)]);
    }

    #[test]
    fn test_unresolved_link_is_dropped() {
        let nodes = vec![
            Node::with_fields("a.md", "1", "A", ""),
            Node::with_fields("b.md", "2", "B", "nowhere.md"),
        ];
        let resolution = EdgeResolver::default().resolve(&nodes).unwrap();
        assert!(resolution.edges.is_empty());
        assert_eq!(
            resolution.diagnostics,
            vec![GraphDiagnostic::unresolved("b.md", "nowhere.md")]
        );
    }

    #[test]
    fn test_node_never_resolves_to_itself() {
        let nodes = vec![
            Node::with_fields("self.md", "1", "Self", "self.md"),
            Node::with_fields("other/self.md", "2", "Other", ""),
        ];
        let resolution = EdgeResolver::default().resolve(&nodes).unwrap();
        assert_eq!(pairs(&resolution), vec![(0, 1)]);

        let alone = vec![Node::with_fields("self.md", "1", "Self", "self.md")];
        let resolution = EdgeResolver::default().resolve(&alone).unwrap();
        assert!(resolution.edges.is_empty());
    }

    #[test]
    fn test_resolve_is_idempotent() {
        let nodes = scenario_nodes();
        let resolver = EdgeResolver::default();
        let first = resolver.resolve(&nodes).unwrap();
        let second = resolver.resolve(&nodes).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_at_most_one_edge_per_linked_node() {
        let nodes = vec![
            Node::with_fields("a.md", "1", "A", ""),
            Node::with_fields("aa.md", "2", "AA", ""),
            Node::with_fields("b.md", "3", "B", "a.md"),
            Node::with_fields("c.md", "4", "C", "a.md"),
            Node::with_fields("d.md", "5", "D", "zzz"),
        ];
        let linked = nodes.iter().filter(|n| n.has_link()).count();
        let resolution = EdgeResolver::default().resolve(&nodes).unwrap();
        assert!(resolution.edges.len() <= linked);
        assert_eq!(pairs(&resolution), vec![(2, 0), (3, 0)]);
    }

    #[test]
    fn test_link_match_from_str() {
        assert_eq!("substring".parse::<LinkMatch>().unwrap(), LinkMatch::Substring);
        assert_eq!(" Exact ".parse::<LinkMatch>().unwrap(), LinkMatch::Exact);
        assert!(matches!(
            "fuzzy".parse::<LinkMatch>(),
            Err(JigError::Command(_))
        ));
        assert_eq!(LinkMatch::Exact.to_string(), "exact");
    }
}
