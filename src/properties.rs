//! Node and edge records shared by every stage of the pipeline.

use petgraph::graph::NodeIndex;
use std::fmt::{Display, Formatter};

/// Maximum length, in bytes, of a [Node::id].
pub const ID_MAX_LEN: usize = 36;

/// The relationship tag carried by every resolved [Edge], and the `label=` value a note's link
/// must carry to be picked up as its outgoing reference.
pub const PARENT_LABEL: &str = "parent";

/// Truncate `raw` to at most [ID_MAX_LEN] bytes without splitting a UTF-8 character.
pub fn truncate_id(raw: &str) -> &str {
    if raw.len() <= ID_MAX_LEN {
        return raw;
    }
    let mut end = ID_MAX_LEN;
    while !raw.is_char_boundary(end) {
        end -= 1;
    }
    &raw[..end]
}

/// One candidate note file.
///
/// Only `path` is guaranteed to be non-empty. A field the note does not carry (or that could not
/// be read) is the empty string, never an error.
#[derive(Debug, Default, Clone, PartialEq, Eq, Hash)]
pub struct Node {
    /// Stable identifier from the note's `id:` line, at most [ID_MAX_LEN] bytes.
    pub id: String,
    pub path: String,
    pub title: String,
    /// Raw outgoing reference, not yet resolved against other nodes.
    pub link: String,
}

impl Node {
    pub fn new(path: impl Into<String>) -> Self {
        Node {
            path: path.into(),
            ..Default::default()
        }
    }

    /// Build a node from already-extracted fields, enforcing the id length limit.
    pub fn with_fields(
        path: impl Into<String>,
        id: &str,
        title: impl Into<String>,
        link: impl Into<String>,
    ) -> Self {
        Node {
            id: truncate_id(id).to_string(),
            path: path.into(),
            title: title.into(),
            link: link.into(),
        }
    }

    pub fn has_link(&self) -> bool {
        !self.link.is_empty()
    }

    /// Title when there is one, otherwise the path.
    pub fn display_name(&self) -> &str {
        if self.title.is_empty() {
            &self.path
        } else {
            &self.title
        }
    }
}

impl Display for Node {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// A resolved, directed relationship between two nodes of the same collection.
///
/// `src` and `dst` index into the node collection the edge was resolved against; they carry no
/// data of their own and are meaningless once that collection is gone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Edge {
    pub src: NodeIndex,
    pub dst: NodeIndex,
    pub label: &'static str,
}

impl Edge {
    pub fn parent(src: NodeIndex, dst: NodeIndex) -> Self {
        Edge {
            src,
            dst,
            label: PARENT_LABEL,
        }
    }
}
