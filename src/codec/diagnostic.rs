//! Diagnostic types for per-record problems met while building and rendering a note graph.
//!
//! None of these abort a run. Stages hand them back next to their product so the caller can
//! decide whether to log, count or ignore them.

/// A non-fatal issue discovered while parsing notes, resolving links or rendering the tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GraphDiagnostic {
    /// The note file could not be opened or read. Its node is still emitted, with empty fields.
    UnreadableNote {
        /// Path of the note as it was given on input
        path: String,
        /// What the OS reported
        message: String,
    },

    /// An input line that could not be turned into a node and was skipped: a short CSV record,
    /// or any line that is not valid UTF-8
    MalformedRecord {
        /// 1-based line number in the input stream
        line: usize,
        content: String,
    },

    /// A node's link matched no other node's path, so it contributes no edge
    UnresolvedLink { path: String, link: String },

    /// Traversal reached a node it had already rendered
    CycleDetected { path: String },

    /// A node that is neither a root nor below one, e.g. a member of a closed link cycle
    Unreachable { path: String },
}

impl GraphDiagnostic {
    pub fn unreadable(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self::UnreadableNote {
            path: path.into(),
            message: message.into(),
        }
    }

    pub fn malformed(line: usize, content: impl Into<String>) -> Self {
        Self::MalformedRecord {
            line,
            content: content.into(),
        }
    }

    pub fn unresolved(path: impl Into<String>, link: impl Into<String>) -> Self {
        Self::UnresolvedLink {
            path: path.into(),
            link: link.into(),
        }
    }

    pub fn is_unreadable_note(&self) -> bool {
        matches!(self, Self::UnreadableNote { .. })
    }

    pub fn is_malformed_record(&self) -> bool {
        matches!(self, Self::MalformedRecord { .. })
    }

    pub fn is_unresolved_link(&self) -> bool {
        matches!(self, Self::UnresolvedLink { .. })
    }

    pub fn is_cycle(&self) -> bool {
        matches!(self, Self::CycleDetected { .. })
    }

    pub fn is_unreachable(&self) -> bool {
        matches!(self, Self::Unreachable { .. })
    }

    /// Path of the note this diagnostic is about, if it is about a note.
    pub fn path(&self) -> Option<&str> {
        match self {
            Self::UnreadableNote { path, .. }
            | Self::UnresolvedLink { path, .. }
            | Self::CycleDetected { path }
            | Self::Unreachable { path } => Some(path.as_str()),
            Self::MalformedRecord { .. } => None,
        }
    }

    /// Emit this diagnostic through `tracing` at the level it deserves: skipped records are
    /// routine in a filter pipeline, graph-shape problems are not.
    pub fn log(&self) {
        match self {
            Self::UnreadableNote { .. }
            | Self::MalformedRecord { .. }
            | Self::UnresolvedLink { .. } => tracing::debug!("{self}"),
            Self::CycleDetected { .. } | Self::Unreachable { .. } => tracing::warn!("{self}"),
        }
    }
}

impl std::fmt::Display for GraphDiagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnreadableNote { path, message } => {
                write!(f, "Unreadable note {path:?}: {message}")
            }
            Self::MalformedRecord { line, content } => {
                write!(f, "Malformed record on line {line}: {content:?}")
            }
            Self::UnresolvedLink { path, link } => {
                write!(f, "Unresolved link in {path:?}: {link:?} matches no note")
            }
            Self::CycleDetected { path } => write!(f, "Cycle detected at {path:?}"),
            Self::Unreachable { path } => {
                write!(f, "Note {path:?} is not reachable from any root")
            }
        }
    }
}

/// Log every diagnostic in `diagnostics`.
pub fn log_all(diagnostics: &[GraphDiagnostic]) {
    for diagnostic in diagnostics {
        diagnostic.log();
    }
}
