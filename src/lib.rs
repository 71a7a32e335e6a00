//! # jig-core
//!
//! Turn a folder of markdown notes into a navigable graph and render it as a tree.
//!
//! ## Overview
//!
//! Each note is a plain markdown file that may carry an `id:` line, a `title:` line and one
//! labelled link naming its parent:
//!
//! ```text
//! id: 7f3c
//! title: Ownership
//!
//! Back to [the Rust notes](rust/index.md?label=parent).
//! ```
//!
//! Data flows strictly forward through three stages, each building its structures from scratch
//! for one run:
//!
//! - **Note Parser** ([`codec::NoteParser`]): paths → [`properties::Node`] records
//! - **Edge Resolver** ([`graph::EdgeResolver`]): nodes → parent [`properties::Edge`]s
//! - **Tree Renderer** ([`graph::TreeRenderer`]): nodes + edges → indented text
//!
//! The stages exchange plain CSV ([`codec::csv`]) so the `jig` binary can expose each one as a
//! separate filter in a shell pipeline.
//!
//! ## Quick Start
//!
//! ```rust
//! use jig_core::{
//!     graph::{EdgeResolver, NoteGraph, TreeFormat, TreeRenderer},
//!     properties::Node,
//! };
//!
//! # fn main() -> Result<(), jig_core::JigError> {
//! let nodes = vec![
//!     Node::with_fields("a.md", "1", "A", ""),
//!     Node::with_fields("b.md", "2", "B", "a.md"),
//!     Node::with_fields("c.md", "3", "C", "b.md"),
//! ];
//! let (graph, unresolved) = NoteGraph::build(nodes, &EdgeResolver::default())?;
//! assert!(unresolved.is_empty());
//!
//! let (text, _report) = TreeRenderer::new(&graph, TreeFormat::Plain).render_to_string()?;
//! assert_eq!(text, "A\n└── B\n    └── C\n");
//! # Ok(())
//! # }
//! ```
//!
//! ## Diagnostics
//!
//! A note that cannot be read, a malformed CSV line, a link that matches nothing, or a node the
//! renderer cannot reach from any root does not fail the run. Each becomes a
//! [`codec::GraphDiagnostic`] returned next to the stage's product, and the command layer logs
//! them through `tracing`. Only allocation failure is fatal ([`JigError::is_fatal`]).

pub mod codec;
pub mod commands;
pub mod error;
pub mod graph;
pub mod properties;
pub mod search;

pub use error::*;
