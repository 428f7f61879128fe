//! In-memory BuildGraph implementation.
//!
//! Records live in three identity-keyed `IndexMap`s; a record's position in
//! its map is its arena index. Methods are split by concern across the
//! submodules, each adding an `impl BuildGraph` block.

mod construction;
mod dependencies;
mod graph;
mod queries;
mod serialization;
mod statistics;

pub use construction::GraphBuilder;
pub use graph::BuildGraph;
