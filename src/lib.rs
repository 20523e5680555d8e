//! # argus-base
//!
//! Core symbol resolution library for JVM-language static analysis.
//!
//! This is the layer that turns declarations, whether found in an
//! analyzed source tree or only in a compiled dependency, into one
//! uniform set of symbol objects that can be queried, compared and
//! cross-referenced without caring where they came from.
//!
//! ## Module Structure (dependency order)
//!
//! ```text
//! analysis → parallel per-file driver over a shared symbol store
//!   ↓
//! sym      → symbol model, tree-backed + metadata-backed providers,
//!            cross-provenance equality, shared store
//!   ↓
//! tree     → declaration trees, as handed over by the parsing layer
//!   ↓
//! base     → primitives (FileId, TextRange, LineIndex)
//! ```
//!
//! Parsing, rule dispatch and reporting live in other crates; this one
//! starts where a parsed declaration tree ends.

/// Foundation types: FileId, source ranges
pub mod base;

/// Declaration trees: the boundary with the parsing layer
pub mod tree;

/// The symbol model and both symbol providers
pub mod sym;

/// Parallel analysis driver
pub mod analysis;

// Re-export commonly needed items
pub use analysis::AnalysisSession;
pub use base::{FileId, LineCol, LineIndex, TextRange, TextSize};
pub use sym::ast::attach_symbols;
pub use sym::meta::{MetadataLoader, TableLoader, TypeMetadata};
pub use sym::{
    ClassRef, ExecRef, FieldRef, Modifiers, SymbolEntry, SymbolError, SymbolStore, TypeKind,
    TypeRef,
};
pub use tree::{DeclTree, NodeId, TreeBuilder};
