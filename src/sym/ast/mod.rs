//! The tree-backed symbol provider.
//!
//! Symbols for declarations that are present in an analyzed compilation
//! unit. They are created exactly once, by the naming pass
//! ([`attach_symbols`]), as a side effect of one traversal per tree.

mod class;
mod exec;
mod field;
mod maker;

pub use class::TreeClassSym;
pub use exec::TreeExecSym;
pub use field::TreeFieldSym;
pub use maker::attach_symbols;
