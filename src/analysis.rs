//! Analysis driver: per-file naming passes over a shared symbol store.
//!
//! Independent files are independent units of work. Each tree gets its own
//! single-threaded traversal (the naming pass shares no scope-tracking
//! state between files); only the metadata-backed symbol cache is shared,
//! and its lookup-or-create path is safe under concurrent first-time
//! resolution.

use std::sync::Arc;

use rayon::prelude::*;
use tracing::debug;

use crate::sym::ast::attach_symbols;
use crate::sym::meta::MetadataLoader;
use crate::sym::{ClassRef, SymbolStore};
use crate::tree::DeclTree;

/// One analysis run: a shared [`SymbolStore`] plus the parallel driver
/// for the naming passes.
pub struct AnalysisSession {
    store: Arc<SymbolStore>,
}

impl AnalysisSession {
    pub fn new(loader: impl MetadataLoader + 'static) -> Self {
        Self {
            store: SymbolStore::new(loader),
        }
    }

    pub fn with_store(store: Arc<SymbolStore>) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &Arc<SymbolStore> {
        &self.store
    }

    /// Run the naming pass over every tree, one parallel unit per file.
    /// Afterwards every declaration node carries its symbol.
    pub fn attach_all(&self, trees: &[DeclTree]) {
        debug!(files = trees.len(), "starting naming passes");
        trees.par_iter().for_each(attach_symbols);
    }

    /// Resolve an external type through the shared store.
    pub fn resolve(&self, binary_name: &str) -> Option<ClassRef> {
        self.store.resolve(binary_name)
    }

    /// Resolve an external type, falling back to an unresolved placeholder.
    pub fn resolve_or_unresolved(&self, binary_name: &str) -> ClassRef {
        self.store.resolve_or_unresolved(binary_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::base::FileId;
    use crate::sym::meta::TableLoader;
    use crate::sym::{Modifiers, TypeKind};
    use crate::tree::TreeBuilder;

    fn unit(file: u32, package: &str, class: &str) -> DeclTree {
        let mut b = TreeBuilder::new(FileId::new(file), package);
        b.push_type(TypeKind::Class, class, Modifiers::PUBLIC);
        b.push_method("run", Modifiers::PUBLIC, false);
        b.pop();
        b.pop();
        b.finish()
    }

    #[test]
    fn test_attach_all_covers_every_tree() {
        let trees: Vec<DeclTree> = (0..16)
            .map(|i| unit(i, "pack", &format!("Class{i}")))
            .collect();

        let session = AnalysisSession::new(TableLoader::new());
        session.attach_all(&trees);

        for (i, tree) in trees.iter().enumerate() {
            let class = tree.children(tree.root())[0];
            let sym = tree.class_symbol(class).unwrap();
            assert_eq!(sym.binary_name(), format!("pack.Class{i}"));
            assert_eq!(sym.declared_methods().len(), 1);
        }
    }
}
