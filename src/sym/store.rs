//! The shared symbol store — factory and cache for metadata-backed symbols.

use std::collections::hash_map::Entry;
use std::sync::Arc;

use parking_lot::RwLock;
use rustc_hash::FxHashMap;
use smol_str::SmolStr;
use tracing::{debug, trace};

use super::meta::{
    array_of, MetaClassSym, MetadataLoader, PrimitiveKind, PrimitiveSym, UnresolvedClassSym,
};
use super::{ClassRef, SymbolError};

/// Lookup-or-create cache for external type symbols, shared across all
/// concurrently analyzed files.
///
/// The same dependency is referenced from many files, so resolution goes
/// through one store per analysis run. Correctness never depends on the
/// cache: two instances created for the same element by a lost race still
/// compare equal. The cache only keeps memory and classpath traffic down,
/// which is why the lookup path takes a read lock and re-checks under the
/// write lock before inserting; the first inserted instance wins.
///
/// Constructed behind `Arc` because the symbols it creates keep a weak
/// handle back to it for recursive resolution (superclasses, interfaces,
/// nested classes).
pub struct SymbolStore {
    loader: Arc<dyn MetadataLoader>,
    resolved: RwLock<FxHashMap<SmolStr, ClassRef>>,
    unresolved: RwLock<FxHashMap<SmolStr, ClassRef>>,
    primitives: FxHashMap<PrimitiveKind, ClassRef>,
}

impl SymbolStore {
    pub fn new(loader: impl MetadataLoader + 'static) -> Arc<Self> {
        let primitives = PrimitiveKind::ALL
            .iter()
            .map(|&kind| (kind, ClassRef::new(PrimitiveSym::new(kind))))
            .collect();
        Arc::new(Self {
            loader: Arc::new(loader),
            resolved: RwLock::new(FxHashMap::default()),
            unresolved: RwLock::new(FxHashMap::default()),
            primitives,
        })
    }

    /// Resolve an external type by binary name. `None` means the classpath
    /// capability does not know the type, which is a normal condition, not
    /// an error.
    pub fn resolve(self: &Arc<Self>, binary_name: &str) -> Option<ClassRef> {
        // Fast path: already resolved (read lock)
        {
            let cache = self.resolved.read();
            if let Some(sym) = cache.get(binary_name) {
                return Some(sym.clone());
            }
        }

        let meta = match self.loader.load(binary_name) {
            Some(meta) => meta,
            None => {
                trace!(name = %binary_name, "external type not on the classpath");
                return None;
            }
        };
        let sym = ClassRef::from_arc(Arc::new(MetaClassSym::new(meta, Arc::downgrade(self))));

        // Slow path: insert (write lock). A racing thread may have beaten
        // us here; its instance wins and ours is dropped.
        let mut cache = self.resolved.write();
        match cache.entry(SmolStr::new(binary_name)) {
            Entry::Occupied(entry) => Some(entry.get().clone()),
            Entry::Vacant(entry) => {
                debug!(name = %binary_name, "resolved external type");
                Some(entry.insert(sym).clone())
            }
        }
    }

    /// Resolve an external type, falling back to the unresolved
    /// placeholder when the classpath cannot supply it. Total.
    pub fn resolve_or_unresolved(self: &Arc<Self>, binary_name: &str) -> ClassRef {
        if let Some(sym) = self.resolve(binary_name) {
            return sym;
        }

        {
            let cache = self.unresolved.read();
            if let Some(sym) = cache.get(binary_name) {
                return sym.clone();
            }
        }

        let sym = ClassRef::new(UnresolvedClassSym::new(binary_name));
        let mut cache = self.unresolved.write();
        match cache.entry(SmolStr::new(binary_name)) {
            Entry::Occupied(entry) => entry.get().clone(),
            Entry::Vacant(entry) => {
                trace!(name = %binary_name, "recorded unresolved reference");
                entry.insert(sym).clone()
            }
        }
    }

    /// The symbol for a primitive type. Always the same instance per store.
    pub fn primitive(&self, kind: PrimitiveKind) -> ClassRef {
        self.primitives[&kind].clone()
    }

    /// Derive an array symbol over a component.
    pub fn array(&self, component: ClassRef) -> Result<ClassRef, SymbolError> {
        array_of(component)
    }

    /// Number of distinct external types resolved so far.
    pub fn resolved_count(&self) -> usize {
        self.resolved.read().len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sym::meta::{TableLoader, TypeMetadata};
    use crate::sym::{Modifiers, TypeKind};

    fn store_with(types: Vec<TypeMetadata>) -> Arc<SymbolStore> {
        let mut loader = TableLoader::new();
        for meta in types {
            loader.insert(meta);
        }
        SymbolStore::new(loader)
    }

    #[test]
    fn test_resolve_miss_is_none() {
        let store = store_with(vec![]);
        assert!(store.resolve("no.such.Class").is_none());
    }

    #[test]
    fn test_resolve_caches_instance() {
        let store = store_with(vec![TypeMetadata::new("some.pack.Class", TypeKind::Class)]);

        let a = store.resolve("some.pack.Class").unwrap();
        let b = store.resolve("some.pack.Class").unwrap();

        assert!(a.same_instance(&b));
        assert_eq!(store.resolved_count(), 1);
    }

    #[test]
    fn test_superclass_resolved_recursively() {
        let store = store_with(vec![
            TypeMetadata::new("java.lang.Object", TypeKind::Class),
            TypeMetadata::new("some.pack.Class", TypeKind::Class)
                .with_superclass("java.lang.Object")
                .with_interface("java.io.Serializable"),
        ]);

        let sym = store.resolve("some.pack.Class").unwrap();

        let superclass = sym.superclass().unwrap();
        assert_eq!(superclass.binary_name(), "java.lang.Object");
        assert!(!superclass.is_unresolved());
        // the root type has no superclass
        assert!(superclass.superclass().is_none());

        // interfaces missing from the classpath fall back to unresolved
        let interfaces = sym.super_interfaces();
        assert_eq!(interfaces.len(), 1);
        assert!(interfaces[0].is_unresolved());
    }

    #[test]
    fn test_unresolved_fallback_cached() {
        let store = store_with(vec![]);

        let a = store.resolve_or_unresolved("ghost.Class");
        let b = store.resolve_or_unresolved("ghost.Class");

        assert!(a.is_unresolved());
        assert!(a.same_instance(&b));
    }

    #[test]
    fn test_primitive_symbols() {
        let store = store_with(vec![]);

        let int = store.primitive(PrimitiveKind::Int);
        assert!(int.is_primitive());
        assert!(int.same_instance(&store.primitive(PrimitiveKind::Int)));

        let arr = store.array(int).unwrap();
        assert_eq!(arr.binary_name(), "int[]");
    }

    #[test]
    fn test_member_symbols_from_metadata() {
        use crate::sym::meta::{CtorMeta, FieldMeta, MethodMeta, ParamMeta};
        use crate::sym::TypeRef;

        let store = store_with(vec![TypeMetadata::new("some.pack.Class", TypeKind::Class)
            .with_field(FieldMeta::new(
                "count",
                TypeRef::named("int"),
                Modifiers::PRIVATE,
            ))
            .with_method(
                MethodMeta::new("get", Modifiers::PUBLIC)
                    .with_param(ParamMeta::unnamed(TypeRef::named("int"))),
            )
            .with_constructor(CtorMeta::new(Modifiers::PUBLIC))]);

        let sym = store.resolve("some.pack.Class").unwrap();

        let methods = sym.declared_methods();
        assert_eq!(methods.len(), 1);
        assert_eq!(methods[0].simple_name(), "get");
        assert_eq!(methods[0].arity(), 1);
        assert_eq!(methods[0].enclosing_class(), sym);

        assert_eq!(sym.declared_fields().len(), 1);
        assert_eq!(sym.constructors().len(), 1);
    }

    #[test]
    fn test_concurrent_first_resolution_agrees() {
        let store = store_with(vec![TypeMetadata::new("some.pack.Class", TypeKind::Class)]);

        let symbols: Vec<ClassRef> = std::thread::scope(|scope| {
            let handles: Vec<_> = (0..8)
                .map(|_| {
                    let store = Arc::clone(&store);
                    scope.spawn(move || store.resolve("some.pack.Class").unwrap())
                })
                .collect();
            handles.into_iter().map(|h| h.join().unwrap()).collect()
        });

        // all threads agree regardless of who created the instance
        for pair in symbols.windows(2) {
            assert_eq!(pair[0], pair[1]);
        }
        assert_eq!(store.resolved_count(), 1);
    }
}
