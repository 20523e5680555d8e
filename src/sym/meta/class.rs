//! Metadata-backed class symbols.

use std::sync::{Arc, Weak};

use tracing::trace;

use crate::sym::{
    ClassRef, ClassSym, ExecRef, FieldRef, Modifiers, SymbolStore, TypeKind, TypeParamOwner,
    TypeParamSym, TypeRepr,
};

use super::exec::MetaExecSym;
use super::field::MetaFieldSym;
use super::metadata::TypeMetadata;

/// A class symbol for an external type, wrapping classpath metadata.
///
/// Holds a weak handle to the store that created it, so that superclass,
/// interface and nested-class references can resolve recursively without
/// keeping the store alive from inside its own cache.
pub struct MetaClassSym {
    meta: Arc<TypeMetadata>,
    store: Weak<SymbolStore>,
}

impl MetaClassSym {
    pub(crate) fn new(meta: Arc<TypeMetadata>, store: Weak<SymbolStore>) -> Self {
        Self { meta, store }
    }

    fn resolve(&self, binary_name: &str) -> Option<ClassRef> {
        match self.store.upgrade() {
            Some(store) => Some(store.resolve_or_unresolved(binary_name)),
            None => {
                trace!(name = %binary_name, "symbol store dropped, reference unavailable");
                None
            }
        }
    }
}

impl ClassSym for MetaClassSym {
    fn simple_name(&self) -> &str {
        self.meta.simple_name()
    }

    fn binary_name(&self) -> &str {
        self.meta.binary_name()
    }

    fn canonical_name(&self) -> Option<&str> {
        self.meta.canonical_name()
    }

    fn package_name(&self) -> &str {
        self.meta.package_name()
    }

    fn modifiers(&self) -> Modifiers {
        self.meta.modifiers()
    }

    fn type_kind(&self) -> TypeKind {
        self.meta.kind()
    }

    fn is_local(&self) -> bool {
        self.meta.is_local()
    }

    fn is_anonymous(&self) -> bool {
        self.meta.is_anonymous()
    }

    fn superclass(&self) -> Option<ClassRef> {
        self.meta
            .superclass()
            .and_then(|name| self.resolve(name))
    }

    fn super_interfaces(&self) -> Vec<ClassRef> {
        self.meta
            .interfaces()
            .iter()
            .filter_map(|name| self.resolve(name))
            .collect()
    }

    fn type_parameters(&self) -> Vec<TypeParamSym> {
        self.meta
            .type_params()
            .iter()
            .map(|tp| TypeParamSym {
                owner: TypeParamOwner::Class(self.meta.binary_name().into()),
                name: tp.name.clone(),
                bounds: tp.bounds.clone(),
            })
            .collect()
    }

    fn declared_methods(&self, this: &ClassRef) -> Vec<ExecRef> {
        (0..self.meta.methods().len())
            .map(|index| ExecRef::new(MetaExecSym::method(this.clone(), self.meta.clone(), index)))
            .collect()
    }

    fn constructors(&self, this: &ClassRef) -> Vec<ExecRef> {
        (0..self.meta.constructors().len())
            .map(|index| {
                ExecRef::new(MetaExecSym::constructor(
                    this.clone(),
                    self.meta.clone(),
                    index,
                ))
            })
            .collect()
    }

    fn declared_fields(&self, this: &ClassRef) -> Vec<FieldRef> {
        (0..self.meta.fields().len())
            .map(|index| FieldRef::new(MetaFieldSym::new(this.clone(), self.meta.clone(), index)))
            .collect()
    }

    fn declared_classes(&self) -> Vec<ClassRef> {
        self.meta
            .nested()
            .iter()
            .filter_map(|name| self.resolve(name))
            .collect()
    }

    fn runtime_repr(&self) -> Option<TypeRepr> {
        Some(TypeRepr::Class(self.meta.clone()))
    }
}
