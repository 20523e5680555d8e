//! Metadata-backed field symbols.

use std::sync::Arc;

use crate::sym::{ClassRef, FieldSym, Modifiers, TypeRef};

use super::metadata::{FieldMeta, TypeMetadata};

/// A field symbol for an external type, reading one row of its metadata.
pub struct MetaFieldSym {
    owner: ClassRef,
    meta: Arc<TypeMetadata>,
    index: usize,
}

impl MetaFieldSym {
    pub(crate) fn new(owner: ClassRef, meta: Arc<TypeMetadata>, index: usize) -> Self {
        Self { owner, meta, index }
    }

    fn row(&self) -> &FieldMeta {
        &self.meta.fields()[self.index]
    }
}

impl FieldSym for MetaFieldSym {
    fn simple_name(&self) -> &str {
        &self.row().name
    }

    fn enclosing_class(&self) -> ClassRef {
        self.owner.clone()
    }

    fn modifiers(&self) -> Modifiers {
        self.row().modifiers
    }

    fn type_ref(&self) -> &TypeRef {
        &self.row().type_ref
    }

    fn is_enum_constant(&self) -> bool {
        self.row().modifiers.contains(Modifiers::ENUM)
    }
}
