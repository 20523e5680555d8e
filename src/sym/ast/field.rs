//! Tree-backed field symbols.

use smol_str::SmolStr;

use crate::sym::{ClassRef, DeclCoord, FieldSym, Modifiers, TypeRef};

use super::class::FieldRow;

/// A field (or enum constant) symbol backed by a declarator in an analyzed
/// tree.
pub struct TreeFieldSym {
    pub(crate) owner: ClassRef,
    pub(crate) name: SmolStr,
    pub(crate) modifiers: Modifiers,
    pub(crate) type_ref: TypeRef,
    pub(crate) enum_constant: bool,
    pub(crate) decl: DeclCoord,
}

impl TreeFieldSym {
    pub(crate) fn from_row(owner: ClassRef, row: &FieldRow) -> Self {
        Self {
            owner,
            name: row.name.clone(),
            modifiers: row.modifiers,
            type_ref: row.type_ref.clone(),
            enum_constant: row.enum_constant,
            decl: row.decl,
        }
    }
}

impl FieldSym for TreeFieldSym {
    fn simple_name(&self) -> &str {
        &self.name
    }

    fn enclosing_class(&self) -> ClassRef {
        self.owner.clone()
    }

    fn modifiers(&self) -> Modifiers {
        self.modifiers
    }

    fn type_ref(&self) -> &TypeRef {
        &self.type_ref
    }

    fn is_enum_constant(&self) -> bool {
        self.enum_constant
    }

    fn declaration(&self) -> Option<DeclCoord> {
        Some(self.decl)
    }
}
