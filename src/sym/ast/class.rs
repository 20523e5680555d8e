//! Tree-backed class symbols.

use std::sync::{Arc, OnceLock};

use smol_str::SmolStr;

use crate::sym::{
    ClassRef, ClassSym, DeclCoord, EnclosingId, ExecKind, ExecRef, FieldRef, Modifiers, TypeKind,
    TypeParamOwner, TypeParamSym, TypeRef,
};

use super::exec::TreeExecSym;
use super::field::TreeFieldSym;
use crate::sym::FormalParamSym;

/// A class symbol backed by a type declaration in an analyzed tree.
///
/// Names are computed by the naming pass before the symbol is created; the
/// member tables are sealed once, when the pass leaves the declaration's
/// scope. The symbol itself carries only plain data and downward handles
/// (nested classes), never a handle to the tree, so a retained symbol does
/// not pin its tree in memory.
pub struct TreeClassSym {
    pub(crate) simple: SmolStr,
    pub(crate) binary: SmolStr,
    pub(crate) canonical: Option<SmolStr>,
    pub(crate) package: SmolStr,
    pub(crate) kind: TypeKind,
    pub(crate) modifiers: Modifiers,
    pub(crate) local: bool,
    pub(crate) anonymous: bool,
    pub(crate) type_params: Vec<SmolStr>,
    pub(crate) enclosing: Option<EnclosingId>,
    pub(crate) decl: DeclCoord,
    pub(crate) members: OnceLock<ClassMembers>,
}

/// Member tables of a tree-backed class, as plain data rows.
///
/// Member accessors mint fresh symbols from these rows; the rows hold no
/// handle back to the class, so no reference cycle exists.
#[derive(Default)]
pub(crate) struct ClassMembers {
    pub(crate) methods: Vec<ExecRow>,
    pub(crate) ctors: Vec<ExecRow>,
    pub(crate) fields: Vec<FieldRow>,
    pub(crate) nested: Vec<ClassRef>,
}

pub(crate) struct ExecRow {
    pub(crate) kind: ExecKind,
    pub(crate) name: SmolStr,
    pub(crate) modifiers: Modifiers,
    pub(crate) varargs: bool,
    pub(crate) type_params: Vec<SmolStr>,
    pub(crate) params: Arc<[FormalParamSym]>,
    pub(crate) decl: DeclCoord,
}

pub(crate) struct FieldRow {
    pub(crate) name: SmolStr,
    pub(crate) modifiers: Modifiers,
    pub(crate) type_ref: TypeRef,
    pub(crate) enum_constant: bool,
    pub(crate) decl: DeclCoord,
}

impl TreeClassSym {
    /// Fill in the member tables. Called exactly once, by the naming pass,
    /// when it leaves this declaration's scope.
    pub(crate) fn seal(&self, members: ClassMembers) {
        assert!(
            self.members.set(members).is_ok(),
            "member tables of {} sealed twice",
            self.binary
        );
    }

    fn members(&self) -> Option<&ClassMembers> {
        self.members.get()
    }
}

impl ClassSym for TreeClassSym {
    fn simple_name(&self) -> &str {
        &self.simple
    }

    fn binary_name(&self) -> &str {
        &self.binary
    }

    fn canonical_name(&self) -> Option<&str> {
        self.canonical.as_deref()
    }

    fn package_name(&self) -> &str {
        &self.package
    }

    fn modifiers(&self) -> Modifiers {
        self.modifiers
    }

    fn type_kind(&self) -> TypeKind {
        self.kind
    }

    fn is_local(&self) -> bool {
        self.local
    }

    fn is_anonymous(&self) -> bool {
        self.anonymous
    }

    fn type_parameters(&self) -> Vec<TypeParamSym> {
        self.type_params
            .iter()
            .map(|name| TypeParamSym {
                owner: TypeParamOwner::Class(self.binary.clone()),
                name: name.clone(),
                bounds: Vec::new(),
            })
            .collect()
    }

    fn declared_methods(&self, this: &ClassRef) -> Vec<ExecRef> {
        self.members()
            .map(|m| {
                m.methods
                    .iter()
                    .map(|row| ExecRef::new(TreeExecSym::from_row(this.clone(), row)))
                    .collect()
            })
            .unwrap_or_default()
    }

    fn constructors(&self, this: &ClassRef) -> Vec<ExecRef> {
        self.members()
            .map(|m| {
                m.ctors
                    .iter()
                    .map(|row| ExecRef::new(TreeExecSym::from_row(this.clone(), row)))
                    .collect()
            })
            .unwrap_or_default()
    }

    fn declared_fields(&self, this: &ClassRef) -> Vec<FieldRef> {
        self.members()
            .map(|m| {
                m.fields
                    .iter()
                    .map(|row| FieldRef::new(TreeFieldSym::from_row(this.clone(), row)))
                    .collect()
            })
            .unwrap_or_default()
    }

    fn declared_classes(&self) -> Vec<ClassRef> {
        self.members()
            .map(|m| m.nested.clone())
            .unwrap_or_default()
    }

    fn declaration(&self) -> Option<DeclCoord> {
        Some(self.decl)
    }

    fn enclosing(&self) -> Option<&EnclosingId> {
        self.enclosing.as_ref()
    }
}
