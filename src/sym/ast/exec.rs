//! Tree-backed method and constructor symbols.

use std::sync::Arc;

use smol_str::SmolStr;

use crate::sym::{
    ClassRef, DeclCoord, ExecKind, ExecutableSym, FormalParamSym, Modifiers, TypeParamOwner,
    TypeParamSym,
};

use super::class::ExecRow;

/// A method or constructor symbol backed by a declaration in an analyzed
/// tree. Parameters were materialized by the naming pass; the list is
/// shared, not recomputed.
pub struct TreeExecSym {
    pub(crate) owner: ClassRef,
    pub(crate) kind: ExecKind,
    /// Method name, or `<init>` for constructors.
    pub(crate) name: SmolStr,
    pub(crate) modifiers: Modifiers,
    pub(crate) varargs: bool,
    pub(crate) type_params: Vec<SmolStr>,
    pub(crate) params: Arc<[FormalParamSym]>,
    pub(crate) decl: DeclCoord,
}

impl TreeExecSym {
    pub(crate) fn from_row(owner: ClassRef, row: &ExecRow) -> Self {
        Self {
            owner,
            kind: row.kind,
            name: row.name.clone(),
            modifiers: row.modifiers,
            varargs: row.varargs,
            type_params: row.type_params.clone(),
            params: row.params.clone(),
            decl: row.decl,
        }
    }
}

impl ExecutableSym for TreeExecSym {
    fn kind(&self) -> ExecKind {
        self.kind
    }

    fn simple_name(&self) -> &str {
        &self.name
    }

    fn enclosing_class(&self) -> ClassRef {
        self.owner.clone()
    }

    fn arity(&self) -> usize {
        self.params.len()
    }

    fn is_varargs(&self) -> bool {
        self.varargs
    }

    fn modifiers(&self) -> Modifiers {
        self.modifiers
    }

    fn formal_parameters(&self) -> Arc<[FormalParamSym]> {
        self.params.clone()
    }

    fn type_parameters(&self) -> Vec<TypeParamSym> {
        self.type_params
            .iter()
            .map(|name| TypeParamSym {
                owner: TypeParamOwner::Exec(self.id()),
                name: name.clone(),
                bounds: Vec::new(),
            })
            .collect()
    }

    fn declaration(&self) -> Option<DeclCoord> {
        Some(self.decl)
    }
}
