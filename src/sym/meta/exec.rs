//! Metadata-backed method and constructor symbols.

use std::sync::{Arc, OnceLock};

use crate::sym::{
    ClassRef, ExecKind, ExecutableSym, FormalParamSym, Modifiers, TypeParamOwner, TypeParamSym,
    CTOR_NAME,
};

use super::metadata::{ParamMeta, TypeMetadata};

/// A method or constructor symbol for an external type.
///
/// Arity, the vararg flag and modifiers come straight from the metadata
/// row. The formal-parameter list is computed once, lazily, and memoized;
/// recomputation would yield an equal list, so the first caller wins.
pub struct MetaExecSym {
    owner: ClassRef,
    meta: Arc<TypeMetadata>,
    kind: ExecKind,
    index: usize,
    params: OnceLock<Arc<[FormalParamSym]>>,
}

impl MetaExecSym {
    pub(crate) fn method(owner: ClassRef, meta: Arc<TypeMetadata>, index: usize) -> Self {
        Self {
            owner,
            meta,
            kind: ExecKind::Method,
            index,
            params: OnceLock::new(),
        }
    }

    pub(crate) fn constructor(owner: ClassRef, meta: Arc<TypeMetadata>, index: usize) -> Self {
        Self {
            owner,
            meta,
            kind: ExecKind::Constructor,
            index,
            params: OnceLock::new(),
        }
    }

    fn params_meta(&self) -> &[ParamMeta] {
        match self.kind {
            ExecKind::Method => &self.meta.methods()[self.index].params,
            ExecKind::Constructor => &self.meta.constructors()[self.index].params,
        }
    }
}

impl ExecutableSym for MetaExecSym {
    fn kind(&self) -> ExecKind {
        self.kind
    }

    fn simple_name(&self) -> &str {
        match self.kind {
            ExecKind::Method => &self.meta.methods()[self.index].name,
            ExecKind::Constructor => CTOR_NAME,
        }
    }

    fn enclosing_class(&self) -> ClassRef {
        self.owner.clone()
    }

    fn arity(&self) -> usize {
        self.params_meta().len()
    }

    fn is_varargs(&self) -> bool {
        match self.kind {
            ExecKind::Method => self.meta.methods()[self.index].varargs,
            ExecKind::Constructor => self.meta.constructors()[self.index].varargs,
        }
    }

    fn modifiers(&self) -> Modifiers {
        match self.kind {
            ExecKind::Method => self.meta.methods()[self.index].modifiers,
            ExecKind::Constructor => self.meta.constructors()[self.index].modifiers,
        }
    }

    fn formal_parameters(&self) -> Arc<[FormalParamSym]> {
        self.params
            .get_or_init(|| {
                let id = self.id();
                self.params_meta()
                    .iter()
                    .enumerate()
                    .map(|(index, param)| FormalParamSym {
                        owner: id.clone(),
                        index: index as u32,
                        name: param.name.clone(),
                        type_ref: param.type_ref.clone(),
                    })
                    .collect::<Vec<_>>()
                    .into()
            })
            .clone()
    }

    fn type_parameters(&self) -> Vec<TypeParamSym> {
        match self.kind {
            ExecKind::Method => self.meta.methods()[self.index]
                .type_params
                .iter()
                .map(|tp| TypeParamSym {
                    owner: TypeParamOwner::Exec(self.id()),
                    name: tp.name.clone(),
                    bounds: tp.bounds.clone(),
                })
                .collect(),
            ExecKind::Constructor => Vec::new(),
        }
    }
}
