//! Placeholder symbols for references the classpath cannot supply.

use std::sync::OnceLock;

use smol_str::SmolStr;

use crate::sym::{
    ClassRef, ClassSym, ExecRef, FieldRef, Modifiers, TypeParamOwner, TypeParamSym,
};

use super::metadata::DerivedNames;

/// The terminal symbol state for an external type that could not be
/// resolved.
///
/// Later analysis stages keep working with the name alone; simple name,
/// package and canonical name are derived from the binary name. The type
/// parameter count is unknown at construction and may be recorded once,
/// when a generic reference to the type is first seen; recording it again
/// is a no-op.
pub struct UnresolvedClassSym {
    binary: SmolStr,
    simple: SmolStr,
    package: SmolStr,
    canonical: Option<SmolStr>,
    type_params: OnceLock<Vec<TypeParamSym>>,
}

impl UnresolvedClassSym {
    pub fn new(binary_name: &str) -> Self {
        assert!(!binary_name.is_empty(), "binary name must not be empty");
        let derived = DerivedNames::from_binary(binary_name);
        Self {
            binary: SmolStr::new(binary_name),
            simple: derived.simple,
            package: derived.package,
            canonical: derived.canonical,
            type_params: OnceLock::new(),
        }
    }

    /// Record how many type parameters this type appears to have. The
    /// first recording wins; later calls leave the symbol unchanged.
    pub fn set_type_parameter_count(&self, count: usize) {
        self.type_params.get_or_init(|| {
            (0..count)
                .map(|i| TypeParamSym {
                    owner: TypeParamOwner::Class(self.binary.clone()),
                    name: SmolStr::new(format!("T{i}")),
                    bounds: Vec::new(),
                })
                .collect()
        });
    }

    pub fn type_parameter_count(&self) -> usize {
        self.type_params.get().map(Vec::len).unwrap_or(0)
    }
}

impl ClassSym for UnresolvedClassSym {
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
        Modifiers::PUBLIC
    }

    fn is_unresolved(&self) -> bool {
        true
    }

    fn type_parameters(&self) -> Vec<TypeParamSym> {
        self.type_params.get().cloned().unwrap_or_default()
    }

    fn declared_methods(&self, _this: &ClassRef) -> Vec<ExecRef> {
        Vec::new()
    }

    fn constructors(&self, _this: &ClassRef) -> Vec<ExecRef> {
        Vec::new()
    }

    fn declared_fields(&self, _this: &ClassRef) -> Vec<FieldRef> {
        Vec::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simple_unresolved_class() {
        let sym = ClassRef::new(UnresolvedClassSym::new("some.pack.Class"));

        assert!(sym.is_unresolved());
        assert_eq!(sym.simple_name(), "Class");
        assert_eq!(sym.package_name(), "some.pack");
        assert_eq!(sym.canonical_name(), Some("some.pack.Class"));
        assert_eq!(sym.binary_name(), "some.pack.Class");

        assert!(sym.is_reference_type());
        assert!(!sym.is_array());
        assert!(!sym.is_anonymous());
        assert!(!sym.is_enum());
        assert!(!sym.is_interface());

        assert!(sym.type_parameters().is_empty());
    }

    #[test]
    fn test_type_parameter_count_recorded_once() {
        let sym = UnresolvedClassSym::new("some.pack.Class");

        assert_eq!(sym.type_parameter_count(), 0);
        assert!(sym.type_parameters().is_empty());

        sym.set_type_parameter_count(2);

        assert_eq!(sym.type_parameter_count(), 2);
        let tparams = sym.type_parameters();
        assert_eq!(tparams.len(), 2);
        for tp in &tparams {
            assert_eq!(tp.owner, TypeParamOwner::Class("some.pack.Class".into()));
        }
        // the minted names are distinct
        assert_ne!(tparams[0].name, tparams[1].name);

        sym.set_type_parameter_count(3);

        // no change: the first recording won
        assert_eq!(sym.type_parameter_count(), 2);
        assert_eq!(sym.type_parameters(), tparams);
    }
}
