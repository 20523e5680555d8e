//! Array symbols, derived entirely from their component symbol.

use std::sync::Arc;

use smol_str::SmolStr;

use crate::sym::{
    ClassRef, ClassSym, ExecKind, ExecRef, ExecutableSym, FieldRef, FieldSym, FormalParamSym,
    Modifiers, SymbolError, TypeRepr, TypeRef, CTOR_NAME,
};

/// Derive the array symbol over a component symbol.
///
/// The component may be tree-backed, metadata-backed, or itself an array.
/// Anonymous classes cannot be array components in valid source, so that
/// is rejected as a caller contract violation rather than tolerated.
pub fn array_of(component: ClassRef) -> Result<ClassRef, SymbolError> {
    if component.is_anonymous() {
        return Err(SymbolError::AnonymousArrayComponent(SmolStr::new(
            component.binary_name(),
        )));
    }
    let simple = SmolStr::new(format!("{}[]", component.simple_name()));
    let binary = SmolStr::new(format!("{}[]", component.binary_name()));
    let canonical = component
        .canonical_name()
        .map(|name| SmolStr::new(format!("{name}[]")));
    Ok(ClassRef::new(ArraySym {
        component,
        simple,
        binary,
        canonical,
    }))
}

/// An array type. Synthesized, never declared: every attribute is computed
/// from the component, and the member set is the implicit one arrays get
/// from the language (`clone`, `length`, one constructor).
struct ArraySym {
    component: ClassRef,
    simple: SmolStr,
    binary: SmolStr,
    canonical: Option<SmolStr>,
}

impl ClassSym for ArraySym {
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
        self.component.package_name()
    }

    fn modifiers(&self) -> Modifiers {
        Modifiers::FINAL | Modifiers::ABSTRACT | self.component.modifiers().without(Modifiers::STATIC)
    }

    fn is_array(&self) -> bool {
        true
    }

    fn declared_methods(&self, this: &ClassRef) -> Vec<ExecRef> {
        vec![ExecRef::new(ImplicitExecSym::array_clone(this.clone()))]
    }

    fn constructors(&self, this: &ClassRef) -> Vec<ExecRef> {
        vec![ExecRef::new(ImplicitExecSym::array_constructor(
            this.clone(),
        ))]
    }

    fn declared_fields(&self, this: &ClassRef) -> Vec<FieldRef> {
        vec![FieldRef::new(ImplicitFieldSym::array_length(this.clone()))]
    }

    fn array_component(&self) -> Option<ClassRef> {
        Some(self.component.clone())
    }

    fn runtime_repr(&self) -> Option<TypeRepr> {
        // unwind to the deepest non-array component, then re-wrap the
        // dimensions around whatever representation it has
        let mut elem = self.component.clone();
        let mut dims = 1u32;
        while let Some(inner) = elem.array_component() {
            elem = inner;
            dims += 1;
        }
        let repr = elem.runtime_repr()?;
        Some(TypeRepr::Array {
            elem: Box::new(repr),
            dims,
        })
    }
}

/// The implicit executables of an array type (`clone` and the synthetic
/// constructor taking the length).
struct ImplicitExecSym {
    owner: ClassRef,
    kind: ExecKind,
    name: &'static str,
    params: Arc<[FormalParamSym]>,
}

impl ImplicitExecSym {
    fn array_clone(owner: ClassRef) -> Self {
        Self {
            owner,
            kind: ExecKind::Method,
            name: "clone",
            params: Arc::from([]),
        }
    }

    fn array_constructor(owner: ClassRef) -> Self {
        let owner_id = crate::sym::ExecId {
            owner: SmolStr::new(owner.binary_name()),
            kind: ExecKind::Constructor,
            name: SmolStr::new(CTOR_NAME),
            arity: 1,
        };
        let params: Arc<[FormalParamSym]> = Arc::from([FormalParamSym {
            owner: owner_id,
            index: 0,
            name: None,
            type_ref: TypeRef::named("int"),
        }]);
        Self {
            owner,
            kind: ExecKind::Constructor,
            name: CTOR_NAME,
            params,
        }
    }
}

impl ExecutableSym for ImplicitExecSym {
    fn kind(&self) -> ExecKind {
        self.kind
    }

    fn simple_name(&self) -> &str {
        self.name
    }

    fn enclosing_class(&self) -> ClassRef {
        self.owner.clone()
    }

    fn arity(&self) -> usize {
        self.params.len()
    }

    fn modifiers(&self) -> Modifiers {
        Modifiers::PUBLIC | Modifiers::FINAL
    }

    fn formal_parameters(&self) -> Arc<[FormalParamSym]> {
        self.params.clone()
    }
}

/// The implicit `length` field of an array type.
struct ImplicitFieldSym {
    owner: ClassRef,
    type_ref: TypeRef,
}

impl ImplicitFieldSym {
    fn array_length(owner: ClassRef) -> Self {
        Self {
            owner,
            type_ref: TypeRef::named("int"),
        }
    }
}

impl FieldSym for ImplicitFieldSym {
    fn simple_name(&self) -> &str {
        "length"
    }

    fn enclosing_class(&self) -> ClassRef {
        self.owner.clone()
    }

    fn modifiers(&self) -> Modifiers {
        Modifiers::PUBLIC | Modifiers::FINAL
    }

    fn type_ref(&self) -> &TypeRef {
        &self.type_ref
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::base::FileId;
    use crate::sym::ast::attach_symbols;
    use crate::sym::meta::UnresolvedClassSym;
    use crate::sym::TypeKind;
    use crate::tree::TreeBuilder;

    fn component() -> ClassRef {
        ClassRef::new(UnresolvedClassSym::new("some.pack.Class"))
    }

    #[test]
    fn test_names_follow_component() {
        let arr = array_of(component()).unwrap();

        assert_eq!(arr.binary_name(), "some.pack.Class[]");
        assert_eq!(arr.simple_name(), "Class[]");
        assert_eq!(arr.canonical_name(), Some("some.pack.Class[]"));
        assert_eq!(arr.package_name(), "some.pack");
        assert!(arr.is_array());
        assert_eq!(arr.array_component().unwrap(), component());
    }

    #[test]
    fn test_modifiers_strip_static() {
        let meta = crate::sym::meta::TypeMetadata::new("pack.Foo$Bar", TypeKind::Class)
            .with_modifiers(Modifiers::PUBLIC | Modifiers::STATIC);
        let comp = ClassRef::new(crate::sym::meta::MetaClassSym::new(
            std::sync::Arc::new(meta),
            std::sync::Weak::new(),
        ));

        let arr = array_of(comp).unwrap();
        let mods = arr.modifiers();
        assert!(mods.is_final());
        assert!(mods.is_abstract());
        assert!(mods.is_public());
        assert!(!mods.is_static());
    }

    #[test]
    fn test_implicit_members() {
        let arr = array_of(component()).unwrap();

        let methods = arr.declared_methods();
        assert_eq!(methods.len(), 1);
        assert_eq!(methods[0].simple_name(), "clone");
        assert_eq!(methods[0].arity(), 0);

        let fields = arr.declared_fields();
        assert_eq!(fields.len(), 1);
        assert_eq!(fields[0].simple_name(), "length");
        assert_eq!(fields[0].type_ref().name(), "int");

        let ctors = arr.constructors();
        assert_eq!(ctors.len(), 1);
        assert_eq!(ctors[0].arity(), 1);

        assert!(arr.declared_classes().is_empty());
    }

    #[test]
    fn test_anonymous_component_rejected() {
        let mut b = TreeBuilder::new(FileId::new(0), "pack");
        b.push_type(TypeKind::Class, "Foo", Modifiers::PUBLIC);
        b.push_method("run", Modifiers::empty(), false);
        let anon = b.push_anonymous();
        b.pop();
        b.pop();
        b.pop();
        let tree = b.finish();
        attach_symbols(&tree);

        let anon = tree.class_symbol(anon).unwrap();
        let err = array_of(anon).unwrap_err();
        assert!(matches!(err, SymbolError::AnonymousArrayComponent(name) if name == "pack.Foo$1"));
    }

    #[test]
    fn test_repr_rewraps_dimensions() {
        let meta = std::sync::Arc::new(crate::sym::meta::TypeMetadata::new(
            "some.pack.Class",
            TypeKind::Class,
        ));
        let comp = ClassRef::new(crate::sym::meta::MetaClassSym::new(
            meta,
            std::sync::Weak::new(),
        ));

        let arr = array_of(array_of(comp).unwrap()).unwrap();
        assert_eq!(arr.binary_name(), "some.pack.Class[][]");

        let repr = arr.runtime_repr().unwrap();
        assert_eq!(repr.array_dims(), 2);
        assert_eq!(repr.display_name(), "some.pack.Class[][]");
    }

    #[test]
    fn test_repr_absent_when_component_has_none() {
        // unresolved components carry no runtime representation; absence
        // propagates instead of failing
        let arr = array_of(array_of(component()).unwrap()).unwrap();
        assert!(arr.runtime_repr().is_none());
    }
}
