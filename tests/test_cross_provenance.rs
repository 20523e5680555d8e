//! Cross-provenance tests: symbols built from trees and symbols built
//! from classpath metadata must be interchangeable from a consumer's
//! point of view, and equal whenever they describe the same element.

use std::collections::HashSet;
use std::sync::Arc;

use once_cell::sync::Lazy;

use argus::analysis::AnalysisSession;
use argus::base::FileId;
use argus::sym::meta::{CtorMeta, FieldMeta, MethodMeta, ParamMeta, TableLoader, TypeMetadata};
use argus::sym::{Modifiers, SymbolStore, TypeKind, TypeRef};
use argus::{attach_symbols, ClassRef, DeclTree, TreeBuilder};

fn classpath() -> TableLoader {
    let mut loader = TableLoader::new();
    loader.insert(TypeMetadata::new("java.lang.Object", TypeKind::Class));
    loader.insert(
        TypeMetadata::new("lib.dep.Widget", TypeKind::Class)
            .with_superclass("java.lang.Object")
            .with_field(FieldMeta::new(
                "size",
                TypeRef::named("int"),
                Modifiers::PRIVATE,
            ))
            .with_method(
                MethodMeta::new("resize", Modifiers::PUBLIC)
                    .with_param(ParamMeta::named("width", TypeRef::named("int")))
                    .with_param(ParamMeta::unnamed(TypeRef::named("int"))),
            )
            .with_method(
                MethodMeta::new("describe", Modifiers::PUBLIC)
                    .with_param(ParamMeta::unnamed(TypeRef::array_of("java.lang.String", 1)))
                    .with_varargs(),
            )
            .with_constructor(CtorMeta::new(Modifiers::PUBLIC)),
    );
    loader
}

static SHARED_STORE: Lazy<Arc<SymbolStore>> = Lazy::new(|| SymbolStore::new(classpath()));

/// A tree declaring `pack.Source`, the analyzed-side twin of the fixture.
fn source_tree() -> DeclTree {
    let mut b = TreeBuilder::new(FileId::new(0), "pack");
    b.push_type(TypeKind::Class, "Source", Modifiers::PUBLIC);
    b.push_method("resize", Modifiers::PUBLIC, false);
    b.param("width", TypeRef::named("int"));
    b.param("height", TypeRef::named("int"));
    b.pop();
    b.pop();
    b.finish()
}

#[test]
fn external_class_resolved_in_two_contexts_is_equal() {
    // two independent resolution contexts, same element
    let first = SymbolStore::new(classpath())
        .resolve("lib.dep.Widget")
        .unwrap();
    let second = SymbolStore::new(classpath())
        .resolve("lib.dep.Widget")
        .unwrap();

    assert!(!first.same_instance(&second));
    assert_eq!(first, second);

    let mut set = HashSet::new();
    set.insert(first);
    set.insert(second);
    assert_eq!(set.len(), 1);
}

#[test]
fn tree_backed_and_metadata_backed_twins_are_equal() {
    // the same class analyzed from source and present on the classpath
    let mut loader = TableLoader::new();
    loader.insert(TypeMetadata::new("pack.Source", TypeKind::Class));
    let from_metadata = SymbolStore::new(loader).resolve("pack.Source").unwrap();

    let tree = source_tree();
    attach_symbols(&tree);
    let from_tree = tree.class_symbol(tree.children(tree.root())[0]).unwrap();

    assert_eq!(from_tree, from_metadata);
    assert_eq!(from_tree.simple_name(), from_metadata.simple_name());
    assert_eq!(from_tree.canonical_name(), from_metadata.canonical_name());

    // provenance shows only in the optional accessors
    assert!(from_tree.declaration().is_some());
    assert!(from_metadata.declaration().is_none());
}

#[test]
fn consumers_query_both_provenances_uniformly() {
    fn describe(sym: &ClassRef) -> (String, usize, usize) {
        (
            sym.binary_name().to_string(),
            sym.declared_methods().len(),
            sym.constructors().len(),
        )
    }

    let session = AnalysisSession::with_store(Arc::clone(&SHARED_STORE));
    let trees = vec![source_tree()];
    session.attach_all(&trees);

    let external = session.resolve("lib.dep.Widget").unwrap();
    let analyzed = trees[0].class_symbol(trees[0].children(trees[0].root())[0]).unwrap();

    assert_eq!(
        describe(&external),
        ("lib.dep.Widget".to_string(), 2, 1)
    );
    assert_eq!(describe(&analyzed), ("pack.Source".to_string(), 1, 0));
}

#[test]
fn executable_equality_across_provenance() {
    let mut loader = TableLoader::new();
    loader.insert(
        TypeMetadata::new("pack.Source", TypeKind::Class).with_method(
            MethodMeta::new("resize", Modifiers::PUBLIC)
                .with_param(ParamMeta::unnamed(TypeRef::named("int")))
                .with_param(ParamMeta::unnamed(TypeRef::named("int"))),
        ),
    );
    let meta_method = SymbolStore::new(loader)
        .resolve("pack.Source")
        .unwrap()
        .declared_methods()
        .remove(0);

    let tree = source_tree();
    attach_symbols(&tree);
    let tree_method = tree
        .class_symbol(tree.children(tree.root())[0])
        .unwrap()
        .declared_methods()
        .remove(0);

    // same owner, name and arity: the same element
    assert_eq!(tree_method, meta_method);
    assert_eq!(tree_method.id(), meta_method.id());

    // the metadata side lost one parameter name; shape still matches
    let meta_params = meta_method.formal_parameters();
    let tree_params = tree_method.formal_parameters();
    assert_eq!(meta_params.len(), tree_params.len());
    assert_eq!(meta_params[0].name.as_deref(), None);
    assert_eq!(tree_params[0].name.as_deref(), Some("width"));
    assert_eq!(meta_params[0], tree_params[0]);
}

#[test]
fn parameter_materialization_is_idempotent() {
    let widget = SHARED_STORE.resolve("lib.dep.Widget").unwrap();

    let resize = widget.declared_methods().remove(0);
    let first = resize.formal_parameters();
    let second = resize.formal_parameters();
    assert_eq!(first, second);
    // memoized on the same symbol instance
    assert!(Arc::ptr_eq(&first, &second));

    // a freshly minted symbol for the same element recomputes, but the
    // result is equal
    let again = widget.declared_methods().remove(0).formal_parameters();
    assert_eq!(first, again);
}

#[test]
fn varargs_and_arity_come_from_metadata() {
    let widget = SHARED_STORE.resolve("lib.dep.Widget").unwrap();
    let methods = widget.declared_methods();

    let resize = &methods[0];
    assert_eq!(resize.simple_name(), "resize");
    assert_eq!(resize.arity(), 2);
    assert!(!resize.is_varargs());

    let describe = &methods[1];
    assert_eq!(describe.simple_name(), "describe");
    assert_eq!(describe.arity(), 1);
    assert!(describe.is_varargs());
}

#[test]
fn arrays_derive_from_either_provenance() {
    let tree = source_tree();
    attach_symbols(&tree);
    let analyzed = tree.class_symbol(tree.children(tree.root())[0]).unwrap();

    let tree_array = SHARED_STORE.array(analyzed.clone()).unwrap();
    assert_eq!(tree_array.binary_name(), "pack.Source[]");
    assert_eq!(tree_array.array_component().unwrap(), analyzed);
    // the component is only tree-backed: representation is absent, not an
    // error
    assert!(tree_array.runtime_repr().is_none());

    let external = SHARED_STORE.resolve("lib.dep.Widget").unwrap();
    let meta_array = SHARED_STORE.array(external).unwrap();
    assert_eq!(meta_array.binary_name(), "lib.dep.Widget[]");
    let repr = meta_array.runtime_repr().unwrap();
    assert_eq!(repr.display_name(), "lib.dep.Widget[]");

    // implicit member set, independent of the component's provenance
    for array in [&tree_array, &meta_array] {
        assert_eq!(array.declared_methods().len(), 1);
        assert_eq!(array.declared_fields().len(), 1);
        assert_eq!(array.constructors().len(), 1);
    }
}

#[test]
fn unresolved_references_stay_usable() {
    let session = AnalysisSession::with_store(Arc::clone(&SHARED_STORE));

    assert!(session.resolve("lib.dep.Missing").is_none());

    let ghost = session.resolve_or_unresolved("lib.dep.Missing");
    assert!(ghost.is_unresolved());
    assert_eq!(ghost.simple_name(), "Missing");
    assert_eq!(ghost.canonical_name(), Some("lib.dep.Missing"));

    // equal to any other symbol with the same binary name
    let mut loader = TableLoader::new();
    loader.insert(TypeMetadata::new("lib.dep.Missing", TypeKind::Class));
    let resolved_elsewhere = SymbolStore::new(loader).resolve("lib.dep.Missing").unwrap();
    assert_eq!(ghost, resolved_elsewhere);
}
