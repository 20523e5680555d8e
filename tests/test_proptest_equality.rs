//! Property-based tests for the cross-provenance equality relation.
//!
//! Generates arbitrary well-formed binary names and checks that symbols
//! constructed independently, through different providers and different
//! stores, satisfy the equality contract: reflexive, symmetric, hash
//! consistent, and insensitive to provenance.
#![cfg(feature = "proptest")]

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use proptest::prelude::*;

use argus::sym::meta::{array_of, TableLoader, TypeMetadata, UnresolvedClassSym};
use argus::sym::{ClassRef, SymbolStore, TypeKind};

fn hash_of<T: Hash>(value: &T) -> u64 {
    let mut hasher = DefaultHasher::new();
    value.hash(&mut hasher);
    hasher.finish()
}

/// Strategy for package segments and class names.
fn arb_segment() -> impl Strategy<Value = String> {
    "[a-z][a-z0-9]{0,8}"
}

/// Strategy for plain (unmangled) binary names like `a.bc.Foo`.
fn arb_binary_name() -> impl Strategy<Value = String> {
    (
        proptest::collection::vec(arb_segment(), 0..4),
        "[A-Z][A-Za-z0-9]{0,12}",
    )
        .prop_map(|(packages, class)| {
            let mut name = packages.join(".");
            if !name.is_empty() {
                name.push('.');
            }
            name.push_str(&class);
            name
        })
}

proptest! {
    #[test]
    fn unresolved_twins_are_equal(name in arb_binary_name()) {
        let a = ClassRef::new(UnresolvedClassSym::new(&name));
        let b = ClassRef::new(UnresolvedClassSym::new(&name));

        prop_assert!(!a.same_instance(&b));
        prop_assert_eq!(&a, &b);
        prop_assert_eq!(&b, &a);
        prop_assert_eq!(hash_of(&a), hash_of(&b));
    }

    #[test]
    fn provenance_does_not_affect_equality(name in arb_binary_name()) {
        let mut loader = TableLoader::new();
        loader.insert(TypeMetadata::new(&name, TypeKind::Class));
        let resolved = SymbolStore::new(loader).resolve(&name).unwrap();

        let placeholder = ClassRef::new(UnresolvedClassSym::new(&name));

        prop_assert_eq!(&resolved, &placeholder);
        prop_assert_eq!(hash_of(&resolved), hash_of(&placeholder));

        // both derive the same names from the same mangling
        prop_assert_eq!(resolved.simple_name(), placeholder.simple_name());
        prop_assert_eq!(resolved.package_name(), placeholder.package_name());
        prop_assert_eq!(resolved.canonical_name(), Some(name.as_str()));
    }

    #[test]
    fn array_derivation_preserves_equality(name in arb_binary_name()) {
        let a = array_of(ClassRef::new(UnresolvedClassSym::new(&name))).unwrap();
        let b = array_of(ClassRef::new(UnresolvedClassSym::new(&name))).unwrap();

        prop_assert_eq!(&a, &b);
        prop_assert_eq!(hash_of(&a), hash_of(&b));
        prop_assert_eq!(a.binary_name(), format!("{name}[]"));
        prop_assert_ne!(&a, &a.array_component().unwrap());
    }

    #[test]
    fn distinct_names_never_collide(a in arb_binary_name(), b in arb_binary_name()) {
        prop_assume!(a != b);

        let sym_a = ClassRef::new(UnresolvedClassSym::new(&a));
        let sym_b = ClassRef::new(UnresolvedClassSym::new(&b));

        prop_assert_ne!(sym_a, sym_b);
    }
}
