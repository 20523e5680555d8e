//! The cross-provenance equality relation.
//!
//! Two symbols describing the same real program element must compare equal
//! and hash identically, no matter which provider built them, how many
//! times, or in which order. Equality is therefore computed from publicly
//! observable identity only:
//!
//! - classes: the binary name (unique by construction of the mangling);
//! - executables: kind + owner binary name + name + arity;
//! - fields: owner binary name + field name.
//!
//! Instance identity and internal representation never participate. The
//! shared [`SymbolStore`](super::SymbolStore) tries to hand out one
//! instance per element as an optimization, but nothing here depends on
//! that succeeding.

use std::hash::{Hash, Hasher};

use super::{ClassRef, ExecRef, FieldRef};

// Discriminants keep the three symbol families apart in hash maps that mix
// them behind a common key type.
const CLASS_TAG: u8 = 1;
const EXEC_TAG: u8 = 2;
const FIELD_TAG: u8 = 3;

impl PartialEq for ClassRef {
    fn eq(&self, other: &Self) -> bool {
        self.binary_name() == other.binary_name()
    }
}

impl Eq for ClassRef {}

impl Hash for ClassRef {
    fn hash<H: Hasher>(&self, state: &mut H) {
        CLASS_TAG.hash(state);
        self.binary_name().hash(state);
    }
}

impl PartialEq for ExecRef {
    fn eq(&self, other: &Self) -> bool {
        self.kind() == other.kind()
            && self.arity() == other.arity()
            && self.simple_name() == other.simple_name()
            && self.enclosing_class().binary_name() == other.enclosing_class().binary_name()
    }
}

impl Eq for ExecRef {}

impl Hash for ExecRef {
    fn hash<H: Hasher>(&self, state: &mut H) {
        EXEC_TAG.hash(state);
        self.kind().hash(state);
        self.enclosing_class().binary_name().hash(state);
        self.simple_name().hash(state);
        self.arity().hash(state);
    }
}

impl PartialEq for FieldRef {
    fn eq(&self, other: &Self) -> bool {
        self.simple_name() == other.simple_name()
            && self.enclosing_class().binary_name() == other.enclosing_class().binary_name()
    }
}

impl Eq for FieldRef {}

impl Hash for FieldRef {
    fn hash<H: Hasher>(&self, state: &mut H) {
        FIELD_TAG.hash(state);
        self.enclosing_class().binary_name().hash(state);
        self.simple_name().hash(state);
    }
}
