//! The symbol model — comparable handles to named program elements.
//!
//! A symbol abstracts over *where* a program element is declared: in one of
//! the analyzed compilation units (tree-backed, see [`ast`]) or only in a
//! compiled dependency reachable through classpath metadata (metadata-backed,
//! see [`meta`]). Consumers query symbols exclusively through the capability
//! traits in this module and never branch on provenance.
//!
//! Symbols hold no reference to the scope they were found in. The declaring
//! scope varies from file to file (a field inherited into a subclass is
//! found in a different scope than in its declaring class), and a scope
//! handle would pin fully-walked trees in memory. Tree-backed symbols carry
//! only a [`DeclCoord`], plain coordinates rather than a tree handle, so
//! trees are reclaimed as soon as analysis of a file completes, independent
//! of any symbols retained in long-lived caches.
//!
//! Symbols must only be compared through `==` on their handle types
//! ([`ClassRef`], [`ExecRef`], [`FieldRef`]), never by instance identity:
//! unicity is a cache optimization, not a guarantee. See [`equality`].

pub mod ast;
pub mod equality;
mod error;
pub mod meta;
mod modifiers;
mod store;

pub use error::SymbolError;
pub use modifiers::Modifiers;
pub use store::SymbolStore;

use std::fmt;
use std::sync::Arc;

use smol_str::SmolStr;

use crate::base::FileId;
use crate::tree::NodeId;
use meta::{PrimitiveKind, TypeMetadata};

/// The simple name shared by all constructors.
pub const CTOR_NAME: &str = "<init>";

// ============================================================================
// SUPPORT TYPES
// ============================================================================

/// The declaration kind of a class symbol.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum TypeKind {
    Class,
    Interface,
    Enum,
    Record,
    Annotation,
}

/// The kind of an executable symbol.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ExecKind {
    Method,
    Constructor,
}

/// The identity of an executable, as plain data.
///
/// This is the signature shape used by the equality relation, and the form
/// in which parameter symbols and local/anonymous classes refer to their
/// owning executable (a value, so that no symbol holds a strong handle
/// back into an object graph).
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ExecId {
    /// Binary name of the declaring class.
    pub owner: SmolStr,
    pub kind: ExecKind,
    /// Method name, or [`CTOR_NAME`] for constructors.
    pub name: SmolStr,
    pub arity: usize,
}

impl fmt::Display for ExecId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{}/{}", self.owner, self.name, self.arity)
    }
}

/// The immediate owner of a local or anonymous class, as plain data.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum EnclosingId {
    /// Directly enclosed by a type declaration (e.g. an anonymous class in
    /// a field initializer).
    Class(SmolStr),
    /// Enclosed by a method or constructor body.
    Exec(ExecId),
}

/// Coordinates of a declaration node, for tree-backed symbols.
///
/// A plain value: holding it does not keep the declaring tree alive.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct DeclCoord {
    pub file: FileId,
    pub node: NodeId,
}

/// A named, not-yet-resolved reference to a type, as it appears in a
/// declaration (a field type, a parameter type, a bound).
///
/// No generic substitution is modeled; the reference is just the name and
/// the number of array dimensions.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct TypeRef {
    name: SmolStr,
    array_dims: u8,
}

impl TypeRef {
    /// A plain (non-array) reference.
    pub fn named(name: impl Into<SmolStr>) -> Self {
        Self {
            name: name.into(),
            array_dims: 0,
        }
    }

    /// An array reference with the given number of dimensions.
    pub fn array_of(name: impl Into<SmolStr>, dims: u8) -> Self {
        Self {
            name: name.into(),
            array_dims: dims,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn array_dims(&self) -> u8 {
        self.array_dims
    }
}

impl fmt::Display for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)?;
        for _ in 0..self.array_dims {
            f.write_str("[]")?;
        }
        Ok(())
    }
}

impl fmt::Debug for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TypeRef({})", self)
    }
}

/// Best-effort runtime representation of a class symbol.
///
/// Mirrors what the classpath capability knows about the type. Tree-backed
/// symbols have none; array symbols re-wrap their deepest component's
/// representation. Absence is a normal condition in partial-classpath
/// analysis, never an error.
#[derive(Clone)]
pub enum TypeRepr {
    Primitive(PrimitiveKind),
    Class(Arc<TypeMetadata>),
    Array { elem: Box<TypeRepr>, dims: u32 },
}

impl TypeRepr {
    /// The represented type's name, with array suffixes.
    pub fn display_name(&self) -> String {
        match self {
            TypeRepr::Primitive(kind) => kind.name().to_string(),
            TypeRepr::Class(meta) => meta.binary_name().to_string(),
            TypeRepr::Array { elem, dims } => {
                let mut name = elem.display_name();
                for _ in 0..*dims {
                    name.push_str("[]");
                }
                name
            }
        }
    }

    /// Number of array dimensions (0 for non-arrays).
    pub fn array_dims(&self) -> u32 {
        match self {
            TypeRepr::Array { dims, .. } => *dims,
            _ => 0,
        }
    }
}

impl fmt::Debug for TypeRepr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TypeRepr({})", self.display_name())
    }
}

// ============================================================================
// SYMBOL CAPABILITIES
// ============================================================================

/// Capability set of class symbols (classes, interfaces, enums, records,
/// annotations, arrays, primitives, unresolved references).
///
/// All accessors are total. The only optional results are the canonical
/// name (absent for local/anonymous classes and anything nested in them),
/// the superclass (absent for a root type), the declaration coordinates
/// (absent for metadata-backed and synthesized symbols) and the runtime
/// representation (best effort).
///
/// Implementations are queried through [`ClassRef`], which also carries
/// the equality contract.
pub trait ClassSym: Send + Sync {
    /// The name this class can be referred to by, e.g. `"Foo"`. Empty for
    /// anonymous classes.
    fn simple_name(&self) -> &str;

    /// The fully mangled unique name, e.g. `"pack.Foo$1Local"`. Never empty.
    fn binary_name(&self) -> &str;

    /// The dotted human-facing name, e.g. `"pack.Foo.Bar"`. Absent for
    /// local/anonymous classes and anything nested inside one.
    fn canonical_name(&self) -> Option<&str>;

    /// Package name, empty for the default package.
    fn package_name(&self) -> &str;

    fn modifiers(&self) -> Modifiers;

    fn type_kind(&self) -> TypeKind {
        TypeKind::Class
    }

    fn is_local(&self) -> bool {
        false
    }

    fn is_anonymous(&self) -> bool {
        false
    }

    fn is_array(&self) -> bool {
        false
    }

    fn is_primitive(&self) -> bool {
        false
    }

    /// True for the terminal placeholder produced when the classpath
    /// capability cannot supply a referenced type.
    fn is_unresolved(&self) -> bool {
        false
    }

    fn superclass(&self) -> Option<ClassRef> {
        None
    }

    fn super_interfaces(&self) -> Vec<ClassRef> {
        Vec::new()
    }

    fn type_parameters(&self) -> Vec<TypeParamSym> {
        Vec::new()
    }

    /// Declared methods, in declaration order. `this` is the handle the
    /// call came through; implementations use it as the owner of the
    /// symbols they mint.
    fn declared_methods(&self, this: &ClassRef) -> Vec<ExecRef>;

    /// Declared constructors, in declaration order.
    fn constructors(&self, this: &ClassRef) -> Vec<ExecRef>;

    /// Declared fields (including enum constants), in declaration order.
    fn declared_fields(&self, this: &ClassRef) -> Vec<FieldRef>;

    /// Member classes declared directly in this class's body.
    fn declared_classes(&self) -> Vec<ClassRef> {
        Vec::new()
    }

    /// The component type, for array symbols only.
    fn array_component(&self) -> Option<ClassRef> {
        None
    }

    fn runtime_repr(&self) -> Option<TypeRepr> {
        None
    }

    fn declaration(&self) -> Option<DeclCoord> {
        None
    }

    /// Immediate owner, recorded for local and anonymous classes.
    fn enclosing(&self) -> Option<&EnclosingId> {
        None
    }
}

/// Capability set of method and constructor symbols.
pub trait ExecutableSym: Send + Sync {
    fn kind(&self) -> ExecKind;

    /// Method name, or [`CTOR_NAME`] for constructors.
    fn simple_name(&self) -> &str;

    fn enclosing_class(&self) -> ClassRef;

    fn arity(&self) -> usize;

    fn is_varargs(&self) -> bool {
        false
    }

    fn modifiers(&self) -> Modifiers;

    /// Formal parameters, in order. Materialized lazily by metadata-backed
    /// implementations and memoized on first access; repeated calls return
    /// equal lists.
    fn formal_parameters(&self) -> Arc<[FormalParamSym]>;

    fn type_parameters(&self) -> Vec<TypeParamSym> {
        Vec::new()
    }

    fn declaration(&self) -> Option<DeclCoord> {
        None
    }

    /// This executable's identity as plain data.
    fn id(&self) -> ExecId {
        ExecId {
            owner: SmolStr::new(self.enclosing_class().binary_name()),
            kind: self.kind(),
            name: SmolStr::new(self.simple_name()),
            arity: self.arity(),
        }
    }
}

/// Capability set of field symbols.
pub trait FieldSym: Send + Sync {
    fn simple_name(&self) -> &str;

    fn enclosing_class(&self) -> ClassRef;

    fn modifiers(&self) -> Modifiers;

    /// The declared type, as an unresolved reference.
    fn type_ref(&self) -> &TypeRef;

    fn is_enum_constant(&self) -> bool {
        false
    }

    fn declaration(&self) -> Option<DeclCoord> {
        None
    }
}

// ============================================================================
// SYMBOL HANDLES
// ============================================================================

/// Shared handle to a class symbol.
///
/// Cheap to clone; equality and hashing follow the cross-provenance
/// contract in [`equality`] (binary name), never instance identity.
#[derive(Clone)]
pub struct ClassRef(Arc<dyn ClassSym>);

impl ClassRef {
    pub fn new(sym: impl ClassSym + 'static) -> Self {
        Self(Arc::new(sym))
    }

    pub fn from_arc(sym: Arc<dyn ClassSym>) -> Self {
        Self(sym)
    }

    pub fn simple_name(&self) -> &str {
        self.0.simple_name()
    }

    pub fn binary_name(&self) -> &str {
        self.0.binary_name()
    }

    pub fn canonical_name(&self) -> Option<&str> {
        self.0.canonical_name()
    }

    pub fn package_name(&self) -> &str {
        self.0.package_name()
    }

    pub fn modifiers(&self) -> Modifiers {
        self.0.modifiers()
    }

    pub fn type_kind(&self) -> TypeKind {
        self.0.type_kind()
    }

    pub fn is_interface(&self) -> bool {
        self.0.type_kind() == TypeKind::Interface
    }

    pub fn is_enum(&self) -> bool {
        self.0.type_kind() == TypeKind::Enum
    }

    pub fn is_record(&self) -> bool {
        self.0.type_kind() == TypeKind::Record
    }

    pub fn is_annotation(&self) -> bool {
        self.0.type_kind() == TypeKind::Annotation
    }

    pub fn is_local(&self) -> bool {
        self.0.is_local()
    }

    pub fn is_anonymous(&self) -> bool {
        self.0.is_anonymous()
    }

    pub fn is_array(&self) -> bool {
        self.0.is_array()
    }

    pub fn is_primitive(&self) -> bool {
        self.0.is_primitive()
    }

    /// Reference types are everything that is not a primitive.
    pub fn is_reference_type(&self) -> bool {
        !self.0.is_primitive()
    }

    pub fn is_unresolved(&self) -> bool {
        self.0.is_unresolved()
    }

    pub fn superclass(&self) -> Option<ClassRef> {
        self.0.superclass()
    }

    pub fn super_interfaces(&self) -> Vec<ClassRef> {
        self.0.super_interfaces()
    }

    pub fn type_parameters(&self) -> Vec<TypeParamSym> {
        self.0.type_parameters()
    }

    pub fn declared_methods(&self) -> Vec<ExecRef> {
        self.0.declared_methods(self)
    }

    pub fn constructors(&self) -> Vec<ExecRef> {
        self.0.constructors(self)
    }

    pub fn declared_fields(&self) -> Vec<FieldRef> {
        self.0.declared_fields(self)
    }

    pub fn declared_classes(&self) -> Vec<ClassRef> {
        self.0.declared_classes()
    }

    pub fn array_component(&self) -> Option<ClassRef> {
        self.0.array_component()
    }

    pub fn runtime_repr(&self) -> Option<TypeRepr> {
        self.0.runtime_repr()
    }

    pub fn declaration(&self) -> Option<DeclCoord> {
        self.0.declaration()
    }

    pub fn enclosing(&self) -> Option<&EnclosingId> {
        self.0.enclosing()
    }

    /// Instance identity, for cache assertions only. Two handles that are
    /// not the same instance may still be equal.
    pub fn same_instance(&self, other: &ClassRef) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for ClassRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Class({})", self.binary_name())
    }
}

impl fmt::Display for ClassRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.binary_name())
    }
}

/// Shared handle to a method or constructor symbol.
#[derive(Clone)]
pub struct ExecRef(Arc<dyn ExecutableSym>);

impl ExecRef {
    pub fn new(sym: impl ExecutableSym + 'static) -> Self {
        Self(Arc::new(sym))
    }

    pub fn kind(&self) -> ExecKind {
        self.0.kind()
    }

    pub fn simple_name(&self) -> &str {
        self.0.simple_name()
    }

    pub fn enclosing_class(&self) -> ClassRef {
        self.0.enclosing_class()
    }

    pub fn arity(&self) -> usize {
        self.0.arity()
    }

    pub fn is_varargs(&self) -> bool {
        self.0.is_varargs()
    }

    pub fn modifiers(&self) -> Modifiers {
        self.0.modifiers()
    }

    pub fn formal_parameters(&self) -> Arc<[FormalParamSym]> {
        self.0.formal_parameters()
    }

    pub fn type_parameters(&self) -> Vec<TypeParamSym> {
        self.0.type_parameters()
    }

    pub fn declaration(&self) -> Option<DeclCoord> {
        self.0.declaration()
    }

    pub fn id(&self) -> ExecId {
        self.0.id()
    }
}

impl fmt::Debug for ExecRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind() {
            ExecKind::Method => write!(f, "Method({})", self.id()),
            ExecKind::Constructor => write!(f, "Constructor({})", self.id()),
        }
    }
}

/// Shared handle to a field symbol.
#[derive(Clone)]
pub struct FieldRef(Arc<dyn FieldSym>);

impl FieldRef {
    pub fn new(sym: impl FieldSym + 'static) -> Self {
        Self(Arc::new(sym))
    }

    pub fn simple_name(&self) -> &str {
        self.0.simple_name()
    }

    pub fn enclosing_class(&self) -> ClassRef {
        self.0.enclosing_class()
    }

    pub fn modifiers(&self) -> Modifiers {
        self.0.modifiers()
    }

    pub fn type_ref(&self) -> TypeRef {
        self.0.type_ref().clone()
    }

    pub fn is_enum_constant(&self) -> bool {
        self.0.is_enum_constant()
    }

    pub fn declaration(&self) -> Option<DeclCoord> {
        self.0.declaration()
    }
}

impl fmt::Debug for FieldRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Field({}#{})",
            self.enclosing_class().binary_name(),
            self.simple_name()
        )
    }
}

// ============================================================================
// VALUE SYMBOLS
// ============================================================================

/// A formal parameter of a method or constructor.
///
/// Both providers share this shape: metadata-backed parameters may lack a
/// name when the classpath capability does not record one.
#[derive(Clone, Debug)]
pub struct FormalParamSym {
    /// Identity of the owning executable.
    pub owner: ExecId,
    /// Zero-based position in the parameter list.
    pub index: u32,
    /// Absent when the parameter name is not available from metadata.
    pub name: Option<SmolStr>,
    pub type_ref: TypeRef,
}

impl PartialEq for FormalParamSym {
    fn eq(&self, other: &Self) -> bool {
        self.owner == other.owner && self.index == other.index
    }
}

impl Eq for FormalParamSym {}

impl std::hash::Hash for FormalParamSym {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.owner.hash(state);
        self.index.hash(state);
    }
}

/// The owner of a type parameter.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum TypeParamOwner {
    /// Binary name of the owning class.
    Class(SmolStr),
    Exec(ExecId),
}

/// A declared type parameter.
#[derive(Clone, Debug)]
pub struct TypeParamSym {
    pub owner: TypeParamOwner,
    pub name: SmolStr,
    /// Declared upper bounds, in order (several for intersection bounds).
    pub bounds: Vec<TypeRef>,
}

impl PartialEq for TypeParamSym {
    fn eq(&self, other: &Self) -> bool {
        self.owner == other.owner && self.name == other.name
    }
}

impl Eq for TypeParamSym {}

impl std::hash::Hash for TypeParamSym {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.owner.hash(state);
        self.name.hash(state);
    }
}

/// A genuine local variable (not a field, enum constant or parameter).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LocalVarSym {
    pub name: SmolStr,
    /// The executable whose body declares this variable.
    pub owner: ExecId,
    pub type_ref: TypeRef,
    pub decl: DeclCoord,
}

// ============================================================================
// SYMBOL ENTRY
// ============================================================================

/// The symbol attached to a declaration node.
#[derive(Clone, Debug)]
pub enum SymbolEntry {
    Class(ClassRef),
    Exec(ExecRef),
    Field(FieldRef),
    FormalParam(FormalParamSym),
    LocalVar(LocalVarSym),
}

impl SymbolEntry {
    pub fn as_class(&self) -> Option<&ClassRef> {
        match self {
            SymbolEntry::Class(c) => Some(c),
            _ => None,
        }
    }

    pub fn as_exec(&self) -> Option<&ExecRef> {
        match self {
            SymbolEntry::Exec(e) => Some(e),
            _ => None,
        }
    }

    pub fn as_field(&self) -> Option<&FieldRef> {
        match self {
            SymbolEntry::Field(fld) => Some(fld),
            _ => None,
        }
    }

    pub fn as_formal_param(&self) -> Option<&FormalParamSym> {
        match self {
            SymbolEntry::FormalParam(p) => Some(p),
            _ => None,
        }
    }

    pub fn as_local_var(&self) -> Option<&LocalVarSym> {
        match self {
            SymbolEntry::LocalVar(v) => Some(v),
            _ => None,
        }
    }
}
