//! Type metadata — the classpath capability's view of an external type.

use std::fmt;
use std::sync::Arc;

use indexmap::IndexMap;
use smol_str::SmolStr;

use crate::sym::{Modifiers, TypeKind, TypeRef};

/// Everything the classpath capability reports about one external type.
///
/// Plain data, shared behind an `Arc`: the metadata-backed provider wraps
/// it into symbols without copying. Names are derived from the binary name
/// on construction, following the same mangling the naming pass produces
/// (`$`-separated nesting, digit prefixes for local classes, bare numbers
/// for anonymous ones).
pub struct TypeMetadata {
    binary_name: SmolStr,
    simple_name: SmolStr,
    package_name: SmolStr,
    canonical_name: Option<SmolStr>,
    kind: TypeKind,
    modifiers: Modifiers,
    local: bool,
    anonymous: bool,
    superclass: Option<SmolStr>,
    interfaces: Vec<SmolStr>,
    type_params: Vec<TypeParamMeta>,
    fields: Vec<FieldMeta>,
    methods: Vec<MethodMeta>,
    constructors: Vec<CtorMeta>,
    nested: Vec<SmolStr>,
}

impl TypeMetadata {
    /// Describe a type by its binary name. Simple/package/canonical names
    /// and local/anonymous flags are derived from the mangling.
    pub fn new(binary_name: &str, kind: TypeKind) -> Self {
        assert!(!binary_name.is_empty(), "binary name must not be empty");
        let derived = DerivedNames::from_binary(binary_name);
        Self {
            binary_name: SmolStr::new(binary_name),
            simple_name: derived.simple,
            package_name: derived.package,
            canonical_name: derived.canonical,
            kind,
            modifiers: Modifiers::PUBLIC,
            local: derived.local,
            anonymous: derived.anonymous,
            superclass: None,
            interfaces: Vec::new(),
            type_params: Vec::new(),
            fields: Vec::new(),
            methods: Vec::new(),
            constructors: Vec::new(),
            nested: Vec::new(),
        }
    }

    pub fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    pub fn with_superclass(mut self, binary_name: &str) -> Self {
        self.superclass = Some(SmolStr::new(binary_name));
        self
    }

    pub fn with_interface(mut self, binary_name: &str) -> Self {
        self.interfaces.push(SmolStr::new(binary_name));
        self
    }

    pub fn with_type_param(mut self, name: &str, bounds: Vec<TypeRef>) -> Self {
        self.type_params.push(TypeParamMeta {
            name: SmolStr::new(name),
            bounds,
        });
        self
    }

    pub fn with_field(mut self, field: FieldMeta) -> Self {
        self.fields.push(field);
        self
    }

    pub fn with_method(mut self, method: MethodMeta) -> Self {
        self.methods.push(method);
        self
    }

    pub fn with_constructor(mut self, ctor: CtorMeta) -> Self {
        self.constructors.push(ctor);
        self
    }

    pub fn with_nested(mut self, binary_name: &str) -> Self {
        self.nested.push(SmolStr::new(binary_name));
        self
    }

    pub fn binary_name(&self) -> &str {
        &self.binary_name
    }

    pub fn simple_name(&self) -> &str {
        &self.simple_name
    }

    pub fn package_name(&self) -> &str {
        &self.package_name
    }

    pub fn canonical_name(&self) -> Option<&str> {
        self.canonical_name.as_deref()
    }

    pub fn kind(&self) -> TypeKind {
        self.kind
    }

    pub fn modifiers(&self) -> Modifiers {
        self.modifiers
    }

    pub fn is_local(&self) -> bool {
        self.local
    }

    pub fn is_anonymous(&self) -> bool {
        self.anonymous
    }

    pub fn superclass(&self) -> Option<&str> {
        self.superclass.as_deref()
    }

    pub fn interfaces(&self) -> &[SmolStr] {
        &self.interfaces
    }

    pub fn type_params(&self) -> &[TypeParamMeta] {
        &self.type_params
    }

    pub fn fields(&self) -> &[FieldMeta] {
        &self.fields
    }

    pub fn methods(&self) -> &[MethodMeta] {
        &self.methods
    }

    pub fn constructors(&self) -> &[CtorMeta] {
        &self.constructors
    }

    pub fn nested(&self) -> &[SmolStr] {
        &self.nested
    }
}

impl fmt::Debug for TypeMetadata {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TypeMetadata({})", self.binary_name)
    }
}

/// Names and flags recoverable from a binary name alone.
pub(crate) struct DerivedNames {
    pub(crate) simple: SmolStr,
    pub(crate) package: SmolStr,
    pub(crate) canonical: Option<SmolStr>,
    pub(crate) local: bool,
    pub(crate) anonymous: bool,
}

impl DerivedNames {
    pub(crate) fn from_binary(binary: &str) -> Self {
        let (package, rest) = match binary.rfind('.') {
            Some(idx) => (&binary[..idx], &binary[idx + 1..]),
            None => ("", binary),
        };
        let segments: Vec<&str> = rest.split('$').collect();
        let last = segments.last().copied().unwrap_or("");

        let anonymous = !last.is_empty() && last.bytes().all(|b| b.is_ascii_digit());
        let local = !anonymous && last.starts_with(|c: char| c.is_ascii_digit());
        let simple = if anonymous {
            SmolStr::default()
        } else {
            SmolStr::new(last.trim_start_matches(|c: char| c.is_ascii_digit()))
        };

        // any digit-mangled segment in the chain means no canonical name,
        // for this type and everything nested below it
        let mangled = segments
            .iter()
            .any(|s| s.starts_with(|c: char| c.is_ascii_digit()));
        let canonical = if mangled {
            None
        } else if package.is_empty() {
            Some(SmolStr::new(segments.join(".")))
        } else {
            Some(SmolStr::new(format!("{}.{}", package, segments.join("."))))
        };

        Self {
            simple,
            package: SmolStr::new(package),
            canonical,
            local,
            anonymous,
        }
    }
}

/// A formal parameter row. The name is optional: classpath metadata often
/// does not record parameter names.
#[derive(Clone, Debug)]
pub struct ParamMeta {
    pub name: Option<SmolStr>,
    pub type_ref: TypeRef,
}

impl ParamMeta {
    pub fn named(name: &str, type_ref: TypeRef) -> Self {
        Self {
            name: Some(SmolStr::new(name)),
            type_ref,
        }
    }

    pub fn unnamed(type_ref: TypeRef) -> Self {
        Self {
            name: None,
            type_ref,
        }
    }
}

/// A field row.
#[derive(Clone, Debug)]
pub struct FieldMeta {
    pub name: SmolStr,
    pub modifiers: Modifiers,
    pub type_ref: TypeRef,
}

impl FieldMeta {
    pub fn new(name: &str, type_ref: TypeRef, modifiers: Modifiers) -> Self {
        Self {
            name: SmolStr::new(name),
            modifiers,
            type_ref,
        }
    }
}

/// A method row.
#[derive(Clone, Debug)]
pub struct MethodMeta {
    pub name: SmolStr,
    pub modifiers: Modifiers,
    pub varargs: bool,
    pub params: Vec<ParamMeta>,
    pub type_params: Vec<TypeParamMeta>,
}

impl MethodMeta {
    pub fn new(name: &str, modifiers: Modifiers) -> Self {
        Self {
            name: SmolStr::new(name),
            modifiers,
            varargs: false,
            params: Vec::new(),
            type_params: Vec::new(),
        }
    }

    pub fn with_param(mut self, param: ParamMeta) -> Self {
        self.params.push(param);
        self
    }

    pub fn with_varargs(mut self) -> Self {
        self.varargs = true;
        self
    }

    pub fn with_type_param(mut self, name: &str) -> Self {
        self.type_params.push(TypeParamMeta {
            name: SmolStr::new(name),
            bounds: Vec::new(),
        });
        self
    }
}

/// A constructor row.
#[derive(Clone, Debug)]
pub struct CtorMeta {
    pub modifiers: Modifiers,
    pub varargs: bool,
    pub params: Vec<ParamMeta>,
}

impl CtorMeta {
    pub fn new(modifiers: Modifiers) -> Self {
        Self {
            modifiers,
            varargs: false,
            params: Vec::new(),
        }
    }

    pub fn with_param(mut self, param: ParamMeta) -> Self {
        self.params.push(param);
        self
    }

    pub fn with_varargs(mut self) -> Self {
        self.varargs = true;
        self
    }
}

/// A type parameter row.
#[derive(Clone, Debug)]
pub struct TypeParamMeta {
    pub name: SmolStr,
    pub bounds: Vec<TypeRef>,
}

/// The classpath capability: given a binary name, either supply metadata
/// for the external type or report that it cannot be resolved.
///
/// "Cannot be resolved" is `None`, not an error; partial classpaths are
/// the normal operating condition.
pub trait MetadataLoader: Send + Sync {
    fn load(&self, binary_name: &str) -> Option<Arc<TypeMetadata>>;
}

/// An in-memory [`MetadataLoader`], keyed by binary name.
///
/// Embedders populate it up front from whatever classpath representation
/// they have; insertion order is preserved for diagnostics.
#[derive(Default)]
pub struct TableLoader {
    types: IndexMap<SmolStr, Arc<TypeMetadata>>,
}

impl TableLoader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a type, replacing any previous entry with the same binary
    /// name.
    pub fn insert(&mut self, meta: TypeMetadata) {
        self.types
            .insert(SmolStr::new(meta.binary_name()), Arc::new(meta));
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}

impl MetadataLoader for TableLoader {
    fn load(&self, binary_name: &str) -> Option<Arc<TypeMetadata>> {
        self.types.get(binary_name).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_derive_top_level() {
        let names = DerivedNames::from_binary("some.pack.Class");
        assert_eq!(names.simple, "Class");
        assert_eq!(names.package, "some.pack");
        assert_eq!(names.canonical.as_deref(), Some("some.pack.Class"));
        assert!(!names.local);
        assert!(!names.anonymous);
    }

    #[test]
    fn test_derive_nested() {
        let names = DerivedNames::from_binary("pack.Foo$Bar");
        assert_eq!(names.simple, "Bar");
        assert_eq!(names.canonical.as_deref(), Some("pack.Foo.Bar"));
    }

    #[test]
    fn test_derive_local() {
        let names = DerivedNames::from_binary("pack.Foo$1Local");
        assert_eq!(names.simple, "Local");
        assert!(names.local);
        assert!(!names.anonymous);
        assert_eq!(names.canonical, None);
    }

    #[test]
    fn test_derive_anonymous() {
        let names = DerivedNames::from_binary("pack.Foo$1");
        assert_eq!(names.simple, "");
        assert!(names.anonymous);
        assert_eq!(names.canonical, None);
    }

    #[test]
    fn test_derive_nested_in_local_has_no_canonical() {
        let names = DerivedNames::from_binary("pack.Foo$1Local$Inner");
        assert_eq!(names.simple, "Inner");
        assert!(!names.local);
        assert_eq!(names.canonical, None);
    }

    #[test]
    fn test_derive_default_package() {
        let names = DerivedNames::from_binary("Foo");
        assert_eq!(names.simple, "Foo");
        assert_eq!(names.package, "");
        assert_eq!(names.canonical.as_deref(), Some("Foo"));
    }

    #[test]
    fn test_table_loader_lookup() {
        let mut loader = TableLoader::new();
        loader.insert(TypeMetadata::new("java.lang.Object", crate::sym::TypeKind::Class));

        assert!(loader.load("java.lang.Object").is_some());
        assert!(loader.load("java.lang.Missing").is_none());
    }
}
