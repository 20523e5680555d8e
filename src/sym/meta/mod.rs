//! The metadata-backed symbol provider.
//!
//! Symbols for program elements that are not declared in any analyzed
//! compilation unit: external types reachable through the classpath
//! capability ([`MetadataLoader`]), derived array types, primitives, and
//! the unresolved placeholder. They are created lazily, on first
//! reference, and cached in the shared
//! [`SymbolStore`](crate::sym::SymbolStore).

mod array;
mod class;
mod exec;
mod field;
mod metadata;
mod primitives;
mod unresolved;

pub use array::array_of;
pub use class::MetaClassSym;
pub use exec::MetaExecSym;
pub use field::MetaFieldSym;
pub use metadata::{
    CtorMeta, FieldMeta, MetadataLoader, MethodMeta, ParamMeta, TableLoader, TypeMetadata,
    TypeParamMeta,
};
pub use primitives::{PrimitiveKind, PrimitiveSym};
pub use unresolved::UnresolvedClassSym;
