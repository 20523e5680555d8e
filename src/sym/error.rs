//! Error types for symbol construction.

use smol_str::SmolStr;
use thiserror::Error;

/// Errors raised by symbol construction.
///
/// These are caller contract violations, not resolution failures:
/// an external type that cannot be found is reported as `None` (or an
/// unresolved symbol), never through this type.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SymbolError {
    /// Arrays of anonymous-class type cannot occur in valid source, so
    /// requesting one is a bug in the caller.
    #[error("anonymous classes cannot be array components: {0}")]
    AnonymousArrayComponent(SmolStr),
}
