//! Name resolution for Groovy compilation units.
//!
//! Type names are resolved through a chain of [`TypeSolver`](groovy_types::TypeSolver)s:
//! - [`SourceSolver`]: classes declared in the unit being resolved
//! - [`MemorySolver`](groovy_types::MemorySolver): registered and built-in declarations
//! - [`ClasspathSolver`]: compiled classes loaded through a
//!   [`ClassLoader`](groovy_classpath::ClassLoader)
//!
//! [`CombinedSolver`] queries them in order. [`ResolutionContext`] binds one AST to a chain and
//! resolves names lexically first (locals, parameters, closure parameters, fields) so a local
//! named `String` shadows `java.lang.String`.

mod classpath;
mod combined;
mod context;
mod imports;
mod scopes;
mod source;

pub use classpath::{declaration_from_stub, ClassCache, ClasspathSolver};
pub use combined::CombinedSolver;
pub use context::{ResolutionContext, TypeCache};
pub use imports::{ImportScope, DEFAULT_IMPORT_CLASSES, DEFAULT_IMPORT_PACKAGES};
pub use scopes::{ScopeId, ScopedValue, SymbolTable};
pub use source::SourceSolver;
