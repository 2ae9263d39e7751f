//! Resolved types and declarations.
//!
//! [`ResolvedType`] is the value lattice the inference engine computes over; declarations are the
//! symbol-side counterpart produced by [`TypeSolver`]s. Reference types name their declaration by
//! binary name and look it up through a solver when an ancestor search is needed, so types stay
//! small, hashable and free of ownership cycles.

mod decl;
mod error;
mod hierarchy;
mod jdk;
mod memory;
mod solver;
mod ty;

pub use decl::{
    DeclarationKind, DeclarationOrigin, FieldInfo, MethodInfo, ResolvedDeclaration,
    ResolvedEnumConstantDeclaration, ResolvedEnumDeclaration, ResolvedMethodDeclaration,
    ResolvedTypeDeclaration, ResolvedValueDeclaration, SymbolId, TypeKind, ValueKind,
};
pub use error::TypeError;
pub use hierarchy::{ancestor_names, find_field, find_methods, is_subtype_name, supertypes_bfs};
pub use jdk::minimal_jdk;
pub use memory::MemorySolver;
pub use solver::{SolverResult, TypeSolver};
pub use ty::{PrimitiveType, ReferenceType, ResolvedType, TypeVariable};

/// Binary names the engine refers to directly.
pub mod well_known {
    pub const OBJECT: &str = "java.lang.Object";
    pub const STRING: &str = "java.lang.String";
    pub const CLASS: &str = "java.lang.Class";
    pub const NUMBER: &str = "java.lang.Number";
    pub const ENUM: &str = "java.lang.Enum";
    pub const CLONEABLE: &str = "java.lang.Cloneable";
    pub const SERIALIZABLE: &str = "java.io.Serializable";
    pub const ARRAY_LIST: &str = "java.util.ArrayList";
    pub const LINKED_HASH_MAP: &str = "java.util.LinkedHashMap";
    pub const BIG_INTEGER: &str = "java.math.BigInteger";
    pub const BIG_DECIMAL: &str = "java.math.BigDecimal";
    pub const GSTRING: &str = "groovy.lang.GString";
    pub const CLOSURE: &str = "groovy.lang.Closure";
    pub const INT_RANGE: &str = "groovy.lang.IntRange";
    pub const OBJECT_RANGE: &str = "groovy.lang.ObjectRange";
    pub const MATCHER: &str = "java.util.regex.Matcher";
}
