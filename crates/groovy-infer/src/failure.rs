use groovy_types::{ResolvedType, TypeError};
use thiserror::Error;

/// Why an expression has no type.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolutionFailure {
    /// Not determinable with what the solvers know. Recoverable: a richer classpath or a fixed
    /// source may resolve it later.
    #[error("cannot resolve `{0}`")]
    Unresolved(String),
    /// The node is not a typed expression (statements, declarations, error nodes).
    #[error("node has no type")]
    Untyped,
}

impl ResolutionFailure {
    pub fn unresolved(what: impl Into<String>) -> Self {
        ResolutionFailure::Unresolved(what.into())
    }

    pub fn is_unresolved(&self) -> bool {
        matches!(self, ResolutionFailure::Unresolved(_))
    }
}

impl From<TypeError> for ResolutionFailure {
    fn from(err: TypeError) -> Self {
        ResolutionFailure::Unresolved(err.to_string())
    }
}

pub type InferResult<T = ResolvedType> = Result<T, ResolutionFailure>;
