use std::sync::Arc;

use crate::ResolvedTypeDeclaration;

/// Outcome of asking a solver for a type declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SolverResult {
    Solved(Arc<ResolvedTypeDeclaration>),
    Unsolved,
}

impl SolverResult {
    pub fn is_solved(&self) -> bool {
        matches!(self, SolverResult::Solved(_))
    }

    pub fn into_option(self) -> Option<Arc<ResolvedTypeDeclaration>> {
        match self {
            SolverResult::Solved(decl) => Some(decl),
            SolverResult::Unsolved => None,
        }
    }
}

impl From<Option<Arc<ResolvedTypeDeclaration>>> for SolverResult {
    fn from(value: Option<Arc<ResolvedTypeDeclaration>>) -> Self {
        value.map_or(SolverResult::Unsolved, SolverResult::Solved)
    }
}

/// A source of type declarations keyed by qualified name.
///
/// Solvers answer only for names they know; anything else is [`SolverResult::Unsolved`], never an
/// error. Implementations must be safe to query from several threads at once.
pub trait TypeSolver: Send + Sync {
    fn try_solve_type(&self, name: &str) -> SolverResult;

    fn solve_type(&self, name: &str) -> Option<Arc<ResolvedTypeDeclaration>> {
        self.try_solve_type(name).into_option()
    }
}

impl<T: TypeSolver + ?Sized> TypeSolver for Arc<T> {
    fn try_solve_type(&self, name: &str) -> SolverResult {
        (**self).try_solve_type(name)
    }
}
