use std::fmt;
use std::sync::Arc;

use groovy_types::{SolverResult, TypeSolver};

/// Tries each child solver in order; the first one that solves a name wins.
///
/// Results are never merged: a later solver is not consulted once an earlier one answers.
#[derive(Clone, Default)]
pub struct CombinedSolver {
    solvers: Vec<Arc<dyn TypeSolver>>,
}

impl CombinedSolver {
    pub fn new(solvers: Vec<Arc<dyn TypeSolver>>) -> Self {
        Self { solvers }
    }

    pub fn push(&mut self, solver: Arc<dyn TypeSolver>) {
        self.solvers.push(solver);
    }

    /// Adds `solver` ahead of every existing child.
    pub fn prepend(&mut self, solver: Arc<dyn TypeSolver>) {
        self.solvers.insert(0, solver);
    }

    #[must_use]
    pub fn with(mut self, solver: impl TypeSolver + 'static) -> Self {
        self.push(Arc::new(solver));
        self
    }

    pub fn len(&self) -> usize {
        self.solvers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.solvers.is_empty()
    }
}

impl fmt::Debug for CombinedSolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CombinedSolver")
            .field("solvers", &self.solvers.len())
            .finish()
    }
}

impl TypeSolver for CombinedSolver {
    fn try_solve_type(&self, name: &str) -> SolverResult {
        for (index, solver) in self.solvers.iter().enumerate() {
            if let solved @ SolverResult::Solved(_) = solver.try_solve_type(name) {
                tracing::trace!(name, index, "solved type");
                return solved;
            }
        }
        SolverResult::Unsolved
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use groovy_types::{MemorySolver, ResolvedTypeDeclaration};

    #[test]
    fn first_solver_wins() {
        let first = MemorySolver::new()
            .with(ResolvedTypeDeclaration::class("a.Foo").implements("a.First"));
        let second = MemorySolver::new()
            .with(ResolvedTypeDeclaration::class("a.Foo").implements("a.Second"));
        let combined = CombinedSolver::default().with(first).with(second);

        let foo = combined.solve_type("a.Foo").expect("a.Foo");
        assert_eq!(foo.interfaces(), ["a.First".to_string()]);
    }

    #[test]
    fn empty_chain_solves_nothing() {
        let combined = CombinedSolver::default();
        assert!(combined.is_empty());
        assert_eq!(combined.try_solve_type("java.lang.String"), SolverResult::Unsolved);
    }
}
