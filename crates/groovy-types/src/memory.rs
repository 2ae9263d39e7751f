use std::collections::HashMap;
use std::sync::Arc;

use groovy_core::canonical_name;

use crate::{minimal_jdk, ResolvedTypeDeclaration, SolverResult, TypeSolver};

/// A fixed set of declarations held in memory.
///
/// Lookups accept both binary (`java.util.Map$Entry`) and canonical (`java.util.Map.Entry`)
/// spellings. Later insertions replace earlier ones with the same name.
#[derive(Debug, Clone, Default)]
pub struct MemorySolver {
    types: HashMap<String, Arc<ResolvedTypeDeclaration>>,
}

impl MemorySolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// The built-in JDK and Groovy runtime model.
    pub fn with_minimal_jdk() -> Self {
        let mut solver = Self::new();
        for decl in minimal_jdk() {
            solver.insert(decl);
        }
        solver
    }

    pub fn insert(&mut self, decl: ResolvedTypeDeclaration) -> Arc<ResolvedTypeDeclaration> {
        let decl = Arc::new(decl);
        self.insert_arc(Arc::clone(&decl));
        decl
    }

    pub fn insert_arc(&mut self, decl: Arc<ResolvedTypeDeclaration>) {
        let canonical = canonical_name(decl.binary_name());
        if canonical != decl.binary_name() {
            self.types.insert(canonical, Arc::clone(&decl));
        }
        self.types.insert(decl.binary_name().to_string(), decl);
    }

    pub fn with(mut self, decl: ResolvedTypeDeclaration) -> Self {
        self.insert(decl);
        self
    }

    pub fn contains(&self, name: &str) -> bool {
        self.types.contains_key(name)
    }

    /// Declarations in unspecified order, each once.
    pub fn declarations(&self) -> impl Iterator<Item = &Arc<ResolvedTypeDeclaration>> {
        self.types
            .iter()
            .filter(|(key, decl)| key.as_str() == decl.binary_name())
            .map(|(_, decl)| decl)
    }
}

impl TypeSolver for MemorySolver {
    fn try_solve_type(&self, name: &str) -> SolverResult {
        self.types.get(name).cloned().into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nested_types_answer_to_both_spellings() {
        let solver = MemorySolver::new().with(ResolvedTypeDeclaration::interface("a.Outer$Inner"));
        assert!(solver.try_solve_type("a.Outer$Inner").is_solved());
        assert!(solver.try_solve_type("a.Outer.Inner").is_solved());
        assert!(!solver.try_solve_type("Inner").is_solved());
        assert_eq!(solver.declarations().count(), 1);
    }

    #[test]
    fn minimal_jdk_has_the_basics() {
        let solver = MemorySolver::with_minimal_jdk();
        for name in [
            "java.lang.Object",
            "java.lang.String",
            "java.lang.Integer",
            "java.util.ArrayList",
            "java.util.LinkedHashMap",
            "groovy.lang.GString",
            "groovy.lang.Closure",
            "groovy.lang.IntRange",
            "java.math.BigDecimal",
        ] {
            assert!(solver.contains(name), "missing {name}");
        }
    }
}
