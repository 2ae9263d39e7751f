use std::sync::Arc;

use groovy_ast::Ast;
use groovy_cache::{LruCache, NoopCache};
use groovy_classpath::{Classpath, ClasspathEntry};
use groovy_config::{CacheConfig, EngineConfig};
use groovy_resolve::{ClassCache, ClasspathSolver, CombinedSolver, ResolutionContext, TypeCache};
use groovy_types::{MemorySolver, TypeSolver};

/// Long-lived resolution state shared by every compilation unit of a project: the solver chain
/// and its class cache. Per-unit state lives in the [`ResolutionContext`]s it creates.
#[derive(Clone)]
pub struct ResolutionSession {
    solver: Arc<dyn TypeSolver>,
    cache: CacheConfig,
}

impl std::fmt::Debug for ResolutionSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResolutionSession")
            .field("cache", &self.cache)
            .finish_non_exhaustive()
    }
}

impl ResolutionSession {
    /// Compiled classes from the configured classpath first, then the built-in JDK model.
    pub fn new(config: &EngineConfig) -> Self {
        let mut chain = CombinedSolver::default();
        if !config.classpath.entries.is_empty() {
            let classpath = Classpath::new(
                config
                    .classpath
                    .entries
                    .iter()
                    .map(ClasspathEntry::from_path)
                    .collect(),
            );
            let class_cache: Arc<ClassCache> = if config.cache.enabled {
                Arc::new(LruCache::new(config.cache.class_capacity))
            } else {
                Arc::new(NoopCache::new())
            };
            chain.push(Arc::new(ClasspathSolver::with_cache(
                Arc::new(classpath),
                class_cache,
            )));
        }
        chain.push(Arc::new(MemorySolver::with_minimal_jdk()));
        tracing::debug!(
            classpath_entries = config.classpath.entries.len(),
            cache_enabled = config.cache.enabled,
            "created resolution session"
        );
        Self::with_solver(Arc::new(chain), config.cache.clone())
    }

    pub fn with_solver(solver: Arc<dyn TypeSolver>, cache: CacheConfig) -> Self {
        Self { solver, cache }
    }

    pub fn solver(&self) -> &Arc<dyn TypeSolver> {
        &self.solver
    }

    pub fn cache_config(&self) -> &CacheConfig {
        &self.cache
    }

    /// A context for `ast` with its own type cache.
    pub fn context(&self, ast: Arc<Ast>) -> ResolutionContext {
        let type_cache: Arc<TypeCache> = if self.cache.enabled {
            Arc::new(LruCache::new(self.cache.type_capacity))
        } else {
            Arc::new(NoopCache::new())
        };
        ResolutionContext::with_type_cache(ast, self.solver.clone(), type_cache)
    }
}

impl Default for ResolutionSession {
    fn default() -> Self {
        Self::new(&EngineConfig::default())
    }
}
