use std::fmt;
use std::sync::Arc;

use groovy_cache::{LruCache, ResolutionCache};
use groovy_classfile::{BaseType, FieldType, ReturnType};
use groovy_classpath::{ClassLoader, ClassStub};
use groovy_core::{binary_name_variants, internal_to_binary};
use groovy_types::{
    DeclarationOrigin, FieldInfo, MethodInfo, PrimitiveType, ResolvedType,
    ResolvedTypeDeclaration, SolverResult, TypeKind, TypeSolver,
};

/// Process-wide memo of class lookups by qualified name; `None` records a miss.
pub type ClassCache = dyn ResolutionCache<String, Option<Arc<ResolvedTypeDeclaration>>>;

const DEFAULT_CLASS_CAPACITY: usize = 4096;

/// Resolves fully-qualified names by loading compiled classes.
///
/// Nested classes may be spelled with dots (`java.util.Map.Entry`). Unqualified names are never
/// looked up here. Classes that fail to load or parse are logged and reported as unsolved.
///
/// Answers (including negative ones) are memoised; the cache can be shared between solvers over
/// the same loader so it outlives individual compilation units.
pub struct ClasspathSolver {
    loader: Arc<dyn ClassLoader>,
    cache: Arc<ClassCache>,
}

impl ClasspathSolver {
    pub fn new(loader: Arc<dyn ClassLoader>) -> Self {
        Self::with_cache(loader, Arc::new(LruCache::new(DEFAULT_CLASS_CAPACITY)))
    }

    pub fn with_cache(loader: Arc<dyn ClassLoader>, cache: Arc<ClassCache>) -> Self {
        Self { loader, cache }
    }

    pub fn cache(&self) -> &ClassCache {
        &*self.cache
    }

    fn load(&self, name: &str) -> Load {
        for candidate in binary_name_variants(name) {
            match self.loader.load_class(&candidate) {
                Ok(Some(stub)) => {
                    tracing::debug!(name, binary_name = %candidate, "loaded class");
                    return Load::Found(Arc::new(declaration_from_stub(&stub)));
                }
                Ok(None) => continue,
                Err(err) => {
                    tracing::warn!(
                        class = %candidate,
                        error = %err,
                        "failed to load class; treating it as unresolved"
                    );
                    return Load::Failed;
                }
            }
        }
        Load::Missing
    }
}

enum Load {
    Found(Arc<ResolvedTypeDeclaration>),
    Missing,
    Failed,
}

impl fmt::Debug for ClasspathSolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClasspathSolver")
            .field("cached", &self.cache.len())
            .finish_non_exhaustive()
    }
}

impl TypeSolver for ClasspathSolver {
    fn try_solve_type(&self, name: &str) -> SolverResult {
        if !name.contains('.') {
            return SolverResult::Unsolved;
        }
        let key = name.to_string();
        if let Some(cached) = self.cache.get(&key) {
            return cached.into();
        }

        match self.load(name) {
            Load::Found(decl) => {
                self.cache.put(key, Some(Arc::clone(&decl)));
                SolverResult::Solved(decl)
            }
            Load::Missing => {
                self.cache.put(key, None);
                SolverResult::Unsolved
            }
            // Not remembered, so a later attempt can succeed once the class is fixed.
            Load::Failed => SolverResult::Unsolved,
        }
    }
}

/// Converts a loaded class into a declaration. Enum constants are also kept as static fields.
pub fn declaration_from_stub(stub: &ClassStub) -> ResolvedTypeDeclaration {
    let kind = if stub.is_annotation() {
        TypeKind::Annotation
    } else if stub.is_interface() {
        TypeKind::Interface
    } else if stub.is_enum() {
        TypeKind::Enum
    } else {
        TypeKind::Class
    };

    // Interfaces name `java.lang.Object` as their superclass in classfiles.
    let super_class = match kind {
        TypeKind::Interface | TypeKind::Annotation => None,
        TypeKind::Class | TypeKind::Enum => stub.super_binary_name.clone(),
    };

    let mut decl = ResolvedTypeDeclaration::new(stub.binary_name.clone(), kind)
        .with_origin(DeclarationOrigin::Classpath)
        .with_super_class(super_class);
    for interface in &stub.interfaces {
        decl = decl.implements(interface.clone());
    }
    for param in &stub.type_parameters {
        decl = decl.with_type_parameter(param.clone());
    }
    for field in &stub.fields {
        if field.is_enum_constant() {
            decl = decl.with_enum_constant(field.name.clone());
        }
        decl = decl.with_field(FieldInfo {
            name: field.name.clone(),
            ty: field_type(&field.ty),
            is_static: field.is_static(),
        });
    }
    for method in &stub.methods {
        decl = decl.with_method(MethodInfo {
            name: method.name.clone(),
            params: method.descriptor.params.iter().map(field_type).collect(),
            return_type: match &method.descriptor.return_type {
                ReturnType::Void => ResolvedType::Primitive(PrimitiveType::Void),
                ReturnType::Type(ty) => field_type(ty),
            },
            is_static: method.is_static(),
        });
    }
    decl
}

fn field_type(ty: &FieldType) -> ResolvedType {
    match ty {
        FieldType::Base(base) => ResolvedType::Primitive(match base {
            BaseType::Boolean => PrimitiveType::Boolean,
            BaseType::Byte => PrimitiveType::Byte,
            BaseType::Char => PrimitiveType::Char,
            BaseType::Short => PrimitiveType::Short,
            BaseType::Int => PrimitiveType::Int,
            BaseType::Long => PrimitiveType::Long,
            BaseType::Float => PrimitiveType::Float,
            BaseType::Double => PrimitiveType::Double,
        }),
        FieldType::Object(internal) => ResolvedType::reference(internal_to_binary(internal)),
        FieldType::Array(component) => ResolvedType::array_of(field_type(component)),
    }
}
