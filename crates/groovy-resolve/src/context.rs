use std::collections::HashMap;
use std::sync::Arc;

use groovy_ast::{Ast, NodeId, NodeKey, NodeKind, TypeRef};
use groovy_cache::{LruCache, ResolutionCache};
use groovy_types::{
    find_field, find_methods, PrimitiveType, ResolvedDeclaration, ResolvedEnumConstantDeclaration,
    ResolvedMethodDeclaration, ResolvedType, ResolvedTypeDeclaration, ResolvedValueDeclaration,
    TypeSolver,
};

use crate::source::{class_nodes, declared_type};
use crate::{CombinedSolver, ImportScope, ScopedValue, SourceSolver, SymbolTable};

/// Node-keyed cache of extracted expression types.
pub type TypeCache = dyn ResolutionCache<NodeKey, ResolvedType>;

const DEFAULT_TYPE_CACHE_CAPACITY: usize = 16 * 1024;

/// Everything needed to resolve names in one compilation unit.
///
/// The solver chain always starts with the unit's own [`SourceSolver`]; the solver passed in
/// (usually a [`CombinedSolver`] of memory and classpath solvers) follows it.
pub struct ResolutionContext {
    ast: Arc<Ast>,
    solver: CombinedSolver,
    source: Arc<SourceSolver>,
    imports: ImportScope,
    symbols: SymbolTable,
    class_names: HashMap<NodeId, String>,
    type_cache: Arc<TypeCache>,
}

impl std::fmt::Debug for ResolutionContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResolutionContext")
            .field("ast", &self.ast.id())
            .field("solver", &self.solver)
            .field("classes", &self.class_names.len())
            .finish_non_exhaustive()
    }
}

impl ResolutionContext {
    pub fn new(ast: Arc<Ast>, solver: Arc<dyn TypeSolver>) -> Self {
        Self::with_type_cache(
            ast,
            solver,
            Arc::new(LruCache::new(DEFAULT_TYPE_CACHE_CAPACITY)),
        )
    }

    pub fn with_type_cache(
        ast: Arc<Ast>,
        solver: Arc<dyn TypeSolver>,
        type_cache: Arc<TypeCache>,
    ) -> Self {
        let imports = ImportScope::from_ast(&ast);
        let source = Arc::new(SourceSolver::from_ast(&ast, &imports, solver.as_ref()));
        let chain = CombinedSolver::new(vec![source.clone() as Arc<dyn TypeSolver>, solver]);
        let symbols = SymbolTable::build(&ast);
        let class_names = class_nodes(&ast).into_iter().collect();
        tracing::debug!(ast = ?ast.id(), nodes = ast.len(), "created resolution context");
        ResolutionContext {
            ast,
            solver: chain,
            source,
            imports,
            symbols,
            class_names,
            type_cache,
        }
    }

    pub fn ast(&self) -> &Ast {
        &self.ast
    }

    /// The full chain, unit classes first.
    pub fn solver(&self) -> &dyn TypeSolver {
        &self.solver
    }

    pub fn source(&self) -> &SourceSolver {
        &self.source
    }

    pub fn imports(&self) -> &ImportScope {
        &self.imports
    }

    pub fn symbols(&self) -> &SymbolTable {
        &self.symbols
    }

    pub fn type_cache(&self) -> &TypeCache {
        self.type_cache.as_ref()
    }

    pub fn node_key(&self, node: NodeId) -> NodeKey {
        self.ast.key(node)
    }

    /// Resolves a type name as written in this unit.
    pub fn resolve_type_name(&self, name: &str) -> Option<Arc<ResolvedTypeDeclaration>> {
        self.imports.resolve(name, &self.solver)
    }

    /// Resolves a type name as written at `node`: member types of the enclosing classes first,
    /// then the unit's imports.
    pub fn resolve_type_name_at(
        &self,
        node: NodeId,
        name: &str,
    ) -> Option<Arc<ResolvedTypeDeclaration>> {
        let nested = name.replace('.', "$");
        let mut current = node;
        while let Some(class_node) = self.enclosing_class_node(current) {
            if let Some(outer) = self.class_name(class_node) {
                if let Some(decl) = self.solver.solve_type(&format!("{outer}${nested}")) {
                    return Some(decl);
                }
            }
            current = class_node;
        }
        self.resolve_type_name(name)
    }

    /// Resolves a written type; `None` when its base type is unknown.
    pub fn resolve_type_ref(&self, ty: Option<&TypeRef>) -> Option<ResolvedType> {
        self.imports.resolve_type_ref(ty, &self.solver)
    }

    /// Like [`ResolutionContext::resolve_type_ref`], but member types of the classes enclosing
    /// `node` are visible too.
    pub fn resolve_type_ref_at(&self, node: NodeId, ty: &TypeRef) -> Option<ResolvedType> {
        let keyword = matches!(ty.name.as_str(), "def" | "var");
        if keyword || PrimitiveType::from_name(&ty.name).is_some() {
            return self.resolve_type_ref(Some(ty));
        }
        let base = self.resolve_type_name_at(node, &ty.name)?;
        Some(ResolvedType::array_with_dimensions(
            base.to_type(),
            usize::from(ty.dimensions),
        ))
    }

    /// Type of a declaration written with `ty`. Unknown names keep their spelling.
    pub fn declared_type(&self, ty: Option<&TypeRef>) -> ResolvedType {
        declared_type(&self.imports, ty, &self.solver)
    }

    /// Innermost class node strictly enclosing `node`.
    pub fn enclosing_class_node(&self, node: NodeId) -> Option<NodeId> {
        self.ast
            .ancestors(node)
            .find(|&ancestor| matches!(self.ast.kind(ancestor), NodeKind::Class { .. }))
    }

    /// Binary name of a class declared in this unit.
    pub fn class_name(&self, class_node: NodeId) -> Option<&str> {
        self.class_names.get(&class_node).map(String::as_str)
    }

    /// Declaration of the innermost class enclosing `node`.
    pub fn enclosing_class(&self, node: NodeId) -> Option<Arc<ResolvedTypeDeclaration>> {
        let class_node = self.enclosing_class_node(node)?;
        self.solver.solve_type(self.class_name(class_node)?)
    }

    /// The declaration a name or reference expression denotes.
    ///
    /// Lexical bindings win over everything else, then members of the enclosing classes, then
    /// type names. Declaration nodes resolve to themselves.
    pub fn resolve_symbol(&self, node: NodeId) -> Option<ResolvedDeclaration> {
        match self.ast.kind(node) {
            NodeKind::Variable { name } => {
                if let Some(value) = self.symbols.binding(node) {
                    return self.declaration_of_binding(value);
                }
                if matches!(name.as_str(), "this" | "super") {
                    let class = self.enclosing_class(node)?;
                    if name == "super" {
                        let super_class = class.super_class()?;
                        return self.solver.solve_type(super_class).map(ResolvedDeclaration::Type);
                    }
                    return Some(ResolvedDeclaration::Type(class));
                }
                if let Some(member) = self.enclosing_member(node, name) {
                    return Some(member);
                }
                self.resolve_type_name_at(node, name)
                    .map(ResolvedDeclaration::Type)
            }
            NodeKind::Property { receiver, name, .. } => {
                if let Some(path) = self.dotted_path(node) {
                    if let Some(decl) = self.resolve_type_name_at(node, &path) {
                        return Some(ResolvedDeclaration::Type(decl));
                    }
                }
                let owner = self.resolve_symbol(*receiver)?;
                self.member_of_type(owner.as_type()?, name)
            }
            NodeKind::MethodCall {
                receiver,
                name,
                args,
            } => {
                let owner = match receiver {
                    None => self.enclosing_class(node)?,
                    Some(receiver) => self.resolve_symbol(*receiver)?.as_type()?.clone(),
                };
                self.method_of_type(&owner, name, args.len())
                    .map(ResolvedDeclaration::Method)
            }
            NodeKind::ConstructorCall { ty, .. }
            | NodeKind::ClassLiteral { ty }
            | NodeKind::Cast { ty, .. } => self
                .resolve_type_name_at(node, &ty.name)
                .map(ResolvedDeclaration::Type),
            _ => self.declaration_of(node),
        }
    }

    /// The declaration introduced by a declaration node itself.
    pub fn declaration_of(&self, node: NodeId) -> Option<ResolvedDeclaration> {
        let range = self.ast.range(node);
        match self.ast.kind(node) {
            NodeKind::Class { .. } => self
                .solver
                .solve_type(self.class_name(node)?)
                .map(ResolvedDeclaration::Type),
            NodeKind::VariableDecl { name, ty, .. } => Some(ResolvedDeclaration::Value(Arc::new(
                ResolvedValueDeclaration::local(name.clone(), self.declared_type(ty.as_ref()))
                    .with_range(range),
            ))),
            NodeKind::Parameter { name, ty, .. } => Some(ResolvedDeclaration::Value(Arc::new(
                ResolvedValueDeclaration::parameter(name.clone(), self.declared_type(ty.as_ref()))
                    .with_range(range),
            ))),
            NodeKind::Field { name, ty, .. } => {
                let owner = self.enclosing_class_node(node).and_then(|c| self.class_name(c));
                let decl = match owner {
                    Some(owner) => {
                        let class = self.solver.solve_type(owner)?;
                        let info = class.field(name)?;
                        ResolvedValueDeclaration::field(owner, info)
                    }
                    None => ResolvedValueDeclaration::local(
                        name.clone(),
                        self.declared_type(ty.as_ref()),
                    ),
                };
                Some(ResolvedDeclaration::Value(Arc::new(decl.with_range(range))))
            }
            NodeKind::EnumConstant { name } => {
                let owner = self.class_name(self.enclosing_class_node(node)?)?;
                Some(ResolvedDeclaration::EnumConstant(Arc::new(
                    ResolvedEnumConstantDeclaration {
                        name: name.clone(),
                        enum_type: owner.to_string(),
                        range: Some(range),
                    },
                )))
            }
            NodeKind::Method {
                name,
                return_type,
                params,
                is_static,
                ..
            } => {
                let owner = self.class_name(self.enclosing_class_node(node)?)?;
                let params = params
                    .iter()
                    .map(|&param| match self.ast.kind(param) {
                        NodeKind::Parameter { ty, .. } => self.declared_type(ty.as_ref()),
                        _ => ResolvedType::object(),
                    })
                    .collect();
                Some(ResolvedDeclaration::Method(Arc::new(ResolvedMethodDeclaration {
                    name: name.clone(),
                    declaring_type: owner.to_string(),
                    params,
                    return_type: self.declared_type(return_type.as_ref()),
                    is_static: *is_static,
                    range: Some(range),
                })))
            }
            _ => None,
        }
    }

    /// The declaring node of a lexically bound variable expression.
    pub fn binding_node(&self, variable: NodeId) -> Option<NodeId> {
        match self.symbols.binding(variable)? {
            ScopedValue::ImplicitIt(_) => None,
            value => Some(value.node()),
        }
    }

    fn declaration_of_binding(&self, value: ScopedValue) -> Option<ResolvedDeclaration> {
        match value {
            ScopedValue::ImplicitIt(closure) => Some(ResolvedDeclaration::Value(Arc::new(
                ResolvedValueDeclaration::parameter("it", ResolvedType::object())
                    .with_range(self.ast.range(closure)),
            ))),
            value => self.declaration_of(value.node()),
        }
    }

    /// A field of the enclosing classes (or their ancestors) called `name`.
    fn enclosing_member(&self, node: NodeId, name: &str) -> Option<ResolvedDeclaration> {
        let mut current = node;
        while let Some(class_node) = self.enclosing_class_node(current) {
            if let Some(class) = self.class_name(class_node).and_then(|n| self.solver.solve_type(n))
            {
                if let Some(member) = self.member_of_type(&class, name) {
                    return Some(member);
                }
            }
            current = class_node;
        }
        None
    }

    /// A static or instance field, or an enum constant, reachable through `owner`.
    pub fn member_of_type(
        &self,
        owner: &ResolvedTypeDeclaration,
        name: &str,
    ) -> Option<ResolvedDeclaration> {
        if let Some(constant) = owner.as_enum().and_then(|e| e.constant(name)) {
            let range = self.member_range(owner.binary_name(), name);
            return Some(ResolvedDeclaration::EnumConstant(Arc::new(
                ResolvedEnumConstantDeclaration { range, ..constant },
            )));
        }
        let (declaring, info) = find_field(owner, name, &self.solver)?;
        let mut decl = ResolvedValueDeclaration::field(&declaring, &info);
        decl.range = self.member_range(&declaring, name);
        Some(ResolvedDeclaration::Value(Arc::new(decl)))
    }

    /// The method called `name` taking `arity` arguments; falls back to any overload.
    pub fn method_of_type(
        &self,
        owner: &ResolvedTypeDeclaration,
        name: &str,
        arity: usize,
    ) -> Option<Arc<ResolvedMethodDeclaration>> {
        let candidates = find_methods(owner, name, &self.solver);
        let (declaring, info) = candidates
            .iter()
            .find(|(_, m)| m.params.len() == arity)
            .or_else(|| candidates.first())?;
        let mut decl = ResolvedMethodDeclaration::from_info(declaring, info);
        decl.range = self.member_range(declaring, name);
        Some(Arc::new(decl))
    }

    /// Source range of a member declared by a class of this unit.
    fn member_range(&self, owner: &str, name: &str) -> Option<groovy_core::Range> {
        let class_node = self.source.node_of(owner)?;
        let NodeKind::Class { members, .. } = self.ast.kind(class_node) else {
            return None;
        };
        members
            .iter()
            .find(|&&member| self.ast.kind(member).declared_name() == Some(name))
            .map(|&member| self.ast.range(member))
    }

    /// `a.b.C` written as nested property accesses over an unbound variable.
    fn dotted_path(&self, node: NodeId) -> Option<String> {
        match self.ast.kind(node) {
            NodeKind::Variable { name } if self.symbols.binding(node).is_none() => {
                Some(name.clone())
            }
            NodeKind::Property { receiver, name, .. } => {
                let head = self.dotted_path(*receiver)?;
                Some(format!("{head}.{name}"))
            }
            _ => None,
        }
    }
}
