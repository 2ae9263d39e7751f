//! Lexical scopes of a compilation unit.
//!
//! The rules mirror Groovy's:
//! - a local is in scope from its declaration to the end of the enclosing block, and within
//!   its own initializer;
//! - parameters are in scope in the method or closure body;
//! - a closure without parameters declares the implicit `it`;
//! - fields, properties and enum constants are in scope throughout their class (and nested
//!   classes);
//! - script statements see script locals, classes do not.

use std::collections::HashMap;

use groovy_ast::{Ast, NodeId, NodeKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ScopeId(u32);

impl ScopeId {
    #[must_use]
    pub const fn idx(self) -> usize {
        self.0 as usize
    }
}

/// What a simple name is bound to. Every variant carries the declaring node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScopedValue {
    Local(NodeId),
    Param(NodeId),
    /// A field or property of an enclosing class.
    Field(NodeId),
    EnumConstant(NodeId),
    /// `it` inside the closure node.
    ImplicitIt(NodeId),
}

impl ScopedValue {
    pub fn node(self) -> NodeId {
        match self {
            ScopedValue::Local(node)
            | ScopedValue::Param(node)
            | ScopedValue::Field(node)
            | ScopedValue::EnumConstant(node)
            | ScopedValue::ImplicitIt(node) => node,
        }
    }
}

#[derive(Debug, Clone, Default)]
struct ScopeData {
    parent: Option<ScopeId>,
    entries: HashMap<String, ScopedValue>,
}

/// Scope tree of one AST plus the binding of every variable expression inside it.
#[derive(Debug, Clone)]
pub struct SymbolTable {
    scopes: Vec<ScopeData>,
    node_scopes: HashMap<NodeId, ScopeId>,
    bindings: HashMap<NodeId, ScopedValue>,
}

impl SymbolTable {
    pub fn build(ast: &Ast) -> Self {
        let mut builder = Builder {
            ast,
            scopes: Vec::new(),
            node_scopes: HashMap::new(),
            bindings: HashMap::new(),
        };
        let root = builder.alloc_scope(None);
        builder.visit(ast.root(), root);
        SymbolTable {
            scopes: builder.scopes,
            node_scopes: builder.node_scopes,
            bindings: builder.bindings,
        }
    }

    /// The declaration a `Variable` node refers to, if it is bound lexically.
    #[must_use]
    pub fn binding(&self, variable: NodeId) -> Option<ScopedValue> {
        self.bindings.get(&variable).copied()
    }

    /// The scope active at `node`.
    #[must_use]
    pub fn scope_for(&self, node: NodeId) -> Option<ScopeId> {
        self.node_scopes.get(&node).copied()
    }

    /// Resolves a simple name by walking up the scope parent chain.
    #[must_use]
    pub fn resolve_name(&self, scope: ScopeId, name: &str) -> Option<ScopedValue> {
        let mut current = Some(scope);
        while let Some(id) = current {
            let data = &self.scopes[id.idx()];
            if let Some(&value) = data.entries.get(name) {
                return Some(value);
            }
            current = data.parent;
        }
        None
    }

    /// Every name visible at `node`, innermost binding first. Useful for completion.
    #[must_use]
    pub fn visible_names(&self, node: NodeId) -> Vec<(String, ScopedValue)> {
        let mut out: Vec<(String, ScopedValue)> = Vec::new();
        let mut current = self.scope_for(node);
        while let Some(id) = current {
            let data = &self.scopes[id.idx()];
            let mut names: Vec<_> = data.entries.iter().collect();
            names.sort_by(|a, b| a.0.cmp(b.0));
            for (name, value) in names {
                if !out.iter().any(|(seen, _)| seen == name) {
                    out.push((name.clone(), *value));
                }
            }
            current = data.parent;
        }
        out
    }
}

struct Builder<'a> {
    ast: &'a Ast,
    scopes: Vec<ScopeData>,
    node_scopes: HashMap<NodeId, ScopeId>,
    bindings: HashMap<NodeId, ScopedValue>,
}

impl Builder<'_> {
    fn alloc_scope(&mut self, parent: Option<ScopeId>) -> ScopeId {
        let id = ScopeId(self.scopes.len() as u32);
        self.scopes.push(ScopeData {
            parent,
            entries: HashMap::new(),
        });
        id
    }

    fn declare(&mut self, scope: ScopeId, name: &str, value: ScopedValue) {
        self.scopes[scope.idx()]
            .entries
            .insert(name.to_string(), value);
    }

    fn resolve(&self, scope: ScopeId, name: &str) -> Option<ScopedValue> {
        let mut current = Some(scope);
        while let Some(id) = current {
            let data = &self.scopes[id.idx()];
            if let Some(&value) = data.entries.get(name) {
                return Some(value);
            }
            current = data.parent;
        }
        None
    }

    /// Visits `node` in `scope` and returns the scope following statements see.
    fn visit(&mut self, node: NodeId, scope: ScopeId) -> ScopeId {
        self.node_scopes.insert(node, scope);
        let ast = self.ast;

        match ast.kind(node) {
            NodeKind::Module {
                imports,
                classes,
                statements,
                ..
            } => {
                for &import in imports {
                    self.node_scopes.insert(import, scope);
                }
                for &class in classes {
                    self.visit(class, scope);
                }
                let script_scope = self.alloc_scope(Some(scope));
                self.visit_sequence(statements, script_scope);
                scope
            }
            NodeKind::Class { members, .. } => {
                let class_scope = self.alloc_scope(Some(scope));
                for &member in members {
                    match ast.kind(member) {
                        NodeKind::Field { name, .. } => {
                            self.declare(class_scope, name, ScopedValue::Field(member));
                        }
                        NodeKind::EnumConstant { name } => {
                            self.declare(class_scope, name, ScopedValue::EnumConstant(member));
                        }
                        _ => {}
                    }
                }
                for &member in members {
                    self.visit(member, class_scope);
                }
                scope
            }
            NodeKind::Method { params, body, .. } => {
                let method_scope = self.alloc_scope(Some(scope));
                self.visit_params(params, method_scope);
                if let Some(body) = body {
                    self.visit(*body, method_scope);
                }
                scope
            }
            NodeKind::Closure { params, body } => {
                let closure_scope = self.alloc_scope(Some(scope));
                if params.is_empty() {
                    self.declare(closure_scope, "it", ScopedValue::ImplicitIt(node));
                } else {
                    self.visit_params(params, closure_scope);
                }
                self.visit(*body, closure_scope);
                scope
            }
            NodeKind::Block { statements } => {
                let block_scope = self.alloc_scope(Some(scope));
                self.visit_sequence(statements, block_scope);
                // A nested block doesn't introduce bindings in the parent scope.
                scope
            }
            NodeKind::VariableDecl {
                name, initializer, ..
            } => {
                let let_scope = self.alloc_scope(Some(scope));
                self.declare(let_scope, name, ScopedValue::Local(node));
                if let Some(init) = initializer {
                    self.visit(*init, let_scope);
                }
                let_scope
            }
            NodeKind::Variable { name } => {
                if let Some(value) = self.resolve(scope, name) {
                    self.bindings.insert(node, value);
                }
                scope
            }
            kind => {
                for child in kind.children() {
                    self.visit(child, scope);
                }
                scope
            }
        }
    }

    fn visit_sequence(&mut self, statements: &[NodeId], scope: ScopeId) {
        let mut current = scope;
        for &stmt in statements {
            current = self.visit(stmt, current);
        }
    }

    fn visit_params(&mut self, params: &[NodeId], scope: ScopeId) {
        let ast = self.ast;
        for &param in params {
            self.node_scopes.insert(param, scope);
            if let NodeKind::Parameter { name, default, .. } = ast.kind(param) {
                if let Some(default) = default {
                    self.visit(*default, scope);
                }
                self.declare(scope, name, ScopedValue::Param(param));
            }
        }
    }
}
