use groovy_core::Range;
use thiserror::Error;

use crate::{Ast, AstId, BinaryOp, ClassKind, Literal, Node, NodeId, NodeKind, TypeRef};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AstError {
    #[error("{child:?} is already attached to {parent:?}")]
    AlreadyAttached { child: NodeId, parent: NodeId },
    #[error("{0:?} does not belong to this tree")]
    UnknownNode(NodeId),
    #[error("root {0:?} has a parent")]
    RootHasParent(NodeId),
}

/// Incrementally allocates nodes bottom-up.
///
/// Children must be allocated before their parent; allocating the parent attaches every child it
/// references. Contract violations are collected and reported by [`AstBuilder::finish`].
#[derive(Debug, Default)]
pub struct AstBuilder {
    nodes: Vec<Node>,
    parents: Vec<Option<NodeId>>,
    errors: Vec<AstError>,
}

impl AstBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn alloc(&mut self, kind: NodeKind) -> NodeId {
        self.alloc_at(kind, Range::default())
    }

    pub fn alloc_at(&mut self, kind: NodeKind, range: Range) -> NodeId {
        let id = NodeId::from_raw(self.nodes.len() as u32);
        for child in kind.children() {
            match self.parents.get_mut(child.idx()) {
                None => self.errors.push(AstError::UnknownNode(child)),
                Some(Some(parent)) => self.errors.push(AstError::AlreadyAttached {
                    child,
                    parent: *parent,
                }),
                Some(slot @ None) => *slot = Some(id),
            }
        }
        self.nodes.push(Node { kind, range });
        self.parents.push(None);
        id
    }

    pub fn finish(self, root: NodeId) -> Result<Ast, AstError> {
        if let Some(err) = self.errors.into_iter().next() {
            return Err(err);
        }
        match self.parents.get(root.idx()) {
            None => return Err(AstError::UnknownNode(root)),
            Some(Some(_)) => return Err(AstError::RootHasParent(root)),
            Some(None) => {}
        }
        Ok(Ast {
            id: AstId::fresh(),
            root,
            nodes: self.nodes,
            parents: self.parents,
        })
    }

    pub fn int(&mut self, text: &str) -> NodeId {
        self.alloc(NodeKind::Literal(Literal::Integer(text.to_string())))
    }

    pub fn decimal(&mut self, text: &str) -> NodeId {
        self.alloc(NodeKind::Literal(Literal::Decimal(text.to_string())))
    }

    pub fn string(&mut self, value: &str) -> NodeId {
        self.alloc(NodeKind::Literal(Literal::String(value.to_string())))
    }

    pub fn boolean(&mut self, value: bool) -> NodeId {
        self.alloc(NodeKind::Literal(Literal::Boolean(value)))
    }

    pub fn null(&mut self) -> NodeId {
        self.alloc(NodeKind::Literal(Literal::Null))
    }

    pub fn var(&mut self, name: &str) -> NodeId {
        self.alloc(NodeKind::Variable {
            name: name.to_string(),
        })
    }

    pub fn binary(&mut self, lhs: NodeId, op: BinaryOp, rhs: NodeId) -> NodeId {
        self.alloc(NodeKind::Binary { op, lhs, rhs })
    }

    pub fn list(&mut self, elements: Vec<NodeId>) -> NodeId {
        self.alloc(NodeKind::List { elements })
    }

    pub fn map(&mut self, entries: Vec<(NodeId, NodeId)>) -> NodeId {
        let entries = entries
            .into_iter()
            .map(|(key, value)| self.alloc(NodeKind::MapEntry { key, value }))
            .collect();
        self.alloc(NodeKind::Map { entries })
    }

    /// `def name = init` when `ty` is `None`, otherwise `Type name = init`.
    pub fn local(&mut self, name: &str, ty: Option<&str>, initializer: Option<NodeId>) -> NodeId {
        self.alloc(NodeKind::VariableDecl {
            name: name.to_string(),
            ty: ty.map(TypeRef::parse),
            initializer,
        })
    }

    pub fn expr_stmt(&mut self, expr: NodeId) -> NodeId {
        self.alloc(NodeKind::ExprStmt { expr })
    }

    pub fn block(&mut self, statements: Vec<NodeId>) -> NodeId {
        self.alloc(NodeKind::Block { statements })
    }

    pub fn module(
        &mut self,
        package: Option<&str>,
        imports: Vec<NodeId>,
        classes: Vec<NodeId>,
        statements: Vec<NodeId>,
    ) -> NodeId {
        self.alloc(NodeKind::Module {
            package: package.map(str::to_string),
            imports,
            classes,
            statements,
        })
    }

    pub fn import(&mut self, path: &str) -> NodeId {
        let (path, is_star) = match path.strip_suffix(".*") {
            Some(prefix) => (prefix, true),
            None => (path, false),
        };
        self.alloc(NodeKind::Import {
            path: path.to_string(),
            alias: None,
            is_static: false,
            is_star,
        })
    }

    pub fn class(&mut self, name: &str, members: Vec<NodeId>) -> NodeId {
        self.type_decl(name, ClassKind::Class, None, &[], members)
    }

    pub fn type_decl(
        &mut self,
        name: &str,
        kind: ClassKind,
        super_class: Option<&str>,
        interfaces: &[&str],
        members: Vec<NodeId>,
    ) -> NodeId {
        self.alloc(NodeKind::Class {
            name: name.to_string(),
            kind,
            super_class: super_class.map(TypeRef::parse),
            interfaces: interfaces.iter().map(|i| TypeRef::parse(i)).collect(),
            members,
        })
    }

    /// A Groovy property: `Type name = init`, or `def name = init` when `ty` is `None`.
    pub fn property(
        &mut self,
        name: &str,
        ty: Option<&str>,
        initializer: Option<NodeId>,
    ) -> NodeId {
        self.alloc(NodeKind::Field {
            name: name.to_string(),
            ty: ty.map(TypeRef::parse),
            is_static: false,
            is_property: true,
            initializer,
        })
    }

    pub fn field(
        &mut self,
        name: &str,
        ty: Option<&str>,
        is_static: bool,
        initializer: Option<NodeId>,
    ) -> NodeId {
        self.alloc(NodeKind::Field {
            name: name.to_string(),
            ty: ty.map(TypeRef::parse),
            is_static,
            is_property: false,
            initializer,
        })
    }

    pub fn param(&mut self, name: &str, ty: Option<&str>) -> NodeId {
        self.alloc(NodeKind::Parameter {
            name: name.to_string(),
            ty: ty.map(TypeRef::parse),
            default: None,
        })
    }

    /// An instance method whose body is a block of `statements`.
    pub fn method(
        &mut self,
        name: &str,
        return_type: Option<&str>,
        params: Vec<NodeId>,
        statements: Vec<NodeId>,
    ) -> NodeId {
        let body = self.block(statements);
        self.alloc(NodeKind::Method {
            name: name.to_string(),
            return_type: return_type.map(TypeRef::parse),
            params,
            is_static: false,
            body: Some(body),
        })
    }

    pub fn ret(&mut self, expr: Option<NodeId>) -> NodeId {
        self.alloc(NodeKind::Return { expr })
    }

    pub fn prop(&mut self, receiver: NodeId, name: &str) -> NodeId {
        self.alloc(NodeKind::Property {
            receiver,
            name: name.to_string(),
            safe: false,
        })
    }

    pub fn call(&mut self, receiver: Option<NodeId>, name: &str, args: Vec<NodeId>) -> NodeId {
        self.alloc(NodeKind::MethodCall {
            receiver,
            name: name.to_string(),
            args,
        })
    }

    pub fn new_instance(&mut self, ty: &str, args: Vec<NodeId>) -> NodeId {
        self.alloc(NodeKind::ConstructorCall {
            ty: TypeRef::parse(ty),
            args,
        })
    }

    pub fn closure(&mut self, params: Vec<NodeId>, statements: Vec<NodeId>) -> NodeId {
        let body = self.block(statements);
        self.alloc(NodeKind::Closure { params, body })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn attaching_a_node_twice_is_reported() {
        let mut b = AstBuilder::new();
        let shared = b.int("1");
        let first = b.expr_stmt(shared);
        let second = b.expr_stmt(shared);
        let root = b.block(vec![first, second]);

        assert_eq!(
            b.finish(root).unwrap_err(),
            AstError::AlreadyAttached {
                child: shared,
                parent: first
            }
        );
    }

    #[test]
    fn children_must_exist_before_their_parent() {
        let mut b = AstBuilder::new();
        let dangling = NodeId::from_raw(7);
        let root = b.expr_stmt(dangling);
        assert_eq!(b.finish(root).unwrap_err(), AstError::UnknownNode(dangling));
    }

    #[test]
    fn root_must_be_detached() {
        let mut b = AstBuilder::new();
        let lit = b.int("1");
        let _stmt = b.expr_stmt(lit);
        assert_eq!(b.finish(lit).unwrap_err(), AstError::RootHasParent(lit));
    }
}
