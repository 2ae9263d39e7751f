use std::fmt;

use crate::NodeId;

/// A type as written in source: `String`, `java.util.List<String>`, `int[][]`, `def`.
///
/// Generic arguments are dropped; the engine tracks erased runtime types.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TypeRef {
    pub name: String,
    pub dimensions: u8,
}

impl TypeRef {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            dimensions: 0,
        }
    }

    pub fn array(name: impl Into<String>, dimensions: u8) -> Self {
        Self {
            name: name.into(),
            dimensions,
        }
    }

    /// Parses source text such as `Map<String, List<Integer>>[]`.
    pub fn parse(text: &str) -> Self {
        let mut rest = text.trim();
        let mut dimensions = 0u8;
        while let Some(stripped) = rest.strip_suffix("[]") {
            dimensions = dimensions.saturating_add(1);
            rest = stripped.trim_end();
        }
        if let Some(stripped) = rest.strip_suffix("...") {
            dimensions = dimensions.saturating_add(1);
            rest = stripped.trim_end();
        }
        let name = match rest.find('<') {
            Some(idx) => rest[..idx].trim_end(),
            None => rest,
        };
        Self {
            name: name.to_string(),
            dimensions,
        }
    }

    /// `def` and `var` declare a dynamically typed value.
    #[must_use]
    pub fn is_dynamic(&self) -> bool {
        self.dimensions == 0 && matches!(self.name.as_str(), "def" | "var")
    }
}

impl fmt::Display for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)?;
        for _ in 0..self.dimensions {
            f.write_str("[]")?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ClassKind {
    Class,
    Interface,
    Enum,
    Trait,
    Annotation,
}

/// Literal constants. Numeric literals keep their source text, suffix included.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Literal {
    /// `42`, `42L`, `0x2A`, `42G`
    Integer(String),
    /// `1.5`, `1.5f`, `2e10d`, `1.5G`
    Decimal(String),
    Boolean(bool),
    String(String),
    Null,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinaryOp {
    Plus,
    Minus,
    Multiply,
    Divide,
    Remainder,
    Power,
    Less,
    Greater,
    LessEq,
    GreaterEq,
    Equal,
    NotEqual,
    Identical,
    NotIdentical,
    Compare,
    And,
    Or,
    BitAnd,
    BitOr,
    BitXor,
    LeftShift,
    RightShift,
    UnsignedRightShift,
    Assign,
    Index,
    InstanceOf,
    In,
    RegexFind,
    RegexMatch,
}

impl BinaryOp {
    /// Maps operator tokens produced by parsers onto the operator taxonomy.
    pub fn from_symbol(symbol: &str) -> Option<Self> {
        let op = match symbol {
            "+" => BinaryOp::Plus,
            "-" => BinaryOp::Minus,
            "*" => BinaryOp::Multiply,
            "/" => BinaryOp::Divide,
            "%" => BinaryOp::Remainder,
            "**" => BinaryOp::Power,
            "<" => BinaryOp::Less,
            ">" => BinaryOp::Greater,
            "<=" => BinaryOp::LessEq,
            ">=" => BinaryOp::GreaterEq,
            "==" => BinaryOp::Equal,
            "!=" => BinaryOp::NotEqual,
            "===" => BinaryOp::Identical,
            "!==" => BinaryOp::NotIdentical,
            "<=>" => BinaryOp::Compare,
            "&&" => BinaryOp::And,
            "||" => BinaryOp::Or,
            "&" => BinaryOp::BitAnd,
            "|" => BinaryOp::BitOr,
            "^" => BinaryOp::BitXor,
            "<<" => BinaryOp::LeftShift,
            ">>" => BinaryOp::RightShift,
            ">>>" => BinaryOp::UnsignedRightShift,
            "=" => BinaryOp::Assign,
            "[" => BinaryOp::Index,
            "instanceof" => BinaryOp::InstanceOf,
            "in" => BinaryOp::In,
            "=~" => BinaryOp::RegexFind,
            "==~" => BinaryOp::RegexMatch,
            _ => return None,
        };
        Some(op)
    }

    /// Relational and equality operators; these always produce `boolean`.
    #[must_use]
    pub fn is_comparison(self) -> bool {
        matches!(
            self,
            BinaryOp::Less
                | BinaryOp::Greater
                | BinaryOp::LessEq
                | BinaryOp::GreaterEq
                | BinaryOp::Equal
                | BinaryOp::NotEqual
                | BinaryOp::Identical
                | BinaryOp::NotIdentical
        )
    }

    #[must_use]
    pub fn is_arithmetic(self) -> bool {
        matches!(
            self,
            BinaryOp::Plus
                | BinaryOp::Minus
                | BinaryOp::Multiply
                | BinaryOp::Divide
                | BinaryOp::Remainder
                | BinaryOp::Power
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnaryOp {
    Not,
    Negate,
    Plus,
    BitNot,
    PreIncrement,
    PreDecrement,
    PostIncrement,
    PostDecrement,
}

#[derive(Debug, Clone, PartialEq)]
pub enum NodeKind {
    /// Root of a compilation unit. Script statements live directly in the module.
    Module {
        package: Option<String>,
        imports: Vec<NodeId>,
        classes: Vec<NodeId>,
        statements: Vec<NodeId>,
    },
    Import {
        /// Dotted path, without the trailing `.*` for star imports.
        path: String,
        alias: Option<String>,
        is_static: bool,
        is_star: bool,
    },
    Class {
        name: String,
        kind: ClassKind,
        super_class: Option<TypeRef>,
        interfaces: Vec<TypeRef>,
        members: Vec<NodeId>,
    },
    EnumConstant {
        name: String,
    },
    /// A field, or a Groovy property when `is_property` is set.
    Field {
        name: String,
        ty: Option<TypeRef>,
        is_static: bool,
        is_property: bool,
        initializer: Option<NodeId>,
    },
    Method {
        name: String,
        return_type: Option<TypeRef>,
        params: Vec<NodeId>,
        is_static: bool,
        body: Option<NodeId>,
    },
    Parameter {
        name: String,
        ty: Option<TypeRef>,
        default: Option<NodeId>,
    },
    Block {
        statements: Vec<NodeId>,
    },
    ExprStmt {
        expr: NodeId,
    },
    Return {
        expr: Option<NodeId>,
    },
    VariableDecl {
        name: String,
        ty: Option<TypeRef>,
        initializer: Option<NodeId>,
    },
    Literal(Literal),
    /// An interpolated string; `parts` are the embedded expressions.
    GString {
        parts: Vec<NodeId>,
    },
    Variable {
        name: String,
    },
    Binary {
        op: BinaryOp,
        lhs: NodeId,
        rhs: NodeId,
    },
    Unary {
        op: UnaryOp,
        operand: NodeId,
    },
    Ternary {
        condition: NodeId,
        then_branch: NodeId,
        else_branch: NodeId,
    },
    Elvis {
        value: NodeId,
        fallback: NodeId,
    },
    List {
        elements: Vec<NodeId>,
    },
    Map {
        entries: Vec<NodeId>,
    },
    MapEntry {
        key: NodeId,
        value: NodeId,
    },
    Range {
        from: NodeId,
        to: NodeId,
        inclusive: bool,
    },
    Property {
        receiver: NodeId,
        name: String,
        safe: bool,
    },
    MethodCall {
        receiver: Option<NodeId>,
        name: String,
        args: Vec<NodeId>,
    },
    ConstructorCall {
        ty: TypeRef,
        args: Vec<NodeId>,
    },
    ClassLiteral {
        ty: TypeRef,
    },
    Cast {
        ty: TypeRef,
        expr: NodeId,
    },
    Closure {
        params: Vec<NodeId>,
        body: NodeId,
    },
    /// A region the parser could not make sense of.
    Error,
}

impl NodeKind {
    /// Child nodes in source order.
    #[must_use]
    pub fn children(&self) -> Vec<NodeId> {
        match self {
            NodeKind::Module {
                imports,
                classes,
                statements,
                ..
            } => imports
                .iter()
                .chain(classes)
                .chain(statements)
                .copied()
                .collect(),
            NodeKind::Class { members, .. } => members.clone(),
            NodeKind::Field { initializer, .. } | NodeKind::VariableDecl { initializer, .. } => {
                initializer.iter().copied().collect()
            }
            NodeKind::Method { params, body, .. } => {
                params.iter().copied().chain(body.iter().copied()).collect()
            }
            NodeKind::Parameter { default, .. } => default.iter().copied().collect(),
            NodeKind::Block { statements } => statements.clone(),
            NodeKind::ExprStmt { expr } | NodeKind::Cast { expr, .. } => vec![*expr],
            NodeKind::Return { expr } => expr.iter().copied().collect(),
            NodeKind::GString { parts } => parts.clone(),
            NodeKind::Binary { lhs, rhs, .. } => vec![*lhs, *rhs],
            NodeKind::Unary { operand, .. } => vec![*operand],
            NodeKind::Ternary {
                condition,
                then_branch,
                else_branch,
            } => vec![*condition, *then_branch, *else_branch],
            NodeKind::Elvis { value, fallback } => vec![*value, *fallback],
            NodeKind::List { elements } => elements.clone(),
            NodeKind::Map { entries } => entries.clone(),
            NodeKind::MapEntry { key, value } => vec![*key, *value],
            NodeKind::Range { from, to, .. } => vec![*from, *to],
            NodeKind::Property { receiver, .. } => vec![*receiver],
            NodeKind::MethodCall { receiver, args, .. } => {
                receiver.iter().copied().chain(args.iter().copied()).collect()
            }
            NodeKind::ConstructorCall { args, .. } => args.clone(),
            NodeKind::Closure { params, body } => {
                params.iter().copied().chain(std::iter::once(*body)).collect()
            }
            NodeKind::Import { .. }
            | NodeKind::EnumConstant { .. }
            | NodeKind::Literal(_)
            | NodeKind::Variable { .. }
            | NodeKind::ClassLiteral { .. }
            | NodeKind::Error => Vec::new(),
        }
    }

    /// Declarations introduce a name: classes, members, parameters and local variables.
    #[must_use]
    pub fn declared_name(&self) -> Option<&str> {
        match self {
            NodeKind::Class { name, .. }
            | NodeKind::EnumConstant { name }
            | NodeKind::Field { name, .. }
            | NodeKind::Method { name, .. }
            | NodeKind::Parameter { name, .. }
            | NodeKind::VariableDecl { name, .. } => Some(name),
            _ => None,
        }
    }

    /// Statement-like and structural nodes have no value type.
    #[must_use]
    pub fn is_expression(&self) -> bool {
        !matches!(
            self,
            NodeKind::Module { .. }
                | NodeKind::Import { .. }
                | NodeKind::Class { .. }
                | NodeKind::Method { .. }
                | NodeKind::Block { .. }
                | NodeKind::ExprStmt { .. }
                | NodeKind::Return { .. }
                | NodeKind::MapEntry { .. }
                | NodeKind::Error
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn type_ref_parse_strips_generics_and_counts_dimensions() {
        assert_eq!(
            TypeRef::parse("Map<String, List<Integer>>[]"),
            TypeRef::array("Map", 1)
        );
        assert_eq!(TypeRef::parse(" int [][] "), TypeRef::array("int", 2));
        assert_eq!(TypeRef::parse("String..."), TypeRef::array("String", 1));
        assert!(TypeRef::parse("def").is_dynamic());
        assert!(!TypeRef::parse("def[]").is_dynamic());
        assert_eq!(TypeRef::array("int", 2).to_string(), "int[][]");
    }

    #[test]
    fn operator_symbols_round_trip_to_taxonomy() {
        assert_eq!(BinaryOp::from_symbol("<=>"), Some(BinaryOp::Compare));
        assert_eq!(BinaryOp::from_symbol("=="), Some(BinaryOp::Equal));
        assert_eq!(BinaryOp::from_symbol("?:"), None);
        assert!(BinaryOp::Less.is_comparison());
        assert!(!BinaryOp::Compare.is_comparison());
        assert!(BinaryOp::Remainder.is_arithmetic());
    }
}
