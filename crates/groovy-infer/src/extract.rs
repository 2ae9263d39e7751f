use std::cell::{Cell, RefCell};
use std::collections::HashSet;
use std::num::IntErrorKind;
use std::sync::Arc;

use groovy_ast::{BinaryOp, Literal, NodeId, NodeKind, UnaryOp};
use groovy_resolve::ResolutionContext;
use groovy_types::{
    find_field, find_methods, is_subtype_name, well_known, PrimitiveType, ResolvedDeclaration,
    ResolvedMethodDeclaration, ResolvedType, ResolvedTypeDeclaration, TypeError,
};

use crate::failure::{InferResult, ResolutionFailure};
use crate::promotion::{
    binary_numeric_promotion, numeric_operand, unary_numeric_promotion, NumericOperand,
};

/// Computes the static types of expressions in one compilation unit.
///
/// Results are memoized in the context's type cache, so an extractor is cheap to create: make
/// one per request (or per thread) over a shared [`ResolutionContext`].
pub struct TypeExtractor<'a> {
    ctx: &'a ResolutionContext,
    in_progress: RefCell<HashSet<NodeId>>,
    /// Set when a cycle was cut during the current outermost extraction; results computed under
    /// a cut are not cached.
    cut: Cell<bool>,
}

impl<'a> TypeExtractor<'a> {
    pub fn new(ctx: &'a ResolutionContext) -> Self {
        Self {
            ctx,
            in_progress: RefCell::new(HashSet::new()),
            cut: Cell::new(false),
        }
    }

    pub fn context(&self) -> &'a ResolutionContext {
        self.ctx
    }

    /// The static type of the expression at `node`.
    pub fn extract_type(&self, node: NodeId) -> InferResult {
        let key = self.ctx.node_key(node);
        if let Some(ty) = self.ctx.type_cache().get(&key) {
            return Ok(ty);
        }

        let Some(result) = self.guarded(node, || self.compute(node)) else {
            return Err(ResolutionFailure::unresolved("cyclic inference"));
        };
        match &result {
            Ok(ty) => {
                if !self.cut.get() {
                    self.ctx.type_cache().put(key, ty.clone());
                }
                tracing::trace!(node = node.idx(), ty = %ty, "extracted type");
            }
            Err(err) => tracing::trace!(node = node.idx(), %err, "no type"),
        }
        result
    }

    /// The extracted type in canonical spelling, or `<unknown>`.
    pub fn describe(&self, node: NodeId) -> String {
        self.extract_type(node)
            .map(|ty| ty.describe())
            .unwrap_or_else(|_| "<unknown>".to_string())
    }

    /// The declaration `node` refers to, including members reached through a value receiver.
    pub fn resolve_declaration(&self, node: NodeId) -> Option<ResolvedDeclaration> {
        if let Some(decl) = self.ctx.resolve_symbol(node) {
            return Some(decl);
        }
        match self.ctx.ast().kind(node) {
            NodeKind::Property { receiver, name, .. } => {
                let owner = self.receiver_declaration(*receiver)?;
                self.ctx.member_of_type(&owner, name).or_else(|| {
                    self.ctx
                        .method_of_type(&owner, &getter_name(name), 0)
                        .map(ResolvedDeclaration::Method)
                })
            }
            NodeKind::MethodCall {
                receiver: Some(receiver),
                name,
                args,
            } => {
                let owner = self.receiver_declaration(*receiver)?;
                self.ctx
                    .method_of_type(&owner, name, args.len())
                    .map(ResolvedDeclaration::Method)
            }
            _ => None,
        }
    }

    /// LUB of every value a closure can return.
    pub fn closure_return_type(&self, closure: NodeId) -> InferResult {
        let NodeKind::Closure { body, .. } = self.ctx.ast().kind(closure) else {
            return Err(ResolutionFailure::Untyped);
        };
        let body = *body;
        self.guarded(closure, || self.body_return_type(body))
            .unwrap_or_else(|| Err(ResolutionFailure::unresolved("recursive closure")))
    }

    /// LUB of every value a method body can return.
    pub fn method_return_type(&self, method: NodeId) -> InferResult {
        let NodeKind::Method { body, .. } = self.ctx.ast().kind(method) else {
            return Err(ResolutionFailure::Untyped);
        };
        let Some(body) = *body else {
            return Ok(ResolvedType::object());
        };
        self.guarded(method, || self.body_return_type(body))
            .unwrap_or_else(|| Err(ResolutionFailure::unresolved("recursive method")))
    }

    /// [`crate::lub`], boxing every primitive when the plain merge mixes categories.
    pub fn lub(&self, types: &[ResolvedType]) -> InferResult {
        match crate::lub(types, self.ctx.solver()) {
            Err(TypeError::PrimitiveReferenceMix { .. } | TypeError::BooleanNumericMix(_)) => {
                let boxed: Vec<ResolvedType> = types.iter().map(ResolvedType::boxed).collect();
                Ok(crate::lub(&boxed, self.ctx.solver())?)
            }
            result => Ok(result?),
        }
    }

    /// Runs `f` with `node` marked in progress; `None` if it already was.
    fn guarded<T>(&self, node: NodeId, f: impl FnOnce() -> T) -> Option<T> {
        if self.in_progress.borrow().is_empty() {
            self.cut.set(false);
        }
        if !self.in_progress.borrow_mut().insert(node) {
            self.cut.set(true);
            return None;
        }
        let out = f();
        self.in_progress.borrow_mut().remove(&node);
        Some(out)
    }

    fn compute(&self, node: NodeId) -> InferResult {
        let ast = self.ctx.ast();
        match ast.kind(node) {
            NodeKind::Literal(literal) => Ok(literal_type(literal)),
            NodeKind::GString { .. } => Ok(ResolvedType::reference(well_known::GSTRING)),
            NodeKind::List { .. } => Ok(ResolvedType::reference(well_known::ARRAY_LIST)),
            NodeKind::Map { .. } => Ok(ResolvedType::reference(well_known::LINKED_HASH_MAP)),
            NodeKind::Range { from, to, .. } => {
                let is_int = |bound: NodeId| {
                    self.extract_type(bound)
                        .is_ok_and(|ty| ty.unboxed() == Some(PrimitiveType::Int))
                };
                let range = if is_int(*from) && is_int(*to) {
                    well_known::INT_RANGE
                } else {
                    well_known::OBJECT_RANGE
                };
                Ok(ResolvedType::reference(range))
            }
            NodeKind::Binary { op, lhs, rhs } => self.binary(*op, *lhs, *rhs),
            NodeKind::Unary { op, operand } => self.unary(*op, *operand),
            NodeKind::Ternary {
                then_branch,
                else_branch,
                ..
            } => self.branches(&[*then_branch, *else_branch]),
            NodeKind::Elvis { value, fallback } => self.branches(&[*value, *fallback]),
            NodeKind::Variable { name } => self.variable(node, name),
            NodeKind::Property {
                receiver,
                name,
                safe,
            } => {
                let ty = self.property(node, *receiver, name)?;
                Ok(if *safe { ty.boxed() } else { ty })
            }
            NodeKind::MethodCall {
                receiver,
                name,
                args,
            } => self.method_call(node, *receiver, name, args.len()),
            NodeKind::ConstructorCall { ty, .. } | NodeKind::Cast { ty, .. } => self
                .ctx
                .resolve_type_ref_at(node, ty)
                .ok_or_else(|| ResolutionFailure::unresolved(ty.to_string())),
            NodeKind::ClassLiteral { .. } => Ok(ResolvedType::reference(well_known::CLASS)),
            NodeKind::Closure { .. } => Ok(ResolvedType::reference(well_known::CLOSURE)),
            NodeKind::VariableDecl { .. }
            | NodeKind::Parameter { .. }
            | NodeKind::Field { .. }
            | NodeKind::EnumConstant { .. } => {
                let decl = self
                    .ctx
                    .declaration_of(node)
                    .ok_or_else(|| ResolutionFailure::unresolved(describe_node(ast.kind(node))))?;
                let ty = decl.value_type().ok_or(ResolutionFailure::Untyped)?;
                Ok(self.refine(self.known(ty)?, node))
            }
            NodeKind::Module { .. }
            | NodeKind::Import { .. }
            | NodeKind::Class { .. }
            | NodeKind::Method { .. }
            | NodeKind::Block { .. }
            | NodeKind::ExprStmt { .. }
            | NodeKind::Return { .. }
            | NodeKind::MapEntry { .. }
            | NodeKind::Error => Err(ResolutionFailure::Untyped),
        }
    }

    fn binary(&self, op: BinaryOp, lhs: NodeId, rhs: NodeId) -> InferResult {
        use BinaryOp::*;

        if op.is_comparison() || matches!(op, And | Or | InstanceOf | In | RegexMatch) {
            return Ok(ResolvedType::boolean());
        }
        match op {
            Compare => return Ok(ResolvedType::int()),
            RegexFind => return Ok(ResolvedType::reference(well_known::MATCHER)),
            Assign => return self.extract_type(rhs),
            Index => return self.index(lhs),
            _ => {}
        }

        let left = self.extract_type(lhs);
        let right = self.extract_type(rhs);
        let concatenates = match op {
            Plus => left.as_ref().is_ok_and(is_text) || right.as_ref().is_ok_and(is_text),
            Minus | Multiply => left.as_ref().is_ok_and(|ty| ty.is_string()),
            _ => false,
        };
        if concatenates {
            return Ok(ResolvedType::string());
        }
        let (left, right) = (left?, right?);
        match op {
            BitAnd | BitOr | BitXor
                if left.unboxed() == Some(PrimitiveType::Boolean)
                    && right.unboxed() == Some(PrimitiveType::Boolean) =>
            {
                Ok(ResolvedType::boolean())
            }
            LeftShift | RightShift | UnsignedRightShift => Ok(match left.unboxed() {
                Some(p) if p.is_integral() => ResolvedType::Primitive(unary_numeric_promotion(p)),
                // `list << item` and friends return the receiver.
                _ => left,
            }),
            _ => self.arithmetic(op, &left, &right),
        }
    }

    fn arithmetic(&self, op: BinaryOp, left: &ResolvedType, right: &ResolvedType) -> InferResult {
        let solver = self.ctx.solver();
        match (numeric_operand(left, solver), numeric_operand(right, solver)) {
            (None, _) | (_, None) => Err(ResolutionFailure::unresolved(format!(
                "{op:?} on {left} and {right}"
            ))),
            (Some(NumericOperand::Primitive(a)), Some(NumericOperand::Primitive(b))) => {
                binary_numeric_promotion(a, b)
                    .map(ResolvedType::Primitive)
                    .ok_or_else(|| ResolutionFailure::unresolved(format!("{op:?} on {a} and {b}")))
            }
            (Some(NumericOperand::Reference(a)), Some(NumericOperand::Reference(b))) => {
                self.lub(&[a, b])
            }
            (Some(NumericOperand::Reference(number)), Some(NumericOperand::Primitive(_)))
            | (Some(NumericOperand::Primitive(_)), Some(NumericOperand::Reference(number))) => {
                Ok(number)
            }
        }
    }

    fn unary(&self, op: UnaryOp, operand: NodeId) -> InferResult {
        if op == UnaryOp::Not {
            return Ok(ResolvedType::boolean());
        }
        let ty = self.extract_type(operand)?;
        Ok(match (op, ty.as_primitive()) {
            (UnaryOp::Negate | UnaryOp::Plus | UnaryOp::BitNot, Some(p)) if p.is_numeric() => {
                ResolvedType::Primitive(unary_numeric_promotion(p))
            }
            _ => ty,
        })
    }

    fn index(&self, target: NodeId) -> InferResult {
        let target = self.extract_type(target)?;
        Ok(match &target {
            ResolvedType::Array(component) => component.as_ref().clone(),
            ty if ty.is_string() => ResolvedType::string(),
            _ => ResolvedType::object(),
        })
    }

    fn branches(&self, branches: &[NodeId]) -> InferResult {
        let types = branches
            .iter()
            .map(|&branch| self.extract_type(branch))
            .collect::<InferResult<Vec<_>>>()?;
        self.lub(&types)
    }

    fn variable(&self, node: NodeId, name: &str) -> InferResult {
        let decl = self
            .ctx
            .resolve_symbol(node)
            .ok_or_else(|| ResolutionFailure::unresolved(name))?;
        match decl {
            ResolvedDeclaration::Type(ty) if matches!(name, "this" | "super") => Ok(ty.to_type()),
            ResolvedDeclaration::Type(_) => Ok(ResolvedType::reference(well_known::CLASS)),
            ResolvedDeclaration::Value(value) => {
                let declared = self.known(value.ty.clone())?;
                Ok(match self.ctx.binding_node(node) {
                    Some(binding) => self.refine(declared, binding),
                    None => declared,
                })
            }
            ResolvedDeclaration::EnumConstant(constant) => Ok(constant.ty()),
            ResolvedDeclaration::Method(_) => Err(ResolutionFailure::unresolved(name)),
        }
    }

    /// `ty` unless its element type names a class no solver knows.
    fn known(&self, ty: ResolvedType) -> InferResult {
        let missing = match ty.base_component() {
            ResolvedType::Reference(r) => {
                !r.is_object() && r.declaration(self.ctx.solver()).is_none()
            }
            _ => false,
        };
        if missing {
            return Err(ResolutionFailure::unresolved(ty.describe()));
        }
        Ok(ty)
    }

    /// Narrows an `Object` or raw `Class` declared type to the type of the initializer.
    fn refine(&self, declared: ResolvedType, declaration: NodeId) -> ResolvedType {
        if !(declared.is_object() || declared.is_reference_named(well_known::CLASS)) {
            return declared;
        }
        let initializer = match self.ctx.ast().kind(declaration) {
            NodeKind::VariableDecl { initializer, .. } | NodeKind::Field { initializer, .. } => {
                *initializer
            }
            _ => None,
        };
        match initializer.map(|init| self.extract_type(init)) {
            Some(Ok(ty)) if !ty.is_object() && !ty.is_null() => ty,
            _ => declared,
        }
    }

    fn property(&self, node: NodeId, receiver: NodeId, name: &str) -> InferResult {
        // Static members, enum constants, `this.field` and qualified type names.
        match self.ctx.resolve_symbol(node) {
            Some(ResolvedDeclaration::Type(_)) => {
                return Ok(ResolvedType::reference(well_known::CLASS))
            }
            Some(ResolvedDeclaration::EnumConstant(constant)) => return Ok(constant.ty()),
            Some(ResolvedDeclaration::Value(value)) => {
                return match &value.owner {
                    Some(owner) => self.field_type(owner, &value.name, value.ty.clone()),
                    None => self.known(value.ty.clone()),
                }
            }
            _ => {}
        }

        let receiver_ty = self.extract_type(receiver)?;
        if receiver_ty.is_array() && name == "length" {
            return Ok(ResolvedType::int());
        }
        let owner = self
            .type_declaration(&receiver_ty)
            .ok_or_else(|| ResolutionFailure::unresolved(receiver_ty.describe()))?;
        self.member_type(&owner, name).unwrap_or_else(|| {
            Err(ResolutionFailure::unresolved(format!("{receiver_ty}.{name}")))
        })
    }

    /// A field, or a Groovy property backed by a getter.
    fn member_type(&self, owner: &ResolvedTypeDeclaration, name: &str) -> Option<InferResult> {
        let solver = self.ctx.solver();
        if let Some((declaring, field)) = find_field(owner, name, solver) {
            return Some(self.field_type(&declaring, name, field.ty));
        }
        let getter = find_methods(owner, &getter_name(name), solver)
            .into_iter()
            .find(|(_, m)| m.params.is_empty())
            .or_else(|| {
                find_methods(owner, &boolean_getter_name(name), solver)
                    .into_iter()
                    .find(|(_, m)| {
                        m.params.is_empty()
                            && m.return_type.as_primitive() == Some(PrimitiveType::Boolean)
                    })
            });
        if let Some((declaring, getter)) = getter {
            let getter = ResolvedMethodDeclaration::from_info(&declaring, &getter);
            return Some(Ok(self.refine_return_type(&getter)));
        }
        // Map keys read as properties.
        is_subtype_name(owner.binary_name(), "java.util.Map", solver)
            .then(|| Ok(ResolvedType::object()))
    }

    /// A field's declared type, refined from its initializer when `owner` is a class of this unit.
    fn field_type(&self, owner: &str, name: &str, declared: ResolvedType) -> InferResult {
        let declared = self.known(declared)?;
        Ok(match self.field_node(owner, name) {
            Some(field) => self.refine(declared, field),
            None => declared,
        })
    }

    fn field_node(&self, owner: &str, name: &str) -> Option<NodeId> {
        let ast = self.ctx.ast();
        let class = self.ctx.source().node_of(owner)?;
        let NodeKind::Class { members, .. } = ast.kind(class) else {
            return None;
        };
        members.iter().copied().find(|&member| {
            matches!(ast.kind(member), NodeKind::Field { name: field, .. } if field == name)
        })
    }

    fn method_call(
        &self,
        node: NodeId,
        receiver: Option<NodeId>,
        name: &str,
        arity: usize,
    ) -> InferResult {
        let method = match self.ctx.resolve_symbol(node) {
            Some(ResolvedDeclaration::Method(method)) => method,
            _ => {
                let receiver =
                    receiver.ok_or_else(|| ResolutionFailure::unresolved(format!("{name}()")))?;
                let receiver_ty = self.extract_type(receiver)?;
                let owner = self
                    .type_declaration(&receiver_ty)
                    .ok_or_else(|| ResolutionFailure::unresolved(receiver_ty.describe()))?;
                self.ctx.method_of_type(&owner, name, arity).ok_or_else(|| {
                    ResolutionFailure::unresolved(format!("{receiver_ty}.{name}()"))
                })?
            }
        };
        Ok(self.refine_return_type(&method))
    }

    /// `def` methods declared in this unit return whatever their body returns.
    fn refine_return_type(&self, method: &ResolvedMethodDeclaration) -> ResolvedType {
        if !method.return_type.is_object() {
            return method.return_type.clone();
        }
        let Some(node) = self.method_node(method) else {
            return method.return_type.clone();
        };
        let declared_dynamic = match self.ctx.ast().kind(node) {
            NodeKind::Method { return_type, .. } => {
                return_type.as_ref().map_or(true, |ty| ty.is_dynamic())
            }
            _ => false,
        };
        if !declared_dynamic {
            return method.return_type.clone();
        }
        match self.method_return_type(node) {
            Ok(ty) if !ty.is_null() => ty,
            _ => method.return_type.clone(),
        }
    }

    fn method_node(&self, method: &ResolvedMethodDeclaration) -> Option<NodeId> {
        let ast = self.ctx.ast();
        let class = self.ctx.source().node_of(&method.declaring_type)?;
        let NodeKind::Class { members, .. } = ast.kind(class) else {
            return None;
        };
        members.iter().copied().find(|&member| match ast.kind(member) {
            NodeKind::Method { name, params, .. } => {
                *name == method.name && params.len() == method.params.len()
            }
            _ => false,
        })
    }

    fn body_return_type(&self, body: NodeId) -> InferResult {
        let points = self.return_points(body);
        if points.is_empty() {
            return Ok(ResolvedType::object());
        }
        let mut types = Vec::with_capacity(points.len());
        let mut first_error = None;
        for point in points {
            match point {
                Some(expr) => match self.extract_type(expr) {
                    Ok(ty) => types.push(ty),
                    Err(err) => {
                        first_error.get_or_insert(err);
                    }
                },
                None => types.push(ResolvedType::Null),
            }
        }
        match first_error {
            Some(err) if types.is_empty() => Err(err),
            _ => self.lub(&types),
        }
    }

    /// Returned expressions of a body (`None` for a bare `return`), plus its trailing expression
    /// statement. Nested closures and classes return on their own.
    fn return_points(&self, body: NodeId) -> Vec<Option<NodeId>> {
        let ast = self.ctx.ast();
        let mut points = Vec::new();
        let mut stack = vec![body];
        while let Some(node) = stack.pop() {
            match ast.kind(node) {
                NodeKind::Return { expr } => points.push(*expr),
                NodeKind::Closure { .. } | NodeKind::Class { .. } => {}
                kind => stack.extend(kind.children()),
            }
        }
        if let NodeKind::Block { statements } = ast.kind(body) {
            if let Some(&last) = statements.last() {
                if let NodeKind::ExprStmt { expr } = ast.kind(last) {
                    points.push(Some(*expr));
                }
            }
        }
        points
    }

    fn type_declaration(&self, ty: &ResolvedType) -> Option<Arc<ResolvedTypeDeclaration>> {
        match ty.boxed() {
            ResolvedType::Reference(r) => r.declaration(self.ctx.solver()),
            ResolvedType::Array(_) => self.ctx.solver().solve_type(well_known::OBJECT),
            _ => None,
        }
    }

    fn receiver_declaration(&self, receiver: NodeId) -> Option<Arc<ResolvedTypeDeclaration>> {
        let ty = self.extract_type(receiver).ok()?;
        self.type_declaration(&ty)
    }
}

fn is_text(ty: &ResolvedType) -> bool {
    ty.is_string() || ty.is_reference_named(well_known::GSTRING)
}

fn getter_name(property: &str) -> String {
    format!("get{}", capitalize(property))
}

fn boolean_getter_name(property: &str) -> String {
    format!("is{}", capitalize(property))
}

fn capitalize(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn describe_node(kind: &NodeKind) -> String {
    kind.declared_name().unwrap_or("<declaration>").to_string()
}

fn literal_type(literal: &Literal) -> ResolvedType {
    match literal {
        Literal::Integer(text) => integer_literal_type(text),
        Literal::Decimal(text) => decimal_literal_type(text),
        Literal::Boolean(_) => ResolvedType::boolean(),
        Literal::String(_) => ResolvedType::string(),
        Literal::Null => ResolvedType::Null,
    }
}

/// `int` when the value fits, else `long`, else `BigInteger`; suffixes override.
fn integer_literal_type(text: &str) -> ResolvedType {
    let text = text.trim().replace('_', "");
    let lower = text.to_ascii_lowercase();
    let (radix, digits) = if let Some(hex) = lower.strip_prefix("0x") {
        (16, hex)
    } else if let Some(bin) = lower.strip_prefix("0b") {
        (2, bin)
    } else if lower.len() > 1 && lower.starts_with('0') {
        (8, &lower[1..])
    } else {
        (10, lower.as_str())
    };

    let suffix = digits.chars().last().filter(|c| match radix {
        16 => matches!(c, 'l' | 'g' | 'i'),
        _ => matches!(c, 'l' | 'g' | 'i' | 'f' | 'd'),
    });
    match suffix {
        Some('l') => return ResolvedType::Primitive(PrimitiveType::Long),
        Some('g') => return ResolvedType::reference(well_known::BIG_INTEGER),
        Some('i') => return ResolvedType::int(),
        Some('f') => return ResolvedType::Primitive(PrimitiveType::Float),
        Some('d') => return ResolvedType::Primitive(PrimitiveType::Double),
        _ => {}
    }

    match u128::from_str_radix(digits, radix) {
        Ok(value) if value <= i32::MAX as u128 => ResolvedType::int(),
        Ok(value) if value <= i64::MAX as u128 => ResolvedType::Primitive(PrimitiveType::Long),
        Ok(_) => ResolvedType::reference(well_known::BIG_INTEGER),
        Err(err) if matches!(err.kind(), IntErrorKind::PosOverflow) => {
            ResolvedType::reference(well_known::BIG_INTEGER)
        }
        Err(_) => ResolvedType::int(),
    }
}

fn decimal_literal_type(text: &str) -> ResolvedType {
    match text.trim().chars().last().map(|c| c.to_ascii_lowercase()) {
        Some('f') => ResolvedType::Primitive(PrimitiveType::Float),
        Some('g') => ResolvedType::reference(well_known::BIG_DECIMAL),
        _ => ResolvedType::Primitive(PrimitiveType::Double),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn integer_literals() {
        let long = ResolvedType::Primitive(PrimitiveType::Long);
        let big = ResolvedType::reference(well_known::BIG_INTEGER);
        assert_eq!(integer_literal_type("42"), ResolvedType::int());
        assert_eq!(integer_literal_type("42L"), long);
        assert_eq!(integer_literal_type("42G"), big);
        assert_eq!(integer_literal_type("1_000"), ResolvedType::int());
        assert_eq!(integer_literal_type("0x7FFFFFFF"), ResolvedType::int());
        assert_eq!(integer_literal_type("0xFF"), ResolvedType::int());
        assert_eq!(integer_literal_type("2147483648"), long);
        assert_eq!(integer_literal_type("9223372036854775808"), big);
        assert_eq!(integer_literal_type("99999999999999999999999999999999999999999"), big);
        assert_eq!(integer_literal_type("010"), ResolvedType::int());
        assert_eq!(
            integer_literal_type("3f"),
            ResolvedType::Primitive(PrimitiveType::Float)
        );
    }

    #[test]
    fn decimal_literals() {
        assert_eq!(
            decimal_literal_type("1.5"),
            ResolvedType::Primitive(PrimitiveType::Double)
        );
        assert_eq!(
            decimal_literal_type("1.5f"),
            ResolvedType::Primitive(PrimitiveType::Float)
        );
        assert_eq!(
            decimal_literal_type("2e10D"),
            ResolvedType::Primitive(PrimitiveType::Double)
        );
        assert_eq!(
            decimal_literal_type("1.5G"),
            ResolvedType::reference(well_known::BIG_DECIMAL)
        );
    }

    #[test]
    fn getter_names() {
        assert_eq!(getter_name("name"), "getName");
        assert_eq!(boolean_getter_name("empty"), "isEmpty");
        assert_eq!(capitalize(""), "");
    }
}
