use std::fmt;
use std::sync::Arc;

use groovy_core::canonical_name;

use crate::hierarchy::is_subtype_name;
use crate::well_known;
use crate::{ResolvedTypeDeclaration, TypeSolver};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PrimitiveType {
    Boolean,
    Byte,
    Short,
    Char,
    Int,
    Long,
    Float,
    Double,
    Void,
}

impl PrimitiveType {
    pub const ALL: [PrimitiveType; 9] = [
        PrimitiveType::Boolean,
        PrimitiveType::Byte,
        PrimitiveType::Short,
        PrimitiveType::Char,
        PrimitiveType::Int,
        PrimitiveType::Long,
        PrimitiveType::Float,
        PrimitiveType::Double,
        PrimitiveType::Void,
    ];

    pub fn name(self) -> &'static str {
        match self {
            PrimitiveType::Boolean => "boolean",
            PrimitiveType::Byte => "byte",
            PrimitiveType::Short => "short",
            PrimitiveType::Char => "char",
            PrimitiveType::Int => "int",
            PrimitiveType::Long => "long",
            PrimitiveType::Float => "float",
            PrimitiveType::Double => "double",
            PrimitiveType::Void => "void",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        PrimitiveType::ALL.into_iter().find(|p| p.name() == name)
    }

    /// Binary name of the wrapper class.
    pub fn boxed_name(self) -> &'static str {
        match self {
            PrimitiveType::Boolean => "java.lang.Boolean",
            PrimitiveType::Byte => "java.lang.Byte",
            PrimitiveType::Short => "java.lang.Short",
            PrimitiveType::Char => "java.lang.Character",
            PrimitiveType::Int => "java.lang.Integer",
            PrimitiveType::Long => "java.lang.Long",
            PrimitiveType::Float => "java.lang.Float",
            PrimitiveType::Double => "java.lang.Double",
            PrimitiveType::Void => "java.lang.Void",
        }
    }

    pub fn from_boxed_name(name: &str) -> Option<Self> {
        PrimitiveType::ALL
            .into_iter()
            .find(|p| *p != PrimitiveType::Void && p.boxed_name() == name)
    }

    /// Position in the widening order `byte < short = char < int < long < float < double`.
    ///
    /// `None` for `boolean` and `void`.
    pub fn rank(self) -> Option<u8> {
        match self {
            PrimitiveType::Byte => Some(1),
            PrimitiveType::Short | PrimitiveType::Char => Some(2),
            PrimitiveType::Int => Some(3),
            PrimitiveType::Long => Some(4),
            PrimitiveType::Float => Some(5),
            PrimitiveType::Double => Some(6),
            PrimitiveType::Boolean | PrimitiveType::Void => None,
        }
    }

    pub fn is_numeric(self) -> bool {
        self.rank().is_some()
    }

    pub fn is_integral(self) -> bool {
        matches!(
            self,
            PrimitiveType::Byte
                | PrimitiveType::Short
                | PrimitiveType::Char
                | PrimitiveType::Int
                | PrimitiveType::Long
        )
    }

    /// Whether a value of `other` can be stored in `self` by identity or widening conversion.
    ///
    /// `char` only accepts `char`; `byte` and `short` never widen to `char`, and `char` never
    /// narrows to `short`.
    pub fn is_assignable_by(self, other: PrimitiveType) -> bool {
        if self == other {
            return true;
        }
        if self == PrimitiveType::Char {
            return false;
        }
        match (self.rank(), other.rank()) {
            (Some(to), Some(from)) => from < to,
            _ => false,
        }
    }
}

impl fmt::Display for PrimitiveType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A class, interface, enum or annotation type, named by binary name (`java.util.Map$Entry`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ReferenceType {
    name: Arc<str>,
}

impl ReferenceType {
    pub fn new(binary_name: impl Into<Arc<str>>) -> Self {
        Self {
            name: binary_name.into(),
        }
    }

    pub fn binary_name(&self) -> &str {
        &self.name
    }

    pub fn canonical_name(&self) -> String {
        canonical_name(&self.name)
    }

    pub fn is_object(&self) -> bool {
        &*self.name == well_known::OBJECT
    }

    pub fn is_string(&self) -> bool {
        &*self.name == well_known::STRING
    }

    pub fn declaration(&self, solver: &dyn TypeSolver) -> Option<Arc<ResolvedTypeDeclaration>> {
        solver.solve_type(&self.name)
    }

    /// The primitive this wrapper unboxes to, if any.
    pub fn unboxed(&self) -> Option<PrimitiveType> {
        PrimitiveType::from_boxed_name(&self.name)
    }

    pub fn is_assignable_by(&self, other: &ResolvedType, solver: &dyn TypeSolver) -> bool {
        match other {
            ResolvedType::Null => true,
            ResolvedType::Primitive(_) => false,
            ResolvedType::Reference(other) => {
                other.name == self.name
                    || self.is_object()
                    || is_subtype_name(&other.name, &self.name, solver)
            }
            ResolvedType::Array(_) => matches!(
                &*self.name,
                well_known::OBJECT | well_known::CLONEABLE | well_known::SERIALIZABLE
            ),
            ResolvedType::TypeVariable(var) => {
                self.is_object() || var.bounds.iter().any(|b| self.is_assignable_by(b, solver))
            }
        }
    }
}

/// A generic type parameter. Bounds are kept for assignability but never substituted.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TypeVariable {
    pub name: Arc<str>,
    pub bounds: Vec<ResolvedType>,
}

impl TypeVariable {
    pub fn new(name: impl Into<Arc<str>>) -> Self {
        Self {
            name: name.into(),
            bounds: Vec::new(),
        }
    }

    pub fn with_bound(mut self, bound: ResolvedType) -> Self {
        self.bounds.push(bound);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ResolvedType {
    Primitive(PrimitiveType),
    Array(Box<ResolvedType>),
    Reference(ReferenceType),
    /// Type of the `null` literal.
    Null,
    TypeVariable(TypeVariable),
}

impl ResolvedType {
    pub fn reference(binary_name: impl Into<Arc<str>>) -> Self {
        ResolvedType::Reference(ReferenceType::new(binary_name))
    }

    pub fn object() -> Self {
        ResolvedType::reference(well_known::OBJECT)
    }

    pub fn string() -> Self {
        ResolvedType::reference(well_known::STRING)
    }

    pub fn int() -> Self {
        ResolvedType::Primitive(PrimitiveType::Int)
    }

    pub fn boolean() -> Self {
        ResolvedType::Primitive(PrimitiveType::Boolean)
    }

    pub fn array_of(component: ResolvedType) -> Self {
        ResolvedType::Array(Box::new(component))
    }

    /// `component` wrapped in `dimensions` array levels.
    pub fn array_with_dimensions(component: ResolvedType, dimensions: usize) -> Self {
        (0..dimensions).fold(component, |ty, _| ResolvedType::array_of(ty))
    }

    /// Canonical spelling: `int`, `java.lang.String`, `java.util.Map.Entry`, `int[][]`, `null`,
    /// `T`.
    pub fn describe(&self) -> String {
        match self {
            ResolvedType::Primitive(p) => p.name().to_string(),
            ResolvedType::Array(component) => format!("{}[]", component.describe()),
            ResolvedType::Reference(r) => r.canonical_name(),
            ResolvedType::Null => "null".to_string(),
            ResolvedType::TypeVariable(v) => v.name.to_string(),
        }
    }

    /// Array nesting depth; zero for everything that is not an array.
    pub fn level(&self) -> usize {
        match self {
            ResolvedType::Array(component) => 1 + component.level(),
            _ => 0,
        }
    }

    pub fn component_type(&self) -> Option<&ResolvedType> {
        match self {
            ResolvedType::Array(component) => Some(component),
            _ => None,
        }
    }

    /// Innermost non-array component.
    pub fn base_component(&self) -> &ResolvedType {
        match self {
            ResolvedType::Array(component) => component.base_component(),
            other => other,
        }
    }

    pub fn is_primitive(&self) -> bool {
        matches!(self, ResolvedType::Primitive(_))
    }

    pub fn is_reference(&self) -> bool {
        matches!(self, ResolvedType::Reference(_))
    }

    pub fn is_array(&self) -> bool {
        matches!(self, ResolvedType::Array(_))
    }

    pub fn is_null(&self) -> bool {
        matches!(self, ResolvedType::Null)
    }

    pub fn is_type_variable(&self) -> bool {
        matches!(self, ResolvedType::TypeVariable(_))
    }

    pub fn is_void(&self) -> bool {
        matches!(self, ResolvedType::Primitive(PrimitiveType::Void))
    }

    pub fn is_object(&self) -> bool {
        matches!(self, ResolvedType::Reference(r) if r.is_object())
    }

    pub fn is_string(&self) -> bool {
        matches!(self, ResolvedType::Reference(r) if r.is_string())
    }

    pub fn is_reference_named(&self, binary_name: &str) -> bool {
        matches!(self, ResolvedType::Reference(r) if r.binary_name() == binary_name)
    }

    pub fn as_primitive(&self) -> Option<PrimitiveType> {
        match self {
            ResolvedType::Primitive(p) => Some(*p),
            _ => None,
        }
    }

    pub fn as_reference(&self) -> Option<&ReferenceType> {
        match self {
            ResolvedType::Reference(r) => Some(r),
            _ => None,
        }
    }

    /// Primitive view of this type: the primitive itself, or the primitive a wrapper unboxes to.
    pub fn unboxed(&self) -> Option<PrimitiveType> {
        match self {
            ResolvedType::Primitive(p) => Some(*p),
            ResolvedType::Reference(r) => r.unboxed(),
            _ => None,
        }
    }

    /// Numeric in either primitive or wrapper form.
    pub fn is_numeric(&self) -> bool {
        self.unboxed().is_some_and(PrimitiveType::is_numeric)
    }

    /// Wrapper type for primitives; every other type is returned unchanged.
    pub fn boxed(&self) -> ResolvedType {
        match self {
            ResolvedType::Primitive(p) => ResolvedType::reference(p.boxed_name()),
            other => other.clone(),
        }
    }

    /// Whether a value of type `other` may be stored in a slot of type `self`.
    ///
    /// Ancestor checks for reference types go through `solver`; a reference the solver cannot find
    /// is only assignable to itself and `java.lang.Object`.
    pub fn is_assignable_by(&self, other: &ResolvedType, solver: &dyn TypeSolver) -> bool {
        match self {
            ResolvedType::Primitive(p) => {
                matches!(other, ResolvedType::Primitive(o) if p.is_assignable_by(*o))
            }
            ResolvedType::Array(component) => match other {
                ResolvedType::Null => true,
                ResolvedType::Array(other_component) => {
                    match (component.as_ref(), other_component.as_ref()) {
                        (ResolvedType::Primitive(a), ResolvedType::Primitive(b)) => a == b,
                        (ResolvedType::Primitive(_), _) | (_, ResolvedType::Primitive(_)) => false,
                        (a, b) => a.is_assignable_by(b, solver),
                    }
                }
                _ => false,
            },
            ResolvedType::Reference(r) => r.is_assignable_by(other, solver),
            ResolvedType::Null => other.is_null(),
            ResolvedType::TypeVariable(var) => match other {
                ResolvedType::Null => true,
                ResolvedType::Primitive(_) => false,
                ResolvedType::TypeVariable(o) if o.name == var.name => true,
                // Unbound variables accept any reference.
                other => var.bounds.iter().all(|b| b.is_assignable_by(other, solver)),
            },
        }
    }
}

impl From<PrimitiveType> for ResolvedType {
    fn from(value: PrimitiveType) -> Self {
        ResolvedType::Primitive(value)
    }
}

impl From<ReferenceType> for ResolvedType {
    fn from(value: ReferenceType) -> Self {
        ResolvedType::Reference(value)
    }
}

impl fmt::Display for ResolvedType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.describe())
    }
}
