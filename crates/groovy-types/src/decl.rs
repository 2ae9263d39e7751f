use std::fmt;
use std::sync::Arc;

use groovy_core::{binary_to_internal, canonical_name, simple_name, Range};

use crate::{well_known, ResolvedType};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeKind {
    Class,
    Interface,
    Enum,
    Annotation,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeclarationKind {
    Class,
    Interface,
    Enum,
    Annotation,
    Method,
    Field,
    Parameter,
    LocalVariable,
    EnumConstant,
}

impl From<TypeKind> for DeclarationKind {
    fn from(value: TypeKind) -> Self {
        match value {
            TypeKind::Class => DeclarationKind::Class,
            TypeKind::Interface => DeclarationKind::Interface,
            TypeKind::Enum => DeclarationKind::Enum,
            TypeKind::Annotation => DeclarationKind::Annotation,
        }
    }
}

/// Where a declaration came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeclarationOrigin {
    /// Loaded from a compiled class on the classpath.
    Classpath,
    /// Declared in a parsed compilation unit.
    Source,
    /// Part of the built-in JDK/Groovy model.
    Builtin,
    /// Injected by a framework or transform; has no source text.
    Synthetic,
}

/// A stable textual identifier for a declaration.
///
/// Types use the internal name followed by `#` (`java/util/Map$Entry#`), members append
/// `name.` or `name(params).`, and locals are spelled `local name@line:column`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SymbolId(String);

impl SymbolId {
    pub fn for_type(binary_name: &str) -> Self {
        SymbolId(format!("{}#", binary_to_internal(binary_name)))
    }

    pub fn for_field(owner: &str, name: &str) -> Self {
        SymbolId(format!("{}#{name}.", binary_to_internal(owner)))
    }

    pub fn for_method(owner: &str, name: &str, params: &[ResolvedType]) -> Self {
        let params: Vec<String> = params.iter().map(ResolvedType::describe).collect();
        SymbolId(format!(
            "{}#{name}({}).",
            binary_to_internal(owner),
            params.join(",")
        ))
    }

    pub fn for_local(name: &str, range: Option<Range>) -> Self {
        match range {
            Some(range) => SymbolId(format!(
                "local {name}@{}:{}",
                range.start.line, range.start.column
            )),
            None => SymbolId(format!("local {name}")),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SymbolId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldInfo {
    pub name: String,
    pub ty: ResolvedType,
    pub is_static: bool,
}

impl FieldInfo {
    pub fn new(name: impl Into<String>, ty: ResolvedType) -> Self {
        Self {
            name: name.into(),
            ty,
            is_static: false,
        }
    }

    pub fn static_field(name: impl Into<String>, ty: ResolvedType) -> Self {
        Self {
            is_static: true,
            ..Self::new(name, ty)
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodInfo {
    pub name: String,
    pub params: Vec<ResolvedType>,
    pub return_type: ResolvedType,
    pub is_static: bool,
}

impl MethodInfo {
    pub fn new(
        name: impl Into<String>,
        params: Vec<ResolvedType>,
        return_type: ResolvedType,
    ) -> Self {
        Self {
            name: name.into(),
            params,
            return_type,
            is_static: false,
        }
    }

    pub fn static_method(
        name: impl Into<String>,
        params: Vec<ResolvedType>,
        return_type: ResolvedType,
    ) -> Self {
        Self {
            is_static: true,
            ..Self::new(name, params, return_type)
        }
    }
}

/// A class, interface, enum or annotation, independent of where it was declared.
///
/// Supertypes are stored by binary name and resolved through a solver on demand.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedTypeDeclaration {
    binary_name: String,
    kind: TypeKind,
    origin: DeclarationOrigin,
    super_class: Option<String>,
    interfaces: Vec<String>,
    type_parameters: Vec<String>,
    fields: Vec<FieldInfo>,
    methods: Vec<MethodInfo>,
    enum_constants: Vec<String>,
    range: Option<Range>,
}

impl ResolvedTypeDeclaration {
    /// A declaration with the default superclass for its kind: `java.lang.Enum` for enums,
    /// `java.lang.Object` for classes, none for interfaces and annotations.
    pub fn new(binary_name: impl Into<String>, kind: TypeKind) -> Self {
        let binary_name = binary_name.into();
        let super_class = match kind {
            _ if binary_name == well_known::OBJECT => None,
            TypeKind::Class => Some(well_known::OBJECT.to_string()),
            TypeKind::Enum => Some(well_known::ENUM.to_string()),
            TypeKind::Interface | TypeKind::Annotation => None,
        };
        Self {
            binary_name,
            kind,
            origin: DeclarationOrigin::Builtin,
            super_class,
            interfaces: Vec::new(),
            type_parameters: Vec::new(),
            fields: Vec::new(),
            methods: Vec::new(),
            enum_constants: Vec::new(),
            range: None,
        }
    }

    pub fn class(binary_name: impl Into<String>) -> Self {
        Self::new(binary_name, TypeKind::Class)
    }

    pub fn interface(binary_name: impl Into<String>) -> Self {
        Self::new(binary_name, TypeKind::Interface)
    }

    pub fn enumeration(binary_name: impl Into<String>) -> Self {
        Self::new(binary_name, TypeKind::Enum)
    }

    pub fn with_origin(mut self, origin: DeclarationOrigin) -> Self {
        self.origin = origin;
        self
    }

    pub fn with_super_class(mut self, super_class: Option<String>) -> Self {
        self.super_class = super_class;
        self
    }

    pub fn extends(self, super_class: impl Into<String>) -> Self {
        self.with_super_class(Some(super_class.into()))
    }

    pub fn implements(mut self, interface: impl Into<String>) -> Self {
        self.interfaces.push(interface.into());
        self
    }

    pub fn with_type_parameter(mut self, name: impl Into<String>) -> Self {
        self.type_parameters.push(name.into());
        self
    }

    pub fn with_field(mut self, field: FieldInfo) -> Self {
        self.fields.push(field);
        self
    }

    pub fn with_method(mut self, method: MethodInfo) -> Self {
        self.methods.push(method);
        self
    }

    pub fn with_enum_constant(mut self, name: impl Into<String>) -> Self {
        self.enum_constants.push(name.into());
        self
    }

    pub fn with_range(mut self, range: Range) -> Self {
        self.range = Some(range);
        self
    }

    pub fn binary_name(&self) -> &str {
        &self.binary_name
    }

    pub fn qualified_name(&self) -> String {
        canonical_name(&self.binary_name)
    }

    pub fn name(&self) -> &str {
        simple_name(&self.binary_name)
    }

    pub fn kind(&self) -> TypeKind {
        self.kind
    }

    pub fn origin(&self) -> DeclarationOrigin {
        self.origin
    }

    pub fn range(&self) -> Option<Range> {
        self.range
    }

    pub fn is_class(&self) -> bool {
        self.kind == TypeKind::Class
    }

    pub fn is_interface(&self) -> bool {
        matches!(self.kind, TypeKind::Interface | TypeKind::Annotation)
    }

    pub fn is_enum(&self) -> bool {
        self.kind == TypeKind::Enum
    }

    pub fn super_class(&self) -> Option<&str> {
        self.super_class.as_deref()
    }

    pub fn interfaces(&self) -> &[String] {
        &self.interfaces
    }

    /// Superclass first, then interfaces in declaration order.
    pub fn direct_supertypes(&self) -> impl Iterator<Item = &str> {
        self.super_class
            .as_deref()
            .into_iter()
            .chain(self.interfaces.iter().map(String::as_str))
    }

    pub fn type_parameters(&self) -> &[String] {
        &self.type_parameters
    }

    pub fn fields(&self) -> &[FieldInfo] {
        &self.fields
    }

    pub fn field(&self, name: &str) -> Option<&FieldInfo> {
        self.fields.iter().find(|f| f.name == name)
    }

    pub fn methods(&self) -> &[MethodInfo] {
        &self.methods
    }

    pub fn methods_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a MethodInfo> + 'a {
        self.methods.iter().filter(move |m| m.name == name)
    }

    pub fn as_enum(&self) -> Option<ResolvedEnumDeclaration<'_>> {
        self.is_enum().then_some(ResolvedEnumDeclaration { decl: self })
    }

    /// The reference type denoting this declaration.
    pub fn to_type(&self) -> ResolvedType {
        ResolvedType::reference(self.binary_name.as_str())
    }

    pub fn symbol_id(&self) -> SymbolId {
        SymbolId::for_type(&self.binary_name)
    }
}

/// Enum view of a type declaration.
#[derive(Debug, Clone, Copy)]
pub struct ResolvedEnumDeclaration<'a> {
    decl: &'a ResolvedTypeDeclaration,
}

impl<'a> ResolvedEnumDeclaration<'a> {
    pub fn declaration(&self) -> &'a ResolvedTypeDeclaration {
        self.decl
    }

    pub fn constant_names(&self) -> &'a [String] {
        &self.decl.enum_constants
    }

    pub fn has_constant(&self, name: &str) -> bool {
        self.decl.enum_constants.iter().any(|c| c == name)
    }

    pub fn constant(&self, name: &str) -> Option<ResolvedEnumConstantDeclaration> {
        self.has_constant(name).then(|| ResolvedEnumConstantDeclaration {
            name: name.to_string(),
            enum_type: self.decl.binary_name.clone(),
            range: None,
        })
    }

    pub fn enum_constants(&self) -> Vec<ResolvedEnumConstantDeclaration> {
        self.decl
            .enum_constants
            .iter()
            .map(|name| ResolvedEnumConstantDeclaration {
                name: name.clone(),
                enum_type: self.decl.binary_name.clone(),
                range: None,
            })
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedEnumConstantDeclaration {
    pub name: String,
    /// Binary name of the declaring enum.
    pub enum_type: String,
    pub range: Option<Range>,
}

impl ResolvedEnumConstantDeclaration {
    pub fn ty(&self) -> ResolvedType {
        ResolvedType::reference(self.enum_type.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedMethodDeclaration {
    pub name: String,
    /// Binary name of the declaring type.
    pub declaring_type: String,
    pub params: Vec<ResolvedType>,
    pub return_type: ResolvedType,
    pub is_static: bool,
    pub range: Option<Range>,
}

impl ResolvedMethodDeclaration {
    pub fn from_info(declaring_type: &str, info: &MethodInfo) -> Self {
        Self {
            name: info.name.clone(),
            declaring_type: declaring_type.to_string(),
            params: info.params.clone(),
            return_type: info.return_type.clone(),
            is_static: info.is_static,
            range: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    Field { is_static: bool },
    Parameter,
    LocalVariable,
}

/// A field, parameter or local variable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedValueDeclaration {
    pub name: String,
    pub kind: ValueKind,
    pub ty: ResolvedType,
    /// Binary name of the declaring type, for fields.
    pub owner: Option<String>,
    pub range: Option<Range>,
}

impl ResolvedValueDeclaration {
    pub fn field(owner: &str, info: &FieldInfo) -> Self {
        Self {
            name: info.name.clone(),
            kind: ValueKind::Field {
                is_static: info.is_static,
            },
            ty: info.ty.clone(),
            owner: Some(owner.to_string()),
            range: None,
        }
    }

    pub fn parameter(name: impl Into<String>, ty: ResolvedType) -> Self {
        Self {
            name: name.into(),
            kind: ValueKind::Parameter,
            ty,
            owner: None,
            range: None,
        }
    }

    pub fn local(name: impl Into<String>, ty: ResolvedType) -> Self {
        Self {
            name: name.into(),
            kind: ValueKind::LocalVariable,
            ty,
            owner: None,
            range: None,
        }
    }

    pub fn with_range(mut self, range: Range) -> Self {
        self.range = Some(range);
        self
    }

    pub fn is_field(&self) -> bool {
        matches!(self.kind, ValueKind::Field { .. })
    }
}

/// Anything a name can resolve to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolvedDeclaration {
    Type(Arc<ResolvedTypeDeclaration>),
    Method(Arc<ResolvedMethodDeclaration>),
    Value(Arc<ResolvedValueDeclaration>),
    EnumConstant(Arc<ResolvedEnumConstantDeclaration>),
}

impl ResolvedDeclaration {
    pub fn name(&self) -> &str {
        match self {
            ResolvedDeclaration::Type(decl) => decl.name(),
            ResolvedDeclaration::Method(decl) => &decl.name,
            ResolvedDeclaration::Value(decl) => &decl.name,
            ResolvedDeclaration::EnumConstant(decl) => &decl.name,
        }
    }

    /// Dotted canonical name; locals and parameters have no owner and use their plain name.
    pub fn qualified_name(&self) -> String {
        match self {
            ResolvedDeclaration::Type(decl) => decl.qualified_name(),
            ResolvedDeclaration::Method(decl) => {
                format!("{}.{}", canonical_name(&decl.declaring_type), decl.name)
            }
            ResolvedDeclaration::Value(decl) => match &decl.owner {
                Some(owner) => format!("{}.{}", canonical_name(owner), decl.name),
                None => decl.name.clone(),
            },
            ResolvedDeclaration::EnumConstant(decl) => {
                format!("{}.{}", canonical_name(&decl.enum_type), decl.name)
            }
        }
    }

    pub fn kind(&self) -> DeclarationKind {
        match self {
            ResolvedDeclaration::Type(decl) => decl.kind().into(),
            ResolvedDeclaration::Method(_) => DeclarationKind::Method,
            ResolvedDeclaration::Value(decl) => match decl.kind {
                ValueKind::Field { .. } => DeclarationKind::Field,
                ValueKind::Parameter => DeclarationKind::Parameter,
                ValueKind::LocalVariable => DeclarationKind::LocalVariable,
            },
            ResolvedDeclaration::EnumConstant(_) => DeclarationKind::EnumConstant,
        }
    }

    pub fn is_type(&self) -> bool {
        matches!(self, ResolvedDeclaration::Type(_))
    }

    pub fn is_enum(&self) -> bool {
        matches!(self, ResolvedDeclaration::Type(decl) if decl.is_enum())
    }

    pub fn as_type(&self) -> Option<&Arc<ResolvedTypeDeclaration>> {
        match self {
            ResolvedDeclaration::Type(decl) => Some(decl),
            _ => None,
        }
    }

    pub fn as_enum(&self) -> Option<ResolvedEnumDeclaration<'_>> {
        self.as_type().and_then(|decl| decl.as_enum())
    }

    pub fn as_value(&self) -> Option<&Arc<ResolvedValueDeclaration>> {
        match self {
            ResolvedDeclaration::Value(decl) => Some(decl),
            _ => None,
        }
    }

    pub fn as_method(&self) -> Option<&Arc<ResolvedMethodDeclaration>> {
        match self {
            ResolvedDeclaration::Method(decl) => Some(decl),
            _ => None,
        }
    }

    /// Type of the value this declaration denotes; `None` for types and methods.
    pub fn value_type(&self) -> Option<ResolvedType> {
        match self {
            ResolvedDeclaration::Value(decl) => Some(decl.ty.clone()),
            ResolvedDeclaration::EnumConstant(decl) => Some(decl.ty()),
            ResolvedDeclaration::Type(_) | ResolvedDeclaration::Method(_) => None,
        }
    }

    pub fn range(&self) -> Option<Range> {
        match self {
            ResolvedDeclaration::Type(decl) => decl.range(),
            ResolvedDeclaration::Method(decl) => decl.range,
            ResolvedDeclaration::Value(decl) => decl.range,
            ResolvedDeclaration::EnumConstant(decl) => decl.range,
        }
    }

    pub fn symbol_id(&self) -> SymbolId {
        match self {
            ResolvedDeclaration::Type(decl) => decl.symbol_id(),
            ResolvedDeclaration::Method(decl) => {
                SymbolId::for_method(&decl.declaring_type, &decl.name, &decl.params)
            }
            ResolvedDeclaration::Value(decl) => match &decl.owner {
                Some(owner) => SymbolId::for_field(owner, &decl.name),
                None => SymbolId::for_local(&decl.name, decl.range),
            },
            ResolvedDeclaration::EnumConstant(decl) => {
                SymbolId::for_field(&decl.enum_type, &decl.name)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::PrimitiveType;
    use pretty_assertions::assert_eq;

    #[test]
    fn default_super_class_depends_on_kind() {
        assert_eq!(
            ResolvedTypeDeclaration::class("a.B").super_class(),
            Some(well_known::OBJECT)
        );
        assert_eq!(
            ResolvedTypeDeclaration::enumeration("a.Color").super_class(),
            Some(well_known::ENUM)
        );
        assert_eq!(ResolvedTypeDeclaration::interface("a.I").super_class(), None);
        assert_eq!(ResolvedTypeDeclaration::class(well_known::OBJECT).super_class(), None);
    }

    #[test]
    fn names() {
        let decl = ResolvedTypeDeclaration::class("java.util.Map$Entry");
        assert_eq!(decl.name(), "Entry");
        assert_eq!(decl.qualified_name(), "java.util.Map.Entry");
        assert_eq!(decl.symbol_id().as_str(), "java/util/Map$Entry#");
    }

    #[test]
    fn symbol_ids() {
        let method = ResolvedDeclaration::Method(Arc::new(ResolvedMethodDeclaration {
            name: "substring".into(),
            declaring_type: well_known::STRING.into(),
            params: vec![ResolvedType::int(), ResolvedType::int()],
            return_type: ResolvedType::string(),
            is_static: false,
            range: None,
        }));
        assert_eq!(method.symbol_id().as_str(), "java/lang/String#substring(int,int).");
        assert_eq!(method.qualified_name(), "java.lang.String.substring");

        let local = ResolvedDeclaration::Value(Arc::new(
            ResolvedValueDeclaration::local("x", ResolvedType::int())
                .with_range(Range::from_coords(3, 5, 3, 6)),
        ));
        assert_eq!(local.symbol_id().as_str(), "local x@3:5");
        assert_eq!(local.kind(), DeclarationKind::LocalVariable);
        assert_eq!(local.qualified_name(), "x");
    }

    #[test]
    fn enum_capability() {
        let color = ResolvedTypeDeclaration::enumeration("a.Color")
            .with_enum_constant("RED")
            .with_enum_constant("GREEN");
        let view = color.as_enum().expect("enum view");
        assert!(view.has_constant("RED"));
        assert!(!view.has_constant("BLUE"));
        let red = view.constant("RED").expect("RED");
        assert_eq!(red.ty(), ResolvedType::reference("a.Color"));
        assert_eq!(view.enum_constants().len(), 2);

        assert!(ResolvedTypeDeclaration::class("a.B").as_enum().is_none());

        let decl = ResolvedDeclaration::Type(Arc::new(color));
        assert!(decl.is_enum());
        assert_eq!(decl.kind(), DeclarationKind::Enum);
        assert_eq!(decl.value_type(), None);
    }

    #[test]
    fn value_types() {
        let field = ResolvedDeclaration::Value(Arc::new(ResolvedValueDeclaration::field(
            "java.lang.Integer",
            &FieldInfo::static_field("MAX_VALUE", PrimitiveType::Int.into()),
        )));
        assert_eq!(field.value_type(), Some(ResolvedType::int()));
        assert_eq!(field.kind(), DeclarationKind::Field);
        assert_eq!(field.symbol_id().as_str(), "java/lang/Integer#MAX_VALUE.");
    }
}
