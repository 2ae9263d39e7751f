use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use groovy_ast::{Ast, ClassKind, NodeId, NodeKind, TypeRef};
use groovy_types::{
    DeclarationOrigin, FieldInfo, MemorySolver, MethodInfo, PrimitiveType, ResolvedType,
    ResolvedTypeDeclaration, SolverResult, TypeKind, TypeSolver,
};

use crate::ImportScope;

/// Class declarations of one compilation unit.
///
/// Supertypes and member types are qualified through the unit's imports when the solver is
/// built; names that cannot be qualified keep their source spelling. Groovy properties also
/// contribute their generated accessors.
#[derive(Debug, Clone, Default)]
pub struct SourceSolver {
    types: MemorySolver,
    nodes: HashMap<String, NodeId>,
}

impl SourceSolver {
    pub fn from_ast(ast: &Ast, imports: &ImportScope, solver: &dyn TypeSolver) -> Self {
        let mut out = SourceSolver::default();
        let classes = class_nodes(ast);
        let unit = UnitTypes {
            imports,
            binary_names: classes.iter().map(|(_, name)| name.as_str()).collect(),
            solver,
        };
        for (node, binary_name) in &classes {
            let decl = class_declaration(ast, *node, binary_name, &unit);
            out.types.insert(decl);
            out.nodes.insert(binary_name.clone(), *node);
        }
        tracing::trace!(classes = out.nodes.len(), "indexed source classes");
        out
    }

    /// The class node declaring `binary_name`.
    pub fn node_of(&self, binary_name: &str) -> Option<NodeId> {
        self.nodes.get(binary_name).copied()
    }

    pub fn declarations(&self) -> impl Iterator<Item = &Arc<ResolvedTypeDeclaration>> {
        self.types.declarations()
    }
}

impl TypeSolver for SourceSolver {
    fn try_solve_type(&self, name: &str) -> SolverResult {
        self.types.try_solve_type(name)
    }
}

/// Every class declared in the unit (nested ones included) with its binary name.
pub(crate) fn class_nodes(ast: &Ast) -> Vec<(NodeId, String)> {
    let mut out = Vec::new();
    let NodeKind::Module { classes, .. } = ast.kind(ast.root()) else {
        return out;
    };
    let prefix = ast.package().map(|pkg| format!("{pkg}.")).unwrap_or_default();
    for &class in classes {
        if let NodeKind::Class { name, .. } = ast.kind(class) {
            collect_classes(ast, class, format!("{prefix}{name}"), &mut out);
        }
    }
    out
}

fn collect_classes(ast: &Ast, node: NodeId, binary_name: String, out: &mut Vec<(NodeId, String)>) {
    if let NodeKind::Class { members, .. } = ast.kind(node) {
        for &member in members {
            if let NodeKind::Class { name, .. } = ast.kind(member) {
                collect_classes(ast, member, format!("{binary_name}${name}"), out);
            }
        }
    }
    out.push((node, binary_name));
}

/// The type a declaration was written with. Names the chain cannot find keep their source
/// spelling so hover text still shows what the user wrote.
pub(crate) fn declared_type(
    imports: &ImportScope,
    ty: Option<&TypeRef>,
    solver: &dyn TypeSolver,
) -> ResolvedType {
    imports.resolve_type_ref(ty, solver).unwrap_or_else(|| {
        let ty = ty.map_or_else(|| TypeRef::new("java.lang.Object"), Clone::clone);
        tracing::debug!(name = %ty, "unresolved declared type");
        ResolvedType::array_with_dimensions(
            ResolvedType::reference(ty.name.as_str()),
            usize::from(ty.dimensions),
        )
    })
}

/// Name lookup while building declarations: member types of the enclosing classes first, then
/// the unit's imports.
struct UnitTypes<'a> {
    imports: &'a ImportScope,
    binary_names: HashSet<&'a str>,
    solver: &'a dyn TypeSolver,
}

impl UnitTypes<'_> {
    fn member_type(&self, scope: &str, name: &str) -> Option<String> {
        let nested = name.replace('.', "$");
        let mut outer = Some(scope);
        while let Some(current) = outer {
            let candidate = format!("{current}${nested}");
            if self.binary_names.contains(candidate.as_str()) {
                return Some(candidate);
            }
            outer = current.rfind('$').map(|idx| &current[..idx]);
        }
        None
    }

    fn qualify(&self, scope: &str, ty: &TypeRef) -> String {
        self.member_type(scope, &ty.name)
            .or_else(|| self.imports.qualify(&ty.name, self.solver))
            .unwrap_or_else(|| ty.name.clone())
    }

    fn declared_type(&self, scope: &str, ty: Option<&TypeRef>) -> ResolvedType {
        match ty.and_then(|ty| Some((self.member_type(scope, &ty.name)?, ty.dimensions))) {
            Some((binary, dimensions)) => ResolvedType::array_with_dimensions(
                ResolvedType::reference(binary),
                usize::from(dimensions),
            ),
            None => declared_type(self.imports, ty, self.solver),
        }
    }
}

fn class_declaration(
    ast: &Ast,
    node: NodeId,
    binary_name: &str,
    unit: &UnitTypes<'_>,
) -> ResolvedTypeDeclaration {
    let NodeKind::Class {
        kind,
        super_class,
        interfaces,
        members,
        ..
    } = ast.kind(node)
    else {
        return ResolvedTypeDeclaration::class(binary_name);
    };

    let type_kind = match kind {
        ClassKind::Class => TypeKind::Class,
        ClassKind::Interface | ClassKind::Trait => TypeKind::Interface,
        ClassKind::Enum => TypeKind::Enum,
        ClassKind::Annotation => TypeKind::Annotation,
    };
    let qualify = |ty: &TypeRef| unit.qualify(binary_name, ty);

    let mut decl = ResolvedTypeDeclaration::new(binary_name, type_kind)
        .with_origin(DeclarationOrigin::Source)
        .with_range(ast.range(node));
    if let Some(super_class) = super_class {
        decl = decl.extends(qualify(super_class));
    }
    for interface in interfaces {
        decl = decl.implements(qualify(interface));
    }

    for &member in members {
        match ast.kind(member) {
            NodeKind::Field {
                name,
                ty,
                is_static,
                is_property,
                ..
            } => {
                let field_ty = unit.declared_type(binary_name, ty.as_ref());
                if *is_property {
                    for accessor in property_accessors(name, &field_ty, *is_static) {
                        decl = decl.with_method(accessor);
                    }
                }
                decl = decl.with_field(FieldInfo {
                    name: name.clone(),
                    ty: field_ty,
                    is_static: *is_static,
                });
            }
            NodeKind::Method {
                name,
                return_type,
                params,
                is_static,
                ..
            } => {
                let params = params
                    .iter()
                    .map(|&param| match ast.kind(param) {
                        NodeKind::Parameter { ty, .. } => {
                            unit.declared_type(binary_name, ty.as_ref())
                        }
                        _ => ResolvedType::object(),
                    })
                    .collect();
                decl = decl.with_method(MethodInfo {
                    name: name.clone(),
                    params,
                    return_type: unit.declared_type(binary_name, return_type.as_ref()),
                    is_static: *is_static,
                });
            }
            NodeKind::EnumConstant { name } => {
                decl = decl
                    .with_enum_constant(name.clone())
                    .with_field(FieldInfo::static_field(
                        name.clone(),
                        ResolvedType::reference(binary_name),
                    ));
            }
            _ => {}
        }
    }
    decl
}

fn property_accessors(name: &str, ty: &ResolvedType, is_static: bool) -> Vec<MethodInfo> {
    let mut chars = name.chars();
    let Some(first) = chars.next() else {
        return Vec::new();
    };
    let capitalized: String = first.to_uppercase().chain(chars).collect();
    let getter_prefix = if *ty == ResolvedType::boolean() {
        "is"
    } else {
        "get"
    };
    vec![
        MethodInfo {
            name: format!("{getter_prefix}{capitalized}"),
            params: Vec::new(),
            return_type: ty.clone(),
            is_static,
        },
        MethodInfo {
            name: format!("set{capitalized}"),
            params: vec![ty.clone()],
            return_type: ResolvedType::Primitive(PrimitiveType::Void),
            is_static,
        },
    ]
}
