use std::collections::HashMap;
use std::sync::Arc;

use groovy_ast::{Ast, NodeKind, TypeRef};
use groovy_types::{PrimitiveType, ResolvedType, ResolvedTypeDeclaration, TypeSolver};

use crate::source::class_nodes;

/// Packages every Groovy unit imports implicitly, in lookup order.
pub const DEFAULT_IMPORT_PACKAGES: [&str; 6] = [
    "java.lang",
    "java.util",
    "java.io",
    "java.net",
    "groovy.lang",
    "groovy.util",
];

/// Classes every Groovy unit imports implicitly, tried after the default packages.
pub const DEFAULT_IMPORT_CLASSES: [&str; 2] = ["java.math.BigInteger", "java.math.BigDecimal"];

/// The type names visible in one compilation unit and the order they are tried in.
///
/// An unqualified name is looked up as:
/// 1. a class declared in the unit (nested classes as `Outer.Inner`)
/// 2. a single-type import, by simple name or alias
/// 3. the unit's own package
/// 4. star imports, in declaration order
/// 5. [`DEFAULT_IMPORT_PACKAGES`], then [`DEFAULT_IMPORT_CLASSES`]
///
/// Qualified names are tried as written, then with their first segment expanded through the unit
/// classes and single-type imports (`Map.Entry` with `import java.util.Map`).
#[derive(Debug, Clone, Default)]
pub struct ImportScope {
    package: Option<String>,
    /// Source spelling (`Outer.Inner`) → binary name.
    unit_types: HashMap<String, String>,
    /// Simple name or alias → qualified name.
    single: HashMap<String, String>,
    stars: Vec<String>,
}

impl ImportScope {
    pub fn from_ast(ast: &Ast) -> Self {
        let mut scope = ImportScope {
            package: ast.package().map(str::to_string),
            ..ImportScope::default()
        };

        for (_, binary_name) in class_nodes(ast) {
            let pkg_len = scope.package.as_ref().map_or(0, |pkg| pkg.len() + 1);
            let spelling = binary_name[pkg_len..].replace('$', ".");
            scope.unit_types.insert(spelling, binary_name);
        }

        if let NodeKind::Module { imports, .. } = ast.kind(ast.root()) {
            for &import in imports {
                let NodeKind::Import {
                    path,
                    alias,
                    is_static,
                    is_star,
                } = ast.kind(import)
                else {
                    continue;
                };
                match (is_static, is_star) {
                    (false, true) => scope.stars.push(path.clone()),
                    (false, false) => {
                        let key = alias
                            .clone()
                            .unwrap_or_else(|| groovy_core::simple_name(path).to_string());
                        scope.single.insert(key, path.clone());
                    }
                    // Static imports bring in members, not types.
                    (true, _) => {}
                }
            }
        }
        scope
    }

    pub fn package(&self) -> Option<&str> {
        self.package.as_deref()
    }

    /// Binary name of a class declared in this unit.
    pub fn unit_type(&self, spelling: &str) -> Option<&str> {
        self.unit_types.get(spelling).map(String::as_str)
    }

    /// Qualified names `name` may denote, most specific first.
    pub fn candidates(&self, name: &str) -> Vec<String> {
        let mut out = Vec::new();
        if let Some(binary) = self.unit_types.get(name) {
            out.push(binary.clone());
        }

        match name.split_once('.') {
            Some((head, rest)) => {
                out.push(name.to_string());
                if let Some(binary) = self.unit_types.get(head) {
                    out.push(format!("{binary}.{rest}"));
                }
                if let Some(qualified) = self.single.get(head) {
                    out.push(format!("{qualified}.{rest}"));
                }
            }
            None => {
                if let Some(qualified) = self.single.get(name) {
                    out.push(qualified.clone());
                }
                match &self.package {
                    Some(pkg) => out.push(format!("{pkg}.{name}")),
                    None => out.push(name.to_string()),
                }
                out.extend(self.stars.iter().map(|pkg| format!("{pkg}.{name}")));
                out.extend(
                    DEFAULT_IMPORT_PACKAGES
                        .iter()
                        .map(|pkg| format!("{pkg}.{name}")),
                );
                out.extend(
                    DEFAULT_IMPORT_CLASSES
                        .iter()
                        .filter(|class| groovy_core::simple_name(class) == name)
                        .map(|class| class.to_string()),
                );
            }
        }
        out
    }

    /// Resolves a type name as written in source; first candidate the solver knows wins.
    pub fn resolve(
        &self,
        name: &str,
        solver: &dyn TypeSolver,
    ) -> Option<Arc<ResolvedTypeDeclaration>> {
        self.candidates(name)
            .iter()
            .find_map(|candidate| solver.solve_type(candidate))
    }

    /// Binary name for `name`. Unit classes qualify without consulting the solver.
    pub fn qualify(&self, name: &str, solver: &dyn TypeSolver) -> Option<String> {
        if let Some(binary) = self.unit_types.get(name) {
            return Some(binary.clone());
        }
        if let Some((head, rest)) = name.split_once('.') {
            if let Some(binary) = self.unit_types.get(head) {
                return Some(format!("{binary}${}", rest.replace('.', "$")));
            }
        }
        self.resolve(name, solver)
            .map(|decl| decl.binary_name().to_string())
    }

    /// Resolves a written type. `def`/`var` and a missing annotation mean `java.lang.Object`;
    /// `None` means the base type could not be found.
    pub fn resolve_type_ref(
        &self,
        ty: Option<&TypeRef>,
        solver: &dyn TypeSolver,
    ) -> Option<ResolvedType> {
        let Some(ty) = ty else {
            return Some(ResolvedType::object());
        };
        if ty.is_dynamic() {
            return Some(ResolvedType::object());
        }
        let base = match PrimitiveType::from_name(&ty.name) {
            Some(prim) => ResolvedType::Primitive(prim),
            None if matches!(ty.name.as_str(), "def" | "var") => ResolvedType::object(),
            None => ResolvedType::reference(self.qualify(&ty.name, solver)?),
        };
        Some(ResolvedType::array_with_dimensions(
            base,
            usize::from(ty.dimensions),
        ))
    }
}
