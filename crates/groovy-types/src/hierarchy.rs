use std::collections::{HashSet, VecDeque};

use crate::{well_known, FieldInfo, MethodInfo, ResolvedTypeDeclaration, TypeSolver};

/// Visits every proper supertype of `decl` breadth-first, superclass before interfaces.
///
/// Each name is yielded once even when the hierarchy is a diamond or (in broken inputs) a cycle.
/// Names the solver cannot resolve are still yielded, but their own supertypes are unknown.
pub fn supertypes_bfs(
    decl: &ResolvedTypeDeclaration,
    solver: &dyn TypeSolver,
    mut visit: impl FnMut(&str),
) {
    let mut seen: HashSet<String> = HashSet::new();
    seen.insert(decl.binary_name().to_string());
    let mut queue: VecDeque<String> = decl.direct_supertypes().map(str::to_string).collect();

    while let Some(name) = queue.pop_front() {
        if !seen.insert(name.clone()) {
            continue;
        }
        visit(&name);
        match solver.solve_type(&name) {
            Some(super_decl) => queue.extend(super_decl.direct_supertypes().map(str::to_string)),
            None => tracing::trace!(
                ty = decl.binary_name(),
                ancestor = %name,
                "unresolved supertype"
            ),
        }
    }
}

/// All proper supertypes of `decl` in breadth-first order.
///
/// `java.lang.Object` is always present (last if no declaration in the chain names it) unless
/// `decl` is `java.lang.Object` itself.
pub fn ancestor_names(decl: &ResolvedTypeDeclaration, solver: &dyn TypeSolver) -> Vec<String> {
    let mut out = Vec::new();
    supertypes_bfs(decl, solver, |name| out.push(name.to_string()));
    if decl.binary_name() != well_known::OBJECT && !out.iter().any(|n| n == well_known::OBJECT) {
        out.push(well_known::OBJECT.to_string());
    }
    out
}

/// Whether the type named `sub` is `sup` or has `sup` among its ancestors.
pub fn is_subtype_name(sub: &str, sup: &str, solver: &dyn TypeSolver) -> bool {
    if sub == sup || sup == well_known::OBJECT {
        return true;
    }
    let Some(decl) = solver.solve_type(sub) else {
        return false;
    };
    let mut found = false;
    supertypes_bfs(&decl, solver, |name| found |= name == sup);
    found
}

/// The first field called `name` on `decl` or its ancestors, with the binary name of its owner.
pub fn find_field(
    decl: &ResolvedTypeDeclaration,
    name: &str,
    solver: &dyn TypeSolver,
) -> Option<(String, FieldInfo)> {
    if let Some(field) = decl.field(name) {
        return Some((decl.binary_name().to_string(), field.clone()));
    }
    let mut found = None;
    supertypes_bfs(decl, solver, |ancestor| {
        if found.is_some() {
            return;
        }
        if let Some(field) = solver.solve_type(ancestor).and_then(|d| d.field(name).cloned()) {
            found = Some((ancestor.to_string(), field));
        }
    });
    found
}

/// Every method called `name` on `decl` and its ancestors, nearest declarations first.
pub fn find_methods(
    decl: &ResolvedTypeDeclaration,
    name: &str,
    solver: &dyn TypeSolver,
) -> Vec<(String, MethodInfo)> {
    let mut out: Vec<(String, MethodInfo)> = decl
        .methods_named(name)
        .map(|m| (decl.binary_name().to_string(), m.clone()))
        .collect();
    supertypes_bfs(decl, solver, |ancestor| {
        if let Some(ancestor_decl) = solver.solve_type(ancestor) {
            out.extend(
                ancestor_decl
                    .methods_named(name)
                    .map(|m| (ancestor.to_string(), m.clone())),
            );
        }
    });
    if decl.is_interface() && decl.binary_name() != well_known::OBJECT {
        // Interfaces still answer to Object's methods.
        if let Some(object) = solver.solve_type(well_known::OBJECT) {
            if !out.iter().any(|(owner, _)| owner == well_known::OBJECT) {
                out.extend(
                    object
                        .methods_named(name)
                        .map(|m| (well_known::OBJECT.to_string(), m.clone())),
                );
            }
        }
    }
    out
}
