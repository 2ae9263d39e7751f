//! Least upper bounds over [`ResolvedType`]s.

use std::collections::BTreeSet;

use groovy_types::{
    ancestor_names, well_known, PrimitiveType, ResolvedType, TypeError, TypeSolver,
};

use crate::promotion::binary_numeric_promotion;

/// The most specific type every member of `types` is assignable to.
///
/// `null` is absorbed by any other type. Numeric primitives merge by promotion, references by
/// their most specific common ancestor (a class over an interface, then the smaller name), and
/// arrays by their component types. Mixing primitives with references is an error; callers box
/// first.
pub fn lub(types: &[ResolvedType], solver: &dyn TypeSolver) -> Result<ResolvedType, TypeError> {
    let Some(first) = types.first() else {
        return Err(TypeError::EmptyLub);
    };
    if types.iter().all(|ty| ty == first) {
        return Ok(first.clone());
    }

    let non_null: Vec<&ResolvedType> = types.iter().filter(|ty| !ty.is_null()).collect();
    let Some(&head) = non_null.first() else {
        return Ok(ResolvedType::Null);
    };
    if non_null.iter().all(|&ty| ty == head) {
        return Ok(head.clone());
    }

    let primitive = non_null.iter().find_map(|ty| ty.as_primitive());
    let other = non_null.iter().find(|ty| !ty.is_primitive());
    match (primitive, other) {
        (Some(primitive), Some(other)) => Err(TypeError::PrimitiveReferenceMix {
            primitive,
            reference: other.describe(),
        }),
        (Some(_), None) => {
            let primitives: Vec<PrimitiveType> =
                non_null.iter().filter_map(|ty| ty.as_primitive()).collect();
            primitive_lub(&primitives)
        }
        (None, _) => Ok(reference_lub(&non_null, solver)),
    }
}

fn primitive_lub(primitives: &[PrimitiveType]) -> Result<ResolvedType, TypeError> {
    if primitives.contains(&PrimitiveType::Void) {
        return Err(TypeError::Void);
    }
    if primitives.contains(&PrimitiveType::Boolean) {
        // Not all equal, so at least one is numeric.
        let numeric = primitives
            .iter()
            .copied()
            .find(|p| p.is_numeric())
            .unwrap_or(PrimitiveType::Int);
        return Err(TypeError::BooleanNumericMix(numeric));
    }
    let mut acc = primitives[0];
    for &p in &primitives[1..] {
        acc = binary_numeric_promotion(acc, p).unwrap_or(PrimitiveType::Double);
    }
    Ok(ResolvedType::Primitive(acc))
}

/// LUB of non-null, non-primitive types that are not all equal.
fn reference_lub(types: &[&ResolvedType], solver: &dyn TypeSolver) -> ResolvedType {
    if types.iter().all(|ty| ty.is_array()) {
        let components: Vec<ResolvedType> = types
            .iter()
            .filter_map(|ty| ty.component_type().cloned())
            .collect();
        if components.iter().any(ResolvedType::is_primitive) {
            // Distinct primitive components (`int[]` vs `long[]`) share nothing but Object.
            return ResolvedType::object();
        }
        return match lub(&components, solver) {
            Ok(component) => ResolvedType::array_of(component),
            Err(_) => ResolvedType::object(),
        };
    }

    let mut names = Vec::with_capacity(types.len());
    for ty in types {
        match ty.as_reference() {
            Some(r) => names.push(r.binary_name()),
            None => return ResolvedType::object(),
        }
    }
    common_ancestor(&names, solver)
        .map(ResolvedType::reference)
        .unwrap_or_else(ResolvedType::object)
}

fn supertype_closure(name: &str, solver: &dyn TypeSolver) -> BTreeSet<String> {
    let mut closure = BTreeSet::from([name.to_string(), well_known::OBJECT.to_string()]);
    if let Some(decl) = solver.solve_type(name) {
        closure.extend(ancestor_names(&decl, solver));
    }
    closure
}

fn common_ancestor(names: &[&str], solver: &dyn TypeSolver) -> Option<String> {
    let closures: Vec<(String, BTreeSet<String>)> = names
        .iter()
        .map(|name| (name.to_string(), supertype_closure(name, solver)))
        .collect();
    let mut common = closures.first()?.1.clone();
    for (_, closure) in &closures[1..] {
        common.retain(|name| closure.contains(name));
    }
    if common.len() <= 1 {
        return common.into_iter().next();
    }

    let ancestors_of = |name: &str| -> BTreeSet<String> {
        closures
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, closure)| closure.clone())
            .unwrap_or_else(|| supertype_closure(name, solver))
    };
    let minimal: Vec<&String> = common
        .iter()
        .filter(|candidate| {
            !common.iter().any(|other| {
                other != *candidate && ancestors_of(other).contains(candidate.as_str())
            })
        })
        .collect();

    // `common` is ordered, so the first match of each pass is the smallest name.
    let is_class = |name: &str| solver.solve_type(name).is_some_and(|d| !d.is_interface());
    minimal
        .iter()
        .find(|name| is_class(name))
        .or_else(|| minimal.first())
        .map(|name| name.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use groovy_types::{MemorySolver, ResolvedTypeDeclaration};
    use pretty_assertions::assert_eq;

    fn r(name: &str) -> ResolvedType {
        ResolvedType::reference(name)
    }

    fn p(p: PrimitiveType) -> ResolvedType {
        ResolvedType::Primitive(p)
    }

    #[test]
    fn primitives_merge_by_rank() {
        let solver = MemorySolver::new();
        use PrimitiveType::*;
        assert_eq!(lub(&[p(Int), p(Double)], &solver), Ok(p(Double)));
        assert_eq!(lub(&[p(Byte), p(Short)], &solver), Ok(p(Short)));
        assert_eq!(lub(&[p(Short), p(Char)], &solver), Ok(p(Int)));
        assert_eq!(lub(&[p(Long), p(Int), p(Byte)], &solver), Ok(p(Long)));
        assert_eq!(
            lub(&[p(Boolean), p(Int)], &solver),
            Err(TypeError::BooleanNumericMix(Int))
        );
        assert_eq!(lub(&[p(Void), p(Int)], &solver), Err(TypeError::Void));
    }

    #[test]
    fn null_is_absorbed() {
        let solver = MemorySolver::with_minimal_jdk();
        assert_eq!(
            lub(&[ResolvedType::Null, ResolvedType::string()], &solver),
            Ok(ResolvedType::string())
        );
        assert_eq!(
            lub(&[ResolvedType::Null, ResolvedType::Null], &solver),
            Ok(ResolvedType::Null)
        );
        assert_eq!(
            lub(&[ResolvedType::int(), ResolvedType::Null], &solver),
            Ok(ResolvedType::int())
        );
    }

    #[test]
    fn references_meet_at_the_most_specific_class() {
        let solver = MemorySolver::with_minimal_jdk();
        assert_eq!(
            lub(&[r("java.lang.Integer"), r("java.lang.Long")], &solver),
            Ok(r(well_known::NUMBER))
        );
        assert_eq!(
            lub(&[r("java.lang.Integer"), r(well_known::NUMBER)], &solver),
            Ok(r(well_known::NUMBER))
        );
        assert_eq!(
            lub(&[r(well_known::ARRAY_LIST), r(well_known::INT_RANGE)], &solver),
            Ok(r("java.util.AbstractList"))
        );
        // Only interfaces in common: the smallest name wins.
        assert_eq!(
            lub(&[ResolvedType::string(), r("java.lang.Integer")], &solver),
            Ok(r(well_known::SERIALIZABLE))
        );
    }

    #[test]
    fn unknown_references_fall_back_to_object() {
        let solver = MemorySolver::with_minimal_jdk();
        assert_eq!(
            lub(&[r("com.acme.A"), r("com.acme.B")], &solver),
            Ok(ResolvedType::object())
        );

        let solver = MemorySolver::with_minimal_jdk()
            .with(ResolvedTypeDeclaration::class("com.acme.Base"))
            .with(ResolvedTypeDeclaration::class("com.acme.A").extends("com.acme.Base"))
            .with(ResolvedTypeDeclaration::class("com.acme.B").extends("com.acme.Base"));
        assert_eq!(
            lub(&[r("com.acme.A"), r("com.acme.B")], &solver),
            Ok(r("com.acme.Base"))
        );
    }

    #[test]
    fn arrays() {
        let solver = MemorySolver::with_minimal_jdk();
        let ints = ResolvedType::array_of(ResolvedType::int());
        let longs = ResolvedType::array_of(p(PrimitiveType::Long));
        let integers = ResolvedType::array_of(r("java.lang.Integer"));
        let doubles = ResolvedType::array_of(r("java.lang.Double"));

        assert_eq!(lub(&[ints.clone(), longs], &solver), Ok(ResolvedType::object()));
        assert_eq!(
            lub(&[integers, doubles], &solver),
            Ok(ResolvedType::array_of(r(well_known::NUMBER)))
        );
        assert_eq!(lub(&[ints.clone(), ResolvedType::Null], &solver), Ok(ints.clone()));
        assert_eq!(
            lub(&[ints, ResolvedType::string()], &solver),
            Ok(ResolvedType::object())
        );
    }

    #[test]
    fn mixing_categories_is_rejected() {
        let solver = MemorySolver::with_minimal_jdk();
        assert_eq!(lub(&[], &solver), Err(TypeError::EmptyLub));
        assert_eq!(
            lub(&[ResolvedType::int(), ResolvedType::string()], &solver),
            Err(TypeError::PrimitiveReferenceMix {
                primitive: PrimitiveType::Int,
                reference: "java.lang.String".into(),
            })
        );
    }
}
