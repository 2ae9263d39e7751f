use groovy_types::{
    ancestor_names, MemorySolver, PrimitiveType, ResolvedType, ResolvedTypeDeclaration,
    TypeSolver,
};
use pretty_assertions::assert_eq;

fn shapes() -> MemorySolver {
    let mut solver = MemorySolver::with_minimal_jdk();
    solver.insert(ResolvedTypeDeclaration::interface("shapes.Drawable"));
    solver.insert(
        ResolvedTypeDeclaration::interface("shapes.Scalable").implements("shapes.Drawable"),
    );
    solver.insert(
        ResolvedTypeDeclaration::class("shapes.Shape")
            .implements("shapes.Drawable")
            .implements("java.lang.Comparable"),
    );
    solver.insert(
        ResolvedTypeDeclaration::class("shapes.Circle")
            .extends("shapes.Shape")
            .implements("shapes.Scalable"),
    );
    solver
}

#[test]
fn user_hierarchy_diamond() {
    let solver = shapes();
    let circle = solver.solve_type("shapes.Circle").expect("Circle");
    assert_eq!(
        ancestor_names(&circle, &solver),
        vec![
            "shapes.Shape".to_string(),
            "shapes.Scalable".to_string(),
            "java.lang.Object".to_string(),
            "shapes.Drawable".to_string(),
            "java.lang.Comparable".to_string(),
        ]
    );

    let drawable = ResolvedType::reference("shapes.Drawable");
    assert!(drawable.is_assignable_by(&ResolvedType::reference("shapes.Circle"), &solver));
    assert!(!ResolvedType::reference("shapes.Circle")
        .is_assignable_by(&ResolvedType::reference("shapes.Shape"), &solver));
}

#[test]
fn arrays_of_user_types_are_covariant() {
    let solver = shapes();
    let shapes = ResolvedType::array_of(ResolvedType::reference("shapes.Shape"));
    let circles = ResolvedType::array_of(ResolvedType::reference("shapes.Circle"));
    assert!(shapes.is_assignable_by(&circles, &solver));
    assert!(!circles.is_assignable_by(&shapes, &solver));
    assert!(!shapes.is_assignable_by(&ResolvedType::array_of(PrimitiveType::Int.into()), &solver));
}
