use std::sync::Arc;

use groovy_ast::{Ast, AstBuilder, BinaryOp, NodeKind};
use groovy_cache::NoopCache;
use groovy_infer::{lub, TypeExtractor};
use groovy_resolve::{ResolutionContext, TypeCache};
use groovy_types::{MemorySolver, PrimitiveType, ResolvedType, TypeError, TypeSolver};
use pretty_assertions::assert_eq;
use proptest::prelude::*;

fn pool() -> Vec<ResolvedType> {
    use PrimitiveType::*;
    let r = ResolvedType::reference;
    vec![
        ResolvedType::Primitive(Boolean),
        ResolvedType::Primitive(Byte),
        ResolvedType::Primitive(Short),
        ResolvedType::Primitive(Char),
        ResolvedType::Primitive(Int),
        ResolvedType::Primitive(Long),
        ResolvedType::Primitive(Float),
        ResolvedType::Primitive(Double),
        ResolvedType::Null,
        ResolvedType::object(),
        ResolvedType::string(),
        r("java.lang.Integer"),
        r("java.lang.Long"),
        r("java.math.BigDecimal"),
        r("java.lang.Number"),
        r("java.util.ArrayList"),
        r("java.util.LinkedHashMap"),
        r("groovy.lang.IntRange"),
        r("groovy.lang.GString"),
        r("com.acme.Unknown"),
        ResolvedType::array_of(ResolvedType::int()),
        ResolvedType::array_of(ResolvedType::Primitive(Long)),
        ResolvedType::array_of(r("java.lang.Integer")),
        ResolvedType::array_of(r("java.lang.Number")),
    ]
}

fn any_type() -> impl Strategy<Value = ResolvedType> {
    prop::sample::select(pool())
}

proptest! {
    #[test]
    fn lub_is_symmetric(a in any_type(), b in any_type()) {
        let solver = MemorySolver::with_minimal_jdk();
        let ab = lub(&[a.clone(), b.clone()], &solver);
        let ba = lub(&[b, a], &solver);
        match (ab, ba) {
            (Ok(ab), Ok(ba)) => prop_assert_eq!(ab, ba),
            (ab, ba) => prop_assert!(ab.is_err() && ba.is_err()),
        }
    }

    #[test]
    fn lub_of_one_is_itself(a in any_type()) {
        let solver = MemorySolver::with_minimal_jdk();
        prop_assert_eq!(lub(&[a.clone()], &solver), Ok(a));
    }

    #[test]
    fn lub_is_an_upper_bound(types in prop::collection::vec(any_type(), 1..5)) {
        let solver = MemorySolver::with_minimal_jdk();
        if let Ok(upper) = lub(&types, &solver) {
            for ty in types.iter().filter(|ty| !ty.is_null()) {
                prop_assert!(
                    upper.is_assignable_by(ty, &solver),
                    "{} does not accept {}", upper, ty
                );
            }
        }
    }

    #[test]
    fn null_is_absorbed(a in any_type()) {
        let solver = MemorySolver::with_minimal_jdk();
        prop_assert_eq!(
            lub(&[ResolvedType::Null, a.clone()], &solver),
            lub(&[a], &solver)
        );
    }
}

#[test]
fn lub_scenarios() {
    let solver = MemorySolver::with_minimal_jdk();
    assert_eq!(
        lub(
            &[ResolvedType::int(), ResolvedType::Primitive(PrimitiveType::Double)],
            &solver
        ),
        Ok(ResolvedType::Primitive(PrimitiveType::Double))
    );
    assert_eq!(lub(&[], &solver), Err(TypeError::EmptyLub));
}

/// A unit mixing literals, locals, members and closures.
fn sample_unit() -> Ast {
    let mut b = AstBuilder::new();
    let forty_two = b.int("42");
    let x_decl = b.local("x", None, Some(forty_two));
    let (x, half) = (b.var("x"), b.decimal("0.5"));
    let sum = b.binary(x, BinaryOp::Plus, half);
    let y_decl = b.local("y", None, Some(sum));
    let (text, y) = (b.string("y = "), b.var("y"));
    let concat = b.binary(text, BinaryOp::Plus, y);
    let s_decl = b.local("s", None, Some(concat));
    let s = b.var("s");
    let upper = b.call(Some(s), "toUpperCase", vec![]);
    let length = b.call(Some(upper), "length", vec![]);
    let it = b.var("it");
    let it_stmt = b.expr_stmt(it);
    let closure = b.closure(vec![], vec![it_stmt]);
    let (condition, then_branch, else_branch) = (b.boolean(false), b.int("1"), b.string("one"));
    let ternary = b.alloc(NodeKind::Ternary {
        condition,
        then_branch,
        else_branch,
    });
    let unknown = b.var("unknown");
    let (self_ref_init, shadow) = (b.var("loop"), b.string("shadow"));
    let loop_decl = b.local("loop", None, Some(self_ref_init));
    let shadow_decl = b.local("String", None, Some(shadow));
    let shadowed = b.var("String");

    let mut statements = vec![x_decl, y_decl, s_decl, loop_decl, shadow_decl];
    statements.extend(
        [length, closure, ternary, unknown, shadowed].map(|expr| b.expr_stmt(expr)),
    );
    let module = b.module(None, vec![], vec![], statements);
    b.finish(module).expect("well-formed unit")
}

fn all_types(ctx: &ResolutionContext) -> Vec<String> {
    let extractor = TypeExtractor::new(ctx);
    ctx.ast().ids().map(|node| extractor.describe(node)).collect()
}

#[test]
fn extraction_is_idempotent_with_and_without_a_cache() {
    let ast = Arc::new(sample_unit());
    let solver: Arc<dyn TypeSolver> = Arc::new(MemorySolver::with_minimal_jdk());
    let cached = ResolutionContext::new(ast.clone(), solver.clone());
    let noop: Arc<TypeCache> = Arc::new(NoopCache::new());
    let uncached = ResolutionContext::with_type_cache(ast, solver, noop);

    let first = all_types(&cached);
    assert_eq!(all_types(&cached), first);
    assert_eq!(all_types(&uncached), first);
    assert!(first.iter().any(|ty| ty == "double"));
    assert!(first.iter().any(|ty| ty == "<unknown>"));
    assert!(cached.type_cache().stats().hits > 0);
    assert_eq!(uncached.type_cache().len(), 0);
}

#[test]
fn contexts_are_shared_across_threads() {
    groovy_test_utils::init_tracing();

    let ctx = Arc::new(ResolutionContext::new(
        Arc::new(sample_unit()),
        Arc::new(MemorySolver::with_minimal_jdk()),
    ));
    let sequential = {
        let fresh = ResolutionContext::new(
            Arc::new(sample_unit()),
            Arc::new(MemorySolver::with_minimal_jdk()),
        );
        all_types(&fresh)
    };

    let results: Vec<Vec<String>> = std::thread::scope(|scope| {
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let ctx = Arc::clone(&ctx);
                scope.spawn(move || all_types(&ctx))
            })
            .collect();
        handles
            .into_iter()
            .map(|handle| handle.join().expect("worker panicked"))
            .collect()
    });
    for result in results {
        assert_eq!(result, sequential);
    }
}
