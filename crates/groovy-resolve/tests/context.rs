use std::sync::Arc;

use groovy_ast::{Ast, AstBuilder, ClassKind, NodeId, NodeKind, TypeRef};
use groovy_cache::{NoopCache, ResolutionCache};
use groovy_core::Range;
use groovy_resolve::{ResolutionContext, TypeCache};
use groovy_types::{DeclarationKind, MemorySolver, ResolvedType, TypeSolver};
use pretty_assertions::assert_eq;

/// ```groovy
/// package app
///
/// class Shop {
///     String name
///     static int LIMIT
///     enum Kind { RETAIL, ONLINE }
///
///     def describe(String prefix) {
///         prefix; name; LIMIT; Kind.RETAIL; greet(); this
///         [1].each { it }
///     }
///     def greet() {}
/// }
///
/// int count = 0      // at 12:1
/// def shop = new Shop()
/// shop; count
/// ```
struct Fixture {
    ctx: ResolutionContext,
    shop: NodeId,
    prefix_ref: NodeId,
    name_ref: NodeId,
    limit_ref: NodeId,
    retail: NodeId,
    retail_ref: NodeId,
    greet_call: NodeId,
    greet: NodeId,
    this_ref: NodeId,
    it_ref: NodeId,
    count_decl: NodeId,
    count_ref: NodeId,
    shop_ref: NodeId,
    new_shop: NodeId,
}

fn fixture() -> Fixture {
    let mut b = AstBuilder::new();

    let name = b.property("name", Some("String"), None);
    let limit = b.field("LIMIT", Some("int"), true, None);
    let retail = b.alloc(NodeKind::EnumConstant {
        name: "RETAIL".into(),
    });
    let online = b.alloc(NodeKind::EnumConstant {
        name: "ONLINE".into(),
    });
    let kind = b.type_decl("Kind", ClassKind::Enum, None, &[], vec![retail, online]);

    let prefix = b.param("prefix", Some("String"));
    let prefix_ref = b.var("prefix");
    let name_ref = b.var("name");
    let limit_ref = b.var("LIMIT");
    let kind_ref = b.var("Kind");
    let retail_ref = b.prop(kind_ref, "RETAIL");
    let greet_call = b.call(None, "greet", vec![]);
    let this_ref = b.var("this");
    let exprs = [prefix_ref, name_ref, limit_ref, retail_ref, greet_call, this_ref];
    let mut statements: Vec<NodeId> = exprs
        .into_iter()
        .map(|expr| b.expr_stmt(expr))
        .collect();
    let it_ref = b.var("it");
    let it_stmt = b.expr_stmt(it_ref);
    let closure = b.closure(vec![], vec![it_stmt]);
    let one = b.int("1");
    let list = b.list(vec![one]);
    let each = b.call(Some(list), "each", vec![closure]);
    statements.push(b.expr_stmt(each));
    let describe = b.method("describe", None, vec![prefix], statements);
    let greet = b.method("greet", None, vec![], vec![]);
    let shop = b.class("Shop", vec![name, limit, kind, describe, greet]);

    let zero = b.int("0");
    let count_decl = b.alloc_at(
        NodeKind::VariableDecl {
            name: "count".into(),
            ty: Some(TypeRef::new("int")),
            initializer: Some(zero),
        },
        Range::from_coords(12, 1, 12, 14),
    );
    let new_shop = b.new_instance("Shop", vec![]);
    let shop_decl = b.local("shop", None, Some(new_shop));
    let shop_ref = b.var("shop");
    let count_ref = b.var("count");
    let s1 = b.expr_stmt(shop_ref);
    let s2 = b.expr_stmt(count_ref);

    let module = b.module(Some("app"), vec![], vec![shop], vec![count_decl, shop_decl, s1, s2]);
    let ast = b.finish(module).expect("well-formed fixture");
    let ctx = ResolutionContext::new(Arc::new(ast), Arc::new(MemorySolver::with_minimal_jdk()));

    Fixture {
        ctx,
        shop,
        prefix_ref,
        name_ref,
        limit_ref,
        retail,
        retail_ref,
        greet_call,
        greet,
        this_ref,
        it_ref,
        count_decl,
        count_ref,
        shop_ref,
        new_shop,
    }
}

#[test]
fn parameters_and_fields_inside_methods() {
    let f = fixture();

    let prefix = f.ctx.resolve_symbol(f.prefix_ref).expect("prefix");
    assert_eq!(prefix.kind(), DeclarationKind::Parameter);
    assert_eq!(prefix.value_type(), Some(ResolvedType::string()));

    let name = f.ctx.resolve_symbol(f.name_ref).expect("name");
    assert_eq!(name.kind(), DeclarationKind::Field);
    assert_eq!(name.qualified_name(), "app.Shop.name");
    assert_eq!(name.symbol_id().as_str(), "app/Shop#name.");

    let limit = f.ctx.resolve_symbol(f.limit_ref).expect("LIMIT");
    assert_eq!(limit.value_type(), Some(ResolvedType::int()));
}

#[test]
fn nested_enum_constants_and_methods() {
    let f = fixture();

    let retail = f.ctx.resolve_symbol(f.retail_ref).expect("Kind.RETAIL");
    assert_eq!(retail.kind(), DeclarationKind::EnumConstant);
    assert_eq!(retail.qualified_name(), "app.Shop.Kind.RETAIL");
    assert_eq!(retail.value_type(), Some(ResolvedType::reference("app.Shop$Kind")));
    assert_eq!(retail.range(), Some(f.ctx.ast().range(f.retail)));

    let greet = f.ctx.resolve_symbol(f.greet_call).expect("greet()");
    assert_eq!(greet.kind(), DeclarationKind::Method);
    assert_eq!(greet.symbol_id().as_str(), "app/Shop#greet().");
    assert_eq!(greet.range(), Some(f.ctx.ast().range(f.greet)));

    let this = f.ctx.resolve_symbol(f.this_ref).expect("this");
    assert_eq!(this.qualified_name(), "app.Shop");
}

#[test]
fn closures_bind_an_implicit_it() {
    let f = fixture();
    let it = f.ctx.resolve_symbol(f.it_ref).expect("it");
    assert_eq!(it.kind(), DeclarationKind::Parameter);
    assert_eq!(it.name(), "it");
    assert_eq!(it.value_type(), Some(ResolvedType::object()));
}

#[test]
fn script_locals_and_constructor_types() {
    let f = fixture();

    let count = f.ctx.resolve_symbol(f.count_ref).expect("count");
    assert_eq!(count.kind(), DeclarationKind::LocalVariable);
    assert_eq!(count.symbol_id().as_str(), "local count@12:1");
    assert_eq!(count, f.ctx.declaration_of(f.count_decl).expect("declaration"));

    let shop = f.ctx.resolve_symbol(f.shop_ref).expect("shop");
    assert_eq!(shop.value_type(), Some(ResolvedType::object()));

    let ty = f.ctx.resolve_symbol(f.new_shop).expect("new Shop()");
    assert_eq!(ty.qualified_name(), "app.Shop");
    assert_eq!(f.ctx.declaration_of(f.shop), Some(ty));
}

#[test]
fn unit_classes_shadow_the_rest_of_the_chain() {
    let f = fixture();
    let shop = f.ctx.solver().solve_type("app.Shop").expect("app.Shop");
    assert_eq!(f.ctx.source().node_of("app.Shop"), Some(f.shop));
    assert_eq!(
        shop.methods().iter().map(|m| m.name.as_str()).collect::<Vec<_>>(),
        vec!["getName", "setName", "describe", "greet"]
    );
    assert!(f.ctx.resolve_type_name("Kind").is_none());
    assert!(f.ctx.resolve_type_name("Shop.Kind").is_some());
}

#[test]
fn custom_type_caches_are_used() {
    let ast: Ast = {
        let mut b = AstBuilder::new();
        let module = b.module(None, vec![], vec![], vec![]);
        b.finish(module).expect("empty module")
    };
    let cache: Arc<TypeCache> = Arc::new(NoopCache::new());
    let ctx = ResolutionContext::with_type_cache(
        Arc::new(ast),
        Arc::new(MemorySolver::new()),
        cache,
    );
    let key = ctx.node_key(ctx.ast().root());
    ctx.type_cache().put(key, ResolvedType::int());
    assert_eq!(ctx.type_cache().get(&key), None);
    assert_eq!(ctx.type_cache().stats().misses, 1);
}
