use std::sync::Arc;

use groovy_ast::{AstBuilder, BinaryOp, ClassKind, NodeId, NodeKind, TypeRef, UnaryOp};
use groovy_infer::{ResolutionFailure, TypeExtractor};
use groovy_resolve::ResolutionContext;
use groovy_types::{DeclarationKind, MemorySolver, ResolvedType};
use pretty_assertions::assert_eq;

fn context(mut b: AstBuilder, classes: Vec<NodeId>, statements: Vec<NodeId>) -> ResolutionContext {
    let module = b.module(None, vec![], classes, statements);
    let ast = b.finish(module).expect("well-formed unit");
    ResolutionContext::new(Arc::new(ast), Arc::new(MemorySolver::with_minimal_jdk()))
}

/// A script evaluating each of `exprs` as a statement.
fn script(mut b: AstBuilder, exprs: &[NodeId]) -> ResolutionContext {
    let statements = exprs.iter().map(|&expr| b.expr_stmt(expr)).collect();
    context(b, vec![], statements)
}

fn assert_types(extractor: &TypeExtractor<'_>, cases: &[(NodeId, &str)]) {
    for &(node, expected) in cases {
        assert_eq!(extractor.describe(node), expected, "type of {node:?}");
    }
}

#[test]
fn literals_and_collections() {
    let mut b = AstBuilder::new();
    let part = b.int("1");
    let gstring = b.alloc(NodeKind::GString { parts: vec![part] });
    let (from, to) = (b.int("1"), b.int("5"));
    let int_range = b.alloc(NodeKind::Range {
        from,
        to,
        inclusive: true,
    });
    let (from, to) = (b.string("a"), b.string("e"));
    let text_range = b.alloc(NodeKind::Range {
        from,
        to,
        inclusive: false,
    });
    let (key, value) = (b.string("k"), b.int("1"));
    let map = b.map(vec![(key, value)]);
    let element = b.int("1");
    let list = b.list(vec![element]);

    let cases = vec![
        (b.int("42"), "int"),
        (b.int("42L"), "long"),
        (b.int("3000000000"), "long"),
        (b.int("42G"), "java.math.BigInteger"),
        (b.decimal("1.5"), "double"),
        (b.decimal("1.5f"), "float"),
        (b.decimal("1.5G"), "java.math.BigDecimal"),
        (b.boolean(true), "boolean"),
        (b.string("s"), "java.lang.String"),
        (b.null(), "null"),
        (gstring, "groovy.lang.GString"),
        (list, "java.util.ArrayList"),
        (map, "java.util.LinkedHashMap"),
        (int_range, "groovy.lang.IntRange"),
        (text_range, "groovy.lang.ObjectRange"),
    ];
    let exprs: Vec<NodeId> = cases.iter().map(|&(node, _)| node).collect();
    let ctx = script(b, &exprs);
    assert_types(&TypeExtractor::new(&ctx), &cases);
}

#[test]
fn dynamic_locals_take_the_type_of_their_initializer() {
    let mut b = AstBuilder::new();
    let forty_two = b.int("42");
    let x_decl = b.local("x", None, Some(forty_two));
    let x = b.var("x");
    let half = b.decimal("1.5");
    let sum = b.binary(x, BinaryOp::Plus, half);
    let y_decl = b.local("y", None, Some(sum));
    let null = b.null();
    let s_decl = b.local("s", Some("String"), Some(null));
    let text = b.string("text");
    let o_decl = b.local("o", Some("Object"), Some(text));
    let nothing = b.null();
    let n_decl = b.local("n", None, Some(nothing));

    let refs: Vec<NodeId> = ["x", "y", "s", "o", "n"].iter().map(|name| b.var(name)).collect();
    let mut statements = vec![x_decl, y_decl, s_decl, o_decl, n_decl];
    statements.extend(refs.iter().map(|&r| b.expr_stmt(r)));
    let ctx = context(b, vec![], statements);
    let extractor = TypeExtractor::new(&ctx);

    assert_types(
        &extractor,
        &[
            (refs[0], "int"),
            (refs[1], "double"),
            (refs[2], "java.lang.String"),
            (refs[3], "java.lang.String"),
            (refs[4], "java.lang.Object"),
            (x_decl, "int"),
            (s_decl, "java.lang.String"),
        ],
    );
}

#[test]
fn operators() {
    let mut b = AstBuilder::new();
    let mut cases = Vec::new();
    let mut case = |b: &mut AstBuilder, lhs: NodeId, op: BinaryOp, rhs: NodeId, ty: &'static str| {
        let node = b.binary(lhs, op, rhs);
        cases.push((node, ty));
        node
    };

    let (l, r) = (b.string("a"), b.int("1"));
    case(&mut b, l, BinaryOp::Plus, r, "java.lang.String");
    let (l, r) = (b.int("1"), b.string("a"));
    case(&mut b, l, BinaryOp::Plus, r, "java.lang.String");
    let (one, two) = (b.int("1"), b.int("2"));
    let inner = case(&mut b, one, BinaryOp::Plus, two, "int");
    let r = b.string("a");
    case(&mut b, inner, BinaryOp::Plus, r, "java.lang.String");
    let part = b.var("who");
    let l = b.alloc(NodeKind::GString { parts: vec![part] });
    let r = b.int("1");
    case(&mut b, l, BinaryOp::Plus, r, "java.lang.String");
    let (l, r) = (b.string("ab"), b.int("2"));
    case(&mut b, l, BinaryOp::Multiply, r, "java.lang.String");
    let (l, r) = (b.string("hello"), b.var("undefinedThing"));
    case(&mut b, l, BinaryOp::Plus, r, "java.lang.String");
    let (l, r) = (b.var("undefinedThing"), b.string("!"));
    case(&mut b, l, BinaryOp::Plus, r, "java.lang.String");

    let (l, r) = (b.int("1"), b.int("2L"));
    case(&mut b, l, BinaryOp::Plus, r, "long");
    let (l, r) = (b.int("1"), b.decimal("1.5"));
    case(&mut b, l, BinaryOp::Multiply, r, "double");
    let (l, r) = (b.decimal("1.5G"), b.int("1"));
    case(&mut b, l, BinaryOp::Plus, r, "java.math.BigDecimal");
    let (l, r) = (b.decimal("1.5G"), b.int("2G"));
    case(&mut b, l, BinaryOp::Minus, r, "java.lang.Number");
    let integer = b.var("Integer");
    let arg = b.int("1");
    let boxed = b.call(Some(integer), "valueOf", vec![arg]);
    let r = b.int("2");
    case(&mut b, boxed, BinaryOp::Plus, r, "int");

    let (l, r) = (b.int("1"), b.int("2"));
    case(&mut b, l, BinaryOp::Less, r, "boolean");
    let (l, r) = (b.int("1"), b.int("2"));
    case(&mut b, l, BinaryOp::Compare, r, "int");
    let (l, r) = (b.string("a"), b.string("b"));
    case(&mut b, l, BinaryOp::RegexFind, r, "java.util.regex.Matcher");
    let (l, r) = (b.string("a"), b.string("b"));
    case(&mut b, l, BinaryOp::RegexMatch, r, "boolean");
    let (l, r) = (b.int("1"), b.int("2"));
    case(&mut b, l, BinaryOp::LeftShift, r, "int");
    let element = b.int("1");
    let l = b.list(vec![element]);
    let r = b.int("2");
    case(&mut b, l, BinaryOp::LeftShift, r, "java.util.ArrayList");
    let (l, r) = (b.boolean(true), b.boolean(false));
    case(&mut b, l, BinaryOp::BitAnd, r, "boolean");
    let (l, r) = (b.var("target"), b.string("s"));
    case(&mut b, l, BinaryOp::Assign, r, "java.lang.String");

    let operand = b.int("1");
    let not = b.alloc(NodeKind::Unary {
        op: UnaryOp::Not,
        operand,
    });
    let operand = b.int("1L");
    let negate = b.alloc(NodeKind::Unary {
        op: UnaryOp::Negate,
        operand,
    });
    cases.push((not, "boolean"));
    cases.push((negate, "long"));

    let exprs: Vec<NodeId> = cases.iter().map(|&(node, _)| node).collect();
    let ctx = script(b, &exprs);
    assert_types(&TypeExtractor::new(&ctx), &cases);
}

#[test]
fn arithmetic_needs_two_numbers() {
    let mut b = AstBuilder::new();
    let (a, c) = (b.int("1"), b.int("2"));
    let (l, r) = (b.list(vec![a]), b.list(vec![c]));
    let lists = b.binary(l, BinaryOp::Minus, r);
    let (l, r) = (b.int("1"), b.boolean(true));
    let int_and_boolean = b.binary(l, BinaryOp::Plus, r);
    let element = b.int("1");
    let (l, r) = (b.list(vec![element]), b.int("2"));
    let list_and_int = b.binary(l, BinaryOp::Plus, r);
    let (l, r) = (b.int("1"), b.var("undefinedThing"));
    let int_and_unknown = b.binary(l, BinaryOp::Plus, r);

    let exprs = [lists, int_and_boolean, list_and_int, int_and_unknown];
    let ctx = script(b, &exprs);
    let extractor = TypeExtractor::new(&ctx);
    for expr in exprs {
        let err = extractor.extract_type(expr).unwrap_err();
        assert!(err.is_unresolved(), "{expr:?}: {err}");
    }
}

#[test]
fn unary_operators_promote_small_integrals() {
    let mut b = AstBuilder::new();
    let unary = |b: &mut AstBuilder, op: UnaryOp, ty: &str, literal: &str| {
        let expr = b.int(literal);
        let operand = b.alloc(NodeKind::Cast {
            ty: TypeRef::new(ty),
            expr,
        });
        b.alloc(NodeKind::Unary { op, operand })
    };
    let complement = unary(&mut b, UnaryOp::BitNot, "char", "1");
    let negated_byte = unary(&mut b, UnaryOp::Negate, "byte", "1");
    let plus_short = unary(&mut b, UnaryOp::Plus, "short", "1");
    let negated_long = unary(&mut b, UnaryOp::Negate, "long", "1");
    let negated_boxed = unary(&mut b, UnaryOp::Negate, "Integer", "1");
    let incremented = unary(&mut b, UnaryOp::PreIncrement, "byte", "1");

    let cases = [
        (complement, "int"),
        (negated_byte, "int"),
        (plus_short, "int"),
        (negated_long, "long"),
        (negated_boxed, "java.lang.Integer"),
        (incremented, "byte"),
    ];
    let exprs: Vec<NodeId> = cases.iter().map(|&(node, _)| node).collect();
    let ctx = script(b, &exprs);
    assert_types(&TypeExtractor::new(&ctx), &cases);
}

#[test]
fn indexing_and_array_length() {
    let mut b = AstBuilder::new();
    let null = b.null();
    let arr_decl = b.local("arr", Some("int[]"), Some(null));
    let (text, zero) = (b.string("abc"), b.int("0"));
    let char_at = b.binary(text, BinaryOp::Index, zero);
    let (element, zero) = (b.int("1"), b.int("0"));
    let list = b.list(vec![element]);
    let list_at = b.binary(list, BinaryOp::Index, zero);
    let (arr, zero) = (b.var("arr"), b.int("0"));
    let arr_at = b.binary(arr, BinaryOp::Index, zero);
    let arr = b.var("arr");
    let length = b.prop(arr, "length");

    let mut statements = vec![arr_decl];
    statements.extend([char_at, list_at, arr_at, length].map(|e| b.expr_stmt(e)));
    let ctx = context(b, vec![], statements);

    assert_types(
        &TypeExtractor::new(&ctx),
        &[
            (char_at, "java.lang.String"),
            (list_at, "java.lang.Object"),
            (arr_at, "int"),
            (length, "int"),
        ],
    );
}

#[test]
fn branches_merge_through_lub() {
    let mut b = AstBuilder::new();
    let ternary = |b: &mut AstBuilder, then_branch: NodeId, else_branch: NodeId| {
        let condition = b.boolean(true);
        b.alloc(NodeKind::Ternary {
            condition,
            then_branch,
            else_branch,
        })
    };
    let (t, e) = (b.int("1"), b.decimal("2.5"));
    let numbers = ternary(&mut b, t, e);
    let (t, e) = (b.int("1"), b.string("a"));
    let mixed = ternary(&mut b, t, e);
    let (t, e) = (b.null(), b.int("1"));
    let nullable = ternary(&mut b, t, e);
    let (value, fallback) = (b.null(), b.string("x"));
    let elvis = b.alloc(NodeKind::Elvis { value, fallback });

    let ctx = script(b, &[numbers, mixed, nullable, elvis]);
    assert_types(
        &TypeExtractor::new(&ctx),
        &[
            (numbers, "double"),
            (mixed, "java.io.Serializable"),
            (nullable, "int"),
            (elvis, "java.lang.String"),
        ],
    );
}

/// ```groovy
/// class Shop {
///     String name
///     def getTotal() { return 42 }
///     def describe() { return name + "!" }
///     def label() { this }
///     def spin() { return spin() }
/// }
/// def shop = new Shop()
/// ```
struct ShopFixture {
    ctx: ResolutionContext,
    name: NodeId,
    total: NodeId,
    safe_total: NodeId,
    describe: NodeId,
    label: NodeId,
    spin: NodeId,
    class_of: NodeId,
    missing: NodeId,
}

fn shop_fixture() -> ShopFixture {
    let mut b = AstBuilder::new();
    let name_property = b.property("name", Some("String"), None);
    let forty_two = b.int("42");
    let ret = b.ret(Some(forty_two));
    let get_total = b.method("getTotal", None, vec![], vec![ret]);
    let (name_ref, bang) = (b.var("name"), b.string("!"));
    let concat = b.binary(name_ref, BinaryOp::Plus, bang);
    let ret = b.ret(Some(concat));
    let describe_method = b.method("describe", None, vec![], vec![ret]);
    let this_ref = b.var("this");
    let this_stmt = b.expr_stmt(this_ref);
    let label_method = b.method("label", None, vec![], vec![this_stmt]);
    let again = b.call(None, "spin", vec![]);
    let ret = b.ret(Some(again));
    let spin_method = b.method("spin", None, vec![], vec![ret]);
    let shop = b.class(
        "Shop",
        vec![name_property, get_total, describe_method, label_method, spin_method],
    );

    let new_shop = b.new_instance("Shop", vec![]);
    let shop_decl = b.local("shop", None, Some(new_shop));
    let r = b.var("shop");
    let name = b.prop(r, "name");
    let r = b.var("shop");
    let total = b.prop(r, "total");
    let receiver = b.var("shop");
    let safe_total = b.alloc(NodeKind::Property {
        receiver,
        name: "total".into(),
        safe: true,
    });
    let r = b.var("shop");
    let describe = b.call(Some(r), "describe", vec![]);
    let r = b.var("shop");
    let label = b.call(Some(r), "label", vec![]);
    let r = b.var("shop");
    let spin = b.call(Some(r), "spin", vec![]);
    let r = b.var("shop");
    let class_of = b.call(Some(r), "getClass", vec![]);
    let r = b.var("shop");
    let missing = b.prop(r, "missing");

    let mut statements = vec![shop_decl];
    statements.extend(
        [name, total, safe_total, describe, label, spin, class_of, missing].map(|e| b.expr_stmt(e)),
    );
    ShopFixture {
        ctx: context(b, vec![shop], statements),
        name,
        total,
        safe_total,
        describe,
        label,
        spin,
        class_of,
        missing,
    }
}

#[test]
fn members_of_source_classes() {
    let f = shop_fixture();
    let extractor = TypeExtractor::new(&f.ctx);
    assert_types(
        &extractor,
        &[
            (f.name, "java.lang.String"),
            (f.total, "int"),
            (f.safe_total, "java.lang.Integer"),
            (f.describe, "java.lang.String"),
            (f.label, "Shop"),
            (f.spin, "java.lang.Object"),
            (f.class_of, "java.lang.Class"),
            (f.missing, "<unknown>"),
        ],
    );
}

#[test]
fn declarations_behind_value_receivers() {
    let f = shop_fixture();
    let extractor = TypeExtractor::new(&f.ctx);

    let name = extractor.resolve_declaration(f.name).expect("shop.name");
    assert_eq!(name.kind(), DeclarationKind::Field);
    assert_eq!(name.qualified_name(), "Shop.name");

    let total = extractor.resolve_declaration(f.total).expect("shop.total");
    assert_eq!(total.kind(), DeclarationKind::Method);
    assert_eq!(total.name(), "getTotal");

    let describe = extractor.resolve_declaration(f.describe).expect("shop.describe()");
    assert_eq!(describe.qualified_name(), "Shop.describe");
    assert_eq!(extractor.resolve_declaration(f.missing), None);
}

/// ```groovy
/// class Tally {
///     def count = 42
///     def read() { count; this.count }
/// }
/// new Tally().count
/// ```
#[test]
fn fields_refine_however_they_are_spelled() {
    let mut b = AstBuilder::new();
    let forty_two = b.int("42");
    let count = b.property("count", None, Some(forty_two));
    let bare = b.var("count");
    let this_ref = b.var("this");
    let qualified = b.prop(this_ref, "count");
    let (bare_stmt, qualified_stmt) = (b.expr_stmt(bare), b.expr_stmt(qualified));
    let read = b.method("read", None, vec![], vec![bare_stmt, qualified_stmt]);
    let tally = b.class("Tally", vec![count, read]);
    let new_tally = b.new_instance("Tally", vec![]);
    let external = b.prop(new_tally, "count");
    let stmt = b.expr_stmt(external);
    let ctx = context(b, vec![tally], vec![stmt]);

    assert_types(
        &TypeExtractor::new(&ctx),
        &[(bare, "int"), (qualified, "int"), (external, "int"), (count, "int")],
    );
}

#[test]
fn unknown_declared_types_are_unresolved() {
    let mut b = AstBuilder::new();
    let null = b.null();
    let x_decl = b.local("x", Some("NoSuchType"), Some(null));
    let null = b.null();
    let xs_decl = b.local("xs", Some("NoSuchType[]"), Some(null));
    let (x, xs) = (b.var("x"), b.var("xs"));
    let mut statements = vec![x_decl, xs_decl];
    statements.extend([x, xs].map(|e| b.expr_stmt(e)));
    let ctx = context(b, vec![], statements);
    let extractor = TypeExtractor::new(&ctx);

    assert_eq!(
        extractor.extract_type(x),
        Err(ResolutionFailure::Unresolved("NoSuchType".into()))
    );
    assert_eq!(
        extractor.extract_type(xs),
        Err(ResolutionFailure::Unresolved("NoSuchType[]".into()))
    );
    assert_eq!(extractor.describe(x_decl), "<unknown>");
    assert_eq!(extractor.describe(xs_decl), "<unknown>");
}

#[test]
fn static_members_types_and_casts() {
    let mut b = AstBuilder::new();
    let integer = b.var("Integer");
    let max = b.prop(integer, "MAX_VALUE");
    let integer = b.var("Integer");
    let text = b.string("1");
    let parse = b.call(Some(integer), "parseInt", vec![text]);
    let class_ref = b.var("Integer");
    let literal = b.alloc(NodeKind::ClassLiteral {
        ty: TypeRef::new("String"),
    });
    let value = b.int("1");
    let cast = b.alloc(NodeKind::Cast {
        ty: TypeRef::new("Number"),
        expr: value,
    });
    let new_list = b.new_instance("ArrayList<String>", vec![]);
    let new_array = b.new_instance("String[]", vec![]);
    let java = b.var("java");
    let util = b.prop(java, "util");
    let qualified = b.prop(util, "List");
    let length = b.call(Some(new_list), "size", vec![]);

    let ctx = script(
        b,
        &[max, parse, class_ref, literal, cast, length, new_array, qualified],
    );
    assert_types(
        &TypeExtractor::new(&ctx),
        &[
            (max, "int"),
            (parse, "int"),
            (class_ref, "java.lang.Class"),
            (literal, "java.lang.Class"),
            (cast, "java.lang.Number"),
            (new_list, "java.util.ArrayList"),
            (length, "int"),
            (new_array, "java.lang.String[]"),
            (qualified, "java.lang.Class"),
        ],
    );
}

#[test]
fn enum_constants() {
    let mut b = AstBuilder::new();
    let red = b.alloc(NodeKind::EnumConstant { name: "RED".into() });
    let color = b.type_decl("Color", ClassKind::Enum, None, &[], vec![red]);
    let receiver = b.var("Color");
    let reference = b.prop(receiver, "RED");
    let stmt = b.expr_stmt(reference);
    let ctx = context(b, vec![color], vec![stmt]);

    assert_types(
        &TypeExtractor::new(&ctx),
        &[(reference, "Color"), (red, "Color")],
    );
}

#[test]
fn closures_and_maps() {
    let mut b = AstBuilder::new();
    let one = b.int("1");
    let one_stmt = b.expr_stmt(one);
    let constant = b.closure(vec![], vec![one_stmt]);
    let it = b.var("it");
    let it_stmt = b.expr_stmt(it);
    let identity = b.closure(vec![], vec![it_stmt]);
    let text = b.string("a");
    let early = b.ret(Some(text));
    let two = b.int("2");
    let two_stmt = b.expr_stmt(two);
    let mixed = b.closure(vec![], vec![early, two_stmt]);
    let (key, value) = (b.string("a"), b.int("1"));
    let map = b.map(vec![(key, value)]);
    let entry = b.prop(map, "anything");

    let ctx = script(b, &[constant, identity, mixed, entry]);
    let extractor = TypeExtractor::new(&ctx);

    assert_eq!(extractor.describe(constant), "groovy.lang.Closure");
    assert_eq!(extractor.closure_return_type(constant), Ok(ResolvedType::int()));
    assert_eq!(extractor.closure_return_type(identity), Ok(ResolvedType::object()));
    assert_eq!(
        extractor.closure_return_type(mixed),
        Ok(ResolvedType::reference("java.io.Serializable"))
    );
    assert_eq!(extractor.describe(entry), "java.lang.Object");
}

#[test]
fn failures_are_values() {
    let mut b = AstBuilder::new();
    let unknown = b.var("nowhere");
    let broken = b.alloc(NodeKind::Error);
    let ctx = script(b, &[unknown, broken]);
    let extractor = TypeExtractor::new(&ctx);

    assert_eq!(
        extractor.extract_type(unknown),
        Err(ResolutionFailure::Unresolved("nowhere".into()))
    );
    assert_eq!(extractor.extract_type(broken), Err(ResolutionFailure::Untyped));
    assert_eq!(
        extractor.extract_type(ctx.ast().root()),
        Err(ResolutionFailure::Untyped)
    );
    assert_eq!(extractor.describe(unknown), "<unknown>");
    assert!(!ctx.type_cache().contains(&ctx.node_key(unknown)));
}

#[test]
fn results_are_cached_per_node() {
    let mut b = AstBuilder::new();
    let (l, r) = (b.int("1"), b.decimal("2.0"));
    let sum = b.binary(l, BinaryOp::Plus, r);
    let ctx = script(b, &[sum]);
    let extractor = TypeExtractor::new(&ctx);

    assert_eq!(extractor.describe(sum), "double");
    assert!(ctx.type_cache().contains(&ctx.node_key(sum)));
    let hits = ctx.type_cache().stats().hits;
    assert_eq!(TypeExtractor::new(&ctx).describe(sum), "double");
    assert_eq!(ctx.type_cache().stats().hits, hits + 1);
}
