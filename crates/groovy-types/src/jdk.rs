//! Built-in model of the JDK and Groovy runtime types the inference rules rely on.
//!
//! This is deliberately small: enough hierarchy for assignability and least-upper-bound
//! computations over literals, collections and boxed numbers, plus the handful of members that
//! scripts commonly touch. A classpath solver supersedes it whenever a real JDK is available.

use crate::{
    well_known, DeclarationOrigin, FieldInfo, MethodInfo, PrimitiveType, ResolvedType,
    ResolvedTypeDeclaration,
};

fn class(name: &str) -> ResolvedTypeDeclaration {
    ResolvedTypeDeclaration::class(name).with_origin(DeclarationOrigin::Builtin)
}

fn interface(name: &str) -> ResolvedTypeDeclaration {
    ResolvedTypeDeclaration::interface(name).with_origin(DeclarationOrigin::Builtin)
}

fn r(name: &str) -> ResolvedType {
    ResolvedType::reference(name)
}

fn p(p: PrimitiveType) -> ResolvedType {
    ResolvedType::Primitive(p)
}

fn method(name: &str, params: Vec<ResolvedType>, ret: ResolvedType) -> MethodInfo {
    MethodInfo::new(name, params, ret)
}

fn boxed_number(prim: PrimitiveType) -> ResolvedTypeDeclaration {
    let boxed = prim.boxed_name();
    class(boxed)
        .extends(well_known::NUMBER)
        .implements("java.lang.Comparable")
        .with_field(FieldInfo::static_field("MAX_VALUE", p(prim)))
        .with_field(FieldInfo::static_field("MIN_VALUE", p(prim)))
        .with_method(MethodInfo::static_method("valueOf", vec![p(prim)], r(boxed)))
        .with_method(MethodInfo::static_method("valueOf", vec![r(well_known::STRING)], r(boxed)))
}

pub fn minimal_jdk() -> Vec<ResolvedTypeDeclaration> {
    use PrimitiveType::*;

    let string = || r(well_known::STRING);
    let object = || r(well_known::OBJECT);

    vec![
        class(well_known::OBJECT)
            .with_method(method("toString", vec![], string()))
            .with_method(method("hashCode", vec![], p(Int)))
            .with_method(method("equals", vec![object()], p(Boolean)))
            .with_method(method("getClass", vec![], r(well_known::CLASS))),
        interface(well_known::SERIALIZABLE),
        interface(well_known::CLONEABLE),
        interface("java.lang.Comparable")
            .with_type_parameter("T")
            .with_method(method("compareTo", vec![object()], p(Int))),
        interface("java.lang.CharSequence")
            .with_method(method("length", vec![], p(Int)))
            .with_method(method("charAt", vec![p(Int)], p(Char))),
        interface("java.lang.Runnable").with_method(method("run", vec![], p(Void))),
        interface("java.lang.Iterable")
            .with_type_parameter("T")
            .with_method(method("iterator", vec![], r("java.util.Iterator"))),
        interface("java.util.Iterator")
            .with_type_parameter("E")
            .with_method(method("hasNext", vec![], p(Boolean)))
            .with_method(method("next", vec![], object())),
        class(well_known::STRING)
            .implements(well_known::SERIALIZABLE)
            .implements("java.lang.Comparable")
            .implements("java.lang.CharSequence")
            .with_method(method("length", vec![], p(Int)))
            .with_method(method("isEmpty", vec![], p(Boolean)))
            .with_method(method("charAt", vec![p(Int)], p(Char)))
            .with_method(method("toUpperCase", vec![], string()))
            .with_method(method("toLowerCase", vec![], string()))
            .with_method(method("trim", vec![], string()))
            .with_method(method("substring", vec![p(Int)], string()))
            .with_method(method("substring", vec![p(Int), p(Int)], string()))
            .with_method(method("contains", vec![r("java.lang.CharSequence")], p(Boolean)))
            .with_method(method("split", vec![string()], ResolvedType::array_of(string())))
            .with_method(MethodInfo::static_method("valueOf", vec![object()], string())),
        class(well_known::CLASS)
            .with_type_parameter("T")
            .with_method(method("getName", vec![], string()))
            .with_method(method("getSimpleName", vec![], string())),
        class(well_known::ENUM)
            .with_type_parameter("E")
            .implements("java.lang.Comparable")
            .implements(well_known::SERIALIZABLE)
            .with_method(method("name", vec![], string()))
            .with_method(method("ordinal", vec![], p(Int))),
        class(well_known::NUMBER)
            .implements(well_known::SERIALIZABLE)
            .with_method(method("intValue", vec![], p(Int)))
            .with_method(method("longValue", vec![], p(Long)))
            .with_method(method("doubleValue", vec![], p(Double)))
            .with_method(method("floatValue", vec![], p(Float))),
        boxed_number(Byte),
        boxed_number(Short),
        boxed_number(Int).with_method(MethodInfo::static_method(
            "parseInt",
            vec![string()],
            p(Int),
        )),
        boxed_number(Long),
        boxed_number(Float),
        boxed_number(Double),
        class("java.lang.Boolean")
            .implements(well_known::SERIALIZABLE)
            .implements("java.lang.Comparable")
            .with_method(method("booleanValue", vec![], p(Boolean))),
        class("java.lang.Character")
            .implements(well_known::SERIALIZABLE)
            .implements("java.lang.Comparable")
            .with_method(method("charValue", vec![], p(Char))),
        class("java.lang.Void"),
        class(well_known::BIG_INTEGER)
            .extends(well_known::NUMBER)
            .implements("java.lang.Comparable"),
        class(well_known::BIG_DECIMAL)
            .extends(well_known::NUMBER)
            .implements("java.lang.Comparable"),
        interface("java.util.Collection")
            .with_type_parameter("E")
            .implements("java.lang.Iterable")
            .with_method(method("size", vec![], p(Int)))
            .with_method(method("isEmpty", vec![], p(Boolean)))
            .with_method(method("add", vec![object()], p(Boolean)))
            .with_method(method("contains", vec![object()], p(Boolean))),
        interface("java.util.List")
            .with_type_parameter("E")
            .implements("java.util.Collection")
            .with_method(method("get", vec![p(Int)], object())),
        interface("java.util.Set")
            .with_type_parameter("E")
            .implements("java.util.Collection"),
        interface("java.util.RandomAccess"),
        class("java.util.AbstractCollection")
            .with_type_parameter("E")
            .implements("java.util.Collection"),
        class("java.util.AbstractList")
            .with_type_parameter("E")
            .extends("java.util.AbstractCollection")
            .implements("java.util.List"),
        class(well_known::ARRAY_LIST)
            .with_type_parameter("E")
            .extends("java.util.AbstractList")
            .implements("java.util.List")
            .implements("java.util.RandomAccess")
            .implements(well_known::CLONEABLE)
            .implements(well_known::SERIALIZABLE),
        interface("java.util.Map")
            .with_type_parameter("K")
            .with_type_parameter("V")
            .with_method(method("size", vec![], p(Int)))
            .with_method(method("isEmpty", vec![], p(Boolean)))
            .with_method(method("get", vec![object()], object()))
            .with_method(method("put", vec![object(), object()], object()))
            .with_method(method("containsKey", vec![object()], p(Boolean)))
            .with_method(method("keySet", vec![], r("java.util.Set"))),
        class("java.util.AbstractMap")
            .with_type_parameter("K")
            .with_type_parameter("V")
            .implements("java.util.Map"),
        class("java.util.HashMap")
            .with_type_parameter("K")
            .with_type_parameter("V")
            .extends("java.util.AbstractMap")
            .implements("java.util.Map")
            .implements(well_known::CLONEABLE)
            .implements(well_known::SERIALIZABLE),
        class(well_known::LINKED_HASH_MAP)
            .with_type_parameter("K")
            .with_type_parameter("V")
            .extends("java.util.HashMap")
            .implements("java.util.Map"),
        class(well_known::MATCHER)
            .with_method(method("matches", vec![], p(Boolean)))
            .with_method(method("find", vec![], p(Boolean))),
        interface("groovy.lang.GroovyObject"),
        class(well_known::CLOSURE)
            .with_type_parameter("V")
            .implements("groovy.lang.GroovyObject")
            .implements("java.lang.Runnable")
            .implements(well_known::CLONEABLE)
            .implements(well_known::SERIALIZABLE)
            .with_method(method("call", vec![], object())),
        class(well_known::GSTRING)
            .implements("java.lang.Comparable")
            .implements("java.lang.CharSequence")
            .implements(well_known::SERIALIZABLE),
        interface("groovy.lang.Range")
            .with_type_parameter("T")
            .implements("java.util.List")
            .with_method(method("getFrom", vec![], object()))
            .with_method(method("getTo", vec![], object())),
        class(well_known::INT_RANGE)
            .extends("java.util.AbstractList")
            .implements("groovy.lang.Range")
            .with_method(method("getFromInt", vec![], p(Int)))
            .with_method(method("getToInt", vec![], p(Int))),
        class(well_known::OBJECT_RANGE)
            .extends("java.util.AbstractList")
            .implements("groovy.lang.Range"),
    ]
}
