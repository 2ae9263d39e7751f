//! Helpers for the three spellings of a JVM class name.
//!
//! - internal: `java/util/Map$Entry` (classfiles)
//! - binary: `java.util.Map$Entry` (class loaders, solver keys)
//! - canonical: `java.util.Map.Entry` (source text, `describe()`)

pub fn internal_to_binary(internal: &str) -> String {
    internal.replace('/', ".")
}

pub fn binary_to_internal(binary: &str) -> String {
    binary.replace('.', "/")
}

pub fn canonical_name(binary: &str) -> String {
    binary.replace('$', ".")
}

/// The last segment of a dotted or nested name (`java.util.Map$Entry` → `Entry`).
pub fn simple_name(name: &str) -> &str {
    let start = name.rfind(['.', '$']).map_or(0, |idx| idx + 1);
    &name[start..]
}

/// The package part of a binary name, empty for the default package.
pub fn package_name(binary: &str) -> &str {
    let outer = binary.split('$').next().unwrap_or(binary);
    outer.rsplit_once('.').map_or("", |(pkg, _)| pkg)
}

/// Candidate binary names for a dotted name that may spell nested classes.
///
/// `a.b.Outer.Inner` yields `a.b.Outer.Inner`, `a.b.Outer$Inner`, `a.b$Outer$Inner`, ... in
/// that order, so the longest package interpretation is tried first.
pub fn binary_name_variants(name: &str) -> Vec<String> {
    let mut out = vec![name.to_string()];
    let mut current = name.to_string();
    while let Some(idx) = current.rfind('.') {
        let mut next = current.clone();
        next.replace_range(idx..idx + 1, "$");
        out.push(next.clone());
        current = next;
    }
    out
}
