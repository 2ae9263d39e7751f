//! Numeric promotion for arithmetic operators.
//!
//! Primitives promote to the wider of the two ranks. `char` only widens to `int` and above, so it
//! meets `byte` and `short` at `int`. The same rule drives [`crate::lub`] over
//! primitives, so a branch merge and an arithmetic expression over the same operands agree.

use groovy_types::{is_subtype_name, well_known, PrimitiveType, ResolvedType, TypeSolver};

/// Wider of two numeric primitives; `None` unless both are numeric.
pub fn binary_numeric_promotion(a: PrimitiveType, b: PrimitiveType) -> Option<PrimitiveType> {
    let (rank_a, rank_b) = (a.rank()?, b.rank()?);
    if a == b {
        return Some(a);
    }
    let promoted = match rank_a.cmp(&rank_b) {
        std::cmp::Ordering::Greater => a,
        std::cmp::Ordering::Less => b,
        std::cmp::Ordering::Equal => PrimitiveType::Int,
    };
    if promoted == PrimitiveType::Char {
        return Some(PrimitiveType::Int);
    }
    Some(promoted)
}

/// Result type of shifts and of unary `-`, `+` and `~`: sub-`int` integrals become `int`.
pub fn unary_numeric_promotion(p: PrimitiveType) -> PrimitiveType {
    match p {
        PrimitiveType::Byte | PrimitiveType::Short | PrimitiveType::Char => PrimitiveType::Int,
        other => other,
    }
}

/// How an arithmetic operand participates in promotion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NumericOperand {
    /// A numeric primitive or a wrapper that unboxes to one.
    Primitive(PrimitiveType),
    /// A `java.lang.Number` subtype without a primitive form, like `BigDecimal`.
    Reference(ResolvedType),
}

pub fn numeric_operand(ty: &ResolvedType, solver: &dyn TypeSolver) -> Option<NumericOperand> {
    if let Some(p) = ty.unboxed().filter(|p| p.is_numeric()) {
        return Some(NumericOperand::Primitive(p));
    }
    match ty {
        ResolvedType::Reference(r)
            if r.binary_name() != well_known::OBJECT
                && is_subtype_name(r.binary_name(), well_known::NUMBER, solver) =>
        {
            Some(NumericOperand::Reference(ty.clone()))
        }
        _ => None,
    }
}
