use thiserror::Error;

use crate::PrimitiveType;

/// Caller contract violations. These are programmer errors, not data conditions: a well-behaved
/// caller boxes primitives before merging them with references and never asks for the least
/// upper bound of nothing.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TypeError {
    #[error("least upper bound of an empty type list")]
    EmptyLub,
    #[error("boolean cannot be merged with numeric type `{0}`")]
    BooleanNumericMix(PrimitiveType),
    #[error("primitive `{primitive}` cannot be merged with reference `{reference}` without boxing")]
    PrimitiveReferenceMix {
        primitive: PrimitiveType,
        reference: String,
    },
    #[error("`void` has no values to merge")]
    Void,
}
