//! Static type inference for Groovy expressions.
//!
//! [`TypeExtractor`] computes the type of any expression node of a unit bound in a
//! [`ResolutionContext`](groovy_resolve::ResolutionContext): literal types, numeric promotion,
//! string concatenation, branch merges through [`lub`], member types through the solver chain and
//! `def` refinement from initializers and return points. Failures are values
//! ([`ResolutionFailure`]), never panics, and one failing node does not affect its siblings.
//!
//! [`ResolutionSession`] assembles the solver chain and caches from an
//! [`EngineConfig`](groovy_config::EngineConfig).

mod extract;
mod failure;
mod lub;
mod promotion;
mod session;

pub use extract::TypeExtractor;
pub use failure::{InferResult, ResolutionFailure};
pub use lub::lub;
pub use promotion::{
    binary_numeric_promotion, numeric_operand, unary_numeric_promotion, NumericOperand,
};
pub use session::ResolutionSession;
