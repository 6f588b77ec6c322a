//! Generic term unification and canonicalization.
//!
//! This crate is the matching engine of the template-instantiation inliner:
//! it decides whether a concrete call site matches a generic definition's
//! pattern, and if so, which substitution to apply. It is generic over the
//! caller's term type through the [Strategy] trait, so the same algorithm
//! serves every IR that needs pattern matching.
//!
//! The engine has two entry points that are usually composed:
//!
//! * [unify] turns a list of equations between expressions into a *raw*
//!   binding map by structural decomposition, including variadic matching of
//!   sequences that contain list variables.
//! * [canonicalize] reduces a raw binding map to a *canonical* one: acyclic,
//!   fully substituted, and keyed only on variables the strategy permits as
//!   binding targets.
//!
//! Both calls are pure: they read their inputs and the strategy, allocate a
//! fresh result, and return. Failures surface as the three variants of
//! [UnifyError]; the caller decides whether a failed match merely means that
//! a specialization does not apply.

pub mod canonicalize;
pub mod exprs;
pub mod result;
pub mod strategy;
pub mod unify;

pub use canonicalize::canonicalize;
pub use exprs::{Elem, Eqn, Expr, Substitution};
pub use result::{UnifyError, UnifyResult};
pub use strategy::Strategy;
pub use unify::unify;

#[cfg(test)]
pub(crate) mod testing;

pub type HashMap<K, V> = std::collections::HashMap<K, V, fxhash::FxBuildHasher>;
pub type HashSet<V> = fxhash::FxHashSet<V>;
