//! The low-level C++ template IR.
//!
//! The frontend lowers the typed host-language subset into this IR; the
//! instantiation inliner optimizes it by matching call sites against the
//! specialization patterns of template definitions. Matching itself lives in
//! the `templc-unifier` crate and is instantiated for this IR through
//! [MatchStrategy].

pub mod exprs;
pub mod matching;
pub mod print;

pub use exprs::{AtomicType, Instantiation, Literal, Param, TemplExpr, Verbatim};
pub use matching::MatchStrategy;
pub use print::Print;

pub type HashMap<K, V> = std::collections::HashMap<K, V, fxhash::FxBuildHasher>;
pub type HashSet<V> = fxhash::FxHashSet<V>;
