//! The capability set the engine is generic over.

use std::hash::Hash;

use crate::exprs::Elem;

/// How the engine compares, decomposes and rebuilds the caller's terms, and
/// how it classifies variables.
///
/// The engine is parameterized statically over this trait; the recursive
/// decomposition is the hot path of the instantiation inliner, so there is no
/// dynamic dispatch. The `Eq + Hash` bounds on the term type back the cache
/// of already-solved equations and the literal-identity check for terms that
/// require syntactic equality.
pub trait Strategy {
    type Term: Clone + Eq + Hash;

    /// Whether two terms could unify at the top level, e.g. because they
    /// carry the same constructor tag. Children are not inspected, and
    /// metadata that is irrelevant to matching must be ignored here.
    fn same_shape(&self, lhs: &Self::Term, rhs: &Self::Term) -> bool;

    /// The ordered children of a term.
    fn children(&self, term: &Self::Term) -> Vec<Elem<Self::Term>>;

    /// A new term with `term`'s tag and the given children. Must not mutate
    /// `term`; unchanged subtrees may be shared.
    fn rebuild(&self, term: &Self::Term, children: Vec<Elem<Self::Term>>) -> Self::Term;

    /// Whether the named variable may capture a run of zero or more sibling
    /// elements instead of a single element.
    fn is_list_var(&self, name: &str) -> bool;

    /// Whether the named variable is permitted as a key of a canonical
    /// substitution. [crate::canonicalize] re-orients bindings so that
    /// variables for which this is false appear only in values.
    fn may_be_binding_target(&self, name: &str) -> bool;

    /// Terms for which two instances unify only if they are literally
    /// identical. No structural decomposition is attempted for them, even if
    /// their shapes match; an escape hatch for opaque terms.
    fn requires_syntactic_equality(&self, term: &Self::Term) -> bool;

    /// Render a term for diagnostics. Has no effect on control flow.
    fn render(&self, term: &Self::Term) -> String;
}
