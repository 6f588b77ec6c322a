use miette::Diagnostic;
use thiserror::Error;

/// The result type specialized to unification errors.
pub type UnifyResult<T = ()> = Result<T, Box<UnifyError>>;

/// The three ways unification and canonicalization can fail.
///
/// All three are deterministic for the same inputs and none is retried or
/// swallowed internally. Whether a failure means "this specialization does
/// not apply" or a hard compiler error is decided by the caller, which
/// pattern-matches on the variant. The rendered operands are produced through
/// the strategy's render capability.
#[derive(Error, Diagnostic, Debug, Clone, PartialEq, Eq)]
pub enum UnifyError {
    /// The two sides can provably never be made equal: mismatched term
    /// shapes, mismatched arities, a literal element required where only list
    /// variables remain, or a required syntactic equality that does not hold.
    #[error("The following expressions cannot be unified:\n  1: {lhs}\n  2: {rhs}\n")]
    #[diagnostic(code("U-001"))]
    CannotUnify { lhs: String, rhs: String },
    /// The equations are satisfiable by more than one structurally distinct
    /// substitution and the engine declines to guess: both sides of a
    /// sequence equation still contain list variables interleaved with
    /// literal elements, and the sides are not already identical.
    #[error("Cannot decide how to match the sequences {lhs} and {rhs}")]
    #[diagnostic(
        code("U-002"),
        help("Multiple list variables leave more than one possible split.")
    )]
    AmbiguousMatch { lhs: String, rhs: String },
    /// The raw bindings admit no acyclic orientation in which every key is a
    /// permitted binding target.
    #[error("The bindings cannot be brought into canonical form: {reason}")]
    #[diagnostic(code("U-003"))]
    CannotCanonicalize { reason: String },
}

impl UnifyError {
    pub fn cannot_unify(lhs: String, rhs: String) -> Box<Self> {
        Box::new(UnifyError::CannotUnify { lhs, rhs })
    }

    pub fn ambiguous_match(lhs: String, rhs: String) -> Box<Self> {
        Box::new(UnifyError::AmbiguousMatch { lhs, rhs })
    }

    pub fn no_binding_target(members: &[String]) -> Box<Self> {
        Box::new(UnifyError::CannotCanonicalize {
            reason: format!(
                "the equated variables {} admit no permitted binding target",
                members.join(" = ")
            ),
        })
    }

    pub fn forbidden_binding(name: &str, rendered: String) -> Box<Self> {
        Box::new(UnifyError::CannotCanonicalize {
            reason: format!(
                "{name} is bound to {rendered} but is not a permitted binding target"
            ),
        })
    }

    pub fn conflicting_orientation(bound: &str, representative: &str) -> Box<Self> {
        Box::new(UnifyError::CannotCanonicalize {
            reason: format!(
                "{bound} is bound to a non-variable expression but must stay equated with {representative}"
            ),
        })
    }

    pub fn cyclic_binding(name: &str, rendered: String) -> Box<Self> {
        Box::new(UnifyError::CannotCanonicalize {
            reason: format!("the binding {name} := {rendered} is cyclic"),
        })
    }
}
