//! Structural decomposition of equations into a raw binding map.
//!
//! The inliner matches a concrete call site against a generic definition's
//! pattern by handing this module a list of equations. The equations are
//! consumed strictly in input order; every equation either extends the
//! substitution being built, refines it by unifying against an existing
//! binding, or fails. Sequences are matched variadically: a list variable may
//! capture a run of zero or more sibling elements.
//!
//! No substitution closure happens here. A variable bound to an expression
//! that mentions other, not yet substituted variables is stored as given;
//! resolving chains, cycles and re-orientation is the job of
//! [crate::canonicalize].

use crate::HashSet;
use crate::exprs::{Elem, Eqn, Expr, Substitution};
use crate::result::{UnifyError, UnifyResult};
use crate::strategy::Strategy;

/// Convert a sequence of equations into a raw binding map.
///
/// Fails with [UnifyError::CannotUnify] if the two sides of some equation can
/// never be made equal, and with [UnifyError::AmbiguousMatch] if a sequence
/// equation admits more than one split between its list variables.
pub fn unify<S: Strategy>(
    eqns: Vec<Eqn<S::Term>>,
    strategy: &S,
) -> UnifyResult<Substitution<S::Term>> {
    log::trace!("Unifying {} equations", eqns.len());
    let mut ctx = Ctx::new(strategy);
    for eqn in &eqns {
        ctx.unify_eqn(eqn)?;
    }
    Ok(ctx.subst)
}

struct Ctx<'a, S: Strategy> {
    strategy: &'a S,
    /// Partial solution computed from the equations processed so far.
    subst: Substitution<S::Term>,
    /// A cache of solved equations. A solved equation is entailed by the
    /// substitution from then on, so it can be skipped when it comes up
    /// again.
    done: HashSet<Eqn<S::Term>>,
}

impl<'a, S: Strategy> Ctx<'a, S> {
    fn new(strategy: &'a S) -> Self {
        Self { strategy, subst: Substitution::empty(), done: HashSet::default() }
    }

    fn unify_eqn(&mut self, eqn: &Eqn<S::Term>) -> UnifyResult {
        if self.done.contains(eqn) {
            return Ok(());
        }
        let Eqn { lhs, rhs } = eqn;
        match (lhs, rhs) {
            (Expr::Elem(lhs), Expr::Elem(rhs)) => self.unify_elems(lhs, rhs)?,
            (Expr::Seq(lhs), Expr::Seq(rhs)) => self.unify_seqs(lhs, rhs)?,
            (Expr::Elem(lhs), Expr::Seq(rhs)) => self.unify_elem_seq(lhs, rhs, true)?,
            (Expr::Seq(lhs), Expr::Elem(rhs)) => self.unify_elem_seq(rhs, lhs, false)?,
        }
        self.done.insert(eqn.clone());
        Ok(())
    }

    fn unify_elems(&mut self, lhs: &Elem<S::Term>, rhs: &Elem<S::Term>) -> UnifyResult {
        match (lhs, rhs) {
            // A variable unified with itself contributes no binding.
            (Elem::Var(lhs), Elem::Var(rhs)) if lhs == rhs => Ok(()),
            // The left operand becomes the binding key. A list variable
            // meeting a bare element captures it as a singleton sequence,
            // without resolving the element any further.
            (Elem::Var(name), _) => {
                let value = if self.strategy.is_list_var(name) {
                    Expr::Seq(vec![rhs.clone()])
                } else {
                    Expr::Elem(rhs.clone())
                };
                self.bind(name, value)
            }
            // The left operand is a term, so the right variable becomes the
            // key instead.
            (Elem::Term(_), Elem::Var(name)) => {
                let value = if self.strategy.is_list_var(name) {
                    Expr::Seq(vec![lhs.clone()])
                } else {
                    Expr::Elem(lhs.clone())
                };
                self.bind(name, value)
            }
            (Elem::Term(lhs), Elem::Term(rhs)) => self.unify_terms(lhs, rhs),
        }
    }

    fn unify_terms(&mut self, lhs: &S::Term, rhs: &S::Term) -> UnifyResult {
        if self.strategy.requires_syntactic_equality(lhs)
            || self.strategy.requires_syntactic_equality(rhs)
        {
            return if lhs == rhs {
                Ok(())
            } else {
                Err(UnifyError::cannot_unify(
                    self.strategy.render(lhs),
                    self.strategy.render(rhs),
                ))
            };
        }
        if !self.strategy.same_shape(lhs, rhs) {
            return Err(UnifyError::cannot_unify(
                self.strategy.render(lhs),
                self.strategy.render(rhs),
            ));
        }
        // Decomposing into a sequence equation makes list variables inside
        // argument lists capture runs of arguments. Without list variables
        // this degenerates to pairwise unification of the children, with
        // mismatched arities failing below.
        self.unify_seqs(&self.strategy.children(lhs), &self.strategy.children(rhs))
    }

    /// A bare element against a sequence. List variables capture the whole
    /// sequence; an ordinary variable can only be bound to a sequence that
    /// has exactly one element. A bare term is matched like a singleton
    /// sequence.
    fn unify_elem_seq(
        &mut self,
        elem: &Elem<S::Term>,
        seq: &[Elem<S::Term>],
        elem_on_left: bool,
    ) -> UnifyResult {
        match elem {
            Elem::Var(name) if self.strategy.is_list_var(name) => {
                self.bind(name, Expr::Seq(seq.to_vec()))
            }
            Elem::Var(name) => match seq {
                [single] => self.bind(name, Expr::Elem(single.clone())),
                _ => Err(UnifyError::cannot_unify(
                    elem.render(self.strategy),
                    self.render_elems(seq),
                )),
            },
            Elem::Term(_) => {
                let singleton = std::slice::from_ref(elem);
                if elem_on_left {
                    self.unify_seqs(singleton, seq)
                } else {
                    self.unify_seqs(seq, singleton)
                }
            }
        }
    }

    /// Variadic sequence matching.
    fn unify_seqs(&mut self, lhs: &[Elem<S::Term>], rhs: &[Elem<S::Term>]) -> UnifyResult {
        let mut lhs = lhs;
        let mut rhs = rhs;

        // Unify and drop matching elements at the front, then at the back,
        // until a list variable blocks further trimming.
        while let (Some(first_l), Some(first_r)) = (lhs.first(), rhs.first()) {
            if first_l.is_list_var(self.strategy) || first_r.is_list_var(self.strategy) {
                break;
            }
            self.unify_elems(first_l, first_r)?;
            lhs = &lhs[1..];
            rhs = &rhs[1..];
        }
        while let (Some(last_l), Some(last_r)) = (lhs.last(), rhs.last()) {
            if last_l.is_list_var(self.strategy) || last_r.is_list_var(self.strategy) {
                break;
            }
            self.unify_elems(last_l, last_r)?;
            lhs = &lhs[..lhs.len() - 1];
            rhs = &rhs[..rhs.len() - 1];
        }

        if lhs.is_empty() && rhs.is_empty() {
            return Ok(());
        }

        // One side exhausted: everything left on the other side must be a
        // list variable bound to the empty sequence.
        if lhs.is_empty() || rhs.is_empty() {
            let rest = if lhs.is_empty() { rhs } else { lhs };
            for elem in rest {
                match elem {
                    Elem::Var(name) if self.strategy.is_list_var(name) => {
                        self.bind(name, Expr::Seq(Vec::new()))?;
                    }
                    _ => {
                        return Err(UnifyError::cannot_unify(
                            self.render_elems(lhs),
                            self.render_elems(rhs),
                        ));
                    }
                }
            }
            return Ok(());
        }

        // Identical remainders are trivially satisfied. This also covers the
        // case of the same single list variable on both sides.
        if self.identical_seqs(lhs, rhs) {
            return Ok(());
        }

        // A side reduced to a single list variable captures the entire
        // remaining other side, without decomposing its elements.
        if let [Elem::Var(name)] = lhs {
            if self.strategy.is_list_var(name) {
                return self.bind(name, Expr::Seq(rhs.to_vec()));
            }
        }
        if let [Elem::Var(name)] = rhs {
            if self.strategy.is_list_var(name) {
                return self.bind(name, Expr::Seq(lhs.to_vec()));
            }
        }

        // Both remainders still interleave list variables with literal
        // elements: the split is not uniquely determined.
        Err(UnifyError::ambiguous_match(self.render_elems(lhs), self.render_elems(rhs)))
    }

    /// Bind a variable, or refine the substitution by unifying against the
    /// binding it already has.
    fn bind(&mut self, name: &str, value: Expr<S::Term>) -> UnifyResult {
        match self.subst.get(name) {
            Some(existing) => {
                let existing = existing.clone();
                self.unify_eqn(&Eqn { lhs: existing, rhs: value })
            }
            None => {
                log::trace!("Binding {} := {}", name, value.render(self.strategy));
                self.subst.insert(name.to_owned(), value);
                Ok(())
            }
        }
    }

    fn identical_seqs(&self, lhs: &[Elem<S::Term>], rhs: &[Elem<S::Term>]) -> bool {
        lhs.len() == rhs.len()
            && lhs.iter().zip(rhs).all(|(lhs, rhs)| self.identical_elems(lhs, rhs))
    }

    fn identical_elems(&self, lhs: &Elem<S::Term>, rhs: &Elem<S::Term>) -> bool {
        match (lhs, rhs) {
            (Elem::Var(lhs), Elem::Var(rhs)) => lhs == rhs,
            (Elem::Term(lhs), Elem::Term(rhs)) => {
                if self.strategy.requires_syntactic_equality(lhs)
                    || self.strategy.requires_syntactic_equality(rhs)
                {
                    lhs == rhs
                } else {
                    self.strategy.same_shape(lhs, rhs)
                        && self.identical_seqs(
                            &self.strategy.children(lhs),
                            &self.strategy.children(rhs),
                        )
                }
            }
            _ => false,
        }
    }

    fn render_elems(&self, elems: &[Elem<S::Term>]) -> String {
        Expr::Seq(elems.to_vec()).render(self.strategy)
    }
}
