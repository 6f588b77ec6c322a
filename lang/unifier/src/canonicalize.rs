//! Reduction of a raw binding map to its canonical form.
//!
//! Canonicalization does three things. Chains and cycles of pure
//! variable-to-variable equalities are collapsed onto a single representative
//! per equivalence class, re-orienting bindings so that variables which may
//! not be binding targets only ever appear as values. Every remaining binding
//! is then closed under substitution, so that no key of the map occurs in any
//! of its values. A raw map for which no such orientation exists fails with
//! [UnifyError::CannotCanonicalize]; nothing is silently dropped.
//!
//! The representative of an equivalence class is chosen with a last-write-
//! wins policy: merging the classes of `lhs := rhs` keeps the representative
//! of `rhs`'s class. The choice is arbitrary but deterministic, and it is
//! observable in which variable of a multi-way cycle stays free, so it must
//! not be changed lightly.

use crate::exprs::{Elem, Expr, Substitution};
use crate::result::{UnifyError, UnifyResult};
use crate::strategy::Strategy;
use crate::{HashMap, HashSet};

/// Reduce a raw binding map to a canonical one: acyclic, fully substituted,
/// and keyed only on variables the strategy permits as binding targets.
pub fn canonicalize<S: Strategy>(
    raw: Substitution<S::Term>,
    strategy: &S,
) -> UnifyResult<Substitution<S::Term>> {
    log::trace!("Canonicalizing {} bindings", raw.len());
    let classes = VarClasses::build(&raw, strategy)?;

    // Lay out the bindings that survive: one equality binding per
    // non-representative class member, in first-appearance order, plus every
    // binding to a term or sequence.
    let mut names = Vec::new();
    let mut values = Vec::new();
    let mut emitted: HashSet<String> = HashSet::default();
    for (name, value) in raw.iter() {
        match value {
            Expr::Elem(Elem::Var(rhs)) => {
                for member in [name, rhs.as_str()] {
                    let rep = classes.rep(member);
                    if member != rep && emitted.insert(member.to_owned()) {
                        names.push(member.to_owned());
                        values.push(Expr::var(rep));
                    }
                }
            }
            _ => {
                let rep = classes.rep(name);
                if rep != name {
                    // The variable is forced into an equivalence class whose
                    // representative it is not, yet it must also be the key
                    // for its non-variable binding.
                    return Err(UnifyError::conflicting_orientation(name, rep));
                }
                names.push(name.to_owned());
                values.push(value.clone());
            }
        }
    }

    for (name, value) in names.iter().zip(&values) {
        if !strategy.may_be_binding_target(name) {
            return Err(UnifyError::forbidden_binding(name, value.render(strategy)));
        }
    }

    let mut closure = Closure::new(strategy, names, values);
    closure.close()?;
    let Closure { names, values, .. } = closure;

    let mut canonical = Substitution::empty();
    for (name, value) in names.into_iter().zip(values) {
        canonical.insert(name, value);
    }
    Ok(canonical)
}

/// The equivalence classes induced by variable-to-variable bindings.
struct VarClasses {
    parent: HashMap<String, String>,
    /// Per class root, a representative forced by the binding-target
    /// constraint that differs from the root.
    forced: HashMap<String, String>,
}

impl VarClasses {
    fn build<S: Strategy>(raw: &Substitution<S::Term>, strategy: &S) -> UnifyResult<Self> {
        let mut parent: HashMap<String, String> = HashMap::default();
        let mut members = Vec::new();
        let mut seen: HashSet<String> = HashSet::default();

        let find = |parent: &HashMap<String, String>, name: &str| -> String {
            let mut root = name.to_owned();
            while let Some(next) = parent.get(&root) {
                root = next.clone();
            }
            root
        };

        for (lhs, value) in raw.iter() {
            let Expr::Elem(Elem::Var(rhs)) = value else {
                continue;
            };
            for member in [lhs, rhs.as_str()] {
                if seen.insert(member.to_owned()) {
                    members.push(member.to_owned());
                }
            }
            let root_l = find(&parent, lhs);
            let root_r = find(&parent, rhs);
            if root_l != root_r {
                // Last write wins: the class of the right-hand side keeps its
                // representative.
                parent.insert(root_l, root_r);
            }
        }

        // A member that may not be a binding target has to stay free, so it
        // takes over as representative of its class. Two such members in one
        // class leave no valid orientation.
        let mut class_by_root: HashMap<String, Vec<String>> = HashMap::default();
        for member in &members {
            let root = find(&parent, member);
            class_by_root.entry(root).or_default().push(member.clone());
        }
        let mut forced: HashMap<String, String> = HashMap::default();
        let mut processed: HashSet<String> = HashSet::default();
        for member in &members {
            let root = find(&parent, member);
            if !processed.insert(root.clone()) {
                continue;
            }
            let class = &class_by_root[&root];
            let forbidden: Vec<&String> =
                class.iter().filter(|member| !strategy.may_be_binding_target(member)).collect();
            match forbidden.as_slice() {
                [] => {}
                [only] => {
                    if **only != root {
                        forced.insert(root, (*only).clone());
                    }
                }
                _ => return Err(UnifyError::no_binding_target(class)),
            }
        }

        Ok(VarClasses { parent, forced })
    }

    /// The representative of the class `name` belongs to; `name` itself if it
    /// was never equated with another variable.
    fn rep<'a>(&'a self, name: &'a str) -> &'a str {
        let mut root = name;
        while let Some(next) = self.parent.get(root) {
            root = next;
        }
        match self.forced.get(root) {
            Some(rep) => rep,
            None => root,
        }
    }
}

/// Closes a set of bindings under substitution, in dependency order.
///
/// Every key reachable from a value is resolved before the value itself is
/// rewritten, so a single rewrite per binding reaches the fixpoint. A key
/// that is reached while it is being resolved sits on a cycle through
/// non-variable bindings, which no substitution can eliminate.
struct Closure<'a, S: Strategy> {
    strategy: &'a S,
    names: Vec<String>,
    values: Vec<Expr<S::Term>>,
    index: HashMap<String, usize>,
    state: Vec<ResolveState>,
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum ResolveState {
    Unresolved,
    InProgress,
    Done,
}

impl<'a, S: Strategy> Closure<'a, S> {
    fn new(strategy: &'a S, names: Vec<String>, values: Vec<Expr<S::Term>>) -> Self {
        let index =
            names.iter().enumerate().map(|(idx, name)| (name.clone(), idx)).collect();
        let state = vec![ResolveState::Unresolved; names.len()];
        Self { strategy, names, values, index, state }
    }

    fn close(&mut self) -> UnifyResult {
        for idx in 0..self.names.len() {
            self.resolve(idx)?;
        }
        Ok(())
    }

    fn resolve(&mut self, idx: usize) -> UnifyResult {
        match self.state[idx] {
            ResolveState::Done => return Ok(()),
            ResolveState::InProgress => {
                return Err(UnifyError::cyclic_binding(
                    &self.names[idx],
                    self.values[idx].render(self.strategy),
                ));
            }
            ResolveState::Unresolved => {}
        }
        self.state[idx] = ResolveState::InProgress;
        for dep in self.deps(&self.values[idx].clone()) {
            self.resolve(dep)?;
        }
        self.values[idx] = self.subst_expr(&self.values[idx].clone());
        self.state[idx] = ResolveState::Done;
        Ok(())
    }

    /// The indices of all keys occurring in `value`, in occurrence order.
    fn deps(&self, value: &Expr<S::Term>) -> Vec<usize> {
        let mut deps = Vec::new();
        match value {
            Expr::Elem(elem) => self.elem_deps(elem, &mut deps),
            Expr::Seq(elems) => {
                for elem in elems {
                    self.elem_deps(elem, &mut deps);
                }
            }
        }
        deps
    }

    fn elem_deps(&self, elem: &Elem<S::Term>, deps: &mut Vec<usize>) {
        match elem {
            Elem::Var(name) => {
                if let Some(&idx) = self.index.get(name) {
                    if !deps.contains(&idx) {
                        deps.push(idx);
                    }
                }
            }
            Elem::Term(term) => {
                for child in self.strategy.children(term) {
                    self.elem_deps(&child, deps);
                }
            }
        }
    }

    fn subst_expr(&self, value: &Expr<S::Term>) -> Expr<S::Term> {
        match value {
            // A binding to a bare variable takes over that variable's value
            // wholesale; a list variable turns the binding into a sequence.
            Expr::Elem(Elem::Var(name)) => match self.lookup(name) {
                Some(bound) => bound.clone(),
                None => value.clone(),
            },
            Expr::Elem(Elem::Term(term)) => Expr::Elem(Elem::Term(self.subst_term(term))),
            Expr::Seq(elems) => Expr::Seq(self.subst_elems(elems)),
        }
    }

    /// Substitute inside a sequence of siblings. A list variable bound to a
    /// sequence is spliced into place.
    fn subst_elems(&self, elems: &[Elem<S::Term>]) -> Vec<Elem<S::Term>> {
        let mut out = Vec::with_capacity(elems.len());
        for elem in elems {
            match elem {
                Elem::Var(name) => match self.lookup(name) {
                    Some(Expr::Elem(bound)) => out.push(bound.clone()),
                    Some(Expr::Seq(bound)) => out.extend(bound.iter().cloned()),
                    None => out.push(elem.clone()),
                },
                Elem::Term(term) => out.push(Elem::Term(self.subst_term(term))),
            }
        }
        out
    }

    fn subst_term(&self, term: &S::Term) -> S::Term {
        let children = self.strategy.children(term);
        let new_children = self.subst_elems(&children);
        if new_children == children {
            term.clone()
        } else {
            self.strategy.rebuild(term, new_children)
        }
    }

    fn lookup(&self, name: &str) -> Option<&Expr<S::Term>> {
        self.index.get(name).map(|&idx| &self.values[idx])
    }
}
