//! The equation language of the unification engine.
//!
//! An equation relates two [Expr]s. An expression is either a single
//! [Elem] (a unification variable or a term of the caller's term type) or a
//! sequence of elements. Sequences only occur as whole equation sides and as
//! the bound value of a list variable; they never nest inside each other.

use crate::HashMap;
use crate::strategy::Strategy;

/// A single element of an equation side: a unification variable or a term.
///
/// Two `Var`s with equal names denote the same variable. Whether a name is a
/// list variable, and whether it may become a key of a canonical
/// substitution, is decided by the [Strategy], not by the element itself.
#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub enum Elem<T> {
    Var(String),
    Term(T),
}

impl<T> Elem<T> {
    pub fn var(name: &str) -> Self {
        Elem::Var(name.to_owned())
    }

    /// The variable name, if this element is a variable.
    pub fn as_var(&self) -> Option<&str> {
        match self {
            Elem::Var(name) => Some(name),
            Elem::Term(_) => None,
        }
    }

    /// Whether this element is a list variable under the given strategy.
    pub fn is_list_var<S: Strategy<Term = T>>(&self, strategy: &S) -> bool {
        match self {
            Elem::Var(name) => strategy.is_list_var(name),
            Elem::Term(_) => false,
        }
    }

    pub fn render<S: Strategy<Term = T>>(&self, strategy: &S) -> String {
        match self {
            Elem::Var(name) => name.clone(),
            Elem::Term(t) => strategy.render(t),
        }
    }
}

/// One side of an equation, or the value a variable is bound to.
///
/// Ordinary variables are bound to an `Elem`, list variables to a `Seq`.
#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub enum Expr<T> {
    Elem(Elem<T>),
    Seq(Vec<Elem<T>>),
}

impl<T> Expr<T> {
    pub fn var(name: &str) -> Self {
        Expr::Elem(Elem::var(name))
    }

    pub fn term(t: T) -> Self {
        Expr::Elem(Elem::Term(t))
    }

    pub fn render<S: Strategy<Term = T>>(&self, strategy: &S) -> String {
        match self {
            Expr::Elem(elem) => elem.render(strategy),
            Expr::Seq(elems) => {
                let elems: Vec<_> = elems.iter().map(|elem| elem.render(strategy)).collect();
                format!("[{}]", elems.join(", "))
            }
        }
    }
}

impl<T> From<Elem<T>> for Expr<T> {
    fn from(elem: Elem<T>) -> Self {
        Expr::Elem(elem)
    }
}

impl<T> From<Vec<Elem<T>>> for Expr<T> {
    fn from(elems: Vec<Elem<T>>) -> Self {
        Expr::Seq(elems)
    }
}

/// An equation between two expressions.
///
/// The order of `lhs` and `rhs` is significant: when both sides are free
/// variables, the left operand becomes the binding key.
#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub struct Eqn<T> {
    pub lhs: Expr<T>,
    pub rhs: Expr<T>,
}

impl<T> Eqn<T> {
    pub fn new(lhs: impl Into<Expr<T>>, rhs: impl Into<Expr<T>>) -> Self {
        Eqn { lhs: lhs.into(), rhs: rhs.into() }
    }
}

/// A binding map from variable names to bound expressions.
///
/// [crate::unify] returns the raw form, which may still be redundant or
/// cyclic; [crate::canonicalize] returns the canonical form, which is acyclic
/// and fully substituted. At most one binding per variable. Insertion order
/// is preserved because canonicalization resolves representatives with a
/// last-write-wins policy; equality ignores it.
#[derive(Debug, Clone)]
pub struct Substitution<T> {
    map: HashMap<String, Expr<T>>,
    order: Vec<String>,
}

impl<T> Substitution<T> {
    pub fn empty() -> Self {
        Substitution { map: HashMap::default(), order: Vec::new() }
    }

    pub fn get(&self, name: &str) -> Option<&Expr<T>> {
        self.map.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.map.contains_key(name)
    }

    /// Insert a binding. Panics if the variable is already bound; callers
    /// must refine an existing binding by unifying against it instead.
    pub fn insert(&mut self, name: String, expr: Expr<T>) {
        let previous = self.map.insert(name.clone(), expr);
        assert!(previous.is_none(), "variable {name} bound twice");
        self.order.push(name);
    }

    /// The bindings in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Expr<T>)> {
        self.order.iter().map(|name| (name.as_str(), &self.map[name]))
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

impl<T: PartialEq> PartialEq for Substitution<T> {
    fn eq(&self, other: &Self) -> bool {
        self.map == other.map
    }
}

impl<T: Eq> Eq for Substitution<T> {}

impl<T> Default for Substitution<T> {
    fn default() -> Self {
        Self::empty()
    }
}
