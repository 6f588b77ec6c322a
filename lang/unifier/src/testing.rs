//! A minimal term type and strategy for the unit tests.

use crate::HashSet;
use crate::exprs::Elem;
use crate::strategy::Strategy;

/// A head symbol applied to children. The `opaque` flag marks terms that
/// must compare literally instead of being decomposed.
#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub struct TestTerm {
    pub head: String,
    pub children: Vec<Elem<TestTerm>>,
    pub opaque: bool,
}

pub fn var(name: &str) -> Elem<TestTerm> {
    Elem::var(name)
}

pub fn term(head: &str, children: Vec<Elem<TestTerm>>) -> Elem<TestTerm> {
    Elem::Term(TestTerm { head: head.to_owned(), children, opaque: false })
}

pub fn opaque(head: &str) -> Elem<TestTerm> {
    opaque_with_children(head, vec![])
}

pub fn opaque_with_children(head: &str, children: Vec<Elem<TestTerm>>) -> Elem<TestTerm> {
    Elem::Term(TestTerm { head: head.to_owned(), children, opaque: true })
}

#[derive(Debug, Default)]
pub struct TestStrategy {
    list_vars: HashSet<String>,
    rigid: HashSet<String>,
}

impl TestStrategy {
    pub fn with_list_vars(mut self, names: &[&str]) -> Self {
        self.list_vars.extend(names.iter().map(|name| (*name).to_owned()));
        self
    }

    pub fn with_rigid(mut self, names: &[&str]) -> Self {
        self.rigid.extend(names.iter().map(|name| (*name).to_owned()));
        self
    }
}

impl Strategy for TestStrategy {
    type Term = TestTerm;

    fn same_shape(&self, lhs: &TestTerm, rhs: &TestTerm) -> bool {
        lhs.head == rhs.head
    }

    fn children(&self, term: &TestTerm) -> Vec<Elem<TestTerm>> {
        term.children.clone()
    }

    fn rebuild(&self, term: &TestTerm, children: Vec<Elem<TestTerm>>) -> TestTerm {
        TestTerm { head: term.head.clone(), children, opaque: term.opaque }
    }

    fn is_list_var(&self, name: &str) -> bool {
        self.list_vars.contains(name)
    }

    fn may_be_binding_target(&self, name: &str) -> bool {
        !self.rigid.contains(name)
    }

    fn requires_syntactic_equality(&self, term: &TestTerm) -> bool {
        term.opaque
    }

    fn render(&self, term: &TestTerm) -> String {
        render_term(term)
    }
}

fn render_term(term: &TestTerm) -> String {
    let children: Vec<_> = term
        .children
        .iter()
        .map(|child| match child {
            Elem::Var(name) => name.clone(),
            Elem::Term(child) => render_term(child),
        })
        .collect();
    format!("{}({})", term.head, children.join(", "))
}
