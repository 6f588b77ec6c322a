//! The strategy that lets the unification engine match template expressions.
//!
//! The inliner matches a call site against the specialization patterns of a
//! template definition. A [MatchStrategy] is built per match attempt from the
//! definition's parameter list: the parameters declared as packs become list
//! variables, and only the parameters of the specialization under
//! consideration may end up as binding targets.

use templc_unifier::{Elem, Expr, Strategy};

use crate::HashSet;
use crate::exprs::{Instantiation, TemplExpr};
use crate::print::Print;

pub struct MatchStrategy {
    /// Parameters declared as packs (`typename... Ts`).
    packs: HashSet<String>,
    /// Parameters of the specialization being matched. Bindings keyed on any
    /// other variable must be reoriented away during canonicalization.
    bindable: HashSet<String>,
}

impl MatchStrategy {
    pub fn new<P, B>(packs: P, bindable: B) -> MatchStrategy
    where
        P: IntoIterator<Item = String>,
        B: IntoIterator<Item = String>,
    {
        MatchStrategy { packs: packs.into_iter().collect(), bindable: bindable.into_iter().collect() }
    }

    /// An equation element for a single template expression. Parameter
    /// references become engine variables so they can be bound.
    pub fn elem(&self, expr: &TemplExpr) -> Elem<TemplExpr> {
        match expr {
            TemplExpr::Param(param) => Elem::var(&param.name),
            _ => Elem::Term(expr.clone()),
        }
    }

    /// An equation side for an argument list, e.g. the arguments of a
    /// specialization pattern or of a call site.
    pub fn exprs(&self, exprs: &[TemplExpr]) -> Expr<TemplExpr> {
        Expr::Seq(exprs.iter().map(|expr| self.elem(expr)).collect())
    }
}

impl Strategy for MatchStrategy {
    type Term = TemplExpr;

    fn same_shape(&self, lhs: &TemplExpr, rhs: &TemplExpr) -> bool {
        match (lhs, rhs) {
            (TemplExpr::Param(l), TemplExpr::Param(r)) => l.name == r.name,
            (TemplExpr::AtomicType(l), TemplExpr::AtomicType(r)) => l.cpp_name == r.cpp_name,
            // The static_assert flag is metadata, not part of the type.
            (TemplExpr::Instantiation(l), TemplExpr::Instantiation(r)) => {
                l.template_name == r.template_name
            }
            (TemplExpr::Literal(l), TemplExpr::Literal(r)) => l == r,
            (TemplExpr::Verbatim(l), TemplExpr::Verbatim(r)) => l.code == r.code,
            _ => false,
        }
    }

    fn children(&self, term: &TemplExpr) -> Vec<Elem<TemplExpr>> {
        match term {
            TemplExpr::Instantiation(inst) => {
                inst.args.iter().map(|arg| self.elem(arg)).collect()
            }
            _ => vec![],
        }
    }

    fn rebuild(&self, term: &TemplExpr, children: Vec<Elem<TemplExpr>>) -> TemplExpr {
        match term {
            TemplExpr::Instantiation(inst) => TemplExpr::Instantiation(Instantiation {
                template_name: inst.template_name.clone(),
                args: children
                    .into_iter()
                    .map(|child| match child {
                        Elem::Var(name) => TemplExpr::Param(crate::exprs::Param { name }),
                        Elem::Term(expr) => expr,
                    })
                    .collect(),
                may_trigger_static_asserts: inst.may_trigger_static_asserts,
            }),
            _ => term.clone(),
        }
    }

    fn is_list_var(&self, name: &str) -> bool {
        self.packs.contains(name)
    }

    fn may_be_binding_target(&self, name: &str) -> bool {
        self.bindable.contains(name)
    }

    fn requires_syntactic_equality(&self, term: &TemplExpr) -> bool {
        matches!(term, TemplExpr::Verbatim(_))
    }

    fn render(&self, term: &TemplExpr) -> String {
        term.print_to_string()
    }
}

#[cfg(test)]
mod test {
    use templc_unifier::{Eqn, UnifyError, unify};

    use super::*;
    use crate::exprs::Literal;

    fn names(names: &[&str]) -> Vec<String> {
        names.iter().map(|name| (*name).to_owned()).collect()
    }

    fn tuple(args: Vec<TemplExpr>) -> TemplExpr {
        TemplExpr::instantiation("std::tuple", args)
    }

    #[test]
    fn pack_captures_trailing_arguments() {
        let strategy = MatchStrategy::new(names(&["Ts"]), names(&["T", "Ts"]));
        let pattern = tuple(vec![TemplExpr::param("T"), TemplExpr::param("Ts")]);
        let scrutinee = tuple(vec![
            TemplExpr::atomic("int"),
            TemplExpr::atomic("double"),
            TemplExpr::atomic("bool"),
        ]);
        let eqns = vec![Eqn::new(strategy.elem(&pattern), strategy.elem(&scrutinee))];

        let subst = unify(eqns, &strategy).unwrap();

        assert_eq!(subst.get("T"), Some(&Expr::Elem(Elem::Term(TemplExpr::atomic("int")))));
        assert_eq!(
            subst.get("Ts"),
            Some(&Expr::Seq(vec![
                Elem::Term(TemplExpr::atomic("double")),
                Elem::Term(TemplExpr::atomic("bool")),
            ]))
        );
    }

    #[test]
    fn static_assert_flag_does_not_affect_matching() {
        let strategy = MatchStrategy::new(names(&[]), names(&[]));
        let mut flagged = tuple(vec![TemplExpr::atomic("int")]);
        if let TemplExpr::Instantiation(inst) = &mut flagged {
            inst.may_trigger_static_asserts = true;
        }
        let plain = tuple(vec![TemplExpr::atomic("int")]);
        let eqns = vec![Eqn::new(strategy.elem(&flagged), strategy.elem(&plain))];

        let subst = unify(eqns, &strategy).unwrap();
        assert!(subst.is_empty());
    }

    #[test]
    fn verbatim_matches_only_itself() {
        let strategy = MatchStrategy::new(names(&[]), names(&[]));
        let same = vec![Eqn::new(
            strategy.elem(&TemplExpr::verbatim("decltype(f())")),
            strategy.elem(&TemplExpr::verbatim("decltype(f())")),
        )];
        assert!(unify(same, &strategy).unwrap().is_empty());

        let different = vec![Eqn::new(
            strategy.elem(&TemplExpr::verbatim("decltype(f())")),
            strategy.elem(&TemplExpr::verbatim("decltype(g())")),
        )];
        let err = unify(different, &strategy).unwrap_err();
        assert!(matches!(*err, UnifyError::CannotUnify { .. }));
    }

    #[test]
    fn literals_match_by_value() {
        let strategy = MatchStrategy::new(names(&[]), names(&["N"]));
        let pattern = TemplExpr::instantiation(
            "std::array",
            vec![TemplExpr::param("T"), TemplExpr::Literal(Literal::Int(4))],
        );
        let scrutinee = TemplExpr::instantiation(
            "std::array",
            vec![TemplExpr::atomic("char"), TemplExpr::Literal(Literal::Int(4))],
        );
        let eqns = vec![Eqn::new(strategy.elem(&pattern), strategy.elem(&scrutinee))];

        let subst = unify(eqns, &strategy).unwrap();
        assert_eq!(subst.get("T"), Some(&Expr::Elem(Elem::Term(TemplExpr::atomic("char")))));
    }

    #[test]
    fn mismatched_template_names_do_not_unify() {
        let strategy = MatchStrategy::new(names(&[]), names(&["T"]));
        let eqns = vec![Eqn::new(
            strategy.elem(&TemplExpr::instantiation("std::vector", vec![TemplExpr::param("T")])),
            strategy.elem(&TemplExpr::instantiation("std::list", vec![TemplExpr::atomic("int")])),
        )];
        let err = unify(eqns, &strategy).unwrap_err();
        assert!(matches!(*err, UnifyError::CannotUnify { .. }));
    }

    #[test]
    fn rebuild_preserves_name_and_flag() {
        let strategy = MatchStrategy::new(names(&[]), names(&[]));
        let mut inst = tuple(vec![TemplExpr::param("T")]);
        if let TemplExpr::Instantiation(i) = &mut inst {
            i.may_trigger_static_asserts = true;
        }
        let rebuilt =
            strategy.rebuild(&inst, vec![Elem::Term(TemplExpr::atomic("int"))]);
        match rebuilt {
            TemplExpr::Instantiation(i) => {
                assert_eq!(i.template_name, "std::tuple");
                assert!(i.may_trigger_static_asserts);
                assert_eq!(i.args, vec![TemplExpr::atomic("int")]);
            }
            _ => panic!("expected an instantiation"),
        }
    }
}
