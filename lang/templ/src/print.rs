//! Pretty-printing of template expressions.
//!
//! Used for diagnostics and test assertions. Code generation proper renders
//! through the same documents, so the printed form is valid C++ template
//! syntax.

use pretty::RcDoc;

use crate::exprs::{Literal, TemplExpr};

pub const DEFAULT_WIDTH: usize = 100;

pub trait Print {
    fn print(&self) -> RcDoc<'_, ()>;

    fn print_to_string(&self) -> String {
        let mut buf = Vec::new();
        self.print().render(DEFAULT_WIDTH, &mut buf).expect("Failed to print to string");
        unsafe { String::from_utf8_unchecked(buf) }
    }
}

impl Print for TemplExpr {
    fn print(&self) -> RcDoc<'_, ()> {
        match self {
            TemplExpr::Param(param) => RcDoc::text(&param.name),
            TemplExpr::AtomicType(atomic) => RcDoc::text(&atomic.cpp_name),
            TemplExpr::Instantiation(inst) => {
                let args = RcDoc::intersperse(
                    inst.args.iter().map(Print::print),
                    RcDoc::text(",").append(RcDoc::space()),
                );
                RcDoc::text(&inst.template_name)
                    .append(RcDoc::text("<"))
                    .append(args.nest(4).group())
                    .append(RcDoc::text(">"))
            }
            TemplExpr::Literal(Literal::Bool(b)) => {
                RcDoc::text(if *b { "true" } else { "false" })
            }
            TemplExpr::Literal(Literal::Int(i)) => RcDoc::text(i.to_string()),
            TemplExpr::Verbatim(verbatim) => RcDoc::text(&verbatim.code),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn prints_nested_instantiation() {
        let expr = TemplExpr::instantiation(
            "std::tuple",
            vec![
                TemplExpr::atomic("int"),
                TemplExpr::instantiation("std::vector", vec![TemplExpr::param("T")]),
                TemplExpr::Literal(Literal::Int(3)),
            ],
        );
        assert_eq!(expr.print_to_string(), "std::tuple<int, std::vector<T>, 3>");
    }

    #[test]
    fn prints_verbatim_unchanged() {
        let expr = TemplExpr::verbatim("decltype(f())");
        assert_eq!(expr.print_to_string(), "decltype(f())");
    }
}
