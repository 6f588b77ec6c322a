//! Expressions of the low-level template IR.
//!
//! This is the representation the backend emits C++ from and the one the
//! instantiation inliner matches specialization patterns against. It is
//! deliberately small: a template expression is a parameter reference, an
//! atomic type, an instantiation of a class template, a non-type literal, or
//! verbatim C++ text the frontend passed through unchanged.

use crate::print::Print;

#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub enum TemplExpr {
    Param(Param),
    AtomicType(AtomicType),
    Instantiation(Instantiation),
    Literal(Literal),
    Verbatim(Verbatim),
}

/// A reference to a template parameter such as the `T` in `std::vector<T>`.
///
/// Whether the parameter is a pack is not recorded on the reference; the
/// enclosing definition declares its parameter list, and the matching
/// strategy is constructed from that declaration.
#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub struct Param {
    pub name: String,
}

/// An atomic C++ type, e.g. `int` or a fully qualified class name.
#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub struct AtomicType {
    pub cpp_name: String,
}

/// An instantiation `F<A1, ..., An>` of the class template `F`.
#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub struct Instantiation {
    pub template_name: String,
    pub args: Vec<TemplExpr>,
    /// Whether instantiating this template may fire a `static_assert`. Two
    /// instantiations that differ only in this flag denote the same type, so
    /// matching ignores it; the inliner consults it separately when deciding
    /// what it is allowed to delay.
    pub may_trigger_static_asserts: bool,
}

/// A literal used as a non-type template argument.
#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub enum Literal {
    Bool(bool),
    Int(i64),
}

/// C++ text spliced in verbatim by the frontend.
///
/// The optimizer cannot see into the text, so two occurrences are equal only
/// if the text is identical.
#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub struct Verbatim {
    pub code: String,
}

impl TemplExpr {
    pub fn param(name: &str) -> TemplExpr {
        TemplExpr::Param(Param { name: name.to_owned() })
    }

    pub fn atomic(cpp_name: &str) -> TemplExpr {
        TemplExpr::AtomicType(AtomicType { cpp_name: cpp_name.to_owned() })
    }

    pub fn instantiation(template_name: &str, args: Vec<TemplExpr>) -> TemplExpr {
        TemplExpr::Instantiation(Instantiation {
            template_name: template_name.to_owned(),
            args,
            may_trigger_static_asserts: false,
        })
    }

    pub fn verbatim(code: &str) -> TemplExpr {
        TemplExpr::Verbatim(Verbatim { code: code.to_owned() })
    }

    pub fn print_to_string(&self) -> String {
        Print::print_to_string(self)
    }
}

impl From<Param> for TemplExpr {
    fn from(param: Param) -> Self {
        TemplExpr::Param(param)
    }
}

impl From<AtomicType> for TemplExpr {
    fn from(atomic: AtomicType) -> Self {
        TemplExpr::AtomicType(atomic)
    }
}

impl From<Instantiation> for TemplExpr {
    fn from(inst: Instantiation) -> Self {
        TemplExpr::Instantiation(inst)
    }
}

impl From<Literal> for TemplExpr {
    fn from(lit: Literal) -> Self {
        TemplExpr::Literal(lit)
    }
}

impl From<Verbatim> for TemplExpr {
    fn from(verbatim: Verbatim) -> Self {
        TemplExpr::Verbatim(verbatim)
    }
}
