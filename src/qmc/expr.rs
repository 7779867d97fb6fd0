//! AND/OR expression trees for minimized covers
//!
//! The prime-implicant search produces DNF-style covers; [`Expr`] is the
//! tree form handed to display code, and [`Expr::demorgan`] is the recursive
//! transform that turns a minimized *complement* cover into a true CNF
//! expression: variable leaves are wrapped in NOT, NOT nodes are unwrapped
//! (double-negation elimination), AND flips to OR and OR flips to AND.

use std::fmt;
use std::sync::Arc;

/// An AND/OR expression tree over named variables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expr {
    /// Constant truth value
    Const(bool),
    /// A named input variable
    Var(Arc<str>),
    /// Logical complement
    Not(Box<Expr>),
    /// Conjunction over all children
    And(Vec<Expr>),
    /// Disjunction over all children
    Or(Vec<Expr>),
}

impl Expr {
    /// A variable leaf.
    pub fn variable<S: AsRef<str>>(name: S) -> Self {
        Expr::Var(Arc::from(name.as_ref()))
    }

    /// Complement of this expression, pushed down recursively.
    pub fn demorgan(&self) -> Expr {
        match self {
            Expr::Const(value) => Expr::Const(!value),
            Expr::Var(name) => Expr::Not(Box::new(Expr::Var(Arc::clone(name)))),
            Expr::Not(inner) => (**inner).clone(),
            Expr::And(children) => Expr::Or(children.iter().map(Expr::demorgan).collect()),
            Expr::Or(children) => Expr::And(children.iter().map(Expr::demorgan).collect()),
        }
    }

    /// Evaluate under an assignment.
    pub fn evaluate<F: Fn(&str) -> bool>(&self, assignment: &F) -> bool {
        match self {
            Expr::Const(value) => *value,
            Expr::Var(name) => assignment(name),
            Expr::Not(inner) => !inner.evaluate(assignment),
            Expr::And(children) => children.iter().all(|c| c.evaluate(assignment)),
            Expr::Or(children) => children.iter().any(|c| c.evaluate(assignment)),
        }
    }

    fn fmt_child(&self, f: &mut fmt::Formatter<'_>, parent_is_and: bool) -> fmt::Result {
        let needs_parens = parent_is_and && matches!(self, Expr::Or(_));
        if needs_parens {
            write!(f, "(")?;
            fmt::Display::fmt(self, f)?;
            write!(f, ")")
        } else {
            fmt::Display::fmt(self, f)
        }
    }
}

/// Formats with minimal parentheses: `*` for AND, ` + ` for OR, `~` for NOT.
impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Const(value) => write!(f, "{}", if *value { "1" } else { "0" }),
            Expr::Var(name) => write!(f, "{}", name),
            Expr::Not(inner) => match **inner {
                Expr::Var(_) | Expr::Const(_) | Expr::Not(_) => write!(f, "~{}", inner),
                _ => write!(f, "~({})", inner),
            },
            Expr::And(children) => {
                for (i, child) in children.iter().enumerate() {
                    if i > 0 {
                        write!(f, "*")?;
                    }
                    child.fmt_child(f, true)?;
                }
                Ok(())
            }
            Expr::Or(children) => {
                for (i, child) in children.iter().enumerate() {
                    if i > 0 {
                        write!(f, " + ")?;
                    }
                    child.fmt_child(f, false)?;
                }
                Ok(())
            }
        }
    }
}
