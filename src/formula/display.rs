//! Algebraic rendering of literals, terms and formulas
//!
//! Uses standard boolean algebra notation: `*` for AND, `+` for OR, `~` for
//! NOT. DNF terms render as products joined by ` + `; CNF clauses render as
//! parenthesized sums joined by `*`. Single-literal clauses drop the
//! parentheses.

use super::{Formula, FormulaKind, Literal, Term};
use std::fmt;

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.negated {
            write!(f, "~{}", self.variable)
        } else {
            write!(f, "{}", self.variable)
        }
    }
}

impl Term {
    /// Render this term under the given interpretation.
    pub fn render(&self, kind: FormulaKind) -> String {
        if let Some(value) = self.as_constant() {
            return if value { "1" } else { "0" }.to_string();
        }
        let joined = |sep: &str| {
            self.literals()
                .iter()
                .map(|l| l.to_string())
                .collect::<Vec<_>>()
                .join(sep)
        };
        match kind {
            FormulaKind::Dnf => joined("*"),
            FormulaKind::Cnf if self.len() == 1 => joined(" + "),
            FormulaKind::Cnf => format!("({})", joined(" + ")),
        }
    }
}

impl Formula {
    /// Render every term separately, in canonical order.
    ///
    /// This is the per-term view consumed by the coupling analyzer and the
    /// per-term color mapping; joining the entries with the kind's outer
    /// operator reproduces [`Formula::to_string`].
    pub fn render_terms(&self) -> Vec<String> {
        self.terms().iter().map(|t| t.render(self.kind)).collect()
    }
}

impl fmt::Display for Formula {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.terms().is_empty() {
            // An empty DNF means constant false; never produced in practice,
            // the sentinel term is used instead.
            return write!(
                f,
                "{}",
                match self.kind {
                    FormulaKind::Dnf => "0",
                    FormulaKind::Cnf => "1",
                }
            );
        }
        // A lone CNF clause needs no parentheses
        if self.kind == FormulaKind::Cnf && self.terms().len() == 1 {
            let term = &self.terms()[0];
            if let Some(value) = term.as_constant() {
                return write!(f, "{}", if value { "1" } else { "0" });
            }
            let joined = term
                .literals()
                .iter()
                .map(|l| l.to_string())
                .collect::<Vec<_>>()
                .join(" + ");
            return write!(f, "{}", joined);
        }
        let sep = match self.kind {
            FormulaKind::Dnf => " + ",
            FormulaKind::Cnf => "*",
        };
        write!(f, "{}", self.render_terms().join(sep))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::formula::Literal;

    #[test]
    fn test_literal_display() {
        assert_eq!(Literal::positive("a").to_string(), "a");
        assert_eq!(Literal::negative("a").to_string(), "~a");
    }

    #[test]
    fn test_dnf_display() {
        let mut f = Formula::new(FormulaKind::Dnf);
        f.push_term(Term::from_literals([
            Literal::positive("a"),
            Literal::negative("b"),
        ]));
        f.push_term(Term::from_literals([Literal::positive("c")]));
        assert_eq!(f.to_string(), "a*~b + c");
    }

    #[test]
    fn test_cnf_display() {
        let mut f = Formula::new(FormulaKind::Cnf);
        f.push_term(Term::from_literals([
            Literal::positive("a"),
            Literal::negative("b"),
        ]));
        f.push_term(Term::from_literals([Literal::positive("c")]));
        assert_eq!(f.to_string(), "(a + ~b)*c");
    }

    #[test]
    fn test_single_cnf_clause_drops_parens() {
        let mut f = Formula::new(FormulaKind::Cnf);
        f.push_term(Term::from_literals([
            Literal::positive("a"),
            Literal::negative("b"),
        ]));
        assert_eq!(f.to_string(), "a + ~b");
    }

    #[test]
    fn test_constant_display() {
        assert_eq!(Formula::constant(FormulaKind::Dnf, false).to_string(), "0");
        assert_eq!(Formula::constant(FormulaKind::Cnf, true).to_string(), "1");
        assert_eq!(Formula::new(FormulaKind::Dnf).to_string(), "0");
    }
}
