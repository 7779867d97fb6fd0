//! Semantic evaluation of terms and formulas
//!
//! Evaluation drives the duality property: a DNF and a CNF minimized from
//! the same don't-care-free table must agree on every row.

use super::{Formula, FormulaKind, Literal, Term};

impl Literal {
    /// The literal's truth value under an assignment.
    ///
    /// Sentinel variables evaluate to their constant regardless of the
    /// assignment (and may not be complemented in practice).
    pub fn evaluate<F: Fn(&str) -> bool>(&self, assignment: &F) -> bool {
        let value = match &*self.variable {
            super::TRUE_VARIABLE => true,
            super::FALSE_VARIABLE => false,
            name => assignment(name),
        };
        value != self.negated
    }
}

impl Term {
    /// Evaluate as a conjunction (DNF) or disjunction (CNF).
    pub fn evaluate<F: Fn(&str) -> bool>(&self, kind: FormulaKind, assignment: &F) -> bool {
        match kind {
            FormulaKind::Dnf => self.literals().iter().all(|l| l.evaluate(assignment)),
            FormulaKind::Cnf => self.literals().iter().any(|l| l.evaluate(assignment)),
        }
    }
}

impl Formula {
    /// Evaluate the whole formula under an assignment.
    ///
    /// # Examples
    ///
    /// ```
    /// use karnaugh_logic::{Formula, FormulaKind, Literal, Term};
    ///
    /// let mut f = Formula::new(FormulaKind::Dnf);
    /// f.push_term(Term::from_literals([
    ///     Literal::positive("a"),
    ///     Literal::negative("b"),
    /// ]));
    /// assert!(f.evaluate(&|name| name == "a"));
    /// assert!(!f.evaluate(&|_| true));
    /// ```
    pub fn evaluate<F: Fn(&str) -> bool>(&self, assignment: &F) -> bool {
        match self.kind {
            FormulaKind::Dnf => self
                .terms()
                .iter()
                .any(|t| t.evaluate(self.kind, assignment)),
            FormulaKind::Cnf => self
                .terms()
                .iter()
                .all(|t| t.evaluate(self.kind, assignment)),
        }
    }
}
