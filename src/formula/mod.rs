//! Two-level Boolean algebra model
//!
//! [`Literal`], [`Term`] and [`Formula`] form the data model shared by both
//! representations: a DNF formula is a sum of product terms, a CNF formula a
//! product of clause terms. Terms are kept in a canonical order (lexicographic
//! by per-input literal polarity, in input-variable order) so that two
//! structurally equal formulas always serialize identically. This is what
//! makes result diffing and color reuse across recomputation stable.

mod display;
mod eval;

use std::sync::Arc;

/// Sentinel variable naming the constant-false function.
pub const FALSE_VARIABLE: &str = "0";
/// Sentinel variable naming the constant-true function.
pub const TRUE_VARIABLE: &str = "1";

/// Whether a formula is a sum of products or a product of sums.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormulaKind {
    /// Disjunctive normal form, OR of AND terms
    Dnf,
    /// Conjunctive normal form, AND of OR clauses
    Cnf,
}

/// One input variable appearing positive or complemented in a term.
///
/// The sentinel variables `"0"` and `"1"` represent the constant-false and
/// constant-true function as a single-literal term; no ordinary literal may
/// use these names.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Literal {
    /// Variable name
    pub variable: Arc<str>,
    /// True when the variable appears complemented
    pub negated: bool,
}

impl Literal {
    /// A positive literal.
    pub fn positive<S: AsRef<str>>(variable: S) -> Self {
        Literal {
            variable: Arc::from(variable.as_ref()),
            negated: false,
        }
    }

    /// A complemented literal.
    pub fn negative<S: AsRef<str>>(variable: S) -> Self {
        Literal {
            variable: Arc::from(variable.as_ref()),
            negated: true,
        }
    }

    /// True for the `"0"`/`"1"` sentinel variables.
    pub fn is_sentinel(&self) -> bool {
        matches!(&*self.variable, FALSE_VARIABLE | TRUE_VARIABLE)
    }
}

/// An ordered, duplicate-free set of literals.
///
/// Interpreted as a conjunction (DNF) or disjunction (CNF) depending on the
/// kind of the enclosing [`Formula`]. Insertion order is irrelevant once the
/// formula has been canonicalized.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Term {
    literals: Vec<Literal>,
}

impl Term {
    /// An empty term.
    pub fn new() -> Self {
        Term::default()
    }

    /// The single-literal sentinel term for a constant function.
    pub fn constant(value: bool) -> Self {
        let name = if value { TRUE_VARIABLE } else { FALSE_VARIABLE };
        Term {
            literals: vec![Literal::positive(name)],
        }
    }

    /// Build a term from literals, dropping duplicate variables (first wins).
    pub fn from_literals<I: IntoIterator<Item = Literal>>(literals: I) -> Self {
        let mut term = Term::new();
        for lit in literals {
            term.push(lit);
        }
        term
    }

    /// Append a literal unless its variable is already present.
    pub fn push(&mut self, literal: Literal) {
        if !self
            .literals
            .iter()
            .any(|l| l.variable == literal.variable)
        {
            self.literals.push(literal);
        }
    }

    /// The literals of this term.
    pub fn literals(&self) -> &[Literal] {
        &self.literals
    }

    /// Number of literals.
    pub fn len(&self) -> usize {
        self.literals.len()
    }

    /// True when the term holds no literals.
    pub fn is_empty(&self) -> bool {
        self.literals.is_empty()
    }

    /// Polarity of `variable` in this term: `Some(true)` positive,
    /// `Some(false)` complemented, `None` absent.
    pub fn polarity_of(&self, variable: &str) -> Option<bool> {
        self.literals
            .iter()
            .find(|l| &*l.variable == variable)
            .map(|l| !l.negated)
    }

    /// `Some(value)` when this is a `"0"`/`"1"` sentinel term.
    pub fn as_constant(&self) -> Option<bool> {
        match self.literals.as_slice() {
            [lit] if !lit.negated => match &*lit.variable {
                TRUE_VARIABLE => Some(true),
                FALSE_VARIABLE => Some(false),
                _ => None,
            },
            _ => None,
        }
    }

    /// Sort literals by position in `input_order`; unknown variables last.
    fn order_literals(&mut self, input_order: &[Arc<str>]) {
        let index_of = |name: &str| {
            input_order
                .iter()
                .position(|v| &**v == name)
                .unwrap_or(input_order.len())
        };
        self.literals
            .sort_by_key(|lit| index_of(&lit.variable));
    }

    /// Canonical sort key: one entry per input variable, positive < negated
    /// < absent, in input-variable order.
    fn sort_key(&self, input_order: &[Arc<str>]) -> Vec<u8> {
        input_order
            .iter()
            .map(|var| match self.polarity_of(var) {
                Some(true) => 0,
                Some(false) => 1,
                None => 2,
            })
            .collect()
    }
}

/// A two-level Boolean expression as a list of terms.
///
/// # Examples
///
/// ```
/// use karnaugh_logic::{Formula, FormulaKind, Literal, Term};
///
/// let mut f = Formula::new(FormulaKind::Dnf);
/// f.push_term(Term::from_literals([Literal::positive("a")]));
/// f.push_term(Term::from_literals([Literal::positive("b")]));
/// assert_eq!(f.to_string(), "a + b");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Formula {
    /// DNF or CNF interpretation of the terms
    pub kind: FormulaKind,
    terms: Vec<Term>,
}

impl Formula {
    /// An empty formula of the given kind.
    pub fn new(kind: FormulaKind) -> Self {
        Formula {
            kind,
            terms: Vec::new(),
        }
    }

    /// The constant formula, holding a single `"0"`/`"1"` sentinel term.
    pub fn constant(kind: FormulaKind, value: bool) -> Self {
        Formula {
            kind,
            terms: vec![Term::constant(value)],
        }
    }

    /// Append a term.
    pub fn push_term(&mut self, term: Term) {
        self.terms.push(term);
    }

    /// The terms of this formula.
    pub fn terms(&self) -> &[Term] {
        &self.terms
    }

    /// `Some(value)` when this formula is a single sentinel term.
    pub fn as_constant(&self) -> Option<bool> {
        match self.terms.as_slice() {
            [term] => term.as_constant(),
            _ => None,
        }
    }

    /// Bring the formula into canonical order: literals within each term
    /// follow the input-variable order, terms are sorted lexicographically by
    /// per-variable polarity. Canonicalizing twice is a no-op.
    pub fn canonicalize(&mut self, input_order: &[Arc<str>]) {
        for term in &mut self.terms {
            term.order_literals(input_order);
        }
        self.terms.sort_by_key(|t| t.sort_key(input_order));
    }
}
