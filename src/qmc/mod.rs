//! Quine-McCluskey prime-implicant search and minimal-cover selection
//!
//! The core works on index sets: the covered set (minterms for DNF, maxterms
//! for CNF), the don't-care set, and the number of input variables. It
//! produces all prime implicants, a coverage chart, and one or more equally
//! minimal covers; only the first cover is used downstream. When multiple
//! structurally different minimal expressions exist, the selection is
//! deterministic (sorted by term count, then literal count, then pattern
//! order) but not claimed to be a canonical minimal form.
//!
//! The CNF path minimizes the *complement* function and converts the result
//! to a true product-of-sums through the De Morgan transform in [`expr`].

mod expr;

pub use expr::Expr;

use crate::formula::{Formula, FormulaKind, Literal, Term};
use crate::table::TruthTable;
use fxhash::FxHashMap;
use log::trace;
use std::collections::BTreeSet;
use std::sync::Arc;

/// A maximal group of combinable indices, as a bit pattern over the inputs.
///
/// Position 0 of the pattern is the first input variable (the MSB of the row
/// index); `-` marks a dropped variable. Implicants are produced fresh each
/// minimization run and persist across runs only as color keys, by pattern
/// string.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Implicant {
    bits: u32,
    mask: u32,
    num_inputs: usize,
    covered: BTreeSet<u32>,
}

impl Implicant {
    fn from_index(index: u32, num_inputs: usize) -> Self {
        let mask = ((1u64 << num_inputs) - 1) as u32;
        Implicant {
            bits: index & mask,
            mask,
            num_inputs,
            covered: BTreeSet::from([index]),
        }
    }

    /// The `{0,1,-}` pattern string, first input variable first.
    pub fn pattern(&self) -> String {
        (0..self.num_inputs)
            .map(|var| match self.bit(var) {
                None => '-',
                Some(false) => '0',
                Some(true) => '1',
            })
            .collect()
    }

    /// The value this implicant requires for input position `var`,
    /// `None` when the variable has been dropped.
    pub fn bit(&self, var: usize) -> Option<bool> {
        let shift = self.num_inputs - 1 - var;
        if self.mask >> shift & 1 == 0 {
            None
        } else {
            Some(self.bits >> shift & 1 == 1)
        }
    }

    /// Number of literals a term built from this implicant will carry.
    pub fn num_literals(&self) -> u32 {
        self.mask.count_ones()
    }

    /// The minterm/maxterm indices this implicant groups.
    pub fn covered(&self) -> &BTreeSet<u32> {
        &self.covered
    }

    /// True when the implicant covers the given row index.
    pub fn covers_index(&self, index: u32) -> bool {
        index & self.mask == self.bits
    }

    /// Combine two implicants differing in exactly one significant bit.
    fn combine(&self, other: &Implicant) -> Option<Implicant> {
        if self.mask != other.mask || self.num_inputs != other.num_inputs {
            return None;
        }
        let diff = self.bits ^ other.bits;
        if diff.count_ones() != 1 {
            return None;
        }
        let mask = self.mask & !diff;
        Some(Implicant {
            bits: self.bits & mask,
            mask,
            num_inputs: self.num_inputs,
            covered: self.covered.union(&other.covered).copied().collect(),
        })
    }
}

/// Generate all prime implicants for the covered + don't-care index sets.
pub fn prime_implicants(covered: &[u32], dont_cares: &[u32], num_inputs: usize) -> Vec<Implicant> {
    let indices: BTreeSet<u32> = covered.iter().chain(dont_cares).copied().collect();
    let mut current: Vec<Implicant> = indices
        .into_iter()
        .map(|i| Implicant::from_index(i, num_inputs))
        .collect();

    let mut primes = Vec::new();
    while !current.is_empty() {
        let mut combined = vec![false; current.len()];
        let mut next: FxHashMap<(u32, u32), Implicant> = FxHashMap::default();

        for i in 0..current.len() {
            for j in i + 1..current.len() {
                if let Some(merged) = current[i].combine(&current[j]) {
                    combined[i] = true;
                    combined[j] = true;
                    next.entry((merged.bits, merged.mask))
                        .and_modify(|existing| {
                            existing.covered.extend(merged.covered.iter().copied())
                        })
                        .or_insert(merged);
                }
            }
        }

        primes.extend(
            current
                .into_iter()
                .zip(&combined)
                .filter(|(_, &was_combined)| !was_combined)
                .map(|(implicant, _)| implicant),
        );

        let mut merged: Vec<Implicant> = next.into_values().collect();
        merged.sort_by_key(|imp| (imp.mask, imp.bits));
        current = merged;
    }

    primes.sort_by_key(|imp| imp.pattern());
    primes
}

/// All minimal covers of `covered` by `primes`, as index sets into `primes`.
///
/// Essential prime implicants are selected first; the remaining indices are
/// completed by Petrick expansion with absorption. Every returned cover has
/// the same minimal (term count, literal count) cost; the list order is
/// deterministic.
pub fn minimal_covers(covered: &[u32], primes: &[Implicant]) -> Vec<Vec<usize>> {
    if covered.is_empty() {
        return vec![Vec::new()];
    }

    let covering_of = |index: u32| -> Vec<usize> {
        primes
            .iter()
            .enumerate()
            .filter(|(_, p)| p.covers_index(index))
            .map(|(i, _)| i)
            .collect()
    };

    let mut essential: BTreeSet<usize> = BTreeSet::new();
    for &index in covered {
        let covering = covering_of(index);
        if covering.len() == 1 {
            essential.insert(covering[0]);
        }
    }

    let remaining: Vec<u32> = covered
        .iter()
        .copied()
        .filter(|&index| !essential.iter().any(|&e| primes[e].covers_index(index)))
        .collect();

    // Petrick: expand the product of per-index sums, absorbing supersets.
    let mut products: Vec<BTreeSet<usize>> = vec![BTreeSet::new()];
    for &index in &remaining {
        let sums = covering_of(index);
        let mut expanded: Vec<BTreeSet<usize>> = Vec::new();
        for product in &products {
            for &prime in &sums {
                let mut grown = product.clone();
                grown.insert(prime);
                if !expanded.contains(&grown) {
                    expanded.push(grown);
                }
            }
        }
        expanded.sort_by(|a, b| a.len().cmp(&b.len()).then_with(|| a.cmp(b)));
        let mut kept: Vec<BTreeSet<usize>> = Vec::new();
        'candidates: for candidate in expanded {
            for smaller in &kept {
                if smaller.is_subset(&candidate) {
                    continue 'candidates;
                }
            }
            kept.push(candidate);
        }
        products = kept;
    }

    let mut solutions: Vec<Vec<usize>> = products
        .into_iter()
        .map(|product| {
            let mut cover = essential.clone();
            cover.extend(product);
            cover.into_iter().collect()
        })
        .collect();
    solutions.sort();
    solutions.dedup();

    let cost = |solution: &Vec<usize>| -> (usize, u32) {
        (
            solution.len(),
            solution.iter().map(|&i| primes[i].num_literals()).sum(),
        )
    };
    let best = solutions.iter().map(cost).min().unwrap_or((0, 0));
    let mut minimal: Vec<Vec<usize>> = solutions
        .into_iter()
        .filter(|s| cost(s) == best)
        .collect();
    minimal.sort_by_key(|solution| {
        solution
            .iter()
            .map(|&i| primes[i].pattern())
            .collect::<Vec<_>>()
    });
    minimal
}

/// The full outcome of minimizing one output variable.
#[derive(Debug, Clone)]
pub struct MinimizationResult {
    /// DNF or CNF
    pub kind: FormulaKind,
    /// Minterm (DNF) or maxterm (CNF) indices, ascending
    pub covered: Vec<u32>,
    /// Don't-care indices, ascending
    pub dont_cares: Vec<u32>,
    /// All prime implicants, in deterministic pattern order
    pub primes: Vec<Implicant>,
    /// Index → patterns of the prime implicants covering it
    pub chart: FxHashMap<u32, Vec<String>>,
    /// All equally minimal candidate formulas; only the first is used
    /// downstream
    pub solutions: Vec<Formula>,
    /// The chosen formula, `solutions[0]`
    pub formula: Formula,
    /// Expression tree of the chosen formula (De-Morgan-converted for CNF)
    pub expr: Expr,
}

/// Minimize one output column of a truth table.
///
/// Returns `None` for malformed input (empty table or output index out of
/// range) so callers can distinguish "not yet computed" from "computed and
/// empty"; this never panics.
///
/// # Examples
///
/// ```
/// use karnaugh_logic::{Cell, FormulaKind, TruthTable};
/// use karnaugh_logic::qmc::minimize_output;
///
/// let cells = [Cell::Zero, Cell::One, Cell::One, Cell::One];
/// let table = TruthTable::from_column(&["a", "b"], "f", &cells).unwrap();
/// let result = minimize_output(&table, 0, FormulaKind::Dnf).unwrap();
/// assert_eq!(result.formula.to_string(), "a + b");
/// ```
pub fn minimize_output(
    table: &TruthTable,
    output: usize,
    kind: FormulaKind,
) -> Option<MinimizationResult> {
    if table.is_empty() || output >= table.outputs().len() {
        return None;
    }
    let covered = match kind {
        FormulaKind::Dnf => table.minterms(output)?,
        FormulaKind::Cnf => table.maxterms(output)?,
    };
    let dont_cares = table.dont_cares(output)?;
    Some(minimize(covered, dont_cares, table.inputs(), kind))
}

/// Minimize an explicit covered/don't-care index pair.
pub fn minimize(
    covered: Vec<u32>,
    dont_cares: Vec<u32>,
    inputs: &[Arc<str>],
    kind: FormulaKind,
) -> MinimizationResult {
    // No covered indices: identically false function for the DNF path. The
    // CNF path must produce its constant directly here as well (no maxterms
    // means identically true), never via the complement of a full DNF run.
    if covered.is_empty() {
        let value = kind == FormulaKind::Cnf;
        let formula = Formula::constant(kind, value);
        return MinimizationResult {
            kind,
            covered,
            dont_cares,
            primes: Vec::new(),
            chart: FxHashMap::default(),
            solutions: vec![formula.clone()],
            formula,
            expr: Expr::Const(value),
        };
    }

    let primes = prime_implicants(&covered, &dont_cares, inputs.len());
    let chart = coverage_chart(&covered, &primes);
    trace!(
        "minimized {} indices (+{} dc) over {} inputs: {} primes",
        covered.len(),
        dont_cares.len(),
        inputs.len(),
        primes.len()
    );

    // A single all-dash implicant means the covered + don't-care sets fill
    // the whole space: constant function.
    if primes.len() == 1 && primes[0].num_literals() == 0 {
        let value = kind == FormulaKind::Dnf;
        let formula = Formula::constant(kind, value);
        return MinimizationResult {
            kind,
            covered,
            dont_cares,
            primes,
            chart,
            solutions: vec![formula.clone()],
            formula,
            expr: Expr::Const(value),
        };
    }

    let covers = minimal_covers(&covered, &primes);
    let solutions: Vec<Formula> = covers
        .iter()
        .map(|cover| cover_formula(cover, &primes, inputs, kind))
        .collect();
    let formula = solutions[0].clone();
    let expr = match kind {
        FormulaKind::Dnf => cover_expr(&covers[0], &primes, inputs),
        FormulaKind::Cnf => cover_expr(&covers[0], &primes, inputs).demorgan(),
    };

    MinimizationResult {
        kind,
        covered,
        dont_cares,
        primes,
        chart,
        solutions,
        formula,
        expr,
    }
}

fn coverage_chart(covered: &[u32], primes: &[Implicant]) -> FxHashMap<u32, Vec<String>> {
    covered
        .iter()
        .map(|&index| {
            let patterns = primes
                .iter()
                .filter(|p| p.covers_index(index))
                .map(|p| p.pattern())
                .collect();
            (index, patterns)
        })
        .collect()
}

/// Build the formula for one cover. For CNF the implicants describe the
/// complement function, so each literal's polarity flips (De Morgan).
fn cover_formula(
    cover: &[usize],
    primes: &[Implicant],
    inputs: &[Arc<str>],
    kind: FormulaKind,
) -> Formula {
    let mut formula = Formula::new(kind);
    for &index in cover {
        let implicant = &primes[index];
        let mut term = Term::new();
        for (var, name) in inputs.iter().enumerate() {
            if let Some(bit) = implicant.bit(var) {
                let negated = match kind {
                    FormulaKind::Dnf => !bit,
                    FormulaKind::Cnf => bit,
                };
                term.push(Literal {
                    variable: Arc::clone(name),
                    negated,
                });
            }
        }
        formula.push_term(term);
    }
    formula.canonicalize(inputs);
    formula
}

/// DNF-style expression tree for a cover (literal polarities taken directly
/// from the implicant bits).
fn cover_expr(cover: &[usize], primes: &[Implicant], inputs: &[Arc<str>]) -> Expr {
    let mut terms: Vec<Expr> = Vec::with_capacity(cover.len());
    for &index in cover {
        let implicant = &primes[index];
        let mut literals: Vec<Expr> = Vec::new();
        for (var, name) in inputs.iter().enumerate() {
            if let Some(bit) = implicant.bit(var) {
                let leaf = Expr::Var(Arc::clone(name));
                literals.push(if bit {
                    leaf
                } else {
                    Expr::Not(Box::new(leaf))
                });
            }
        }
        terms.push(match literals.pop() {
            Some(single) if literals.is_empty() => single,
            Some(last) => {
                literals.push(last);
                Expr::And(literals)
            }
            None => Expr::And(literals),
        });
    }
    match terms.pop() {
        Some(single) if terms.is_empty() => single,
        Some(last) => {
            terms.push(last);
            Expr::Or(terms)
        }
        None => Expr::Or(terms),
    }
}
