//! Karnaugh-map layout and per-cell term coverage
//!
//! The grid is toroidal: row and column indices wrap at the map edges, and
//! the axes are ordered in reflected binary (Gray) code so physically
//! adjacent cells differ in exactly one input bit. Coverage is queried per
//! visible cell; nothing here is precomputed or cached.

use std::sync::Arc;

use crate::formula::{Formula, FormulaKind, Term};
use crate::table::bit_of;

/// Row/column arrangement of a 2 to 4 variable map.
///
/// The first `floor(n/2)` input variables form the row axis (they are the
/// high bits of the row index), the rest the column axis. Axis codes are the
/// Gray sequence, so `col_codes` reads `["00", "01", "11", "10"]` on a
/// two-variable axis.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layout {
    row_codes: Vec<String>,
    row_values: Vec<u32>,
    col_codes: Vec<String>,
    col_values: Vec<u32>,
    col_bits: usize,
}

fn gray_axis(bits: usize) -> (Vec<String>, Vec<u32>) {
    (0..1u32 << bits)
        .map(|i| {
            let gray = i ^ (i >> 1);
            (format!("{:0width$b}", gray, width = bits), gray)
        })
        .unzip()
}

impl Layout {
    /// The layout for `num_inputs` variables, `None` outside 2..=4.
    pub fn for_inputs(num_inputs: usize) -> Option<Layout> {
        if !(2..=4).contains(&num_inputs) {
            return None;
        }
        let row_bits = num_inputs / 2;
        let col_bits = num_inputs - row_bits;
        let (row_codes, row_values) = gray_axis(row_bits);
        let (col_codes, col_values) = gray_axis(col_bits);
        Some(Layout {
            row_codes,
            row_values,
            col_codes,
            col_values,
            col_bits,
        })
    }

    /// Gray code labels of the row axis, top to bottom.
    pub fn row_codes(&self) -> &[String] {
        &self.row_codes
    }

    /// Gray code labels of the column axis, left to right.
    pub fn col_codes(&self) -> &[String] {
        &self.col_codes
    }

    pub fn num_rows(&self) -> usize {
        self.row_codes.len()
    }

    pub fn num_cols(&self) -> usize {
        self.col_codes.len()
    }

    /// The truth-table row index displayed at grid position `(row, col)`.
    ///
    /// Row-axis variables are the high bits of the index, matching the
    /// MSB-first table encoding.
    pub fn cell_index(&self, row: usize, col: usize) -> u32 {
        (self.row_values[row % self.num_rows()] << self.col_bits)
            | self.col_values[col % self.num_cols()]
    }
}

/// Which of a highlighted cell's four edges merge with the neighboring cell.
///
/// An open edge means the highlight continues into the neighbor and no
/// border is drawn there.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Edges {
    pub top: bool,
    pub right: bool,
    pub bottom: bool,
    pub left: bool,
}

/// One term's highlight at one cell.
///
/// `term_index` points into the formula's term list; the caller pairs it
/// with the per-term color list of the same computation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Highlight {
    pub term_index: usize,
    pub edges: Edges,
}

/// Whether a term covers the given truth-table row index.
///
/// DNF: every literal's required bit must match. CNF: at least one literal
/// must match, with the polarity interpretation flipped, since CNF clause
/// literals are De-Morgan-negated relative to the complement cover they
/// highlight. The `"0"` sentinel covers nothing, `"1"` covers everything.
pub fn term_covers(term: &Term, kind: FormulaKind, index: u32, inputs: &[Arc<str>]) -> bool {
    if let Some(value) = term.as_constant() {
        return value;
    }
    let bit = |variable: &str| {
        inputs
            .iter()
            .position(|v| &**v == variable)
            .map(|var| bit_of(index, var, inputs.len()))
    };
    match kind {
        FormulaKind::Dnf => term
            .literals()
            .iter()
            .all(|l| bit(&l.variable) == Some(!l.negated)),
        FormulaKind::Cnf => term
            .literals()
            .iter()
            .any(|l| bit(&l.variable) == Some(l.negated)),
    }
}

/// CNF pre-check: a cell is eligible for highlighting only where the whole
/// formula evaluates false, which requires at least one clause to be
/// entirely false there.
fn some_clause_false(formula: &Formula, index: u32, inputs: &[Arc<str>]) -> bool {
    let assignment = |variable: &str| {
        inputs
            .iter()
            .position(|v| &**v == variable)
            .is_some_and(|var| bit_of(index, var, inputs.len()))
    };
    formula
        .terms()
        .iter()
        .any(|clause| !clause.evaluate(FormulaKind::Cnf, &assignment))
}

fn term_highlights(
    formula: &Formula,
    term: &Term,
    layout: &Layout,
    row: usize,
    col: usize,
    inputs: &[Arc<str>],
) -> bool {
    // Constant formulas bypass the CNF pre-check: a tautology is one
    // full-map region, a contradiction highlights nothing.
    if let Some(value) = term.as_constant() {
        return value;
    }
    let index = layout.cell_index(row, col);
    if !term_covers(term, formula.kind, index, inputs) {
        return false;
    }
    formula.kind == FormulaKind::Dnf || some_clause_false(formula, index, inputs)
}

fn axis_neighbor(position: usize, len: usize, step: isize) -> (usize, bool) {
    let raw = position as isize + step;
    if raw < 0 {
        (len - 1, true)
    } else if raw as usize >= len {
        (0, true)
    } else {
        (raw as usize, false)
    }
}

/// All highlights of `formula`'s terms at grid cell `(row, col)`.
///
/// An edge is open when the same term also highlights the toroidal neighbor
/// behind it, except where the edge wraps around the map boundary and the
/// term fills that entire row or column cycle: the physical map edge still
/// gets a border then, so a whole-row group reads as one closed rectangle
/// rather than a band with invisible ends.
///
/// # Examples
///
/// ```
/// use karnaugh_logic::{Formula, FormulaKind, Literal, Term};
/// use karnaugh_logic::karnaugh::{cell_highlights, Layout};
/// use std::sync::Arc;
///
/// let inputs: Vec<Arc<str>> = vec![Arc::from("a"), Arc::from("b")];
/// let layout = Layout::for_inputs(2).unwrap();
/// let mut f = Formula::new(FormulaKind::Dnf);
/// f.push_term(Term::from_literals([Literal::positive("a")]));
///
/// // Cell a=1, b=0: covered, merging rightward into a=1, b=1
/// let highlights = cell_highlights(&f, &layout, 1, 0, &inputs);
/// assert_eq!(highlights.len(), 1);
/// assert!(highlights[0].edges.right);
/// assert!(!highlights[0].edges.top);
/// ```
pub fn cell_highlights(
    formula: &Formula,
    layout: &Layout,
    row: usize,
    col: usize,
    inputs: &[Arc<str>],
) -> Vec<Highlight> {
    let mut highlights = Vec::new();
    for (term_index, term) in formula.terms().iter().enumerate() {
        if !term_highlights(formula, term, layout, row, col, inputs) {
            continue;
        }

        let lit = |r: usize, c: usize| term_highlights(formula, term, layout, r, c, inputs);
        let full_column = (0..layout.num_rows()).all(|r| lit(r, col));
        let full_row = (0..layout.num_cols()).all(|c| lit(row, c));

        let vertical = |step: isize| {
            let (neighbor, wraps) = axis_neighbor(row, layout.num_rows(), step);
            lit(neighbor, col) && !(wraps && full_column)
        };
        let horizontal = |step: isize| {
            let (neighbor, wraps) = axis_neighbor(col, layout.num_cols(), step);
            lit(row, neighbor) && !(wraps && full_row)
        };

        highlights.push(Highlight {
            term_index,
            edges: Edges {
                top: vertical(-1),
                bottom: vertical(1),
                left: horizontal(-1),
                right: horizontal(1),
            },
        });
    }
    highlights
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::formula::Literal;
    use crate::qmc::minimize_output;
    use crate::table::{Cell, TruthTable};

    fn vars(names: &[&str]) -> Vec<Arc<str>> {
        names.iter().map(|n| Arc::from(*n)).collect()
    }

    #[test]
    fn test_layout_shapes() {
        assert!(Layout::for_inputs(1).is_none());
        assert!(Layout::for_inputs(5).is_none());

        let two = Layout::for_inputs(2).unwrap();
        assert_eq!(two.row_codes(), ["0", "1"]);
        assert_eq!(two.col_codes(), ["0", "1"]);

        let three = Layout::for_inputs(3).unwrap();
        assert_eq!(three.num_rows(), 2);
        assert_eq!(three.col_codes(), ["00", "01", "11", "10"]);

        let four = Layout::for_inputs(4).unwrap();
        assert_eq!(four.row_codes(), ["00", "01", "11", "10"]);
        assert_eq!(four.num_cols(), 4);
    }

    #[test]
    fn test_cell_index_gray_order() {
        let layout = Layout::for_inputs(4).unwrap();
        // Grid (2, 3) is row code 11, column code 10: index 0b1110
        assert_eq!(layout.cell_index(2, 3), 0b1110);
        assert_eq!(layout.cell_index(0, 0), 0);
        // Adjacent cells differ in exactly one bit
        for row in 0..4 {
            for col in 0..4 {
                let here = layout.cell_index(row, col);
                let right = layout.cell_index(row, (col + 1) % 4);
                let below = layout.cell_index((row + 1) % 4, col);
                assert_eq!((here ^ right).count_ones(), 1);
                assert_eq!((here ^ below).count_ones(), 1);
            }
        }
    }

    #[test]
    fn test_dnf_coverage_bits() {
        let inputs = vars(&["a", "b", "c"]);
        let term = Term::from_literals([Literal::positive("a"), Literal::negative("c")]);
        // a=1, c=0: indices 1xx & x0 => 100 and 110
        assert!(term_covers(&term, FormulaKind::Dnf, 0b100, &inputs));
        assert!(term_covers(&term, FormulaKind::Dnf, 0b110, &inputs));
        assert!(!term_covers(&term, FormulaKind::Dnf, 0b101, &inputs));
        assert!(!term_covers(&term, FormulaKind::Dnf, 0b000, &inputs));
    }

    #[test]
    fn test_cnf_coverage_flips_polarity() {
        let inputs = vars(&["a", "b"]);
        // Clause (a + b) highlights the complement group a=0, b=0 and its
        // one-literal-off neighbors
        let clause = Term::from_literals([Literal::positive("a"), Literal::positive("b")]);
        assert!(term_covers(&clause, FormulaKind::Cnf, 0b00, &inputs));
        assert!(term_covers(&clause, FormulaKind::Cnf, 0b01, &inputs));
        assert!(!term_covers(&clause, FormulaKind::Cnf, 0b11, &inputs));
    }

    #[test]
    fn test_sentinel_coverage() {
        let inputs = vars(&["a", "b"]);
        for index in 0..4 {
            assert!(term_covers(&Term::constant(true), FormulaKind::Dnf, index, &inputs));
            assert!(!term_covers(&Term::constant(false), FormulaKind::Dnf, index, &inputs));
        }
    }

    // inputs [a, b], cells [0, 1, 1, 1]: a OR b
    fn or_formula() -> (Formula, Vec<Arc<str>>) {
        let cells = [Cell::Zero, Cell::One, Cell::One, Cell::One];
        let table = TruthTable::from_column(&["a", "b"], "f", &cells).unwrap();
        let result = minimize_output(&table, 0, FormulaKind::Dnf).unwrap();
        assert_eq!(result.formula.to_string(), "a + b");
        (result.formula, vars(&["a", "b"]))
    }

    #[test]
    fn test_or_highlights_three_cells() {
        let (formula, inputs) = or_formula();
        let layout = Layout::for_inputs(2).unwrap();

        let mut highlighted = Vec::new();
        for row in 0..2 {
            for col in 0..2 {
                if !cell_highlights(&formula, &layout, row, col, &inputs).is_empty() {
                    highlighted.push(layout.cell_index(row, col));
                }
            }
        }
        highlighted.sort();
        assert_eq!(highlighted, [1, 2, 3]);
    }

    #[test]
    fn test_or_shared_internal_edge() {
        let (formula, inputs) = or_formula();
        let layout = Layout::for_inputs(2).unwrap();

        // Term "a" (canonical first) covers the a=1 row: cells (1,0), (1,1).
        // The edge between them is open; the wrap-around ends are closed
        // because the term fills the whole row cycle.
        let left = cell_highlights(&formula, &layout, 1, 0, &inputs);
        let a_here: Vec<_> = left.iter().filter(|h| h.term_index == 0).collect();
        assert_eq!(a_here.len(), 1);
        assert_eq!(
            a_here[0].edges,
            Edges {
                top: false,
                right: true,
                bottom: false,
                left: false,
            }
        );

        let right = cell_highlights(&formula, &layout, 1, 1, &inputs);
        let a_there: Vec<_> = right.iter().filter(|h| h.term_index == 0).collect();
        assert_eq!(a_there[0].edges.left, true);
        assert_eq!(a_there[0].edges.right, false);
    }

    #[test]
    fn test_wrapping_group_keeps_edges_open() {
        // f(a,b,c) = ~c covers columns 00 and 10 of the 3-variable map,
        // which touch across the physical left/right boundary.
        let inputs = vars(&["a", "b", "c"]);
        let layout = Layout::for_inputs(3).unwrap();
        let mut formula = Formula::new(FormulaKind::Dnf);
        formula.push_term(Term::from_literals([Literal::negative("c")]));

        // Column 0 is code 00, column 3 is code 10; both have c=0
        let at_left = cell_highlights(&formula, &layout, 0, 0, &inputs);
        assert_eq!(at_left.len(), 1);
        // The wrap to column 3 is covered and the row cycle is not full
        assert!(at_left[0].edges.left);
        assert!(!at_left[0].edges.right);
        assert!(at_left[0].edges.bottom);
    }

    #[test]
    fn test_tautology_borders_only_at_map_edges() {
        let inputs = vars(&["a", "b", "c", "d"]);
        let layout = Layout::for_inputs(4).unwrap();
        let formula = Formula::constant(FormulaKind::Dnf, true);

        for row in 0..4 {
            for col in 0..4 {
                let highlights = cell_highlights(&formula, &layout, row, col, &inputs);
                assert_eq!(highlights.len(), 1);
                let edges = highlights[0].edges;
                assert_eq!(edges.top, row != 0);
                assert_eq!(edges.bottom, row != 3);
                assert_eq!(edges.left, col != 0);
                assert_eq!(edges.right, col != 3);
            }
        }
    }

    #[test]
    fn test_contradiction_highlights_nothing() {
        let inputs = vars(&["a", "b"]);
        let layout = Layout::for_inputs(2).unwrap();
        let formula = Formula::constant(FormulaKind::Dnf, false);
        for row in 0..2 {
            for col in 0..2 {
                assert!(cell_highlights(&formula, &layout, row, col, &inputs).is_empty());
            }
        }
    }

    #[test]
    fn test_cnf_precheck_gates_cells() {
        // XOR as CNF: (a + b)*(~a + ~b). The formula is false only at
        // ab=00 and ab=11; no other cell may highlight even though each
        // clause covers three cells on its own.
        let inputs = vars(&["a", "b"]);
        let layout = Layout::for_inputs(2).unwrap();
        let mut formula = Formula::new(FormulaKind::Cnf);
        formula.push_term(Term::from_literals([
            Literal::positive("a"),
            Literal::positive("b"),
        ]));
        formula.push_term(Term::from_literals([
            Literal::negative("a"),
            Literal::negative("b"),
        ]));

        let mut highlighted = Vec::new();
        for row in 0..2 {
            for col in 0..2 {
                let highlights = cell_highlights(&formula, &layout, row, col, &inputs);
                if !highlights.is_empty() {
                    highlighted.push(layout.cell_index(row, col));
                    // Isolated single-cell groups: all borders drawn
                    for h in &highlights {
                        assert_eq!(h.edges, Edges::default());
                    }
                }
            }
        }
        highlighted.sort();
        assert_eq!(highlighted, [0b00, 0b11]);
    }

    #[test]
    fn test_cnf_group_spans_gated_cells() {
        // f(a,b) = a as CNF is the single clause "a"; the formula is false
        // on the whole a=0 row, which highlights as one closed rectangle.
        let inputs = vars(&["a", "b"]);
        let layout = Layout::for_inputs(2).unwrap();
        let mut formula = Formula::new(FormulaKind::Cnf);
        formula.push_term(Term::from_literals([Literal::positive("a")]));

        let left = cell_highlights(&formula, &layout, 0, 0, &inputs);
        assert_eq!(left.len(), 1);
        assert_eq!(
            left[0].edges,
            Edges {
                top: false,
                right: true,
                bottom: false,
                left: false,
            }
        );
        assert!(cell_highlights(&formula, &layout, 1, 0, &inputs).is_empty());
    }
}
