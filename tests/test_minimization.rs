//! Integration tests for the minimization pipeline

use karnaugh_logic::qmc::minimize_output;
use karnaugh_logic::*;
use pretty_assertions::assert_eq;

fn table_from(inputs: &[&str], cells: &[Cell]) -> TruthTable {
    TruthTable::from_column(inputs, "f", cells).unwrap()
}

// Every 3-variable single-output function, by its 8-bit truth vector
fn three_var_table(bits: u32) -> TruthTable {
    let cells: Vec<Cell> = (0..8)
        .map(|row| {
            if bits >> row & 1 == 1 {
                Cell::One
            } else {
                Cell::Zero
            }
        })
        .collect();
    table_from(&["a", "b", "c"], &cells)
}

#[test]
fn test_minterm_and_maxterm_sets_match_cells() {
    let mut table = TruthTable::new(&["a", "b", "c"], &["f"]);
    table.set(1, 0, Cell::One);
    table.set(4, 0, Cell::One);
    table.set(6, 0, Cell::DontCare);

    assert_eq!(table.minterms(0), Some(vec![1, 4]));
    assert_eq!(table.maxterms(0), Some(vec![0, 2, 3, 5, 7]));
    assert_eq!(table.dont_cares(0), Some(vec![6]));

    let result = minimize_output(&table, 0, FormulaKind::Dnf).unwrap();
    assert_eq!(result.covered, vec![1, 4]);
    assert_eq!(result.dont_cares, vec![6]);
}

#[test]
fn test_idempotent_runs_yield_identical_formulas() {
    let table = three_var_table(0b1011_0110);
    for kind in [FormulaKind::Dnf, FormulaKind::Cnf] {
        let first = minimize_output(&table, 0, kind).unwrap();
        let second = minimize_output(&table, 0, kind).unwrap();
        assert_eq!(first.formula, second.formula);
        assert_eq!(first.formula.to_string(), second.formula.to_string());
        let first_patterns: Vec<String> = first.primes.iter().map(|p| p.pattern()).collect();
        let second_patterns: Vec<String> = second.primes.iter().map(|p| p.pattern()).collect();
        assert_eq!(first_patterns, second_patterns);
    }
}

#[test]
fn test_duality_over_all_three_variable_functions() {
    // With no don't-cares, the DNF and CNF of the same function must agree
    // with the table on every row.
    for bits in 0..256u32 {
        let table = three_var_table(bits);
        let dnf = minimize_output(&table, 0, FormulaKind::Dnf).unwrap();
        let cnf = minimize_output(&table, 0, FormulaKind::Cnf).unwrap();
        for row in 0..8u32 {
            let assignment = |name: &str| match name {
                "a" => table.input_bit(row, 0),
                "b" => table.input_bit(row, 1),
                _ => table.input_bit(row, 2),
            };
            let expected = bits >> row & 1 == 1;
            assert_eq!(dnf.formula.evaluate(&assignment), expected, "DNF {:#010b} row {}", bits, row);
            assert_eq!(cnf.formula.evaluate(&assignment), expected, "CNF {:#010b} row {}", bits, row);
            assert_eq!(dnf.expr.evaluate(&assignment), expected);
            assert_eq!(cnf.expr.evaluate(&assignment), expected);
        }
    }
}

#[test]
fn test_constant_false_structure() {
    let table = table_from(&["a", "b"], &[Cell::Zero; 4]);
    let result = minimize_output(&table, 0, FormulaKind::Dnf).unwrap();

    assert_eq!(result.formula.kind, FormulaKind::Dnf);
    assert_eq!(result.formula.terms().len(), 1);
    let literals = result.formula.terms()[0].literals();
    assert_eq!(literals.len(), 1);
    assert_eq!(literals[0].variable.as_ref(), "0");
    assert!(!literals[0].negated);
    assert_eq!(result.formula.to_string(), "0");
}

#[test]
fn test_constant_true_structure() {
    let table = table_from(&["a", "b"], &[Cell::One; 4]);
    let result = minimize_output(&table, 0, FormulaKind::Dnf).unwrap();
    assert_eq!(result.formula.as_constant(), Some(true));
    assert_eq!(result.formula.to_string(), "1");

    // The CNF view of the same function is the constant as well
    let cnf = minimize_output(&table, 0, FormulaKind::Cnf).unwrap();
    assert_eq!(cnf.formula.as_constant(), Some(true));
}

#[test]
fn test_dont_cares_relax_the_cover() {
    // f(a,b) = 1 at ab=11, don't-care at ab=10: the don't-care is absorbed
    // and the cover collapses to the single literal a.
    let table = table_from(&["a", "b"], &[Cell::Zero, Cell::Zero, Cell::DontCare, Cell::One]);
    let result = minimize_output(&table, 0, FormulaKind::Dnf).unwrap();
    assert_eq!(result.formula.to_string(), "a");
}

#[test]
fn test_chart_covers_every_minterm() {
    let table = three_var_table(0b0110_1001);
    let result = minimize_output(&table, 0, FormulaKind::Dnf).unwrap();
    for &minterm in &result.covered {
        let covering = result.chart.get(&minterm).unwrap();
        assert!(!covering.is_empty(), "minterm {} uncovered", minterm);
        for pattern in covering {
            assert!(result.primes.iter().any(|p| &p.pattern() == pattern));
        }
    }
}

#[test]
fn test_invalid_requests_yield_none() {
    let table = table_from(&["a", "b"], &[Cell::One; 4]);
    assert!(minimize_output(&table, 1, FormulaKind::Dnf).is_none());

    let empty = TruthTable::new::<&str>(&[], &[]);
    assert!(minimize_output(&empty, 0, FormulaKind::Dnf).is_none());
}
