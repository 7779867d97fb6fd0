//! Minimize a small truth table and print both representations

use karnaugh_logic::qmc::minimize_output;
use karnaugh_logic::{Cell, FormulaKind, TruthTable};

fn main() {
    simplelog::TermLogger::init(
        simplelog::LevelFilter::Debug,
        simplelog::Config::default(),
        simplelog::TerminalMode::Mixed,
        simplelog::ColorChoice::Auto,
    )
    .ok();

    // f(a, b, c) = majority: 1 when at least two inputs are 1
    let cells = [
        Cell::Zero,
        Cell::Zero,
        Cell::Zero,
        Cell::One,
        Cell::Zero,
        Cell::One,
        Cell::One,
        Cell::One,
    ];
    let table = TruthTable::from_column(&["a", "b", "c"], "maj", &cells)
        .expect("column length matches 2^3");

    for kind in [FormulaKind::Dnf, FormulaKind::Cnf] {
        let result = minimize_output(&table, 0, kind).expect("valid request");
        println!("{:?}: maj = {}", kind, result.formula);
        println!("  prime implicants:");
        for prime in &result.primes {
            println!("    {}  covers {:?}", prime.pattern(), prime.covered());
        }
        if result.solutions.len() > 1 {
            println!("  {} equally minimal covers", result.solutions.len());
        }
    }
}
