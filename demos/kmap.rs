//! Render a Karnaugh map with ASCII group markers

use karnaugh_logic::karnaugh::{cell_highlights, Layout};
use karnaugh_logic::qmc::minimize_output;
use karnaugh_logic::{Cell, ColorTable, FormulaKind, TruthTable};

fn main() {
    simplelog::TermLogger::init(
        simplelog::LevelFilter::Info,
        simplelog::Config::default(),
        simplelog::TerminalMode::Mixed,
        simplelog::ColorChoice::Auto,
    )
    .ok();

    // f(a, b, c, d) = ~b*~d + a*c
    let mut table = TruthTable::new(&["a", "b", "c", "d"], &["f"]);
    for row in 0..16u32 {
        let a = table.input_bit(row, 0);
        let b = table.input_bit(row, 1);
        let c = table.input_bit(row, 2);
        let d = table.input_bit(row, 3);
        if (!b && !d) || (a && c) {
            table.set(row, 0, Cell::One);
        }
    }

    let result = minimize_output(&table, 0, FormulaKind::Dnf).unwrap();
    println!("f = {}", result.formula);

    let mut colors = ColorTable::default();
    for prime in &result.primes {
        let color = colors.assign(&prime.pattern());
        println!("  {}  border {}  fill {}", prime.pattern(), color.border, color.fill);
    }

    let layout = Layout::for_inputs(4).unwrap();
    println!("\n      {}", layout.col_codes().join("  "));
    for (row, row_code) in layout.row_codes().iter().enumerate() {
        print!("  {}  ", row_code);
        for col in 0..layout.num_cols() {
            let index = layout.cell_index(row, col);
            let value = match table.cell(index, 0) {
                Some(Cell::One) => '1',
                Some(Cell::DontCare) => '-',
                _ => '0',
            };
            let groups = cell_highlights(&result.formula, &layout, row, col, table.inputs());
            let marker = match groups.len() {
                0 => ' ',
                1 => char::from(b'A' + groups[0].term_index as u8),
                _ => '*',
            };
            print!(" {}{} ", value, marker);
        }
        println!();
    }
}
