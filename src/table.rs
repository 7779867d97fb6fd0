//! Truth-table snapshots handed to the engine
//!
//! A [`TruthTable`] is plain, caller-owned data: input and output variable
//! names plus a `2^|inputs| × |outputs|` cell matrix. Row index *i* encodes
//! the input assignment as the binary expansion of *i* with the **first**
//! input variable as the most significant bit; every index/term/minterm
//! conversion in the engine assumes this convention.

use std::sync::Arc;

/// One cell of the truth table (or one position of a PLA pattern).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cell {
    /// Output is 0 at this row
    Zero,
    /// Output is 1 at this row
    One,
    /// Output is unconstrained and may be assigned either value
    DontCare,
}

impl Cell {
    /// Parse a PLA pattern character (`0`, `1`, `-`).
    pub fn from_char(c: char) -> Option<Cell> {
        match c {
            '0' => Some(Cell::Zero),
            '1' => Some(Cell::One),
            '-' => Some(Cell::DontCare),
            _ => None,
        }
    }

    /// The PLA pattern character for this cell.
    pub fn to_char(self) -> char {
        match self {
            Cell::Zero => '0',
            Cell::One => '1',
            Cell::DontCare => '-',
        }
    }
}

/// A snapshot of the caller's truth table.
///
/// # Examples
///
/// ```
/// use karnaugh_logic::{Cell, TruthTable};
///
/// // f(a, b) = a OR b
/// let mut table = TruthTable::new(&["a", "b"], &["f"]);
/// table.set(1, 0, Cell::One);
/// table.set(2, 0, Cell::One);
/// table.set(3, 0, Cell::One);
///
/// assert_eq!(table.minterms(0), Some(vec![1, 2, 3]));
/// assert_eq!(table.maxterms(0), Some(vec![0]));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TruthTable {
    inputs: Vec<Arc<str>>,
    outputs: Vec<Arc<str>>,
    /// Row-major, `num_rows() * outputs.len()` cells
    cells: Vec<Cell>,
}

impl TruthTable {
    /// Create a table with all cells set to [`Cell::Zero`].
    pub fn new<S: AsRef<str>>(inputs: &[S], outputs: &[S]) -> Self {
        let inputs: Vec<Arc<str>> = inputs.iter().map(|s| Arc::from(s.as_ref())).collect();
        let outputs: Vec<Arc<str>> = outputs.iter().map(|s| Arc::from(s.as_ref())).collect();
        let rows = 1usize << inputs.len();
        let cells = vec![Cell::Zero; rows * outputs.len()];
        TruthTable {
            inputs,
            outputs,
            cells,
        }
    }

    /// Create a table from a whole column of cells for a single output.
    ///
    /// `column` must have exactly `2^|inputs|` entries.
    pub fn from_column<S: AsRef<str>>(inputs: &[S], output: S, column: &[Cell]) -> Option<Self> {
        let mut table = TruthTable::new(inputs, std::slice::from_ref(&output));
        if column.len() != table.num_rows() {
            return None;
        }
        for (row, &cell) in column.iter().enumerate() {
            table.set(row as u32, 0, cell);
        }
        Some(table)
    }

    /// Input variable names, in order (first = MSB of the row index).
    pub fn inputs(&self) -> &[Arc<str>] {
        &self.inputs
    }

    /// Output variable names, in order.
    pub fn outputs(&self) -> &[Arc<str>] {
        &self.outputs
    }

    /// Number of rows, `2^|inputs|`.
    pub fn num_rows(&self) -> usize {
        1usize << self.inputs.len()
    }

    /// True when the table has no inputs or no outputs.
    pub fn is_empty(&self) -> bool {
        self.inputs.is_empty() || self.outputs.is_empty()
    }

    /// Read one cell; out-of-range coordinates yield `None`.
    pub fn cell(&self, row: u32, output: usize) -> Option<Cell> {
        if (row as usize) < self.num_rows() && output < self.outputs.len() {
            Some(self.cells[row as usize * self.outputs.len() + output])
        } else {
            None
        }
    }

    /// Write one cell; out-of-range coordinates are ignored.
    pub fn set(&mut self, row: u32, output: usize, cell: Cell) {
        if (row as usize) < self.num_rows() && output < self.outputs.len() {
            self.cells[row as usize * self.outputs.len() + output] = cell;
        }
    }

    /// Row indices where the output cell is `1` (the DNF covered set).
    pub fn minterms(&self, output: usize) -> Option<Vec<u32>> {
        self.rows_where(output, Cell::One)
    }

    /// Row indices where the output cell is `0` (the CNF covered set).
    pub fn maxterms(&self, output: usize) -> Option<Vec<u32>> {
        self.rows_where(output, Cell::Zero)
    }

    /// Row indices where the output cell is `-`.
    pub fn dont_cares(&self, output: usize) -> Option<Vec<u32>> {
        self.rows_where(output, Cell::DontCare)
    }

    fn rows_where(&self, output: usize, wanted: Cell) -> Option<Vec<u32>> {
        if output >= self.outputs.len() || self.is_empty() {
            return None;
        }
        Some(
            (0..self.num_rows() as u32)
                .filter(|&row| self.cell(row, output) == Some(wanted))
                .collect(),
        )
    }

    /// The value of input variable `var` (by position) at row `row`.
    ///
    /// First input variable is the most significant bit of the row index.
    pub fn input_bit(&self, row: u32, var: usize) -> bool {
        bit_of(row, var, self.inputs.len())
    }
}

/// Extract the bit for input position `var` from a row index, MSB-first.
pub fn bit_of(row: u32, var: usize, num_inputs: usize) -> bool {
    debug_assert!(var < num_inputs);
    (row >> (num_inputs - 1 - var)) & 1 == 1
}
