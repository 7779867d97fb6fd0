//! PLA exchange format support
//!
//! The line-oriented text format spoken to the external two-level minimizer:
//! `.i`/`.o` declare variable counts, `.ilb`/`.ob` the name lists, `.p` the
//! row count; data lines are fixed-width input-pattern/output-pattern pairs
//! over `0`, `1`, `-`; `.e` terminates the table. When parsing a minimizer's
//! response, directive (`.`) and comment (`#`) lines are skipped and
//! malformed data lines are dropped with a log warning.

use std::io::{self, BufRead, Write};
use std::sync::Arc;

use crate::error::PlaError;
use crate::table::{bit_of, Cell, TruthTable};
use log::warn;

/// One reduced row read back from the minimizer: an input pattern and a
/// multi-output pattern, both possibly containing don't-cares.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaRow {
    /// One cell per input variable
    pub inputs: Vec<Cell>,
    /// One cell per output variable
    pub outputs: Vec<Cell>,
}

impl PlaRow {
    /// True when this row's input pattern matches the given row index.
    pub fn matches_index(&self, index: u32) -> bool {
        let n = self.inputs.len();
        self.inputs.iter().enumerate().all(|(var, cell)| match cell {
            Cell::DontCare => true,
            Cell::One => bit_of(index, var, n),
            Cell::Zero => !bit_of(index, var, n),
        })
    }
}

/// Encode a truth table to PLA text.
///
/// Every table row becomes one data line; don't-care output cells are
/// preserved as `-`.
///
/// # Examples
///
/// ```
/// use karnaugh_logic::{Cell, TruthTable};
/// use karnaugh_logic::pla::write_pla;
///
/// let cells = [Cell::Zero, Cell::One, Cell::One, Cell::DontCare];
/// let table = TruthTable::from_column(&["a", "b"], "f", &cells).unwrap();
/// let mut text = Vec::new();
/// write_pla(&table, &mut text).unwrap();
/// let text = String::from_utf8(text).unwrap();
/// assert!(text.contains(".i 2"));
/// assert!(text.contains("11 -"));
/// assert!(text.ends_with(".e\n"));
/// ```
pub fn write_pla<W: Write>(table: &TruthTable, writer: &mut W) -> io::Result<()> {
    writeln!(writer, ".i {}", table.inputs().len())?;
    write!(writer, ".ilb")?;
    for label in table.inputs() {
        write!(writer, " {}", label)?;
    }
    writeln!(writer)?;

    writeln!(writer, ".o {}", table.outputs().len())?;
    write!(writer, ".ob")?;
    for label in table.outputs() {
        write!(writer, " {}", label)?;
    }
    writeln!(writer)?;

    writeln!(writer, ".p {}", table.num_rows())?;
    for row in 0..table.num_rows() as u32 {
        for var in 0..table.inputs().len() {
            write!(writer, "{}", if bit_of(row, var, table.inputs().len()) { '1' } else { '0' })?;
        }
        write!(writer, " ")?;
        for output in 0..table.outputs().len() {
            // Row and output are in range by construction
            let cell = table.cell(row, output).unwrap_or(Cell::Zero);
            write!(writer, "{}", cell.to_char())?;
        }
        writeln!(writer)?;
    }
    writeln!(writer, ".e")?;
    Ok(())
}

/// Encode a truth table to a PLA string.
pub fn to_pla_string(table: &TruthTable) -> String {
    let mut buffer = Vec::new();
    // Writing into a Vec cannot fail
    let _ = write_pla(table, &mut buffer);
    // PLA text is ASCII
    String::from_utf8(buffer).unwrap_or_default()
}

fn parse_pattern(token: &str) -> Option<Vec<Cell>> {
    token.chars().map(Cell::from_char).collect()
}

/// Parse reduced rows from a minimizer's output.
///
/// Directive lines (starting with `.`), comment lines (starting with `#`)
/// and empty lines are skipped. A data line must consist of exactly an
/// input-pattern token of width `num_inputs` and an output-pattern token of
/// width `num_outputs`; anything else is dropped silently (with a log
/// warning), matching the tolerant read-back contract.
pub fn read_rows<R: BufRead>(
    reader: R,
    num_inputs: usize,
    num_outputs: usize,
) -> Result<Vec<PlaRow>, PlaError> {
    let mut rows = Vec::new();
    for line in reader.lines() {
        let line = line?;
        let line = line.trim();
        if line.is_empty() || line.starts_with('.') || line.starts_with('#') {
            continue;
        }

        let tokens: Vec<&str> = line.split_whitespace().collect();
        let parsed = match tokens.as_slice() {
            [input_token, output_token]
                if input_token.len() == num_inputs && output_token.len() == num_outputs =>
            {
                parse_pattern(input_token)
                    .zip(parse_pattern(output_token))
                    .map(|(inputs, outputs)| PlaRow { inputs, outputs })
            }
            _ => None,
        };
        match parsed {
            Some(row) => rows.push(row),
            None => warn!("dropping malformed PLA line: {:?}", line),
        }
    }
    Ok(rows)
}

/// Parse a full PLA file into a [`TruthTable`].
///
/// Used by the CLI to drive the Quine-McCluskey core on PLA inputs. Data
/// lines with `-` in the input pattern are expanded to every matching row;
/// output characters map `1` → one, `0` → zero, `-` → don't-care.
pub fn read_table<R: BufRead>(reader: R) -> Result<TruthTable, PlaError> {
    let mut num_inputs: Option<usize> = None;
    let mut num_outputs: Option<usize> = None;
    let mut input_labels: Option<Vec<Arc<str>>> = None;
    let mut output_labels: Option<Vec<Arc<str>>> = None;
    let mut data_rows: Vec<PlaRow> = Vec::new();

    for line in reader.lines() {
        let line = line?;
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        if line.starts_with('.') {
            let parts: Vec<&str> = line.split_whitespace().collect();
            match parts.first().copied() {
                Some(".i") => {
                    let value =
                        parts.get(1).and_then(|s| s.parse().ok()).ok_or_else(|| {
                            PlaError::InvalidDirective {
                                directive: ".i".to_string(),
                                value: parts.get(1).unwrap_or(&"").to_string(),
                            }
                        })?;
                    num_inputs = Some(value);
                }
                Some(".o") => {
                    let value =
                        parts.get(1).and_then(|s| s.parse().ok()).ok_or_else(|| {
                            PlaError::InvalidDirective {
                                directive: ".o".to_string(),
                                value: parts.get(1).unwrap_or(&"").to_string(),
                            }
                        })?;
                    num_outputs = Some(value);
                }
                Some(".ilb") => {
                    input_labels = Some(parts.iter().skip(1).map(|s| Arc::from(*s)).collect());
                }
                Some(".ob") => {
                    output_labels = Some(parts.iter().skip(1).map(|s| Arc::from(*s)).collect());
                }
                Some(".e") | Some(".end") => break,
                // .p and unknown directives carry no information we need
                _ => {}
            }
            continue;
        }

        let tokens: Vec<&str> = line.split_whitespace().collect();
        if let [input_token, output_token] = tokens.as_slice() {
            let inputs = checked_pattern(input_token)?;
            let outputs = checked_pattern(output_token)?;
            data_rows.push(PlaRow { inputs, outputs });
        }
    }

    let num_inputs = match (num_inputs, data_rows.first()) {
        (Some(n), _) => n,
        (None, Some(row)) => row.inputs.len(),
        (None, None) => return Err(PlaError::MissingInputCount),
    };
    let num_outputs = match (num_outputs, data_rows.first()) {
        (Some(n), _) => n,
        (None, Some(row)) => row.outputs.len(),
        (None, None) => return Err(PlaError::MissingOutputCount),
    };

    let input_labels = checked_labels(input_labels, num_inputs, "input", 'x')?;
    let output_labels = checked_labels(output_labels, num_outputs, "output", 'y')?;

    let mut table = TruthTable::new(&input_labels, &output_labels);
    for row in &data_rows {
        if row.inputs.len() != num_inputs || row.outputs.len() != num_outputs {
            warn!("dropping PLA row with mismatched widths: {:?}", row);
            continue;
        }
        for index in 0..table.num_rows() as u32 {
            if row.matches_index(index) {
                for (output, &cell) in row.outputs.iter().enumerate() {
                    if cell != Cell::Zero {
                        table.set(index, output, cell);
                    }
                }
            }
        }
    }
    Ok(table)
}

fn checked_pattern(token: &str) -> Result<Vec<Cell>, PlaError> {
    token
        .chars()
        .enumerate()
        .map(|(position, character)| {
            Cell::from_char(character).ok_or(PlaError::InvalidPatternCharacter {
                character,
                position,
            })
        })
        .collect()
}

fn checked_labels(
    labels: Option<Vec<Arc<str>>>,
    expected: usize,
    label_kind: &'static str,
    prefix: char,
) -> Result<Vec<Arc<str>>, PlaError> {
    match labels {
        Some(labels) if labels.len() == expected => Ok(labels),
        Some(labels) => Err(PlaError::LabelCountMismatch {
            label_kind,
            expected,
            actual: labels.len(),
        }),
        None => Ok((0..expected)
            .map(|i| Arc::from(format!("{}{}", prefix, i).as_str()))
            .collect()),
    }
}
