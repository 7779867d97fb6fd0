//! Bridge to an external two-level minimizer process
//!
//! The alternative minimization path: the truth table is encoded to PLA text
//! and piped to a sandboxed external minimizer binary on stdin; the reduced
//! rows are read back from its stdout. This path is independent of the
//! Quine-McCluskey core and is never reconciled with it; both are valid
//! sources of a minimized cover.
//!
//! Failure is soft throughout: a spawn error, a non-zero exit status or
//! unparsable output is logged and yields an empty row set; it never aborts
//! the rest of a computation.

use std::io::{BufReader, Write};
use std::process::{Command, Stdio};

use crate::pla::{read_rows, to_pla_string, PlaRow};
use crate::table::TruthTable;
use log::{debug, warn};

/// Default external minimizer command.
pub const DEFAULT_MINIMIZER: &str = "espresso";

/// Invokes an external two-level minimizer over the PLA text protocol.
///
/// # Examples
///
/// Using `cat` as an identity minimizer (it echoes the PLA back, so the
/// decoded rows reproduce the input table):
///
/// ```no_run
/// use karnaugh_logic::{Cell, TruthTable};
/// use karnaugh_logic::bridge::MinimizerBridge;
///
/// let cells = [Cell::Zero, Cell::One, Cell::One, Cell::One];
/// let table = TruthTable::from_column(&["a", "b"], "f", &cells).unwrap();
/// let bridge = MinimizerBridge::with_command("cat", &[]);
/// let rows = bridge.minimize_table(&table);
/// assert_eq!(rows.len(), 4);
/// ```
#[derive(Debug, Clone)]
pub struct MinimizerBridge {
    program: String,
    args: Vec<String>,
}

impl Default for MinimizerBridge {
    fn default() -> Self {
        MinimizerBridge {
            program: DEFAULT_MINIMIZER.to_string(),
            args: Vec::new(),
        }
    }
}

impl MinimizerBridge {
    /// A bridge invoking the given program with fixed arguments.
    pub fn with_command<S: AsRef<str>>(program: S, args: &[S]) -> Self {
        MinimizerBridge {
            program: program.as_ref().to_string(),
            args: args.iter().map(|a| a.as_ref().to_string()).collect(),
        }
    }

    /// Run the external minimizer on a truth table.
    ///
    /// Returns the reduced rows, or an empty vector on any failure.
    pub fn minimize_table(&self, table: &TruthTable) -> Vec<PlaRow> {
        self.minimize_pla(
            &to_pla_string(table),
            table.inputs().len(),
            table.outputs().len(),
        )
    }

    /// Run the external minimizer on already-encoded PLA text.
    pub fn minimize_pla(&self, pla_text: &str, num_inputs: usize, num_outputs: usize) -> Vec<PlaRow> {
        debug!(
            "invoking external minimizer {:?} ({} inputs, {} outputs)",
            self.program, num_inputs, num_outputs
        );

        let mut child = match Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .spawn()
        {
            Ok(child) => child,
            Err(err) => {
                warn!("failed to spawn external minimizer {:?}: {}", self.program, err);
                return Vec::new();
            }
        };

        if let Some(mut stdin) = child.stdin.take() {
            if let Err(err) = stdin.write_all(pla_text.as_bytes()) {
                warn!("failed to write PLA to external minimizer: {}", err);
            }
            // Dropping stdin closes the pipe and signals end of input
        }

        let stdout = match child.stdout.take() {
            Some(stdout) => stdout,
            None => {
                warn!("external minimizer produced no stdout handle");
                let _ = child.wait();
                return Vec::new();
            }
        };
        let rows = match read_rows(BufReader::new(stdout), num_inputs, num_outputs) {
            Ok(rows) => rows,
            Err(err) => {
                warn!("failed to parse external minimizer output: {}", err);
                Vec::new()
            }
        };

        match child.wait() {
            Ok(status) if status.success() => rows,
            Ok(status) => {
                warn!("external minimizer exited with status {}", status);
                Vec::new()
            }
            Err(err) => {
                warn!("failed to wait for external minimizer: {}", err);
                Vec::new()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::Cell;
    use test_log::test;

    fn or_table() -> TruthTable {
        let cells = [Cell::Zero, Cell::One, Cell::One, Cell::One];
        TruthTable::from_column(&["a", "b"], "f", &cells).unwrap()
    }

    #[test]
    fn test_identity_minimizer_round_trip() {
        // `cat` echoes the PLA; directives are skipped on read-back, so the
        // covered/uncovered pattern survives unchanged.
        let table = or_table();
        let bridge = MinimizerBridge::with_command("cat", &[]);
        let rows = bridge.minimize_table(&table);
        assert_eq!(rows.len(), 4);
        for index in 0..4u32 {
            let expected = table.cell(index, 0).unwrap();
            let matching: Vec<_> = rows.iter().filter(|r| r.matches_index(index)).collect();
            assert_eq!(matching.len(), 1);
            assert_eq!(matching[0].outputs[0], expected);
        }
    }

    #[test]
    fn test_missing_binary_yields_empty() {
        let bridge = MinimizerBridge::with_command("definitely-not-a-minimizer-binary", &[]);
        assert!(bridge.minimize_table(&or_table()).is_empty());
    }

    #[test]
    fn test_nonzero_exit_yields_empty() {
        let bridge = MinimizerBridge::with_command("false", &[]);
        assert!(bridge.minimize_table(&or_table()).is_empty());
    }
}
