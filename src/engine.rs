//! One computation over a truth-table snapshot
//!
//! [`compute`] is the unit of work the scheduler runs in the background: it
//! minimizes every output variable concurrently, rebuilds the color table
//! for the selected output, and assembles one response. The caller queries
//! [`crate::karnaugh`] on demand per visible cell with the returned formula;
//! no map geometry is computed here.

use std::sync::Arc;
use std::thread;

use crate::color::{term_color, ColorTable, TermColor};
use crate::coupling;
use crate::error::EngineError;
use crate::formula::FormulaKind;
use crate::qmc::{minimize_output, MinimizationResult};
use crate::table::TruthTable;
use log::debug;

/// Everything one computation needs, copied out of the caller's live state.
#[derive(Debug, Clone)]
pub struct ComputeRequest {
    pub table: TruthTable,
    /// Index of the output whose expression is displayed
    pub selected_output: usize,
    pub representation: FormulaKind,
    /// The previous run's color table, for color stability
    pub prev_colors: ColorTable,
}

/// Minimization outcome for one output variable.
///
/// `result` is `None` when the request was malformed for this output, so
/// the caller renders a neutral "not computed" state instead of an error.
#[derive(Debug, Clone)]
pub struct OutputResult {
    pub output: Arc<str>,
    pub result: Option<MinimizationResult>,
}

/// Display data for the selected output.
#[derive(Debug, Clone)]
pub struct SelectedView {
    /// Algebraic display string; coupling-rendered when several equally
    /// minimal expressions exist
    pub display: String,
    /// Per-term colors, parallel to the chosen formula's term list. Empty
    /// for a formula with no prime implicants (the constant cases that
    /// highlight nothing).
    pub term_colors: Vec<TermColor>,
    /// The rebuilt color table, to pass back as `prev_colors` next run
    pub colors: ColorTable,
}

/// The assembled result of one computation, correlated by request id.
#[derive(Debug, Clone)]
pub struct ComputeResponse {
    pub request_id: u64,
    /// One entry per output variable, in table order
    pub outputs: Vec<OutputResult>,
    /// `None` when the selected output index is out of range or yielded no
    /// result
    pub selected: Option<SelectedView>,
}

fn panic_message(payload: Box<dyn std::any::Any + Send>) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic".to_string()
    }
}

/// Run one full computation: all outputs minimized concurrently, then the
/// selected output's view assembled.
///
/// An invalid request (empty table, selected output out of range) yields
/// empty/`None` results, not an error. The only hard failure is an
/// internal inconsistency between a formula and its prime-implicant set
/// during color mapping.
pub fn compute(request: &ComputeRequest, request_id: u64) -> Result<ComputeResponse, EngineError> {
    let table = &request.table;
    let kind = request.representation;
    debug!(
        "computation {}: {} inputs, {} outputs, {:?}",
        request_id,
        table.inputs().len(),
        table.outputs().len(),
        kind
    );

    let results: Vec<Option<MinimizationResult>> = thread::scope(|scope| {
        let handles: Vec<_> = (0..table.outputs().len())
            .map(|output| scope.spawn(move || minimize_output(table, output, kind)))
            .collect();
        handles
            .into_iter()
            .map(|handle| {
                handle.join().map_err(|payload| EngineError::Fault {
                    message: panic_message(payload),
                })
            })
            .collect::<Result<_, _>>()
    })?;

    let outputs: Vec<OutputResult> = table
        .outputs()
        .iter()
        .zip(&results)
        .map(|(name, result)| OutputResult {
            output: Arc::clone(name),
            result: result.clone(),
        })
        .collect();

    let selected = match results.get(request.selected_output).and_then(Option::as_ref) {
        Some(result) => Some(selected_view(result, table, &request.prev_colors)?),
        None => None,
    };

    Ok(ComputeResponse {
        request_id,
        outputs,
        selected,
    })
}

fn selected_view(
    result: &MinimizationResult,
    table: &TruthTable,
    prev_colors: &ColorTable,
) -> Result<SelectedView, EngineError> {
    let patterns: Vec<String> = result.primes.iter().map(|p| p.pattern()).collect();
    let colors = ColorTable::rebuild(prev_colors, &patterns);

    let display = if result.solutions.len() > 1 {
        let candidates: Vec<Vec<String>> = result
            .solutions
            .iter()
            .map(|solution| solution.render_terms())
            .collect();
        coupling::render(&coupling::analyze(&candidates), result.kind)
    } else {
        result.formula.to_string()
    };

    let term_colors = if result.primes.is_empty() {
        Vec::new()
    } else {
        result
            .formula
            .terms()
            .iter()
            .map(|term| term_color(term, result.kind, &result.primes, table.inputs(), &colors))
            .collect::<Result<_, _>>()?
    };

    Ok(SelectedView {
        display,
        term_colors,
        colors,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::Cell;

    fn or_request(prev_colors: ColorTable) -> ComputeRequest {
        let cells = [Cell::Zero, Cell::One, Cell::One, Cell::One];
        ComputeRequest {
            table: TruthTable::from_column(&["a", "b"], "f", &cells).unwrap(),
            selected_output: 0,
            representation: FormulaKind::Dnf,
            prev_colors,
        }
    }

    #[test]
    fn test_compute_or() {
        let response = compute(&or_request(ColorTable::default()), 7).unwrap();
        assert_eq!(response.request_id, 7);
        assert_eq!(response.outputs.len(), 1);

        let result = response.outputs[0].result.as_ref().unwrap();
        assert_eq!(result.formula.to_string(), "a + b");

        let selected = response.selected.unwrap();
        assert_eq!(selected.display, "a + b");
        assert_eq!(selected.term_colors.len(), 2);
        assert_ne!(selected.term_colors[0], selected.term_colors[1]);
    }

    #[test]
    fn test_selected_out_of_range_is_none() {
        let mut request = or_request(ColorTable::default());
        request.selected_output = 5;
        let response = compute(&request, 1).unwrap();
        assert_eq!(response.outputs.len(), 1);
        assert!(response.selected.is_none());
    }

    #[test]
    fn test_multi_output_fan_out() {
        let mut table = TruthTable::new(&["a", "b"], &["f", "g"]);
        table.set(3, 0, Cell::One); // f = a*b
        table.set(0, 1, Cell::One); // g = ~a*~b
        let request = ComputeRequest {
            table,
            selected_output: 1,
            representation: FormulaKind::Dnf,
            prev_colors: ColorTable::default(),
        };

        let response = compute(&request, 2).unwrap();
        let f = response.outputs[0].result.as_ref().unwrap();
        let g = response.outputs[1].result.as_ref().unwrap();
        assert_eq!(f.formula.to_string(), "a*b");
        assert_eq!(g.formula.to_string(), "~a*~b");
        assert_eq!(response.selected.unwrap().display, "~a*~b");
    }

    #[test]
    fn test_constant_false_has_no_term_colors() {
        let cells = [Cell::Zero; 4];
        let request = ComputeRequest {
            table: TruthTable::from_column(&["a", "b"], "f", &cells).unwrap(),
            selected_output: 0,
            representation: FormulaKind::Dnf,
            prev_colors: ColorTable::default(),
        };
        let selected = compute(&request, 3).unwrap().selected.unwrap();
        assert_eq!(selected.display, "0");
        assert!(selected.term_colors.is_empty());
        assert!(selected.colors.is_empty());
    }

    #[test]
    fn test_colors_stable_across_runs() {
        let first = compute(&or_request(ColorTable::default()), 1).unwrap();
        let view = first.selected.unwrap();
        let second = compute(&or_request(view.colors.clone()), 2).unwrap();
        let again = second.selected.unwrap();
        assert_eq!(view.term_colors, again.term_colors);
    }
}
