//! Coupling-term analysis over equally minimal expressions
//!
//! When the cover search yields several equally minimal expressions for the
//! same function, their rendered term lists are aligned position-by-position
//! (shorter lists padded) and each position is classified as *constant* (the
//! same term string in every candidate) or *variable* (at least one
//! candidate differs). Variable positions collect the distinct alternatives
//! in order of first appearance; the final rendering sorts all positions by
//! a normalized key with negation markup stripped, so the output is
//! deterministic regardless of input order.

use crate::formula::FormulaKind;

/// One aligned position of the candidate expressions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CoupledTerm {
    /// The same term appears here in every candidate
    Fixed(String),
    /// Candidates disagree; the distinct alternatives, first appearance
    /// order, deduplicated
    Alternatives(Vec<String>),
}

impl CoupledTerm {
    /// Sort key: the representative term with `~` markup stripped.
    fn sort_key(&self) -> String {
        let representative = match self {
            CoupledTerm::Fixed(term) => term,
            CoupledTerm::Alternatives(alternatives) => {
                alternatives.first().map(String::as_str).unwrap_or("")
            }
        };
        representative.replace('~', "")
    }
}

/// Align candidate term lists and partition positions into constant and
/// variable groups.
///
/// # Examples
///
/// ```
/// use karnaugh_logic::coupling::{analyze, CoupledTerm};
///
/// let candidates = vec![
///     vec!["a*b".to_string(), "~a*c".to_string()],
///     vec!["a*b".to_string(), "b*c".to_string()],
/// ];
/// let coupled = analyze(&candidates);
/// assert_eq!(coupled[0], CoupledTerm::Fixed("a*b".to_string()));
/// assert_eq!(
///     coupled[1],
///     CoupledTerm::Alternatives(vec!["~a*c".to_string(), "b*c".to_string()])
/// );
/// ```
pub fn analyze(candidates: &[Vec<String>]) -> Vec<CoupledTerm> {
    let width = candidates.iter().map(Vec::len).max().unwrap_or(0);
    let mut coupled = Vec::with_capacity(width);

    for position in 0..width {
        // Literal string comparison; semantically equal but differently
        // rendered terms count as different on purpose.
        let column: Vec<&str> = candidates
            .iter()
            .map(|candidate| {
                candidate
                    .get(position)
                    .map(String::as_str)
                    .unwrap_or("")
            })
            .collect();

        let first = column.first().copied().unwrap_or("");
        if column.iter().all(|&term| term == first) {
            coupled.push(CoupledTerm::Fixed(first.to_string()));
        } else {
            let mut alternatives: Vec<String> = Vec::new();
            for term in column {
                // Padding artifacts carry no term
                if !term.is_empty() && !alternatives.iter().any(|a| a == term) {
                    alternatives.push(term.to_string());
                }
            }
            coupled.push(CoupledTerm::Alternatives(alternatives));
        }
    }

    coupled.sort_by_key(CoupledTerm::sort_key);
    coupled
}

/// Render an aligned position list as one algebraic display string.
///
/// Alternatives are shown as an either/or group: `(x | y)`.
pub fn render(coupled: &[CoupledTerm], kind: FormulaKind) -> String {
    let sep = match kind {
        FormulaKind::Dnf => " + ",
        FormulaKind::Cnf => "*",
    };
    coupled
        .iter()
        .map(|position| match position {
            CoupledTerm::Fixed(term) => term.clone(),
            CoupledTerm::Alternatives(alternatives) => {
                format!("({})", alternatives.join(" | "))
            }
        })
        .collect::<Vec<_>>()
        .join(sep)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_single_candidate_is_all_fixed() {
        let coupled = analyze(&[strings(&["a*b", "c"])]);
        assert_eq!(
            coupled,
            vec![
                CoupledTerm::Fixed("a*b".to_string()),
                CoupledTerm::Fixed("c".to_string()),
            ]
        );
    }

    #[test]
    fn test_variable_positions_deduplicate() {
        let candidates = vec![
            strings(&["a", "b*c"]),
            strings(&["a", "b*d"]),
            strings(&["a", "b*c"]),
        ];
        let coupled = analyze(&candidates);
        assert_eq!(coupled[0], CoupledTerm::Fixed("a".to_string()));
        assert_eq!(
            coupled[1],
            CoupledTerm::Alternatives(strings(&["b*c", "b*d"]))
        );
    }

    #[test]
    fn test_padding_shorter_candidates() {
        let candidates = vec![strings(&["a", "b"]), strings(&["a"])];
        let coupled = analyze(&candidates);
        assert_eq!(coupled[0], CoupledTerm::Fixed("a".to_string()));
        // The padded position keeps only the real alternative
        assert_eq!(coupled[1], CoupledTerm::Alternatives(strings(&["b"])));
    }

    #[test]
    fn test_sorting_strips_negation_markup() {
        // ~a*b sorts as "ab", before b*c
        let candidates = vec![strings(&["b*c", "~a*b"]), strings(&["b*c", "~a*b"])];
        let coupled = analyze(&candidates);
        assert_eq!(
            coupled,
            vec![
                CoupledTerm::Fixed("~a*b".to_string()),
                CoupledTerm::Fixed("b*c".to_string()),
            ]
        );
    }

    #[test]
    fn test_render_either_or() {
        let coupled = vec![
            CoupledTerm::Fixed("a*b".to_string()),
            CoupledTerm::Alternatives(strings(&["~a*c", "b*c"])),
        ];
        assert_eq!(render(&coupled, FormulaKind::Dnf), "a*b + (~a*c | b*c)");
        assert_eq!(render(&coupled, FormulaKind::Cnf), "a*b*(~a*c | b*c)");
    }

    #[test]
    fn test_deterministic_regardless_of_input_order() {
        let forward = vec![strings(&["a", "b"]), strings(&["a", "c"])];
        let swapped = vec![strings(&["a", "c"]), strings(&["a", "b"])];
        let left = analyze(&forward);
        let right = analyze(&swapped);
        // Same partition, alternatives in first-appearance order each time
        assert_eq!(left[0], CoupledTerm::Fixed("a".to_string()));
        assert_eq!(right[0], CoupledTerm::Fixed("a".to_string()));
        assert!(matches!(left[1], CoupledTerm::Alternatives(_)));
        assert!(matches!(right[1], CoupledTerm::Alternatives(_)));
    }
}
