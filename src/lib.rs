//! # Karnaugh Logic
//!
//! A truth-table minimization and Karnaugh-map coverage engine: it turns a
//! caller-owned truth table into minimal two-level Boolean expressions
//! (sum-of-products or product-of-sums) and answers per-cell coverage
//! queries for drawing highlighted implicant groups on a Karnaugh map.
//!
//! ## Overview
//!
//! The pipeline runs per output variable: a Quine-McCluskey prime-implicant
//! search produces all prime implicants and one chosen minimal cover, the
//! color manager assigns each implicant a stable hue keyed by its bit
//! pattern, the coupling analyzer folds equally minimal alternatives into
//! one display string, and the Karnaugh module maps terms to grid cells
//! with toroidal grouping borders. The scheduler runs all of it as a
//! cancel-free, coalesced background computation with a cooldown between
//! runs.
//!
//! ## Minimizing a truth table
//!
//! ```
//! use karnaugh_logic::{Cell, FormulaKind, TruthTable};
//! use karnaugh_logic::qmc::minimize_output;
//!
//! // f(a, b) = a OR b, rows in MSB-first order: ab = 00, 01, 10, 11
//! let cells = [Cell::Zero, Cell::One, Cell::One, Cell::One];
//! let table = TruthTable::from_column(&["a", "b"], "f", &cells).unwrap();
//!
//! let dnf = minimize_output(&table, 0, FormulaKind::Dnf).unwrap();
//! assert_eq!(dnf.formula.to_string(), "a + b");
//!
//! // The CNF path minimizes the complement and applies De Morgan
//! let cnf = minimize_output(&table, 0, FormulaKind::Cnf).unwrap();
//! assert_eq!(cnf.formula.to_string(), "a + b");
//! ```
//!
//! ## Querying map coverage
//!
//! ```
//! use karnaugh_logic::{Cell, FormulaKind, TruthTable};
//! use karnaugh_logic::karnaugh::{cell_highlights, Layout};
//! use karnaugh_logic::qmc::minimize_output;
//!
//! let cells = [Cell::Zero, Cell::One, Cell::One, Cell::One];
//! let table = TruthTable::from_column(&["a", "b"], "f", &cells).unwrap();
//! let result = minimize_output(&table, 0, FormulaKind::Dnf).unwrap();
//!
//! let layout = Layout::for_inputs(2).unwrap();
//! // Cell a=1, b=1 lies in both the "a" and the "b" group
//! let highlights = cell_highlights(&result.formula, &layout, 1, 1, table.inputs());
//! assert_eq!(highlights.len(), 2);
//! ```
//!
//! ## Background computation
//!
//! [`scheduler::Scheduler`] owns a coordinator thread: requests submitted
//! while a computation is in flight coalesce into a single follow-up, and a
//! fixed cooldown separates consecutive runs. Responses carry per-output
//! [`qmc::MinimizationResult`]s plus a rendered display string and stable
//! per-term colors for the selected output.
//!
//! An external two-level minimizer can be driven through
//! [`bridge::MinimizerBridge`] over the PLA text format as an alternative
//! to the built-in core.

pub mod bridge;
pub mod color;
pub mod config;
pub mod coupling;
pub mod engine;
pub mod error;
pub mod formula;
pub mod karnaugh;
pub mod pla;
pub mod qmc;
pub mod scheduler;
pub mod table;

pub use color::{ColorTable, Rgba, TermColor};
pub use config::EngineConfig;
pub use error::{EngineError, PlaError};
pub use formula::{Formula, FormulaKind, Literal, Term};
pub use table::{Cell, TruthTable};
