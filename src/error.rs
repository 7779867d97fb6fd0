//! Error types for the minimization and coverage engine
//!
//! Invalid requests (out-of-range output, empty table) are deliberately *not*
//! errors: they surface as absent results so callers can render a neutral
//! "not computed" state. The types here cover the remaining failure modes:
//! PLA exchange problems at the minimizer bridge and the one hard failure,
//! a formula term that cannot be matched back to any prime implicant.

use std::fmt;
use std::io;

/// Errors raised while parsing PLA exchange text.
#[derive(Debug)]
pub enum PlaError {
    /// A directive carried an unparsable argument (e.g. `.i x`)
    InvalidDirective {
        /// The directive name, including the leading dot
        directive: String,
        /// The offending argument, empty if missing
        value: String,
    },

    /// The `.i` directive was never seen
    MissingInputCount,

    /// The `.o` directive was never seen
    MissingOutputCount,

    /// A pattern contained a character outside `0`, `1`, `-`
    InvalidPatternCharacter {
        /// The invalid character
        character: char,
        /// Zero-based position within the pattern token
        position: usize,
    },

    /// Label directive length disagrees with the declared variable count
    LabelCountMismatch {
        /// "input" or "output"
        label_kind: &'static str,
        expected: usize,
        actual: usize,
    },

    /// IO error while reading or writing PLA text
    Io(io::Error),
}

impl fmt::Display for PlaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlaError::InvalidDirective { directive, value } => {
                write!(f, "invalid argument {:?} for directive {}", value, directive)
            }
            PlaError::MissingInputCount => write!(f, "missing .i directive"),
            PlaError::MissingOutputCount => write!(f, "missing .o directive"),
            PlaError::InvalidPatternCharacter {
                character,
                position,
            } => write!(
                f,
                "invalid pattern character {:?} at position {}. Expected '0', '1' or '-'.",
                character, position
            ),
            PlaError::LabelCountMismatch {
                label_kind,
                expected,
                actual,
            } => write!(
                f,
                "{} label count mismatch: declared {}, got {}",
                label_kind, expected, actual
            ),
            PlaError::Io(err) => write!(f, "{}", err),
        }
    }
}

impl std::error::Error for PlaError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            PlaError::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<io::Error> for PlaError {
    fn from(err: io::Error) -> Self {
        PlaError::Io(err)
    }
}

/// Errors surfaced by a computation run.
///
/// `ColorMapping` is the single condition treated as a hard failure: the
/// chosen formula and the prime-implicant set it was derived from have
/// diverged, which cannot happen when both stages ran on the same inputs.
#[derive(Debug)]
pub enum EngineError {
    /// A formula term could not be matched to any known prime implicant
    ColorMapping {
        /// Rendering of the unmatched term
        term: String,
    },

    /// The computation worker panicked; treated as completion upstream,
    /// no partial result is applied
    Fault {
        /// Best-effort description recovered from the panic payload
        message: String,
    },
}

impl fmt::Display for EngineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EngineError::ColorMapping { term } => write!(
                f,
                "term {:?} does not match any prime implicant of the cover it was derived from",
                term
            ),
            EngineError::Fault { message } => write!(f, "computation worker fault: {}", message),
        }
    }
}

impl std::error::Error for EngineError {}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn test_pla_error_display() {
        let err = PlaError::InvalidPatternCharacter {
            character: 'x',
            position: 3,
        };
        let msg = err.to_string();
        assert!(msg.contains("'x'"));
        assert!(msg.contains("position 3"));
    }

    #[test]
    fn test_pla_io_error_source() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "gone");
        let err: PlaError = io_err.into();
        assert!(err.source().is_some());
        assert!(err.to_string().contains("gone"));
    }

    #[test]
    fn test_engine_error_display() {
        let err = EngineError::ColorMapping {
            term: "a*~b".to_string(),
        };
        assert!(err.to_string().contains("a*~b"));
        assert!(err.source().is_none());
    }
}
