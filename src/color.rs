//! Stable color identity for prime implicants
//!
//! Each prime implicant gets a hue on the 360° wheel; the same bit-pattern
//! keeps the same hue across recomputation so highlights do not flicker
//! while the user edits the table. The table is a plain key/value mapping
//! keyed by pattern string and rebuilt from the previous run's table on
//! every computation; entries for implicants absent from the new run are
//! simply dropped.

use std::sync::Arc;

use crate::error::EngineError;
use crate::formula::{FormulaKind, Term};
use crate::qmc::Implicant;
use fxhash::FxHashMap;

/// Number of evenly spaced candidate hues evaluated for a new implicant.
pub const DEFAULT_HUE_CANDIDATES: usize = 24;

/// Opacity of the fill variant of a term color.
const FILL_ALPHA: u8 = 0x55;

/// Saturation/value used for all term hues.
const SATURATION: f32 = 0.75;
const VALUE: f32 = 0.85;

/// An RGBA color, serialized as `#rrggbbaa`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl std::fmt::Display for Rgba {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}{:02x}", self.r, self.g, self.b, self.a)
    }
}

/// Border and fill color of one highlighted term.
///
/// The fill is a fixed-alpha variant of the border hue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TermColor {
    pub border: Rgba,
    pub fill: Rgba,
}

fn hsv_to_rgb(hue: f32, saturation: f32, value: f32) -> (u8, u8, u8) {
    let hue = hue.rem_euclid(360.0);
    let c = value * saturation;
    let x = c * (1.0 - ((hue / 60.0) % 2.0 - 1.0).abs());
    let m = value - c;
    let (r, g, b) = match hue as u32 / 60 {
        0 => (c, x, 0.0),
        1 => (x, c, 0.0),
        2 => (0.0, c, x),
        3 => (0.0, x, c),
        4 => (x, 0.0, c),
        _ => (c, 0.0, x),
    };
    (
        ((r + m) * 255.0).round() as u8,
        ((g + m) * 255.0).round() as u8,
        ((b + m) * 255.0).round() as u8,
    )
}

fn color_from_hue(hue: f32) -> TermColor {
    let (r, g, b) = hsv_to_rgb(hue, SATURATION, VALUE);
    TermColor {
        border: Rgba { r, g, b, a: 0xff },
        fill: Rgba {
            r,
            g,
            b,
            a: FILL_ALPHA,
        },
    }
}

fn angular_distance(a: f32, b: f32) -> f32 {
    let d = (a - b).rem_euclid(360.0);
    d.min(360.0 - d)
}

/// Hue assignments keyed by implicant bit-pattern.
#[derive(Debug, Clone)]
pub struct ColorTable {
    hues: FxHashMap<String, f32>,
    candidates: usize,
}

impl Default for ColorTable {
    fn default() -> Self {
        ColorTable::new(DEFAULT_HUE_CANDIDATES)
    }
}

impl ColorTable {
    /// An empty table evaluating `candidates` evenly spaced hues per new
    /// implicant.
    pub fn new(candidates: usize) -> Self {
        ColorTable {
            hues: FxHashMap::default(),
            candidates: candidates.max(1),
        }
    }

    /// Number of assigned patterns.
    pub fn len(&self) -> usize {
        self.hues.len()
    }

    /// True when no pattern has a color yet.
    pub fn is_empty(&self) -> bool {
        self.hues.is_empty()
    }

    /// The hue assigned to a pattern, if any.
    pub fn hue_of(&self, pattern: &str) -> Option<f32> {
        self.hues.get(pattern).copied()
    }

    /// The color assigned to a pattern, if any.
    pub fn color_of(&self, pattern: &str) -> Option<TermColor> {
        self.hue_of(pattern).map(color_from_hue)
    }

    /// Look up or assign the color for an implicant pattern.
    ///
    /// A known pattern reuses its previous hue exactly. A new pattern gets
    /// the candidate hue maximizing the minimum angular distance to every
    /// assigned hue (ties broken by candidate order); the very first pattern
    /// seeds the wheel from a hash of its own bits, so equal inputs always
    /// produce equal colors.
    pub fn assign(&mut self, pattern: &str) -> TermColor {
        if let Some(hue) = self.hue_of(pattern) {
            return color_from_hue(hue);
        }
        let hue = if self.hues.is_empty() {
            (fxhash::hash64(pattern.as_bytes()) % 360) as f32
        } else {
            self.farthest_candidate()
        };
        self.hues.insert(pattern.to_string(), hue);
        color_from_hue(hue)
    }

    fn farthest_candidate(&self) -> f32 {
        let step = 360.0 / self.candidates as f32;
        let mut best_hue = 0.0;
        let mut best_distance = -1.0;
        for i in 0..self.candidates {
            let candidate = i as f32 * step;
            let distance = self
                .hues
                .values()
                .map(|&assigned| angular_distance(candidate, assigned))
                .fold(f32::INFINITY, f32::min);
            if distance > best_distance {
                best_distance = distance;
                best_hue = candidate;
            }
        }
        best_hue
    }

    /// Build this run's table from the previous run's assignments.
    ///
    /// Hues of recurring patterns are copied first so that newly assigned
    /// hues keep their distance from them; patterns absent from `patterns`
    /// are dropped.
    pub fn rebuild(previous: &ColorTable, patterns: &[String]) -> ColorTable {
        let mut table = ColorTable::new(previous.candidates.max(1));
        for pattern in patterns {
            if let Some(hue) = previous.hue_of(pattern) {
                table.hues.insert(pattern.clone(), hue);
            }
        }
        for pattern in patterns {
            table.assign(pattern);
        }
        table
    }
}

/// Map a formula term back to the color of the prime implicant it came from.
///
/// A term matches an implicant when the literal count equals the implicant's
/// significant bit count and every literal's polarity agrees with the
/// corresponding pattern bit. For CNF the polarity interpretation flips,
/// since CNF clause literals are already De-Morgan-negated relative to the
/// underlying complement cover. The `"1"` sentinel matches the all-dash
/// implicant. No match is a hard error: the expression and the implicant set
/// it was derived from have diverged.
pub fn term_color(
    term: &Term,
    kind: FormulaKind,
    primes: &[Implicant],
    inputs: &[Arc<str>],
    table: &ColorTable,
) -> Result<TermColor, EngineError> {
    let mapping_error = || EngineError::ColorMapping {
        term: term.render(kind),
    };

    if let Some(value) = term.as_constant() {
        if !value {
            // Constant-false terms highlight nothing and own no color
            return Err(mapping_error());
        }
        return primes
            .iter()
            .find(|p| p.num_literals() == 0)
            .and_then(|p| table.color_of(&p.pattern()))
            .ok_or_else(mapping_error);
    }

    for prime in primes {
        if prime.num_literals() as usize != term.len() {
            continue;
        }
        let agrees = term.literals().iter().all(|literal| {
            let var = inputs.iter().position(|v| *v == literal.variable);
            let expected = match kind {
                FormulaKind::Dnf => !literal.negated,
                FormulaKind::Cnf => literal.negated,
            };
            var.is_some_and(|var| prime.bit(var) == Some(expected))
        });
        if agrees {
            return table.color_of(&prime.pattern()).ok_or_else(mapping_error);
        }
    }
    Err(mapping_error())
}
