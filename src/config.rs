//! Engine configuration

use std::time::Duration;

use crate::bridge::{MinimizerBridge, DEFAULT_MINIMIZER};
use crate::color::{ColorTable, DEFAULT_HUE_CANDIDATES};
use crate::scheduler::DEFAULT_COOLDOWN;

/// Tunable knobs of the engine, with production defaults.
///
/// # Examples
///
/// ```
/// use karnaugh_logic::EngineConfig;
///
/// let config = EngineConfig {
///     minimizer: "cat".to_string(),
///     ..Default::default()
/// };
/// assert_eq!(config.cooldown.as_millis(), 100);
/// ```
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Cooldown between a completed computation and a queued follow-up
    pub cooldown: Duration,
    /// Command invoked by the external minimizer bridge
    pub minimizer: String,
    /// Number of evenly spaced hue candidates evaluated per new implicant
    pub hue_candidates: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            cooldown: DEFAULT_COOLDOWN,
            minimizer: DEFAULT_MINIMIZER.to_string(),
            hue_candidates: DEFAULT_HUE_CANDIDATES,
        }
    }
}

impl EngineConfig {
    /// A bridge invoking the configured external minimizer.
    pub fn bridge(&self) -> MinimizerBridge {
        MinimizerBridge::with_command(self.minimizer.as_str(), &[])
    }

    /// An empty color table using the configured candidate count.
    pub fn color_table(&self) -> ColorTable {
        ColorTable::new(self.hue_candidates)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = EngineConfig::default();
        assert_eq!(config.cooldown, Duration::from_millis(100));
        assert_eq!(config.minimizer, "espresso");
        assert!(config.color_table().is_empty());
    }
}
