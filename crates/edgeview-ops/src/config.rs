//! Edge detector configuration.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Hysteresis thresholds for the edge detection stage.
///
/// Gradient magnitudes above `high` are strong edges; magnitudes below `low`
/// are discarded; the band in between is kept only when connected to a
/// strong edge. The defaults match the fixed constants the bridge ships
/// with.
///
/// ```rust
/// use edgeview_ops::EdgeConfig;
///
/// let cfg = EdgeConfig::default();
/// assert_eq!(cfg.low, 50.0);
/// assert_eq!(cfg.high, 150.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct EdgeConfig {
    /// Lower hysteresis threshold on gradient magnitude.
    pub low: f32,
    /// Upper hysteresis threshold on gradient magnitude.
    pub high: f32,
}

impl EdgeConfig {
    /// Creates a config with explicit thresholds.
    pub fn new(low: f32, high: f32) -> Self {
        Self { low, high }
    }

    /// Returns `(low, high)` with the pair reordered if `low > high`.
    ///
    /// A swapped pair is not an error, matching common edge-detector APIs.
    pub(crate) fn ordered(self) -> (f32, f32) {
        if self.low > self.high {
            (self.high, self.low)
        } else {
            (self.low, self.high)
        }
    }
}

impl Default for EdgeConfig {
    fn default() -> Self {
        Self {
            low: 50.0,
            high: 150.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_thresholds() {
        let cfg = EdgeConfig::default();
        assert_eq!(cfg.ordered(), (50.0, 150.0));
    }

    #[test]
    fn test_swapped_thresholds_reorder() {
        let cfg = EdgeConfig::new(150.0, 50.0);
        assert_eq!(cfg.ordered(), (50.0, 150.0));
    }
}
