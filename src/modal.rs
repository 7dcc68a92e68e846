//! Modal properties - natural period and first-mode shape

use serde::{Deserialize, Serialize};

use crate::error::{SimError, SimResult};

/// Natural period/frequency and per-story mode-shape weights.
///
/// Either derived from the building geometry or supplied by an external
/// static-structural-analysis collaborator; a supplied value takes precedence
/// over the derived estimate.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModalProperties {
    /// Natural period in s (> 0)
    pub period: f64,
    /// Natural frequency in Hz (= 1/period)
    pub frequency: f64,
    /// Per-story sway weights in [0, 1], monotone non-decreasing with story
    /// index (top sways most)
    pub mode_shape: Vec<f64>,
}

impl ModalProperties {
    /// Create modal properties from a natural period
    pub fn new(period: f64, mode_shape: Vec<f64>) -> SimResult<Self> {
        if !(period > 0.0) || !period.is_finite() {
            return Err(SimError::InvalidInput(format!(
                "natural period must be positive, got {}",
                period
            )));
        }
        let mut previous = 0.0;
        for (story, &weight) in mode_shape.iter().enumerate() {
            if !(0.0..=1.0).contains(&weight) {
                return Err(SimError::InvalidInput(format!(
                    "mode-shape weight at story {} must be in [0, 1], got {}",
                    story, weight
                )));
            }
            if weight < previous {
                return Err(SimError::InvalidInput(format!(
                    "mode shape must be monotone non-decreasing, story {} dips",
                    story
                )));
            }
            previous = weight;
        }
        Ok(Self {
            period,
            frequency: 1.0 / period,
            mode_shape,
        })
    }

    /// Create modal properties from a natural frequency in Hz
    pub fn from_frequency(frequency: f64, mode_shape: Vec<f64>) -> SimResult<Self> {
        if !(frequency > 0.0) || !frequency.is_finite() {
            return Err(SimError::InvalidInput(format!(
                "natural frequency must be positive, got {}",
                frequency
            )));
        }
        Self::new(1.0 / frequency, mode_shape)
    }

    /// Smooth first-mode sway approximation:
    /// weight(i) = sin((i + 1)·π / (2·stories)), reaching 1.0 at the roof
    pub fn default_shape(stories: usize) -> Vec<f64> {
        (0..stories)
            .map(|i| ((i + 1) as f64 * std::f64::consts::PI / (2.0 * stories as f64)).sin())
            .collect()
    }

    /// Mode-shape weight for a story, `None` when the story index exceeds
    /// the shape length (callers fall back to a height ratio)
    pub fn weight(&self, story: usize) -> Option<f64> {
        self.mode_shape.get(story).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_default_shape_is_monotone_and_tops_at_one() {
        let shape = ModalProperties::default_shape(6);
        assert_eq!(shape.len(), 6);
        for pair in shape.windows(2) {
            assert!(pair[1] >= pair[0]);
        }
        assert_relative_eq!(shape[5], 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_frequency_is_inverse_period() {
        let modal = ModalProperties::new(0.5, ModalProperties::default_shape(4)).unwrap();
        assert_relative_eq!(modal.frequency, 2.0, epsilon = 1e-12);
    }

    #[test]
    fn test_non_monotone_shape_rejected() {
        let result = ModalProperties::new(0.5, vec![0.5, 0.3, 1.0]);
        assert!(result.is_err());
    }

    #[test]
    fn test_out_of_range_weight_rejected() {
        let result = ModalProperties::new(0.5, vec![0.5, 1.2]);
        assert!(result.is_err());
    }

    #[test]
    fn test_weight_lookup() {
        let modal = ModalProperties::new(0.5, vec![0.4, 0.8, 1.0]).unwrap();
        assert_eq!(modal.weight(1), Some(0.8));
        assert_eq!(modal.weight(7), None);
    }
}
