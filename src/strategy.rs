//! Response strategies - detailed per-element integration vs. closed-form
//! spectral estimate, selected once at run start

use serde::{Deserialize, Serialize};

use crate::error::{SimError, SimResult};
use crate::excitation::ShakeDirection;

/// Which response path to run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StrategyChoice {
    /// Detailed when the backing scene is ready, spectral otherwise
    Auto,
    /// Per-element time integration; fails with `SceneUnavailable` when the
    /// backing scene is missing
    Detailed,
    /// Closed-form spectral estimate, completes without stepping
    Spectral,
}

/// Options for starting a run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StartOptions {
    /// Response path selection
    pub strategy: StrategyChoice,
    /// Whether the rendering/backing context exists
    pub scene_ready: bool,
    /// Elements visited per step; `None` visits all elements every step.
    /// Large models can rotate through a window per step as long as the host
    /// steps often enough for every element to be visited within the
    /// duration.
    pub batch_size: Option<usize>,
}

impl Default for StartOptions {
    fn default() -> Self {
        Self {
            strategy: StrategyChoice::Auto,
            scene_ready: true,
            batch_size: None,
        }
    }
}

impl StartOptions {
    pub fn with_strategy(mut self, strategy: StrategyChoice) -> Self {
        self.strategy = strategy;
        self
    }

    pub fn with_scene_ready(mut self, ready: bool) -> Self {
        self.scene_ready = ready;
        self
    }

    pub fn with_batch_size(mut self, size: usize) -> Self {
        self.batch_size = Some(size);
        self
    }
}

/// Shared per-step quantities, computed once per tick
#[derive(Debug, Clone, Copy)]
pub struct StepInputs {
    /// Wall-clock seconds since run start, excluding suspended time
    pub elapsed: f64,
    /// Peak ground acceleration in g
    pub intensity: f64,
    /// Excitation frequency in Hz
    pub frequency: f64,
    /// Exponential damping envelope at `elapsed`
    pub damping: f64,
    /// Resonance amplification factor for this run
    pub resonance: f64,
    /// Permitted horizontal axes
    pub direction: ShakeDirection,
}

/// One interchangeable response path
pub trait ResponseStrategy {
    fn name(&self) -> &'static str;

    /// Closed-form paths produce their result at start without stepping
    fn completes_immediately(&self) -> bool;

    /// Horizontal (x, z) offsets in m for one element at one instant, given
    /// its mode-shape amplification weight
    fn offsets(&self, step: &StepInputs, mode_weight: f64) -> (f64, f64);
}

/// Damped harmonic per-element integration
#[derive(Debug, Default)]
pub struct DetailedResponse;

impl ResponseStrategy for DetailedResponse {
    fn name(&self) -> &'static str {
        "detailed"
    }

    fn completes_immediately(&self) -> bool {
        false
    }

    fn offsets(&self, step: &StepInputs, mode_weight: f64) -> (f64, f64) {
        let amplitude = step.intensity * 0.1 * mode_weight * 3.0 * step.resonance * step.damping;
        let phase = step.elapsed * step.frequency * std::f64::consts::TAU;

        // The 0.4 rad phase offset decorrelates the two horizontal axes,
        // approximating bidirectional non-planar shaking.
        let x = phase.sin() * amplitude;
        let z = (phase + 0.4).cos() * amplitude * 0.7;

        match step.direction {
            ShakeDirection::X => (x, 0.0),
            ShakeDirection::Z => (0.0, z),
            ShakeDirection::Both => (x, z),
        }
    }
}

/// Degraded-fidelity fallback: no element motion, result from the spectral
/// formulas alone
#[derive(Debug, Default)]
pub struct SpectralResponse;

impl ResponseStrategy for SpectralResponse {
    fn name(&self) -> &'static str {
        "spectral"
    }

    fn completes_immediately(&self) -> bool {
        true
    }

    fn offsets(&self, _step: &StepInputs, _mode_weight: f64) -> (f64, f64) {
        (0.0, 0.0)
    }
}

/// Select the response path once at run start
pub(crate) fn select(
    choice: StrategyChoice,
    scene_ready: bool,
) -> SimResult<Box<dyn ResponseStrategy>> {
    match choice {
        StrategyChoice::Detailed if !scene_ready => Err(SimError::SceneUnavailable),
        StrategyChoice::Detailed => Ok(Box::new(DetailedResponse)),
        StrategyChoice::Spectral => Ok(Box::new(SpectralResponse)),
        StrategyChoice::Auto => {
            if scene_ready {
                Ok(Box::new(DetailedResponse))
            } else {
                Ok(Box::new(SpectralResponse))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn inputs(direction: ShakeDirection) -> StepInputs {
        StepInputs {
            elapsed: 0.35,
            intensity: 0.4,
            frequency: 2.0,
            damping: 0.9,
            resonance: 3.0,
            direction,
        }
    }

    #[test]
    fn test_direction_gates_axes() {
        let strategy = DetailedResponse;
        let (x, z) = strategy.offsets(&inputs(ShakeDirection::X), 1.0);
        assert!(x != 0.0);
        assert_eq!(z, 0.0);

        let (x, z) = strategy.offsets(&inputs(ShakeDirection::Z), 1.0);
        assert_eq!(x, 0.0);
        assert!(z != 0.0);

        let (x, z) = strategy.offsets(&inputs(ShakeDirection::Both), 1.0);
        assert!(x != 0.0 && z != 0.0);
    }

    #[test]
    fn test_offsets_scale_with_mode_weight() {
        let strategy = DetailedResponse;
        let step = inputs(ShakeDirection::Both);
        let (roof_x, _) = strategy.offsets(&step, 1.0);
        let (mid_x, _) = strategy.offsets(&step, 0.5);
        assert!((mid_x - roof_x * 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_detailed_rejected_without_scene() {
        let result = select(StrategyChoice::Detailed, false);
        assert!(matches!(result, Err(SimError::SceneUnavailable)));
    }

    #[test]
    fn test_auto_falls_back_to_spectral() {
        let strategy = select(StrategyChoice::Auto, false).unwrap();
        assert!(strategy.completes_immediately());
        let strategy = select(StrategyChoice::Auto, true).unwrap();
        assert!(!strategy.completes_immediately());
    }
}
