//! Seismic excitation input and the resonance amplification law

use serde::{Deserialize, Serialize};

use crate::error::{SimError, SimResult};

/// Horizontal shaking direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ShakeDirection {
    /// Motion along the plan X axis only
    X,
    /// Motion along the plan Z axis only
    Z,
    /// Bidirectional motion (phase-offset on the secondary axis)
    Both,
}

/// Seismic input parameters, immutable per run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeismicExcitation {
    /// Peak ground acceleration in g (> 0)
    pub intensity: f64,
    /// Dominant excitation frequency in Hz (> 0)
    pub frequency: f64,
    /// Shaking duration in s (> 0)
    pub duration: f64,
    /// Horizontal shaking direction
    pub direction: ShakeDirection,
    /// Fraction of critical damping, in (0, 1)
    pub damping_ratio: f64,
    /// Design spectral acceleration in g
    pub spectral_acceleration: f64,
    /// Code importance factor
    pub importance_factor: f64,
    /// Response-modification factor R (≥ 1)
    pub response_modification: f64,
}

impl SeismicExcitation {
    /// Create an excitation with code-factor defaults
    /// (bidirectional, 5% damping, Sa = 0.75 g, I = 1.0, R = 4.5)
    pub fn new(intensity: f64, frequency: f64, duration: f64) -> Self {
        Self {
            intensity,
            frequency,
            duration,
            direction: ShakeDirection::Both,
            damping_ratio: 0.05,
            spectral_acceleration: 0.75,
            importance_factor: 1.0,
            response_modification: 4.5,
        }
    }

    /// Set the shaking direction
    pub fn with_direction(mut self, direction: ShakeDirection) -> Self {
        self.direction = direction;
        self
    }

    /// Set the damping ratio
    pub fn with_damping_ratio(mut self, damping_ratio: f64) -> Self {
        self.damping_ratio = damping_ratio;
        self
    }

    /// Set the design spectral acceleration in g
    pub fn with_spectral_acceleration(mut self, sa: f64) -> Self {
        self.spectral_acceleration = sa;
        self
    }

    /// Set the importance factor
    pub fn with_importance_factor(mut self, factor: f64) -> Self {
        self.importance_factor = factor;
        self
    }

    /// Set the response-modification factor
    pub fn with_response_modification(mut self, r: f64) -> Self {
        self.response_modification = r;
        self
    }

    /// Check the parameter invariants
    pub fn validate(&self) -> SimResult<()> {
        let positives = [
            ("intensity", self.intensity),
            ("frequency", self.frequency),
            ("duration", self.duration),
            ("spectral acceleration", self.spectral_acceleration),
            ("importance factor", self.importance_factor),
        ];
        for (name, value) in positives {
            if !(value > 0.0) || !value.is_finite() {
                return Err(SimError::InvalidInput(format!(
                    "{} must be positive, got {}",
                    name, value
                )));
            }
        }
        if !(self.damping_ratio > 0.0 && self.damping_ratio < 1.0) {
            return Err(SimError::InvalidInput(format!(
                "damping ratio must be in (0, 1), got {}",
                self.damping_ratio
            )));
        }
        if !(self.response_modification >= 1.0) || !self.response_modification.is_finite() {
            return Err(SimError::InvalidInput(format!(
                "response-modification factor must be at least 1, got {}",
                self.response_modification
            )));
        }
        Ok(())
    }
}

/// Resonance amplification factor for a single-degree-of-freedom system.
///
/// With r = excitation / natural frequency, the factor is
/// 1 + 2·exp(−4·(r − 1)²) for 0 < r < 2 and 1 otherwise: it peaks at 3 when
/// the excitation hits the natural frequency and decays smoothly away from
/// it. This is a closed-form approximation of a response spectrum, not a
/// code-compliant spectral integral.
pub fn resonance_factor(excitation_hz: f64, natural_hz: f64) -> f64 {
    if natural_hz <= 0.0 {
        return 1.0;
    }
    let r = excitation_hz / natural_hz;
    if r > 0.0 && r < 2.0 {
        1.0 + 2.0 * (-4.0 * (r - 1.0).powi(2)).exp()
    } else {
        1.0
    }
}
