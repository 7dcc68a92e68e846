//! Simulation results and end-of-run aggregation

use serde::{Deserialize, Serialize};

use crate::elements::StructuralElement;
use crate::excitation::SeismicExcitation;
use crate::structural::GRAVITY;

/// Summary response metrics for one completed run, immutable thereafter
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationResult {
    /// Peak horizontal displacement in cm
    pub max_displacement: f64,
    /// Base shear in kN (closed-form spectral estimate)
    pub base_shear: f64,
    /// Inter-story drifts in mm, top story first, length = story count
    pub story_drifts: Vec<f64>,
    /// Natural period of vibration in s
    pub period: f64,
    /// Mean element damage as a percentage, 0–100
    pub damage_percentage: f64,
}

/// Closed-form code-style base shear: V = W · Sa · I / R.
///
/// Independent of the time-stepped integration; used for the spectral
/// fallback path as well.
pub fn base_shear_kn(
    weight_kn: f64,
    spectral_acceleration_g: f64,
    importance_factor: f64,
    response_modification: f64,
) -> f64 {
    weight_kn * spectral_acceleration_g * importance_factor / response_modification
}

/// Spectral displacement estimate for an SDOF system: Sd = Sa·g / (2πf)², in m
pub fn spectral_displacement_m(spectral_acceleration_g: f64, natural_hz: f64) -> f64 {
    let omega = std::f64::consts::TAU * natural_hz;
    spectral_acceleration_g * GRAVITY / (omega * omega)
}

/// Inter-story drifts in mm from per-story displacement maxima in m.
///
/// The ground-to-first-story drift comes first bottom-up, followed by the
/// absolute difference of each consecutive pair; the vector is then reversed
/// so index 0 is the topmost story.
pub fn story_drifts_mm(story_maxima_m: &[f64]) -> Vec<f64> {
    let mut drifts = Vec::with_capacity(story_maxima_m.len());
    if let Some(&ground) = story_maxima_m.first() {
        drifts.push(ground * 1000.0);
        for pair in story_maxima_m.windows(2) {
            drifts.push((pair[1] - pair[0]).abs() * 1000.0);
        }
    }
    drifts.reverse();
    drifts
}

/// Mean element damage as a percentage, 0 when no elements are tracked
pub fn damage_percentage(elements: &[StructuralElement]) -> f64 {
    if elements.is_empty() {
        return 0.0;
    }
    let total: f64 = elements.iter().map(|e| e.damage()).sum();
    total / elements.len() as f64 * 100.0
}

/// Assemble the final result from tracked run state
pub(crate) fn aggregate(
    story_maxima_m: &[f64],
    elements: &[StructuralElement],
    weight_kn: f64,
    excitation: &SeismicExcitation,
    period: f64,
) -> SimulationResult {
    let max_displacement_m = story_maxima_m.iter().copied().fold(0.0, f64::max);
    SimulationResult {
        max_displacement: max_displacement_m * 100.0,
        base_shear: base_shear_kn(
            weight_kn,
            excitation.spectral_acceleration,
            excitation.importance_factor,
            excitation.response_modification,
        ),
        story_drifts: story_drifts_mm(story_maxima_m),
        period,
        damage_percentage: damage_percentage(elements),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_base_shear_code_formula() {
        // 1000 kN × 0.75 g × 1.0 / 4.5 ≈ 166.67 kN
        assert_relative_eq!(
            base_shear_kn(1000.0, 0.75, 1.0, 4.5),
            166.6667,
            epsilon = 1e-3
        );
    }

    #[test]
    fn test_story_drifts_are_top_first_and_non_negative() {
        let maxima = [0.010, 0.025, 0.032, 0.035];
        let drifts = story_drifts_mm(&maxima);
        assert_eq!(drifts.len(), 4);
        // Top story first: |0.035 − 0.032| m = 3 mm
        assert_relative_eq!(drifts[0], 3.0, epsilon = 1e-9);
        // Ground-to-first-story drift last: 10 mm
        assert_relative_eq!(drifts[3], 10.0, epsilon = 1e-9);
        assert!(drifts.iter().all(|&d| d >= 0.0));
    }

    #[test]
    fn test_story_drifts_handle_non_monotone_maxima() {
        let drifts = story_drifts_mm(&[0.02, 0.01]);
        assert_eq!(drifts.len(), 2);
        assert!(drifts.iter().all(|&d| d >= 0.0));
    }

    #[test]
    fn test_empty_story_maxima() {
        assert!(story_drifts_mm(&[]).is_empty());
    }

    #[test]
    fn test_damage_percentage_empty_is_zero() {
        assert_eq!(damage_percentage(&[]), 0.0);
    }

    #[test]
    fn test_spectral_displacement() {
        // Sa = 1 g at f = 1 Hz: Sd = 9.81 / (2π)² ≈ 0.2485 m
        assert_relative_eq!(spectral_displacement_m(1.0, 1.0), 0.2485, epsilon = 1e-3);
    }
}
