//! Cumulative damage accumulation

use crate::elements::{ElementKind, MaterialProperties, StructuralElement};

/// Displacement that corresponds to full normalized stress, in m (5 cm)
const DAMAGE_THRESHOLD_M: f64 = 0.05;

/// Per-element damage accumulator for one run.
///
/// Damage is monotone non-decreasing within a run and clamped to [0, 1];
/// only an explicit reset lowers it.
#[derive(Debug, Clone)]
pub struct DamageAccumulator {
    stories: usize,
    material_multiplier: f64,
}

impl DamageAccumulator {
    pub fn new(stories: usize, material: &MaterialProperties) -> Self {
        Self {
            stories: stories.max(1),
            material_multiplier: material.damage_multiplier(),
        }
    }

    /// Normalized stress estimate for a displacement in m, in [0, 1]
    pub fn stress(&self, element: &StructuralElement, displacement: f64, resonance: f64) -> f64 {
        let story_mult = 1.0 + element.story as f64 / self.stories as f64;
        (displacement * element.stress_multiplier * story_mult * self.material_multiplier
            * resonance
            / DAMAGE_THRESHOLD_M)
            .min(1.0)
    }

    /// Advance an element's damage for one step and return the new value.
    ///
    /// `progress` is the elapsed fraction of the run duration; its square is
    /// the time factor, so damage accelerates toward the end of the quake.
    /// Columns and beams grow quadratically in stress with damage-induced
    /// softening; slabs follow a gentler linear-in-stress law.
    pub fn accumulate(
        &self,
        element: &mut StructuralElement,
        displacement: f64,
        progress: f64,
        resonance: f64,
    ) -> f64 {
        let stress = self.stress(element, displacement, resonance);
        let time_factor = progress * progress;
        let existing = element.damage;

        let increment = match element.kind {
            ElementKind::Column | ElementKind::Beam => {
                stress * stress * 0.002 * (1.0 + existing * 5.0) * time_factor
                    * element.stress_multiplier
            }
            ElementKind::Slab => stress * 0.001 * (1.0 + existing * 3.0) * time_factor,
        };

        element.damage = (existing + increment).min(1.0).max(existing);
        element.damage
    }
}
