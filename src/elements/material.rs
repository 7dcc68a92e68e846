//! Material properties shared by every element of one building

use serde::{Deserialize, Serialize};

/// Structural material family
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MaterialKind {
    Steel,
    Concrete,
    Timber,
}

/// Material properties for the lumped structural model
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MaterialProperties {
    /// Material family
    pub kind: MaterialKind,
    /// Modulus of elasticity in Pa
    pub elastic_modulus: f64,
    /// Density in kg/m³
    pub density: f64,
}

impl MaterialProperties {
    /// Create a material with explicit properties
    pub fn new(kind: MaterialKind, elastic_modulus: f64, density: f64) -> Self {
        Self {
            kind,
            elastic_modulus,
            density,
        }
    }

    /// Structural steel (E = 200 GPa)
    pub fn steel() -> Self {
        Self::new(MaterialKind::Steel, 200e9, 7850.0)
    }

    /// Normal-weight reinforced concrete (E = 25 GPa)
    pub fn concrete() -> Self {
        Self::new(MaterialKind::Concrete, 25e9, 2400.0)
    }

    /// Glulam timber (E = 11 GPa)
    pub fn timber() -> Self {
        Self::new(MaterialKind::Timber, 11e9, 600.0)
    }

    /// Damping-sensitivity factor applied to the oscillation decay envelope.
    ///
    /// Steel frames dissipate less energy than concrete ones, so their
    /// amplitude decays slower under the same damping ratio.
    pub fn damping_sensitivity(&self) -> f64 {
        match self.kind {
            MaterialKind::Steel => 0.8,
            MaterialKind::Concrete => 1.2,
            MaterialKind::Timber => 1.0,
        }
    }

    /// Damage accumulation multiplier (concrete is more brittle)
    pub fn damage_multiplier(&self) -> f64 {
        match self.kind {
            MaterialKind::Concrete => 1.2,
            _ => 0.8,
        }
    }

    /// Empirical period coefficient Ct for the default natural-period
    /// estimate T = Ct · H^0.75
    pub fn period_coefficient(&self) -> f64 {
        match self.kind {
            MaterialKind::Steel => 0.085,
            MaterialKind::Concrete => 0.075,
            MaterialKind::Timber => 0.05,
        }
    }
}

impl Default for MaterialProperties {
    fn default() -> Self {
        Self::concrete()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_steel_damps_less_than_concrete() {
        let steel = MaterialProperties::steel();
        let concrete = MaterialProperties::concrete();
        assert!(steel.damping_sensitivity() < concrete.damping_sensitivity());
    }

    #[test]
    fn test_concrete_is_more_brittle() {
        assert_eq!(MaterialProperties::concrete().damage_multiplier(), 1.2);
        assert_eq!(MaterialProperties::steel().damage_multiplier(), 0.8);
        assert_eq!(MaterialProperties::timber().damage_multiplier(), 0.8);
    }

    #[test]
    fn test_period_coefficients() {
        assert!(
            MaterialProperties::steel().period_coefficient()
                > MaterialProperties::concrete().period_coefficient()
        );
    }
}
