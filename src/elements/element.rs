//! Structural element table - one row per physical member

use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

/// Kind of physical member
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ElementKind {
    Column,
    Beam,
    Slab,
}

/// One physical member of the frame
///
/// Owned exclusively by the engine. The rendering collaborator never holds a
/// reference into this table; it reads [`ElementState`] snapshots instead.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StructuralElement {
    /// Stable unique id
    pub id: u32,
    /// Member kind
    pub kind: ElementKind,
    /// Story level, 0-indexed from the ground
    pub story: usize,
    /// Undeformed reference position in m
    pub reference: Vector3<f64>,
    /// Role- and position-dependent stress weighting (≥ 0)
    pub stress_multiplier: f64,
    /// Lumped mass in kg (geometry volume × material density)
    pub mass: f64,

    /// Current deformed position in m
    pub(crate) position: Vector3<f64>,
    /// Cumulative damage in [0, 1], monotone within one run
    pub(crate) damage: f64,
}

impl StructuralElement {
    /// Create an element at its reference position with zero damage
    pub fn new(
        id: u32,
        kind: ElementKind,
        story: usize,
        reference: Vector3<f64>,
        stress_multiplier: f64,
        mass: f64,
    ) -> Self {
        Self {
            id,
            kind,
            story,
            reference,
            stress_multiplier,
            mass,
            position: reference,
            damage: 0.0,
        }
    }

    /// Current deformed position in m
    pub fn position(&self) -> Vector3<f64> {
        self.position
    }

    /// Cumulative damage in [0, 1]
    pub fn damage(&self) -> f64 {
        self.damage
    }

    /// Horizontal displacement magnitude from the reference position in m
    pub fn displacement(&self) -> f64 {
        let dx = self.position.x - self.reference.x;
        let dz = self.position.z - self.reference.z;
        (dx * dx + dz * dz).sqrt()
    }

    /// Restore the reference position, leaving damage untouched
    pub(crate) fn restore_position(&mut self) {
        self.position = self.reference;
    }

    /// Restore the reference position and clear damage
    pub(crate) fn reset(&mut self) {
        self.position = self.reference;
        self.damage = 0.0;
    }
}

/// Per-frame snapshot of one element, consumed by the rendering collaborator
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ElementState {
    pub id: u32,
    pub kind: ElementKind,
    pub story: usize,
    pub position: Vector3<f64>,
    pub damage: f64,
}

impl From<&StructuralElement> for ElementState {
    fn from(element: &StructuralElement) -> Self {
        Self {
            id: element.id,
            kind: element.kind,
            story: element.story,
            position: element.position,
            damage: element.damage,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_element_is_undeformed() {
        let element = StructuralElement::new(
            0,
            ElementKind::Column,
            0,
            Vector3::new(1.0, 1.5, 2.0),
            1.2,
            500.0,
        );
        assert_eq!(element.displacement(), 0.0);
        assert_eq!(element.damage(), 0.0);
    }

    #[test]
    fn test_displacement_is_horizontal_only() {
        let mut element = StructuralElement::new(
            1,
            ElementKind::Beam,
            2,
            Vector3::new(0.0, 6.0, 0.0),
            0.9,
            300.0,
        );
        element.position = Vector3::new(0.03, 9.0, 0.04);
        assert!((element.displacement() - 0.05).abs() < 1e-12);
    }

    #[test]
    fn test_reset_clears_damage_and_position() {
        let mut element = StructuralElement::new(
            2,
            ElementKind::Slab,
            1,
            Vector3::new(10.0, 3.0, 7.5),
            0.6,
            1e4,
        );
        element.position = Vector3::new(10.1, 3.0, 7.6);
        element.damage = 0.4;
        element.reset();
        assert_eq!(element.position(), element.reference);
        assert_eq!(element.damage(), 0.0);
    }
}
