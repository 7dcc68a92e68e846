//! Structural model - element generation, lumped mass, and modal defaults

use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

use crate::building::BuildingModel;
use crate::elements::{ElementKind, MaterialProperties, StructuralElement};
use crate::error::SimResult;
use crate::modal::ModalProperties;

/// Standard gravity in m/s²
pub const GRAVITY: f64 = 9.81;

/// Lumped-parameter structural model of one building.
///
/// Owns the ordered element table and the modal properties used by the
/// response integration. Rebuilt whenever the building model changes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StructuralModel {
    building: BuildingModel,
    material: MaterialProperties,
    elements: Vec<StructuralElement>,
    modal: ModalProperties,
    modal_supplied: bool,
    total_mass: f64,
}

impl StructuralModel {
    /// Build the element table and derive default modal properties.
    ///
    /// Fails with `InvalidGeometry` when the building parameters violate
    /// their invariants; the engine must not simulate in that case.
    pub fn new(building: BuildingModel, material: MaterialProperties) -> SimResult<Self> {
        building.validate()?;

        let elements = generate_elements(&building, &material);
        let total_mass: f64 = elements.iter().map(|e| e.mass).sum();

        // Empirical code-style estimate, replaced when an external modal
        // analysis supplies its own period and shape.
        let period = material.period_coefficient() * building.height.powf(0.75);
        let modal = ModalProperties::new(period, ModalProperties::default_shape(building.stories))?;

        Ok(Self {
            building,
            material,
            elements,
            modal,
            modal_supplied: false,
            total_mass,
        })
    }

    /// Replace the derived modal estimate with externally supplied properties
    pub fn set_modal(&mut self, modal: ModalProperties) {
        self.modal = modal;
        self.modal_supplied = true;
    }

    /// Whether the modal properties came from an external analysis
    pub fn modal_supplied(&self) -> bool {
        self.modal_supplied
    }

    pub fn building(&self) -> &BuildingModel {
        &self.building
    }

    pub fn material(&self) -> &MaterialProperties {
        &self.material
    }

    pub fn modal(&self) -> &ModalProperties {
        &self.modal
    }

    pub fn elements(&self) -> &[StructuralElement] {
        &self.elements
    }

    pub(crate) fn elements_mut(&mut self) -> &mut [StructuralElement] {
        &mut self.elements
    }

    /// Split borrow for the step loop: mutable elements alongside the modal
    /// shape and building geometry they are weighted by
    pub(crate) fn split_mut(
        &mut self,
    ) -> (&mut [StructuralElement], &ModalProperties, &BuildingModel) {
        (&mut self.elements, &self.modal, &self.building)
    }

    /// Total lumped mass in kg (Σ element volume × density)
    pub fn total_mass(&self) -> f64 {
        self.total_mass
    }

    /// Total building weight in kN
    pub fn building_weight_kn(&self) -> f64 {
        self.total_mass * GRAVITY / 1000.0
    }

    /// Natural frequency in Hz
    pub fn natural_frequency(&self) -> f64 {
        self.modal.frequency
    }

    /// Equivalent lateral stiffness k = 4π² · m · f² in N/m
    pub fn lateral_stiffness(&self) -> f64 {
        let f = self.modal.frequency;
        4.0 * std::f64::consts::PI.powi(2) * self.total_mass * f * f
    }

    /// Mode amplification weight for an element.
    ///
    /// Falls back to the element-height / building-height ratio when the
    /// story index exceeds the mode-shape length.
    pub fn mode_weight(&self, element: &StructuralElement) -> f64 {
        self.modal
            .weight(element.story)
            .unwrap_or_else(|| (element.reference.y / self.building.height).clamp(0.0, 1.0))
    }
}

/// Generate the ordered element table for a story/bay grid.
///
/// Per story: one column at every grid intersection, beams along both plan
/// axes at the floor line above, and one slab. Ids are sequential in
/// generation order and stable for the model's lifetime.
fn generate_elements(
    building: &BuildingModel,
    material: &MaterialProperties,
) -> Vec<StructuralElement> {
    let story_h = building.story_height();
    let dx = building.bay_spacing_x();
    let dz = building.bay_spacing_z();
    let stories = building.stories as f64;

    let mut elements = Vec::new();
    let mut next_id: u32 = 0;
    let mut push = |elements: &mut Vec<StructuralElement>,
                    kind: ElementKind,
                    story: usize,
                    reference: Vector3<f64>,
                    stress_multiplier: f64,
                    volume: f64| {
        elements.push(StructuralElement::new(
            next_id,
            kind,
            story,
            reference,
            stress_multiplier,
            volume * material.density,
        ));
        next_id += 1;
    };

    for story in 0..building.stories {
        let y_base = story as f64 * story_h;
        let y_floor = y_base + story_h;

        // Ground-story columns carry the largest shear demand.
        let column_mult = 1.0 + 0.4 * (1.0 - story as f64 / stories);
        let column_volume = building.column_section.area() * story_h;
        for ix in 0..=building.bays_x {
            for iz in 0..=building.bays_z {
                push(
                    &mut elements,
                    ElementKind::Column,
                    story,
                    Vector3::new(ix as f64 * dx, y_base + story_h / 2.0, iz as f64 * dz),
                    column_mult,
                    column_volume,
                );
            }
        }

        // Beams along X at the floor line above this story
        for iz in 0..=building.bays_z {
            for ix in 0..building.bays_x {
                push(
                    &mut elements,
                    ElementKind::Beam,
                    story,
                    Vector3::new(ix as f64 * dx + dx / 2.0, y_floor, iz as f64 * dz),
                    0.9,
                    building.beam_section.area() * dx,
                );
            }
        }

        // Beams along Z
        for ix in 0..=building.bays_x {
            for iz in 0..building.bays_z {
                push(
                    &mut elements,
                    ElementKind::Beam,
                    story,
                    Vector3::new(ix as f64 * dx, y_floor, iz as f64 * dz + dz / 2.0),
                    0.9,
                    building.beam_section.area() * dz,
                );
            }
        }

        // One slab per floor
        push(
            &mut elements,
            ElementKind::Slab,
            story,
            Vector3::new(building.length / 2.0, y_floor, building.width / 2.0),
            0.6,
            building.plan_area() * building.slab_thickness,
        );
    }

    elements
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn model() -> StructuralModel {
        let building = BuildingModel::new(20.0, 15.0, 12.0, 4, 2, 2).unwrap();
        StructuralModel::new(building, MaterialProperties::concrete()).unwrap()
    }

    #[test]
    fn test_element_count() {
        let model = model();
        // Per story: 9 columns + 6 beams along X + 6 along Z + 1 slab
        assert_eq!(model.elements().len(), 4 * (9 + 6 + 6 + 1));
    }

    #[test]
    fn test_ids_are_sequential_and_unique() {
        let model = model();
        for (i, element) in model.elements().iter().enumerate() {
            assert_eq!(element.id as usize, i);
        }
    }

    #[test]
    fn test_total_mass_is_volumetric() {
        let model = model();
        assert!(model.total_mass() > 0.0);
        // Four slabs alone weigh 20·15·0.15·2400 kg each
        let slab_mass = 20.0 * 15.0 * 0.15 * 2400.0;
        assert!(model.total_mass() > 4.0 * slab_mass);
        assert_relative_eq!(
            model.building_weight_kn(),
            model.total_mass() * GRAVITY / 1000.0,
            epsilon = 1e-9
        );
    }

    #[test]
    fn test_lateral_stiffness_formula() {
        let model = model();
        let f = model.natural_frequency();
        let expected = 4.0 * std::f64::consts::PI.powi(2) * model.total_mass() * f * f;
        assert_relative_eq!(model.lateral_stiffness(), expected, epsilon = 1e-6);
    }

    #[test]
    fn test_default_period_from_material_and_height() {
        let model = model();
        let expected = 0.075 * 12.0_f64.powf(0.75);
        assert_relative_eq!(model.modal().period, expected, epsilon = 1e-12);
        assert!(!model.modal_supplied());
    }

    #[test]
    fn test_supplied_modal_takes_precedence() {
        let mut model = model();
        let modal = ModalProperties::new(0.5, ModalProperties::default_shape(4)).unwrap();
        model.set_modal(modal);
        assert!(model.modal_supplied());
        assert_relative_eq!(model.natural_frequency(), 2.0, epsilon = 1e-12);
    }

    #[test]
    fn test_ground_columns_carry_more_stress() {
        let model = model();
        let ground_column = model
            .elements()
            .iter()
            .find(|e| e.kind == ElementKind::Column && e.story == 0)
            .unwrap();
        let top_column = model
            .elements()
            .iter()
            .find(|e| e.kind == ElementKind::Column && e.story == 3)
            .unwrap();
        assert!(ground_column.stress_multiplier > top_column.stress_multiplier);
    }

    #[test]
    fn test_mode_weight_fallback_uses_height_ratio() {
        let model = model();
        // A hypothetical element above the shape length falls back to y/H
        let stray = StructuralElement::new(
            9999,
            ElementKind::Beam,
            10,
            Vector3::new(0.0, 6.0, 0.0),
            0.9,
            1.0,
        );
        assert_relative_eq!(model.mode_weight(&stray), 0.5, epsilon = 1e-12);
    }

    #[test]
    fn test_invalid_geometry_rejected() {
        let building = BuildingModel {
            height: 0.0,
            ..BuildingModel::default()
        };
        assert!(StructuralModel::new(building, MaterialProperties::steel()).is_err());
    }
}
