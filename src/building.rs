//! Building geometry - plan dimensions, story grid, and member sections

use serde::{Deserialize, Serialize};

use crate::error::{SimError, SimResult};

/// Rectangular cross-section dimensions for a frame member
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SectionDims {
    /// Section width in m
    pub width: f64,
    /// Section depth in m
    pub depth: f64,
}

impl SectionDims {
    /// Create a new rectangular section
    pub fn new(width: f64, depth: f64) -> Self {
        Self { width, depth }
    }

    /// Cross-sectional area in m²
    pub fn area(&self) -> f64 {
        self.width * self.depth
    }
}

/// Parametric multi-story frame building
///
/// The plan is a rectangular grid of `bays_x` × `bays_z` bays with columns at
/// every grid intersection, beams along both plan axes at every floor line,
/// and one slab per floor. Immutable for the lifetime of a simulation run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BuildingModel {
    /// Plan dimension along X in m
    pub length: f64,
    /// Plan dimension along Z in m
    pub width: f64,
    /// Total building height in m
    pub height: f64,
    /// Number of stories (≥ 1)
    pub stories: usize,
    /// Number of bays along X (≥ 1)
    pub bays_x: usize,
    /// Number of bays along Z (≥ 1)
    pub bays_z: usize,
    /// Column cross-section
    pub column_section: SectionDims,
    /// Beam cross-section
    pub beam_section: SectionDims,
    /// Floor slab thickness in m
    pub slab_thickness: f64,
}

impl BuildingModel {
    /// Create a building with default member sections
    /// (0.4×0.4 m columns, 0.3×0.5 m beams, 0.15 m slabs)
    pub fn new(
        length: f64,
        width: f64,
        height: f64,
        stories: usize,
        bays_x: usize,
        bays_z: usize,
    ) -> SimResult<Self> {
        let building = Self {
            length,
            width,
            height,
            stories,
            bays_x,
            bays_z,
            column_section: SectionDims::new(0.4, 0.4),
            beam_section: SectionDims::new(0.3, 0.5),
            slab_thickness: 0.15,
        };
        building.validate()?;
        Ok(building)
    }

    /// Set the column cross-section
    pub fn with_column_section(mut self, section: SectionDims) -> Self {
        self.column_section = section;
        self
    }

    /// Set the beam cross-section
    pub fn with_beam_section(mut self, section: SectionDims) -> Self {
        self.beam_section = section;
        self
    }

    /// Set the slab thickness
    pub fn with_slab_thickness(mut self, thickness: f64) -> Self {
        self.slab_thickness = thickness;
        self
    }

    /// Check the geometry invariants
    ///
    /// Fails with [`SimError::InvalidGeometry`] when the story count or a bay
    /// count is zero, or any dimension is non-positive.
    pub fn validate(&self) -> SimResult<()> {
        if self.stories < 1 {
            return Err(SimError::InvalidGeometry(
                "story count must be at least 1".to_string(),
            ));
        }
        if self.bays_x < 1 || self.bays_z < 1 {
            return Err(SimError::InvalidGeometry(
                "bay counts must be at least 1".to_string(),
            ));
        }

        let dims = [
            ("length", self.length),
            ("width", self.width),
            ("height", self.height),
            ("column width", self.column_section.width),
            ("column depth", self.column_section.depth),
            ("beam width", self.beam_section.width),
            ("beam depth", self.beam_section.depth),
            ("slab thickness", self.slab_thickness),
        ];
        for (name, value) in dims {
            if !(value > 0.0) || !value.is_finite() {
                return Err(SimError::InvalidGeometry(format!(
                    "{} must be positive, got {}",
                    name, value
                )));
            }
        }

        Ok(())
    }

    /// Height of one story in m
    pub fn story_height(&self) -> f64 {
        self.height / self.stories as f64
    }

    /// Plan area in m²
    pub fn plan_area(&self) -> f64 {
        self.length * self.width
    }

    /// Column grid spacing along X in m
    pub fn bay_spacing_x(&self) -> f64 {
        self.length / self.bays_x as f64
    }

    /// Column grid spacing along Z in m
    pub fn bay_spacing_z(&self) -> f64 {
        self.width / self.bays_z as f64
    }
}

impl Default for BuildingModel {
    /// A 20×15 m, 4-story, 3×3-bay frame
    fn default() -> Self {
        Self::new(20.0, 15.0, 12.0, 4, 3, 3).expect("default geometry is valid")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_building_is_valid() {
        let building = BuildingModel::default();
        assert!(building.validate().is_ok());
        assert_eq!(building.stories, 4);
        assert!((building.story_height() - 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_zero_stories_rejected() {
        let result = BuildingModel::new(20.0, 15.0, 12.0, 0, 3, 3);
        assert!(matches!(result, Err(SimError::InvalidGeometry(_))));
    }

    #[test]
    fn test_negative_dimension_rejected() {
        let result = BuildingModel::new(20.0, -15.0, 12.0, 4, 3, 3);
        assert!(matches!(result, Err(SimError::InvalidGeometry(_))));
    }

    #[test]
    fn test_zero_slab_thickness_rejected() {
        let building = BuildingModel::default().with_slab_thickness(0.0);
        assert!(building.validate().is_err());
    }

    #[test]
    fn test_bay_spacing() {
        let building = BuildingModel::new(24.0, 18.0, 12.0, 4, 4, 3).unwrap();
        assert!((building.bay_spacing_x() - 6.0).abs() < 1e-12);
        assert!((building.bay_spacing_z() - 6.0).abs() < 1e-12);
    }
}
