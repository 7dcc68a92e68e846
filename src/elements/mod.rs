//! Element types for the structural model

pub mod element;
pub mod material;

pub use element::{ElementKind, ElementState, StructuralElement};
pub use material::{MaterialKind, MaterialProperties};
