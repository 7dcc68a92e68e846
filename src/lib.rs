//! Seismic Sim - seismic response simulation for multi-story frame buildings
//!
//! This library turns a parametric rectangular frame building, a material,
//! and synthetic earthquake parameters into a time-evolving displacement
//! field and summary response metrics:
//! - Lumped-parameter structural model (mass, natural period, mode shape)
//! - Closed-form resonance amplification
//! - Wall-clock-driven damped harmonic response integration
//! - Nonlinear cumulative damage tracking per element
//! - Inter-story drift, base shear, and damage index aggregation
//!
//! The estimates are engineering-order-of-magnitude values for visualization
//! and comparison, not certified design values.
//!
//! ## Example
//! ```rust
//! use seismic_sim::prelude::*;
//!
//! let building = BuildingModel::new(20.0, 15.0, 12.0, 4, 3, 3).unwrap();
//! let excitation = SeismicExcitation::new(0.4, 2.0, 10.0);
//!
//! let mut engine = SimulationEngine::with_clock(
//!     building,
//!     MaterialProperties::concrete(),
//!     excitation,
//!     ManualClock::new(),
//! )
//! .unwrap();
//!
//! engine.start(StartOptions::default()).unwrap();
//! while engine.state() == RunState::Running {
//!     engine.clock().advance(1.0 / 60.0);
//!     engine.step().unwrap();
//! }
//!
//! let result = engine.require_result().unwrap();
//! assert!(result.max_displacement > 0.0);
//! assert_eq!(result.story_drifts.len(), 4);
//! ```

pub mod building;
pub mod clock;
pub mod damage;
pub mod elements;
pub mod engine;
pub mod error;
pub mod excitation;
pub mod modal;
pub mod results;
pub mod strategy;
pub mod structural;

// Re-export common types
pub mod prelude {
    pub use crate::building::{BuildingModel, SectionDims};
    pub use crate::clock::{Clock, ManualClock, SystemClock};
    pub use crate::damage::DamageAccumulator;
    pub use crate::elements::{
        ElementKind, ElementState, MaterialKind, MaterialProperties, StructuralElement,
    };
    pub use crate::engine::{RunState, SimulationEngine};
    pub use crate::error::{SimError, SimResult};
    pub use crate::excitation::{resonance_factor, SeismicExcitation, ShakeDirection};
    pub use crate::modal::ModalProperties;
    pub use crate::results::{base_shear_kn, SimulationResult};
    pub use crate::strategy::{ResponseStrategy, StartOptions, StrategyChoice};
    pub use crate::structural::StructuralModel;
}
