//! Simulation engine - run state machine, step loop, and control surface

use log::{info, warn};
use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

use crate::building::BuildingModel;
use crate::clock::{Clock, ManualClock, SystemClock};
use crate::damage::DamageAccumulator;
use crate::elements::{ElementState, MaterialProperties};
use crate::error::{SimError, SimResult};
use crate::excitation::{resonance_factor, SeismicExcitation};
use crate::modal::ModalProperties;
use crate::results::{self, spectral_displacement_m, SimulationResult};
use crate::strategy::{self, ResponseStrategy, StartOptions, StepInputs};
use crate::structural::StructuralModel;

/// Run lifecycle state
///
/// `Idle → Running → {Completed | Cancelled | Failed}`, with `Suspended` as a
/// resumable sub-state of `Running` while host visibility is lost.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RunState {
    Idle,
    Running,
    Suspended,
    Completed,
    Cancelled,
    Failed,
}

/// Mutable state owned by one run, discarded when the run terminates
struct ActiveRun {
    /// Clock reading at start
    started_at: f64,
    /// Clock reading when suspended, while suspended
    suspended_at: Option<f64>,
    /// Total suspended wall time, excluded from elapsed
    paused_total: f64,
    /// One-shot cooperative cancel flag, checked at the top of each step
    cancel_requested: bool,
    /// Per-story max horizontal displacement in m, monotone
    story_maxima: Vec<f64>,
    /// Rotating-batch cursor into the element table
    batch_cursor: usize,
    /// Elements visited per step, `None` = all
    batch_size: Option<usize>,
    /// Response path selected at start
    strategy: Box<dyn ResponseStrategy>,
    /// Resonance amplification for this run
    resonance: f64,
}

enum StepVerdict {
    Running,
    Complete,
    Diverged(String),
}

/// Seismic response simulation engine for one building.
///
/// Single-threaded with at most one active run; starting a new run cancels
/// the active one first. Stepping is cooperative and driven by the host's
/// frame clock; no step blocks on I/O. The rendering collaborator reads
/// [`ElementState`] snapshots each frame rather than holding references into
/// engine-owned memory.
pub struct SimulationEngine<C: Clock = SystemClock> {
    structure: StructuralModel,
    excitation: SeismicExcitation,
    accumulator: DamageAccumulator,
    clock: C,
    state: RunState,
    run: Option<ActiveRun>,
    result: Option<SimulationResult>,
}

impl SimulationEngine<SystemClock> {
    /// Create an engine driven by the system clock
    pub fn new(
        building: BuildingModel,
        material: MaterialProperties,
        excitation: SeismicExcitation,
    ) -> SimResult<Self> {
        Self::with_clock(building, material, excitation, SystemClock::new())
    }
}

impl SimulationEngine<ManualClock> {
    /// Drive a run from start to completion at a fixed tick.
    ///
    /// Convenience loop for non-interactive hosts that do not render between
    /// steps; the manual clock advances by `dt` seconds per step.
    pub fn run_to_completion(
        &mut self,
        options: StartOptions,
        dt: f64,
    ) -> SimResult<&SimulationResult> {
        if !(dt > 0.0) || !dt.is_finite() {
            return Err(SimError::InvalidInput(format!(
                "step tick must be positive, got {}",
                dt
            )));
        }
        self.start(options)?;
        while self.state == RunState::Running {
            self.clock.advance(dt);
            self.step()?;
        }
        self.require_result()
    }
}

impl<C: Clock> SimulationEngine<C> {
    /// Create an engine driven by an explicit clock
    pub fn with_clock(
        building: BuildingModel,
        material: MaterialProperties,
        excitation: SeismicExcitation,
        clock: C,
    ) -> SimResult<Self> {
        excitation.validate()?;
        let structure = StructuralModel::new(building, material)?;
        let accumulator = DamageAccumulator::new(structure.building().stories, structure.material());
        Ok(Self {
            structure,
            excitation,
            accumulator,
            clock,
            state: RunState::Idle,
            run: None,
            result: None,
        })
    }

    // ========================
    // Configuration
    // ========================

    /// Supply modal properties from an external static analysis.
    ///
    /// Takes precedence over the derived estimate. Cancels any active run.
    pub fn set_modal_properties(&mut self, modal: ModalProperties) {
        self.cancel();
        self.structure.set_modal(modal);
    }

    /// Replace the seismic excitation. Cancels any active run.
    pub fn set_excitation(&mut self, excitation: SeismicExcitation) -> SimResult<()> {
        excitation.validate()?;
        self.cancel();
        self.excitation = excitation;
        Ok(())
    }

    /// Replace the building model. Cancels any active run, rebuilds the
    /// element table and modal defaults, and discards the prior result.
    pub fn set_building_model(
        &mut self,
        building: BuildingModel,
        material: MaterialProperties,
    ) -> SimResult<()> {
        let structure = StructuralModel::new(building, material)?;
        self.cancel();
        self.accumulator =
            DamageAccumulator::new(structure.building().stories, structure.material());
        self.structure = structure;
        self.result = None;
        self.state = RunState::Idle;
        Ok(())
    }

    // ========================
    // Run control
    // ========================

    /// Start a run, cancelling any active one first.
    ///
    /// Selects the response strategy once. The spectral path completes
    /// immediately with a closed-form result; the detailed path enters
    /// `Running` and expects the host to call [`step`](Self::step) per frame.
    pub fn start(&mut self, options: StartOptions) -> SimResult<()> {
        if matches!(self.state, RunState::Running | RunState::Suspended) {
            self.finish_cancel();
        }
        self.excitation.validate()?;
        let strategy = strategy::select(options.strategy, options.scene_ready)?;

        let natural = self.structure.natural_frequency();
        let resonance = resonance_factor(self.excitation.frequency, natural);
        info!(
            "starting {} run: natural frequency {:.3} Hz, excitation {:.3} Hz, resonance factor {:.2}",
            strategy.name(),
            natural,
            self.excitation.frequency,
            resonance
        );

        // Each run owns a fresh damage map and undeformed element set.
        for element in self.structure.elements_mut() {
            element.reset();
        }
        self.result = None;

        if strategy.completes_immediately() {
            let sd = spectral_displacement_m(self.excitation.spectral_acceleration, natural);
            let stories = self.structure.building().stories;
            let maxima: Vec<f64> = (0..stories)
                .map(|story| sd * self.structure.modal().weight(story).unwrap_or(1.0))
                .collect();
            let result = results::aggregate(
                &maxima,
                self.structure.elements(),
                self.structure.building_weight_kn(),
                &self.excitation,
                self.structure.modal().period,
            );
            info!(
                "spectral run completed: max displacement {:.2} cm, base shear {:.1} kN",
                result.max_displacement, result.base_shear
            );
            self.result = Some(result);
            self.run = None;
            self.state = RunState::Completed;
            return Ok(());
        }

        self.run = Some(ActiveRun {
            started_at: self.clock.now(),
            suspended_at: None,
            paused_total: 0.0,
            cancel_requested: false,
            story_maxima: vec![0.0; self.structure.building().stories],
            batch_cursor: 0,
            batch_size: options.batch_size,
            strategy,
            resonance,
        });
        self.state = RunState::Running;
        Ok(())
    }

    /// Advance the run by one frame tick.
    ///
    /// No-op outside `Running` (a suspended run records no elapsed time).
    /// Returns the state after the step; a non-finite computed value aborts
    /// the run with [`SimError::Divergence`], leaving elements at their
    /// last-known-good positions.
    pub fn step(&mut self) -> SimResult<RunState> {
        match self.state {
            RunState::Running => {}
            other => return Ok(other),
        }
        if self.run.as_ref().is_some_and(|run| run.cancel_requested) {
            self.finish_cancel();
            return Ok(self.state);
        }

        let mat_damping = self.structure.material().damping_sensitivity();
        let duration = self.excitation.duration;

        let verdict = {
            let Self {
                structure,
                excitation,
                accumulator,
                clock,
                state,
                run,
                ..
            } = self;
            let Some(run) = run.as_mut() else {
                *state = RunState::Idle;
                return Ok(RunState::Idle);
            };

            let elapsed = clock.now() - run.started_at - run.paused_total;
            let progress = (elapsed / duration).min(1.0);
            let damping =
                (-excitation.damping_ratio * mat_damping * std::f64::consts::PI * elapsed).exp();
            let inputs = StepInputs {
                elapsed,
                intensity: excitation.intensity,
                frequency: excitation.frequency,
                damping,
                resonance: run.resonance,
                direction: excitation.direction,
            };

            let (elements, modal, building) = structure.split_mut();
            let total = elements.len();
            let (start_idx, count) = match run.batch_size {
                Some(n) if n < total => (run.batch_cursor, n.max(1)),
                _ => (0, total),
            };

            let mut diverged: Option<String> = None;
            for k in 0..count {
                let element = &mut elements[(start_idx + k) % total];
                let weight = modal
                    .weight(element.story)
                    .unwrap_or_else(|| (element.reference.y / building.height).clamp(0.0, 1.0));
                let (ox, oz) = run.strategy.offsets(&inputs, weight);

                // The squared magnitude can overflow to infinity even when
                // both offsets are finite, so the guard must cover it too.
                // Nothing is written for a divergent element; positions stay
                // at their last-known-good values.
                let displacement = (ox * ox + oz * oz).sqrt();
                if !(ox.is_finite() && oz.is_finite() && displacement.is_finite()) {
                    diverged = Some(format!(
                        "non-finite displacement for element {} at t = {:.3} s",
                        element.id, elapsed
                    ));
                    break;
                }

                // Vertical position is unaffected by horizontal shaking.
                element.position = Vector3::new(
                    element.reference.x + ox,
                    element.reference.y,
                    element.reference.z + oz,
                );

                if let Some(slot) = run.story_maxima.get_mut(element.story) {
                    if displacement > *slot {
                        *slot = displacement;
                    }
                }

                // Finite displacement, progress in [0, 1], and bounded
                // resonance keep the damage increment finite as well.
                accumulator.accumulate(element, displacement, progress, run.resonance);
            }

            match diverged {
                Some(msg) => StepVerdict::Diverged(msg),
                None => {
                    run.batch_cursor = (start_idx + count) % total.max(1);
                    if elapsed >= duration {
                        StepVerdict::Complete
                    } else {
                        StepVerdict::Running
                    }
                }
            }
        };

        match verdict {
            StepVerdict::Running => Ok(RunState::Running),
            StepVerdict::Complete => {
                self.finalize();
                Ok(RunState::Completed)
            }
            StepVerdict::Diverged(msg) => {
                self.run = None;
                self.state = RunState::Failed;
                warn!("run failed: {}", msg);
                Err(SimError::Divergence(msg))
            }
        }
    }

    /// Pause stepping without losing run state; suspended wall time is
    /// excluded from elapsed. No-op unless running.
    pub fn suspend(&mut self) {
        if self.state == RunState::Running {
            if let Some(run) = self.run.as_mut() {
                run.suspended_at = Some(self.clock.now());
                self.state = RunState::Suspended;
            }
        }
    }

    /// Resume a suspended run as a continuation of the same run
    pub fn resume(&mut self) {
        if self.state == RunState::Suspended {
            if let Some(run) = self.run.as_mut() {
                if let Some(at) = run.suspended_at.take() {
                    run.paused_total += self.clock.now() - at;
                }
                self.state = RunState::Running;
            }
        }
    }

    /// Cancel the active run: elements return to their reference positions,
    /// aggregation is skipped, and no result is produced. Damage persists
    /// until the next start or reset. No-op without an active run.
    pub fn cancel(&mut self) {
        if matches!(self.state, RunState::Running | RunState::Suspended) {
            if let Some(run) = self.run.as_mut() {
                run.cancel_requested = true;
            }
            self.finish_cancel();
        }
    }

    /// Cancel any in-flight run, restore every element to its reference
    /// position with zero damage, and discard the prior result. Idempotent.
    pub fn reset(&mut self) {
        self.run = None;
        for element in self.structure.elements_mut() {
            element.reset();
        }
        self.result = None;
        self.state = RunState::Idle;
    }

    // ========================
    // Observation
    // ========================

    /// Current run state
    pub fn state(&self) -> RunState {
        self.state
    }

    /// Elapsed fraction of the run duration, in [0, 1]
    pub fn progress(&self) -> f64 {
        match (&self.run, self.state) {
            (Some(run), RunState::Running | RunState::Suspended) => {
                let now = run.suspended_at.unwrap_or_else(|| self.clock.now());
                ((now - run.started_at - run.paused_total) / self.excitation.duration)
                    .clamp(0.0, 1.0)
            }
            (_, RunState::Completed) => 1.0,
            _ => 0.0,
        }
    }

    /// Per-frame element snapshots for the rendering collaborator
    pub fn element_states(&self) -> Vec<ElementState> {
        self.structure.elements().iter().map(Into::into).collect()
    }

    /// The result of the last completed run, if any
    pub fn result(&self) -> Option<&SimulationResult> {
        self.result.as_ref()
    }

    /// The result of the last completed run, or [`SimError::NoResult`]
    pub fn require_result(&self) -> SimResult<&SimulationResult> {
        self.result.as_ref().ok_or(SimError::NoResult)
    }

    pub fn structure(&self) -> &StructuralModel {
        &self.structure
    }

    pub fn excitation(&self) -> &SeismicExcitation {
        &self.excitation
    }

    /// The clock driving the step loop
    pub fn clock(&self) -> &C {
        &self.clock
    }

    // ========================
    // Internals
    // ========================

    fn finalize(&mut self) {
        if let Some(run) = self.run.take() {
            let result = results::aggregate(
                &run.story_maxima,
                self.structure.elements(),
                self.structure.building_weight_kn(),
                &self.excitation,
                self.structure.modal().period,
            );
            info!(
                "run completed: max displacement {:.2} cm, base shear {:.1} kN, damage {:.1}%",
                result.max_displacement, result.base_shear, result.damage_percentage
            );
            self.result = Some(result);
            self.state = RunState::Completed;
        }
    }

    fn finish_cancel(&mut self) {
        if self.run.take().is_some() {
            for element in self.structure.elements_mut() {
                element.restore_position();
            }
            self.state = RunState::Cancelled;
            info!("run cancelled");
        }
    }
}
