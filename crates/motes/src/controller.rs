//! Animation controller: owns the particle collection and drives the
//! formation and chaos phases.

use std::fmt;
use std::time::Duration;

use motes_core::Config;
use motes_core::math::Vec3;
use motes_core::profiling::profile_function;
use motes_text::Rasterize;

use crate::error::ControllerError;
use crate::frame;
use crate::generator::{self, GenerationReport};
use crate::particle::{Particle, ParticleStore, TextGroup};
use crate::render::ParticleInstance;
use crate::rng::ParticleRng;
use crate::signal::{ChaosCompletion, ChaosOutcome, ChaosSignal};
use crate::time::Time;

/// Observable controller state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ControllerState {
    /// Nothing generated yet.
    Idle,
    /// Particles converging on a freshly generated shape.
    Forming,
    /// Every particle has reached its target.
    Settled,
    /// Particles scattering; a reform is scheduled.
    ChaosScatter,
    /// The last group's particles converging on their shifted targets.
    ChaosReform,
}

impl fmt::Display for ControllerState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ControllerState::Idle => "idle",
            ControllerState::Forming => "forming",
            ControllerState::Settled => "settled",
            ControllerState::ChaosScatter => "chaos-scatter",
            ControllerState::ChaosReform => "chaos-reform",
        };
        f.write_str(name)
    }
}

#[derive(Debug)]
struct PendingReform {
    /// Reform runs on the first tick whose real elapsed time reaches this.
    deadline: Duration,
    signal: ChaosSignal,
}

#[derive(Debug)]
enum Phase {
    Idle,
    Forming,
    Settled,
    ChaosScatter(PendingReform),
    ChaosReform,
}

impl Phase {
    fn state(&self) -> ControllerState {
        match self {
            Phase::Idle => ControllerState::Idle,
            Phase::Forming => ControllerState::Forming,
            Phase::Settled => ControllerState::Settled,
            Phase::ChaosScatter(_) => ControllerState::ChaosScatter,
            Phase::ChaosReform => ControllerState::ChaosReform,
        }
    }
}

type ChaosCallback = Box<dyn FnMut() + Send>;

/// Turns text groups into a particle field and animates it frame by frame.
///
/// The controller is the single mutator of its particles. A regeneration
/// that arrives while a chaos transition is pending cancels the scheduled
/// reform, so a stale reform can never be applied to the new collection.
///
/// # Example
///
/// ```rust,no_run
/// use std::time::Duration;
/// use motes::{Controller, ParticleRng, TextGroup, Time};
/// use motes_core::Config;
/// use motes_core::math::Vec3;
/// use motes_text::{FontSet, FontSystem, TextRasterizer};
///
/// let config = Config::default();
/// let rasterizer = TextRasterizer::new(
///     FontSystem::with_system_fonts(),
///     FontSet::reference("fonts"),
///     config.raster,
/// );
/// let mut controller = Controller::new(rasterizer, ParticleRng::from_os_rng(), config);
/// controller
///     .regenerate(vec![TextGroup::new("Gen-Z", Vec3::ZERO)], 1000.0)
///     .unwrap();
///
/// let mut time = Time::new();
/// for _ in 0..10 {
///     time.advance(Duration::from_millis(16));
///     controller.tick(&time);
/// }
/// let instances = controller.instances();
/// # let _ = instances;
/// ```
pub struct Controller<R: Rasterize> {
    rasterizer: R,
    rng: ParticleRng,
    config: Config,
    store: ParticleStore,
    groups: Vec<TextGroup>,
    viewport_width: f32,
    phase: Phase,
    /// Real elapsed time seen by the latest tick.
    clock: Duration,
    on_chaos_complete: Option<ChaosCallback>,
}

impl<R: Rasterize> Controller<R> {
    pub fn new(rasterizer: R, rng: ParticleRng, config: Config) -> Self {
        Self {
            rasterizer,
            rng,
            config,
            store: ParticleStore::new(),
            groups: Vec::new(),
            viewport_width: 0.0,
            phase: Phase::Idle,
            clock: Duration::ZERO,
            on_chaos_complete: None,
        }
    }

    pub fn state(&self) -> ControllerState {
        self.phase.state()
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn rasterizer(&self) -> &R {
        &self.rasterizer
    }

    pub fn groups(&self) -> &[TextGroup] {
        &self.groups
    }

    pub fn viewport_width(&self) -> f32 {
        self.viewport_width
    }

    pub fn particles(&self) -> &ParticleStore {
        &self.store
    }

    /// Deadline of the pending reform, if a chaos transition is scheduled.
    pub fn reform_deadline(&self) -> Option<Duration> {
        match &self.phase {
            Phase::ChaosScatter(pending) => Some(pending.deadline),
            _ => None,
        }
    }

    /// Called once each time a chaos reform is installed.
    pub fn set_on_chaos_complete(&mut self, callback: impl FnMut() + Send + 'static) {
        self.on_chaos_complete = Some(Box::new(callback));
    }

    pub fn clear_on_chaos_complete(&mut self) {
        self.on_chaos_complete = None;
    }

    /// Discard every particle and generate a new field for `groups`.
    ///
    /// A pending chaos transition is cancelled and its completion resolves
    /// to [`ChaosOutcome::Cancelled`].
    pub fn regenerate(
        &mut self,
        groups: Vec<TextGroup>,
        viewport_width: f32,
    ) -> Result<GenerationReport, ControllerError> {
        profile_function!();
        validate_width(viewport_width)?;

        self.cancel_pending_chaos();

        let max_width = self.config.raster.max_width(viewport_width);
        let (particles, report) = generator::generate(
            &groups,
            max_width,
            &mut self.rasterizer,
            &mut self.rng,
            self.store.ids(),
            &self.config.sampling,
        );

        self.store.replace_all(particles);
        self.groups = groups;
        self.viewport_width = viewport_width;
        self.phase = Phase::Forming;

        tracing::info!(
            "Generated {} particles for {} text groups (max width {})",
            report.particle_count,
            self.groups.len(),
            max_width
        );
        Ok(report)
    }

    /// Regenerate from parallel text and offset lists.
    pub fn regenerate_texts<S: AsRef<str>>(
        &mut self,
        texts: &[S],
        offsets: &[Vec3],
        viewport_width: f32,
    ) -> Result<GenerationReport, ControllerError> {
        let groups = TextGroup::zip(texts, offsets)?;
        self.regenerate(groups, viewport_width)
    }

    /// Change the viewport width, regenerating the current groups if it
    /// differs from the last one.
    pub fn set_viewport_width(
        &mut self,
        viewport_width: f32,
    ) -> Result<Option<GenerationReport>, ControllerError> {
        validate_width(viewport_width)?;
        if viewport_width == self.viewport_width && !matches!(self.phase, Phase::Idle) {
            return Ok(None);
        }
        let groups = self.groups.clone();
        self.regenerate(groups, viewport_width).map(Some)
    }

    /// Scatter every particle and schedule the reform.
    ///
    /// The reform runs on the first [`tick`](Self::tick) at least
    /// `chaos_delay` of wall time after the latest tick, regardless of the
    /// frame rate or time scale. Fails if a chaos transition is already
    /// pending.
    pub fn trigger_chaos(&mut self) -> Result<ChaosCompletion, ControllerError> {
        profile_function!();
        if matches!(self.phase, Phase::ChaosScatter(_)) {
            tracing::warn!("Chaos triggered while a transition is already pending");
            return Err(ControllerError::ChaosPending);
        }

        let extent = self.config.motion.chaos_extent;
        for particle in self.store.iter_mut() {
            let target = self.rng.in_cube(extent);
            particle.begin_chaos(target);
        }

        let signal = ChaosSignal::new();
        let completion = signal.completion();
        let deadline = self.clock.saturating_add(self.config.motion.chaos_delay);
        self.phase = Phase::ChaosScatter(PendingReform { deadline, signal });

        tracing::debug!(
            "Chaos started for {} particles, reform at {:?}",
            self.store.len(),
            deadline
        );
        Ok(completion)
    }

    /// Advance the animation by one frame.
    pub fn tick(&mut self, time: &Time) {
        profile_function!();
        self.clock = time.real_elapsed();

        let reform_due = matches!(
            &self.phase,
            Phase::ChaosScatter(pending) if self.clock >= pending.deadline
        );
        if reform_due {
            self.apply_reform();
        }

        let elapsed = time.elapsed_seconds_f64();
        let motion = self.config.motion;
        for particle in self.store.iter_mut() {
            frame::update_particle(particle, &motion, elapsed);
        }

        if matches!(self.phase, Phase::Forming | Phase::ChaosReform)
            && self.store.iter().all(Particle::is_settled)
        {
            tracing::debug!("Settled after {} frames", time.frame_count());
            self.phase = Phase::Settled;
        }
    }

    /// Position and color of every live particle, in store order.
    pub fn instances(&self) -> Vec<ParticleInstance> {
        self.store.iter().map(ParticleInstance::from_particle).collect()
    }

    /// Like [`instances`](Self::instances) but reuses `out`.
    pub fn write_instances(&self, out: &mut Vec<ParticleInstance>) {
        out.clear();
        out.extend(self.store.iter().map(ParticleInstance::from_particle));
    }

    /// `offset[0] - offset[1]`, with a missing offset counting as zero.
    fn reform_shift(&self) -> Vec3 {
        let offset = |index: usize| {
            self.groups
                .get(index)
                .map(|group| group.offset)
                .unwrap_or(Vec3::ZERO)
        };
        offset(0) - offset(1)
    }

    fn apply_reform(&mut self) {
        let pending = match std::mem::replace(&mut self.phase, Phase::ChaosReform) {
            Phase::ChaosScatter(pending) => pending,
            other => {
                self.phase = other;
                return;
            }
        };

        let shift = self.reform_shift();
        match self.groups.len().checked_sub(1) {
            Some(last) => {
                self.store.retain(|p| p.text_index() == last);
                for particle in self.store.iter_mut() {
                    let target = particle.home_position() + shift;
                    particle.begin_reform(target);
                }
            }
            None => self.store.clear(),
        }

        tracing::info!(
            "Chaos reform kept {} particles, shifted by {:?}",
            self.store.len(),
            shift
        );

        pending.signal.resolve(ChaosOutcome::Completed);
        if let Some(callback) = self.on_chaos_complete.as_mut() {
            callback();
        }
    }

    fn cancel_pending_chaos(&mut self) {
        if let Phase::ChaosScatter(pending) = &self.phase {
            tracing::info!("Pending chaos reform cancelled");
            pending.signal.resolve(ChaosOutcome::Cancelled);
            self.phase = Phase::Idle;
        }
    }
}

impl<R: Rasterize> Drop for Controller<R> {
    fn drop(&mut self) {
        if let Phase::ChaosScatter(pending) = &self.phase {
            pending.signal.resolve(ChaosOutcome::Cancelled);
        }
    }
}

impl<R: Rasterize> fmt::Debug for Controller<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Controller")
            .field("state", &self.state())
            .field("particles", &self.store.len())
            .field("groups", &self.groups)
            .field("viewport_width", &self.viewport_width)
            .finish_non_exhaustive()
    }
}

fn validate_width(width: f32) -> Result<(), ControllerError> {
    if width.is_finite() && width >= 0.0 {
        Ok(())
    } else {
        Err(ControllerError::InvalidWidth(width))
    }
}
