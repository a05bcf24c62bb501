//! Particles, text groups and the particle store.

use motes_core::Color;
use motes_core::alloc::HashMap;
use motes_core::math::Vec3;

use crate::error::ControllerError;

/// One input string and where its shape is placed in the scene.
///
/// Groups are identified by their position in the list handed to the
/// controller.
#[derive(Debug, Clone, PartialEq)]
pub struct TextGroup {
    pub text: String,
    pub offset: Vec3,
}

impl TextGroup {
    pub fn new(text: impl Into<String>, offset: Vec3) -> Self {
        Self {
            text: text.into(),
            offset,
        }
    }

    /// Pair up parallel text and offset lists.
    pub fn zip<S: AsRef<str>>(texts: &[S], offsets: &[Vec3]) -> Result<Vec<Self>, ControllerError> {
        if texts.len() != offsets.len() {
            return Err(ControllerError::LengthMismatch {
                texts: texts.len(),
                offsets: offsets.len(),
            });
        }
        Ok(texts
            .iter()
            .zip(offsets)
            .map(|(text, &offset)| Self::new(text.as_ref(), offset))
            .collect())
    }

    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }
}

/// Stable particle identity, independent of the particle's slot in the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ParticleId(u64);

impl ParticleId {
    pub fn raw(self) -> u64 {
        self.0
    }
}

/// Hands out particle ids; ids are never reused by the same allocator.
#[derive(Debug, Default)]
pub struct IdAllocator {
    next: u64,
}

impl IdAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next_id(&mut self) -> ParticleId {
        let id = ParticleId(self.next);
        self.next += 1;
        id
    }
}

/// What a particle is currently moving toward.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ParticleMode {
    /// Converging on the formation target.
    Formation,
    /// Scattering toward a random point.
    Chaos { target: Vec3 },
}

/// A single point of a text shape.
#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    id: ParticleId,
    text_index: usize,
    color: Color,
    /// Where the current phase started; interpolation runs from here.
    origin: Vec3,
    /// Rendered position, rewritten every frame.
    pub(crate) position: Vec3,
    target: Vec3,
    /// Target assigned at generation time.
    home: Vec3,
    progress: f32,
    mode: ParticleMode,
}

impl Particle {
    /// A freshly generated particle at `start`, heading for `target`.
    pub fn new(id: ParticleId, text_index: usize, start: Vec3, target: Vec3, color: Color) -> Self {
        Self {
            id,
            text_index,
            color,
            origin: start,
            position: start,
            target,
            home: target,
            progress: 0.0,
            mode: ParticleMode::Formation,
        }
    }

    pub fn id(&self) -> ParticleId {
        self.id
    }

    pub fn text_index(&self) -> usize {
        self.text_index
    }

    pub fn color(&self) -> Color {
        self.color
    }

    /// Rendered position as of the latest tick.
    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn origin(&self) -> Vec3 {
        self.origin
    }

    /// Formation target.
    pub fn target_position(&self) -> Vec3 {
        self.target
    }

    /// Formation target as originally generated, before any reform shift.
    pub fn home_position(&self) -> Vec3 {
        self.home
    }

    pub fn chaos_target(&self) -> Option<Vec3> {
        match self.mode {
            ParticleMode::Chaos { target } => Some(target),
            ParticleMode::Formation => None,
        }
    }

    pub fn is_chaos(&self) -> bool {
        matches!(self.mode, ParticleMode::Chaos { .. })
    }

    pub fn mode(&self) -> ParticleMode {
        self.mode
    }

    /// Target for the current phase.
    pub fn active_target(&self) -> Vec3 {
        self.chaos_target().unwrap_or(self.target)
    }

    /// Interpolation progress in `0.0..=1.0`.
    pub fn progress(&self) -> f32 {
        self.progress
    }

    pub fn is_settled(&self) -> bool {
        self.progress >= 1.0
    }

    pub(crate) fn set_progress(&mut self, progress: f32) {
        self.progress = progress.clamp(0.0, 1.0);
    }

    /// Start scattering toward `target` from wherever the particle is now.
    pub(crate) fn begin_chaos(&mut self, target: Vec3) {
        self.origin = self.position;
        self.mode = ParticleMode::Chaos { target };
        self.progress = 0.0;
    }

    /// Leave chaos and converge on a new formation target.
    pub(crate) fn begin_reform(&mut self, target: Vec3) {
        self.origin = self.position;
        self.target = target;
        self.mode = ParticleMode::Formation;
        self.progress = 0.0;
    }
}

/// Owned particle collection with id lookup.
///
/// Iteration order is the generation order and stays stable until the
/// collection is replaced or filtered.
#[derive(Debug, Default)]
pub struct ParticleStore {
    particles: Vec<Particle>,
    slots: HashMap<ParticleId, usize>,
    ids: IdAllocator,
}

impl ParticleStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Id allocator for particles that will be installed into this store.
    pub fn ids(&mut self) -> &mut IdAllocator {
        &mut self.ids
    }

    /// Drop every particle and install `particles` instead.
    pub fn replace_all(&mut self, particles: Vec<Particle>) {
        self.particles = particles;
        self.reindex();
    }

    /// Keep only the particles for which `keep` returns true.
    pub fn retain(&mut self, keep: impl FnMut(&Particle) -> bool) {
        self.particles.retain(keep);
        self.reindex();
    }

    pub fn clear(&mut self) {
        self.particles.clear();
        self.slots.clear();
    }

    pub fn get(&self, id: ParticleId) -> Option<&Particle> {
        let slot = *self.slots.get(&id)?;
        self.particles.get(slot)
    }

    pub fn get_mut(&mut self, id: ParticleId) -> Option<&mut Particle> {
        let slot = *self.slots.get(&id)?;
        self.particles.get_mut(slot)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Particle> {
        self.particles.iter()
    }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, Particle> {
        self.particles.iter_mut()
    }

    pub fn as_slice(&self) -> &[Particle] {
        &self.particles
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    /// Number of particles belonging to text group `text_index`.
    pub fn count_group(&self, text_index: usize) -> usize {
        self.particles
            .iter()
            .filter(|p| p.text_index == text_index)
            .count()
    }

    fn reindex(&mut self) {
        self.slots.clear();
        self.slots.extend(
            self.particles
                .iter()
                .enumerate()
                .map(|(slot, particle)| (particle.id, slot)),
        );
    }
}

impl<'a> IntoIterator for &'a ParticleStore {
    type Item = &'a Particle;
    type IntoIter = std::slice::Iter<'a, Particle>;

    fn into_iter(self) -> Self::IntoIter {
        self.particles.iter()
    }
}
