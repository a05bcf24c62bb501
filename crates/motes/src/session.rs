//! Label session: the text flow an interactive front end runs on top of
//! the controller.
//!
//! A session shows one label. Entering a new word stages a two-group
//! layout (previous label on top, new word below it); once the external
//! word combiner answers, the combined word replaces both.

use std::fmt;

use motes_core::Hsl;
use motes_core::math::Vec3;

use crate::particle::TextGroup;
use crate::rng::ParticleRng;

/// Label shown before anything is entered.
pub const INITIAL_LABEL: &str = "Gen-Z";

/// Where a newly entered word is placed relative to the current label.
pub const STAGED_OFFSET: Vec3 = Vec3::new(0.0, -20.0, 0.0);

/// Scene background colors (hue degrees, saturation, lightness).
const BACKGROUNDS: [(f32, f32, f32); 5] = [
    (197.0, 0.37, 0.24),
    (173.0, 0.58, 0.39),
    (43.0, 0.74, 0.66),
    (27.0, 0.87, 0.67),
    (12.0, 0.76, 0.61),
];

/// External collaborator that merges two words into one.
///
/// Implementations usually call out to a remote service; the session only
/// needs the answer or an error.
pub trait WordCombiner {
    type Error: fmt::Display;

    fn combine(&mut self, first: &str, second: &str) -> Result<String, Self::Error>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelSession {
    current: String,
    staged: Option<String>,
}

impl LabelSession {
    pub fn new(initial: impl Into<String>) -> Self {
        Self {
            current: initial.into(),
            staged: None,
        }
    }

    /// The active label.
    pub fn current(&self) -> &str {
        &self.current
    }

    /// The word waiting to be combined, if any.
    pub fn staged(&self) -> Option<&str> {
        self.staged.as_deref()
    }

    /// Layout for the current state: the staged pair while a word waits,
    /// the single label otherwise.
    pub fn layout(&self) -> Vec<TextGroup> {
        match &self.staged {
            Some(staged) => vec![
                TextGroup::new(self.current.clone(), Vec3::ZERO),
                TextGroup::new(staged.clone(), STAGED_OFFSET),
            ],
            None => vec![TextGroup::new(self.current.clone(), Vec3::ZERO)],
        }
    }

    /// Stage `new_text` under the current label.
    pub fn stage(&mut self, new_text: impl Into<String>) -> Vec<TextGroup> {
        self.staged = Some(new_text.into());
        self.layout()
    }

    /// Install the combiner's answer as the new label.
    ///
    /// A failed combination becomes the empty label, which generates no
    /// particles.
    pub fn resolve<E: fmt::Display>(&mut self, result: Result<String, E>) -> Vec<TextGroup> {
        let combined = result.unwrap_or_else(|err| {
            tracing::warn!("Word combination failed: {}", err);
            String::new()
        });
        self.current = combined;
        self.staged = None;
        self.layout()
    }

    /// Ask `combiner` to merge the current label with the staged word and
    /// install the answer. Without a staged word the layout is unchanged.
    pub fn combine_with<C: WordCombiner>(&mut self, combiner: &mut C) -> Vec<TextGroup> {
        let Some(staged) = self.staged.as_deref() else {
            return self.layout();
        };
        let result = combiner.combine(&self.current, staged);
        self.resolve(result)
    }

    /// Random background color to pair with a new label.
    pub fn background(rng: &mut ParticleRng) -> Hsl {
        let (h, s, l) = BACKGROUNDS[rng.index(BACKGROUNDS.len()).unwrap_or(0)];
        Hsl::from_degrees(h, s, l)
    }
}

impl Default for LabelSession {
    fn default() -> Self {
        Self::new(INITIAL_LABEL)
    }
}
