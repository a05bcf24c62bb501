//! Motes - text-shaped particle fields
//!
//! Motes turns strings into clouds of colored points that converge on the
//! shape of the text, and animates them through a scatter-and-reform
//! "chaos" transition:
//!
//! - **Generation**: text is rasterized to an alpha bitmap and sampled into
//!   particles, one text group at a time
//! - **Controller**: a five-state machine that owns the particles and
//!   schedules the chaos reform
//! - **Frame update**: tick-based easing toward each particle's target with
//!   a gentle jitter once it arrives
//! - **Output**: a flat, `bytemuck`-ready instance list for any renderer
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use std::time::Duration;
//! use motes::prelude::*;
//! use motes_text::{FontSet, FontSystem, TextRasterizer};
//!
//! motes::core::logging::init();
//!
//! let config = Config::default();
//! let rasterizer = TextRasterizer::new(
//!     FontSystem::with_system_fonts(),
//!     FontSet::reference("fonts"),
//!     config.raster,
//! );
//! let mut controller = Controller::new(rasterizer, ParticleRng::from_os_rng(), config);
//! let mut session = LabelSession::default();
//!
//! controller.regenerate(session.layout(), 1280.0).unwrap();
//!
//! let mut time = Time::new();
//! loop {
//!     time.update();
//!     controller.tick(&time);
//!     let instances = controller.instances();
//!     // upload `instances` and draw
//! #   let _ = instances;
//! #   break;
//! }
//! ```

pub mod controller;
pub mod error;
pub mod frame;
pub mod generator;
pub mod palette;
pub mod particle;
pub mod render;
pub mod rng;
pub mod session;
pub mod signal;
pub mod time;

// Re-export sub-crates
pub use motes_core as core;
pub use motes_core::math;
pub use motes_text as text;

pub use controller::{Controller, ControllerState};
pub use error::ControllerError;
pub use generator::{GenerationReport, generate, sample_bitmap};
pub use particle::{IdAllocator, Particle, ParticleId, ParticleMode, ParticleStore, TextGroup};
pub use render::{ParticleInstance, billboard_rotation};
pub use rng::ParticleRng;
pub use session::{LabelSession, WordCombiner};
pub use signal::{ChaosCompletion, ChaosOutcome};
pub use time::Time;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::controller::{Controller, ControllerState};
    pub use crate::error::ControllerError;
    pub use crate::particle::{Particle, ParticleId, TextGroup};
    pub use crate::render::ParticleInstance;
    pub use crate::rng::ParticleRng;
    pub use crate::session::{LabelSession, WordCombiner};
    pub use crate::signal::{ChaosCompletion, ChaosOutcome};
    pub use crate::time::Time;

    pub use motes_core::Config;
    pub use motes_core::math::Vec3;
    pub use motes_text::Rasterize;
}
