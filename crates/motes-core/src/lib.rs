//! Motes Core
//!
//! This crate contains the shared foundation of the motes text-particle engine:
//! logging bootstrap, profiling hooks, math types, colors and tunable configuration.

pub mod alloc;
pub mod color;
pub mod config;
pub mod logging;
pub mod math;
pub mod profiling;

pub use color::{Color, Hsl};
pub use config::Config;
