//! Per-frame output for an external renderer.
//!
//! ```wgsl
//! struct ParticleInstance {
//!     position: vec3<f32>,
//!     id: u32,
//!     color: vec4<f32>,
//! }
//! ```

use motes_core::Color;
use motes_core::math::{PackedVec3, Quat, Vec3};

use crate::particle::Particle;

/// One live particle, laid out for instanced upload.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct ParticleInstance {
    /// World-space position
    pub position: PackedVec3,
    /// Low 32 bits of the particle id
    pub id: u32,
    pub color: Color,
}

static_assertions::assert_eq_size!(ParticleInstance, [u8; 32]);

impl ParticleInstance {
    pub fn from_particle(particle: &Particle) -> Self {
        Self {
            position: particle.position.into(),
            id: particle.id().raw() as u32,
            color: particle.color(),
        }
    }

    pub fn position(&self) -> Vec3 {
        self.position.into()
    }
}

impl From<&Particle> for ParticleInstance {
    fn from(particle: &Particle) -> Self {
        Self::from_particle(particle)
    }
}

/// Rotation that turns a quad facing +Z at `position` toward `camera`.
pub fn billboard_rotation(position: Vec3, camera: Vec3) -> Quat {
    let to_camera = (camera - position).normalize_or_zero();
    if to_camera == Vec3::ZERO {
        return Quat::IDENTITY;
    }
    Quat::from_rotation_arc(Vec3::Z, to_camera)
}
