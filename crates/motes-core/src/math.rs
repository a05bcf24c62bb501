/// Fast mathematical operations using SIMD-accelerated `glam` types.
///
/// This module re-exports all types and functions from the [`glam`] crate.
/// Particle positions, targets and offsets are all [`Vec3`].
///
/// # Examples
///
/// ```
/// use motes_core::math::Vec3;
///
/// let origin = Vec3::new(-50.0, 12.0, 3.0);
/// let target = Vec3::new(10.0, 0.0, 1.5);
/// let halfway = origin.lerp(target, 0.5);
/// assert_eq!(halfway, Vec3::new(-20.0, 6.0, 2.25));
/// ```
///
/// [`glam`]: https://docs.rs/glam
pub mod fast {
    pub use glam::*;
}

/// Packed vector types for GPU buffer uploads and interoperability.
///
/// These are `#[repr(C)]` and [`Pod`](bytemuck::Pod), so a slice of them can
/// be handed to a renderer with [`bytemuck::cast_slice`].
///
/// ```
/// use motes_core::math::{PackedVec3, Vec3};
///
/// let packed: PackedVec3 = Vec3::new(1.0, 2.0, 3.0).into();
/// let bytes: &[u8] = bytemuck::bytes_of(&packed);
/// assert_eq!(bytes.len(), 12);
/// ```
pub mod packed {
    use bytemuck::{Pod, Zeroable};

    /// A 3D vector with guaranteed `#[repr(C)]` layout.
    ///
    /// ```text
    /// Offset | Field | Size
    /// -------|-------|------
    /// 0      | x     | 4 bytes (f32)
    /// 4      | y     | 4 bytes (f32)
    /// 8      | z     | 4 bytes (f32)
    /// Total: 12 bytes
    /// ```
    #[repr(C)]
    #[derive(Copy, Clone, Debug, Default, PartialEq, Pod, Zeroable)]
    pub struct Vec3 {
        pub x: f32,
        pub y: f32,
        pub z: f32,
    }

    impl From<glam::Vec3> for Vec3 {
        fn from(v: glam::Vec3) -> Self {
            Self {
                x: v.x,
                y: v.y,
                z: v.z,
            }
        }
    }

    impl From<Vec3> for glam::Vec3 {
        fn from(v: Vec3) -> Self {
            glam::Vec3::new(v.x, v.y, v.z)
        }
    }

    static_assertions::assert_eq_size!(Vec3, [f32; 3]);
}

pub use fast::*;
pub use packed::Vec3 as PackedVec3;
