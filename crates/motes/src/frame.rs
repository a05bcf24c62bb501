//! Per-frame particle update.
//!
//! Easing is tick based: every call moves progress by a fixed step no matter
//! how much wall time passed. Only the jitter reads the clock.

use motes_core::config::{Jitter, MotionConfig};
use motes_core::math::Vec3;

use crate::particle::Particle;

/// Progress closer to 1 than this snaps to exactly 1.
const SETTLE_EPSILON: f32 = 1e-4;

/// Next progress value, clamped to `0.0..=1.0`.
///
/// A non-positive or non-finite step leaves progress where it is.
pub fn advance_progress(progress: f32, step: f32) -> f32 {
    let progress = if progress.is_finite() {
        progress.clamp(0.0, 1.0)
    } else {
        0.0
    };
    if !step.is_finite() || step <= 0.0 {
        return progress;
    }

    let next = progress + step;
    if next >= 1.0 - SETTLE_EPSILON {
        1.0
    } else {
        next
    }
}

/// Linear interpolation from `origin` to `target`, exact at both ends.
#[inline]
pub fn interpolate(origin: Vec3, target: Vec3, progress: f32) -> Vec3 {
    if progress >= 1.0 {
        target
    } else if progress > 0.0 {
        origin.lerp(target, progress)
    } else {
        origin
    }
}

/// Oscillation around a resting target at `elapsed` seconds.
///
/// `phase` shifts the sine and cosine per particle; the depth axis uses a
/// 1.5x phase and `depth_scale` times the amplitude.
pub fn jitter_offset(jitter: Jitter, elapsed: f64, phase: f64, depth_scale: f32) -> Vec3 {
    if jitter.amplitude == 0.0 {
        return Vec3::ZERO;
    }

    let t = elapsed * jitter.speed as f64;
    let amplitude = jitter.amplitude as f64;
    Vec3::new(
        ((t + phase).sin() * amplitude) as f32,
        ((t + phase).cos() * amplitude) as f32,
        ((t + phase * 1.5).sin() * amplitude * depth_scale as f64) as f32,
    )
}

/// Advance one particle by a frame and return its new position.
pub fn update_particle(particle: &mut Particle, motion: &MotionConfig, elapsed: f64) -> Vec3 {
    let target = particle.active_target();
    let progress = advance_progress(particle.progress(), motion.progress_step);
    particle.set_progress(progress);

    let mut position = interpolate(particle.origin(), target, progress);
    if particle.is_settled() {
        let jitter = if particle.is_chaos() {
            motion.chaos_jitter
        } else {
            motion.settled_jitter
        };
        let phase = particle.id().raw() as f64;
        position += jitter_offset(jitter, elapsed, phase, motion.depth_jitter_scale);
    }

    particle.position = position;
    position
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::particle::IdAllocator;
    use motes_core::Color;

    fn particle(start: Vec3, target: Vec3) -> Particle {
        let mut ids = IdAllocator::new();
        Particle::new(ids.next_id(), 0, start, target, Color::WHITE)
    }

    #[test]
    fn test_progress_reaches_one_in_ten_steps() {
        let mut progress = 0.0;
        for tick in 1..=10 {
            progress = advance_progress(progress, 0.1);
            if tick < 10 {
                assert!(progress < 1.0, "settled early at tick {}", tick);
            }
        }
        assert_eq!(progress, 1.0);
        assert_eq!(advance_progress(progress, 0.1), 1.0);
    }

    #[test]
    fn test_progress_is_always_clamped() {
        assert_eq!(advance_progress(7.0, 0.1), 1.0);
        assert_eq!(advance_progress(-3.0, 0.0), 0.0);
        assert_eq!(advance_progress(f32::NAN, 0.1), 0.1);
        assert_eq!(advance_progress(0.5, -0.2), 0.5);
        assert_eq!(advance_progress(0.5, f32::INFINITY), 0.5);
        assert_eq!(advance_progress(0.2, 5.0), 1.0);
    }

    #[test]
    fn test_interpolate() {
        let a = Vec3::ZERO;
        let b = Vec3::new(10.0, -10.0, 4.0);
        assert_eq!(interpolate(a, b, 0.0), a);
        assert_eq!(interpolate(a, b, 1.0), b);
        assert_eq!(interpolate(a, b, 0.5), Vec3::new(5.0, -5.0, 2.0));
    }

    #[test]
    fn test_jitter_shape() {
        let jitter = Jitter {
            amplitude: 0.05,
            speed: 2.0,
        };
        let offset = jitter_offset(jitter, 0.0, 0.0, 10.0);
        assert!(offset.x.abs() < 1e-6);
        assert!((offset.y - 0.05).abs() < 1e-6);
        assert!(offset.z.abs() < 1e-6);

        for step in 0..100 {
            let o = jitter_offset(jitter, step as f64 * 0.37, 3.0, 10.0);
            assert!(o.x.abs() <= 0.05 + 1e-6);
            assert!(o.y.abs() <= 0.05 + 1e-6);
            assert!(o.z.abs() <= 0.5 + 1e-5);
        }

        assert_eq!(jitter_offset(Jitter::NONE, 12.0, 1.0, 10.0), Vec3::ZERO);
    }

    #[test]
    fn test_update_lands_on_target_without_jitter() {
        let motion = MotionConfig::default().without_jitter();
        let target = Vec3::new(3.0, 4.0, 1.0);
        let mut p = particle(Vec3::new(-20.0, 10.0, 0.0), target);

        for _ in 0..motion.ticks_to_settle() {
            update_particle(&mut p, &motion, 0.5);
        }
        assert_eq!(p.progress(), 1.0);
        assert_eq!(p.position, target);
    }

    #[test]
    fn test_settled_particle_jitters_around_target() {
        let motion = MotionConfig::default();
        let target = Vec3::new(1.0, 1.0, 1.0);
        let mut p = particle(target, target);
        p.set_progress(1.0);

        let position = update_particle(&mut p, &motion, 1.25);
        let delta = position - target;
        assert!(delta.x.abs() <= 0.05 + 1e-6);
        assert!(delta.z.abs() <= 0.5 + 1e-5);
    }

    #[test]
    fn test_chaos_uses_chaos_target_and_jitter() {
        let motion = MotionConfig::default();
        let mut p = particle(Vec3::ZERO, Vec3::ONE);
        p.begin_chaos(Vec3::splat(80.0));

        update_particle(&mut p, &motion, 0.0);
        assert_eq!(p.position, Vec3::splat(8.0));

        for _ in 0..20 {
            update_particle(&mut p, &motion, 0.7);
        }
        let delta = p.position - Vec3::splat(80.0);
        assert!(delta.x.abs() <= 0.2 + 1e-4);
        assert!(delta.z.abs() <= 2.0 + 1e-4);
    }
}
