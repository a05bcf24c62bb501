//! Particle field generation: text groups in, particles out.

use motes_core::Hsl;
use motes_core::config::SamplingConfig;
use motes_core::math::Vec3;
use motes_core::profiling::profile_function;
use motes_text::{AlphaBitmap, Rasterize};

use crate::palette::{self, PALETTE_LEN};
use crate::particle::{IdAllocator, Particle, TextGroup};
use crate::rng::ParticleRng;

/// Summary of one generation pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenerationReport {
    /// Particles produced across all groups.
    pub particle_count: usize,
    /// Particles produced per group, indexed like the input groups.
    pub group_counts: Vec<usize>,
    /// Groups whose font could not be used.
    pub skipped: Vec<usize>,
}

/// Sample one rasterized group into particles.
///
/// Rows are visited with `row_stride`, columns with `column_stride`, and a
/// pixel spawns a particle only if its alpha is strictly above
/// `alpha_threshold`. The bitmap center maps to the group's offset.
pub fn sample_bitmap(
    bitmap: &AlphaBitmap,
    offset: Vec3,
    text_index: usize,
    base: Hsl,
    sampling: &SamplingConfig,
    rng: &mut ParticleRng,
    ids: &mut IdAllocator,
) -> Vec<Particle> {
    profile_function!();

    let half_width = bitmap.width() as f32 / 2.0;
    let half_height = bitmap.height() as f32 / 2.0;
    let row_stride = sampling.row_stride.max(1);
    let column_stride = sampling.column_stride.max(1);

    let mut particles = Vec::new();
    for y in (0..bitmap.height()).step_by(row_stride) {
        for x in (0..bitmap.width()).step_by(column_stride) {
            let Some(alpha) = bitmap.alpha(x, y) else {
                continue;
            };
            if alpha <= sampling.alpha_threshold {
                continue;
            }

            let depth = rng.up_to(sampling.depth_range);
            let target = Vec3::new(
                (x as f32 - half_width) / sampling.scene_scale + offset.x,
                -(y as f32 - half_height) / sampling.scene_scale + offset.y,
                depth + offset.z,
            );
            let start = rng.in_cube(sampling.scatter_extent);
            let color = palette::shade(base, target.z, sampling);

            particles.push(Particle::new(ids.next_id(), text_index, start, target, color));
        }
    }
    particles
}

/// Generate particles for every group.
///
/// Blank groups contribute nothing. A group whose font fails to load or
/// rasterize is logged and skipped; the other groups still generate.
pub fn generate<R: Rasterize + ?Sized>(
    groups: &[TextGroup],
    max_width: f32,
    rasterizer: &mut R,
    rng: &mut ParticleRng,
    ids: &mut IdAllocator,
    sampling: &SamplingConfig,
) -> (Vec<Particle>, GenerationReport) {
    profile_function!();

    let mut particles = Vec::new();
    let mut report = GenerationReport {
        group_counts: vec![0; groups.len()],
        ..Default::default()
    };

    for (index, group) in groups.iter().enumerate() {
        if group.is_blank() {
            tracing::debug!("Text group {} is blank, no particles", index);
            continue;
        }

        let Some(font_index) = rng.index(rasterizer.fonts().len()) else {
            tracing::error!("No fonts available for text group {}", index);
            report.skipped.push(index);
            continue;
        };

        let bitmap = match rasterizer.rasterize(&group.text, max_width, font_index) {
            Ok(Some(bitmap)) => bitmap,
            Ok(None) => continue,
            Err(err) => {
                tracing::error!("Skipping text group {} ({:?}): {}", index, group.text, err);
                report.skipped.push(index);
                continue;
            }
        };

        let base = palette::base_color(rng.index(PALETTE_LEN).unwrap_or(0));
        let group_particles =
            sample_bitmap(&bitmap, group.offset, index, base, sampling, rng, ids);

        tracing::debug!(
            "Text group {} ({:?}) produced {} particles",
            index,
            group.text,
            group_particles.len()
        );
        report.group_counts[index] = group_particles.len();
        particles.extend(group_particles);
    }

    report.particle_count = particles.len();
    (particles, report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use motes_test_utils::{MockRasterizer, bitmap_from_rows};

    fn sampling() -> SamplingConfig {
        SamplingConfig::default()
    }

    #[test]
    fn test_threshold_and_stride() {
        // Row 1 is skipped by the stride; '.' is exactly at the threshold.
        let bitmap = bitmap_from_rows(&["#.+#", "####", "+..."]);
        let mut rng = ParticleRng::from_seed(3);
        let mut ids = IdAllocator::new();

        let particles = sample_bitmap(
            &bitmap,
            Vec3::ZERO,
            0,
            palette::base_color(0),
            &sampling(),
            &mut rng,
            &mut ids,
        );

        // Row 0: '#', '+', '#'. Row 2: '+'.
        assert_eq!(particles.len(), 4);
    }

    #[test]
    fn test_target_mapping() {
        let mut rows = vec!["................"; 16];
        rows[4] = "..........#.....";
        let bitmap = bitmap_from_rows(&rows);
        let mut rng = ParticleRng::from_seed(9);
        let mut ids = IdAllocator::new();
        let offset = Vec3::new(1.0, -20.0, 5.0);

        let particles = sample_bitmap(
            &bitmap,
            offset,
            2,
            palette::base_color(4),
            &sampling(),
            &mut rng,
            &mut ids,
        );

        assert_eq!(particles.len(), 1);
        let p = &particles[0];
        assert_eq!(p.text_index(), 2);
        assert_eq!(p.progress(), 0.0);
        assert!(!p.is_chaos());

        let target = p.target_position();
        assert_eq!(target.x, (10.0 - 8.0) / 8.0 + 1.0);
        assert_eq!(target.y, -(4.0 - 8.0) / 8.0 - 20.0);
        assert!((5.0..8.0).contains(&target.z));

        let start = p.position;
        for axis in start.to_array() {
            assert!((-50.0..50.0).contains(&axis));
        }
    }

    #[test]
    fn test_color_shared_hue_darkened_by_depth() {
        let bitmap = bitmap_from_rows(&["################"; 8]);
        let mut rng = ParticleRng::from_seed(11);
        let mut ids = IdAllocator::new();
        let base = palette::base_color(1);

        let particles = sample_bitmap(
            &bitmap,
            Vec3::ZERO,
            0,
            base,
            &sampling(),
            &mut rng,
            &mut ids,
        );

        for p in &particles {
            let expected = palette::shade(base, p.target_position().z, &sampling());
            assert_eq!(p.color(), expected);
        }
    }

    #[test]
    fn test_generate_tags_groups_and_skips_blank() {
        let mut rasterizer = MockRasterizer::new();
        let mut rng = ParticleRng::from_seed(5);
        let mut ids = IdAllocator::new();
        let groups = vec![
            TextGroup::new("A", Vec3::ZERO),
            TextGroup::new("   ", Vec3::ZERO),
            TextGroup::new("B", Vec3::new(0.0, -20.0, 0.0)),
        ];

        let (particles, report) = generate(
            &groups,
            300.0,
            &mut rasterizer,
            &mut rng,
            &mut ids,
            &sampling(),
        );

        assert_eq!(report.particle_count, particles.len());
        assert!(report.group_counts[0] > 0);
        assert_eq!(report.group_counts[1], 0);
        assert!(report.group_counts[2] > 0);
        assert!(report.skipped.is_empty());
        assert!(particles.iter().all(|p| p.text_index() != 1));

        // Blank groups never reach the rasterizer.
        assert_eq!(rasterizer.recorder().call_count(), 2);
    }

    #[test]
    fn test_generate_skips_failed_fonts() {
        let mut rasterizer = MockRasterizer::new().fail_all();
        let mut rng = ParticleRng::from_seed(5);
        let mut ids = IdAllocator::new();
        let groups = vec![TextGroup::new("A", Vec3::ZERO), TextGroup::new("B", Vec3::ZERO)];

        let (particles, report) = generate(
            &groups,
            300.0,
            &mut rasterizer,
            &mut rng,
            &mut ids,
            &sampling(),
        );

        assert!(particles.is_empty());
        assert_eq!(report.skipped, vec![0, 1]);
    }
}
