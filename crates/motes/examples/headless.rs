//! Runs the full label flow without a window and prints what a renderer
//! would receive.
//!
//! Usage: `cargo run -p motes --example headless -- [fonts-dir] [word]`
//!
//! The fonts directory must hold `Sniglet/Sniglet-Regular.ttf` and
//! `Chewy/Chewy-Regular.ttf`; groups whose font is missing are skipped.

use std::time::Duration;

use motes::core::logging;
use motes::core::profiling::{self, ProfilingBackend};
use motes::prelude::*;
use motes_text::{FontSet, FontSystem, TextRasterizer};

const FRAME: Duration = Duration::from_millis(16);

/// Stand-in for the remote word service: glues the words together.
struct Portmanteau;

impl WordCombiner for Portmanteau {
    type Error = String;

    fn combine(&mut self, first: &str, second: &str) -> Result<String, String> {
        let head: String = first.chars().take(first.chars().count().div_ceil(2)).collect();
        let tail: String = second.chars().skip(second.chars().count() / 2).collect();
        if head.is_empty() && tail.is_empty() {
            return Err("nothing to combine".to_string());
        }
        Ok(format!("{}{}", head, tail))
    }
}

fn settle<R: Rasterize>(controller: &mut Controller<R>, time: &mut Time) {
    while matches!(
        controller.state(),
        ControllerState::Forming | ControllerState::ChaosReform
    ) {
        profiling::new_frame();
        time.advance(FRAME);
        controller.tick(time);
    }
}

fn main() {
    logging::init();
    profiling::init_profiling(ProfilingBackend::InProcess);

    let mut args = std::env::args().skip(1);
    let fonts_dir = args.next().unwrap_or_else(|| "fonts".to_string());
    let word = args.next().unwrap_or_else(|| "Boomer".to_string());

    let config = Config::default();
    let rasterizer = TextRasterizer::new(
        FontSystem::new(Default::default()),
        FontSet::reference(&fonts_dir),
        config.raster,
    );
    let mut controller = Controller::new(rasterizer, ParticleRng::from_os_rng(), config);
    controller.set_on_chaos_complete(|| tracing::info!("Chaos sequence finished"));

    let mut session = LabelSession::default();
    let mut time = Time::new();
    let width = 1280.0;

    let report = match controller.regenerate(session.layout(), width) {
        Ok(report) => report,
        Err(err) => {
            tracing::error!("Generation failed: {}", err);
            return;
        }
    };
    println!("{:?}: {} particles", session.current(), report.particle_count);
    settle(&mut controller, &mut time);

    let staged = session.stage(word);
    let report = match controller.regenerate(staged, width) {
        Ok(report) => report,
        Err(err) => {
            tracing::error!("Generation failed: {}", err);
            return;
        }
    };
    println!("staged pair: {:?}", report.group_counts);
    settle(&mut controller, &mut time);

    let completion = match controller.trigger_chaos() {
        Ok(completion) => completion,
        Err(err) => {
            tracing::error!("Chaos rejected: {}", err);
            return;
        }
    };
    while !completion.is_finished() {
        profiling::new_frame();
        time.advance(FRAME);
        controller.tick(&time);
    }
    println!(
        "chaos {:?} after {:.2}s, {} particles kept",
        completion.outcome(),
        time.elapsed_seconds(),
        controller.particles().len()
    );
    settle(&mut controller, &mut time);

    let combined = session.combine_with(&mut Portmanteau);
    match controller.regenerate(combined, width) {
        Ok(report) => println!("{:?}: {} particles", session.current(), report.particle_count),
        Err(err) => tracing::error!("Generation failed: {}", err),
    }
    settle(&mut controller, &mut time);

    let background = LabelSession::background(&mut ParticleRng::from_os_rng()).to_color();
    let instances = controller.instances();
    let bytes: &[u8] = bytemuck::cast_slice(&instances);
    println!(
        "frame {}: {} instances ({} bytes), background {:?}",
        time.frame_count(),
        instances.len(),
        bytes.len(),
        background
    );
}
