//! End-to-end controller scenarios driven by the mock rasterizer.

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use futures_lite::future;
use motes::prelude::*;
use motes::{GenerationReport, ParticleStore};
use motes_test_utils::MockRasterizer;

const FRAME: Duration = Duration::from_millis(100);

fn config(jitter: bool) -> Config {
    let mut config = Config::default();
    if !jitter {
        config.motion = config.motion.without_jitter();
    }
    config
}

fn controller_with(seed: u64, jitter: bool) -> Controller<MockRasterizer> {
    Controller::new(MockRasterizer::new(), ParticleRng::from_seed(seed), config(jitter))
}

fn ab_groups() -> Vec<TextGroup> {
    vec![
        TextGroup::new("A", Vec3::ZERO),
        TextGroup::new("B", Vec3::new(0.0, -20.0, 0.0)),
    ]
}

fn run_frames(controller: &mut Controller<MockRasterizer>, time: &mut Time, frames: u32) {
    for _ in 0..frames {
        time.advance(FRAME);
        controller.tick(time);
    }
}

fn targets(store: &ParticleStore) -> HashMap<ParticleId, Vec3> {
    store
        .iter()
        .map(|p| (p.id(), p.target_position()))
        .collect()
}

fn assert_progress_in_range(store: &ParticleStore) {
    for p in store {
        assert!(
            (0.0..=1.0).contains(&p.progress()),
            "progress {} out of range",
            p.progress()
        );
    }
}

#[test]
fn generation_tags_both_groups() {
    let mut controller = controller_with(10, false);
    let recorder = controller.rasterizer().recorder();

    let report = controller.regenerate(ab_groups(), 1000.0).unwrap();

    assert!(report.group_counts[0] > 0);
    assert!(report.group_counts[1] > 0);
    assert_eq!(report.particle_count, controller.particles().len());
    assert_eq!(controller.particles().count_group(0), report.group_counts[0]);
    assert_eq!(controller.particles().count_group(1), report.group_counts[1]);
    assert!(recorder.calls().iter().all(|call| call.max_width == 300.0));
    assert_eq!(controller.instances().len(), report.particle_count);
}

#[test]
fn chaos_keeps_last_group_shifted_by_offset_difference() {
    let mut controller = controller_with(11, false);
    let completions = Arc::new(AtomicUsize::new(0));
    let counter = completions.clone();
    controller.set_on_chaos_complete(move || {
        counter.fetch_add(1, Ordering::SeqCst);
    });

    let report = controller.regenerate(ab_groups(), 1000.0).unwrap();
    let before = targets(controller.particles());

    let mut time = Time::new();
    run_frames(&mut controller, &mut time, 10);
    assert_eq!(controller.state(), ControllerState::Settled);

    let mut completion = controller.trigger_chaos().unwrap();
    assert_eq!(controller.state(), ControllerState::ChaosScatter);
    for p in controller.particles() {
        let chaos = p.chaos_target().expect("every particle scatters");
        assert!(chaos.abs().max_element() <= 100.0);
        assert_eq!(p.progress(), 0.0);
    }

    // 2.9 s after the trigger: still scattering.
    run_frames(&mut controller, &mut time, 29);
    assert_eq!(controller.state(), ControllerState::ChaosScatter);
    assert_eq!(future::block_on(future::poll_once(&mut completion)), None);
    assert_eq!(controller.particles().len(), report.particle_count);

    // 3.0 s: reform installed.
    run_frames(&mut controller, &mut time, 1);
    assert_eq!(controller.state(), ControllerState::ChaosReform);
    assert_eq!(completion.outcome(), Some(ChaosOutcome::Completed));
    assert_eq!(completions.load(Ordering::SeqCst), 1);

    let store = controller.particles();
    assert_eq!(store.len(), report.group_counts[1]);
    for p in store {
        assert_eq!(p.text_index(), 1);
        assert!(!p.is_chaos());
        assert_eq!(p.target_position(), before[&p.id()] + Vec3::new(0.0, 20.0, 0.0));
    }

    run_frames(&mut controller, &mut time, 10);
    assert_eq!(controller.state(), ControllerState::Settled);
    for p in controller.particles() {
        assert_eq!(p.position(), p.target_position());
    }
    assert_eq!(future::block_on(completion), ChaosOutcome::Completed);
}

#[test]
fn reform_follows_wall_time_at_low_frame_rate() {
    let mut controller = controller_with(24, false);
    controller.regenerate(ab_groups(), 1000.0).unwrap();
    let completion = controller.trigger_chaos().unwrap();

    // 4 fps: every frame is capped to 100 ms of animation time.
    let mut time = Time::new();
    for _ in 0..11 {
        time.advance(Duration::from_millis(250));
        controller.tick(&time);
    }
    assert_eq!(controller.state(), ControllerState::ChaosScatter);
    assert_eq!(completion.outcome(), None);

    time.advance(Duration::from_millis(250));
    controller.tick(&time);
    assert!(time.elapsed() < Duration::from_secs(3));
    assert_eq!(controller.state(), ControllerState::ChaosReform);
    assert_eq!(completion.outcome(), Some(ChaosOutcome::Completed));
}

#[test]
fn reform_fires_while_time_is_paused() {
    let mut controller = controller_with(25, false);
    controller.regenerate(ab_groups(), 1000.0).unwrap();
    let completion = controller.trigger_chaos().unwrap();

    let mut time = Time::new();
    time.pause();
    run_frames(&mut controller, &mut time, 30);

    assert_eq!(time.elapsed(), Duration::ZERO);
    assert_eq!(future::block_on(completion), ChaosOutcome::Completed);
    assert!(controller.particles().iter().all(|p| p.text_index() == 1));
}

#[test]
fn repeated_chaos_does_not_accumulate_shift() {
    let mut controller = controller_with(12, false);
    controller.regenerate(ab_groups(), 1000.0).unwrap();
    let before = targets(controller.particles());
    let mut time = Time::new();

    for _ in 0..2 {
        let completion = controller.trigger_chaos().unwrap();
        run_frames(&mut controller, &mut time, 30);
        assert_eq!(completion.outcome(), Some(ChaosOutcome::Completed));
    }

    for p in controller.particles() {
        assert_eq!(p.target_position(), before[&p.id()] + Vec3::new(0.0, 20.0, 0.0));
    }
}

#[test]
fn regenerate_cancels_pending_reform() {
    let mut controller = controller_with(13, false);
    let completions = Arc::new(AtomicUsize::new(0));
    let counter = completions.clone();
    controller.set_on_chaos_complete(move || {
        counter.fetch_add(1, Ordering::SeqCst);
    });

    controller.regenerate(ab_groups(), 1000.0).unwrap();
    let mut time = Time::new();
    run_frames(&mut controller, &mut time, 5);

    let completion = controller.trigger_chaos().unwrap();
    run_frames(&mut controller, &mut time, 10);

    let report = controller
        .regenerate(vec![TextGroup::new("C", Vec3::ZERO)], 1000.0)
        .unwrap();
    assert_eq!(future::block_on(completion), ChaosOutcome::Cancelled);
    assert_eq!(controller.state(), ControllerState::Forming);
    assert_eq!(controller.reform_deadline(), None);

    // Well past the old deadline nothing is filtered or shifted.
    run_frames(&mut controller, &mut time, 40);
    assert_eq!(controller.particles().len(), report.particle_count);
    assert_eq!(controller.state(), ControllerState::Settled);
    assert_eq!(completions.load(Ordering::SeqCst), 0);
}

#[test]
fn dropping_controller_cancels_pending_reform() {
    let mut controller = controller_with(14, false);
    controller.regenerate(ab_groups(), 1000.0).unwrap();
    let completion = controller.trigger_chaos().unwrap();

    drop(controller);
    assert_eq!(future::block_on(completion), ChaosOutcome::Cancelled);
}

#[test]
fn empty_text_yields_no_particles() {
    let mut controller = controller_with(15, false);
    let report = controller
        .regenerate(vec![TextGroup::new("", Vec3::ZERO)], 1000.0)
        .unwrap();

    assert_eq!(report, GenerationReport {
        particle_count: 0,
        group_counts: vec![0],
        skipped: Vec::new(),
    });
    assert!(controller.particles().is_empty());

    let mut time = Time::new();
    run_frames(&mut controller, &mut time, 1);
    assert_eq!(controller.state(), ControllerState::Settled);
}

#[test]
fn single_group_reform_uses_zero_for_missing_offset() {
    let mut controller = controller_with(16, false);
    let offset = Vec3::new(5.0, 0.0, 0.0);
    controller
        .regenerate(vec![TextGroup::new("X", offset)], 1000.0)
        .unwrap();
    let before = targets(controller.particles());
    let count = controller.particles().len();

    let mut time = Time::new();
    let completion = controller.trigger_chaos().unwrap();
    run_frames(&mut controller, &mut time, 30);

    assert_eq!(completion.outcome(), Some(ChaosOutcome::Completed));
    assert_eq!(controller.particles().len(), count);
    for p in controller.particles() {
        assert_eq!(p.target_position(), before[&p.id()] + offset);
    }
}

#[test]
fn more_than_two_groups_keeps_only_the_last() {
    let mut controller = controller_with(17, false);
    let groups = vec![
        TextGroup::new("A", Vec3::new(1.0, 2.0, 0.0)),
        TextGroup::new("B", Vec3::new(0.0, -20.0, 0.0)),
        TextGroup::new("C", Vec3::new(0.0, 40.0, 0.0)),
    ];
    let report = controller.regenerate(groups, 1000.0).unwrap();
    let before = targets(controller.particles());

    let mut time = Time::new();
    let _completion = controller.trigger_chaos().unwrap();
    run_frames(&mut controller, &mut time, 30);

    assert_eq!(controller.particles().len(), report.group_counts[2]);
    for p in controller.particles() {
        assert_eq!(p.text_index(), 2);
        assert_eq!(p.target_position(), before[&p.id()] + Vec3::new(1.0, 22.0, 0.0));
    }
}

#[test]
fn chaos_with_no_groups_completes_empty() {
    let mut controller = controller_with(18, false);
    controller.regenerate(Vec::new(), 1000.0).unwrap();

    let mut time = Time::new();
    let completion = controller.trigger_chaos().unwrap();
    run_frames(&mut controller, &mut time, 30);

    assert_eq!(future::block_on(completion), ChaosOutcome::Completed);
    assert!(controller.particles().is_empty());
    assert_eq!(controller.state(), ControllerState::Settled);
}

#[test]
fn progress_stays_in_range_through_every_phase() {
    let mut controller = controller_with(19, true);
    controller.regenerate(ab_groups(), 1000.0).unwrap();
    let mut time = Time::new();

    for frame in 0..80 {
        if frame == 15 {
            let _ = controller.trigger_chaos().unwrap();
        }
        time.advance(FRAME);
        controller.tick(&time);
        assert_progress_in_range(controller.particles());
    }
}

#[test]
fn positions_reach_targets_after_ten_frames() {
    let mut controller = controller_with(20, false);
    controller.regenerate(ab_groups(), 1000.0).unwrap();
    let mut time = Time::new();

    run_frames(&mut controller, &mut time, 9);
    assert!(controller.particles().iter().all(|p| p.progress() < 1.0));

    run_frames(&mut controller, &mut time, 1);
    for p in controller.particles() {
        assert_eq!(p.progress(), 1.0);
        assert_eq!(p.position(), p.target_position());
    }
}

#[test]
fn pinned_seed_reproduces_geometry() {
    let mut first = controller_with(21, false);
    let mut second = controller_with(21, false);

    first.regenerate(ab_groups(), 1000.0).unwrap();
    second.regenerate(ab_groups(), 1000.0).unwrap();

    assert_eq!(first.particles().len(), second.particles().len());
    for (a, b) in first.particles().iter().zip(second.particles()) {
        assert_eq!(a.target_position(), b.target_position());
        assert_eq!(a.position(), b.position());
        assert_eq!(a.color(), b.color());
    }
    assert_eq!(first.instances(), second.instances());
}

#[test]
fn failed_font_skips_only_that_group() {
    let rasterizer = MockRasterizer::new().fail_family("MockSerif");
    let recorder = rasterizer.recorder();
    let mut controller = Controller::new(rasterizer, ParticleRng::from_seed(22), config(false));

    let groups: Vec<TextGroup> = (0..8)
        .map(|i| TextGroup::new(format!("W{}", i), Vec3::ZERO))
        .collect();
    let report = controller.regenerate(groups, 1000.0).unwrap();

    let calls = recorder.calls();
    assert_eq!(calls.len(), 8);
    for (index, call) in calls.iter().enumerate() {
        let skipped = report.skipped.contains(&index);
        assert_eq!(skipped, call.font_index == 1);
        assert_eq!(report.group_counts[index] == 0, skipped);
    }
}

#[test]
fn label_session_flow() {
    struct Joiner;

    impl WordCombiner for Joiner {
        type Error = String;

        fn combine(&mut self, first: &str, second: &str) -> Result<String, String> {
            Ok(format!("{}-{}", first, second))
        }
    }

    let mut controller = controller_with(23, false);
    let mut session = LabelSession::default();
    let mut time = Time::new();

    controller.regenerate(session.layout(), 1000.0).unwrap();
    run_frames(&mut controller, &mut time, 10);

    let staged = session.stage("Pop");
    let report = controller.regenerate(staged, 1000.0).unwrap();
    run_frames(&mut controller, &mut time, 10);

    let completion = controller.trigger_chaos().unwrap();
    run_frames(&mut controller, &mut time, 30);
    assert_eq!(future::block_on(completion), ChaosOutcome::Completed);
    assert_eq!(controller.particles().len(), report.group_counts[1]);

    let combined = session.combine_with(&mut Joiner);
    assert_eq!(session.current(), "Gen-Z-Pop");
    controller.regenerate(combined, 1000.0).unwrap();
    assert_eq!(controller.groups().len(), 1);
    assert_eq!(controller.state(), ControllerState::Forming);
}
