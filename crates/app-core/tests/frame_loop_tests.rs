// Host-side tests for the frame loop state machine and tick pipeline.

use app_core::*;

#[derive(Default)]
struct RecordingSink {
    frames: Vec<(f32, f32)>,
    colors: Vec<u32>,
    fail: bool,
}

impl RenderSink for RecordingSink {
    fn render(&mut self, scene: &SceneState, camera: &CameraRig) -> anyhow::Result<()> {
        self.frames
            .push((scene.sphere.transform.position.y, camera.eye.x));
        self.colors.push(scene.sphere.material.color);
        if self.fail {
            anyhow::bail!("surface lost");
        }
        Ok(())
    }
}

fn setup() -> (FrameLoop<ManualScheduler, ManualClock>, ManualClock, AppState) {
    let clock = ManualClock::new();
    let frame_loop = FrameLoop::new(ManualScheduler::default(), clock.clone());
    let app = AppState::new(SceneConfig::default(), 1000, 1000);
    (frame_loop, clock, app)
}

#[test]
fn idle_loop_does_not_tick() {
    let (mut fl, _clock, mut app) = setup();
    let mut sink = RecordingSink::default();
    assert_eq!(fl.state(), LoopState::Idle);
    assert_eq!(fl.tick(&mut app, &mut sink), None);
    assert!(sink.frames.is_empty());
    assert!(fl.scheduler().scheduled.is_empty());
}

#[test]
fn start_schedules_first_frame_once() {
    let (mut fl, _clock, _app) = setup();
    fl.start();
    assert_eq!(fl.state(), LoopState::Running);
    assert_eq!(fl.pending(), Some(1));
    fl.start();
    assert_eq!(fl.scheduler().scheduled, vec![1]);
}

#[test]
fn each_tick_reschedules_and_renders_once() {
    let (mut fl, clock, mut app) = setup();
    let mut sink = RecordingSink::default();
    fl.start();
    for i in 1..=5 {
        clock.advance(1.0 / 60.0);
        assert!(fl.tick(&mut app, &mut sink).is_some());
        assert_eq!(fl.pending(), Some(i + 1));
    }
    assert_eq!(fl.ticks(), 5);
    assert_eq!(sink.frames.len(), 5);
    assert_eq!(fl.scheduler().scheduled.len(), 6);
}

#[test]
fn render_sees_updated_scene_and_camera() {
    let (mut fl, clock, mut app) = setup();
    let mut sink = RecordingSink::default();
    app.track_pointer(0.0, 0.0, 1000.0, 1000.0);
    fl.start();
    clock.set(1.0);
    let t = fl.tick(&mut app, &mut sink).unwrap();
    assert_eq!(t, 1.0);
    let (sphere_y, eye_x) = sink.frames[0];
    assert!((sphere_y - 0.2 * 1.0_f32.sin()).abs() < 1e-6);
    assert!((eye_x - (-0.1)).abs() < 1e-6);
}

#[test]
fn failed_render_keeps_loop_running() {
    let (mut fl, clock, mut app) = setup();
    let mut sink = RecordingSink {
        fail: true,
        ..Default::default()
    };
    fl.start();
    for _ in 0..3 {
        clock.advance(0.5);
        assert!(fl.tick(&mut app, &mut sink).is_some());
    }
    assert_eq!(fl.state(), LoopState::Running);
    assert_eq!(fl.ticks(), 3);
}

#[test]
fn stop_cancels_pending_frame_and_blocks_ticks() {
    let (mut fl, clock, mut app) = setup();
    let mut sink = RecordingSink::default();
    fl.start();
    clock.advance(0.1);
    fl.tick(&mut app, &mut sink);
    fl.stop();
    assert_eq!(fl.state(), LoopState::Stopped);
    assert_eq!(fl.scheduler().cancelled, vec![2]);
    assert_eq!(fl.pending(), None);

    let before = app.scene.sphere.transform.position;
    clock.advance(1.0);
    assert_eq!(fl.tick(&mut app, &mut sink), None);
    assert_eq!(app.scene.sphere.transform.position, before);
    assert_eq!(sink.frames.len(), 1);
}

#[test]
fn stopped_loop_cannot_restart_and_stop_is_idempotent() {
    let (mut fl, _clock, _app) = setup();
    fl.start();
    fl.stop();
    fl.stop();
    fl.start();
    assert_eq!(fl.state(), LoopState::Stopped);
    assert_eq!(fl.scheduler().cancelled, vec![1]);
    assert_eq!(fl.scheduler().scheduled, vec![1]);
}

#[test]
fn stop_from_idle_has_nothing_to_cancel() {
    let (mut fl, _clock, _app) = setup();
    fl.stop();
    assert_eq!(fl.state(), LoopState::Stopped);
    assert!(fl.scheduler().cancelled.is_empty());
}

#[test]
fn time_never_runs_backwards() {
    let (mut fl, clock, mut app) = setup();
    let mut sink = RecordingSink::default();
    fl.start();
    let mut last = 0.0;
    for raw in [0.5, 1.0, 0.7, f64::NAN, 2.0, 1.5] {
        clock.set(raw);
        let t = fl.tick(&mut app, &mut sink).unwrap();
        assert!(t >= last, "t={t} last={last}");
        last = t;
    }
    assert_eq!(last, 2.0);
}

#[test]
fn clock_wrapper_starts_at_zero() {
    let source = ManualClock::new();
    let mut clock = Clock::new(source.clone());
    assert_eq!(clock.last(), 0.0);
    source.set(-3.0);
    assert_eq!(clock.sample(), 0.0);
    source.set(0.25);
    assert_eq!(clock.sample(), 0.25);
}

#[test]
fn panel_edit_is_rendered_on_the_next_tick() {
    let (mut fl, clock, mut app) = setup();
    let panel = ControlPanel::standard();
    let mut sink = RecordingSink::default();
    fl.start();
    clock.advance(0.1);
    fl.tick(&mut app, &mut sink);
    assert_eq!(sink.colors, vec![SPHERE_COLOR_HEX]);

    panel
        .apply(&mut app, "color", ControlValue::Color(0xff5a36))
        .unwrap();
    clock.advance(0.1);
    fl.tick(&mut app, &mut sink);
    assert_eq!(sink.colors.last(), Some(&0xff5a36));
}

#[test]
fn cached_page_keeps_the_loop_running() {
    let (mut fl, clock, mut app) = setup();
    let mut sink = RecordingSink::default();
    fl.start();
    fl.page_hidden(true);
    assert_eq!(fl.state(), LoopState::Running);
    assert!(fl.scheduler().cancelled.is_empty());

    // restored from the back/forward cache
    clock.advance(0.5);
    assert!(fl.tick(&mut app, &mut sink).is_some());
    assert_eq!(sink.frames.len(), 1);
}

#[test]
fn unloading_page_stops_the_loop() {
    let (mut fl, _clock, mut app) = setup();
    let mut sink = RecordingSink::default();
    fl.start();
    fl.page_hidden(false);
    assert_eq!(fl.state(), LoopState::Stopped);
    assert_eq!(fl.scheduler().cancelled, vec![1]);
    assert_eq!(fl.tick(&mut app, &mut sink), None);
}

#[test]
fn clock_keeps_sub_frame_resolution_after_long_uptime() {
    let source = ManualClock::new();
    let mut clock = Clock::new(source.clone());
    source.set(86_400.0 * 7.0);
    let a = clock.sample();
    source.advance(1.0 / 60.0);
    let b = clock.sample();
    assert!(((b - a) - 1.0 / 60.0).abs() < 1e-9);
}
