use app_core::{
    AppState, ControlPanel, FrameLoop, InstantClock, KeyCommand, KeyModifiers, SceneConfig,
    SceneRenderer, Scheduler,
};
use winit::{
    dpi::LogicalSize,
    event::*,
    event_loop::EventLoop,
    keyboard::{Key, ModifiersState, NamedKey},
    window::{Window, WindowBuilder},
};

/// Schedules ticks by asking winit for another redraw.
struct RedrawScheduler<'w> {
    window: &'w Window,
}

impl Scheduler for RedrawScheduler<'_> {
    type Handle = ();

    fn schedule(&mut self) -> Option<()> {
        self.window.request_redraw();
        Some(())
    }

    fn cancel(&mut self, _handle: ()) {}
}

// DOM-style key names so both front ends share one key map.
fn key_name(key: &Key) -> Option<&str> {
    match key {
        Key::Character(s) => Some(s.as_str()),
        Key::Named(NamedKey::ArrowLeft) => Some("ArrowLeft"),
        Key::Named(NamedKey::ArrowRight) => Some("ArrowRight"),
        _ => None,
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let event_loop = EventLoop::new()?;
    let window = WindowBuilder::new()
        .with_title("XR scene (native)")
        .with_inner_size(LogicalSize::new(1280.0, 720.0))
        .build(&event_loop)?;
    let window_ref = &window;
    let size = window.inner_size();

    let mut app = AppState::new(SceneConfig::default(), size.width, size.height);
    let panel = ControlPanel::standard();
    log::info!("[font] remote fonts are not fetched natively; text disabled");

    let instance = wgpu::Instance::default();
    let surface = instance.create_surface(&window)?;
    let mut renderer = pollster::block_on(SceneRenderer::new(
        &instance,
        surface,
        size.width,
        size.height,
    ))?;

    let mut frame_loop = FrameLoop::new(RedrawScheduler { window: window_ref }, InstantClock::start());
    frame_loop.start();
    let mut modifiers = ModifiersState::empty();

    event_loop.run(move |event, elwt| {
        let Event::WindowEvent { event, .. } = event else {
            return;
        };
        match event {
            WindowEvent::CloseRequested => {
                frame_loop.stop();
                elwt.exit();
            }
            WindowEvent::Resized(size) => {
                renderer.resize(size.width, size.height);
                app.resize(size.width, size.height);
            }
            WindowEvent::CursorMoved { position, .. } => {
                let size = window_ref.inner_size();
                app.track_pointer(
                    position.x as f32,
                    position.y as f32,
                    size.width as f32,
                    size.height as f32,
                );
            }
            WindowEvent::ModifiersChanged(m) => modifiers = m.state(),
            WindowEvent::KeyboardInput { event, .. } if event.state == ElementState::Pressed => {
                let held = KeyModifiers {
                    ctrl: modifiers.control_key(),
                    alt: modifiers.alt_key(),
                    meta: modifiers.super_key(),
                };
                let Some(command) = key_name(&event.logical_key)
                    .and_then(|key| KeyCommand::from_shortcut(key, held))
                else {
                    return;
                };
                // holding a toggle key would flicker it
                if event.repeat && !matches!(command, KeyCommand::Nudge(..)) {
                    return;
                }
                match panel.apply_key(&mut app, command) {
                    Ok(v) => log::info!("[keys] {:?} -> {:?}", command, v),
                    Err(e) => log::warn!("[keys] {e}"),
                }
            }
            WindowEvent::RedrawRequested => {
                frame_loop.tick(&mut app, &mut renderer);
                if renderer.is_out_of_memory() {
                    log::error!("[gpu] out of memory; exiting");
                    frame_loop.stop();
                    elwt.exit();
                }
            }
            _ => {}
        }
    })?;
    Ok(())
}
