use app_core::{AppState, FrameLoop, InstantClock, SceneRenderer, Scheduler};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

type TickSlot = Rc<RefCell<Option<Closure<dyn FnMut()>>>>;

/// Schedules ticks with `requestAnimationFrame`.
pub struct RafScheduler {
    window: web::Window,
    tick: TickSlot,
}

impl Scheduler for RafScheduler {
    type Handle = i32;

    fn schedule(&mut self) -> Option<i32> {
        let slot = self.tick.borrow();
        let cb = slot.as_ref()?;
        match self.window.request_animation_frame(cb.as_ref().unchecked_ref()) {
            Ok(id) => Some(id),
            Err(e) => {
                log::error!("[loop] requestAnimationFrame failed: {:?}", e);
                None
            }
        }
    }

    fn cancel(&mut self, handle: i32) {
        _ = self.window.cancel_animation_frame(handle);
    }
}

pub struct WebLoop {
    pub app: Rc<RefCell<AppState>>,
    pub frame_loop: FrameLoop<RafScheduler, InstantClock>,
    pub renderer: SceneRenderer<'static>,
}

impl WebLoop {
    fn frame(&mut self) {
        let mut app = self.app.borrow_mut();
        self.frame_loop.tick(&mut app, &mut self.renderer);
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        self.renderer.resize(width, height);
        self.app.borrow_mut().resize(width, height);
    }

    pub fn page_hidden(&mut self, persisted: bool) {
        self.frame_loop.page_hidden(persisted);
    }
}

/// Build the loop around a rAF callback and request the first frame.
pub fn start_loop(
    window: web::Window,
    app: Rc<RefCell<AppState>>,
    renderer: SceneRenderer<'static>,
) -> Rc<RefCell<WebLoop>> {
    let tick: TickSlot = Rc::new(RefCell::new(None));
    let scheduler = RafScheduler {
        window,
        tick: tick.clone(),
    };
    let ctx = Rc::new(RefCell::new(WebLoop {
        app,
        frame_loop: FrameLoop::new(scheduler, InstantClock::start()),
        renderer,
    }));
    let ctx_tick = ctx.clone();
    *tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        ctx_tick.borrow_mut().frame();
    }) as Box<dyn FnMut()>));
    ctx.borrow_mut().frame_loop.start();
    ctx
}
