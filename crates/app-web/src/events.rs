use crate::dom;
use crate::frame::WebLoop;
use app_core::{AppState, ControlPanel, KeyCommand, KeyModifiers};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

fn listen<E: wasm_bindgen::convert::FromWasmAbi + 'static>(
    target: &web::EventTarget,
    event: &str,
    handler: impl FnMut(E) + 'static,
) {
    let closure = Closure::wrap(Box::new(handler) as Box<dyn FnMut(E)>);
    if let Err(e) = target.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())
    {
        log::error!("[events] could not listen for {event}: {:?}", e);
    }
    closure.forget();
}

// Pointer position is cached; the next tick consumes it.
pub fn wire_pointer(document: &web::Document, app: Rc<RefCell<AppState>>) {
    listen(document, "mousemove", move |ev: web::MouseEvent| {
        let Some(window) = web::window() else {
            return;
        };
        let (w, h) = dom::viewport_size(&window);
        app.borrow_mut()
            .track_pointer(ev.client_x() as f32, ev.client_y() as f32, w, h);
    });
}

pub fn wire_resize(window: &web::Window, canvas: web::HtmlCanvasElement, ctx: Rc<RefCell<WebLoop>>) {
    listen(window, "resize", move |_ev: web::Event| {
        let (w, h) = dom::sync_canvas_to_viewport(&canvas);
        ctx.borrow_mut().resize(w, h);
    });
}

pub fn wire_keyboard(window: &web::Window, panel: Rc<ControlPanel>, app: Rc<RefCell<AppState>>) {
    listen(window, "keydown", move |ev: web::KeyboardEvent| {
        // leave keys alone while a panel input has focus
        let in_input = ev
            .target()
            .map(|t| t.dyn_ref::<web::HtmlInputElement>().is_some())
            .unwrap_or(false);
        if in_input {
            return;
        }
        let modifiers = KeyModifiers {
            ctrl: ev.ctrl_key(),
            alt: ev.alt_key(),
            meta: ev.meta_key(),
        };
        let Some(command) = KeyCommand::from_shortcut(&ev.key(), modifiers) else {
            return;
        };
        match panel.apply_key(&mut app.borrow_mut(), command) {
            Ok(v) => log::info!("[keys] {:?} -> {:?}", command, v),
            Err(e) => log::warn!("[keys] {e}"),
        }
        ev.prevent_default();
    });
}

pub fn wire_teardown(window: &web::Window, ctx: Rc<RefCell<WebLoop>>) {
    listen(window, "pagehide", move |ev: web::PageTransitionEvent| {
        ctx.borrow_mut().page_hidden(ev.persisted());
    });
}
