#![cfg(target_arch = "wasm32")]
use app_core::{layout_text, AppState, ControlPanel, SceneConfig, SceneRenderer};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

mod dom;
mod events;
mod font;
mod frame;
mod panel;

const CANVAS_ID: &str = "app-canvas";

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("app-web starting");

    spawn_local(async move {
        if let Err(e) = init().await {
            log::error!("init error: {:?}", e);
        }
    });
    Ok(())
}

async fn init() -> anyhow::Result<()> {
    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| anyhow::anyhow!("no document"))?;

    let canvas: web::HtmlCanvasElement = document
        .get_element_by_id(CANVAS_ID)
        .ok_or_else(|| anyhow::anyhow!("missing #{CANVAS_ID}"))?
        .dyn_into::<web::HtmlCanvasElement>()
        .map_err(|e| anyhow::anyhow!(format!("{:?}", e)))?;
    let (width, height) = dom::sync_canvas_to_viewport(&canvas);

    let config = SceneConfig::default();
    let font_url = config.font_url;
    let app = Rc::new(RefCell::new(AppState::new(config, width, height)));
    let panel = Rc::new(ControlPanel::standard());

    let instance = wgpu::Instance::default();
    let surface = instance.create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))?;
    let renderer = SceneRenderer::new(&instance, surface, width, height).await?;

    events::wire_pointer(&document, app.clone());
    events::wire_keyboard(&window, panel.clone(), app.clone());
    if let Err(e) = panel::mount(&document, panel, app.clone()) {
        log::warn!("[controls] panel unavailable: {e:#}");
    }

    spawn_local(load_text(font_url, app.clone()));

    let ctx = frame::start_loop(window.clone(), app, renderer);
    events::wire_resize(&window, canvas, ctx.clone());
    events::wire_teardown(&window, ctx);
    Ok(())
}

// One attempt; on failure the scene simply has no text.
async fn load_text(url: &'static str, app: Rc<RefCell<AppState>>) {
    let (text, size, depth) = {
        let a = app.borrow();
        (a.config.text, a.config.text_size, a.config.text_depth)
    };
    match font::fetch_metrics(url, text).await {
        Ok(metrics) => {
            let slabs = layout_text(text, &metrics, size, depth);
            log::info!("[font] loaded; {} glyph slabs for {:?}", slabs.len(), text);
            app.borrow_mut().scene.attach_text(slabs);
        }
        Err(e) => log::warn!("[font] {url}: {e:#}; text disabled"),
    }
}
