//! DOM rendition of the control table: one fieldset per folder, one input per control.

use crate::dom::{create_element, js_err};
use app_core::{
    format_hex_color, parse_hex_color, AppState, Binding, ControlPanel, ControlSpec, ControlValue,
};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

const PANEL_STYLE: &str = "position:fixed;top:8px;right:8px;padding:6px 10px;\
background:rgba(20,10,30,0.85);color:#eee;font:12px sans-serif;border-radius:4px;";
const ROW_STYLE: &str = "display:flex;justify-content:space-between;gap:8px;margin:3px 0;";

pub fn mount(
    document: &web::Document,
    panel: Rc<ControlPanel>,
    app: Rc<RefCell<AppState>>,
) -> anyhow::Result<()> {
    let body = document
        .body()
        .ok_or_else(|| anyhow::anyhow!("no body on document"))?;
    let root: web::HtmlElement = create_element(document, "div")?;
    root.set_id("controls");
    root.set_attribute("style", PANEL_STYLE).map_err(js_err)?;

    for folder in panel.folders() {
        let set: web::HtmlElement = create_element(document, "fieldset")?;
        let legend: web::HtmlElement = create_element(document, "legend")?;
        legend.set_text_content(Some(folder));
        set.append_child(&legend).map_err(js_err)?;
        for spec in panel.specs().iter().filter(|s| s.folder == folder) {
            let row = control_row(document, spec, &panel, &app)?;
            set.append_child(&row).map_err(js_err)?;
        }
        root.append_child(&set).map_err(js_err)?;
    }
    body.append_child(&root).map_err(js_err)?;
    log::info!("[controls] panel mounted ({} controls)", panel.specs().len());
    Ok(())
}

fn control_row(
    document: &web::Document,
    spec: &ControlSpec,
    panel: &Rc<ControlPanel>,
    app: &Rc<RefCell<AppState>>,
) -> anyhow::Result<web::HtmlElement> {
    let row: web::HtmlElement = create_element(document, "label")?;
    row.set_attribute("style", ROW_STYLE).map_err(js_err)?;
    let caption: web::HtmlElement = create_element(document, "span")?;
    caption.set_text_content(Some(spec.label));
    row.append_child(&caption).map_err(js_err)?;

    let input: web::HtmlInputElement = create_element(document, "input")?;
    let initial = spec.value(&app.borrow());
    let event = match (spec.binding, initial) {
        (Binding::Color { .. }, ControlValue::Color(c)) => {
            input.set_type("color");
            input.set_value(&format_hex_color(c));
            "input"
        }
        (Binding::Slider { min, max, step, .. }, ControlValue::Number(v)) => {
            input.set_type("range");
            input.set_min(&min.to_string());
            input.set_max(&max.to_string());
            input.set_step(&step.map(|s| s.to_string()).unwrap_or_else(|| "any".into()));
            input.set_value(&v.to_string());
            "input"
        }
        (Binding::Toggle { .. }, ControlValue::Bool(b)) => {
            input.set_type("checkbox");
            input.set_checked(b);
            "change"
        }
        _ => anyhow::bail!("control `{}` reported a value of the wrong kind", spec.name),
    };

    let name = spec.name;
    let binding = spec.binding;
    let panel = panel.clone();
    let app = app.clone();
    let reader = input.clone();
    let closure = Closure::wrap(Box::new(move |_ev: web::Event| {
        let Some(value) = read_input(&reader, binding) else {
            log::warn!("[controls] could not read `{}` = {:?}", name, reader.value());
            return;
        };
        if let Err(e) = panel.apply(&mut app.borrow_mut(), name, value) {
            log::warn!("[controls] {e}");
        }
    }) as Box<dyn FnMut(_)>);
    input
        .add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())
        .map_err(js_err)?;
    closure.forget();

    row.append_child(&input).map_err(js_err)?;
    Ok(row)
}

fn read_input(input: &web::HtmlInputElement, binding: Binding) -> Option<ControlValue> {
    match binding {
        Binding::Color { .. } => parse_hex_color(&input.value()).map(ControlValue::Color),
        Binding::Slider { .. } => input.value().parse::<f32>().ok().map(ControlValue::Number),
        Binding::Toggle { .. } => Some(ControlValue::Bool(input.checked())),
    }
}
