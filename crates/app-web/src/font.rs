use crate::dom::js_err;
use app_core::{FontError, FontMetrics};
use js_sys::Reflect;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys as web;

/// Fetch a typeface JSON file and extract advances for the glyphs in `text`.
pub async fn fetch_metrics(url: &str, text: &str) -> anyhow::Result<FontMetrics> {
    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let resp: web::Response = JsFuture::from(window.fetch_with_str(url))
        .await
        .map_err(js_err)?
        .dyn_into()
        .map_err(js_err)?;
    if !resp.ok() {
        anyhow::bail!("GET {url} returned HTTP {}", resp.status());
    }
    let json = JsFuture::from(resp.json().map_err(js_err)?)
        .await
        .map_err(js_err)?;
    Ok(metrics_from_typeface(&json, text)?)
}

fn metrics_from_typeface(json: &JsValue, text: &str) -> Result<FontMetrics, FontError> {
    let resolution = Reflect::get(json, &JsValue::from_str("resolution"))
        .ok()
        .and_then(|v| v.as_f64())
        .unwrap_or(f64::NAN);
    let mut metrics = FontMetrics::new(resolution)?;

    let glyphs = Reflect::get(json, &JsValue::from_str("glyphs"))
        .ok()
        .filter(|v| v.is_object())
        .ok_or(FontError::MissingGlyphTable)?;
    for ch in text.chars() {
        if metrics.advance(ch).is_some() {
            continue;
        }
        let advance = Reflect::get(&glyphs, &JsValue::from_str(&ch.to_string()))
            .ok()
            .filter(|g| g.is_object())
            .and_then(|g| Reflect::get(&g, &JsValue::from_str("ha")).ok())
            .and_then(|ha| ha.as_f64());
        if let Some(ha) = advance {
            metrics.insert_advance(ch, ha as f32);
        }
    }
    if metrics.glyph_count() == 0 && !text.is_empty() {
        return Err(FontError::NoUsableGlyphs(text.to_string()));
    }
    Ok(metrics)
}
