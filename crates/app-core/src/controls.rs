//! Control-surface bindings.
//!
//! Each control is one row in a table: a name, the folder it is shown in, the
//! value range, and a getter/setter pair on [`AppState`]. Front ends render
//! the table however they like and push edits through [`ControlPanel::apply`].
//! Data flows one way, control to scene.

use crate::app::AppState;
use crate::constants::{
    CONE_X_KEY_STEP, CONE_X_RANGE, CONE_X_STEP, METALNESS_KEY_STEP, METALNESS_RANGE,
    SPHERE_PALETTE,
};
use fnv::FnvHashMap;
use thiserror::Error;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ControlValue {
    Color(u32),
    Number(f32),
    Bool(bool),
}

#[derive(Debug, Error, PartialEq)]
pub enum ControlError {
    #[error("unknown control `{0}`")]
    Unknown(String),
    #[error("control `{name}` expects a {expected} value")]
    KindMismatch {
        name: &'static str,
        expected: &'static str,
    },
    #[error("control `{0}` got a non-finite number")]
    NotFinite(&'static str),
}

#[derive(Clone, Copy)]
pub enum Binding {
    Color {
        get: fn(&AppState) -> u32,
        set: fn(&mut AppState, u32),
    },
    Slider {
        min: f32,
        max: f32,
        step: Option<f32>,
        get: fn(&AppState) -> f32,
        set: fn(&mut AppState, f32),
    },
    Toggle {
        get: fn(&AppState) -> bool,
        set: fn(&mut AppState, bool),
    },
}

impl Binding {
    fn kind_name(&self) -> &'static str {
        match self {
            Binding::Color { .. } => "color",
            Binding::Slider { .. } => "number",
            Binding::Toggle { .. } => "bool",
        }
    }
}

#[derive(Clone, Copy)]
pub struct ControlSpec {
    pub folder: &'static str,
    pub name: &'static str,
    pub label: &'static str,
    pub binding: Binding,
}

impl ControlSpec {
    pub fn value(&self, app: &AppState) -> ControlValue {
        match self.binding {
            Binding::Color { get, .. } => ControlValue::Color(get(app)),
            Binding::Slider { get, .. } => ControlValue::Number(get(app)),
            Binding::Toggle { get, .. } => ControlValue::Bool(get(app)),
        }
    }
}

/// Clamp into `[min, max]`, snapping to the nearest `step` above `min`.
#[inline]
pub fn snap_to_range(v: f32, min: f32, max: f32, step: Option<f32>) -> f32 {
    let v = match step {
        Some(s) if s > 0.0 => min + ((v - min) / s).round() * s,
        _ => v,
    };
    v.clamp(min, max)
}

pub struct ControlPanel {
    specs: Vec<ControlSpec>,
    index: FnvHashMap<&'static str, usize>,
}

impl ControlPanel {
    pub fn new(specs: Vec<ControlSpec>) -> Self {
        let index = specs
            .iter()
            .enumerate()
            .map(|(i, s)| (s.name, i))
            .collect();
        Self { specs, index }
    }

    /// The sphere and cone controls of the debug panel.
    pub fn standard() -> Self {
        Self::new(vec![
            ControlSpec {
                folder: "Sphere Controls",
                name: "color",
                label: "Color",
                binding: Binding::Color {
                    get: |app| app.params.color,
                    set: |app, c| {
                        app.params.color = c;
                        app.scene.sphere.material.color = c;
                    },
                },
            },
            ControlSpec {
                folder: "Sphere Controls",
                name: "metalness",
                label: "Metalness",
                binding: Binding::Slider {
                    min: METALNESS_RANGE.0,
                    max: METALNESS_RANGE.1,
                    step: None,
                    get: |app| app.params.metalness,
                    set: |app, v| {
                        app.params.metalness = v;
                        app.scene.sphere.material.metalness = v;
                    },
                },
            },
            ControlSpec {
                folder: "Sphere Controls",
                name: "wireframe",
                label: "Wireframe",
                binding: Binding::Toggle {
                    get: |app| app.scene.sphere.material.wireframe,
                    set: |app, b| app.scene.sphere.material.wireframe = b,
                },
            },
            ControlSpec {
                folder: "Pyramid Controls",
                name: "cone_x",
                label: "X-Axis",
                binding: Binding::Slider {
                    min: CONE_X_RANGE.0,
                    max: CONE_X_RANGE.1,
                    step: Some(CONE_X_STEP),
                    get: |app| app.scene.cone.transform.position.x,
                    set: |app, v| app.scene.cone.transform.position.x = v,
                },
            },
            ControlSpec {
                folder: "Pyramid Controls",
                name: "visible",
                label: "Visible",
                binding: Binding::Toggle {
                    get: |app| app.scene.cone.visible,
                    set: |app, b| app.scene.cone.visible = b,
                },
            },
            ControlSpec {
                folder: "Pyramid Controls",
                name: "rotate",
                label: "Rotate Pyramid",
                binding: Binding::Toggle {
                    get: |app| app.params.rotate_cone,
                    set: |app, b| app.params.rotate_cone = b,
                },
            },
        ])
    }

    pub fn specs(&self) -> &[ControlSpec] {
        &self.specs
    }

    pub fn spec(&self, name: &str) -> Option<&ControlSpec> {
        self.index.get(name).map(|&i| &self.specs[i])
    }

    /// Folder names in first-seen order.
    pub fn folders(&self) -> Vec<&'static str> {
        let mut out: Vec<&'static str> = Vec::new();
        for s in &self.specs {
            if !out.contains(&s.folder) {
                out.push(s.folder);
            }
        }
        out
    }

    pub fn value(&self, app: &AppState, name: &str) -> Result<ControlValue, ControlError> {
        self.spec(name)
            .map(|s| s.value(app))
            .ok_or_else(|| ControlError::Unknown(name.to_string()))
    }

    /// Write `value` through the named binding and return what was stored.
    pub fn apply(
        &self,
        app: &mut AppState,
        name: &str,
        value: ControlValue,
    ) -> Result<ControlValue, ControlError> {
        let spec = self
            .spec(name)
            .ok_or_else(|| ControlError::Unknown(name.to_string()))?;
        let mismatch = || ControlError::KindMismatch {
            name: spec.name,
            expected: spec.binding.kind_name(),
        };
        let stored = match (spec.binding, value) {
            (Binding::Color { set, .. }, ControlValue::Color(c)) => {
                let c = c & 0x00ff_ffff;
                set(app, c);
                ControlValue::Color(c)
            }
            (
                Binding::Slider {
                    min,
                    max,
                    step,
                    set,
                    ..
                },
                ControlValue::Number(v),
            ) => {
                if !v.is_finite() {
                    return Err(ControlError::NotFinite(spec.name));
                }
                let v = snap_to_range(v, min, max, step);
                set(app, v);
                ControlValue::Number(v)
            }
            (Binding::Toggle { set, .. }, ControlValue::Bool(b)) => {
                set(app, b);
                ControlValue::Bool(b)
            }
            _ => return Err(mismatch()),
        };
        log::debug!("[controls] {} = {:?}", spec.name, stored);
        Ok(stored)
    }

    /// Run a keyboard shortcut through the table.
    pub fn apply_key(
        &self,
        app: &mut AppState,
        command: KeyCommand,
    ) -> Result<ControlValue, ControlError> {
        match command {
            KeyCommand::Toggle(name) => match self.value(app, name)? {
                ControlValue::Bool(b) => self.apply(app, name, ControlValue::Bool(!b)),
                _ => Err(ControlError::KindMismatch {
                    name,
                    expected: "bool",
                }),
            },
            KeyCommand::Nudge(name, delta) => match self.value(app, name)? {
                ControlValue::Number(v) => self.apply(app, name, ControlValue::Number(v + delta)),
                _ => Err(ControlError::KindMismatch {
                    name,
                    expected: "number",
                }),
            },
            KeyCommand::CycleColor => {
                let current = match self.value(app, "color")? {
                    ControlValue::Color(c) => c,
                    _ => SPHERE_PALETTE[0],
                };
                self.apply(app, "color", ControlValue::Color(next_palette_color(current)))
            }
        }
    }
}

/// Modifier keys held during a key press.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct KeyModifiers {
    pub ctrl: bool,
    pub alt: bool,
    /// Cmd on macOS, the Windows key elsewhere.
    pub meta: bool,
}

impl KeyModifiers {
    #[inline]
    pub fn any(&self) -> bool {
        self.ctrl || self.alt || self.meta
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum KeyCommand {
    Toggle(&'static str),
    Nudge(&'static str, f32),
    CycleColor,
}

impl KeyCommand {
    /// Map a DOM-style key name (`KeyboardEvent.key`) to a command.
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "r" | "R" => Some(KeyCommand::Toggle("rotate")),
            "w" | "W" => Some(KeyCommand::Toggle("wireframe")),
            "v" | "V" => Some(KeyCommand::Toggle("visible")),
            "[" => Some(KeyCommand::Nudge("metalness", -METALNESS_KEY_STEP)),
            "]" => Some(KeyCommand::Nudge("metalness", METALNESS_KEY_STEP)),
            "ArrowLeft" => Some(KeyCommand::Nudge("cone_x", -CONE_X_KEY_STEP)),
            "ArrowRight" => Some(KeyCommand::Nudge("cone_x", CONE_X_KEY_STEP)),
            "c" | "C" => Some(KeyCommand::CycleColor),
            _ => None,
        }
    }

    /// Like [`KeyCommand::from_key`], but chords with Ctrl, Alt or Meta are
    /// left to the browser or OS (reload, copy, close).
    pub fn from_shortcut(key: &str, modifiers: KeyModifiers) -> Option<Self> {
        if modifiers.any() {
            return None;
        }
        Self::from_key(key)
    }
}

#[inline]
pub fn next_palette_color(current: u32) -> u32 {
    let i = SPHERE_PALETTE
        .iter()
        .position(|&c| c == current)
        .map(|i| i + 1)
        .unwrap_or(0);
    SPHERE_PALETTE[i % SPHERE_PALETTE.len()]
}

/// Parse `#rrggbb` (leading `#` optional).
pub fn parse_hex_color(s: &str) -> Option<u32> {
    let digits = s.trim().trim_start_matches('#');
    if digits.len() != 6 || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    u32::from_str_radix(digits, 16).ok()
}

pub fn format_hex_color(c: u32) -> String {
    format!("#{:06x}", c & 0x00ff_ffff)
}
