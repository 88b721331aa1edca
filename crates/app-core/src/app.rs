//! Application state owned by the frame loop.

use crate::camera::CameraRig;
use crate::config::SceneConfig;
use crate::constants::{INITIAL_COLOR_PARAM, SPHERE_METALNESS};
use crate::motion;
use crate::pointer::PointerTarget;
use crate::scene::SceneState;

/// Values the control panel edits that are not plain scene fields.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Params {
    pub color: u32,
    pub metalness: f32,
    pub rotate_cone: bool,
}

impl Default for Params {
    fn default() -> Self {
        Self {
            color: INITIAL_COLOR_PARAM,
            metalness: SPHERE_METALNESS,
            rotate_cone: true,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

pub struct AppState {
    pub config: SceneConfig,
    pub scene: SceneState,
    pub camera: CameraRig,
    pub pointer: PointerTarget,
    pub params: Params,
    pub viewport: Viewport,
}

impl AppState {
    pub fn new(config: SceneConfig, width: u32, height: u32) -> Self {
        let aspect = if height > 0 {
            width as f32 / height as f32
        } else {
            1.0
        };
        let mut camera = CameraRig::new(
            config.camera_eye,
            config.camera_fov_deg,
            aspect,
            config.camera_near,
            config.camera_far,
        );
        camera.look_at(config.camera_focus);
        let scene = SceneState::new(&config);
        Self {
            config,
            scene,
            camera,
            pointer: PointerTarget::default(),
            params: Params::default(),
            viewport: Viewport { width, height },
        }
    }

    /// Record the latest pointer position; read by the next tick.
    pub fn track_pointer(&mut self, px: f32, py: f32, width: f32, height: f32) {
        self.pointer.track(px, py, width, height);
    }

    /// Match output size and camera aspect to the new viewport.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.viewport = Viewport { width, height };
        self.camera.set_viewport(width, height);
    }

    /// Animate objects for elapsed seconds `t`, then ease the camera.
    pub fn update(&mut self, t: f64) {
        let phase = motion::phase(t);
        self.scene.sphere.transform.position = motion::orbit_position(phase);
        motion::spin_yaw(&mut self.scene.cone.transform, phase, self.params.rotate_cone);

        self.camera.smooth_toward(self.pointer, self.config.smoothing);
        self.camera.look_at(self.config.camera_focus);
    }
}
