use crate::constants::*;
use glam::Vec3;

/// Startup configuration for the scene, camera and asset loading.
///
/// `Default` reproduces the shipped scene; tests build variants directly.
#[derive(Clone, Debug)]
pub struct SceneConfig {
    pub background_hex: u32,
    pub fog_density: f32,
    pub camera_eye: Vec3,
    pub camera_focus: Vec3,
    pub camera_fov_deg: f32,
    pub camera_near: f32,
    pub camera_far: f32,
    pub smoothing: f32,
    pub font_url: &'static str,
    pub text: &'static str,
    pub text_size: f32,
    pub text_depth: f32,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            background_hex: BACKGROUND_HEX,
            fog_density: FOG_DENSITY,
            camera_eye: Vec3::new(0.0, 0.0, CAMERA_Z),
            camera_focus: Vec3::ZERO,
            camera_fov_deg: CAMERA_FOV_DEG,
            camera_near: CAMERA_NEAR,
            camera_far: CAMERA_FAR,
            smoothing: CAMERA_SMOOTHING,
            font_url: FONT_URL,
            text: TEXT_CONTENT,
            text_size: TEXT_SIZE,
            text_depth: TEXT_DEPTH,
        }
    }
}
