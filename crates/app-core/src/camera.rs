//! Perspective camera that eases toward the pointer and always faces a focus point.

use crate::pointer::PointerTarget;
use glam::{Mat4, Vec3};

/// Right-handed perspective camera rig.
#[derive(Clone, Debug)]
pub struct CameraRig {
    pub eye: Vec3,
    pub focus: Vec3,
    pub up: Vec3,
    /// Unit view direction, rederived from `eye` and `focus` by [`CameraRig::look_at`].
    pub forward: Vec3,
    pub aspect: f32,
    pub fovy_radians: f32,
    pub znear: f32,
    pub zfar: f32,
}

impl CameraRig {
    pub fn new(eye: Vec3, fovy_degrees: f32, aspect: f32, znear: f32, zfar: f32) -> Self {
        let mut rig = Self {
            eye,
            focus: Vec3::ZERO,
            up: Vec3::Y,
            forward: Vec3::NEG_Z,
            aspect,
            fovy_radians: fovy_degrees.to_radians(),
            znear,
            zfar,
        };
        rig.look_at(Vec3::ZERO);
        rig
    }

    /// Close `alpha` of the remaining x/y distance to the target. z is untouched.
    pub fn smooth_toward(&mut self, target: PointerTarget, alpha: f32) {
        self.eye.x += (target.x - self.eye.x) * alpha;
        self.eye.y += (target.y - self.eye.y) * alpha;
    }

    pub fn look_at(&mut self, focus: Vec3) {
        self.focus = focus;
        let dir = focus - self.eye;
        if dir.length_squared() > f32::EPSILON {
            self.forward = dir.normalize();
        }
    }

    /// Match the aspect ratio to a new viewport. Zero-height viewports are ignored.
    pub fn set_viewport(&mut self, width: u32, height: u32) {
        if height == 0 {
            return;
        }
        self.aspect = width as f32 / height as f32;
    }

    /// Compute the clip-space projection matrix.
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fovy_radians, self.aspect, self.znear, self.zfar)
    }

    /// Compute the view matrix that transforms world to view space.
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye, self.focus, self.up)
    }

    pub fn view_proj(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }
}
