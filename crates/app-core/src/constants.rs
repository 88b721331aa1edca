use glam::Vec3;

// Scene configuration shared by both web and native frontends.

// Environment
pub const BACKGROUND_HEX: u32 = 0x503070;
pub const FOG_DENSITY: f32 = 0.1; // exponential-squared fog

// Camera
pub const CAMERA_FOV_DEG: f32 = 85.0;
pub const CAMERA_NEAR: f32 = 1.0;
pub const CAMERA_FAR: f32 = 100.0;
pub const CAMERA_Z: f32 = 10.0; // fixed; only x/y follow the pointer
pub const CAMERA_SMOOTHING: f32 = 0.1; // fraction of remaining distance closed per tick

// Pointer mapping: x' = (px / w) * SCALE + X_OFFSET, y' = -(py / h) * SCALE + Y_OFFSET
pub const POINTER_SCALE: f32 = 5.0;
pub const POINTER_X_OFFSET: f32 = -1.0;
pub const POINTER_Y_OFFSET: f32 = 1.0;

// Sphere
pub const SPHERE_RADIUS: f32 = 1.5;
pub const SPHERE_SEGMENTS: u32 = 32;
pub const SPHERE_COLOR_HEX: u32 = 0x1509ff;
pub const SPHERE_ROUGHNESS: f32 = 0.5;
pub const SPHERE_METALNESS: f32 = 1.0;
pub const SPHERE_POSITION: [f32; 3] = [3.0, 1.0, 3.0];

// Motion amplitudes for the orbiting sphere
pub const SPHERE_BOB_AMPLITUDE: f32 = 0.2;
pub const SPHERE_DRIFT_X_AMPLITUDE: f32 = 1.0;
pub const SPHERE_DRIFT_Z_AMPLITUDE: f32 = 2.0;

// Backdrop box
pub const BOX_SIZE: [f32; 3] = [40.0, 40.0, 0.5];
pub const BOX_COLOR_HEX: u32 = 0xffffff;
pub const BOX_POSITION: [f32; 3] = [-2.0, 0.0, -10.0];

// Cone ("pyramid")
pub const CONE_RADIUS: f32 = 1.5;
pub const CONE_HEIGHT: f32 = 3.0;
pub const CONE_SEGMENTS: u32 = 30;
pub const CONE_COLOR_HEX: u32 = 0x653069;
pub const CONE_ROUGHNESS: f32 = 2.0;
pub const CONE_METALNESS: f32 = 0.5;
pub const CONE_POSITION: [f32; 3] = [0.0, 3.0, 3.0];
pub const CONE_ROTATION: [f32; 3] = [0.0, 0.0, 1.0];

// Ground (shadow catcher)
pub const GROUND_SIZE: f32 = 500.0;
pub const GROUND_Y: f32 = -1.5;
pub const GROUND_SHADOW_OPACITY: f32 = 0.2;

// Lights
pub const POINT_LIGHT_HEX: u32 = 0xffffff;
pub const POINT_LIGHT_INTENSITY: f32 = 1.5;
pub const POINT_LIGHT_RANGE: f32 = 1000.0;
pub const POINT_LIGHT_POSITION: [f32; 3] = [-10.0, 20.0, 5.0];
pub const AMBIENT_LIGHT_HEX: u32 = 0x707070;

// Text
pub const FONT_URL: &str = "https://threejs.org/examples/fonts/optimer_bold.typeface.json";
pub const TEXT_CONTENT: &str = "XR";
pub const TEXT_SIZE: f32 = 5.0;
pub const TEXT_DEPTH: f32 = 0.0001;
pub const TEXT_COLOR_HEX: u32 = 0xffffff;
pub const TEXT_POSITION: [f32; 3] = [0.0, 0.0, -50.0];

// Control panel
pub const INITIAL_COLOR_PARAM: u32 = 0xffffff;
pub const CONE_X_RANGE: (f32, f32) = (-10.0, 10.0);
pub const CONE_X_STEP: f32 = 0.001;
pub const METALNESS_RANGE: (f32, f32) = (0.0, 1.0);

// Keyboard nudges
pub const METALNESS_KEY_STEP: f32 = 0.1;
pub const CONE_X_KEY_STEP: f32 = 0.5;
pub const SPHERE_PALETTE: [u32; 5] = [0xffffff, 0x1509ff, 0xff5a36, 0x36ffb0, 0xffd836];

#[inline]
pub fn vec3(v: [f32; 3]) -> Vec3 {
    Vec3::new(v[0], v[1], v[2])
}
