pub mod app;
pub mod camera;
pub mod clock;
pub mod config;
pub mod constants;
pub mod controls;
pub mod frame;
pub mod geometry;
pub mod motion;
pub mod pointer;
#[cfg(feature = "gpu")]
pub mod renderer;
pub mod scene;
pub mod text;
pub static SCENE_WGSL: &str = include_str!("../shaders/scene.wgsl");

pub use app::*;
pub use camera::*;
pub use clock::*;
pub use config::*;
pub use constants::*;
pub use controls::*;
pub use frame::*;
pub use pointer::*;
#[cfg(feature = "gpu")]
pub use renderer::SceneRenderer;
pub use scene::*;
pub use text::*;
