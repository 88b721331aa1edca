//! Scene state: the fixed set of meshes and lights the frame loop mutates.
//!
//! Everything here is plain data built once at startup. The renderer reads it
//! every frame; the frame loop and the control panel write to it between
//! frames.

use crate::config::SceneConfig;
use crate::constants::*;
use crate::text::GlyphSlab;
use glam::{EulerRot, Mat4, Quat, Vec3};
use smallvec::SmallVec;

/// Position, XYZ Euler rotation (radians) and scale.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transform {
    pub position: Vec3,
    pub rotation: Vec3,
    pub scale: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Vec3::ZERO,
            scale: Vec3::ONE,
        }
    }
}

impl Transform {
    pub fn at(position: Vec3) -> Self {
        Self {
            position,
            ..Self::default()
        }
    }

    pub fn with_rotation(mut self, rotation: Vec3) -> Self {
        self.rotation = rotation;
        self
    }

    pub fn matrix(&self) -> Mat4 {
        let q = Quat::from_euler(
            EulerRot::XYZ,
            self.rotation.x,
            self.rotation.y,
            self.rotation.z,
        );
        Mat4::from_scale_rotation_translation(self.scale, q, self.position)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum Geometry {
    Sphere {
        radius: f32,
        width_segments: u32,
        height_segments: u32,
    },
    Cuboid {
        width: f32,
        height: f32,
        depth: f32,
    },
    Cone {
        radius: f32,
        height: f32,
        radial_segments: u32,
    },
    /// Lies in the local XY plane facing +Z.
    Plane { width: f32, height: f32 },
    /// One slab per laid-out glyph.
    Glyphs(SmallVec<[GlyphSlab; 8]>),
}

impl Geometry {
    /// Radius of a sphere around the local origin enclosing the geometry.
    pub fn bounding_radius(&self) -> f32 {
        match self {
            Geometry::Sphere { radius, .. } => *radius,
            Geometry::Cuboid {
                width,
                height,
                depth,
            } => 0.5 * Vec3::new(*width, *height, *depth).length(),
            Geometry::Cone { radius, height, .. } => (radius * radius + 0.25 * height * height).sqrt(),
            Geometry::Plane { width, height } => 0.5 * (width * width + height * height).sqrt(),
            Geometry::Glyphs(slabs) => slabs
                .iter()
                .map(|s| s.center.length() + 0.5 * s.size.length())
                .fold(0.0, f32::max),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum MaterialKind {
    Standard,
    /// Transparent except where shadowed; `opacity` is the shadow darkness.
    ShadowCatcher { opacity: f32 },
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Material {
    pub color: u32,
    pub roughness: f32,
    pub metalness: f32,
    pub wireframe: bool,
    pub kind: MaterialKind,
}

impl Material {
    pub fn standard(color: u32, roughness: f32, metalness: f32) -> Self {
        Self {
            color,
            roughness,
            metalness,
            wireframe: false,
            kind: MaterialKind::Standard,
        }
    }

    pub fn shadow_catcher(opacity: f32) -> Self {
        Self {
            color: 0x000000,
            roughness: 1.0,
            metalness: 0.0,
            wireframe: false,
            kind: MaterialKind::ShadowCatcher { opacity },
        }
    }

    pub fn rgb(&self) -> [f32; 3] {
        hex_to_rgb(self.color)
    }
}

#[derive(Clone, Debug)]
pub struct Mesh {
    pub geometry: Geometry,
    pub material: Material,
    pub transform: Transform,
    pub visible: bool,
    pub cast_shadow: bool,
    pub receive_shadow: bool,
}

impl Mesh {
    pub fn new(geometry: Geometry, material: Material, transform: Transform) -> Self {
        Self {
            geometry,
            material,
            transform,
            visible: true,
            cast_shadow: false,
            receive_shadow: false,
        }
    }

    fn casting(mut self) -> Self {
        self.cast_shadow = true;
        self
    }

    fn receiving(mut self) -> Self {
        self.receive_shadow = true;
        self
    }
}

/// Stable identity of each scene mesh, used by the renderer to key GPU buffers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MeshId {
    Sphere,
    Backdrop,
    Cone,
    Ground,
    Text,
}

#[derive(Clone, Copy, Debug)]
pub struct PointLight {
    pub color: u32,
    pub intensity: f32,
    pub range: f32,
    pub position: Vec3,
    pub cast_shadow: bool,
}

#[derive(Clone, Copy, Debug)]
pub struct Fog {
    pub color: u32,
    pub density: f32,
}

pub struct SceneState {
    pub background: u32,
    pub fog: Fog,
    pub sphere: Mesh,
    pub backdrop: Mesh,
    pub cone: Mesh,
    pub ground: Mesh,
    /// Appears once the font has loaded; stays `None` if loading failed.
    pub text: Option<Mesh>,
    pub point_light: PointLight,
    pub ambient: u32,
}

impl SceneState {
    pub fn new(config: &SceneConfig) -> Self {
        let sphere = Mesh::new(
            Geometry::Sphere {
                radius: SPHERE_RADIUS,
                width_segments: SPHERE_SEGMENTS,
                height_segments: SPHERE_SEGMENTS,
            },
            Material {
                wireframe: true,
                ..Material::standard(SPHERE_COLOR_HEX, SPHERE_ROUGHNESS, SPHERE_METALNESS)
            },
            Transform::at(vec3(SPHERE_POSITION)),
        )
        .casting();

        let backdrop = Mesh::new(
            Geometry::Cuboid {
                width: BOX_SIZE[0],
                height: BOX_SIZE[1],
                depth: BOX_SIZE[2],
            },
            Material::standard(BOX_COLOR_HEX, 1.0, 0.0),
            Transform::at(vec3(BOX_POSITION)),
        );

        let cone = Mesh::new(
            Geometry::Cone {
                radius: CONE_RADIUS,
                height: CONE_HEIGHT,
                radial_segments: CONE_SEGMENTS,
            },
            Material::standard(CONE_COLOR_HEX, CONE_ROUGHNESS, CONE_METALNESS),
            Transform::at(vec3(CONE_POSITION)).with_rotation(vec3(CONE_ROTATION)),
        )
        .casting();

        let ground = Mesh::new(
            Geometry::Plane {
                width: GROUND_SIZE,
                height: GROUND_SIZE,
            },
            Material::shadow_catcher(GROUND_SHADOW_OPACITY),
            Transform::at(Vec3::new(0.0, GROUND_Y, 0.0))
                .with_rotation(Vec3::new(-std::f32::consts::FRAC_PI_2, 0.0, 0.0)),
        )
        .receiving();

        Self {
            background: config.background_hex,
            fog: Fog {
                color: config.background_hex,
                density: config.fog_density,
            },
            sphere,
            backdrop,
            cone,
            ground,
            text: None,
            point_light: PointLight {
                color: POINT_LIGHT_HEX,
                intensity: POINT_LIGHT_INTENSITY,
                range: POINT_LIGHT_RANGE,
                position: vec3(POINT_LIGHT_POSITION),
                cast_shadow: true,
            },
            ambient: AMBIENT_LIGHT_HEX,
        }
    }

    /// Add the text mesh built from a laid-out glyph run.
    pub fn attach_text(&mut self, slabs: SmallVec<[GlyphSlab; 8]>) {
        let mesh = Mesh::new(
            Geometry::Glyphs(slabs),
            Material::standard(TEXT_COLOR_HEX, 1.0, 0.0),
            Transform::at(vec3(TEXT_POSITION)),
        );
        self.text = Some(mesh);
    }

    pub fn mesh(&self, id: MeshId) -> Option<&Mesh> {
        match id {
            MeshId::Sphere => Some(&self.sphere),
            MeshId::Backdrop => Some(&self.backdrop),
            MeshId::Cone => Some(&self.cone),
            MeshId::Ground => Some(&self.ground),
            MeshId::Text => self.text.as_ref(),
        }
    }

    /// Meshes in draw order: opaque first, shadow catchers last.
    pub fn meshes(&self) -> impl Iterator<Item = (MeshId, &Mesh)> {
        [
            MeshId::Backdrop,
            MeshId::Text,
            MeshId::Cone,
            MeshId::Sphere,
            MeshId::Ground,
        ]
        .into_iter()
        .filter_map(move |id| self.mesh(id).map(|m| (id, m)))
    }

    /// World-space bounding spheres (center, radius) of visible shadow casters.
    pub fn shadow_casters(&self) -> impl Iterator<Item = (Vec3, f32)> + '_ {
        self.meshes()
            .map(|(_, m)| m)
            .filter(|m| m.visible && m.cast_shadow)
            .map(|m| (m.transform.position, m.geometry.bounding_radius()))
    }
}

#[inline]
pub fn hex_to_rgb(hex: u32) -> [f32; 3] {
    [
        ((hex >> 16) & 0xff) as f32 / 255.0,
        ((hex >> 8) & 0xff) as f32 / 255.0,
        (hex & 0xff) as f32 / 255.0,
    ]
}
