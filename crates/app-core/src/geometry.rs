//! Triangle meshes for the scene's primitive shapes.

use crate::scene::Geometry;
use crate::text::GlyphSlab;
use fnv::FnvHashSet;
use glam::Vec3;
use std::f32::consts::{PI, TAU};

#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
}

impl Vertex {
    fn new(position: Vec3, normal: Vec3) -> Self {
        Self {
            position: position.to_array(),
            normal: normal.to_array(),
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct MeshData {
    pub vertices: Vec<Vertex>,
    /// Triangle list.
    pub indices: Vec<u32>,
}

impl MeshData {
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    fn append(&mut self, other: MeshData) {
        let base = self.vertices.len() as u32;
        self.vertices.extend(other.vertices);
        self.indices.extend(other.indices.into_iter().map(|i| i + base));
    }

    /// Unique triangle edges as a line list.
    pub fn edge_indices(&self) -> Vec<u32> {
        let mut seen: FnvHashSet<(u32, u32)> = FnvHashSet::default();
        let mut lines = Vec::new();
        for tri in self.indices.chunks_exact(3) {
            for (a, b) in [(tri[0], tri[1]), (tri[1], tri[2]), (tri[2], tri[0])] {
                let key = if a < b { (a, b) } else { (b, a) };
                if seen.insert(key) {
                    lines.push(a);
                    lines.push(b);
                }
            }
        }
        lines
    }
}

pub fn build(geometry: &Geometry) -> MeshData {
    match geometry {
        Geometry::Sphere {
            radius,
            width_segments,
            height_segments,
        } => sphere(*radius, *width_segments, *height_segments),
        Geometry::Cuboid {
            width,
            height,
            depth,
        } => cuboid(Vec3::new(*width, *height, *depth), Vec3::ZERO),
        Geometry::Cone {
            radius,
            height,
            radial_segments,
        } => cone(*radius, *height, *radial_segments),
        Geometry::Plane { width, height } => plane(*width, *height),
        Geometry::Glyphs(slabs) => glyph_slabs(slabs),
    }
}

pub fn sphere(radius: f32, width_segments: u32, height_segments: u32) -> MeshData {
    let ws = width_segments.max(3);
    let hs = height_segments.max(2);
    let mut mesh = MeshData::default();
    for iy in 0..=hs {
        let v = iy as f32 / hs as f32;
        for ix in 0..=ws {
            let u = ix as f32 / ws as f32;
            let n = Vec3::new(
                -(u * TAU).cos() * (v * PI).sin(),
                (v * PI).cos(),
                (u * TAU).sin() * (v * PI).sin(),
            );
            mesh.vertices.push(Vertex::new(n * radius, n));
        }
    }
    let row = ws + 1;
    for iy in 0..hs {
        for ix in 0..ws {
            let a = iy * row + ix + 1;
            let b = iy * row + ix;
            let c = (iy + 1) * row + ix;
            let d = (iy + 1) * row + ix + 1;
            // poles collapse to a single triangle per quad
            if iy != 0 {
                mesh.indices.extend_from_slice(&[a, b, d]);
            }
            if iy != hs - 1 {
                mesh.indices.extend_from_slice(&[b, c, d]);
            }
        }
    }
    mesh
}

/// Axis-aligned box of `size` centred on `center`.
pub fn cuboid(size: Vec3, center: Vec3) -> MeshData {
    let h = size * 0.5;
    // (normal, u axis, v axis) per face
    let faces = [
        (Vec3::X, Vec3::NEG_Z, Vec3::Y),
        (Vec3::NEG_X, Vec3::Z, Vec3::Y),
        (Vec3::Y, Vec3::X, Vec3::NEG_Z),
        (Vec3::NEG_Y, Vec3::X, Vec3::Z),
        (Vec3::Z, Vec3::X, Vec3::Y),
        (Vec3::NEG_Z, Vec3::NEG_X, Vec3::Y),
    ];
    let mut mesh = MeshData::default();
    for (n, u, v) in faces {
        let base = mesh.vertices.len() as u32;
        for (su, sv) in [(-1.0, -1.0), (1.0, -1.0), (1.0, 1.0), (-1.0, 1.0)] {
            let p = (n + u * su + v * sv) * h + center;
            mesh.vertices.push(Vertex::new(p, n));
        }
        mesh.indices
            .extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
    }
    mesh
}

/// Cone along +Y centred on the origin, apex at `height / 2`, capped base.
pub fn cone(radius: f32, height: f32, radial_segments: u32) -> MeshData {
    let segs = radial_segments.max(3);
    let half = height * 0.5;
    let slope = if height > 0.0 { radius / height } else { 0.0 };
    let mut mesh = MeshData::default();

    // side: apex ring and base ring share angles so normals stay smooth
    for i in 0..=segs {
        let theta = i as f32 / segs as f32 * TAU;
        let (s, c) = theta.sin_cos();
        let n = Vec3::new(s, slope, c).normalize();
        mesh.vertices.push(Vertex::new(Vec3::new(0.0, half, 0.0), n));
        mesh.vertices
            .push(Vertex::new(Vec3::new(radius * s, -half, radius * c), n));
    }
    for i in 0..segs {
        let apex = i * 2;
        let base = i * 2 + 1;
        let next_base = (i + 1) * 2 + 1;
        mesh.indices.extend_from_slice(&[apex, base, next_base]);
    }

    let center = mesh.vertices.len() as u32;
    mesh.vertices
        .push(Vertex::new(Vec3::new(0.0, -half, 0.0), Vec3::NEG_Y));
    for i in 0..=segs {
        let theta = i as f32 / segs as f32 * TAU;
        let (s, c) = theta.sin_cos();
        mesh.vertices.push(Vertex::new(
            Vec3::new(radius * s, -half, radius * c),
            Vec3::NEG_Y,
        ));
    }
    for i in 0..segs {
        mesh.indices
            .extend_from_slice(&[center, center + 2 + i, center + 1 + i]);
    }
    mesh
}

/// Rectangle in the XY plane facing +Z.
pub fn plane(width: f32, height: f32) -> MeshData {
    let (hw, hh) = (width * 0.5, height * 0.5);
    let vertices = [(-hw, -hh), (hw, -hh), (hw, hh), (-hw, hh)]
        .into_iter()
        .map(|(x, y)| Vertex::new(Vec3::new(x, y, 0.0), Vec3::Z))
        .collect();
    MeshData {
        vertices,
        indices: vec![0, 1, 2, 0, 2, 3],
    }
}

pub fn glyph_slabs(slabs: &[GlyphSlab]) -> MeshData {
    let mut mesh = MeshData::default();
    for s in slabs {
        mesh.append(cuboid(s.size, s.center));
    }
    mesh
}
