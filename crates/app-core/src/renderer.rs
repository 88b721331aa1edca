//! Minimal wgpu forward renderer for [`SceneState`].
//!
//! One lit pipeline for solid meshes, a line pipeline for wireframe
//! materials and a blended pipeline for shadow catchers. GPU buffers are
//! created the first time a mesh id is seen and rebuilt if its geometry
//! changes.

use crate::camera::CameraRig;
use crate::frame::RenderSink;
use crate::geometry::{self, Vertex};
use crate::scene::{Geometry, MaterialKind, Mesh, MeshId, SceneState};
use fnv::FnvHashMap;
use glam::Mat4;
use wgpu::util::DeviceExt;

const MAX_CASTERS: usize = 4;
const DEPTH_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth32Float;

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
struct Globals {
    view_proj: [[f32; 4]; 4],
    camera_pos: [f32; 4],
    light_pos: [f32; 4],
    light_color: [f32; 4],
    ambient: [f32; 4],
    fog: [f32; 4],
    casters: [[f32; 4]; MAX_CASTERS],
    caster_count: [u32; 4],
}

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
struct ObjectUniforms {
    model: [[f32; 4]; 4],
    normal_matrix: [[f32; 4]; 4],
    color: [f32; 4],
    params: [f32; 4],
}

struct GpuMesh {
    geometry: Geometry,
    vertex_buffer: wgpu::Buffer,
    index_buffer: wgpu::Buffer,
    index_count: u32,
    edge_buffer: wgpu::Buffer,
    edge_count: u32,
    uniform_buffer: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
}

pub struct SceneRenderer<'w> {
    surface: wgpu::Surface<'w>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    depth_view: wgpu::TextureView,
    globals_buffer: wgpu::Buffer,
    globals_bind_group: wgpu::BindGroup,
    object_layout: wgpu::BindGroupLayout,
    solid_pipeline: wgpu::RenderPipeline,
    wire_pipeline: wgpu::RenderPipeline,
    shadow_pipeline: wgpu::RenderPipeline,
    meshes: FnvHashMap<MeshId, GpuMesh>,
    out_of_memory: bool,
}

impl<'w> SceneRenderer<'w> {
    pub async fn new(
        instance: &wgpu::Instance,
        surface: wgpu::Surface<'w>,
        width: u32,
        height: u32,
    ) -> anyhow::Result<Self> {
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .ok_or_else(|| anyhow::anyhow!("No GPU adapter"))?;
        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    required_features: wgpu::Features::empty(),
                    // Default limits avoid passing unknown fields to older WebGPU impls
                    required_limits: wgpu::Limits::default(),
                    memory_hints: wgpu::MemoryHints::Performance,
                    label: None,
                },
                None,
            )
            .await
            .map_err(|e| anyhow::anyhow!(format!("request_device error: {:?}", e)))?;

        let caps = surface.get_capabilities(&adapter);
        let format = caps
            .formats
            .iter()
            .copied()
            .find(|f| f.is_srgb())
            .or_else(|| caps.formats.first().copied())
            .ok_or_else(|| anyhow::anyhow!("surface reports no formats"))?;
        let alpha_mode = caps
            .alpha_modes
            .first()
            .copied()
            .unwrap_or(wgpu::CompositeAlphaMode::Auto);
        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width: width.max(1),
            height: height.max(1),
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode,
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);
        log::info!("[gpu] surface {:?} {}x{}", format, config.width, config.height);

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("scene"),
            source: wgpu::ShaderSource::Wgsl(crate::SCENE_WGSL.into()),
        });

        let uniform_entry = |visibility| wgpu::BindGroupLayoutEntry {
            binding: 0,
            visibility,
            ty: wgpu::BindingType::Buffer {
                ty: wgpu::BufferBindingType::Uniform,
                has_dynamic_offset: false,
                min_binding_size: None,
            },
            count: None,
        };
        let globals_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("globals_bgl"),
            entries: &[uniform_entry(wgpu::ShaderStages::VERTEX_FRAGMENT)],
        });
        let object_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("object_bgl"),
            entries: &[uniform_entry(wgpu::ShaderStages::VERTEX_FRAGMENT)],
        });

        let globals_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("globals"),
            size: std::mem::size_of::<Globals>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let globals_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("globals_bg"),
            layout: &globals_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: globals_buffer.as_entire_binding(),
            }],
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("scene_pl"),
            bind_group_layouts: &[&globals_layout, &object_layout],
            push_constant_ranges: &[],
        });

        let vertex_layout = wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex>() as u64,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[
                wgpu::VertexAttribute {
                    format: wgpu::VertexFormat::Float32x3,
                    offset: 0,
                    shader_location: 0,
                },
                wgpu::VertexAttribute {
                    format: wgpu::VertexFormat::Float32x3,
                    offset: 12,
                    shader_location: 1,
                },
            ],
        };

        let make_pipeline = |label: &str,
                             topology: wgpu::PrimitiveTopology,
                             fragment_entry: &str,
                             depth_write: bool,
                             blend: Option<wgpu::BlendState>| {
            device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
                label: Some(label),
                layout: Some(&pipeline_layout),
                vertex: wgpu::VertexState {
                    module: &shader,
                    entry_point: Some("vs_main"),
                    buffers: &[vertex_layout.clone()],
                    compilation_options: wgpu::PipelineCompilationOptions::default(),
                },
                primitive: wgpu::PrimitiveState {
                    topology,
                    cull_mode: None,
                    ..Default::default()
                },
                depth_stencil: Some(wgpu::DepthStencilState {
                    format: DEPTH_FORMAT,
                    depth_write_enabled: depth_write,
                    depth_compare: wgpu::CompareFunction::Less,
                    stencil: wgpu::StencilState::default(),
                    bias: wgpu::DepthBiasState::default(),
                }),
                multisample: wgpu::MultisampleState::default(),
                fragment: Some(wgpu::FragmentState {
                    module: &shader,
                    entry_point: Some(fragment_entry),
                    targets: &[Some(wgpu::ColorTargetState {
                        format,
                        blend,
                        write_mask: wgpu::ColorWrites::ALL,
                    })],
                    compilation_options: wgpu::PipelineCompilationOptions::default(),
                }),
                cache: None,
                multiview: None,
            })
        };
        let solid_pipeline = make_pipeline(
            "solid",
            wgpu::PrimitiveTopology::TriangleList,
            "fs_lit",
            true,
            None,
        );
        let wire_pipeline = make_pipeline(
            "wire",
            wgpu::PrimitiveTopology::LineList,
            "fs_lit",
            true,
            None,
        );
        // drawn last without depth writes so it never hides what is behind it
        let shadow_pipeline = make_pipeline(
            "shadow",
            wgpu::PrimitiveTopology::TriangleList,
            "fs_shadow",
            false,
            Some(wgpu::BlendState::ALPHA_BLENDING),
        );

        let depth_view = create_depth_view(&device, config.width, config.height);

        Ok(Self {
            surface,
            device,
            queue,
            config,
            depth_view,
            globals_buffer,
            globals_bind_group,
            object_layout,
            solid_pipeline,
            wire_pipeline,
            shadow_pipeline,
            meshes: FnvHashMap::default(),
            out_of_memory: false,
        })
    }

    /// Reconfigure the surface and depth buffer; zero sizes are ignored.
    pub fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        if width != self.config.width || height != self.config.height {
            self.config.width = width;
            self.config.height = height;
            self.surface.configure(&self.device, &self.config);
            self.depth_view = create_depth_view(&self.device, width, height);
        }
    }

    pub fn size(&self) -> (u32, u32) {
        (self.config.width, self.config.height)
    }

    /// Set once the device reported it ran out of memory.
    pub fn is_out_of_memory(&self) -> bool {
        self.out_of_memory
    }

    fn upload_mesh(&self, mesh: &Mesh) -> GpuMesh {
        let data = geometry::build(&mesh.geometry);
        let edges = data.edge_indices();
        let vertex_buffer = self
            .device
            .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("mesh_vb"),
                contents: bytemuck::cast_slice(&data.vertices),
                usage: wgpu::BufferUsages::VERTEX,
            });
        let index_buffer = self
            .device
            .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("mesh_ib"),
                contents: bytemuck::cast_slice(&data.indices),
                usage: wgpu::BufferUsages::INDEX,
            });
        let edge_buffer = self
            .device
            .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("mesh_edges"),
                contents: bytemuck::cast_slice(&edges),
                usage: wgpu::BufferUsages::INDEX,
            });
        let uniform_buffer = self.device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("object"),
            size: std::mem::size_of::<ObjectUniforms>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let bind_group = self.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("object_bg"),
            layout: &self.object_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: uniform_buffer.as_entire_binding(),
            }],
        });
        GpuMesh {
            geometry: mesh.geometry.clone(),
            vertex_buffer,
            index_buffer,
            index_count: data.indices.len() as u32,
            edge_buffer,
            edge_count: edges.len() as u32,
            uniform_buffer,
            bind_group,
        }
    }

    fn sync_meshes(&mut self, scene: &SceneState) {
        for (id, mesh) in scene.meshes() {
            let stale = self
                .meshes
                .get(&id)
                .map(|g| g.geometry != mesh.geometry)
                .unwrap_or(true);
            if stale {
                log::debug!("[gpu] uploading {:?}", id);
                let gpu = self.upload_mesh(mesh);
                self.meshes.insert(id, gpu);
            }
            if let Some(gpu) = self.meshes.get(&id) {
                self.queue.write_buffer(
                    &gpu.uniform_buffer,
                    0,
                    bytemuck::bytes_of(&object_uniforms(mesh)),
                );
            }
        }
    }

    fn write_globals(&self, scene: &SceneState, camera: &CameraRig) {
        let light = &scene.point_light;
        let light_rgb = srgb_to_linear(crate::scene::hex_to_rgb(light.color));
        let ambient = srgb_to_linear(crate::scene::hex_to_rgb(scene.ambient));
        let fog = srgb_to_linear(crate::scene::hex_to_rgb(scene.fog.color));
        let mut casters = [[0.0_f32; 4]; MAX_CASTERS];
        let mut count = 0u32;
        if light.cast_shadow {
            for (slot, (center, radius)) in casters.iter_mut().zip(scene.shadow_casters()) {
                *slot = [center.x, center.y, center.z, radius];
                count += 1;
            }
        }
        let globals = Globals {
            view_proj: camera.view_proj().to_cols_array_2d(),
            camera_pos: camera.eye.extend(1.0).to_array(),
            light_pos: light.position.extend(light.range).to_array(),
            light_color: [
                light_rgb[0] * light.intensity,
                light_rgb[1] * light.intensity,
                light_rgb[2] * light.intensity,
                1.0,
            ],
            ambient: [ambient[0], ambient[1], ambient[2], 1.0],
            fog: [fog[0], fog[1], fog[2], scene.fog.density],
            casters,
            caster_count: [count, 0, 0, 0],
        };
        self.queue
            .write_buffer(&self.globals_buffer, 0, bytemuck::bytes_of(&globals));
    }

    fn draw(&mut self, scene: &SceneState, camera: &CameraRig) -> Result<(), wgpu::SurfaceError> {
        let frame = self.surface.get_current_texture()?;
        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        self.sync_meshes(scene);
        self.write_globals(scene, camera);

        let bg = srgb_to_linear(crate::scene::hex_to_rgb(scene.background));
        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("encoder"),
            });
        {
            let mut rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("scene_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color {
                            r: bg[0] as f64,
                            g: bg[1] as f64,
                            b: bg[2] as f64,
                            a: 1.0,
                        }),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.depth_view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                timestamp_writes: None,
                occlusion_query_set: None,
            });
            rpass.set_bind_group(0, &self.globals_bind_group, &[]);
            for (id, mesh) in scene.meshes() {
                if !mesh.visible {
                    continue;
                }
                let Some(gpu) = self.meshes.get(&id) else {
                    continue;
                };
                // empty glyph runs; wgpu rejects empty buffer slices
                if gpu.index_count == 0 {
                    continue;
                }
                rpass.set_bind_group(1, &gpu.bind_group, &[]);
                rpass.set_vertex_buffer(0, gpu.vertex_buffer.slice(..));
                match (mesh.material.kind, mesh.material.wireframe) {
                    (MaterialKind::ShadowCatcher { .. }, _) => {
                        if !mesh.receive_shadow {
                            continue;
                        }
                        rpass.set_pipeline(&self.shadow_pipeline);
                        rpass.set_index_buffer(gpu.index_buffer.slice(..), wgpu::IndexFormat::Uint32);
                        rpass.draw_indexed(0..gpu.index_count, 0, 0..1);
                    }
                    (MaterialKind::Standard, true) => {
                        rpass.set_pipeline(&self.wire_pipeline);
                        rpass.set_index_buffer(gpu.edge_buffer.slice(..), wgpu::IndexFormat::Uint32);
                        rpass.draw_indexed(0..gpu.edge_count, 0, 0..1);
                    }
                    (MaterialKind::Standard, false) => {
                        rpass.set_pipeline(&self.solid_pipeline);
                        rpass.set_index_buffer(gpu.index_buffer.slice(..), wgpu::IndexFormat::Uint32);
                        rpass.draw_indexed(0..gpu.index_count, 0, 0..1);
                    }
                }
            }
        }
        self.queue.submit(Some(encoder.finish()));
        frame.present();
        Ok(())
    }
}

impl RenderSink for SceneRenderer<'_> {
    fn render(&mut self, scene: &SceneState, camera: &CameraRig) -> anyhow::Result<()> {
        match self.draw(scene, camera) {
            Ok(()) => Ok(()),
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                log::info!("[gpu] surface lost; reconfiguring");
                self.surface.configure(&self.device, &self.config);
                Ok(())
            }
            Err(wgpu::SurfaceError::OutOfMemory) => {
                self.out_of_memory = true;
                Err(anyhow::anyhow!("GPU out of memory"))
            }
            Err(e) => Err(anyhow::anyhow!("surface error: {e:?}")),
        }
    }
}

fn create_depth_view(device: &wgpu::Device, width: u32, height: u32) -> wgpu::TextureView {
    let tex = device.create_texture(&wgpu::TextureDescriptor {
        label: Some("depth"),
        size: wgpu::Extent3d {
            width,
            height,
            depth_or_array_layers: 1,
        },
        mip_level_count: 1,
        sample_count: 1,
        dimension: wgpu::TextureDimension::D2,
        format: DEPTH_FORMAT,
        usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
        view_formats: &[],
    });
    tex.create_view(&wgpu::TextureViewDescriptor::default())
}

fn object_uniforms(mesh: &Mesh) -> ObjectUniforms {
    let model = mesh.transform.matrix();
    let normal_matrix = model.inverse().transpose();
    let rgb = srgb_to_linear(mesh.material.rgb());
    let opacity = match mesh.material.kind {
        MaterialKind::Standard => 1.0,
        MaterialKind::ShadowCatcher { opacity } => opacity,
    };
    ObjectUniforms {
        model: model.to_cols_array_2d(),
        normal_matrix: if normal_matrix.is_finite() {
            normal_matrix.to_cols_array_2d()
        } else {
            Mat4::IDENTITY.to_cols_array_2d()
        },
        color: [rgb[0], rgb[1], rgb[2], opacity],
        params: [mesh.material.metalness, mesh.material.roughness, 0.0, 0.0],
    }
}

#[inline]
fn srgb_to_linear(c: [f32; 3]) -> [f32; 3] {
    c.map(|v| {
        if v <= 0.04045 {
            v / 12.92
        } else {
            ((v + 0.055) / 1.055).powf(2.4)
        }
    })
}
