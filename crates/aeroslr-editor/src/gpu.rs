// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! GPU setup and resources for the editor: surface, the two primitive
//! meshes, one uniform block and the solid/wireframe scene pipelines.

use crate::scene::ObjectKind;
use anyhow::{bail, Context, Result};
use egui_wgpu::wgpu;
use egui_winit::winit::dpi::PhysicalSize;
use egui_winit::winit::window::Window;
use wgpu::util::DeviceExt;

/// Background behind the whole UI.
pub const CLEAR_COLOR: wgpu::Color = wgpu::Color {
    r: 0.08,
    g: 0.08,
    b: 0.09,
    a: 1.0,
};
/// Scene primitives are flat opaque white.
pub const PRIMITIVE_COLOR: [f32; 4] = [1.0, 1.0, 1.0, 1.0];

#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Vertex {
    pub pos: [f32; 3],
}

#[repr(C)]
#[derive(Clone, Copy, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Globals {
    pub mvp: [[f32; 4]; 4],
    pub color: [f32; 4],
}

pub struct Mesh {
    pub vbuf: wgpu::Buffer,
    pub count: u32,
}

pub struct Pipelines {
    pub solid: wgpu::RenderPipeline,
    /// Absent when the adapter lacks `POLYGON_MODE_LINE`.
    pub wire: Option<wgpu::RenderPipeline>,
}

impl Pipelines {
    pub fn select(&self, wireframe: bool) -> &wgpu::RenderPipeline {
        match (&self.wire, wireframe) {
            (Some(wire), true) => wire,
            _ => &self.solid,
        }
    }
}

pub struct Gpu {
    pub surface: wgpu::Surface<'static>,
    pub device: wgpu::Device,
    pub queue: wgpu::Queue,
    pub config: wgpu::SurfaceConfiguration,
    pub pmode_fast: wgpu::PresentMode,
    pub pmode_vsync: wgpu::PresentMode,
    pub max_tex: u32,
    pub mesh_quad: Mesh,
    pub mesh_cube: Mesh,
    pub globals_buf: wgpu::Buffer,
    pub bind_group: wgpu::BindGroup,
    pub pipelines: Pipelines,
}

impl Gpu {
    pub async fn new(window: &'static Window, vsync: bool) -> Result<Self> {
        let instance = wgpu::Instance::default();
        let surface = instance
            .create_surface(window)
            .context("creating window surface")?;
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .context("no compatible GPU adapter")?;
        let info = adapter.get_info();
        tracing::info!(adapter = %info.name, backend = ?info.backend, "GPU adapter selected");

        let line_mode = adapter
            .features()
            .contains(wgpu::Features::POLYGON_MODE_LINE);
        if !line_mode {
            tracing::warn!("adapter lacks POLYGON_MODE_LINE; wireframe view falls back to solid");
        }
        let limits = adapter.limits();
        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor {
                label: Some("aeroslr-device"),
                required_features: if line_mode {
                    wgpu::Features::POLYGON_MODE_LINE
                } else {
                    wgpu::Features::empty()
                },
                required_limits: wgpu::Limits::downlevel_defaults()
                    .using_resolution(limits.clone()),
                memory_hints: wgpu::MemoryHints::Performance,
                trace: wgpu::Trace::default(),
                experimental_features: wgpu::ExperimentalFeatures::disabled(),
            })
            .await
            .context("requesting GPU device")?;

        let size = window.inner_size();
        let caps = surface.get_capabilities(&adapter);
        let format = caps
            .formats
            .iter()
            .copied()
            .find(|f| f.is_srgb())
            .or_else(|| caps.formats.first().copied())
            .context("surface reports no texture formats")?;
        let pmode_fast = caps
            .present_modes
            .iter()
            .copied()
            .find(|m| {
                matches!(
                    m,
                    wgpu::PresentMode::Immediate | wgpu::PresentMode::AutoNoVsync
                )
            })
            .unwrap_or(wgpu::PresentMode::Fifo);
        let pmode_vsync = caps
            .present_modes
            .iter()
            .copied()
            .find(|m| matches!(m, wgpu::PresentMode::Fifo))
            .unwrap_or(pmode_fast);
        let max_dim = limits.max_texture_dimension_2d;
        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width: size.width.min(max_dim).max(1),
            height: size.height.min(max_dim).max(1),
            present_mode: if vsync { pmode_vsync } else { pmode_fast },
            alpha_mode: caps
                .alpha_modes
                .first()
                .copied()
                .unwrap_or(wgpu::CompositeAlphaMode::Auto),
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let mesh_quad = upload_mesh(&device, "quad_vb", &quad_vertices());
        let mesh_cube = upload_mesh(&device, "cube_vb", &cube_vertices());

        let globals_buf = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("globals"),
            size: std::mem::size_of::<Globals>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let globals_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("globals_layout"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: None,
                },
                count: None,
            }],
        });
        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("globals_bg"),
            layout: &globals_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: globals_buf.as_entire_binding(),
            }],
        });

        // Shader compile and pipeline link errors surface through the scope
        // instead of the default uncaptured-error panic.
        device.push_error_scope(wgpu::ErrorFilter::Validation);
        let shader = device.create_shader_module(wgpu::include_wgsl!("shader_scene.wgsl"));
        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("scene_pipeline_layout"),
            bind_group_layouts: &[&globals_layout],
            push_constant_ranges: &[],
        });
        let solid = scene_pipeline(
            &device,
            &pipeline_layout,
            &shader,
            format,
            wgpu::PolygonMode::Fill,
            "scene_solid_pipeline",
        );
        let wire = line_mode.then(|| {
            scene_pipeline(
                &device,
                &pipeline_layout,
                &shader,
                format,
                wgpu::PolygonMode::Line,
                "scene_wire_pipeline",
            )
        });
        if let Some(err) = device.pop_error_scope().await {
            tracing::error!(%err, "scene shader or pipeline failed validation");
            bail!("scene shader or pipeline failed validation: {err}");
        }

        Ok(Self {
            surface,
            device,
            queue,
            config,
            pmode_fast,
            pmode_vsync,
            max_tex: max_dim,
            mesh_quad,
            mesh_cube,
            globals_buf,
            bind_group,
            pipelines: Pipelines { solid, wire },
        })
    }

    pub fn resize(&mut self, size: PhysicalSize<u32>) {
        if size.width == 0 || size.height == 0 {
            return;
        }
        self.config.width = size.width.min(self.max_tex);
        self.config.height = size.height.min(self.max_tex);
        self.surface.configure(&self.device, &self.config);
    }

    pub fn set_vsync(&mut self, on: bool) {
        let mode = if on {
            self.pmode_vsync
        } else {
            self.pmode_fast
        };
        if self.config.present_mode != mode {
            self.config.present_mode = mode;
            self.surface.configure(&self.device, &self.config);
        }
    }

    pub fn mesh(&self, kind: ObjectKind) -> &Mesh {
        match kind {
            ObjectKind::Triangle => &self.mesh_quad,
            ObjectKind::Cube => &self.mesh_cube,
        }
    }
}

// Helpers ------------------------------------------------------------

fn scene_pipeline(
    device: &wgpu::Device,
    layout: &wgpu::PipelineLayout,
    shader: &wgpu::ShaderModule,
    format: wgpu::TextureFormat,
    polygon_mode: wgpu::PolygonMode,
    label: &str,
) -> wgpu::RenderPipeline {
    device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some(label),
        layout: Some(layout),
        vertex: wgpu::VertexState {
            module: shader,
            entry_point: Some("vs_main"),
            compilation_options: Default::default(),
            buffers: &[wgpu::VertexBufferLayout {
                array_stride: std::mem::size_of::<Vertex>() as u64,
                step_mode: wgpu::VertexStepMode::Vertex,
                attributes: &wgpu::vertex_attr_array![0=>Float32x3],
            }],
        },
        fragment: Some(wgpu::FragmentState {
            module: shader,
            entry_point: Some("fs_main"),
            compilation_options: Default::default(),
            targets: &[Some(wgpu::ColorTargetState {
                format,
                blend: Some(wgpu::BlendState::REPLACE),
                write_mask: wgpu::ColorWrites::ALL,
            })],
        }),
        primitive: wgpu::PrimitiveState {
            topology: wgpu::PrimitiveTopology::TriangleList,
            polygon_mode,
            cull_mode: None,
            ..Default::default()
        },
        depth_stencil: None,
        multisample: wgpu::MultisampleState::default(),
        multiview: None,
        cache: None,
    })
}

fn upload_mesh(device: &wgpu::Device, label: &str, verts: &[Vertex]) -> Mesh {
    let vbuf = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
        label: Some(label),
        contents: bytemuck::cast_slice(verts),
        usage: wgpu::BufferUsages::VERTEX,
    });
    Mesh {
        vbuf,
        count: verts.len() as u32,
    }
}

/// Two triangles covering the unit square in the z = 0 plane.
pub fn quad_vertices() -> [Vertex; 6] {
    let v = |x: f32, y: f32| Vertex { pos: [x, y, 0.0] };
    [
        v(0.5, 0.5),
        v(-0.5, -0.5),
        v(0.5, -0.5),
        v(-0.5, 0.5),
        v(-0.5, -0.5),
        v(0.5, 0.5),
    ]
}

/// Unit cube centered on the origin, 12 triangles, no index buffer.
pub fn cube_vertices() -> Vec<Vertex> {
    const CORNERS: [[f32; 3]; 8] = [
        [-0.5, -0.5, -0.5],
        [0.5, -0.5, -0.5],
        [0.5, 0.5, -0.5],
        [-0.5, 0.5, -0.5],
        [-0.5, -0.5, 0.5],
        [0.5, -0.5, 0.5],
        [0.5, 0.5, 0.5],
        [-0.5, 0.5, 0.5],
    ];
    const TRIS: [usize; 36] = [
        4, 5, 6, 6, 7, 4, // +z
        1, 0, 3, 3, 2, 1, // -z
        0, 4, 7, 7, 3, 0, // -x
        5, 1, 2, 2, 6, 5, // +x
        7, 6, 2, 2, 3, 7, // +y
        0, 1, 5, 5, 4, 0, // -y
    ];
    TRIS.iter().map(|&i| Vertex { pos: CORNERS[i] }).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quad_is_flat_and_spans_the_unit_square() {
        let quad = quad_vertices();
        assert!(quad.iter().all(|v| v.pos[2] == 0.0));
        for axis in 0..2 {
            let min = quad.iter().map(|v| v.pos[axis]).fold(f32::MAX, f32::min);
            let max = quad.iter().map(|v| v.pos[axis]).fold(f32::MIN, f32::max);
            approx::assert_relative_eq!(max - min, 1.0);
        }
    }

    #[test]
    fn cube_has_two_triangles_per_face() {
        let cube = cube_vertices();
        assert_eq!(cube.len(), 36);
        assert!(cube
            .iter()
            .all(|v| v.pos.iter().all(|c| c.abs() == 0.5)));
        // Each triangle lies on one face: some axis is constant across it.
        for tri in cube.chunks(3) {
            let on_face = (0..3).any(|axis| {
                tri.iter().all(|v| v.pos[axis] == tri[0].pos[axis])
            });
            assert!(on_face, "{tri:?}");
        }
    }

    #[test]
    fn globals_block_is_uniform_aligned() {
        assert_eq!(std::mem::size_of::<Globals>() % 16, 0);
    }
}
