// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Render helper: draws the egui frame, then the scene primitives clipped
//! to the Viewport panel's canvas.

use crate::{
    canvas::DeviceRect,
    gpu::{Globals, CLEAR_COLOR, PRIMITIVE_COLOR},
    scene::ObjectKind,
    viewport::Viewport,
};
use anyhow::{bail, Result};
use egui_wgpu::wgpu;
use glam::{Mat4, Vec3};

/// Axis the primitives spin around, one radian per second.
pub const SPIN_AXIS: Vec3 = Vec3::new(0.6, 0.0, 1.0);
pub const CAMERA_DISTANCE: f32 = 2.0;
pub const FOV_Y_DEGREES: f32 = 45.0;
pub const Z_NEAR: f32 = 0.1;
pub const Z_FAR: f32 = 100.0;

/// Everything the scene pass needs for one frame.
#[derive(Clone, Debug, PartialEq)]
pub struct SceneDraw {
    pub rect: DeviceRect,
    pub seconds: f32,
    pub wireframe: bool,
    /// Instances to draw per primitive kind.
    pub counts: Vec<(ObjectKind, u32)>,
}

pub struct RenderOutputs {
    pub presented: bool,
}

pub fn model_view_projection(seconds: f32, aspect: f32) -> Mat4 {
    let model = Mat4::from_axis_angle(SPIN_AXIS.normalize(), seconds);
    let view = Mat4::from_translation(Vec3::new(0.0, 0.0, -CAMERA_DISTANCE));
    let proj = Mat4::perspective_rh(FOV_Y_DEGREES.to_radians(), aspect, Z_NEAR, Z_FAR);
    proj * view * model
}

/// Render UI and scene. Surface hiccups skip the frame; only an
/// out-of-memory surface is an error.
pub fn render_frame(
    vp: &mut Viewport,
    scene: Option<&SceneDraw>,
    paint_jobs: Vec<egui::epaint::ClippedPrimitive>,
    textures_delta: egui::TexturesDelta,
    screen_desc: egui_wgpu::ScreenDescriptor,
) -> Result<RenderOutputs> {
    let gpu = &mut vp.gpu;

    let frame = match gpu.surface.get_current_texture() {
        Ok(f) => f,
        Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
            gpu.resize(egui_winit::winit::dpi::PhysicalSize::new(
                gpu.config.width,
                gpu.config.height,
            ));
            match gpu.surface.get_current_texture() {
                Ok(f) => f,
                Err(err) => {
                    tracing::warn!(%err, "surface still unavailable after reconfigure");
                    return Ok(RenderOutputs { presented: false });
                }
            }
        }
        Err(wgpu::SurfaceError::OutOfMemory) => {
            tracing::error!("surface out of memory");
            bail!("surface out of memory");
        }
        Err(err) => {
            tracing::debug!(%err, "skipping frame");
            return Ok(RenderOutputs { presented: false });
        }
    };
    let view = frame
        .texture
        .create_view(&wgpu::TextureViewDescriptor::default());

    if let Some(scene) = scene {
        let globals = Globals {
            mvp: model_view_projection(scene.seconds, scene.rect.aspect()).to_cols_array_2d(),
            color: PRIMITIVE_COLOR,
        };
        gpu.queue
            .write_buffer(&gpu.globals_buf, 0, bytemuck::bytes_of(&globals));
    }

    let egui_renderer = &mut vp.egui_renderer;
    for (id, delta) in &textures_delta.set {
        egui_renderer.update_texture(&gpu.device, &gpu.queue, *id, delta);
    }

    let mut encoder = gpu
        .device
        .create_command_encoder(&wgpu::CommandEncoderDescriptor {
            label: Some("main-encoder"),
        });
    let user_cmds = egui_renderer.update_buffers(
        &gpu.device,
        &gpu.queue,
        &mut encoder,
        &paint_jobs,
        &screen_desc,
    );

    {
        let rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("egui"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: &view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Clear(CLEAR_COLOR),
                    store: wgpu::StoreOp::Store,
                },
                depth_slice: None,
            })],
            depth_stencil_attachment: None,
            occlusion_query_set: None,
            timestamp_writes: None,
        });
        let mut rpass = rpass.forget_lifetime();
        egui_renderer.render(&mut rpass, &paint_jobs, &screen_desc);
    }

    if let Some(scene) = scene {
        let fb_w = gpu.config.width;
        let fb_h = gpu.config.height;
        let clip = scene.rect.to_scissor(fb_h);

        let mut rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("scene"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: &view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Load,
                    store: wgpu::StoreOp::Store,
                },
                depth_slice: None,
            })],
            depth_stencil_attachment: None,
            occlusion_query_set: None,
            timestamp_writes: None,
        });
        rpass.set_viewport(
            clip.x as f32,
            clip.y as f32,
            clip.w as f32,
            clip.h as f32,
            0.0,
            1.0,
        );
        rpass.set_scissor_rect(clip.x, clip.y, clip.w, clip.h);
        rpass.set_pipeline(gpu.pipelines.select(scene.wireframe));
        rpass.set_bind_group(0, &gpu.bind_group, &[]);
        for (kind, instances) in &scene.counts {
            if *instances == 0 {
                continue;
            }
            let mesh = gpu.mesh(*kind);
            rpass.set_vertex_buffer(0, mesh.vbuf.slice(..));
            rpass.draw(0..mesh.count, 0..*instances);
        }
        rpass.set_viewport(0.0, 0.0, fb_w as f32, fb_h as f32, 0.0, 1.0);
        rpass.set_scissor_rect(0, 0, fb_w, fb_h);
    }

    for id in &textures_delta.free {
        egui_renderer.free_texture(id);
    }

    gpu.queue
        .submit(user_cmds.into_iter().chain(std::iter::once(encoder.finish())));
    frame.present();

    Ok(RenderOutputs { presented: true })
}
