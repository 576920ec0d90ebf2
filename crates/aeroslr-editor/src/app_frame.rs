// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Per-frame tick: build the docked UI, map the viewport canvas, draw, present.

use crate::{
    app::App,
    canvas::{map_canvas, SurfaceMapping},
    dock::PanelId,
    panels::{EditorBehavior, FrameStats},
    render::{self, SceneDraw},
    scene::ObjectKind,
    ui::{draw_menu_bar, draw_modals, draw_toasts},
};
use aeroslr_app_core::{render_port::RenderPort, toast::Toast};
use std::time::Instant;

impl App {
    pub fn frame(&mut self) {
        let Some(vp) = self.viewports.first_mut() else {
            return;
        };
        let win = vp.window;
        let raw_input = vp.egui_state.take_egui_input(win);
        let display = raw_input.screen_rect.map(|r| r.size());

        let now = Instant::now();
        self.fps.tick(now);
        self.toasts.retain_visible(now);
        let visible_toasts = self.toasts.visible(now);
        let console: Vec<Toast> = self.toasts.history().cloned().collect();
        let stats = FrameStats {
            fps: self.fps.fps(),
            device_rect: self.last_device_rect,
        };
        let prev_vsync = self.ui.view.vsync;

        let state = &self.ui;
        let intents = &mut self.intents;
        let layout = &mut self.layout;
        let mut canvas = None;
        let egui_ctx = self.egui_ctx.clone();
        let full_output = egui_ctx.run(raw_input, |ctx| {
            // A discarded pass must not leave clicks behind.
            intents.clear();
            canvas = None;
            draw_menu_bar(ctx, state, stats.fps, intents);
            egui::CentralPanel::default()
                .frame(egui::Frame::NONE)
                .show(ctx, |ui| {
                    let Some(dock) = layout.ensure_built(ui.available_size()) else {
                        return;
                    };
                    dock.sync_visibility(|panel| state.panel_visible(panel));
                    let mut behavior = EditorBehavior::new(state, intents, &console, stats);
                    dock.tree.ui(&mut behavior, ui);
                    canvas = behavior.canvas;
                });
            draw_modals(ctx, state, intents);
            draw_toasts(ctx, &visible_toasts);
        });

        if let Some(vp) = self.viewports.first_mut() {
            vp.egui_state
                .handle_platform_output(win, full_output.platform_output);
        }

        self.drain_intents();

        let Some(vp) = self.viewports.first_mut() else {
            return;
        };
        if self.ui.view.vsync != prev_vsync {
            vp.gpu.set_vsync(self.ui.view.vsync);
        }

        let pixels_per_point = full_output.pixels_per_point;
        let paint_jobs = self
            .egui_ctx
            .tessellate(full_output.shapes, pixels_per_point);
        let textures_delta = full_output.textures_delta;
        let framebuffer = [vp.gpu.config.width, vp.gpu.config.height];
        let screen_desc = egui_wgpu::ScreenDescriptor {
            size_in_pixels: framebuffer,
            pixels_per_point,
        };

        let scene = canvas
            .filter(|_| self.ui.panel_visible(PanelId::Viewport))
            .and_then(|rect| {
                let mapping = SurfaceMapping {
                    origin: egui::Pos2::ZERO,
                    display: display.unwrap_or_else(|| {
                        egui::vec2(framebuffer[0] as f32, framebuffer[1] as f32)
                            / pixels_per_point
                    }),
                    framebuffer,
                };
                map_canvas(rect, &mapping)
            })
            .map(|rect| SceneDraw {
                rect,
                seconds: self.started.elapsed().as_secs_f32(),
                wireframe: self.ui.view.wireframe,
                counts: ObjectKind::ALL
                    .into_iter()
                    .map(|kind| {
                        let n = self.ui.scene.count_of(kind);
                        (kind, u32::try_from(n).unwrap_or(u32::MAX))
                    })
                    .collect(),
            });
        self.last_device_rect = scene.as_ref().map(|s| s.rect);

        match render::render_frame(vp, scene.as_ref(), paint_jobs, textures_delta, screen_desc) {
            Ok(out) => {
                if out.presented {
                    vp.render_port.request_redraw();
                }
            }
            Err(err) => self.fail(err.context("rendering frame")),
        }
    }
}
