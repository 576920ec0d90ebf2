// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Contents of the six docked panels, driven by egui_tiles.

use crate::{
    canvas::DeviceRect,
    core::UiState,
    dock::PanelId,
    scene::ObjectKind,
    ui_state::{IntentQueue, UiEvent},
};
use aeroslr_app_core::toast::{Toast, ToastKind};
use egui::{Color32, Rect, Sense, Stroke, StrokeKind};
use egui_tiles::{SimplificationOptions, TileId, UiResponse};

const CANVAS_FILL: Color32 = Color32::from_rgb(50, 50, 50);

/// Per-frame facts shown in the panels.
#[derive(Clone, Copy, Debug, Default)]
pub struct FrameStats {
    pub fps: f32,
    /// Device rect the scene was drawn into last frame.
    pub device_rect: Option<DeviceRect>,
}

pub struct EditorBehavior<'a> {
    pub state: &'a UiState,
    pub intents: &'a mut IntentQueue,
    pub console: &'a [Toast],
    pub stats: FrameStats,
    /// Canvas rect claimed by the Viewport panel this frame.
    pub canvas: Option<Rect>,
}

impl<'a> EditorBehavior<'a> {
    pub fn new(
        state: &'a UiState,
        intents: &'a mut IntentQueue,
        console: &'a [Toast],
        stats: FrameStats,
    ) -> Self {
        Self {
            state,
            intents,
            console,
            stats,
            canvas: None,
        }
    }

    fn scene_hierarchy(&mut self, ui: &mut egui::Ui) {
        let state = self.state;
        ui.menu_button("Add...", |ui| {
            ui.label("Select an object to add:");
            ui.separator();
            for kind in ObjectKind::ALL {
                if ui.button(kind.label()).clicked() {
                    self.intents.push(UiEvent::AddObject(kind));
                    ui.close();
                }
            }
        });
        ui.separator();

        if state.scene.is_empty() {
            ui.weak("No objects. Use Add... to create one.");
            return;
        }
        egui::ScrollArea::vertical().show(ui, |ui| {
            for (i, obj) in state.scene.iter().enumerate() {
                ui.push_id(obj.id.0, |ui| {
                    let selected = state.selection == Some(i);
                    let row = ui.selectable_label(selected, &obj.name);
                    if row.clicked() {
                        self.intents.push(UiEvent::Select(i));
                    }
                    row.context_menu(|ui| {
                        ui.label(&obj.name);
                        ui.separator();
                        if ui.button("Rename").clicked() {
                            self.intents.push(UiEvent::RequestRename(i));
                            ui.close();
                        }
                        if ui.button("Duplicate").clicked() {
                            self.intents.push(UiEvent::DuplicateObject(i));
                            ui.close();
                        }
                        if ui.button("Delete").clicked() {
                            self.intents.push(UiEvent::DeleteObject(i));
                            ui.close();
                        }
                    });
                });
            }
        });
    }

    fn console(&self, ui: &mut egui::Ui) {
        if self.console.is_empty() {
            ui.weak("No messages yet.");
            return;
        }
        egui::ScrollArea::vertical()
            .stick_to_bottom(true)
            .show(ui, |ui| {
                for entry in self.console {
                    let color = kind_color(entry.kind);
                    let line = match &entry.body {
                        Some(body) => format!("[{}] {}: {body}", entry.kind.tag(), entry.title),
                        None => format!("[{}] {}", entry.kind.tag(), entry.title),
                    };
                    ui.colored_label(color, line);
                }
            });
    }

    fn inspector(&self, ui: &mut egui::Ui) {
        let selected = self
            .state
            .selection
            .and_then(|i| self.state.scene.get(i));
        let Some(obj) = selected else {
            ui.weak("Nothing selected.");
            return;
        };
        egui::Grid::new("inspector_grid")
            .num_columns(2)
            .striped(true)
            .show(ui, |ui| {
                ui.label("Name");
                ui.label(&obj.name);
                ui.end_row();
                ui.label("Kind");
                ui.label(obj.kind.label());
                ui.end_row();
                ui.label("Id");
                ui.label(obj.id.to_string());
                ui.end_row();
            });
    }

    fn properties(&self, ui: &mut egui::Ui) {
        let view = &self.state.view;
        egui::Grid::new("properties_grid")
            .num_columns(2)
            .striped(true)
            .show(ui, |ui| {
                ui.label("Render target");
                match self.stats.device_rect {
                    Some(r) => ui.label(format!("{} x {} px at ({}, {})", r.w, r.h, r.x, r.y)),
                    None => ui.weak("not drawn"),
                };
                ui.end_row();
                ui.label("Mode");
                ui.label(if view.wireframe { "Wireframe" } else { "Solid" });
                ui.end_row();
                ui.label("VSync");
                ui.label(if view.vsync { "On" } else { "Off" });
                ui.end_row();
                for kind in ObjectKind::ALL {
                    ui.label(format!("{kind}s"));
                    ui.label(self.state.scene.count_of(kind).to_string());
                    ui.end_row();
                }
                ui.label("FPS");
                ui.label(format!("{:.1}", self.stats.fps));
                ui.end_row();
            });
    }

    fn viewport_toolbar(&mut self, ui: &mut egui::Ui) {
        ui.horizontal_centered(|ui| {
            if ui.button("Wireframe View").clicked() {
                self.intents.push(UiEvent::SetWireframe(true));
            }
            if ui.button("Solid View").clicked() {
                self.intents.push(UiEvent::SetWireframe(false));
            }
            ui.separator();
            let mut vsync = self.state.view.vsync;
            if ui.checkbox(&mut vsync, "VSync").changed() {
                self.intents.push(UiEvent::SetVsync(vsync));
            }
        });
    }

    fn viewport(&mut self, ui: &mut egui::Ui) {
        let pos = ui.cursor().min;
        let size = ui.available_size();
        ui.label(format!("Canvas pos: {:.1}, {:.1}", pos.x, pos.y));
        ui.label(format!("Canvas size: {:.1} x {:.1}", size.x, size.y));
        ui.label(format!("Object count: {}", self.state.scene.len()));

        let rect = ui.available_rect_before_wrap();
        if rect.width() > 0.0 && rect.height() > 0.0 {
            let painter = ui.painter();
            painter.rect_filled(rect, 0.0, CANVAS_FILL);
            painter.rect_stroke(rect, 0.0, Stroke::new(1.0, Color32::WHITE), StrokeKind::Inside);
            ui.allocate_rect(rect, Sense::hover());
            self.canvas = Some(rect);
        } else {
            ui.label(format!(
                "Canvas too small: {:.1} x {:.1}",
                rect.width(),
                rect.height()
            ));
        }
    }
}

impl egui_tiles::Behavior<PanelId> for EditorBehavior<'_> {
    fn pane_ui(&mut self, ui: &mut egui::Ui, _tile_id: TileId, pane: &mut PanelId) -> UiResponse {
        egui::Frame::new().inner_margin(6.0).show(ui, |ui| match *pane {
            PanelId::SceneHierarchy => self.scene_hierarchy(ui),
            PanelId::Console => self.console(ui),
            PanelId::Inspector => self.inspector(ui),
            PanelId::Properties => self.properties(ui),
            PanelId::ViewportToolbar => self.viewport_toolbar(ui),
            PanelId::Viewport => self.viewport(ui),
        });
        UiResponse::None
    }

    fn tab_title_for_pane(&mut self, pane: &PanelId) -> egui::WidgetText {
        pane.title().into()
    }

    fn simplification_options(&self) -> SimplificationOptions {
        // Keep single-pane tab containers: they carry the panel title bar.
        SimplificationOptions {
            prune_single_child_tabs: false,
            all_panes_must_have_tabs: false,
            ..SimplificationOptions::default()
        }
    }
}

pub fn kind_color(kind: ToastKind) -> Color32 {
    match kind {
        ToastKind::Info => Color32::from_rgb(170, 200, 255),
        ToastKind::Warn => Color32::from_rgb(255, 200, 90),
        ToastKind::Error => Color32::from_rgb(255, 110, 110),
    }
}
