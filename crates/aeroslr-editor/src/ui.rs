// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Stateless egui render helpers for the editor chrome: menu bar, modal
//! dialogs, toast overlay, style and fonts.

use crate::{
    core::{Modal, UiState},
    dock::PanelId,
    panels::kind_color,
    scene::RENAME_CAPACITY,
    ui_state::{IntentQueue, UiEvent},
};
use aeroslr_app_core::{prefs::ViewPrefs, toast::ToastRender};
use anyhow::{ensure, Context as _, Result};
use egui::{self, Color32, Context, FontFamily, FontId, TextStyle};
use std::sync::Arc;

const USER_FONT: &str = "user-font";
/// Behind open modals.
const MODAL_BACKDROP: Color32 = Color32::from_black_alpha(166);

pub fn draw_menu_bar(ctx: &Context, state: &UiState, fps: f32, intents: &mut IntentQueue) {
    egui::TopBottomPanel::top("main_menu_bar").show(ctx, |ui| {
        egui::MenuBar::new().ui(ui, |ui| {
            ui.menu_button("File", |ui| {
                if ui.button("Save Preferences").clicked() {
                    intents.push(UiEvent::SavePrefs);
                    ui.close();
                }
                ui.separator();
                if ui.button("Exit").clicked() {
                    intents.push(UiEvent::ExitClicked);
                    ui.close();
                }
            });
            ui.menu_button("Edit", |ui| {
                ui.add_enabled(false, egui::Button::new("Undo"));
                ui.add_enabled(false, egui::Button::new("Redo"));
                ui.separator();
                ui.add_enabled(false, egui::Button::new("Cut"));
                ui.add_enabled(false, egui::Button::new("Copy"));
                ui.add_enabled(false, egui::Button::new("Paste"));
            });
            ui.menu_button("Help", |ui| {
                if ui.button("About AeroSLR").clicked() {
                    intents.push(UiEvent::OpenAbout);
                    ui.close();
                }
            });
            ui.menu_button("Windows", |ui| {
                for panel in PanelId::TOGGLEABLE {
                    let mut shown = state.panel_visible(panel);
                    if ui.checkbox(&mut shown, panel.title()).changed() {
                        intents.push(UiEvent::TogglePanel(panel));
                    }
                }
            });
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                ui.label(format!("FPS: {fps:.1}"));
            });
        });
    });
}

/// Draw whichever modal is open. Escape and clicks outside close it.
pub fn draw_modals(ctx: &Context, state: &UiState, intents: &mut IntentQueue) {
    match &state.modal {
        Modal::None => {}
        Modal::About => {
            let modal = egui::Modal::new(egui::Id::new("about_modal"))
                .backdrop_color(MODAL_BACKDROP)
                .show(ctx, |ui| {
                    ui.heading("About AeroSLR");
                    ui.label(format!("AeroSLR v{}", env!("CARGO_PKG_VERSION")));
                    ui.separator();
                    ui.label("AeroSLR (Simple, Lightweight Renderer)");
                    ui.add_space(6.0);
                    ui.strong("Technologies");
                    ui.label("Written in - Rust");
                    ui.label("UI Framework - egui");
                    ui.label("Graphics API - wgpu");
                    ui.separator();
                    ui.button("Close").clicked()
                });
            if modal.inner || modal.should_close() {
                intents.push(UiEvent::CloseAbout);
            }
        }
        Modal::Rename(edit) => {
            let modal = egui::Modal::new(egui::Id::new("rename_modal"))
                .backdrop_color(MODAL_BACKDROP)
                .show(ctx, |ui| {
                    ui.heading(edit.title());
                    ui.separator();
                    let mut text = edit.buffer.clone();
                    let field = ui.add(
                        egui::TextEdit::singleline(&mut text)
                            .char_limit(RENAME_CAPACITY)
                            .id(egui::Id::new("rename_field")),
                    );
                    if ui.memory(|m| m.focused().is_none()) {
                        field.request_focus();
                    }
                    if text != edit.buffer {
                        intents.push(UiEvent::RenameTextChanged(text));
                    }
                    ui.separator();
                    let enter = ui.input(|i| i.key_pressed(egui::Key::Enter));
                    ui.horizontal(|ui| {
                        let ok = ui.button("OK").clicked();
                        let cancel = ui.button("Cancel").clicked();
                        (ok || enter, cancel)
                    })
                    .inner
                });
            let (commit, cancel) = modal.inner;
            if commit {
                intents.push(UiEvent::CommitRename);
            } else if cancel || modal.should_close() {
                intents.push(UiEvent::CancelRename);
            }
        }
    }
}

pub fn draw_toasts(ctx: &Context, toasts: &[ToastRender]) {
    if toasts.is_empty() {
        return;
    }
    egui::Area::new("toasts".into())
        .anchor(egui::Align2::RIGHT_BOTTOM, egui::vec2(-12.0, -12.0))
        .order(egui::Order::Foreground)
        .show(ctx, |ui| {
            for t in toasts {
                egui::Frame::popup(ui.style())
                    .multiply_with_opacity(t.progress.clamp(0.3, 1.0))
                    .show(ui, |ui| {
                        ui.colored_label(kind_color(t.kind), &t.title);
                        if let Some(body) = &t.body {
                            ui.label(body);
                        }
                    });
            }
        });
}

/// Dark theme with the editor's panel and modal colors.
pub fn apply_style(ctx: &Context) {
    ctx.set_theme(egui::Theme::Dark);
    let mut visuals = egui::Visuals::dark();
    visuals.window_fill = gray(0.10, 1.0);
    visuals.panel_fill = gray(0.12, 1.0);
    visuals.extreme_bg_color = gray(0.08, 1.0);
    visuals.faint_bg_color = gray(0.14, 1.0);
    visuals.window_shadow = egui::Shadow::NONE;
    visuals.popup_shadow = egui::Shadow::NONE;
    ctx.set_visuals(visuals);
}

fn gray(level: f32, alpha: f32) -> Color32 {
    let v = (level * 255.0).round() as u8;
    Color32::from_rgba_unmultiplied(v, v, v, (alpha * 255.0).round() as u8)
}

/// Apply the configured font size and, when set, load the font file as the
/// primary proportional face. On error the built-in fonts stay in place.
pub fn install_fonts(ctx: &Context, view: &ViewPrefs) -> Result<()> {
    let size = view.clamped_font_size();
    ctx.style_mut(|style| {
        style.text_styles = [
            (TextStyle::Small, FontId::new(size * 0.75, FontFamily::Proportional)),
            (TextStyle::Body, FontId::new(size, FontFamily::Proportional)),
            (TextStyle::Button, FontId::new(size, FontFamily::Proportional)),
            (TextStyle::Heading, FontId::new(size * 1.4, FontFamily::Proportional)),
            (TextStyle::Monospace, FontId::new(size, FontFamily::Monospace)),
        ]
        .into();
    });

    let Some(path) = view.font_path.as_deref() else {
        return Ok(());
    };
    let bytes = std::fs::read(path).with_context(|| format!("reading font {path}"))?;
    ensure!(looks_like_font(&bytes), "{path} is not a TrueType/OpenType font");
    let mut fonts = egui::FontDefinitions::default();
    fonts.font_data.insert(
        USER_FONT.to_owned(),
        Arc::new(egui::FontData::from_owned(bytes)),
    );
    fonts
        .families
        .entry(FontFamily::Proportional)
        .or_default()
        .insert(0, USER_FONT.to_owned());
    ctx.set_fonts(fonts);
    tracing::info!(path, size, "loaded UI font");
    Ok(())
}

/// Check the sfnt header tag; egui cannot recover from unparsable font data.
pub fn looks_like_font(bytes: &[u8]) -> bool {
    matches!(
        bytes.get(..4),
        Some([0x00, 0x01, 0x00, 0x00] | b"OTTO" | b"true" | b"ttcf")
    )
}
