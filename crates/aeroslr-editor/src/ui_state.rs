// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Pure state transitions for the editor UI (scene edits, dialogs, panel
//! toggles, menu actions).
//!
//! Panels never mutate [`UiState`] while drawing. They push [`UiEvent`]s
//! into an [`IntentQueue`], which the app drains through [`reduce`] once
//! the UI pass has finished. A delete clicked halfway through the
//! hierarchy list therefore never shifts rows that are still being drawn,
//! and a dialog requested from a context menu opens on the next frame.

use crate::core::{Modal, UiState};
use crate::dock::PanelId;
use crate::scene::{retarget_after_delete, ObjectKind, RenameEdit};

#[derive(Debug, Clone, PartialEq)]
pub enum UiEvent {
    AddObject(ObjectKind),
    DuplicateObject(usize),
    DeleteObject(usize),
    Select(usize),
    RequestRename(usize),
    RenameTextChanged(String),
    CommitRename,
    CancelRename,
    OpenAbout,
    CloseAbout,
    TogglePanel(PanelId),
    SetWireframe(bool),
    SetVsync(bool),
    SavePrefs,
    ExitClicked,
    ShutdownRequested,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiEffect {
    SavePrefs,
    QuitApp,
}

/// Intents recorded during one UI pass.
#[derive(Debug, Default)]
pub struct IntentQueue {
    events: Vec<UiEvent>,
}

impl IntentQueue {
    pub fn push(&mut self, ev: UiEvent) {
        self.events.push(ev);
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Drop intents recorded by a discarded egui pass.
    pub fn clear(&mut self) {
        self.events.clear();
    }

    /// Take every queued intent in push order.
    pub fn take(&mut self) -> Vec<UiEvent> {
        std::mem::take(&mut self.events)
    }
}

pub fn reduce(ui: &UiState, ev: UiEvent) -> (UiState, Vec<UiEffect>) {
    let mut next = ui.clone();
    let mut fx = Vec::new();
    match ev {
        UiEvent::AddObject(kind) => {
            next.scene.add(kind);
        }
        UiEvent::DuplicateObject(i) => {
            next.scene.duplicate(i);
        }
        UiEvent::DeleteObject(i) => {
            if next.scene.delete(i).is_some() {
                next.selection = retarget_after_delete(next.selection, i);
                if let Modal::Rename(edit) = &mut next.modal {
                    edit.target = retarget_after_delete(edit.target, i);
                    if edit.target.is_none() {
                        next.modal = Modal::None;
                    }
                }
            }
        }
        UiEvent::Select(i) => {
            if i < next.scene.len() {
                next.selection = Some(i);
            }
        }
        UiEvent::RequestRename(i) => {
            if let Some(obj) = next.scene.get(i) {
                next.modal = Modal::Rename(RenameEdit::new(i, obj));
            }
        }
        UiEvent::RenameTextChanged(text) => {
            if let Modal::Rename(edit) = &mut next.modal {
                edit.buffer = text;
                edit.enforce_capacity();
            }
        }
        UiEvent::CommitRename => {
            if let Modal::Rename(edit) = &next.modal {
                if let Some(target) = edit.target {
                    let name = edit.buffer.clone();
                    next.scene.rename(target, &name);
                }
                next.modal = Modal::None;
            }
        }
        UiEvent::CancelRename => {
            if matches!(next.modal, Modal::Rename(_)) {
                next.modal = Modal::None;
            }
        }
        UiEvent::OpenAbout => next.modal = Modal::About,
        UiEvent::CloseAbout => {
            if next.modal == Modal::About {
                next.modal = Modal::None;
            }
        }
        UiEvent::TogglePanel(panel) => {
            if let Some(flag) = next.panel_flag_mut(panel) {
                *flag = !*flag;
            }
        }
        UiEvent::SetWireframe(on) => next.view.wireframe = on,
        UiEvent::SetVsync(on) => next.view.vsync = on,
        UiEvent::SavePrefs => fx.push(UiEffect::SavePrefs),
        UiEvent::ExitClicked => fx.push(UiEffect::QuitApp),
        UiEvent::ShutdownRequested => {
            // handled by App; no state change needed here
        }
    }
    (next, fx)
}
