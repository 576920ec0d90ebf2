// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Domain-level editor state: scene list, modal dialog, selection, panel
//! visibility and view toggles.

use crate::dock::PanelId;
use crate::scene::{ObjectKind, RenameEdit, SceneObjects};
use aeroslr_app_core::prefs::{EditorPrefs, PanelPrefs, ViewPrefs};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Modal {
    None,
    About,
    Rename(RenameEdit),
}

#[derive(Clone, Debug, PartialEq)]
pub struct UiState {
    pub scene: SceneObjects,
    pub modal: Modal,
    pub selection: Option<usize>,
    pub panels: PanelPrefs,
    pub view: ViewPrefs,
}

impl UiState {
    pub fn new() -> Self {
        Self::from_prefs(&EditorPrefs::default())
    }

    pub fn from_prefs(prefs: &EditorPrefs) -> Self {
        Self {
            scene: SceneObjects::with_default(ObjectKind::Triangle),
            modal: Modal::None,
            selection: None,
            panels: prefs.panels,
            view: prefs.view.clone(),
        }
    }

    pub fn export_prefs(&self) -> EditorPrefs {
        EditorPrefs {
            panels: self.panels,
            view: self.view.clone(),
        }
    }

    /// The toolbar has no menu toggle and is always shown.
    pub fn panel_visible(&self, panel: PanelId) -> bool {
        match panel {
            PanelId::SceneHierarchy => self.panels.scene_hierarchy,
            PanelId::Console => self.panels.console,
            PanelId::Inspector => self.panels.inspector,
            PanelId::Properties => self.panels.properties,
            PanelId::Viewport => self.panels.viewport,
            PanelId::ViewportToolbar => true,
        }
    }

    pub(crate) fn panel_flag_mut(&mut self, panel: PanelId) -> Option<&mut bool> {
        match panel {
            PanelId::SceneHierarchy => Some(&mut self.panels.scene_hierarchy),
            PanelId::Console => Some(&mut self.panels.console),
            PanelId::Inspector => Some(&mut self.panels.inspector),
            PanelId::Properties => Some(&mut self.panels.properties),
            PanelId::Viewport => Some(&mut self.panels.viewport),
            PanelId::ViewportToolbar => None,
        }
    }

    pub fn rename_edit(&self) -> Option<&RenameEdit> {
        match &self.modal {
            Modal::Rename(edit) => Some(edit),
            _ => None,
        }
    }
}

impl Default for UiState {
    fn default() -> Self {
        Self::new()
    }
}
