// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Saved editor preferences (panel visibility + view toggles).
//!
//! Every struct carries `#[serde(default)]` so files written by older builds,
//! or edited by hand, still load with the missing fields defaulted.

use serde::{Deserialize, Serialize};

/// Config key the editor stores its preferences under.
pub const EDITOR_PREFS_KEY: &str = "editor_prefs";

/// Smallest accepted UI font size in points.
pub const MIN_FONT_SIZE: f32 = 8.0;
/// Largest accepted UI font size in points.
pub const MAX_FONT_SIZE: f32 = 48.0;

/// Saved preferences for the editor window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct EditorPrefs {
    /// Which dockable panels are shown.
    pub panels: PanelPrefs,
    /// Viewport and text rendering options.
    pub view: ViewPrefs,
}

/// Visibility of the toggleable panels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PanelPrefs {
    /// "Scene Hierarchy" panel.
    pub scene_hierarchy: bool,
    /// "Console" panel.
    pub console: bool,
    /// "Inspector" panel.
    pub inspector: bool,
    /// "Properties" panel.
    pub properties: bool,
    /// "Viewport" panel.
    pub viewport: bool,
}

impl Default for PanelPrefs {
    fn default() -> Self {
        Self {
            scene_hierarchy: true,
            console: true,
            inspector: true,
            properties: true,
            viewport: true,
        }
    }
}

/// Viewport and text options.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewPrefs {
    /// Draw scene primitives as outlines.
    pub wireframe: bool,
    /// Present in vsync mode.
    pub vsync: bool,
    /// Optional TTF/OTF file to use as the primary UI font.
    pub font_path: Option<String>,
    /// Base UI font size in points.
    pub font_size: f32,
}

impl Default for ViewPrefs {
    fn default() -> Self {
        Self {
            wireframe: false,
            vsync: true,
            font_path: None,
            font_size: 16.0,
        }
    }
}

impl ViewPrefs {
    /// Font size clamped to the accepted range; non-finite values fall back
    /// to the default size.
    pub fn clamped_font_size(&self) -> f32 {
        if self.font_size.is_finite() {
            self.font_size.clamp(MIN_FONT_SIZE, MAX_FONT_SIZE)
        } else {
            Self::default().font_size
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn font_size_is_clamped_and_sanitized() {
        let mut view = ViewPrefs {
            font_size: 200.0,
            ..ViewPrefs::default()
        };
        approx::assert_relative_eq!(view.clamped_font_size(), MAX_FONT_SIZE);
        view.font_size = 1.0;
        approx::assert_relative_eq!(view.clamped_font_size(), MIN_FONT_SIZE);
        view.font_size = f32::NAN;
        approx::assert_relative_eq!(view.clamped_font_size(), 16.0);
    }

    #[test]
    fn defaults_show_every_panel() {
        let panels = PanelPrefs::default();
        assert!(panels.scene_hierarchy && panels.console && panels.inspector);
        assert!(panels.properties && panels.viewport);
    }
}
