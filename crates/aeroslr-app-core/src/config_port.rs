// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Config port consumed by the editor UI.

use crate::config::{ConfigService, ConfigStore};
use crate::prefs::{EditorPrefs, EDITOR_PREFS_KEY};

/// Config-facing port for loading/saving editor preferences.
pub trait ConfigPort {
    /// Load editor preferences (returns None if missing or unreadable).
    fn load_prefs(&self) -> Option<EditorPrefs>;
    /// Persist editor preferences. Returns `false` when the write failed;
    /// the failure itself is logged by the implementation.
    fn save_prefs(&self, prefs: &EditorPrefs) -> bool;
}

impl<S> ConfigPort for ConfigService<S>
where
    S: ConfigStore,
{
    fn load_prefs(&self) -> Option<EditorPrefs> {
        match self.load::<EditorPrefs>(EDITOR_PREFS_KEY) {
            Ok(prefs) => prefs,
            Err(err) => {
                tracing::warn!(%err, "editor prefs unreadable; using defaults");
                None
            }
        }
    }

    fn save_prefs(&self, prefs: &EditorPrefs) -> bool {
        match self.save(EDITOR_PREFS_KEY, prefs) {
            Ok(()) => {
                tracing::info!("editor prefs saved");
                true
            }
            Err(err) => {
                tracing::warn!(%err, "failed to save editor prefs");
                false
            }
        }
    }
}
