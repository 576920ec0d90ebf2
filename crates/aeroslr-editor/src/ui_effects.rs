// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Effect runner for UiEffect -> concrete ports; includes a simple fake for tests.

use crate::core::UiState;
use crate::ui_state::{UiEffect, UiEvent};
use aeroslr_app_core::config_port::ConfigPort;
use aeroslr_app_core::toast::{ToastKind, ToastService};
use std::time::{Duration, Instant};

pub trait UiEffectsRunner {
    /// Run effects, possibly emitting follow-up events.
    fn run(
        &mut self,
        effects: Vec<UiEffect>,
        ui_state: &UiState,
        config: Option<&dyn ConfigPort>,
        toasts: &mut ToastService,
    ) -> Vec<UiEvent>;
}

pub struct RealEffectsRunner;

impl UiEffectsRunner for RealEffectsRunner {
    fn run(
        &mut self,
        effects: Vec<UiEffect>,
        ui_state: &UiState,
        config: Option<&dyn ConfigPort>,
        toasts: &mut ToastService,
    ) -> Vec<UiEvent> {
        let mut followups = Vec::new();
        for eff in effects {
            match eff {
                UiEffect::SavePrefs => {
                    let saved = config.is_some_and(|cfg| cfg.save_prefs(&ui_state.export_prefs()));
                    let (kind, title) = if saved {
                        (ToastKind::Info, "Preferences saved")
                    } else {
                        (ToastKind::Warn, "Preferences not saved")
                    };
                    let body = (!saved).then(|| {
                        if config.is_some() {
                            String::from("Writing the config file failed; see the log")
                        } else {
                            String::from("No config store is available this session")
                        }
                    });
                    toasts.push(kind, title, body, Duration::from_secs(4), Instant::now());
                }
                UiEffect::QuitApp => {
                    followups.push(UiEvent::ShutdownRequested);
                }
            }
        }
        followups
    }
}

/// Test fake: records effects instead of touching ports.
#[cfg(test)]
#[derive(Default)]
pub struct FakeEffectsRunner {
    pub calls: Vec<UiEffect>,
}

#[cfg(test)]
impl UiEffectsRunner for FakeEffectsRunner {
    fn run(
        &mut self,
        effects: Vec<UiEffect>,
        _ui_state: &UiState,
        _config: Option<&dyn ConfigPort>,
        _toasts: &mut ToastService,
    ) -> Vec<UiEvent> {
        let mut followups = Vec::new();
        for eff in effects {
            if eff == UiEffect::QuitApp {
                followups.push(UiEvent::ShutdownRequested);
            }
            self.calls.push(eff);
        }
        followups
    }
}
