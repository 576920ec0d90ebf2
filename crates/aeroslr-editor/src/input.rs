// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Input handling: map winit window events into surface changes and UI events.

use crate::ui_state::UiEvent;
use egui_winit::winit::{dpi::PhysicalSize, event::WindowEvent};

#[derive(Debug, Default, PartialEq)]
pub struct InputOutcome {
    pub ui_event: Option<UiEvent>,
    /// New framebuffer size to configure the surface with.
    pub resize: Option<PhysicalSize<u32>>,
}

/// `inner_size` is the window's current size, used when only the scale
/// factor changed.
pub fn handle_window_event(event: &WindowEvent, inner_size: PhysicalSize<u32>) -> InputOutcome {
    let mut out = InputOutcome::default();
    match event {
        WindowEvent::CloseRequested => {
            out.ui_event = Some(UiEvent::ShutdownRequested);
        }
        WindowEvent::Resized(size) => {
            out.resize = Some(*size);
        }
        WindowEvent::ScaleFactorChanged { .. } => {
            out.resize = Some(inner_size);
        }
        _ => {}
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn close_request_becomes_shutdown() {
        let out = handle_window_event(&WindowEvent::CloseRequested, PhysicalSize::new(10, 10));
        assert_eq!(out.ui_event, Some(UiEvent::ShutdownRequested));
        assert_eq!(out.resize, None);
    }

    #[test]
    fn resize_carries_the_new_size() {
        let out = handle_window_event(
            &WindowEvent::Resized(PhysicalSize::new(1280, 720)),
            PhysicalSize::new(10, 10),
        );
        assert_eq!(out.resize, Some(PhysicalSize::new(1280, 720)));
        assert_eq!(out.ui_event, None);
    }

    #[test]
    fn unrelated_events_do_nothing() {
        let out = handle_window_event(&WindowEvent::Focused(true), PhysicalSize::new(10, 10));
        assert_eq!(out, InputOutcome::default());
    }
}
