// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Port trait for UI/adapter layers to drive the window surface without
//! depending on a specific windowing crate.

/// Minimal surface port; implementations forward to the windowing layer.
pub trait RenderPort {
    /// Request a redraw of the main surface/window.
    fn request_redraw(&self);
    /// Whether the surface is currently minimized (iconified). Surfaces that
    /// cannot tell report `false`.
    fn is_minimized(&self) -> bool;
}
