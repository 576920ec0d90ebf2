// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! aeroslr: docked editor shell with a live wgpu viewport. Main wires App into winit.

use anyhow::{Context as _, Result};
use egui_winit::winit::event_loop::EventLoop;

mod app;
mod app_events;
mod app_frame;
mod canvas;
mod core;
mod dock;
mod frame_loop;
mod gpu;
mod input;
mod panels;
mod perf;
mod render;
mod render_port;
mod scene;
mod ui;
mod ui_effects;
mod ui_state;
mod viewport;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_target(false)
        .without_time()
        .init();
    let event_loop = EventLoop::new().context("creating event loop")?;
    let mut app = app::App::new();
    event_loop.run_app(&mut app)?;
    app.take_fatal().map_or(Ok(()), Err)
}
