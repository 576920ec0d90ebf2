// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Top-level application wiring and event loop handler.

use crate::{
    canvas::DeviceRect,
    core::UiState,
    dock::LayoutState,
    frame_loop::{plan_frame, FramePlan, LoopState},
    perf::FpsSampler,
    render_port::WinitRenderPort,
    ui,
    ui_effects::{self, UiEffectsRunner},
    ui_state::{self, IntentQueue},
    viewport::Viewport,
};
use aeroslr_app_core::{
    config::ConfigService,
    config_port::ConfigPort,
    render_port::RenderPort,
    toast::{ToastKind, ToastService},
};
use aeroslr_config_fs::FsConfigStore;
use anyhow::{Context as _, Result};
use egui_winit::winit::{
    application::ApplicationHandler,
    dpi::PhysicalSize,
    event::WindowEvent,
    event_loop::{ActiveEventLoop, ControlFlow},
    window::{Window, WindowAttributes},
};
use egui_winit::State as EguiWinitState;
use std::time::{Duration, Instant};

const WINDOW_TITLE: &str = "AeroSLR";
const WARN_TTL: Duration = Duration::from_secs(6);

pub struct App {
    pub viewports: Vec<Viewport>,
    pub egui_ctx: egui::Context,
    pub config: Option<Box<dyn ConfigPort>>,
    pub ui_runner: ui_effects::RealEffectsRunner,
    pub toasts: ToastService,
    pub ui: UiState,
    pub layout: LayoutState,
    pub intents: IntentQueue,
    pub loop_state: LoopState,
    pub fps: FpsSampler,
    /// Drives the primitive spin.
    pub started: Instant,
    /// Device rect of the last scene draw, shown in Properties.
    pub last_device_rect: Option<DeviceRect>,
    shutdown_requested: bool,
    fatal: Option<anyhow::Error>,
}

impl App {
    pub fn new() -> Self {
        let egui_ctx = egui::Context::default();
        let config = FsConfigStore::new()
            .map(ConfigService::new)
            .map(|svc| Box::new(svc) as Box<dyn ConfigPort>)
            .ok();
        let prefs = config
            .as_ref()
            .and_then(|c| c.load_prefs())
            .unwrap_or_default();
        let mut toasts = ToastService::new(8, 256);
        let now = Instant::now();
        if config.is_none() {
            tracing::warn!("config store unavailable; using default preferences");
            toasts.push(
                ToastKind::Warn,
                "Config store unavailable",
                String::from("No config directory; prefs won't persist this session"),
                WARN_TTL,
                now,
            );
        }

        ui::apply_style(&egui_ctx);
        if let Err(err) = ui::install_fonts(&egui_ctx, &prefs.view) {
            tracing::warn!("font not loaded, using built-in font: {err:#}");
            toasts.push(
                ToastKind::Warn,
                "Font not loaded",
                format!("{err:#}"),
                WARN_TTL,
                now,
            );
        }

        Self {
            viewports: Vec::new(),
            egui_ctx,
            config,
            ui_runner: ui_effects::RealEffectsRunner,
            toasts,
            ui: UiState::from_prefs(&prefs),
            layout: LayoutState::Pending,
            intents: IntentQueue::default(),
            loop_state: LoopState::Init,
            fps: FpsSampler::new(now),
            started: now,
            last_device_rect: None,
            shutdown_requested: false,
            fatal: None,
        }
    }

    pub fn apply_ui_event(&mut self, ev: ui_state::UiEvent) {
        if matches!(ev, ui_state::UiEvent::ShutdownRequested) {
            self.shutdown_requested = true;
        }
        let (next, effects) = ui_state::reduce(&self.ui, ev);
        self.ui = next;
        let followups = self.ui_runner.run(
            effects,
            &self.ui,
            self.config.as_deref(),
            &mut self.toasts,
        );
        for ev in followups {
            self.apply_ui_event(ev);
        }
    }

    /// Apply every intent recorded while building the UI, in order.
    pub fn drain_intents(&mut self) {
        for ev in self.intents.take() {
            self.apply_ui_event(ev);
        }
    }

    /// Record an unrecoverable error and stop the loop.
    pub(crate) fn fail(&mut self, err: anyhow::Error) {
        tracing::error!("{err:#}");
        self.fatal = Some(err);
        self.shutdown_requested = true;
    }

    /// The error that ended the event loop, if any.
    pub fn take_fatal(&mut self) -> Option<anyhow::Error> {
        self.fatal.take()
    }

    fn create_viewport(&self, event_loop: &ActiveEventLoop) -> Result<Viewport> {
        let mut attrs = WindowAttributes::default()
            .with_title(WINDOW_TITLE)
            .with_maximized(true)
            .with_visible(true);
        if let Some(monitor) = event_loop.primary_monitor() {
            let size: PhysicalSize<u32> = monitor.size();
            tracing::info!(
                monitor = monitor.name().as_deref().unwrap_or("unknown"),
                width = size.width,
                height = size.height,
                refresh_mhz = monitor.refresh_rate_millihertz(),
                "primary monitor"
            );
            attrs = attrs.with_inner_size(size);
        }
        let window = event_loop
            .create_window(attrs)
            .context("creating window")?;
        let window: &'static Window = Box::leak(Box::new(window));
        let gpu = pollster::block_on(crate::gpu::Gpu::new(window, self.ui.view.vsync))
            .context("initializing GPU")?;
        let egui_state = EguiWinitState::new(
            self.egui_ctx.clone(),
            egui::ViewportId::ROOT,
            event_loop,
            Some(window.scale_factor() as f32),
            None,
            Some(gpu.max_tex as usize),
        );
        let egui_renderer = egui_wgpu::Renderer::new(
            &gpu.device,
            gpu.config.format,
            egui_wgpu::RendererOptions::default(),
        );
        Ok(Viewport {
            window,
            gpu,
            egui_state,
            egui_renderer,
            render_port: WinitRenderPort::new(window),
        })
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if !self.viewports.is_empty() {
            return;
        }
        match self.create_viewport(event_loop) {
            Ok(vp) => {
                self.viewports.push(vp);
                self.loop_state = LoopState::Running;
                event_loop.set_control_flow(ControlFlow::Poll);
            }
            Err(err) => {
                self.fail(err);
                event_loop.exit();
            }
        }
    }

    fn window_event(
        &mut self,
        _event_loop: &ActiveEventLoop,
        window_id: egui_winit::winit::window::WindowId,
        event: WindowEvent,
    ) {
        self.handle_window_event(window_id, event);
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        let minimized = self
            .viewports
            .first()
            .is_some_and(|vp| vp.render_port.is_minimized());
        match plan_frame(self.loop_state, minimized, self.shutdown_requested) {
            FramePlan::Wait => {}
            FramePlan::Exit => {
                self.loop_state = LoopState::Shutdown;
                // Dropping the viewport releases GPU resources.
                event_loop.exit();
            }
            FramePlan::Idle(nap) => std::thread::sleep(nap),
            FramePlan::Render => self.frame(),
        }
    }
}
