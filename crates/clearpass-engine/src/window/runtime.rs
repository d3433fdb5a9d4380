use anyhow::{Context, Result};
use ouroboros::self_referencing;

use winit::application::ApplicationHandler;
use winit::dpi::LogicalSize;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::{Window, WindowId};

use crate::coords::ColorRgba;
use crate::device::{Gpu, GpuInit, WgpuHost};
use crate::geometry::{triangulate, QuadCorners, QuadMesh};
use crate::render::{startup, Session};

/// Window configuration.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub title: String,
    pub initial_size: LogicalSize<f64>,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            title: "clearpass".to_string(),
            initial_size: LogicalSize::new(512.0, 512.0),
        }
    }
}

/// What gets uploaded and what the surface is cleared to.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct SceneConfig {
    pub corners: QuadCorners,
    pub clear: ColorRgba,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            corners: QuadCorners::default(),
            clear: ColorRgba::DEEP_BLUE,
        }
    }
}

/// Entry point for the runtime.
pub struct Runtime;

impl Runtime {
    /// Opens one window, renders into it once, and waits until it is closed.
    ///
    /// Returns the setup error if the GPU could not be brought up.
    pub fn run(config: RuntimeConfig, gpu_init: GpuInit, scene: SceneConfig) -> Result<()> {
        let mesh = triangulate(scene.corners).context("invalid quad corners")?;
        anyhow::ensure!(scene.clear.is_finite(), "clear color has a non-finite channel");

        let event_loop = EventLoop::new().context("failed to create winit EventLoop")?;
        event_loop.set_control_flow(ControlFlow::Wait);

        let mut state = AppState::new(config, gpu_init, mesh, scene.clear);

        event_loop
            .run_app(&mut state)
            .context("winit event loop terminated with error")?;

        match state.fatal.take() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

#[self_referencing]
struct WindowEntry {
    window: Window,

    #[borrows(window)]
    #[not_covariant]
    session: Session<Gpu<'this>>,
}

struct AppState {
    config: RuntimeConfig,
    gpu_init: GpuInit,
    mesh: QuadMesh,
    clear: ColorRgba,

    entry: Option<WindowEntry>,
    fatal: Option<anyhow::Error>,
}

impl AppState {
    fn new(config: RuntimeConfig, gpu_init: GpuInit, mesh: QuadMesh, clear: ColorRgba) -> Self {
        Self {
            config,
            gpu_init,
            mesh,
            clear,
            entry: None,
            fatal: None,
        }
    }

    /// Creates the window and runs startup against its surface.
    fn open_window(&mut self, event_loop: &ActiveEventLoop) -> Result<WindowEntry> {
        let attrs = Window::default_attributes()
            .with_title(self.config.title.clone())
            .with_inner_size(self.config.initial_size)
            .with_resizable(false);

        let window = event_loop
            .create_window(attrs)
            .context("failed to create window")?;

        let gpu_init = self.gpu_init.clone();
        let mesh = self.mesh;
        let clear = self.clear;

        let entry = WindowEntryTryBuilder {
            window,
            session_builder: |w| {
                let host = WgpuHost::new(w, gpu_init)?;
                pollster::block_on(startup(host, &mesh, clear))
            },
        }
            .try_build()
            .context("GPU setup failed")?;

        entry.with_session(|session| {
            let info = session.device().adapter_info();
            let size = session.device().size();
            log::info!(
                "frame presented on {} at {}x{}; vertex buffer holds {} bytes",
                info.name,
                size.width,
                size.height,
                session.vertex_buffer().size()
            );
        });

        Ok(entry)
    }
}

impl ApplicationHandler for AppState {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.entry.is_some() || self.fatal.is_some() {
            return;
        }

        match self.open_window(event_loop) {
            Ok(entry) => self.entry = Some(entry),
            Err(e) => {
                log::error!("{e:#}");
                self.fatal = Some(e);
                event_loop.exit();
            }
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        // Only one window exists; the frame was submitted at startup and is not redrawn.
        if let WindowEvent::CloseRequested = event {
            self.entry = None;
            event_loop.exit();
        }
    }
}
