use winit::dpi::PhysicalSize;
use winit::window::Window;

use crate::render::ClearPass;

use super::surface;
use super::{BufferRequest, FrameCommands, GpuInit, GraphicsHost, RenderDevice, SetupError};

/// wgpu instance plus a surface bound to a window, before any adapter is chosen.
pub struct WgpuHost<'w> {
    instance: wgpu::Instance,

    /// Surface lifetime is tied to the window; the window must outlive it.
    surface: wgpu::Surface<'w>,

    /// Drawable size in physical pixels at creation time.
    size: PhysicalSize<u32>,

    init: GpuInit,
}

impl<'w> WgpuHost<'w> {
    /// Creates the instance and the window surface.
    ///
    /// A zero-sized window or a surface creation failure means the host cannot
    /// present anything.
    pub fn new(window: &'w Window, init: GpuInit) -> Result<Self, SetupError> {
        let size = presentable_size(window.inner_size())?;

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: init.backends,
            ..Default::default()
        });

        let surface = instance
            .create_surface(window)
            .map_err(|e| SetupError::Unsupported(e.to_string()))?;

        Ok(Self {
            instance,
            surface,
            size,
            init,
        })
    }
}

/// wgpu cannot configure a 0-sized surface, so such a window cannot present.
fn presentable_size(size: PhysicalSize<u32>) -> Result<PhysicalSize<u32>, SetupError> {
    if size.width == 0 || size.height == 0 {
        return Err(SetupError::Unsupported(format!(
            "window has zero size ({}x{})",
            size.width, size.height
        )));
    }
    Ok(size)
}

impl<'w> GraphicsHost for WgpuHost<'w> {
    type Adapter = wgpu::Adapter;
    type Device = Gpu<'w>;

    async fn request_adapter(&self) -> Result<wgpu::Adapter, SetupError> {
        let adapter = self
            .instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: self.init.power_preference,
                compatible_surface: Some(&self.surface),
                force_fallback_adapter: false,
            })
            .await
            .map_err(|e| SetupError::NoAdapter(e.to_string()))?;

        let info = adapter.get_info();
        log::info!("adapter: {} ({:?})", info.name, info.backend);

        Ok(adapter)
    }

    async fn request_device(self, adapter: wgpu::Adapter) -> Result<Gpu<'w>, SetupError> {
        let Self {
            instance,
            surface,
            size,
            init,
        } = self;

        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor {
                label: Some("clearpass device"),
                required_features: init.required_features,
                required_limits: init.required_limits,
                experimental_features: wgpu::ExperimentalFeatures::disabled(),
                memory_hints: wgpu::MemoryHints::Performance,
                trace: wgpu::Trace::Off,
            })
            .await
            .map_err(|e| SetupError::DeviceRequest(e.to_string()))?;

        let caps = surface.get_capabilities(&adapter);
        let format = surface::choose_surface_format(&caps.formats, init.prefer_srgb)
            .ok_or_else(|| SetupError::Surface("no supported surface formats".to_string()))?;
        let alpha_mode = surface::choose_alpha_mode(&caps.alpha_modes, init.alpha_mode);

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width: size.width,
            height: size.height,
            present_mode: init.present_mode,
            alpha_mode,
            view_formats: vec![],
            desired_maximum_frame_latency: init.desired_maximum_frame_latency,
        };

        surface.configure(&device, &config);
        log::debug!(
            "surface configured: {:?} {}x{} {:?}",
            format,
            size.width,
            size.height,
            alpha_mode
        );

        Ok(Gpu {
            _instance: instance,
            surface,
            adapter,
            device,
            queue,
            config,
        })
    }
}

/// Configured device, queue and surface.
pub struct Gpu<'w> {
    /// Instance the surface was created from.
    _instance: wgpu::Instance,
    surface: wgpu::Surface<'w>,
    adapter: wgpu::Adapter,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
}

impl<'w> Gpu<'w> {
    pub fn adapter_info(&self) -> wgpu::AdapterInfo {
        self.adapter.get_info()
    }

    /// Surface size in physical pixels.
    pub fn size(&self) -> PhysicalSize<u32> {
        PhysicalSize::new(self.config.width, self.config.height)
    }
}

impl<'w> RenderDevice for Gpu<'w> {
    type Buffer = wgpu::Buffer;
    type Commands = FrameCommands;

    fn surface_format(&self) -> wgpu::TextureFormat {
        self.config.format
    }

    fn create_buffer(&self, request: &BufferRequest<'_>) -> wgpu::Buffer {
        self.device.create_buffer(&request.to_descriptor())
    }

    fn write_buffer(&self, buffer: &wgpu::Buffer, offset: u64, data: &[u8]) {
        self.queue.write_buffer(buffer, offset, data);
    }

    fn record_clear_pass(&self, pass: &ClearPass<'_>) -> Result<FrameCommands, SetupError> {
        let surface_texture = self
            .surface
            .get_current_texture()
            .map_err(|e| SetupError::Surface(e.to_string()))?;

        let view = surface_texture
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("clearpass encoder"),
            });

        // Opened and ended without a draw; the load op does the work.
        {
            let _rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: pass.label,
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: pass.operations(),
                    depth_slice: None,
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
                multiview_mask: None,
            });
        }

        Ok(FrameCommands {
            commands: encoder.finish(),
            surface_texture,
        })
    }

    fn submit(&self, frame: FrameCommands) {
        let FrameCommands {
            commands,
            surface_texture,
        } = frame;

        self.queue.submit(std::iter::once(commands));
        surface_texture.present();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_width_window_is_unsupported() {
        let err = presentable_size(PhysicalSize::new(0, 480)).unwrap_err();
        assert!(matches!(err, SetupError::Unsupported(_)));
    }

    #[test]
    fn zero_height_window_is_unsupported() {
        let err = presentable_size(PhysicalSize::new(640, 0)).unwrap_err();
        assert_eq!(err, SetupError::Unsupported("window has zero size (640x0)".to_string()));
    }

    #[test]
    fn non_zero_window_size_is_kept() {
        let size = presentable_size(PhysicalSize::new(512, 512)).unwrap();
        assert_eq!(size, PhysicalSize::new(512, 512));
    }
}
