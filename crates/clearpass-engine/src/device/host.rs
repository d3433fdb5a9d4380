use crate::render::ClearPass;

use super::SetupError;

/// Graphics capability exposed by the host, before a device exists.
///
/// Acquisition happens in two awaited steps: an adapter first, then a device
/// created from it. The second step consumes the host so a device is obtained
/// at most once.
#[allow(async_fn_in_trait)]
pub trait GraphicsHost {
    type Adapter;
    type Device: RenderDevice;

    async fn request_adapter(&self) -> Result<Self::Adapter, SetupError>;

    /// Creates the device and configures the presentation surface for it.
    async fn request_device(self, adapter: Self::Adapter) -> Result<Self::Device, SetupError>;
}

/// A configured device bound to a presentation surface.
pub trait RenderDevice {
    type Buffer;

    /// Recorded work for one surface texture. Moved into [`RenderDevice::submit`].
    type Commands;

    /// Pixel format the surface was configured with.
    fn surface_format(&self) -> wgpu::TextureFormat;

    fn create_buffer(&self, request: &BufferRequest<'_>) -> Self::Buffer;

    fn write_buffer(&self, buffer: &Self::Buffer, offset: u64, data: &[u8]);

    /// Records a pass over the current surface texture that only clears it.
    fn record_clear_pass(&self, pass: &ClearPass<'_>) -> Result<Self::Commands, SetupError>;

    /// Submits recorded work and presents its surface texture.
    fn submit(&self, commands: Self::Commands);
}

/// Size and usage of a buffer to allocate.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct BufferRequest<'a> {
    pub label: Option<&'a str>,
    pub size: u64,
    pub usage: wgpu::BufferUsages,
}

impl<'a> BufferRequest<'a> {
    /// Vertex buffer filled by a queue write after creation.
    #[inline]
    pub fn vertex(label: &'a str, size: u64) -> Self {
        Self {
            label: Some(label),
            size,
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
        }
    }

    pub fn to_descriptor(&self) -> wgpu::BufferDescriptor<'a> {
        wgpu::BufferDescriptor {
            label: self.label,
            size: self.size,
            usage: self.usage,
            mapped_at_creation: false,
        }
    }
}
