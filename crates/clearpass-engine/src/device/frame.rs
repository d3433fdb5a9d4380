/// One recorded unit of GPU work targeting the current surface texture.
///
/// Holding the surface texture prevents acquisition of the next one, so this is
/// meant to be submitted right away. Submission consumes it and presents.
pub struct FrameCommands {
    pub(crate) commands: wgpu::CommandBuffer,
    pub(crate) surface_texture: wgpu::SurfaceTexture,
}
