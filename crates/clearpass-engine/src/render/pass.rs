use crate::coords::ColorRgba;

/// A render pass that clears the surface and keeps the result.
///
/// It carries no pipeline and issues no draw; the clear load op is the only
/// output.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ClearPass<'a> {
    pub label: Option<&'a str>,
    pub color: ColorRgba,
}

impl<'a> ClearPass<'a> {
    #[inline]
    pub const fn new(label: &'a str, color: ColorRgba) -> Self {
        Self {
            label: Some(label),
            color,
        }
    }

    /// Color attachment ops: clear on load, store on end.
    #[inline]
    pub fn operations(&self) -> wgpu::Operations<wgpu::Color> {
        wgpu::Operations {
            load: wgpu::LoadOp::Clear(self.color.to_wgpu()),
            store: wgpu::StoreOp::Store,
        }
    }
}
