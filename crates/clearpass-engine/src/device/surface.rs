/// Picks the surface format.
///
/// Surfaces list their preferred format first. With `prefer_srgb`, the first
/// sRGB format wins if there is one.
pub(crate) fn choose_surface_format(
    formats: &[wgpu::TextureFormat],
    prefer_srgb: bool,
) -> Option<wgpu::TextureFormat> {
    let preferred = formats.first().copied()?;

    if prefer_srgb {
        if let Some(f) = formats.iter().copied().find(|f| f.is_srgb()) {
            return Some(f);
        }
    }

    Some(preferred)
}

pub(crate) fn choose_alpha_mode(
    supported: &[wgpu::CompositeAlphaMode],
    requested: Option<wgpu::CompositeAlphaMode>,
) -> wgpu::CompositeAlphaMode {
    requested
        .filter(|m| supported.contains(m))
        .or_else(|| supported.first().copied())
        .unwrap_or(wgpu::CompositeAlphaMode::Auto)
}

#[cfg(test)]
mod tests {
    use super::*;
    use wgpu::{CompositeAlphaMode as Alpha, TextureFormat as Tf};

    // ── format ────────────────────────────────────────────────────────────

    #[test]
    fn no_formats_is_none() {
        assert_eq!(choose_surface_format(&[], true), None);
        assert_eq!(choose_surface_format(&[], false), None);
    }

    #[test]
    fn first_format_is_preferred() {
        let formats = [Tf::Bgra8Unorm, Tf::Bgra8UnormSrgb];
        assert_eq!(choose_surface_format(&formats, false), Some(Tf::Bgra8Unorm));
    }

    #[test]
    fn prefer_srgb_skips_linear_formats() {
        let formats = [Tf::Bgra8Unorm, Tf::Rgba8UnormSrgb];
        assert_eq!(choose_surface_format(&formats, true), Some(Tf::Rgba8UnormSrgb));
    }

    #[test]
    fn prefer_srgb_falls_back_to_first() {
        let formats = [Tf::Rgba16Float, Tf::Bgra8Unorm];
        assert_eq!(choose_surface_format(&formats, true), Some(Tf::Rgba16Float));
    }

    // ── alpha ─────────────────────────────────────────────────────────────

    #[test]
    fn supported_alpha_request_is_kept() {
        let modes = [Alpha::Opaque, Alpha::PreMultiplied];
        assert_eq!(choose_alpha_mode(&modes, Some(Alpha::PreMultiplied)), Alpha::PreMultiplied);
    }

    #[test]
    fn unsupported_alpha_request_uses_first_supported() {
        let modes = [Alpha::Opaque];
        assert_eq!(choose_alpha_mode(&modes, Some(Alpha::PostMultiplied)), Alpha::Opaque);
    }

    #[test]
    fn no_alpha_modes_is_auto() {
        assert_eq!(choose_alpha_mode(&[], None), Alpha::Auto);
    }
}
