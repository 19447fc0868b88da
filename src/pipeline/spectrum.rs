use image::{Rgb, RgbImage};
use palette::Srgb;

/// Preview strip width used when none is configured.
pub const DEFAULT_WIDTH: u32 = 720;
/// Preview strip height used when none is configured.
pub const DEFAULT_HEIGHT: u32 = 20;

/// Index of the band that owns column `x`.
///
/// Band `i` covers columns `[ceil(i*w/n), ceil((i+1)*w/n))`, so widths differ
/// by at most one and sum to `width`.
fn band_of(x: u32, n: usize, width: u32) -> usize {
    ((u64::from(x) * n as u64) / u64::from(width)) as usize
}

/// Width in columns of each color band, in input order.
///
/// When there are more colors than columns the trailing colors of some
/// groups get zero width.
pub fn band_widths(n: usize, width: u32) -> Vec<u32> {
    let mut widths = vec![0u32; n];
    if n == 0 {
        return widths;
    }
    for x in 0..width {
        widths[band_of(x, n, width)] += 1;
    }
    widths
}

/// Render colors as contiguous vertical bands across a `width` x `height`
/// strip.
///
/// The result is a row-major RGB buffer ready for an image encoder. An empty
/// color list yields an all-black strip.
pub fn render_strip(colors: &[Srgb<u8>], width: u32, height: u32) -> RgbImage {
    if colors.is_empty() || width == 0 {
        return RgbImage::new(width, height);
    }
    RgbImage::from_fn(width, height, |x, _| {
        let c = colors[band_of(x, colors.len(), width)];
        Rgb([c.red, c.green, c.blue])
    })
}
