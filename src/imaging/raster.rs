//! Pixel-level rotation onto an expanded canvas.
//!
//! Quarter turns are lossless remaps. Every other angle is rendered by inverse
//! mapping: each destination pixel center is rotated back about the canvas
//! center into source space and sampled bilinearly. Source texels outside the
//! image read as the background color, so edges blend into it.

use image::{DynamicImage, Rgba, RgbaImage};

/// Rotate `img` clockwise by `degrees` (already in `0..360`) about its center,
/// drawing it centered on a `canvas` sized box.
///
/// For quarter turns the canvas must equal the rotated source box, which is
/// what [`calculate_rotated_bounds`](super::calculations::calculate_rotated_bounds)
/// returns; the remap result is used as-is.
pub fn rotate_onto_canvas(
    img: &DynamicImage,
    degrees: u32,
    canvas: (u32, u32),
    background: Rgba<u8>,
) -> DynamicImage {
    match degrees {
        0 => img.clone(),
        90 => img.rotate90(),
        180 => img.rotate180(),
        270 => img.rotate270(),
        _ => DynamicImage::ImageRgba8(rotate_bilinear(&img.to_rgba8(), degrees, canvas, background)),
    }
}

fn rotate_bilinear(
    src: &RgbaImage,
    degrees: u32,
    canvas: (u32, u32),
    background: Rgba<u8>,
) -> RgbaImage {
    let (canvas_w, canvas_h) = canvas;
    let (sin, cos) = (degrees as f64).to_radians().sin_cos();

    let src_cx = src.width() as f64 / 2.0;
    let src_cy = src.height() as f64 / 2.0;
    let dst_cx = canvas_w as f64 / 2.0;
    let dst_cy = canvas_h as f64 / 2.0;

    let mut out = RgbaImage::from_pixel(canvas_w, canvas_h, background);

    for (x, y, pixel) in out.enumerate_pixels_mut() {
        let dx = x as f64 + 0.5 - dst_cx;
        let dy = y as f64 + 0.5 - dst_cy;

        // Inverse of a clockwise rotation in y-down coordinates
        let sx = cos * dx + sin * dy + src_cx;
        let sy = -sin * dx + cos * dy + src_cy;

        if let Some(sampled) = sample_bilinear(src, sx - 0.5, sy - 0.5, background) {
            *pixel = sampled;
        }
    }

    out
}

/// Sample `src` at continuous texel coordinates, where `(0.0, 0.0)` is the
/// center of the top-left texel. Returns `None` when no texel contributes.
fn sample_bilinear(src: &RgbaImage, x: f64, y: f64, background: Rgba<u8>) -> Option<Rgba<u8>> {
    let (w, h) = (src.width() as f64, src.height() as f64);
    if x <= -1.0 || y <= -1.0 || x >= w || y >= h {
        return None;
    }

    let x0 = x.floor();
    let y0 = y.floor();
    let fx = x - x0;
    let fy = y - y0;

    let texel = |tx: f64, ty: f64| -> [f64; 4] {
        let rgba = if tx < 0.0 || ty < 0.0 || tx >= w || ty >= h {
            background
        } else {
            *src.get_pixel(tx as u32, ty as u32)
        };
        rgba.0.map(f64::from)
    };

    let top_left = texel(x0, y0);
    let top_right = texel(x0 + 1.0, y0);
    let bottom_left = texel(x0, y0 + 1.0);
    let bottom_right = texel(x0 + 1.0, y0 + 1.0);

    let mut channels = [0u8; 4];
    for (c, channel) in channels.iter_mut().enumerate() {
        let top = top_left[c] + (top_right[c] - top_left[c]) * fx;
        let bottom = bottom_left[c] + (bottom_right[c] - bottom_left[c]) * fx;
        *channel = (top + (bottom - top) * fy).round().clamp(0.0, 255.0) as u8;
    }

    Some(Rgba(channels))
}
