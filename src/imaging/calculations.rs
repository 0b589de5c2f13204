//! Pure calculation functions for image dimensions.
//!
//! All functions here are pure and testable without any I/O or images.

/// Tolerance absorbed before rounding a rotated extent up, so that
/// `100.00000000001` from trig noise stays `100`.
const ROUND_UP_EPSILON: f64 = 1e-6;

/// Calculate thumbnail dimensions bounded by `max_size` on the longer side.
///
/// Sources that already fit are returned unchanged (never upscaled).
/// Otherwise the longer side becomes `max_size` and the other side is scaled
/// by the source aspect ratio, rounded half away from zero and never below 1.
///
/// # Examples
/// ```
/// # use image_utilities::imaging::calculate_thumbnail_dimensions;
/// assert_eq!(calculate_thumbnail_dimensions((4000, 2000), 1024), (1024, 512));
/// assert_eq!(calculate_thumbnail_dimensions((800, 1200), 400), (267, 400));
/// assert_eq!(calculate_thumbnail_dimensions((300, 200), 400), (300, 200));
/// ```
pub fn calculate_thumbnail_dimensions(source: (u32, u32), max_size: u32) -> (u32, u32) {
    let (src_w, src_h) = source;

    if src_w <= max_size && src_h <= max_size {
        return source;
    }

    let ratio = src_w as f64 / src_h as f64;
    if ratio > 1.0 {
        // Landscape: width is the bound
        let h = (max_size as f64 / ratio).round() as u32;
        (max_size, h.max(1))
    } else {
        // Portrait or square: height is the bound
        let w = (max_size as f64 * ratio).round() as u32;
        (w.max(1), max_size)
    }
}

/// Reduce any integer angle to `0..360`.
pub fn normalize_degrees(degrees: i64) -> u32 {
    degrees.rem_euclid(360) as u32
}

/// Calculate the axis-aligned bounding box of a `source` rectangle rotated
/// about its center.
///
/// Quarter turns are exact. Other angles use
/// `|w·cos θ| + |h·sin θ|` × `|w·sin θ| + |h·cos θ|`, rounded up so no corner
/// is clipped.
///
/// # Examples
/// ```
/// # use image_utilities::imaging::calculate_rotated_bounds;
/// assert_eq!(calculate_rotated_bounds((100, 100), 45), (142, 142));
/// assert_eq!(calculate_rotated_bounds((640, 480), -90), (480, 640));
/// ```
pub fn calculate_rotated_bounds(source: (u32, u32), degrees: i64) -> (u32, u32) {
    let (w, h) = source;

    match normalize_degrees(degrees) {
        0 | 180 => (w, h),
        90 | 270 => (h, w),
        normalized => {
            let radians = (normalized as f64).to_radians();
            let (sin, cos) = radians.sin_cos();
            let (w, h) = (w as f64, h as f64);

            let bounding_w = (w * cos).abs() + (h * sin).abs();
            let bounding_h = (w * sin).abs() + (h * cos).abs();

            (round_up_extent(bounding_w), round_up_extent(bounding_h))
        }
    }
}

fn round_up_extent(value: f64) -> u32 {
    ((value - ROUND_UP_EPSILON).ceil() as u32).max(1)
}
