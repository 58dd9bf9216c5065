//! Pure calculation functions for resize dimensions.
//!
//! All functions here are pure and testable without any I/O or images.

/// Calculate output dimensions for an aspect-preserving resize.
///
/// # Arguments
/// * `source` - Original image dimensions (width, height)
/// * `width` - Requested output width
/// * `max_height` - Optional height bound; `0` means unbounded
///
/// # Returns
/// * `(width, height)` - Output dimensions, never smaller than 1x1
///
/// Without a height bound the width is used as-is and the height follows the
/// source aspect. With a bound, portrait sources are sized by height instead,
/// which keeps tall images from growing past `max_height`. Landscape and
/// square sources still honour the requested width.
///
/// # Examples
/// ```
/// # use shackles::imaging::calculate_resize_dimensions;
/// // 1000x500 landscape at width 300 → 300x150
/// assert_eq!(calculate_resize_dimensions((1000, 500), 300, 0), (300, 150));
///
/// // 600x900 portrait bounded at 300px high → 200x300
/// assert_eq!(calculate_resize_dimensions((600, 900), 400, 300), (200, 300));
/// ```
pub fn calculate_resize_dimensions(source: (u32, u32), width: u32, max_height: u32) -> (u32, u32) {
    let (src_w, src_h) = source;
    let aspect_height = |w: f64| w * src_h as f64 / src_w as f64;

    let (w, h) = if max_height > 0 && src_h > src_w {
        // Portrait: height is the bound
        let h = max_height as f64;
        (h * src_w as f64 / src_h as f64, h)
    } else {
        let w = width as f64;
        (w, aspect_height(w))
    };

    ((w.round() as u32).max(1), (h.round() as u32).max(1))
}
