// Section geometry tests used by every input handler.

/// The section "fills" the viewport when its top has reached the viewport top
/// and its bottom still reaches the viewport bottom, give or take `tolerance`.
pub fn section_in_view(top: f64, bottom: f64, viewport_height: f64, tolerance: f64) -> bool {
    top <= tolerance && bottom >= viewport_height - tolerance
}

pub fn is_mobile(viewport_width: f64, breakpoint: f64) -> bool {
    viewport_width < breakpoint
}
