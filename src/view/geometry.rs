//! Viewport geometry: capacity estimation and overflow height correction.
//!
//! Pure pixel-domain functions. The display surface supplies a
//! [`ViewportMetrics`] at redraw time; the resulting capacity feeds the
//! rolling window's next ingestion cycle.

use super::constants::{
    HSCROLLBAR_HEIGHT, MIN_LINE_HEIGHT, REFERENCE_DPI, VERTICAL_MARGIN,
};

#[cfg(test)]
#[path = "geometry_tests.rs"]
mod tests;

/// Read-only viewport geometry supplied by the display surface at redraw
/// time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewportMetrics {
    /// Client area width in pixels.
    pub client_width: f32,
    /// Client area height in pixels.
    pub client_height: f32,
    /// Baseline line height in pixels at the reference DPI.
    pub line_height: f32,
    /// Current DPI scale factor of the surface.
    pub dpi: f32,
}

impl ViewportMetrics {
    /// Line height scaled by the surface's DPI, clamped to a strictly
    /// positive minimum so degenerate geometry never causes a division
    /// failure.
    pub fn scaled_line_height(&self) -> f32 {
        (self.line_height * self.dpi / REFERENCE_DPI).max(MIN_LINE_HEIGHT)
    }
}

/// Number of display lines that fit in the viewport.
///
/// `floor((client_height - margin) / scaled_line_height)`, clamped at zero
/// for degenerate heights. Example: height 100, margin 2, scaled line height
/// 14 gives `floor(98 / 14) = 7`.
pub fn estimate_capacity(metrics: &ViewportMetrics) -> usize {
    let usable = metrics.client_height - VERTICAL_MARGIN;
    if usable <= 0.0 {
        return 0;
    }
    (usable / metrics.scaled_line_height()).floor() as usize
}

/// Extra container height needed when the rendered text is wider than the
/// client area.
///
/// A horizontal scrollbar will appear and occlude the last line, so the
/// enclosing container should grow by the scrollbar height plus one line of
/// margin. Returns `None` when the text fits or the computed offset is not
/// positive.
///
/// One-directional by design: callers only ever grow the container by this
/// amount and never shrink it back. This is a corrective resize, not a
/// layout solver.
pub fn height_correction(
    metrics: &ViewportMetrics,
    text_width: f32,
    container_height: f32,
) -> Option<f32> {
    if text_width <= metrics.client_width {
        return None;
    }
    let offset = 2.0 * metrics.scaled_line_height() + HSCROLLBAR_HEIGHT - container_height;
    (offset > 0.0).then_some(offset)
}
