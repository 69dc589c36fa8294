//! Layout and cadence constants for the display surface.
//!
//! The pixel-domain values mirror a classic 6x13 px terminal font at
//! 96 DPI, which keeps the geometry math in pixels even though the surface
//! is cell-based.

use std::time::Duration;

/// Target interval between batched ingestion ticks (~30 Hz).
///
/// A compile-time constant by design; the refresh cadence is not a runtime
/// configuration option.
pub const TARGET_INTERVAL: Duration = Duration::from_millis(1000 / 30);

/// Baseline line height in pixels at the reference DPI.
pub const BASE_LINE_HEIGHT: f32 = 13.0;

/// Nominal character cell width in pixels at the reference DPI.
pub const CHAR_CELL_WIDTH: f32 = 6.0;

/// Reference DPI that font metrics are expressed against.
pub const REFERENCE_DPI: f32 = 96.0;

/// Fixed vertical margin subtracted from the client height before the
/// capacity estimate.
pub const VERTICAL_MARGIN: f32 = 2.0;

/// Lower clamp for the scaled line height, so degenerate geometry (viewport
/// not yet laid out) never divides by zero.
pub const MIN_LINE_HEIGHT: f32 = 1.0;

/// Vertical space a horizontal scrollbar consumes, in pixels.
pub const HSCROLLBAR_HEIGHT: f32 = 17.0;

/// Height of the status bar in terminal rows.
pub const STATUS_BAR_HEIGHT: u16 = 1;

/// Maximum delay between two right-button presses that still counts as a
/// double-activation of the clear gesture.
pub const DOUBLE_CLICK_WINDOW: Duration = Duration::from_millis(400);
