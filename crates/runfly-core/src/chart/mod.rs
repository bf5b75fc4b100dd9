// ── Chart engine ──
//
// Pure derivation from run records to plotted marks. Rendering is the
// UI layer's business; everything here is geometry on a fixed logical
// surface, recomputed whole whenever the dataset or metric changes.

mod marks;
mod scale;

pub use marks::{ChartModel, Mark};
pub use scale::{LinearScale, Tick, TimeScale};

/// Logical plotting surface, in abstract pixel units.
pub const WIDTH: f64 = 680.0;
pub const HEIGHT: f64 = 400.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Margin {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

pub const MARGIN: Margin = Margin {
    top: 40.0,
    right: 40.0,
    bottom: 60.0,
    left: 60.0,
};

/// Mark geometry: resting and hovered radius and opacity.
pub const MARK_RADIUS: f64 = 7.0;
pub const MARK_RADIUS_HOVER: f64 = 9.0;
pub const MARK_OPACITY: f64 = 0.75;
pub const MARK_OPACITY_HOVER: f64 = 0.85;

/// Horizontal plotting range: left margin to width minus right margin.
pub const X_RANGE: (f64, f64) = (MARGIN.left, WIDTH - MARGIN.right);

/// Vertical plotting range, inverted: larger values sit higher on the
/// surface, so the range runs from the bottom edge up to the top one.
pub const Y_RANGE: (f64, f64) = (HEIGHT - MARGIN.bottom, MARGIN.top);

/// Tick counts and the time-axis label format.
pub const X_TICKS: usize = 5;
pub const Y_TICKS: usize = 6;
pub const X_TICK_FORMAT: &str = "%b/%d %H:%M";
