use super::*;
use crate::config::{grid_positions, MAX_GRID_POSITIONS};

/// Axis-aligned box used while testing candidate positions
#[derive(Debug, Clone, Copy)]
pub(super) struct Bounds {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Bounds {
    fn of(rect: &Rectangle) -> Self {
        Self {
            x: rect.x,
            y: rect.y,
            width: rect.width,
            height: rect.height,
        }
    }

    /// Separating-axis test. Touching edges do not count as overlap.
    fn intersects(&self, other: &Bounds) -> bool {
        let separated = self.x + self.width <= other.x
            || other.x + other.width <= self.x
            || self.y + self.height <= other.y
            || other.y + other.height <= self.y;
        !separated
    }
}

/// Whether two placed rectangles share any interior area.
pub fn overlaps(a: &Rectangle, b: &Rectangle) -> bool {
    Bounds::of(a).intersects(&Bounds::of(b))
}

/// Scans the grid row by row (top to bottom, then left to right) and returns
/// the first top-left corner where a `width` x `height` box hits nothing in
/// `placed`. Dimensions and step are in canvas units.
pub fn find_first_fit(
    placed: &[Rectangle],
    width: f64,
    height: f64,
    canvas: &CanvasConfig,
    step: f64,
) -> Option<(f64, f64)> {
    let max_x = canvas.width - width;
    let max_y = canvas.height - height;

    // also rejects NaN sizes and non-positive boxes
    let scannable = width > 0.0
        && height > 0.0
        && max_x >= 0.0
        && max_y >= 0.0
        && step > 0.0
        && step.is_finite();
    if !scannable || grid_positions(max_x, max_y, step) > MAX_GRID_POSITIONS {
        return None;
    }

    let occupied: Vec<Bounds> = placed.iter().map(Bounds::of).collect();

    grid(max_y, step)
        .flat_map(|y| grid(max_x, step).map(move |x| (x, y)))
        .find(|&(x, y)| {
            let candidate = Bounds {
                x,
                y,
                width,
                height,
            };
            !occupied.iter().any(|b| b.intersects(&candidate))
        })
}

/// Grid coordinates `0, step, 2*step, ..` up to and including `max`.
/// Callers bound `max / step` through `grid_positions` first.
fn grid(max: f64, step: f64) -> impl Iterator<Item = f64> {
    let count = (max / step).floor() as u64 + 1;
    (0..count)
        .map(move |i| i as f64 * step)
        .take_while(move |v| *v <= max)
}

/// Share of the canvas covered by `rectangles`, in percent.
pub fn utilization(rectangles: &[Rectangle], canvas: &CanvasConfig) -> f64 {
    let canvas_area = canvas.area();
    if canvas_area <= 0.0 {
        return 0.0;
    }
    let used: f64 = rectangles.iter().map(Rectangle::area).sum();
    (used / canvas_area) * 100.0
}

/// Fixed two-decimal rendering used by the visualizer.
pub fn format_utilization(percent: f64) -> String {
    format!("{:.2}", percent)
}
