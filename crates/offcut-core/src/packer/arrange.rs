use super::*;
use std::cmp::Ordering;

/// Result of an auto-arrange pass
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Arrangement {
    /// Re-placed rectangles, in placement order (largest area first)
    pub placed: Vec<Rectangle>,
    /// Rectangles that found no free slot. They are not part of the new layout.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub dropped: Vec<Rectangle>,
}

/// Re-places every rectangle from scratch using first-fit-decreasing on the
/// fine grid. Prior positions are ignored; label and color are kept.
/// Equal areas keep their current list order.
pub fn auto_arrange(rectangles: &[Rectangle], canvas: &CanvasConfig) -> Arrangement {
    let mut queue: Vec<&Rectangle> = rectangles.iter().collect();
    queue.sort_by(|a, b| b.area().partial_cmp(&a.area()).unwrap_or(Ordering::Equal));

    let mut arrangement = Arrangement::default();

    for rect in queue {
        match find_first_fit(
            &arrangement.placed,
            rect.width,
            rect.height,
            canvas,
            canvas.arrange_step,
        ) {
            Some((x, y)) => arrangement.placed.push(Rectangle {
                x,
                y,
                ..rect.clone()
            }),
            None => arrangement.dropped.push(rect.clone()),
        }
    }

    arrangement
}
