use crate::config::CanvasConfig;
use crate::types::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

mod arrange;
mod placement;

pub use arrange::{auto_arrange, Arrangement};
pub use placement::{find_first_fit, format_utilization, overlaps, utilization};

/// Interactive visualizer state: the pieces currently drawn on one canvas.
#[derive(Debug, Clone)]
pub struct Packer {
    config: CanvasConfig,
    rectangles: Vec<Rectangle>,
}

impl Packer {
    /// Validates the canvas and starts with no pieces.
    pub fn new(config: CanvasConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            rectangles: Vec::new(),
        })
    }

    /// Rebuilds a packer around a list the caller already holds.
    /// Positions are taken as given, sizes must be positive.
    pub fn with_rectangles(config: CanvasConfig, rectangles: Vec<Rectangle>) -> Result<Self> {
        let mut packer = Self::new(config)?;
        for rect in &rectangles {
            check_dimensions(rect.width, rect.height)?;
            if !rect.x.is_finite() || !rect.y.is_finite() {
                return Err(OffcutError::InvalidInput(format!(
                    "Piece {} has a non-finite position ({}, {})",
                    rect.label, rect.x, rect.y
                )));
            }
        }
        packer.rectangles = rectangles;
        Ok(packer)
    }

    pub fn config(&self) -> &CanvasConfig {
        &self.config
    }

    pub fn rectangles(&self) -> &[Rectangle] {
        &self.rectangles
    }

    pub fn len(&self) -> usize {
        self.rectangles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rectangles.is_empty()
    }

    /// Scales a millimeter piece onto the canvas and places it in the first
    /// free slot of the coarse grid.
    pub fn add_piece(&mut self, piece: &PieceRequest) -> Result<&Rectangle> {
        let scale = self.config.scale();
        self.add_canvas_piece(
            piece.width * scale,
            piece.height * scale,
            piece.label.as_deref(),
        )
    }

    /// Places a piece already expressed in canvas units.
    pub fn add_canvas_piece(
        &mut self,
        width: f64,
        height: f64,
        label: Option<&str>,
    ) -> Result<&Rectangle> {
        check_dimensions(width, height)?;

        let (x, y) = find_first_fit(
            &self.rectangles,
            width,
            height,
            &self.config,
            self.config.place_step,
        )
        .ok_or(OffcutError::NoRoom { width, height })?;

        let index = self.rectangles.len();
        let label = match label {
            Some(label) if !label.is_empty() => label.to_string(),
            _ => format!("Piece {}", index + 1),
        };

        debug!(%label, x, y, width, height, "piece placed");

        self.rectangles.push(Rectangle {
            x,
            y,
            width,
            height,
            label,
            color: CanvasConfig::color_for(index).to_string(),
        });

        Ok(&self.rectangles[index])
    }

    /// Replaces the layout with a first-fit-decreasing arrangement and
    /// returns the pieces that no longer fit.
    pub fn auto_arrange(&mut self) -> Vec<Rectangle> {
        let arrangement = auto_arrange(&self.rectangles, &self.config);

        for rect in &arrangement.dropped {
            warn!(
                label = %rect.label,
                width = rect.width,
                height = rect.height,
                "piece dropped by auto-arrange"
            );
        }

        self.rectangles = arrangement.placed;
        arrangement.dropped
    }

    /// Removes one piece. The others keep their positions.
    pub fn remove(&mut self, index: usize) -> Result<Rectangle> {
        if index >= self.rectangles.len() {
            return Err(OffcutError::IndexOutOfRange {
                index,
                len: self.rectangles.len(),
            });
        }
        Ok(self.rectangles.remove(index))
    }

    pub fn clear(&mut self) {
        self.rectangles.clear();
    }

    pub fn utilization(&self) -> f64 {
        utilization(&self.rectangles, &self.config)
    }

    pub fn utilization_label(&self) -> String {
        format_utilization(self.utilization())
    }

    pub fn snapshot(&self) -> PackSnapshot {
        PackSnapshot {
            rectangles: self.rectangles.clone(),
            utilization: self.utilization(),
            utilization_label: self.utilization_label(),
        }
    }
}

fn check_dimensions(width: f64, height: f64) -> Result<()> {
    let valid = |v: f64| v.is_finite() && v > 0.0;
    if !valid(width) || !valid(height) {
        return Err(OffcutError::InvalidInput(format!(
            "Piece dimensions must be positive, got {}x{}",
            width, height
        )));
    }
    Ok(())
}

/// What the canvas renderer receives after each change
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PackSnapshot {
    pub rectangles: Vec<Rectangle>,
    pub utilization: f64,
    pub utilization_label: String,
}
