//! Canvas settings for the rectangle visualizer.

use crate::types::{OffcutError, Result};
use serde::{Deserialize, Serialize};

/// Grid step used when a single piece is added by hand.
pub const DEFAULT_PLACE_STEP: f64 = 50.0;

/// Finer grid step used by auto-arrange.
pub const DEFAULT_ARRANGE_STEP: f64 = 10.0;

/// Upper bound on candidate corners a single scan may visit.
pub const MAX_GRID_POSITIONS: f64 = 10_000_000.0;

/// Fill colors, cycled by piece count.
pub const PALETTE: [&str; 8] = [
    "#4CAF50", "#2196F3", "#FF9800", "#E91E63", "#9C27B0", "#00BCD4", "#FFC107", "#795548",
];

/// Canvas dimensions and the sheet span they represent.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CanvasConfig {
    #[serde(default = "default_width")]
    pub width: f64,
    #[serde(default = "default_height")]
    pub height: f64,
    /// Sheet dimension in mm that maps onto the full canvas width
    #[serde(default = "default_sheet_span")]
    pub sheet_span_mm: f64,
    #[serde(default = "default_place_step")]
    pub place_step: f64,
    #[serde(default = "default_arrange_step")]
    pub arrange_step: f64,
}

fn default_width() -> f64 {
    600.0
}

fn default_height() -> f64 {
    400.0
}

fn default_sheet_span() -> f64 {
    2440.0
}

fn default_place_step() -> f64 {
    DEFAULT_PLACE_STEP
}

fn default_arrange_step() -> f64 {
    DEFAULT_ARRANGE_STEP
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            width: default_width(),
            height: default_height(),
            sheet_span_mm: default_sheet_span(),
            place_step: DEFAULT_PLACE_STEP,
            arrange_step: DEFAULT_ARRANGE_STEP,
        }
    }
}

impl CanvasConfig {
    /// Canvas of the given size where one canvas unit is one millimeter.
    pub fn unscaled(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            sheet_span_mm: width,
            ..Default::default()
        }
    }

    /// Canvas units per millimeter.
    pub fn scale(&self) -> f64 {
        self.width / self.sheet_span_mm
    }

    pub fn area(&self) -> f64 {
        self.width * self.height
    }

    pub fn validate(&self) -> Result<()> {
        let fields = [
            ("width", self.width),
            ("height", self.height),
            ("sheet_span_mm", self.sheet_span_mm),
            ("place_step", self.place_step),
            ("arrange_step", self.arrange_step),
        ];

        for (name, value) in fields {
            if !value.is_finite() || value <= 0.0 {
                return Err(OffcutError::InvalidInput(format!(
                    "Canvas {} must be a positive number, got {}",
                    name, value
                )));
            }
        }

        for (name, step) in [
            ("place_step", self.place_step),
            ("arrange_step", self.arrange_step),
        ] {
            let positions = grid_positions(self.width, self.height, step);
            if positions > MAX_GRID_POSITIONS {
                return Err(OffcutError::InvalidInput(format!(
                    "Canvas {} {} gives {:.0} grid positions, limit is {:.0}",
                    name, step, positions, MAX_GRID_POSITIONS
                )));
            }
        }

        Ok(())
    }

    /// Palette color for the piece that will sit at position `index`.
    pub fn color_for(index: usize) -> &'static str {
        PALETTE[index % PALETTE.len()]
    }
}

/// Number of grid corners in a `span_x` x `span_y` area scanned at `step`.
pub fn grid_positions(span_x: f64, span_y: f64, step: f64) -> f64 {
    ((span_x / step).floor() + 1.0) * ((span_y / step).floor() + 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_scale() {
        let config = CanvasConfig::default();
        assert!((config.scale() - 600.0 / 2440.0).abs() < 1e-12);
    }

    #[test]
    fn test_unscaled_is_one_to_one() {
        let config = CanvasConfig::unscaled(600.0, 400.0);
        assert_eq!(config.scale(), 1.0);
        assert_eq!(config.area(), 240_000.0);
    }

    #[test]
    fn test_rejects_zero_step() {
        let config = CanvasConfig {
            place_step: 0.0,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(OffcutError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_rejects_nan_width() {
        let config = CanvasConfig {
            width: f64::NAN,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_step_too_fine_for_canvas() {
        let config = CanvasConfig {
            arrange_step: 1e-7,
            ..Default::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("arrange_step"));

        let config = CanvasConfig {
            width: 1e9,
            height: 1e9,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_default_grid_is_within_limit() {
        let config = CanvasConfig::default();
        assert_eq!(
            grid_positions(config.width, config.height, config.place_step),
            13.0 * 9.0
        );
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_palette_cycles() {
        assert_eq!(CanvasConfig::color_for(0), CanvasConfig::color_for(8));
        assert_ne!(CanvasConfig::color_for(0), CanvasConfig::color_for(1));
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let config: CanvasConfig = serde_json::from_str(r#"{"width": 800}"#).unwrap();
        assert_eq!(config.width, 800.0);
        assert_eq!(config.height, 400.0);
        assert_eq!(config.place_step, DEFAULT_PLACE_STEP);
    }
}
