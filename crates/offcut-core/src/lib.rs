//! Offcut accounting and canvas packing for a sheet-material cutting shop.
//!
//! Two independent computations:
//! - [`LeftoverCalculator`] derives the unused area of every stock sheet
//!   once the orders cut from its product are subtracted.
//! - [`Packer`] places rectangular pieces on a fixed-size canvas, either one
//!   at a time (first fit on a coarse grid) or all at once
//!   ([`Packer::auto_arrange`], first-fit-decreasing on a fine grid).

pub mod config;
pub mod leftover;
pub mod packer;
pub mod render;
pub mod types;

pub use config::CanvasConfig;
pub use leftover::{
    calculate_leftovers, parse_sheet_size, Diagnostic, LeftoverCalculator, LeftoverReport,
    LeftoverSummary,
};
pub use packer::{
    auto_arrange, find_first_fit, format_utilization, overlaps, utilization, Arrangement,
    PackSnapshot, Packer,
};
pub use render::render_svg;
pub use types::*;
