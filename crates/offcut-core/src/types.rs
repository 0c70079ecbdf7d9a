use serde::{Deserialize, Serialize};

/// Lifecycle status of a physical stock sheet
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SheetStatus {
    #[default]
    Available,
    InUse,
    Used,
    Leftover,
}

/// One physical inventory unit of a product
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StockSheet {
    pub id: String,
    pub product_id: String,
    /// Nominal size in millimeters, written as `<length>x<width>`
    pub size: String,
    #[serde(default)]
    pub date_received: String,
    #[serde(default)]
    pub status: SheetStatus,
    #[serde(default)]
    pub factory_id: Option<String>,
    #[serde(default)]
    pub purchase_id: Option<String>,
}

/// A single cut line of an order
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderItem {
    pub product_id: String,
    pub length: f64,
    pub width: f64,
    pub qty: f64,
    #[serde(default)]
    pub unit_cost: f64,
    #[serde(default)]
    pub sale_price: f64,
}

impl OrderItem {
    /// Area of all pieces on this line, in m²
    pub fn area_m2(&self) -> f64 {
        (self.length * self.width * self.qty) / MM2_PER_M2
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    pub id: String,
    pub order_ref: String,
    #[serde(default)]
    pub customer_id: Option<String>,
    #[serde(default)]
    pub items: Vec<OrderItem>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub length: f64,
    #[serde(default)]
    pub width: f64,
    #[serde(default)]
    pub thickness: f64,
    #[serde(default)]
    pub unit_cost: f64,
}

/// Snapshot of the records loaded from the business workbook
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Inventory {
    #[serde(default)]
    pub products: Vec<Product>,
    #[serde(default)]
    pub stock: Vec<StockSheet>,
    #[serde(default)]
    pub orders: Vec<Order>,
}

/// Square millimeters in one square meter
pub const MM2_PER_M2: f64 = 1_000_000.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LeftoverStatus {
    Available,
    Used,
}

impl From<SheetStatus> for LeftoverStatus {
    fn from(status: SheetStatus) -> Self {
        match status {
            SheetStatus::Leftover | SheetStatus::Used => LeftoverStatus::Used,
            SheetStatus::Available | SheetStatus::InUse => LeftoverStatus::Available,
        }
    }
}

/// Unused material left on a stock sheet after its linked orders are cut
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LeftoverPiece {
    pub id: String,
    pub sheet_id: String,
    pub product_id: String,
    pub product_name: String,
    pub original_length: f64,
    pub original_width: f64,
    /// Estimate only: the width is shrunk by the utilization ratio
    pub remaining_length: f64,
    pub remaining_width: f64,
    pub total_area: f64,
    pub used_area: f64,
    pub remaining_area: f64,
    pub date_created: String,
    pub status: LeftoverStatus,
    pub from_orders: Vec<String>,
}

impl LeftoverPiece {
    pub fn utilization_percent(&self) -> f64 {
        if self.total_area > 0.0 {
            (self.used_area / self.total_area) * 100.0
        } else {
            0.0
        }
    }
}

/// A piece drawn on the visualizer canvas, in canvas units
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rectangle {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub label: String,
    pub color: String,
}

impl Rectangle {
    pub fn area(&self) -> f64 {
        self.width * self.height
    }
}

/// A piece the user asks to place, in millimeters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PieceRequest {
    pub width: f64,
    pub height: f64,
    #[serde(default)]
    pub label: Option<String>,
}

/// Error type for packing and configuration
#[derive(Debug, thiserror::Error)]
pub enum OffcutError {
    #[error("No room for a {width}x{height} piece on the canvas")]
    NoRoom { width: f64, height: f64 },

    #[error("Index {index} out of range for {len} pieces")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

pub type Result<T> = std::result::Result<T, OffcutError>;
