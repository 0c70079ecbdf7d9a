use crate::types::*;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::{debug, warn};

mod summary;
#[cfg(test)]
mod tests;

pub use summary::LeftoverSummary;

/// Data-shape problem found while computing leftovers. Never fatal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Diagnostic {
    /// The sheet references a product that is not in the catalogue; the sheet is skipped
    MissingProduct { sheet_id: String, product_id: String },
    /// The size string did not parse into two numbers
    MalformedSize { sheet_id: String, size: String },
}

/// Output of a full leftover pass
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LeftoverReport {
    pub pieces: Vec<LeftoverPiece>,
    pub summary: LeftoverSummary,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub diagnostics: Vec<Diagnostic>,
}

/// Derives offcut records from stock sheets and the orders cut from them.
pub struct LeftoverCalculator<'a> {
    sheets: &'a [StockSheet],
    orders: &'a [Order],
    products: HashMap<&'a str, &'a Product>,
}

impl<'a> LeftoverCalculator<'a> {
    pub fn new(sheets: &'a [StockSheet], orders: &'a [Order], products: &'a [Product]) -> Self {
        let mut lookup = HashMap::with_capacity(products.len());
        for product in products {
            // first entry wins on duplicate ids
            lookup.entry(product.id.as_str()).or_insert(product);
        }

        Self {
            sheets,
            orders,
            products: lookup,
        }
    }

    pub fn from_inventory(inventory: &'a Inventory) -> Self {
        Self::new(&inventory.stock, &inventory.orders, &inventory.products)
    }

    /// Recomputes every leftover from scratch, in stock sheet order.
    pub fn calculate(&self) -> LeftoverReport {
        let mut pieces = Vec::new();
        let mut diagnostics = Vec::new();

        for sheet in self.sheets {
            let Some(product) = self.products.get(sheet.product_id.as_str()) else {
                warn!(
                    sheet = %sheet.id,
                    product = %sheet.product_id,
                    "stock sheet references unknown product, skipping"
                );
                diagnostics.push(Diagnostic::MissingProduct {
                    sheet_id: sheet.id.clone(),
                    product_id: sheet.product_id.clone(),
                });
                continue;
            };

            let (length, width) = parse_sheet_size(&sheet.size);
            let token_count = sheet.size.split('x').count();
            if token_count != 2 || length.is_nan() || width.is_nan() {
                warn!(sheet = %sheet.id, size = %sheet.size, "malformed stock sheet size");
                diagnostics.push(Diagnostic::MalformedSize {
                    sheet_id: sheet.id.clone(),
                    size: sheet.size.clone(),
                });
            }

            if let Some(piece) = self.leftover_for(sheet, product, length, width) {
                pieces.push(piece);
            }
        }

        let summary = LeftoverSummary::from_pieces(&pieces);
        debug!(
            sheets = self.sheets.len(),
            leftovers = summary.total_pieces,
            remaining_m2 = summary.total_remaining_area,
            "leftover pass complete"
        );

        LeftoverReport {
            pieces,
            summary,
            diagnostics,
        }
    }

    /// Subtracts order usage from one sheet. `None` when nothing was used
    /// or nothing remains.
    fn leftover_for(
        &self,
        sheet: &StockSheet,
        product: &Product,
        length: f64,
        width: f64,
    ) -> Option<LeftoverPiece> {
        let total_area = (length * width) / MM2_PER_M2;

        let mut used_area = 0.0;
        let mut from_orders: Vec<String> = Vec::new();

        for order in self.orders {
            for item in order.items.iter().filter(|i| i.product_id == product.id) {
                used_area += item.area_m2();
                if !from_orders.contains(&order.order_ref) {
                    from_orders.push(order.order_ref.clone());
                }
            }
        }

        let remaining_area = total_area - used_area;
        // NaN fails both comparisons, so malformed sizes never emit
        let emit = remaining_area > 0.0 && used_area > 0.0;
        if !emit {
            return None;
        }

        let utilization_ratio = used_area / total_area;

        Some(LeftoverPiece {
            id: format!("leftover-{}", sheet.id),
            sheet_id: sheet.id.clone(),
            product_id: product.id.clone(),
            product_name: product.name.clone(),
            original_length: length,
            original_width: width,
            remaining_length: length,
            remaining_width: width * (1.0 - utilization_ratio),
            total_area,
            used_area,
            remaining_area,
            date_created: sheet.date_received.clone(),
            status: sheet.status.into(),
            from_orders,
        })
    }
}

/// Convenience wrapper returning only the pieces.
pub fn calculate_leftovers(
    sheets: &[StockSheet],
    orders: &[Order],
    products: &[Product],
) -> Vec<LeftoverPiece> {
    LeftoverCalculator::new(sheets, orders, products)
        .calculate()
        .pieces
}

/// Splits a `<length>x<width>` size string. Unparsable tokens become NaN,
/// a missing width becomes 0 and tokens past the second are ignored.
pub fn parse_sheet_size(size: &str) -> (f64, f64) {
    let mut tokens = size.split('x');
    let length = tokens.next().map(parse_dimension).unwrap_or(0.0);
    let width = tokens.next().map(parse_dimension).unwrap_or(0.0);
    (length, width)
}

fn parse_dimension(token: &str) -> f64 {
    token.trim().parse::<f64>().unwrap_or(f64::NAN)
}
