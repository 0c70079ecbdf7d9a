use super::*;

/// Totals shown above the leftover table
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LeftoverSummary {
    pub total_pieces: usize,
    /// Sum of remaining area over all pieces, in m²
    pub total_remaining_area: f64,
    pub available_count: usize,
    pub used_count: usize,
}

impl LeftoverSummary {
    pub fn from_pieces(pieces: &[LeftoverPiece]) -> Self {
        let total_remaining_area = pieces.iter().map(|p| p.remaining_area).sum();
        let available_count = pieces
            .iter()
            .filter(|p| p.status == LeftoverStatus::Available)
            .count();

        Self {
            total_pieces: pieces.len(),
            total_remaining_area,
            available_count,
            used_count: pieces.len() - available_count,
        }
    }
}
