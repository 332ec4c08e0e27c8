//! The per-session immutable data context.

use std::path::Path;

use crate::data::{load_recommendations, ClosePriceTable, LoadError};
use crate::table::RecommendationTable;

/// Both source tables, loaded once and passed explicitly to every view.
///
/// Sessions and tests each hold their own instance; nothing here is
/// global, and no operation mutates the tables after load.
#[derive(Debug, Clone)]
pub struct DashboardContext {
    pub recommendations: RecommendationTable,
    pub prices: ClosePriceTable,
}

impl DashboardContext {
    pub fn load(recommendations_path: &Path, prices_path: &Path) -> Result<Self, LoadError> {
        Ok(Self {
            recommendations: load_recommendations(recommendations_path)?,
            prices: ClosePriceTable::load(prices_path)?,
        })
    }

    pub fn new(recommendations: RecommendationTable, prices: ClosePriceTable) -> Self {
        Self {
            recommendations,
            prices,
        }
    }
}
