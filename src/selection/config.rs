use serde::{Deserialize, Serialize};

use super::valuation::Valuation;

/// Accepted share of news points in a strict-stage combination, in percent,
/// both ends inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BalanceWindow {
    pub min_percent: u8,
    pub max_percent: u8,
}

impl BalanceWindow {
    pub fn contains(&self, valuation: &Valuation) -> bool {
        let weighed = valuation.news + valuation.regular;
        if weighed == 0 {
            return true;
        }
        // news / weighed in [min, max] without leaving integers
        let news = u128::from(valuation.news) * 100;
        let weighed = u128::from(weighed);
        news >= u128::from(self.min_percent) * weighed
            && news <= u128::from(self.max_percent) * weighed
    }
}

// Serializable, comparable, explicit defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectionConfig {
    /// Largest candidate pool searched exhaustively.
    pub max_candidates: usize,
    pub balance: BalanceWindow,
}

impl SelectionConfig {
    pub fn v0() -> Self {
        Self {
            max_candidates: 20,
            balance: BalanceWindow {
                min_percent: 40,
                max_percent: 60,
            },
        }
    }
}

impl Default for SelectionConfig {
    fn default() -> Self {
        Self::v0()
    }
}
