use serde::Serialize;

use crate::registry::Registry;
use crate::types::identifiers::CategoryKey;

/// Registry-wide counts. Points here are nominal: `points × items`, with no
/// news discount.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Summary {
    pub categories: usize,
    pub news_categories: usize,
    pub regular_categories: usize,
    pub items: usize,
    pub used_items: usize,
    pub unused_items: usize,
    /// Categories that still have at least one unused item.
    pub active_categories: usize,
    pub nominal_points: u64,
    pub breakdown: Vec<CategoryBreakdown>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryBreakdown {
    pub key: CategoryKey,
    pub points: u32,
    pub is_news: bool,
    pub description: String,
    pub items: usize,
    pub unused_items: usize,
}

impl Summary {
    pub fn of(registry: &Registry) -> Self {
        let mut summary = Summary::default();
        for category in registry.categories() {
            let items = category.items().len();
            let unused = category.unused_count();

            summary.categories += 1;
            if category.is_news() {
                summary.news_categories += 1;
            } else {
                summary.regular_categories += 1;
            }
            summary.items += items;
            summary.unused_items += unused;
            summary.used_items += items - unused;
            if unused > 0 {
                summary.active_categories += 1;
            }
            summary.nominal_points += u64::from(category.points()) * items as u64;

            summary.breakdown.push(CategoryBreakdown {
                key: category.key().clone(),
                points: category.points(),
                is_news: category.is_news(),
                description: category.description().to_string(),
                items,
                unused_items: unused,
            });
        }
        summary
    }
}
