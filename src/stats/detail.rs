use serde::Serialize;

use crate::registry::{Category, Registry};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DetailMode {
    Total,
    Unused,
    Used,
}

impl DetailMode {
    fn count(self, category: &Category) -> usize {
        match self {
            Self::Total => category.items().len(),
            Self::Unused => category.unused_count(),
            Self::Used => category.used_count(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DetailRow {
    pub description: String,
    pub count: usize,
    pub points: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Detail {
    pub mode: DetailMode,
    pub items: usize,
    pub points: u64,
    /// Highest point total first; equal totals keep registry order.
    pub rows: Vec<DetailRow>,
}

pub fn detail(registry: &Registry, mode: DetailMode) -> Detail {
    let mut rows: Vec<DetailRow> = registry
        .categories()
        .filter_map(|category| {
            let count = mode.count(category);
            if count == 0 && mode != DetailMode::Total {
                return None;
            }
            Some(DetailRow {
                description: category.description().to_string(),
                count,
                points: u64::from(category.points()) * count as u64,
            })
        })
        .collect();

    rows.sort_by(|a, b| b.points.cmp(&a.points));

    Detail {
        mode,
        items: rows.iter().map(|r| r.count).sum(),
        points: rows.iter().map(|r| r.points).sum(),
        rows,
    }
}
