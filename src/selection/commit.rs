use tracing::info;

use crate::registry::{ItemRef, Registry};
use crate::types::report::{ConsumedItem, SelectionError, SelectionReport};

/// A planned selection that has not touched the registry yet.
///
/// Dropping it leaves every `used` flag as it was. Committing consumes it,
/// so the same plan cannot be applied twice.
#[derive(Debug, Clone)]
#[must_use = "an allocation does nothing until committed"]
pub struct Allocation {
    pub(crate) report: SelectionReport,
    pub(crate) picks: Vec<ItemRef>,
}

impl Allocation {
    pub fn report(&self) -> &SelectionReport {
        &self.report
    }

    /// Registry positions of the selected items, oldest first.
    pub fn picks(&self) -> &[ItemRef] {
        &self.picks
    }
}

/// Result of a commit: the report plus the items that changed, for the
/// persistence side to write out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Committed {
    pub report: SelectionReport,
    pub consumed: Vec<ConsumedItem>,
}

/// Mark every picked item used.
///
/// Fails without touching anything if the registry is no longer the one the
/// allocation was planned against.
pub fn commit(registry: &mut Registry, allocation: Allocation) -> Result<Committed, SelectionError> {
    let Allocation { report, picks } = allocation;

    let actual = registry.version();
    if actual != report.registry_version {
        return Err(SelectionError::StaleAllocation {
            expected: report.registry_version,
            actual,
        });
    }

    let mut consumed = Vec::with_capacity(picks.len());
    for &at in &picks {
        // Same version as at planning time: every pick exists and is unused.
        let Some(category) = registry.category_at(at.category) else { continue };
        let key = category.key().clone();
        if let Some(item) = registry.item_mut(at) {
            if item.consume() {
                consumed.push(ConsumedItem {
                    category: key,
                    reference: item.reference().to_string(),
                });
            }
        }
    }

    info!(
        status = report.status.as_str(),
        consumed = consumed.len(),
        total = report.total,
        target = report.target,
        "allocation committed"
    );

    Ok(Committed { report, consumed })
}
