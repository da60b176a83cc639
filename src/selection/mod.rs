pub mod commit;
pub mod config;
pub mod search;
pub mod valuation;

use tracing::{debug, info, warn};

use crate::registry::{ItemRef, Registry};
use crate::types::report::{ReportStatus, SelectionError, SelectionReport};
pub use commit::{commit, Allocation, Committed};
pub use config::{BalanceWindow, SelectionConfig};
pub use search::{is_solo_match, search, Combinations, Hit, Stage};
pub use valuation::{value_of, Candidate, Record, Valuation, Weighted};

/// Every unused item, oldest first.
///
/// The sort is stable, so items sharing a timestamp stay in registry order.
pub fn collect_candidates(registry: &Registry) -> Vec<Candidate<'_>> {
	let mut candidates: Vec<Candidate<'_>> = registry
		.categories()
		.enumerate()
		.flat_map(|(slot, category)| {
			category
				.items()
				.iter()
				.enumerate()
				.filter(|(_, item)| !item.is_used())
				.map(move |(index, item)| Candidate {
					at: ItemRef {
						category: slot,
						item: index,
					},
					reference: item.reference(),
					added_at: item.added_at(),
					points: category.points(),
					is_news: category.is_news(),
				})
		})
		.collect();

	candidates.sort_by(|a, b| a.added_at.cmp(&b.added_at));

	debug_assert!(candidates.windows(2).all(|w| w[0].added_at <= w[1].added_at));

	candidates
}

#[derive(Debug, Clone, Default)]
pub struct ReportEngine {
	config: SelectionConfig,
}

impl ReportEngine {
	pub fn new(config: SelectionConfig) -> Self {
		Self { config }
	}

	pub fn config(&self) -> &SelectionConfig {
		&self.config
	}

	/// Work out which items would make up a report for `target`.
	///
	/// Read-only: the registry is untouched until the allocation is committed.
	pub fn plan(&self, registry: &Registry, target: i64) -> Result<Allocation, SelectionError> {
		let target = match u64::try_from(target) {
			Ok(t) if t > 0 => t,
			_ => return Err(SelectionError::InvalidTarget(target)),
		};

		// 0. Snapshot identity, so the commit can refuse a changed registry
		let registry_version = registry.version();

		// 1. Candidate Phase
		let candidates = collect_candidates(registry);
		debug!(candidates = candidates.len(), target, "collected unused items");

		// 2. Search Phase
		let hit = if candidates.is_empty() {
			None
		} else {
			search(&candidates, target, &self.config)?
		};

		// 3. Report Phase
		let Some(hit) = hit else {
			warn!(candidates = candidates.len(), target, "no combination meets the target");
			let report = SelectionReport {
				status: ReportStatus::Unsatisfiable,
				target,
				total: 0,
				items_selected: 0,
				news_points: 0,
				regular_points: 0,
				references: Vec::new(),
				candidates_considered: candidates.len(),
				registry_version,
			};
			return Ok(Allocation {
				report,
				picks: Vec::new(),
			});
		};

		let status = match hit.stage {
			Stage::Strict => ReportStatus::Qualified,
			Stage::Relaxed => ReportStatus::Fallback,
		};
		let chosen: Vec<&Candidate<'_>> = hit.members.iter().map(|&i| &candidates[i]).collect();

		info!(
			status = status.as_str(),
			items = chosen.len(),
			total = hit.valuation.total,
			target,
			"report planned"
		);

		let report = SelectionReport {
			status,
			target,
			total: hit.valuation.total,
			items_selected: chosen.len(),
			news_points: hit.valuation.news,
			regular_points: hit.valuation.regular,
			references: chosen.iter().map(|c| c.reference.to_string()).collect(),
			candidates_considered: candidates.len(),
			registry_version,
		};

		Ok(Allocation {
			report,
			picks: chosen.iter().map(|c| c.at).collect(),
		})
	}

	/// Plan and commit in one step.
	pub fn generate(&self, registry: &mut Registry, target: i64) -> Result<Committed, SelectionError> {
		let allocation = self.plan(registry, target)?;
		commit(registry, allocation)
	}
}
