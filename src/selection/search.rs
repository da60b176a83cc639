//! Exhaustive smallest-subset search.
//!
//! Combinations are visited by size, then in lexicographic order of
//! candidate positions. Two stages share that order and the exclusion rule:
//! the strict stage also requires the news share to sit inside the balance
//! window, the relaxed stage only requires the target.

use tracing::debug;

use super::config::{BalanceWindow, SelectionConfig};
use super::valuation::{value_of, Valuation, Weighted};
use crate::types::report::SelectionError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Strict,
    Relaxed,
}

impl Stage {
    fn accepts(self, valuation: &Valuation, window: &BalanceWindow) -> bool {
        match self {
            Stage::Strict => window.contains(valuation),
            Stage::Relaxed => true,
        }
    }
}

/// A combination meeting the target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hit {
    /// Positions into the candidate slice, ascending.
    pub members: Vec<usize>,
    pub valuation: Valuation,
    pub stage: Stage,
}

/// An item worth exactly the target on its own disqualifies every
/// combination it appears in.
pub fn is_solo_match<W: Weighted>(record: W, target: u64) -> bool {
    record.contribution() == target
}

/// Lexicographic k-combinations of `0..n`.
#[derive(Debug)]
pub struct Combinations {
    n: usize,
    indices: Vec<usize>,
    started: bool,
}

impl Combinations {
    pub fn new(n: usize, k: usize) -> Self {
        Self {
            n,
            indices: (0..k).collect(),
            started: false,
        }
    }

    pub fn advance(&mut self) -> Option<&[usize]> {
        let k = self.indices.len();
        if k == 0 || k > self.n {
            return None;
        }
        if !self.started {
            self.started = true;
            return Some(&self.indices);
        }

        let mut i = k;
        while i > 0 {
            i -= 1;
            if self.indices[i] != i + self.n - k {
                self.indices[i] += 1;
                for j in i + 1..k {
                    self.indices[j] = self.indices[j - 1] + 1;
                }
                return Some(&self.indices);
            }
        }
        None
    }
}

/// Smallest-size, first-in-order combination of `pool` reaching `target`
/// that `accept` also approves.
///
/// The first hit at a size is the one a full scan of that size would keep,
/// so scanning stops there.
fn first_combination<W, F>(pool: &[W], target: u64, accept: F) -> Option<(Vec<usize>, Valuation)>
where
    W: Weighted,
    F: Fn(&Valuation) -> bool,
{
    // reach[k-1]: the most any k members can add up to
    let mut contributions: Vec<u64> = pool.iter().map(|c| c.contribution()).collect();
    contributions.sort_unstable_by(|a, b| b.cmp(a));
    let reach: Vec<u64> = contributions
        .iter()
        .scan(0u64, |acc, c| {
            *acc += c;
            Some(*acc)
        })
        .collect();

    for size in 1..=pool.len() {
        if reach[size - 1] < target {
            continue;
        }
        let mut combos = Combinations::new(pool.len(), size);
        while let Some(members) = combos.advance() {
            let valuation = value_of(members.iter().map(|&i| &pool[i]));
            if valuation.total >= target && accept(&valuation) {
                return Some((members.to_vec(), valuation));
            }
        }
    }
    None
}

/// Run the strict stage, then the relaxed stage if the strict one found nothing.
///
/// `candidates` must already be in enumeration order (oldest first).
pub fn search<W: Weighted>(
    candidates: &[W],
    target: u64,
    config: &SelectionConfig,
) -> Result<Option<Hit>, SelectionError> {
    let eligible: Vec<usize> = (0..candidates.len())
        .filter(|&i| !is_solo_match(&candidates[i], target))
        .collect();
    let pool: Vec<&W> = eligible.iter().map(|&i| &candidates[i]).collect();

    let reachable: u64 = pool.iter().map(|c| c.contribution()).sum();
    if reachable < target {
        debug!(
            eligible = pool.len(),
            reachable, target, "target out of reach, skipping search"
        );
        return Ok(None);
    }

    if pool.len() > config.max_candidates {
        return Err(SelectionError::SearchSpaceTooLarge {
            candidates: pool.len(),
            limit: config.max_candidates,
        });
    }

    for stage in [Stage::Strict, Stage::Relaxed] {
        let found = first_combination(&pool, target, |v| stage.accepts(v, &config.balance));
        if let Some((members, valuation)) = found {
            debug!(
                ?stage,
                size = members.len(),
                total = valuation.total,
                target,
                "combination found"
            );
            return Ok(Some(Hit {
                members: members.into_iter().map(|i| eligible[i]).collect(),
                valuation,
                stage,
            }));
        }
        debug!(?stage, target, "no combination in stage");
    }
    Ok(None)
}
