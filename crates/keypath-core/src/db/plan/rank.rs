//! Module: db::plan::rank
//! Responsibility: total, deterministic comparison of index usages for one goal.
//! Does not own: building usages or deciding usability.
//! Boundary: cost models refine the heuristic; they never replace its tie-break.

use crate::db::plan::usage::IndexUsage;
use std::cmp::Ordering;

///
/// CostModel
///
/// Optional statistics hook. Lower cost wins; equal costs fall back to the
/// structural heuristic.
///

pub trait CostModel {
    fn cost(&self, usage: &IndexUsage<'_>) -> u64;
}

///
/// UniformCost
/// Every usage costs the same, so only the heuristic decides.
///

#[derive(Clone, Copy, Debug, Default)]
pub struct UniformCost;

impl CostModel for UniformCost {
    fn cost(&self, _usage: &IndexUsage<'_>) -> u64 {
        0
    }
}

///
/// IndexRanker
///

#[derive(Clone, Copy)]
pub struct IndexRanker<'c> {
    cost_model: &'c dyn CostModel,
}

impl<'c> IndexRanker<'c> {
    #[must_use]
    pub const fn new(cost_model: &'c dyn CostModel) -> Self {
        Self { cost_model }
    }

    /// `Greater` when `a` is the better usage.
    #[must_use]
    pub fn compare(&self, a: &IndexUsage<'_>, b: &IndexUsage<'_>) -> Ordering {
        let cost_a = self.cost_model.cost(a);
        let cost_b = self.cost_model.cost(b);

        cost_b.cmp(&cost_a).then_with(|| heuristic(a, b))
    }

    /// Keep `incumbent` unless `candidate` is strictly better.
    #[must_use]
    pub fn better<'q>(
        &self,
        incumbent: Option<IndexUsage<'q>>,
        candidate: IndexUsage<'q>,
    ) -> IndexUsage<'q> {
        match incumbent {
            Some(incumbent) if self.compare(&candidate, &incumbent) != Ordering::Greater => {
                incumbent
            }
            _ => candidate,
        }
    }
}

impl Default for IndexRanker<'static> {
    fn default() -> Self {
        Self::new(&UniformCost)
    }
}

impl std::fmt::Debug for IndexRanker<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IndexRanker").finish_non_exhaustive()
    }
}

// Structural ranking, most significant first.
fn heuristic(a: &IndexUsage<'_>, b: &IndexUsage<'_>) -> Ordering {
    a.effectiveness()
        .cmp(&b.effectiveness())
        .then_with(|| a.equality_count().cmp(&b.equality_count()))
        .then_with(|| a.range_bound_count().cmp(&b.range_bound_count()))
        .then_with(|| b.index().column_count().cmp(&a.index().column_count()))
        .then_with(|| a.leaf_table().cmp(&b.leaf_table()))
}
