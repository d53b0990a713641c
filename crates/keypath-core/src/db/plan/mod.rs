//! Module: db::plan
//! Responsibility: choose the best index for a goal and lower it into a scan.
//! Does not own: scan execution or cursor traversal.
//! Boundary: selection is pure and never fails because an index is poor;
//! a goal with no usable index plans a full scan.

mod effectiveness;
mod explain;
mod lowering;
mod matcher;
mod rank;
mod usage;

#[cfg(test)]
mod tests;

pub use lowering::{LoweringError, ScanOrder, lower_usage};
pub use rank::{CostModel, IndexRanker, UniformCost};
pub use usage::{EqualityBinding, IndexUsage, OrderEffectiveness, RangeBound};

use crate::{
    config::PlannerConfig,
    db::{
        plan::{effectiveness::OrderRequest, matcher::ConditionMatcher},
        query::{ConditionExpr, Expr, OrderByExpr, QuerySources, SourceId},
    },
    error::InternalError,
    model::schema::Schema,
    obs::sink::{MetricsEvent, PlanKind, record},
};
use std::collections::BTreeSet;

///
/// AccessPath
/// Chosen way to read one goal's rows.
///

#[derive(Clone, Debug)]
pub enum AccessPath<'q> {
    Index(IndexUsage<'q>),
    FullScan,
}

impl<'q> AccessPath<'q> {
    #[must_use]
    pub const fn usage(&self) -> Option<&IndexUsage<'q>> {
        match self {
            Self::Index(usage) => Some(usage),
            Self::FullScan => None,
        }
    }

    #[must_use]
    pub const fn is_full_scan(&self) -> bool {
        matches!(self, Self::FullScan)
    }
}

///
/// IndexGoal
///
/// Everything index selection needs to know about one query block: the
/// table sources, filter conditions, sources already bound by enclosing
/// loops, and the requested ORDER BY and GROUP BY.
///
/// Empty ordering or grouping lists mean "no request".
///

pub struct IndexGoal<'q> {
    schema: &'q Schema,
    sources: &'q QuerySources,
    bound: BTreeSet<SourceId>,
    conditions: &'q [ConditionExpr],
    ordering: Option<&'q [OrderByExpr]>,
    grouping: Option<&'q [Expr]>,
    config: PlannerConfig,
    cost_model: &'q dyn CostModel,
}

impl<'q> IndexGoal<'q> {
    #[must_use]
    pub fn new(schema: &'q Schema, sources: &'q QuerySources) -> Self {
        Self {
            schema,
            sources,
            bound: BTreeSet::new(),
            conditions: &[],
            ordering: None,
            grouping: None,
            config: PlannerConfig::default(),
            cost_model: &UniformCost,
        }
    }

    #[must_use]
    pub fn with_conditions(mut self, conditions: &'q [ConditionExpr]) -> Self {
        self.conditions = conditions;
        self
    }

    /// Sources whose columns already hold a value for every row this goal
    /// produces, such as the outer side of a nested loop.
    #[must_use]
    pub fn with_bound_sources(mut self, sources: impl IntoIterator<Item = SourceId>) -> Self {
        self.bound.extend(sources);
        self
    }

    #[must_use]
    pub fn with_ordering(mut self, ordering: &'q [OrderByExpr]) -> Self {
        self.ordering = if ordering.is_empty() {
            None
        } else {
            Some(ordering)
        };
        self
    }

    #[must_use]
    pub fn with_grouping(mut self, grouping: &'q [Expr]) -> Self {
        self.grouping = if grouping.is_empty() {
            None
        } else {
            Some(grouping)
        };
        self
    }

    #[must_use]
    pub fn with_config(mut self, config: PlannerConfig) -> Self {
        self.config = config;
        self
    }

    #[must_use]
    pub fn with_cost_model(mut self, cost_model: &'q dyn CostModel) -> Self {
        self.cost_model = cost_model;
        self
    }

    #[must_use]
    pub const fn ordering(&self) -> Option<&'q [OrderByExpr]> {
        self.ordering
    }

    #[must_use]
    pub const fn grouping(&self) -> Option<&'q [Expr]> {
        self.grouping
    }

    /// Bind conditions, classify ordering, and report whether the index is
    /// worth using at all. Expects a freshly constructed usage.
    pub fn usable(&self, usage: &mut IndexUsage<'q>) -> bool {
        ConditionMatcher::new(self.sources, &self.bound, self.conditions).bind(usage);

        let effectiveness = self.order_request().determine(usage);
        usage.set_effectiveness(effectiveness);

        usage.is_usable()
    }

    /// Best usable index for the rows of `source`: its table indexes first,
    /// then group indexes whose leaf is this table and whose root is visible
    /// up the source's parent chain.
    pub fn pick_best_index(
        &self,
        source: SourceId,
    ) -> Result<Option<IndexUsage<'q>>, InternalError> {
        let Some(table) = self.sources.get(source).map(|entry| entry.table) else {
            return Err(InternalError::planner_invariant(format!(
                "source {source} is not part of the query"
            )));
        };

        let ranker = IndexRanker::new(self.cost_model);
        let mut best = None;

        for index in self.schema.table_indexes(table) {
            best = self.offer(&ranker, best, IndexUsage::new(index, source, source, table));
        }

        if self.config.group_indexes {
            for index in self.schema.group_indexes(table) {
                if index.leaf_table() != table {
                    continue;
                }
                // Rows above a missing root would be orphans.
                let Some(root) = self.sources.find_in_chain(source, index.root_table()) else {
                    continue;
                };
                best = self.offer(&ranker, best, IndexUsage::new(index, source, root.id, table));
            }
        }

        Ok(best)
    }

    /// Fold each source's best index into one winner.
    pub fn pick_best_index_across(
        &self,
        sources: impl IntoIterator<Item = SourceId>,
    ) -> Result<Option<IndexUsage<'q>>, InternalError> {
        let ranker = IndexRanker::new(self.cost_model);
        let mut best = None;

        for source in sources {
            if let Some(candidate) = self.pick_best_index(source)? {
                best = Some(ranker.better(best, candidate));
            }
        }

        Ok(best)
    }

    /// Pick an access path across `sources`, falling back to a full scan.
    pub fn plan(
        &self,
        sources: impl IntoIterator<Item = SourceId>,
    ) -> Result<AccessPath<'q>, InternalError> {
        let path = match self.pick_best_index_across(sources)? {
            Some(usage) => AccessPath::Index(usage),
            None => AccessPath::FullScan,
        };

        let kind = if path.is_full_scan() {
            PlanKind::FullScan
        } else {
            PlanKind::Index
        };
        record(MetricsEvent::PlanChosen { kind });

        Ok(path)
    }

    const fn order_request(&self) -> OrderRequest<'q> {
        OrderRequest {
            ordering: self.ordering,
            grouping: self.grouping,
            reverse_scans: self.config.reverse_scans,
        }
    }

    fn offer(
        &self,
        ranker: &IndexRanker<'_>,
        best: Option<IndexUsage<'q>>,
        mut candidate: IndexUsage<'q>,
    ) -> Option<IndexUsage<'q>> {
        let usable = self.usable(&mut candidate);
        record(MetricsEvent::PlanCandidate { usable });

        if usable {
            Some(ranker.better(best, candidate))
        } else {
            best
        }
    }
}

impl std::fmt::Debug for IndexGoal<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IndexGoal")
            .field("bound", &self.bound)
            .field("conditions", &self.conditions)
            .field("ordering", &self.ordering)
            .field("grouping", &self.grouping)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
