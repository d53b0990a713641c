//! Module: db::plan::matcher
//! Responsibility: bind query conditions to leading index columns.
//! Does not own: order analysis or ranking.
//! Boundary: an unresolvable index column ends matching; it is never an error.

use crate::{
    db::{
        plan::usage::{EqualityBinding, IndexUsage, RangeBound},
        query::{CompareOp, ConditionExpr, Expr, OrderByExpr, QuerySources, SourceId},
    },
    model::index::IndexColumn,
};
use std::collections::BTreeSet;

///
/// ConditionMatcher
///
/// Binds an equality prefix and at most one bounding inequality from the
/// goal's conditions, then derives the usage's residual ordering.
///

pub(in crate::db::plan) struct ConditionMatcher<'a, 'q> {
    sources: &'q QuerySources,
    bound: &'a BTreeSet<SourceId>,
    conditions: &'q [ConditionExpr],
}

impl<'a, 'q> ConditionMatcher<'a, 'q> {
    pub(in crate::db::plan) const fn new(
        sources: &'q QuerySources,
        bound: &'a BTreeSet<SourceId>,
        conditions: &'q [ConditionExpr],
    ) -> Self {
        Self {
            sources,
            bound,
            conditions,
        }
    }

    /// Column expression for `column`, found by walking from the usage's
    /// leaf-most source up the parent chain.
    pub(in crate::db::plan) fn resolve_column(
        &self,
        usage: &IndexUsage<'_>,
        column: &IndexColumn,
    ) -> Option<Expr> {
        self.sources
            .find_in_chain(usage.leaf(), column.table)
            .map(|source| Expr::column(source.id, column.column.clone()))
    }

    pub(in crate::db::plan) fn bind(&self, usage: &mut IndexUsage<'q>) {
        let columns = &usage.index().columns;

        let mut bound_columns = 0;
        for column in columns {
            let Some(expr) = self.resolve_column(usage, column) else {
                break;
            };
            let Some((comparand, condition)) = self.find_equality(&expr) else {
                break;
            };
            usage.push_equality(EqualityBinding {
                column: expr,
                comparand,
                condition,
            });
            bound_columns += 1;
        }

        let Some(next) = columns.get(bound_columns) else {
            return;
        };
        if let Some(expr) = self.resolve_column(usage, next) {
            self.bind_inequalities(usage, &expr);
            if usage.range_bound_count() > 0 {
                usage.set_range_column(expr);
            }
        }

        let mut ordering = Vec::with_capacity(columns.len() - bound_columns);
        for column in &columns[bound_columns..] {
            let Some(expr) = self.resolve_column(usage, column) else {
                break;
            };
            ordering.push(OrderByExpr::new(expr, column.direction));
        }
        usage.set_ordering(ordering);
    }

    // First condition, in supplied order, that pins `column` to a constant
    // or bound comparand.
    fn find_equality(&self, column: &Expr) -> Option<(&'q Expr, &'q ConditionExpr)> {
        self.conditions.iter().find_map(|condition| {
            let (op, comparand) = condition.oriented(column)?;
            (op == CompareOp::Eq && comparand.is_constant_or_bound(self.bound))
                .then_some((comparand, condition))
        })
    }

    fn bind_inequalities(&self, usage: &mut IndexUsage<'q>, column: &Expr) {
        for condition in self.conditions {
            let Some((op, comparand)) = condition.oriented(column) else {
                continue;
            };
            if !op.is_ordered_inequality() || !comparand.is_constant_or_bound(self.bound) {
                continue;
            }

            let bound = RangeBound {
                comparand,
                inclusive: op.is_inclusive(),
                condition,
            };
            if op.is_lower_bound() {
                usage.offer_low(bound);
            } else {
                usage.offer_high(bound);
            }
        }
    }
}
