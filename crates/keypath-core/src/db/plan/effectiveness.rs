use crate::db::{
    plan::usage::{IndexUsage, OrderEffectiveness},
    query::{Expr, OrderByExpr},
};

///
/// OrderRequest
///
/// The ordering side of a goal: requested ORDER BY and GROUP BY lists plus
/// whether a reversed scan may earn SORTED credit.
///

#[derive(Clone, Copy, Debug)]
pub(in crate::db::plan) struct OrderRequest<'q> {
    pub(in crate::db::plan) ordering: Option<&'q [OrderByExpr]>,
    pub(in crate::db::plan) grouping: Option<&'q [Expr]>,
    pub(in crate::db::plan) reverse_scans: bool,
}

impl OrderRequest<'_> {
    /// Classify `usage` and record the reversal decision on SORTED.
    pub(in crate::db::plan) fn determine(&self, usage: &mut IndexUsage<'_>) -> OrderEffectiveness {
        let mut result = OrderEffectiveness::None;

        if let Some(ordering) = self.ordering
            && let Some(reverse) = self.sorted_reversal(usage, ordering)
        {
            usage.set_reverse_scan(reverse);
            result = OrderEffectiveness::Sorted;
        }

        let Some(grouping) = self.grouping else {
            return result;
        };

        let index_ordering = usage.ordering();
        let mut any_found = false;
        let mut all_found = true;
        for target in grouping {
            match index_ordering.iter().position(|column| column.expr == *target) {
                Some(position) => {
                    // Later positions interleave other columns into the group.
                    if position >= grouping.len() {
                        all_found = false;
                    }
                }
                None if usage.is_fixed_by_equality(target) => {}
                None => {
                    all_found = false;
                    continue;
                }
            }
            any_found = true;
        }

        match (any_found, all_found) {
            (false, _) => result,
            (true, false) => OrderEffectiveness::PartialGrouped,
            (true, true) if result == OrderEffectiveness::Sorted => result,
            (true, true) => OrderEffectiveness::Grouped,
        }
    }

    // Walk the requested order against the residual order. Returns the
    // reversal decision when every requested term is served.
    fn sorted_reversal(&self, usage: &IndexUsage<'_>, ordering: &[OrderByExpr]) -> Option<bool> {
        let index_ordering = usage.ordering();
        let mut reverse: Option<bool> = None;
        let mut next = 0;

        for target in ordering {
            if let Some(column) = index_ordering.get(next)
                && column.expr == target.expr
            {
                let flipped = column.direction != target.direction;
                match reverse {
                    None => reverse = Some(flipped),
                    Some(decided) if decided != flipped => return None,
                    Some(_) => {}
                }
                next += 1;
                continue;
            }
            if usage.is_fixed_by_equality(&target.expr) {
                continue;
            }

            return None;
        }

        let reverse = reverse.unwrap_or(false);
        if reverse && !self.reverse_scans {
            return None;
        }

        Some(reverse)
    }
}
