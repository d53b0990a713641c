use crate::{
    db::query::{ConditionExpr, Expr, OrderByExpr, SourceId},
    model::{index::IndexModel, table::TableId},
};
use std::fmt;

///
/// OrderEffectiveness
///
/// How well an index's residual order serves the requested ORDER BY and
/// GROUP BY. Variants are declared worst to best.
///

#[derive(Clone, Copy, Debug, Default, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum OrderEffectiveness {
    #[default]
    None,
    PartialGrouped,
    Grouped,
    Sorted,
}

impl fmt::Display for OrderEffectiveness {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::None => "NONE",
            Self::PartialGrouped => "PARTIAL_GROUPED",
            Self::Grouped => "GROUPED",
            Self::Sorted => "SORTED",
        };
        write!(f, "{label}")
    }
}

///
/// EqualityBinding
/// One leading index column fixed by an `=` condition.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct EqualityBinding<'q> {
    pub column: Expr,
    pub comparand: &'q Expr,
    pub condition: &'q ConditionExpr,
}

///
/// RangeBound
/// One side of the inequality range on the first unbound column.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RangeBound<'q> {
    pub comparand: &'q Expr,
    pub inclusive: bool,
    pub condition: &'q ConditionExpr,
}

///
/// IndexUsage
///
/// Selection result for one index against one goal. Built privately by the
/// goal, then handed to ranking and lowering.
///
/// Equality bindings cover a gap-free leading prefix of the index columns;
/// range bounds, when present, apply to the column right after that prefix.
///

#[derive(Clone, Debug)]
pub struct IndexUsage<'q> {
    index: &'q IndexModel,
    leaf: SourceId,
    root: SourceId,
    leaf_table: TableId,
    equalities: Vec<EqualityBinding<'q>>,
    range_column: Option<Expr>,
    low: Option<RangeBound<'q>>,
    high: Option<RangeBound<'q>>,
    ordering: Vec<OrderByExpr>,
    reverse_scan: bool,
    effectiveness: OrderEffectiveness,
}

impl<'q> IndexUsage<'q> {
    #[must_use]
    pub const fn new(
        index: &'q IndexModel,
        leaf: SourceId,
        root: SourceId,
        leaf_table: TableId,
    ) -> Self {
        Self {
            index,
            leaf,
            root,
            leaf_table,
            equalities: Vec::new(),
            range_column: None,
            low: None,
            high: None,
            ordering: Vec::new(),
            reverse_scan: false,
            effectiveness: OrderEffectiveness::None,
        }
    }

    #[must_use]
    pub const fn index(&self) -> &'q IndexModel {
        self.index
    }

    #[must_use]
    pub const fn leaf(&self) -> SourceId {
        self.leaf
    }

    #[must_use]
    pub const fn root(&self) -> SourceId {
        self.root
    }

    #[must_use]
    pub const fn leaf_table(&self) -> TableId {
        self.leaf_table
    }

    #[must_use]
    pub fn equalities(&self) -> &[EqualityBinding<'q>] {
        &self.equalities
    }

    #[must_use]
    pub const fn equality_count(&self) -> usize {
        self.equalities.len()
    }

    #[must_use]
    pub const fn range_column(&self) -> Option<&Expr> {
        self.range_column.as_ref()
    }

    #[must_use]
    pub const fn low(&self) -> Option<&RangeBound<'q>> {
        self.low.as_ref()
    }

    #[must_use]
    pub const fn high(&self) -> Option<&RangeBound<'q>> {
        self.high.as_ref()
    }

    /// Number of recorded range sides, 0 to 2.
    #[must_use]
    pub const fn range_bound_count(&self) -> usize {
        self.low.is_some() as usize + self.high.is_some() as usize
    }

    /// Residual ordering: index columns after the equality prefix.
    #[must_use]
    pub fn ordering(&self) -> &[OrderByExpr] {
        &self.ordering
    }

    #[must_use]
    pub const fn reverse_scan(&self) -> bool {
        self.reverse_scan
    }

    #[must_use]
    pub const fn effectiveness(&self) -> OrderEffectiveness {
        self.effectiveness
    }

    #[must_use]
    pub const fn has_conditions(&self) -> bool {
        !self.equalities.is_empty() || self.low.is_some() || self.high.is_some()
    }

    /// An index is worth using when it helps ordering or binds a condition.
    #[must_use]
    pub const fn is_usable(&self) -> bool {
        !matches!(self.effectiveness, OrderEffectiveness::None) || self.has_conditions()
    }

    /// Whether `expr` is pinned to a single value by an equality binding,
    /// either as the bound column or as its comparand.
    #[must_use]
    pub fn is_fixed_by_equality(&self, expr: &Expr) -> bool {
        self.equalities
            .iter()
            .any(|binding| binding.column == *expr || binding.comparand == expr)
    }

    pub(in crate::db::plan) fn push_equality(&mut self, binding: EqualityBinding<'q>) {
        self.equalities.push(binding);
    }

    pub(in crate::db::plan) fn set_range_column(&mut self, column: Expr) {
        self.range_column = Some(column);
    }

    // First bound recorded per side wins.
    pub(in crate::db::plan) fn offer_low(&mut self, bound: RangeBound<'q>) {
        if self.low.is_none() {
            self.low = Some(bound);
        }
    }

    pub(in crate::db::plan) fn offer_high(&mut self, bound: RangeBound<'q>) {
        if self.high.is_none() {
            self.high = Some(bound);
        }
    }

    pub(in crate::db::plan) fn set_ordering(&mut self, ordering: Vec<OrderByExpr>) {
        self.ordering = ordering;
    }

    pub(in crate::db::plan) const fn set_reverse_scan(&mut self, reverse: bool) {
        self.reverse_scan = reverse;
    }

    pub(in crate::db::plan) const fn set_effectiveness(&mut self, effectiveness: OrderEffectiveness) {
        self.effectiveness = effectiveness;
    }
}
