use crate::{
    db::{
        direction::Direction,
        key::{EncodedSegment, KeyBuffer, OrderedValueEncodeError},
        plan::usage::{IndexUsage, RangeBound},
        query::Expr,
        scan::{ColumnScan, ScanSpec, SegmentEnvelope},
    },
    error::InternalError,
    model::index::IndexColumn,
    value::Value,
};
use std::ops::Bound;
use thiserror::Error as ThisError;

///
/// LoweringError
///
/// Failures turning a selected usage into byte-level scan bounds. The usage
/// itself was valid; its comparands could not be materialized.
///

#[derive(Debug, ThisError)]
pub enum LoweringError {
    #[error("comparand '{expr}' has no value at lowering time")]
    UnresolvedComparand { expr: String },

    #[error(
        "scan order names {given} columns but index '{index}' has {available} columns after its equality prefix"
    )]
    OrderArity {
        index: String,
        given: usize,
        available: usize,
    },

    #[error(transparent)]
    Encode(#[from] OrderedValueEncodeError),
}

impl From<LoweringError> for InternalError {
    fn from(err: LoweringError) -> Self {
        Self::lowering_unsupported(err.to_string())
    }
}

///
/// ScanOrder
///
/// How the residual columns should be traversed.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ScanOrder<'a> {
    /// Follow the usage: stored order, or fully reversed when it asks to.
    Usage,
    /// Explicit logical direction per residual column, outermost first.
    /// Columns past the end of the slice are scanned in stored order.
    Logical(&'a [Direction]),
}

/// Lower `usage` into a storage-ready scan, resolving every comparand
/// through `resolve`.
pub fn lower_usage(
    usage: &IndexUsage<'_>,
    mut resolve: impl FnMut(&Expr) -> Option<Value>,
    order: ScanOrder<'_>,
) -> Result<ScanSpec, LoweringError> {
    let index = usage.index();
    let prefix_len = usage.equality_count();

    let mut prefix = KeyBuffer::new();
    for (binding, column) in usage.equalities().iter().zip(&index.columns) {
        let value = resolve_value(&mut resolve, binding.comparand)?;
        let segment = EncodedSegment::encode(&value, column.direction)?;
        prefix.append_segment(segment.as_bytes());
    }

    let residual = &index.columns[prefix_len..];
    if let ScanOrder::Logical(directions) = order
        && directions.len() > residual.len()
    {
        return Err(LoweringError::OrderArity {
            index: index.name.clone(),
            given: directions.len(),
            available: residual.len(),
        });
    }

    let mut columns = Vec::with_capacity(residual.len());
    for (position, column) in residual.iter().enumerate() {
        let direction = physical_direction(usage, order, position, column);
        let envelope = if position == 0 && usage.range_column().is_some() {
            range_envelope(usage, column, &mut resolve)?
        } else {
            SegmentEnvelope::unbounded()
        };
        columns.push(ColumnScan::new(direction, envelope));
    }

    Ok(ScanSpec {
        index: index.name.clone(),
        prefix,
        columns,
        row_locator_segments: index.row_locator_segments,
    })
}

fn physical_direction(
    usage: &IndexUsage<'_>,
    order: ScanOrder<'_>,
    position: usize,
    column: &IndexColumn,
) -> Direction {
    match order {
        ScanOrder::Usage if usage.reverse_scan() => Direction::Desc,
        ScanOrder::Usage => Direction::Asc,
        ScanOrder::Logical(directions) => directions
            .get(position)
            .map_or(Direction::Asc, |logical| logical.relative_to(column.direction)),
    }
}

// Logical low/high become physical lower/upper; descending columns store
// inverted bytes, so the sides swap.
fn range_envelope(
    usage: &IndexUsage<'_>,
    column: &IndexColumn,
    resolve: &mut impl FnMut(&Expr) -> Option<Value>,
) -> Result<SegmentEnvelope, LoweringError> {
    let low = encode_bound(usage.low(), column, resolve)?;
    let high = encode_bound(usage.high(), column, resolve)?;

    Ok(if column.direction.is_asc() {
        SegmentEnvelope::new(low, high)
    } else {
        SegmentEnvelope::new(high, low)
    })
}

fn encode_bound(
    bound: Option<&RangeBound<'_>>,
    column: &IndexColumn,
    resolve: &mut impl FnMut(&Expr) -> Option<Value>,
) -> Result<Bound<EncodedSegment>, LoweringError> {
    let Some(bound) = bound else {
        return Ok(Bound::Unbounded);
    };

    let value = resolve_value(resolve, bound.comparand)?;
    let segment = EncodedSegment::encode(&value, column.direction)?;

    Ok(if bound.inclusive {
        Bound::Included(segment)
    } else {
        Bound::Excluded(segment)
    })
}

fn resolve_value(
    resolve: &mut impl FnMut(&Expr) -> Option<Value>,
    expr: &Expr,
) -> Result<Value, LoweringError> {
    resolve(expr).ok_or_else(|| LoweringError::UnresolvedComparand {
        expr: expr.to_string(),
    })
}
