use super::*;
use proptest::prelude::*;
use std::cmp::Ordering;

///
/// Shape
/// Ranking-relevant facts of one synthetic usage.
///

#[derive(Clone, Copy, Debug)]
struct Shape {
    effectiveness: OrderEffectiveness,
    equalities: usize,
    low: bool,
    high: bool,
    width: usize,
    leaf: u32,
}

impl Shape {
    const fn plain() -> Self {
        Self {
            effectiveness: OrderEffectiveness::None,
            equalities: 0,
            low: false,
            high: false,
            width: 2,
            leaf: 1,
        }
    }
}

// Models and conditions must outlive the usages that borrow them.
struct Pool {
    models: Vec<IndexModel>,
    condition: ConditionExpr,
    comparand: Expr,
}

impl Pool {
    fn new(shapes: &[Shape]) -> Self {
        let models = shapes
            .iter()
            .enumerate()
            .map(|(i, shape)| {
                let table = TableId(shape.leaf);
                IndexModel::table(
                    format!("i{i}"),
                    table,
                    (0..shape.width.max(shape.equalities + 1))
                        .map(|c| IndexColumn::asc(table, format!("c{c}")))
                        .collect(),
                )
            })
            .collect();

        Self {
            models,
            condition: ConditionExpr::equals(Expr::column(SourceId(0), "c0"), lit(1)),
            comparand: lit(1),
        }
    }

    fn usage(&self, i: usize, shape: Shape) -> IndexUsage<'_> {
        let model = &self.models[i];
        let mut usage = IndexUsage::new(model, SourceId(0), SourceId(0), model.leaf_table());
        for c in 0..shape.equalities {
            usage.push_equality(EqualityBinding {
                column: Expr::column(SourceId(0), format!("c{c}")),
                comparand: &self.comparand,
                condition: &self.condition,
            });
        }
        let bound = RangeBound {
            comparand: &self.comparand,
            inclusive: true,
            condition: &self.condition,
        };
        if shape.low {
            usage.offer_low(bound.clone());
        }
        if shape.high {
            usage.offer_high(bound);
        }
        usage.set_effectiveness(shape.effectiveness);

        usage
    }
}

fn rank(a: Shape, b: Shape) -> Ordering {
    let pool = Pool::new(&[a, b]);
    IndexRanker::default().compare(&pool.usage(0, a), &pool.usage(1, b))
}

#[test]
fn effectiveness_dominates_selectivity() {
    let sorted = Shape {
        effectiveness: OrderEffectiveness::Sorted,
        ..Shape::plain()
    };
    let selective = Shape {
        equalities: 2,
        low: true,
        high: true,
        ..Shape::plain()
    };

    assert_eq!(rank(sorted, selective), Ordering::Greater);
    assert_eq!(rank(selective, sorted), Ordering::Less);
}

#[test]
fn criteria_apply_in_priority_order() {
    let base = Shape::plain();

    let more_equalities = Shape {
        equalities: 1,
        width: 4,
        ..base
    };
    assert_eq!(rank(more_equalities, base), Ordering::Greater);

    let more_bounds = Shape { low: true, ..base };
    assert_eq!(rank(more_bounds, base), Ordering::Greater);

    let narrower = Shape { width: 1, ..base };
    assert_eq!(rank(narrower, base), Ordering::Greater);

    let deeper_leaf = Shape { leaf: 2, ..base };
    assert_eq!(rank(deeper_leaf, base), Ordering::Greater);

    assert_eq!(rank(base, base), Ordering::Equal);
}

#[test]
fn better_keeps_the_incumbent_on_ties() {
    let shape = Shape::plain();
    let pool = Pool::new(&[shape, shape]);
    let ranker = IndexRanker::default();

    let winner = ranker.better(Some(pool.usage(0, shape)), pool.usage(1, shape));
    assert_eq!(winner.index().name, "i0");

    let winner = ranker.better(None, pool.usage(1, shape));
    assert_eq!(winner.index().name, "i1");
}

#[test]
fn cost_model_is_compared_before_the_heuristic() {
    struct PreferNamed(&'static str);

    impl CostModel for PreferNamed {
        fn cost(&self, usage: &IndexUsage<'_>) -> u64 {
            u64::from(usage.index().name != self.0)
        }
    }

    let weak = Shape::plain();
    let strong = Shape {
        effectiveness: OrderEffectiveness::Sorted,
        ..weak
    };
    let pool = Pool::new(&[weak, strong]);
    let model = PreferNamed("i0");
    let ranker = IndexRanker::new(&model);

    assert_eq!(
        ranker.compare(&pool.usage(0, weak), &pool.usage(1, strong)),
        Ordering::Greater
    );
}

fn arb_shape() -> impl Strategy<Value = Shape> {
    (0u8..4, 0usize..3, any::<bool>(), any::<bool>(), 1usize..4, 1u32..4).prop_map(
        |(effectiveness, equalities, low, high, width, leaf)| Shape {
            effectiveness: match effectiveness {
                0 => OrderEffectiveness::None,
                1 => OrderEffectiveness::PartialGrouped,
                2 => OrderEffectiveness::Grouped,
                _ => OrderEffectiveness::Sorted,
            },
            equalities,
            low,
            high,
            width,
            leaf,
        },
    )
}

proptest! {
    #[test]
    fn ranker_is_a_strict_weak_ordering(a in arb_shape(), b in arb_shape(), c in arb_shape()) {
        let pool = Pool::new(&[a, b, c]);
        let (ua, ub, uc) = (pool.usage(0, a), pool.usage(1, b), pool.usage(2, c));
        let ranker = IndexRanker::default();

        prop_assert_eq!(ranker.compare(&ua, &ub), ranker.compare(&ub, &ua).reverse());
        prop_assert_eq!(ranker.compare(&ua, &ua), Ordering::Equal);

        let ab = ranker.compare(&ua, &ub);
        let bc = ranker.compare(&ub, &uc);
        if ab != Ordering::Less && bc != Ordering::Less {
            prop_assert_ne!(ranker.compare(&ua, &uc), Ordering::Less);
        }
        if ab == Ordering::Greater && bc == Ordering::Greater {
            prop_assert_eq!(ranker.compare(&ua, &uc), Ordering::Greater);
        }
    }
}
