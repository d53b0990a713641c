use super::*;
use crate::{
    config::PlannerConfig,
    error::{ErrorClass, ErrorOrigin},
    obs::sink::{MetricsEvent, MetricsSink, PlanKind, with_metrics_sink},
};
use std::cell::RefCell;

///
/// EventLog
///

#[derive(Default)]
struct EventLog(RefCell<Vec<MetricsEvent>>);

impl MetricsSink for EventLog {
    fn record(&self, event: MetricsEvent) {
        self.0.borrow_mut().push(event);
    }
}

fn group_fixture() -> Fixture {
    Fixture::new(vec![
        IndexModel::table("l_sku", LINES, vec![IndexColumn::asc(LINES, "sku")]),
        IndexModel::group(
            "g_customer_sku",
            ORDERS,
            LINES,
            vec![
                IndexColumn::asc(ORDERS, "customer"),
                IndexColumn::asc(LINES, "sku"),
            ],
        ),
    ])
}

#[test]
fn ordering_value_beats_selectivity() {
    let fx = Fixture::new(vec![
        orders_index("o_a", &[("a", Direction::Asc)]),
        orders_index("o_b", &[("b", Direction::Asc)]),
    ]);
    let conditions = vec![eq(fx.orders_col("a"), lit(1))];
    let ordering = vec![OrderByExpr::asc(fx.orders_col("b"))];
    let goal = fx.goal().with_conditions(&conditions).with_ordering(&ordering);

    let best = goal
        .pick_best_index(fx.orders)
        .expect("orders source is planned")
        .expect("an index is usable");

    assert_eq!(best.index().name, "o_b");
    assert_eq!(best.effectiveness(), OrderEffectiveness::Sorted);
}

#[test]
fn group_index_wins_when_its_root_is_in_the_chain() {
    let fx = group_fixture();
    let conditions = vec![
        eq(fx.orders_col("customer"), lit(7)),
        eq(fx.lines_col("sku"), lit(3)),
    ];
    let goal = fx.goal().with_conditions(&conditions);

    let best = goal
        .pick_best_index(fx.lines)
        .expect("lines source is planned")
        .expect("an index is usable");

    assert_eq!(best.index().name, "g_customer_sku");
    assert_eq!(best.equality_count(), 2);
    assert_eq!(best.leaf(), fx.lines);
    assert_eq!(best.root(), fx.orders);
}

#[test]
fn group_index_is_skipped_without_its_root_source() {
    let fx = group_fixture();
    let mut sources = QuerySources::new();
    let lines = sources.add(LINES, None);
    let conditions = vec![eq(Expr::column(lines, "sku"), lit(3))];
    let goal = IndexGoal::new(&fx.schema, &sources).with_conditions(&conditions);

    let log = EventLog::default();
    let best = with_metrics_sink(&log, || goal.pick_best_index(lines))
        .expect("lines source is planned")
        .expect("table index is usable");

    assert_eq!(best.index().name, "l_sku");
    assert_eq!(
        log.0.borrow().as_slice(),
        &[MetricsEvent::PlanCandidate { usable: true }]
    );
}

#[test]
fn group_index_is_only_a_candidate_for_its_leaf_table() {
    let fx = group_fixture();
    let conditions = vec![eq(fx.orders_col("customer"), lit(7))];
    let goal = fx.goal().with_conditions(&conditions);

    let best = goal
        .pick_best_index(fx.orders)
        .expect("orders source is planned");

    assert!(best.is_none());
}

#[test]
fn disabling_group_indexes_leaves_table_indexes() {
    let fx = group_fixture();
    let conditions = vec![
        eq(fx.orders_col("customer"), lit(7)),
        eq(fx.lines_col("sku"), lit(3)),
    ];
    let config = PlannerConfig {
        group_indexes: false,
        ..PlannerConfig::default()
    };
    let goal = fx.goal().with_conditions(&conditions).with_config(config);

    let best = goal
        .pick_best_index(fx.lines)
        .expect("lines source is planned")
        .expect("table index is usable");

    assert_eq!(best.index().name, "l_sku");
}

#[test]
fn best_across_sources_folds_per_source_winners() {
    let fx = Fixture::new(vec![
        orders_index("o_a", &[("a", Direction::Asc)]),
        IndexModel::table("l_sku", LINES, vec![IndexColumn::asc(LINES, "sku")]),
    ]);
    let conditions = vec![
        cmp(fx.orders_col("a"), CompareOp::Gt, lit(1)),
        eq(fx.lines_col("sku"), lit(3)),
    ];
    let goal = fx.goal().with_conditions(&conditions);

    let best = goal
        .pick_best_index_across([fx.orders, fx.lines])
        .expect("sources are planned")
        .expect("an index is usable");

    assert_eq!(best.index().name, "l_sku");
}

#[test]
fn plan_falls_back_to_full_scan() {
    let fx = Fixture::new(vec![orders_index("o_a", &[("a", Direction::Asc)])]);
    let conditions = vec![eq(fx.orders_col("z"), lit(1))];
    let goal = fx.goal().with_conditions(&conditions);

    let log = EventLog::default();
    let path = with_metrics_sink(&log, || goal.plan([fx.orders])).expect("plan succeeds");

    assert!(path.is_full_scan());
    assert!(path.usage().is_none());
    assert_eq!(path.to_string(), "FULL SCAN");
    assert_eq!(
        log.0.borrow().as_slice(),
        &[
            MetricsEvent::PlanCandidate { usable: false },
            MetricsEvent::PlanChosen {
                kind: PlanKind::FullScan
            },
        ]
    );
}

#[test]
fn plan_explains_the_chosen_index() {
    let fx = Fixture::new(vec![orders_index(
        "o_ab",
        &[("a", Direction::Asc), ("b", Direction::Desc)],
    )]);
    let conditions = vec![
        eq(fx.orders_col("a"), lit(1)),
        cmp(fx.orders_col("b"), CompareOp::Ge, lit(2)),
        cmp(fx.orders_col("b"), CompareOp::Lt, lit(8)),
    ];
    let ordering = vec![OrderByExpr::asc(fx.orders_col("b"))];
    let goal = fx.goal().with_conditions(&conditions).with_ordering(&ordering);

    let path = goal.plan([fx.orders]).expect("plan succeeds");

    assert_eq!(
        path.to_string(),
        "INDEX o_ab [SORTED] eq(s0.a = 1) range(2 <= s0.b < 8) order(s0.b DESC) reverse"
    );
}

#[test]
fn unknown_source_is_a_planner_invariant() {
    let fx = Fixture::new(vec![orders_index("o_a", &[("a", Direction::Asc)])]);
    let goal = fx.goal();

    let err = goal
        .pick_best_index(SourceId(99))
        .expect_err("source outside the query must fail");

    assert_eq!(err.class, ErrorClass::InvariantViolation);
    assert_eq!(err.origin, ErrorOrigin::Planner);
}
