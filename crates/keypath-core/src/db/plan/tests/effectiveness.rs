use super::*;
use crate::config::PlannerConfig;

fn ab_fixture() -> Fixture {
    Fixture::new(vec![orders_index(
        "o_ab",
        &[("a", Direction::Asc), ("b", Direction::Desc)],
    )])
}

#[test]
fn matching_order_is_sorted_without_reversal() {
    let fx = ab_fixture();
    let ordering = vec![
        OrderByExpr::asc(fx.orders_col("a")),
        OrderByExpr::desc(fx.orders_col("b")),
    ];
    let goal = fx.goal().with_ordering(&ordering);

    let (usable, usage) = evaluate(&goal, fx.index("o_ab"), fx.orders);

    assert!(usable);
    assert_eq!(usage.effectiveness(), OrderEffectiveness::Sorted);
    assert!(!usage.reverse_scan());
}

#[test]
fn consistently_flipped_order_is_sorted_with_reversal() {
    let fx = ab_fixture();
    let ordering = vec![
        OrderByExpr::desc(fx.orders_col("a")),
        OrderByExpr::asc(fx.orders_col("b")),
    ];
    let goal = fx.goal().with_ordering(&ordering);

    let (_, usage) = evaluate(&goal, fx.index("o_ab"), fx.orders);

    assert_eq!(usage.effectiveness(), OrderEffectiveness::Sorted);
    assert!(usage.reverse_scan());
}

#[test]
fn inconsistent_reversal_earns_no_sorted_credit() {
    let fx = ab_fixture();
    let ordering = vec![
        OrderByExpr::asc(fx.orders_col("a")),
        OrderByExpr::asc(fx.orders_col("b")),
    ];
    let goal = fx.goal().with_ordering(&ordering);

    let (usable, usage) = evaluate(&goal, fx.index("o_ab"), fx.orders);

    assert!(!usable);
    assert_eq!(usage.effectiveness(), OrderEffectiveness::None);
    assert!(!usage.reverse_scan());
}

#[test]
fn leading_order_prefix_is_sorted() {
    let fx = ab_fixture();
    let ordering = vec![OrderByExpr::desc(fx.orders_col("a"))];
    let goal = fx.goal().with_ordering(&ordering);

    let (_, usage) = evaluate(&goal, fx.index("o_ab"), fx.orders);

    assert_eq!(usage.effectiveness(), OrderEffectiveness::Sorted);
    assert!(usage.reverse_scan());
}

#[test]
fn order_past_the_index_is_not_sorted() {
    let fx = ab_fixture();
    let ordering = vec![
        OrderByExpr::asc(fx.orders_col("a")),
        OrderByExpr::desc(fx.orders_col("b")),
        OrderByExpr::asc(fx.orders_col("c")),
    ];
    let goal = fx.goal().with_ordering(&ordering);

    let (_, usage) = evaluate(&goal, fx.index("o_ab"), fx.orders);

    assert_eq!(usage.effectiveness(), OrderEffectiveness::None);
}

#[test]
fn equality_bound_terms_are_skipped_in_the_order_walk() {
    let fx = ab_fixture();
    let conditions = vec![eq(fx.orders_col("a"), lit(3))];
    let ordering = vec![
        OrderByExpr::asc(fx.orders_col("a")),
        OrderByExpr::asc(fx.orders_col("b")),
    ];
    let goal = fx.goal().with_conditions(&conditions).with_ordering(&ordering);

    let (_, usage) = evaluate(&goal, fx.index("o_ab"), fx.orders);

    assert_eq!(usage.equality_count(), 1);
    assert_eq!(usage.effectiveness(), OrderEffectiveness::Sorted);
    assert!(usage.reverse_scan());
}

#[test]
fn fully_bound_index_keeps_order_credit_for_fixed_terms() {
    let fx = ab_fixture();
    let conditions = vec![
        eq(fx.orders_col("a"), lit(3)),
        eq(fx.orders_col("b"), lit(4)),
    ];
    let ordering = vec![
        OrderByExpr::desc(fx.orders_col("b")),
        OrderByExpr::asc(fx.orders_col("a")),
    ];
    let goal = fx.goal().with_conditions(&conditions).with_ordering(&ordering);

    let (usable, usage) = evaluate(&goal, fx.index("o_ab"), fx.orders);

    assert!(usable);
    assert_eq!(usage.equality_count(), 2);
    assert!(usage.ordering().is_empty());
    assert_eq!(usage.effectiveness(), OrderEffectiveness::Sorted);
    assert!(!usage.reverse_scan());

    let grouping = vec![fx.orders_col("a")];
    let goal = fx.goal().with_conditions(&conditions).with_grouping(&grouping);
    let (_, usage) = evaluate(&goal, fx.index("o_ab"), fx.orders);
    assert_eq!(usage.effectiveness(), OrderEffectiveness::Grouped);

    // A term outside the bound columns still has nothing to ride on.
    let ordering = vec![OrderByExpr::asc(fx.orders_col("c"))];
    let goal = fx.goal().with_conditions(&conditions).with_ordering(&ordering);
    let (usable, usage) = evaluate(&goal, fx.index("o_ab"), fx.orders);
    assert!(usable);
    assert_eq!(usage.effectiveness(), OrderEffectiveness::None);
}

#[test]
fn reversal_is_refused_when_reverse_scans_are_disabled() {
    let fx = ab_fixture();
    let ordering = vec![OrderByExpr::desc(fx.orders_col("a"))];
    let config = PlannerConfig {
        reverse_scans: false,
        ..PlannerConfig::default()
    };
    let goal = fx.goal().with_ordering(&ordering).with_config(config);

    let (usable, usage) = evaluate(&goal, fx.index("o_ab"), fx.orders);

    assert!(!usable);
    assert_eq!(usage.effectiveness(), OrderEffectiveness::None);
    assert!(!usage.reverse_scan());
}

#[test]
fn year_desc_month_asc_scenario_has_no_sorted_credit() {
    let fx = Fixture::new(vec![orders_index(
        "o_year_month",
        &[("year", Direction::Desc), ("month", Direction::Asc)],
    )]);
    let conditions = vec![eq(fx.orders_col("month"), lit(6))];
    let ordering = vec![
        OrderByExpr::asc(fx.orders_col("year")),
        OrderByExpr::asc(fx.orders_col("month")),
    ];
    let goal = fx.goal().with_conditions(&conditions).with_ordering(&ordering);

    let (usable, usage) = evaluate(&goal, fx.index("o_year_month"), fx.orders);

    // month is not leading, so it binds nothing and cannot be skipped;
    // year asks for reversal and month then disagrees.
    assert_eq!(usage.equality_count(), 0);
    assert_eq!(usage.range_bound_count(), 0);
    assert_eq!(usage.effectiveness(), OrderEffectiveness::None);
    assert!(!usage.reverse_scan());
    assert!(!usable);
}

#[test]
fn grouping_found_as_a_set_is_grouped() {
    let fx = Fixture::new(vec![orders_index(
        "o_abc",
        &[("a", Direction::Asc), ("b", Direction::Desc), ("c", Direction::Asc)],
    )]);
    let grouping = vec![fx.orders_col("b"), fx.orders_col("a")];
    let goal = fx.goal().with_grouping(&grouping);

    let (usable, usage) = evaluate(&goal, fx.index("o_abc"), fx.orders);

    assert!(usable);
    assert_eq!(usage.effectiveness(), OrderEffectiveness::Grouped);
}

#[test]
fn grouping_fragmented_by_an_interleaved_column_is_partial() {
    let fx = Fixture::new(vec![orders_index(
        "o_abc",
        &[("a", Direction::Asc), ("b", Direction::Asc), ("c", Direction::Asc)],
    )]);

    let spread = vec![fx.orders_col("a"), fx.orders_col("c")];
    let goal = fx.goal().with_grouping(&spread);
    let (_, usage) = evaluate(&goal, fx.index("o_abc"), fx.orders);
    assert_eq!(usage.effectiveness(), OrderEffectiveness::PartialGrouped);

    let missing = vec![fx.orders_col("a"), fx.orders_col("z")];
    let goal = fx.goal().with_grouping(&missing);
    let (_, usage) = evaluate(&goal, fx.index("o_abc"), fx.orders);
    assert_eq!(usage.effectiveness(), OrderEffectiveness::PartialGrouped);

    let absent = vec![fx.orders_col("z")];
    let goal = fx.goal().with_grouping(&absent);
    let (_, usage) = evaluate(&goal, fx.index("o_abc"), fx.orders);
    assert_eq!(usage.effectiveness(), OrderEffectiveness::None);
}

#[test]
fn equality_bound_grouping_terms_do_not_break_contiguity() {
    let fx = Fixture::new(vec![orders_index(
        "o_ab",
        &[("a", Direction::Asc), ("b", Direction::Asc)],
    )]);
    let conditions = vec![eq(fx.orders_col("a"), lit(1))];
    let grouping = vec![fx.orders_col("a"), fx.orders_col("b")];
    let goal = fx.goal().with_conditions(&conditions).with_grouping(&grouping);

    let (_, usage) = evaluate(&goal, fx.index("o_ab"), fx.orders);

    assert_eq!(usage.effectiveness(), OrderEffectiveness::Grouped);
}

#[test]
fn sorted_survives_a_fully_matched_grouping() {
    let fx = ab_fixture();
    let ordering = vec![OrderByExpr::asc(fx.orders_col("a"))];
    let grouping = vec![fx.orders_col("a")];
    let goal = fx.goal().with_ordering(&ordering).with_grouping(&grouping);

    let (_, usage) = evaluate(&goal, fx.index("o_ab"), fx.orders);

    assert_eq!(usage.effectiveness(), OrderEffectiveness::Sorted);
}

#[test]
fn partial_grouping_overrides_sorted() {
    let fx = ab_fixture();
    let ordering = vec![OrderByExpr::asc(fx.orders_col("a"))];
    let grouping = vec![fx.orders_col("a"), fx.orders_col("z")];
    let goal = fx.goal().with_ordering(&ordering).with_grouping(&grouping);

    let (_, usage) = evaluate(&goal, fx.index("o_ab"), fx.orders);

    assert_eq!(usage.effectiveness(), OrderEffectiveness::PartialGrouped);
}

#[test]
fn empty_requests_are_treated_as_absent() {
    let fx = ab_fixture();
    let goal = fx.goal().with_ordering(&[]).with_grouping(&[]);

    assert!(goal.ordering().is_none());
    assert!(goal.grouping().is_none());

    let (usable, usage) = evaluate(&goal, fx.index("o_ab"), fx.orders);
    assert!(!usable);
    assert_eq!(usage.effectiveness(), OrderEffectiveness::None);
}
