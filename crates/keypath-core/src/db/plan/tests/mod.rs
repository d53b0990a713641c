mod effectiveness;
mod goal;
mod rank;

use super::*;
use crate::{
    db::{
        direction::Direction,
        query::{CompareOp, ConditionExpr, Expr, OrderByExpr, QuerySources, SourceId, SubqueryId},
    },
    model::{
        index::{IndexColumn, IndexModel},
        schema::Schema,
        table::{TableId, TableModel},
    },
};

const ORDERS: TableId = TableId(1);
const LINES: TableId = TableId(2);

///
/// Fixture
///
/// `orders` with child table `lines`, read through two sources where the
/// lines source is nested under the orders source.
///

struct Fixture {
    schema: Schema,
    sources: QuerySources,
    orders: SourceId,
    lines: SourceId,
}

impl Fixture {
    fn new(indexes: Vec<IndexModel>) -> Self {
        let mut schema = Schema::new();
        schema
            .add_table(TableModel::new(ORDERS, "orders"))
            .expect("orders table should register");
        schema
            .add_table(TableModel::new(LINES, "lines").with_parent(ORDERS))
            .expect("lines table should register");
        for index in indexes {
            schema.add_index(index).expect("index should register");
        }

        let mut sources = QuerySources::new();
        let orders = sources.add(ORDERS, None);
        let lines = sources.add(LINES, Some(orders));

        Self {
            schema,
            sources,
            orders,
            lines,
        }
    }

    fn index(&self, name: &str) -> &IndexModel {
        self.schema.index(name).expect("index should exist")
    }

    fn goal(&self) -> IndexGoal<'_> {
        IndexGoal::new(&self.schema, &self.sources)
    }

    fn orders_col(&self, column: &str) -> Expr {
        Expr::column(self.orders, column)
    }

    fn lines_col(&self, column: &str) -> Expr {
        Expr::column(self.lines, column)
    }
}

fn orders_index(name: &str, columns: &[(&str, Direction)]) -> IndexModel {
    IndexModel::table(
        name,
        ORDERS,
        columns
            .iter()
            .map(|(column, direction)| IndexColumn::new(ORDERS, *column, *direction))
            .collect(),
    )
}

fn lit(value: i64) -> Expr {
    Expr::literal(value)
}

fn cmp(left: Expr, op: CompareOp, right: Expr) -> ConditionExpr {
    ConditionExpr::compare(left, op, right)
}

fn eq(left: Expr, right: Expr) -> ConditionExpr {
    ConditionExpr::equals(left, right)
}

/// Evaluate `index` as a table index over `source` and return the usage.
fn evaluate<'q>(
    goal: &IndexGoal<'q>,
    index: &'q IndexModel,
    source: SourceId,
) -> (bool, IndexUsage<'q>) {
    let mut usage = IndexUsage::new(index, source, source, index.leaf_table());
    let usable = goal.usable(&mut usage);

    (usable, usage)
}
