//! Query fragments shared by the list endpoints.

use sea_orm::sea_query::{Expr, Func, SimpleExpr};
use sea_orm::{ColumnTrait, Order};

use crate::types::PaginationParams;

/// `lower(table.column) LIKE '%needle%'`
pub(crate) fn contains_ci<C: ColumnTrait>(column: C, needle: &str) -> SimpleExpr {
    Expr::expr(Func::lower(Expr::col((column.entity_name(), column))))
        .like(format!("%{}%", needle.to_lowercase()))
}

/// `lower(table.column) = lower(value)`
pub(crate) fn equals_ci<C: ColumnTrait>(column: C, value: &str) -> SimpleExpr {
    Expr::expr(Func::lower(Expr::col((column.entity_name(), column)))).eq(value.to_lowercase())
}

pub(crate) fn sort_order(params: &PaginationParams) -> Order {
    if params.is_descending() {
        Order::Desc
    } else {
        Order::Asc
    }
}
