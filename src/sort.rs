use sea_orm::{ColumnTrait, sea_query::Order};

use crate::models::ListQuery;

const DEFAULT_SORT_COLUMN: &str = "id";
const DEFAULT_SORT_ORDER: &str = "ASC";

/// Parse sorting from a [`ListQuery`], supporting both the JSON array and
/// the plain column formats.
///
/// Unknown columns fall back to `default_column`; anything other than `ASC`
/// (case-insensitive) sorts descending.
pub fn parse_sorting<C>(
    query: &ListQuery,
    order_column_logic: &[(&str, C)],
    default_column: C,
) -> (C, Order)
where
    C: ColumnTrait,
{
    let (sort_column, sort_order) = match &query.sort {
        Some(sort) if sort.starts_with('[') => {
            let sort_vec: Vec<String> = serde_json::from_str(sort).unwrap_or_default();
            (
                sort_vec
                    .first()
                    .cloned()
                    .unwrap_or_else(|| DEFAULT_SORT_COLUMN.to_string()),
                sort_vec
                    .get(1)
                    .cloned()
                    .unwrap_or_else(|| DEFAULT_SORT_ORDER.to_string()),
            )
        }
        Some(sort) => (
            sort.clone(),
            query
                .order
                .clone()
                .unwrap_or_else(|| DEFAULT_SORT_ORDER.to_string()),
        ),
        None => (
            DEFAULT_SORT_COLUMN.to_string(),
            DEFAULT_SORT_ORDER.to_string(),
        ),
    };

    let order_direction = if sort_order.eq_ignore_ascii_case("ASC") {
        Order::Asc
    } else {
        Order::Desc
    };

    let order_column = order_column_logic
        .iter()
        .find(|(col_name, _)| *col_name == sort_column)
        .map_or(default_column, |(_, col)| *col);

    (order_column, order_direction)
}
