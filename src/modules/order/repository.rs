use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::PgExecutor;

/// One entry of an order's frozen line-item manifest. The price recorded
/// here is the product's price at read time; orders do not freeze prices.
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct OrderLine {
    pub id: String,
    pub product_id: String,
    pub title: String,
    pub quantity: i32,
    pub price: i32,
    pub line_total: i64,
}

/// A checked-out cart together with its line-item manifest.
#[derive(Serialize, Clone, Debug, sqlx::FromRow)]
pub struct Order {
    pub id: String,
    pub owner_id: String,
    pub name: Option<String>,
    pub address: Option<String>,
    pub placed_at: Option<NaiveDateTime>,
    pub created_at: NaiveDateTime,
    pub items: sqlx::types::Json<Vec<OrderLine>>,
    pub total: i64,
}

#[derive(sqlx::FromRow)]
struct OrderWithCount {
    #[sqlx(flatten)]
    order: Order,
    total_count: i64,
}

#[derive(Debug)]
pub enum Error {
    UnexpectedError,
}

const ORDER_SELECT: &str = "
    WITH manifests AS (
        SELECT
            cart_items.cart_id,
            JSONB_AGG(
                JSONB_BUILD_OBJECT(
                    'id', cart_items.id,
                    'product_id', cart_items.product_id,
                    'title', products.title,
                    'quantity', cart_items.quantity,
                    'price', products.price,
                    'line_total', cart_items.quantity::BIGINT * products.price
                )
                ORDER BY cart_items.created_at, cart_items.id
            ) AS items,
            SUM(cart_items.quantity::BIGINT * products.price)::BIGINT AS total
        FROM cart_items
        INNER JOIN products ON products.id = cart_items.product_id
        GROUP BY cart_items.cart_id
    )
    SELECT
        carts.id,
        carts.owner_id,
        carts.name,
        carts.address,
        carts.placed_at,
        carts.created_at,
        COALESCE(manifests.items, '[]'::JSONB) AS items,
        COALESCE(manifests.total, 0) AS total,
        COUNT(*) OVER () AS total_count
    FROM carts
    LEFT JOIN manifests ON manifests.cart_id = carts.id
    WHERE carts.status = 'CHECKED_OUT'
";

pub async fn find_many<'e, E: PgExecutor<'e>>(
    e: E,
    owner_id: Option<String>,
    offset: u32,
    limit: u32,
) -> Result<(Vec<Order>, u32), Error> {
    let query = format!(
        "
        {ORDER_SELECT}
            AND ($1::TEXT IS NULL OR carts.owner_id = $1)
        ORDER BY carts.placed_at DESC
        OFFSET $2 LIMIT $3
        "
    );

    let rows = sqlx::query_as::<_, OrderWithCount>(query.as_str())
        .bind(owner_id)
        .bind(offset as i64)
        .bind(limit as i64)
        .fetch_all(e)
        .await
        .map_err(|err| {
            tracing::error!("Error occurred while trying to fetch many orders: {}", err);
            Error::UnexpectedError
        })?;

    let total = rows.first().map(|row| row.total_count as u32).unwrap_or(0);
    Ok((rows.into_iter().map(|row| row.order).collect(), total))
}

pub async fn find_by_id<'e, E: PgExecutor<'e>>(e: E, id: String) -> Result<Option<Order>, Error> {
    let query = format!("{ORDER_SELECT} AND carts.id = $1");

    sqlx::query_as::<_, OrderWithCount>(query.as_str())
        .bind(id.clone())
        .fetch_optional(e)
        .await
        .map(|row| row.map(|row| row.order))
        .map_err(|err| {
            tracing::error!(
                "Error occurred while trying to fetch order by id {}: {}",
                id,
                err
            );
            Error::UnexpectedError
        })
}
