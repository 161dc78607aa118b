use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::PgExecutor;
use ulid::Ulid;

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq, sqlx::Type)]
#[sqlx(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CartStatus {
    #[serde(rename = "NOT_CHECKED_OUT")]
    NotCheckedOut,
    #[serde(rename = "CHECKED_OUT")]
    CheckedOut,
}

#[derive(Serialize, Clone, Debug, sqlx::FromRow)]
pub struct Cart {
    pub id: String,
    pub owner_id: String,
    pub status: CartStatus,
    pub name: Option<String>,
    pub address: Option<String>,
    pub placed_at: Option<NaiveDateTime>,
    pub created_at: NaiveDateTime,
    pub updated_at: Option<NaiveDateTime>,
}

#[derive(Serialize, Clone, Debug, sqlx::FromRow)]
pub struct CartItem {
    pub id: String,
    pub cart_id: String,
    pub product_id: String,
    pub quantity: i32,
    pub created_at: NaiveDateTime,
}

/// A line item joined with its product, as listed in the active cart. The
/// price is the product's current price, looked up at read time, and
/// `line_number` is a display ordinal only; the stable `id` is the
/// addressing key.
#[derive(Serialize, Clone, Debug, sqlx::FromRow)]
pub struct CartLine {
    pub id: String,
    pub product_id: String,
    pub title: String,
    pub quantity: i32,
    pub price: i32,
    pub line_total: i64,
    pub line_number: i64,
    pub created_at: NaiveDateTime,
}

#[derive(sqlx::FromRow)]
struct CartLineWithCount {
    #[sqlx(flatten)]
    line: CartLine,
    total_count: i64,
}

/// A single line item merged with its product's public fields.
#[derive(Serialize, Clone, Debug, sqlx::FromRow)]
pub struct CartLineDetail {
    pub id: String,
    pub product_id: String,
    pub title: String,
    pub description: String,
    pub price: i32,
    pub image_url: Option<String>,
    pub category_id: String,
    pub quantity: i32,
    pub line_total: i64,
}

#[derive(Debug)]
pub enum Error {
    UnexpectedError,
}

/// Provisions an active cart for the owner if they do not have one, carrying
/// the contact fields forward from their most recent order. Safe to call
/// repeatedly: the partial unique index on active carts turns a second
/// insert into a no-op.
pub async fn create_if_absent<'e, E: PgExecutor<'e>>(
    e: E,
    owner_id: String,
) -> Result<Option<Cart>, Error> {
    let created = sqlx::query_as::<_, Cart>(
        "
        INSERT INTO carts (id, owner_id, status, name, address)
        SELECT
            $1,
            $2,
            'NOT_CHECKED_OUT',
            (
                SELECT name FROM carts
                WHERE owner_id = $2 AND status = 'CHECKED_OUT'
                ORDER BY placed_at DESC
                LIMIT 1
            ),
            (
                SELECT address FROM carts
                WHERE owner_id = $2 AND status = 'CHECKED_OUT'
                ORDER BY placed_at DESC
                LIMIT 1
            )
        ON CONFLICT (owner_id) WHERE status = 'NOT_CHECKED_OUT' DO NOTHING
        RETURNING *
        ",
    )
    .bind(Ulid::new().to_string())
    .bind(owner_id.clone())
    .fetch_optional(e)
    .await
    .map_err(|err| {
        tracing::error!(
            "Error occurred while trying to create a cart for owner {}: {}",
            owner_id,
            err
        );
        Error::UnexpectedError
    })?;

    if created.is_none() {
        tracing::warn!("Owner {} already has an active cart", owner_id);
    }

    Ok(created)
}

pub async fn find_active_by_owner_id<'e, E: PgExecutor<'e>>(
    e: E,
    owner_id: String,
) -> Result<Option<Cart>, Error> {
    sqlx::query_as::<_, Cart>("SELECT * FROM carts WHERE owner_id = $1 AND status = $2")
        .bind(owner_id.clone())
        .bind(CartStatus::NotCheckedOut)
        .fetch_optional(e)
        .await
        .map_err(|err| {
            tracing::error!(
                "Error occurred while trying to fetch active cart for owner {}: {}",
                owner_id,
                err
            );
            Error::UnexpectedError
        })
}

/// As `find_active_by_owner_id`, but takes a row lock so concurrent
/// checkouts for the same owner serialize against each other. Only
/// meaningful inside a transaction.
pub async fn find_active_by_owner_id_for_update<'e, E: PgExecutor<'e>>(
    e: E,
    owner_id: String,
) -> Result<Option<Cart>, Error> {
    sqlx::query_as::<_, Cart>("SELECT * FROM carts WHERE owner_id = $1 AND status = $2 FOR UPDATE")
        .bind(owner_id.clone())
        .bind(CartStatus::NotCheckedOut)
        .fetch_optional(e)
        .await
        .map_err(|err| {
            tracing::error!(
                "Error occurred while trying to lock active cart for owner {}: {}",
                owner_id,
                err
            );
            Error::UnexpectedError
        })
}

pub async fn set_active_contact_by_owner_id<'e, E: PgExecutor<'e>>(
    e: E,
    owner_id: String,
    name: Option<String>,
    address: Option<String>,
) -> Result<(), Error> {
    sqlx::query(
        "
        UPDATE carts SET
            name = COALESCE($2, name),
            address = COALESCE($3, address),
            updated_at = NOW()
        WHERE owner_id = $1 AND status = 'NOT_CHECKED_OUT'
        ",
    )
    .bind(owner_id.clone())
    .bind(name)
    .bind(address)
    .execute(e)
    .await
    .map(|_| ())
    .map_err(|err| {
        tracing::error!(
            "Error occurred while trying to update cart contact fields for owner {}: {}",
            owner_id,
            err
        );
        Error::UnexpectedError
    })
}

/// The conditional open-to-closed conversion. Returns `None` when the cart
/// was no longer active, which means a concurrent checkout won the race.
pub async fn place_by_id<'e, E: PgExecutor<'e>>(
    e: E,
    id: String,
    name: String,
    address: String,
) -> Result<Option<Cart>, Error> {
    sqlx::query_as::<_, Cart>(
        "
        UPDATE carts SET
            status = 'CHECKED_OUT',
            name = $2,
            address = $3,
            placed_at = NOW(),
            updated_at = NOW()
        WHERE id = $1 AND status = 'NOT_CHECKED_OUT'
        RETURNING *
        ",
    )
    .bind(id.clone())
    .bind(name)
    .bind(address)
    .fetch_optional(e)
    .await
    .map_err(|err| {
        tracing::error!(
            "Error occurred while trying to place order from cart {}: {}",
            id,
            err
        );
        Error::UnexpectedError
    })
}

pub async fn add_item<'e, E: PgExecutor<'e>>(
    e: E,
    cart_id: String,
    product_id: String,
    quantity: i32,
) -> Result<CartItem, Error> {
    sqlx::query_as::<_, CartItem>(
        "
        INSERT INTO cart_items (id, cart_id, product_id, quantity)
        VALUES ($1, $2, $3, $4)
        RETURNING *
        ",
    )
    .bind(Ulid::new().to_string())
    .bind(cart_id.clone())
    .bind(product_id)
    .bind(quantity)
    .fetch_one(e)
    .await
    .map_err(|err| {
        tracing::error!(
            "Error occurred while trying to add an item to cart {}: {}",
            cart_id,
            err
        );
        Error::UnexpectedError
    })
}

pub async fn find_lines_by_cart_id<'e, E: PgExecutor<'e>>(
    e: E,
    cart_id: String,
    offset: u32,
    limit: u32,
) -> Result<(Vec<CartLine>, u32), Error> {
    let rows = sqlx::query_as::<_, CartLineWithCount>(
        "
        WITH lines AS (
            SELECT
                cart_items.id,
                cart_items.product_id,
                products.title,
                cart_items.quantity,
                products.price,
                (cart_items.quantity::BIGINT * products.price) AS line_total,
                ROW_NUMBER() OVER (ORDER BY cart_items.created_at, cart_items.id) AS line_number,
                cart_items.created_at
            FROM cart_items
            INNER JOIN products ON products.id = cart_items.product_id
            WHERE cart_items.cart_id = $1
        )
        SELECT *, COUNT(*) OVER () AS total_count
        FROM lines
        ORDER BY line_number
        OFFSET $2 LIMIT $3
        ",
    )
    .bind(cart_id.clone())
    .bind(offset as i64)
    .bind(limit as i64)
    .fetch_all(e)
    .await
    .map_err(|err| {
        tracing::error!(
            "Error occurred while trying to fetch items for cart {}: {}",
            cart_id,
            err
        );
        Error::UnexpectedError
    })?;

    let total = rows.first().map(|row| row.total_count as u32).unwrap_or(0);
    Ok((rows.into_iter().map(|row| row.line).collect(), total))
}

pub async fn count_items_by_cart_id<'e, E: PgExecutor<'e>>(
    e: E,
    cart_id: String,
) -> Result<i64, Error> {
    sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM cart_items WHERE cart_id = $1")
        .bind(cart_id.clone())
        .fetch_one(e)
        .await
        .map_err(|err| {
            tracing::error!(
                "Error occurred while trying to count items in cart {}: {}",
                cart_id,
                err
            );
            Error::UnexpectedError
        })
}

/// The running total over the whole cart, repriced against the catalog at
/// read time.
pub async fn items_total_by_cart_id<'e, E: PgExecutor<'e>>(
    e: E,
    cart_id: String,
) -> Result<i64, Error> {
    sqlx::query_scalar::<_, i64>(
        "
        SELECT COALESCE(SUM(cart_items.quantity::BIGINT * products.price), 0)::BIGINT
        FROM cart_items
        INNER JOIN products ON products.id = cart_items.product_id
        WHERE cart_items.cart_id = $1
        ",
    )
    .bind(cart_id.clone())
    .fetch_one(e)
    .await
    .map_err(|err| {
        tracing::error!(
            "Error occurred while trying to total items in cart {}: {}",
            cart_id,
            err
        );
        Error::UnexpectedError
    })
}

/// Looks a line item up by its stable id, scoped to the owner's active cart
/// in the same statement so one user can never observe another's items.
pub async fn find_line_by_id_and_owner_id<'e, E: PgExecutor<'e>>(
    e: E,
    id: String,
    owner_id: String,
) -> Result<Option<CartLineDetail>, Error> {
    sqlx::query_as::<_, CartLineDetail>(
        "
        SELECT
            cart_items.id,
            cart_items.product_id,
            products.title,
            products.description,
            products.price,
            products.image_url,
            products.category_id,
            cart_items.quantity,
            (cart_items.quantity::BIGINT * products.price) AS line_total
        FROM cart_items
        INNER JOIN carts ON carts.id = cart_items.cart_id
        INNER JOIN products ON products.id = cart_items.product_id
        WHERE cart_items.id = $1
            AND carts.owner_id = $2
            AND carts.status = 'NOT_CHECKED_OUT'
        ",
    )
    .bind(id)
    .bind(owner_id)
    .fetch_optional(e)
    .await
    .map_err(|err| {
        tracing::error!("Error occurred while trying to fetch a cart item: {}", err);
        Error::UnexpectedError
    })
}

/// The ownership check lives in the UPDATE itself: the row only changes when
/// it belongs to the caller's active cart.
pub async fn update_line_quantity<'e, E: PgExecutor<'e>>(
    e: E,
    id: String,
    owner_id: String,
    quantity: i32,
) -> Result<Option<CartItem>, Error> {
    sqlx::query_as::<_, CartItem>(
        "
        UPDATE cart_items SET
            quantity = $3
        FROM carts
        WHERE cart_items.id = $1
            AND carts.id = cart_items.cart_id
            AND carts.owner_id = $2
            AND carts.status = 'NOT_CHECKED_OUT'
        RETURNING cart_items.*
        ",
    )
    .bind(id.clone())
    .bind(owner_id)
    .bind(quantity)
    .fetch_optional(e)
    .await
    .map_err(|err| {
        tracing::error!(
            "Error occurred while trying to update cart item {}: {}",
            id,
            err
        );
        Error::UnexpectedError
    })
}

pub async fn delete_line<'e, E: PgExecutor<'e>>(
    e: E,
    id: String,
    owner_id: String,
) -> Result<bool, Error> {
    sqlx::query(
        "
        DELETE FROM cart_items
        USING carts
        WHERE cart_items.id = $1
            AND carts.id = cart_items.cart_id
            AND carts.owner_id = $2
            AND carts.status = 'NOT_CHECKED_OUT'
        ",
    )
    .bind(id.clone())
    .bind(owner_id)
    .execute(e)
    .await
    .map(|result| result.rows_affected() > 0)
    .map_err(|err| {
        tracing::error!(
            "Error occurred while trying to delete cart item {}: {}",
            id,
            err
        );
        Error::UnexpectedError
    })
}
