use chrono::NaiveDateTime;
use serde::Serialize;
use sqlx::PgExecutor;
use ulid::Ulid;

#[derive(Serialize, Clone, Debug, sqlx::FromRow)]
pub struct Product {
    pub id: String,
    pub title: String,
    pub description: String,
    pub price: i32,
    pub image_url: Option<String>,
    pub category_id: String,
    pub created_at: NaiveDateTime,
    pub updated_at: Option<NaiveDateTime>,
}

#[derive(sqlx::FromRow)]
struct ProductWithCount {
    #[sqlx(flatten)]
    product: Product,
    total_count: i64,
}

pub struct CreateProductPayload {
    pub title: String,
    pub description: String,
    pub price: i32,
    pub image_url: Option<String>,
    pub category_id: String,
}

#[derive(Clone, Debug, Default)]
pub struct Filters {
    pub category_id: Option<String>,
    pub search: Option<String>,
    pub oldest_first: bool,
}

#[derive(Debug)]
pub enum Error {
    /// The product is still referenced by cart line items.
    InUse,
    UnexpectedError,
}

fn is_foreign_key_violation(err: &sqlx::Error) -> bool {
    err.as_database_error()
        .and_then(|err| err.code())
        .map(|code| code == "23503")
        .unwrap_or(false)
}

pub async fn create<'e, E: PgExecutor<'e>>(
    e: E,
    payload: CreateProductPayload,
) -> Result<Product, Error> {
    sqlx::query_as::<_, Product>(
        "
        INSERT INTO products (id, title, description, price, image_url, category_id)
        VALUES ($1, $2, $3, $4, $5, $6)
        RETURNING *
        ",
    )
    .bind(Ulid::new().to_string())
    .bind(payload.title)
    .bind(payload.description)
    .bind(payload.price)
    .bind(payload.image_url)
    .bind(payload.category_id)
    .fetch_one(e)
    .await
    .map_err(|err| {
        tracing::error!("Error occurred while trying to create a product: {}", err);
        Error::UnexpectedError
    })
}

pub async fn find_by_id<'e, E: PgExecutor<'e>>(e: E, id: String) -> Result<Option<Product>, Error> {
    sqlx::query_as::<_, Product>("SELECT * FROM products WHERE id = $1")
        .bind(id)
        .fetch_optional(e)
        .await
        .map_err(|err| {
            tracing::error!("Error occurred while trying to fetch product by id: {}", err);
            Error::UnexpectedError
        })
}

pub async fn find_by_title<'e, E: PgExecutor<'e>>(
    e: E,
    title: String,
) -> Result<Option<Product>, Error> {
    sqlx::query_as::<_, Product>("SELECT * FROM products WHERE title = $1")
        .bind(title)
        .fetch_optional(e)
        .await
        .map_err(|err| {
            tracing::error!(
                "Error occurred while trying to fetch product by title: {}",
                err
            );
            Error::UnexpectedError
        })
}

pub async fn find_many<'e, E: PgExecutor<'e>>(
    e: E,
    offset: u32,
    limit: u32,
    filters: Filters,
) -> Result<(Vec<Product>, u32), Error> {
    let direction = if filters.oldest_first { "ASC" } else { "DESC" };
    let query = format!(
        "
        SELECT *, COUNT(*) OVER () AS total_count
        FROM products
        WHERE
            ($1::TEXT IS NULL OR category_id = $1)
            AND (
                $2::TEXT IS NULL
                OR TO_TSVECTOR('english', title || ' ' || description)
                    @@ PLAINTO_TSQUERY('english', $2)
            )
        ORDER BY created_at {direction}, id {direction}
        OFFSET $3 LIMIT $4
        "
    );

    let rows = sqlx::query_as::<_, ProductWithCount>(query.as_str())
        .bind(filters.category_id)
        .bind(filters.search)
        .bind(offset as i64)
        .bind(limit as i64)
        .fetch_all(e)
        .await
        .map_err(|err| {
            tracing::error!("Error occurred while trying to fetch many products: {}", err);
            Error::UnexpectedError
        })?;

    let total = rows.first().map(|row| row.total_count as u32).unwrap_or(0);
    Ok((rows.into_iter().map(|row| row.product).collect(), total))
}

pub struct UpdateProductPayload {
    pub title: Option<String>,
    pub description: Option<String>,
    pub price: Option<i32>,
    pub image_url: Option<String>,
    pub category_id: Option<String>,
}

pub async fn update_by_id<'e, E: PgExecutor<'e>>(
    e: E,
    id: String,
    payload: UpdateProductPayload,
) -> Result<Option<Product>, Error> {
    sqlx::query_as::<_, Product>(
        "
        UPDATE products SET
            title = COALESCE($2, title),
            description = COALESCE($3, description),
            price = COALESCE($4, price),
            image_url = COALESCE($5, image_url),
            category_id = COALESCE($6, category_id),
            updated_at = NOW()
        WHERE id = $1
        RETURNING *
        ",
    )
    .bind(id.clone())
    .bind(payload.title)
    .bind(payload.description)
    .bind(payload.price)
    .bind(payload.image_url)
    .bind(payload.category_id)
    .fetch_optional(e)
    .await
    .map_err(|err| {
        tracing::error!(
            "Error occurred while trying to update product by id {}: {}",
            id,
            err
        );
        Error::UnexpectedError
    })
}

pub async fn delete_by_id<'e, E: PgExecutor<'e>>(e: E, id: String) -> Result<bool, Error> {
    sqlx::query("DELETE FROM products WHERE id = $1")
        .bind(id.clone())
        .execute(e)
        .await
        .map(|result| result.rows_affected() > 0)
        .map_err(|err| {
            if is_foreign_key_violation(&err) {
                return Error::InUse;
            }

            tracing::error!(
                "Error occurred while trying to delete product by id {}: {}",
                id,
                err
            );
            Error::UnexpectedError
        })
}
