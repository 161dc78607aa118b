use chrono::NaiveDateTime;
use serde::Serialize;
use sqlx::PgExecutor;
use ulid::Ulid;

#[derive(Serialize, Clone, Debug, sqlx::FromRow)]
pub struct Category {
    pub id: String,
    pub title: String,
    pub created_at: NaiveDateTime,
}

#[derive(sqlx::FromRow)]
struct CategoryWithCount {
    #[sqlx(flatten)]
    category: Category,
    total_count: i64,
}

#[derive(Debug)]
pub enum Error {
    /// The category is still referenced by products.
    InUse,
    UnexpectedError,
}

fn is_foreign_key_violation(err: &sqlx::Error) -> bool {
    err.as_database_error()
        .and_then(|err| err.code())
        .map(|code| code == "23503")
        .unwrap_or(false)
}

pub async fn create<'e, E: PgExecutor<'e>>(e: E, title: String) -> Result<Category, Error> {
    sqlx::query_as::<_, Category>(
        "INSERT INTO categories (id, title) VALUES ($1, $2) RETURNING *",
    )
    .bind(Ulid::new().to_string())
    .bind(title)
    .fetch_one(e)
    .await
    .map_err(|err| {
        tracing::error!("Error occurred while trying to create a category: {}", err);
        Error::UnexpectedError
    })
}

pub async fn find_by_id<'e, E: PgExecutor<'e>>(e: E, id: String) -> Result<Option<Category>, Error> {
    sqlx::query_as::<_, Category>("SELECT * FROM categories WHERE id = $1")
        .bind(id)
        .fetch_optional(e)
        .await
        .map_err(|err| {
            tracing::error!("Error occurred while trying to fetch category by id: {}", err);
            Error::UnexpectedError
        })
}

pub async fn find_by_title<'e, E: PgExecutor<'e>>(
    e: E,
    title: String,
) -> Result<Option<Category>, Error> {
    sqlx::query_as::<_, Category>("SELECT * FROM categories WHERE title = $1")
        .bind(title)
        .fetch_optional(e)
        .await
        .map_err(|err| {
            tracing::error!(
                "Error occurred while trying to fetch category by title: {}",
                err
            );
            Error::UnexpectedError
        })
}

pub async fn find_many<'e, E: PgExecutor<'e>>(
    e: E,
    offset: u32,
    limit: u32,
) -> Result<(Vec<Category>, u32), Error> {
    let rows = sqlx::query_as::<_, CategoryWithCount>(
        "
        SELECT *, COUNT(*) OVER () AS total_count
        FROM categories
        ORDER BY created_at, id
        OFFSET $1 LIMIT $2
        ",
    )
    .bind(offset as i64)
    .bind(limit as i64)
    .fetch_all(e)
    .await
    .map_err(|err| {
        tracing::error!(
            "Error occurred while trying to fetch many categories: {}",
            err
        );
        Error::UnexpectedError
    })?;

    let total = rows.first().map(|row| row.total_count as u32).unwrap_or(0);
    Ok((rows.into_iter().map(|row| row.category).collect(), total))
}

pub async fn update_by_id<'e, E: PgExecutor<'e>>(
    e: E,
    id: String,
    title: String,
) -> Result<Option<Category>, Error> {
    sqlx::query_as::<_, Category>(
        "UPDATE categories SET title = $2 WHERE id = $1 RETURNING *",
    )
    .bind(id.clone())
    .bind(title)
    .fetch_optional(e)
    .await
    .map_err(|err| {
        if is_foreign_key_violation(&err) {
            return Error::InUse;
        }

        tracing::error!(
            "Error occurred while trying to update category by id {}: {}",
            id,
            err
        );
        Error::UnexpectedError
    })
}

pub async fn delete_by_id<'e, E: PgExecutor<'e>>(e: E, id: String) -> Result<bool, Error> {
    sqlx::query("DELETE FROM categories WHERE id = $1")
        .bind(id.clone())
        .execute(e)
        .await
        .map(|result| result.rows_affected() > 0)
        .map_err(|err| {
            if is_foreign_key_violation(&err) {
                return Error::InUse;
            }

            tracing::error!(
                "Error occurred while trying to delete category by id {}: {}",
                id,
                err
            );
            Error::UnexpectedError
        })
}
