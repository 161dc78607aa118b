use chrono::NaiveDateTime;
use serde::Serialize;
use sqlx::PgExecutor;
use ulid::Ulid;

#[derive(Serialize, Clone, Debug, sqlx::FromRow)]
pub struct User {
    pub id: String,
    pub username: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub is_admin: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: Option<NaiveDateTime>,
}

#[derive(sqlx::FromRow)]
struct UserWithCount {
    #[sqlx(flatten)]
    user: User,
    total_count: i64,
}

pub struct CreateUserPayload {
    pub username: String,
    pub email: String,
    pub password_hash: String,
}

#[derive(Debug)]
pub enum Error {
    UnexpectedError,
}

pub async fn create<'e, E: PgExecutor<'e>>(e: E, payload: CreateUserPayload) -> Result<User, Error> {
    sqlx::query_as::<_, User>(
        "
        INSERT INTO users (id, username, email, password_hash)
        VALUES ($1, $2, $3, $4)
        RETURNING *
        ",
    )
    .bind(Ulid::new().to_string())
    .bind(payload.username)
    .bind(payload.email)
    .bind(payload.password_hash)
    .fetch_one(e)
    .await
    .map_err(|err| {
        tracing::error!("Error occurred while trying to create a user: {}", err);
        Error::UnexpectedError
    })
}

pub async fn find_by_id<'e, E: PgExecutor<'e>>(e: E, id: String) -> Result<Option<User>, Error> {
    sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = $1")
        .bind(id.clone())
        .fetch_optional(e)
        .await
        .map_err(|err| {
            tracing::error!(
                "Error occurred while trying to fetch user by id {}: {}",
                id,
                err
            );
            Error::UnexpectedError
        })
}

pub async fn find_by_username<'e, E: PgExecutor<'e>>(
    e: E,
    username: String,
) -> Result<Option<User>, Error> {
    sqlx::query_as::<_, User>("SELECT * FROM users WHERE username = $1")
        .bind(username)
        .fetch_optional(e)
        .await
        .map_err(|err| {
            tracing::error!("Error occurred while trying to fetch user by username: {}", err);
            Error::UnexpectedError
        })
}

pub async fn find_by_email<'e, E: PgExecutor<'e>>(
    e: E,
    email: String,
) -> Result<Option<User>, Error> {
    sqlx::query_as::<_, User>("SELECT * FROM users WHERE email = $1")
        .bind(email)
        .fetch_optional(e)
        .await
        .map_err(|err| {
            tracing::error!("Error occurred while trying to fetch user by email: {}", err);
            Error::UnexpectedError
        })
}

pub async fn find_many<'e, E: PgExecutor<'e>>(
    e: E,
    offset: u32,
    limit: u32,
) -> Result<(Vec<User>, u32), Error> {
    let rows = sqlx::query_as::<_, UserWithCount>(
        "
        SELECT *, COUNT(*) OVER () AS total_count
        FROM users
        ORDER BY created_at, id
        OFFSET $1 LIMIT $2
        ",
    )
    .bind(offset as i64)
    .bind(limit as i64)
    .fetch_all(e)
    .await
    .map_err(|err| {
        tracing::error!("Error occurred while trying to fetch many users: {}", err);
        Error::UnexpectedError
    })?;

    let total = rows.first().map(|row| row.total_count as u32).unwrap_or(0);
    Ok((rows.into_iter().map(|row| row.user).collect(), total))
}

pub struct UpdateUserPayload {
    pub email: Option<String>,
    pub password_hash: Option<String>,
}

pub async fn update_by_id<'e, E: PgExecutor<'e>>(
    e: E,
    id: String,
    payload: UpdateUserPayload,
) -> Result<Option<User>, Error> {
    sqlx::query_as::<_, User>(
        "
        UPDATE users SET
            email = COALESCE($2, email),
            password_hash = COALESCE($3, password_hash),
            updated_at = NOW()
        WHERE id = $1
        RETURNING *
        ",
    )
    .bind(id.clone())
    .bind(payload.email)
    .bind(payload.password_hash)
    .fetch_optional(e)
    .await
    .map_err(|err| {
        tracing::error!(
            "Error occurred while trying to update user by id {}: {}",
            id,
            err
        );
        Error::UnexpectedError
    })
}

pub async fn set_admin_by_id<'e, E: PgExecutor<'e>>(
    e: E,
    id: String,
    is_admin: bool,
) -> Result<Option<User>, Error> {
    sqlx::query_as::<_, User>(
        "
        UPDATE users SET
            is_admin = $2,
            updated_at = NOW()
        WHERE id = $1
        RETURNING *
        ",
    )
    .bind(id.clone())
    .bind(is_admin)
    .fetch_optional(e)
    .await
    .map_err(|err| {
        tracing::error!(
            "Error occurred while trying to update admin status for user {}: {}",
            id,
            err
        );
        Error::UnexpectedError
    })
}

pub fn is_admin(user: &User) -> bool {
    user.is_admin
}
