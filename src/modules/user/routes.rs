use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;
use validator::Validate;

use super::repository;
use crate::{
    modules::auth::{
        self,
        middleware::{AdminAuth, Auth},
    },
    types::Context,
    utils::{self, pagination::Pagination},
};

async fn get_users(
    State(ctx): State<Arc<Context>>,
    _: AdminAuth,
    pagination: Pagination,
) -> impl IntoResponse {
    match repository::find_many(&ctx.db_conn.pool, pagination.offset, pagination.limit).await {
        Ok((users, total)) => (
            StatusCode::OK,
            Json(json!(utils::pagination::Paginated::new(
                users,
                total,
                &pagination,
                "/users"
            ))),
        ),
        Err(_) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "error": "Failed to fetch users" })),
        ),
    }
}

async fn get_user_by_id(
    Path(id): Path<String>,
    State(ctx): State<Arc<Context>>,
    _: AdminAuth,
) -> impl IntoResponse {
    match repository::find_by_id(&ctx.db_conn.pool, id).await {
        Ok(Some(user)) => (StatusCode::OK, Json(json!(user))),
        Ok(None) => (
            StatusCode::NOT_FOUND,
            Json(json!({ "error": "Item not found" })),
        ),
        Err(_) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "error": "Failed to fetch user" })),
        ),
    }
}

#[derive(Deserialize)]
pub struct SetAdminPayload {
    admin: Option<bool>,
}

async fn update_user_by_id(
    Path(id): Path<String>,
    State(ctx): State<Arc<Context>>,
    _: AdminAuth,
    Json(payload): Json<SetAdminPayload>,
) -> impl IntoResponse {
    let is_admin = match payload.admin {
        Some(is_admin) => is_admin,
        None => {
            return (
                StatusCode::BAD_REQUEST,
                Json(json!([utils::validation::FieldError::new(
                    "admin",
                    "Patch must include an admin flag"
                )])),
            )
        }
    };

    match repository::set_admin_by_id(&ctx.db_conn.pool, id, is_admin).await {
        Ok(Some(user)) => (StatusCode::OK, Json(json!(user))),
        Ok(None) => (
            StatusCode::NOT_FOUND,
            Json(json!({ "error": "Item not found" })),
        ),
        Err(_) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "error": "Failed to update user" })),
        ),
    }
}

async fn get_me(auth: Auth) -> impl IntoResponse {
    (StatusCode::OK, Json(json!(auth.user)))
}

#[derive(Deserialize, Validate)]
pub struct UpdateProfilePayload {
    #[validate(email(message = "Email must be a valid email address"))]
    email: Option<String>,
    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    password: Option<String>,
}

async fn update_me(
    State(ctx): State<Arc<Context>>,
    auth: Auth,
    Json(payload): Json<UpdateProfilePayload>,
) -> impl IntoResponse {
    if let Err(errors) = payload.validate() {
        return utils::validation::into_response(errors);
    }

    let password_hash = match payload.password {
        Some(password) => match auth::service::hash_password(password.as_str()) {
            Ok(hash) => Some(hash),
            Err(_) => {
                return (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "error": "Failed to update profile" })),
                )
            }
        },
        None => None,
    };

    match repository::update_by_id(
        &ctx.db_conn.pool,
        auth.user.id.clone(),
        repository::UpdateUserPayload {
            email: payload.email,
            password_hash,
        },
    )
    .await
    {
        Ok(Some(user)) => (StatusCode::OK, Json(json!(user))),
        Ok(None) => (
            StatusCode::NOT_FOUND,
            Json(json!({ "error": "Item not found" })),
        ),
        Err(_) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "error": "Failed to update profile" })),
        ),
    }
}

pub fn get_router() -> Router<Arc<Context>> {
    Router::new()
        .route("/", get(get_users))
        .route("/me", get(get_me).patch(update_me))
        .route("/:id", get(get_user_by_id).patch(update_user_by_id))
}
