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
    modules::auth::middleware::AdminAuth,
    types::Context,
    utils::{self, pagination::Pagination, sanitize},
};

#[derive(Deserialize, Validate)]
pub struct CategoryPayload {
    #[validate(length(
        min = 1,
        max = 128,
        message = "Category title must be a string of 1 to 128 characters"
    ))]
    title: String,
}

async fn get_categories(
    State(ctx): State<Arc<Context>>,
    pagination: Pagination,
) -> impl IntoResponse {
    match repository::find_many(&ctx.db_conn.pool, pagination.offset, pagination.limit).await {
        Ok((categories, total)) => (
            StatusCode::OK,
            Json(json!(utils::pagination::Paginated::new(
                categories,
                total,
                &pagination,
                "/categories"
            ))),
        ),
        Err(_) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "error": "Failed to fetch categories" })),
        ),
    }
}

async fn get_category_by_id(
    Path(id): Path<String>,
    State(ctx): State<Arc<Context>>,
) -> impl IntoResponse {
    match repository::find_by_id(&ctx.db_conn.pool, id).await {
        Ok(Some(category)) => (StatusCode::OK, Json(json!(category))),
        Ok(None) => (
            StatusCode::NOT_FOUND,
            Json(json!({ "error": "Item not found" })),
        ),
        Err(_) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "error": "Failed to fetch category" })),
        ),
    }
}

async fn create_category(
    State(ctx): State<Arc<Context>>,
    _: AdminAuth,
    Json(payload): Json<CategoryPayload>,
) -> impl IntoResponse {
    if let Err(errors) = payload.validate() {
        return utils::validation::into_response(errors);
    }

    let title = sanitize::clean(payload.title.as_str());

    match repository::find_by_title(&ctx.db_conn.pool, title.clone()).await {
        Ok(None) => (),
        Ok(Some(_)) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(json!({ "error": "Category already exists" })),
            )
        }
        Err(_) => {
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": "Failed to create category" })),
            )
        }
    };

    match repository::create(&ctx.db_conn.pool, title).await {
        Ok(category) => (StatusCode::CREATED, Json(json!(category))),
        Err(_) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "error": "Failed to create category" })),
        ),
    }
}

async fn update_category_by_id(
    Path(id): Path<String>,
    State(ctx): State<Arc<Context>>,
    _: AdminAuth,
    Json(payload): Json<CategoryPayload>,
) -> impl IntoResponse {
    if let Err(errors) = payload.validate() {
        return utils::validation::into_response(errors);
    }

    let title = sanitize::clean(payload.title.as_str());

    match repository::find_by_title(&ctx.db_conn.pool, title.clone()).await {
        Ok(None) => (),
        Ok(Some(_)) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(json!({ "error": "Category already exists" })),
            )
        }
        Err(_) => {
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": "Failed to update category" })),
            )
        }
    };

    match repository::update_by_id(&ctx.db_conn.pool, id, title).await {
        Ok(Some(category)) => (StatusCode::OK, Json(json!(category))),
        Ok(None) => (
            StatusCode::NOT_FOUND,
            Json(json!({ "error": "Item not found" })),
        ),
        Err(repository::Error::InUse) => (
            StatusCode::BAD_REQUEST,
            Json(json!({
                "error": "Category contains products. Remove them before changing the category"
            })),
        ),
        Err(_) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "error": "Failed to update category" })),
        ),
    }
}

async fn delete_category_by_id(
    Path(id): Path<String>,
    State(ctx): State<Arc<Context>>,
    _: AdminAuth,
) -> impl IntoResponse {
    match repository::delete_by_id(&ctx.db_conn.pool, id).await {
        Ok(true) => (StatusCode::NO_CONTENT, Json(json!({}))),
        Ok(false) => (
            StatusCode::NOT_FOUND,
            Json(json!({ "error": "Item not found" })),
        ),
        Err(repository::Error::InUse) => (
            StatusCode::BAD_REQUEST,
            Json(json!({
                "error": "Category contains products. Remove them before deleting the category"
            })),
        ),
        Err(_) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "error": "Failed to delete category" })),
        ),
    }
}

pub fn get_router() -> Router<Arc<Context>> {
    Router::new()
        .route("/", get(get_categories).post(create_category))
        .route(
            "/:id",
            get(get_category_by_id)
                .patch(update_category_by_id)
                .delete(delete_category_by_id),
        )
}
