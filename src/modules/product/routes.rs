use axum::{
    extract::{Path, Query, State},
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
    modules::{auth::middleware::AdminAuth, category},
    types::Context,
    utils::{self, pagination::Pagination, sanitize},
};

#[derive(Deserialize)]
pub struct ProductFilters {
    search: Option<String>,
    category: Option<String>,
    order: Option<String>,
}

async fn get_products(
    State(ctx): State<Arc<Context>>,
    Query(filters): Query<ProductFilters>,
    pagination: Pagination,
) -> impl IntoResponse {
    // The category filter is given by title; an unknown title matches nothing.
    let category_id = match filters.category {
        Some(title) => {
            match category::repository::find_by_title(&ctx.db_conn.pool, title).await {
                Ok(Some(category)) => Some(category.id),
                Ok(None) => {
                    return (
                        StatusCode::OK,
                        Json(json!(utils::pagination::Paginated::<
                            repository::Product,
                        >::new(
                            vec![], 0, &pagination, "/products"
                        ))),
                    )
                }
                Err(_) => {
                    return (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        Json(json!({ "error": "Failed to fetch products" })),
                    )
                }
            }
        }
        None => None,
    };

    let oldest_first = filters
        .order
        .map(|order| order.eq_ignore_ascii_case("asc"))
        .unwrap_or(false);

    match repository::find_many(
        &ctx.db_conn.pool,
        pagination.offset,
        pagination.limit,
        repository::Filters {
            category_id,
            search: filters.search,
            oldest_first,
        },
    )
    .await
    {
        Ok((products, total)) => (
            StatusCode::OK,
            Json(json!(utils::pagination::Paginated::new(
                products,
                total,
                &pagination,
                "/products"
            ))),
        ),
        Err(_) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "error": "Failed to fetch products" })),
        ),
    }
}

async fn get_product_by_id(
    Path(id): Path<String>,
    State(ctx): State<Arc<Context>>,
) -> impl IntoResponse {
    match repository::find_by_id(&ctx.db_conn.pool, id).await {
        Ok(Some(product)) => (StatusCode::OK, Json(json!(product))),
        Ok(None) => (
            StatusCode::NOT_FOUND,
            Json(json!({ "error": "Item not found" })),
        ),
        Err(_) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "error": "Failed to fetch product" })),
        ),
    }
}

#[derive(Deserialize, Validate)]
pub struct CreateProductPayload {
    #[validate(length(
        min = 1,
        max = 128,
        message = "Title must be a string of 1 to 128 characters"
    ))]
    title: String,
    #[validate(length(
        min = 1,
        max = 512,
        message = "Description must be a string of 1 to 512 characters"
    ))]
    description: String,
    #[validate(range(min = 0, message = "Price must be an integer of at least 0"))]
    price: i32,
    image_url: Option<String>,
    #[validate(length(
        min = 1,
        max = 128,
        message = "Category title must be a string of 1 to 128 characters"
    ))]
    category: String,
}

async fn create_product(
    State(ctx): State<Arc<Context>>,
    _: AdminAuth,
    Json(payload): Json<CreateProductPayload>,
) -> impl IntoResponse {
    if let Err(errors) = payload.validate() {
        return utils::validation::into_response(errors);
    }

    let category =
        match category::repository::find_by_title(&ctx.db_conn.pool, payload.category.clone())
            .await
        {
            Ok(Some(category)) => category,
            Ok(None) => {
                return (
                    StatusCode::BAD_REQUEST,
                    Json(json!({ "error": "Category does not exist" })),
                )
            }
            Err(_) => {
                return (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "error": "Failed to create product" })),
                )
            }
        };

    let title = sanitize::clean(payload.title.as_str());

    match repository::find_by_title(&ctx.db_conn.pool, title.clone()).await {
        Ok(None) => (),
        Ok(Some(_)) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(json!({ "error": "Product already exists" })),
            )
        }
        Err(_) => {
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": "Failed to create product" })),
            )
        }
    };

    match repository::create(
        &ctx.db_conn.pool,
        repository::CreateProductPayload {
            title,
            description: sanitize::clean(payload.description.as_str()),
            price: payload.price,
            image_url: payload.image_url,
            category_id: category.id,
        },
    )
    .await
    {
        Ok(product) => (StatusCode::CREATED, Json(json!(product))),
        Err(_) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "error": "Failed to create product" })),
        ),
    }
}

#[derive(Deserialize, Validate)]
pub struct UpdateProductPayload {
    #[validate(length(
        min = 1,
        max = 128,
        message = "Title must be a string of 1 to 128 characters"
    ))]
    title: Option<String>,
    #[validate(length(
        min = 1,
        max = 512,
        message = "Description must be a string of 1 to 512 characters"
    ))]
    description: Option<String>,
    #[validate(range(min = 0, message = "Price must be an integer of at least 0"))]
    price: Option<i32>,
    image_url: Option<String>,
    #[validate(length(
        min = 1,
        max = 128,
        message = "Category title must be a string of 1 to 128 characters"
    ))]
    category: Option<String>,
}

async fn update_product_by_id(
    Path(id): Path<String>,
    State(ctx): State<Arc<Context>>,
    _: AdminAuth,
    Json(payload): Json<UpdateProductPayload>,
) -> impl IntoResponse {
    if let Err(errors) = payload.validate() {
        return utils::validation::into_response(errors);
    }

    let category_id = match payload.category {
        Some(title) => {
            match category::repository::find_by_title(&ctx.db_conn.pool, title).await {
                Ok(Some(category)) => Some(category.id),
                Ok(None) => {
                    return (
                        StatusCode::BAD_REQUEST,
                        Json(json!({ "error": "Category does not exist" })),
                    )
                }
                Err(_) => {
                    return (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        Json(json!({ "error": "Failed to update product" })),
                    )
                }
            }
        }
        None => None,
    };

    let title = payload.title.map(|title| sanitize::clean(title.as_str()));

    if let Some(title) = title.clone() {
        match repository::find_by_title(&ctx.db_conn.pool, title).await {
            Ok(None) => (),
            Ok(Some(existing)) if existing.id != id => {
                return (
                    StatusCode::BAD_REQUEST,
                    Json(json!({ "error": "Product already exists" })),
                )
            }
            Ok(Some(_)) => (),
            Err(_) => {
                return (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "error": "Failed to update product" })),
                )
            }
        };
    }

    match repository::update_by_id(
        &ctx.db_conn.pool,
        id,
        repository::UpdateProductPayload {
            title,
            description: payload
                .description
                .map(|description| sanitize::clean(description.as_str())),
            price: payload.price,
            image_url: payload.image_url,
            category_id,
        },
    )
    .await
    {
        Ok(Some(product)) => (StatusCode::OK, Json(json!(product))),
        Ok(None) => (
            StatusCode::NOT_FOUND,
            Json(json!({ "error": "Item not found" })),
        ),
        Err(_) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "error": "Failed to update product" })),
        ),
    }
}

async fn delete_product_by_id(
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
            Json(json!({ "error": "Product is referenced by carts and cannot be deleted" })),
        ),
        Err(_) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "error": "Failed to delete product" })),
        ),
    }
}

pub fn get_router() -> Router<Arc<Context>> {
    Router::new()
        .route("/", get(get_products).post(create_product))
        .route(
            "/:id",
            get(get_product_by_id)
                .patch(update_product_by_id)
                .delete(delete_product_by_id),
        )
}
