use super::types::response;
use crate::{
    modules::{auth::middleware::Auth, order::repository, user},
    types::Context,
    utils::pagination::{Paginated, Pagination},
};
use std::sync::Arc;

pub async fn service(ctx: Arc<Context>, auth: Auth, pagination: Pagination) -> response::Response {
    // Admins see every order; everyone else only their own.
    let owner_id = if user::repository::is_admin(&auth.user) {
        None
    } else {
        Some(auth.user.id)
    };

    repository::find_many(
        &ctx.db_conn.pool,
        owner_id,
        pagination.offset,
        pagination.limit,
    )
    .await
    .map(|(orders, total)| {
        response::Success::Orders(Paginated::new(orders, total, &pagination, "/orders"))
    })
    .map_err(|_| response::Error::FailedToFetchOrders)
}
