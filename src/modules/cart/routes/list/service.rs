use super::types::response;
use crate::{
    modules::{auth::middleware::Auth, cart::repository},
    types::Context,
    utils::pagination::{Paginated, Pagination},
};
use std::sync::Arc;

pub async fn service(ctx: Arc<Context>, auth: Auth, pagination: Pagination) -> response::Response {
    let cart = repository::find_active_by_owner_id(&ctx.db_conn.pool, auth.user.id.clone())
        .await
        .map_err(|_| response::Error::FailedToFetchCart)?
        .ok_or_else(|| {
            tracing::error!("User {} has no active cart", auth.user.id);
            response::Error::ActiveCartMissing
        })?;

    let (lines, total) = repository::find_lines_by_cart_id(
        &ctx.db_conn.pool,
        cart.id.clone(),
        pagination.offset,
        pagination.limit,
    )
    .await
    .map_err(|_| response::Error::FailedToFetchCart)?;

    let cart_total = repository::items_total_by_cart_id(&ctx.db_conn.pool, cart.id)
        .await
        .map_err(|_| response::Error::FailedToFetchCart)?;

    Ok(response::Success::Page(response::CartPage {
        page: Paginated::new(lines, total, &pagination, "/cart"),
        cart_total,
    }))
}
