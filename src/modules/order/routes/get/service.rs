use super::types::response;
use crate::{
    modules::{auth::middleware::Auth, order::repository, user},
    types::Context,
};
use std::sync::Arc;

pub async fn service(ctx: Arc<Context>, auth: Auth, id: String) -> response::Response {
    // Existence is checked before ownership so an invalid id and a foreign
    // id are distinguishable, per the API contract.
    let order = repository::find_by_id(&ctx.db_conn.pool, id)
        .await
        .map_err(|_| response::Error::FailedToFetchOrder)?
        .ok_or(response::Error::NotFound)?;

    if order.owner_id != auth.user.id && !user::repository::is_admin(&auth.user) {
        return Err(response::Error::Forbidden);
    }

    Ok(response::Success::Order(order))
}
