use super::types::response;
use crate::{
    modules::{auth::middleware::Auth, cart::repository},
    types::Context,
};
use std::sync::Arc;

pub async fn service(ctx: Arc<Context>, auth: Auth, id: String) -> response::Response {
    repository::find_line_by_id_and_owner_id(&ctx.db_conn.pool, id, auth.user.id)
        .await
        .map_err(|_| response::Error::FailedToFetchItem)?
        .ok_or(response::Error::NotFound)
        .map(response::Success::Item)
}
