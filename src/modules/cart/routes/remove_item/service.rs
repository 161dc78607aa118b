use super::types::response;
use crate::{
    modules::{auth::middleware::Auth, cart::repository},
    types::Context,
};
use std::sync::Arc;

pub async fn service(ctx: Arc<Context>, auth: Auth, id: String) -> response::Response {
    match repository::delete_line(&ctx.db_conn.pool, id, auth.user.id).await {
        Ok(true) => Ok(response::Success::Removed),
        Ok(false) => Err(response::Error::NotFound),
        Err(_) => Err(response::Error::FailedToRemoveItem),
    }
}
