use super::types::{request, response};
use crate::{
    modules::{auth::middleware::Auth, cart::repository},
    types::Context,
    utils::validation::FieldError,
};
use std::sync::Arc;

pub async fn service(
    ctx: Arc<Context>,
    auth: Auth,
    id: String,
    body: request::Body,
) -> response::Response {
    let quantity = match body.quantity {
        None => {
            return Err(response::Error::ValidationFailed(vec![FieldError::new(
                "quantity",
                "Patch must include a quantity",
            )]))
        }
        Some(quantity) if quantity > 0 && quantity <= i32::MAX as i64 => quantity as i32,
        Some(_) => {
            return Err(response::Error::ValidationFailed(vec![FieldError::new(
                "quantity",
                "Quantity must be an integer greater than 0",
            )]))
        }
    };

    repository::update_line_quantity(&ctx.db_conn.pool, id, auth.user.id, quantity)
        .await
        .map_err(|_| response::Error::FailedToUpdateItem)?
        .ok_or(response::Error::NotFound)
        .map(response::Success::Updated)
}
