use super::types::{request, response};
use crate::{
    modules::{auth::middleware::Auth, cart::repository, product},
    types::Context,
    utils::{sanitize, validation::FieldError},
};
use std::sync::Arc;

pub async fn service(ctx: Arc<Context>, auth: Auth, body: request::Body) -> response::Response {
    // Every field problem is collected before returning so the caller sees
    // all of them in one round trip.
    let mut errors = Vec::new();

    let product = match body.title {
        None => {
            errors.push(FieldError::new(
                "title",
                "Title must be a string of 1 to 128 characters",
            ));
            None
        }
        Some(title) => {
            let title = sanitize::clean(title.as_str());

            if title.is_empty() || title.len() > 128 {
                errors.push(FieldError::new(
                    "title",
                    "Title must be a string of 1 to 128 characters",
                ));
                None
            } else {
                match product::repository::find_by_title(&ctx.db_conn.pool, title).await {
                    Ok(Some(product)) => Some(product),
                    Ok(None) => {
                        errors.push(FieldError::new(
                            "title",
                            "Product does not exist in the webshop",
                        ));
                        None
                    }
                    Err(_) => return Err(response::Error::FailedToAddItem),
                }
            }
        }
    };

    let quantity = match body.quantity {
        Some(quantity) if quantity > 0 && quantity <= i32::MAX as i64 => Some(quantity as i32),
        _ => {
            errors.push(FieldError::new(
                "quantity",
                "Quantity must be an integer greater than 0",
            ));
            None
        }
    };

    if !errors.is_empty() {
        return Err(response::Error::ValidationFailed(errors));
    }

    let (Some(product), Some(quantity)) = (product, quantity) else {
        return Err(response::Error::FailedToAddItem);
    };

    let cart = repository::find_active_by_owner_id(&ctx.db_conn.pool, auth.user.id.clone())
        .await
        .map_err(|_| response::Error::FailedToAddItem)?
        .ok_or_else(|| {
            tracing::error!("User {} has no active cart", auth.user.id);
            response::Error::ActiveCartMissing
        })?;

    repository::add_item(&ctx.db_conn.pool, cart.id, product.id, quantity)
        .await
        .map(response::Success::Created)
        .map_err(|_| response::Error::FailedToAddItem)
}
