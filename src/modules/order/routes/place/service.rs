use super::types::{request, response};
use crate::{
    modules::{auth::middleware::Auth, cart, order::repository},
    types::Context,
    utils::{sanitize, validation::FieldError},
};
use std::sync::Arc;

/// A contact field is first-write-wins: a value already stored on the cart
/// beats whatever the request carries; an absent stored value must be
/// supplied now.
fn resolve_contact_field(
    stored: Option<String>,
    supplied: Option<String>,
    field: &'static str,
    errors: &mut Vec<FieldError>,
) -> Option<String> {
    if let Some(value) = stored.filter(|value| !value.is_empty()) {
        return Some(value);
    }

    match supplied
        .map(|value| sanitize::clean(value.as_str()))
        .filter(|value| !value.is_empty())
    {
        Some(value) => Some(value),
        None => {
            errors.push(FieldError::new(
                field,
                format!("{} is required to place an order", field),
            ));
            None
        }
    }
}

pub async fn service(ctx: Arc<Context>, auth: Auth, body: request::Body) -> response::Response {
    let mut tx = ctx.db_conn.pool.begin().await.map_err(|err| {
        tracing::error!("Failed to start database transaction: {}", err);
        response::Error::FailedToPlaceOrder
    })?;

    // The row lock serializes concurrent checkouts by the same owner: the
    // loser blocks here and then finds the replacement cart, which is empty.
    let active_cart =
        cart::repository::find_active_by_owner_id_for_update(&mut *tx, auth.user.id.clone())
            .await
            .map_err(|_| response::Error::FailedToPlaceOrder)?
            .ok_or_else(|| {
                tracing::error!("User {} has no active cart", auth.user.id);
                response::Error::ActiveCartMissing
            })?;

    let item_count = cart::repository::count_items_by_cart_id(&mut *tx, active_cart.id.clone())
        .await
        .map_err(|_| response::Error::FailedToPlaceOrder)?;

    if item_count == 0 {
        return Err(response::Error::EmptyCart);
    }

    let mut errors = Vec::new();
    let name = resolve_contact_field(active_cart.name.clone(), body.name, "name", &mut errors);
    let address =
        resolve_contact_field(active_cart.address.clone(), body.address, "address", &mut errors);

    // Nothing has been written yet, so bailing out here leaves the cart
    // untouched even when only one of the two fields failed.
    if !errors.is_empty() {
        return Err(response::Error::ValidationFailed(errors));
    }

    let (Some(name), Some(address)) = (name, address) else {
        return Err(response::Error::FailedToPlaceOrder);
    };

    let placed = cart::repository::place_by_id(&mut *tx, active_cart.id.clone(), name, address)
        .await
        .map_err(|_| response::Error::FailedToPlaceOrder)?
        .ok_or(response::Error::Conflict)?;

    // Roll the replacement cart before committing so the one-active-cart
    // invariant holds the instant the order becomes visible.
    cart::repository::create_if_absent(&mut *tx, auth.user.id.clone())
        .await
        .map_err(|_| response::Error::FailedToPlaceOrder)?;

    let order = repository::find_by_id(&mut *tx, placed.id.clone())
        .await
        .map_err(|_| response::Error::FailedToPlaceOrder)?
        .ok_or(response::Error::FailedToPlaceOrder)?;

    tx.commit().await.map_err(|err| {
        tracing::error!("Failed to commit transaction: {}", err);
        response::Error::FailedToPlaceOrder
    })?;

    Ok(response::Success::Placed(order))
}
