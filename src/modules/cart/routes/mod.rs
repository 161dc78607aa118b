mod add_item;
mod get_item;
mod list;
mod remove_item;
mod update_item;

use crate::types::Context;
use axum::routing::Router;
use std::sync::Arc;

pub fn get_router() -> Router<Arc<Context>> {
    Router::new()
        .merge(list::get_router())
        .merge(add_item::get_router())
        .merge(get_item::get_router())
        .merge(update_item::get_router())
        .merge(remove_item::get_router())
}
