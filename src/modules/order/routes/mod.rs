mod get;
mod list;
mod place;

use crate::types::Context;
use axum::routing::Router;
use std::sync::Arc;

pub fn get_router() -> Router<Arc<Context>> {
    Router::new()
        .merge(list::get_router())
        .merge(place::get_router())
        .merge(get::get_router())
}
