use axum::{
    async_trait,
    extract::{FromRequestParts, Query},
    http::{request::Parts, StatusCode},
    response::{IntoResponse, Response},
    Json, RequestPartsExt,
};
use serde::{Deserialize, Serialize};
use serde_json::json;

#[derive(Serialize, Clone, Debug)]
pub struct Link {
    pub href: String,
}

#[derive(Serialize, Clone, Debug)]
pub struct Links {
    #[serde(rename = "self")]
    pub this: Link,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prev: Option<Link>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next: Option<Link>,
}

impl Links {
    pub fn new(base_path: &str, offset: u32, limit: u32, total: u32) -> Links {
        let href = |offset: u32| Link {
            href: format!("{}/?offset={}&limit={}", base_path, offset, limit),
        };

        Links {
            this: href(offset),
            prev: (offset > 0).then(|| href(offset.saturating_sub(limit))),
            next: (offset.saturating_add(limit) < total)
                .then(|| href(offset.saturating_add(limit))),
        }
    }
}

#[derive(Serialize)]
pub struct Paginated<T> {
    pub limit: u32,
    pub offset: u32,
    pub items: Vec<T>,
    pub links: Links,
}

impl<T> Paginated<T> {
    pub fn new(items: Vec<T>, total: u32, pagination: &Pagination, base_path: &str) -> Paginated<T> {
        Paginated {
            limit: pagination.limit,
            offset: pagination.offset,
            items,
            links: Links::new(base_path, pagination.offset, pagination.limit, total),
        }
    }
}

#[derive(Deserialize, Clone, Debug)]
pub struct Pagination {
    #[serde(default)]
    pub offset: u32,
    #[serde(default = "default_limit")]
    pub limit: u32,
}

fn default_limit() -> u32 {
    10
}

#[async_trait]
impl<S: Send + Sync> FromRequestParts<S> for Pagination {
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        match parts.extract::<Query<Pagination>>().await {
            Ok(Query(pagination)) => Ok(pagination),
            _ => Err((
                StatusCode::BAD_REQUEST,
                Json(json!({ "error": "Invalid pagination options" })),
            )
                .into_response()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Links;

    #[test]
    fn first_page_has_no_prev_link() {
        let links = Links::new("/orders", 0, 10, 25);
        assert!(links.prev.is_none());
        assert_eq!(links.this.href, "/orders/?offset=0&limit=10");
        assert_eq!(
            links.next.as_ref().map(|l| l.href.as_str()),
            Some("/orders/?offset=10&limit=10")
        );
    }

    #[test]
    fn last_page_has_no_next_link() {
        let links = Links::new("/orders", 20, 10, 25);
        assert_eq!(
            links.prev.as_ref().map(|l| l.href.as_str()),
            Some("/orders/?offset=10&limit=10")
        );
        assert!(links.next.is_none());
    }

    #[test]
    fn exactly_full_page_is_the_last_page() {
        let links = Links::new("/cart", 0, 10, 10);
        assert!(links.next.is_none());
    }
}
