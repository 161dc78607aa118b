pub mod request {}

pub mod response {
    use axum::{http::StatusCode, response::IntoResponse, Json};
    use serde::Serialize;
    use serde_json::json;

    use crate::{modules::cart::repository::CartLine, utils::pagination::Paginated};

    #[derive(Serialize)]
    pub struct CartPage {
        #[serde(flatten)]
        pub page: Paginated<CartLine>,
        pub cart_total: i64,
    }

    pub enum Success {
        Page(CartPage),
    }

    impl IntoResponse for Success {
        fn into_response(self) -> axum::response::Response {
            match self {
                Self::Page(page) => (StatusCode::OK, Json(json!(page))).into_response(),
            }
        }
    }

    pub enum Error {
        ActiveCartMissing,
        FailedToFetchCart,
    }

    impl IntoResponse for Error {
        fn into_response(self) -> axum::response::Response {
            match self {
                Self::ActiveCartMissing => (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "error": "Active cart is missing" })),
                )
                    .into_response(),
                Self::FailedToFetchCart => (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "error": "Failed to fetch cart" })),
                )
                    .into_response(),
            }
        }
    }

    pub type Response = Result<Success, Error>;
}
