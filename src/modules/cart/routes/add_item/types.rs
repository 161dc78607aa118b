pub mod request {
    use serde::Deserialize;

    #[derive(Deserialize)]
    pub struct Body {
        pub title: Option<String>,
        pub quantity: Option<i64>,
    }
}

pub mod response {
    use axum::{http::StatusCode, response::IntoResponse, Json};
    use serde_json::json;

    use crate::{modules::cart::repository::CartItem, utils::validation::FieldError};

    pub enum Success {
        Created(CartItem),
    }

    impl IntoResponse for Success {
        fn into_response(self) -> axum::response::Response {
            match self {
                Self::Created(item) => (StatusCode::CREATED, Json(json!(item))).into_response(),
            }
        }
    }

    pub enum Error {
        ValidationFailed(Vec<FieldError>),
        ActiveCartMissing,
        FailedToAddItem,
    }

    impl IntoResponse for Error {
        fn into_response(self) -> axum::response::Response {
            match self {
                Self::ValidationFailed(errors) => {
                    (StatusCode::BAD_REQUEST, Json(json!(errors))).into_response()
                }
                Self::ActiveCartMissing => (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "error": "Active cart is missing" })),
                )
                    .into_response(),
                Self::FailedToAddItem => (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "error": "Failed to add item to cart" })),
                )
                    .into_response(),
            }
        }
    }

    pub type Response = Result<Success, Error>;
}
