pub mod request {
    use serde::Deserialize;

    #[derive(Deserialize)]
    pub struct Body {
        pub name: Option<String>,
        pub address: Option<String>,
    }
}

pub mod response {
    use axum::{http::StatusCode, response::IntoResponse, Json};
    use serde_json::json;

    use crate::{modules::order::repository::Order, utils::validation::FieldError};

    pub enum Success {
        Placed(Order),
    }

    impl IntoResponse for Success {
        fn into_response(self) -> axum::response::Response {
            match self {
                Self::Placed(order) => (StatusCode::CREATED, Json(json!(order))).into_response(),
            }
        }
    }

    pub enum Error {
        EmptyCart,
        ValidationFailed(Vec<FieldError>),
        Conflict,
        ActiveCartMissing,
        FailedToPlaceOrder,
    }

    impl IntoResponse for Error {
        fn into_response(self) -> axum::response::Response {
            match self {
                Self::EmptyCart => (
                    StatusCode::BAD_REQUEST,
                    Json(json!({ "error": "Cart is empty" })),
                )
                    .into_response(),
                Self::ValidationFailed(errors) => {
                    (StatusCode::BAD_REQUEST, Json(json!(errors))).into_response()
                }
                Self::Conflict => (
                    StatusCode::CONFLICT,
                    Json(json!({ "error": "Cart was already checked out" })),
                )
                    .into_response(),
                Self::ActiveCartMissing => (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "error": "Active cart is missing" })),
                )
                    .into_response(),
                Self::FailedToPlaceOrder => (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "error": "Failed to place order" })),
                )
                    .into_response(),
            }
        }
    }

    pub type Response = Result<Success, Error>;
}
