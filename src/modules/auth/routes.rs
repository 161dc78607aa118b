use axum::{
    extract::State, http::StatusCode, response::IntoResponse, routing::post, Json, Router,
};
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;
use validator::Validate;

use super::{repository, service};
use crate::{
    modules::{cart, user},
    types::Context,
    utils::{self, sanitize},
};

#[derive(Deserialize, Validate)]
pub struct SignUpPayload {
    #[validate(length(
        min = 1,
        max = 64,
        message = "Username must be a string of 1 to 64 characters"
    ))]
    username: String,
    #[validate(email(message = "Email must be a valid email address"))]
    email: String,
    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    password: String,
    #[validate(length(min = 1, message = "Name must be a non-empty string"))]
    name: Option<String>,
    #[validate(length(min = 1, message = "Address must be a non-empty string"))]
    address: Option<String>,
}

async fn sign_up(
    State(ctx): State<Arc<Context>>,
    Json(payload): Json<SignUpPayload>,
) -> impl IntoResponse {
    if let Err(errors) = payload.validate() {
        return utils::validation::into_response(errors);
    }

    let username = sanitize::clean(payload.username.as_str());

    match user::repository::find_by_username(&ctx.db_conn.pool, username.clone()).await {
        Ok(None) => (),
        Ok(Some(_)) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(json!({ "error": "Username is already taken" })),
            )
        }
        Err(_) => {
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": "Sign up failed" })),
            )
        }
    };

    match user::repository::find_by_email(&ctx.db_conn.pool, payload.email.clone()).await {
        Ok(None) => (),
        Ok(Some(_)) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(json!({ "error": "Email is already registered" })),
            )
        }
        Err(_) => {
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": "Sign up failed" })),
            )
        }
    };

    let password_hash = match service::hash_password(payload.password.as_str()) {
        Ok(hash) => hash,
        Err(_) => {
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": "Sign up failed" })),
            )
        }
    };

    // The user row and their first active cart are created together so an
    // authenticated user can never be observed without a cart.
    let mut tx = match ctx.db_conn.pool.begin().await {
        Ok(tx) => tx,
        Err(err) => {
            tracing::error!("Failed to start database transaction: {}", err);
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": "Sign up failed" })),
            );
        }
    };

    let user = match user::repository::create(
        &mut *tx,
        user::repository::CreateUserPayload {
            username,
            email: payload.email.clone(),
            password_hash,
        },
    )
    .await
    {
        Ok(user) => user,
        Err(_) => {
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": "Sign up failed" })),
            )
        }
    };

    if cart::repository::create_if_absent(&mut *tx, user.id.clone())
        .await
        .is_err()
    {
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "error": "Sign up failed" })),
        );
    }

    let name = payload.name.map(|name| sanitize::clean(name.as_str()));
    let address = payload.address.map(|address| sanitize::clean(address.as_str()));

    if (name.is_some() || address.is_some())
        && cart::repository::set_active_contact_by_owner_id(&mut *tx, user.id.clone(), name, address)
            .await
            .is_err()
    {
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "error": "Sign up failed" })),
        );
    }

    if let Err(err) = tx.commit().await {
        tracing::error!("Failed to commit transaction: {}", err);
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "error": "Sign up failed" })),
        );
    }

    (StatusCode::CREATED, Json(json!(user)))
}

#[derive(Deserialize)]
pub struct SignInPayload {
    username: String,
    password: String,
}

async fn sign_in(
    State(ctx): State<Arc<Context>>,
    Json(payload): Json<SignInPayload>,
) -> impl IntoResponse {
    let user = match user::repository::find_by_username(&ctx.db_conn.pool, payload.username).await {
        Ok(Some(user)) => user,
        Ok(None) => {
            return (
                StatusCode::UNAUTHORIZED,
                Json(json!({ "error": "Invalid username or password" })),
            )
        }
        Err(_) => {
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": "Sign in failed" })),
            )
        }
    };

    if !service::verify_password(payload.password.as_str(), user.password_hash.as_str()) {
        return (
            StatusCode::UNAUTHORIZED,
            Json(json!({ "error": "Invalid username or password" })),
        );
    }

    match repository::create(&ctx.db_conn.pool, user.id).await {
        Ok(session) => (
            StatusCode::OK,
            Json(json!({ "token": session.id, "expires_at": session.expires_at })),
        ),
        Err(_) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "error": "Sign in failed" })),
        ),
    }
}

pub fn get_router() -> Router<Arc<Context>> {
    Router::new()
        .route("/sign-up", post(sign_up))
        .route("/sign-in", post(sign_in))
}
