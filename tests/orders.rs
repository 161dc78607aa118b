mod common;

use serde_json::{json, Value};

#[tokio::test]
async fn empty_cart_cannot_be_checked_out() {
    let app = common::spawn_app().await;
    let token = app.register_user("alice").await;

    let response = app
        .place_order(&token, json!({ "name": "Alice", "address": "1 Main St" }))
        .await;
    assert_eq!(response.status(), 400);
    let body: Value = response.json().await.expect("error body");
    assert_eq!(body["error"], "Cart is empty");

    // The cart is still active and no order was created.
    let cart = app.get_cart(&token).await;
    assert_eq!(cart["items"].as_array().expect("items").len(), 0);

    let response = app
        .client
        .get(format!("{}/orders", app.address))
        .bearer_auth(&token)
        .send()
        .await
        .expect("orders request failed");
    let orders: Value = response.json().await.expect("orders body");
    assert_eq!(orders["items"].as_array().expect("items").len(), 0);
}

#[tokio::test]
async fn checkout_validation_accumulates_and_commits_nothing() {
    let app = common::spawn_app().await;
    let admin_token = app.register_admin("admin").await;
    app.seed_product(&admin_token, "Widget", 100).await;
    let token = app.register_user("alice").await;
    app.add_to_cart(&token, "Widget", 1).await;

    // Both fields missing: both reported in one response.
    let response = app.place_order(&token, json!({})).await;
    assert_eq!(response.status(), 400);
    let errors: Value = response.json().await.expect("error body");
    let fields: Vec<&str> = errors
        .as_array()
        .expect("error array")
        .iter()
        .map(|error| error["field"].as_str().expect("field"))
        .collect();
    assert!(fields.contains(&"name"));
    assert!(fields.contains(&"address"));

    // A valid name with a missing address fails on the address...
    let response = app.place_order(&token, json!({ "name": "Alice" })).await;
    assert_eq!(response.status(), 400);
    let errors: Value = response.json().await.expect("error body");
    let errors = errors.as_array().expect("error array");
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0]["field"], "address");

    // ...and must not have committed the name: supplying only the address
    // now still fails on the name.
    let response = app
        .place_order(&token, json!({ "address": "1 Main St" }))
        .await;
    assert_eq!(response.status(), 400);
    let errors: Value = response.json().await.expect("error body");
    let errors = errors.as_array().expect("error array");
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0]["field"], "name");

    // The cart was never converted along the way.
    let response = app
        .place_order(&token, json!({ "name": "Alice", "address": "1 Main St" }))
        .await;
    assert_eq!(response.status(), 201);
}

#[tokio::test]
async fn contact_fields_carry_forward_to_the_next_cart() {
    let app = common::spawn_app().await;
    let admin_token = app.register_admin("admin").await;
    app.seed_product(&admin_token, "Widget", 100).await;
    let token = app.register_user("alice").await;

    app.add_to_cart(&token, "Widget", 1).await;
    let response = app
        .place_order(&token, json!({ "name": "Alice", "address": "1 Main St" }))
        .await;
    assert_eq!(response.status(), 201);

    // The replacement cart inherited the shipping details, so a repeat
    // purchase needs no contact fields at all.
    app.add_to_cart(&token, "Widget", 2).await;
    let response = app.place_order(&token, json!({})).await;
    assert_eq!(response.status(), 201);
    let order: Value = response.json().await.expect("order body");
    assert_eq!(order["name"], "Alice");
    assert_eq!(order["address"], "1 Main St");
}

#[tokio::test]
async fn stored_contact_fields_beat_the_request() {
    let app = common::spawn_app().await;
    let admin_token = app.register_admin("admin").await;
    app.seed_product(&admin_token, "Widget", 100).await;

    // Registration may already store the contact fields on the first cart.
    let response = app
        .client
        .post(format!("{}/auth/sign-up", app.address))
        .json(&json!({
            "username": "bob",
            "email": "bob@example.com",
            "password": "correct horse battery staple",
            "name": "Bob",
            "address": "2 Side St",
        }))
        .send()
        .await
        .expect("sign-up request failed");
    assert_eq!(response.status(), 201);
    let token = app.sign_in("bob").await;

    app.add_to_cart(&token, "Widget", 1).await;

    // First write wins: the values from registration stick.
    let response = app
        .place_order(&token, json!({ "name": "Somebody Else", "address": "9 Other Rd" }))
        .await;
    assert_eq!(response.status(), 201);
    let order: Value = response.json().await.expect("order body");
    assert_eq!(order["name"], "Bob");
    assert_eq!(order["address"], "2 Side St");
}

#[tokio::test]
async fn admins_see_all_orders_and_users_only_their_own() {
    let app = common::spawn_app().await;
    let admin_token = app.register_admin("admin").await;
    app.seed_product(&admin_token, "Widget", 100).await;

    for username in ["alice", "bob"] {
        let token = app.register_user(username).await;
        app.add_to_cart(&token, "Widget", 1).await;
        let response = app
            .place_order(
                &token,
                json!({ "name": username, "address": "1 Main St" }),
            )
            .await;
        assert_eq!(response.status(), 201);
    }

    let response = app
        .client
        .get(format!("{}/orders", app.address))
        .bearer_auth(&admin_token)
        .send()
        .await
        .expect("orders request failed");
    let orders: Value = response.json().await.expect("orders body");
    let items = orders["items"].as_array().expect("items");
    assert_eq!(items.len(), 2);
    let owners: Vec<&str> = items
        .iter()
        .map(|order| order["owner_id"].as_str().expect("owner"))
        .collect();
    assert_ne!(owners[0], owners[1]);

    let alice_token = app.sign_in("alice").await;
    let response = app
        .client
        .get(format!("{}/orders", app.address))
        .bearer_auth(&alice_token)
        .send()
        .await
        .expect("orders request failed");
    let orders: Value = response.json().await.expect("orders body");
    assert_eq!(orders["items"].as_array().expect("items").len(), 1);
}

#[tokio::test]
async fn order_lookup_checks_existence_before_ownership() {
    let app = common::spawn_app().await;
    let admin_token = app.register_admin("admin").await;
    app.seed_product(&admin_token, "Widget", 100).await;

    let alice = app.register_user("alice").await;
    app.add_to_cart(&alice, "Widget", 1).await;
    let response = app
        .place_order(&alice, json!({ "name": "Alice", "address": "1 Main St" }))
        .await;
    let order: Value = response.json().await.expect("order body");
    let order_id = order["id"].as_str().expect("order id");

    // Unknown id: 404 regardless of caller.
    let response = app
        .client
        .get(format!("{}/orders/does-not-exist", app.address))
        .bearer_auth(&alice)
        .send()
        .await
        .expect("order request failed");
    assert_eq!(response.status(), 404);

    // Foreign id for a non-admin: the order exists, so this is a 403.
    let bob = app.register_user("bob").await;
    let response = app
        .client
        .get(format!("{}/orders/{}", app.address, order_id))
        .bearer_auth(&bob)
        .send()
        .await
        .expect("order request failed");
    assert_eq!(response.status(), 403);

    // The owner and an admin both get the order with its manifest.
    for token in [&alice, &admin_token] {
        let response = app
            .client
            .get(format!("{}/orders/{}", app.address, order_id))
            .bearer_auth(token)
            .send()
            .await
            .expect("order request failed");
        assert_eq!(response.status(), 200);
        let order: Value = response.json().await.expect("order body");
        assert_eq!(order["items"].as_array().expect("manifest").len(), 1);
    }
}

#[tokio::test]
async fn concurrent_checkouts_have_exactly_one_winner() {
    let app = common::spawn_app().await;
    let admin_token = app.register_admin("admin").await;
    app.seed_product(&admin_token, "Widget", 100).await;
    let token = app.register_user("alice").await;
    app.add_to_cart(&token, "Widget", 1).await;

    let body = json!({ "name": "Alice", "address": "1 Main St" });
    let (first, second) = tokio::join!(
        app.place_order(&token, body.clone()),
        app.place_order(&token, body.clone()),
    );

    let statuses = [first.status().as_u16(), second.status().as_u16()];
    let winners = statuses.iter().filter(|status| **status == 201).count();
    assert_eq!(winners, 1, "exactly one checkout may convert the cart");

    // The loser failed cleanly, whichever way it lost the race.
    let loser = statuses
        .iter()
        .find(|status| **status != 201)
        .expect("loser status");
    assert!(
        [400, 409, 500].contains(loser),
        "loser must fail cleanly, got {}",
        loser
    );

    // Store-level invariants: one order, one active cart.
    let (orders,): (i64,) = sqlx::query_as(
        "SELECT COUNT(*) FROM carts WHERE status = 'CHECKED_OUT'",
    )
    .fetch_one(&app.pool)
    .await
    .expect("order count");
    assert_eq!(orders, 1);

    let (active,): (i64,) = sqlx::query_as(
        "SELECT COUNT(*) FROM carts WHERE status = 'NOT_CHECKED_OUT'",
    )
    .fetch_one(&app.pool)
    .await
    .expect("active count");
    assert_eq!(active, 2, "alice and the admin each keep one active cart");

    // And the winner's replacement cart is usable immediately.
    let cart = app.get_cart(&token).await;
    assert_eq!(cart["items"].as_array().expect("items").len(), 0);
}

#[tokio::test]
async fn cart_provisioning_is_idempotent() {
    let app = common::spawn_app().await;
    let token = app.register_user("alice").await;

    let (owner_id,): (String,) =
        sqlx::query_as("SELECT id FROM users WHERE username = 'alice'")
            .fetch_one(&app.pool)
            .await
            .expect("owner id");

    // Registration already provisioned a cart, so both calls are no-ops.
    for _ in 0..2 {
        let created = webshop_backend_rs::modules::cart::repository::create_if_absent(
            &app.pool,
            owner_id.clone(),
        )
        .await
        .expect("create_if_absent failed");
        assert!(created.is_none());
    }

    let (active,): (i64,) = sqlx::query_as(
        "SELECT COUNT(*) FROM carts WHERE owner_id = $1 AND status = 'NOT_CHECKED_OUT'",
    )
    .bind(&owner_id)
    .fetch_one(&app.pool)
    .await
    .expect("active count");
    assert_eq!(active, 1);

    // The cart still works through the API afterwards.
    let cart = app.get_cart(&token).await;
    assert_eq!(cart["items"].as_array().expect("items").len(), 0);
}
