mod common;

use serde_json::{json, Value};

#[tokio::test]
async fn cart_flow_from_registration_to_order() {
    let app = common::spawn_app().await;
    let admin_token = app.register_admin("admin").await;
    app.seed_product(&admin_token, "Widget", 100).await;

    let token = app.register_user("alice").await;

    // A fresh user starts with an empty active cart.
    let cart = app.get_cart(&token).await;
    assert_eq!(cart["items"].as_array().expect("items").len(), 0);
    assert_eq!(cart["cart_total"], 0);

    app.add_to_cart(&token, "Widget", 3).await;

    let cart = app.get_cart(&token).await;
    let items = cart["items"].as_array().expect("items");
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["title"], "Widget");
    assert_eq!(items[0]["quantity"], 3);
    assert_eq!(items[0]["line_total"], 300);
    assert_eq!(items[0]["line_number"], 1);
    assert_eq!(cart["cart_total"], 300);

    let response = app
        .place_order(&token, json!({ "name": "Alice", "address": "1 Main St" }))
        .await;
    assert_eq!(response.status(), 201);
    let order: Value = response.json().await.expect("order body");
    assert_eq!(order["name"], "Alice");
    assert_eq!(order["address"], "1 Main St");
    assert_eq!(order["total"], 300);
    assert!(order["placed_at"].is_string());
    let manifest = order["items"].as_array().expect("manifest");
    assert_eq!(manifest.len(), 1);
    assert_eq!(manifest[0]["title"], "Widget");
    assert_eq!(manifest[0]["quantity"], 3);

    // Checkout rolled a fresh, empty cart.
    let cart = app.get_cart(&token).await;
    assert_eq!(cart["items"].as_array().expect("items").len(), 0);
    assert_eq!(cart["cart_total"], 0);

    // The old cart is now reachable only through the order listing.
    let response = app
        .client
        .get(format!("{}/orders", app.address))
        .bearer_auth(&token)
        .send()
        .await
        .expect("orders request failed");
    assert_eq!(response.status(), 200);
    let orders: Value = response.json().await.expect("orders body");
    let listed = orders["items"].as_array().expect("orders items");
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0]["id"], order["id"]);
    assert_eq!(listed[0]["items"].as_array().expect("lines").len(), 1);
}

#[tokio::test]
async fn add_item_reports_every_field_error_at_once() {
    let app = common::spawn_app().await;
    let admin_token = app.register_admin("admin").await;
    app.seed_product(&admin_token, "Widget", 100).await;
    let token = app.register_user("alice").await;

    let response = app
        .client
        .post(format!("{}/cart", app.address))
        .bearer_auth(&token)
        .json(&json!({ "title": "", "quantity": 0 }))
        .send()
        .await
        .expect("add request failed");
    assert_eq!(response.status(), 400);

    let errors: Value = response.json().await.expect("error body");
    let errors = errors.as_array().expect("error array");
    assert_eq!(errors.len(), 2);
    let fields: Vec<&str> = errors
        .iter()
        .map(|error| error["field"].as_str().expect("field"))
        .collect();
    assert!(fields.contains(&"title"));
    assert!(fields.contains(&"quantity"));

    // An unknown product is a field error too, not a 404.
    let response = app
        .client
        .post(format!("{}/cart", app.address))
        .bearer_auth(&token)
        .json(&json!({ "title": "No Such Product", "quantity": 1 }))
        .send()
        .await
        .expect("add request failed");
    assert_eq!(response.status(), 400);
    let errors: Value = response.json().await.expect("error body");
    assert_eq!(errors.as_array().expect("error array")[0]["field"], "title");

    // Nothing was written along the way.
    let cart = app.get_cart(&token).await;
    assert_eq!(cart["items"].as_array().expect("items").len(), 0);
}

#[tokio::test]
async fn quantity_updates_are_validated_and_applied() {
    let app = common::spawn_app().await;
    let admin_token = app.register_admin("admin").await;
    app.seed_product(&admin_token, "Widget", 100).await;
    let token = app.register_user("alice").await;

    let item = app.add_to_cart(&token, "Widget", 2).await;
    let line_url = format!("{}/cart/line/{}", app.address, item["id"].as_str().expect("id"));

    // Zero, negative and missing quantities are rejected without mutating.
    for body in [json!({ "quantity": 0 }), json!({ "quantity": -3 }), json!({})] {
        let response = app
            .client
            .patch(&line_url)
            .bearer_auth(&token)
            .json(&body)
            .send()
            .await
            .expect("patch request failed");
        assert_eq!(response.status(), 400);
    }

    let cart = app.get_cart(&token).await;
    assert_eq!(cart["items"][0]["quantity"], 2);

    let response = app
        .client
        .patch(&line_url)
        .bearer_auth(&token)
        .json(&json!({ "quantity": 5 }))
        .send()
        .await
        .expect("patch request failed");
    assert_eq!(response.status(), 200);
    let updated: Value = response.json().await.expect("updated body");
    assert_eq!(updated["quantity"], 5);

    let cart = app.get_cart(&token).await;
    assert_eq!(cart["items"][0]["quantity"], 5);
    assert_eq!(cart["cart_total"], 500);
}

#[tokio::test]
async fn line_items_are_isolated_between_users() {
    let app = common::spawn_app().await;
    let admin_token = app.register_admin("admin").await;
    app.seed_product(&admin_token, "Widget", 100).await;

    let alice = app.register_user("alice").await;
    let bob = app.register_user("bob").await;

    let alice_item = app.add_to_cart(&alice, "Widget", 2).await;
    app.add_to_cart(&bob, "Widget", 7).await;

    let alice_line = format!(
        "{}/cart/line/{}",
        app.address,
        alice_item["id"].as_str().expect("id")
    );

    // Bob can neither observe nor mutate Alice's line item.
    let response = app
        .client
        .get(&alice_line)
        .bearer_auth(&bob)
        .send()
        .await
        .expect("get request failed");
    assert_eq!(response.status(), 404);

    let response = app
        .client
        .patch(&alice_line)
        .bearer_auth(&bob)
        .json(&json!({ "quantity": 1 }))
        .send()
        .await
        .expect("patch request failed");
    assert_eq!(response.status(), 404);

    let response = app
        .client
        .delete(&alice_line)
        .bearer_auth(&bob)
        .send()
        .await
        .expect("delete request failed");
    assert_eq!(response.status(), 404);

    // Alice still sees her line, untouched.
    let response = app
        .client
        .get(&alice_line)
        .bearer_auth(&alice)
        .send()
        .await
        .expect("get request failed");
    assert_eq!(response.status(), 200);
    let line: Value = response.json().await.expect("line body");
    assert_eq!(line["quantity"], 2);
    assert_eq!(line["title"], "Widget");
}

#[tokio::test]
async fn deleting_a_line_is_permanent_and_scoped() {
    let app = common::spawn_app().await;
    let admin_token = app.register_admin("admin").await;
    app.seed_product(&admin_token, "Widget", 100).await;
    let token = app.register_user("alice").await;

    let first = app.add_to_cart(&token, "Widget", 1).await;
    app.add_to_cart(&token, "Widget", 2).await;

    let line_url = format!(
        "{}/cart/line/{}",
        app.address,
        first["id"].as_str().expect("id")
    );

    let response = app
        .client
        .delete(&line_url)
        .bearer_auth(&token)
        .send()
        .await
        .expect("delete request failed");
    assert_eq!(response.status(), 204);

    let cart = app.get_cart(&token).await;
    assert_eq!(cart["items"].as_array().expect("items").len(), 1);

    // A second delete of the same line is a 404, not a silent no-op.
    let response = app
        .client
        .delete(&line_url)
        .bearer_auth(&token)
        .send()
        .await
        .expect("delete request failed");
    assert_eq!(response.status(), 404);
}

#[tokio::test]
async fn re_adding_a_product_keeps_separate_lines() {
    let app = common::spawn_app().await;
    let admin_token = app.register_admin("admin").await;
    app.seed_product(&admin_token, "Widget", 100).await;
    let token = app.register_user("alice").await;

    app.add_to_cart(&token, "Widget", 1).await;
    app.add_to_cart(&token, "Widget", 4).await;

    let cart = app.get_cart(&token).await;
    let items = cart["items"].as_array().expect("items");
    assert_eq!(items.len(), 2);
    assert_eq!(items[0]["line_number"], 1);
    assert_eq!(items[1]["line_number"], 2);
    assert_eq!(cart["cart_total"], 500);
}

#[tokio::test]
async fn cart_listing_paginates_with_link_hints() {
    let app = common::spawn_app().await;
    let admin_token = app.register_admin("admin").await;
    app.seed_product(&admin_token, "Widget", 100).await;
    app.seed_product(&admin_token, "Gadget", 250).await;
    app.seed_product(&admin_token, "Sprocket", 40).await;
    let token = app.register_user("alice").await;

    app.add_to_cart(&token, "Widget", 1).await;
    app.add_to_cart(&token, "Gadget", 1).await;
    app.add_to_cart(&token, "Sprocket", 1).await;

    let response = app
        .client
        .get(format!("{}/cart?offset=0&limit=2", app.address))
        .bearer_auth(&token)
        .send()
        .await
        .expect("cart request failed");
    assert_eq!(response.status(), 200);
    let page: Value = response.json().await.expect("page body");
    assert_eq!(page["items"].as_array().expect("items").len(), 2);
    assert!(page["links"]["prev"].is_null());
    assert!(page["links"]["next"].is_object());
    // The running total always covers the whole cart, not just the page.
    assert_eq!(page["cart_total"], 390);

    let response = app
        .client
        .get(format!("{}/cart?offset=2&limit=2", app.address))
        .bearer_auth(&token)
        .send()
        .await
        .expect("cart request failed");
    let page: Value = response.json().await.expect("page body");
    assert_eq!(page["items"].as_array().expect("items").len(), 1);
    assert!(page["links"]["prev"].is_object());
    assert!(page["links"]["next"].is_null());
    assert_eq!(page["items"][0]["line_number"], 3);
}

#[tokio::test]
async fn cart_requires_authentication() {
    let app = common::spawn_app().await;

    let response = app
        .client
        .get(format!("{}/cart", app.address))
        .send()
        .await
        .expect("cart request failed");
    assert_eq!(response.status(), 401);

    let response = app
        .client
        .post(format!("{}/cart", app.address))
        .bearer_auth("not-a-real-token")
        .json(&json!({ "title": "Widget", "quantity": 1 }))
        .send()
        .await
        .expect("cart request failed");
    assert_eq!(response.status(), 401);
}
