//! End-to-end tests for the storefront page and its events.
//!
//! Each test opens a page with `GET /` and then posts events carrying the
//! page id, the way the browser does.

#![allow(clippy::unwrap_used)]

use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Request, StatusCode, header},
    response::Response,
};
use bazaar_integration_tests::test_app;
use serde_json::Value;
use tower::ServiceExt;
use uuid::Uuid;

async fn body_text(response: Response) -> String {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

/// Load the page and return its id.
async fn open_page(app: &Router) -> String {
    let response = app
        .clone()
        .oneshot(Request::get("/").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    response
        .headers()
        .get("x-page-id")
        .unwrap()
        .to_str()
        .unwrap()
        .to_string()
}

async fn post_event(app: &Router, page_id: &str, path: &str, form: &str) -> Response {
    let request = Request::post(path)
        .header("x-page-id", page_id)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(form.to_string()))
        .unwrap();
    app.clone().oneshot(request).await.unwrap()
}

/// The `storefront:ui` patch delivered with a response.
fn ui_patch(response: &Response) -> Value {
    let raw = response
        .headers()
        .get("HX-Trigger-After-Swap")
        .unwrap()
        .to_str()
        .unwrap();
    let trigger: Value = serde_json::from_str(raw).unwrap();
    trigger["storefront:ui"].clone()
}

fn has_class_change(patch: &Value, id: &str, class: &str, present: bool) -> bool {
    patch["classes"].as_array().unwrap().iter().any(|c| {
        c["id"] == id && c["class"] == class && c["present"] == present
    })
}

#[tokio::test]
async fn test_health() {
    let response = test_app()
        .oneshot(Request::get("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_text(response).await, "ok");
}

#[tokio::test]
async fn test_page_renders_initial_state() {
    let response = test_app()
        .oneshot(Request::get("/").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let page_id = response.headers().get("x-page-id").unwrap().to_str().unwrap().to_string();
    assert!(Uuid::parse_str(&page_id).is_ok());
    assert!(response.headers().contains_key("x-request-id"));

    let html = body_text(response).await;
    assert!(html.contains(&page_id));
    assert!(html.contains("Red Floral Saree"));
    assert!(html.contains("BDT 2500"));
    assert!(html.contains("add-to-cart-btn"));
    assert!(html.contains(r#"id="cart-count" "#));
    assert!(html.contains(r#"class="content-section active""#));
}

#[tokio::test]
async fn test_each_load_gets_its_own_page() {
    let app = test_app();
    let first = open_page(&app).await;
    let second = open_page(&app).await;
    assert_ne!(first, second);

    post_event(&app, &first, "/events/add", "product_id=1").await;
    let response = post_event(&app, &second, "/events/checkout", "").await;
    let patch = ui_patch(&response);
    assert_eq!(patch["notices"][0], "Your cart is empty!");
}

#[tokio::test]
async fn test_add_to_cart_updates_cart_and_opens_panel() {
    let app = test_app();
    let page_id = open_page(&app).await;

    let response = post_event(&app, &page_id, "/events/add", "product_id=1").await;
    assert_eq!(response.status(), StatusCode::OK);

    let patch = ui_patch(&response);
    assert!(has_class_change(&patch, "cart-modal", "hidden", false));
    assert!(has_class_change(&patch, "cart-modal-dialog", "scale-100", true));
    let reveal = patch["classes"]
        .as_array()
        .unwrap()
        .iter()
        .find(|c| c["class"] == "scale-100")
        .unwrap();
    assert_eq!(reveal["delay_ms"], 10);

    let html = body_text(response).await;
    assert!(html.contains(r#"<div id="cart-count" hx-swap-oob="innerHTML">1</div>"#));
    assert!(html.contains("BDT 2500"));
    assert!(html.contains("x 1"));
}

#[tokio::test]
async fn test_repeated_add_sums_total() {
    let app = test_app();
    let page_id = open_page(&app).await;

    post_event(&app, &page_id, "/events/add", "product_id=1").await;
    post_event(&app, &page_id, "/events/add", "product_id=2").await;
    let response = post_event(&app, &page_id, "/events/add", "product_id=1").await;

    let html = body_text(response).await;
    assert!(html.contains(r#"<div id="cart-count" hx-swap-oob="innerHTML">3</div>"#));
    assert!(html.contains("BDT 6800"));
    assert!(html.contains("x 2"));
}

#[tokio::test]
async fn test_add_unknown_product_is_noop() {
    let app = test_app();
    let page_id = open_page(&app).await;

    let response = post_event(&app, &page_id, "/events/add", "product_id=99").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(!response.headers().contains_key("HX-Trigger-After-Swap"));
    assert!(body_text(response).await.trim().is_empty());

    let response = post_event(&app, &page_id, "/events/add", "").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(!response.headers().contains_key("HX-Trigger-After-Swap"));
}

#[tokio::test]
async fn test_rent_raises_notice_without_touching_cart() {
    let app = test_app();
    let page_id = open_page(&app).await;

    let response = post_event(&app, &page_id, "/events/rent", "product_id=3").await;
    let patch = ui_patch(&response);
    assert_eq!(
        patch["notices"][0],
        "You are now renting \"Casual Jeans\". An email with rental details will be sent to you shortly."
    );
    assert!(patch["classes"].as_array().unwrap().is_empty());
    assert!(body_text(response).await.trim().is_empty());
}

#[tokio::test]
async fn test_checkout_empty_and_filled_cart() {
    let app = test_app();
    let page_id = open_page(&app).await;

    let response = post_event(&app, &page_id, "/events/checkout", "").await;
    assert_eq!(ui_patch(&response)["notices"][0], "Your cart is empty!");

    post_event(&app, &page_id, "/events/add", "product_id=4").await;
    let response = post_event(&app, &page_id, "/events/checkout", "").await;
    let patch = ui_patch(&response);
    assert_eq!(
        patch["notices"][0],
        "Thank you for your order! Your purchase is complete."
    );
    assert!(has_class_change(&patch, "cart-modal-dialog", "scale-95", true));
    let hide = patch["classes"]
        .as_array()
        .unwrap()
        .iter()
        .find(|c| c["class"] == "hidden")
        .unwrap();
    assert_eq!(hide["present"], true);
    assert_eq!(hide["delay_ms"], 300);

    let html = body_text(response).await;
    assert!(html.contains(r#"<div id="cart-count" hx-swap-oob="innerHTML">0</div>"#));

    let response = post_event(&app, &page_id, "/events/checkout", "").await;
    assert_eq!(ui_patch(&response)["notices"][0], "Your cart is empty!");
}

#[tokio::test]
async fn test_navigate_switches_section_and_scrolls() {
    let app = test_app();
    let page_id = open_page(&app).await;

    let response = post_event(&app, &page_id, "/events/navigate", "section=rent-content").await;
    let patch = ui_patch(&response);
    assert_eq!(patch["scroll_to"], "rent-content");
    assert!(has_class_change(&patch, "home-content", "active", false));
    assert!(has_class_change(&patch, "rent-content", "active", true));

    let html = body_text(response).await;
    assert!(html.contains(r#"id="rent-products""#));
    assert!(html.contains("/ day"));
}

#[tokio::test]
async fn test_navigate_unknown_section_is_noop() {
    let app = test_app();
    let page_id = open_page(&app).await;

    let response = post_event(&app, &page_id, "/events/navigate", "section=nowhere").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(!response.headers().contains_key("HX-Trigger-After-Swap"));
    assert!(body_text(response).await.trim().is_empty());
}

#[tokio::test]
async fn test_mobile_menu_toggles() {
    let app = test_app();
    let page_id = open_page(&app).await;

    let response = post_event(&app, &page_id, "/events/menu/toggle", "").await;
    assert!(has_class_change(&ui_patch(&response), "mobile-menu", "-translate-y-full", false));

    let response = post_event(&app, &page_id, "/events/menu/toggle", "").await;
    assert!(has_class_change(&ui_patch(&response), "mobile-menu", "-translate-y-full", true));
}

#[tokio::test]
async fn test_close_cart_hides_panel_after_delay() {
    let app = test_app();
    let page_id = open_page(&app).await;

    post_event(&app, &page_id, "/events/cart/open", "").await;
    let response = post_event(&app, &page_id, "/events/cart/close", "").await;
    let patch = ui_patch(&response);
    assert!(has_class_change(&patch, "cart-modal-dialog", "scale-100", false));
    assert!(has_class_change(&patch, "cart-modal", "hidden", true));
}

#[tokio::test]
async fn test_reopen_cancels_pending_hide() {
    let app = test_app();
    let page_id = open_page(&app).await;

    let response = post_event(&app, &page_id, "/events/cart/open", "").await;
    assert!(ui_patch(&response)["cancel"].as_array().unwrap().is_empty());
    post_event(&app, &page_id, "/events/cart/close", "").await;

    let response = post_event(&app, &page_id, "/events/cart/open", "").await;
    let patch = ui_patch(&response);
    assert_eq!(patch["cancel"], serde_json::json!(["cart-modal"]));
    assert!(has_class_change(&patch, "cart-modal", "hidden", false));

    let response = post_event(&app, &page_id, "/events/cart/open", "").await;
    assert!(!response.headers().contains_key("HX-Trigger-After-Swap"));

    post_event(&app, &page_id, "/events/cart/close", "").await;
    let response = post_event(&app, &page_id, "/events/add", "product_id=2").await;
    let patch = ui_patch(&response);
    assert_eq!(patch["cancel"], serde_json::json!(["cart-modal"]));
    assert!(has_class_change(&patch, "cart-modal", "hidden", false));
}

#[tokio::test]
async fn test_missing_page_id_is_bad_request() {
    let request = Request::post("/events/checkout").body(Body::empty()).unwrap();
    let response = test_app().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let request = Request::post("/events/checkout")
        .header("x-page-id", "not-a-uuid")
        .body(Body::empty())
        .unwrap();
    let response = test_app().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_unknown_page_is_not_found() {
    let app = test_app();
    let response = post_event(&app, &Uuid::new_v4().to_string(), "/events/checkout", "").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_static_script_is_served() {
    let response = test_app()
        .oneshot(
            Request::get("/static/js/storefront.js")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_text(response).await.contains("storefront:ui"));
}
