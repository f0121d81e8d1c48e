//! UI event handlers (HTMX).
//!
//! Each handler resolves the page from the `x-page-id` header, dispatches one
//! event and answers with out-of-band fragments for the changed containers.
//! Class changes, notices and scroll targets are sent in an
//! `HX-Trigger-After-Swap` header as a `storefront:ui` event.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::FromRequestParts,
    http::{HeaderValue, request::Parts},
    response::{AppendHeaders, IntoResponse, Response},
};
use serde::Deserialize;
use tracing::instrument;
use uuid::Uuid;

use crate::dispatcher::UiEvent;
use crate::error::{AppError, Result, add_breadcrumb};
use crate::middleware::PAGE_ID_HEADER;
use crate::session::{Fragment, UiUpdate};
use crate::state::{AppState, SharedPage};

/// Header used to deliver the UI patch to the browser.
pub const HX_TRIGGER_AFTER_SWAP: &str = "HX-Trigger-After-Swap";

/// Name of the client-side event carrying the UI patch.
pub const UI_EVENT: &str = "storefront:ui";

/// Out-of-band fragments template.
#[derive(Template, WebTemplate)]
#[template(path = "partials/oob.html")]
pub struct OobTemplate {
    pub fragments: Vec<Fragment>,
}

/// The live page an event belongs to.
pub struct LivePage {
    pub id: Uuid,
    page: SharedPage,
}

impl FromRequestParts<AppState> for LivePage {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> std::result::Result<Self, Self::Rejection> {
        let raw = parts
            .headers
            .get(PAGE_ID_HEADER)
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| AppError::BadRequest(format!("missing {PAGE_ID_HEADER} header")))?;

        let id = Uuid::parse_str(raw.trim())
            .map_err(|_| AppError::BadRequest(format!("invalid {PAGE_ID_HEADER} header")))?;

        let page = state.page(id).await.ok_or(AppError::PageNotFound(id))?;
        Ok(Self { id, page })
    }
}

impl LivePage {
    /// Dispatch an event against the page and build the response.
    async fn handle(&self, event: UiEvent) -> Result<Response> {
        let update = self.page.lock().await.handle(&event)?;
        respond(update)
    }
}

/// Turn a UI update into an HTMX response.
fn respond(update: UiUpdate) -> Result<Response> {
    let fragments = OobTemplate {
        fragments: update.fragments,
    };

    if update.patch.is_empty() {
        return Ok(fragments.into_response());
    }

    let mut payload = serde_json::Map::new();
    payload.insert(
        UI_EVENT.to_string(),
        serde_json::to_value(&update.patch).map_err(|e| AppError::Internal(e.to_string()))?,
    );
    let json = ascii_json(&serde_json::Value::Object(payload).to_string());
    let trigger = HeaderValue::from_str(&json).map_err(|e| AppError::Internal(e.to_string()))?;

    Ok((AppendHeaders([(HX_TRIGGER_AFTER_SWAP, trigger)]), fragments).into_response())
}

/// Escape non-ASCII characters as `\uXXXX` so the JSON fits in a header.
///
/// Non-ASCII can only occur inside JSON strings, where the escape is valid.
fn ascii_json(json: &str) -> String {
    let mut out = String::with_capacity(json.len());
    for c in json.chars() {
        if c.is_ascii() {
            out.push(c);
        } else {
            let mut units = [0u16; 2];
            for unit in c.encode_utf16(&mut units) {
                out.push_str(&format!("\\u{unit:04x}"));
            }
        }
    }
    out
}

/// Form carrying a product id from a card affordance.
#[derive(Debug, Deserialize)]
pub struct ProductForm {
    #[serde(default)]
    pub product_id: String,
}

/// Form carrying a navigation target.
#[derive(Debug, Deserialize)]
pub struct NavigateForm {
    pub section: Option<String>,
}

/// Add a product to the cart and open the cart panel.
#[instrument(skip(page), fields(page_id = %page.id))]
pub async fn add(page: LivePage, Form(form): Form<ProductForm>) -> Result<Response> {
    add_breadcrumb("cart", "Add to cart", Some(&[("product_id", &form.product_id)]));
    page.handle(UiEvent::AddToCart {
        product_id: form.product_id,
    })
    .await
}

/// Confirm a rental.
#[instrument(skip(page), fields(page_id = %page.id))]
pub async fn rent(page: LivePage, Form(form): Form<ProductForm>) -> Result<Response> {
    add_breadcrumb("rent", "Rent now", Some(&[("product_id", &form.product_id)]));
    page.handle(UiEvent::Rent {
        product_id: form.product_id,
    })
    .await
}

/// Switch the active section.
#[instrument(skip(page), fields(page_id = %page.id))]
pub async fn navigate(page: LivePage, Form(form): Form<NavigateForm>) -> Result<Response> {
    page.handle(UiEvent::Navigate {
        section: form.section,
    })
    .await
}

/// Place the order.
#[instrument(skip(page), fields(page_id = %page.id))]
pub async fn checkout(page: LivePage) -> Result<Response> {
    add_breadcrumb("cart", "Checkout", None);
    page.handle(UiEvent::Checkout).await
}

#[instrument(skip(page), fields(page_id = %page.id))]
pub async fn open_cart(page: LivePage) -> Result<Response> {
    page.handle(UiEvent::OpenCart).await
}

#[instrument(skip(page), fields(page_id = %page.id))]
pub async fn close_cart(page: LivePage) -> Result<Response> {
    page.handle(UiEvent::CloseCart).await
}

#[instrument(skip(page), fields(page_id = %page.id))]
pub async fn toggle_menu(page: LivePage) -> Result<Response> {
    page.handle(UiEvent::ToggleMobileMenu).await
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::session::UiPatch;

    #[test]
    fn test_ascii_json_escapes_non_ascii() {
        let json = serde_json::json!({"name": "Jamdani Shari – নীল"}).to_string();
        let escaped = ascii_json(&json);
        assert!(escaped.is_ascii());
        let back: serde_json::Value = serde_json::from_str(&escaped).unwrap();
        assert_eq!(back["name"], "Jamdani Shari – নীল");
    }

    #[test]
    fn test_ascii_json_keeps_surrogate_pairs() {
        let escaped = ascii_json(r#""👗""#);
        assert_eq!(escaped, r#""\ud83d\udc57""#);
    }

    #[test]
    fn test_empty_patch_has_no_trigger() {
        let response = respond(UiUpdate::default()).unwrap();
        assert!(!response.headers().contains_key(HX_TRIGGER_AFTER_SWAP));
    }

    #[test]
    fn test_patch_is_wrapped_in_ui_event() {
        let update = UiUpdate {
            fragments: Vec::new(),
            patch: UiPatch {
                notices: vec!["Your cart is empty!".to_string()],
                ..UiPatch::default()
            },
        };
        let response = respond(update).unwrap();
        let raw = response.headers()[HX_TRIGGER_AFTER_SWAP].to_str().unwrap();
        let trigger: serde_json::Value = serde_json::from_str(raw).unwrap();
        assert_eq!(trigger[UI_EVENT]["notices"][0], "Your cart is empty!");
        assert!(trigger[UI_EVENT]["scroll_to"].is_null());
    }
}
