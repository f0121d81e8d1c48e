//! Storefront page handler.
//!
//! Every `GET /` is a new page load: a fresh page with an empty cart is
//! registered under a new page id and rendered in full. The page id is
//! embedded in the document so HTMX sends it with every event.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::State,
    response::{AppendHeaders, IntoResponse, Response},
};
use tracing::instrument;
use uuid::Uuid;

use crate::document::DocumentModel;
use crate::error::Result;
use crate::filters;
use crate::middleware::PAGE_ID_HEADER;
use crate::navigator::Section;
use crate::state::AppState;

/// A navigation link.
#[derive(Clone)]
pub struct NavLink {
    pub section_id: &'static str,
    pub label: &'static str,
}

/// Links shown in the header and the mobile menu.
fn nav_links() -> Vec<NavLink> {
    Section::ALL
        .into_iter()
        .map(|section| NavLink {
            section_id: section.element_id(),
            label: match section {
                Section::Home => "Home",
                Section::NewArrivals => "New Arrivals",
                Section::Buy => "Buy",
                Section::Rent => "Rent",
                Section::About => "About",
                Section::Contact => "Contact",
            },
        })
        .collect()
}

/// Full page template.
#[derive(Template, WebTemplate)]
#[template(path = "home.html")]
pub struct HomeTemplate {
    pub page_id: Uuid,
    pub document: DocumentModel,
    pub nav_links: Vec<NavLink>,
}

/// Start a page load and render the page.
#[instrument(skip(state))]
pub async fn home(State(state): State<AppState>) -> Result<Response> {
    let (page_id, page) = state.open_page().await?;
    let document = page.lock().await.document().clone();
    tracing::debug!(%page_id, "page opened");

    let template = HomeTemplate {
        page_id,
        document,
        nav_links: nav_links(),
    };

    Ok((
        AppendHeaders([(PAGE_ID_HEADER, page_id.to_string())]),
        template,
    )
        .into_response())
}
