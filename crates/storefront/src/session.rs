//! A page load as served over HTTP.
//!
//! [`PageSession`] pairs a [`Page`] with the [`DocumentModel`] mirroring the
//! browser's copy of the page. Handling an event turns the document's
//! mutation log into a [`UiUpdate`]: content replacements become HTMX
//! out-of-band fragments, class changes and notices travel as a JSON patch.
//! Deferred panel steps are applied to the model right away and shipped with
//! their delay, so the browser runs the transition while the model already
//! holds the settled state.
//!
//! The browser may still be waiting on a delayed change when the next event
//! touches the same element. Such elements are listed in [`UiPatch::cancel`]
//! and the browser drops their pending changes before applying the patch, so
//! a stale step can never undo a newer one.

use std::collections::BTreeSet;
use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;

use crate::catalog::Catalog;
use crate::dispatcher::{Page, UiEvent, apply_panel_step};
use crate::document::{DocumentModel, Mutation};
use crate::render::RenderError;

/// Replacement content for one element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fragment {
    pub id: String,
    pub html: String,
}

/// A class change for the browser to apply.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClassPatch {
    pub id: String,
    pub class: String,
    pub present: bool,
    /// Milliseconds to wait before applying the change.
    pub delay_ms: u64,
}

/// Everything the browser needs besides the fragments.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct UiPatch {
    /// Elements whose pending delayed changes must be dropped first.
    pub cancel: Vec<String>,
    pub classes: Vec<ClassPatch>,
    pub notices: Vec<String>,
    pub scroll_to: Option<String>,
}

impl UiPatch {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cancel.is_empty()
            && self.classes.is_empty()
            && self.notices.is_empty()
            && self.scroll_to.is_none()
    }
}

/// Result of handling one event.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UiUpdate {
    /// Last content per element, in order of first change.
    pub fragments: Vec<Fragment>,
    pub patch: UiPatch,
}

impl UiUpdate {
    fn absorb(&mut self, mutations: Vec<Mutation>, delay: Duration) {
        let delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX);

        for mutation in mutations {
            match mutation {
                Mutation::Html { id, html } => {
                    if let Some(existing) = self.fragments.iter_mut().find(|f| f.id == id) {
                        existing.html = html;
                    } else {
                        self.fragments.push(Fragment { id, html });
                    }
                }
                Mutation::Class { id, class, present } => {
                    self.patch.classes.push(ClassPatch {
                        id,
                        class,
                        present,
                        delay_ms,
                    });
                }
            }
        }
    }
}

/// Server-side state of one page load.
#[derive(Debug, Clone)]
pub struct PageSession {
    page: Page,
    document: DocumentModel,
    /// Elements with delayed changes the browser may not have applied yet.
    deferred: BTreeSet<String>,
}

impl PageSession {
    /// Start a page load and render its initial document.
    ///
    /// # Errors
    ///
    /// Returns an error if the initial fragments fail to render.
    pub fn open(catalog: Arc<Catalog>) -> Result<Self, RenderError> {
        let page = Page::new(catalog);
        let mut document = DocumentModel::storefront();
        page.load(&mut document)?;
        // The full page render already carries the initial state.
        document.take_mutations();

        Ok(Self {
            page,
            document,
            deferred: BTreeSet::new(),
        })
    }

    #[must_use]
    pub const fn page(&self) -> &Page {
        &self.page
    }

    #[must_use]
    pub const fn document(&self) -> &DocumentModel {
        &self.document
    }

    /// Handle an event and collect the resulting browser update.
    ///
    /// # Errors
    ///
    /// Returns an error if a fragment fails to render.
    pub fn handle(&mut self, event: &UiEvent) -> Result<UiUpdate, RenderError> {
        let dispatched = self.page.dispatch(event, &mut self.document)?;

        let mut update = UiUpdate::default();
        update.absorb(self.document.take_mutations(), Duration::ZERO);

        for (delay, step) in self.page.drain_pending() {
            apply_panel_step(step, &mut self.document);
            update.absorb(self.document.take_mutations(), delay);
        }

        self.supersede_deferred(&mut update.patch);
        update.patch.notices = dispatched.notices.iter().map(ToString::to_string).collect();
        update.patch.scroll_to = dispatched.scroll_to.map(|s| s.element_id().to_string());
        Ok(update)
    }

    /// Cancel outstanding delayed changes on elements this patch touches.
    fn supersede_deferred(&mut self, patch: &mut UiPatch) {
        let touched: BTreeSet<&str> = patch.classes.iter().map(|c| c.id.as_str()).collect();

        patch.cancel = self
            .deferred
            .iter()
            .filter(|id| touched.contains(id.as_str()))
            .cloned()
            .collect();
        self.deferred.retain(|id| !touched.contains(id.as_str()));

        self.deferred.extend(
            patch
                .classes
                .iter()
                .filter(|c| c.delay_ms > 0)
                .map(|c| c.id.clone()),
        );
    }
}
