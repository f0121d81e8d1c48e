//! The document boundary the dispatcher writes to.
//!
//! The dispatcher never touches markup directly. It replaces the content of
//! identified elements and toggles state classes on them through the
//! [`Document`] trait. Writes to an element that does not exist are skipped
//! and reported as `false`.
//!
//! [`DocumentModel`] is the in-memory implementation. It keeps the current
//! content and state classes of each element and records every change in a
//! mutation log, which the HTTP layer turns into HTMX swaps.

use std::collections::{BTreeMap, BTreeSet};

use crate::navigator::Section;
use crate::render::ProductGrid;

/// Element ids used by the storefront page.
pub mod ids {
    pub const CART_COUNT: &str = "cart-count";
    pub const CART_ITEMS: &str = "cart-items";
    pub const CART_TOTAL: &str = "cart-total";
    pub const CART_MODAL: &str = "cart-modal";
    pub const CART_MODAL_DIALOG: &str = "cart-modal-dialog";
    pub const MOBILE_MENU: &str = "mobile-menu";
}

/// State classes toggled on elements.
pub mod classes {
    /// Marks the visible content section.
    pub const ACTIVE: &str = "active";
    /// Removes an element from the layout.
    pub const HIDDEN: &str = "hidden";
    pub const SCALE_IN: &str = "scale-100";
    pub const SCALE_OUT: &str = "scale-95";
    /// Slides the mobile menu out of view.
    pub const MENU_COLLAPSED: &str = "-translate-y-full";
}

/// Mutable view of the page's identified elements.
pub trait Document {
    /// Replace an element's content. Returns `false` if the element is missing.
    fn set_inner_html(&mut self, id: &str, html: String) -> bool;

    /// Add or remove a class. Returns `false` if the element is missing.
    fn set_class(&mut self, id: &str, class: &str, present: bool) -> bool;

    /// Whether an element currently carries a class. `None` if it is missing.
    fn has_class(&self, id: &str, class: &str) -> Option<bool>;

    /// Flip a class, returning whether it is now present.
    fn toggle_class(&mut self, id: &str, class: &str) -> Option<bool> {
        let present = !self.has_class(id, class)?;
        self.set_class(id, class, present);
        Some(present)
    }
}

/// A change applied to the document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mutation {
    Html {
        id: String,
        html: String,
    },
    Class {
        id: String,
        class: String,
        present: bool,
    },
}

#[derive(Debug, Clone, Default)]
struct Element {
    html: String,
    classes: BTreeSet<String>,
}

/// In-memory document with a mutation log.
#[derive(Debug, Clone, Default)]
pub struct DocumentModel {
    elements: BTreeMap<String, Element>,
    log: Vec<Mutation>,
}

impl DocumentModel {
    /// An empty document with no elements.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The storefront page skeleton: every container the dispatcher writes
    /// to, with the panel hidden and the mobile menu collapsed.
    #[must_use]
    pub fn storefront() -> Self {
        let mut doc = Self::new()
            .with_element(ids::CART_COUNT, &[])
            .with_element(ids::CART_ITEMS, &[])
            .with_element(ids::CART_TOTAL, &[])
            .with_element(ids::CART_MODAL, &[classes::HIDDEN])
            .with_element(ids::CART_MODAL_DIALOG, &[classes::SCALE_OUT])
            .with_element(ids::MOBILE_MENU, &[classes::MENU_COLLAPSED]);

        for grid in ProductGrid::ALL {
            doc = doc.with_element(grid.element_id(), &[]);
        }
        for section in Section::ALL {
            doc = doc.with_element(section.element_id(), &[]);
        }
        doc
    }

    /// Add an element with initial state classes. Not recorded in the log.
    #[must_use]
    pub fn with_element(mut self, id: &str, initial_classes: &[&str]) -> Self {
        self.elements.insert(
            id.to_string(),
            Element {
                html: String::new(),
                classes: initial_classes.iter().map(ToString::to_string).collect(),
            },
        );
        self
    }

    /// Remove an element, as if it were absent from the markup.
    pub fn remove_element(&mut self, id: &str) -> bool {
        self.elements.remove(id).is_some()
    }

    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.elements.contains_key(id)
    }

    /// Current content of an element, empty if missing.
    #[must_use]
    pub fn html(&self, id: &str) -> &str {
        self.elements.get(id).map_or("", |e| e.html.as_str())
    }

    /// Current state classes of an element, space separated.
    #[must_use]
    pub fn classes(&self, id: &str) -> String {
        self.elements
            .get(id)
            .map(|e| e.classes.iter().map(String::as_str).collect::<Vec<_>>().join(" "))
            .unwrap_or_default()
    }

    /// Drain the mutation log.
    pub fn take_mutations(&mut self) -> Vec<Mutation> {
        std::mem::take(&mut self.log)
    }
}

impl Document for DocumentModel {
    fn set_inner_html(&mut self, id: &str, html: String) -> bool {
        let Some(element) = self.elements.get_mut(id) else {
            return false;
        };
        element.html.clone_from(&html);
        self.log.push(Mutation::Html {
            id: id.to_string(),
            html,
        });
        true
    }

    fn set_class(&mut self, id: &str, class: &str, present: bool) -> bool {
        let Some(element) = self.elements.get_mut(id) else {
            return false;
        };
        let changed = if present {
            element.classes.insert(class.to_string())
        } else {
            element.classes.remove(class)
        };
        // Only real transitions are logged, repeated adds are idempotent.
        if changed {
            self.log.push(Mutation::Class {
                id: id.to_string(),
                class: class.to_string(),
                present,
            });
        }
        true
    }

    fn has_class(&self, id: &str, class: &str) -> Option<bool> {
        self.elements.get(id).map(|e| e.classes.contains(class))
    }
}
