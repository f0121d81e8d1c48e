//! UI event dispatch for one page load.
//!
//! A [`Page`] owns everything a page load mutates: the cart, the active
//! section, the cart panel and its pending transitions. Events are handled
//! synchronously against a [`Document`]; the page never holds on to the
//! document between calls.
//!
//! Every failure path is a no-op. Unknown product ids, unknown sections and
//! missing elements are ignored, checkout on an empty cart only raises a
//! notice.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use bazaar_core::ProductId;
use tracing::debug;

use crate::cart::CartStore;
use crate::catalog::{Catalog, Product};
use crate::document::{Document, classes, ids};
use crate::navigator::{Section, SectionNavigator};
use crate::render::{ProductGrid, RenderError, render_cart_lines, render_grid};
use crate::timers::Timers;

/// Delay between showing the panel and scaling its dialog in.
pub const PANEL_REVEAL_DELAY: Duration = Duration::from_millis(10);

/// Delay between scaling the dialog out and hiding the panel.
pub const PANEL_HIDE_DELAY: Duration = Duration::from_millis(300);

/// Grids rendered when the page loads.
const INITIAL_GRIDS: [ProductGrid; 4] = [
    ProductGrid::NewArrivals,
    ProductGrid::Mens,
    ProductGrid::Womens,
    ProductGrid::Buy,
];

/// A user interaction.
///
/// Product ids and section ids arrive exactly as they were embedded in the
/// markup and are resolved by the page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiEvent {
    /// "Add to Cart" affordance.
    AddToCart { product_id: String },
    /// "Rent Now" affordance.
    Rent { product_id: String },
    /// Navigation link; `None` when the link carries no section id.
    Navigate { section: Option<String> },
    Checkout,
    OpenCart,
    CloseCart,
    ToggleMobileMenu,
}

/// Message shown to the user after an event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    Renting { product_name: String },
    EmptyCart,
    OrderPlaced,
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Renting { product_name } => write!(
                f,
                "You are now renting \"{product_name}\". An email with rental details will be sent to you shortly."
            ),
            Self::EmptyCart => f.write_str("Your cart is empty!"),
            Self::OrderPlaced => f.write_str("Thank you for your order! Your purchase is complete."),
        }
    }
}

/// What the caller should do after an event was handled.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Dispatched {
    pub notices: Vec<Notice>,
    /// The link's default navigation must be suppressed.
    ///
    /// Over HTTP the links navigate through `hx-post`, and HTMX already
    /// cancels the anchor's default action, so only in-process hosts read it.
    pub prevent_default: bool,
    /// Section to bring into view.
    pub scroll_to: Option<Section>,
}

/// Second half of a panel transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelStep {
    /// Scale the dialog in once the panel is visible.
    RevealDialog,
    /// Take the panel out of the layout once the dialog has scaled out.
    HidePanel,
}

/// State of a single page load.
#[derive(Debug, Clone)]
pub struct Page {
    catalog: Arc<Catalog>,
    cart: CartStore,
    navigator: SectionNavigator,
    timers: Timers<PanelStep>,
}

impl Page {
    /// A fresh page with an empty cart and the home section active.
    #[must_use]
    pub fn new(catalog: Arc<Catalog>) -> Self {
        let cart = CartStore::new(catalog.currency());
        Self {
            catalog,
            cart,
            navigator: SectionNavigator::default(),
            timers: Timers::new(),
        }
    }

    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    #[must_use]
    pub const fn cart(&self) -> &CartStore {
        &self.cart
    }

    #[must_use]
    pub const fn active_section(&self) -> Section {
        self.navigator.active()
    }

    #[must_use]
    pub const fn timers(&self) -> &Timers<PanelStep> {
        &self.timers
    }

    /// Initial render: section state, product grids and cart summary.
    ///
    /// # Errors
    ///
    /// Returns an error if a fragment fails to render.
    pub fn load(&self, doc: &mut impl Document) -> Result<(), RenderError> {
        let active = self.navigator.active();
        for section in Section::ALL {
            doc.set_class(section.element_id(), classes::ACTIVE, section == active);
        }
        for grid in INITIAL_GRIDS {
            self.render_grid(grid, doc)?;
        }
        self.sync_cart(doc)
    }

    /// Handle one event.
    ///
    /// # Errors
    ///
    /// Returns an error if a fragment fails to render.
    pub fn dispatch(
        &mut self,
        event: &UiEvent,
        doc: &mut impl Document,
    ) -> Result<Dispatched, RenderError> {
        let mut outcome = Dispatched::default();

        match event {
            UiEvent::AddToCart { product_id } => {
                if self.add_to_cart(product_id, doc)? {
                    self.open_cart(doc);
                }
            }
            UiEvent::Rent { product_id } => {
                outcome.notices.extend(self.rent(product_id));
            }
            UiEvent::Navigate { section } => {
                // Links without a section id keep their default behaviour.
                if let Some(section_id) = section.as_deref().filter(|s| !s.is_empty()) {
                    outcome.prevent_default = true;
                    outcome.scroll_to = self.navigate(section_id, doc)?;
                    doc.set_class(ids::MOBILE_MENU, classes::MENU_COLLAPSED, true);
                }
            }
            UiEvent::Checkout => {
                outcome.notices.push(self.checkout(doc)?);
            }
            UiEvent::OpenCart => self.open_cart(doc),
            UiEvent::CloseCart => self.close_cart(doc),
            UiEvent::ToggleMobileMenu => {
                doc.toggle_class(ids::MOBILE_MENU, classes::MENU_COLLAPSED);
            }
        }

        Ok(outcome)
    }

    /// Add one unit of the product named by `product_id` and resync the cart.
    ///
    /// Returns `false` if the id does not resolve to a catalog product.
    ///
    /// # Errors
    ///
    /// Returns an error if the cart fragments fail to render.
    pub fn add_to_cart(
        &mut self,
        product_id: &str,
        doc: &mut impl Document,
    ) -> Result<bool, RenderError> {
        let Some(product) = self.lookup(product_id).cloned() else {
            debug!(product_id, "ignoring add for unknown product");
            return Ok(false);
        };

        let quantity = self.cart.add(Arc::clone(&product));
        debug!(product_id = %product.id, quantity, "added to cart");
        self.sync_cart(doc)?;
        Ok(true)
    }

    /// Confirm a rental. Nothing is recorded.
    #[must_use]
    pub fn rent(&self, product_id: &str) -> Option<Notice> {
        let product = self.lookup(product_id)?;
        Some(Notice::Renting {
            product_name: product.name.clone(),
        })
    }

    /// Switch to the section with the given element id.
    ///
    /// Returns the newly active section, or `None` if the id is unknown, in
    /// which case nothing changes.
    ///
    /// # Errors
    ///
    /// Returns an error if a listing fails to render.
    pub fn navigate(
        &mut self,
        section_id: &str,
        doc: &mut impl Document,
    ) -> Result<Option<Section>, RenderError> {
        let Some(transition) = self.navigator.activate(section_id) else {
            debug!(section_id, "ignoring navigation to unknown section");
            return Ok(None);
        };

        doc.set_class(transition.from.element_id(), classes::ACTIVE, false);
        doc.set_class(transition.to.element_id(), classes::ACTIVE, true);
        if let Some(grid) = transition.repopulate() {
            self.render_grid(grid, doc)?;
        }

        debug!(from = %transition.from, to = %transition.to, "section activated");
        Ok(Some(transition.to))
    }

    /// Place the order: clear the cart, resync and close the panel.
    ///
    /// An empty cart is left untouched and only yields a notice.
    ///
    /// # Errors
    ///
    /// Returns an error if the cart fragments fail to render.
    pub fn checkout(&mut self, doc: &mut impl Document) -> Result<Notice, RenderError> {
        if self.cart.is_empty() {
            return Ok(Notice::EmptyCart);
        }

        debug!(
            items = self.cart.total_quantity(),
            total = %self.cart.total_price(),
            "checkout"
        );
        self.cart.clear();
        self.sync_cart(doc)?;
        self.close_cart(doc);
        Ok(Notice::OrderPlaced)
    }

    /// Show the panel now, scale the dialog in shortly after.
    pub fn open_cart(&mut self, doc: &mut impl Document) {
        self.timers.cancel(|step| *step == PanelStep::HidePanel);
        doc.set_class(ids::CART_MODAL, classes::HIDDEN, false);
        self.timers.schedule(PANEL_REVEAL_DELAY, PanelStep::RevealDialog);
    }

    /// Scale the dialog out now, hide the panel once the transition ends.
    pub fn close_cart(&mut self, doc: &mut impl Document) {
        self.timers.cancel(|step| *step == PanelStep::RevealDialog);
        doc.set_class(ids::CART_MODAL_DIALOG, classes::SCALE_IN, false);
        doc.set_class(ids::CART_MODAL_DIALOG, classes::SCALE_OUT, true);
        self.timers.schedule(PANEL_HIDE_DELAY, PanelStep::HidePanel);
    }

    /// Run the panel steps that fall due within `elapsed`.
    pub fn advance(&mut self, elapsed: Duration, doc: &mut impl Document) {
        for step in self.timers.advance(elapsed) {
            apply_panel_step(step, doc);
        }
    }

    /// Take every pending panel step with its remaining delay.
    pub fn drain_pending(&mut self) -> Vec<(Duration, PanelStep)> {
        self.timers.drain()
    }

    /// Rewrite the cart count, lines and total.
    ///
    /// # Errors
    ///
    /// Returns an error if the cart lines fail to render.
    pub fn sync_cart(&self, doc: &mut impl Document) -> Result<(), RenderError> {
        doc.set_inner_html(ids::CART_COUNT, self.cart.total_quantity().to_string());
        doc.set_inner_html(ids::CART_ITEMS, render_cart_lines(&self.cart)?);
        doc.set_inner_html(ids::CART_TOTAL, self.cart.total_price().to_string());
        Ok(())
    }

    fn render_grid(&self, grid: ProductGrid, doc: &mut impl Document) -> Result<(), RenderError> {
        doc.set_inner_html(grid.element_id(), render_grid(grid, &self.catalog)?);
        Ok(())
    }

    fn lookup(&self, product_id: &str) -> Option<&Arc<Product>> {
        ProductId::from_attr(product_id).and_then(|id| self.catalog.get(id))
    }
}

/// Apply the deferred half of a panel transition.
pub fn apply_panel_step(step: PanelStep, doc: &mut impl Document) {
    match step {
        PanelStep::RevealDialog => {
            doc.set_class(ids::CART_MODAL_DIALOG, classes::SCALE_OUT, false);
            doc.set_class(ids::CART_MODAL_DIALOG, classes::SCALE_IN, true);
        }
        PanelStep::HidePanel => {
            doc.set_class(ids::CART_MODAL, classes::HIDDEN, true);
        }
    }
}
