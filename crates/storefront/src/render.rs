//! Display fragments for products and cart lines.
//!
//! Every function here is pure: the same input renders the same markup, and
//! callers always replace a container's whole content with the result.

use std::sync::Arc;

use askama::Template;
use bazaar_core::Category;

use crate::cart::{CartEntry, CartStore};
use crate::catalog::{Catalog, Product};

/// Error raised by template rendering.
pub type RenderError = askama::Error;

/// Product card with an "Add to Cart" affordance.
#[derive(Template)]
#[template(path = "partials/product_card.html")]
struct ProductCardTemplate<'a> {
    product: &'a Product,
}

/// Product card priced per day with a "Rent Now" affordance.
#[derive(Template)]
#[template(path = "partials/rent_card.html")]
struct RentCardTemplate<'a> {
    product: &'a Product,
}

/// One line of the cart panel.
#[derive(Template)]
#[template(path = "partials/cart_line.html")]
struct CartLineTemplate<'a> {
    entry: &'a CartEntry,
}

/// Render a product card.
///
/// # Errors
///
/// Returns an error if the template fails to render.
pub fn render_product_card(product: &Product) -> Result<String, RenderError> {
    ProductCardTemplate { product }.render()
}

/// Render a rent card.
///
/// # Errors
///
/// Returns an error if the template fails to render.
pub fn render_rent_card(product: &Product) -> Result<String, RenderError> {
    RentCardTemplate { product }.render()
}

/// Render a cart line.
///
/// # Errors
///
/// Returns an error if the template fails to render.
pub fn render_cart_line(entry: &CartEntry) -> Result<String, RenderError> {
    CartLineTemplate { entry }.render()
}

/// Render every cart entry, in cart order.
///
/// # Errors
///
/// Returns an error if any line fails to render.
pub fn render_cart_lines(cart: &CartStore) -> Result<String, RenderError> {
    cart.entries()
        .iter()
        .map(render_cart_line)
        .collect::<Result<String, _>>()
}

/// Which affordance a grid's cards carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardKind {
    Buy,
    Rent,
}

/// The product grids on the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProductGrid {
    NewArrivals,
    Mens,
    Womens,
    Buy,
    Rent,
}

impl ProductGrid {
    pub const ALL: [Self; 5] = [
        Self::NewArrivals,
        Self::Mens,
        Self::Womens,
        Self::Buy,
        Self::Rent,
    ];

    /// Id of the container the grid renders into.
    #[must_use]
    pub const fn element_id(self) -> &'static str {
        match self {
            Self::NewArrivals => "new-arrivals-products",
            Self::Mens => "mens-products",
            Self::Womens => "womens-products",
            Self::Buy => "buy-products",
            Self::Rent => "rent-products",
        }
    }

    #[must_use]
    pub const fn card_kind(self) -> CardKind {
        match self {
            Self::Rent => CardKind::Rent,
            _ => CardKind::Buy,
        }
    }

    /// Products shown in the grid, in catalog order.
    #[must_use]
    pub fn products(self, catalog: &Catalog) -> Vec<&Arc<Product>> {
        match self {
            Self::Mens => catalog.by_category(Category::Mens).collect(),
            Self::Womens => catalog.by_category(Category::Womens).collect(),
            Self::NewArrivals | Self::Buy | Self::Rent => catalog.all().iter().collect(),
        }
    }
}

/// Render a grid's cards.
///
/// # Errors
///
/// Returns an error if any card fails to render.
pub fn render_grid(grid: ProductGrid, catalog: &Catalog) -> Result<String, RenderError> {
    let card = match grid.card_kind() {
        CardKind::Buy => render_product_card,
        CardKind::Rent => render_rent_card,
    };

    grid.products(catalog)
        .into_iter()
        .map(|product| card(product))
        .collect::<Result<String, _>>()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use bazaar_core::ProductId;

    use super::*;

    fn product(catalog: &Catalog, id: i32) -> Arc<Product> {
        Arc::clone(catalog.get(ProductId::new(id)).unwrap())
    }

    #[test]
    fn test_product_card_contents() {
        let catalog = Catalog::default();
        let html = render_product_card(&product(&catalog, 1)).unwrap();

        assert!(html.contains("Red Floral Saree"));
        assert!(html.contains("BDT 2500"));
        assert!(html.contains(r#"data-product-id="1""#));
        assert!(html.contains("add-to-cart-btn"));
        assert!(html.contains(r#"src="/static/images/image_1759e4.jpg""#));
        assert!(!html.contains("/ day"));
    }

    #[test]
    fn test_rent_card_is_priced_per_day() {
        let catalog = Catalog::default();
        let html = render_rent_card(&product(&catalog, 6)).unwrap();

        assert!(html.contains("BDT 950 / day"));
        assert!(html.contains("rent-now-btn"));
        assert!(html.contains(r#"hx-post="/events/rent""#));
        assert!(!html.contains("add-to-cart-btn"));
    }

    #[test]
    fn test_cart_line_shows_quantity_and_subtotal() {
        let catalog = Catalog::default();
        let mut cart = CartStore::new(catalog.currency());
        cart.add(product(&catalog, 4));
        cart.add(product(&catalog, 4));

        let html = render_cart_line(&cart.entries()[0]).unwrap();
        assert!(html.contains("BDT 1800 x 2"));
        assert!(html.contains("BDT 3600"));
    }

    #[test]
    fn test_names_are_escaped() {
        let catalog = Catalog::new(vec![Product {
            id: ProductId::new(1),
            name: "<b>Bold</b> & Co".to_string(),
            price: bazaar_core::Price::new(10, bazaar_core::CurrencyCode::BDT),
            category: Category::Mens,
            image: "/x.jpg".to_string(),
        }])
        .unwrap();

        let html = render_product_card(&product(&catalog, 1)).unwrap();
        assert!(!html.contains("<b>Bold</b>"));
        assert!(html.contains("&lt;b&gt;Bold"));
    }

    #[test]
    fn test_rendering_is_idempotent() {
        let catalog = Catalog::default();
        for grid in ProductGrid::ALL {
            assert_eq!(
                render_grid(grid, &catalog).unwrap(),
                render_grid(grid, &catalog).unwrap()
            );
        }
    }

    #[test]
    fn test_grid_membership() {
        let catalog = Catalog::default();

        let mens = render_grid(ProductGrid::Mens, &catalog).unwrap();
        assert_eq!(mens.matches("add-to-cart-btn").count(), 3);
        assert!(mens.contains("Casual Jeans"));
        assert!(!mens.contains("Red Floral Saree"));

        let rent = render_grid(ProductGrid::Rent, &catalog).unwrap();
        assert_eq!(rent.matches("rent-now-btn").count(), catalog.len());

        let arrivals = render_grid(ProductGrid::NewArrivals, &catalog).unwrap();
        assert_eq!(arrivals.matches("add-to-cart-btn").count(), catalog.len());
    }

    #[test]
    fn test_empty_cart_renders_nothing() {
        let cart = CartStore::default();
        assert_eq!(render_cart_lines(&cart).unwrap(), "");
    }
}
