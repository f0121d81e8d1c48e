//! Section navigation.
//!
//! The page has a fixed set of content sections and exactly one of them is
//! active at a time. Navigating to an unknown section id leaves the current
//! section active.

use std::fmt;

use crate::render::ProductGrid;

/// A content section of the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Section {
    #[default]
    Home,
    NewArrivals,
    Buy,
    Rent,
    About,
    Contact,
}

impl Section {
    pub const ALL: [Self; 6] = [
        Self::Home,
        Self::NewArrivals,
        Self::Buy,
        Self::Rent,
        Self::About,
        Self::Contact,
    ];

    #[must_use]
    pub const fn element_id(self) -> &'static str {
        match self {
            Self::Home => "home-content",
            Self::NewArrivals => "new-arrivals-content",
            Self::Buy => "buy-content",
            Self::Rent => "rent-content",
            Self::About => "about-content",
            Self::Contact => "contact-content",
        }
    }

    /// Resolve a section from its element id.
    #[must_use]
    pub fn from_element_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.element_id() == id)
    }

    /// The grid re-rendered every time this section is activated.
    #[must_use]
    pub const fn listing(self) -> Option<ProductGrid> {
        match self {
            Self::Buy => Some(ProductGrid::Buy),
            Self::Rent => Some(ProductGrid::Rent),
            _ => None,
        }
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.element_id())
    }
}

/// A completed section switch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    pub from: Section,
    pub to: Section,
}

impl Transition {
    /// Grid to repopulate as part of this switch.
    #[must_use]
    pub const fn repopulate(&self) -> Option<ProductGrid> {
        self.to.listing()
    }
}

/// Tracks the active section.
#[derive(Debug, Clone, Default)]
pub struct SectionNavigator {
    active: Section,
}

impl SectionNavigator {
    /// Start with `initial` active.
    #[must_use]
    pub const fn new(initial: Section) -> Self {
        Self { active: initial }
    }

    #[must_use]
    pub const fn active(&self) -> Section {
        self.active
    }

    /// Activate the section with the given element id.
    ///
    /// Returns `None` without changing state if the id is unknown.
    /// Re-activating the active section still yields a transition so its
    /// listing is refreshed.
    pub fn activate(&mut self, section_id: &str) -> Option<Transition> {
        let to = Section::from_element_id(section_id)?;
        let from = std::mem::replace(&mut self.active, to);
        Some(Transition { from, to })
    }
}
