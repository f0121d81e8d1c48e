//! Product categories.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Department a product is listed under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Mens,
    Womens,
}

impl Category {
    /// All categories, in listing order.
    pub const ALL: [Self; 2] = [Self::Mens, Self::Womens];

    /// Lowercase slug used in element ids and serialized catalogs.
    #[must_use]
    pub const fn slug(self) -> &'static str {
        match self {
            Self::Mens => "mens",
            Self::Womens => "womens",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}
