//! # Domain Types
//!
//! Catalog types shared by the storefront pages, the search box and the cart.
//!
//! ## Type Overview
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Catalog Types                                   │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Product      │   │    Category     │   │   SortOrder     │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id (opaque)    │   │  Rings          │   │  Featured       │       │
//! │  │  name           │   │  Necklaces      │   │  PriceAsc       │       │
//! │  │  price          │   │  Earrings       │   │  PriceDesc      │       │
//! │  │  category       │   │  Bracelets      │   │  Newest         │       │
//! │  │  material       │   └─────────────────┘   │  Name           │       │
//! │  └─────────────────┘                         └─────────────────┘       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Products are a static, read-only dataset; nothing in the storefront
//! writes them.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use ts_rs::TS;

use crate::error::ValidationError;
use crate::money::Money;

// =============================================================================
// Category
// =============================================================================

/// Jewelry category a product is listed under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum Category {
    Rings,
    Necklaces,
    Earrings,
    Bracelets,
}

impl Category {
    /// Every category, in the order the category filter shows them.
    pub const ALL: [Category; 4] = [
        Category::Rings,
        Category::Necklaces,
        Category::Earrings,
        Category::Bracelets,
    ];

    /// Display name, as printed on product cards.
    pub const fn name(&self) -> &'static str {
        match self {
            Category::Rings => "Rings",
            Category::Necklaces => "Necklaces",
            Category::Earrings => "Earrings",
            Category::Bracelets => "Bracelets",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Category {
    type Err = ValidationError;

    /// Case-insensitive, so `/rings` and the "Rings" filter chip agree.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Category::ALL
            .into_iter()
            .find(|c| c.name().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| ValidationError::NotAllowed {
                field: "category".to_string(),
                allowed: Category::ALL.iter().map(|c| c.name().to_string()).collect(),
            })
    }
}

// =============================================================================
// Product
// =============================================================================

/// A product available in the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Catalog identifier ("1", "2", ...).
    pub id: String,

    /// Display name shown on cards, in search results and in the cart.
    pub name: String,

    /// Current selling price.
    pub price: Money,

    /// Price before markdown, if the product is on sale.
    pub original_price: Option<Money>,

    /// Image path relative to the storefront's public assets.
    pub image: String,

    pub category: Category,

    pub description: String,

    /// Bullet points on the product detail view.
    pub details: Vec<String>,

    /// Metals and stones, e.g. "18K White Gold, Diamond".
    pub material: String,

    /// Average review score, 0.0 - 5.0. Display only.
    pub rating: f32,

    /// Number of reviews.
    pub reviews: u32,

    pub is_new: bool,

    pub is_bestseller: bool,
}

impl Product {
    /// Percentage off the original price, for the "17% OFF" badge.
    ///
    /// `None` when the product is not marked down.
    pub fn discount_percent(&self) -> Option<i64> {
        self.original_price
            .and_then(|original| self.price.percent_below(original))
    }

    /// Case-insensitive substring match across name, category and material.
    ///
    /// `needle` must already be lowercase.
    pub fn matches_query(&self, needle: &str) -> bool {
        self.name.to_lowercase().contains(needle)
            || self.category.name().to_lowercase().contains(needle)
            || self.material.to_lowercase().contains(needle)
    }
}

// =============================================================================
// Sort Order
// =============================================================================

/// Ordering options of the product grid's sort dropdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "kebab-case")]
pub enum SortOrder {
    /// Catalog order, as curated.
    #[default]
    Featured,
    /// Cheapest first.
    PriceAsc,
    /// Most expensive first.
    PriceDesc,
    /// New arrivals first, otherwise catalog order.
    Newest,
    /// Alphabetical by product name.
    Name,
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortOrder::Featured => write!(f, "featured"),
            SortOrder::PriceAsc => write!(f, "price-asc"),
            SortOrder::PriceDesc => write!(f, "price-desc"),
            SortOrder::Newest => write!(f, "newest"),
            SortOrder::Name => write!(f, "name"),
        }
    }
}

impl FromStr for SortOrder {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "featured" => Ok(SortOrder::Featured),
            "price-asc" | "price-low" => Ok(SortOrder::PriceAsc),
            "price-desc" | "price-high" => Ok(SortOrder::PriceDesc),
            "newest" => Ok(SortOrder::Newest),
            "name" => Ok(SortOrder::Name),
            _ => Err(ValidationError::NotAllowed {
                field: "sort".to_string(),
                allowed: ["featured", "price-asc", "price-desc", "newest", "name"]
                    .iter()
                    .map(|s| s.to_string())
                    .collect(),
            }),
        }
    }
}

// =============================================================================
// Category Count
// =============================================================================

/// One chip of the category filter bar: "Rings (2)".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CategoryCount {
    /// "All" or a category name.
    pub name: String,
    pub count: usize,
}

// =============================================================================
// Unit Tests
// =============================================================================
