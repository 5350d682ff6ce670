//! # Catalog
//!
//! The read-only product catalog and the queries the storefront pages run
//! against it.
//!
//! ## Query Surface
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Page / widget          Catalog call                                   │
//! │  ─────────────          ────────────                                   │
//! │  Home product grid ───► by_category(filter) + sorted(order)            │
//! │  Filter chips ────────► category_counts()                              │
//! │  /rings listing ──────► by_category(Some(Rings))                       │
//! │  /new-arrivals ───────► new_arrivals(6)                                │
//! │  Search modal ────────► search(query), suggested_searches()            │
//! │  Add to cart ─────────► get(id)                                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The dataset is small and fixed, so every query is a linear scan; there
//! is no index.

use crate::error::CoreResult;
use crate::money::Money;
use crate::types::{Category, CategoryCount, Product, SortOrder};
use crate::validation::validate_search_query;

/// Search terms offered before the user types anything.
const SUGGESTED_SEARCHES: [&str; 4] = [
    "Diamond Ring",
    "Gold Necklace",
    "Pearl Earrings",
    "Tennis Bracelet",
];

/// An ordered, read-only collection of products.
#[derive(Debug, Clone)]
pub struct Catalog {
    products: Vec<Product>,
}

impl Catalog {
    /// Creates a catalog over the given products, keeping their order.
    pub fn new(products: Vec<Product>) -> Self {
        Catalog { products }
    }

    /// The Lumière collection as shipped with the storefront.
    pub fn builtin() -> Self {
        Catalog::new(builtin_products())
    }

    /// Every product in catalog order.
    pub fn all(&self) -> &[Product] {
        &self.products
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Looks a product up by id.
    pub fn get(&self, id: &str) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }

    /// Products in `category`, or every product when `None` ("All").
    pub fn by_category(&self, category: Option<Category>) -> Vec<&Product> {
        self.products
            .iter()
            .filter(|p| category.map_or(true, |c| p.category == c))
            .collect()
    }

    /// Case-insensitive substring search across name, category and material.
    ///
    /// ## Behavior
    /// - Surrounding whitespace is ignored, so "ring " and " ring" match like
    ///   "ring". The web search modal matches the untrimmed text; typing a
    ///   trailing space there can drop every result, here it does not.
    /// - Blank query: no results (the modal shows suggestions instead)
    /// - "ring" matches "Eternal Diamond Ring" by name and every product in
    ///   "Rings" by category
    /// - Results keep catalog order
    ///
    /// ## Errors
    /// `ValidationError::TooLong` for queries over 100 characters.
    pub fn search(&self, query: &str) -> CoreResult<Vec<&Product>> {
        let query = validate_search_query(query)?;
        if query.is_empty() {
            return Ok(Vec::new());
        }

        let needle = query.to_lowercase();
        Ok(self
            .products
            .iter()
            .filter(|p| p.matches_query(&needle))
            .collect())
    }

    /// The first `limit` products, as featured on the new-arrivals page.
    pub fn new_arrivals(&self, limit: usize) -> Vec<&Product> {
        self.products.iter().take(limit).collect()
    }

    /// Filter-chip counts: "All" first, then each category in fixed order.
    pub fn category_counts(&self) -> Vec<CategoryCount> {
        let mut counts = vec![CategoryCount {
            name: "All".to_string(),
            count: self.products.len(),
        }];
        counts.extend(Category::ALL.iter().map(|category| CategoryCount {
            name: category.name().to_string(),
            count: self
                .products
                .iter()
                .filter(|p| p.category == *category)
                .count(),
        }));
        counts
    }

    /// Search terms offered before the user types anything.
    pub fn suggested_searches(&self) -> &'static [&'static str] {
        &SUGGESTED_SEARCHES
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Catalog::builtin()
    }
}

/// Orders a product listing. Sorting is stable, so ties keep catalog order.
pub fn sorted(mut products: Vec<&Product>, order: SortOrder) -> Vec<&Product> {
    match order {
        SortOrder::Featured => {}
        SortOrder::PriceAsc => products.sort_by(|a, b| a.price.cmp(&b.price)),
        SortOrder::PriceDesc => products.sort_by(|a, b| b.price.cmp(&a.price)),
        SortOrder::Newest => products.sort_by(|a, b| b.is_new.cmp(&a.is_new)),
        SortOrder::Name => {
            products.sort_by(|a, b| a.name.to_lowercase().cmp(&b.name.to_lowercase()))
        }
    }
    products
}

// =============================================================================
// Builtin Dataset
// =============================================================================

fn details(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn builtin_products() -> Vec<Product> {
    vec![
        Product {
            id: "1".into(),
            name: "Eternal Diamond Ring".into(),
            price: Money::from_major(4999),
            original_price: Some(Money::from_major(5999)),
            image: "/elegant-diamond-engagement-ring-on-velvet.jpg".into(),
            category: Category::Rings,
            description: "A stunning solitaire diamond ring featuring a brilliant-cut 1.5 carat diamond set in 18K white gold.".into(),
            details: details(&[
                "1.5 carat brilliant-cut diamond",
                "18K white gold band",
                "GIA certified",
                "Lifetime warranty",
            ]),
            material: "18K White Gold, Diamond".into(),
            rating: 4.9,
            reviews: 128,
            is_new: false,
            is_bestseller: true,
        },
        Product {
            id: "2".into(),
            name: "Golden Serpent Necklace".into(),
            price: Money::from_major(2499),
            original_price: None,
            image: "/luxury-gold-snake-chain-necklace-elegant.jpg".into(),
            category: Category::Necklaces,
            description: "An exquisite serpent-inspired necklace crafted from solid 22K gold with emerald eyes.".into(),
            details: details(&[
                "22K solid gold",
                "Natural emerald accents",
                "Adjustable length",
                "Handcrafted",
            ]),
            material: "22K Gold, Emerald".into(),
            rating: 4.8,
            reviews: 86,
            is_new: true,
            is_bestseller: false,
        },
        Product {
            id: "3".into(),
            name: "Pearl Cascade Earrings".into(),
            price: Money::from_major(1299),
            original_price: None,
            image: "/elegant-pearl-drop-earrings-luxury.jpg".into(),
            category: Category::Earrings,
            description: "Delicate cascade earrings featuring freshwater pearls and 14K gold accents.".into(),
            details: details(&[
                "Freshwater pearls",
                "14K gold settings",
                "Butterfly back closure",
                "Hypoallergenic",
            ]),
            material: "14K Gold, Pearl".into(),
            rating: 4.7,
            reviews: 64,
            is_new: false,
            is_bestseller: false,
        },
        Product {
            id: "4".into(),
            name: "Emerald Garden Bracelet".into(),
            price: Money::from_major(3299),
            original_price: Some(Money::from_major(3999)),
            image: "/emerald-and-gold-bracelet-luxury-jewelry.jpg".into(),
            category: Category::Bracelets,
            description: "A magnificent bracelet featuring Colombian emeralds set in an intricate 18K gold design.".into(),
            details: details(&[
                "Colombian emeralds",
                "18K yellow gold",
                "Box clasp with safety",
                "Certificate of authenticity",
            ]),
            material: "18K Gold, Emerald".into(),
            rating: 4.9,
            reviews: 42,
            is_new: false,
            is_bestseller: true,
        },
        Product {
            id: "5".into(),
            name: "Sapphire Dreams Ring".into(),
            price: Money::from_major(5499),
            original_price: None,
            image: "/blue-sapphire-ring-with-diamonds-luxury.jpg".into(),
            category: Category::Rings,
            description: "A breathtaking blue sapphire surrounded by a halo of brilliant diamonds.".into(),
            details: details(&[
                "3 carat Ceylon sapphire",
                "Diamond halo setting",
                "Platinum band",
                "Custom sizing available",
            ]),
            material: "Platinum, Sapphire, Diamond".into(),
            rating: 5.0,
            reviews: 31,
            is_new: true,
            is_bestseller: false,
        },
        Product {
            id: "6".into(),
            name: "Rose Gold Chain".into(),
            price: Money::from_major(899),
            original_price: None,
            image: "/delicate-rose-gold-chain-necklace-minimal.jpg".into(),
            category: Category::Necklaces,
            description: "A delicate rose gold chain perfect for layering or wearing alone.".into(),
            details: details(&[
                "14K rose gold",
                "18 inch length",
                "Lobster clasp",
                "Gift box included",
            ]),
            material: "14K Rose Gold".into(),
            rating: 4.6,
            reviews: 203,
            is_new: false,
            is_bestseller: false,
        },
        Product {
            id: "7".into(),
            name: "Diamond Tennis Bracelet".into(),
            price: Money::from_major(7999),
            original_price: Some(Money::from_major(9499)),
            image: "/diamond-tennis-bracelet-luxury-sparkling.jpg".into(),
            category: Category::Bracelets,
            description: "Classic elegance with 5 carats of round brilliant diamonds in a secure prong setting.".into(),
            details: details(&[
                "5 carats total weight",
                "Round brilliant diamonds",
                "14K white gold",
                "Hidden safety clasp",
            ]),
            material: "14K White Gold, Diamond".into(),
            rating: 4.9,
            reviews: 89,
            is_new: false,
            is_bestseller: true,
        },
        Product {
            id: "8".into(),
            name: "Vintage Ruby Pendant".into(),
            price: Money::from_major(2899),
            original_price: None,
            image: "/vintage-ruby-pendant-necklace-gold-antique.jpg".into(),
            category: Category::Necklaces,
            description: "A vintage-inspired pendant featuring a natural ruby with intricate gold filigree.".into(),
            details: details(&[
                "Natural Burmese ruby",
                "Vintage filigree design",
                "18K gold chain included",
                "One of a kind",
            ]),
            material: "18K Gold, Ruby".into(),
            rating: 4.8,
            reviews: 27,
            is_new: true,
            is_bestseller: false,
        },
    ]
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{CoreError, ValidationError};

    fn ids(products: &[&Product]) -> Vec<String> {
        products.iter().map(|p| p.id.clone()).collect()
    }

    #[test]
    fn test_builtin_catalog() {
        let catalog = Catalog::builtin();
        assert_eq!(catalog.len(), 8);
        assert_eq!(catalog.get("1").map(|p| p.name.as_str()), Some("Eternal Diamond Ring"));
        assert!(catalog.get("99").is_none());
    }

    #[test]
    fn test_search_matches_category_name() {
        let catalog = Catalog::builtin();
        let results = catalog.search("ring").unwrap();
        assert!(results.iter().any(|p| p.name == "Eternal Diamond Ring"));

        // Category-only match: a ring whose name lacks the word still shows up
        let mut renamed = catalog.all().to_vec();
        renamed[0].name = "Eternal Solitaire".into();
        let catalog = Catalog::new(renamed);
        let results = catalog.search("ring").unwrap();
        assert!(results.iter().any(|p| p.id == "1"));
    }

    #[test]
    fn test_search_is_case_insensitive_across_fields() {
        let catalog = Catalog::builtin();

        // material match
        assert_eq!(ids(&catalog.search("RUBY").unwrap()), vec!["8"]);

        // "ring" hits both rings and earrings (substring of "Earrings")
        assert_eq!(ids(&catalog.search("ring").unwrap()), vec!["1", "3", "5"]);

        assert_eq!(ids(&catalog.search("platinum").unwrap()), vec!["5"]);
    }

    #[test]
    fn test_search_ignores_surrounding_whitespace() {
        let catalog = Catalog::builtin();
        let plain = ids(&catalog.search("ruby").unwrap());
        assert_eq!(ids(&catalog.search("ruby ").unwrap()), plain);
        assert_eq!(ids(&catalog.search("\truby").unwrap()), plain);

        // Inner whitespace is part of the needle
        assert!(catalog.search("eternal diamond").unwrap().iter().any(|p| p.id == "1"));
        assert!(catalog.search("eternal  diamond").unwrap().is_empty());
    }

    #[test]
    fn test_search_blank_and_oversized() {
        let catalog = Catalog::builtin();
        assert!(catalog.search("").unwrap().is_empty());
        assert!(catalog.search("   ").unwrap().is_empty());
        assert!(catalog.search("opal").unwrap().is_empty());
        assert!(matches!(
            catalog.search(&"x".repeat(101)),
            Err(CoreError::Validation(ValidationError::TooLong { .. }))
        ));
    }

    #[test]
    fn test_by_category() {
        let catalog = Catalog::builtin();
        assert_eq!(ids(&catalog.by_category(Some(Category::Rings))), vec!["1", "5"]);
        assert_eq!(
            ids(&catalog.by_category(Some(Category::Necklaces))),
            vec!["2", "6", "8"]
        );
        assert_eq!(catalog.by_category(None).len(), 8);
    }

    #[test]
    fn test_sorted() {
        let catalog = Catalog::builtin();
        let all = catalog.by_category(None);

        let cheap_first = sorted(all.clone(), SortOrder::PriceAsc);
        assert_eq!(cheap_first.first().map(|p| p.id.as_str()), Some("6"));
        assert_eq!(cheap_first.last().map(|p| p.id.as_str()), Some("7"));

        let dear_first = sorted(all.clone(), SortOrder::PriceDesc);
        assert_eq!(dear_first.first().map(|p| p.id.as_str()), Some("7"));

        // new items first, ties in catalog order
        let newest = sorted(all.clone(), SortOrder::Newest);
        assert_eq!(ids(&newest[..3]), vec!["2", "5", "8"]);
        assert_eq!(ids(&newest[3..]), vec!["1", "3", "4", "6", "7"]);

        let by_name = sorted(all.clone(), SortOrder::Name);
        assert_eq!(by_name.first().map(|p| p.name.as_str()), Some("Diamond Tennis Bracelet"));

        assert_eq!(ids(&sorted(all.clone(), SortOrder::Featured)), ids(&all));
    }

    #[test]
    fn test_new_arrivals_and_counts() {
        let catalog = Catalog::builtin();
        assert_eq!(ids(&catalog.new_arrivals(6)), vec!["1", "2", "3", "4", "5", "6"]);
        assert_eq!(catalog.new_arrivals(50).len(), 8);

        let counts: Vec<(String, usize)> = catalog
            .category_counts()
            .into_iter()
            .map(|c| (c.name, c.count))
            .collect();
        assert_eq!(
            counts,
            vec![
                ("All".to_string(), 8),
                ("Rings".to_string(), 2),
                ("Necklaces".to_string(), 3),
                ("Earrings".to_string(), 1),
                ("Bracelets".to_string(), 2),
            ]
        );
    }

    #[test]
    fn test_discount_badges() {
        let catalog = Catalog::builtin();
        let discount = |id: &str| catalog.get(id).and_then(Product::discount_percent);
        assert_eq!(discount("1"), Some(17));
        assert_eq!(discount("4"), Some(18));
        assert_eq!(discount("7"), Some(16));
        assert_eq!(discount("2"), None);
    }
}
