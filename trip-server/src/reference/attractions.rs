//! Attractions, day themes and dining styles for itineraries.

use std::collections::HashMap;

use crate::domain::{BudgetTier, LocationKey};

/// How a dining style relates to budget.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiningKind {
    StreetFood,
    FineDining,
    Casual,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiningStyle {
    pub label: String,
    pub kind: DiningKind,
}

impl DiningStyle {
    /// Budget travelers skip fine dining; luxury travelers skip street food.
    pub fn suits(&self, tier: BudgetTier) -> bool {
        !matches!(
            (tier, self.kind),
            (BudgetTier::Budget, DiningKind::FineDining) | (BudgetTier::Luxury, DiningKind::StreetFood)
        )
    }
}

/// Attraction pools keyed by destination, with a default pool.
#[derive(Debug, Clone, Default)]
pub struct Attractions {
    pools: HashMap<String, Vec<String>>,
    default_pool: Vec<String>,
    themes: Vec<String>,
    dining: Vec<DiningStyle>,
}

impl Attractions {
    /// The destination's pool, or the default pool if it has none.
    pub fn pool_for(&self, destination: &LocationKey) -> &[String] {
        self.pools
            .get(destination.as_str())
            .map(Vec::as_slice)
            .unwrap_or(&self.default_pool)
    }

    /// Returns true if the destination has its own pool.
    pub fn has_pool(&self, destination: &LocationKey) -> bool {
        self.pools.contains_key(destination.as_str())
    }

    pub fn default_pool(&self) -> &[String] {
        &self.default_pool
    }

    pub fn themes(&self) -> &[String] {
        &self.themes
    }

    /// Dining styles suitable for a tier.
    pub fn dining_for(&self, tier: BudgetTier) -> Vec<&DiningStyle> {
        self.dining.iter().filter(|d| d.suits(tier)).collect()
    }
}

/// Builder for [`Attractions`].
#[derive(Debug, Default)]
pub struct AttractionsBuilder {
    inner: Attractions,
}

impl AttractionsBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pool(mut self, destination: &str, attractions: &[&str]) -> Self {
        self.inner.pools.insert(
            LocationKey::new(destination).as_str().to_string(),
            attractions.iter().map(|s| s.to_string()).collect(),
        );
        self
    }

    pub fn default_pool(mut self, attractions: &[&str]) -> Self {
        self.inner.default_pool = attractions.iter().map(|s| s.to_string()).collect();
        self
    }

    pub fn themes(mut self, themes: &[&str]) -> Self {
        self.inner.themes = themes.iter().map(|s| s.to_string()).collect();
        self
    }

    pub fn dining(mut self, label: &str, kind: DiningKind) -> Self {
        self.inner.dining.push(DiningStyle {
            label: label.to_string(),
            kind,
        });
        self
    }

    pub fn build(self) -> Attractions {
        self.inner
    }
}

/// Built-in attraction pools.
pub fn builtin_attractions() -> Attractions {
    AttractionsBuilder::new()
        .pool(
            "paris",
            &[
                "Eiffel Tower",
                "Louvre Museum",
                "Notre-Dame Cathedral",
                "Champs-Elysees",
                "Montmartre & Sacre-Coeur",
                "Seine River Cruise",
                "Musee d'Orsay",
                "Palace of Versailles",
                "Luxembourg Gardens",
            ],
        )
        .pool(
            "london",
            &[
                "Tower of London",
                "British Museum",
                "Buckingham Palace",
                "London Eye",
                "Westminster Abbey",
                "Camden Market",
                "Hyde Park",
                "Borough Market",
                "Thames River Walk",
            ],
        )
        .pool(
            "tokyo",
            &[
                "Senso-ji Temple",
                "Shibuya Crossing",
                "Meiji Shrine",
                "Tsukiji Outer Market",
                "Akihabara",
                "Shinjuku Gyoen",
                "Tokyo Skytree",
                "Harajuku",
                "Ueno Park",
            ],
        )
        .pool(
            "new york",
            &[
                "Statue of Liberty",
                "Central Park",
                "Times Square",
                "Metropolitan Museum of Art",
                "Brooklyn Bridge",
                "Broadway Show",
                "Empire State Building",
                "High Line",
                "Grand Central Terminal",
            ],
        )
        .pool(
            "delhi",
            &[
                "Red Fort",
                "Qutub Minar",
                "Humayun's Tomb",
                "India Gate",
                "Chandni Chowk",
                "Lotus Temple",
                "Akshardham",
                "Lodhi Garden",
                "Jama Masjid",
            ],
        )
        .pool(
            "mumbai",
            &[
                "Gateway of India",
                "Marine Drive",
                "Elephanta Caves",
                "Chhatrapati Shivaji Terminus",
                "Colaba Causeway",
                "Haji Ali Dargah",
            ],
        )
        .pool(
            "ooty",
            &[
                "Government Botanical Garden",
                "Ooty Lake Boating",
                "Doddabetta Peak",
                "Tea Museum & Factory",
                "Rose Garden",
                "Pykara Falls",
            ],
        )
        .pool(
            "chennai",
            &[
                "Marina Beach",
                "Kapaleeshwarar Temple",
                "Fort St. George",
                "Government Museum",
                "San Thome Basilica",
                "Mahabalipuram Shore Temple",
            ],
        )
        .pool(
            "jaipur",
            &[
                "Amber Fort",
                "Hawa Mahal",
                "City Palace",
                "Jantar Mantar",
                "Nahargarh Fort",
                "Johari Bazaar",
            ],
        )
        .pool(
            "goa",
            &[
                "Baga Beach",
                "Basilica of Bom Jesus",
                "Fort Aguada",
                "Anjuna Flea Market",
                "Dudhsagar Falls",
                "Fontainhas Latin Quarter",
            ],
        )
        .default_pool(&[
            "City Center Walking Tour",
            "Local Food Market Visit",
            "Historical District Exploration",
            "Museum & Art Gallery Day",
            "Nature Park or Botanical Garden",
            "Local Cuisine Cooking Class",
            "Sunset Viewpoint Experience",
            "Cultural Heritage Site",
        ])
        .themes(&["Discovery", "Adventure", "Culture", "Exploration", "Leisure"])
        .dining("Local Street Food", DiningKind::StreetFood)
        .dining("Fine Dining", DiningKind::FineDining)
        .dining("Traditional Cuisine", DiningKind::Casual)
        .dining("Waterfront Restaurant", DiningKind::Casual)
        .dining("Rooftop Bar & Grill", DiningKind::Casual)
        .dining("Cafe & Bakery", DiningKind::Casual)
        .dining("Farm-to-Table Bistro", DiningKind::Casual)
        .dining("Night Market Stalls", DiningKind::StreetFood)
        .build()
}
