//! Budget tier type.

use std::fmt;

use serde::{Deserialize, Serialize};

/// The traveler's spending tier.
///
/// Drives the price range of every synthesized offer and, for some modes,
/// which operators or service classes are eligible.
///
/// Parsing is lenient: anything that is not one of the three labels
/// (case-insensitive, surrounding whitespace ignored) becomes `Moderate`.
///
/// # Examples
///
/// ```
/// use trip_server::domain::BudgetTier;
///
/// assert_eq!(BudgetTier::parse_lenient("LUXURY"), BudgetTier::Luxury);
/// assert_eq!(BudgetTier::parse_lenient(" budget "), BudgetTier::Budget);
/// assert_eq!(BudgetTier::parse_lenient("premium"), BudgetTier::Moderate);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BudgetTier {
    Budget,
    #[default]
    Moderate,
    Luxury,
}

impl BudgetTier {
    /// All tiers, cheapest first.
    pub const ALL: [BudgetTier; 3] = [BudgetTier::Budget, BudgetTier::Moderate, BudgetTier::Luxury];

    /// Parse a tier label, falling back to `Moderate`.
    pub fn parse_lenient(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "budget" => Self::Budget,
            "luxury" => Self::Luxury,
            _ => Self::Moderate,
        }
    }

    /// Returns the lower-case wire label.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Budget => "budget",
            Self::Moderate => "moderate",
            Self::Luxury => "luxury",
        }
    }

    /// Returns the title-cased label used in summaries.
    pub fn title(self) -> &'static str {
        match self {
            Self::Budget => "Budget",
            Self::Moderate => "Moderate",
            Self::Luxury => "Luxury",
        }
    }
}

impl fmt::Display for BudgetTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
