//! Raw trip request as received from a caller.

use serde::Deserialize;

/// Interest tags, either comma-joined or as a list.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum Interests {
    List(Vec<String>),
    Joined(String),
}

impl Interests {
    /// Split, trim and lower-case; empty tags are dropped.
    pub fn tags(&self) -> Vec<String> {
        let raw: Vec<&str> = match self {
            Interests::List(items) => items.iter().flat_map(|s| s.split(',')).collect(),
            Interests::Joined(s) => s.split(',').collect(),
        };
        raw.into_iter()
            .map(|s| s.trim().to_lowercase())
            .filter(|s| !s.is_empty())
            .collect()
    }
}

/// An unvalidated planning request. Every field is optional here; required
/// fields are enforced by `collect_input`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct TripRequest {
    pub origin: Option<String>,
    pub destination: Option<String>,
    pub departure_date: Option<String>,
    pub return_date: Option<String>,
    pub budget: Option<String>,
    pub travelers: Option<i64>,
    pub interests: Option<Interests>,
    pub special_requests: Option<String>,
}

impl TripRequest {
    /// A request with just a destination and departure date.
    pub fn new(destination: &str, departure_date: &str) -> Self {
        Self {
            destination: Some(destination.to_string()),
            departure_date: Some(departure_date.to_string()),
            ..Self::default()
        }
    }

    pub fn origin(mut self, origin: &str) -> Self {
        self.origin = Some(origin.to_string());
        self
    }

    pub fn return_date(mut self, date: &str) -> Self {
        self.return_date = Some(date.to_string());
        self
    }

    pub fn budget(mut self, budget: &str) -> Self {
        self.budget = Some(budget.to_string());
        self
    }

    pub fn travelers(mut self, travelers: i64) -> Self {
        self.travelers = Some(travelers);
        self
    }

    pub fn interests(mut self, interests: &str) -> Self {
        self.interests = Some(Interests::Joined(interests.to_string()));
        self
    }
}
