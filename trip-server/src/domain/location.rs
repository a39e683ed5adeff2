//! Location and terminal types.

use std::fmt;

use serde::Serialize;

use super::TransportMode;

/// A canonical location key.
///
/// Keys are trimmed, lower-cased and have internal whitespace collapsed to
/// single spaces. Alias resolution (e.g. `bengaluru` → `bangalore`) is the
/// job of the location registry; a `LocationKey` only guarantees the
/// textual form.
///
/// # Examples
///
/// ```
/// use trip_server::domain::LocationKey;
///
/// let key = LocationKey::new("  New   Delhi ");
/// assert_eq!(key.as_str(), "new delhi");
/// assert_eq!(LocationKey::new(key.as_str()), key);
/// ```
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LocationKey(String);

impl LocationKey {
    /// Build a key from arbitrary user text.
    pub fn new(raw: &str) -> Self {
        let canonical = raw
            .split_whitespace()
            .map(str::to_lowercase)
            .collect::<Vec<_>>()
            .join(" ");
        Self(canonical)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Human-readable form: each word capitalized.
    pub fn title(&self) -> String {
        title_case(&self.0)
    }
}

impl fmt::Debug for LocationKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "LocationKey({})", self.0)
    }
}

impl fmt::Display for LocationKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A mode-specific access point: an airport, a station or a road hub.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Terminal {
    /// Short code, e.g. `CBE` or `MAA`.
    pub code: String,
    /// Display name, e.g. `Coimbatore Junction`.
    pub name: String,
    /// Railway zone, state or country.
    pub region: String,
}

impl Terminal {
    pub fn new(code: impl Into<String>, name: impl Into<String>, region: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            name: name.into(),
            region: region.into(),
        }
    }

    /// Build a plausible terminal for a key the registry does not know.
    ///
    /// The code is the first three letters of the key upper-cased, the name
    /// is the title-cased key and the region is `Unknown`.
    pub fn synthesize(key: &LocationKey) -> Self {
        let code: String = key
            .as_str()
            .chars()
            .filter(|c| c.is_alphanumeric())
            .take(3)
            .collect::<String>()
            .to_uppercase();
        Self {
            code: if code.is_empty() { "UNK".to_string() } else { code },
            name: key.title(),
            region: "Unknown".to_string(),
        }
    }
}

/// A location resolved for one transport mode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Location {
    pub key: LocationKey,
    pub mode: TransportMode,
    pub terminal: Terminal,
    /// True when the terminal was invented because the key is unknown.
    pub synthesized: bool,
}

/// Why a location has no terminal for a mode, and what to do instead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Unserved {
    /// Nearest usable terminal, e.g. `Coimbatore (CJB)`.
    pub nearest: String,
    /// Rough onward time from that terminal, e.g. `~3 hrs by road`.
    pub detour: String,
    /// Traveler-facing advisory.
    pub note: String,
}

impl Unserved {
    pub fn new(nearest: impl Into<String>, detour: impl Into<String>, note: impl Into<String>) -> Self {
        Self {
            nearest: nearest.into(),
            detour: detour.into(),
            note: note.into(),
        }
    }

    /// Advisory text including the nearest terminal and detour time.
    pub fn advisory(&self) -> String {
        format!(
            "{} Nearest alternative: {} ({}).",
            self.note, self.nearest, self.detour
        )
    }
}

/// Capitalize the first letter of every space-separated word.
pub fn title_case(s: &str) -> String {
    s.split(' ')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
