//! Location registry: name normalization and per-mode terminal lookup.

use std::collections::HashMap;

use crate::domain::{Location, LocationKey, Terminal, TransportMode, Unserved};

/// Canonical place names with their airports, stations and road hubs.
///
/// Lookups never fail: an unknown key resolves to a synthesized terminal.
/// Keys known to have no terminal for a mode are held in a separate
/// unserved table so callers can tell "unknown" from "known to be missing".
#[derive(Debug, Clone, Default)]
pub struct LocationRegistry {
    aliases: HashMap<String, String>,
    names: HashMap<String, String>,
    terminals: HashMap<(TransportMode, String), Terminal>,
    unserved: HashMap<(TransportMode, String), Unserved>,
}

impl LocationRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Canonicalize free text and rewrite known aliases.
    ///
    /// # Examples
    ///
    /// ```
    /// use trip_server::reference::builtin_locations;
    ///
    /// let registry = builtin_locations();
    /// assert_eq!(registry.normalize(" Bengaluru ").as_str(), "bangalore");
    /// assert_eq!(registry.normalize("Madras").as_str(), "chennai");
    /// ```
    pub fn normalize(&self, raw: &str) -> LocationKey {
        let key = LocationKey::new(raw);
        match self.aliases.get(key.as_str()) {
            Some(target) => LocationKey::new(target),
            None => key,
        }
    }

    /// Resolve a key to its terminal for `mode`, synthesizing one on a miss.
    pub fn resolve(&self, key: &LocationKey, mode: TransportMode) -> Location {
        match self.terminals.get(&(mode, key.as_str().to_string())) {
            Some(terminal) => Location {
                key: key.clone(),
                mode,
                terminal: terminal.clone(),
                synthesized: false,
            },
            None => Location {
                key: key.clone(),
                mode,
                terminal: Terminal::synthesize(key),
                synthesized: true,
            },
        }
    }

    /// Returns why `key` has no terminal for `mode`, if it is known to lack one.
    pub fn unserved(&self, key: &LocationKey, mode: TransportMode) -> Option<&Unserved> {
        self.unserved.get(&(mode, key.as_str().to_string()))
    }

    /// Human-readable place name.
    pub fn display_name(&self, key: &LocationKey) -> String {
        self.names
            .get(key.as_str())
            .cloned()
            .unwrap_or_else(|| key.title())
    }

    /// Returns true if `raw` is an alias source.
    pub fn is_alias(&self, raw: &str) -> bool {
        self.aliases.contains_key(LocationKey::new(raw).as_str())
    }

    /// Iterate over (source, target) alias pairs.
    pub fn aliases(&self) -> impl Iterator<Item = (&str, &str)> {
        self.aliases.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Number of registered terminals across all modes.
    pub fn terminal_count(&self) -> usize {
        self.terminals.len()
    }
}

/// Builder for a [`LocationRegistry`].
#[derive(Debug, Default)]
pub struct LocationRegistryBuilder {
    inner: LocationRegistry,
}

impl LocationRegistryBuilder {
    /// Create a new builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Rewrite `from` to `to` during normalization.
    ///
    /// Aliases whose target is itself an alias source are dropped, as are
    /// aliases whose source is already a target.
    pub fn alias(mut self, from: &str, to: &str) -> Self {
        let from = LocationKey::new(from);
        let to = LocationKey::new(to);
        let target_is_source = self.inner.aliases.contains_key(to.as_str());
        let source_is_target = self.inner.aliases.values().any(|v| v == from.as_str());
        if !from.is_empty() && from != to && !target_is_source && !source_is_target {
            self.inner
                .aliases
                .insert(from.as_str().to_string(), to.as_str().to_string());
        }
        self
    }

    /// Set the display name for a key.
    pub fn name(mut self, key: &str, display: &str) -> Self {
        self.inner
            .names
            .insert(LocationKey::new(key).as_str().to_string(), display.to_string());
        self
    }

    /// Register a terminal for a key and mode.
    pub fn terminal(
        mut self,
        mode: TransportMode,
        key: &str,
        code: &str,
        name: &str,
        region: &str,
    ) -> Self {
        self.inner.terminals.insert(
            (mode, LocationKey::new(key).as_str().to_string()),
            Terminal::new(code, name, region),
        );
        self
    }

    /// Mark a key as having no terminal for a mode.
    pub fn unserved(
        mut self,
        mode: TransportMode,
        key: &str,
        nearest: &str,
        detour: &str,
        note: &str,
    ) -> Self {
        self.inner.unserved.insert(
            (mode, LocationKey::new(key).as_str().to_string()),
            Unserved::new(nearest, detour, note),
        );
        self
    }

    /// Build the registry.
    pub fn build(self) -> LocationRegistry {
        self.inner
    }
}

/// The built-in registry: Indian cities and hill towns plus a handful of
/// international destinations.
pub fn builtin_locations() -> LocationRegistry {
    use TransportMode::{Air, Rail, Road};

    let b = LocationRegistryBuilder::new()
        .alias("bengaluru", "bangalore")
        .alias("mysuru", "mysore")
        .alias("vizag", "visakhapatnam")
        .alias("cochin", "kochi")
        .alias("ernakulam", "kochi")
        .alias("trivandrum", "thiruvananthapuram")
        .alias("new delhi", "delhi")
        .alias("tiruchirappalli", "trichy")
        .alias("puducherry", "pondicherry")
        .alias("udhagamandalam", "ooty")
        .alias("ootacamund", "ooty")
        .alias("udagamandalam", "ooty")
        .alias("alappuzha", "alleppey")
        .alias("calicut", "kozhikode")
        .alias("bombay", "mumbai")
        .alias("madras", "chennai")
        .alias("calcutta", "kolkata")
        .alias("nyc", "new york")
        .alias("new york city", "new york");

    let b = b
        .name("bangalore", "Bengaluru")
        .name("mysore", "Mysuru")
        .name("trichy", "Tiruchirappalli")
        .name("ooty", "Ooty (Udhagamandalam)")
        .name("alleppey", "Alappuzha")
        .name("pondicherry", "Puducherry")
        .name("new york", "New York");

    // Airports
    let b = b
        .terminal(Air, "delhi", "DEL", "Indira Gandhi International", "Delhi")
        .terminal(Air, "mumbai", "BOM", "Chhatrapati Shivaji Maharaj International", "Maharashtra")
        .terminal(Air, "chennai", "MAA", "Chennai International", "Tamil Nadu")
        .terminal(Air, "kolkata", "CCU", "Netaji Subhas Chandra Bose International", "West Bengal")
        .terminal(Air, "bangalore", "BLR", "Kempegowda International", "Karnataka")
        .terminal(Air, "hyderabad", "HYD", "Rajiv Gandhi International", "Telangana")
        .terminal(Air, "coimbatore", "CJB", "Coimbatore International", "Tamil Nadu")
        .terminal(Air, "madurai", "IXM", "Madurai Airport", "Tamil Nadu")
        .terminal(Air, "trichy", "TRZ", "Tiruchirappalli International", "Tamil Nadu")
        .terminal(Air, "kochi", "COK", "Cochin International", "Kerala")
        .terminal(Air, "thiruvananthapuram", "TRV", "Trivandrum International", "Kerala")
        .terminal(Air, "kozhikode", "CCJ", "Calicut International", "Kerala")
        .terminal(Air, "mysore", "MYQ", "Mysuru Airport", "Karnataka")
        .terminal(Air, "goa", "GOI", "Dabolim Airport", "Goa")
        .terminal(Air, "pune", "PNQ", "Pune Airport", "Maharashtra")
        .terminal(Air, "ahmedabad", "AMD", "Sardar Vallabhbhai Patel International", "Gujarat")
        .terminal(Air, "jaipur", "JAI", "Jaipur International", "Rajasthan")
        .terminal(Air, "udaipur", "UDR", "Maharana Pratap Airport", "Rajasthan")
        .terminal(Air, "jodhpur", "JDH", "Jodhpur Airport", "Rajasthan")
        .terminal(Air, "agra", "AGR", "Agra Airport", "Uttar Pradesh")
        .terminal(Air, "lucknow", "LKO", "Chaudhary Charan Singh International", "Uttar Pradesh")
        .terminal(Air, "varanasi", "VNS", "Lal Bahadur Shastri International", "Uttar Pradesh")
        .terminal(Air, "amritsar", "ATQ", "Sri Guru Ram Dass Jee International", "Punjab")
        .terminal(Air, "chandigarh", "IXC", "Chandigarh International", "Punjab")
        .terminal(Air, "dehradun", "DED", "Jolly Grant Airport", "Uttarakhand")
        .terminal(Air, "visakhapatnam", "VTZ", "Visakhapatnam Airport", "Andhra Pradesh")
        .terminal(Air, "bhubaneswar", "BBI", "Biju Patnaik International", "Odisha")
        .terminal(Air, "guwahati", "GAU", "Lokpriya Gopinath Bordoloi International", "Assam")
        .terminal(Air, "srinagar", "SXR", "Sheikh ul-Alam International", "Jammu and Kashmir")
        .terminal(Air, "leh", "IXL", "Kushok Bakula Rimpochee Airport", "Ladakh")
        .terminal(Air, "port blair", "IXZ", "Veer Savarkar International", "Andaman and Nicobar")
        .terminal(Air, "new york", "JFK", "John F. Kennedy International", "New York")
        .terminal(Air, "london", "LHR", "London Heathrow", "England")
        .terminal(Air, "paris", "CDG", "Paris Charles de Gaulle", "Ile-de-France")
        .terminal(Air, "tokyo", "HND", "Tokyo Haneda", "Kanto");

    // Railway stations
    let b = b
        .terminal(Rail, "delhi", "NDLS", "New Delhi", "Northern")
        .terminal(Rail, "mumbai", "CSTM", "Mumbai CST", "Central")
        .terminal(Rail, "chennai", "MAS", "Chennai Central", "Southern")
        .terminal(Rail, "kolkata", "HWH", "Howrah Junction", "Eastern")
        .terminal(Rail, "bangalore", "SBC", "KSR Bengaluru", "South Western")
        .terminal(Rail, "hyderabad", "SC", "Secunderabad Jn", "South Central")
        .terminal(Rail, "jaipur", "JP", "Jaipur Junction", "North Western")
        .terminal(Rail, "ahmedabad", "ADI", "Ahmedabad Junction", "Western")
        .terminal(Rail, "pune", "PUNE", "Pune Junction", "Central")
        .terminal(Rail, "lucknow", "LKO", "Lucknow Charbagh", "Northern")
        .terminal(Rail, "varanasi", "BSB", "Varanasi Junction", "Northern")
        .terminal(Rail, "goa", "MAO", "Madgaon Junction", "South Western")
        .terminal(Rail, "agra", "AGC", "Agra Cantt", "North Central")
        .terminal(Rail, "kochi", "ERS", "Ernakulam Junction", "Southern")
        .terminal(Rail, "amritsar", "ASR", "Amritsar Junction", "Northern")
        .terminal(Rail, "patna", "PNBE", "Patna Junction", "East Central")
        .terminal(Rail, "bhopal", "BPL", "Bhopal Junction", "West Central")
        .terminal(Rail, "coimbatore", "CBE", "Coimbatore Junction", "Southern")
        .terminal(Rail, "mysore", "MYS", "Mysuru Junction", "South Western")
        .terminal(Rail, "thiruvananthapuram", "TVC", "Trivandrum Central", "Southern")
        .terminal(Rail, "udaipur", "UDZ", "Udaipur City", "North Western")
        .terminal(Rail, "jodhpur", "JU", "Jodhpur Junction", "North Western")
        .terminal(Rail, "chandigarh", "CDG", "Chandigarh Junction", "Northern")
        .terminal(Rail, "indore", "INDB", "Indore Junction", "Western")
        .terminal(Rail, "visakhapatnam", "VSKP", "Visakhapatnam", "East Coast")
        .terminal(Rail, "madurai", "MDU", "Madurai Junction", "Southern")
        .terminal(Rail, "dehradun", "DDN", "Dehradun", "Northern")
        .terminal(Rail, "mettupalayam", "MTP", "Mettupalayam", "Southern")
        .terminal(Rail, "salem", "SA", "Salem Junction", "Southern")
        .terminal(Rail, "erode", "ED", "Erode Junction", "Southern")
        .terminal(Rail, "trichy", "TPJ", "Tiruchirappalli Jn", "Southern")
        .terminal(Rail, "rameswaram", "RMM", "Rameswaram", "Southern")
        .terminal(Rail, "kanyakumari", "CAPE", "Kanyakumari", "Southern")
        .terminal(Rail, "pondicherry", "PDY", "Puducherry", "Southern")
        .terminal(Rail, "nagpur", "NGP", "Nagpur Junction", "Central")
        .terminal(Rail, "ranchi", "RNC", "Ranchi Junction", "South Eastern")
        .terminal(Rail, "bhubaneswar", "BBS", "Bhubaneswar", "East Coast")
        .terminal(Rail, "guwahati", "GHY", "Guwahati", "NF Railway")
        .terminal(Rail, "shimla", "SML", "Shimla", "Northern")
        .terminal(Rail, "jammu", "JAT", "Jammu Tawi", "Northern")
        .terminal(Rail, "alleppey", "ALLP", "Alappuzha", "Southern")
        .terminal(Rail, "kozhikode", "CLT", "Kozhikode Main", "Southern")
        .terminal(Rail, "haridwar", "HW", "Haridwar Junction", "Northern")
        .terminal(Rail, "tiruppur", "TUP", "Tiruppur", "Southern")
        .terminal(Rail, "pollachi", "POY", "Pollachi Junction", "Southern");

    // Road hubs
    let b = b
        .terminal(Road, "coimbatore", "CBE", "Coimbatore", "Tamil Nadu")
        .terminal(Road, "chennai", "MAA", "Chennai", "Tamil Nadu")
        .terminal(Road, "madurai", "MDU", "Madurai", "Tamil Nadu")
        .terminal(Road, "trichy", "TPJ", "Tiruchirappalli", "Tamil Nadu")
        .terminal(Road, "salem", "SLM", "Salem", "Tamil Nadu")
        .terminal(Road, "erode", "ERD", "Erode", "Tamil Nadu")
        .terminal(Road, "tiruppur", "TPR", "Tiruppur", "Tamil Nadu")
        .terminal(Road, "thanjavur", "TJV", "Thanjavur", "Tamil Nadu")
        .terminal(Road, "dindigul", "DGL", "Dindigul", "Tamil Nadu")
        .terminal(Road, "ooty", "OTY", "Ooty (Udhagamandalam)", "Tamil Nadu")
        .terminal(Road, "kodaikanal", "KDK", "Kodaikanal", "Tamil Nadu")
        .terminal(Road, "pondicherry", "PDY", "Puducherry", "Puducherry")
        .terminal(Road, "kanchipuram", "KPM", "Kanchipuram", "Tamil Nadu")
        .terminal(Road, "vellore", "VLR", "Vellore", "Tamil Nadu")
        .terminal(Road, "rameswaram", "RMM", "Rameswaram", "Tamil Nadu")
        .terminal(Road, "kanyakumari", "KNK", "Kanyakumari", "Tamil Nadu")
        .terminal(Road, "pollachi", "PLC", "Pollachi", "Tamil Nadu")
        .terminal(Road, "tirupati", "TPT", "Tirupati", "Andhra Pradesh")
        .terminal(Road, "bangalore", "BLR", "Bengaluru", "Karnataka")
        .terminal(Road, "mysore", "MYS", "Mysuru", "Karnataka")
        .terminal(Road, "kochi", "COK", "Kochi", "Kerala")
        .terminal(Road, "munnar", "MNR", "Munnar", "Kerala")
        .terminal(Road, "alleppey", "ALP", "Alappuzha", "Kerala")
        .terminal(Road, "palakkad", "PKD", "Palakkad", "Kerala")
        .terminal(Road, "thiruvananthapuram", "TVM", "Thiruvananthapuram", "Kerala")
        .terminal(Road, "hyderabad", "HYD", "Hyderabad", "Telangana")
        .terminal(Road, "goa", "GOA", "Goa", "Goa")
        .terminal(Road, "mumbai", "BOM", "Mumbai", "Maharashtra")
        .terminal(Road, "pune", "PNQ", "Pune", "Maharashtra")
        .terminal(Road, "nashik", "NSK", "Nashik", "Maharashtra")
        .terminal(Road, "delhi", "DEL", "Delhi", "Delhi")
        .terminal(Road, "jaipur", "JAI", "Jaipur", "Rajasthan")
        .terminal(Road, "udaipur", "UDR", "Udaipur", "Rajasthan")
        .terminal(Road, "jodhpur", "JDH", "Jodhpur", "Rajasthan")
        .terminal(Road, "agra", "AGR", "Agra", "Uttar Pradesh")
        .terminal(Road, "lucknow", "LKO", "Lucknow", "Uttar Pradesh")
        .terminal(Road, "ahmedabad", "AMD", "Ahmedabad", "Gujarat")
        .terminal(Road, "haridwar", "HDW", "Haridwar", "Uttarakhand")
        .terminal(Road, "rishikesh", "RSK", "Rishikesh", "Uttarakhand")
        .terminal(Road, "chandigarh", "CHD", "Chandigarh", "Punjab")
        .terminal(Road, "dehradun", "DDN", "Dehradun", "Uttarakhand");

    // Places without an airport
    let b = b
        .unserved(Air, "ooty", "Coimbatore (CJB)", "~3 hrs by road",
            "Ooty has no airport.")
        .unserved(Air, "kodaikanal", "Madurai (IXM)", "~3.5 hrs by road",
            "Kodaikanal has no airport.")
        .unserved(Air, "munnar", "Kochi (COK)", "~4 hrs by road",
            "Munnar has no airport.")
        .unserved(Air, "wayanad", "Kozhikode (CCJ)", "~2.5 hrs by road",
            "Wayanad has no airport.")
        .unserved(Air, "alleppey", "Kochi (COK)", "~1.5 hrs by road",
            "Alappuzha has no airport.")
        .unserved(Air, "mettupalayam", "Coimbatore (CJB)", "~1 hr by road",
            "Mettupalayam has no airport.")
        .unserved(Air, "pollachi", "Coimbatore (CJB)", "~1 hr by road",
            "Pollachi has no airport.")
        .unserved(Air, "rameswaram", "Madurai (IXM)", "~3.5 hrs by road",
            "Rameswaram has no airport.")
        .unserved(Air, "kanyakumari", "Thiruvananthapuram (TRV)", "~2.5 hrs by road",
            "Kanyakumari has no airport.")
        .unserved(Air, "darjeeling", "Bagdogra (IXB)", "~3 hrs by road",
            "Darjeeling has no airport.")
        .unserved(Air, "gangtok", "Bagdogra (IXB)", "~4.5 hrs by road",
            "Gangtok has no commercial airport.")
        .unserved(Air, "manali", "Bhuntar (KUU)", "~1.5 hrs by road",
            "Manali has no airport; Bhuntar has very limited flights.")
        .unserved(Air, "rishikesh", "Dehradun (DED)", "~45 min by road",
            "Rishikesh has no airport.")
        .unserved(Air, "haridwar", "Dehradun (DED)", "~1 hr by road",
            "Haridwar has no airport.")
        .unserved(Air, "tiruppur", "Coimbatore (CJB)", "~1 hr by road",
            "Tiruppur has no airport.")
        .unserved(Air, "erode", "Coimbatore (CJB)", "~2 hrs by road",
            "Erode has no airport.");

    // Places without mainline rail
    let b = b
        .unserved(Rail, "ooty", "Mettupalayam (MTP)", "~5 hrs by Nilgiri Mountain Railway",
            "Ooty has no mainline station. The Nilgiri Mountain Railway (UNESCO heritage) runs from Mettupalayam to Ooty (46 km). Take a train to Mettupalayam or Coimbatore first.")
        .unserved(Rail, "kodaikanal", "Kodai Road", "~2 hrs by road (80 km)",
            "Kodaikanal has no railway station. Take a train to Kodai Road and then a bus or taxi.")
        .unserved(Rail, "munnar", "Aluva / Ernakulam (ERS)", "~3.5 hrs by road (130 km)",
            "Munnar has no railway station. Take a train to Kochi/Ernakulam and then a bus or taxi.")
        .unserved(Rail, "wayanad", "Kozhikode (CLT)", "~2.5 hrs by road (85 km)",
            "Wayanad has no direct rail access. Take a train to Kozhikode and then a bus or taxi.")
        .unserved(Rail, "manali", "Chandigarh (CDG)", "~8 hrs by road (310 km)",
            "Manali has no railway station. Take a train to Chandigarh or Ambala and then a bus.")
        .unserved(Rail, "leh", "Jammu Tawi (JAT)", "~2 days by road (700 km)",
            "Leh has no railway station. Most travelers fly to Leh or take a road trip from Manali or Srinagar.")
        .unserved(Rail, "srinagar", "Jammu Tawi (JAT)", "~7 hrs by road",
            "Srinagar's railway has limited connectivity. Most travelers take a train to Jammu Tawi and then road transport.")
        .unserved(Rail, "darjeeling", "New Jalpaiguri (NJP)", "~3 hrs by road or toy train",
            "Darjeeling is served by the Darjeeling Himalayan Railway toy train from New Jalpaiguri. Take a mainline train to NJP first.")
        .unserved(Rail, "gangtok", "New Jalpaiguri (NJP)", "~4.5 hrs by road (125 km)",
            "Gangtok has no railway station. Take a train to NJP and then a taxi or shared jeep.")
        .unserved(Rail, "port blair", "Chennai Central (MAS)", "~2 hrs by air or ~3 days by ship",
            "Port Blair is on the Andaman Islands and has no rail link to the mainland.");

    // Places without a road link
    let b = b.unserved(
        Road,
        "port blair",
        "Chennai (MAA)",
        "~2 hrs by air or ~3 days by ship",
        "Port Blair is on the Andaman Islands and has no road link to the mainland.",
    );

    b.build()
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Normalization is idempotent, aliases included.
        #[test]
        fn normalize_is_idempotent(s in "[ a-zA-Z]{0,20}") {
            let r = builtin_locations();
            let once = r.normalize(&s);
            let twice = r.normalize(once.as_str());
            prop_assert_eq!(once, twice);
        }

        #[test]
        fn normalize_is_idempotent_for_aliases(
            idx in 0usize..19,
            pad in "[ ]{0,3}",
            upper in any::<bool>(),
        ) {
            let r = builtin_locations();
            let sources: Vec<&str> = r.aliases().map(|(s, _)| s).collect();
            let source = sources[idx % sources.len()];
            let raw = if upper { source.to_uppercase() } else { source.to_string() };
            let input = format!("{pad}{raw}{pad}");
            let once = r.normalize(&input);
            prop_assert_eq!(r.normalize(once.as_str()), once);
        }
    }
}
