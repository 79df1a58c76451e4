//! Condition normalization
//!
//! Maps Met.no weather symbols (see <https://api.met.no/weatherapi/weathericon/2.0/documentation>)
//! onto the weather entity's condition vocabulary. The table is an ordered
//! list: the first entry whose code set contains a symbol wins, and symbols
//! not listed anywhere pass through unchanged.

use std::collections::HashSet;

/// Default Met.no symbol table, in priority order
const METNO_CONDITIONS: &[(&str, &[&str])] = &[
    ("clear-night", &["clearsky_night"]),
    ("cloudy", &["cloudy"]),
    ("fog", &["fog"]),
    (
        "lightning-rainy",
        &[
            "heavyrainandthunder",
            "heavyrainshowersandthunder_day",
            "heavyrainshowersandthunder_night",
            "heavyrainshowersandthunder_polartwilight",
            "heavysleetandthunder",
            "heavysleetshowersandthunder_day",
            "heavysleetshowersandthunder_night",
            "heavysleetshowersandthunder_polartwilight",
            "heavysnowandthunder",
            "heavysnowshowersandthunder_day",
            "heavysnowshowersandthunder_night",
            "heavysnowshowersandthunder_polartwilight",
            "lightrainandthunder",
            "lightrainshowersandthunder_day",
            "lightrainshowersandthunder_night",
            "lightrainshowersandthunder_polartwilight",
            "lightsleetandthunder",
            "lightsnowandthunder",
            // Met.no spells these with a double "s"
            "lightssleetshowersandthunder_day",
            "lightssleetshowersandthunder_night",
            "lightssleetshowersandthunder_polartwilight",
            "lightssnowshowersandthunder_day",
            "lightssnowshowersandthunder_night",
            "lightssnowshowersandthunder_polartwilight",
            "rainandthunder",
            "rainshowersandthunder_day",
            "rainshowersandthunder_night",
            "rainshowersandthunder_polartwilight",
            "sleetandthunder",
            "sleetshowersandthunder_day",
            "sleetshowersandthunder_night",
            "sleetshowersandthunder_polartwilight",
            "snowandthunder",
            "snowshowersandthunder_day",
            "snowshowersandthunder_night",
            "snowshowersandthunder_polartwilight",
        ],
    ),
    (
        "partlycloudy",
        &[
            "fair_day",
            "fair_night",
            "fair_polartwilight",
            "partlycloudy_day",
            "partlycloudy_night",
            "partlycloudy_polartwilight",
        ],
    ),
    (
        "pouring",
        &[
            "heavyrain",
            "heavyrainshowers_day",
            "heavyrainshowers_night",
            "heavyrainshowers_polartwilight",
        ],
    ),
    (
        "rainy",
        &[
            "lightrain",
            "lightrainshowers_day",
            "lightrainshowers_night",
            "lightrainshowers_polartwilight",
            "rain",
            "rainshowers_day",
            "rainshowers_night",
            "rainshowers_polartwilight",
        ],
    ),
    (
        "snowy",
        &[
            "heavysnow",
            "heavysnowshowers_day",
            "heavysnowshowers_night",
            "heavysnowshowers_polartwilight",
            "lightsnow",
            "lightsnowshowers_day",
            "lightsnowshowers_night",
            "lightsnowshowers_polartwilight",
            "snow",
            "snowshowers_day",
            "snowshowers_night",
            "snowshowers_polartwilight",
        ],
    ),
    (
        "snowy-rainy",
        &[
            "heavysleet",
            "heavysleetshowers_day",
            "heavysleetshowers_night",
            "heavysleetshowers_polartwilight",
            "lightsleet",
            "lightsleetshowers_day",
            "lightsleetshowers_night",
            "lightsleetshowers_polartwilight",
            "sleet",
            "sleetshowers_day",
            "sleetshowers_night",
            "sleetshowers_polartwilight",
        ],
    ),
    ("sunny", &["clearsky_day", "clearsky_polartwilight"]),
];

/// Ordered mapping from normalized condition name to provider symbol codes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConditionMap {
    entries: Vec<(String, HashSet<String>)>,
}

impl ConditionMap {
    /// Build a map from `(name, codes)` pairs; the given order is the match priority
    pub fn new<N, I, C>(entries: impl IntoIterator<Item = (N, I)>) -> Self
    where
        N: Into<String>,
        I: IntoIterator<Item = C>,
        C: Into<String>,
    {
        let entries = entries
            .into_iter()
            .map(|(name, codes)| (name.into(), codes.into_iter().map(Into::into).collect()))
            .collect();
        Self { entries }
    }

    /// The built-in Met.no symbol table
    #[must_use]
    pub fn metno() -> Self {
        Self::new(
            METNO_CONDITIONS
                .iter()
                .map(|(name, codes)| (*name, codes.iter().copied())),
        )
    }

    /// Normalize a provider symbol
    ///
    /// Returns the first normalized name whose code set contains `code`,
    /// or `code` itself when no entry matches.
    #[must_use]
    pub fn normalize<'a>(&'a self, code: &'a str) -> &'a str {
        self.entries
            .iter()
            .find(|(_, codes)| codes.contains(code))
            .map_or(code, |(name, _)| name.as_str())
    }

    /// Normalized names in priority order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(name, _)| name.as_str())
    }

    /// Number of normalized names
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the map has no entries (every code passes through)
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for ConditionMap {
    fn default() -> Self {
        Self::metno()
    }
}
