//! Country name -> ISO 3166-1 alpha-2 code resolution.

use tracing::debug;

use crate::iso3166;

/// Names the ISO lookup gets wrong or cannot match, consulted first and in order.
pub const OVERRIDES: &[(&str, &str)] = &[
    ("United States of America", "US"),
    ("South Korea", "KR"),
    ("North Korea", "KP"),
    ("United Kingdom", "GB"),
    ("Russian Federation", "RU"),
    ("Taiwan", "TW"),
    ("Vietnam", "VN"),
    ("Laos", "LA"),
    ("Fr. S. Antarctic Lands", "TF"),
    ("Bosnia and Herz.", "BA"),
    ("Bolivia", "BO"),
    ("Dem. Rep. Congo", "CD"),
    ("Czech Rep.", "CZ"),
    ("Falkland Is.", "FK"),
    ("Kosovo", "XK"),
    ("Lao PDR", "LA"),
    ("Moldova", "MD"),
    ("Dem. Rep. Korea", "KP"),
    ("Tanzania", "TZ"),
    ("Venezuela", "VE"),
];

/// Where a country code came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// Matched an entry in [`OVERRIDES`].
    Override(&'static str),
    /// Matched an ISO short name.
    Database(&'static str),
    /// Nothing matched; carries the original name.
    Fallback(String),
}

impl Resolution {
    pub fn code(&self) -> &str {
        match self {
            Resolution::Override(code) | Resolution::Database(code) => code,
            Resolution::Fallback(name) => name,
        }
    }

    pub fn into_code(self) -> String {
        match self {
            Resolution::Override(code) | Resolution::Database(code) => code.to_string(),
            Resolution::Fallback(name) => name,
        }
    }

    /// True when the code is a real alpha-2 code rather than the echoed name.
    pub fn is_iso(&self) -> bool {
        !matches!(self, Resolution::Fallback(_))
    }
}

fn lookup_override(name: &str) -> Option<&'static str> {
    OVERRIDES
        .iter()
        .find(|(candidate, _)| *candidate == name)
        .map(|(_, code)| *code)
}

/// Resolve a display name: override table, then ISO names, then the name itself.
pub fn resolve(name: &str) -> Resolution {
    if let Some(code) = lookup_override(name) {
        return Resolution::Override(code);
    }
    if let Some(code) = iso3166::lookup_alpha2(name) {
        return Resolution::Database(code);
    }
    debug!(country = name, "no ISO code found, keeping name as code");
    Resolution::Fallback(name.to_string())
}

pub fn country_code(name: &str) -> String {
    resolve(name).into_code()
}
