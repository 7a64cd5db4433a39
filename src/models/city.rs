//! Destination cities an expense claim can be filed for

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Fixed set of supported destination cities
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum City {
    #[default]
    Zurich,
    Geneva,
    Basel,
    Bern,
    Lausanne,
    Lugano,
    Lucerne,
}

impl City {
    /// All supported cities, in selector order
    pub const ALL: [City; 7] = [
        City::Zurich,
        City::Geneva,
        City::Basel,
        City::Bern,
        City::Lausanne,
        City::Lugano,
        City::Lucerne,
    ];

    /// Display name
    pub fn name(&self) -> &'static str {
        match self {
            City::Zurich => "Zurich",
            City::Geneva => "Geneva",
            City::Basel => "Basel",
            City::Bern => "Bern",
            City::Lausanne => "Lausanne",
            City::Lugano => "Lugano",
            City::Lucerne => "Lucerne",
        }
    }

    /// Next city in selector order, wrapping around
    pub fn cycle_next(&self) -> City {
        let index = Self::ALL.iter().position(|c| c == self).unwrap_or(0);
        Self::ALL[(index + 1) % Self::ALL.len()]
    }

    /// Previous city in selector order, wrapping around
    pub fn cycle_prev(&self) -> City {
        let index = Self::ALL.iter().position(|c| c == self).unwrap_or(0);
        Self::ALL[(index + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

impl fmt::Display for City {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error for a city outside the supported list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownCity(pub String);

impl fmt::Display for UnknownCity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&str> = City::ALL.iter().map(|c| c.name()).collect();
        write!(
            f,
            "Unsupported destination city '{}'. Choose one of: {}",
            self.0,
            names.join(", ")
        )
    }
}

impl std::error::Error for UnknownCity {}

impl FromStr for City {
    type Err = UnknownCity;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        // Accept the local spellings as well
        let alias = match wanted.to_lowercase().as_str() {
            "zürich" => Some(City::Zurich),
            "genève" | "geneve" | "genf" => Some(City::Geneva),
            "luzern" => Some(City::Lucerne),
            _ => None,
        };
        if let Some(city) = alias {
            return Ok(city);
        }
        City::ALL
            .into_iter()
            .find(|c| c.name().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| UnknownCity(wanted.to_string()))
    }
}
