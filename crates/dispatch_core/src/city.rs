use std::fmt;
use std::str::FromStr;

use serde::Serialize;

/// Fixed set of cities a cab can be stationed in or travel between.
///
/// There is no "unknown" variant: a cab that is mid-trip reports `None`
/// from [`crate::Vehicle::current_city`] instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum City {
    Pune,
    Mumbai,
    Delhi,
    Nagpur,
    Bangaluru,
}

impl City {
    pub const ALL: [City; 5] = [
        City::Pune,
        City::Mumbai,
        City::Delhi,
        City::Nagpur,
        City::Bangaluru,
    ];

    pub fn name(self) -> &'static str {
        match self {
            City::Pune => "Pune",
            City::Mumbai => "Mumbai",
            City::Delhi => "Delhi",
            City::Nagpur => "Nagpur",
            City::Bangaluru => "Bangaluru",
        }
    }
}

impl fmt::Display for City {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown city: {0}")]
pub struct ParseCityError(pub String);

impl FromStr for City {
    type Err = ParseCityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        City::ALL
            .into_iter()
            .find(|city| city.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ParseCityError(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_names_case_insensitively() {
        assert_eq!("mumbai".parse::<City>(), Ok(City::Mumbai));
        assert_eq!(" Bangaluru ".parse::<City>(), Ok(City::Bangaluru));
        assert!("Atlantis".parse::<City>().is_err());
    }

    #[test]
    fn display_matches_name() {
        for city in City::ALL {
            assert_eq!(city.to_string(), city.name());
        }
    }
}
