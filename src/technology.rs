//! The powertrain technologies which can be compared.
use anyhow::{Result, bail};
use serde::{Deserialize, Deserializer};
use serde_string_enum::SerializeLabeledStringEnum;
use std::str::FromStr;
use strum::{EnumIter, IntoEnumIterator};
use unicase::UniCase;

/// A vehicle powertrain technology.
///
/// Values arriving as strings are normalised once, when parsed, with [`Technology::from_str`].
/// Both the canonical tag (e.g. `BEV`) and a descriptive label (e.g. `electric`) are accepted,
/// ignoring case.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, EnumIter, SerializeLabeledStringEnum,
)]
pub enum Technology {
    /// Internal combustion engine vehicle
    #[string = "ICE"]
    Combustion,
    /// Battery-electric vehicle
    #[string = "BEV"]
    Electric,
    /// Plug-in hybrid electric vehicle
    #[string = "PHEV"]
    PluginHybrid,
}

/// The order in which technologies are presented to the user
pub const DISPLAY_ORDER: [Technology; 3] = [
    Technology::Electric,
    Technology::Combustion,
    Technology::PluginHybrid,
];

impl Technology {
    /// The canonical tag for this technology
    pub fn tag(self) -> &'static str {
        match self {
            Self::Combustion => "ICE",
            Self::Electric => "BEV",
            Self::PluginHybrid => "PHEV",
        }
    }

    /// A human-readable name
    pub fn description(self) -> &'static str {
        match self {
            Self::Combustion => "Combustion",
            Self::Electric => "Electric",
            Self::PluginHybrid => "Plug-in hybrid",
        }
    }

    /// Whether the vehicle is charged from the grid (and so needs charging infrastructure)
    pub fn is_electrified(self) -> bool {
        match self {
            Self::Combustion => false,
            Self::Electric | Self::PluginHybrid => true,
        }
    }

    /// Alternative labels accepted when parsing
    fn aliases(self) -> &'static [&'static str] {
        match self {
            Self::Combustion => &["combustion", "thermal"],
            Self::Electric => &["electric", "battery-electric"],
            Self::PluginHybrid => &["hybrid", "plug-in hybrid", "plugin_hybrid"],
        }
    }
}

impl FromStr for Technology {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        let label = UniCase::new(s.trim());
        for technology in Technology::iter() {
            if UniCase::new(technology.tag()) == label
                || technology
                    .aliases()
                    .iter()
                    .any(|alias| UniCase::new(*alias) == label)
            {
                return Ok(technology);
            }
        }

        bail!("Invalid technology: '{s}' (expected one of ICE, BEV or PHEV)")
    }
}

impl<'de> Deserialize<'de> for Technology {
    fn deserialize<D>(deserialiser: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let label = String::deserialize(deserialiser)?;
        label.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("ICE", Technology::Combustion)]
    #[case("bev", Technology::Electric)]
    #[case(" PHEV ", Technology::PluginHybrid)]
    #[case("Electric", Technology::Electric)]
    #[case("combustion", Technology::Combustion)]
    #[case("plug-in hybrid", Technology::PluginHybrid)]
    fn test_parse_technology(#[case] label: &str, #[case] expected: Technology) {
        assert_eq!(label.parse::<Technology>().unwrap(), expected);
    }

    #[rstest]
    #[case("")]
    #[case("FCEV")]
    #[case("diesel")]
    fn test_parse_technology_invalid(#[case] label: &str) {
        assert!(label.parse::<Technology>().is_err());
    }

    #[test]
    fn test_is_electrified() {
        assert!(!Technology::Combustion.is_electrified());
        assert!(Technology::Electric.is_electrified());
        assert!(Technology::PluginHybrid.is_electrified());
    }

    #[test]
    fn test_display_uses_tag() {
        for technology in Technology::iter() {
            assert_eq!(technology.to_string(), technology.tag());
        }
        assert_eq!(format!("{}", Technology::PluginHybrid), "PHEV");
    }

    #[test]
    fn test_display_round_trips_through_parse() {
        for technology in Technology::iter() {
            assert_eq!(
                technology.to_string().parse::<Technology>().unwrap(),
                technology
            );
        }
    }
}
