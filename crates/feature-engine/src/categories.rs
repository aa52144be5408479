//! Categorical Inputs

use data_validator::ValidationError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Declares a categorical feature. The first level is the form default and
/// the declaration order is the ordinal encoding.
macro_rules! categorical {
    ($(#[$meta:meta])* $name:ident => $feature:literal { $first:ident $(, $rest:ident)* }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
        pub enum $name {
            #[default]
            $first,
            $($rest,)*
        }

        impl $name {
            /// Feature name as the model expects it
            pub const FEATURE: &'static str = $feature;

            /// Every level, in encoding order
            pub const ALL: &'static [$name] = &[$name::$first, $($name::$rest,)*];

            /// Level spellings, in encoding order
            pub const LEVELS: &'static [&'static str] = &[stringify!($first), $(stringify!($rest),)*];

            /// Get string representation
            pub fn as_str(&self) -> &'static str {
                match self {
                    $name::$first => stringify!($first),
                    $($name::$rest => stringify!($rest),)*
                }
            }

            /// Ordinal position in `LEVELS`
            pub fn index(&self) -> usize {
                *self as usize
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = ValidationError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let wanted = s.trim();
                Self::ALL
                    .iter()
                    .copied()
                    .find(|level| level.as_str().eq_ignore_ascii_case(wanted))
                    .ok_or_else(|| ValidationError::InvalidCategory {
                        field: Self::FEATURE,
                        value: s.to_string(),
                        expected: Self::LEVELS.join(", "),
                    })
            }
        }
    };
}

categorical! {
    /// Patient gender
    Gender => "Gender" { Male, Female, Transgender }
}

categorical! {
    /// Alcohol consumption level
    AlcoholConsumption => "AlcoholConsumption" { None, Low, Moderate, High }
}

categorical! {
    /// Smoking history
    SmokingHistory => "SmokingHistory" { Never, Former, Current }
}

categorical! {
    /// Physical activity level
    ActivityLevel => "PhysicalActivityLevel" { Low, Moderate, High }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_case_insensitive() {
        assert_eq!("female".parse::<Gender>().unwrap(), Gender::Female);
        assert_eq!(" CURRENT ".parse::<SmokingHistory>().unwrap(), SmokingHistory::Current);
        assert_eq!("none".parse::<AlcoholConsumption>().unwrap(), AlcoholConsumption::None);
    }

    #[test]
    fn test_parse_unknown_level() {
        let err = "Other".parse::<Gender>().unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid Gender 'Other', expected one of: Male, Female, Transgender"
        );
    }

    #[test]
    fn test_defaults_are_first_level() {
        assert_eq!(Gender::default(), Gender::Male);
        assert_eq!(AlcoholConsumption::default(), AlcoholConsumption::None);
        assert_eq!(SmokingHistory::default(), SmokingHistory::Never);
        assert_eq!(ActivityLevel::default(), ActivityLevel::Low);
    }

    #[test]
    fn test_ordinal_index() {
        assert_eq!(Gender::Transgender.index(), 2);
        assert_eq!(AlcoholConsumption::High.index(), 3);
        assert_eq!(ActivityLevel::LEVELS[ActivityLevel::Moderate.index()], "Moderate");
    }

    #[test]
    fn test_serde_uses_display_spelling() {
        let json = serde_json::to_string(&SmokingHistory::Former).unwrap();
        assert_eq!(json, "\"Former\"");
        let level: AlcoholConsumption = serde_json::from_str("\"Moderate\"").unwrap();
        assert_eq!(level, AlcoholConsumption::Moderate);
    }
}
