use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};

/// Sport tag driving strategy selection.
///
/// `Unknown` is a valid, non-error value meaning "no specialized stats
/// available"; leagues for sports we don't track still exist.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
)]
#[strum(ascii_case_insensitive)]
pub enum SportType {
    #[strum(serialize = "soccer", to_string = "Soccer")]
    Soccer,
    #[strum(
        serialize = "ultimate frisbee",
        serialize = "ultimate_frisbee",
        to_string = "Ultimate Frisbee"
    )]
    UltimateFrisbee,
    #[default]
    #[strum(serialize = "unknown")]
    Unknown,
}

impl SportType {
    /// Normalizes a plain string identifier. Anything unrecognized maps to
    /// `Unknown` rather than an error.
    pub fn parse(value: &str) -> SportType {
        value.parse().unwrap_or(SportType::Unknown)
    }
}
