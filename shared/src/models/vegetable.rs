//! Vegetable growing profiles

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// How a vegetable reacts to rain around sowing
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum RainPreference {
    /// Wants at least some rain on the day
    Likes,
    /// Indifferent to rain
    Neutral,
    /// Wants a completely dry day
    Dislikes,
}

impl RainPreference {
    /// Japanese label used in the reference table
    pub fn label_ja(&self) -> &'static str {
        match self {
            RainPreference::Likes => "好き",
            RainPreference::Neutral => "普通",
            RainPreference::Dislikes => "嫌い",
        }
    }
}

impl std::fmt::Display for RainPreference {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RainPreference::Likes => write!(f, "likes"),
            RainPreference::Neutral => write!(f, "neutral"),
            RainPreference::Dislikes => write!(f, "dislikes"),
        }
    }
}

impl std::str::FromStr for RainPreference {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let token = s.trim();
        match token.to_ascii_lowercase().as_str() {
            "likes" | "like" => return Ok(RainPreference::Likes),
            "neutral" => return Ok(RainPreference::Neutral),
            "dislikes" | "dislike" => return Ok(RainPreference::Dislikes),
            _ => {}
        }
        [
            RainPreference::Likes,
            RainPreference::Neutral,
            RainPreference::Dislikes,
        ]
        .into_iter()
        .find(|pref| pref.label_ja() == token)
        .ok_or_else(|| format!("unknown rain preference '{}'", token))
    }
}

/// Growing parameters for one vegetable, one row of the reference catalog
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct VegetableProfile {
    pub name: String,
    /// Lowest tolerable sowing temperature (°C)
    pub min_sow_temp: Decimal,
    /// Highest tolerable sowing temperature (°C)
    pub max_sow_temp: Decimal,
    pub rain_preference: RainPreference,
    pub days_to_transplant: u32,
    /// Event that starts the harvest countdown, e.g. "transplant date"
    #[serde(skip_serializing_if = "Option::is_none")]
    pub harvest_basis_label: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub days_to_harvest: Option<u32>,
}

impl VegetableProfile {
    /// Whether the harvest countdown starts at transplanting rather than sowing
    pub fn harvest_counts_from_transplant(&self) -> bool {
        self.harvest_basis_label
            .as_deref()
            .map(|label| {
                let label = label.to_lowercase();
                label.contains("transplant") || label.contains("定植")
            })
            .unwrap_or(false)
    }
}
