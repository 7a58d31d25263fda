use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::domain::{DoshaAxis, PercentageVector};
use super::error::EngineError;

pub const DOMINANT_THRESHOLD: f64 = 60.0;
pub const DUAL_PRIMARY_THRESHOLD: f64 = 40.0;
pub const DUAL_SECONDARY_THRESHOLD: f64 = 30.0;
pub const BALANCED_MAX_GAP: f64 = 10.0;

const BALANCED_LABEL: &str = "tri-doshic (balanced)";

/// Discrete constitution derived from a percentage vector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConstitutionLabel {
    Dominant(DoshaAxis),
    /// Ordered by descending share.
    Dual(DoshaAxis, DoshaAxis),
    Balanced,
}

impl ConstitutionLabel {
    pub fn is_balanced(&self) -> bool {
        matches!(self, Self::Balanced)
    }
}

impl fmt::Display for ConstitutionLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Dominant(axis) => write!(f, "{axis}-dominant"),
            Self::Dual(first, second) => write!(f, "{first}-{second}"),
            Self::Balanced => f.write_str(BALANCED_LABEL),
        }
    }
}

impl FromStr for ConstitutionLabel {
    type Err = EngineError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let value = raw.trim().to_ascii_lowercase();
        if value == BALANCED_LABEL || value == "tri-doshic" || value == "balanced" {
            return Ok(Self::Balanced);
        }
        if let Some(axis) = value.strip_suffix("-dominant") {
            return Ok(Self::Dominant(axis.parse()?));
        }
        match value.split_once('-') {
            Some((first, second)) => Ok(Self::Dual(first.parse()?, second.parse()?)),
            None => Err(EngineError::UnknownAxis(raw.to_string())),
        }
    }
}

impl Serialize for ConstitutionLabel {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for ConstitutionLabel {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// Apply the threshold policy; the first matching rule wins.
pub fn classify(percentages: &PercentageVector) -> ConstitutionLabel {
    let [(first_axis, first), (second_axis, second), (_, third)] = percentages.ranked();

    if first >= DOMINANT_THRESHOLD {
        return ConstitutionLabel::Dominant(first_axis);
    }
    if first >= DUAL_PRIMARY_THRESHOLD && second >= DUAL_SECONDARY_THRESHOLD {
        return ConstitutionLabel::Dual(first_axis, second_axis);
    }
    if (first - second).abs() <= BALANCED_MAX_GAP && (second - third).abs() <= BALANCED_MAX_GAP {
        return ConstitutionLabel::Balanced;
    }
    ConstitutionLabel::Dual(first_axis, second_axis)
}

/// Percentages, their ranking and the label computed from them, kept together
/// so later stages never re-derive the label. Deserializing reads only the
/// percentages and recomputes the rest.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "StoredProfile")]
pub struct ConstitutionProfile {
    pub percentages: PercentageVector,
    pub ranked: [(DoshaAxis, f64); 3],
    pub label: ConstitutionLabel,
}

impl ConstitutionProfile {
    pub fn from_percentages(percentages: PercentageVector) -> Self {
        Self {
            percentages,
            ranked: percentages.ranked(),
            label: classify(&percentages),
        }
    }

    pub fn dominant(&self) -> DoshaAxis {
        self.ranked[0].0
    }

    /// Second-ranked axis with its share.
    pub fn secondary(&self) -> (DoshaAxis, f64) {
        self.ranked[1]
    }
}

#[derive(Deserialize)]
struct StoredProfile {
    percentages: PercentageVector,
}

impl TryFrom<StoredProfile> for ConstitutionProfile {
    type Error = EngineError;

    fn try_from(stored: StoredProfile) -> Result<Self, Self::Error> {
        let percentages = stored.percentages;
        let shares = DoshaAxis::ordered().map(|axis| percentages.get(axis));
        let usable = shares.iter().all(|share| share.is_finite() && *share >= 0.0);
        if !usable || percentages.sum() <= 0.0 {
            return Err(EngineError::InvalidPercentages);
        }
        Ok(Self::from_percentages(percentages))
    }
}
