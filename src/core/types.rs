use serde::{Deserialize, Serialize};

/// Unique identifier for a standard in the catalog (e.g. `ERC20`)
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StandardId(pub String);

impl StandardId {
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for StandardId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Cutoff for [`ConfidenceLevel::Perfect`]; only reached by an exact score of 1.0
pub const PERFECT_CONFIDENCE_THRESHOLD: f64 = 1.0;

/// Cutoff for [`ConfidenceLevel::High`]
pub const HIGH_CONFIDENCE_THRESHOLD: f64 = 0.9;

/// Cutoff for [`ConfidenceLevel::Medium`]
pub const MEDIUM_CONFIDENCE_THRESHOLD: f64 = 0.5;

/// Cutoff for [`ConfidenceLevel::Low`]
pub const LOW_CONFIDENCE_THRESHOLD: f64 = 0.1;

/// Cutoff for [`ConfidenceLevel::No`]
pub const NO_CONFIDENCE_THRESHOLD: f64 = 0.0;

/// Confidence tier of a conformance check, ordered from `No` to `Perfect`
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum ConfidenceLevel {
    #[default]
    #[serde(rename = "no_confidence")]
    No,
    Low,
    Medium,
    High,
    Perfect,
}

impl ConfidenceLevel {
    /// Map a normalized score to its tier and the tier's cutoff.
    ///
    /// Tiers are evaluated highest first. `Perfect` requires exact equality
    /// with 1.0, every other tier is a `>=` comparison, so 0.9 is `High`
    /// and 0.1 is `Low`.
    #[must_use]
    #[allow(clippy::float_cmp)]
    pub fn classify(points: f64) -> (Self, f64) {
        if points == PERFECT_CONFIDENCE_THRESHOLD {
            (Self::Perfect, PERFECT_CONFIDENCE_THRESHOLD)
        } else if points >= HIGH_CONFIDENCE_THRESHOLD {
            (Self::High, HIGH_CONFIDENCE_THRESHOLD)
        } else if points >= MEDIUM_CONFIDENCE_THRESHOLD {
            (Self::Medium, MEDIUM_CONFIDENCE_THRESHOLD)
        } else if points >= LOW_CONFIDENCE_THRESHOLD {
            (Self::Low, LOW_CONFIDENCE_THRESHOLD)
        } else {
            (Self::No, NO_CONFIDENCE_THRESHOLD)
        }
    }

    /// Lower-bound cutoff of this tier
    #[must_use]
    pub fn threshold(self) -> f64 {
        match self {
            Self::Perfect => PERFECT_CONFIDENCE_THRESHOLD,
            Self::High => HIGH_CONFIDENCE_THRESHOLD,
            Self::Medium => MEDIUM_CONFIDENCE_THRESHOLD,
            Self::Low => LOW_CONFIDENCE_THRESHOLD,
            Self::No => NO_CONFIDENCE_THRESHOLD,
        }
    }

    /// Stable lowercase name used in every textual output
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Perfect => "perfect",
            Self::High => "high",
            Self::Medium => "medium",
            Self::Low => "low",
            Self::No => "no_confidence",
        }
    }
}

impl std::fmt::Display for ConfidenceLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
