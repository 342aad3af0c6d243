//! Risk tier policy
//!
//! Maps the misinformation probability to a tier through an ordered table of
//! `(lower_bound, tier)` bands. The first band whose bound is strictly below
//! the probability wins; otherwise the floor tier applies.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Probability reported when there is nothing to classify
pub const NO_CONTENT_PROBABILITY: f64 = 0.5;

/// Human-facing risk tier
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskTier {
    /// Empty input, classifier not consulted
    NoContent,
    Low,
    Moderate,
    High,
}

impl RiskTier {
    /// Verdict text shown to users
    pub fn label(&self) -> &'static str {
        match self {
            RiskTier::NoContent => "No content to analyze",
            RiskTier::Low => "LOW RISK - Appears Reliable",
            RiskTier::Moderate => "MODERATE RISK - Requires Verification",
            RiskTier::High => "HIGH RISK - Likely Misinformation",
        }
    }
}

impl fmt::Display for RiskTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RiskTier::NoContent => write!(f, "no_content"),
            RiskTier::Low => write!(f, "low"),
            RiskTier::Moderate => write!(f, "moderate"),
            RiskTier::High => write!(f, "high"),
        }
    }
}

/// One row of the policy table
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TierBand {
    /// Exclusive lower bound on the misinformation probability
    pub above: f64,
    pub tier: RiskTier,
}

/// Ordered threshold table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TierPolicy {
    bands: Vec<TierBand>,
    floor: RiskTier,
}

impl Default for TierPolicy {
    fn default() -> Self {
        Self {
            bands: vec![
                TierBand {
                    above: 0.7,
                    tier: RiskTier::High,
                },
                TierBand {
                    above: 0.4,
                    tier: RiskTier::Moderate,
                },
            ],
            floor: RiskTier::Low,
        }
    }
}

impl TierPolicy {
    /// Build a validated policy
    pub fn new(bands: Vec<TierBand>, floor: RiskTier) -> Result<Self, String> {
        let policy = Self { bands, floor };
        policy.validate()?;
        Ok(policy)
    }

    /// Bands must descend strictly, tiers must not rise going down the table,
    /// and NoContent is reserved for empty input.
    pub fn validate(&self) -> Result<(), String> {
        if self.floor == RiskTier::NoContent {
            return Err("floor tier cannot be no_content".into());
        }
        let mut prev: Option<&TierBand> = None;
        for band in &self.bands {
            if !(0.0..=1.0).contains(&band.above) {
                return Err(format!("bound {} outside [0, 1]", band.above));
            }
            if band.tier == RiskTier::NoContent {
                return Err("no_content cannot appear in the threshold table".into());
            }
            if let Some(p) = prev {
                if band.above >= p.above {
                    return Err(format!(
                        "bounds must strictly descend ({} after {})",
                        band.above, p.above
                    ));
                }
                if band.tier > p.tier {
                    return Err(format!("tier {} listed below lower tier {}", band.tier, p.tier));
                }
            }
            prev = Some(band);
        }
        if let Some(last) = prev {
            if self.floor > last.tier {
                return Err(format!("floor {} above last band tier {}", self.floor, last.tier));
            }
        }
        Ok(())
    }

    /// Tier for a misinformation probability
    pub fn classify(&self, probability: f64) -> RiskTier {
        self.bands
            .iter()
            .find(|band| probability > band.above)
            .map(|band| band.tier)
            .unwrap_or(self.floor)
    }

    pub fn bands(&self) -> &[TierBand] {
        &self.bands
    }

    pub fn floor(&self) -> RiskTier {
        self.floor
    }
}

/// Result handed to callers
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Verdict {
    /// Probability the text is misinformation
    pub probability: f64,
    pub tier: RiskTier,
}

impl Verdict {
    pub fn no_content() -> Self {
        Self {
            probability: NO_CONTENT_PROBABILITY,
            tier: RiskTier::NoContent,
        }
    }

    pub fn label(&self) -> &'static str {
        self.tier.label()
    }
}
