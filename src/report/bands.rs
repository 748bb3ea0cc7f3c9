use crate::scoring::Polarity;
use serde::Serialize;

/// Upper bound (inclusive) of the low band.
pub const LOW_UPPER: f64 = 33.3;
/// Upper bound (inclusive) of the moderate band.
pub const MODERATE_UPPER: f64 = 66.6;

/// Traffic-light band of a raw 0-100 score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskBand {
    Low,
    Moderate,
    High,
}

impl RiskBand {
    /// Bands are contiguous: anything above 33.3 and up to 66.6 is moderate.
    pub fn of(score: f64) -> Self {
        if score <= LOW_UPPER {
            RiskBand::Low
        } else if score <= MODERATE_UPPER {
            RiskBand::Moderate
        } else {
            RiskBand::High
        }
    }
}

/// Reading of a band once the scale's polarity is taken into account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Assessment {
    Favorable,
    Attention,
    Critical,
}

impl Assessment {
    /// `None` for undefined scores, which must not be read as 0.
    pub fn of(score: Option<f64>, polarity: Polarity) -> Option<Self> {
        let band = RiskBand::of(score?);
        Some(match (polarity, band) {
            (_, RiskBand::Moderate) => Assessment::Attention,
            (Polarity::Risk, RiskBand::Low) | (Polarity::Resource, RiskBand::High) => {
                Assessment::Favorable
            }
            (Polarity::Risk, RiskBand::High) | (Polarity::Resource, RiskBand::Low) => {
                Assessment::Critical
            }
        })
    }

    pub fn label(&self) -> &'static str {
        match self {
            Assessment::Favorable => "favorable",
            Assessment::Attention => "attention",
            Assessment::Critical => "critical",
        }
    }
}
