use log::debug;
use serde::{Deserialize, Serialize};

/// Derives the single forward growth-rate estimate shared by the
/// valuation models.
///
/// Preference order: compound annual growth of historical revenue, then
/// the analyst estimate carried on the snapshot, then a flat default.
///
/// The historical CAGR is taken as an absolute value: a business
/// shrinking 9% a year projects like one growing 9% a year. Deliberate
/// policy; changing it changes every downstream projection.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct GrowthEstimator {
    /// Used when neither history nor an analyst estimate is usable.
    pub default_growth: f64,
}

impl Default for GrowthEstimator {
    fn default() -> Self {
        Self {
            default_growth: 0.05, // 5%
        }
    }
}

impl GrowthEstimator {
    pub fn new(default_growth: f64) -> Self {
        Self { default_growth }
    }

    /// Estimate the forward growth rate. `annual_revenues` is ordered
    /// most recent first; anything that makes the history unusable
    /// (too short, non-positive endpoints, non-finite arithmetic) falls
    /// through to the analyst estimate, then to the default. This never
    /// fails.
    pub fn estimate(&self, annual_revenues: &[f64], analyst_estimate: Option<f64>) -> f64 {
        if let Some(cagr) = historical_cagr(annual_revenues) {
            return cagr;
        }

        match analyst_estimate {
            Some(g) if g > 0.0 && g.is_finite() => g,
            _ => {
                debug!(
                    "no usable revenue history or analyst estimate, using default growth {:.1}%",
                    self.default_growth * 100.0
                );
                self.default_growth
            }
        }
    }
}

/// Compound annual growth rate over the revenue series, most recent
/// first: (newest / oldest)^(1/(n-1)) - 1, returned as an absolute
/// value. None when the history cannot support the computation.
fn historical_cagr(annual_revenues: &[f64]) -> Option<f64> {
    let usable: Vec<f64> = annual_revenues
        .iter()
        .copied()
        .filter(|v| v.is_finite())
        .collect();
    if usable.len() < 2 {
        return None;
    }

    // Index 0 is the most recent year, the last index the oldest.
    let newest = usable[0];
    let oldest = usable[usable.len() - 1];
    if newest <= 0.0 || oldest <= 0.0 {
        debug!("revenue history has non-positive endpoints, treating as unavailable");
        return None;
    }

    let periods = (usable.len() - 1) as f64;
    let cagr = (newest / oldest).powf(1.0 / periods) - 1.0;
    if !cagr.is_finite() {
        return None;
    }

    Some(cagr.abs())
}
