//! The nine valuation models. Each is a pure function over the shared
//! snapshot and growth rate; no model reads another model's output, and
//! missing or degenerate input resolves to an N/A verdict instead of an
//! error.

use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};
use valuation_core::ValuationSignal;

pub mod asset_based;
pub mod dcf;
pub mod ddm;
pub mod graham;
pub mod multiples;
pub mod owner_yield;
pub mod payback;
pub mod peg;
pub mod sotp;

pub use asset_based::AssetConfig;
pub use dcf::DcfConfig;
pub use ddm::DdmConfig;
pub use graham::GrahamConfig;
pub use multiples::MultiplesConfig;
pub use owner_yield::OwnerYieldConfig;
pub use payback::PaybackConfig;
pub use peg::PegConfig;

/// Margin of safety as a fraction of the current price.
pub fn margin_of_safety(intrinsic_value: f64, current_price: f64) -> f64 {
    (intrinsic_value - current_price) / current_price
}

/// The shared intrinsic-value-vs-price signal rule.
///
/// The ±threshold band is the single most important tunable in the
/// system: BUY strictly above +threshold, SELL strictly below
/// -threshold, HOLD in between and exactly on either boundary.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct MarginPolicy {
    pub threshold: f64,
}

impl Default for MarginPolicy {
    fn default() -> Self {
        Self { threshold: 0.20 }
    }
}

impl MarginPolicy {
    pub fn new(threshold: f64) -> Result<Self> {
        if threshold <= 0.0 || !threshold.is_finite() {
            bail!("margin threshold must be a positive finite fraction");
        }
        Ok(Self { threshold })
    }

    pub fn classify(&self, intrinsic_value: f64, current_price: f64) -> ValuationSignal {
        if current_price <= 0.0 {
            return ValuationSignal::NotApplicable;
        }

        let margin = margin_of_safety(intrinsic_value, current_price);
        if margin > self.threshold {
            ValuationSignal::Buy
        } else if margin < -self.threshold {
            ValuationSignal::Sell
        } else {
            ValuationSignal::Hold
        }
    }
}
