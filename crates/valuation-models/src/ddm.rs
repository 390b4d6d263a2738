use crate::{margin_of_safety, MarginPolicy};
use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};
use valuation_core::{FinancialMetricsSnapshot, ModelVerdict};

/// Margin the growth rate is kept below the required return, so the
/// Gordon denominator never collapses.
const GROWTH_CLAMP_SPREAD: f64 = 0.01;

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct DdmConfig {
    /// Investor's required rate of return.
    pub required_return: f64,
}

impl Default for DdmConfig {
    fn default() -> Self {
        Self {
            required_return: 0.10,
        }
    }
}

impl DdmConfig {
    pub fn new(required_return: f64) -> Result<Self> {
        if required_return <= GROWTH_CLAMP_SPREAD {
            bail!("required return must exceed the growth clamp spread");
        }
        Ok(Self { required_return })
    }
}

/// Gordon growth dividend discount: V = D1 / (r - g), with the growth
/// rate clamped below the required return to dodge the model's
/// singularity.
pub fn evaluate(
    snapshot: &FinancialMetricsSnapshot,
    growth_rate: f64,
    config: &DdmConfig,
    margin: &MarginPolicy,
) -> ModelVerdict {
    if snapshot.dividend_yield <= 0.0 {
        return ModelVerdict::not_applicable("no dividend paid");
    }
    if snapshot.current_price <= 0.0 {
        return ModelVerdict::not_applicable("market price unavailable");
    }

    let annual_dividend = snapshot.current_price * snapshot.dividend_yield;
    let growth = growth_rate.min(config.required_return - GROWTH_CLAMP_SPREAD);
    let intrinsic_value =
        annual_dividend * (1.0 + growth) / (config.required_return - growth);

    let signal = margin.classify(intrinsic_value, snapshot.current_price);
    ModelVerdict::new(
        intrinsic_value,
        signal,
        format!(
            "dividend stream worth {:.2} vs price {:.2} ({:+.1}% margin of safety)",
            intrinsic_value,
            snapshot.current_price,
            margin_of_safety(intrinsic_value, snapshot.current_price) * 100.0
        ),
    )
}
