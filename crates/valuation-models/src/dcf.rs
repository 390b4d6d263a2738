use crate::{margin_of_safety, MarginPolicy};
use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};
use valuation_core::{FinancialMetricsSnapshot, ModelVerdict};

/// Discounted cash flow parameters.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct DcfConfig {
    /// Rate used to discount projected cash flows to present value.
    pub discount_rate: f64,

    /// Perpetual growth rate in the Gordon terminal value. Must stay
    /// below the discount rate or the terminal value is undefined.
    pub terminal_growth: f64,

    /// Total projection horizon in years.
    pub projection_years: u32,

    /// Years projected at the full growth rate before decay sets in.
    pub high_growth_years: u32,

    /// Multiplicative decay applied to the growth rate for each year
    /// past the high-growth window.
    pub growth_decay: f64,
}

impl Default for DcfConfig {
    fn default() -> Self {
        Self {
            discount_rate: 0.10,
            terminal_growth: 0.03,
            projection_years: 10,
            high_growth_years: 5,
            growth_decay: 0.9,
        }
    }
}

impl DcfConfig {
    pub fn new(discount_rate: f64, terminal_growth: f64, projection_years: u32) -> Result<Self> {
        if discount_rate <= terminal_growth {
            bail!("discount rate must exceed terminal growth");
        }
        if projection_years == 0 {
            bail!("projection horizon must be at least one year");
        }
        Ok(Self {
            discount_rate,
            terminal_growth,
            projection_years,
            ..Self::default()
        })
    }
}

/// Per-share intrinsic value from projected free cash flows.
///
/// Years inside the high-growth window compound the base FCF directly.
/// Past the window the growth rate decays geometrically (floored at the
/// terminal rate) and each year compounds off the previous projection,
/// so the tail is a recurrence rather than a closed form. The sum of
/// discounted projections plus the discounted Gordon terminal value,
/// adjusted for net cash, divides by shares outstanding.
pub fn evaluate(
    snapshot: &FinancialMetricsSnapshot,
    growth_rate: f64,
    config: &DcfConfig,
    margin: &MarginPolicy,
) -> ModelVerdict {
    let fcf = snapshot.free_cash_flow_ttm;
    let shares = snapshot.shares_outstanding;

    if fcf <= 0.0 || shares <= 0.0 {
        return ModelVerdict::not_applicable("free cash flow or share count unavailable");
    }
    if config.discount_rate <= config.terminal_growth {
        // A non-positive Gordon spread would blow up the terminal value.
        return ModelVerdict::not_applicable("discount rate does not exceed terminal growth");
    }
    if snapshot.current_price <= 0.0 {
        return ModelVerdict::not_applicable("market price unavailable");
    }

    let mut projections = Vec::with_capacity(config.projection_years as usize);
    for year in 1..=config.projection_years {
        let projected = if year <= config.high_growth_years {
            fcf * (1.0 + growth_rate).powi(year as i32)
        } else {
            let decayed =
                growth_rate * config.growth_decay.powi((year - config.high_growth_years) as i32);
            let previous = projections.last().copied().unwrap_or(fcf);
            previous * (1.0 + decayed.max(config.terminal_growth))
        };
        projections.push(projected);
    }

    let pv_fcf: f64 = projections
        .iter()
        .enumerate()
        .map(|(i, p)| p / (1.0 + config.discount_rate).powi(i as i32 + 1))
        .sum();

    let final_fcf = projections.last().copied().unwrap_or(fcf);
    let terminal_value = final_fcf * (1.0 + config.terminal_growth)
        / (config.discount_rate - config.terminal_growth);
    let pv_terminal =
        terminal_value / (1.0 + config.discount_rate).powi(config.projection_years as i32);

    let equity_value = pv_fcf + pv_terminal + snapshot.cash - snapshot.debt;
    let intrinsic_value = equity_value / shares;

    let signal = margin.classify(intrinsic_value, snapshot.current_price);
    ModelVerdict::new(
        intrinsic_value,
        signal,
        format!(
            "intrinsic value {:.2} vs price {:.2} ({:+.1}% margin of safety)",
            intrinsic_value,
            snapshot.current_price,
            margin_of_safety(intrinsic_value, snapshot.current_price) * 100.0
        ),
    )
}
