use serde::{Deserialize, Serialize};
use valuation_core::{FinancialMetricsSnapshot, ModelVerdict, ValuationSignal};

/// Payback-time breakpoints, in years.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PaybackConfig {
    pub buy_years: u32,
    pub hold_years: u32,
    /// Simulation cap; not recovering within this horizon is treated as
    /// unrecoverable.
    pub max_years: u32,
}

impl Default for PaybackConfig {
    fn default() -> Self {
        Self {
            buy_years: 10,
            hold_years: 20,
            max_years: 100,
        }
    }
}

/// Years of compounded owner earnings needed to earn back the market
/// cap. Growth is applied before each year's accrual, so year one
/// already earns at the grown rate.
pub fn evaluate(
    snapshot: &FinancialMetricsSnapshot,
    growth_rate: f64,
    config: &PaybackConfig,
) -> ModelVerdict {
    let owner_earnings = snapshot.owner_earnings;
    let market_cap = snapshot.market_cap;

    if owner_earnings <= 0.0 {
        return ModelVerdict::not_applicable("owner earnings not positive");
    }
    if market_cap <= 0.0 {
        return ModelVerdict::not_applicable("market cap unavailable");
    }

    let mut cumulative = 0.0;
    let mut current = owner_earnings;
    let mut years = 0u32;
    while cumulative < market_cap && years < config.max_years {
        years += 1;
        current *= 1.0 + growth_rate;
        cumulative += current;
    }

    if cumulative < market_cap {
        return ModelVerdict::new(
            config.max_years as f64,
            ValuationSignal::Sell,
            format!("market cap not recovered within {} years", config.max_years),
        );
    }

    let signal = if years <= config.buy_years {
        ValuationSignal::Buy
    } else if years <= config.hold_years {
        ValuationSignal::Hold
    } else {
        ValuationSignal::Sell
    };
    ModelVerdict::new(
        years as f64,
        signal,
        format!(
            "{} years to earn back market cap at {:.1}% growth",
            years,
            growth_rate * 100.0
        ),
    )
}
