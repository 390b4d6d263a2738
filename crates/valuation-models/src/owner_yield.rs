use serde::{Deserialize, Serialize};
use valuation_core::{FinancialMetricsSnapshot, ModelVerdict, ValuationSignal};

/// Owner-earnings-yield breakpoints, in percent. The 10% BUY line is
/// the classic ten-cap rule.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct OwnerYieldConfig {
    pub buy_yield_pct: f64,
    pub hold_yield_pct: f64,
}

impl Default for OwnerYieldConfig {
    fn default() -> Self {
        Self {
            buy_yield_pct: 10.0,
            hold_yield_pct: 5.0,
        }
    }
}

/// Owner earnings as a percentage of market cap.
pub fn evaluate(snapshot: &FinancialMetricsSnapshot, config: &OwnerYieldConfig) -> ModelVerdict {
    if snapshot.market_cap <= 0.0 {
        return ModelVerdict::not_applicable("market cap unavailable");
    }

    let yield_pct = snapshot.owner_earnings / snapshot.market_cap * 100.0;
    let signal = if yield_pct >= config.buy_yield_pct {
        ValuationSignal::Buy
    } else if yield_pct >= config.hold_yield_pct {
        ValuationSignal::Hold
    } else {
        ValuationSignal::Sell
    };
    ModelVerdict::new(
        yield_pct,
        signal,
        format!("owner earnings yield {:.1}% of market cap", yield_pct),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn snapshot(owner_earnings: f64, market_cap: f64) -> FinancialMetricsSnapshot {
        FinancialMetricsSnapshot {
            ticker: "TEST".to_string(),
            owner_earnings,
            market_cap,
            ..Default::default()
        }
    }

    #[test]
    fn test_ten_cap_buy() {
        let verdict = evaluate(&snapshot(12.0, 100.0), &OwnerYieldConfig::default());
        assert_relative_eq!(verdict.value, 12.0, epsilon = 1e-9);
        assert_eq!(verdict.signal, ValuationSignal::Buy);
    }

    #[test]
    fn test_yield_breakpoints_are_inclusive() {
        let config = OwnerYieldConfig::default();

        assert_eq!(evaluate(&snapshot(10.0, 100.0), &config).signal, ValuationSignal::Buy);
        assert_eq!(evaluate(&snapshot(5.0, 100.0), &config).signal, ValuationSignal::Hold);
        assert_eq!(evaluate(&snapshot(4.9, 100.0), &config).signal, ValuationSignal::Sell);
    }

    #[test]
    fn test_negative_owner_earnings_is_a_sell_not_na() {
        // The yield is computable, it is just terrible.
        let verdict = evaluate(&snapshot(-8.0, 100.0), &OwnerYieldConfig::default());
        assert_relative_eq!(verdict.value, -8.0, epsilon = 1e-9);
        assert_eq!(verdict.signal, ValuationSignal::Sell);
    }

    #[test]
    fn test_requires_market_cap() {
        let verdict = evaluate(&snapshot(10.0, 0.0), &OwnerYieldConfig::default());
        assert_eq!(verdict.signal, ValuationSignal::NotApplicable);
        assert_eq!(verdict.value, 0.0);
    }
}
