use serde::{Deserialize, Serialize};
use valuation_core::{FinancialMetricsSnapshot, PegBreakdown, PegVerdict, ValuationSignal};

/// Breakpoints on the average growth-adjusted ratio.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PegConfig {
    pub buy_below: f64,
    pub hold_below: f64,
}

impl Default for PegConfig {
    fn default() -> Self {
        Self {
            buy_below: 1.0,
            hold_below: 2.0,
        }
    }
}

fn component(ratio: f64, growth_pct: f64) -> f64 {
    if ratio > 0.0 && growth_pct > 0.0 {
        ratio / growth_pct
    } else {
        0.0
    }
}

/// Growth-adjusted P/E, P/S, P/B, and P/FCF, averaged over whichever
/// components are usable.
pub fn evaluate(
    snapshot: &FinancialMetricsSnapshot,
    growth_rate: f64,
    config: &PegConfig,
) -> PegVerdict {
    let growth_pct = growth_rate * 100.0;

    let p_fcf = if snapshot.market_cap > 0.0 && snapshot.free_cash_flow_ttm > 0.0 {
        snapshot.market_cap / snapshot.free_cash_flow_ttm
    } else {
        0.0
    };

    let ratios = PegBreakdown {
        pe: component(snapshot.pe_ratio, growth_pct),
        ps: component(snapshot.price_to_sales, growth_pct),
        pb: component(snapshot.price_to_book, growth_pct),
        fcf: component(p_fcf, growth_pct),
    };

    let valid: Vec<f64> = ratios.valid().collect();
    if valid.is_empty() {
        return PegVerdict {
            ratios,
            average: 0.0,
            signal: ValuationSignal::NotApplicable,
            reason: "no usable growth-adjusted ratios".to_string(),
        };
    }

    let average = valid.iter().sum::<f64>() / valid.len() as f64;
    let signal = if average < config.buy_below {
        ValuationSignal::Buy
    } else if average < config.hold_below {
        ValuationSignal::Hold
    } else {
        ValuationSignal::Sell
    };

    PegVerdict {
        ratios,
        average,
        signal,
        reason: format!(
            "average PEG {:.2} across {} usable ratio(s)",
            average,
            valid.len()
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn snapshot() -> FinancialMetricsSnapshot {
        FinancialMetricsSnapshot {
            ticker: "TEST".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_single_valid_component_sets_the_average() {
        let mut snap = snapshot();
        snap.pe_ratio = 20.0;

        // PEG = 20 / 5 = 4.0; only component, so it is the average.
        let verdict = evaluate(&snap, 0.05, &PegConfig::default());
        assert_relative_eq!(verdict.ratios.pe, 4.0, epsilon = 1e-9);
        assert_eq!(verdict.ratios.ps, 0.0);
        assert_relative_eq!(verdict.average, 4.0, epsilon = 1e-9);
        assert_eq!(verdict.signal, ValuationSignal::Sell);
    }

    #[test]
    fn test_average_over_valid_components_only() {
        let mut snap = snapshot();
        snap.pe_ratio = 10.0;
        snap.price_to_sales = 5.0;
        snap.price_to_book = -2.0; // invalid, excluded

        let verdict = evaluate(&snap, 0.05, &PegConfig::default());
        // (2.0 + 1.0) / 2
        assert_relative_eq!(verdict.average, 1.5, epsilon = 1e-9);
        assert_eq!(verdict.signal, ValuationSignal::Hold);
    }

    #[test]
    fn test_price_to_fcf_component() {
        let mut snap = snapshot();
        snap.market_cap = 400.0;
        snap.free_cash_flow_ttm = 40.0;

        // P/FCF = 10, PEG = 10 / 10 = 1.0.
        let verdict = evaluate(&snap, 0.10, &PegConfig::default());
        assert_relative_eq!(verdict.ratios.fcf, 1.0, epsilon = 1e-9);
        assert_eq!(verdict.signal, ValuationSignal::Hold);
    }

    #[test]
    fn test_cheap_growth_is_a_buy() {
        let mut snap = snapshot();
        snap.pe_ratio = 12.0;

        // PEG = 12 / 15 = 0.8.
        let verdict = evaluate(&snap, 0.15, &PegConfig::default());
        assert_relative_eq!(verdict.average, 0.8, epsilon = 1e-9);
        assert_eq!(verdict.signal, ValuationSignal::Buy);
    }

    #[test]
    fn test_no_valid_components_is_na() {
        let verdict = evaluate(&snapshot(), 0.05, &PegConfig::default());
        assert_eq!(verdict.signal, ValuationSignal::NotApplicable);
        assert_eq!(verdict.average, 0.0);

        // Valid ratios but no growth to adjust by.
        let mut snap = snapshot();
        snap.pe_ratio = 20.0;
        let verdict = evaluate(&snap, 0.0, &PegConfig::default());
        assert_eq!(verdict.signal, ValuationSignal::NotApplicable);
    }
}
