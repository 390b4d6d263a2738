use crate::{margin_of_safety, MarginPolicy};
use serde::{Deserialize, Serialize};
use valuation_core::{FinancialMetricsSnapshot, ModelVerdict};

/// Base P/E Graham assigned a no-growth company.
const BASE_PE: f64 = 8.5;

/// Multiplier on the growth percentage in the revised formula.
const GROWTH_MULTIPLIER: f64 = 2.0;

/// AAA corporate bond yield the 1962 formula was normalized against.
const BASE_AAA_YIELD: f64 = 4.4;

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct GrahamConfig {
    /// Current AAA corporate bond yield, in percent.
    pub aaa_yield: f64,
}

impl Default for GrahamConfig {
    fn default() -> Self {
        Self { aaa_yield: BASE_AAA_YIELD }
    }
}

/// Graham's revised intrinsic value: V = EPS x (8.5 + 2g) x 4.4 / Y,
/// with g the growth rate expressed as a percentage number.
pub fn evaluate(
    snapshot: &FinancialMetricsSnapshot,
    growth_rate: f64,
    config: &GrahamConfig,
    margin: &MarginPolicy,
) -> ModelVerdict {
    if snapshot.eps <= 0.0 {
        return ModelVerdict::not_applicable("earnings per share not positive");
    }
    if config.aaa_yield <= 0.0 {
        return ModelVerdict::not_applicable("AAA yield unavailable");
    }
    if snapshot.current_price <= 0.0 {
        return ModelVerdict::not_applicable("market price unavailable");
    }

    let growth_pct = growth_rate * 100.0;
    let intrinsic_value =
        snapshot.eps * (BASE_PE + GROWTH_MULTIPLIER * growth_pct) * BASE_AAA_YIELD / config.aaa_yield;

    let signal = margin.classify(intrinsic_value, snapshot.current_price);
    ModelVerdict::new(
        intrinsic_value,
        signal,
        format!(
            "Graham value {:.2} vs price {:.2} ({:+.1}% margin of safety)",
            intrinsic_value,
            snapshot.current_price,
            margin_of_safety(intrinsic_value, snapshot.current_price) * 100.0
        ),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use valuation_core::ValuationSignal;

    fn snapshot(eps: f64, price: f64) -> FinancialMetricsSnapshot {
        FinancialMetricsSnapshot {
            ticker: "TEST".to_string(),
            eps,
            current_price: price,
            ..Default::default()
        }
    }

    #[test]
    fn test_graham_formula_fixture() {
        // eps=5, growth 5%: V = 5 x (8.5 + 10) x 4.4 / 4.4 = 92.5.
        let verdict = evaluate(&snapshot(5.0, 92.5), 0.05, &GrahamConfig::default(), &MarginPolicy::default());
        assert_relative_eq!(verdict.value, 92.5, epsilon = 1e-9);
        assert_eq!(verdict.signal, ValuationSignal::Hold);
    }

    #[test]
    fn test_graham_margin_signals() {
        let config = GrahamConfig::default();
        let margin = MarginPolicy::default();

        // Value 92.5 vs price 70: +32% margin.
        assert_eq!(
            evaluate(&snapshot(5.0, 70.0), 0.05, &config, &margin).signal,
            ValuationSignal::Buy
        );
        // Value 92.5 vs price 130: -29% margin.
        assert_eq!(
            evaluate(&snapshot(5.0, 130.0), 0.05, &config, &margin).signal,
            ValuationSignal::Sell
        );
    }

    #[test]
    fn test_graham_yield_normalization() {
        // Doubling the prevailing AAA yield halves the value.
        let margin = MarginPolicy::default();
        let base = evaluate(&snapshot(5.0, 50.0), 0.05, &GrahamConfig::default(), &margin);
        let tight = evaluate(
            &snapshot(5.0, 50.0),
            0.05,
            &GrahamConfig { aaa_yield: 8.8 },
            &margin,
        );
        assert_relative_eq!(tight.value, base.value / 2.0, epsilon = 1e-9);
    }

    #[test]
    fn test_graham_requires_positive_eps() {
        let verdict = evaluate(
            &snapshot(-2.0, 50.0),
            0.05,
            &GrahamConfig::default(),
            &MarginPolicy::default(),
        );
        assert_eq!(verdict.signal, ValuationSignal::NotApplicable);
        assert_eq!(verdict.value, 0.0);
    }
}
