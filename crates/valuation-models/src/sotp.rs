use crate::{margin_of_safety, MarginPolicy};
use valuation_core::{FinancialMetricsSnapshot, ModelVerdict};

/// Simplified sum-of-the-parts: enterprise value adjusted for net cash,
/// per share. A true SOTP needs segment-level data the snapshot does not
/// carry, so the enterprise value stands in for the sum of the segments.
pub fn evaluate(snapshot: &FinancialMetricsSnapshot, margin: &MarginPolicy) -> ModelVerdict {
    if snapshot.enterprise_value <= 0.0 || snapshot.shares_outstanding <= 0.0 {
        return ModelVerdict::not_applicable("enterprise value or share count unavailable");
    }
    if snapshot.current_price <= 0.0 {
        return ModelVerdict::not_applicable("market price unavailable");
    }

    let sotp_value = (snapshot.enterprise_value + snapshot.cash - snapshot.debt)
        / snapshot.shares_outstanding;

    let signal = margin.classify(sotp_value, snapshot.current_price);
    ModelVerdict::new(
        sotp_value,
        signal,
        format!(
            "parts worth {:.2} per share vs price {:.2} ({:+.1}% margin of safety)",
            sotp_value,
            snapshot.current_price,
            margin_of_safety(sotp_value, snapshot.current_price) * 100.0
        ),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use valuation_core::ValuationSignal;

    fn snapshot(ev: f64, cash: f64, debt: f64, shares: f64, price: f64) -> FinancialMetricsSnapshot {
        FinancialMetricsSnapshot {
            ticker: "TEST".to_string(),
            enterprise_value: ev,
            cash,
            debt,
            shares_outstanding: shares,
            current_price: price,
            ..Default::default()
        }
    }

    #[test]
    fn test_sotp_value_per_share() {
        let margin = MarginPolicy::default();

        // (1000 + 200 - 300) / 10 = 90 per share against a price of 60.
        let verdict = evaluate(&snapshot(1000.0, 200.0, 300.0, 10.0, 60.0), &margin);
        assert_relative_eq!(verdict.value, 90.0, epsilon = 1e-9);
        assert_eq!(verdict.signal, ValuationSignal::Buy);
    }

    #[test]
    fn test_sotp_margin_rule() {
        let margin = MarginPolicy::default();

        // 90 per share vs 90 price: HOLD band.
        let hold = evaluate(&snapshot(1000.0, 200.0, 300.0, 10.0, 90.0), &margin);
        assert_eq!(hold.signal, ValuationSignal::Hold);

        // 90 per share vs 150 price: -40% margin.
        let sell = evaluate(&snapshot(1000.0, 200.0, 300.0, 10.0, 150.0), &margin);
        assert_eq!(sell.signal, ValuationSignal::Sell);
    }

    #[test]
    fn test_sotp_requires_enterprise_value_and_shares() {
        let margin = MarginPolicy::default();

        assert_eq!(
            evaluate(&snapshot(0.0, 0.0, 0.0, 10.0, 50.0), &margin).signal,
            ValuationSignal::NotApplicable
        );
        assert_eq!(
            evaluate(&snapshot(1000.0, 0.0, 0.0, 0.0, 50.0), &margin).signal,
            ValuationSignal::NotApplicable
        );
    }
}
