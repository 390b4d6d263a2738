use serde::{Deserialize, Serialize};
use valuation_core::{FinancialMetricsSnapshot, ModelVerdict, ValuationSignal};

/// Price-to-book breakpoints. Unlike the intrinsic-value models this one
/// signals off the ratio directly rather than the margin rule.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct AssetConfig {
    pub pb_buy_below: f64,
    pub pb_hold_below: f64,
}

impl Default for AssetConfig {
    fn default() -> Self {
        Self {
            pb_buy_below: 1.0,
            pb_hold_below: 3.0,
        }
    }
}

/// Book value per share, signalled on the price-to-book ratio.
pub fn evaluate(snapshot: &FinancialMetricsSnapshot, config: &AssetConfig) -> ModelVerdict {
    if snapshot.book_value <= 0.0 {
        return ModelVerdict::not_applicable("book value not positive");
    }
    if snapshot.price_to_book <= 0.0 {
        return ModelVerdict::not_applicable("price-to-book ratio unavailable");
    }

    let pb = snapshot.price_to_book;
    let signal = if pb < config.pb_buy_below {
        ValuationSignal::Buy
    } else if pb < config.pb_hold_below {
        ValuationSignal::Hold
    } else {
        ValuationSignal::Sell
    };
    ModelVerdict::new(
        snapshot.book_value,
        signal,
        format!("book value {:.2} per share at {:.2}x book", snapshot.book_value, pb),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot(book_value: f64, price_to_book: f64) -> FinancialMetricsSnapshot {
        FinancialMetricsSnapshot {
            ticker: "TEST".to_string(),
            book_value,
            price_to_book,
            ..Default::default()
        }
    }

    #[test]
    fn test_pb_breakpoints() {
        let config = AssetConfig::default();

        assert_eq!(evaluate(&snapshot(50.0, 0.8), &config).signal, ValuationSignal::Buy);
        assert_eq!(evaluate(&snapshot(50.0, 1.0), &config).signal, ValuationSignal::Hold);
        assert_eq!(evaluate(&snapshot(50.0, 2.9), &config).signal, ValuationSignal::Hold);
        assert_eq!(evaluate(&snapshot(50.0, 3.0), &config).signal, ValuationSignal::Sell);
    }

    #[test]
    fn test_value_is_book_value_per_share() {
        let verdict = evaluate(&snapshot(42.5, 1.5), &AssetConfig::default());
        assert_eq!(verdict.value, 42.5);
    }

    #[test]
    fn test_requires_positive_book_value_and_ratio() {
        let config = AssetConfig::default();

        assert_eq!(
            evaluate(&snapshot(0.0, 1.5), &config).signal,
            ValuationSignal::NotApplicable
        );
        assert_eq!(
            evaluate(&snapshot(50.0, 0.0), &config).signal,
            ValuationSignal::NotApplicable
        );
    }
}
