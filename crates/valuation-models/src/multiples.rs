use serde::{Deserialize, Serialize};
use valuation_core::{FinancialMetricsSnapshot, ModelVerdict, MultiplesVerdict, ValuationSignal};

/// Threshold tables for the two multiples, evaluated independently.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct MultiplesConfig {
    pub pe_buy_below: f64,
    pub pe_sell_above: f64,
    pub ev_ebitda_buy_below: f64,
    pub ev_ebitda_sell_above: f64,
}

impl Default for MultiplesConfig {
    fn default() -> Self {
        Self {
            pe_buy_below: 15.0,
            pe_sell_above: 25.0,
            ev_ebitda_buy_below: 10.0,
            ev_ebitda_sell_above: 15.0,
        }
    }
}

fn classify_ratio(name: &str, ratio: f64, buy_below: f64, sell_above: f64) -> ModelVerdict {
    if ratio <= 0.0 {
        return ModelVerdict::not_applicable(format!("{name} unavailable"));
    }

    let signal = if ratio < buy_below {
        ValuationSignal::Buy
    } else if ratio > sell_above {
        ValuationSignal::Sell
    } else {
        ValuationSignal::Hold
    };
    ModelVerdict::new(ratio, signal, format!("{name} of {ratio:.1}"))
}

/// Roll the two sub-signals into this model's single vote: agreement
/// wins, a lone usable sub-signal wins, disagreement is a HOLD.
fn roll_up(pe: ValuationSignal, ev_ebitda: ValuationSignal) -> ValuationSignal {
    match (pe, ev_ebitda) {
        (ValuationSignal::NotApplicable, ValuationSignal::NotApplicable) => {
            ValuationSignal::NotApplicable
        }
        (ValuationSignal::NotApplicable, s) | (s, ValuationSignal::NotApplicable) => s,
        (a, b) if a == b => a,
        _ => ValuationSignal::Hold,
    }
}

pub fn evaluate(snapshot: &FinancialMetricsSnapshot, config: &MultiplesConfig) -> MultiplesVerdict {
    let pe = classify_ratio(
        "P/E",
        snapshot.pe_ratio,
        config.pe_buy_below,
        config.pe_sell_above,
    );
    let ev_ebitda = classify_ratio(
        "EV/EBITDA",
        snapshot.ev_to_ebitda,
        config.ev_ebitda_buy_below,
        config.ev_ebitda_sell_above,
    );
    let signal = roll_up(pe.signal, ev_ebitda.signal);

    MultiplesVerdict {
        pe,
        ev_ebitda,
        signal,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot(pe_ratio: f64, ev_to_ebitda: f64) -> FinancialMetricsSnapshot {
        FinancialMetricsSnapshot {
            ticker: "TEST".to_string(),
            pe_ratio,
            ev_to_ebitda,
            ..Default::default()
        }
    }

    #[test]
    fn test_pe_threshold_table() {
        let config = MultiplesConfig::default();

        assert_eq!(evaluate(&snapshot(14.9, 0.0), &config).pe.signal, ValuationSignal::Buy);
        assert_eq!(evaluate(&snapshot(15.0, 0.0), &config).pe.signal, ValuationSignal::Hold);
        assert_eq!(evaluate(&snapshot(25.0, 0.0), &config).pe.signal, ValuationSignal::Hold);
        assert_eq!(evaluate(&snapshot(25.1, 0.0), &config).pe.signal, ValuationSignal::Sell);
    }

    #[test]
    fn test_ev_ebitda_threshold_table() {
        let config = MultiplesConfig::default();

        assert_eq!(
            evaluate(&snapshot(0.0, 9.0), &config).ev_ebitda.signal,
            ValuationSignal::Buy
        );
        assert_eq!(
            evaluate(&snapshot(0.0, 12.0), &config).ev_ebitda.signal,
            ValuationSignal::Hold
        );
        assert_eq!(
            evaluate(&snapshot(0.0, 16.0), &config).ev_ebitda.signal,
            ValuationSignal::Sell
        );
    }

    #[test]
    fn test_non_positive_ratios_are_na() {
        let config = MultiplesConfig::default();
        let verdict = evaluate(&snapshot(-5.0, 0.0), &config);

        assert_eq!(verdict.pe.signal, ValuationSignal::NotApplicable);
        assert_eq!(verdict.ev_ebitda.signal, ValuationSignal::NotApplicable);
        assert_eq!(verdict.signal, ValuationSignal::NotApplicable);
    }

    #[test]
    fn test_rollup_policy() {
        let config = MultiplesConfig::default();

        // Agreement carries through.
        assert_eq!(evaluate(&snapshot(10.0, 8.0), &config).signal, ValuationSignal::Buy);
        // A lone valid sub-signal decides.
        assert_eq!(evaluate(&snapshot(10.0, 0.0), &config).signal, ValuationSignal::Buy);
        // Disagreement rolls up to HOLD.
        assert_eq!(evaluate(&snapshot(10.0, 16.0), &config).signal, ValuationSignal::Hold);
    }
}
