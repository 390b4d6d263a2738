use serde::{Deserialize, Serialize};
use valuation_core::{ValuationMethod, ValuationSignal, VoteTally};

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct AggregatorConfig {
    /// Signal the vote falls back to when no category holds a unique
    /// majority.
    pub tie_break: ValuationSignal,
}

impl Default for AggregatorConfig {
    fn default() -> Self {
        Self {
            tie_break: ValuationSignal::Hold,
        }
    }
}

/// Tallies one vote per model and derives the final recommendation by
/// majority among BUY/HOLD/SELL. N/A votes are counted but sit out the
/// contest.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct SignalAggregator {
    pub config: AggregatorConfig,
}

impl SignalAggregator {
    pub fn new(config: AggregatorConfig) -> Self {
        Self { config }
    }

    pub fn aggregate(
        &self,
        votes: &[(ValuationMethod, ValuationSignal)],
    ) -> (VoteTally, ValuationSignal) {
        let mut tally = VoteTally::default();
        for (_, signal) in votes {
            match signal {
                ValuationSignal::Buy => tally.buy_count += 1,
                ValuationSignal::Hold => tally.hold_count += 1,
                ValuationSignal::Sell => tally.sell_count += 1,
                ValuationSignal::NotApplicable => tally.na_count += 1,
            }
        }

        let contenders = [
            (ValuationSignal::Buy, tally.buy_count),
            (ValuationSignal::Hold, tally.hold_count),
            (ValuationSignal::Sell, tally.sell_count),
        ];
        let top = contenders.iter().map(|(_, n)| *n).max().unwrap_or(0);
        if top == 0 {
            return (tally, ValuationSignal::NotApplicable);
        }

        let leaders: Vec<ValuationSignal> = contenders
            .iter()
            .filter(|(_, n)| *n == top)
            .map(|(s, _)| *s)
            .collect();
        let final_signal = if leaders.len() == 1 {
            leaders[0]
        } else {
            self.config.tie_break
        };

        (tally, final_signal)
    }
}
