//! Deterministic valuation pipeline: run the nine models over one
//! snapshot, tally their signals, and assemble the report data bundle.
//! The snapshot arrives through the `SnapshotProvider` seam; nothing in
//! here performs I/O of its own.

use growth_estimator::GrowthEstimator;
use serde::{Deserialize, Serialize};
use valuation_core::{
    FinancialMetricsSnapshot, SnapshotProvider, ValuationBundle, ValuationError,
    ValuationReportData, ValuationSignal, VoteTally,
};
use valuation_models::{
    asset_based, dcf, ddm, graham, multiples, owner_yield, payback, peg, sotp, AssetConfig,
    DcfConfig, DdmConfig, GrahamConfig, MarginPolicy, MultiplesConfig, OwnerYieldConfig,
    PaybackConfig, PegConfig,
};

pub mod aggregator;
pub mod report;

pub use aggregator::{AggregatorConfig, SignalAggregator};
pub use report::build_report;

/// Every tunable in the system, bundled. Each model call takes its
/// piece of this explicitly; there is no module-level state to reach
/// around it.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct EngineConfig {
    pub margin: MarginPolicy,
    pub dcf: DcfConfig,
    pub payback: PaybackConfig,
    pub owner_yield: OwnerYieldConfig,
    pub graham: GrahamConfig,
    pub multiples: MultiplesConfig,
    pub asset: AssetConfig,
    pub ddm: DdmConfig,
    pub peg: PegConfig,
    pub aggregator: AggregatorConfig,
    pub growth: GrowthEstimator,
}

pub struct ValuationEngine {
    config: EngineConfig,
}

impl ValuationEngine {
    pub fn new() -> Self {
        Self::with_config(EngineConfig::default())
    }

    pub fn with_config(config: EngineConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Run all nine models with the growth rate carried on the
    /// snapshot. Pure and reproducible: the same snapshot always yields
    /// the same bundle.
    pub fn evaluate(&self, snapshot: &FinancialMetricsSnapshot) -> ValuationBundle {
        self.evaluate_with_growth(snapshot, snapshot.growth_rate)
    }

    /// Same as [`evaluate`](Self::evaluate) with an externally
    /// estimated growth rate.
    pub fn evaluate_with_growth(
        &self,
        snapshot: &FinancialMetricsSnapshot,
        growth_rate: f64,
    ) -> ValuationBundle {
        tracing::debug!(
            "running valuation models for {} at {:.1}% growth",
            snapshot.ticker,
            growth_rate * 100.0
        );
        let c = &self.config;

        let dcf = dcf::evaluate(snapshot, growth_rate, &c.dcf, &c.margin);
        let payback_time = payback::evaluate(snapshot, growth_rate, &c.payback);
        let owner_earnings_yield = owner_yield::evaluate(snapshot, &c.owner_yield);
        let graham = graham::evaluate(snapshot, growth_rate, &c.graham, &c.margin);
        let multiples = multiples::evaluate(snapshot, &c.multiples);
        let asset_based = asset_based::evaluate(snapshot, &c.asset);
        let sotp = sotp::evaluate(snapshot, &c.margin);
        let ddm = ddm::evaluate(snapshot, growth_rate, &c.ddm, &c.margin);
        let peg = peg::evaluate(snapshot, growth_rate, &c.peg);

        let mut bundle = ValuationBundle {
            ticker: snapshot.ticker.clone(),
            growth_rate,
            dcf,
            payback_time,
            owner_earnings_yield,
            graham,
            multiples,
            asset_based,
            sotp,
            ddm,
            peg,
            tally: VoteTally::default(),
            final_signal: ValuationSignal::NotApplicable,
            final_recommendation: String::new(),
        };

        let (tally, final_signal) =
            SignalAggregator::new(c.aggregator).aggregate(&bundle.votes());
        bundle.tally = tally;
        bundle.final_signal = final_signal;
        bundle.final_recommendation = recommendation(final_signal, &tally);
        bundle
    }

    /// Full pipeline behind the provider seam: fetch the snapshot and
    /// revenue history, estimate growth, evaluate, and assemble the
    /// report data. A missing revenue history is fail-soft; a missing
    /// snapshot is not.
    pub async fn analyze(
        &self,
        provider: &dyn SnapshotProvider,
        ticker: &str,
    ) -> Result<ValuationReportData, ValuationError> {
        tracing::info!("starting valuation analysis for {ticker}");

        let snapshot = provider.fetch_snapshot(ticker).await?;
        let revenues = match provider.fetch_annual_revenues(ticker).await {
            Ok(revenues) => revenues,
            Err(e) => {
                tracing::warn!("revenue history unavailable for {ticker}: {e}");
                Vec::new()
            }
        };

        let analyst_estimate = (snapshot.growth_rate > 0.0).then_some(snapshot.growth_rate);
        let growth_rate = self.config.growth.estimate(&revenues, analyst_estimate);

        let bundle = self.evaluate_with_growth(&snapshot, growth_rate);
        tracing::info!(
            "{ticker}: {} (buy {}, hold {}, sell {}, n/a {})",
            bundle.final_recommendation,
            bundle.tally.buy_count,
            bundle.tally.hold_count,
            bundle.tally.sell_count,
            bundle.tally.na_count
        );

        Ok(report::build_report(&snapshot, &bundle))
    }
}

impl Default for ValuationEngine {
    fn default() -> Self {
        Self::new()
    }
}

fn recommendation(final_signal: ValuationSignal, tally: &VoteTally) -> String {
    let countable = tally.buy_count + tally.hold_count + tally.sell_count;
    match final_signal {
        ValuationSignal::NotApplicable => {
            "N/A - no method produced a usable signal".to_string()
        }
        signal => {
            let supporting = match signal {
                ValuationSignal::Buy => tally.buy_count,
                ValuationSignal::Hold => tally.hold_count,
                ValuationSignal::Sell => tally.sell_count,
                ValuationSignal::NotApplicable => 0,
            };
            format!("{} ({} of {} methods)", signal.label(), supporting, countable)
        }
    }
}
