use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Normalized financial metrics for one ticker at one point in time.
///
/// Every model reads this snapshot and nothing mutates it after
/// construction. A field the data source could not supply is 0, never
/// null, so each model guards its own divisions instead of unwrapping
/// optionals. Monetary fields are non-negative; `growth_rate` and `eps`
/// may be negative.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FinancialMetricsSnapshot {
    pub ticker: String,
    pub current_price: f64,
    pub shares_outstanding: f64,
    pub market_cap: f64,
    pub enterprise_value: f64,
    pub revenue_ttm: f64,
    pub ebitda_ttm: f64,
    /// TTM earnings in aggregate (eps x shares outstanding).
    pub earnings_ttm: f64,
    pub free_cash_flow_ttm: f64,
    /// Book value per share.
    pub book_value: f64,
    /// Fraction (0.02 = 2%), 0 when no dividend is paid.
    pub dividend_yield: f64,
    /// Forward growth estimate as a fraction, typically from the growth
    /// estimator or an analyst consensus figure.
    pub growth_rate: f64,
    pub beta: f64,
    pub debt: f64,
    pub cash: f64,
    pub pe_ratio: f64,
    pub peg_ratio: f64,
    pub price_to_book: f64,
    pub price_to_sales: f64,
    pub ev_to_ebitda: f64,
    pub eps: f64,
    pub owner_earnings: f64,
}

/// Buffett-style owner earnings: free cash flow when positive, otherwise
/// operating cash flow net of capital expenditure. Used by data
/// collaborators to populate `FinancialMetricsSnapshot::owner_earnings`.
pub fn owner_earnings(
    free_cash_flow: f64,
    operating_cash_flow: f64,
    capital_expenditure: f64,
) -> f64 {
    if free_cash_flow > 0.0 {
        free_cash_flow
    } else {
        operating_cash_flow - capital_expenditure.abs()
    }
}

/// Categorical signal emitted by each valuation model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ValuationSignal {
    #[serde(rename = "BUY")]
    Buy,
    #[serde(rename = "HOLD")]
    Hold,
    #[serde(rename = "SELL")]
    Sell,
    #[serde(rename = "N/A")]
    NotApplicable,
}

impl ValuationSignal {
    pub fn label(&self) -> &'static str {
        match self {
            ValuationSignal::Buy => "BUY",
            ValuationSignal::Hold => "HOLD",
            ValuationSignal::Sell => "SELL",
            ValuationSignal::NotApplicable => "N/A",
        }
    }
}

/// The nine valuation methods, in decision-matrix order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ValuationMethod {
    Dcf,
    PaybackTime,
    OwnerEarningsYield,
    GrahamValue,
    Multiples,
    AssetBased,
    SumOfTheParts,
    DividendDiscount,
    PegRatios,
}

impl ValuationMethod {
    pub const ALL: [ValuationMethod; 9] = [
        ValuationMethod::Dcf,
        ValuationMethod::PaybackTime,
        ValuationMethod::OwnerEarningsYield,
        ValuationMethod::GrahamValue,
        ValuationMethod::Multiples,
        ValuationMethod::AssetBased,
        ValuationMethod::SumOfTheParts,
        ValuationMethod::DividendDiscount,
        ValuationMethod::PegRatios,
    ];

    /// Display label used in the decision-matrix table.
    pub fn label(&self) -> &'static str {
        match self {
            ValuationMethod::Dcf => "DCF",
            ValuationMethod::PaybackTime => "Payback Time",
            ValuationMethod::OwnerEarningsYield => "Owner Earnings Yield",
            ValuationMethod::GrahamValue => "Ben Graham Formula",
            ValuationMethod::Multiples => "Multiples",
            ValuationMethod::AssetBased => "Asset-Based",
            ValuationMethod::SumOfTheParts => "SOTP",
            ValuationMethod::DividendDiscount => "DDM",
            ValuationMethod::PegRatios => "PEG Ratios",
        }
    }
}

/// Per-model output: the computed value, its signal, and a short reason
/// for the report's decision matrix.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelVerdict {
    pub value: f64,
    pub signal: ValuationSignal,
    pub reason: String,
}

impl ModelVerdict {
    pub fn new(value: f64, signal: ValuationSignal, reason: impl Into<String>) -> Self {
        Self {
            value,
            signal,
            reason: reason.into(),
        }
    }

    /// Missing or degenerate input resolves to (0, N/A) for this model
    /// only; nothing propagates.
    pub fn not_applicable(reason: impl Into<String>) -> Self {
        Self {
            value: 0.0,
            signal: ValuationSignal::NotApplicable,
            reason: reason.into(),
        }
    }
}

/// Multiples analysis: independent P/E and EV/EBITDA verdicts plus the
/// rolled-up signal that counts as this model's single vote.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MultiplesVerdict {
    pub pe: ModelVerdict,
    pub ev_ebitda: ModelVerdict,
    pub signal: ValuationSignal,
}

/// Growth-adjusted ratios. A component of 0 marks an unusable ratio
/// (non-positive numerator or non-positive growth) and is excluded from
/// the average.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PegBreakdown {
    pub pe: f64,
    pub ps: f64,
    pub pb: f64,
    pub fcf: f64,
}

impl PegBreakdown {
    pub fn valid(&self) -> impl Iterator<Item = f64> {
        [self.pe, self.ps, self.pb, self.fcf]
            .into_iter()
            .filter(|v| *v > 0.0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PegVerdict {
    pub ratios: PegBreakdown,
    /// Average of the valid components, 0 when none are usable.
    pub average: f64,
    pub signal: ValuationSignal,
    pub reason: String,
}

/// Vote counts across the nine methods.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoteTally {
    pub buy_count: u32,
    pub hold_count: u32,
    pub sell_count: u32,
    pub na_count: u32,
}

/// Everything one analysis run produces: nine verdicts, the growth rate
/// they shared, the vote tally, and the final call. Constructed once per
/// run and handed to the reporting collaborator unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValuationBundle {
    pub ticker: String,
    pub growth_rate: f64,
    pub dcf: ModelVerdict,
    pub payback_time: ModelVerdict,
    pub owner_earnings_yield: ModelVerdict,
    pub graham: ModelVerdict,
    pub multiples: MultiplesVerdict,
    pub asset_based: ModelVerdict,
    pub sotp: ModelVerdict,
    pub ddm: ModelVerdict,
    pub peg: PegVerdict,
    pub tally: VoteTally,
    pub final_signal: ValuationSignal,
    pub final_recommendation: String,
}

impl ValuationBundle {
    /// One (method, rolled-up signal) vote per model, in matrix order.
    pub fn votes(&self) -> [(ValuationMethod, ValuationSignal); 9] {
        [
            (ValuationMethod::Dcf, self.dcf.signal),
            (ValuationMethod::PaybackTime, self.payback_time.signal),
            (
                ValuationMethod::OwnerEarningsYield,
                self.owner_earnings_yield.signal,
            ),
            (ValuationMethod::GrahamValue, self.graham.signal),
            (ValuationMethod::Multiples, self.multiples.signal),
            (ValuationMethod::AssetBased, self.asset_based.signal),
            (ValuationMethod::SumOfTheParts, self.sotp.signal),
            (ValuationMethod::DividendDiscount, self.ddm.signal),
            (ValuationMethod::PegRatios, self.peg.signal),
        ]
    }
}

/// One row of the decision-matrix table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecisionRow {
    pub method: ValuationMethod,
    pub value: f64,
    pub signal: ValuationSignal,
    pub reason: String,
}

/// Range spanned by the positive per-share intrinsic estimates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TargetRange {
    pub low: f64,
    pub high: f64,
}

/// Structured input for the external report renderer. The core computes
/// everything the fixed template needs; rendering and file I/O stay with
/// the collaborator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValuationReportData {
    pub ticker: String,
    pub generated_at: DateTime<Utc>,
    pub current_price: f64,
    pub growth_rate: f64,
    pub rows: Vec<DecisionRow>,
    pub tally: VoteTally,
    pub final_signal: ValuationSignal,
    pub recommendation: String,
    pub target_range: Option<TargetRange>,
    /// Reasons from BUY-voting methods, for the strengths section.
    pub strengths: Vec<String>,
    /// Reasons from SELL-voting methods, for the risks section.
    pub risks: Vec<String>,
}
