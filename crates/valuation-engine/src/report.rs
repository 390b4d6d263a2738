use chrono::Utc;
use valuation_core::{
    DecisionRow, FinancialMetricsSnapshot, ModelVerdict, TargetRange, ValuationBundle,
    ValuationMethod, ValuationReportData, ValuationSignal,
};

/// Assemble the structured data the external renderer needs for the
/// fixed report template: decision matrix, tally, recommendation,
/// target range, and the strengths/risks lists. Timestamped here so the
/// pure evaluation path stays reproducible.
pub fn build_report(
    snapshot: &FinancialMetricsSnapshot,
    bundle: &ValuationBundle,
) -> ValuationReportData {
    let rows = decision_rows(bundle);

    let strengths = rows
        .iter()
        .filter(|r| r.signal == ValuationSignal::Buy)
        .map(|r| format!("{}: {}", r.method.label(), r.reason))
        .collect();
    let risks = rows
        .iter()
        .filter(|r| r.signal == ValuationSignal::Sell)
        .map(|r| format!("{}: {}", r.method.label(), r.reason))
        .collect();

    ValuationReportData {
        ticker: bundle.ticker.clone(),
        generated_at: Utc::now(),
        current_price: snapshot.current_price,
        growth_rate: bundle.growth_rate,
        rows,
        tally: bundle.tally,
        final_signal: bundle.final_signal,
        recommendation: bundle.final_recommendation.clone(),
        target_range: target_range(bundle),
        strengths,
        risks,
    }
}

fn row(method: ValuationMethod, verdict: &ModelVerdict) -> DecisionRow {
    DecisionRow {
        method,
        value: verdict.value,
        signal: verdict.signal,
        reason: verdict.reason.clone(),
    }
}

fn decision_rows(bundle: &ValuationBundle) -> Vec<DecisionRow> {
    vec![
        row(ValuationMethod::Dcf, &bundle.dcf),
        row(ValuationMethod::PaybackTime, &bundle.payback_time),
        row(
            ValuationMethod::OwnerEarningsYield,
            &bundle.owner_earnings_yield,
        ),
        row(ValuationMethod::GrahamValue, &bundle.graham),
        DecisionRow {
            method: ValuationMethod::Multiples,
            value: bundle.multiples.pe.value,
            signal: bundle.multiples.signal,
            reason: format!(
                "{} ({}), {} ({})",
                bundle.multiples.pe.reason,
                bundle.multiples.pe.signal.label(),
                bundle.multiples.ev_ebitda.reason,
                bundle.multiples.ev_ebitda.signal.label()
            ),
        },
        row(ValuationMethod::AssetBased, &bundle.asset_based),
        row(ValuationMethod::SumOfTheParts, &bundle.sotp),
        row(ValuationMethod::DividendDiscount, &bundle.ddm),
        DecisionRow {
            method: ValuationMethod::PegRatios,
            value: bundle.peg.average,
            signal: bundle.peg.signal,
            reason: bundle.peg.reason.clone(),
        },
    ]
}

/// Range spanned by the per-share intrinsic estimates that actually
/// produced a signal. The payback, yield, multiples, and PEG figures are
/// not prices, so they stay out of the range.
fn target_range(bundle: &ValuationBundle) -> Option<TargetRange> {
    let estimates: Vec<f64> = [
        &bundle.dcf,
        &bundle.graham,
        &bundle.asset_based,
        &bundle.sotp,
        &bundle.ddm,
    ]
    .into_iter()
    .filter(|v| v.signal != ValuationSignal::NotApplicable && v.value > 0.0)
    .map(|v| v.value)
    .collect();

    let low = estimates.iter().copied().fold(f64::INFINITY, f64::min);
    let high = estimates.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    if estimates.is_empty() {
        None
    } else {
        Some(TargetRange { low, high })
    }
}
