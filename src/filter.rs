// Candidate filter: same-day pricing and a strict dollar threshold.
use crate::model::Ipo;
use crate::utils::format_thousands;
use chrono::NaiveDate;
use tracing::info;

/// Keeps offerings priced exactly on `target_date` whose deal size is
/// strictly above `threshold_usd`. Records without a pricing date never
/// qualify. Input order is preserved.
pub fn filter_candidates(ipos: &[Ipo], target_date: NaiveDate, threshold_usd: f64) -> Vec<Ipo> {
    let candidates: Vec<Ipo> = ipos
        .iter()
        .filter(|ipo| ipo.pricing_date == Some(target_date))
        .filter(|ipo| ipo.offer_amount > threshold_usd)
        .cloned()
        .collect();

    info!(
        "{} IPO(s) passed filters (date={}, threshold=${})",
        candidates.len(),
        target_date,
        format_thousands(threshold_usd)
    );
    candidates
}
