// One monitoring run: fetch, merge, normalize, filter, notify.
use crate::config::AppConfig;
use crate::fetcher::{self, IpoSource};
use crate::filter;
use crate::merger;
use crate::model::{NotifyError, RawValue};
use crate::normalizer;
use crate::notifier::Notifier;
use chrono::NaiveDate;
use tracing::{debug, info};

/// How a run ended. Only a failed notification is an error; empty
/// fetches and empty filter results are ordinary outcomes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    /// The sources returned nothing at all.
    NoData,
    /// Records arrived but none passed the filters.
    NoCandidates,
    /// An alert went out covering this many offerings.
    AlertSent(usize),
}

pub async fn run(
    source: &dyn IpoSource,
    notifier: &dyn Notifier,
    target_date: NaiveDate,
    config: &AppConfig,
) -> Result<RunOutcome, NotifyError> {
    info!("target date: {}", target_date);

    let batches = fetcher::fetch_month(source, target_date).await;
    let records = merger::merge(batches);
    if records.is_empty() {
        info!("no IPO data returned, nothing to do");
        return Ok(RunOutcome::NoData);
    }

    // Dump every pricing date so date matching can be eyeballed in the logs.
    for record in &records {
        debug!(
            "priceddate {} | {}",
            display_or(record.get("priceddate")),
            display_or(record.get("companyname"))
        );
    }

    let ipos = normalizer::normalize_all(&records);
    let candidates = filter::filter_candidates(&ipos, target_date, config.offer_threshold_usd);
    if candidates.is_empty() {
        info!("no same-day IPOs above the offer threshold today, no email sent");
        return Ok(RunOutcome::NoCandidates);
    }

    let labels: Vec<&str> = candidates.iter().map(|ipo| ipo.label.as_str()).collect();
    info!("qualified: {}", labels.join(", "));

    notifier.notify(&candidates, target_date).await?;
    Ok(RunOutcome::AlertSent(candidates.len()))
}

fn display_or(value: Option<&RawValue>) -> String {
    match value {
        Some(value) => value.to_string(),
        None => "?".to_string(),
    }
}
