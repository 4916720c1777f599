pub mod nasdaq;

pub use nasdaq::NasdaqSource;

use crate::model::{FetchError, RawRecord};
use chrono::NaiveDate;
use tracing::{info, warn};

/// Which slice of the monthly calendar to ask for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IpoQuery {
    /// Scheduled offerings that have not priced yet.
    Upcoming,
    /// Offerings already priced this month.
    Priced,
}

impl IpoQuery {
    fn describe(self) -> &'static str {
        match self {
            IpoQuery::Upcoming => "upcoming",
            IpoQuery::Priced => "priced",
        }
    }
}

#[async_trait::async_trait]
pub trait IpoSource: Send + Sync {
    async fn fetch(&self, query: IpoQuery, month: NaiveDate) -> Result<Vec<RawRecord>, FetchError>;
}

/// Pulls both calendar slices for the month containing `target_date`.
/// A failed or empty query is logged and skipped; whatever else arrived
/// still flows downstream, so one bad call never kills the run.
pub async fn fetch_month(source: &dyn IpoSource, target_date: NaiveDate) -> Vec<Vec<RawRecord>> {
    info!("fetching IPO calendar from NASDAQ...");

    let mut batches = Vec::new();
    for query in [IpoQuery::Upcoming, IpoQuery::Priced] {
        match source.fetch(query, target_date).await {
            Ok(records) if !records.is_empty() => {
                info!("{} {} IPO(s) this month", records.len(), query.describe());
                batches.push(records);
            }
            Ok(_) => info!("no {} IPOs this month", query.describe()),
            Err(e) => warn!("could not fetch {} IPOs: {}", query.describe(), e),
        }
    }
    batches
}
