pub mod email;

pub use email::EmailNotifier;

use crate::model::{Ipo, NotifyError};
use chrono::NaiveDate;

#[async_trait::async_trait]
pub trait Notifier: Send + Sync {
    async fn notify(&self, ipos: &[Ipo], report_date: NaiveDate) -> Result<(), NotifyError>;
}
