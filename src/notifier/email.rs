// Email alerts over Gmail SMTP (port 587, STARTTLS).
use crate::config::AppConfig;
use crate::model::{Ipo, NotifyError, PLACEHOLDER};
use crate::notifier::Notifier;
use crate::utils::format_thousands;
use chrono::NaiveDate;
use lettre::message::{Mailbox, MultiPart};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use std::time::Duration;
use tracing::info;

const SMTP_HOST: &str = "smtp.gmail.com";
const SEND_TIMEOUT: Duration = Duration::from_secs(15);

pub struct EmailNotifier {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    sender: Mailbox,
    recipients: Vec<Mailbox>,
    threshold_usd: f64,
}

impl EmailNotifier {
    /// Builds the SMTP transport and parses all addresses up front, so a
    /// bad configuration fails at startup instead of at send time.
    pub fn new(config: &AppConfig) -> Result<Self, NotifyError> {
        let sender: Mailbox = config.sender_email.parse()?;
        let recipients = config
            .recipients
            .iter()
            .map(|address| address.parse())
            .collect::<Result<Vec<Mailbox>, _>>()?;

        let credentials = Credentials::new(
            config.sender_email.clone(),
            config.sender_app_password.clone(),
        );
        let transport = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(SMTP_HOST)?
            .credentials(credentials)
            .timeout(Some(SEND_TIMEOUT))
            .build();

        Ok(Self {
            transport,
            sender,
            recipients,
            threshold_usd: config.offer_threshold_usd,
        })
    }

    fn subject(&self, ipos: &[Ipo], report_date: NaiveDate) -> String {
        format!(
            "IPO Alert! ⚠️ – {} – {} ticker(s) above ${}M",
            report_date,
            ipos.len(),
            threshold_millions_label(self.threshold_usd)
        )
    }

    fn plain_body(&self, ipos: &[Ipo], report_date: NaiveDate) -> String {
        let tickers: Vec<&str> = ipos.iter().map(|ipo| ipo.label.as_str()).collect();
        format!(
            "IPO Alert – {}\n\nTickers with offer amount > ${}M today: {}\n\nSee HTML version for full details.",
            report_date,
            threshold_millions_label(self.threshold_usd),
            tickers.join(", ")
        )
    }

    fn html_body(&self, ipos: &[Ipo], report_date: NaiveDate) -> String {
        let mut rows = String::new();
        for ipo in ipos {
            rows.push_str(&render_row(ipo));
        }

        format!(
            r#"<!DOCTYPE html>
<html>
<body style="font-family:'Segoe UI', Arial, sans-serif; background:#f1f5f9; padding:30px;">
  <div style="max-width:720px; margin:0 auto; background:#fff; border-radius:12px;
              box-shadow:0 2px 12px rgba(0,0,0,0.08); overflow:hidden;">
    <div style="background:linear-gradient(135deg,#0f172a,#1e293b); padding:28px 32px;">
      <h1 style="margin:0; color:#f8fafc; font-size:22px; font-weight:700;">
        📈 IPO Alert — {header_date}
      </h1>
      <p style="margin:6px 0 0; color:#94a3b8; font-size:14px;">
        U.S. IPOs pricing today with offer amount &gt; ${threshold}M
      </p>
    </div>
    <div style="padding:24px 28px;">
      <table style="width:100%; border-collapse:collapse; font-size:14px;">
        <thead>
          <tr style="border-bottom:2px solid #e2e8f0;">
            <th style="text-align:left; padding:10px 14px; color:#64748b; font-weight:600;">Ticker</th>
            <th style="text-align:left; padding:10px 14px; color:#64748b; font-weight:600;">Company</th>
            <th style="text-align:left; padding:10px 14px; color:#64748b; font-weight:600;">IPO Price</th>
            <th style="text-align:left; padding:10px 14px; color:#64748b; font-weight:600;">Shares</th>
            <th style="text-align:left; padding:10px 14px; color:#64748b; font-weight:600;">Offer Amount</th>
            <th style="text-align:left; padding:10px 14px; color:#64748b; font-weight:600;">Exchange</th>
          </tr>
        </thead>
        <tbody>{rows}
        </tbody>
      </table>
    </div>
    <div style="padding:20px 28px 28px; border-top:1px solid #e2e8f0;">
      <p style="margin:0; color:#94a3b8; font-size:12px;">
        Data source: Nasdaq.com &nbsp;|&nbsp; Sent automatically by ipo-monitor
      </p>
    </div>
  </div>
</body>
</html>"#,
            header_date = report_date.format("%A, %B %d, %Y"),
            threshold = threshold_millions_label(self.threshold_usd),
            rows = rows,
        )
    }
}

#[async_trait::async_trait]
impl Notifier for EmailNotifier {
    async fn notify(&self, ipos: &[Ipo], report_date: NaiveDate) -> Result<(), NotifyError> {
        let mut builder = Message::builder()
            .from(self.sender.clone())
            .subject(self.subject(ipos, report_date));
        for recipient in &self.recipients {
            builder = builder.to(recipient.clone());
        }
        let message = builder.multipart(MultiPart::alternative_plain_html(
            self.plain_body(ipos, report_date),
            self.html_body(ipos, report_date),
        ))?;

        self.transport.send(message).await?;

        let recipients: Vec<String> = self.recipients.iter().map(ToString::to_string).collect();
        info!("alert sent to {} ✓", recipients.join(", "));
        Ok(())
    }
}

fn render_row(ipo: &Ipo) -> String {
    let price = match ipo.price {
        Some(price) => format!("${:.2}", price),
        None => PLACEHOLDER.to_string(),
    };
    let shares = match ipo.shares {
        Some(shares) => format_thousands(shares),
        None => PLACEHOLDER.to_string(),
    };

    format!(
        r#"
        <tr>
          <td style="padding:10px 14px; font-weight:700; color:#0f172a;">{label}</td>
          <td style="padding:10px 14px; color:#334155;">{company}</td>
          <td style="padding:10px 14px; color:#334155;">{price}</td>
          <td style="padding:10px 14px; color:#334155;">{shares}</td>
          <td style="padding:10px 14px; font-weight:600; color:#16a34a;">${offer}M</td>
          <td style="padding:10px 14px; color:#334155;">{exchange}</td>
        </tr>"#,
        label = ipo.label,
        company = ipo.company,
        price = price,
        shares = shares,
        offer = format_millions(ipo.offer_amount),
        exchange = ipo.exchange,
    )
}

/// Renders a dollar amount in millions with one decimal place and
/// thousands grouping, e.g. 1234500000.0 -> "1,234.5".
fn format_millions(usd: f64) -> String {
    let tenths = (usd / 100_000.0).round() as i64;
    format!(
        "{}.{}",
        format_thousands((tenths / 10) as f64),
        (tenths % 10).abs()
    )
}

/// Threshold for subject lines and headers, in millions: whole values
/// drop the decimals, fractional ones keep them.
fn threshold_millions_label(threshold_usd: f64) -> String {
    let millions = threshold_usd / 1_000_000.0;
    if millions.fract() == 0.0 {
        format_thousands(millions)
    } else {
        format!("{}", millions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(recipient: &str) -> AppConfig {
        AppConfig {
            sender_email: "alerts@example.com".to_string(),
            sender_app_password: "app-password".to_string(),
            recipients: vec![recipient.to_string()],
            offer_threshold_usd: 200_000_000.0,
        }
    }

    fn sample_ipo() -> Ipo {
        Ipo {
            label: "Acme Corp".to_string(),
            company: "Acme Corp".to_string(),
            price: Some(25.0),
            shares: Some(12_000_000.0),
            offer_amount: 300_000_000.0,
            exchange: "NASDAQ".to_string(),
            pricing_date: NaiveDate::from_ymd_opt(2026, 1, 29),
        }
    }

    #[test]
    fn millions_render_with_one_decimal() {
        assert_eq!(format_millions(300_000_000.0), "300.0");
        assert_eq!(format_millions(1_234_500_000.0), "1,234.5");
        assert_eq!(format_millions(250_550_000.0), "250.6");
    }

    #[test]
    fn threshold_label_drops_trailing_zeros() {
        assert_eq!(threshold_millions_label(200_000_000.0), "200");
        assert_eq!(threshold_millions_label(12_500_000.0), "12.5");
        assert_eq!(threshold_millions_label(1_250_000_000.0), "1,250");
    }

    #[tokio::test]
    async fn subject_names_date_count_and_threshold() {
        let notifier = EmailNotifier::new(&config("inbox@example.com")).unwrap();
        let date = NaiveDate::from_ymd_opt(2026, 1, 29).unwrap();

        let subject = notifier.subject(&[sample_ipo()], date);
        assert_eq!(subject, "IPO Alert! ⚠️ – 2026-01-29 – 1 ticker(s) above $200M");
    }

    #[tokio::test]
    async fn plain_body_lists_tickers() {
        let notifier = EmailNotifier::new(&config("inbox@example.com")).unwrap();
        let date = NaiveDate::from_ymd_opt(2026, 1, 29).unwrap();
        let mut second = sample_ipo();
        second.label = "Beta Inc".to_string();

        let body = notifier.plain_body(&[sample_ipo(), second], date);
        assert!(body.contains("Acme Corp, Beta Inc"));
        assert!(body.contains("> $200M today"));
    }

    #[tokio::test]
    async fn html_body_renders_the_offering_row() {
        let notifier = EmailNotifier::new(&config("inbox@example.com")).unwrap();
        let date = NaiveDate::from_ymd_opt(2026, 1, 29).unwrap();

        let html = notifier.html_body(&[sample_ipo()], date);
        assert!(html.contains("Thursday, January 29, 2026"));
        assert!(html.contains("Acme Corp"));
        assert!(html.contains("$25.00"));
        assert!(html.contains("12,000,000"));
        assert!(html.contains("$300.0M"));
        assert!(html.contains("NASDAQ"));
    }

    #[test]
    fn missing_price_and_shares_render_as_placeholder() {
        let mut ipo = sample_ipo();
        ipo.price = None;
        ipo.shares = None;

        let row = render_row(&ipo);
        assert_eq!(row.matches(PLACEHOLDER).count(), 2);
    }

    #[test]
    fn invalid_recipient_address_fails_at_construction() {
        assert!(EmailNotifier::new(&config("not-an-address")).is_err());
    }
}
