use crate::model::ConfigError;
use std::env;

/// Fallback alert threshold when OFFER_THRESHOLD_MILLIONS is unset.
pub const DEFAULT_THRESHOLD_MILLIONS: f64 = 200.0;

/// Runtime settings, read once at startup from the environment
/// (a local .env file is loaded first when present).
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub sender_email: String,
    pub sender_app_password: String,
    pub recipients: Vec<String>,
    /// Alert threshold in whole dollars.
    pub offer_threshold_usd: f64,
}

impl AppConfig {
    /// Reads the configuration from environment variables. Missing required
    /// variables are collected and reported together rather than one by one.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut missing = Vec::new();

        let sender_email = require_var(&lookup, "SENDER_EMAIL", &mut missing);
        let sender_app_password = require_var(&lookup, "SENDER_APP_PASSWORD", &mut missing);
        let recipient_email = require_var(&lookup, "RECIPIENT_EMAIL", &mut missing);

        if !missing.is_empty() {
            return Err(ConfigError::MissingVars(missing));
        }

        let recipients = split_recipients(&recipient_email);
        if recipients.is_empty() {
            return Err(ConfigError::Invalid {
                var: "RECIPIENT_EMAIL".to_string(),
                reason: "no addresses after splitting on commas".to_string(),
            });
        }

        let threshold_millions = parse_threshold_millions(lookup("OFFER_THRESHOLD_MILLIONS"))?;

        Ok(Self {
            sender_email,
            sender_app_password,
            recipients,
            offer_threshold_usd: threshold_millions * 1_000_000.0,
        })
    }
}

fn require_var(
    lookup: &dyn Fn(&str) -> Option<String>,
    name: &str,
    missing: &mut Vec<String>,
) -> String {
    match lookup(name) {
        Some(value) if !value.trim().is_empty() => value,
        _ => {
            missing.push(name.to_string());
            String::new()
        }
    }
}

/// Parses the optional threshold override, in millions of dollars.
fn parse_threshold_millions(raw: Option<String>) -> Result<f64, ConfigError> {
    let Some(text) = raw else {
        return Ok(DEFAULT_THRESHOLD_MILLIONS);
    };
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Ok(DEFAULT_THRESHOLD_MILLIONS);
    }
    match trimmed.parse::<f64>() {
        // Zero is a valid setting: it alerts on every same-day pricing.
        Ok(value) if value >= 0.0 => Ok(value),
        Ok(_) => Err(ConfigError::Invalid {
            var: "OFFER_THRESHOLD_MILLIONS".to_string(),
            reason: "must not be negative".to_string(),
        }),
        Err(_) => Err(ConfigError::Invalid {
            var: "OFFER_THRESHOLD_MILLIONS".to_string(),
            reason: format!("could not parse {:?} as a number", trimmed),
        }),
    }
}

/// Splits a comma separated recipient list, dropping blanks.
fn split_recipients(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lookup_from(pairs: &'static [(&'static str, &'static str)]) -> impl Fn(&str) -> Option<String> {
        move |name| {
            pairs
                .iter()
                .find(|(key, _)| *key == name)
                .map(|(_, value)| value.to_string())
        }
    }

    #[test]
    fn missing_vars_are_collected_together() {
        let err = AppConfig::from_lookup(lookup_from(&[("SENDER_EMAIL", "alerts@example.com")]))
            .unwrap_err();
        match err {
            ConfigError::MissingVars(vars) => {
                assert_eq!(vars, vec!["SENDER_APP_PASSWORD", "RECIPIENT_EMAIL"]);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn blank_values_count_as_missing() {
        let err = AppConfig::from_lookup(lookup_from(&[
            ("SENDER_EMAIL", "   "),
            ("SENDER_APP_PASSWORD", "app-password"),
            ("RECIPIENT_EMAIL", "inbox@example.com"),
        ]))
        .unwrap_err();
        match err {
            ConfigError::MissingVars(vars) => assert_eq!(vars, vec!["SENDER_EMAIL"]),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn full_configuration_parses() {
        let config = AppConfig::from_lookup(lookup_from(&[
            ("SENDER_EMAIL", "alerts@example.com"),
            ("SENDER_APP_PASSWORD", "app-password"),
            ("RECIPIENT_EMAIL", "a@example.com, b@example.com"),
            ("OFFER_THRESHOLD_MILLIONS", "250"),
        ]))
        .unwrap();

        assert_eq!(config.sender_email, "alerts@example.com");
        assert_eq!(config.recipients, vec!["a@example.com", "b@example.com"]);
        assert_eq!(config.offer_threshold_usd, 250_000_000.0);
    }

    #[test]
    fn threshold_defaults_when_unset() {
        let config = AppConfig::from_lookup(lookup_from(&[
            ("SENDER_EMAIL", "alerts@example.com"),
            ("SENDER_APP_PASSWORD", "app-password"),
            ("RECIPIENT_EMAIL", "inbox@example.com"),
        ]))
        .unwrap();
        assert_eq!(
            config.offer_threshold_usd,
            DEFAULT_THRESHOLD_MILLIONS * 1_000_000.0
        );
    }

    #[test]
    fn threshold_parses_override() {
        assert_eq!(
            parse_threshold_millions(Some("350".to_string())).unwrap(),
            350.0
        );
        assert_eq!(
            parse_threshold_millions(Some("12.5".to_string())).unwrap(),
            12.5
        );
        assert_eq!(
            parse_threshold_millions(Some("  ".to_string())).unwrap(),
            DEFAULT_THRESHOLD_MILLIONS
        );
    }

    #[test]
    fn threshold_rejects_garbage_and_negatives() {
        assert!(parse_threshold_millions(Some("lots".to_string())).is_err());
        assert!(parse_threshold_millions(Some("-5".to_string())).is_err());
    }

    #[test]
    fn zero_threshold_alerts_on_everything() {
        assert_eq!(parse_threshold_millions(Some("0".to_string())).unwrap(), 0.0);
    }

    #[test]
    fn recipients_must_not_be_all_blank() {
        let err = AppConfig::from_lookup(lookup_from(&[
            ("SENDER_EMAIL", "alerts@example.com"),
            ("SENDER_APP_PASSWORD", "app-password"),
            ("RECIPIENT_EMAIL", " , , "),
        ]))
        .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { .. }));
    }

    #[test]
    fn recipients_split_and_trim() {
        assert_eq!(
            split_recipients("a@example.com, b@example.com ,,c@example.com"),
            vec!["a@example.com", "b@example.com", "c@example.com"]
        );
    }
}
