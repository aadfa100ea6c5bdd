use std::sync::{Arc, LazyLock};

use regex::Regex;
use serde::Deserialize;
use validator::Validate;

use crate::Mailer;

static RE_PHONE_NUMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{7,15}$").unwrap());

#[derive(Debug, Deserialize, Clone)]
pub struct SmsConfig {
    /// Carrier domain receiving `{number}@{domain}` emails.
    pub gateway_domain: String,
    pub subject: String,
}

impl Default for SmsConfig {
    fn default() -> Self {
        Self {
            gateway_domain: "tmomail.net".to_owned(),
            subject: "Workout Reminder".to_owned(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct SendSmsInput {
    #[validate(regex(path = *RE_PHONE_NUMBER, message = "Phone number must have 7 to 15 digits."))]
    pub to_number: String,
    #[validate(length(min = 1, max = 160))]
    pub message: String,
}

/// Sends text messages through a carrier email-to-SMS gateway.
#[derive(Clone)]
pub struct SmsNotifier {
    mailer: Arc<dyn Mailer>,
    config: SmsConfig,
}

impl SmsNotifier {
    pub fn new(mailer: Arc<dyn Mailer>, config: SmsConfig) -> Self {
        Self { mailer, config }
    }

    /// Gateway address of an already normalized number.
    pub fn address(&self, number: &str) -> String {
        format!("{}@{}", number, self.config.gateway_domain)
    }

    #[tracing::instrument(skip_all)]
    pub async fn send(&self, input: SendSmsInput) -> reptrack_shared::Result<String> {
        let input = SendSmsInput {
            to_number: normalize_number(&input.to_number),
            message: input.message.trim().to_owned(),
        };
        input.validate()?;

        let to = self.address(&input.to_number);
        if let Err(err) = self
            .mailer
            .send_plain(&to, &self.config.subject, &input.message)
            .await
        {
            tracing::error!(err = %err, "Failed to send SMS");
            reptrack_shared::upstream!("Failed to send SMS: {}", err);
        }

        tracing::info!(to_number = %input.to_number, "SMS sent");

        Ok(to)
    }
}

fn normalize_number(value: &str) -> String {
    value
        .trim()
        .trim_start_matches('+')
        .chars()
        .filter(|c| !matches!(c, ' ' | '-' | '(' | ')' | '.'))
        .collect()
}
