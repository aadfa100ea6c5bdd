use std::sync::Arc;

use anyhow::Result;
use reptrack_notification::{EmailService, SendSmsInput, SmsNotifier};

pub async fn send_sms(config: crate::config::Config, to: String, message: String) -> Result<()> {
    let mailer = EmailService::new(&config.email)?;
    let notifier = SmsNotifier::new(Arc::new(mailer), config.sms.clone());

    let address = notifier
        .send(SendSmsInput {
            to_number: to,
            message,
        })
        .await?;

    tracing::info!(%address, "SMS sent");

    Ok(())
}
