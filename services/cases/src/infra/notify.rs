//! Outbound email and SMS delivery over HTTP provider APIs.

use anyhow::Context as _;

use crate::config::{MailgunConfig, TwilioConfig};
use crate::domain::repository::Notifier;
use crate::error::CasesServiceError;

/// `Notifier` backed by the Mailgun and Twilio REST APIs. Either channel
/// may be left unconfigured; sends on a disabled channel are skipped with
/// a debug log so environments without credentials still boot.
#[derive(Clone)]
pub struct HttpNotifier {
    client: reqwest::Client,
    mailgun: Option<MailgunConfig>,
    twilio: Option<TwilioConfig>,
}

impl HttpNotifier {
    pub fn new(mailgun: Option<MailgunConfig>, twilio: Option<TwilioConfig>) -> Self {
        Self {
            client: reqwest::Client::new(),
            mailgun,
            twilio,
        }
    }
}

impl Notifier for HttpNotifier {
    async fn send_email(
        &self,
        to: &str,
        subject: &str,
        body: &str,
    ) -> Result<(), CasesServiceError> {
        let Some(ref mailgun) = self.mailgun else {
            tracing::debug!(to, "email channel disabled, skipping");
            return Ok(());
        };
        let url = format!("https://api.mailgun.net/v3/{}/messages", mailgun.domain);
        let response = self
            .client
            .post(&url)
            .basic_auth("api", Some(&mailgun.api_key))
            .form(&[
                ("from", mailgun.from.as_str()),
                ("to", to),
                ("subject", subject),
                ("text", body),
            ])
            .send()
            .await
            .context("mailgun request")?;
        if !response.status().is_success() {
            let status = response.status();
            let detail = response.text().await.unwrap_or_default();
            return Err(anyhow::anyhow!("mailgun returned {status}: {detail}").into());
        }
        Ok(())
    }

    async fn send_sms(&self, to: &str, body: &str) -> Result<(), CasesServiceError> {
        let Some(ref twilio) = self.twilio else {
            tracing::debug!(to, "sms channel disabled, skipping");
            return Ok(());
        };
        let url = format!(
            "https://api.twilio.com/2010-04-01/Accounts/{}/Messages.json",
            twilio.account_sid
        );
        let response = self
            .client
            .post(&url)
            .basic_auth(&twilio.account_sid, Some(&twilio.auth_token))
            .form(&[
                ("From", twilio.from_number.as_str()),
                ("To", to),
                ("Body", body),
            ])
            .send()
            .await
            .context("twilio request")?;
        if !response.status().is_success() {
            let status = response.status();
            let detail = response.text().await.unwrap_or_default();
            return Err(anyhow::anyhow!("twilio returned {status}: {detail}").into());
        }
        Ok(())
    }
}
