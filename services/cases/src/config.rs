/// Cases service configuration loaded from environment variables.
#[derive(Debug)]
pub struct CasesConfig {
    /// PostgreSQL connection URL.
    pub database_url: String,
    /// TCP port for the HTTP server (default 3114). Env var: `CASES_PORT`.
    pub cases_port: u16,
    /// Mailgun credentials. Email notifications are skipped when unset.
    pub mailgun: Option<MailgunConfig>,
    /// Twilio credentials. SMS notifications are skipped when unset.
    pub twilio: Option<TwilioConfig>,
    /// S3-compatible store holding document bytes.
    pub blob: BlobConfig,
}

#[derive(Debug, Clone)]
pub struct MailgunConfig {
    pub domain: String,
    pub api_key: String,
    pub from: String,
}

#[derive(Debug, Clone)]
pub struct TwilioConfig {
    pub account_sid: String,
    pub auth_token: String,
    pub from_number: String,
}

#[derive(Debug, Clone)]
pub struct BlobConfig {
    pub endpoint: String,
    pub access_key: String,
    pub secret_key: String,
    pub region: String,
    pub bucket: String,
}

impl CasesConfig {
    pub fn from_env() -> Self {
        Self {
            database_url: std::env::var("DATABASE_URL").expect("DATABASE_URL"),
            cases_port: std::env::var("CASES_PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(3114),
            mailgun: mailgun_from_env(),
            twilio: twilio_from_env(),
            blob: BlobConfig {
                endpoint: std::env::var("S3_ENDPOINT").expect("S3_ENDPOINT"),
                access_key: std::env::var("S3_ACCESS_KEY").expect("S3_ACCESS_KEY"),
                secret_key: std::env::var("S3_SECRET_KEY").expect("S3_SECRET_KEY"),
                region: std::env::var("S3_REGION").unwrap_or_else(|_| "us-east-1".to_owned()),
                bucket: std::env::var("S3_BUCKET")
                    .unwrap_or_else(|_| "case-documents".to_owned()),
            },
        }
    }
}

fn mailgun_from_env() -> Option<MailgunConfig> {
    let domain = std::env::var("MAILGUN_DOMAIN").ok()?;
    let api_key = std::env::var("MAILGUN_API_KEY").ok()?;
    let from = std::env::var("MAILGUN_FROM")
        .unwrap_or_else(|_| format!("Causelist <noreply@{domain}>"));
    Some(MailgunConfig {
        domain,
        api_key,
        from,
    })
}

fn twilio_from_env() -> Option<TwilioConfig> {
    Some(TwilioConfig {
        account_sid: std::env::var("TWILIO_ACCOUNT_SID").ok()?,
        auth_token: std::env::var("TWILIO_AUTH_TOKEN").ok()?,
        from_number: std::env::var("TWILIO_FROM_NUMBER").ok()?,
    })
}
