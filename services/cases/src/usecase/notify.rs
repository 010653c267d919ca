use std::collections::BTreeSet;

use crate::domain::case::Case;
use crate::domain::repository::Notifier;

/// Tally of one fan-out run. Failures are logged where they happen; the
/// summary only exists for the dispatch log line and for tests.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DeliverySummary {
    pub emails_sent: usize,
    pub sms_sent: usize,
    pub failures: usize,
}

/// Tell every contact on a freshly created case about it: assigned lawyers
/// and clients, both party sides, advocates, and stakeholders. Recipients
/// are deduplicated (emails case-insensitively). Runs off the request path;
/// nothing here can fail the case write.
pub struct NotifyCaseCreatedUseCase<N: Notifier> {
    pub notifier: N,
}

impl<N: Notifier> NotifyCaseCreatedUseCase<N> {
    pub async fn execute(&self, case: &Case) -> DeliverySummary {
        let (emails, phones) = collect_recipients(case);
        let subject = format!("New case: {}", case.title);
        let body = format!(
            "Case {} ({}) has been opened and you are listed as a contact.",
            case.title, case.case_number
        );
        let sms_body = format!("New case {}: {}", case.case_number, case.title);

        let mut summary = DeliverySummary::default();
        for email in &emails {
            match self.notifier.send_email(email, &subject, &body).await {
                Ok(()) => summary.emails_sent += 1,
                Err(e) => {
                    summary.failures += 1;
                    tracing::warn!(error = %e, case_id = %case.id, "case-created email failed");
                }
            }
        }
        for phone in &phones {
            match self.notifier.send_sms(phone, &sms_body).await {
                Ok(()) => summary.sms_sent += 1,
                Err(e) => {
                    summary.failures += 1;
                    tracing::warn!(error = %e, case_id = %case.id, "case-created sms failed");
                }
            }
        }
        tracing::info!(
            case_id = %case.id,
            emails = summary.emails_sent,
            sms = summary.sms_sent,
            failures = summary.failures,
            "case-created notifications dispatched"
        );
        summary
    }
}

fn collect_recipients(case: &Case) -> (BTreeSet<String>, BTreeSet<String>) {
    let mut emails = BTreeSet::new();
    let mut phones = BTreeSet::new();
    let mut add = |email: &str, phone: &str| {
        let email = email.trim().to_lowercase();
        if !email.is_empty() {
            emails.insert(email);
        }
        let phone = phone.trim();
        if !phone.is_empty() {
            phones.insert(phone.to_owned());
        }
    };
    for entry in case.lawyers.iter().chain(&case.clients) {
        add(&entry.email, &entry.phone);
    }
    for party in case.parties.petitioner.iter().chain(&case.parties.respondent) {
        add(&party.email, &party.phone);
    }
    for advocate in &case.advocates {
        add(&advocate.email, &advocate.phone);
    }
    for stakeholder in &case.stakeholders {
        add(&stakeholder.email, &stakeholder.phone);
    }
    (emails, phones)
}
