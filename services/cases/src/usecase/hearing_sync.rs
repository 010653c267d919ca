use chrono::Utc;

use crate::domain::case::Case;
use crate::domain::event::Event;
use crate::domain::repository::EventRepository;
use crate::error::CasesServiceError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HearingSyncOutcome {
    /// `next_hearing_date` unset; nothing to reconcile.
    Skipped,
    Created,
    Rescheduled,
}

/// Reconcile a case's `next_hearing_date` with its derived hearing event:
/// create the scheduled hearing when none exists, otherwise move the
/// existing one. Runs off the request path after case writes.
pub struct SyncHearingEventUseCase<E: EventRepository> {
    pub events: E,
}

impl<E: EventRepository> SyncHearingEventUseCase<E> {
    pub async fn execute(&self, case: &Case) -> Result<HearingSyncOutcome, CasesServiceError> {
        let Some(start) = case.next_hearing_date else {
            return Ok(HearingSyncOutcome::Skipped);
        };
        let now = Utc::now();
        match self.events.find_scheduled_hearing(case.id).await? {
            Some(mut hearing) => {
                hearing.reschedule_hearing(case, start, now);
                self.events.update(&hearing).await?;
                tracing::debug!(case_id = %case.id, event_id = %hearing.id, "hearing event rescheduled");
                Ok(HearingSyncOutcome::Rescheduled)
            }
            None => {
                // Check-then-act: two concurrent syncs for the same case can
                // both miss and both insert.
                let hearing = Event::hearing_for_case(case, start, now);
                self.events.create(&hearing).await?;
                tracing::debug!(case_id = %case.id, event_id = %hearing.id, "hearing event created");
                Ok(HearingSyncOutcome::Created)
            }
        }
    }
}
