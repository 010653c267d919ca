use chrono::Utc;

use crate::domain::access::{Actor, case_scope};
use crate::domain::case::CaseStatus;
use crate::domain::event::Event;
use crate::domain::repository::{CaseRepository, EventRepository};
use crate::error::CasesServiceError;

const UPCOMING_HEARINGS_LIMIT: u64 = 5;

pub struct Dashboard {
    /// Case counts per status inside the viewer's scope; zero-count
    /// statuses are omitted.
    pub status_counts: Vec<(CaseStatus, u64)>,
    /// Next scheduled hearings, soonest first.
    pub upcoming_hearings: Vec<Event>,
}

pub struct DashboardUseCase<C: CaseRepository, E: EventRepository> {
    pub cases: C,
    pub events: E,
}

impl<C: CaseRepository, E: EventRepository> DashboardUseCase<C, E> {
    pub async fn execute(&self, actor: &Actor) -> Result<Dashboard, CasesServiceError> {
        let scope = case_scope(actor);
        let status_counts = self.cases.count_by_status(&scope).await?;
        let upcoming_hearings = self
            .events
            .upcoming_hearings(&scope, Utc::now(), UPCOMING_HEARINGS_LIMIT)
            .await?;
        Ok(Dashboard {
            status_counts,
            upcoming_hearings,
        })
    }
}
