//! SeaORM entities for the cases service schema.
//!
//! One module per table. Enum-like columns (`role`, `status`, `side`,
//! `event_type`, ...) are stored as text; the service's domain layer owns
//! the parsing and the valid value sets.

pub mod case_advocates;
pub mod case_clients;
pub mod case_lawyers;
pub mod case_parties;
pub mod case_stakeholders;
pub mod cases;
pub mod document_access;
pub mod document_favorites;
pub mod documents;
pub mod event_participants;
pub mod events;
pub mod users;
