pub mod case;
pub mod dashboard;
pub mod document;
pub mod event;
pub mod hearing_sync;
pub mod notify;
pub mod user;

#[cfg(test)]
pub(crate) mod mocks;
