pub mod access;
pub mod case;
pub mod document;
pub mod event;
pub mod repository;
pub mod user;
