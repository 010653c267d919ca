use chrono::{DateTime, Utc};
use uuid::Uuid;

use causelist_domain::role::Role;

/// Registered user of the case-management system.
///
/// Email is unique and immutable after creation; users are never
/// hard-deleted, so references from cases and events stay valid.
#[derive(Debug, Clone)]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub role: Role,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
