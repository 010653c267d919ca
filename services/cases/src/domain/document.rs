use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Access level carried by a document grant, stored as text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessLevel {
    View,
    Download,
    Edit,
}

impl AccessLevel {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "view" => Some(Self::View),
            "download" => Some(Self::Download),
            "edit" => Some(Self::Edit),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::View => "view",
            Self::Download => "download",
            Self::Edit => "edit",
        }
    }
}

/// Per-user grant on a document. Grants extend visibility to users who are
/// not on the owning case; case members see documents without one.
#[derive(Debug, Clone)]
pub struct AccessGrant {
    pub user_id: Uuid,
    pub level: AccessLevel,
    pub granted_at: DateTime<Utc>,
}

/// Document metadata. The content bytes live in the blob store under
/// `storage_path`; `url` is the stable (non-signed) location.
#[derive(Debug, Clone)]
pub struct Document {
    pub id: Uuid,
    pub case_id: Uuid,
    pub name: String,
    pub storage_path: String,
    pub url: String,
    pub size: i64,
    pub mime_type: String,
    pub category: Option<String>,
    pub access: Vec<AccessGrant>,
    pub uploaded_by: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Document {
    pub fn has_grant(&self, user_id: Uuid) -> bool {
        self.access.iter().any(|g| g.user_id == user_id)
    }
}
