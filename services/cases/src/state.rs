use sea_orm::DatabaseConnection;

use crate::infra::blob::S3BlobStore;
use crate::infra::db::{
    DbCaseRepository, DbDocumentRepository, DbEventRepository, DbUserRepository,
};
use crate::infra::notify::HttpNotifier;

/// Shared application state passed to every handler via axum `State`.
#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub notifier: HttpNotifier,
    pub blobs: S3BlobStore,
}

impl AppState {
    pub fn case_repo(&self) -> DbCaseRepository {
        DbCaseRepository {
            db: self.db.clone(),
        }
    }

    pub fn event_repo(&self) -> DbEventRepository {
        DbEventRepository {
            db: self.db.clone(),
        }
    }

    pub fn document_repo(&self) -> DbDocumentRepository {
        DbDocumentRepository {
            db: self.db.clone(),
        }
    }

    pub fn user_repo(&self) -> DbUserRepository {
        DbUserRepository {
            db: self.db.clone(),
        }
    }
}
