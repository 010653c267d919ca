use bytes::Bytes;
use chrono::Utc;
use uuid::Uuid;

use crate::domain::access::{Actor, can_manage_document, can_view_case, can_view_document};
use crate::domain::case::Case;
use crate::domain::document::{AccessGrant, AccessLevel, Document};
use crate::domain::repository::{BlobStore, CaseRepository, DocumentRepository, UserRepository};
use crate::error::{CasesServiceError, FieldViolation};

/// Lifetime of the temporary download URLs handed out on document reads.
const SIGNED_URL_TTL: std::time::Duration = std::time::Duration::from_secs(15 * 60);

// ── UploadDocument ───────────────────────────────────────────────────────────

pub struct UploadDocumentInput {
    pub case_id: Uuid,
    pub name: String,
    pub bytes: Bytes,
    pub mime_type: String,
    pub category: Option<String>,
}

/// Store the bytes in the blob store and record the metadata row. Any case
/// member may upload to their case.
pub struct UploadDocumentUseCase<D: DocumentRepository, C: CaseRepository, B: BlobStore> {
    pub documents: D,
    pub cases: C,
    pub blobs: B,
}

impl<D: DocumentRepository, C: CaseRepository, B: BlobStore> UploadDocumentUseCase<D, C, B> {
    pub async fn execute(
        &self,
        actor: &Actor,
        input: UploadDocumentInput,
    ) -> Result<Document, CasesServiceError> {
        let case = self
            .cases
            .find_by_id(input.case_id)
            .await?
            .ok_or(CasesServiceError::CaseNotFound)?;
        if !can_view_case(actor, &case) {
            return Err(CasesServiceError::Forbidden);
        }
        let mut violations = Vec::new();
        if input.name.trim().is_empty() {
            violations.push(FieldViolation::new("name", "document name is required"));
        }
        if input.bytes.is_empty() {
            violations.push(FieldViolation::new("content", "document content is empty"));
        }
        if !violations.is_empty() {
            return Err(CasesServiceError::Validation(violations));
        }

        let id = Uuid::now_v7();
        let size = input.bytes.len() as i64;
        let storage_path = format!("cases/{}/{}/{}", case.id, id, input.name.trim());
        let url = self
            .blobs
            .upload(&storage_path, input.bytes, &input.mime_type)
            .await?;

        let now = Utc::now();
        let document = Document {
            id,
            case_id: case.id,
            name: input.name.trim().to_owned(),
            storage_path,
            url,
            size,
            mime_type: input.mime_type,
            category: input.category.filter(|c| !c.trim().is_empty()),
            access: Vec::new(),
            uploaded_by: actor.user_id,
            created_at: now,
            updated_at: now,
        };
        self.documents.create(&document).await?;
        Ok(document)
    }
}

// ── GetDocument ──────────────────────────────────────────────────────────────

/// Metadata plus the per-viewer extras a client needs to render a document
/// row: a short-lived download URL and the viewer's favorite mark.
pub struct DocumentView {
    pub document: Document,
    pub download_url: Option<String>,
    pub favorite: bool,
}

pub struct GetDocumentUseCase<D: DocumentRepository, C: CaseRepository, B: BlobStore> {
    pub documents: D,
    pub cases: C,
    pub blobs: B,
}

impl<D: DocumentRepository, C: CaseRepository, B: BlobStore> GetDocumentUseCase<D, C, B> {
    pub async fn execute(
        &self,
        actor: &Actor,
        document_id: Uuid,
    ) -> Result<DocumentView, CasesServiceError> {
        let document = self
            .documents
            .find_by_id(document_id)
            .await?
            .ok_or(CasesServiceError::DocumentNotFound)?;
        let case = owning_case(&self.cases, &document).await?;
        if !can_view_document(actor, &document, &case) {
            return Err(CasesServiceError::Forbidden);
        }
        let download_url = match self
            .blobs
            .signed_url(&document.storage_path, SIGNED_URL_TTL)
            .await
        {
            Ok(url) => Some(url),
            Err(e) => {
                tracing::warn!(error = %e, document_id = %document.id, "signing download url failed");
                None
            }
        };
        let favorite = self.documents.is_favorite(document.id, actor.user_id).await?;
        Ok(DocumentView {
            document,
            download_url,
            favorite,
        })
    }
}

/// A document's case row is load-bearing for authorization; a missing one
/// means the cascade already took the document with it.
async fn owning_case<C: CaseRepository>(
    cases: &C,
    document: &Document,
) -> Result<Case, CasesServiceError> {
    cases
        .find_by_id(document.case_id)
        .await?
        .ok_or(CasesServiceError::DocumentNotFound)
}

// ── ListCaseDocuments ────────────────────────────────────────────────────────

pub struct ListCaseDocumentsUseCase<D: DocumentRepository, C: CaseRepository> {
    pub documents: D,
    pub cases: C,
}

impl<D: DocumentRepository, C: CaseRepository> ListCaseDocumentsUseCase<D, C> {
    pub async fn execute(
        &self,
        actor: &Actor,
        case_id: Uuid,
    ) -> Result<Vec<Document>, CasesServiceError> {
        let case = self
            .cases
            .find_by_id(case_id)
            .await?
            .ok_or(CasesServiceError::CaseNotFound)?;
        if !can_view_case(actor, &case) {
            return Err(CasesServiceError::Forbidden);
        }
        self.documents.list_by_case(case_id).await
    }
}

// ── DeleteDocument ───────────────────────────────────────────────────────────

pub struct DeleteDocumentUseCase<D: DocumentRepository, C: CaseRepository, B: BlobStore> {
    pub documents: D,
    pub cases: C,
    pub blobs: B,
}

impl<D: DocumentRepository, C: CaseRepository, B: BlobStore> DeleteDocumentUseCase<D, C, B> {
    pub async fn execute(
        &self,
        actor: &Actor,
        document_id: Uuid,
    ) -> Result<(), CasesServiceError> {
        let document = self
            .documents
            .find_by_id(document_id)
            .await?
            .ok_or(CasesServiceError::DocumentNotFound)?;
        let case = owning_case(&self.cases, &document).await?;
        if !can_manage_document(actor, &document, &case) {
            return Err(CasesServiceError::Forbidden);
        }
        if !self.documents.delete(document_id).await? {
            return Err(CasesServiceError::DocumentNotFound);
        }
        // The metadata row is gone either way; an orphaned blob is the
        // acceptable failure mode.
        if let Err(e) = self.blobs.delete(&document.storage_path).await {
            tracing::warn!(error = %e, path = %document.storage_path, "blob delete failed");
        }
        Ok(())
    }
}

// ── GrantDocumentAccess ──────────────────────────────────────────────────────

pub struct GrantDocumentAccessInput {
    pub user_id: Uuid,
    pub level: AccessLevel,
}

/// Upsert a per-user grant. Grants widen visibility to users outside the
/// owning case; only the uploader, the case's primary representatives, or
/// an admin may hand them out.
pub struct GrantDocumentAccessUseCase<D: DocumentRepository, C: CaseRepository, U: UserRepository> {
    pub documents: D,
    pub cases: C,
    pub users: U,
}

impl<D: DocumentRepository, C: CaseRepository, U: UserRepository>
    GrantDocumentAccessUseCase<D, C, U>
{
    pub async fn execute(
        &self,
        actor: &Actor,
        document_id: Uuid,
        input: GrantDocumentAccessInput,
    ) -> Result<(), CasesServiceError> {
        let document = self
            .documents
            .find_by_id(document_id)
            .await?
            .ok_or(CasesServiceError::DocumentNotFound)?;
        let case = owning_case(&self.cases, &document).await?;
        if !can_manage_document(actor, &document, &case) {
            return Err(CasesServiceError::Forbidden);
        }
        if self.users.find_by_id(input.user_id).await?.is_none() {
            return Err(CasesServiceError::UserNotFound);
        }
        let grant = AccessGrant {
            user_id: input.user_id,
            level: input.level,
            granted_at: Utc::now(),
        };
        self.documents.grant_access(document_id, &grant).await
    }
}

// ── SetDocumentFavorite ──────────────────────────────────────────────────────

pub struct SetDocumentFavoriteUseCase<D: DocumentRepository, C: CaseRepository> {
    pub documents: D,
    pub cases: C,
}

impl<D: DocumentRepository, C: CaseRepository> SetDocumentFavoriteUseCase<D, C> {
    /// Returns whether the mark actually changed.
    pub async fn execute(
        &self,
        actor: &Actor,
        document_id: Uuid,
        favorite: bool,
    ) -> Result<bool, CasesServiceError> {
        let document = self
            .documents
            .find_by_id(document_id)
            .await?
            .ok_or(CasesServiceError::DocumentNotFound)?;
        let case = owning_case(&self.cases, &document).await?;
        if !can_view_document(actor, &document, &case) {
            return Err(CasesServiceError::Forbidden);
        }
        self.documents
            .set_favorite(document_id, actor.user_id, favorite)
            .await
    }
}
