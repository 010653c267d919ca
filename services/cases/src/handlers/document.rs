use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use base64::Engine as _;
use bytes::Bytes;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use causelist_auth_types::identity::IdentityHeaders;

use crate::domain::access::Actor;
use crate::domain::document::{AccessLevel, Document};
use crate::error::{CasesServiceError, FieldViolation};
use crate::state::AppState;
use crate::usecase::document::{
    DeleteDocumentUseCase, GetDocumentUseCase, GrantDocumentAccessInput,
    GrantDocumentAccessUseCase, ListCaseDocumentsUseCase, SetDocumentFavoriteUseCase,
    UploadDocumentInput, UploadDocumentUseCase,
};

// ── Response types ───────────────────────────────────────────────────────────

#[derive(Serialize)]
pub struct DocumentResponse {
    pub id: String,
    pub case_id: String,
    pub name: String,
    pub url: String,
    pub size: i64,
    pub mime_type: String,
    pub category: Option<String>,
    pub uploaded_by: String,
    #[serde(serialize_with = "causelist_core::serde::to_rfc3339_ms")]
    pub created_at: chrono::DateTime<chrono::Utc>,
    #[serde(serialize_with = "causelist_core::serde::to_rfc3339_ms")]
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl From<Document> for DocumentResponse {
    fn from(document: Document) -> Self {
        DocumentResponse {
            id: document.id.to_string(),
            case_id: document.case_id.to_string(),
            name: document.name,
            url: document.url,
            size: document.size,
            mime_type: document.mime_type,
            category: document.category,
            uploaded_by: document.uploaded_by.to_string(),
            created_at: document.created_at,
            updated_at: document.updated_at,
        }
    }
}

#[derive(Serialize)]
pub struct DocumentViewResponse {
    #[serde(flatten)]
    pub document: DocumentResponse,
    pub download_url: Option<String>,
    pub favorite: bool,
}

// ── POST /cases/{id}/documents ───────────────────────────────────────────────

#[derive(Deserialize)]
pub struct UploadDocumentRequest {
    pub name: String,
    /// File bytes, base64-encoded (standard alphabet, padded).
    pub content: String,
    pub mime_type: String,
    pub category: Option<String>,
}

pub async fn upload_document(
    identity: IdentityHeaders,
    State(state): State<AppState>,
    Path(case_id): Path<Uuid>,
    Json(body): Json<UploadDocumentRequest>,
) -> Result<(StatusCode, Json<DocumentResponse>), CasesServiceError> {
    let actor = Actor {
        user_id: identity.user_id,
        role: identity.role,
    };
    let bytes = base64::engine::general_purpose::STANDARD
        .decode(&body.content)
        .map_err(|_| {
            CasesServiceError::Validation(vec![FieldViolation::new(
                "content",
                "content must be valid base64",
            )])
        })?;
    let usecase = UploadDocumentUseCase {
        documents: state.document_repo(),
        cases: state.case_repo(),
        blobs: state.blobs.clone(),
    };
    let document = usecase
        .execute(
            &actor,
            UploadDocumentInput {
                case_id,
                name: body.name,
                bytes: Bytes::from(bytes),
                mime_type: body.mime_type,
                category: body.category,
            },
        )
        .await?;
    Ok((StatusCode::CREATED, Json(DocumentResponse::from(document))))
}

// ── GET /cases/{id}/documents ────────────────────────────────────────────────

pub async fn list_case_documents(
    identity: IdentityHeaders,
    State(state): State<AppState>,
    Path(case_id): Path<Uuid>,
) -> Result<Json<Vec<DocumentResponse>>, CasesServiceError> {
    let actor = Actor {
        user_id: identity.user_id,
        role: identity.role,
    };
    let usecase = ListCaseDocumentsUseCase {
        documents: state.document_repo(),
        cases: state.case_repo(),
    };
    let documents = usecase.execute(&actor, case_id).await?;
    Ok(Json(documents.into_iter().map(Into::into).collect()))
}

// ── GET /documents/{id} ──────────────────────────────────────────────────────

pub async fn get_document(
    identity: IdentityHeaders,
    State(state): State<AppState>,
    Path(document_id): Path<Uuid>,
) -> Result<Json<DocumentViewResponse>, CasesServiceError> {
    let actor = Actor {
        user_id: identity.user_id,
        role: identity.role,
    };
    let usecase = GetDocumentUseCase {
        documents: state.document_repo(),
        cases: state.case_repo(),
        blobs: state.blobs.clone(),
    };
    let view = usecase.execute(&actor, document_id).await?;
    Ok(Json(DocumentViewResponse {
        document: DocumentResponse::from(view.document),
        download_url: view.download_url,
        favorite: view.favorite,
    }))
}

// ── DELETE /documents/{id} ───────────────────────────────────────────────────

pub async fn delete_document(
    identity: IdentityHeaders,
    State(state): State<AppState>,
    Path(document_id): Path<Uuid>,
) -> Result<StatusCode, CasesServiceError> {
    let actor = Actor {
        user_id: identity.user_id,
        role: identity.role,
    };
    let usecase = DeleteDocumentUseCase {
        documents: state.document_repo(),
        cases: state.case_repo(),
        blobs: state.blobs.clone(),
    };
    usecase.execute(&actor, document_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// ── POST /documents/{id}/access ──────────────────────────────────────────────

#[derive(Deserialize)]
pub struct GrantAccessRequest {
    pub user_id: Uuid,
    pub level: String,
}

pub async fn grant_document_access(
    identity: IdentityHeaders,
    State(state): State<AppState>,
    Path(document_id): Path<Uuid>,
    Json(body): Json<GrantAccessRequest>,
) -> Result<StatusCode, CasesServiceError> {
    let actor = Actor {
        user_id: identity.user_id,
        role: identity.role,
    };
    let level = AccessLevel::parse(&body.level).ok_or_else(|| {
        CasesServiceError::Validation(vec![FieldViolation::new(
            "level",
            format!("unknown access level `{}`", body.level),
        )])
    })?;
    let usecase = GrantDocumentAccessUseCase {
        documents: state.document_repo(),
        cases: state.case_repo(),
        users: state.user_repo(),
    };
    usecase
        .execute(
            &actor,
            document_id,
            GrantDocumentAccessInput {
                user_id: body.user_id,
                level,
            },
        )
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

// ── POST / DELETE /documents/{id}/favorite ───────────────────────────────────

pub async fn favorite_document(
    identity: IdentityHeaders,
    State(state): State<AppState>,
    Path(document_id): Path<Uuid>,
) -> Result<StatusCode, CasesServiceError> {
    set_favorite(identity, state, document_id, true).await
}

pub async fn unfavorite_document(
    identity: IdentityHeaders,
    State(state): State<AppState>,
    Path(document_id): Path<Uuid>,
) -> Result<StatusCode, CasesServiceError> {
    set_favorite(identity, state, document_id, false).await
}

async fn set_favorite(
    identity: IdentityHeaders,
    state: AppState,
    document_id: Uuid,
    favorite: bool,
) -> Result<StatusCode, CasesServiceError> {
    let actor = Actor {
        user_id: identity.user_id,
        role: identity.role,
    };
    let usecase = SetDocumentFavoriteUseCase {
        documents: state.document_repo(),
        cases: state.case_repo(),
    };
    usecase.execute(&actor, document_id, favorite).await?;
    Ok(StatusCode::NO_CONTENT)
}
