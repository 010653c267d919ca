use bytes::Bytes;
use uuid::Uuid;

use causelist_cases::domain::case::Assignment;
use causelist_cases::domain::document::AccessLevel;
use causelist_cases::error::CasesServiceError;
use causelist_cases::usecase::document::{
    DeleteDocumentUseCase, GetDocumentUseCase, GrantDocumentAccessInput,
    GrantDocumentAccessUseCase, SetDocumentFavoriteUseCase, UploadDocumentInput,
    UploadDocumentUseCase,
};
use causelist_domain::role::Role;

use crate::helpers::{FakeBlobStore, TestStore, actor, test_case, test_user};

const PDF_BYTES: &[u8] = b"%PDF-1.7 petition body";

fn upload_input(case_id: Uuid) -> UploadDocumentInput {
    UploadDocumentInput {
        case_id,
        name: "petition.pdf".to_owned(),
        bytes: Bytes::from_static(PDF_BYTES),
        mime_type: "application/pdf".to_owned(),
        category: Some("pleadings".to_owned()),
    }
}

// ── Upload and read ──────────────────────────────────────────────────────────

#[tokio::test]
async fn should_upload_and_serve_document_with_signed_url() {
    let store = TestStore::new();
    let blobs = FakeBlobStore::new();
    let lawyer = test_user(Role::Lawyer);
    let mut case = test_case(Uuid::now_v7());
    case.lawyers = vec![Assignment::from_user(&lawyer, "lead")];
    case.normalize();
    store.seed_case(case.clone());

    let document = UploadDocumentUseCase {
        documents: store.clone(),
        cases: store.clone(),
        blobs: blobs.clone(),
    }
    .execute(&actor(&lawyer), upload_input(case.id))
    .await
    .unwrap();

    assert_eq!(document.case_id, case.id);
    assert_eq!(document.size, PDF_BYTES.len() as i64);
    assert_eq!(document.uploaded_by, lawyer.id);
    assert!(document.storage_path.starts_with(&format!("cases/{}/", case.id)));
    assert!(document.storage_path.ends_with("petition.pdf"));
    assert_eq!(
        document.url,
        format!("https://files.test/{}", document.storage_path)
    );
    assert_eq!(blobs.uploads.lock().unwrap().len(), 1);

    let view = GetDocumentUseCase {
        documents: store.clone(),
        cases: store.clone(),
        blobs: blobs.clone(),
    }
    .execute(&actor(&lawyer), document.id)
    .await
    .unwrap();
    assert!(!view.favorite);
    let url = view.download_url.unwrap();
    assert!(url.contains(&document.storage_path));
    assert!(url.contains("expires="));
}

#[tokio::test]
async fn should_let_any_case_member_upload() {
    let store = TestStore::new();
    let blobs = FakeBlobStore::new();
    let member = test_user(Role::Client);
    let represented = test_user(Role::Client);
    let mut case = test_case(Uuid::now_v7());
    case.clients = vec![
        Assignment::from_user(&represented, "primary"),
        Assignment {
            user_id: Some(member.id),
            name: member.name.clone(),
            email: member.email.clone(),
            ..Assignment::default()
        },
    ];
    case.normalize();
    store.seed_case(case.clone());

    let document = UploadDocumentUseCase {
        documents: store.clone(),
        cases: store.clone(),
        blobs: blobs.clone(),
    }
    .execute(&actor(&member), upload_input(case.id))
    .await
    .unwrap();

    assert_eq!(document.uploaded_by, member.id);
    assert_eq!(store.documents.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn should_reject_empty_upload() {
    let store = TestStore::new();
    let blobs = FakeBlobStore::new();
    let lawyer = test_user(Role::Lawyer);
    let mut case = test_case(Uuid::now_v7());
    case.lawyers = vec![Assignment::from_user(&lawyer, "lead")];
    case.normalize();
    store.seed_case(case.clone());

    let mut input = upload_input(case.id);
    input.name = "   ".to_owned();
    input.bytes = Bytes::new();
    let result = UploadDocumentUseCase {
        documents: store.clone(),
        cases: store.clone(),
        blobs: blobs.clone(),
    }
    .execute(&actor(&lawyer), input)
    .await;

    let Err(CasesServiceError::Validation(violations)) = result else {
        panic!("expected a validation error");
    };
    let fields: Vec<&str> = violations.iter().map(|v| v.field.as_str()).collect();
    assert!(fields.contains(&"name"));
    assert!(fields.contains(&"content"));
    assert!(blobs.uploads.lock().unwrap().is_empty());
}

// ── Favorites ────────────────────────────────────────────────────────────────

#[tokio::test]
async fn should_mark_and_clear_favorites_per_user() {
    let store = TestStore::new();
    let blobs = FakeBlobStore::new();
    let lawyer = test_user(Role::Lawyer);
    let represented = test_user(Role::Client);
    let mut case = test_case(Uuid::now_v7());
    case.lawyers = vec![Assignment::from_user(&lawyer, "lead")];
    case.clients = vec![Assignment::from_user(&represented, "primary")];
    case.normalize();
    store.seed_case(case.clone());

    let document = UploadDocumentUseCase {
        documents: store.clone(),
        cases: store.clone(),
        blobs: blobs.clone(),
    }
    .execute(&actor(&lawyer), upload_input(case.id))
    .await
    .unwrap();

    let favorites = SetDocumentFavoriteUseCase {
        documents: store.clone(),
        cases: store.clone(),
    };
    assert!(favorites.execute(&actor(&lawyer), document.id, true).await.unwrap());
    // Marking twice changes nothing.
    assert!(!favorites.execute(&actor(&lawyer), document.id, true).await.unwrap());

    let reader = GetDocumentUseCase {
        documents: store.clone(),
        cases: store.clone(),
        blobs: blobs.clone(),
    };
    let lawyer_view = reader.execute(&actor(&lawyer), document.id).await.unwrap();
    assert!(lawyer_view.favorite);
    let client_view = reader.execute(&actor(&represented), document.id).await.unwrap();
    assert!(!client_view.favorite);

    assert!(favorites.execute(&actor(&lawyer), document.id, false).await.unwrap());
    let cleared = reader.execute(&actor(&lawyer), document.id).await.unwrap();
    assert!(!cleared.favorite);
}

// ── Grants ───────────────────────────────────────────────────────────────────

#[tokio::test]
async fn should_extend_visibility_via_grant() {
    let store = TestStore::new();
    let blobs = FakeBlobStore::new();
    let lawyer = test_user(Role::Lawyer);
    let outsider = test_user(Role::Client);
    store.seed_user(outsider.clone());
    let mut case = test_case(Uuid::now_v7());
    case.lawyers = vec![Assignment::from_user(&lawyer, "lead")];
    case.normalize();
    store.seed_case(case.clone());

    let document = UploadDocumentUseCase {
        documents: store.clone(),
        cases: store.clone(),
        blobs: blobs.clone(),
    }
    .execute(&actor(&lawyer), upload_input(case.id))
    .await
    .unwrap();

    let reader = GetDocumentUseCase {
        documents: store.clone(),
        cases: store.clone(),
        blobs: blobs.clone(),
    };
    let denied = reader.execute(&actor(&outsider), document.id).await;
    assert!(matches!(denied, Err(CasesServiceError::Forbidden)));

    GrantDocumentAccessUseCase {
        documents: store.clone(),
        cases: store.clone(),
        users: store.clone(),
    }
    .execute(
        &actor(&lawyer),
        document.id,
        GrantDocumentAccessInput {
            user_id: outsider.id,
            level: AccessLevel::View,
        },
    )
    .await
    .unwrap();

    let view = reader.execute(&actor(&outsider), document.id).await.unwrap();
    assert_eq!(view.document.access.len(), 1);
    assert_eq!(view.document.access[0].user_id, outsider.id);
    assert_eq!(view.document.access[0].level, AccessLevel::View);
}

#[tokio::test]
async fn should_require_registered_grantee() {
    let store = TestStore::new();
    let blobs = FakeBlobStore::new();
    let lawyer = test_user(Role::Lawyer);
    let mut case = test_case(Uuid::now_v7());
    case.lawyers = vec![Assignment::from_user(&lawyer, "lead")];
    case.normalize();
    store.seed_case(case.clone());

    let document = UploadDocumentUseCase {
        documents: store.clone(),
        cases: store.clone(),
        blobs: blobs.clone(),
    }
    .execute(&actor(&lawyer), upload_input(case.id))
    .await
    .unwrap();

    let result = GrantDocumentAccessUseCase {
        documents: store.clone(),
        cases: store.clone(),
        users: store.clone(),
    }
    .execute(
        &actor(&lawyer),
        document.id,
        GrantDocumentAccessInput {
            user_id: Uuid::now_v7(),
            level: AccessLevel::Download,
        },
    )
    .await;

    assert!(matches!(result, Err(CasesServiceError::UserNotFound)));
}

#[tokio::test]
async fn should_limit_grants_to_document_managers() {
    let store = TestStore::new();
    let blobs = FakeBlobStore::new();
    let lawyer = test_user(Role::Lawyer);
    let represented = test_user(Role::Client);
    let member = test_user(Role::Client);
    let grantee = test_user(Role::Client);
    store.seed_user(grantee.clone());
    let mut case = test_case(Uuid::now_v7());
    case.lawyers = vec![Assignment::from_user(&lawyer, "lead")];
    case.clients = vec![
        Assignment::from_user(&represented, "primary"),
        Assignment {
            user_id: Some(member.id),
            name: member.name.clone(),
            email: member.email.clone(),
            ..Assignment::default()
        },
    ];
    case.normalize();
    store.seed_case(case.clone());

    let document = UploadDocumentUseCase {
        documents: store.clone(),
        cases: store.clone(),
        blobs: blobs.clone(),
    }
    .execute(&actor(&lawyer), upload_input(case.id))
    .await
    .unwrap();

    let grants = GrantDocumentAccessUseCase {
        documents: store.clone(),
        cases: store.clone(),
        users: store.clone(),
    };
    let input = GrantDocumentAccessInput {
        user_id: grantee.id,
        level: AccessLevel::View,
    };
    // A plain list member can read the document but not widen it.
    let denied = grants
        .execute(
            &actor(&member),
            document.id,
            GrantDocumentAccessInput {
                user_id: grantee.id,
                level: AccessLevel::View,
            },
        )
        .await;
    assert!(matches!(denied, Err(CasesServiceError::Forbidden)));

    grants.execute(&actor(&represented), document.id, input).await.unwrap();
}

// ── Delete ───────────────────────────────────────────────────────────────────

#[tokio::test]
async fn should_delete_document_and_blob_bytes() {
    let store = TestStore::new();
    let blobs = FakeBlobStore::new();
    let lawyer = test_user(Role::Lawyer);
    let mut case = test_case(Uuid::now_v7());
    case.lawyers = vec![Assignment::from_user(&lawyer, "lead")];
    case.normalize();
    store.seed_case(case.clone());

    let document = UploadDocumentUseCase {
        documents: store.clone(),
        cases: store.clone(),
        blobs: blobs.clone(),
    }
    .execute(&actor(&lawyer), upload_input(case.id))
    .await
    .unwrap();

    let deleter = DeleteDocumentUseCase {
        documents: store.clone(),
        cases: store.clone(),
        blobs: blobs.clone(),
    };
    deleter.execute(&actor(&lawyer), document.id).await.unwrap();

    assert!(store.documents.lock().unwrap().is_empty());
    assert_eq!(
        blobs.deleted.lock().unwrap().as_slice(),
        &[document.storage_path.clone()]
    );

    let repeat = deleter.execute(&actor(&lawyer), document.id).await;
    assert!(matches!(repeat, Err(CasesServiceError::DocumentNotFound)));
}
