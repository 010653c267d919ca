use chrono::{Duration, Utc};
use uuid::Uuid;

use causelist_cases::domain::case::{Assignment, CaseStatus, Parties, Party};
use causelist_cases::error::CasesServiceError;
use causelist_cases::usecase::case::{
    CreateCaseInput, CreateCaseUseCase, DeleteCaseUseCase, GetCaseUseCase, UpdateCaseInput,
    UpdateCaseUseCase,
};
use causelist_cases::usecase::notify::NotifyCaseCreatedUseCase;
use causelist_domain::role::Role;

use crate::helpers::{SpyNotifier, TestStore, actor, test_case, test_user};

fn base_input() -> CreateCaseInput {
    CreateCaseInput {
        title: "Nair v. Veritas Holdings".to_owned(),
        case_number: None,
        case_type: "civil".to_owned(),
        status: None,
        court: Some("City Civil Court".to_owned()),
        description: None,
        is_urgent: false,
        filing_date: None,
        hearing_date: None,
        next_hearing_date: None,
        lawyers: vec![],
        clients: vec![],
        parties: Parties::default(),
        advocates: vec![],
        stakeholders: vec![],
    }
}

// ── CreateCase ───────────────────────────────────────────────────────────────

#[tokio::test]
async fn should_assign_creating_lawyer_as_sole_primary() {
    let store = TestStore::new();
    let lawyer = test_user(Role::Lawyer);
    store.seed_user(lawyer.clone());
    let usecase = CreateCaseUseCase {
        cases: store.clone(),
        users: store.clone(),
    };

    let outcome = usecase.execute(&actor(&lawyer), base_input()).await.unwrap();

    let case = outcome.case;
    assert_eq!(case.lawyers.len(), 1);
    assert!(case.lawyers[0].is_primary);
    assert_eq!(case.lawyers[0].user_id, Some(lawyer.id));
    assert_eq!(case.lawyers[0].email, lawyer.email);
    assert_eq!(case.lawyer_id, Some(lawyer.id));
    assert_eq!(store.cases.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn should_generate_case_number_from_case_type() {
    let store = TestStore::new();
    let admin = test_user(Role::Admin);
    let usecase = CreateCaseUseCase {
        cases: store.clone(),
        users: store.clone(),
    };

    let mut input = base_input();
    input.case_type = "criminal".to_owned();
    let outcome = usecase.execute(&actor(&admin), input).await.unwrap();

    assert!(outcome.case.case_number.starts_with("CRM-"));
}

#[tokio::test]
async fn should_keep_explicit_case_number_trimmed() {
    let store = TestStore::new();
    let admin = test_user(Role::Admin);
    let usecase = CreateCaseUseCase {
        cases: store.clone(),
        users: store.clone(),
    };

    let mut input = base_input();
    input.case_number = Some("  HC-2026-77  ".to_owned());
    let outcome = usecase.execute(&actor(&admin), input).await.unwrap();

    assert_eq!(outcome.case.case_number, "HC-2026-77");
}

#[tokio::test]
async fn should_reject_duplicate_case_number() {
    let store = TestStore::new();
    let admin = test_user(Role::Admin);
    let existing = test_case(Uuid::now_v7());
    let mut input = base_input();
    input.case_number = Some(existing.case_number.clone());
    store.seed_case(existing);

    let usecase = CreateCaseUseCase {
        cases: store.clone(),
        users: store.clone(),
    };
    let result = usecase.execute(&actor(&admin), input).await;

    assert!(matches!(result, Err(CasesServiceError::CaseNumberTaken)));
    assert_eq!(store.cases.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn should_collect_every_violation_in_one_response() {
    let store = TestStore::new();
    let admin = test_user(Role::Admin);
    let usecase = CreateCaseUseCase {
        cases: store.clone(),
        users: store.clone(),
    };

    let mut input = base_input();
    input.title = "   ".to_owned();
    input.filing_date = Some(Utc::now().date_naive() + Duration::days(2));
    input.parties = Parties {
        petitioner: vec![Party::default()],
        respondent: vec![],
    };
    let result = usecase.execute(&actor(&admin), input).await;

    let Err(CasesServiceError::Validation(violations)) = result else {
        panic!("expected a validation error");
    };
    let fields: Vec<&str> = violations.iter().map(|v| v.field.as_str()).collect();
    assert!(fields.contains(&"title"));
    assert!(fields.contains(&"filing_date"));
    assert!(fields.contains(&"parties.petitioner[0].name"));
}

// ── UpdateCase ───────────────────────────────────────────────────────────────

#[tokio::test]
async fn should_reject_case_number_already_used_on_update() {
    let store = TestStore::new();
    let admin = test_user(Role::Admin);
    let first = test_case(Uuid::now_v7());
    let second = test_case(Uuid::now_v7());
    store.seed_case(first.clone());
    store.seed_case(second.clone());

    let usecase = UpdateCaseUseCase {
        cases: store.clone(),
    };
    let input = UpdateCaseInput {
        case_number: Some(first.case_number.clone()),
        ..UpdateCaseInput::default()
    };
    let result = usecase.execute(&actor(&admin), second.id, input).await;

    assert!(matches!(result, Err(CasesServiceError::CaseNumberTaken)));
}

#[tokio::test]
async fn should_replace_assignment_list_and_move_primary() {
    let store = TestStore::new();
    let admin = test_user(Role::Admin);
    let old_lawyer = test_user(Role::Lawyer);
    let new_lawyer = test_user(Role::Lawyer);
    let mut case = test_case(Uuid::now_v7());
    case.lawyers = vec![Assignment::from_user(&old_lawyer, "lead")];
    case.normalize();
    store.seed_case(case.clone());

    let usecase = UpdateCaseUseCase {
        cases: store.clone(),
    };
    let input = UpdateCaseInput {
        lawyers: Some(vec![
            Assignment {
                name: "Dana Whitfield".to_owned(),
                email: "dana@chambers.example".to_owned(),
                ..Assignment::default()
            },
            Assignment::from_user(&new_lawyer, "lead"),
        ]),
        ..UpdateCaseInput::default()
    };
    let updated = usecase
        .execute(&actor(&admin), case.id, input)
        .await
        .unwrap()
        .case;

    assert_eq!(updated.lawyers.len(), 2);
    assert_eq!(updated.lawyers.iter().filter(|a| a.is_primary).count(), 1);
    assert!(updated.lawyers[1].is_primary);
    assert_eq!(
        updated.lawyers.iter().map(|a| a.position).collect::<Vec<_>>(),
        vec![0, 1]
    );
    assert_eq!(updated.lawyer_id, Some(new_lawyer.id));

    let stored = store.cases.lock().unwrap();
    let persisted = stored.iter().find(|c| c.id == case.id).unwrap();
    assert_eq!(persisted.lawyer_id, Some(new_lawyer.id));
}

#[tokio::test]
async fn should_clear_optional_fields_with_empty_strings() {
    let store = TestStore::new();
    let admin = test_user(Role::Admin);
    let mut case = test_case(Uuid::now_v7());
    case.description = Some("First hearing adjourned.".to_owned());
    store.seed_case(case.clone());

    let usecase = UpdateCaseUseCase {
        cases: store.clone(),
    };
    let input = UpdateCaseInput {
        court: Some(String::new()),
        description: Some("  ".to_owned()),
        ..UpdateCaseInput::default()
    };
    let updated = usecase
        .execute(&actor(&admin), case.id, input)
        .await
        .unwrap()
        .case;

    assert_eq!(updated.court, None);
    assert_eq!(updated.description, None);
}

// ── Full lifecycle ───────────────────────────────────────────────────────────

#[tokio::test]
async fn should_walk_case_through_lifecycle() {
    let store = TestStore::new();
    let lawyer = test_user(Role::Lawyer);
    store.seed_user(lawyer.clone());
    let who = actor(&lawyer);

    let created = CreateCaseUseCase {
        cases: store.clone(),
        users: store.clone(),
    }
    .execute(&who, base_input())
    .await
    .unwrap()
    .case;

    let fetched = GetCaseUseCase {
        cases: store.clone(),
    }
    .execute(&who, created.id)
    .await
    .unwrap();
    assert_eq!(fetched.case_number, created.case_number);

    let input = UpdateCaseInput {
        status: Some(CaseStatus::Closed),
        ..UpdateCaseInput::default()
    };
    let updated = UpdateCaseUseCase {
        cases: store.clone(),
    }
    .execute(&who, created.id, input)
    .await
    .unwrap()
    .case;
    assert_eq!(updated.status, CaseStatus::Closed);
    assert!(updated.updated_at >= created.updated_at);

    DeleteCaseUseCase {
        cases: store.clone(),
    }
    .execute(&who, created.id)
    .await
    .unwrap();
    let missing = GetCaseUseCase {
        cases: store.clone(),
    }
    .execute(&who, created.id)
    .await;
    assert!(matches!(missing, Err(CasesServiceError::CaseNotFound)));
}

// ── Case-created fan-out ─────────────────────────────────────────────────────

#[tokio::test]
async fn should_notify_each_contact_once_after_create() {
    let store = TestStore::new();
    let notifier = SpyNotifier::new();
    let lawyer = test_user(Role::Lawyer);
    store.seed_user(lawyer.clone());

    let mut input = base_input();
    input.clients = vec![Assignment {
        name: "Rohan Mehta".to_owned(),
        email: "rohan@example.com".to_owned(),
        phone: "+15550148".to_owned(),
        ..Assignment::default()
    }];
    input.parties = Parties {
        // Same contact again, spelled differently.
        petitioner: vec![Party {
            name: "Rohan Mehta".to_owned(),
            email: "ROHAN@example.com".to_owned(),
            ..Party::default()
        }],
        respondent: vec![],
    };

    let outcome = CreateCaseUseCase {
        cases: store.clone(),
        users: store.clone(),
    }
    .execute(&actor(&lawyer), input)
    .await
    .unwrap();
    let summary = NotifyCaseCreatedUseCase {
        notifier: notifier.clone(),
    }
    .execute(&outcome.case)
    .await;

    assert_eq!(summary.emails_sent, 2);
    assert_eq!(summary.sms_sent, 2);
    assert_eq!(summary.failures, 0);
    let mut emails = notifier.emails.lock().unwrap().clone();
    emails.sort();
    assert_eq!(emails, vec![lawyer.email.clone(), "rohan@example.com".to_owned()]);
}
