use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use causelist_auth_types::identity::IdentityHeaders;
use causelist_domain::role::Role;

use crate::domain::access::Actor;
use crate::domain::user::User;
use crate::error::{CasesServiceError, FieldViolation};
use crate::state::AppState;
use crate::usecase::user::{
    CreateUserInput, CreateUserUseCase, GetUserUseCase, ListUsersUseCase,
};

// ── Response types ───────────────────────────────────────────────────────────

#[derive(Serialize)]
pub struct UserResponse {
    pub id: String,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub role: &'static str,
    #[serde(serialize_with = "causelist_core::serde::to_rfc3339_ms")]
    pub created_at: chrono::DateTime<chrono::Utc>,
    #[serde(serialize_with = "causelist_core::serde::to_rfc3339_ms")]
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        UserResponse {
            id: user.id.to_string(),
            name: user.name,
            email: user.email,
            phone: user.phone,
            role: user.role.as_str(),
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

fn parse_role(value: &str) -> Result<Role, CasesServiceError> {
    Role::parse(value).ok_or_else(|| {
        CasesServiceError::Validation(vec![FieldViolation::new(
            "role",
            format!("unknown role `{value}`"),
        )])
    })
}

// ── POST /users ──────────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct CreateUserRequest {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub role: String,
}

pub async fn create_user(
    identity: IdentityHeaders,
    State(state): State<AppState>,
    Json(body): Json<CreateUserRequest>,
) -> Result<(StatusCode, Json<UserResponse>), CasesServiceError> {
    let actor = Actor {
        user_id: identity.user_id,
        role: identity.role,
    };
    let role = parse_role(&body.role)?;
    let usecase = CreateUserUseCase {
        users: state.user_repo(),
    };
    let user = usecase
        .execute(
            &actor,
            CreateUserInput {
                name: body.name,
                email: body.email,
                phone: body.phone,
                role,
            },
        )
        .await?;
    Ok((StatusCode::CREATED, Json(UserResponse::from(user))))
}

// ── GET /users/@me ───────────────────────────────────────────────────────────

pub async fn get_me(
    identity: IdentityHeaders,
    State(state): State<AppState>,
) -> Result<Json<UserResponse>, CasesServiceError> {
    let actor = Actor {
        user_id: identity.user_id,
        role: identity.role,
    };
    let usecase = GetUserUseCase {
        users: state.user_repo(),
    };
    let user = usecase.execute(&actor, identity.user_id).await?;
    Ok(Json(UserResponse::from(user)))
}

// ── GET /users/{id} ──────────────────────────────────────────────────────────

pub async fn get_user(
    identity: IdentityHeaders,
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
) -> Result<Json<UserResponse>, CasesServiceError> {
    let actor = Actor {
        user_id: identity.user_id,
        role: identity.role,
    };
    let usecase = GetUserUseCase {
        users: state.user_repo(),
    };
    let user = usecase.execute(&actor, user_id).await?;
    Ok(Json(UserResponse::from(user)))
}

// ── GET /users ───────────────────────────────────────────────────────────────

#[derive(Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub struct UserListQuery {
    pub per_page: Option<u32>,
    pub page: Option<u32>,
    pub role: Option<String>,
}

pub async fn list_users(
    identity: IdentityHeaders,
    State(state): State<AppState>,
    Query(query): Query<UserListQuery>,
) -> Result<Json<Vec<UserResponse>>, CasesServiceError> {
    let actor = Actor {
        user_id: identity.user_id,
        role: identity.role,
    };
    let role = query.role.as_deref().map(parse_role).transpose()?;
    let page = super::page_request(query.per_page, query.page);
    let usecase = ListUsersUseCase {
        users: state.user_repo(),
    };
    let users = usecase.execute(&actor, role, page).await?;
    Ok(Json(users.into_iter().map(Into::into).collect()))
}
