use chrono::Utc;
use uuid::Uuid;

use causelist_domain::pagination::PageRequest;
use causelist_domain::role::Role;

use crate::domain::access::Actor;
use crate::domain::repository::UserRepository;
use crate::domain::user::User;
use crate::error::{CasesServiceError, FieldViolation};

// ── CreateUser ───────────────────────────────────────────────────────────────

pub struct CreateUserInput {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub role: Role,
}

/// Admin-only registration. Email is unique and kept verbatim apart from
/// trimming; a duplicate surfaces as `EmailTaken`.
pub struct CreateUserUseCase<R: UserRepository> {
    pub users: R,
}

impl<R: UserRepository> CreateUserUseCase<R> {
    pub async fn execute(
        &self,
        actor: &Actor,
        input: CreateUserInput,
    ) -> Result<User, CasesServiceError> {
        if !actor.role.is_admin() {
            return Err(CasesServiceError::Forbidden);
        }
        let mut violations = Vec::new();
        if input.name.trim().is_empty() {
            violations.push(FieldViolation::new("name", "name is required"));
        }
        let email = input.email.trim().to_owned();
        if email.is_empty() || !email.contains('@') {
            violations.push(FieldViolation::new("email", "email is not valid"));
        }
        if !violations.is_empty() {
            return Err(CasesServiceError::Validation(violations));
        }
        let now = Utc::now();
        let user = User {
            id: Uuid::now_v7(),
            name: input.name.trim().to_owned(),
            email,
            phone: input.phone.filter(|p| !p.trim().is_empty()),
            role: input.role,
            created_at: now,
            updated_at: now,
        };
        self.users.create(&user).await?;
        Ok(user)
    }
}

// ── GetUser ──────────────────────────────────────────────────────────────────

/// Fetch one user: self, or anyone when the caller is an admin.
pub struct GetUserUseCase<R: UserRepository> {
    pub users: R,
}

impl<R: UserRepository> GetUserUseCase<R> {
    pub async fn execute(&self, actor: &Actor, user_id: Uuid) -> Result<User, CasesServiceError> {
        let user = self
            .users
            .find_by_id(user_id)
            .await?
            .ok_or(CasesServiceError::UserNotFound)?;
        if !actor.role.is_admin() && actor.user_id != user.id {
            return Err(CasesServiceError::Forbidden);
        }
        Ok(user)
    }
}

// ── ListUsers ────────────────────────────────────────────────────────────────

pub struct ListUsersUseCase<R: UserRepository> {
    pub users: R,
}

impl<R: UserRepository> ListUsersUseCase<R> {
    pub async fn execute(
        &self,
        actor: &Actor,
        role: Option<Role>,
        page: PageRequest,
    ) -> Result<Vec<User>, CasesServiceError> {
        if !actor.role.is_admin() {
            return Err(CasesServiceError::Forbidden);
        }
        self.users.list(role, page.clamped()).await
    }
}
