use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::identity;

/// Label used for the name key when an account is created without a username.
pub const DEFAULT_NAME_LABEL: &str = "user";

#[derive(Debug, Clone, PartialEq)]
pub struct Account {
    pub id: Uuid,
    pub name_key: String,
    pub slug: String,
    pub tenant_id: String,
    pub username: String,
    pub password_digest: String,
    pub email: String,
    pub description: String,
    pub given_name: String,
    pub middle_names: String,
    pub family_name: String,
    pub is_active: bool,
    pub is_logical_deleted: bool,
    pub created_by: Option<Uuid>,
    pub updated_by: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Who originated a write, used to fill the audit fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Actor {
    /// The account acts on itself (sign-up, self-service update).
    SelfService,
    /// System or administrative action with no known account behind it.
    System,
}

/// Input for building a brand new account. The digest must already be computed.
#[derive(Debug, Clone)]
pub struct NewAccount {
    pub username: String,
    pub password_digest: String,
    pub email: String,
    pub tenant_id: String,
}

impl Account {
    /// Builds a fresh account: assigns the id, name key and slug, and stamps
    /// the audit fields.
    pub fn create(new: NewAccount, actor: Actor) -> Self {
        let id = identity::new_identifier();
        let name_key = identity::derive_name_key(&new.username, DEFAULT_NAME_LABEL);
        let slug = identity::derive_slug(&name_key, id);
        let now = Utc::now();
        let author = match actor {
            Actor::SelfService => Some(id),
            Actor::System => None,
        };

        Self {
            id,
            name_key,
            slug,
            tenant_id: new.tenant_id,
            username: new.username,
            password_digest: new.password_digest,
            email: new.email,
            description: String::new(),
            given_name: String::new(),
            middle_names: String::new(),
            family_name: String::new(),
            is_active: true,
            is_logical_deleted: false,
            created_by: author,
            updated_by: author,
            created_at: now,
            updated_at: now,
        }
    }

    /// Refreshes the derived and audit fields after a mutation.
    pub fn touch(&mut self, actor: Actor) {
        self.slug = identity::derive_slug(&self.name_key, self.id);
        self.updated_by = match actor {
            Actor::SelfService => Some(self.id),
            Actor::System => None,
        };
        self.updated_at = Utc::now();
    }

    /// Logically deleted accounts are kept for audit but never authenticate.
    pub fn is_live(&self) -> bool {
        !self.is_logical_deleted
    }
}
