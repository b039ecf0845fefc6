use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::modules::account::application::domain::Account;

/// Outward view of an account. The password digest has no field here.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AccountView {
    #[schema(example = "123e4567-e89b-12d3-a456-426614174000")]
    pub id: Uuid,
    #[schema(example = "aquaman-k3x9q2m7p1zt")]
    pub name_key: String,
    #[schema(example = "aquaman-k3x9q2m7p1zt-123e4567e89b12d3a456426614174000")]
    pub slug: String,
    #[schema(example = "t1.example.com")]
    pub tenant_id: String,
    #[schema(example = "aquaman")]
    pub username: String,
    #[schema(example = "arthur@atlantis.io")]
    pub email: String,
    pub description: String,
    pub given_name: String,
    pub middle_names: String,
    pub family_name: String,
    pub is_active: bool,
    pub created_by: Option<Uuid>,
    pub updated_by: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Account> for AccountView {
    fn from(account: Account) -> Self {
        Self {
            id: account.id,
            name_key: account.name_key,
            slug: account.slug,
            tenant_id: account.tenant_id,
            username: account.username,
            email: account.email,
            description: account.description,
            given_name: account.given_name,
            middle_names: account.middle_names,
            family_name: account.family_name,
            is_active: account.is_active,
            created_by: account.created_by,
            updated_by: account.updated_by,
            created_at: account.created_at,
            updated_at: account.updated_at,
        }
    }
}

/// `{user, error}` envelope as documented in the API schema.
#[derive(Serialize, ToSchema)]
pub struct AccountResponseBody {
    pub user: Option<AccountView>,
    #[schema(example = "")]
    pub error: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::support::stubs::sample_account;

    #[test]
    fn test_view_never_carries_digest() {
        let account = sample_account();

        let json = serde_json::to_value(AccountView::from(account.clone())).unwrap();

        assert!(json.get("passwordDigest").is_none());
        assert!(!json.to_string().contains(&account.password_digest));
        assert_eq!(json["username"], "aquaman");
        assert_eq!(json["tenantId"], "t1");
        assert_eq!(json["slug"], account.slug);
    }
}
