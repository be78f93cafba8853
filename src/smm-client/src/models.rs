//! Wire types for the SMM backend API

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Response of the auth check endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthStatus {
    /// Status string (`"ok"` when the token is accepted)
    pub status: String,
}

/// Profile of the signed-in user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: i64,
    pub name: String,
    pub login: String,
    #[serde(default)]
    pub is_admin: bool,
}

/// Public part of another user's profile
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserPublicProfile {
    pub id: i64,
    pub name: String,
}

/// A permission granted to an organization member
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRight {
    /// Permission name (e.g. `"owner"`)
    pub name: String,
    /// Whether the member may grant this permission to others
    #[serde(default)]
    pub can_grant: bool,
}

/// Member of an organization with their rights
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrganizationUser {
    pub user: UserPublicProfile,
    #[serde(default)]
    pub rights: Vec<UserRight>,
}

/// Organization as listed or created
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Organization {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
}

/// Full body of the organization detail endpoint.
///
/// Known fields are lifted out; anything else the backend sends is kept in
/// `extra`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrganizationInfo {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Bot registered for an organization
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bot {
    /// Bot identifier (`bot_id` on the wire)
    #[serde(alias = "bot_id")]
    pub id: i64,
    #[serde(default)]
    pub organization_id: Option<i64>,
}

/// Messaging channel linked to an organization through a bot
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Channel {
    pub id: i64,
    #[serde(default)]
    pub bot_id: Option<i64>,
}

// Request bodies

#[derive(Debug, Serialize)]
pub(crate) struct SignInRequest<'a> {
    pub login: &'a str,
    pub password: &'a str,
}

#[derive(Debug, Serialize)]
pub(crate) struct RegisterRequest<'a> {
    pub login: &'a str,
    pub password: &'a str,
    pub name: &'a str,
}

#[derive(Debug, Serialize)]
pub(crate) struct CreateOrganizationRequest<'a> {
    pub name: &'a str,
    pub description: &'a str,
}

#[derive(Debug, Serialize)]
pub(crate) struct AddBotRequest<'a> {
    pub token: &'a str,
}

#[derive(Debug, Serialize)]
pub(crate) struct ChannelRequest {
    pub id: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bot_id: Option<i64>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_bot_accepts_backend_field_name() {
        let bot: Bot =
            serde_json::from_value(serde_json::json!({"bot_id": 7, "organization_id": 3}))
                .unwrap();
        assert_eq!(
            bot,
            Bot {
                id: 7,
                organization_id: Some(3)
            }
        );
    }

    #[test]
    fn test_organization_info_keeps_unknown_fields() {
        let info: OrganizationInfo = serde_json::from_value(serde_json::json!({
            "id": 1,
            "name": "Acme",
            "description": null,
            "owner": "alice"
        }))
        .unwrap();
        assert_eq!(info.name.as_deref(), Some("Acme"));
        assert_eq!(info.description, None);
        assert_eq!(info.extra.get("owner"), Some(&serde_json::json!("alice")));
    }

    #[test]
    fn test_channel_request_omits_missing_bot() {
        let body = serde_json::to_value(ChannelRequest {
            id: -100123,
            bot_id: None,
        })
        .unwrap();
        assert_eq!(body, serde_json::json!({"id": -100123}));
    }
}
