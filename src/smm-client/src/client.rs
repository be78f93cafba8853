//! SMM backend client implementation

use reqwest::header::AUTHORIZATION;
use reqwest::{Method, RequestBuilder, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use smm_common::{ClientConfig, create_client};
use smm_login::{ExposeSecret, SessionManager};
use tracing::{debug, info, warn};

use crate::models::{
    AddBotRequest, AuthStatus, Bot, Channel, ChannelRequest, CreateOrganizationRequest,
    Organization, OrganizationInfo, OrganizationUser, RegisterRequest, SignInRequest, UserProfile,
};
use crate::{ApiError, ApiResult};

/// Client for the SMM backend.
///
/// Cheap to clone; clones share the HTTP connection pool and the session.
#[derive(Clone)]
pub struct SmmClient {
    client: reqwest::Client,
    config: ClientConfig,
    session: SessionManager,
}

impl SmmClient {
    /// Create a client for the configured backend using the given session.
    pub fn new(config: ClientConfig, session: SessionManager) -> ApiResult<Self> {
        let client = create_client(&config).map_err(ApiError::Client)?;
        Ok(Self {
            client,
            config,
            session,
        })
    }

    /// Get the API base URL
    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }

    /// The session this client authenticates with
    pub fn session(&self) -> &SessionManager {
        &self.session
    }

    // ------------------------------------------------------------------
    // Transport
    // ------------------------------------------------------------------

    /// Build a request, attaching the bearer token when one is stored.
    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = self.config.endpoint(path);
        debug!(method = %method, url = %url, "Sending backend request");

        let builder = self.client.request(method, &url);
        match self.session.token() {
            Some(token) => {
                builder.header(AUTHORIZATION, format!("Bearer {}", token.expose_secret()))
            }
            None => builder,
        }
    }

    async fn get(&self, path: &str) -> ApiResult<Value> {
        let endpoint = format!("GET {path}");
        self.execute(self.request(Method::GET, path), endpoint).await
    }

    async fn send_json<B: Serialize + ?Sized>(
        &self,
        method: Method,
        path: &str,
        body: &B,
    ) -> ApiResult<Value> {
        let endpoint = format!("{method} {path}");
        self.execute(self.request(method, path).json(body), endpoint)
            .await
    }

    /// Send the request and unwrap the JSON body.
    ///
    /// A 401 clears the session's authentication flag before failing.
    async fn execute(&self, builder: RequestBuilder, endpoint: String) -> ApiResult<Value> {
        let response = match builder.send().await {
            Ok(response) => response,
            Err(source) => return Err(ApiError::Transport { endpoint, source }),
        };

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED {
            warn!(endpoint = %endpoint, "Backend rejected credentials");
            self.session.mark_unauthenticated();
            return Err(ApiError::Unauthorized { endpoint });
        }

        let text = match response.text().await {
            Ok(text) => text,
            Err(source) => return Err(ApiError::Transport { endpoint, source }),
        };

        if !status.is_success() {
            let reason = serde_json::from_str::<Value>(&text)
                .ok()
                .as_ref()
                .and_then(reason_of);
            warn!(endpoint = %endpoint, status = %status, reason = ?reason, "Backend error response");
            return Err(ApiError::Status {
                endpoint,
                status: status.as_u16(),
                reason,
            });
        }

        if text.trim().is_empty() {
            return Ok(Value::Null);
        }

        serde_json::from_str(&text).map_err(|e| ApiError::Decode {
            endpoint,
            message: e.to_string(),
        })
    }

    // ------------------------------------------------------------------
    // Authentication
    // ------------------------------------------------------------------

    /// Create an account, then sign in with it.
    pub async fn register(&self, login: &str, password: &str, name: &str) -> ApiResult<()> {
        self.send_json(
            Method::POST,
            "/auth/register",
            &RegisterRequest {
                login,
                password,
                name,
            },
        )
        .await?;
        info!(login = %login, "Account registered");
        self.login(login, password).await
    }

    /// Sign in and persist the issued token.
    pub async fn login(&self, login: &str, password: &str) -> ApiResult<()> {
        let path = "/auth/sign-in";
        let mut body = self
            .send_json(Method::POST, path, &SignInRequest { login, password })
            .await?;
        let endpoint = format!("POST {path}");
        let token: String = take_field(&endpoint, &mut body, "token")?;
        if token.is_empty() {
            return Err(ApiError::Decode {
                endpoint,
                message: "empty `token`".to_string(),
            });
        }

        self.session.store_token(token)?;
        info!(login = %login, "Signed in");
        Ok(())
    }

    /// Ask the backend whether the stored token is still valid.
    pub async fn sync_auth(&self) -> ApiResult<AuthStatus> {
        let path = "/auth/check";
        let body = self.get(path).await?;
        let status = decode(&format!("GET {path}"), body)?;
        self.session.mark_authenticated();
        Ok(status)
    }

    /// Profile of the signed-in user.
    pub async fn get_profile(&self) -> ApiResult<UserProfile> {
        let path = "/auth/profile";
        let mut body = self.get(path).await?;
        take_field(&format!("GET {path}"), &mut body, "profile")
    }

    /// Forget the stored token.
    pub fn logout(&self) -> ApiResult<bool> {
        Ok(self.session.logout()?)
    }

    // ------------------------------------------------------------------
    // Organizations
    // ------------------------------------------------------------------

    pub async fn create_organization(
        &self,
        name: &str,
        description: &str,
    ) -> ApiResult<Organization> {
        let path = "/organizations";
        let mut body = self
            .send_json(
                Method::POST,
                path,
                &CreateOrganizationRequest { name, description },
            )
            .await?;
        take_field(&format!("POST {path}"), &mut body, "organization")
    }

    /// Organizations the signed-in user belongs to.
    pub async fn get_organizations(&self) -> ApiResult<Vec<Organization>> {
        let path = "/organizations";
        let mut body = self.get(path).await?;
        take_field(&format!("GET {path}"), &mut body, "organizations")
    }

    /// Organization details; `None` when the backend answers with a reason.
    pub async fn get_organization_info(&self, id: i64) -> ApiResult<Option<OrganizationInfo>> {
        let path = format!("/organizations/{id}");
        let body = self.get(&path).await?;
        if soft_rejected(&path, &body) {
            return Ok(None);
        }
        decode(&format!("GET {path}"), body).map(Some)
    }

    /// Members of an organization; `None` when the backend answers with a reason.
    pub async fn get_organization_users(
        &self,
        id: i64,
    ) -> ApiResult<Option<Vec<OrganizationUser>>> {
        let path = format!("/organizations/{id}/users");
        let body = self.get(&path).await?;
        optional_field(&format!("GET {path}"), body, "users")
    }

    // ------------------------------------------------------------------
    // Bots
    // ------------------------------------------------------------------

    /// Bots of an organization; `None` when the backend answers with a reason.
    pub async fn get_organization_bots(&self, id: i64) -> ApiResult<Option<Vec<Bot>>> {
        let path = format!("/organizations/{id}/bots");
        let body = self.get(&path).await?;
        optional_field(&format!("GET {path}"), body, "bots")
    }

    /// Register a bot from its token and return the new bot id.
    ///
    /// Every failure, including transport errors, surfaces as
    /// [`ApiError::InvalidBotToken`] with the underlying error as its source.
    pub async fn create_organization_bot(&self, id: i64, token: &str) -> ApiResult<i64> {
        let path = format!("/organizations/{id}/bots");
        let endpoint = format!("POST {path}");

        let result = async {
            let mut body = self
                .send_json(Method::POST, &path, &AddBotRequest { token })
                .await?;
            if let Some(reason) = reason_of(&body) {
                return Err(ApiError::Rejected {
                    endpoint: endpoint.clone(),
                    reason,
                });
            }
            take_field::<i64>(&endpoint, &mut body, "id")
        }
        .await;

        result.map_err(|cause| {
            warn!(endpoint = %endpoint, error = %cause, "Bot registration failed");
            ApiError::InvalidBotToken {
                cause: Box::new(cause),
            }
        })
    }

    // ------------------------------------------------------------------
    // Channels
    // ------------------------------------------------------------------

    /// Channels of an organization; `None` when the backend answers with a reason.
    pub async fn get_channels(&self, id: i64) -> ApiResult<Option<Vec<Channel>>> {
        let path = format!("/organizations/{id}/channels");
        let body = self.get(&path).await?;
        optional_field(&format!("GET {path}"), body, "channels")
    }

    /// Link a channel to an organization through one of its bots.
    ///
    /// Returns the whole response body of any success response. A failed
    /// request surfaces as [`ApiError::ChannelUnavailable`].
    pub async fn add_channel(&self, id: i64, channel_id: i64, bot_id: i64) -> ApiResult<Value> {
        let path = format!("/organizations/{id}/channels");
        let endpoint = format!("POST {path}");

        let result = self
            .send_json(
                Method::POST,
                &path,
                &ChannelRequest {
                    id: channel_id,
                    bot_id: Some(bot_id),
                },
            )
            .await;

        result.map_err(|cause| {
            warn!(endpoint = %endpoint, error = %cause, "Channel link failed");
            ApiError::ChannelUnavailable {
                cause: Box::new(cause),
            }
        })
    }

    /// Unlink a channel; returns the remaining channels, or `None` when the
    /// backend answers with a reason.
    pub async fn delete_channel(&self, id: i64, channel_id: i64) -> ApiResult<Option<Vec<Channel>>> {
        let path = format!("/organizations/{id}/channels");
        let body = self
            .send_json(
                Method::DELETE,
                &path,
                &ChannelRequest {
                    id: channel_id,
                    bot_id: None,
                },
            )
            .await?;
        optional_field(&format!("DELETE {path}"), body, "channels")
    }
}

impl std::fmt::Debug for SmmClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SmmClient")
            .field("base_url", &self.config.base_url)
            .field("session", &self.session)
            .finish()
    }
}

/// The backend's `reason` field, when it carries a truthy value.
fn reason_of(body: &Value) -> Option<String> {
    match body.get("reason")? {
        Value::Null | Value::Bool(false) => None,
        Value::String(reason) if reason.is_empty() => None,
        Value::String(reason) => Some(reason.clone()),
        other => Some(other.to_string()),
    }
}

fn soft_rejected(path: &str, body: &Value) -> bool {
    match reason_of(body) {
        Some(reason) => {
            warn!(path = %path, reason = %reason, "Backend declined request");
            true
        }
        None => false,
    }
}

fn decode<T: DeserializeOwned>(endpoint: &str, body: Value) -> ApiResult<T> {
    serde_json::from_value(body).map_err(|e| ApiError::Decode {
        endpoint: endpoint.to_string(),
        message: e.to_string(),
    })
}

fn take_field<T: DeserializeOwned>(endpoint: &str, body: &mut Value, key: &str) -> ApiResult<T> {
    let value = body
        .get_mut(key)
        .map(Value::take)
        .ok_or_else(|| ApiError::Decode {
            endpoint: endpoint.to_string(),
            message: format!("missing field `{key}`"),
        })?;
    decode(endpoint, value)
}

fn optional_field<T: DeserializeOwned>(
    endpoint: &str,
    mut body: Value,
    key: &str,
) -> ApiResult<Option<T>> {
    if soft_rejected(endpoint, &body) {
        return Ok(None);
    }
    take_field(endpoint, &mut body, key).map(Some)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ApiErrorKind;
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use smm_login::MemoryStorage;
    use std::sync::Arc;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(server: &MockServer, session: SessionManager) -> SmmClient {
        let config = ClientConfig::default().with_backend_url(&format!("{}/api", server.uri()));
        SmmClient::new(config, session).expect("client")
    }

    fn signed_in(token: &str) -> SessionManager {
        SessionManager::new(Arc::new(MemoryStorage::with_token(token)))
    }

    fn json_response(status: u16, body: Value) -> ResponseTemplate {
        ResponseTemplate::new(status).set_body_raw(body.to_string(), "application/json")
    }

    #[tokio::test]
    async fn test_bearer_header_attached_when_token_present() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/organizations"))
            .and(header("Authorization", "Bearer tok-123"))
            .respond_with(json_response(200, json!({"organizations": []})))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server, signed_in("tok-123"));
        let orgs = client.get_organizations().await.expect("organizations");
        assert!(orgs.is_empty());
    }

    #[tokio::test]
    async fn test_no_auth_header_without_token() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/organizations"))
            .respond_with(json_response(200, json!({"organizations": []})))
            .mount(&server)
            .await;

        let client = client_for(&server, SessionManager::in_memory());
        client.get_organizations().await.expect("organizations");

        let requests = server.received_requests().await.expect("recording enabled");
        assert_eq!(requests.len(), 1);
        assert!(!requests[0].headers.contains_key("authorization"));
    }

    #[tokio::test]
    async fn test_empty_token_sends_no_auth_header() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/organizations"))
            .respond_with(json_response(200, json!({"organizations": []})))
            .mount(&server)
            .await;

        let session = signed_in("");
        assert!(!session.is_authenticated());
        let client = client_for(&server, session);
        client.get_organizations().await.expect("organizations");

        let requests = server.received_requests().await.expect("recording enabled");
        assert_eq!(requests.len(), 1);
        assert!(!requests[0].headers.contains_key("authorization"));
    }

    #[tokio::test]
    async fn test_login_rejects_empty_token() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/auth/sign-in"))
            .respond_with(json_response(200, json!({"token": ""})))
            .mount(&server)
            .await;

        let session = SessionManager::in_memory();
        let client = client_for(&server, session.clone());
        let err = client.login("alice", "pw").await.unwrap_err();
        assert_eq!(err.kind(), ApiErrorKind::Decode);
        assert!(!session.is_authenticated());
        assert!(session.token().is_none());
    }

    #[tokio::test]
    async fn test_unauthorized_clears_flag_on_any_endpoint() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/organizations/5/channels"))
            .respond_with(json_response(401, json!({"detail": "expired"})))
            .mount(&server)
            .await;

        let session = signed_in("stale");
        let client = client_for(&server, session.clone());
        assert!(session.is_authenticated());

        let err = client.get_channels(5).await.unwrap_err();
        assert_eq!(err.kind(), ApiErrorKind::Unauthorized);
        assert!(!session.is_authenticated());
        // The stale token is not deleted, only the flag drops.
        assert!(session.has_token());
    }

    #[tokio::test]
    async fn test_login_stores_token() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/auth/sign-in"))
            .and(body_json(json!({"login": "alice", "password": "pw"})))
            .respond_with(json_response(200, json!({"token": "issued-token"})))
            .mount(&server)
            .await;

        let session = SessionManager::in_memory();
        let client = client_for(&server, session.clone());
        client.login("alice", "pw").await.expect("login");

        assert_eq!(session.token().unwrap().expose_secret(), "issued-token");
        assert!(session.is_authenticated());
    }

    #[tokio::test]
    async fn test_login_failure_leaves_session_untouched() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/auth/sign-in"))
            .respond_with(json_response(401, json!({"reason": "user not found"})))
            .mount(&server)
            .await;

        let session = SessionManager::in_memory();
        let client = client_for(&server, session.clone());
        let err = client.login("alice", "wrong").await.unwrap_err();
        assert!(err.is_unauthorized());
        assert!(session.token().is_none());
    }

    #[tokio::test]
    async fn test_register_then_signs_in() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/auth/register"))
            .and(body_json(json!({"login": "bob", "password": "pw", "name": "Bob"})))
            .respond_with(json_response(
                201,
                json!({"profile": {"id": 2, "name": "Bob", "login": "bob", "is_admin": false}}),
            ))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/api/auth/sign-in"))
            .respond_with(json_response(200, json!({"token": "bob-token"})))
            .expect(1)
            .mount(&server)
            .await;

        let session = SessionManager::in_memory();
        let client = client_for(&server, session.clone());
        client.register("bob", "pw", "Bob").await.expect("register");
        assert_eq!(session.token().unwrap().expose_secret(), "bob-token");
    }

    #[tokio::test]
    async fn test_register_conflict_is_server_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/auth/register"))
            .respond_with(json_response(409, json!({"reason": "conflict"})))
            .mount(&server)
            .await;

        let client = client_for(&server, SessionManager::in_memory());
        match client.register("bob", "pw", "Bob").await {
            Err(ApiError::Status { status, reason, .. }) => {
                assert_eq!(status, 409);
                assert_eq!(reason.as_deref(), Some("conflict"));
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_profile_and_auth_check() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/auth/profile"))
            .respond_with(json_response(
                200,
                json!({"profile": {"id": 1, "name": "Alice", "login": "alice", "is_admin": true}}),
            ))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/api/auth/check"))
            .respond_with(json_response(200, json!({"status": "ok"})))
            .mount(&server)
            .await;

        let session = signed_in("tok");
        session.mark_unauthenticated();
        let client = client_for(&server, session.clone());

        let profile = client.get_profile().await.expect("profile");
        assert_eq!(
            profile,
            UserProfile {
                id: 1,
                name: "Alice".to_string(),
                login: "alice".to_string(),
                is_admin: true,
            }
        );

        let status = client.sync_auth().await.expect("auth check");
        assert_eq!(status.status, "ok");
        assert!(session.is_authenticated());
    }

    #[tokio::test]
    async fn test_create_organization_unwraps_organization() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/organizations"))
            .and(header("Authorization", "Bearer tok"))
            .and(body_json(json!({"name": "Acme", "description": "Rockets"})))
            .respond_with(json_response(
                201,
                json!({"organization": {"id": 9, "name": "Acme", "description": "Rockets"}}),
            ))
            .mount(&server)
            .await;

        let client = client_for(&server, signed_in("tok"));
        let org = client
            .create_organization("Acme", "Rockets")
            .await
            .expect("create");
        assert_eq!(
            org,
            Organization {
                id: 9,
                name: "Acme".to_string(),
                description: Some("Rockets".to_string()),
            }
        );
    }

    #[tokio::test]
    async fn test_organization_users_reason_is_none() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/organizations/3/users"))
            .respond_with(json_response(200, json!({"reason": "not a member"})))
            .mount(&server)
            .await;

        let client = client_for(&server, signed_in("tok"));
        assert_eq!(client.get_organization_users(3).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_organization_users_returns_users() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/organizations/3/users"))
            .respond_with(json_response(
                200,
                json!({"users": [{
                    "user": {"id": 1, "name": "Alice"},
                    "rights": [{"name": "owner", "can_grant": true}]
                }]}),
            ))
            .mount(&server)
            .await;

        let client = client_for(&server, signed_in("tok"));
        let users = client.get_organization_users(3).await.unwrap().unwrap();
        assert_eq!(users.len(), 1);
        assert_eq!(users[0].user.name, "Alice");
        assert_eq!(users[0].rights[0].name, "owner");
    }

    #[tokio::test]
    async fn test_organization_info_whole_body() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/organizations/4"))
            .respond_with(json_response(
                200,
                json!({"id": 4, "name": "Acme", "description": "d", "members": 3}),
            ))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/api/organizations/5"))
            .respond_with(json_response(200, json!({"reason": "not found"})))
            .mount(&server)
            .await;

        let client = client_for(&server, signed_in("tok"));
        let info = client.get_organization_info(4).await.unwrap().unwrap();
        assert_eq!(info.id, Some(4));
        assert_eq!(info.extra.get("members"), Some(&json!(3)));
        assert!(client.get_organization_info(5).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_forbidden_read_is_status_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/organizations/3/bots"))
            .respond_with(json_response(
                403,
                json!({"reason": "Don't have required permissions"}),
            ))
            .mount(&server)
            .await;

        let session = signed_in("tok");
        let client = client_for(&server, session.clone());
        let err = client.get_organization_bots(3).await.unwrap_err();
        assert_eq!(err.kind(), ApiErrorKind::Server);
        // Only 401 touches the flag
        assert!(session.is_authenticated());
    }

    #[tokio::test]
    async fn test_bots_list() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/organizations/3/bots"))
            .respond_with(json_response(
                200,
                json!({"bots": [{"bot_id": 11, "organization_id": 3}]}),
            ))
            .mount(&server)
            .await;

        let client = client_for(&server, signed_in("tok"));
        let bots = client.get_organization_bots(3).await.unwrap().unwrap();
        assert_eq!(
            bots,
            vec![Bot {
                id: 11,
                organization_id: Some(3)
            }]
        );
    }

    #[tokio::test]
    async fn test_create_bot_returns_id() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/organizations/3/bots"))
            .and(body_json(json!({"token": "123:abc"})))
            .respond_with(json_response(200, json!({"id": 42})))
            .mount(&server)
            .await;

        let client = client_for(&server, signed_in("tok"));
        assert_eq!(client.create_organization_bot(3, "123:abc").await.unwrap(), 42);
    }

    #[tokio::test]
    async fn test_create_bot_reason_is_invalid_token() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/organizations/3/bots"))
            .respond_with(json_response(200, json!({"reason": "Invalid token"})))
            .mount(&server)
            .await;

        let client = client_for(&server, signed_in("tok"));
        let err = client
            .create_organization_bot(3, "bad")
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::InvalidBotToken { .. }));
        assert_eq!(err.to_string(), "Invalid bot token");
    }

    #[tokio::test]
    async fn test_create_bot_transport_failure_is_invalid_token() {
        // Nothing listens on port 1.
        let config = ClientConfig::default().with_backend_url("http://127.0.0.1:1/api");
        let client = SmmClient::new(config, signed_in("tok")).unwrap();

        let err = client
            .create_organization_bot(3, "123:abc")
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Invalid bot token");
        match err {
            ApiError::InvalidBotToken { cause } => {
                assert_eq!(cause.kind(), ApiErrorKind::Network);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_channels_lifecycle() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/organizations/3/channels"))
            .respond_with(json_response(
                200,
                json!({"channels": [{"id": -1001, "bot_id": 11}]}),
            ))
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/api/organizations/3/channels"))
            .and(body_json(json!({"id": -1002, "bot_id": 11})))
            .respond_with(json_response(200, json!({"status": "ok"})))
            .mount(&server)
            .await;
        Mock::given(method("DELETE"))
            .and(path("/api/organizations/3/channels"))
            .and(header("Authorization", "Bearer tok"))
            .and(body_json(json!({"id": -1001})))
            .respond_with(json_response(200, json!({"channels": []})))
            .mount(&server)
            .await;

        let client = client_for(&server, signed_in("tok"));

        let channels = client.get_channels(3).await.unwrap().unwrap();
        assert_eq!(
            channels,
            vec![Channel {
                id: -1001,
                bot_id: Some(11)
            }]
        );

        let body = client.add_channel(3, -1002, 11).await.unwrap();
        assert_eq!(body, json!({"status": "ok"}));

        let remaining = client.delete_channel(3, -1001).await.unwrap().unwrap();
        assert!(remaining.is_empty());
    }

    #[tokio::test]
    async fn test_add_channel_failure_is_unavailable() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/organizations/3/channels"))
            .respond_with(json_response(409, json!({"reason": "in use"})))
            .mount(&server)
            .await;

        let client = client_for(&server, signed_in("tok"));
        let err = client.add_channel(3, -1002, 11).await.unwrap_err();
        assert_eq!(err.to_string(), "Channel not found or already in use");
        assert_eq!(err.kind(), ApiErrorKind::Rejected);
        match err {
            ApiError::ChannelUnavailable { cause } => assert_eq!(cause.kind(), ApiErrorKind::Server),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_add_channel_returns_body_with_reason() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/organizations/3/channels"))
            .respond_with(json_response(200, json!({"reason": "bot is not admin"})))
            .mount(&server)
            .await;

        let client = client_for(&server, signed_in("tok"));
        let body = client.add_channel(3, -100, 1).await.unwrap();
        assert_eq!(body, json!({"reason": "bot is not admin"}));
    }

    #[tokio::test]
    async fn test_delete_channel_reason_is_none() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .and(path("/api/organizations/3/channels"))
            .respond_with(json_response(200, json!({"reason": "no such channel"})))
            .mount(&server)
            .await;

        let client = client_for(&server, signed_in("tok"));
        assert!(client.delete_channel(3, 1).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_missing_field_is_decode_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/organizations"))
            .respond_with(json_response(200, json!({"unexpected": true})))
            .mount(&server)
            .await;

        let client = client_for(&server, signed_in("tok"));
        let err = client.get_organizations().await.unwrap_err();
        assert_eq!(err.kind(), ApiErrorKind::Decode);
    }

    #[test]
    fn test_reason_truthiness() {
        assert_eq!(reason_of(&json!({"reason": "nope"})), Some("nope".to_string()));
        assert_eq!(reason_of(&json!({"reason": ""})), None);
        assert_eq!(reason_of(&json!({"reason": null})), None);
        assert_eq!(reason_of(&json!({"users": []})), None);
    }

    #[test]
    fn test_logout_clears_session() {
        let session = signed_in("tok");
        let client = SmmClient::new(ClientConfig::default(), session.clone()).unwrap();
        assert!(client.logout().unwrap());
        assert!(!session.is_authenticated());
        assert!(!session.has_token());
    }
}
