// ============================================================================
// API CLIENT - HTTP communication only (stateless apart from the token handle)
// ============================================================================
// No business logic: builds requests, injects the bearer token, decodes bodies.
// ============================================================================

use std::cell::RefCell;
use std::rc::Rc;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::models::{ErrorBody, LoginRequest, LoginResponse, NewUser, UserPatch, UserRecord};
use crate::services::errors::ApiError;
use crate::services::http::{ApiRequest, HttpTransport, Method};

/// Token cell shared between the session store (writer) and the client (reader)
pub type SharedToken = Rc<RefCell<Option<String>>>;

#[derive(Clone)]
pub struct ApiClient {
    base_url: String,
    transport: Rc<dyn HttpTransport>,
    token: SharedToken,
}

impl ApiClient {
    pub fn new(base_url: &str, transport: Rc<dyn HttpTransport>, token: SharedToken) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            transport,
            token,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// `POST /auth/login`
    pub async fn login(&self, credentials: &LoginRequest) -> Result<LoginResponse, ApiError> {
        log::info!("🔐 [API] Login for {}", credentials.email);
        self.execute(Method::Post, "/auth/login", Some(credentials)).await
    }

    /// `GET /users`
    pub async fn list_users(&self) -> Result<Vec<UserRecord>, ApiError> {
        self.execute::<_, ()>(Method::Get, "/users", None).await
    }

    /// `GET /users/{id}`
    pub async fn get_user(&self, id: &str) -> Result<UserRecord, ApiError> {
        self.execute::<_, ()>(Method::Get, &user_path(id), None).await
    }

    /// `POST /users`
    pub async fn create_user(&self, user: &NewUser) -> Result<UserRecord, ApiError> {
        self.execute(Method::Post, "/users", Some(user)).await
    }

    /// `PATCH /users/{id}`
    pub async fn update_user(&self, id: &str, patch: &UserPatch) -> Result<UserRecord, ApiError> {
        self.execute(Method::Patch, &user_path(id), Some(patch)).await
    }

    async fn execute<T, B>(&self, method: Method, path: &str, body: Option<&B>) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
        B: Serialize,
    {
        let body = body
            .map(serde_json::to_value)
            .transpose()
            .map_err(|e| ApiError::Encode(e.to_string()))?;

        // Read at send time, like a request interceptor
        let request = ApiRequest {
            method,
            url: format!("{}{}", self.base_url, path),
            bearer: self.token.borrow().clone(),
            body,
        };

        log::debug!("🌐 [API] {} {}", method.as_str(), request.url);
        let response = self.transport.send(request).await?;

        if !response.ok() {
            let message = serde_json::from_str::<ErrorBody>(&response.body)
                .ok()
                .and_then(ErrorBody::into_message);
            log::warn!("❌ [API] {} {} -> HTTP {}", method.as_str(), path, response.status);
            return Err(ApiError::Http {
                status: response.status,
                message,
            });
        }

        serde_json::from_str::<T>(&response.body).map_err(|e| ApiError::Decode(e.to_string()))
    }
}

/// Ids come from the address bar, so they are escaped as one path segment
fn user_path(id: &str) -> String {
    format!("/users/{}", urlencoding::encode(id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{record_json, MockTransport};
    use futures::executor::block_on;
    use serde_json::json;

    fn client(transport: &Rc<MockTransport>, token: Option<&str>) -> ApiClient {
        let token = Rc::new(RefCell::new(token.map(str::to_string)));
        ApiClient::new("/api/", transport.clone(), token)
    }

    #[test]
    fn bearer_header_is_attached_only_when_a_token_is_held() {
        let transport = MockTransport::new();
        transport.respond(200, json!([]));
        transport.respond(200, json!([]));

        block_on(client(&transport, Some("abc")).list_users()).unwrap();
        block_on(client(&transport, None).list_users()).unwrap();

        let requests = transport.requests();
        assert_eq!(requests[0].authorization_header().as_deref(), Some("Bearer abc"));
        assert_eq!(requests[1].authorization_header(), None);
    }

    #[test]
    fn token_is_read_when_the_request_is_sent() {
        let transport = MockTransport::new();
        transport.respond(200, json!([]));
        let token: SharedToken = Rc::new(RefCell::new(None));
        let api = ApiClient::new("/api", transport.clone(), token.clone());

        *token.borrow_mut() = Some("late".into());
        block_on(api.list_users()).unwrap();

        assert_eq!(transport.requests()[0].bearer.as_deref(), Some("late"));
    }

    #[test]
    fn paths_and_methods_follow_the_rest_contract() {
        let transport = MockTransport::new();
        transport.respond(200, record_json("5", "Ivan", "Petrov"));
        transport.respond(200, record_json("5", "Ivan", "Petrov"));
        let api = client(&transport, Some("t"));

        block_on(api.get_user("5")).unwrap();
        let patch = UserPatch { name: Some("Ivan".into()), ..UserPatch::default() };
        block_on(api.update_user("5", &patch)).unwrap();

        let requests = transport.requests();
        assert_eq!(requests[0].method, Method::Get);
        assert_eq!(requests[0].url, "/api/users/5");
        assert_eq!(requests[0].body, None);
        assert_eq!(requests[1].method, Method::Patch);
        assert_eq!(requests[1].url, "/api/users/5");
        assert_eq!(requests[1].body, Some(json!({ "name": "Ivan" })));
    }

    #[test]
    fn error_status_maps_to_http_error_with_backend_message() {
        let transport = MockTransport::new();
        transport.respond(401, json!({ "message": "Invalid credentials" }));

        let err = block_on(client(&transport, None).login(&LoginRequest::new("a@b.com", "x"))).unwrap_err();

        assert_eq!(
            err,
            ApiError::Http { status: 401, message: Some("Invalid credentials".into()) }
        );
    }

    #[test]
    fn non_json_error_body_still_yields_status() {
        let transport = MockTransport::new();
        transport.respond_raw(502, "<html>Bad Gateway</html>");

        let err = block_on(client(&transport, None).list_users()).unwrap_err();
        assert_eq!(err, ApiError::Http { status: 502, message: None });
    }

    #[test]
    fn malformed_success_body_is_a_decode_error() {
        let transport = MockTransport::new();
        transport.respond(200, json!({ "unexpected": true }));

        let err = block_on(client(&transport, None).list_users()).unwrap_err();
        assert!(matches!(err, ApiError::Decode(_)));
    }

    #[test]
    fn transport_failure_propagates() {
        let transport = MockTransport::new();
        transport.fail(ApiError::Network("connection refused".into()));

        let err = block_on(client(&transport, None).list_users()).unwrap_err();
        assert_eq!(err, ApiError::Network("connection refused".into()));
    }

    #[test]
    fn record_ids_are_escaped_as_a_single_segment() {
        let transport = MockTransport::new();
        transport.respond(200, record_json("a/b", "Ivan", "Petrov"));

        block_on(client(&transport, Some("t")).get_user("a/b?x=1")).unwrap();

        assert_eq!(transport.last_request().unwrap().url, "/api/users/a%2Fb%3Fx%3D1");
    }
}
