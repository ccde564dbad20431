//! HTTP client for the campus upload broker.
//!
//! Every caller builds its own [`ApiClient`]: base URL, default headers,
//! auth and timeout live on the instance, so there is no process-wide state.
//! Upload operations live in [`upload`].

mod error;
pub mod hooks;
pub mod upload;

use reqwest::header::{HeaderMap, HeaderName, HeaderValue, AUTHORIZATION, COOKIE};
use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use std::sync::Arc;
use std::time::Duration;

pub use error::{extract_error_message, ClientError, ClientResult};
pub use hooks::{NoOpSessionExpiredHandler, SessionExpiredHandler};
pub use upload::FilePayload;

/// Default bound on every request, API and storage alike.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Cookie carrying the session token unless the server says otherwise.
pub const DEFAULT_SESSION_COOKIE: &str = "access_token";

/// Authentication strategy for API requests. Never sent to object storage.
#[derive(Clone)]
pub enum Auth {
    None,
    /// `Cookie: {name}={token}`
    SessionCookie { name: String, token: String },
    /// `Authorization: Bearer {token}`
    Bearer(String),
}

impl Auth {
    pub fn session(token: impl Into<String>) -> Self {
        Auth::SessionCookie {
            name: DEFAULT_SESSION_COOKIE.to_string(),
            token: token.into(),
        }
    }
}

/// Tokens are redacted so clients can be logged.
impl std::fmt::Debug for Auth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Auth::None => f.write_str("None"),
            Auth::SessionCookie { name, .. } => f
                .debug_struct("SessionCookie")
                .field("name", name)
                .field("token", &"<redacted>")
                .finish(),
            Auth::Bearer(_) => f.debug_tuple("Bearer").field(&"<redacted>").finish(),
        }
    }
}

/// Builder for [`ApiClient`].
pub struct ApiClientBuilder {
    base_url: String,
    auth: Auth,
    timeout: Duration,
    headers: HeaderMap,
    on_session_expired: Arc<dyn SessionExpiredHandler>,
}

impl ApiClientBuilder {
    pub fn auth(mut self, auth: Auth) -> Self {
        self.auth = auth;
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Header sent with every API request (not with storage uploads).
    pub fn default_header(mut self, name: &str, value: &str) -> ClientResult<Self> {
        let name = HeaderName::from_bytes(name.as_bytes())
            .map_err(|e| ClientError::Config(format!("Invalid header name {}: {}", name, e)))?;
        let value = HeaderValue::from_str(value)
            .map_err(|e| ClientError::Config(format!("Invalid header value: {}", e)))?;
        self.headers.insert(name, value);
        Ok(self)
    }

    pub fn on_session_expired(mut self, handler: Arc<dyn SessionExpiredHandler>) -> Self {
        self.on_session_expired = handler;
        self
    }

    pub fn build(self) -> ClientResult<ApiClient> {
        let base_url = self.base_url.trim_end_matches('/').to_string();
        url::Url::parse(&base_url)
            .map_err(|e| ClientError::Config(format!("Invalid base URL {}: {}", base_url, e)))?;

        let client = Client::builder()
            .timeout(self.timeout)
            .default_headers(self.headers)
            .build()
            .map_err(|e| ClientError::Config(format!("Failed to create HTTP client: {}", e)))?;

        // Presigned URLs carry their own credentials; this client sends none.
        let storage_client = Client::builder()
            .timeout(self.timeout)
            .build()
            .map_err(|e| ClientError::Config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(ApiClient {
            client,
            storage_client,
            base_url,
            auth: self.auth,
            timeout: self.timeout,
            on_session_expired: self.on_session_expired,
        })
    }
}

/// HTTP client for the upload broker API with configurable auth.
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    storage_client: Client,
    base_url: String,
    auth: Auth,
    timeout: Duration,
    on_session_expired: Arc<dyn SessionExpiredHandler>,
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.base_url)
            .field("auth", &self.auth)
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl ApiClient {
    pub fn builder(base_url: impl Into<String>) -> ApiClientBuilder {
        ApiClientBuilder {
            base_url: base_url.into(),
            auth: Auth::None,
            timeout: DEFAULT_TIMEOUT,
            headers: HeaderMap::new(),
            on_session_expired: Arc::new(NoOpSessionExpiredHandler),
        }
    }

    pub fn new(base_url: impl Into<String>, auth: Auth) -> ClientResult<Self> {
        Self::builder(base_url).auth(auth).build()
    }

    /// Create client from environment: CAMPUS_API_URL, CAMPUS_ACCESS_TOKEN
    /// (sent as the session cookie), CAMPUS_HTTP_TIMEOUT_SECS.
    pub fn from_env() -> ClientResult<Self> {
        let base_url = std::env::var("CAMPUS_API_URL")
            .unwrap_or_else(|_| "http://localhost:4000".to_string());

        let auth = match std::env::var("CAMPUS_ACCESS_TOKEN") {
            Ok(token) if !token.trim().is_empty() => {
                let name = std::env::var("CAMPUS_SESSION_COOKIE")
                    .unwrap_or_else(|_| DEFAULT_SESSION_COOKIE.to_string());
                Auth::SessionCookie { name, token }
            }
            _ => Auth::None,
        };

        let timeout = match std::env::var("CAMPUS_HTTP_TIMEOUT_SECS") {
            Ok(secs) => Duration::from_secs(secs.parse().map_err(|_| {
                ClientError::Config("CAMPUS_HTTP_TIMEOUT_SECS must be a valid number".to_string())
            })?),
            Err(_) => DEFAULT_TIMEOUT,
        };

        Self::builder(base_url).auth(auth).timeout(timeout).build()
    }

    /// Replace the hook fired when the API rejects the session.
    pub fn with_session_expired_handler(mut self, handler: Arc<dyn SessionExpiredHandler>) -> Self {
        self.on_session_expired = handler;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub fn build_url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn apply_auth(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.auth {
            Auth::None => request,
            Auth::SessionCookie { name, token } => {
                request.header(COOKIE, format!("{}={}", name, token))
            }
            Auth::Bearer(token) => request.header(AUTHORIZATION, format!("Bearer {}", token)),
        }
    }

    /// Send an authenticated API request and map failures to [`ClientError`].
    async fn send(&self, request: RequestBuilder) -> ClientResult<Response> {
        let response = self
            .apply_auth(request)
            .send()
            .await
            .map_err(ClientError::from_transport)?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let message = error::normalize_error_message(status, &body);

        if status == reqwest::StatusCode::UNAUTHORIZED {
            tracing::warn!(message = %message, "Session rejected by API");
            self.on_session_expired.on_session_expired();
            return Err(ClientError::Auth(message));
        }

        tracing::debug!(status = status.as_u16(), message = %message, "API request failed");
        Err(ClientError::Api {
            status: status.as_u16(),
            message,
        })
    }

    async fn decode<T: DeserializeOwned>(response: Response) -> ClientResult<T> {
        let bytes = response
            .bytes()
            .await
            .map_err(ClientError::from_transport)?;
        serde_json::from_slice(&bytes).map_err(|e| ClientError::Decode(e.to_string()))
    }

    /// GET request with query parameters. Deserializes JSON response.
    pub async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> ClientResult<T> {
        let mut request = self.client.get(self.build_url(path));
        if !query.is_empty() {
            request = request.query(query);
        }
        let response = self.send(request).await?;
        Self::decode(response).await
    }

    /// POST JSON body and deserialize response.
    pub async fn post_json<T: DeserializeOwned, B: serde::Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T> {
        let request = self.client.post(self.build_url(path)).json(body);
        let response = self.send(request).await?;
        Self::decode(response).await
    }

    pub(crate) fn storage_client(&self) -> &Client {
        &self.storage_client
    }
}
