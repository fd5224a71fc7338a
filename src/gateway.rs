use std::sync::{Arc, Mutex, PoisonError};

use reqwest::header::CONTENT_TYPE;
use reqwest::{Method, RequestBuilder, Response};
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::config::Config;
use crate::error::{ApiError, ErrorPayload, Result};
use crate::routes::{Navigator, Route};

/// The cookie the service sets its anti-forgery token in.
const CSRF_COOKIE: &str = "csrftoken";
/// The header the token is echoed back in on mutating requests.
const CSRF_HEADER: &str = "X-CSRFToken";

type SessionExpiredCallback = Box<dyn Fn() + Send + Sync>;

/// The single HTTP entry/exit point shared by every store.
///
/// Credentials ride on a cookie store; the outgoing interceptor attaches
/// the held CSRF token (absence is a legal state at startup), and the
/// incoming interceptor classifies failures, tearing the session down and
/// redirecting to the login route on a 401. Interceptors observe, they
/// never swallow: every classified failure propagates to the caller.
pub struct ApiGateway {
    http: reqwest::Client,
    base_url: String,
    navigator: Arc<dyn Navigator>,
    csrf_token: Mutex<Option<String>>,
    session_expired: Mutex<Vec<SessionExpiredCallback>>,
}

impl ApiGateway {
    /// Creates a new `ApiGateway` with a cookie-backed HTTP client.
    pub fn new(config: &Config, navigator: Arc<dyn Navigator>) -> Result<Self> {
        let http = reqwest::Client::builder()
            .cookie_store(true)
            .timeout(config.request_timeout)
            .build()?;

        Ok(Self {
            http,
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
            navigator,
            csrf_token: Mutex::new(None),
            session_expired: Mutex::new(Vec::new()),
        })
    }

    /// Subscribes a callback to forced session invalidation.
    ///
    /// The gateway only emits the signal; whoever owns session state is
    /// responsible for resetting itself.
    pub fn on_session_expired(&self, callback: impl Fn() + Send + Sync + 'static) {
        self.lock_listeners().push(Box::new(callback));
    }

    /// Seeds the anti-forgery token directly (normally captured from a
    /// `csrftoken` cookie on a response).
    pub fn store_csrf_token(&self, token: impl Into<String>) {
        *self.lock_csrf() = Some(token.into());
    }

    /// Issues a GET and decodes the response body.
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let response = self.dispatch(self.builder(Method::GET, path)).await?;
        Self::decode(response).await
    }

    /// Issues a GET with a query string and decodes the response body.
    pub async fn get_with_query<T, Q>(&self, path: &str, query: &Q) -> Result<T>
    where
        T: DeserializeOwned,
        Q: Serialize + ?Sized,
    {
        let builder = self.builder(Method::GET, path).query(query);
        let response = self.dispatch(builder).await?;
        Self::decode(response).await
    }

    /// Issues a POST with a JSON body and decodes the response body.
    pub async fn post<T, B>(&self, path: &str, body: &B) -> Result<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let builder = self.json_body(self.builder(Method::POST, path), body)?;
        let response = self.dispatch(builder).await?;
        Self::decode(response).await
    }

    /// Issues a POST with a JSON body, treating the response as opaque.
    pub async fn post_ignored<B>(&self, path: &str, body: &B) -> Result<()>
    where
        B: Serialize + ?Sized,
    {
        let builder = self.json_body(self.builder(Method::POST, path), body)?;
        self.dispatch(builder).await?;
        Ok(())
    }

    /// Issues a bodyless POST, treating the response as opaque.
    pub async fn post_empty(&self, path: &str) -> Result<()> {
        self.dispatch(self.builder(Method::POST, path)).await?;
        Ok(())
    }

    /// Issues a DELETE, treating the response as opaque.
    pub async fn delete(&self, path: &str) -> Result<()> {
        self.dispatch(self.builder(Method::DELETE, path)).await?;
        Ok(())
    }

    fn builder(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        self.http.request(method, url)
    }

    fn json_body<B>(&self, builder: RequestBuilder, body: &B) -> Result<RequestBuilder>
    where
        B: Serialize + ?Sized,
    {
        let json = sonic_rs::to_string(body)
            .map_err(|e| ApiError::Decode(format!("Request serialization failed: {e}")))?;
        Ok(builder.header(CONTENT_TYPE, "application/json").body(json))
    }

    /// Sends the request through both interceptors.
    async fn dispatch(&self, builder: RequestBuilder) -> Result<Response> {
        // Outgoing: attach the CSRF token if one is held.
        let builder = match self.lock_csrf().clone() {
            Some(token) => builder.header(CSRF_HEADER, token),
            None => builder,
        };

        // A transport failure never produced a response; classified apart
        // from server faults.
        let response = builder.send().await?;

        self.capture_csrf_cookie(&response);

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let payload = response
            .bytes()
            .await
            .ok()
            .and_then(|bytes| sonic_rs::from_slice::<ErrorPayload>(&bytes).ok())
            .unwrap_or_default();
        let error = ApiError::classify(status.as_u16(), payload);

        if error.is_session_expired() {
            self.handle_session_expired();
        }

        tracing::debug!("❌ Request failed: {}", error);
        Err(error)
    }

    /// Incoming: record a fresh anti-forgery token whenever the service
    /// rotates one.
    fn capture_csrf_cookie(&self, response: &Response) {
        for cookie in response.cookies() {
            if cookie.name() == CSRF_COOKIE {
                tracing::debug!("🔐 CSRF token captured from response cookie");
                *self.lock_csrf() = Some(cookie.value().to_string());
            }
        }
    }

    /// Forced session invalidation: notify subscribers, then redirect to the
    /// login route unless the user agent is already there (else a 401 on the
    /// login page itself would loop).
    fn handle_session_expired(&self) {
        tracing::warn!("❌ Session invalidated by the service (401)");

        for callback in self.lock_listeners().iter() {
            callback();
        }

        let login = Route::Login.path();
        if self.navigator.current_path() != login {
            tracing::info!("↩️ Redirecting to {}", login);
            self.navigator.redirect(login);
        }
    }

    async fn decode<T: DeserializeOwned>(response: Response) -> Result<T> {
        let bytes = response.bytes().await?;
        sonic_rs::from_slice(&bytes)
            .map_err(|e| ApiError::Decode(format!("Response decoding failed: {e}")))
    }

    fn lock_csrf(&self) -> std::sync::MutexGuard<'_, Option<String>> {
        self.csrf_token
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    fn lock_listeners(&self) -> std::sync::MutexGuard<'_, Vec<SessionExpiredCallback>> {
        self.session_expired
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}
