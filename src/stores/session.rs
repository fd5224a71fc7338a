use std::sync::{Arc, Mutex, PoisonError};

use crate::error::Result;
use crate::gateway::ApiGateway;
use crate::models::user::User;
use crate::services::auth::{self, LoginRequest, LoginResponse, RegisterRequest};

/// A snapshot of the authentication state.
///
/// Invariant: `is_authenticated` is true iff `user` was set by a successful
/// login or identity confirmation.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SessionState {
    pub user: Option<User>,
    pub is_authenticated: bool,
    /// Whether an authentication-affecting call is in flight.
    pub loading: bool,
    /// The last failure message, cleared at the start of each new attempt.
    pub error: Option<String>,
}

/// Owns the authentication state; one instance per client runtime.
///
/// All mutation goes through the actions below, which keep the
/// loading/error discipline; readers take a `snapshot()`. The store
/// subscribes its own `reset()` to the gateway's session-expired signal,
/// so a 401 anywhere tears it down without the gateway reaching in.
pub struct SessionStore {
    gateway: Arc<ApiGateway>,
    state: Mutex<SessionState>,
}

impl SessionStore {
    /// Creates the store and wires it to forced session invalidation.
    pub fn new(gateway: Arc<ApiGateway>) -> Arc<Self> {
        let store = Arc::new(Self {
            gateway: Arc::clone(&gateway),
            state: Mutex::new(SessionState::default()),
        });

        let weak = Arc::downgrade(&store);
        gateway.on_session_expired(move || {
            if let Some(store) = weak.upgrade() {
                store.reset();
            }
        });

        store
    }

    /// Returns the current state snapshot.
    pub fn snapshot(&self) -> SessionState {
        self.lock().clone()
    }

    /// Authenticates with the remote service.
    ///
    /// On failure the session is forced unauthenticated, the payload's
    /// `detail` message (or a generic fallback) lands in `error`, and the
    /// failure re-raises; `loading` clears on every exit path.
    pub async fn login(&self, credentials: LoginRequest) -> Result<LoginResponse> {
        tracing::info!("🔐 Login attempt: {}", credentials.username);
        {
            let mut state = self.lock();
            state.loading = true;
            state.error = None;
        }

        let result = auth::login(&self.gateway, &credentials).await;

        let mut state = self.lock();
        state.loading = false;
        match result {
            Ok(response) => {
                state.user = Some(response.user.clone());
                state.is_authenticated = true;
                tracing::info!("✅ User logged in: {}", response.user.id);
                Ok(response)
            }
            Err(error) => {
                state.error = Some(error.detail().unwrap_or("Login failed").to_string());
                state.user = None;
                state.is_authenticated = false;
                tracing::warn!("❌ Login failed: {}", error);
                Err(error)
            }
        }
    }

    /// Ends the session: best-effort remote, guaranteed local.
    ///
    /// The remote call's outcome is logged and discarded; the local state
    /// always resets to unauthenticated.
    pub async fn logout(&self) {
        tracing::info!("👋 Logout");
        match auth::logout(&self.gateway).await {
            Ok(()) => tracing::info!("✅ Remote session ended"),
            Err(error) => tracing::warn!("❌ Remote logout failed: {}", error),
        }
        self.reset();
    }

    /// Creates an account. A side channel: success never touches
    /// `user`/`is_authenticated`.
    pub async fn register(&self, user_data: RegisterRequest) -> Result<()> {
        tracing::info!("📝 Register attempt: {}", user_data.username);
        {
            let mut state = self.lock();
            state.loading = true;
            state.error = None;
        }

        let result = auth::register(&self.gateway, &user_data).await;

        let mut state = self.lock();
        state.loading = false;
        match result {
            Ok(()) => {
                tracing::info!("✅ User registered: {}", user_data.username);
                Ok(())
            }
            Err(error) => {
                state.error = Some(error.detail().unwrap_or("Registration failed").to_string());
                tracing::warn!("❌ Registration failed: {}", error);
                Err(error)
            }
        }
    }

    /// Resolves identity from an existing cookie session.
    ///
    /// Failure means "not logged in", not a fatal error: the session resets
    /// to unauthenticated and the failure re-raises for callers that care.
    pub async fn fetch_current_user(&self) -> Result<User> {
        tracing::debug!("🔍 Resolving current user");
        self.lock().loading = true;

        let result = auth::current_user(&self.gateway).await;

        let mut state = self.lock();
        state.loading = false;
        match result {
            Ok(user) => {
                state.user = Some(user.clone());
                state.is_authenticated = true;
                tracing::info!("✅ Session resolved: {}", user.username);
                Ok(user)
            }
            Err(error) => {
                state.user = None;
                state.is_authenticated = false;
                tracing::debug!("No active session: {}", error);
                Err(error)
            }
        }
    }

    /// Resets to the initial unauthenticated state.
    pub fn reset(&self) {
        tracing::debug!("Session state reset");
        *self.lock() = SessionState::default();
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, SessionState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
