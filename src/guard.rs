use std::sync::Arc;

use crate::routes::{Access, Route};
use crate::stores::session::SessionStore;

/// The outcome of a navigation attempt.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NavigationDecision {
    /// Navigation may proceed.
    Proceed,
    /// Navigation is aborted in favor of the given route.
    Redirect(Route),
}

/// Decides, per navigation attempt, whether to proceed or redirect, with
/// the session store as the sole source of truth.
pub struct RouteGuard {
    session: Arc<SessionStore>,
}

impl RouteGuard {
    /// Creates a new `RouteGuard` over the shared session store.
    pub fn new(session: Arc<SessionStore>) -> Self {
        Self { session }
    }

    /// Evaluates one navigation attempt.
    ///
    /// When no user is known and no identity fetch is in flight, identity is
    /// resolved lazily first; its failure is the expected "not logged in"
    /// outcome and never blocks navigation by itself. Routes that require
    /// authentication redirect to login on any unresolved identity; guest-only
    /// routes redirect authenticated users to the course catalog.
    pub async fn before_each(&self, to: Route) -> NavigationDecision {
        let snapshot = self.session.snapshot();
        if snapshot.user.is_none() && !snapshot.loading {
            // Lazily resolve identity on first load, when no in-memory
            // state survived. The loading check is the only defense against
            // racing a second resolution.
            if let Err(error) = self.session.fetch_current_user().await {
                tracing::debug!("Guard: no session ({})", error);
            }
        }

        let snapshot = self.session.snapshot();
        let decision = match to.access() {
            Access::RequiresAuth if !snapshot.is_authenticated => {
                NavigationDecision::Redirect(Route::Login)
            }
            Access::RequiresGuest if snapshot.is_authenticated => {
                NavigationDecision::Redirect(Route::Courses)
            }
            _ => NavigationDecision::Proceed,
        };

        tracing::debug!("Guard: {} -> {:?}", to.path(), decision);
        decision
    }
}
