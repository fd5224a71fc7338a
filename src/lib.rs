//! Client-side session and enrollment-consistency layer for the CourseHub
//! course-registration service.
//!
//! The crate tracks whether a user is authenticated, gates navigation to
//! protected views, recovers from session loss detected at the network
//! boundary, and keeps the locally cached course catalog and enrollment set
//! consistent after enroll/withdraw mutations. View rendering and the remote
//! service's internals stay outside; the service is an opaque HTTP API.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

pub mod config;
pub mod error;
pub mod gateway;
pub mod guard;
pub mod routes;

pub mod models {
    pub mod course;
    pub mod enrollment;
    pub mod user;
}

pub mod services {
    pub mod auth;
    pub mod courses;
}

pub mod stores {
    pub mod enrollment;
    pub mod session;
}

pub use config::Config;
pub use error::{ApiError, Result};
pub use gateway::ApiGateway;
pub use guard::{NavigationDecision, RouteGuard};
pub use routes::{Access, Navigator, Route};
pub use stores::enrollment::EnrollmentStore;
pub use stores::session::SessionStore;

/// Installs the global tracing subscriber, honoring `RUST_LOG`.
///
/// Call once at application startup, before constructing the gateway.
pub fn init_tracing() {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();
}
