use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::gateway::ApiGateway;
use crate::models::user::User;

/// The request payload for user login.
#[derive(Serialize, Clone, Debug)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// The request payload for user registration.
#[derive(Serialize, Clone, Debug)]
pub struct RegisterRequest {
    pub name: String,
    pub username: String,
    pub password: String,
}

/// The response payload for a successful login.
#[derive(Deserialize, Clone, Debug)]
pub struct LoginResponse {
    pub user: User,
}

/// Authenticates against the remote session endpoint.
pub async fn login(gateway: &ApiGateway, credentials: &LoginRequest) -> Result<LoginResponse> {
    gateway.post("/auth/login/", credentials).await
}

/// Ends the remote session. The response body is opaque.
pub async fn logout(gateway: &ApiGateway) -> Result<()> {
    gateway.post_empty("/auth/logout/").await
}

/// Creates an account. Registration does not itself authenticate.
pub async fn register(gateway: &ApiGateway, user_data: &RegisterRequest) -> Result<()> {
    gateway.post_ignored("/auth/register/", user_data).await
}

/// Resolves the identity behind the current cookie session, if any.
pub async fn current_user(gateway: &ApiGateway) -> Result<User> {
    gateway.get("/auth/me/").await
}
