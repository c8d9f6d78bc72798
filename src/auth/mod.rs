//! Token-based identity resolution.
//!
//! A middleware resolves the caller's access token against the user store
//! once per request and attaches an [`Identity`] to the request extensions.
//! Handlers opt into enforcement through the [`AuthenticatedUser`] and
//! [`AdminUser`] extractors; routes without an extractor stay public.

use axum::{
    extract::{FromRequestParts, Request, State},
    http::{header, request::Parts, HeaderMap},
    middleware::Next,
    response::Response,
};

use crate::db::DocumentStore;
use crate::errors::AppError;
use crate::models::User;
use crate::AppState;

/// Header name for the API key.
pub const API_KEY_HEADER: &str = "x-api-key";

/// Who is making the request, as far as the credentials can tell.
#[derive(Debug, Clone)]
pub enum Identity {
    /// No credentials were presented.
    Anonymous,
    /// Credentials matched a user record.
    Authenticated(User),
    /// Credentials were presented but match no user.
    Invalid,
}

/// Resolves request credentials against the user store.
#[derive(Clone)]
pub struct IdentityProvider {
    store: DocumentStore,
}

impl IdentityProvider {
    pub fn new(store: DocumentStore) -> Self {
        Self { store }
    }

    /// Resolve the caller's identity from request headers.
    pub async fn resolve(&self, headers: &HeaderMap) -> Result<Identity, AppError> {
        match credentials_from_headers(headers) {
            None => Ok(Identity::Anonymous),
            Some(token) => match self.store.get_user_by_token(&token).await? {
                Some(user) => Ok(Identity::Authenticated(user)),
                None => Ok(Identity::Invalid),
            },
        }
    }
}

/// Middleware that resolves the caller's identity and attaches it to the
/// request. Never rejects by itself; enforcement happens in extractors.
pub async fn attach_identity(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let identity = state.identity.resolve(request.headers()).await?;
    request.extensions_mut().insert(identity);
    Ok(next.run(request).await)
}

/// Extract the access token from request headers.
///
/// The `x-api-key` header wins when present; otherwise the
/// `Authorization: Bearer` form is accepted.
pub fn credentials_from_headers(headers: &HeaderMap) -> Option<String> {
    if let Some(key) = headers.get(API_KEY_HEADER).and_then(|v| v.to_str().ok()) {
        return Some(key.to_string());
    }

    headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|s| s.strip_prefix("Bearer "))
        .map(|s| s.to_string())
}

/// Extractor requiring any authenticated user.
pub struct AuthenticatedUser(pub User);

impl<S> FromRequestParts<S> for AuthenticatedUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        match parts.extensions.get::<Identity>() {
            Some(Identity::Authenticated(user)) => Ok(AuthenticatedUser(user.clone())),
            Some(Identity::Invalid) => {
                Err(AppError::Unauthorized("Invalid access token".to_string()))
            }
            _ => Err(AppError::Unauthorized("Authentication required".to_string())),
        }
    }
}

/// Extractor requiring an authenticated admin.
pub struct AdminUser(pub User);

impl<S> FromRequestParts<S> for AdminUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let AuthenticatedUser(user) = AuthenticatedUser::from_request_parts(parts, state).await?;
        if user.admin {
            Ok(AdminUser(user))
        } else {
            Err(AppError::Forbidden(
                "Administrator access required".to_string(),
            ))
        }
    }
}
