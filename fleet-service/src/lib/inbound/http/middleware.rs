use axum::extract::Request;
use axum::extract::State;
use axum::http::header;
use axum::middleware::Next;
use axum::response::Response;

use crate::domain::account::models::Role;
use crate::domain::account::models::SessionIdentity;
use crate::domain::account::ports::AccountServicePort;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::router::AppState;

const BEARER_PREFIX: &str = "Bearer ";
const ADMIN_ONLY: &[Role] = &[Role::Admin];

/// Middleware that verifies the bearer token and stores the resolved
/// [`SessionIdentity`] in the request extensions.
pub async fn authenticate(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = extract_bearer_token(&req)
        .ok_or_else(|| ApiError::Unauthorized("No token provided".to_string()))?;

    let identity = state
        .account_service
        .verify_token(token)
        .await
        .map_err(|e| {
            tracing::warn!(error = %e, uri = %req.uri(), "Token verification failed");
            ApiError::Unauthorized("Invalid or expired token".to_string())
        })?;

    req.extensions_mut().insert(identity);

    Ok(next.run(req).await)
}

fn extract_bearer_token(req: &Request) -> Option<&str> {
    req.headers()
        .get(header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix(BEARER_PREFIX)
        .map(str::trim)
        .filter(|token| !token.is_empty())
}

/// Set of roles allowed through [`authorize`].
#[derive(Debug, Clone, Copy)]
pub struct AccessPolicy {
    roles: &'static [Role],
}

impl AccessPolicy {
    pub const fn require(roles: &'static [Role]) -> Self {
        Self { roles }
    }

    pub const fn admin_only() -> Self {
        Self::require(ADMIN_ONLY)
    }

    pub fn allows(&self, role: Role) -> bool {
        self.roles.contains(&role)
    }
}

/// Role gate. Must be layered inside [`authenticate`].
pub async fn authorize(
    State(policy): State<AccessPolicy>,
    req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let Some(identity) = req.extensions().get::<SessionIdentity>() else {
        tracing::error!(uri = %req.uri(), "authorize layered without authenticate");
        return Err(ApiError::InternalServerError(
            "missing session identity".to_string(),
        ));
    };

    let Some(role) = identity.role else {
        return Err(ApiError::Forbidden(
            "Access denied. No role assigned.".to_string(),
        ));
    };

    if !policy.allows(role) {
        tracing::warn!(
            account_id = %identity.account_id,
            role = %role,
            uri = %req.uri(),
            "Access denied for role"
        );
        return Err(ApiError::Forbidden(
            "Access denied. Insufficient permissions.".to_string(),
        ));
    }

    Ok(next.run(req).await)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_admin_policy() {
        let policy = AccessPolicy::admin_only();
        assert!(policy.allows(Role::Admin));
        assert!(!policy.allows(Role::Driver));

        let everyone = AccessPolicy::require(&Role::ALL);
        assert!(Role::ALL.iter().all(|role| everyone.allows(*role)));
    }

    #[test]
    fn test_bearer_extraction() {
        let request = |value: &str| {
            axum::http::Request::builder()
                .header(header::AUTHORIZATION, value)
                .body(axum::body::Body::empty())
                .unwrap()
        };

        assert_eq!(extract_bearer_token(&request("Bearer abc.def")), Some("abc.def"));
        assert_eq!(extract_bearer_token(&request("Basic abc")), None);
        assert_eq!(extract_bearer_token(&request("bearer abc")), None);
        assert_eq!(extract_bearer_token(&request("Bearer   ")), None);

        let bare = axum::http::Request::builder().body(axum::body::Body::empty()).unwrap();
        assert_eq!(extract_bearer_token(&bare), None);
    }
}
