//! Role-based route guards.
//!
//! The decision layer is pure: a [`Guard`] maps an optional [`Principal`] to
//! a [`Decision`] with no side effects, which keeps the access rules unit
//! testable. The routing adapter ([`guard_route`]) evaluates the decision
//! before the protected handler; the first deny short-circuits the rest of
//! the route's pipeline.
//!
//! Guard denials are not errors. `Deny` redirects to the visible
//! `/unauthorized` page; `Defer` renders the site 404 so the route is
//! indistinguishable from one that does not exist. The latter hides
//! privileged routes from principals who should not know they are there.

use axum::{
    extract::{FromRequestParts, Request},
    http::{StatusCode, request::Parts},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use tower_sessions::Session;

use meadowlark_core::Role;

use crate::error::NotFoundTemplate;
use crate::models::{Principal, session_keys};

/// Destination for visible guard denials.
pub const UNAUTHORIZED_PATH: &str = "/unauthorized";

/// Outcome of evaluating a guard against a principal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    /// Run the protected handler.
    Allow,
    /// Refuse visibly: redirect to the unauthorized page.
    Deny,
    /// Refuse silently: pretend the route does not exist.
    Defer,
}

/// How a guard refuses principals that do not match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DenyStyle {
    /// Redirect to [`UNAUTHORIZED_PATH`].
    Redirect,
    /// Hide the route behind the 404 page.
    Hide,
}

/// A per-route access predicate over the principal's role.
#[derive(Debug, Clone)]
pub struct Guard {
    permitted: Vec<Role>,
    deny_style: DenyStyle,
}

impl Guard {
    /// Allow exactly one role; deny visibly.
    #[must_use]
    pub fn role(role: Role) -> Self {
        Self {
            permitted: vec![role],
            deny_style: DenyStyle::Redirect,
        }
    }

    /// Allow exactly one role; deny by hiding the route.
    #[must_use]
    pub fn role_silent(role: Role) -> Self {
        Self {
            permitted: vec![role],
            deny_style: DenyStyle::Hide,
        }
    }

    /// Allow any role in the list; deny visibly.
    #[must_use]
    pub fn any_of(roles: impl IntoIterator<Item = Role>) -> Self {
        Self {
            permitted: roles.into_iter().collect(),
            deny_style: DenyStyle::Redirect,
        }
    }

    /// Evaluate this guard against an optional principal. Pure.
    #[must_use]
    pub fn decide(&self, principal: Option<&Principal>) -> Decision {
        let allowed = principal.is_some_and(|p| self.permitted.contains(&p.role));
        if allowed {
            Decision::Allow
        } else {
            match self.deny_style {
                DenyStyle::Redirect => Decision::Deny,
                DenyStyle::Hide => Decision::Defer,
            }
        }
    }
}

/// Route-layer adapter: evaluate `guard` before running the handler.
///
/// Used with `axum::middleware::from_fn`:
///
/// ```rust,ignore
/// .route_layer(axum::middleware::from_fn(move |req, next| {
///     guard_route(Guard::role_silent(Role::Employee), req, next)
/// }))
/// ```
pub async fn guard_route(guard: Guard, request: Request, next: Next) -> Response {
    let principal = match request.extensions().get::<Session>() {
        Some(session) => session
            .get::<Principal>(session_keys::PRINCIPAL)
            .await
            .ok()
            .flatten(),
        None => None,
    };

    match guard.decide(principal.as_ref()) {
        Decision::Allow => next.run(request).await,
        Decision::Deny => Redirect::to(UNAUTHORIZED_PATH).into_response(),
        Decision::Defer => (StatusCode::NOT_FOUND, NotFoundTemplate).into_response(),
    }
}

/// Extractor that optionally gets the current principal.
///
/// Never rejects; absent or unauthenticated sessions yield `None`.
pub struct OptionalPrincipal(pub Option<Principal>);

impl<S> FromRequestParts<S> for OptionalPrincipal
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let principal = match parts.extensions.get::<Session>() {
            Some(session) => session
                .get::<Principal>(session_keys::PRINCIPAL)
                .await
                .ok()
                .flatten(),
            None => None,
        };

        Ok(Self(principal))
    }
}

/// Helper to attach a principal to the session (login).
///
/// # Errors
///
/// Returns an error if the session cannot be modified.
pub async fn set_principal(
    session: &Session,
    principal: &Principal,
) -> Result<(), tower_sessions::session::Error> {
    session.insert(session_keys::PRINCIPAL, principal).await
}

/// Helper to clear the principal from the session (logout).
///
/// # Errors
///
/// Returns an error if the session cannot be modified.
pub async fn clear_principal(session: &Session) -> Result<(), tower_sessions::session::Error> {
    session
        .remove::<Principal>(session_keys::PRINCIPAL)
        .await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use meadowlark_core::CustomerId;

    fn principal(role: Role) -> Principal {
        Principal {
            id: CustomerId::new(1),
            role,
        }
    }

    #[test]
    fn test_exact_role_allows_matching_principal() {
        let guard = Guard::role(Role::Customer);
        assert_eq!(
            guard.decide(Some(&principal(Role::Customer))),
            Decision::Allow
        );
    }

    #[test]
    fn test_exact_role_denies_other_roles() {
        // An employee is not a customer; the refusal is visible
        let guard = Guard::role(Role::Customer);
        assert_eq!(
            guard.decide(Some(&principal(Role::Employee))),
            Decision::Deny
        );
    }

    #[test]
    fn test_exact_role_denies_missing_principal() {
        let guard = Guard::role(Role::Customer);
        assert_eq!(guard.decide(None), Decision::Deny);
    }

    #[test]
    fn test_silent_guard_defers() {
        // A customer probing an employee route sees the 404 path
        let guard = Guard::role_silent(Role::Employee);
        assert_eq!(
            guard.decide(Some(&principal(Role::Customer))),
            Decision::Defer
        );
        assert_eq!(guard.decide(None), Decision::Defer);
    }

    #[test]
    fn test_silent_guard_allows_matching_role() {
        let guard = Guard::role_silent(Role::Employee);
        assert_eq!(
            guard.decide(Some(&principal(Role::Employee))),
            Decision::Allow
        );
    }

    #[test]
    fn test_allow_list() {
        let guard = Guard::any_of([Role::Customer, Role::Employee]);
        assert_eq!(
            guard.decide(Some(&principal(Role::Customer))),
            Decision::Allow
        );
        assert_eq!(
            guard.decide(Some(&principal(Role::Employee))),
            Decision::Allow
        );
        assert_eq!(guard.decide(None), Decision::Deny);
    }
}
