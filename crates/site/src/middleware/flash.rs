//! Flash transfer middleware.
//!
//! Moves the pending flash message out of the session and into request
//! extensions, clearing it in the process. Templates receive the message
//! through the [`Flash`] extractor; it shows exactly once.

use axum::{
    extract::{FromRequestParts, Request},
    http::request::Parts,
    middleware::Next,
    response::Response,
};
use tower_sessions::Session;

use crate::models::flash::{self, FlashMessage};

/// The flash message taken from the session for this render, if any.
#[derive(Debug, Clone, Default)]
pub struct Flash(pub Option<FlashMessage>);

/// Middleware that transfers the pending flash into request extensions.
pub async fn flash_middleware(mut request: Request, next: Next) -> Response {
    let message = match request.extensions().get::<Session>() {
        Some(session) => flash::take(session).await.ok().flatten(),
        None => None,
    };

    request.extensions_mut().insert(Flash(message));
    next.run(request).await
}

/// Extractor to get the flash from request extensions.
impl<S> FromRequestParts<S> for Flash
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(parts.extensions.get::<Self>().cloned().unwrap_or_default())
    }
}
