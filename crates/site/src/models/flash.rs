//! One-time flash messages.
//!
//! A flash message is set by one handler (typically before a redirect) and
//! consumed by the next render. Taking the message clears it from the
//! session, so it shows exactly once.

use serde::{Deserialize, Serialize};
use tower_sessions::Session;

use crate::models::session_keys;

/// Visual category for a flash message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FlashKind {
    Success,
    Danger,
}

impl FlashKind {
    /// CSS class suffix for the alert box.
    #[must_use]
    pub const fn css_class(self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Danger => "danger",
        }
    }
}

/// A tagged flash message, rather than an ad hoc bag of fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlashMessage {
    pub kind: FlashKind,
    pub title: String,
    pub body: String,
}

impl FlashMessage {
    /// A success message.
    #[must_use]
    pub fn success(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            kind: FlashKind::Success,
            title: title.into(),
            body: body.into(),
        }
    }

    /// A danger message.
    #[must_use]
    pub fn danger(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            kind: FlashKind::Danger,
            title: title.into(),
            body: body.into(),
        }
    }
}

/// Queue a flash message for the next render.
///
/// # Errors
///
/// Returns an error if the session store fails.
pub async fn set(
    session: &Session,
    message: FlashMessage,
) -> Result<(), tower_sessions::session::Error> {
    session.insert(session_keys::FLASH, &message).await
}

/// Take the pending flash message, clearing it from the session.
///
/// # Errors
///
/// Returns an error if the session store fails.
pub async fn take(
    session: &Session,
) -> Result<Option<FlashMessage>, tower_sessions::session::Error> {
    session.remove::<FlashMessage>(session_keys::FLASH).await
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::Arc;

    use tower_sessions::MemoryStore;

    use super::*;

    fn session() -> Session {
        let store = Arc::new(MemoryStore::default());
        Session::new(None, store, None)
    }

    #[tokio::test]
    async fn test_take_is_one_time() {
        let session = session();
        let message = FlashMessage::success("Thank you!", "You are signed up.");

        set(&session, message.clone()).await.unwrap();

        assert_eq!(take(&session).await.unwrap(), Some(message));
        assert_eq!(take(&session).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_take_without_pending_message() {
        let session = session();
        assert_eq!(take(&session).await.unwrap(), None);
    }

    #[test]
    fn test_constructors_tag_kind() {
        let success = FlashMessage::success("Thank you!", "You are signed up.");
        assert_eq!(success.kind, FlashKind::Success);

        let danger = FlashMessage::danger("Ooops!", "There was an error.");
        assert_eq!(danger.kind, FlashKind::Danger);
    }

    #[test]
    fn test_css_class() {
        assert_eq!(FlashKind::Success.css_class(), "success");
        assert_eq!(FlashKind::Danger.css_class(), "danger");
    }
}
