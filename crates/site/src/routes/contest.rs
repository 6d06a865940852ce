//! Vacation photo contest handlers.
//!
//! Uploaded photos land under `{data_dir}/vacation-photo/{timestamp}/`.
//! Every failure path resolves to a flash message and a redirect; a broken
//! upload never takes down the request pipeline.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Multipart, State},
    response::Redirect,
};
use chrono::Utc;
use tower_sessions::Session;
use tracing::instrument;

use crate::error::Result;
use crate::middleware::{CartWarnings, Flash};
use crate::models::{FlashMessage, flash};
use crate::state::AppState;

/// Contest entry form template.
#[derive(Template, WebTemplate)]
#[template(path = "contest/vacation_photo.html")]
pub struct VacationPhotoTemplate {
    pub flash: Option<FlashMessage>,
    pub warnings: CartWarnings,
}

/// Display the contest entry form.
#[instrument(skip_all)]
pub async fn entry_form(Flash(flash): Flash, warnings: CartWarnings) -> VacationPhotoTemplate {
    VacationPhotoTemplate { flash, warnings }
}

/// Accept a contest photo upload.
#[instrument(skip_all)]
pub async fn submit_photo(
    State(state): State<AppState>,
    session: Session,
    mut multipart: Multipart,
) -> Result<Redirect> {
    let mut saved = false;

    while let Ok(Some(field)) = multipart.next_field().await {
        if field.name() != Some("photo") {
            continue;
        }

        let file_name = field
            .file_name()
            .map_or_else(|| "photo".to_owned(), sanitize_file_name);

        match field.bytes().await {
            Ok(bytes) if !bytes.is_empty() => {
                let dir = state
                    .config()
                    .data_dir
                    .join("vacation-photo")
                    .join(Utc::now().format("%Y%m%d%H%M%S").to_string());

                if let Err(e) = tokio::fs::create_dir_all(&dir).await {
                    tracing::error!(error = %e, "Failed to create upload directory");
                    break;
                }
                if let Err(e) = tokio::fs::write(dir.join(&file_name), &bytes).await {
                    tracing::error!(error = %e, "Failed to store uploaded photo");
                    break;
                }

                saved = true;
            }
            Ok(_) => {}
            Err(e) => {
                tracing::warn!(error = %e, "Failed to read upload field");
                break;
            }
        }
    }

    let message = if saved {
        FlashMessage::success(
            "Good luck!",
            "You have been entered into the contest.",
        )
    } else {
        FlashMessage::danger(
            "Ooops!",
            "There was an error processing your submission; please try again.",
        )
    };

    flash::set(&session, message).await?;
    Ok(Redirect::to("/contest/vacation-photo"))
}

/// Strip path components and suspicious characters from an uploaded name.
fn sanitize_file_name(name: &str) -> String {
    let base = name
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or("photo");

    let cleaned: String = base
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_'))
        .collect();

    if cleaned.is_empty() {
        "photo".to_owned()
    } else {
        cleaned
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_strips_paths() {
        assert_eq!(sanitize_file_name("../../etc/passwd"), "passwd");
        assert_eq!(sanitize_file_name("C:\\photos\\me.jpg"), "me.jpg");
    }

    #[test]
    fn test_sanitize_keeps_simple_names() {
        assert_eq!(sanitize_file_name("beach-day_1.jpeg"), "beach-day_1.jpeg");
    }

    #[test]
    fn test_sanitize_never_empty() {
        assert_eq!(sanitize_file_name("///"), "photo");
        assert_eq!(sanitize_file_name("日本"), "photo");
    }
}
