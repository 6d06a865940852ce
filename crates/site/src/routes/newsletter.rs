//! Newsletter signup handlers.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::State,
    response::Redirect,
};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use meadowlark_core::Email;

use crate::db::newsletter::NewsletterRepository;
use crate::error::Result;
use crate::middleware::{CartWarnings, Flash};
use crate::models::{FlashMessage, flash};
use crate::state::AppState;

/// Newsletter signup form template.
#[derive(Template, WebTemplate)]
#[template(path = "newsletter/signup.html")]
pub struct SignupTemplate {
    pub flash: Option<FlashMessage>,
    pub warnings: CartWarnings,
}

/// Newsletter signup form data.
#[derive(Debug, Deserialize)]
pub struct SignupForm {
    #[serde(default)]
    pub name: String,
    pub email: String,
}

/// Display the signup form.
#[instrument(skip_all)]
pub async fn signup_form(Flash(flash): Flash, warnings: CartWarnings) -> SignupTemplate {
    SignupTemplate { flash, warnings }
}

/// Process a newsletter signup.
///
/// A duplicate signup is a success from the subscriber's point of view; a
/// store failure gets the generic database-error flash.
#[instrument(skip(state, session, form), fields(email = %form.email))]
pub async fn signup(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<SignupForm>,
) -> Result<Redirect> {
    let email = form.email.trim().to_lowercase();

    let Ok(email) = Email::parse(&email) else {
        flash::set(
            &session,
            FlashMessage::danger(
                "Validation error!",
                "The email address you entered is not valid.",
            ),
        )
        .await?;
        return Ok(Redirect::to("/newsletter"));
    };

    let message = match NewsletterRepository::new(state.pool())
        .signup(form.name.trim(), email.as_str())
        .await
    {
        Ok(()) => FlashMessage::success(
            "Thank you!",
            "You have now been signed up for the newsletter.",
        ),
        Err(e) => {
            tracing::error!(error = %e, "Newsletter signup failed");
            FlashMessage::danger("Database error!", "There was a database error; please try again later.")
        }
    };

    flash::set(&session, message).await?;
    Ok(Redirect::to("/"))
}
