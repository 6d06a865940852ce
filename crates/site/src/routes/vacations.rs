//! Vacation listing, detail, currency selection, and in-season
//! notification handlers.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Path, Query, State},
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use meadowlark_core::{Currency, Email, convert_from_usd};

use crate::db::vacations::{Vacation, VacationRepository};
use crate::error::{AppError, Result};
use crate::middleware::{CartWarnings, Flash};
use crate::models::{FlashMessage, flash, session_keys};
use crate::state::AppState;

/// Vacation display data for the listing.
pub struct VacationView {
    pub sku: String,
    pub slug: String,
    pub name: String,
    pub description: String,
    pub qty: i32,
    pub in_season: bool,
    pub requires_waiver: bool,
    /// Price formatted in the selected display currency.
    pub price: String,
}

impl VacationView {
    fn build(vacation: &Vacation, currency_code: &str) -> Self {
        #[allow(clippy::cast_precision_loss)]
        let usd = vacation.price_in_cents as f64 / 100.0;
        let converted = convert_from_usd(usd, currency_code);

        // NaN is the converter's unknown-currency sentinel; it must never
        // reach the rendered page
        let price = if converted.is_nan() {
            format!("{usd:.2} USD")
        } else {
            format!("{converted:.2} {currency_code}")
        };

        Self {
            sku: vacation.sku.clone(),
            slug: vacation.slug.clone(),
            name: vacation.name.clone(),
            description: vacation.description.clone(),
            qty: vacation.qty,
            in_season: vacation.in_season,
            requires_waiver: vacation.requires_waiver,
            price,
        }
    }
}

/// One entry in the currency selector.
pub struct CurrencyOption {
    pub code: &'static str,
    pub selected: bool,
}

/// Vacation listing template.
#[derive(Template, WebTemplate)]
#[template(path = "vacations/list.html")]
pub struct VacationListTemplate {
    pub flash: Option<FlashMessage>,
    pub warnings: CartWarnings,
    pub currency: String,
    pub currencies: Vec<CurrencyOption>,
    pub vacations: Vec<VacationView>,
}

/// Vacation detail template.
#[derive(Template, WebTemplate)]
#[template(path = "vacations/detail.html")]
pub struct VacationDetailTemplate {
    pub flash: Option<FlashMessage>,
    pub warnings: CartWarnings,
    pub vacation: Vacation,
    /// Price formatted in US dollars.
    pub price: String,
}

/// Notify-when-in-season form template.
#[derive(Template, WebTemplate)]
#[template(path = "vacations/notify_me.html")]
pub struct NotifyMeTemplate {
    pub flash: Option<FlashMessage>,
    pub warnings: CartWarnings,
    pub sku: String,
}

/// The session's display currency, defaulting to USD.
async fn session_currency(session: &Session) -> String {
    session
        .get::<String>(session_keys::CURRENCY)
        .await
        .ok()
        .flatten()
        .unwrap_or_else(|| Currency::Usd.code().to_owned())
}

/// Display the vacation listing in the session currency.
#[instrument(skip_all)]
pub async fn list(
    State(state): State<AppState>,
    session: Session,
    Flash(flash): Flash,
    warnings: CartWarnings,
) -> Result<VacationListTemplate> {
    let currency = session_currency(&session).await;
    let vacations = VacationRepository::new(state.pool()).list_available().await?;

    let vacations = vacations
        .iter()
        .map(|vacation| VacationView::build(vacation, &currency))
        .collect();

    let currencies = Currency::ALL
        .iter()
        .map(|c| CurrencyOption {
            code: c.code(),
            selected: c.code() == currency,
        })
        .collect();

    Ok(VacationListTemplate {
        flash,
        warnings,
        currency,
        currencies,
        vacations,
    })
}

/// Currency selection form data.
#[derive(Debug, Deserialize)]
pub struct CurrencyForm {
    pub currency: String,
}

/// Store the display currency preference in the session.
#[instrument(skip(session))]
pub async fn set_currency(
    session: Session,
    Form(form): Form<CurrencyForm>,
) -> Result<Redirect> {
    // Unknown codes are stored as-is; the converter's NaN sentinel covers
    // them at render time
    session
        .insert(session_keys::CURRENCY, &form.currency)
        .await?;
    Ok(Redirect::to("/vacations"))
}

/// Display a single vacation by slug.
#[instrument(skip(state, flash, warnings))]
pub async fn detail(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    Flash(flash): Flash,
    warnings: CartWarnings,
) -> Result<VacationDetailTemplate> {
    let vacation = VacationRepository::new(state.pool())
        .get_by_slug(&slug)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("vacation: {slug}")))?;

    #[allow(clippy::cast_precision_loss)]
    let price = format!("${:.2}", vacation.price_in_cents as f64 / 100.0);

    Ok(VacationDetailTemplate {
        flash,
        warnings,
        vacation,
        price,
    })
}

/// Query parameters for the notify-me form.
#[derive(Debug, Deserialize)]
pub struct NotifyMeQuery {
    #[serde(default)]
    pub sku: String,
}

/// Display the notify-when-in-season form.
#[instrument(skip(flash, warnings))]
pub async fn notify_me_form(
    Query(query): Query<NotifyMeQuery>,
    Flash(flash): Flash,
    warnings: CartWarnings,
) -> NotifyMeTemplate {
    NotifyMeTemplate {
        flash,
        warnings,
        sku: query.sku,
    }
}

/// Notify-when-in-season signup form data.
#[derive(Debug, Deserialize)]
pub struct NotifyMeForm {
    pub email: String,
    pub sku: String,
}

/// Register an in-season notification listener.
///
/// Validation and persistence failures both resolve to a flash message and
/// a redirect back to the listing; nothing here is a hard failure.
#[instrument(skip(state, session), fields(sku = %form.sku))]
pub async fn notify_me(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<NotifyMeForm>,
) -> Result<Response> {
    let Ok(email) = Email::parse(form.email.trim()) else {
        flash::set(
            &session,
            FlashMessage::danger("Ooops!", "The email address you entered is not valid."),
        )
        .await?;
        return Ok(Redirect::to("/vacations").into_response());
    };

    let result = VacationRepository::new(state.pool())
        .add_in_season_listener(email.as_str(), &form.sku)
        .await;

    let message = match result {
        Ok(()) => FlashMessage::success(
            "Thank you!",
            "You will be notified when this vacation is in season.",
        ),
        Err(e) => {
            tracing::error!(error = %e, "Failed to store in-season listener");
            FlashMessage::danger("Ooops!", "There was an error processing your request.")
        }
    };

    flash::set(&session, message).await?;
    Ok(Redirect::to("/vacations").into_response())
}
