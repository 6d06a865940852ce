//! Cart and checkout route handlers.
//!
//! The cart lives in the session as an explicit value; handlers read and
//! write it only through the `models::cart` helpers. Mutation that depends
//! on a catalog lookup applies only after the lookup resolves - a failed or
//! empty lookup leaves the cart untouched.

use std::sync::LazyLock;

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::State,
    response::{IntoResponse, Redirect, Response},
};
use rand::Rng;
use rand::distr::Alphanumeric;
use regex::Regex;
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use crate::error::{AppError, Result};
use crate::middleware::{CartWarnings, Flash};
use crate::models::cart::{self, Billing, Cart, VacationRef};
use crate::models::{FlashMessage, flash};
use crate::state::AppState;

/// Standard email pattern used at checkout.
static VALID_EMAIL: LazyLock<Regex> = LazyLock::new(|| {
    #[allow(clippy::unwrap_used)] // pattern is a literal, checked by tests
    Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap()
});

/// Length of the generated cart number.
const CART_NUMBER_LEN: usize = 8;

/// Cart line display data for templates.
pub struct CartItemView {
    pub sku: String,
    pub name: String,
    pub guests: i32,
    pub price: String,
    pub requires_waiver: bool,
    pub waiver_pending: bool,
    pub over_capacity: bool,
}

/// Cart display data for templates.
pub struct CartView {
    pub items: Vec<CartItemView>,
    pub total: String,
}

impl CartView {
    fn build(cart: &Cart, warnings: &CartWarnings) -> Self {
        let items = cart
            .items
            .iter()
            .map(|item| CartItemView {
                sku: item.vacation.sku.clone(),
                name: item.vacation.name.clone(),
                guests: item.guests,
                price: format_cents(item.vacation.price_in_cents),
                requires_waiver: item.vacation.requires_waiver,
                waiver_pending: warnings.waiver_skus.contains(&item.vacation.sku),
                over_capacity: warnings.over_capacity_skus.contains(&item.vacation.sku),
            })
            .collect();

        Self {
            items,
            total: format_cents(cart.total_in_cents()),
        }
    }
}

/// Format a US-cent amount as a dollar string.
fn format_cents(cents: i64) -> String {
    #[allow(clippy::cast_precision_loss)]
    let dollars = cents as f64 / 100.0;
    format!("${dollars:.2}")
}

/// Cart page template.
#[derive(Template, WebTemplate)]
#[template(path = "cart/show.html")]
pub struct CartShowTemplate {
    pub flash: Option<FlashMessage>,
    pub warnings: CartWarnings,
    pub cart: CartView,
}

/// Checkout form template.
#[derive(Template, WebTemplate)]
#[template(path = "cart/checkout.html")]
pub struct CheckoutTemplate {
    pub flash: Option<FlashMessage>,
    pub warnings: CartWarnings,
    pub cart: CartView,
}

/// Post-checkout thank-you template.
#[derive(Template, WebTemplate)]
#[template(path = "cart/thank_you.html")]
pub struct ThankYouTemplate {
    pub cart_number: String,
    pub email: String,
}

/// Confirmation email body template.
#[derive(Template)]
#[template(path = "email/checkout_confirmation.html")]
pub struct ConfirmationEmailTemplate {
    pub name: String,
    pub cart_number: String,
    pub total: String,
}

/// Display the cart page.
#[instrument(skip_all)]
pub async fn show(
    session: Session,
    Flash(flash): Flash,
    warnings: CartWarnings,
) -> Result<CartShowTemplate> {
    let cart = cart::get_or_create(&session).await?;
    let cart = CartView::build(&cart, &warnings);

    Ok(CartShowTemplate {
        flash,
        warnings,
        cart,
    })
}

/// Add to cart form data.
#[derive(Debug, Deserialize)]
pub struct AddToCartForm {
    pub sku: String,
    pub guests: Option<i32>,
}

/// Add a vacation to the cart.
///
/// The catalog lookup is async; the cart mutation applies only after it
/// resolves. An unknown SKU forwards to the not-found handler and a failed
/// lookup to error handling - in both cases the cart is left unmodified.
#[instrument(skip(state, session), fields(sku = %form.sku))]
pub async fn add(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<AddToCartForm>,
) -> Result<Redirect> {
    let vacation = state
        .vacation_by_sku(&form.sku)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("vacation sku: {}", form.sku)))?;

    let mut cart = cart::get_or_create(&session).await?;
    cart.add_item(VacationRef::from(&vacation), form.guests);
    cart::save(&session, &cart).await?;

    Ok(Redirect::to("/cart"))
}

/// Waiver acknowledgment form data.
#[derive(Debug, Deserialize)]
pub struct WaiverForm {
    pub sku: String,
}

/// Acknowledge the waiver for a SKU.
#[instrument(skip(session), fields(sku = %form.sku))]
pub async fn acknowledge_waiver(
    session: Session,
    Form(form): Form<WaiverForm>,
) -> Result<Redirect> {
    cart::acknowledge_waiver(&session, &form.sku).await?;
    Ok(Redirect::to("/cart"))
}

/// Display the checkout form. An empty cart bounces back to the cart page.
#[instrument(skip_all)]
pub async fn checkout_form(
    session: Session,
    Flash(flash): Flash,
    warnings: CartWarnings,
) -> Result<Response> {
    let cart = cart::get_or_create(&session).await?;
    if cart.is_empty() {
        flash::set(
            &session,
            FlashMessage::danger("Ooops!", "Your cart is empty."),
        )
        .await?;
        return Ok(Redirect::to("/cart").into_response());
    }

    let cart = CartView::build(&cart, &warnings);
    Ok(CheckoutTemplate {
        flash,
        warnings,
        cart,
    }
    .into_response())
}

/// Checkout form data.
#[derive(Debug, Deserialize)]
pub struct CheckoutForm {
    pub name: String,
    pub email: String,
}

/// Complete checkout.
///
/// Requires a non-empty cart and a syntactically valid email. On success
/// the confirmation email is rendered and handed to the mail collaborator
/// in a background task (delivery failure is logged, never surfaced), and
/// the session cart is replaced with a fresh one.
#[instrument(skip(state, session, form))]
pub async fn checkout(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<CheckoutForm>,
) -> Result<Response> {
    let mut cart = cart::get_or_create(&session).await?;

    if cart.is_empty() {
        flash::set(
            &session,
            FlashMessage::danger("Ooops!", "Your cart is empty."),
        )
        .await?;
        return Ok(Redirect::to("/cart").into_response());
    }

    let email = form.email.trim().to_owned();
    if !VALID_EMAIL.is_match(&email) {
        flash::set(
            &session,
            FlashMessage::danger("Ooops!", "The email address you entered is not valid."),
        )
        .await?;
        return Ok(Redirect::to("/cart/checkout").into_response());
    }

    cart.number = Some(generate_cart_number());
    cart.billing = Some(Billing {
        name: form.name.clone(),
        email: email.clone(),
    });

    // Render the confirmation body before clearing anything
    let cart_number = cart.number.clone().unwrap_or_default();
    let body = ConfirmationEmailTemplate {
        name: form.name,
        cart_number: cart_number.clone(),
        total: format_cents(cart.total_in_cents()),
    }
    .render()
    .map_err(|e| AppError::Internal(format!("failed to render confirmation email: {e}")))?;

    // Fire and forget: a lost confirmation email must not fail the checkout
    let email_client = state.email().clone();
    let recipient = email.clone();
    tokio::spawn(async move {
        if let Err(e) = email_client
            .send(&recipient, "Your Meadowlark Travel Tour", &body)
            .await
        {
            tracing::error!(error = %e, "Failed to send checkout confirmation");
        }
    });

    cart::clear(&session).await?;

    Ok(ThankYouTemplate { cart_number, email }.into_response())
}

/// Generate a display cart number.
///
/// A random alphanumeric placeholder; uniqueness is not guaranteed and
/// nothing downstream depends on it.
fn generate_cart_number() -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(CART_NUMBER_LEN)
        .map(char::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_email_pattern() {
        assert!(VALID_EMAIL.is_match("guest@example.com"));
        assert!(VALID_EMAIL.is_match("guest.name+tag@example.co.uk"));

        assert!(!VALID_EMAIL.is_match(""));
        assert!(!VALID_EMAIL.is_match("guest"));
        assert!(!VALID_EMAIL.is_match("guest@"));
        assert!(!VALID_EMAIL.is_match("@example.com"));
        assert!(!VALID_EMAIL.is_match("guest@example"));
        assert!(!VALID_EMAIL.is_match("gu est@example.com"));
    }

    #[test]
    fn test_cart_number_shape() {
        let number = generate_cart_number();
        assert_eq!(number.len(), CART_NUMBER_LEN);
        assert!(number.chars().all(|c| c.is_ascii_alphanumeric()));
    }

    #[test]
    fn test_format_cents() {
        assert_eq!(format_cents(9995), "$99.95");
        assert_eq!(format_cents(0), "$0.00");
        assert_eq!(format_cents(289_995), "$2899.95");
    }
}
