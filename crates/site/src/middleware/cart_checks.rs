//! Cart validation gate.
//!
//! Two read-only checks run on every request after the session layer: the
//! waiver check and the guest-count check. Conventionally waiver first; the
//! checks are order-independent. Neither mutates the cart or aborts the
//! pipeline - they attach advisory [`CartWarnings`] to the request for the
//! view layer to render inline, so warnings persist across navigation until
//! the cart is corrected.

use std::collections::HashSet;

use axum::{
    extract::{FromRequestParts, Request},
    http::request::Parts,
    middleware::Next,
    response::Response,
};
use tower_sessions::Session;

use crate::models::cart::{self, Cart};

/// Advisory warnings derived from the cart on each request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CartWarnings {
    /// SKUs that require a waiver the session has not acknowledged.
    pub waiver_skus: Vec<String>,
    /// SKUs whose line guest count exceeds the vacation's maximum.
    pub over_capacity_skus: Vec<String>,
}

impl CartWarnings {
    /// Whether any warning is set.
    #[must_use]
    pub fn is_clear(&self) -> bool {
        self.waiver_skus.is_empty() && self.over_capacity_skus.is_empty()
    }
}

/// Compute warnings for a cart. Pure; the cart is never modified.
#[must_use]
pub fn check(cart: &Cart, acknowledged_waivers: &HashSet<String>) -> CartWarnings {
    // Waiver check
    let waiver_skus = cart
        .items
        .iter()
        .filter(|item| item.vacation.requires_waiver)
        .filter(|item| !acknowledged_waivers.contains(&item.vacation.sku))
        .map(|item| item.vacation.sku.clone())
        .collect();

    // Guest-count check
    let over_capacity_skus = cart
        .items
        .iter()
        .filter(|item| item.guests > item.vacation.maximum_guests)
        .map(|item| item.vacation.sku.clone())
        .collect();

    CartWarnings {
        waiver_skus,
        over_capacity_skus,
    }
}

/// Middleware that computes cart warnings and stores them in request
/// extensions. Runs router-wide so every page can surface pending warnings.
pub async fn cart_checks_middleware(mut request: Request, next: Next) -> Response {
    let warnings = match request.extensions().get::<Session>() {
        Some(session) => {
            let cart = cart::peek(session).await.ok().flatten().unwrap_or_default();
            let acknowledged = cart::acknowledged_waivers(session)
                .await
                .unwrap_or_default();
            check(&cart, &acknowledged)
        }
        None => CartWarnings::default(),
    };

    request.extensions_mut().insert(warnings);
    next.run(request).await
}

/// Extractor to get the cart warnings from request extensions.
impl<S> FromRequestParts<S> for CartWarnings
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(parts.extensions.get::<Self>().cloned().unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::cart::VacationRef;

    fn vacation(sku: &str, requires_waiver: bool, maximum_guests: i32) -> VacationRef {
        VacationRef {
            sku: sku.to_owned(),
            name: "Rock Climbing in Bend".to_owned(),
            price_in_cents: 289_995,
            requires_waiver,
            maximum_guests,
            qty: 5,
        }
    }

    #[test]
    fn test_empty_cart_is_clear() {
        let warnings = check(&Cart::default(), &HashSet::new());
        assert!(warnings.is_clear());
    }

    #[test]
    fn test_waiver_flagged_until_acknowledged() {
        let mut cart = Cart::default();
        cart.add_item(vacation("B99", true, 4), Some(2));

        let warnings = check(&cart, &HashSet::new());
        assert_eq!(warnings.waiver_skus, vec!["B99".to_owned()]);

        let acknowledged: HashSet<String> = ["B99".to_owned()].into();
        let warnings = check(&cart, &acknowledged);
        assert!(warnings.is_clear());
    }

    #[test]
    fn test_guest_count_flagged_without_mutating_cart() {
        let mut cart = Cart::default();
        cart.add_item(vacation("B99", false, 4), Some(6));
        let before = cart.clone();

        let warnings = check(&cart, &HashSet::new());

        assert_eq!(warnings.over_capacity_skus, vec!["B99".to_owned()]);
        assert_eq!(cart, before);
    }

    #[test]
    fn test_guest_count_at_maximum_is_fine() {
        let mut cart = Cart::default();
        cart.add_item(vacation("B99", false, 4), Some(4));

        assert!(check(&cart, &HashSet::new()).is_clear());
    }

    #[test]
    fn test_both_checks_can_fire_for_one_line() {
        let mut cart = Cart::default();
        cart.add_item(vacation("B99", true, 4), Some(9));

        let warnings = check(&cart, &HashSet::new());
        assert_eq!(warnings.waiver_skus, vec!["B99".to_owned()]);
        assert_eq!(warnings.over_capacity_skus, vec!["B99".to_owned()]);
    }
}
