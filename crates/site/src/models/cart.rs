//! The session-scoped shopping cart.
//!
//! The cart is an explicit value owned by the session record, mutated only
//! within the synchronous extent of one request's handler chain. Handlers go
//! through [`get_or_create`]/[`save`] rather than touching session fields
//! directly. The underlying session store serializes access per session key,
//! so no cross-request locking is needed.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use tower_sessions::Session;

use crate::db::vacations::Vacation;
use crate::models::session_keys;

/// A read-only snapshot of a vacation, taken from the catalog at add time.
///
/// The cart does not re-validate snapshots against later catalog changes;
/// what the customer saw when they clicked "add" is what they booked.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VacationRef {
    pub sku: String,
    pub name: String,
    /// Price in US cents.
    pub price_in_cents: i64,
    pub requires_waiver: bool,
    pub maximum_guests: i32,
    pub qty: i32,
}

impl From<&Vacation> for VacationRef {
    fn from(vacation: &Vacation) -> Self {
        Self {
            sku: vacation.sku.clone(),
            name: vacation.name.clone(),
            price_in_cents: vacation.price_in_cents,
            requires_waiver: vacation.requires_waiver,
            maximum_guests: vacation.maximum_guests,
            qty: vacation.qty,
        }
    }
}

/// One line in the cart: a vacation snapshot plus a guest count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartItem {
    pub vacation: VacationRef,
    pub guests: i32,
}

/// Billing details collected at checkout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Billing {
    pub name: String,
    pub email: String,
}

/// The shopping cart. One booking unit per line; adding the same SKU twice
/// produces two lines.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cart {
    pub items: Vec<CartItem>,
    /// Assigned at checkout. A display placeholder with no uniqueness
    /// guarantee.
    pub number: Option<String>,
    pub billing: Option<Billing>,
}

impl Cart {
    /// Whether the cart has no line items.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Append a line item.
    ///
    /// `guests` is taken literally when positive; absent or non-positive
    /// values collapse to 1. Duplicate SKUs are not merged and not an error:
    /// a unit is one booking.
    pub fn add_item(&mut self, vacation: VacationRef, guests: Option<i32>) {
        let guests = guests.filter(|&g| g > 0).unwrap_or(1);
        self.items.push(CartItem { vacation, guests });
    }

    /// Sum of line prices in US cents.
    #[must_use]
    pub fn total_in_cents(&self) -> i64 {
        self.items
            .iter()
            .map(|item| item.vacation.price_in_cents)
            .sum()
    }
}

// =============================================================================
// Session Helpers
// =============================================================================

/// Get the session cart, creating and storing an empty one if absent.
///
/// Idempotent: calling this repeatedly on a fresh session yields the same
/// empty cart.
///
/// # Errors
///
/// Returns an error if the session store fails.
pub async fn get_or_create(session: &Session) -> Result<Cart, tower_sessions::session::Error> {
    if let Some(cart) = session.get::<Cart>(session_keys::CART).await? {
        return Ok(cart);
    }

    let cart = Cart::default();
    session.insert(session_keys::CART, &cart).await?;
    Ok(cart)
}

/// Peek at the session cart without creating one.
///
/// # Errors
///
/// Returns an error if the session store fails.
pub async fn peek(session: &Session) -> Result<Option<Cart>, tower_sessions::session::Error> {
    session.get::<Cart>(session_keys::CART).await
}

/// Store the cart back into the session.
///
/// # Errors
///
/// Returns an error if the session store fails.
pub async fn save(session: &Session, cart: &Cart) -> Result<(), tower_sessions::session::Error> {
    session.insert(session_keys::CART, cart).await
}

/// Replace the cart with a fresh empty one (checkout completion).
///
/// # Errors
///
/// Returns an error if the session store fails.
pub async fn clear(session: &Session) -> Result<(), tower_sessions::session::Error> {
    session.insert(session_keys::CART, &Cart::default()).await
}

/// The set of SKUs whose waiver the session has acknowledged.
///
/// # Errors
///
/// Returns an error if the session store fails.
pub async fn acknowledged_waivers(
    session: &Session,
) -> Result<HashSet<String>, tower_sessions::session::Error> {
    Ok(session
        .get::<HashSet<String>>(session_keys::WAIVERS_ACKNOWLEDGED)
        .await?
        .unwrap_or_default())
}

/// Record a waiver acknowledgment for a SKU.
///
/// # Errors
///
/// Returns an error if the session store fails.
pub async fn acknowledge_waiver(
    session: &Session,
    sku: &str,
) -> Result<(), tower_sessions::session::Error> {
    let mut acknowledged = acknowledged_waivers(session).await?;
    acknowledged.insert(sku.to_owned());
    session
        .insert(session_keys::WAIVERS_ACKNOWLEDGED, &acknowledged)
        .await
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

    fn vacation_ref(sku: &str) -> VacationRef {
        VacationRef {
            sku: sku.to_owned(),
            name: "Hood River Day Trip".to_owned(),
            price_in_cents: 9995,
            requires_waiver: false,
            maximum_guests: 16,
            qty: 10,
        }
    }

    #[test]
    fn test_duplicate_skus_are_distinct_lines() {
        let mut cart = Cart::default();
        cart.add_item(vacation_ref("HR199"), Some(2));
        cart.add_item(vacation_ref("HR199"), Some(3));

        assert_eq!(cart.items.len(), 2);
    }

    #[test]
    fn test_guests_defaults_to_one() {
        let mut cart = Cart::default();
        cart.add_item(vacation_ref("HR199"), None);
        cart.add_item(vacation_ref("HR199"), Some(0));
        cart.add_item(vacation_ref("HR199"), Some(-4));

        assert!(cart.items.iter().all(|item| item.guests == 1));
    }

    #[test]
    fn test_guests_taken_literally_when_positive() {
        let mut cart = Cart::default();
        cart.add_item(vacation_ref("OC39"), Some(12));

        assert_eq!(cart.items.first().map(|i| i.guests), Some(12));
    }

    #[test]
    fn test_total() {
        let mut cart = Cart::default();
        cart.add_item(vacation_ref("HR199"), Some(2));
        cart.add_item(vacation_ref("HR199"), None);

        assert_eq!(cart.total_in_cents(), 19990);
    }

    #[tokio::test]
    async fn test_get_or_create_is_idempotent() {
        let session = session();

        let first = get_or_create(&session).await.unwrap();
        let second = get_or_create(&session).await.unwrap();

        assert!(first.is_empty());
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_saved_cart_round_trips() {
        let session = session();

        let mut cart = get_or_create(&session).await.unwrap();
        cart.add_item(vacation_ref("HR199"), Some(2));
        save(&session, &cart).await.unwrap();

        assert_eq!(get_or_create(&session).await.unwrap(), cart);
    }

    #[tokio::test]
    async fn test_clear_leaves_an_empty_cart() {
        let session = session();

        let mut cart = get_or_create(&session).await.unwrap();
        cart.add_item(vacation_ref("B99"), None);
        save(&session, &cart).await.unwrap();

        clear(&session).await.unwrap();
        assert!(get_or_create(&session).await.unwrap().is_empty());
    }
}
