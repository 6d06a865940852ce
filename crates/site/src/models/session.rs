//! Session-related types.
//!
//! Types stored in the session, and the keys they live under.

use serde::{Deserialize, Serialize};

use meadowlark_core::{CustomerId, Role};

/// The authenticated identity attached to a session.
///
/// How a principal gets authenticated is an external concern; guards only
/// care that one is present and what role it carries.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Principal {
    /// The principal's customer record ID.
    pub id: CustomerId,
    /// The principal's role, from the closed role set.
    pub role: Role,
}

/// Session keys.
pub mod keys {
    /// Key for the authenticated principal.
    pub const PRINCIPAL: &str = "principal";

    /// Key for the shopping cart.
    pub const CART: &str = "cart";

    /// Key for the set of SKUs whose waiver has been acknowledged.
    pub const WAIVERS_ACKNOWLEDGED: &str = "waivers_acknowledged";

    /// Key for the display currency preference.
    pub const CURRENCY: &str = "currency";

    /// Key for the pending flash message.
    pub const FLASH: &str = "flash";
}
