//! Domain models for the site.
//!
//! - [`cart`] - The session-scoped shopping cart
//! - [`flash`] - One-time flash messages
//! - [`session`] - Session-stored identity and session key names

pub mod cart;
pub mod flash;
pub mod session;

pub use cart::{Billing, Cart, CartItem, VacationRef};
pub use flash::{FlashKind, FlashMessage};
pub use session::{Principal, keys as session_keys};
