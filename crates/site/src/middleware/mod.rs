//! HTTP middleware stack for the site.
//!
//! # Middleware Order (bottom to top in Router)
//!
//! 1. Sentry layer (capture errors)
//! 2. `TraceLayer` (request tracing)
//! 3. Session layer (tower-sessions with `PostgreSQL` store, signed cookie)
//! 4. Flash transfer (move the pending flash into request extensions)
//! 5. Cart checks (waiver / guest-count warnings into request extensions)
//! 6. Role guards (per-route, first deny short-circuits)
//!
//! The flash transfer and the cart checks are scoped to the page routes
//! (see `crate::app`); asset requests and unmatched paths bypass them so
//! they cannot consume a pending flash.

pub mod auth;
pub mod cart_checks;
pub mod flash;
pub mod session;

pub use auth::{Decision, Guard, OptionalPrincipal, clear_principal, set_principal};
pub use cart_checks::{CartWarnings, cart_checks_middleware};
pub use flash::{Flash, flash_middleware};
pub use session::create_session_layer;
