//! HTTP route handlers for the site.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                        - Home page
//! GET  /health                  - Health check
//!
//! # Vacations
//! GET  /vacations               - Vacation listing (session currency)
//! POST /vacations/currency      - Set display currency preference
//! GET  /vacations/{slug}        - Vacation detail
//! GET  /notify-me               - Notify-when-in-season form
//! POST /notify-me               - Notify-when-in-season signup
//!
//! # Cart
//! GET  /cart                    - Cart page
//! POST /cart/add                - Add to cart (SKU + guest count)
//! POST /cart/waiver             - Acknowledge a waiver
//! GET  /cart/checkout           - Checkout form (requires non-empty cart)
//! POST /cart/checkout           - Complete checkout, send confirmation email
//!
//! # Customer (exact-role guard: customer)
//! GET  /customer/{id}           - Customer overview
//! GET  /customer/{id}/orders    - Customer order history
//! POST /customer/{id}/update    - Programmatic update (JSON in/out)
//!
//! # Newsletter & contest
//! GET  /newsletter              - Signup form
//! POST /newsletter/signup       - Signup action
//! GET  /contest/vacation-photo  - Contest entry form
//! POST /contest/vacation-photo  - Photo upload (multipart)
//!
//! # Attractions REST API (JSON only)
//! GET  /api/attractions         - List approved attractions
//! POST /api/attractions         - Submit a new attraction
//! GET  /api/attractions/{id}    - Fetch one attraction
//!
//! # Admin (silent guard / allow-list guard: employee)
//! GET  /admin                   - Admin home
//! GET  /admin/users             - Admin user list
//! GET  /unauthorized            - Visible guard-denial page
//! ```

pub mod admin;
pub mod api;
pub mod cart;
pub mod contest;
pub mod customer;
pub mod home;
pub mod newsletter;
pub mod vacations;

use axum::{
    Router,
    middleware::from_fn,
    routing::{get, post},
};

use meadowlark_core::Role;

use crate::middleware::Guard;
use crate::middleware::auth::guard_route;
use crate::state::AppState;

/// Create the vacation routes router.
pub fn vacation_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(vacations::list))
        .route("/currency", post(vacations::set_currency))
        .route("/{slug}", get(vacations::detail))
}

/// Create the cart routes router.
pub fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(cart::show))
        .route("/add", post(cart::add))
        .route("/waiver", post(cart::acknowledge_waiver))
        .route(
            "/checkout",
            get(cart::checkout_form).post(cart::checkout),
        )
}

/// Create the customer routes router, guarded by the exact-role guard.
pub fn customer_routes() -> Router<AppState> {
    Router::new()
        .route("/{id}", get(customer::home))
        .route("/{id}/orders", get(customer::orders))
        .route("/{id}/update", post(customer::ajax_update))
        .route_layer(from_fn(|req, next| {
            guard_route(Guard::role(Role::Customer), req, next)
        }))
}

/// Create the attractions API router.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/attractions", get(api::list).post(api::create))
        .route("/attractions/{id}", get(api::get_one))
}

/// Create the admin routes router.
///
/// `/admin` itself is hidden behind the silent guard; `/admin/users`
/// demonstrates the allow-list variant with a visible denial.
pub fn admin_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(admin::home).route_layer(from_fn(|req, next| {
                guard_route(Guard::role_silent(Role::Employee), req, next)
            })),
        )
        .route(
            "/users",
            get(admin::users).route_layer(from_fn(|req, next| {
                guard_route(Guard::any_of([Role::Employee]), req, next)
            })),
        )
}

/// Create all routes for the site.
pub fn routes() -> Router<AppState> {
    Router::new()
        // Home page
        .route("/", get(home::home))
        // Vacation routes
        .nest("/vacations", vacation_routes())
        .route("/notify-me", get(vacations::notify_me_form))
        .route("/notify-me", post(vacations::notify_me))
        // Cart routes
        .nest("/cart", cart_routes())
        // Customer routes (exact-role guard)
        .nest("/customer", customer_routes())
        // Newsletter
        .route("/newsletter", get(newsletter::signup_form))
        .route("/newsletter/signup", post(newsletter::signup))
        // Contest photo upload
        .route(
            "/contest/vacation-photo",
            get(contest::entry_form).post(contest::submit_photo),
        )
        // Attractions REST API
        .nest("/api", api_routes())
        // Admin area
        .nest("/admin", admin_routes())
        .route("/unauthorized", get(admin::unauthorized))
}
