//! Admin area handlers.
//!
//! The guards live in the router (`routes::admin_routes`); handlers here
//! assume an employee principal has already been admitted.

use askama::Template;
use askama_web::WebTemplate;
use tracing::instrument;

use crate::middleware::OptionalPrincipal;

/// Admin home template.
#[derive(Template, WebTemplate)]
#[template(path = "admin/home.html")]
pub struct AdminHomeTemplate {
    pub principal_id: String,
}

/// Admin user list template.
#[derive(Template, WebTemplate)]
#[template(path = "admin/users.html")]
pub struct AdminUsersTemplate;

/// Unauthorized page template.
#[derive(Template, WebTemplate)]
#[template(path = "unauthorized.html")]
pub struct UnauthorizedTemplate;

/// Display the admin home page.
#[instrument(skip_all)]
pub async fn home(OptionalPrincipal(principal): OptionalPrincipal) -> AdminHomeTemplate {
    AdminHomeTemplate {
        principal_id: principal.map(|p| p.id.to_string()).unwrap_or_default(),
    }
}

/// Display the admin user list.
#[instrument(skip_all)]
pub async fn users() -> AdminUsersTemplate {
    AdminUsersTemplate
}

/// Visible destination for guard denials.
#[instrument(skip_all)]
pub async fn unauthorized() -> UnauthorizedTemplate {
    UnauthorizedTemplate
}
