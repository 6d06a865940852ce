//! Customer page handlers.
//!
//! HTML pages render through the customer view model; the update endpoint
//! is the programmatic entry point and speaks JSON both ways, including for
//! its validation errors.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Json,
    extract::{Path, State},
    response::IntoResponse,
};
use serde::Deserialize;
use serde_json::json;
use tracing::instrument;

use meadowlark_core::CustomerId;

use crate::db::customers::CustomerRepository;
use crate::error::{AppError, Result};
use crate::middleware::{CartWarnings, Flash};
use crate::models::FlashMessage;
use crate::state::AppState;
use crate::viewmodels::CustomerViewModel;

/// Customer overview template.
#[derive(Template, WebTemplate)]
#[template(path = "customer/home.html")]
pub struct CustomerHomeTemplate {
    pub flash: Option<FlashMessage>,
    pub warnings: CartWarnings,
    pub id: i32,
    pub vm: CustomerViewModel,
}

/// Customer order history template.
#[derive(Template, WebTemplate)]
#[template(path = "customer/orders.html")]
pub struct CustomerOrdersTemplate {
    pub flash: Option<FlashMessage>,
    pub warnings: CartWarnings,
    pub vm: CustomerViewModel,
}

/// Fetch a customer and their orders, or 404.
async fn load_view_model(state: &AppState, id: CustomerId) -> Result<CustomerViewModel> {
    let repo = CustomerRepository::new(state.pool());

    let customer = repo
        .get(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("customer: {id}")))?;
    let orders = repo.orders_for(id).await?;

    Ok(CustomerViewModel::build(&customer, orders))
}

/// Display the customer overview page.
#[instrument(skip(state, flash, warnings))]
pub async fn home(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Flash(flash): Flash,
    warnings: CartWarnings,
) -> Result<CustomerHomeTemplate> {
    let vm = load_view_model(&state, CustomerId::new(id)).await?;
    Ok(CustomerHomeTemplate {
        flash,
        warnings,
        id,
        vm,
    })
}

/// Display the customer order history.
#[instrument(skip(state, flash, warnings))]
pub async fn orders(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Flash(flash): Flash,
    warnings: CartWarnings,
) -> Result<CustomerOrdersTemplate> {
    let vm = load_view_model(&state, CustomerId::new(id)).await?;
    Ok(CustomerOrdersTemplate {
        flash,
        warnings,
        vm,
    })
}

/// Programmatic customer update request.
#[derive(Debug, Deserialize)]
pub struct UpdateRequest {
    pub first_name: Option<String>,
}

/// Update customer fields from a JSON payload.
///
/// Validation failures come back as `{"error": ...}` with a 200 status -
/// programmatic callers branch on the payload, not the status code.
#[instrument(skip(state, request))]
pub async fn ajax_update(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(request): Json<UpdateRequest>,
) -> impl IntoResponse {
    let Some(first_name) = request.first_name else {
        return Json(json!({ "error": "Nothing to update." }));
    };

    if first_name.trim().is_empty() {
        return Json(json!({ "error": "Invalid name." }));
    }

    match CustomerRepository::new(state.pool())
        .update_first_name(CustomerId::new(id), first_name.trim())
        .await
    {
        Ok(true) => Json(json!({ "success": true })),
        Ok(false) => Json(json!({ "error": "Unable to update customer." })),
        Err(e) => {
            tracing::error!(error = %e, "Customer update failed");
            Json(json!({ "error": "Unable to update customer." }))
        }
    }
}
