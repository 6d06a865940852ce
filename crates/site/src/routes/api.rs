//! Attractions REST API.
//!
//! JSON in, JSON out - including errors. Submitted attractions start
//! unapproved and are invisible to the list endpoint until approved.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use tracing::instrument;
use uuid::Uuid;

use meadowlark_core::Email;

use crate::db::attractions::{AttractionRepository, NewAttraction};
use crate::state::AppState;

/// An attraction as exposed by the API.
#[derive(Debug, Serialize)]
pub struct AttractionResponse {
    pub name: String,
    pub description: String,
    pub location: Location,
}

/// Geographic coordinates.
#[derive(Debug, Serialize)]
pub struct Location {
    pub lat: f64,
    pub lng: f64,
}

/// A new attraction submission.
#[derive(Debug, Deserialize)]
pub struct AttractionSubmission {
    pub name: String,
    pub description: String,
    pub lat: f64,
    pub lng: f64,
    /// Submitter email, kept for the audit trail.
    pub email: String,
}

fn json_error(status: StatusCode, message: &str) -> Response {
    (status, Json(serde_json::json!({ "error": message }))).into_response()
}

/// List approved attractions.
#[instrument(skip_all)]
pub async fn list(State(state): State<AppState>) -> Response {
    match AttractionRepository::new(state.pool()).list_approved().await {
        Ok(attractions) => {
            let body: Vec<AttractionResponse> = attractions
                .into_iter()
                .map(|a| AttractionResponse {
                    name: a.name,
                    description: a.description,
                    location: Location { lat: a.lat, lng: a.lng },
                })
                .collect();
            Json(body).into_response()
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to list attractions");
            json_error(StatusCode::INTERNAL_SERVER_ERROR, "Internal error.")
        }
    }
}

/// Submit a new attraction. It will not be listed until approved.
#[instrument(skip_all, fields(name = %submission.name))]
pub async fn create(
    State(state): State<AppState>,
    Json(submission): Json<AttractionSubmission>,
) -> Response {
    if submission.name.trim().is_empty() {
        return json_error(StatusCode::BAD_REQUEST, "Name is required.");
    }
    if Email::parse(submission.email.trim()).is_err() {
        return json_error(StatusCode::BAD_REQUEST, "Invalid email address.");
    }

    let new_attraction = NewAttraction {
        name: submission.name,
        description: submission.description,
        lat: submission.lat,
        lng: submission.lng,
        submitter_email: submission.email.trim().to_owned(),
    };

    match AttractionRepository::new(state.pool())
        .create(&new_attraction)
        .await
    {
        Ok(id) => Json(serde_json::json!({ "id": id })).into_response(),
        Err(e) => {
            tracing::error!(error = %e, "Failed to store attraction");
            json_error(StatusCode::INTERNAL_SERVER_ERROR, "Unable to add attraction.")
        }
    }
}

/// Fetch a single attraction by ID.
#[instrument(skip(state))]
pub async fn get_one(State(state): State<AppState>, Path(id): Path<Uuid>) -> Response {
    match AttractionRepository::new(state.pool()).get(id).await {
        Ok(Some(a)) => Json(AttractionResponse {
            name: a.name,
            description: a.description,
            location: Location { lat: a.lat, lng: a.lng },
        })
        .into_response(),
        Ok(None) => json_error(StatusCode::NOT_FOUND, "No such attraction."),
        Err(e) => {
            tracing::error!(error = %e, "Failed to retrieve attraction");
            json_error(StatusCode::INTERNAL_SERVER_ERROR, "Unable to retrieve attraction.")
        }
    }
}
