//! Transactional email client.
//!
//! Thin HTTP client for a JSON mail API. When no API endpoint is
//! configured (local development), sends are logged and dropped instead of
//! failing the caller.

use reqwest::header::{HeaderMap, HeaderValue};
use secrecy::ExposeSecret;
use serde::Serialize;
use thiserror::Error;

use crate::config::EmailConfig;

/// Errors that can occur when sending email.
#[derive(Debug, Error)]
pub enum EmailError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Mail API returned an error response.
    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    /// Client configuration is invalid.
    #[error("Config error: {0}")]
    Config(String),
}

#[derive(Debug, Serialize)]
struct SendRequest<'a> {
    from: &'a str,
    to: &'a str,
    subject: &'a str,
    html: &'a str,
}

/// Mail API client.
#[derive(Clone)]
pub struct EmailClient {
    client: reqwest::Client,
    api_url: Option<String>,
    from: String,
}

impl EmailClient {
    /// Create a new email client from configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client fails to build.
    pub fn new(config: &EmailConfig) -> Result<Self, EmailError> {
        let mut headers = HeaderMap::new();

        let auth_value = format!("Bearer {}", config.api_key.expose_secret());
        headers.insert(
            "Authorization",
            HeaderValue::from_str(&auth_value)
                .map_err(|e| EmailError::Config(format!("Invalid API key format: {e}")))?,
        );

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .build()?;

        Ok(Self {
            client,
            api_url: config.api_url.clone(),
            from: config.from.clone(),
        })
    }

    /// Send an HTML email.
    ///
    /// With no configured endpoint the message is logged and dropped; this
    /// keeps local development working without a mail account.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the API rejects the message.
    pub async fn send(&self, to: &str, subject: &str, html: &str) -> Result<(), EmailError> {
        let Some(api_url) = self.api_url.as_deref() else {
            tracing::info!(to, subject, "Email delivery not configured; dropping message");
            return Ok(());
        };

        let request = SendRequest {
            from: &self.from,
            to,
            subject,
            html,
        };

        let response = self.client.post(api_url).json(&request).send().await?;
        let status = response.status();

        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(EmailError::Api {
                status: status.as_u16(),
                message,
            });
        }

        tracing::info!(to, subject, "Email sent");
        Ok(())
    }
}
