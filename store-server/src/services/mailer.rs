//! Transactional email
//!
//! Order confirmations go out through a template-send contract: recipient
//! plus a flat field map. Production posts to the mail provider's HTTP
//! API; development and tests log the send instead.

use async_trait::async_trait;
use serde::Serialize;
use shared::error::{AppError, AppResult, ErrorCode};
use std::collections::HashMap;

/// Outbound transactional email contract
#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send_order_confirmation(
        &self,
        to: &str,
        fields: &HashMap<String, String>,
    ) -> AppResult<()>;
}

/// Development mailer: logs the send and succeeds
pub struct LogMailer;

#[async_trait]
impl Mailer for LogMailer {
    async fn send_order_confirmation(
        &self,
        to: &str,
        fields: &HashMap<String, String>,
    ) -> AppResult<()> {
        tracing::info!(to, order_id = fields.get("order_id").map(String::as_str), "order confirmation email (log mailer)");
        Ok(())
    }
}

#[derive(Serialize)]
struct TemplateSend<'a> {
    to: &'a str,
    template: &'a str,
    fields: &'a HashMap<String, String>,
}

/// Production mailer: posts a template send to the provider's HTTP API
pub struct HttpMailer {
    endpoint: String,
    api_key: String,
    template: String,
    client: reqwest::Client,
}

impl HttpMailer {
    pub fn new(
        endpoint: impl Into<String>,
        api_key: impl Into<String>,
        template: impl Into<String>,
    ) -> Self {
        Self {
            endpoint: endpoint.into(),
            api_key: api_key.into(),
            template: template.into(),
            client: reqwest::Client::new(),
        }
    }
}

#[async_trait]
impl Mailer for HttpMailer {
    async fn send_order_confirmation(
        &self,
        to: &str,
        fields: &HashMap<String, String>,
    ) -> AppResult<()> {
        let body = TemplateSend {
            to,
            template: &self.template,
            fields,
        };

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                AppError::with_message(ErrorCode::NetworkError, format!("mail send failed: {e}"))
            })?;

        if !response.status().is_success() {
            return Err(AppError::with_message(
                ErrorCode::MailError,
                format!("mail provider returned {}", response.status()),
            ));
        }
        Ok(())
    }
}
