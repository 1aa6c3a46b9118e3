use reqwest::StatusCode;
use thiserror::Error;

use crate::api::MESSAGES_PATH;
use crate::common::{ErrorBody, Message, NewMessage};

use super::{LOAD_FAILED, SEND_FAILED};

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("server responded with status: {0}")]
    Status(StatusCode),

    /// Server refused the request and said why.
    #[error("server rejected request: {0}")]
    Rejected(String),
}

impl ClientError {
    /// Text shown under the compose box after a failed send
    pub fn send_failure_message(&self) -> String {
        match self {
            ClientError::Rejected(reason) => reason.clone(),
            _ => SEND_FAILED.to_string(),
        }
    }

    /// Text shown in place of the message list after a failed fetch
    pub fn load_failure_message(&self) -> String {
        LOAD_FAILED.to_string()
    }
}

/// Typed client for `/api/messages`
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    messages_url: String,
}

impl ApiClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            http: reqwest::Client::new(),
            messages_url: format!("{}{}", base_url.trim_end_matches('/'), MESSAGES_PATH),
        }
    }

    pub fn messages_url(&self) -> &str {
        &self.messages_url
    }

    pub async fn list_messages(&self) -> Result<Vec<Message>, ClientError> {
        let response = self.http.get(&self.messages_url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ClientError::Status(status));
        }
        Ok(response.json().await?)
    }

    pub async fn send_message(&self, message: &NewMessage) -> Result<Message, ClientError> {
        let response = self
            .http
            .post(&self.messages_url)
            .json(message)
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            return Ok(response.json().await?);
        }

        match response.json::<ErrorBody>().await {
            Ok(body) if !body.error.is_empty() => Err(ClientError::Rejected(body.error)),
            _ => Err(ClientError::Status(status)),
        }
    }

    /// One-off reachability probe used for the Connected/Offline badge
    pub async fn check_connection(&self) -> bool {
        match self.http.get(&self.messages_url).send().await {
            Ok(response) => response.status().is_success(),
            Err(err) => {
                log::error!("API connectivity check failed: {err}");
                false
            }
        }
    }
}
