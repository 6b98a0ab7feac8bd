use crate::config::Credentials;
use crate::oauth::{authorization_header, OAuthNonce};
use crate::traits::Publisher;
use crate::types::{PosterError, Result};
use async_trait::async_trait;
use reqwest::header::AUTHORIZATION;
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, error, warn};
use url::Url;

const POST_TIMEOUT_SECONDS: u64 = 30;

/// Posts `{"text": ...}` to the X v2 tweets endpoint with OAuth 1.0a user auth
pub struct XPublisher {
    client: Client,
    endpoint: Url,
    credentials: Credentials,
}

impl XPublisher {
    pub fn new(endpoint: &str, credentials: Credentials) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(POST_TIMEOUT_SECONDS))
            .build()?;

        Ok(Self {
            client,
            endpoint: Url::parse(endpoint)?,
            credentials,
        })
    }
}

#[async_trait]
impl Publisher for XPublisher {
    async fn publish(&self, text: &str) -> Result<serde_json::Value> {
        let auth = authorization_header(
            "POST",
            &self.endpoint,
            &self.credentials,
            &OAuthNonce::generate(),
            &[],
        )?;

        debug!("Posting {} chars to {}", text.chars().count(), self.endpoint);

        let response = self
            .client
            .post(self.endpoint.clone())
            .header(AUTHORIZATION, auth)
            .json(&serde_json::json!({ "text": text }))
            .send()
            .await?;

        let status = response.status();

        if status.as_u16() >= 300 {
            error!("Posting API rejected the post with {}", status);
            let body = response.text().await.unwrap_or_default();
            return Err(PosterError::Api {
                status: status.as_u16(),
                body,
            });
        }

        // The post is live at this point; an unreadable body must not make it look failed
        let body = match response.text().await {
            Ok(body) => body,
            Err(e) => {
                warn!("Post accepted with {} but the response body was unreadable: {}", status, e);
                return Ok(serde_json::Value::Null);
            }
        };

        // Some successful responses carry no JSON body
        Ok(serde_json::from_str(&body).unwrap_or(serde_json::Value::String(body)))
    }
}
