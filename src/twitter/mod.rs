//! Twitter API v1.1 client — login, timeline paging, and status deletion.
//!
//! A [`TwitterClient`] holds credentials and the HTTP client for the
//! process lifetime. Each trim cycle opens a fresh [`TwitterSession`] via
//! [`TwitterClient::login`] and drops it when the cycle ends; nothing
//! authenticated survives between cycles.

pub mod oauth;

use async_trait::async_trait;
use reqwest::header::AUTHORIZATION;
use reqwest::StatusCode;
use serde::Deserialize;

use crate::config::Config;
use crate::error::{Result, WhittleError};
use crate::store::PostStore;
use crate::timeline::models::Post;

use oauth::OauthKeys;

#[derive(Debug)]
pub struct TwitterClient {
    http: reqwest::Client,
    base_url: String,
    keys: OauthKeys,
}

#[derive(Debug, Deserialize)]
struct AccountInfo {
    screen_name: String,
}

impl TwitterClient {
    pub fn new(config: &Config) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: config.api_base.trim_end_matches('/').to_string(),
            keys: OauthKeys {
                consumer_key: config.consumer_key.clone(),
                consumer_secret: config.consumer_secret.clone(),
                access_token: config.access_token.clone(),
                access_token_secret: config.access_token_secret.clone(),
            },
        }
    }

    /// Verify credentials and open a session for one trim cycle.
    pub async fn login(&self) -> Result<TwitterSession<'_>> {
        let url = format!("{}/account/verify_credentials.json", self.base_url);
        let response = self.signed_get(&url, &[]).await?;
        let status = response.status();
        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            return Err(WhittleError::Auth {
                reason: error_message(response).await,
            });
        }
        if !status.is_success() {
            return Err(api_error(status, response).await);
        }
        let account: AccountInfo = serde_json::from_str(&response.text().await?)?;
        tracing::info!(screen_name = %account.screen_name, "authenticated");
        Ok(TwitterSession {
            client: self,
            screen_name: account.screen_name,
        })
    }

    async fn signed_get(&self, url: &str, params: &[(&str, String)]) -> Result<reqwest::Response> {
        let header = oauth::authorization_header(&self.keys, "GET", url, params);
        let mut request = self.http.get(url).header(AUTHORIZATION, header);
        if !params.is_empty() {
            request = request.query(params);
        }
        Ok(request.send().await?)
    }

    async fn signed_post(&self, url: &str) -> Result<reqwest::Response> {
        let header = oauth::authorization_header(&self.keys, "POST", url, &[]);
        Ok(self.http.post(url).header(AUTHORIZATION, header).send().await?)
    }
}

/// An authenticated session scoped to a single trim cycle.
#[derive(Debug)]
pub struct TwitterSession<'a> {
    client: &'a TwitterClient,
    screen_name: String,
}

impl TwitterSession<'_> {
    pub fn screen_name(&self) -> &str {
        &self.screen_name
    }
}

#[async_trait]
impl PostStore for TwitterSession<'_> {
    async fn recent_posts(&self, count: u32, max_id: Option<u64>) -> Result<Vec<Post>> {
        let url = format!("{}/statuses/user_timeline.json", self.client.base_url);
        let mut params = vec![
            ("count", count.to_string()),
            ("include_rts", "true".to_string()),
        ];
        if let Some(max_id) = max_id {
            params.push(("max_id", max_id.to_string()));
        }
        let response = self.client.signed_get(&url, &params).await?;
        let status = response.status();
        if !status.is_success() {
            return Err(api_error(status, response).await);
        }
        Ok(serde_json::from_str(&response.text().await?)?)
    }

    async fn delete_post(&self, id: u64) -> Result<()> {
        let url = format!("{}/statuses/destroy/{}.json", self.client.base_url, id);
        let response = self.client.signed_post(&url).await?;
        let status = response.status();
        if !status.is_success() {
            return Err(api_error(status, response).await);
        }
        Ok(())
    }
}

/// Platform error bodies look like `{"errors":[{"code":..,"message":".."}]}`.
async fn error_message(response: reqwest::Response) -> String {
    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    serde_json::from_str::<serde_json::Value>(&body)
        .ok()
        .and_then(|v| v["errors"][0]["message"].as_str().map(str::to_string))
        .unwrap_or_else(|| format!("HTTP {status}"))
}

async fn api_error(status: StatusCode, response: reqwest::Response) -> WhittleError {
    WhittleError::Api {
        status: status.as_u16(),
        message: error_message(response).await,
    }
}
