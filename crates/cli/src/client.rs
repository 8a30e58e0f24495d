//! Thin REST client

use anyhow::{Context, Result};
use reqwest::{Method, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;

#[derive(Deserialize)]
struct ErrorBody {
    error: String,
    status: u16,
}

#[derive(Deserialize)]
pub struct MessageBody {
    pub message: String,
}

pub struct ApiClient {
    base_url: String,
    token: Option<String>,
    http: reqwest::Client,
}

impl ApiClient {
    pub fn new(base_url: &str, token: Option<String>) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            token: token.map(|t| t.trim_start_matches("Bearer ").to_string()),
            http: reqwest::Client::new(),
        }
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let builder = self
            .http
            .request(method, format!("{}{}", self.base_url, path));
        match &self.token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    async fn send<T: DeserializeOwned>(&self, builder: RequestBuilder) -> Result<T> {
        let response = builder
            .send()
            .await
            .context("Failed to connect to server")?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            match serde_json::from_str::<ErrorBody>(&text) {
                Ok(body) => anyhow::bail!("HTTP {}: {}", body.status, body.error),
                Err(_) if status == StatusCode::UNAUTHORIZED => {
                    anyhow::bail!("HTTP 401: not logged in (set MINDFUL_TOKEN)")
                }
                Err(_) => anyhow::bail!("HTTP {}: {}", status.as_u16(), text),
            }
        }

        response.json().await.context("Failed to parse response")
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        self.send(self.request(Method::GET, path)).await
    }

    pub async fn post<T: DeserializeOwned>(&self, path: &str, body: Option<Value>) -> Result<T> {
        let builder = self.request(Method::POST, path);
        let builder = match body {
            Some(body) => builder.json(&body),
            None => builder,
        };
        self.send(builder).await
    }

    pub async fn put<T: DeserializeOwned>(&self, path: &str, body: Option<Value>) -> Result<T> {
        let builder = self.request(Method::PUT, path);
        let builder = match body {
            Some(body) => builder.json(&body),
            None => builder,
        };
        self.send(builder).await
    }

    pub async fn delete<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        self.send(self.request(Method::DELETE, path)).await
    }
}
