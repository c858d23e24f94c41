use reqwest::Client;
use serde_json::json;
use std::fmt;
use std::time::Duration;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

#[derive(Debug)]
pub enum GenerativeError {
    Http(reqwest::Error),
    ServerError { status: u16, body: String },
}

impl fmt::Display for GenerativeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GenerativeError::Http(e) => write!(f, "HTTP error: {e}"),
            GenerativeError::ServerError { status, body } => {
                write!(f, "upstream returned {status}: {body}")
            }
        }
    }
}

impl From<reqwest::Error> for GenerativeError {
    fn from(e: reqwest::Error) -> Self {
        GenerativeError::Http(e)
    }
}

/// Stateless pass-through to the Gemini `generateContent` API.
pub struct GeminiClient {
    client: Client,
    base_url: String,
    model: String,
    api_key: String,
}

impl GeminiClient {
    pub fn new(base_url: String, model: String, api_key: String) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            model,
            api_key,
        }
    }

    fn endpoint(&self) -> String {
        format!("{}/v1/models/{}:generateContent", self.base_url, self.model)
    }

    /// Sends one prompt and returns the upstream JSON untouched.
    pub async fn generate(&self, prompt: &str) -> Result<serde_json::Value, GenerativeError> {
        let resp = self
            .client
            .post(self.endpoint())
            .query(&[("key", self.api_key.as_str())])
            .timeout(REQUEST_TIMEOUT)
            .json(&json!({
                "contents": [{ "parts": [{ "text": prompt }] }]
            }))
            .send()
            .await?;

        if !resp.status().is_success() {
            let status = resp.status().as_u16();
            let body = resp.text().await.unwrap_or_default();
            return Err(GenerativeError::ServerError { status, body });
        }

        Ok(resp.json().await?)
    }
}
