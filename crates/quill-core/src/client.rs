//! HTTP client for an Ollama-compatible inference server.
//!
//! One client covers both consumers:
//! - [`InferenceClient`]: the completion seam the pipeline executor runs on
//! - [`ModelCatalog`]: the catalog/pull seam the readiness bootstrap runs on
//!
//! The client is a thin wrapper: one blocking request per call, no retries,
//! no response caching, and no post-processing of completion text. Identical
//! prompts may legitimately yield different completions across calls.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

use crate::domain::{ClientError, ModelBinding};

/// Default timeout for catalog queries.
pub const CATALOG_TIMEOUT: Duration = Duration::from_secs(10);

/// Default timeout for model pulls. Long, to accommodate large downloads.
pub const PULL_TIMEOUT: Duration = Duration::from_secs(600);

/// Default timeout for a single generate call.
pub const GENERATE_TIMEOUT: Duration = Duration::from_secs(300);

/// Issues completion requests against a model binding.
#[async_trait]
pub trait InferenceClient: Send + Sync {
    /// One blocking completion request carrying the binding's fixed sampling
    /// parameters, with streaming disabled. Returns the full completion text
    /// verbatim.
    async fn generate(&self, binding: &ModelBinding, prompt: &str) -> Result<String, ClientError>;
}

/// Catalog operations used by the readiness bootstrap.
#[async_trait]
pub trait ModelCatalog: Send + Sync {
    /// Base URL of the server this catalog fronts.
    fn endpoint(&self) -> &str;

    /// Names of the models currently available on the server.
    async fn list_models(&self) -> Result<Vec<String>, ClientError>;

    /// Request a pull of `name`; returns the server's status string.
    async fn pull_model(&self, name: &str) -> Result<String, ClientError>;
}

#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    temperature: f32,
    seed: i64,
    top_k: u32,
    top_p: f32,
    stream: bool,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    response: String,
}

#[derive(Debug, Deserialize)]
struct TagsResponse {
    #[serde(default)]
    models: Vec<ModelTag>,
}

#[derive(Debug, Deserialize)]
struct ModelTag {
    name: String,
}

#[derive(Debug, Serialize)]
struct PullRequest<'a> {
    name: &'a str,
    stream: bool,
}

#[derive(Debug, Deserialize)]
struct PullResponse {
    #[serde(default)]
    status: String,
}

/// Reqwest-backed client for the Ollama REST API.
pub struct OllamaClient {
    base_url: String,
    http: reqwest::Client,
    catalog_timeout: Duration,
    pull_timeout: Duration,
    generate_timeout: Duration,
}

impl OllamaClient {
    /// Create a client for the server at `base_url`.
    pub fn new(base_url: &str) -> Self {
        let http = reqwest::Client::builder()
            .user_agent(concat!("quill/", env!("CARGO_PKG_VERSION")))
            .build()
            .expect("Failed to create HTTP client");

        OllamaClient {
            base_url: base_url.trim_end_matches('/').to_string(),
            http,
            catalog_timeout: CATALOG_TIMEOUT,
            pull_timeout: PULL_TIMEOUT,
            generate_timeout: GENERATE_TIMEOUT,
        }
    }

    /// Override the per-call timeouts.
    pub fn with_timeouts(mut self, catalog: Duration, pull: Duration, generate: Duration) -> Self {
        self.catalog_timeout = catalog;
        self.pull_timeout = pull;
        self.generate_timeout = generate;
        self
    }

    fn url(base: &str, path: &str) -> String {
        format!("{}{}", base.trim_end_matches('/'), path)
    }

    fn require_success(url: &str, response: &reqwest::Response) -> Result<(), ClientError> {
        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            Err(ClientError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            })
        }
    }
}

#[async_trait]
impl InferenceClient for OllamaClient {
    async fn generate(&self, binding: &ModelBinding, prompt: &str) -> Result<String, ClientError> {
        if prompt.is_empty() {
            return Err(ClientError::EmptyPrompt);
        }
        if binding.base_url.is_empty() {
            return Err(ClientError::IncompleteBinding("base_url"));
        }
        if binding.model.is_empty() {
            return Err(ClientError::IncompleteBinding("model"));
        }

        let url = Self::url(&binding.base_url, "/api/generate");
        let body = GenerateRequest {
            model: &binding.model,
            prompt,
            temperature: binding.params.temperature,
            seed: binding.params.seed,
            top_k: binding.params.top_k,
            top_p: binding.params.top_p,
            stream: false,
        };

        debug!(model = %binding.model, prompt_chars = prompt.len(), "sending generate request");

        let response = self
            .http
            .post(&url)
            .timeout(self.generate_timeout)
            .json(&body)
            .send()
            .await
            .map_err(|source| ClientError::Transport {
                url: url.clone(),
                source,
            })?;

        Self::require_success(&url, &response)?;

        let parsed: GenerateResponse =
            response
                .json()
                .await
                .map_err(|source| ClientError::MalformedResponse {
                    url: url.clone(),
                    source,
                })?;

        Ok(parsed.response)
    }
}

#[async_trait]
impl ModelCatalog for OllamaClient {
    fn endpoint(&self) -> &str {
        &self.base_url
    }

    async fn list_models(&self) -> Result<Vec<String>, ClientError> {
        let url = Self::url(&self.base_url, "/api/tags");

        let response = self
            .http
            .get(&url)
            .timeout(self.catalog_timeout)
            .send()
            .await
            .map_err(|source| ClientError::Transport {
                url: url.clone(),
                source,
            })?;

        Self::require_success(&url, &response)?;

        let parsed: TagsResponse =
            response
                .json()
                .await
                .map_err(|source| ClientError::MalformedResponse {
                    url: url.clone(),
                    source,
                })?;

        Ok(parsed.models.into_iter().map(|m| m.name).collect())
    }

    async fn pull_model(&self, name: &str) -> Result<String, ClientError> {
        let url = Self::url(&self.base_url, "/api/pull");
        let body = PullRequest {
            name,
            stream: false,
        };

        debug!(model = %name, "requesting model pull");

        let response = self
            .http
            .post(&url)
            .timeout(self.pull_timeout)
            .json(&body)
            .send()
            .await
            .map_err(|source| ClientError::Transport {
                url: url.clone(),
                source,
            })?;

        Self::require_success(&url, &response)?;

        let parsed: PullResponse =
            response
                .json()
                .await
                .map_err(|source| ClientError::MalformedResponse {
                    url: url.clone(),
                    source,
                })?;

        Ok(parsed.status)
    }
}
