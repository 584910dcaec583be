//! REST client for the translation backend
//!
//! Every call goes through [`ApiClient::intercepted`], which logs the
//! outbound request and folds any failure (transport, timeout, non-2xx,
//! malformed body) into a single [`ApiError`]. No retries happen here;
//! retrying is a caller decision.

use async_trait::async_trait;
use reqwest::Method;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, error, info};

use crate::core::config::ClientConfig;
use crate::core::errors::{ApiError, Result};
use crate::core::models::{
    BatchTranslationRequest, BatchTranslationResponse, HealthResponse, ModelInfoMap,
    SupportedLanguagesResponse, TranslationRequest, TranslationResponse,
};

/// Single translation
pub const TRANSLATE_PATH: &str = "/api/v1/translate";
/// Batch translation
pub const TRANSLATE_BATCH_PATH: &str = "/api/v1/translate/batch";
/// Language listing
pub const LANGUAGES_PATH: &str = "/api/v1/languages";
/// Health check
pub const HEALTH_PATH: &str = "/api/v1/health";
/// Model details
pub const MODEL_INFO_PATH: &str = "/api/v1/model/info";

/// Operations offered by the translation backend.
///
/// Implemented by [`ApiClient`] over HTTP; controllers depend on the trait
/// so they can be driven by an in-memory double.
#[async_trait]
pub trait TranslationApi: Send + Sync {
    /// Translate a single text
    async fn translate(&self, request: &TranslationRequest) -> Result<TranslationResponse>;

    /// Translate several texts in one call
    async fn translate_batch(
        &self,
        request: &BatchTranslationRequest,
    ) -> Result<BatchTranslationResponse>;

    /// List the languages the backend supports
    async fn get_supported_languages(&self) -> Result<SupportedLanguagesResponse>;

    /// Backend liveness and model load status
    async fn get_health(&self) -> Result<HealthResponse>;

    /// Opaque diagnostic info about the loaded model
    async fn get_model_info(&self) -> Result<ModelInfoMap>;
}

/// HTTP implementation of [`TranslationApi`]
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: reqwest::Client,
    config: Arc<ClientConfig>,
}

impl ApiClient {
    /// Create a new client
    pub fn new(config: ClientConfig) -> anyhow::Result<Self> {
        config.validate()?;

        let client = reqwest::Client::builder()
            .timeout(config.timeout())
            .user_agent(config.user_agent.clone())
            .pool_idle_timeout(Some(Duration::from_secs(30)))
            .pool_max_idle_per_host(10)
            .build()?;

        Ok(Self {
            client,
            config: Arc::new(config),
        })
    }

    /// Create from environment
    pub fn from_env() -> anyhow::Result<Self> {
        Self::new(ClientConfig::from_env()?)
    }

    /// Active configuration
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Log the call, run it, and log its normalized failure if any
    async fn intercepted<T, F>(&self, method: &Method, path: &str, call: F) -> Result<T>
    where
        F: Future<Output = Result<T>>,
    {
        info!("Making {} request to: {}", method, path);

        let outcome = call.await;
        match &outcome {
            Ok(_) => debug!("{} {} succeeded", method, path),
            Err(e) => error!(
                kind = %e.kind,
                status = ?e.status,
                error = %e.error,
                message = %e.message,
                details = ?e.details,
                "API Error"
            ),
        }
        outcome
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        self.intercepted(&Method::GET, path, self.exchange::<(), T>(Method::GET, path, None))
            .await
    }

    async fn post<B: Serialize, T: DeserializeOwned>(&self, path: &str, body: &B) -> Result<T> {
        self.intercepted(
            &Method::POST,
            path,
            self.exchange(Method::POST, path, Some(body)),
        )
        .await
    }

    /// Send one request and decode its body, normalizing every failure mode
    async fn exchange<B: Serialize, T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> Result<T> {
        let mut builder = self.client.request(method, self.config.endpoint(path));
        if let Some(body) = body {
            builder = builder.json(body);
        }

        let response = builder.send().await.map_err(|e| self.normalize(e))?;
        let status = response.status();
        let bytes = response.bytes().await.map_err(|e| self.normalize(e))?;

        if !status.is_success() {
            return Err(ApiError::from_response(status.as_u16(), &bytes));
        }

        serde_json::from_slice(&bytes).map_err(|e| ApiError::decode(e.to_string()))
    }

    fn normalize(&self, err: reqwest::Error) -> ApiError {
        if err.is_timeout() {
            ApiError::timeout(self.config.timeout_ms)
        } else if err.is_decode() {
            ApiError::decode(err.to_string())
        } else {
            ApiError::transport(err.to_string())
        }
    }
}

#[async_trait]
impl TranslationApi for ApiClient {
    async fn translate(&self, request: &TranslationRequest) -> Result<TranslationResponse> {
        self.post(TRANSLATE_PATH, request).await
    }

    async fn translate_batch(
        &self,
        request: &BatchTranslationRequest,
    ) -> Result<BatchTranslationResponse> {
        self.post(TRANSLATE_BATCH_PATH, request).await
    }

    async fn get_supported_languages(&self) -> Result<SupportedLanguagesResponse> {
        self.get(LANGUAGES_PATH).await
    }

    async fn get_health(&self) -> Result<HealthResponse> {
        self.get(HEALTH_PATH).await
    }

    async fn get_model_info(&self) -> Result<ModelInfoMap> {
        self.get(MODEL_INFO_PATH).await
    }
}
