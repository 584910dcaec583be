//! Backend health widget: fetch on mount, refetch on retry

use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::warn;

use crate::core::client::TranslationApi;
use crate::core::errors::ApiError;
use crate::core::models::HealthResponse;

/// Shown when the health request fails
pub const HEALTH_FAILED_MESSAGE: &str = "Failed to check health";

/// Where the widget is in its fetch cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HealthPhase {
    /// A fetch is running
    Loading,
    /// Last fetch returned a payload
    Success,
    /// Last fetch failed
    Failed,
}

/// Everything the health widget renders
#[derive(Debug, Clone, PartialEq)]
pub struct HealthState {
    /// Last health payload; kept while a retry is loading
    pub health: Option<HealthResponse>,
    /// Fetch cycle position
    pub phase: HealthPhase,
    /// Failure message, cleared on the next fetch
    pub error: Option<String>,
}

impl Default for HealthState {
    fn default() -> Self {
        Self {
            health: None,
            phase: HealthPhase::Loading,
            error: None,
        }
    }
}

/// Fetches backend health on mount and on retry
#[derive(Clone)]
pub struct HealthPoller {
    api: Arc<dyn TranslationApi>,
    state: Arc<RwLock<HealthState>>,
}

impl HealthPoller {
    /// Starts in `Loading` until the first fetch
    pub fn new(api: Arc<dyn TranslationApi>) -> Self {
        Self {
            api,
            state: Arc::new(RwLock::new(HealthState::default())),
        }
    }

    /// Copy of the current state
    pub async fn snapshot(&self) -> HealthState {
        self.state.read().await.clone()
    }

    /// First fetch, run when the widget appears
    pub async fn mount(&self) -> Result<HealthResponse, ApiError> {
        self.check().await
    }

    /// User-triggered refetch
    pub async fn retry(&self) -> Result<HealthResponse, ApiError> {
        self.check().await
    }

    /// Whether the last fetch reported a healthy backend
    pub async fn is_healthy(&self) -> bool {
        let state = self.state.read().await;
        state.phase == HealthPhase::Success
            && state.health.as_ref().is_some_and(HealthResponse::is_healthy)
    }

    async fn check(&self) -> Result<HealthResponse, ApiError> {
        {
            let mut state = self.state.write().await;
            state.phase = HealthPhase::Loading;
            state.error = None;
        }

        let outcome = self.api.get_health().await;

        let mut state = self.state.write().await;
        match &outcome {
            Ok(health) => {
                state.health = Some(health.clone());
                state.phase = HealthPhase::Success;
            }
            Err(e) => {
                warn!("Health check failed: {}", e);
                state.error = Some(e.message_or(HEALTH_FAILED_MESSAGE));
                state.phase = HealthPhase::Failed;
            }
        }
        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controller::testing::{healthy, FakeApi};

    #[tokio::test]
    async fn test_starts_loading() {
        let poller = HealthPoller::new(Arc::new(FakeApi::new()));
        let state = poller.snapshot().await;
        assert_eq!(state.phase, HealthPhase::Loading);
        assert!(state.health.is_none());
    }

    #[tokio::test]
    async fn test_mount_success() {
        let api = Arc::new(FakeApi::new());
        let poller = HealthPoller::new(api.clone());

        poller.mount().await.unwrap();
        let state = poller.snapshot().await;
        assert_eq!(state.phase, HealthPhase::Success);
        assert_eq!(state.health, Some(healthy()));
        assert!(poller.is_healthy().await);
        assert_eq!(api.health_calls(), 1);
    }

    #[tokio::test]
    async fn test_failure_then_retry() {
        let api = Arc::new(FakeApi::new());
        api.push_health(Err(ApiError::transport("connection refused")));
        let poller = HealthPoller::new(api.clone());

        assert!(poller.mount().await.is_err());
        let state = poller.snapshot().await;
        assert_eq!(state.phase, HealthPhase::Failed);
        assert_eq!(state.error.as_deref(), Some("connection refused"));
        assert!(!poller.is_healthy().await);

        poller.retry().await.unwrap();
        let state = poller.snapshot().await;
        assert_eq!(state.phase, HealthPhase::Success);
        assert!(state.error.is_none());
        assert_eq!(api.health_calls(), 2);
    }

    #[tokio::test]
    async fn test_blank_message_uses_fallback() {
        let api = Arc::new(FakeApi::new());
        let mut err = ApiError::transport("x");
        err.message = String::new();
        api.push_health(Err(err));
        let poller = HealthPoller::new(api);

        let _ = poller.mount().await;
        assert_eq!(
            poller.snapshot().await.error.as_deref(),
            Some(HEALTH_FAILED_MESSAGE)
        );
    }

    #[tokio::test]
    async fn test_failed_retry_keeps_last_payload() {
        let api = Arc::new(FakeApi::new());
        let poller = HealthPoller::new(api.clone());
        poller.mount().await.unwrap();

        api.push_health(Err(ApiError::from_response(503, b"")));
        assert!(poller.retry().await.is_err());

        let state = poller.snapshot().await;
        assert_eq!(state.phase, HealthPhase::Failed);
        assert_eq!(state.health, Some(healthy()));
        assert_eq!(
            state.error.as_deref(),
            Some("Request failed with status code 503")
        );
    }

    #[tokio::test]
    async fn test_unhealthy_status() {
        let api = Arc::new(FakeApi::new());
        let mut sick = healthy();
        sick.status = "unhealthy".to_string();
        api.push_health(Ok(sick));
        let poller = HealthPoller::new(api);

        poller.mount().await.unwrap();
        assert_eq!(poller.snapshot().await.phase, HealthPhase::Success);
        assert!(!poller.is_healthy().await);
    }
}
