use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use quill_core::{ClientError, ModelCatalog, ModelReadinessManager, ModelStatus, ReadinessError};

const ENDPOINT: &str = "http://stub:11434";

/// In-memory stand-in for the Ollama catalog/pull surface, counting every
/// pull request it receives.
struct StubCatalog {
    models: Vec<String>,
    catalog_reachable: bool,
    pull_reply: Option<String>,
    pull_calls: AtomicUsize,
}

impl StubCatalog {
    fn with_models(models: &[&str]) -> Self {
        StubCatalog {
            models: models.iter().map(|m| m.to_string()).collect(),
            catalog_reachable: true,
            pull_reply: Some("success".to_string()),
            pull_calls: AtomicUsize::new(0),
        }
    }

    fn unreachable() -> Self {
        StubCatalog {
            catalog_reachable: false,
            ..Self::with_models(&[])
        }
    }

    fn with_pull_status(status: &str) -> Self {
        StubCatalog {
            pull_reply: Some(status.to_string()),
            ..Self::with_models(&[])
        }
    }

    fn with_failing_pull() -> Self {
        StubCatalog {
            pull_reply: None,
            ..Self::with_models(&[])
        }
    }

    fn pull_calls(&self) -> usize {
        self.pull_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ModelCatalog for StubCatalog {
    fn endpoint(&self) -> &str {
        ENDPOINT
    }

    async fn list_models(&self) -> Result<Vec<String>, ClientError> {
        if self.catalog_reachable {
            Ok(self.models.clone())
        } else {
            Err(ClientError::Status {
                url: format!("{ENDPOINT}/api/tags"),
                status: 500,
            })
        }
    }

    async fn pull_model(&self, _name: &str) -> Result<String, ClientError> {
        self.pull_calls.fetch_add(1, Ordering::SeqCst);
        match &self.pull_reply {
            Some(status) => Ok(status.clone()),
            None => Err(ClientError::Status {
                url: format!("{ENDPOINT}/api/pull"),
                status: 502,
            }),
        }
    }
}

#[tokio::test]
async fn available_model_performs_no_pull() {
    let catalog = StubCatalog::with_models(&["gemma3:1b", "llama3:8b"]);
    let manager = ModelReadinessManager::new(&catalog);

    let record = manager.ensure_ready("gemma3:1b").await.unwrap();

    assert_eq!(record.status, ModelStatus::Available);
    assert_eq!(record.endpoint, ENDPOINT);
    assert_eq!(record.model, "gemma3:1b");
    assert_eq!(catalog.pull_calls(), 0);
}

#[tokio::test]
async fn catalog_match_is_exact_including_tag() {
    let catalog = StubCatalog::with_models(&["gemma3:4b"]);
    let manager = ModelReadinessManager::new(&catalog);

    // `gemma3:1b` is not `gemma3:4b`; a pull must happen.
    let record = manager.ensure_ready("gemma3:1b").await.unwrap();

    assert_eq!(record.status, ModelStatus::Pulled);
    assert_eq!(catalog.pull_calls(), 1);
}

#[tokio::test]
async fn missing_model_pulls_exactly_once() {
    let catalog = StubCatalog::with_pull_status("success");
    let manager = ModelReadinessManager::new(&catalog);

    let record = manager.ensure_ready("gemma3:1b").await.unwrap();

    assert_eq!(record.status, ModelStatus::Pulled);
    assert_eq!(catalog.pull_calls(), 1);
}

#[tokio::test]
async fn pull_status_match_is_case_insensitive() {
    let catalog = StubCatalog::with_pull_status("SUCCESS");
    let manager = ModelReadinessManager::new(&catalog);

    let record = manager.ensure_ready("gemma3:1b").await.unwrap();

    assert_eq!(record.status, ModelStatus::Pulled);
}

#[tokio::test]
async fn unknown_pull_status_still_counts_as_pulled() {
    let catalog = StubCatalog::with_pull_status("downloading manifest");
    let manager = ModelReadinessManager::new(&catalog);

    let record = manager.ensure_ready("gemma3:1b").await.unwrap();

    assert_eq!(record.status, ModelStatus::Pulled);
    assert_eq!(catalog.pull_calls(), 1);
}

#[tokio::test]
async fn unreachable_catalog_fails_without_attempting_a_pull() {
    let catalog = StubCatalog::unreachable();
    let manager = ModelReadinessManager::new(&catalog);

    let err = manager.ensure_ready("gemma3:1b").await.unwrap_err();

    match err {
        ReadinessError::EndpointUnreachable { endpoint, .. } => {
            assert_eq!(endpoint, ENDPOINT);
        }
        other => panic!("expected EndpointUnreachable, got {:?}", other),
    }
    assert_eq!(catalog.pull_calls(), 0);
}

#[tokio::test]
async fn failing_pull_is_model_unavailable() {
    let catalog = StubCatalog::with_failing_pull();
    let manager = ModelReadinessManager::new(&catalog);

    let err = manager.ensure_ready("gemma3:1b").await.unwrap_err();

    match err {
        ReadinessError::ModelUnavailable { model, .. } => {
            assert_eq!(model, "gemma3:1b");
        }
        other => panic!("expected ModelUnavailable, got {:?}", other),
    }
    assert_eq!(catalog.pull_calls(), 1);
}

#[tokio::test]
async fn ensure_ready_is_idempotent_for_an_available_model() {
    let catalog = StubCatalog::with_models(&["gemma3:1b"]);
    let manager = ModelReadinessManager::new(&catalog);

    let first = manager.ensure_ready("gemma3:1b").await.unwrap();
    let second = manager.ensure_ready("gemma3:1b").await.unwrap();

    assert_eq!(first.status, ModelStatus::Available);
    assert_eq!(second.status, ModelStatus::Available);
    assert_eq!(catalog.pull_calls(), 0);
}
