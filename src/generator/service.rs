//! Generation orchestration.

use std::sync::Arc;

use serde::Serialize;
use tokio::sync::Mutex;

use crate::artifact::{artifact_file_name, render_artifact, ArtifactSpec, ArtifactStore};
use crate::config::GeneratorConfig;
use crate::error::ApiError;
use crate::generator::request::GenerationRequest;
use crate::mock::{payload_template, Credential, MockConfiguration, MockStore, PayloadTemplate, RoutePair, Slug};
use crate::observability::metrics;
use crate::routing::RouteSynthesizer;

/// Result of a successful generation.
#[derive(Debug, Clone, Serialize)]
pub struct GenerationOutcome {
    pub file_name: String,
    /// `None` when the artifact could not be written.
    pub download_link: Option<String>,
    pub connection: String,
    pub auth_required: bool,
    pub credential: Credential,
    pub example_data: PayloadTemplate,
    pub routes: RoutePair,
    /// Why the artifact is missing, if it is.
    pub artifact_error: Option<String>,
}

/// Turns generation requests into a live mock plus a downloadable artifact.
#[derive(Debug)]
pub struct MockForge {
    store: Arc<MockStore>,
    synthesizer: RouteSynthesizer,
    artifacts: ArtifactStore,
    header: String,
    default_fields: Vec<String>,
    /// Serializes replace + register + emit.
    generation_lock: Mutex<()>,
}

impl MockForge {
    pub fn new(
        config: &GeneratorConfig,
        store: Arc<MockStore>,
        synthesizer: RouteSynthesizer,
        artifacts: ArtifactStore,
    ) -> Self {
        Self {
            store,
            synthesizer,
            artifacts,
            header: config.credential_header.clone(),
            default_fields: config.default_fields.clone(),
            generation_lock: Mutex::new(()),
        }
    }

    pub fn store(&self) -> &Arc<MockStore> {
        &self.store
    }

    pub fn artifacts(&self) -> &ArtifactStore {
        &self.artifacts
    }

    /// Run one generation.
    ///
    /// Validation happens before anything changes. Once the configuration is
    /// replaced and the routes installed the mock is live, even if writing the
    /// artifact fails afterwards; that failure is reported in the outcome.
    pub async fn generate(&self, request: GenerationRequest) -> Result<GenerationOutcome, ApiError> {
        let first = Slug::normalize(&request.app1);
        let second = Slug::normalize(&request.app2);
        if first.is_empty() || second.is_empty() {
            metrics::record_generation("rejected");
            return Err(ApiError::Validation("Service names 'app1' and 'app2' must not be blank".to_string()));
        }
        let fields = match self.resolve_fields(request.fields) {
            Ok(fields) => fields,
            Err(e) => {
                metrics::record_generation("rejected");
                return Err(e);
            }
        };

        let _guard = self.generation_lock.lock().await;

        let credential = self.fresh_credential(&first, &second);
        let payload = payload_template(&fields);
        let routes = RoutePair::from_slugs(&first, &second);

        self.store.replace(MockConfiguration::new(
            credential.clone(),
            request.require_auth,
            payload.clone(),
            routes.clone(),
        ));
        self.synthesizer.install(&routes);

        tracing::info!(
            forward = %routes.forward,
            reverse = %routes.reverse,
            auth_required = request.require_auth,
            fields = payload.len(),
            "Mock configuration replaced"
        );

        let file_name = artifact_file_name(&first, &second);
        let source = render_artifact(&ArtifactSpec {
            file_name: &file_name,
            routes: &routes,
            payload: &payload,
            auth_required: request.require_auth,
            credential: &credential,
            header: &self.header,
        });

        let artifact_error = match self.artifacts.write(&file_name, source.as_bytes()).await {
            Ok(path) => {
                tracing::info!(path = %path.display(), "Artifact written");
                None
            }
            Err(e) => {
                tracing::error!(file = %file_name, error = %e, "Artifact emission failed; live mock stays active");
                Some(e.to_string())
            }
        };

        metrics::record_generation(if artifact_error.is_some() { "partial" } else { "success" });

        Ok(GenerationOutcome {
            download_link: artifact_error
                .is_none()
                .then(|| format!("/download_api?file={}", urlencoding::encode(&file_name))),
            file_name,
            connection: format!("{} ↔ {}", request.app1, request.app2),
            auth_required: request.require_auth,
            credential,
            example_data: payload,
            routes,
            artifact_error,
        })
    }

    /// Trimmed, non-blank field names, or the defaults when none were given.
    fn resolve_fields(&self, fields: Option<Vec<String>>) -> Result<Vec<String>, ApiError> {
        let Some(fields) = fields else {
            return Ok(self.default_fields.clone());
        };

        let fields: Vec<String> = fields
            .iter()
            .map(|f| f.trim())
            .filter(|f| !f.is_empty())
            .map(str::to_string)
            .collect();

        if fields.is_empty() {
            return Err(ApiError::Validation("At least one non-blank field name is required".to_string()));
        }
        Ok(fields)
    }

    /// A credential different from the one currently active.
    fn fresh_credential(&self, first: &Slug, second: &Slug) -> Credential {
        let current = self.store.current();
        loop {
            let candidate = Credential::generate(first, second);
            match &current {
                Some(active) if active.issued_credential() == &candidate => continue,
                _ => return candidate,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routing::LiveRouter;
    use crate::security::AuthGuard;

    fn forge(output: &std::path::Path) -> (MockForge, Arc<LiveRouter>) {
        let store = Arc::new(MockStore::new());
        let router = Arc::new(LiveRouter::new());
        let synth = RouteSynthesizer::new(store.clone(), router.clone(), AuthGuard::default());
        let forge = MockForge::new(&GeneratorConfig::default(), store, synth, ArtifactStore::new(output));
        (forge, router)
    }

    #[tokio::test]
    async fn test_scenario_whatsapp_zomato() {
        let dir = tempfile::tempdir().unwrap();
        let (forge, router) = forge(dir.path());

        let outcome = forge
            .generate(GenerationRequest::new("WhatsApp Swiggy", "Zomato").with_fields(["id"]))
            .await
            .unwrap();

        assert_eq!(outcome.routes.forward, "/whatsappswiggytozomato");
        assert_eq!(outcome.routes.reverse, "/zomatotowhatsappswiggy");
        assert_eq!(outcome.file_name, "whatsappswiggy_zomato_api.rs");
        assert_eq!(
            outcome.download_link.as_deref(),
            Some("/download_api?file=whatsappswiggy_zomato_api.rs")
        );
        assert_eq!(outcome.connection, "WhatsApp Swiggy ↔ Zomato");
        let key = outcome.credential.as_str();
        assert!(key.starts_with("WHA-") && key.ends_with("-ZOM"), "{key}");
        assert_eq!(router.paths(), vec!["/whatsappswiggytozomato", "/zomatotowhatsappswiggy"]);
        assert!(dir.path().join("whatsappswiggy_zomato_api.rs").exists());
    }

    #[tokio::test]
    async fn test_default_fields() {
        let dir = tempfile::tempdir().unwrap();
        let (forge, _) = forge(dir.path());
        let outcome = forge.generate(GenerationRequest::new("a", "b")).await.unwrap();
        assert_eq!(outcome.example_data.keys().collect::<Vec<_>>(), vec!["id", "name", "status"]);
    }

    #[tokio::test]
    async fn test_fields_are_trimmed() {
        let dir = tempfile::tempdir().unwrap();
        let (forge, _) = forge(dir.path());
        let outcome = forge
            .generate(GenerationRequest::new("a", "b").with_fields([" id ", "", "name"]))
            .await
            .unwrap();
        assert_eq!(outcome.example_data.keys().collect::<Vec<_>>(), vec!["id", "name"]);
    }

    #[tokio::test]
    async fn test_blank_fields_rejected_before_any_change() {
        let dir = tempfile::tempdir().unwrap();
        let (forge, router) = forge(dir.path());

        let err = forge
            .generate(GenerationRequest::new("a", "b").with_fields(["  ", ""]))
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::Validation(_)));
        assert!(forge.store().current().is_none());
        assert!(router.is_empty());
    }

    #[tokio::test]
    async fn test_blank_name_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let (forge, router) = forge(dir.path());
        let err = forge.generate(GenerationRequest::new(" ", "b")).await.unwrap_err();
        assert!(matches!(err, ApiError::Validation(_)));
        assert!(router.is_empty());
    }

    #[tokio::test]
    async fn test_regeneration_changes_credential_keeps_paths() {
        let dir = tempfile::tempdir().unwrap();
        let (forge, router) = forge(dir.path());

        let first = forge.generate(GenerationRequest::new("a", "b")).await.unwrap();
        let second = forge.generate(GenerationRequest::new("a", "b")).await.unwrap();

        assert_ne!(first.credential, second.credential);
        assert_eq!(first.routes, second.routes);
        assert_eq!(router.len(), 2);
        assert_eq!(
            forge.store().current().unwrap().issued_credential(),
            &second.credential
        );
    }

    #[tokio::test]
    async fn test_emission_failure_keeps_mock_live() {
        let file = tempfile::NamedTempFile::new().unwrap();
        let (forge, router) = forge(file.path());

        let outcome = forge.generate(GenerationRequest::new("a", "b")).await.unwrap();
        assert!(outcome.download_link.is_none());
        assert!(outcome.artifact_error.is_some());
        assert!(forge.store().current().is_some());
        assert_eq!(router.len(), 2);
    }
}
