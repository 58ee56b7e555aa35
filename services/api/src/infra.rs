use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use metrics_exporter_prometheus::PrometheusHandle;
use talent_ops::config::IntegrationConfig;
use talent_ops::workflows::documents::{
    DocumentIndexer, IndexDispatcher, IndexError, IndexRequest,
};
use talent_ops::workflows::evaluations::TraitKey;
use talent_ops::workflows::hierarchy::{
    CsvProfileStore, InMemoryProfileStore, PersonRecord, ProfileStore, StoreError,
};
use talent_ops::workflows::lifecycle::LifecycleProfile;
use tracing::{info, warn};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

pub(crate) const EMPTY_PROFILES_WARNING: &str =
    "APP_PROFILES_CSV not set; org hierarchy serves an empty in-memory profile list";

/// Where the org hierarchy reads profiles from.
#[derive(Debug, Clone)]
pub(crate) enum ProfileSource {
    Csv(CsvProfileStore),
    Memory(InMemoryProfileStore),
}

impl ProfileSource {
    pub(crate) fn from_config(integrations: &IntegrationConfig) -> Self {
        match &integrations.profiles_csv {
            Some(path) => {
                info!(path = %path.display(), "reading profiles from csv export");
                ProfileSource::Csv(CsvProfileStore::new(path))
            }
            None => {
                warn!("{EMPTY_PROFILES_WARNING}");
                ProfileSource::Memory(InMemoryProfileStore::default())
            }
        }
    }
}

impl ProfileStore for ProfileSource {
    fn list_people(&self) -> Result<Vec<PersonRecord>, StoreError> {
        match self {
            ProfileSource::Csv(store) => store.list_people(),
            ProfileSource::Memory(store) => store.list_people(),
        }
    }
}

/// Lifecycle rows seeded from the profiles known at startup.
pub(crate) fn lifecycle_seed(source: &ProfileSource) -> Vec<LifecycleProfile> {
    match source.list_people() {
        Ok(people) => people
            .into_iter()
            .map(|person| LifecycleProfile {
                full_name: person.display_name.clone(),
                email: person.email.clone(),
                id: person.id,
                employee_stage: Default::default(),
                functional_track: None,
            })
            .collect(),
        Err(err) => {
            warn!(error = %err, "lifecycle store starts empty");
            Vec::new()
        }
    }
}

/// Posts ingestion requests to the chat service.
pub(crate) struct HttpDocumentIndexer {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpDocumentIndexer {
    pub(crate) fn new(base_url: &str) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .unwrap_or_default();
        Self {
            client,
            endpoint: format!("{}/api/ingest/document", base_url.trim_end_matches('/')),
        }
    }

    pub(crate) fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl DocumentIndexer for HttpDocumentIndexer {
    async fn index(&self, request: IndexRequest) -> Result<(), IndexError> {
        let response = self
            .client
            .post(&self.endpoint)
            .json(&request)
            .send()
            .await
            .map_err(|err| IndexError::Transport(err.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(IndexError::Rejected {
                status: status.as_u16(),
            });
        }
        info!(document = %request.document_id.0, "document queued for ingestion");
        Ok(())
    }
}

pub(crate) fn index_dispatcher(integrations: &IntegrationConfig) -> IndexDispatcher {
    match &integrations.indexer_url {
        Some(url) => {
            let indexer = HttpDocumentIndexer::new(url);
            info!(endpoint = indexer.endpoint(), "document indexing enabled");
            IndexDispatcher::new(Arc::new(indexer))
        }
        None => IndexDispatcher::disabled(),
    }
}

/// `key=value` pairs for the `score` command.
pub(crate) fn parse_rating(raw: &str) -> Result<(TraitKey, String), String> {
    let (key, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected TRAIT=VALUE, got '{raw}'"))?;
    let key = TraitKey::parse(key).ok_or_else(|| format!("unknown trait '{}'", key.trim()))?;
    Ok((key, value.trim().to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_rating_pairs() {
        let (key, value) = parse_rating("skill_english=7").expect("valid pair");
        assert_eq!(key, TraitKey::English);
        assert_eq!(value, "7");

        assert!(parse_rating("charisma=9").is_err());
        assert!(parse_rating("curiosity").is_err());
    }

    #[test]
    fn indexer_endpoint_appends_ingest_path() {
        let indexer = HttpDocumentIndexer::new("http://localhost:8035/");
        assert_eq!(
            indexer.endpoint(),
            "http://localhost:8035/api/ingest/document"
        );
    }

    #[test]
    fn missing_csv_falls_back_to_memory() {
        let source = ProfileSource::from_config(&IntegrationConfig::default());
        assert!(matches!(source, ProfileSource::Memory(_)));
        assert!(lifecycle_seed(&source).is_empty());
        assert!(EMPTY_PROFILES_WARNING.contains("APP_PROFILES_CSV"));
    }
}
