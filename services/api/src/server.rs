use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use talent_ops::config::AppConfig;
use talent_ops::error::AppError;
use talent_ops::telemetry;
use talent_ops::workflows::documents::{DocumentService, InMemoryDocumentStore};
use talent_ops::workflows::evaluations::{EvaluationService, InMemoryEvaluationStore};
use talent_ops::workflows::hierarchy::{HierarchyBuilder, OrgHierarchyService};
use talent_ops::workflows::lifecycle::{InMemoryLifecycleStore, LifecycleService};
use tracing::info;

use crate::cli::ServeArgs;
use crate::infra::{index_dispatcher, lifecycle_seed, AppState, ProfileSource};
use crate::routes::{with_workflow_routes, Services};

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let profiles = ProfileSource::from_config(&config.integrations);
    let lifecycle_store = InMemoryLifecycleStore::new(lifecycle_seed(&profiles));
    let services = Services {
        hierarchy: Arc::new(OrgHierarchyService::new(
            Arc::new(profiles),
            HierarchyBuilder::new(config.organisation.name.clone()),
        )),
        evaluations: Arc::new(EvaluationService::new(Arc::new(
            InMemoryEvaluationStore::default(),
        ))),
        lifecycle: Arc::new(LifecycleService::new(Arc::new(lifecycle_store))),
        documents: Arc::new(DocumentService::new(
            Arc::new(InMemoryDocumentStore::default()),
            index_dispatcher(&config.integrations),
        )),
    };

    let app = with_workflow_routes(services)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, organisation = %config.organisation.name, "talent ops api ready");

    axum::serve(listener, app).await?;
    Ok(())
}
