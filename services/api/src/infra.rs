use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use therapist_finder::config::RegistryConfig;
use therapist_finder::error::AppError;
use therapist_finder::lookup::{LookupError, TherapistLookupService};
use therapist_finder::registry::NpiRegistryClient;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

pub(crate) type LookupService = TherapistLookupService<NpiRegistryClient>;

pub(crate) fn build_lookup_service(config: &RegistryConfig) -> Result<LookupService, AppError> {
    let client = NpiRegistryClient::new(config).map_err(LookupError::from)?;
    Ok(TherapistLookupService::new(client))
}
