use call_dashboard::workflows::calls::{
    AutomationPlaybook, CallLogImportError, CallLogSession, CallReport, CallReportSummary,
    PlaybookError,
};
use metrics_exporter_prometheus::PrometheusHandle;
use std::path::{Path, PathBuf};
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};
use tracing::info;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
    pub(crate) dashboard: Arc<DashboardSource>,
}

/// The configured call log and playbook, with the server's own load cache.
pub(crate) struct DashboardSource {
    data_path: PathBuf,
    playbook: AutomationPlaybook,
    session: Mutex<CallLogSession>,
}

impl DashboardSource {
    pub(crate) fn new(data_path: PathBuf, playbook: AutomationPlaybook) -> Self {
        Self {
            data_path,
            playbook,
            session: Mutex::new(CallLogSession::new()),
        }
    }

    pub(crate) fn data_path(&self) -> &Path {
        &self.data_path
    }

    pub(crate) fn playbook(&self) -> &AutomationPlaybook {
        &self.playbook
    }

    pub(crate) fn summary(&self) -> Result<CallReportSummary, CallLogImportError> {
        let records = {
            let mut session = self.session.lock().expect("call log session mutex poisoned");
            session.load(&self.data_path)?
        };
        Ok(CallReport::from_records(&records).summary())
    }

    #[cfg(test)]
    pub(crate) fn cached_path(&self) -> Option<PathBuf> {
        let session = self.session.lock().expect("call log session mutex poisoned");
        session.cached_key().map(|key| key.path.clone())
    }
}

pub(crate) fn load_playbook(path: Option<&Path>) -> Result<AutomationPlaybook, PlaybookError> {
    match path {
        Some(path) => {
            let playbook = AutomationPlaybook::from_path(path)?;
            info!(path = %path.display(), sections = playbook.sections.len(), "loaded automation playbook");
            Ok(playbook)
        }
        None => Ok(AutomationPlaybook::standard()),
    }
}

#[cfg(test)]
pub(crate) fn test_metrics_handle() -> Arc<PrometheusHandle> {
    let recorder = metrics_exporter_prometheus::PrometheusBuilder::new().build_recorder();
    Arc::new(recorder.handle())
}
