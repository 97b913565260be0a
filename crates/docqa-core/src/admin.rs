//! Admin dashboard state: aggregates, upload form, collection viewer.

use docqa_types::{
    admin::{Dashboard, DocumentPage},
    event::AppEvent,
    http::UploadFile,
};

use crate::ports::ApiPort;

/// Documents per page in the collection viewer
pub const PAGE_SIZE: u64 = 10;

/// Lowercase, trim, and collapse whitespace runs to `_`.
pub fn normalize_collection_name(raw: &str) -> String {
    raw.trim()
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("_")
}

/// Follow-up work the app must dispatch after a state change
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AdminCommand {
    RefreshDashboard,
    FetchDocuments { collection: String, offset: u64 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadStatus {
    Idle,
    Uploading,
    Success,
    Error,
}

#[derive(Debug, Clone, Default)]
pub struct UploadForm {
    pub collection_name: String,
    pub source_url: String,
    pub file: Option<UploadFile>,
}

/// Validated upload, ready to send
#[derive(Debug, Clone, PartialEq)]
pub struct UploadJob {
    pub file: UploadFile,
    pub collection_name: String,
    pub source_url: Option<String>,
}

// ─── Document viewer ─────────────────────────────────────────

/// Paginated view of one collection's documents
#[derive(Debug, Clone, Default)]
pub struct DocumentViewer {
    collection: Option<String>,
    offset: u64,
    pub page: Option<DocumentPage>,
    pub loading: bool,
    pub error: Option<String>,
}

impl DocumentViewer {
    pub fn is_open(&self) -> bool {
        self.collection.is_some()
    }

    pub fn collection(&self) -> Option<&str> {
        self.collection.as_deref()
    }

    pub fn offset(&self) -> u64 {
        self.offset
    }

    pub fn open(&mut self, collection: &str) -> AdminCommand {
        self.collection = Some(collection.to_string());
        self.page = None;
        self.error = None;
        self.go_to(0)
    }

    pub fn close(&mut self) {
        *self = Self::default();
    }

    fn total(&self) -> Option<u64> {
        self.page.as_ref().map(|p| p.pagination.total)
    }

    /// Offset of the next page, if one exists
    pub fn next_offset(&self) -> Option<u64> {
        let total = self.total()?;
        let target = self.offset + PAGE_SIZE;
        (target < total).then_some(target)
    }

    /// Offset of the previous page, clamped at 0
    pub fn prev_offset(&self) -> Option<u64> {
        self.total()?;
        (self.offset > 0).then(|| self.offset.saturating_sub(PAGE_SIZE))
    }

    pub fn next(&mut self) -> Option<AdminCommand> {
        if self.loading {
            return None;
        }
        self.next_offset().map(|offset| self.go_to(offset))
    }

    pub fn prev(&mut self) -> Option<AdminCommand> {
        if self.loading {
            return None;
        }
        self.prev_offset().map(|offset| self.go_to(offset))
    }

    fn go_to(&mut self, offset: u64) -> AdminCommand {
        self.offset = offset;
        self.loading = true;
        AdminCommand::FetchDocuments {
            collection: self.collection.clone().unwrap_or_default(),
            offset,
        }
    }

    fn apply(&mut self, event: &AppEvent) {
        match event {
            AppEvent::DocumentsLoaded { collection, page } => {
                if self.collection.as_deref() == Some(collection.as_str()) {
                    self.offset = page.pagination.offset;
                    self.page = Some(page.clone());
                    self.loading = false;
                    self.error = None;
                }
            }
            AppEvent::DocumentsFailed { collection, message } => {
                if self.collection.as_deref() == Some(collection.as_str()) {
                    self.loading = false;
                    self.error = Some(message.clone());
                }
            }
            _ => {}
        }
    }
}

// ─── Dashboard state ─────────────────────────────────────────

#[derive(Debug, Clone)]
pub struct AdminState {
    pub dashboard: Option<Dashboard>,
    pub loading: bool,
    pub dashboard_error: Option<String>,
    pub form: UploadForm,
    pub status: UploadStatus,
    pub message: String,
    pub viewer: DocumentViewer,
}

impl AdminState {
    pub fn new() -> Self {
        Self {
            dashboard: None,
            loading: false,
            dashboard_error: None,
            form: UploadForm::default(),
            status: UploadStatus::Idle,
            message: String::new(),
            viewer: DocumentViewer::default(),
        }
    }

    /// Stats and the collection table are hidden until the reload resolves.
    pub fn begin_refresh(&mut self) -> AdminCommand {
        self.loading = true;
        self.dashboard = None;
        self.dashboard_error = None;
        AdminCommand::RefreshDashboard
    }

    /// Validate the upload form. On failure the status line explains why.
    pub fn begin_upload(&mut self) -> Option<UploadJob> {
        if self.status == UploadStatus::Uploading {
            return None;
        }
        let collection_name = normalize_collection_name(&self.form.collection_name);
        let file = match (&self.form.file, collection_name.is_empty()) {
            (Some(file), false) => file.clone(),
            _ => {
                self.status = UploadStatus::Error;
                self.message = "Please choose a file and enter a collection name.".to_string();
                return None;
            }
        };
        let source_url = Some(self.form.source_url.trim().to_string()).filter(|s| !s.is_empty());

        self.status = UploadStatus::Uploading;
        self.message = format!("Uploading {}...", file.name);
        Some(UploadJob { file, collection_name, source_url })
    }

    /// Apply the result of a background call, returning any follow-up.
    pub fn apply(&mut self, event: &AppEvent) -> Option<AdminCommand> {
        match event {
            AppEvent::DashboardLoaded { dashboard } => {
                self.dashboard = Some((**dashboard).clone());
                self.loading = false;
                None
            }
            AppEvent::DashboardFailed { message } => {
                self.dashboard = None;
                self.loading = false;
                self.dashboard_error = Some(message.clone());
                None
            }
            AppEvent::UploadSucceeded { collection } => {
                self.status = UploadStatus::Success;
                self.message = format!("Uploaded to \"{}\".", collection);
                self.form.file = None;
                self.form.collection_name.clear();
                Some(self.begin_refresh())
            }
            AppEvent::UploadFailed { message } => {
                self.status = UploadStatus::Error;
                self.message = message.clone();
                None
            }
            AppEvent::CollectionDeleted { name } => {
                self.status = UploadStatus::Success;
                self.message = format!("Deleted collection \"{}\".", name);
                if self.viewer.collection() == Some(name.as_str()) {
                    self.viewer.close();
                }
                Some(self.begin_refresh())
            }
            AppEvent::CollectionDeleteFailed { name, message } => {
                self.status = UploadStatus::Error;
                self.message = format!("Could not delete \"{}\": {}", name, message);
                None
            }
            AppEvent::DocumentsLoaded { .. } | AppEvent::DocumentsFailed { .. } => {
                self.viewer.apply(event);
                None
            }
            _ => None,
        }
    }
}

impl Default for AdminState {
    fn default() -> Self {
        Self::new()
    }
}

// ─── Background operations ───────────────────────────────────

/// Fetch all four aggregates concurrently; any failure fails the whole load.
pub async fn load_dashboard(api: &dyn ApiPort) -> AppEvent {
    let joined = futures::try_join!(
        api.db_stats(),
        api.list_collections(),
        api.response_stats(),
        api.token_usage_stats()
    );
    match joined {
        Ok((db_stats, collections, response_stats, token_stats)) => AppEvent::DashboardLoaded {
            dashboard: Box::new(Dashboard { db_stats, collections, response_stats, token_stats }),
        },
        Err(e) => AppEvent::DashboardFailed { message: e.to_string() },
    }
}

pub async fn upload(api: &dyn ApiPort, job: UploadJob) -> AppEvent {
    let result = api
        .upload_document(job.file, &job.collection_name, job.source_url.as_deref())
        .await;
    match result {
        Ok(()) => AppEvent::UploadSucceeded { collection: job.collection_name },
        Err(e) => AppEvent::UploadFailed { message: e.to_string() },
    }
}

pub async fn delete_collection(api: &dyn ApiPort, name: String) -> AppEvent {
    match api.delete_collection(&name).await {
        Ok(()) => AppEvent::CollectionDeleted { name },
        Err(e) => AppEvent::CollectionDeleteFailed { name, message: e.to_string() },
    }
}

pub async fn load_documents(api: &dyn ApiPort, collection: String, offset: u64) -> AppEvent {
    match api.collection_documents(&collection, PAGE_SIZE, offset).await {
        Ok(page) => AppEvent::DocumentsLoaded { collection, page },
        Err(e) => AppEvent::DocumentsFailed { collection, message: e.to_string() },
    }
}
