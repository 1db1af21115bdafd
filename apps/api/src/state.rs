use std::sync::Arc;

use crate::config::Config;
use crate::layout::PageConfig;
use crate::notify::Notifier;
use crate::quiz::Catalog;
use crate::submission::store::SubmissionStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<Catalog>,
    /// Postgres in production, `UnavailableStore` without `DATABASE_URL`.
    pub store: Arc<dyn SubmissionStore>,
    pub notifier: Arc<dyn Notifier>,
    pub config: Config,
    /// Page geometry for admin PDF exports.
    pub page_config: PageConfig,
}
