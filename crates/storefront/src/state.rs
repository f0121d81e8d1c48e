//! Application state shared across handlers.

use std::sync::Arc;

use moka::future::Cache;
use tokio::sync::Mutex;
use uuid::Uuid;

use crate::catalog::Catalog;
use crate::config::StorefrontConfig;
use crate::render::RenderError;
use crate::session::PageSession;

/// A live page, locked for the duration of one event.
pub type SharedPage = Arc<Mutex<PageSession>>;

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc` and provides access to
/// the catalog, configuration and live pages.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: StorefrontConfig,
    catalog: Arc<Catalog>,
    pages: Cache<Uuid, SharedPage>,
}

impl AppState {
    /// Create a new application state.
    ///
    /// Pages are evicted once they go `config.page_idle` without an event or
    /// when more than `config.max_pages` are live.
    #[must_use]
    pub fn new(config: StorefrontConfig, catalog: Catalog) -> Self {
        let pages = Cache::builder()
            .max_capacity(config.max_pages)
            .time_to_idle(config.page_idle)
            .build();

        Self {
            inner: Arc::new(AppStateInner {
                config,
                catalog: Arc::new(catalog),
                pages,
            }),
        }
    }

    /// Get a reference to the storefront configuration.
    #[must_use]
    pub fn config(&self) -> &StorefrontConfig {
        &self.inner.config
    }

    /// Get a reference to the product catalog.
    #[must_use]
    pub fn catalog(&self) -> &Arc<Catalog> {
        &self.inner.catalog
    }

    /// Start a new page load and register it.
    ///
    /// # Errors
    ///
    /// Returns an error if the initial document fails to render.
    pub async fn open_page(&self) -> Result<(Uuid, SharedPage), RenderError> {
        let session = PageSession::open(Arc::clone(&self.inner.catalog))?;
        let id = Uuid::new_v4();
        let page = Arc::new(Mutex::new(session));
        self.inner.pages.insert(id, Arc::clone(&page)).await;
        Ok((id, page))
    }

    /// Look up a live page.
    pub async fn page(&self, id: Uuid) -> Option<SharedPage> {
        self.inner.pages.get(&id).await
    }
}
