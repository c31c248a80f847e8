use std::cell::RefCell;
use std::collections::HashMap;
use std::future::Future;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::time::Duration;

use tracing::debug;

use crate::error::{AppError, AppResult};
use crate::route::PageId;

/// Retrieves the full markup of a page document.
///
/// A non-success HTTP status must surface as [`AppError::FetchStatus`].
pub trait PageFetcher {
    fn fetch(&self, page: &PageId) -> impl Future<Output = AppResult<String>>;
}

/// Serves pages from a directory on disk, the way a static file server would.
#[derive(Debug, Clone)]
pub struct SiteFetcher {
    root: PathBuf,
}

impl SiteFetcher {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn resolve(&self, page: &PageId) -> AppResult<PathBuf> {
        let name = page.as_str();
        if name.is_empty() || name.contains(['/', '\\']) || name == "." || name == ".." {
            return Err(AppError::invalid_argument(format!(
                "page id is not a file name: {name:?}"
            )));
        }
        Ok(self.root.join(name))
    }
}

impl PageFetcher for SiteFetcher {
    async fn fetch(&self, page: &PageId) -> AppResult<String> {
        let path = self.resolve(page)?;
        match tokio::fs::read_to_string(&path).await {
            Ok(markup) => {
                debug!(page = %page, bytes = markup.len(), "Fetched page");
                Ok(markup)
            }
            Err(err) if err.kind() == ErrorKind::NotFound => {
                Err(AppError::fetch_status(page.as_str(), 404))
            }
            Err(source) => Err(AppError::io_with_context(
                source,
                format!("failed to read page: {}", path.display()),
            )),
        }
    }
}

#[derive(Debug, Clone)]
struct CannedResponse {
    status: u16,
    body: String,
}

/// Canned responses keyed by page, recording every request.
#[derive(Debug, Default)]
pub struct MemoryFetcher {
    responses: HashMap<PageId, CannedResponse>,
    latency: Option<Duration>,
    requests: RefCell<Vec<PageId>>,
}

impl MemoryFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_page(self, page: impl Into<PageId>, body: impl Into<String>) -> Self {
        self.with_response(page, 200, body)
    }

    pub fn with_response(
        mut self,
        page: impl Into<PageId>,
        status: u16,
        body: impl Into<String>,
    ) -> Self {
        self.responses.insert(
            page.into(),
            CannedResponse {
                status,
                body: body.into(),
            },
        );
        self
    }

    /// Delays every response, simulating the network.
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = Some(latency);
        self
    }

    pub fn requests(&self) -> Vec<PageId> {
        self.requests.borrow().clone()
    }

    pub fn request_count(&self) -> usize {
        self.requests.borrow().len()
    }
}

impl PageFetcher for MemoryFetcher {
    async fn fetch(&self, page: &PageId) -> AppResult<String> {
        self.requests.borrow_mut().push(page.clone());
        if let Some(latency) = self.latency {
            tokio::time::sleep(latency).await;
        }

        let response = self.responses.get(page).cloned().unwrap_or(CannedResponse {
            status: 404,
            body: String::new(),
        });
        if (200..300).contains(&response.status) {
            Ok(response.body)
        } else {
            Err(AppError::fetch_status(page.as_str(), response.status))
        }
    }
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::path::PathBuf;
    use std::process;
    use std::time::{SystemTime, UNIX_EPOCH};

    use super::{MemoryFetcher, PageFetcher, SiteFetcher};
    use crate::error::AppError;
    use crate::route::PageId;

    fn unique_temp_dir(suffix: &str) -> PathBuf {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("clock should be after unix epoch")
            .as_nanos();
        let mut path = std::env::temp_dir();
        path.push(format!("bday_site_{suffix}_{}_{}", process::id(), nanos));
        path
    }

    #[tokio::test]
    async fn site_fetcher_reads_pages_and_maps_missing_to_404() {
        let root = unique_temp_dir("fetch");
        fs::create_dir_all(&root).expect("site dir should be created");
        fs::write(root.join("memories.html"), "<main id=\"page-content\">m</main>")
            .expect("page should be written");

        let fetcher = SiteFetcher::new(&root);
        let markup = fetcher
            .fetch(&PageId::new("memories.html"))
            .await
            .expect("page exists");
        assert!(markup.contains("page-content"));

        let err = fetcher
            .fetch(&PageId::new("missing.html"))
            .await
            .expect_err("missing page");
        assert!(matches!(err, AppError::FetchStatus { status: 404, .. }));

        let err = fetcher
            .fetch(&PageId::new("../secrets.html"))
            .await
            .expect_err("path escape rejected");
        assert!(matches!(err, AppError::InvalidArgument(_)));

        fs::remove_dir_all(&root).expect("site dir should be removed");
    }

    #[tokio::test]
    async fn memory_fetcher_reports_non_success_statuses() {
        let fetcher = MemoryFetcher::new()
            .with_page("index.html", "home")
            .with_response("message.html", 500, "boom");

        assert_eq!(
            fetcher.fetch(&PageId::new("index.html")).await.expect("ok"),
            "home"
        );
        assert!(matches!(
            fetcher.fetch(&PageId::new("message.html")).await,
            Err(AppError::FetchStatus { status: 500, .. })
        ));
        assert!(matches!(
            fetcher.fetch(&PageId::new("nowhere.html")).await,
            Err(AppError::FetchStatus { status: 404, .. })
        ));
        assert_eq!(fetcher.request_count(), 3);
    }
}
