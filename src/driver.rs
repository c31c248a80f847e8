//! Headless host: opens a site directory in a [`MemoryDocument`] and replays
//! a script of user actions against the router.

use std::io::ErrorKind;
use std::path::Path;
use std::rc::Rc;
use std::str::FromStr;

use tracing::{debug, info, warn};

use crate::config::{Config, StorageConfig};
use crate::document::MemoryDocument;
use crate::error::{AppError, AppResult};
use crate::event::KeyInput;
use crate::nav::{ClickElement, LinkAttrs};
use crate::pages::{Question, SitePages};
use crate::route::{PageId, RouteTable};
use crate::router::{
    ClickResult, MemoryHistory, NavigationOutcome, PageFetcher, Router, SiteFetcher,
    extract_content_region,
};
use crate::store::{FileStorage, MemoryStorage, StorageBackend, Store};

pub const QUESTION_BANK_FILE: &str = "questions.json";

pub type SiteRouter = Router<MemoryDocument, SiteFetcher, MemoryHistory>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    Goto(PageId),
    Click(String),
    Back,
    Forward,
    Key(KeyInput),
}

impl FromStr for Step {
    type Err = AppError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let raw = raw.trim();
        let (verb, arg) = match raw.split_once(char::is_whitespace) {
            Some((verb, arg)) => (verb, arg.trim()),
            None => (raw, ""),
        };

        let step = match (verb.to_ascii_lowercase().as_str(), arg.is_empty()) {
            ("goto", false) => Self::Goto(PageId::new(arg)),
            ("click", false) => Self::Click(arg.to_string()),
            ("key", false) => Self::Key(KeyInput::from_key_name(arg)),
            ("back", true) => Self::Back,
            ("forward", true) => Self::Forward,
            _ => {
                return Err(AppError::invalid_argument(format!(
                    "unknown step {raw:?} (expected goto <page>, click <href>, back, forward, key <name>)"
                )));
            }
        };
        Ok(step)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepOutcome {
    Navigated(NavigationOutcome),
    Clicked(ClickResult),
    Key { consumed: bool },
    /// Back/forward with nothing in that direction.
    HistoryEdge,
}

pub struct Driver {
    router: SiteRouter,
    pages: SitePages,
}

impl Driver {
    /// Opens the configured entry page and announces it to the page modules.
    pub async fn open(config: &Config) -> AppResult<Self> {
        let routes = RouteTable::site();
        let fetcher = SiteFetcher::new(&config.site.root);
        let entry = routes.resolve_location(&config.site.entry_path);
        let markup = fetcher.fetch(&entry).await?;

        let document =
            match extract_content_region(&markup, &config.router.content_region_id) {
                Some(region) => MemoryDocument::for_routes(region, &routes),
                None => {
                    warn!(page = %entry, "Entry page has no content region");
                    MemoryDocument::without_content_region(&routes)
                }
            };

        let store = Rc::new(open_store(&config.storage)?);
        let history = MemoryHistory::new(config.site.entry_path.clone());
        let router = Router::new(
            config.router.clone(),
            routes,
            store,
            document,
            fetcher,
            history,
        );

        let pages = SitePages::new(load_question_bank(&config.site.root).await?);
        pages.register_all(&router);
        router.start();
        Ok(Self { router, pages })
    }

    pub fn router(&self) -> &SiteRouter {
        &self.router
    }

    pub fn pages(&self) -> &SitePages {
        &self.pages
    }

    pub async fn run_step(&self, step: &Step) -> StepOutcome {
        let outcome = match step {
            Step::Goto(page) => StepOutcome::Navigated(self.router.navigate_to(page.clone()).await),
            Step::Click(href) => {
                let path = [ClickElement::Link(LinkAttrs::new(href.as_str()))];
                StepOutcome::Clicked(self.router.handle_click(&path).await)
            }
            Step::Back => self.pop_history(MemoryHistory::back).await,
            Step::Forward => self.pop_history(MemoryHistory::forward).await,
            Step::Key(key) => StepOutcome::Key {
                consumed: self.router.handle_key(key),
            },
        };
        info!(?step, ?outcome, page = %self.router.current_page(), "Step finished");
        outcome
    }

    pub async fn run(&self, steps: &[Step]) -> Vec<StepOutcome> {
        let mut outcomes = Vec::with_capacity(steps.len());
        for step in steps {
            outcomes.push(self.run_step(step).await);
        }
        outcomes
    }

    async fn pop_history(&self, travel: fn(&mut MemoryHistory) -> bool) -> StepOutcome {
        if !self.router.with_history(travel) {
            return StepOutcome::HistoryEdge;
        }
        StepOutcome::Navigated(self.router.on_history_pop().await)
    }
}

fn memory_backend(config: &StorageConfig) -> MemoryStorage {
    match config.quota_bytes() {
        Some(quota) => MemoryStorage::with_quota(quota),
        None => MemoryStorage::new(),
    }
}

/// Durable tier on disk when a path is configured; the session tier always
/// lives in memory and ends with the process.
pub fn open_store(config: &StorageConfig) -> AppResult<Store> {
    let durable: Rc<dyn StorageBackend> = match &config.durable_path {
        Some(path) => Rc::new(FileStorage::open(path)?),
        None => Rc::new(memory_backend(config)),
    };
    Ok(Store::new(durable, Rc::new(memory_backend(config))))
}

/// Reads `questions.json` from the site root. A site without one has an
/// empty deck.
pub async fn load_question_bank(site_root: &Path) -> AppResult<Vec<Question>> {
    let path = site_root.join(QUESTION_BANK_FILE);
    let raw = match tokio::fs::read_to_string(&path).await {
        Ok(raw) => raw,
        Err(err) if err.kind() == ErrorKind::NotFound => {
            debug!(path = %path.display(), "No question bank");
            return Ok(Vec::new());
        }
        Err(source) => {
            return Err(AppError::io_with_context(
                source,
                format!("failed to read question bank: {}", path.display()),
            ));
        }
    };
    let bank: Vec<Question> = serde_json::from_str(&raw)
        .map_err(|source| AppError::serialize(QUESTION_BANK_FILE, source))?;
    info!(questions = bank.len(), "Loaded question bank");
    Ok(bank)
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::path::{Path, PathBuf};
    use std::process;
    use std::time::{SystemTime, UNIX_EPOCH};

    use super::{Driver, Step, StepOutcome, load_question_bank};
    use crate::config::Config;
    use crate::document::DocumentSurface;
    use crate::event::KeyInput;
    use crate::route::PageId;
    use crate::router::NavigationOutcome;

    fn unique_temp_dir(suffix: &str) -> PathBuf {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("clock should be after unix epoch")
            .as_nanos();
        let mut path = std::env::temp_dir();
        path.push(format!("bday_driver_{suffix}_{}_{}", process::id(), nanos));
        path
    }

    fn write_page(root: &Path, name: &str, body: &str) {
        fs::write(
            root.join(name),
            format!("<html><body><main id=\"page-content\">{body}</main></body></html>"),
        )
        .expect("page should be written");
    }

    #[test]
    fn steps_parse_from_script_lines() {
        assert_eq!(
            "goto memories.html".parse::<Step>().expect("goto"),
            Step::Goto(PageId::new("memories.html"))
        );
        assert_eq!(
            "  click  ./love-story.html ".parse::<Step>().expect("click"),
            Step::Click("./love-story.html".to_string())
        );
        assert_eq!("BACK".parse::<Step>().expect("back"), Step::Back);
        assert_eq!(
            "key Escape".parse::<Step>().expect("key"),
            Step::Key(KeyInput::Escape)
        );
        assert!("goto".parse::<Step>().is_err());
        assert!("back twice".parse::<Step>().is_err());
        assert!("dance".parse::<Step>().is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn replays_a_script_against_a_site_directory() {
        let root = unique_temp_dir("site");
        fs::create_dir_all(&root).expect("site dir should be created");
        write_page(&root, "index.html", "<h1>Happy birthday</h1>");
        write_page(&root, "memories.html", "<div data-type=\"image\"></div>");
        fs::write(
            root.join("questions.json"),
            r#"[{"id": 1, "text": "Favorite memory?"}]"#,
        )
        .expect("bank should be written");

        let mut config = Config::default();
        config.site.root = root.clone();
        let driver = Driver::open(&config).await.expect("site should open");
        assert!(driver.pages().home.borrow().is_modal_open());
        assert_eq!(driver.pages().questions.borrow().bank().len(), 1);

        let steps = [
            Step::Click("memories.html".to_string()),
            Step::Back,
            Step::Back,
            Step::Goto(PageId::new("message.html")),
        ];
        let outcomes = driver.run(&steps).await;

        let StepOutcome::Clicked(click) = &outcomes[0] else {
            panic!("click step should report a click");
        };
        assert!(click.prevents_default());
        assert_eq!(
            click.outcome,
            Some(NavigationOutcome::Completed(PageId::new("memories.html")))
        );
        assert_eq!(
            outcomes[1],
            StepOutcome::Navigated(NavigationOutcome::Completed(PageId::new("index.html")))
        );
        assert_eq!(outcomes[2], StepOutcome::HistoryEdge);
        assert_eq!(
            outcomes[3],
            StepOutcome::Navigated(NavigationOutcome::FullReload(PageId::new("message.html")))
        );
        assert_eq!(
            driver.router().surface().content_markup().as_deref(),
            Some("<h1>Happy birthday</h1>")
        );

        fs::remove_dir_all(&root).expect("site dir should be removed");
    }

    #[tokio::test]
    async fn missing_entry_page_is_a_setup_error() {
        let mut config = Config::default();
        config.site.root = unique_temp_dir("empty");
        assert!(Driver::open(&config).await.is_err());
        assert!(
            load_question_bank(&config.site.root)
                .await
                .expect("missing bank is fine")
                .is_empty()
        );
    }
}
