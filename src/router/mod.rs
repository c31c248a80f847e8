mod core;
mod fetch;
mod history;
mod loader;
mod markup;
mod sequencer;
mod state;

#[cfg(test)]
mod tests;

pub use self::core::Router;
pub use fetch::{MemoryFetcher, PageFetcher, SiteFetcher};
pub use history::{BrowserHistory, MemoryHistory};
pub use markup::{attribute_values, count_elements_with_attr, extract_content_region};
pub use sequencer::{ClickResult, NavigationOutcome};
pub use state::{NavSession, TransitionPhase};
