mod home;
mod love_story;
mod memories;
mod message;
mod questions;
mod surprise;

use std::cell::RefCell;
use std::rc::Rc;

use crate::document::DocumentSurface;
use crate::router::{BrowserHistory, PageFetcher, Router};

pub use home::Home;
pub use love_story::{LoveStory, TimelineCard};
pub use memories::{MediaItem, MediaKind, Memories};
pub use message::Message;
pub use questions::{Question, Questions, SaveOutcome};
pub use surprise::{Celebration, MIN_KISSES, Surprise, SurpriseStage};

/// One instance of every page module. Handles stay with the host so it can
/// drive page interactions after registration.
pub struct SitePages {
    pub home: Rc<RefCell<Home>>,
    pub love_story: Rc<RefCell<LoveStory>>,
    pub questions: Rc<RefCell<Questions>>,
    pub memories: Rc<RefCell<Memories>>,
    pub surprise: Rc<RefCell<Surprise>>,
    pub message: Rc<RefCell<Message>>,
}

impl SitePages {
    pub fn new(question_bank: Vec<Question>) -> Self {
        Self {
            home: Rc::new(RefCell::new(Home::new())),
            love_story: Rc::new(RefCell::new(LoveStory::new())),
            questions: Rc::new(RefCell::new(Questions::new(question_bank))),
            memories: Rc::new(RefCell::new(Memories::new())),
            surprise: Rc::new(RefCell::new(Surprise::new())),
            message: Rc::new(RefCell::new(Message::new())),
        }
    }

    pub fn register_all<S, F, H>(&self, router: &Router<S, F, H>)
    where
        S: DocumentSurface,
        F: PageFetcher,
        H: BrowserHistory,
    {
        router.register(self.home.clone());
        router.register(self.love_story.clone());
        router.register(self.questions.clone());
        router.register(self.memories.clone());
        router.register(self.surprise.clone());
        router.register(self.message.clone());
    }
}
