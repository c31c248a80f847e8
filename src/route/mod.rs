mod page_id;
mod table;

pub use page_id::PageId;
pub use table::{
    INDEX_PAGE, LOVE_STORY_PAGE, MEMORIES_PAGE, MESSAGE_PAGE, QUESTIONS_PAGE, Route, RouteTable,
    SURPRISE_PAGE,
};
