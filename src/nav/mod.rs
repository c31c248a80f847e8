mod interceptor;

pub use interceptor::{ClickDecision, ClickElement, IgnoreReason, LinkAttrs, classify_click};
