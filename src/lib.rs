pub mod config;
pub mod document;
pub mod driver;
pub mod error;
pub mod event;
pub mod lifecycle;
pub mod nav;
pub mod pages;
pub mod route;
pub mod router;
pub mod store;
