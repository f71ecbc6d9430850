//! REST backend for users, categories and posts with bearer-token auth.

pub mod app;
pub mod application;
pub mod data;
pub mod domain;
pub mod infrastructure;
pub mod presentation;

pub use app::AppServices;
