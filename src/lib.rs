//! commitcast - a terminal client for the auto-post backend.
//!
//! Authenticate with X through the backend's OAuth flow, generate a post
//! draft from a GitHub repository's latest commit, edit it, and publish it.
//! All heavy lifting happens server-side; this crate is the client: four
//! screens and a typed API client over one HTTP boundary.

// Core modules
pub mod api;
pub mod app;
pub mod cli;
pub mod config;
pub mod screens;
pub mod styles;
pub mod tui;
pub mod ui;
pub mod utils;

// Re-exports for convenience
pub use api::{ApiClient, LoginStart, PublishResult, TweetDraft};
pub use config::Config;
pub use ui::{AuthStatus, CallbackPhase, Language, ScreenId};
