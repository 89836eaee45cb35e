//! # edupress-api
//!
//! REST API server for edupress: document rendering, content generation
//! and the past-paper library.

mod api;
pub mod config;
pub mod seed;
pub mod source;

pub use api::{
    app, delete_document, download_document, generate_document, health_check, list_library,
    render_document, upload_document, AppError, AppState, ErrorResponse, GenerateParams,
    LibraryListing,
};
pub use config::ApiConfig;
pub use source::{ContentSource, FixedReply, GeminiClient};
