//! REST API Layer
//!
//! axum router, bearer-token extractors and the HTTP server for Mindful.

pub mod error;
pub mod extract;
pub mod handler;
pub mod routes;
pub mod server;
pub mod state;
pub mod types;

pub use error::ApiError;
pub use routes::router;
pub use server::{HttpServer, HttpServerConfig};
pub use state::AppState;
