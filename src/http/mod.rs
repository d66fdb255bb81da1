//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware, AppState)
//!     → handlers.rs (audio relay core + pass-through endpoints)
//!     → fonts.rs (content-type by extension for font assets)
//!     → Send to client
//! ```

pub mod fonts;
pub mod handlers;
pub mod server;

pub use server::{AppState, HttpServer};
