//! Outbound access to the content provider.
//!
//! # Data Flow
//! ```text
//! Handler
//!     → client.rs (shared reqwest clients, UA + trust policy)
//!     → probe.rs (HEAD metadata probe → ResourceDescriptor)
//!     → metadata.rs (JSON/text/byte pass-through fetches)
//! ```

pub mod client;
pub mod metadata;
pub mod probe;

pub use client::UpstreamClient;
pub use probe::{probe, ResourceDescriptor};
