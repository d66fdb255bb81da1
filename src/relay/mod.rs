//! Byte-range streaming relay subsystem.
//!
//! # Data Flow
//! ```text
//! GET /api/audio?url=...  (optional Range header)
//!     → upstream::probe (size + declared type, no body)
//!     → range.rs (negotiate Full vs Partial, clamp the window)
//!     → stream.rs (open the upstream stream, forward bounded chunks)
//!     → 200 or 206 to the client
//! ```

pub mod range;
pub mod stream;

pub use range::{negotiate, ByteRange, StreamMode};
pub use stream::relay;
