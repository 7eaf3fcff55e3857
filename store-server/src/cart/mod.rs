//! Cart Module
//!
//! Session-scoped cart aggregate. All pricing state for a checkout lives
//! here and is passed explicitly into each operation; nothing is read from
//! ambient context and nothing is persisted until finalize time.

mod session;

pub use session::*;
