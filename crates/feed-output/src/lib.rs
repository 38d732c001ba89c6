//! Feed output: assembly, serialization, and the post-serialization guard.

pub mod guard;
pub mod writer;

pub use guard::{GuardOutcome, guard};
pub use writer::{assemble, write_feed};
