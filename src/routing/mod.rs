//! Path-to-handler resolution.

pub mod router;

pub use router::{Route, Router};
