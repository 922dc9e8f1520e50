//! Data models for the Fix-On community service.

mod category;
mod filters;
mod topic;

pub use category::*;
pub use filters::*;
pub use topic::*;
