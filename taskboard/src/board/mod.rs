//! Board commands

mod get;
mod reset;
mod timeline;

pub use get::GetBoard;
pub use reset::ResetBoard;
pub use timeline::GetTimeline;
