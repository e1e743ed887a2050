mod browse;
mod callable;
mod categories;
mod chat;
mod entry;
mod render;
mod report;
mod stats;

pub use browse::*;
pub use callable::*;
pub use categories::*;
pub use chat::*;
pub use entry::*;
pub use render::{RevealMode, TerminalChat, TerminalFeed};
pub use report::*;
pub use stats::*;
