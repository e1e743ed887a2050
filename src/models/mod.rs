mod chat;
mod entry;
mod report;
mod stats;

pub use chat::*;
pub use entry::*;
pub use report::*;
pub use stats::*;
