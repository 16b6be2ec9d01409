pub mod composer;
pub mod history;

pub use composer::Composer;
pub use history::{ChatMessage, HistoryStore, Role};
