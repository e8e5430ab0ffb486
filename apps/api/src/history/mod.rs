// Append-only match history: storage, lookup endpoints, and Markdown export.

pub mod export;
pub mod handlers;
pub mod store;
