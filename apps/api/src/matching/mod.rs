// Resume / job description matching: prompt construction, model call,
// reply parsing, and the submit endpoints.

pub mod analyzer;
pub mod handlers;
pub mod models;
pub mod prompts;
