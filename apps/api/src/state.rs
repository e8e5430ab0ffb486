use crate::history::store::MatchStore;
use crate::matching::analyzer::MatchAnalyzer;

/// Shared application state injected into all route handlers via Axum extractors.
///
/// Both handles are created once at startup and passed in explicitly, so tests
/// build the same state around an in-memory store and a scripted model.
#[derive(Clone)]
pub struct AppState {
    pub store: MatchStore,
    pub analyzer: MatchAnalyzer,
}
