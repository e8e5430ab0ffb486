//! Result Store — append-only match history in SQLite.
//!
//! Identifiers come from the `AUTOINCREMENT` sequence, allocated under SQLite's
//! write lock, so concurrent inserts never share an id. Rows are never updated
//! or deleted. `ensure_schema` is idempotent and runs before every operation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{types::Json, FromRow, SqlitePool};

use crate::matching::models::{split_highlights, Highlight, MatchDetails};

const CREATE_TABLE_SQL: &str = r#"
CREATE TABLE IF NOT EXISTS match_history (
    id              INTEGER PRIMARY KEY AUTOINCREMENT,
    timestamp       TEXT    NOT NULL,
    resume_text     TEXT    NOT NULL,
    job_description TEXT    NOT NULL,
    raw_output      TEXT    NOT NULL,
    score           INTEGER,
    summary         TEXT,
    highlights      TEXT,
    actions         TEXT
)
"#;

const CREATE_INDEX_SQL: &str =
    "CREATE INDEX IF NOT EXISTS idx_match_history_timestamp ON match_history (timestamp DESC)";

const SELECT_COLUMNS: &str = "SELECT id, timestamp, resume_text, job_description, raw_output, \
     score, summary, highlights, actions FROM match_history";

/// One persisted analysis, as reported by the history endpoints.
///
/// `strengths` / `gaps` / `actions` use the current result shape; `highlights`
/// is the tagged view kept for older consumers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchRecord {
    pub id: i64,
    pub timestamp: DateTime<Utc>,
    pub resume_text: String,
    pub job_description: String,
    pub raw_output: String,
    pub score: Option<i64>,
    pub summary: Option<String>,
    pub strengths: Vec<String>,
    pub gaps: Vec<String>,
    pub actions: Vec<String>,
    pub highlights: Vec<Highlight>,
}

impl MatchRecord {
    /// The structured result, when the model reply was parsed at insert time.
    pub fn details(&self) -> Option<MatchDetails> {
        Some(MatchDetails {
            score: u8::try_from(self.score?).ok()?,
            strengths: self.strengths.clone(),
            gaps: self.gaps.clone(),
            actions: self.actions.clone(),
            summary: self.summary.clone()?,
        })
    }
}

#[derive(Debug, FromRow)]
struct MatchRow {
    id: i64,
    timestamp: DateTime<Utc>,
    resume_text: String,
    job_description: String,
    raw_output: String,
    score: Option<i64>,
    summary: Option<String>,
    highlights: Option<String>,
    actions: Option<String>,
}

impl From<MatchRow> for MatchRecord {
    fn from(row: MatchRow) -> Self {
        let highlights: Vec<Highlight> = decode_list(row.highlights.as_deref());
        let (strengths, gaps) = split_highlights(&highlights);
        MatchRecord {
            id: row.id,
            timestamp: row.timestamp,
            resume_text: row.resume_text,
            job_description: row.job_description,
            raw_output: row.raw_output,
            score: row.score,
            summary: row.summary,
            strengths,
            gaps,
            actions: decode_list(row.actions.as_deref()),
            highlights,
        }
    }
}

/// NULL, empty, or unreadable stored lists read back as empty.
fn decode_list<T: serde::de::DeserializeOwned>(stored: Option<&str>) -> Vec<T> {
    stored
        .filter(|s| !s.trim().is_empty())
        .and_then(|s| serde_json::from_str(s).ok())
        .unwrap_or_default()
}

#[derive(Clone)]
pub struct MatchStore {
    pool: SqlitePool,
}

impl MatchStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Creates the table, identifier sequence, and timestamp index if missing.
    pub async fn ensure_schema(&self) -> Result<(), sqlx::Error> {
        sqlx::query(CREATE_TABLE_SQL).execute(&self.pool).await?;
        sqlx::query(CREATE_INDEX_SQL).execute(&self.pool).await?;
        Ok(())
    }

    /// Appends one record and returns its new identifier.
    /// Without `details`, score / summary / highlights / actions are stored as NULL.
    pub async fn insert(
        &self,
        resume_text: &str,
        job_description: &str,
        raw_output: &str,
        details: Option<&MatchDetails>,
    ) -> Result<i64, sqlx::Error> {
        self.ensure_schema().await?;

        let result = sqlx::query(
            r#"
            INSERT INTO match_history
                (timestamp, resume_text, job_description, raw_output,
                 score, summary, highlights, actions)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(Utc::now())
        .bind(resume_text)
        .bind(job_description)
        .bind(raw_output)
        .bind(details.map(|d| i64::from(d.score)))
        .bind(details.map(|d| d.summary.as_str()))
        .bind(details.map(|d| Json(d.highlights())))
        .bind(details.map(|d| Json(d.actions.clone())))
        .execute(&self.pool)
        .await?;

        Ok(result.last_insert_rowid())
    }

    /// Newest first, skipping `offset` rows and returning at most `limit`.
    /// Bounds are enforced by the caller.
    pub async fn list(&self, limit: i64, offset: i64) -> Result<Vec<MatchRecord>, sqlx::Error> {
        self.ensure_schema().await?;

        let rows = sqlx::query_as::<_, MatchRow>(&format!(
            "{SELECT_COLUMNS} ORDER BY timestamp DESC, id DESC LIMIT ? OFFSET ?"
        ))
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(MatchRecord::from).collect())
    }

    pub async fn get_by_id(&self, id: i64) -> Result<Option<MatchRecord>, sqlx::Error> {
        self.ensure_schema().await?;

        let row = sqlx::query_as::<_, MatchRow>(&format!("{SELECT_COLUMNS} WHERE id = ?"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(MatchRecord::from))
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::collections::HashSet;

    use sqlx::sqlite::SqlitePoolOptions;

    use crate::matching::models::HighlightKind;

    /// Single-connection in-memory database that lives as long as the pool.
    pub(crate) async fn memory_store() -> MatchStore {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect("sqlite::memory:")
            .await
            .unwrap();
        MatchStore::new(pool)
    }

    fn sample_details() -> MatchDetails {
        MatchDetails {
            score: 82,
            strengths: vec!["Rust".into(), "Distributed systems".into()],
            gaps: vec!["Kubernetes".into()],
            actions: vec!["Get CKA certified".into(), "Ship a k8s operator".into()],
            summary: "Strong systems background.".into(),
        }
    }

    #[tokio::test]
    async fn test_ensure_schema_is_idempotent() {
        let store = memory_store().await;
        store.ensure_schema().await.unwrap();
        store.ensure_schema().await.unwrap();
        assert!(store.list(10, 0).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_insert_then_get_round_trips() {
        let store = memory_store().await;
        let details = sample_details();
        let id = store
            .insert("my resume", "the job", "raw model text", Some(&details))
            .await
            .unwrap();

        let record = store.get_by_id(id).await.unwrap().unwrap();
        assert_eq!(record.id, id);
        assert_eq!(record.resume_text, "my resume");
        assert_eq!(record.job_description, "the job");
        assert_eq!(record.raw_output, "raw model text");
        assert_eq!(record.score, Some(82));
        assert_eq!(record.summary.as_deref(), Some("Strong systems background."));
        assert_eq!(record.strengths, details.strengths);
        assert_eq!(record.gaps, details.gaps);
        assert_eq!(record.actions, details.actions);
        assert_eq!(record.highlights, details.highlights());
        assert_eq!(record.highlights[2].kind, HighlightKind::Gap);
        assert_eq!(record.details(), Some(details));
    }

    #[tokio::test]
    async fn test_unparsed_insert_stores_absent_fields() {
        let store = memory_store().await;
        let id = store
            .insert("resume", "job", "This is not valid JSON", None)
            .await
            .unwrap();

        let record = store.get_by_id(id).await.unwrap().unwrap();
        assert_eq!(record.raw_output, "This is not valid JSON");
        assert_eq!(record.score, None);
        assert_eq!(record.summary, None);
        assert!(record.highlights.is_empty());
        assert!(record.strengths.is_empty());
        assert!(record.actions.is_empty());
        assert!(record.details().is_none());
    }

    #[tokio::test]
    async fn test_empty_stored_highlights_read_as_empty() {
        let store = memory_store().await;
        let id = store.insert("r", "j", "raw", None).await.unwrap();
        sqlx::query("UPDATE match_history SET highlights = '', actions = '' WHERE id = ?")
            .bind(id)
            .execute(&store.pool)
            .await
            .unwrap();

        let record = store.get_by_id(id).await.unwrap().unwrap();
        assert!(record.highlights.is_empty());
        assert!(record.actions.is_empty());
    }

    #[tokio::test]
    async fn test_lists_are_stored_as_json_arrays() {
        let store = memory_store().await;
        let id = store
            .insert("r", "j", "raw", Some(&sample_details()))
            .await
            .unwrap();

        let (highlights, actions): (String, String) =
            sqlx::query_as("SELECT highlights, actions FROM match_history WHERE id = ?")
                .bind(id)
                .fetch_one(&store.pool)
                .await
                .unwrap();
        assert_eq!(
            serde_json::from_str::<serde_json::Value>(&highlights).unwrap(),
            serde_json::json!([
                {"type": "match", "description": "Rust"},
                {"type": "match", "description": "Distributed systems"},
                {"type": "gap", "description": "Kubernetes"}
            ])
        );
        assert_eq!(
            serde_json::from_str::<Vec<String>>(&actions).unwrap(),
            vec!["Get CKA certified", "Ship a k8s operator"]
        );
    }

    #[tokio::test]
    async fn test_get_missing_id_is_none() {
        let store = memory_store().await;
        assert!(store.get_by_id(9999).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_ids_increase_monotonically() {
        let store = memory_store().await;
        let first = store.insert("r", "j", "a", None).await.unwrap();
        let second = store.insert("r", "j", "b", None).await.unwrap();
        assert!(second > first);
    }

    #[tokio::test]
    async fn test_list_returns_newest_first_page() {
        let store = memory_store().await;
        let mut ids = Vec::new();
        for i in 0..12 {
            ids.push(
                store
                    .insert(&format!("resume {i}"), "job", "raw", None)
                    .await
                    .unwrap(),
            );
        }

        let page = store.list(10, 0).await.unwrap();
        assert_eq!(page.len(), 10);
        assert_eq!(page[0].id, ids[11]);
        assert!(page
            .windows(2)
            .all(|w| (w[0].timestamp, w[0].id) > (w[1].timestamp, w[1].id)));

        let rest = store.list(10, 10).await.unwrap();
        assert_eq!(rest.len(), 2);
        assert_eq!(rest[1].id, ids[0]);
    }

    #[tokio::test]
    async fn test_concurrent_inserts_get_distinct_ids() {
        let dir = tempfile::tempdir().unwrap();
        let url = format!("sqlite://{}", dir.path().join("history.db").display());
        let pool = crate::db::create_pool(&url).await.unwrap();
        let store = MatchStore::new(pool);
        store.ensure_schema().await.unwrap();

        let handles: Vec<_> = (0..16)
            .map(|i| {
                let store = store.clone();
                tokio::spawn(async move {
                    store
                        .insert(&format!("resume {i}"), "job", "raw", None)
                        .await
                        .unwrap()
                })
            })
            .collect();

        let mut ids = HashSet::new();
        for handle in handles {
            assert!(ids.insert(handle.await.unwrap()), "duplicate id allocated");
        }
        assert_eq!(ids.len(), 16);
        assert_eq!(store.list(100, 0).await.unwrap().len(), 16);
    }
}
