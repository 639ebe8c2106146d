//! Vector index: nearest-neighbor query + upsert over stored embeddings.
//!
//! [`VectorIndex`] mirrors the surface of a hosted vector database; the
//! bundled [`SqliteVectorIndex`] keeps embeddings as little-endian f32 BLOBs
//! in a regular `SQLite` table and ranks by brute-force cosine similarity.
//! At vault scale (one row per distinct claim) a linear scan beats index
//! maintenance.

use parking_lot::Mutex;
use rusqlite::{params, Connection};
use serde_json::Value;

use verity_embeddings::normalize::cosine_similarity;

use crate::errors::{Result, VaultError};

/// Flat metadata stored alongside a vector: string/number/boolean values or
/// lists of strings only.
pub type Metadata = serde_json::Map<String, Value>;

/// Convert an f32 slice to a byte blob for storage.
pub fn f32_slice_to_blob(v: &[f32]) -> Vec<u8> {
    v.iter().flat_map(|f| f.to_le_bytes()).collect()
}

/// Convert a byte blob back to an f32 vector.
pub fn blob_to_f32_vec(blob: &[u8]) -> Vec<f32> {
    blob.chunks_exact(4)
        .map(|chunk| f32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]))
        .collect()
}

/// One entry to upsert: id, vector, and its flat metadata.
#[derive(Clone, Debug)]
pub struct IndexEntry {
    /// Stable identifier; an existing entry with the same id is replaced.
    pub id: String,
    /// The embedding.
    pub vector: Vec<f32>,
    /// Flat metadata payload.
    pub metadata: Metadata,
}

/// A single query match.
#[derive(Clone, Debug)]
pub struct IndexMatch {
    /// Identifier of the matched entry.
    pub id: String,
    /// Similarity score (higher = more similar).
    pub score: f32,
    /// Metadata, when the query asked for it.
    pub metadata: Option<Metadata>,
}

/// Nearest-neighbor store interface.
///
/// The index is the sole source of truth for cached verdicts; conflicting
/// upserts to the same id are serialized by the implementation and the last
/// write wins.
pub trait VectorIndex: Send + Sync {
    /// Return the `top_k` nearest stored vectors, best first.
    fn query(&self, vector: &[f32], top_k: usize, include_metadata: bool)
        -> Result<Vec<IndexMatch>>;

    /// Insert or replace entries keyed by id.
    fn upsert(&self, entries: Vec<IndexEntry>) -> Result<()>;

    /// Count stored entries.
    fn count(&self) -> Result<usize>;
}

/// Reject metadata that would not survive a flat key-value store.
///
/// Allowed values: strings, numbers, booleans, and lists of strings.
pub fn validate_metadata(metadata: &Metadata) -> Result<()> {
    for (key, value) in metadata {
        let ok = match value {
            Value::String(_) | Value::Number(_) | Value::Bool(_) => true,
            Value::Array(items) => items.iter().all(Value::is_string),
            Value::Null | Value::Object(_) => false,
        };
        if !ok {
            return Err(VaultError::Metadata(format!(
                "field '{key}' must be a string, number, boolean, or list of strings"
            )));
        }
    }
    Ok(())
}

/// `SQLite`-backed vector index with brute-force cosine ranking.
pub struct SqliteVectorIndex {
    conn: Mutex<Connection>,
    dims: usize,
}

impl SqliteVectorIndex {
    /// Wrap an open connection, creating the table if needed.
    pub fn new(conn: Connection, dims: usize) -> Result<Self> {
        conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS vault_vectors (
                claim_id TEXT PRIMARY KEY,
                embedding BLOB NOT NULL,
                metadata TEXT NOT NULL
            )",
        )?;
        Ok(Self {
            conn: Mutex::new(conn),
            dims,
        })
    }

    /// Open (or create) an index file on disk.
    pub fn open(path: &str, dims: usize) -> Result<Self> {
        Self::new(Connection::open(path)?, dims)
    }

    /// Open an in-memory index (tests, ephemeral deployments).
    pub fn in_memory(dims: usize) -> Result<Self> {
        Self::new(Connection::open_in_memory()?, dims)
    }

    /// Expected embedding dimensions.
    pub fn dims(&self) -> usize {
        self.dims
    }

    fn load_rows(&self) -> Result<Vec<(String, Vec<u8>, String)>> {
        let conn = self.conn.lock();
        let mut stmt = conn.prepare("SELECT claim_id, embedding, metadata FROM vault_vectors")?;
        let rows = stmt
            .query_map([], |row| {
                Ok((
                    row.get::<_, String>(0)?,
                    row.get::<_, Vec<u8>>(1)?,
                    row.get::<_, String>(2)?,
                ))
            })?
            .filter_map(std::result::Result::ok)
            .collect();
        Ok(rows)
    }
}

impl VectorIndex for SqliteVectorIndex {
    fn query(
        &self,
        vector: &[f32],
        top_k: usize,
        include_metadata: bool,
    ) -> Result<Vec<IndexMatch>> {
        if vector.len() != self.dims {
            return Err(VaultError::Index(format!(
                "dimension mismatch: expected {}, got {}",
                self.dims,
                vector.len()
            )));
        }

        let rows = self.load_rows()?;
        let mut matches: Vec<IndexMatch> = rows
            .into_iter()
            .map(|(id, blob, meta_json)| {
                let embedding = blob_to_f32_vec(&blob);
                let score = cosine_similarity(vector, &embedding);
                let metadata = if include_metadata {
                    serde_json::from_str::<Metadata>(&meta_json).ok()
                } else {
                    None
                };
                IndexMatch {
                    id,
                    score,
                    metadata,
                }
            })
            .collect();

        matches.sort_by(|a, b| {
            b.score
                .partial_cmp(&a.score)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        matches.truncate(top_k);
        Ok(matches)
    }

    fn upsert(&self, entries: Vec<IndexEntry>) -> Result<()> {
        for entry in &entries {
            if entry.vector.len() != self.dims {
                return Err(VaultError::Index(format!(
                    "dimension mismatch: expected {}, got {}",
                    self.dims,
                    entry.vector.len()
                )));
            }
            validate_metadata(&entry.metadata)?;
        }

        let conn = self.conn.lock();
        for entry in entries {
            let blob = f32_slice_to_blob(&entry.vector);
            let meta_json = serde_json::to_string(&entry.metadata)
                .map_err(|e| VaultError::Metadata(e.to_string()))?;
            // Delete-then-insert keeps replace semantics obvious.
            let _ = conn.execute(
                "DELETE FROM vault_vectors WHERE claim_id = ?1",
                params![entry.id],
            )?;
            let _ = conn.execute(
                "INSERT INTO vault_vectors (claim_id, embedding, metadata) VALUES (?1, ?2, ?3)",
                params![entry.id, blob, meta_json],
            )?;
        }
        Ok(())
    }

    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    fn count(&self) -> Result<usize> {
        let conn = self.conn.lock();
        let count: i64 =
            conn.query_row("SELECT count(*) FROM vault_vectors", [], |row| row.get(0))?;
        Ok(count as usize)
    }
}
