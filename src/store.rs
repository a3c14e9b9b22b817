use crate::snapshot::{Snapshot, SnapshotEncoding, SnapshotError};
use rusqlite::{params, Connection};
use std::error::Error;
use std::fmt;
use std::path::Path;
use std::sync::Mutex;
use std::time::{SystemTime, UNIX_EPOCH};

/// Durable storage for the current game's snapshot. A store holds at most
/// one snapshot; saving replaces it. Implementations must treat unreadable
/// stored data as absent rather than failing, so a corrupted snapshot
/// degrades to a fresh game.
pub trait StateStore {
    fn save(&self, snapshot: &Snapshot) -> Result<(), StoreError>;
    fn load(&self) -> Result<Option<Snapshot>, StoreError>;
    fn clear(&self) -> Result<(), StoreError>;
}

#[derive(Debug)]
pub enum StoreError {
    DatabaseError(String),
    SerializationError(String),
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match &self {
            StoreError::DatabaseError(msg) => {
                write!(f, "Error: Store database error: {}", msg)
            }
            StoreError::SerializationError(msg) => {
                write!(f, "Error: Store serialization error: {}", msg)
            }
        }
    }
}

impl Error for StoreError {}

impl From<rusqlite::Error> for StoreError {
    fn from(err: rusqlite::Error) -> Self {
        StoreError::DatabaseError(err.to_string())
    }
}

impl From<SnapshotError> for StoreError {
    fn from(err: SnapshotError) -> Self {
        StoreError::SerializationError(err.to_string())
    }
}

/// SQLite-backed snapshot store with a single slot.
pub struct SqliteStore {
    conn: Mutex<Connection>,
    encoding: SnapshotEncoding,
}

impl SqliteStore {
    /// Open (or create) a SQLite database at the given path.
    pub fn open<P: AsRef<Path>>(path: P, encoding: SnapshotEncoding) -> Result<Self, StoreError> {
        log::info!("Initializing snapshot store at: {:?}", path.as_ref());
        let conn = Connection::open(path)?;
        Self::init(conn, encoding)
    }

    /// Create an in-memory store (useful for testing).
    pub fn open_in_memory(encoding: SnapshotEncoding) -> Result<Self, StoreError> {
        log::debug!("Creating in-memory snapshot store");
        let conn = Connection::open_in_memory()?;
        Self::init(conn, encoding)
    }

    fn init(conn: Connection, encoding: SnapshotEncoding) -> Result<Self, StoreError> {
        conn.execute(
            "CREATE TABLE IF NOT EXISTS snapshot (
                id INTEGER PRIMARY KEY CHECK (id = 0),
                data TEXT NOT NULL,
                updated_at INTEGER NOT NULL
            )",
            [],
        )?;
        Ok(SqliteStore {
            conn: Mutex::new(conn),
            encoding,
        })
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, Connection>, StoreError> {
        self.conn
            .lock()
            .map_err(|e| StoreError::DatabaseError(e.to_string()))
    }
}

fn epoch_secs_now() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs() as i64
}

impl StateStore for SqliteStore {
    fn save(&self, snapshot: &Snapshot) -> Result<(), StoreError> {
        let data = snapshot.encode(self.encoding)?;
        let conn = self.lock()?;
        conn.execute(
            "INSERT OR REPLACE INTO snapshot (id, data, updated_at) VALUES (0, ?1, ?2)",
            params![data, epoch_secs_now()],
        )?;
        log::debug!("Snapshot saved for round {}", snapshot.round_num);
        Ok(())
    }

    fn load(&self) -> Result<Option<Snapshot>, StoreError> {
        let conn = self.lock()?;
        let data: Option<String> = match conn.query_row(
            "SELECT data FROM snapshot WHERE id = 0",
            [],
            |row| row.get(0),
        ) {
            Ok(data) => Some(data),
            Err(rusqlite::Error::QueryReturnedNoRows) => None,
            Err(e) => return Err(StoreError::from(e)),
        };

        match data {
            None => Ok(None),
            Some(text) => match Snapshot::decode(&text) {
                Ok(snapshot) => Ok(Some(snapshot)),
                Err(e) => {
                    log::warn!("Discarding unreadable snapshot: {}", e);
                    Ok(None)
                }
            },
        }
    }

    fn clear(&self) -> Result<(), StoreError> {
        let conn = self.lock()?;
        conn.execute("DELETE FROM snapshot", [])?;
        log::debug!("Snapshot store cleared");
        Ok(())
    }
}

/// In-memory snapshot store. Runs the snapshot through the same text
/// encoding as a durable store would, so it exercises the full round trip.
pub struct MemoryStore {
    slot: Mutex<Option<String>>,
    encoding: SnapshotEncoding,
}

impl MemoryStore {
    pub fn new(encoding: SnapshotEncoding) -> Self {
        MemoryStore {
            slot: Mutex::new(None),
            encoding,
        }
    }
}

impl StateStore for MemoryStore {
    fn save(&self, snapshot: &Snapshot) -> Result<(), StoreError> {
        let data = snapshot.encode(self.encoding)?;
        let mut slot = self
            .slot
            .lock()
            .map_err(|e| StoreError::DatabaseError(e.to_string()))?;
        *slot = Some(data);
        Ok(())
    }

    fn load(&self) -> Result<Option<Snapshot>, StoreError> {
        let slot = self
            .slot
            .lock()
            .map_err(|e| StoreError::DatabaseError(e.to_string()))?;
        match slot.as_deref() {
            None => Ok(None),
            Some(text) => match Snapshot::decode(text) {
                Ok(snapshot) => Ok(Some(snapshot)),
                Err(e) => {
                    log::warn!("Discarding unreadable snapshot: {}", e);
                    Ok(None)
                }
            },
        }
    }

    fn clear(&self) -> Result<(), StoreError> {
        let mut slot = self
            .slot
            .lock()
            .map_err(|e| StoreError::DatabaseError(e.to_string()))?;
        *slot = None;
        Ok(())
    }
}
