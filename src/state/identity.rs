use chrono::Utc;
use rand::rngs::OsRng;
use rand::RngCore;
use rusqlite::{Connection, OptionalExtension};
use std::path::PathBuf;

use crate::error::IdentityError;

/// Storage key the client identifier lives under.
pub const USER_ID_KEY: &str = "userId";

/// Length of a generated client identifier.
pub const ID_LENGTH: usize = 16;

const ALPHABET: &[u8; 62] =
    b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";

/// Generate a fresh client identifier: 16 characters drawn from the
/// 62-character alphabet, sourced from the OS CSPRNG.
pub fn generate_client_id() -> String {
    let mut bytes = [0u8; ID_LENGTH];
    OsRng.fill_bytes(&mut bytes);

    bytes
        .iter()
        .map(|b| ALPHABET[*b as usize % ALPHABET.len()] as char)
        .collect()
}

/// A keyed persistent string store with get / set-if-absent semantics.
///
/// The production implementation is SQLite-backed; tests substitute an
/// in-memory fake. The controller only ever touches identity through this
/// trait.
pub trait IdentityStore {
    fn get(&self, key: &str) -> Result<Option<String>, IdentityError>;

    /// Store `value` under `key` unless the key already holds a value.
    fn set_if_absent(&mut self, key: &str, value: &str) -> Result<(), IdentityError>;
}

/// Read the persisted client identifier, generating and persisting a new one
/// on first run. Must complete before any network call; the identifier is the
/// sole key the backend uses to find this client's image.
pub fn ensure_client_id(store: &mut dyn IdentityStore) -> Result<String, IdentityError> {
    if let Some(existing) = store.get(USER_ID_KEY)? {
        return Ok(existing);
    }

    let id = generate_client_id();
    store.set_if_absent(USER_ID_KEY, &id)?;

    // Re-read rather than trusting our own value: if another process won the
    // first-write race, its identifier is the persisted one.
    Ok(store.get(USER_ID_KEY)?.unwrap_or(id))
}

/// SQLite-backed identity store.
///
/// The database file is created in the user's data directory:
/// - Linux: ~/.local/share/room-painter/room_painter.db
/// - macOS: ~/Library/Application Support/room-painter/room_painter.db
/// - Windows: %APPDATA%\room-painter\room_painter.db
pub struct SqliteIdentityStore {
    conn: Connection,
}

impl SqliteIdentityStore {
    pub fn new() -> Result<Self, IdentityError> {
        let db_path = Self::db_path();

        if let Some(parent) = db_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let conn = Connection::open(&db_path)?;
        log::debug!("Identity store opened at {}", db_path.display());

        Self::from_connection(conn)
    }

    /// Build a store around an existing connection (tests use an in-memory
    /// database through this).
    pub fn from_connection(conn: Connection) -> Result<Self, IdentityError> {
        let store = SqliteIdentityStore { conn };
        store.init_schema()?;
        Ok(store)
    }

    fn db_path() -> PathBuf {
        let mut path = dirs::data_dir()
            .or_else(dirs::home_dir)
            .unwrap_or_else(|| PathBuf::from("."));

        path.push("room-painter");
        path.push("room_painter.db");
        path
    }

    fn init_schema(&self) -> Result<(), IdentityError> {
        self.conn.execute(
            "CREATE TABLE IF NOT EXISTS identity (
                key             TEXT PRIMARY KEY,
                value           TEXT NOT NULL,
                created_at      INTEGER NOT NULL
            )",
            [],
        )?;

        Ok(())
    }
}

impl IdentityStore for SqliteIdentityStore {
    fn get(&self, key: &str) -> Result<Option<String>, IdentityError> {
        let value = self
            .conn
            .query_row(
                "SELECT value FROM identity WHERE key = ?1",
                [key],
                |row| row.get(0),
            )
            .optional()?;

        Ok(value)
    }

    fn set_if_absent(&mut self, key: &str, value: &str) -> Result<(), IdentityError> {
        // INSERT OR IGNORE: an existing identity is never overwritten.
        self.conn.execute(
            "INSERT OR IGNORE INTO identity (key, value, created_at) VALUES (?1, ?2, ?3)",
            rusqlite::params![key, value, Utc::now().timestamp()],
        )?;

        Ok(())
    }
}
