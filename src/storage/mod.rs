//! SQLite-backed trade and note stores
//!
//! The analytics pipeline never touches a connection: it receives trade
//! snapshots by value through the [`TradeStore`] interface. `Database` is the
//! one concrete implementation, a single-file SQLite database created on
//! first use.


use crate::error::{Error, Result};
use crate::model::TradeRecord;
use async_trait::async_trait;
use serde::Serialize;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use std::str::FromStr;

/// Snapshot access to the recorded trades.
///
/// Rows come back in insertion order; the frequency tie-breaks downstream
/// depend on that ordering being reproducible.
#[async_trait]
pub trait TradeStore: Send + Sync {
    async fn append(&self, trade: &TradeRecord) -> Result<i64>;
    async fn fetch_all(&self) -> Result<Vec<TradeRecord>>;
    async fn fetch_by_date(&self, date: &str) -> Result<Vec<TradeRecord>>;
}

/// A free-text note kept alongside the trade history.
#[derive(Debug, Clone, PartialEq, Serialize, sqlx::FromRow)]
pub struct Note {
    pub id: i64,
    pub title: String,
    pub content: String,
    pub date: String,
}

#[derive(sqlx::FromRow)]
struct TradeRow {
    coin: String,
    position: String,
    leverage: f64,
    entry_price: f64,
    exit_price: f64,
    mode: String,
    date: String,
}

impl TryFrom<TradeRow> for TradeRecord {
    type Error = Error;

    fn try_from(row: TradeRow) -> Result<TradeRecord> {
        Ok(TradeRecord {
            coin: row.coin,
            position: row.position.parse()?,
            leverage: row.leverage,
            entry_price: row.entry_price,
            exit_price: row.exit_price,
            mode: row.mode.parse()?,
            date: row.date,
        })
    }
}

#[derive(Debug, Clone)]
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// Opens (or creates) the database file and ensures the schema exists.
    ///
    /// `":memory:"` is accepted for a throwaway in-memory database; the pool
    /// is capped at one connection so that case keeps a single coherent
    /// store.
    pub async fn connect(path: &str) -> Result<Self> {
        let options = if path == ":memory:" {
            SqliteConnectOptions::from_str("sqlite::memory:")?
        } else {
            SqliteConnectOptions::new()
                .filename(path)
                .create_if_missing(true)
        };
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect_with(options)
            .await?;

        let db = Self { pool };
        db.init_schema().await?;
        tracing::debug!(path, "database ready");
        Ok(db)
    }

    async fn init_schema(&self) -> Result<()> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS trades (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                coin_name TEXT NOT NULL,
                position TEXT NOT NULL,
                leverage REAL NOT NULL,
                entry_price REAL NOT NULL,
                exit_price REAL NOT NULL,
                mode TEXT NOT NULL,
                date TEXT NOT NULL
            )
            "#,
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS notes (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                title TEXT NOT NULL UNIQUE,
                content TEXT NOT NULL,
                date TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP
            )
            "#,
        )
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    pub async fn add_note(&self, title: &str, content: &str) -> Result<i64> {
        let result = sqlx::query("INSERT INTO notes (title, content) VALUES (?, ?)")
            .bind(title)
            .bind(content)
            .execute(&self.pool)
            .await?;
        tracing::info!(title, "note saved");
        Ok(result.last_insert_rowid())
    }

    /// All notes, newest first.
    pub async fn list_notes(&self) -> Result<Vec<Note>> {
        let notes = sqlx::query_as::<_, Note>(
            "SELECT id, title, content, date FROM notes ORDER BY date DESC",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(notes)
    }

    pub async fn get_note(&self, title: &str) -> Result<Option<Note>> {
        let note = sqlx::query_as::<_, Note>(
            "SELECT id, title, content, date FROM notes WHERE title = ?",
        )
        .bind(title)
        .fetch_optional(&self.pool)
        .await?;
        Ok(note)
    }

    /// Replaces a note's title and content, keyed by the current title.
    pub async fn update_note(&self, title: &str, new_title: &str, content: &str) -> Result<()> {
        let result = sqlx::query("UPDATE notes SET title = ?, content = ? WHERE title = ?")
            .bind(new_title)
            .bind(content)
            .bind(title)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(Error::NoteNotFound(title.to_string()));
        }
        Ok(())
    }

    pub async fn delete_note(&self, title: &str) -> Result<()> {
        let result = sqlx::query("DELETE FROM notes WHERE title = ?")
            .bind(title)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(Error::NoteNotFound(title.to_string()));
        }
        tracing::info!(title, "note deleted");
        Ok(())
    }
}

#[async_trait]
impl TradeStore for Database {
    async fn append(&self, trade: &TradeRecord) -> Result<i64> {
        let result = sqlx::query(
            r#"
            INSERT INTO trades (coin_name, position, leverage, entry_price, exit_price, mode, date)
            VALUES (?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&trade.coin)
        .bind(trade.position.to_string())
        .bind(trade.leverage)
        .bind(trade.entry_price)
        .bind(trade.exit_price)
        .bind(trade.mode.to_string())
        .bind(&trade.date)
        .execute(&self.pool)
        .await?;
        tracing::info!(coin = %trade.coin, date = %trade.date, "trade recorded");
        Ok(result.last_insert_rowid())
    }

    async fn fetch_all(&self) -> Result<Vec<TradeRecord>> {
        let rows = sqlx::query_as::<_, TradeRow>(
            r#"
            SELECT coin_name AS coin, position, leverage, entry_price, exit_price, mode, date
            FROM trades ORDER BY id ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;
        rows.into_iter().map(TradeRecord::try_from).collect()
    }

    async fn fetch_by_date(&self, date: &str) -> Result<Vec<TradeRecord>> {
        let rows = sqlx::query_as::<_, TradeRow>(
            r#"
            SELECT coin_name AS coin, position, leverage, entry_price, exit_price, mode, date
            FROM trades WHERE date = ? ORDER BY id ASC
            "#,
        )
        .bind(date)
        .fetch_all(&self.pool)
        .await?;
        rows.into_iter().map(TradeRecord::try_from).collect()
    }
}
